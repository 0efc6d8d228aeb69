/// Words cycled in the hero headline.
pub const DEFAULT_WORDS: [&str; 3] = ["convertem", "vendem", "impactam"];

/// Shown instead of an empty prefix so the inline box keeps its height.
pub const PLACEHOLDER: &str = "\u{00A0}";

/// Delays, in milliseconds, between animation steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub type_speed: u32,
    pub delete_speed: u32,
    pub hold: u32,
    pub transition: u32,
    pub initial_delay: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            type_speed: 200,
            delete_speed: 100,
            hold: 900,
            transition: 120,
            initial_delay: 250,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first tick, `is-on` still off.
    Starting,
    Typing,
    /// Full word shown; the next step starts deleting.
    Holding,
    Deleting,
    /// Word fully deleted and index moved on; `is-on` off until the next step.
    Advancing,
}

/// Type/hold/delete/advance loop over a fixed list of words.
///
/// Every call to [`WordCycle::step`] performs one tick and returns how long to wait
/// before the next one, so the caller only ever has a single timer pending.
#[derive(Clone, Debug, PartialEq)]
pub struct WordCycle {
    words: Vec<String>,
    timing: Timing,
    word_index: usize,
    char_index: usize,
    phase: Phase,
    active: bool,
}

impl WordCycle {
    /// Returns `None` when there is nothing to animate.
    pub fn new<I, S>(words: I, timing: Timing) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(Into::into)
            .filter(|w: &String| !w.is_empty())
            .collect();
        if words.is_empty() {
            return None;
        }

        // Seed the first character so the element is never blank before the loop starts.
        Some(Self {
            words,
            timing,
            word_index: 0,
            char_index: 1,
            phase: Phase::Starting,
            active: false,
        })
    }

    #[cfg(test)]
    pub fn word_index(&self) -> usize {
        self.word_index
    }

    #[cfg(test)]
    pub fn char_index(&self) -> usize {
        self.char_index
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the `is-on` class should be present.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current_word(&self) -> &str {
        &self.words[self.word_index]
    }

    /// Delay before the first call to [`WordCycle::step`].
    pub fn initial_delay(&self) -> u32 {
        self.timing.initial_delay
    }

    /// Text to render: the typed prefix of the current word, or [`PLACEHOLDER`].
    pub fn text(&self) -> String {
        if self.char_index == 0 {
            return PLACEHOLDER.to_string();
        }
        self.current_word().chars().take(self.char_index).collect()
    }

    fn word_len(&self) -> usize {
        self.current_word().chars().count()
    }

    /// Runs one tick and returns the delay in ms until the next one.
    pub fn step(&mut self) -> u32 {
        self.active = true;
        match self.phase {
            Phase::Starting | Phase::Typing | Phase::Advancing => {
                let len = self.word_len();
                self.char_index = (self.char_index + 1).min(len);
                if self.char_index == len {
                    self.phase = Phase::Holding;
                    self.timing.hold
                } else {
                    self.phase = Phase::Typing;
                    self.timing.type_speed
                }
            }
            Phase::Holding | Phase::Deleting => {
                self.char_index = self.char_index.saturating_sub(1);
                if self.char_index == 0 {
                    self.word_index = (self.word_index + 1) % self.words.len();
                    self.phase = Phase::Advancing;
                    self.active = false;
                    self.timing.transition
                } else {
                    self.phase = Phase::Deleting;
                    self.timing.delete_speed
                }
            }
        }
    }
}
