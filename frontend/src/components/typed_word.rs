use yew::prelude::*;
use gloo_timers::callback::Timeout;

use crate::typing::{Timing, WordCycle, DEFAULT_WORDS};

fn default_words() -> Vec<String> {
    DEFAULT_WORDS.iter().map(|w| w.to_string()).collect()
}

#[derive(Properties, PartialEq)]
pub struct TypedWordProps {
    #[prop_or_else(default_words)]
    pub words: Vec<String>,
    #[prop_or_default]
    pub timing: Timing,
}

#[function_component(TypedWord)]
pub fn typed_word(props: &TypedWordProps) -> Html {
    let cycle = use_state(|| WordCycle::new(props.words.clone(), props.timing));
    // Delay until the next step; the first one waits for the initial delay.
    let next_delay = use_mut_ref(|| (*cycle).as_ref().map(WordCycle::initial_delay));
    let seeded_with = use_mut_ref(|| (props.words.clone(), props.timing));

    // New words or timing restart the animation from the first word.
    {
        let cycle = cycle.clone();
        let next_delay = next_delay.clone();
        use_effect_with_deps(
            move |seed: &(Vec<String>, Timing)| {
                if *seeded_with.borrow() != *seed {
                    let fresh = WordCycle::new(seed.0.clone(), seed.1);
                    *next_delay.borrow_mut() = fresh.as_ref().map(WordCycle::initial_delay);
                    *seeded_with.borrow_mut() = seed.clone();
                    cycle.set(fresh);
                }
                || ()
            },
            (props.words.clone(), props.timing),
        );
    }

    {
        let cycle_setter = cycle.setter();
        let next_delay = next_delay.clone();
        use_effect_with_deps(
            move |current| {
                let delay = *next_delay.borrow();
                // Dropping the Timeout cancels it, so a stale tick never fires.
                let timeout = match (current.clone(), delay) {
                    (Some(mut next), Some(delay)) => Some(Timeout::new(delay, move || {
                        *next_delay.borrow_mut() = Some(next.step());
                        cycle_setter.set(Some(next));
                    })),
                    _ => None,
                };
                move || drop(timeout)
            },
            (*cycle).clone(),
        );
    }

    match &*cycle {
        Some(cycle) => html! {
            <span
                id="typed-word"
                class={classes!("typed-word", cycle.is_active().then_some("is-on"))}
                aria-live="polite"
            >
                { cycle.text() }
            </span>
        },
        None => html! {},
    }
}
