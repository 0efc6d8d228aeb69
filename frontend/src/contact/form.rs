use log::{error, info, warn};
use thiserror::Error;

use super::validation::{
    validate_captcha, validate_email, validate_message, validate_name, validate_phone,
    ValidationError,
};

pub const SENDING_LABEL: &str = "Enviando...";
pub const SENT_LABEL: &str = "Enviado ✓";

/// How long the success label stays before the button is restored.
pub const SENT_RESET_MS: u32 = 2_200;

/// Delay before re-reading the widget token after it was clicked.
pub const CAPTCHA_RECHECK_MS: u32 = 200;

/// Bot-check widget as seen by the form.
pub trait BotCheck {
    /// Current verification token, empty when the challenge is not solved.
    fn response(&self) -> String;
    fn reset(&self);
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("EmailJS não carregou. Verifique a ordem dos scripts.")]
    DeliveryUnavailable,
    #[error("one or more fields are invalid")]
    Invalid,
    #[error("Não foi possível enviar agora. Tente me contatar pelas redes sociais :).")]
    Rejected { detail: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Phone, Field::Message];

    /// `name` attribute of the input, also the template variable on the delivery side.
    pub fn input_name(self) -> &'static str {
        match self {
            Field::Name => "from_name",
            Field::Email => "reply_to",
            Field::Phone => "phone",
            Field::Message => "message",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn validate(self, value: &str) -> Result<(), ValidationError> {
        match self {
            Field::Name => validate_name(value),
            Field::Email => validate_email(value),
            Field::Phone => validate_phone(value),
            Field::Message => validate_message(value),
        }
    }
}

/// Error element bound to one input. Clearing hides it but keeps the last text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorSlot {
    message: String,
    active: bool,
}

impl ErrorSlot {
    fn set(&mut self, message: impl ToString) {
        self.message = message.to_string();
        self.active = true;
    }

    fn clear(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The message while the slot is shown.
    #[cfg(test)]
    pub fn visible(&self) -> Option<&str> {
        self.active.then_some(self.message.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonState {
    Idle,
    Sending,
    Sent,
}

/// Validation, error display and submit-button state for the contact form.
///
/// The two external capabilities are resolved once by the caller: `delivery_available`
/// says whether the delivery client loaded, `bot_check` is `None` when the widget did not.
pub struct ContactForm<B> {
    values: [String; 4],
    errors: [ErrorSlot; 4],
    captcha_error: ErrorSlot,
    button: ButtonState,
    idle_label: String,
    delivery_available: bool,
    bot_check: Option<B>,
}

impl<B: BotCheck> ContactForm<B> {
    pub fn new(idle_label: impl Into<String>, delivery_available: bool, bot_check: Option<B>) -> Self {
        if !delivery_available {
            warn!("Email delivery client is not loaded, submissions will be refused");
        }
        if bot_check.is_none() {
            warn!("Bot-check widget is not loaded, captcha validation is skipped");
        }
        Self {
            values: Default::default(),
            errors: Default::default(),
            captcha_error: ErrorSlot::default(),
            button: ButtonState::Idle,
            idle_label: idle_label.into(),
            delivery_available,
            bot_check,
        }
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn error(&self, field: Field) -> &ErrorSlot {
        &self.errors[field.index()]
    }

    pub fn captcha_error(&self) -> &ErrorSlot {
        &self.captcha_error
    }

    pub fn has_bot_check(&self) -> bool {
        self.bot_check.is_some()
    }

    pub fn button_state(&self) -> ButtonState {
        self.button
    }

    pub fn button_label(&self) -> &str {
        match self.button {
            ButtonState::Idle => &self.idle_label,
            ButtonState::Sending => SENDING_LABEL,
            ButtonState::Sent => SENT_LABEL,
        }
    }

    pub fn button_disabled(&self) -> bool {
        self.button != ButtonState::Idle
    }

    /// Stores the new value and hides the field's error regardless of validity.
    pub fn input(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = value.into();
        self.errors[field.index()].clear();
    }

    /// Re-validates only the field that lost focus.
    pub fn blur(&mut self, field: Field) -> bool {
        self.validate(field)
    }

    pub fn validate(&mut self, field: Field) -> bool {
        let result = field.validate(&self.values[field.index()]);
        apply(&mut self.errors[field.index()], result)
    }

    pub fn validate_captcha(&mut self) -> bool {
        let token = self.bot_check.as_ref().map(|b| b.response());
        apply(&mut self.captcha_error, validate_captcha(token.as_deref()))
    }

    /// Runs every validator so all invalid fields are marked at once.
    pub fn validate_all(&mut self) -> bool {
        let fields = Field::ALL.map(|f| self.validate(f));
        let captcha = self.validate_captcha();
        fields.iter().all(|ok| *ok) && captcha
    }

    /// Starts a submission. On `Ok` the button is in the sending state and the caller
    /// must perform the delivery call, then report back with [`Self::sent`] or [`Self::failed`].
    pub fn submit(&mut self) -> Result<(), SubmitError> {
        if !self.delivery_available {
            self.errors[Field::Email.index()].set(SubmitError::DeliveryUnavailable);
            return Err(SubmitError::DeliveryUnavailable);
        }
        if !self.validate_all() {
            return Err(SubmitError::Invalid);
        }
        self.button = ButtonState::Sending;
        info!("Submitting contact form");
        Ok(())
    }

    /// Delivery succeeded. The caller schedules [`Self::settle`] after [`SENT_RESET_MS`].
    pub fn sent(&mut self) {
        info!("Contact form delivered");
        for value in &mut self.values {
            value.clear();
        }
        for slot in &mut self.errors {
            slot.clear();
        }
        self.captcha_error.clear();
        self.reset_bot_check();
        self.button = ButtonState::Sent;
    }

    /// Delivery was rejected. The detail is logged and never shown.
    pub fn failed(&mut self, detail: impl Into<String>) {
        let detail = detail.into();
        error!("Erro EmailJS: {}", detail);
        self.button = ButtonState::Idle;
        self.reset_bot_check();
        self.errors[Field::Email.index()].set(SubmitError::Rejected { detail });
    }

    /// Restores the idle button after the success label was shown.
    pub fn settle(&mut self) {
        if self.button == ButtonState::Sent {
            self.button = ButtonState::Idle;
        }
    }

    /// Hides the captcha error once the widget reports a token.
    pub fn recheck_captcha(&mut self) {
        let solved = self
            .bot_check
            .as_ref()
            .is_some_and(|b| !b.response().is_empty());
        if solved {
            self.captcha_error.clear();
        }
    }

    fn reset_bot_check(&self) {
        if let Some(bot_check) = &self.bot_check {
            bot_check.reset();
        }
    }
}

fn apply(slot: &mut ErrorSlot, result: Result<(), ValidationError>) -> bool {
    match result {
        Ok(()) => {
            slot.clear();
            true
        }
        Err(e) => {
            slot.set(e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;

    #[derive(Clone, Default)]
    struct FakeBotCheck {
        token: Rc<RefCell<String>>,
        resets: Rc<Cell<usize>>,
    }

    impl FakeBotCheck {
        fn solved() -> Self {
            let fake = Self::default();
            fake.token.replace("token".to_string());
            fake
        }
    }

    impl BotCheck for FakeBotCheck {
        fn response(&self) -> String {
            self.token.borrow().clone()
        }

        fn reset(&self) {
            self.resets.set(self.resets.get() + 1);
            self.token.borrow_mut().clear();
        }
    }

    fn form_with(bot: Option<FakeBotCheck>) -> ContactForm<FakeBotCheck> {
        ContactForm::new("Enviar mensagem", true, bot)
    }

    fn fill(form: &mut ContactForm<FakeBotCheck>, name: &str, email: &str, phone: &str, message: &str) {
        form.input(Field::Name, name);
        form.input(Field::Email, email);
        form.input(Field::Phone, phone);
        form.input(Field::Message, message);
    }

    fn active_fields(form: &ContactForm<FakeBotCheck>) -> Vec<Field> {
        Field::ALL.into_iter().filter(|f| form.error(*f).is_active()).collect()
    }

    #[test]
    fn only_name_fails_when_name_is_empty() {
        let mut form = form_with(None);
        fill(&mut form, "", "a@b.com", "11987654321", "hi");

        assert!(!form.validate_all());
        assert_eq!(active_fields(&form), vec![Field::Name]);
        assert_eq!(form.error(Field::Name).visible(), Some("Informe seu nome"));
        assert!(!form.captcha_error().is_active());
    }

    #[test]
    fn every_invalid_field_is_marked_at_once() {
        let mut form = form_with(Some(FakeBotCheck::default()));
        fill(&mut form, "", "nope", "123", "");

        assert_eq!(form.submit(), Err(SubmitError::Invalid));
        assert_eq!(active_fields(&form), Field::ALL.to_vec());
        assert!(form.captcha_error().is_active());
        assert_eq!(form.button_state(), ButtonState::Idle);
    }

    #[test]
    fn validation_is_idempotent() {
        let mut form = form_with(None);
        fill(&mut form, "Ana", "ana@", "11987654321", "oi");

        let first = (form.validate(Field::Email), form.error(Field::Email).clone());
        let second = (form.validate(Field::Email), form.error(Field::Email).clone());
        assert_eq!(first, second);
        assert!(!first.0);
    }

    #[test]
    fn input_clears_only_that_field() {
        let mut form = form_with(None);
        form.validate_all();
        form.input(Field::Phone, "1");

        assert!(!form.error(Field::Phone).is_active());
        assert!(form.error(Field::Name).is_active());
        // hidden, not erased
        assert_eq!(form.error(Field::Phone).message(), "Informe seu telefone");
    }

    #[test]
    fn blur_validates_only_that_field() {
        let mut form = form_with(None);
        assert!(!form.blur(Field::Phone));
        assert_eq!(active_fields(&form), vec![Field::Phone]);
        assert_eq!(form.error(Field::Phone).visible(), Some("Informe seu telefone"));

        form.input(Field::Phone, "(11) 98765-4321");
        assert!(form.blur(Field::Phone));
        assert!(active_fields(&form).is_empty());
    }

    #[test]
    fn missing_token_blocks_submission_with_only_captcha_error() {
        let mut form = form_with(Some(FakeBotCheck::default()));
        fill(&mut form, "Ana", "a@b.com", "11987654321", "hi");

        assert_eq!(form.submit(), Err(SubmitError::Invalid));
        assert!(active_fields(&form).is_empty());
        assert_eq!(form.captcha_error().visible(), Some("Confirme que você não é um robô"));
        assert!(!form.button_disabled());
    }

    #[test]
    fn absent_widget_passes_captcha() {
        let mut form = form_with(None);
        assert!(form.validate_captcha());
        assert!(!form.has_bot_check());
    }

    #[test]
    fn absent_delivery_client_runs_no_validators() {
        let mut form: ContactForm<FakeBotCheck> = ContactForm::new("Enviar", false, Some(FakeBotCheck::default()));

        assert_eq!(form.submit(), Err(SubmitError::DeliveryUnavailable));
        assert_eq!(active_fields(&form), vec![Field::Email]);
        assert_eq!(
            form.error(Field::Email).visible(),
            Some("EmailJS não carregou. Verifique a ordem dos scripts.")
        );
        assert!(!form.captcha_error().is_active());
        assert_eq!(form.button_state(), ButtonState::Idle);
    }

    #[test]
    fn button_is_disabled_while_sending() {
        let mut form = form_with(Some(FakeBotCheck::solved()));
        fill(&mut form, "Ana", "a@b.com", "11987654321", "hi");

        assert_eq!(form.submit(), Ok(()));
        assert!(form.button_disabled());
        assert_eq!(form.button_label(), SENDING_LABEL);
    }

    #[test]
    fn success_resets_everything_and_the_widget_once() {
        let bot = FakeBotCheck::solved();
        let mut form = form_with(Some(bot.clone()));
        fill(&mut form, "Ana", "a@b.com", "11987654321", "hi");
        form.submit().unwrap();

        form.sent();
        assert_eq!(bot.resets.get(), 1);
        assert!(Field::ALL.iter().all(|f| form.value(*f).is_empty()));
        assert!(active_fields(&form).is_empty());
        assert!(!form.captcha_error().is_active());
        assert_eq!(form.button_label(), SENT_LABEL);
        assert!(form.button_disabled());

        form.settle();
        assert_eq!(form.button_state(), ButtonState::Idle);
        assert_eq!(form.button_label(), "Enviar mensagem");
        assert!(!form.button_disabled());
        assert_eq!(bot.resets.get(), 1);
    }

    #[test]
    fn rejection_restores_button_and_shows_fallback() {
        let bot = FakeBotCheck::solved();
        let mut form = form_with(Some(bot.clone()));
        fill(&mut form, "Ana", "a@b.com", "11987654321", "hi");
        form.submit().unwrap();

        form.failed("{\"status\":400,\"text\":\"bad template\"}");
        assert_eq!(form.button_state(), ButtonState::Idle);
        assert_eq!(form.button_label(), "Enviar mensagem");
        assert_eq!(bot.resets.get(), 1);
        assert_eq!(
            form.error(Field::Email).visible(),
            Some("Não foi possível enviar agora. Tente me contatar pelas redes sociais :).")
        );
        assert_eq!(form.value(Field::Name), "Ana");
    }

    #[test]
    fn settle_does_not_touch_an_in_flight_submission() {
        let mut form = form_with(None);
        fill(&mut form, "Ana", "a@b.com", "11987654321", "hi");
        form.submit().unwrap();
        form.settle();
        assert_eq!(form.button_state(), ButtonState::Sending);
    }

    #[test]
    fn recheck_clears_captcha_error_once_solved() {
        let bot = FakeBotCheck::default();
        let mut form = form_with(Some(bot.clone()));
        form.validate_captcha();

        form.recheck_captcha();
        assert!(form.captcha_error().is_active());

        bot.token.replace("token".to_string());
        form.recheck_captcha();
        assert!(!form.captcha_error().is_active());
    }

    #[test]
    fn rejected_display_hides_detail() {
        let err = SubmitError::Rejected { detail: "secret".to_string() };
        assert!(!err.to_string().contains("secret"));
    }
}
