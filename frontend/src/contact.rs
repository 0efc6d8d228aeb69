pub mod form;
pub mod validation;

pub use form::{BotCheck, ButtonState, ContactForm, Field};
