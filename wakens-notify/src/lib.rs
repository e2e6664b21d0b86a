pub mod mailer;
pub mod template;

pub use mailer::{EmailDispatcher, NoopDispatcher};
pub use template::{confirmation_email, EmailMessage};
