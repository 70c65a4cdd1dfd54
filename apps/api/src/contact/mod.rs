// Contact form: validation, notification rendering and delivery.

pub mod email;
pub mod handlers;
pub mod notifier;
pub mod validation;

pub use notifier::{LogNotifier, MailRelayNotifier, Notifier, NotifyError};
