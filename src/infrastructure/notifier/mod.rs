//! Notifier implementations

mod log;
mod resend;

pub use log::LogNotifier;
pub use resend::ResendNotifier;
