//! Log-only notifier

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::domain::notifier::{DeliveryReceipt, EmailMessage, Notifier};
use crate::domain::DomainError;

/// Notifier that logs instead of sending; the default backend so demo runs
/// never email anyone by accident.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, DomainError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "notifier in log mode, not sending"
        );

        Ok(DeliveryReceipt {
            message_id: format!("log-{}", Uuid::new_v4()),
        })
    }
}
