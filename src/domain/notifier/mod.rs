//! Outbound notification boundary

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::DomainError;

/// An outbound email message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Acknowledgement returned by the notification service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    pub message_id: String,
}

/// Boundary to the email notification service
#[async_trait]
pub trait Notifier: Send + Sync + Debug {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::mock::MockNotifier;
    use super::*;

    #[test]
    fn test_mock_notifier_records_messages() {
        let notifier = MockNotifier::new();

        let receipt =
            tokio_test::block_on(notifier.send(&EmailMessage::new("ops@example.com", "s", "b")))
                .unwrap();

        assert_eq!(receipt.message_id, "msg-1");
        assert_eq!(notifier.sent_messages().len(), 1);
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Mock notifier recording every message it is asked to send
    #[derive(Debug, Default)]
    pub struct MockNotifier {
        error: Option<String>,
        pub sent: Mutex<Vec<EmailMessage>>,
    }

    impl MockNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn sent_messages(&self) -> Vec<EmailMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for MockNotifier {
        async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, DomainError> {
            if let Some(ref error) = self.error {
                return Err(DomainError::collaborator("notifier", error));
            }

            let mut sent = self.sent.lock().unwrap();
            sent.push(message.clone());
            Ok(DeliveryReceipt {
                message_id: format!("msg-{}", sent.len()),
            })
        }
    }
}
