use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Decision service error: {provider} - {message}")]
    DecisionService { provider: String, message: String },

    #[error("No content to classify: {message}")]
    ContentMissing { message: String },

    #[error("Collaborator error: {system} - {message}")]
    Collaborator { system: String, message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn decision_service(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DecisionService {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn content_missing(message: impl Into<String>) -> Self {
        Self::ContentMissing {
            message: message.into(),
        }
    }

    pub fn collaborator(system: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Collaborator {
            system: system.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the hybrid decision port is allowed to absorb this error
    /// into a deterministic fallback result.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DecisionService { .. } | Self::ContentMissing { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collaborator_error_display() {
        let error = DomainError::collaborator("crm", "connection refused");
        assert_eq!(
            error.to_string(),
            "Collaborator error: crm - connection refused"
        );
    }

    #[test]
    fn test_recoverable_classes() {
        assert!(DomainError::decision_service("openai", "timeout").is_recoverable());
        assert!(DomainError::content_missing("empty ticket").is_recoverable());
        assert!(!DomainError::collaborator("erp", "503").is_recoverable());
        assert!(!DomainError::configuration("missing key").is_recoverable());
    }
}
