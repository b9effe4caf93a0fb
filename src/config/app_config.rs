use serde::Deserialize;

use crate::domain::complaint::ComplaintRecipients;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub routing: RoutingConfig,
    pub llm: LlmConfig,
    pub crm: CrmConfig,
    pub notifier: NotifierConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Owner ids leads and escalations are routed to
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    pub ae_owner_id: String,
    pub sdr_owner_id: String,
    pub nurture_owner_id: String,
    pub escalation_owner_id: String,

    /// Leads at or above this score trigger the high-value email alert
    pub alert_threshold: f64,
}

/// Smart decision path configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Master switch; individual runs may still opt out
    pub enabled: bool,

    pub model: String,

    /// OpenAI-compatible endpoint base URL
    pub base_url: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CrmBackend {
    /// Seeded in-memory simulator (default for demos and tests)
    #[default]
    Memory,

    /// REST client against a live CRM instance
    Rest,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrmConfig {
    pub backend: CrmBackend,

    /// Base URL of the CRM REST API (rest backend only)
    pub base_url: String,

    /// OAuth token endpoint (rest backend only)
    pub token_url: String,

    /// OAuth client id; the secret comes from `CRM_CLIENT_SECRET`
    pub client_id: String,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotifierBackend {
    /// Log-only notifier (default); no mail leaves the process
    #[default]
    Log,

    /// Resend HTTP API; key comes from `RESEND_API_KEY`
    Resend,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    pub backend: NotifierBackend,
    pub from_email: String,

    #[serde(flatten)]
    pub recipients: ComplaintRecipients,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            ae_owner_id: "owner-ae".to_string(),
            sdr_owner_id: "owner-sdr".to_string(),
            nurture_owner_id: "owner-nurture".to_string(),
            escalation_owner_id: "owner-escalation".to_string(),
            alert_threshold: 0.60,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com".to_string(),
            timeout_ms: 30_000,
        }
    }
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            backend: CrmBackend::default(),
            base_url: String::new(),
            token_url: String::new(),
            client_id: String::new(),
        }
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            backend: NotifierBackend::default(),
            from_email: "noreply@example.com".to_string(),
            recipients: ComplaintRecipients::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Resolve the owner id for a routed owner type
    pub fn owner_id_for(&self, owner_type: crate::domain::lead::OwnerType) -> &str {
        use crate::domain::lead::OwnerType;

        match owner_type {
            OwnerType::AccountExecutive => &self.routing.ae_owner_id,
            OwnerType::SalesDevelopment => &self.routing.sdr_owner_id,
            OwnerType::Nurture => &self.routing.nurture_owner_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.routing.alert_threshold, 0.60);
        assert!(!config.llm.enabled);
        assert_eq!(config.crm.backend, CrmBackend::Memory);
        assert_eq!(config.notifier.backend, NotifierBackend::Log);
    }

    #[test]
    fn test_owner_id_resolution() {
        use crate::domain::lead::OwnerType;

        let config = AppConfig::default();
        assert_eq!(config.owner_id_for(OwnerType::AccountExecutive), "owner-ae");
        assert_eq!(config.owner_id_for(OwnerType::Nurture), "owner-nurture");
    }
}
