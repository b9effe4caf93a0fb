mod app_config;

pub use app_config::{
    AppConfig, CrmBackend, CrmConfig, LlmConfig, LogFormat, LoggingConfig, NotifierBackend,
    NotifierConfig, RoutingConfig, ServerConfig,
};
