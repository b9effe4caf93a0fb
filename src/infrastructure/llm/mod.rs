//! Smart decision provider implementations

mod openai;

pub use openai::OpenAiDecisionClient;
