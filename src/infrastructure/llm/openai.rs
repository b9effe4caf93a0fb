//! OpenAI-backed decision provider
//!
//! Implements the smart decision boundary against an OpenAI-compatible
//! chat-completions endpoint. Model output is parsed into raw payloads with
//! optional fields and validated explicitly: required fields missing means
//! the call failed (and the hybrid port falls back), optional fields are
//! filled from documented defaults. Nothing here retries or guesses.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::LlmConfig;
use crate::domain::decision::{
    ClassificationResult, ComplaintClassification, DecisionProvider, ModelUsed, ProductCategory,
    ScoreResult, TicketCategory,
};
use crate::domain::erp::ErpOrderContext;
use crate::domain::lead::{EnrichedContext, LeadRecord};
use crate::domain::ticket::TicketRecord;
use crate::domain::DomainError;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Default confidence when the model omits one
const DEFAULT_CONFIDENCE: f64 = 0.5;

const SCORE_SYSTEM_PROMPT: &str = "You are a B2B lead qualification analyst. \
Score the lead between 0.0 and 1.0 from the lead and ERP context JSON. \
Respond with a JSON object: {\"score\": number, \"confidence\": number, \
\"reasoning\": string}. The reasoning must name the factors behind the score.";

const TICKET_SYSTEM_PROMPT: &str = "You are a support triage analyst. Categorize \
the ticket as one of: howto, billing, outage, security, other. Respond with a \
JSON object: {\"category\": string, \"confidence\": number, \
\"requires_escalation\": boolean, \"reasoning\": string}.";

const COMPLAINT_SYSTEM_PROMPT: &str = "You are a complaint triage analyst. Decide \
whether the ticket is a product complaint or an internal IT-support request. \
Product categories: switches, cables, connectors, software, infrastructure, none. \
Respond with a JSON object: {\"is_product_complaint\": boolean, \
\"is_it_support\": boolean, \"product_category\": string, \
\"confidence\": number, \"reasoning\": string}.";

/// Decision provider backed by an OpenAI-compatible endpoint
#[derive(Debug)]
pub struct OpenAiDecisionClient {
    client: reqwest::Client,
    model: String,
    auth_header: String,
    base_url: String,
}

impl OpenAiDecisionClient {
    /// Build from configuration; the key comes from `OPENAI_API_KEY`.
    pub fn from_config(config: &LlmConfig) -> Result<Self, DomainError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            DomainError::configuration("OPENAI_API_KEY environment variable is required")
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| DomainError::configuration(format!("http client: {e}")))?;

        Ok(Self {
            client,
            model: config.model.clone(),
            auth_header: format!("Bearer {api_key}"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            model: model.into(),
            auth_header: format!("Bearer {}", api_key.into()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// One JSON-mode completion round trip
    async fn complete_json(
        &self,
        system: &str,
        user: String,
    ) -> Result<serde_json::Value, DomainError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": 0.0,
            "response_format": { "type": "json_object" },
        });

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", &self.auth_header)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::decision_service("openai", e.to_string()))?;

        if !response.status().is_success() {
            return Err(DomainError::decision_service(
                "openai",
                format!("chat completions returned {}", response.status()),
            ));
        }

        let completion: serde_json::Value = response
            .json()
            .await
            .map_err(|e| DomainError::decision_service("openai", format!("malformed body: {e}")))?;

        let content = completion
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                DomainError::decision_service("openai", "completion missing message content")
            })?;

        serde_json::from_str(content).map_err(|e| {
            DomainError::decision_service("openai", format!("content is not valid JSON: {e}"))
        })
    }
}

#[async_trait]
impl DecisionProvider for OpenAiDecisionClient {
    async fn score_lead(
        &self,
        lead: &LeadRecord,
        enriched: &EnrichedContext,
    ) -> Result<ScoreResult, DomainError> {
        let user = serde_json::json!({ "lead": lead, "erp_context": enriched }).to_string();
        let content = self.complete_json(SCORE_SYSTEM_PROMPT, user).await?;

        let payload: RawScorePayload = serde_json::from_value(content)
            .map_err(|e| DomainError::decision_service("openai", format!("bad score payload: {e}")))?;
        payload.validate()
    }

    async fn classify_ticket(
        &self,
        ticket: &TicketRecord,
        context: &ErpOrderContext,
    ) -> Result<ClassificationResult, DomainError> {
        let user = serde_json::json!({ "ticket": ticket, "order_context": context }).to_string();
        let content = self.complete_json(TICKET_SYSTEM_PROMPT, user).await?;

        let payload: RawClassificationPayload = serde_json::from_value(content).map_err(|e| {
            DomainError::decision_service("openai", format!("bad classification payload: {e}"))
        })?;
        payload.validate()
    }

    async fn classify_complaint(
        &self,
        ticket: &TicketRecord,
    ) -> Result<ComplaintClassification, DomainError> {
        let user = serde_json::json!({ "ticket": ticket }).to_string();
        let content = self.complete_json(COMPLAINT_SYSTEM_PROMPT, user).await?;

        let payload: RawComplaintPayload = serde_json::from_value(content).map_err(|e| {
            DomainError::decision_service("openai", format!("bad complaint payload: {e}"))
        })?;
        payload.validate()
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

/// Raw lead-score payload as the model returned it
#[derive(Debug, Deserialize)]
struct RawScorePayload {
    score: Option<f64>,
    confidence: Option<f64>,
    reasoning: Option<String>,
}

impl RawScorePayload {
    /// `score` is required; `confidence` defaults to 0.5, `reasoning` to
    /// an empty string. The score is clamped on construction.
    fn validate(self) -> Result<ScoreResult, DomainError> {
        let score = self
            .score
            .ok_or_else(|| DomainError::decision_service("openai", "score payload missing 'score'"))?;

        Ok(ScoreResult::new(
            score,
            self.confidence.unwrap_or(DEFAULT_CONFIDENCE),
            self.reasoning.unwrap_or_default(),
            ModelUsed::Llm,
        ))
    }
}

/// Raw ticket-classification payload as the model returned it
#[derive(Debug, Deserialize)]
struct RawClassificationPayload {
    category: Option<String>,
    confidence: Option<f64>,
    requires_escalation: Option<bool>,
    reasoning: Option<String>,
}

impl RawClassificationPayload {
    /// `category` is required and must parse; escalation defaults to false.
    fn validate(self) -> Result<ClassificationResult, DomainError> {
        let raw = self.category.ok_or_else(|| {
            DomainError::decision_service("openai", "classification payload missing 'category'")
        })?;

        let category = TicketCategory::parse(&raw).ok_or_else(|| {
            DomainError::decision_service("openai", format!("unknown category '{raw}'"))
        })?;

        Ok(ClassificationResult::new(
            category,
            self.confidence.unwrap_or(DEFAULT_CONFIDENCE),
            self.requires_escalation.unwrap_or(false),
            self.reasoning.unwrap_or_default(),
            ModelUsed::Llm,
        ))
    }
}

/// Raw complaint payload as the model returned it
#[derive(Debug, Deserialize)]
struct RawComplaintPayload {
    is_product_complaint: Option<bool>,
    is_it_support: Option<bool>,
    product_category: Option<String>,
    confidence: Option<f64>,
    reasoning: Option<String>,
}

impl RawComplaintPayload {
    /// `is_product_complaint` is required; the rest default (`is_it_support`
    /// false, `product_category` none, `confidence` 0.5).
    fn validate(self) -> Result<ComplaintClassification, DomainError> {
        let is_product = self.is_product_complaint.ok_or_else(|| {
            DomainError::decision_service(
                "openai",
                "complaint payload missing 'is_product_complaint'",
            )
        })?;

        let product_category = match self.product_category {
            Some(raw) => ProductCategory::parse(&raw).ok_or_else(|| {
                DomainError::decision_service("openai", format!("unknown product category '{raw}'"))
            })?,
            None => ProductCategory::None,
        };

        Ok(ComplaintClassification::new(
            is_product,
            self.is_it_support.unwrap_or(false),
            product_category,
            self.confidence.unwrap_or(DEFAULT_CONFIDENCE),
            self.reasoning.unwrap_or_default(),
            ModelUsed::Llm,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion_with(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [ { "message": { "role": "assistant", "content": content } } ]
        })
    }

    async fn client_against(server: &MockServer) -> OpenAiDecisionClient {
        OpenAiDecisionClient::with_base_url("sk-test", "gpt-4o-mini", server.uri())
    }

    fn lead() -> LeadRecord {
        LeadRecord::new("L-1", "Kim", "Globex")
    }

    #[tokio::test]
    async fn test_score_lead_parses_full_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_with(
                r#"{"score": 0.87, "confidence": 0.9, "reasoning": "large enterprise"}"#,
            )))
            .mount(&server)
            .await;

        let client = client_against(&server).await;
        let result = client.score_lead(&lead(), &EnrichedContext::empty()).await.unwrap();

        assert_eq!(result.score, 0.87);
        assert_eq!(result.confidence, 0.9);
        assert_eq!(result.model_used, ModelUsed::Llm);
    }

    #[tokio::test]
    async fn test_missing_required_field_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_with(
                r#"{"confidence": 0.9, "reasoning": "no score though"}"#,
            )))
            .mount(&server)
            .await;

        let client = client_against(&server).await;
        let result = client.score_lead(&lead(), &EnrichedContext::empty()).await;

        assert!(matches!(result, Err(DomainError::DecisionService { .. })));
    }

    #[tokio::test]
    async fn test_optional_fields_fill_documented_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_with(r#"{"score": 1.4}"#)),
            )
            .mount(&server)
            .await;

        let client = client_against(&server).await;
        let result = client.score_lead(&lead(), &EnrichedContext::empty()).await.unwrap();

        // Out-of-range score clamped, defaults filled
        assert_eq!(result.score, 1.0);
        assert_eq!(result.confidence, DEFAULT_CONFIDENCE);
        assert_eq!(result.reasoning, "");
    }

    #[tokio::test]
    async fn test_non_json_content_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_with("the lead looks great to me")),
            )
            .mount(&server)
            .await;

        let client = client_against(&server).await;
        let result = client.score_lead(&lead(), &EnrichedContext::empty()).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_http_error_is_decision_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = client_against(&server).await;
        let result = client.score_lead(&lead(), &EnrichedContext::empty()).await;

        assert!(matches!(result, Err(DomainError::DecisionService { .. })));
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_with(
                r#"{"category": "spam", "confidence": 0.8}"#,
            )))
            .mount(&server)
            .await;

        let client = client_against(&server).await;
        let ticket = TicketRecord::new("500-1", "subject", "description");
        let result = client.classify_ticket(&ticket, &ErpOrderContext::empty()).await;

        assert!(matches!(result, Err(DomainError::DecisionService { .. })));
    }

    #[tokio::test]
    async fn test_classify_complaint_parses_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_with(
                r#"{"is_product_complaint": true, "product_category": "cables", "confidence": 0.75, "reasoning": "damaged fiber"}"#,
            )))
            .mount(&server)
            .await;

        let client = client_against(&server).await;
        let ticket = TicketRecord::new("500-1", "Damaged cable", "The fiber arrived broken");
        let result = client.classify_complaint(&ticket).await.unwrap();

        assert!(result.is_product_complaint);
        assert_eq!(result.product_category, ProductCategory::Cables);
        assert_eq!(result.model_used, ModelUsed::Llm);
    }
}
