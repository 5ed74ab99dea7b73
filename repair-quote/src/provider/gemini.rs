use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use super::prompt::{build_quote_prompt, quote_response_schema};
use super::{QuoteProvider, QuoteProviderError, parse_quote_response};
use crate::models::{QuoteRequest, QuoteResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, all parts joined
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Quotes through Gemini `generateContent`, declaring the output schema so the
/// model answers with JSON only
pub struct GeminiQuoteProvider {
    client: reqwest::Client,
    api_key: SecretString,
    model: String,
    endpoint: String,
    timeout: Duration,
}

impl GeminiQuoteProvider {
    pub fn new(
        api_key: SecretString,
        model: &str,
        api_base: &str,
        timeout: Duration,
    ) -> Result<Self, QuoteProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QuoteProviderError::Configuration(e.to_string()))?;
        let endpoint = format!(
            "{}/models/{}:generateContent",
            api_base.trim_end_matches('/'),
            model
        );

        Ok(Self {
            client,
            api_key,
            model: model.to_string(),
            endpoint,
            timeout,
        })
    }

    fn request_body(prompt: String) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: quote_response_schema(),
            },
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> QuoteProviderError {
        if e.is_timeout() {
            QuoteProviderError::Timeout(self.timeout)
        } else {
            QuoteProviderError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl QuoteProvider for GeminiQuoteProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn quote(&self, request: &QuoteRequest) -> Result<QuoteResult, QuoteProviderError> {
        let body = Self::request_body(build_quote_prompt(request));
        debug!(model = %self.model, endpoint = %self.endpoint, "sending generateContent request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QuoteProviderError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                QuoteProviderError::Timeout(self.timeout)
            } else {
                QuoteProviderError::Schema(format!("unexpected generateContent body: {e}"))
            }
        })?;

        let result = parse_quote_response(&payload.text())?;
        info!(
            model = %self.model,
            price_range = %result.estimated_price_range,
            "gemini quote received"
        );
        Ok(result)
    }
}
