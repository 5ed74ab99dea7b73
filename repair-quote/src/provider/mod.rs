//! Quote providers.
//!
//! A provider turns a [`QuoteRequest`] into a [`QuoteResult`] or fails with a
//! [`QuoteProviderError`]. The wizard does not care which one it talks to:
//!
//! - [`GeminiQuoteProvider`]: Gemini `generateContent` with a declared JSON response schema
//! - [`OpenRouterQuoteProvider`]: any OpenRouter model through a rig agent, schema in the prompt
//! - [`RulesQuoteProvider`]: deterministic price table, no network

mod gemini;
mod openrouter;
pub mod prompt;
mod rules;

pub use gemini::GeminiQuoteProvider;
pub use openrouter::OpenRouterQuoteProvider;
pub use rules::RulesQuoteProvider;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::{ProviderKind, QuoteConfig};
use crate::models::{QuoteRequest, QuoteResult};

#[derive(Debug, Error)]
pub enum QuoteProviderError {
    #[error("quote request failed: {0}")]
    Network(String),

    #[error("quote service rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("quote service returned an empty response")]
    EmptyResponse,

    #[error("quote response does not match the declared schema: {0}")]
    Schema(String),

    #[error("quote service did not answer within {0:?}")]
    Timeout(Duration),

    #[error("quote provider is not configured: {0}")]
    Configuration(String),
}

/// Anything that can price a repair request
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    async fn quote(&self, request: &QuoteRequest) -> Result<QuoteResult, QuoteProviderError>;
}

/// Parse the raw text a model produced into a validated [`QuoteResult`].
///
/// Markdown code fences around the JSON are tolerated; anything that does not
/// carry all five fields with usable values is an error.
pub fn parse_quote_response(raw: &str) -> Result<QuoteResult, QuoteProviderError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(QuoteProviderError::EmptyResponse);
    }

    let cleaned = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let cleaned = cleaned.strip_suffix("```").unwrap_or(cleaned).trim();

    let result: QuoteResult = serde_json::from_str(cleaned)
        .map_err(|e| QuoteProviderError::Schema(format!("{e}. Raw response: {raw}")))?;
    result.validate()?;
    Ok(result)
}

/// Build the provider selected in the configuration
pub fn create_provider(config: &QuoteConfig) -> Result<Arc<dyn QuoteProvider>, QuoteProviderError> {
    let provider: Arc<dyn QuoteProvider> = match config.provider {
        ProviderKind::Gemini => {
            let api_key = config.gemini_api_key.clone().ok_or_else(|| {
                QuoteProviderError::Configuration("GEMINI_API_KEY not set".to_string())
            })?;
            Arc::new(GeminiQuoteProvider::new(
                api_key,
                &config.gemini_model,
                &config.gemini_api_base,
                config.quote_timeout,
            )?)
        }
        ProviderKind::OpenRouter => {
            let api_key = config.openrouter_api_key.clone().ok_or_else(|| {
                QuoteProviderError::Configuration("OPENROUTER_API_KEY not set".to_string())
            })?;
            Arc::new(OpenRouterQuoteProvider::new(api_key, &config.openrouter_model))
        }
        ProviderKind::Rules => Arc::new(RulesQuoteProvider),
    };

    info!(provider = %provider.name(), "quote provider ready");
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "estimatedPriceRange": "$95.000 - $120.000 ARS",
        "estimatedTime": "3 a 5 horas hábiles",
        "explanation": "Módulo OLED original",
        "partsAvailability": "Media",
        "recommendations": ["Revisar microfisuras en la placa", "Hacer backup"]
    }"#;

    #[test]
    fn parses_plain_and_fenced_json() {
        let plain = parse_quote_response(VALID).unwrap();
        assert_eq!(plain.estimated_price_range, "$95.000 - $120.000 ARS");
        assert_eq!(plain.recommendations.len(), 2);

        let fenced = parse_quote_response(&format!("```json\n{VALID}\n```")).unwrap();
        assert_eq!(fenced, plain);
    }

    #[test]
    fn empty_body_is_its_own_error() {
        assert!(matches!(
            parse_quote_response("  \n"),
            Err(QuoteProviderError::EmptyResponse)
        ));
    }

    #[test]
    fn missing_field_is_rejected_not_defaulted() {
        let missing = r#"{
            "estimatedPriceRange": "$95.000 - $120.000 ARS",
            "estimatedTime": "3 horas",
            "explanation": "x",
            "partsAvailability": "Alta"
        }"#;
        let err = parse_quote_response(missing).unwrap_err();
        assert!(matches!(err, QuoteProviderError::Schema(msg) if msg.contains("recommendations")));

        assert!(matches!(
            parse_quote_response("{}"),
            Err(QuoteProviderError::Schema(_))
        ));
        assert!(matches!(
            parse_quote_response("not json at all"),
            Err(QuoteProviderError::Schema(_))
        ));
    }

    #[test]
    fn rules_provider_needs_no_credentials() {
        let config = QuoteConfig {
            provider: ProviderKind::Rules,
            ..QuoteConfig::default()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.name(), "rules");
    }

    #[test]
    fn missing_key_is_a_configuration_error() {
        let config = QuoteConfig {
            provider: ProviderKind::Gemini,
            gemini_api_key: None,
            ..QuoteConfig::default()
        };
        assert!(matches!(
            create_provider(&config),
            Err(QuoteProviderError::Configuration(msg)) if msg.contains("GEMINI_API_KEY")
        ));

        let config = QuoteConfig {
            provider: ProviderKind::OpenRouter,
            openrouter_api_key: None,
            ..QuoteConfig::default()
        };
        assert!(matches!(
            create_provider(&config),
            Err(QuoteProviderError::Configuration(msg)) if msg.contains("OPENROUTER_API_KEY")
        ));
    }
}
