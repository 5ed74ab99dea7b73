use async_trait::async_trait;
use rig::{agent::Agent, client::CompletionClient, completion::Chat, providers::openrouter};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use super::prompt::{STORE_NAME, build_quote_prompt, json_only_instructions};
use super::{QuoteProvider, QuoteProviderError, parse_quote_response};
use crate::models::{QuoteRequest, QuoteResult};

fn quote_preamble() -> String {
    format!(
        "Eres el cotizador automático de {STORE_NAME}, un servicio técnico de celulares en Argentina.\n{}",
        json_only_instructions()
    )
}

/// Quotes through any OpenRouter chat model. The schema travels in the
/// preamble, so the reply is parsed and validated like any other text.
pub struct OpenRouterQuoteProvider {
    api_key: SecretString,
    model: String,
}

impl OpenRouterQuoteProvider {
    pub fn new(api_key: SecretString, model: &str) -> Self {
        Self {
            api_key,
            model: model.to_string(),
        }
    }

    fn agent(&self) -> Agent<openrouter::CompletionModel> {
        let client = openrouter::Client::new(self.api_key.expose_secret());
        client.agent(&self.model).preamble(&quote_preamble()).build()
    }
}

#[async_trait]
impl QuoteProvider for OpenRouterQuoteProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn quote(&self, request: &QuoteRequest) -> Result<QuoteResult, QuoteProviderError> {
        let prompt = build_quote_prompt(request);
        debug!(model = %self.model, "sending quote prompt to openrouter");

        let raw = self
            .agent()
            .chat(&prompt, vec![])
            .await
            .map_err(|e| QuoteProviderError::Network(format!("LLM chat failed: {e}")))?;

        let result = parse_quote_response(&raw)?;
        info!(
            model = %self.model,
            price_range = %result.estimated_price_range,
            "openrouter quote received"
        );
        Ok(result)
    }
}
