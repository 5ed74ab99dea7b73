use clap::ValueEnum;
use secrecy::SecretString;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_QUOTE_TIMEOUT_SECS: u64 = 30;
/// WhatsApp number of the store, international format without `+`
pub const DEFAULT_WHATSAPP_NUMBER: &str = "5491158528983";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    Gemini,
    #[value(name = "openrouter")]
    OpenRouter,
    Rules,
}

impl std::str::FromStr for ProviderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true).map_err(|_| ConfigError::InvalidValue {
            name: "QUOTE_PROVIDER",
            value: s.to_string(),
        })
    }
}

/// Everything the wizard needs from its environment
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    pub provider: ProviderKind,
    pub gemini_api_key: Option<SecretString>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub openrouter_api_key: Option<SecretString>,
    pub openrouter_model: String,
    pub quote_timeout: Duration,
    pub whatsapp_number: String,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Gemini,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            openrouter_api_key: None,
            openrouter_model: DEFAULT_OPENROUTER_MODEL.to_string(),
            quote_timeout: Duration::from_secs(DEFAULT_QUOTE_TIMEOUT_SECS),
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
        }
    }
}

impl QuoteConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let provider = match var("QUOTE_PROVIDER") {
            Some(value) => value.trim().parse()?,
            None => defaults.provider,
        };

        let quote_timeout = match var("QUOTE_TIMEOUT_SECS") {
            Some(value) => parse_timeout(&value)?,
            None => defaults.quote_timeout,
        };

        Ok(Self {
            provider,
            gemini_api_key: var("GEMINI_API_KEY")
                .or_else(|| var("API_KEY"))
                .map(SecretString::from),
            gemini_model: var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_api_base: var("GEMINI_API_BASE").unwrap_or(defaults.gemini_api_base),
            openrouter_api_key: var("OPENROUTER_API_KEY").map(SecretString::from),
            openrouter_model: var("OPENROUTER_MODEL").unwrap_or(defaults.openrouter_model),
            quote_timeout,
            whatsapp_number: var("WHATSAPP_NUMBER").unwrap_or(defaults.whatsapp_number),
        })
    }
}

/// Seconds, strictly positive
pub fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue {
            name: "QUOTE_TIMEOUT_SECS",
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<QuoteConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        QuoteConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.provider, ProviderKind::Gemini);
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.quote_timeout, Duration::from_secs(30));
        assert_eq!(config.whatsapp_number, DEFAULT_WHATSAPP_NUMBER);
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("QUOTE_PROVIDER", "OpenRouter"),
            ("OPENROUTER_API_KEY", "or-key"),
            ("OPENROUTER_MODEL", "anthropic/claude-3.5-haiku"),
            ("QUOTE_TIMEOUT_SECS", "12"),
            ("WHATSAPP_NUMBER", "5491100000000"),
        ])
        .unwrap();
        assert_eq!(config.provider, ProviderKind::OpenRouter);
        assert_eq!(
            config.openrouter_api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("or-key".to_string())
        );
        assert_eq!(config.openrouter_model, "anthropic/claude-3.5-haiku");
        assert_eq!(config.quote_timeout, Duration::from_secs(12));
        assert_eq!(config.whatsapp_number, "5491100000000");
    }

    #[test]
    fn api_key_falls_back_to_generic_variable() {
        let config = config_from(&[("API_KEY", "generic"), ("GEMINI_API_KEY", " ")]).unwrap();
        assert_eq!(
            config.gemini_api_key.as_ref().map(|k| k.expose_secret().to_string()),
            Some("generic".to_string())
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config_from(&[("QUOTE_PROVIDER", "chatgpt")]),
            Err(ConfigError::InvalidValue { name: "QUOTE_PROVIDER", .. })
        ));
        assert!(config_from(&[("QUOTE_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("QUOTE_TIMEOUT_SECS", "soon")]).is_err());
    }
}
