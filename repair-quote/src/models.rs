use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::provider::QuoteProviderError;

/// Used in the prompt when the customer leaves the damage description empty
pub const DEFAULT_DAMAGE_DETAILS: &str = "Cambio de pantalla estándar";

pub const SCREEN_REPLACEMENT: &str = "Cambio de Pantalla";
/// Issue label that skips the automatic quote and asks for an in-person diagnosis
pub const OTHER_REPAIRS: &str = "Otras Reparaciones";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceBrand {
    pub id: &'static str,
    pub name: &'static str,
}

pub const BRANDS: &[DeviceBrand] = &[
    DeviceBrand { id: "samsung", name: "Samsung" },
    DeviceBrand { id: "xiaomi", name: "Xiaomi" },
    DeviceBrand { id: "motorola", name: "Motorola" },
    DeviceBrand { id: "huawei", name: "Huawei" },
    DeviceBrand { id: "other", name: "Otro" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairIssue {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub const COMMON_ISSUES: &[RepairIssue] = &[
    RepairIssue {
        id: "screen",
        label: SCREEN_REPLACEMENT,
        description: "Rotura de cristal, manchas o falla de táctil.",
    },
    RepairIssue {
        id: "complex",
        label: OTHER_REPAIRS,
        description: "Placa, batería, carga, cámaras o fallas complejas.",
    },
];

/// Look up a brand by display name or id, ignoring case
pub fn find_brand(input: &str) -> Option<&'static DeviceBrand> {
    let input = input.trim();
    BRANDS
        .iter()
        .find(|b| b.name.eq_ignore_ascii_case(input) || b.id.eq_ignore_ascii_case(input))
}

/// Look up an issue by its label or id
pub fn find_issue(input: &str) -> Option<&'static RepairIssue> {
    let input = input.trim();
    COMMON_ISSUES
        .iter()
        .find(|i| i.label == input || i.id.eq_ignore_ascii_case(input))
}

pub fn is_other_repairs(issue_label: &str) -> bool {
    issue_label == OTHER_REPAIRS
}

/// What the customer has told us so far
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub brand: String,
    pub model: String,
    pub issue: String,
    #[serde(default)]
    pub custom_details: String,
}

impl QuoteRequest {
    pub fn has_model(&self) -> bool {
        !self.model.trim().is_empty()
    }

    pub fn damage_details(&self) -> &str {
        match self.custom_details.trim() {
            "" => DEFAULT_DAMAGE_DETAILS,
            details => details,
        }
    }
}

/// Estimate returned by a quote provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    pub estimated_price_range: String,
    pub estimated_time: String,
    pub explanation: String,
    pub parts_availability: String,
    pub recommendations: Vec<String>,
}

// Currencies the store quotes in. Other three letter words such as IVA are not currencies.
static CURRENCY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:ARS|USD)\b").expect("valid currency regex"));

impl QuoteResult {
    /// Check the result against the declared output schema.
    ///
    /// Serde already rejects missing fields; this catches the values a model
    /// can still get wrong while producing well-formed JSON.
    pub fn validate(&self) -> Result<(), QuoteProviderError> {
        let fields = [
            ("estimatedPriceRange", &self.estimated_price_range),
            ("estimatedTime", &self.estimated_time),
            ("explanation", &self.explanation),
            ("partsAvailability", &self.parts_availability),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(QuoteProviderError::Schema(format!("{name} is blank")));
        }
        if !CURRENCY_CODE.is_match(&self.estimated_price_range) {
            return Err(QuoteProviderError::Schema(format!(
                "estimatedPriceRange has no currency code: {}",
                self.estimated_price_range
            )));
        }
        if self.recommendations.is_empty() {
            return Err(QuoteProviderError::Schema(
                "recommendations is empty".to_string(),
            ));
        }
        if self.recommendations.iter().any(|r| r.trim().is_empty()) {
            return Err(QuoteProviderError::Schema(
                "recommendations contains a blank entry".to_string(),
            ));
        }
        Ok(())
    }
}
