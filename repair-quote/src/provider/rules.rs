use async_trait::async_trait;
use tracing::debug;

use super::{QuoteProvider, QuoteProviderError};
use crate::models::{QuoteRequest, QuoteResult};

pub(crate) const HIDDEN_DAMAGE_ADVISORY: &str = "Por el impacto, la placa base puede tener microfisuras \
     que se manifiesten al desarmar el equipo; el diagnóstico final se confirma en el taller.";

/// Screen module price for a mid-range model of each brand, in ARS
const BRAND_BASE_PRICES: &[(&str, u32)] = &[
    ("samsung", 85_000),
    ("xiaomi", 65_000),
    ("motorola", 60_000),
    ("huawei", 70_000),
];
const UNKNOWN_BRAND_BASE_PRICE: u32 = 55_000;

/// Model name keywords and the percentage they apply to the base price.
/// First match wins, so the most expensive tiers come first.
const MODEL_TIERS: &[(&str, u32)] = &[
    ("fold", 250),
    ("flip", 220),
    ("ultra", 180),
    ("edge", 150),
    ("pro", 140),
    ("plus", 120),
    ("+", 120),
];

/// Damage keywords that usually mean a full display module instead of glass only
const DAMAGE_SURCHARGES: &[(&[&str], u32)] = &[
    (&["liquid", "líquid", "agua", "water", "mancha"], 15),
    (&["táctil", "tactil", "touch"], 10),
];

/// Deterministic quotes from a fixed ARS price table. Useful offline and as a
/// stand-in when no AI credential is configured.
pub struct RulesQuoteProvider;

impl RulesQuoteProvider {
    fn base_price(brand: &str) -> u32 {
        BRAND_BASE_PRICES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(brand.trim()))
            .map(|(_, price)| *price)
            .unwrap_or(UNKNOWN_BRAND_BASE_PRICE)
    }

    fn tier_percent(model: &str) -> u32 {
        let model = model.to_lowercase();
        MODEL_TIERS
            .iter()
            .find(|(keyword, _)| model.contains(keyword))
            .map(|(_, percent)| *percent)
            .unwrap_or(100)
    }

    fn surcharge_percent(details: &str) -> u32 {
        let details = details.to_lowercase();
        DAMAGE_SURCHARGES
            .iter()
            .filter(|(keywords, _)| keywords.iter().any(|k| details.contains(k)))
            .map(|(_, percent)| *percent)
            .sum()
    }

    fn is_foldable(model: &str) -> bool {
        let model = model.to_lowercase();
        model.contains("fold") || model.contains("flip")
    }

    fn estimate(request: &QuoteRequest) -> QuoteResult {
        let base = Self::base_price(&request.brand);
        let tier = Self::tier_percent(&request.model);
        let surcharge = Self::surcharge_percent(&request.custom_details);

        let low = round_to_thousand(base as u64 * tier as u64 * (100 + surcharge) as u64 / 10_000);
        let high = round_to_thousand(low * 125 / 100);
        let foldable = Self::is_foldable(&request.model);
        let known_brand = Self::base_price(&request.brand) != UNKNOWN_BRAND_BASE_PRICE;

        let parts_availability = match (foldable, known_brand, request.brand.trim()) {
            (true, _, _) | (false, false, _) => "Baja",
            (false, true, brand) if brand.eq_ignore_ascii_case("huawei") => "Media",
            _ => "Alta",
        };
        let estimated_time = if foldable {
            "2 a 3 días hábiles"
        } else {
            "3 a 5 horas hábiles"
        };

        QuoteResult {
            estimated_price_range: format!("{} - {} ARS", format_ars(low), format_ars(high)),
            estimated_time: estimated_time.to_string(),
            explanation: format!(
                "Precio de referencia para {} {}: módulo de pantalla original o alternativo de alta \
                 calidad, con mano de obra y calibración incluidas. Daño informado: {}.",
                request.brand.trim(),
                request.model.trim(),
                request.damage_details()
            ),
            parts_availability: parts_availability.to_string(),
            recommendations: vec![
                HIDDEN_DAMAGE_ADVISORY.to_string(),
                "Hacé una copia de seguridad de tus datos antes de traer el equipo.".to_string(),
                "Retirá la funda y el vidrio templado para agilizar la revisión.".to_string(),
            ],
        }
    }
}

fn round_to_thousand(value: u64) -> u64 {
    (value + 500) / 1_000 * 1_000
}

/// `85000` -> `$85.000`
fn format_ars(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("${grouped}")
}

#[async_trait]
impl QuoteProvider for RulesQuoteProvider {
    fn name(&self) -> &str {
        "rules"
    }

    async fn quote(&self, request: &QuoteRequest) -> Result<QuoteResult, QuoteProviderError> {
        let result = Self::estimate(request);
        debug!(
            brand = %request.brand,
            model = %request.model,
            price_range = %result.estimated_price_range,
            "rules quote computed"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(brand: &str, model: &str, details: &str) -> QuoteRequest {
        QuoteRequest {
            brand: brand.to_string(),
            model: model.to_string(),
            issue: "Cambio de Pantalla".to_string(),
            custom_details: details.to_string(),
        }
    }

    #[test]
    fn formats_argentine_thousands() {
        assert_eq!(format_ars(85_000), "$85.000");
        assert_eq!(format_ars(1_234_000), "$1.234.000");
        assert_eq!(format_ars(900), "$900");
    }

    #[tokio::test]
    async fn mid_range_samsung() {
        let result = RulesQuoteProvider
            .quote(&request("Samsung", "A54", ""))
            .await
            .unwrap();
        assert_eq!(result.estimated_price_range, "$85.000 - $106.000 ARS");
        assert_eq!(result.estimated_time, "3 a 5 horas hábiles");
        assert_eq!(result.parts_availability, "Alta");
        assert!(result.validate().is_ok());
    }

    #[tokio::test]
    async fn tier_and_damage_raise_the_price() {
        let result = RulesQuoteProvider
            .quote(&request("Samsung", "S23 Ultra", "manchas y falla de táctil"))
            .await
            .unwrap();
        // 85.000 * 1.8 * 1.25
        assert_eq!(result.estimated_price_range, "$191.000 - $239.000 ARS");
    }

    #[tokio::test]
    async fn foldables_and_unknown_brands_have_low_availability() {
        let fold = RulesQuoteProvider
            .quote(&request("Samsung", "Galaxy Z Fold 5", ""))
            .await
            .unwrap();
        assert_eq!(fold.parts_availability, "Baja");
        assert_eq!(fold.estimated_time, "2 a 3 días hábiles");

        let other = RulesQuoteProvider
            .quote(&request("Otro", "Nokia G21", ""))
            .await
            .unwrap();
        assert_eq!(other.parts_availability, "Baja");
        assert_eq!(other.estimated_price_range, "$55.000 - $69.000 ARS");

        let huawei = RulesQuoteProvider
            .quote(&request("Huawei", "P30", ""))
            .await
            .unwrap();
        assert_eq!(huawei.parts_availability, "Media");
    }

    #[tokio::test]
    async fn always_warns_about_hidden_damage() {
        let result = RulesQuoteProvider
            .quote(&request("Motorola", "G200", "vidrio roto"))
            .await
            .unwrap();
        assert_eq!(result.recommendations[0], HIDDEN_DAMAGE_ADVISORY);
        assert!(result.explanation.contains("vidrio roto"));
    }
}
