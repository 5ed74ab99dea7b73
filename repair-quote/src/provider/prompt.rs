use serde_json::{Value, json};

use crate::models::QuoteRequest;

pub const STORE_NAME: &str = "ElecStore";

/// Natural-language quote request sent to a generative model
pub fn build_quote_prompt(request: &QuoteRequest) -> String {
    format!(
        r#"Actúa como un técnico experto de "{STORE_NAME}" en Argentina.
Genera una cotización ESTIMADA en PESOS ARGENTINOS (ARS) para un cambio de pantalla.
Utiliza precios de referencia reales del mercado argentino actual (considerando repuestos originales y alternativos de alta calidad).

Datos del equipo:
Marca: {brand}
Modelo: {model}
Detalles del daño: {details}

IMPORTANTE:
1. El precio DEBE ser en Pesos Argentinos (ARS). Ejemplo: "$85.000 - $110.000 ARS".
2. En las recomendaciones, DEBES incluir una advertencia sobre microfisuras en la placa base debido al impacto.
3. La respuesta debe ser profesional y estructurada."#,
        brand = request.brand.trim(),
        model = request.model.trim(),
        details = request.damage_details(),
    )
}

/// Output schema every provider must satisfy, in the OpenAPI subset Gemini accepts
pub fn quote_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "estimatedPriceRange": {
                "type": "STRING",
                "description": "Rango de precio en ARS (ej: $95.000 - $120.000 ARS)"
            },
            "estimatedTime": {
                "type": "STRING",
                "description": "Tiempo estimado (ej: 3 a 5 horas hábiles)"
            },
            "explanation": {
                "type": "STRING",
                "description": "Explicación técnica del repuesto y trabajo"
            },
            "partsAvailability": {
                "type": "STRING",
                "description": "Disponibilidad (Alta/Media/Baja)"
            },
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "minItems": 1,
                "description": "Consejos y advertencias técnicas"
            }
        },
        "required": [
            "estimatedPriceRange",
            "estimatedTime",
            "explanation",
            "partsAvailability",
            "recommendations"
        ]
    })
}

/// Instructions for models that cannot take a response schema natively
pub fn json_only_instructions() -> String {
    format!(
        "Responde **únicamente** con un objeto JSON, sin texto adicional ni bloques de código, \
         que cumpla este esquema:\n{}",
        quote_response_schema()
    )
}
