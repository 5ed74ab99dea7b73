//! Terminal rendering of the wizard. Everything here is a pure function of a
//! [`SessionView`]; nothing reads or writes session state.

use std::fmt::Write;

use crate::controller::SessionView;
use crate::models::{BRANDS, COMMON_ISSUES, QuoteResult};
use crate::provider::prompt::STORE_NAME;
use crate::tasks::Step;

const PROGRESS_WIDTH: usize = 20;

const POLICY_BANNER: &str = "Aviso importante: Solo emitimos cotizaciones automáticas para \
     Cambio de Pantalla en ARS. Para otros fallos, contacta a un técnico.";

const ESTIMATE_DISCLAIMER: &str =
    "Al avanzar, aceptas que los precios son estimaciones basadas en mercado real de Argentina.";

const HIDDEN_DAMAGE_WARNING: &str = "Debido a la caída, el dispositivo puede tener fallas ocultas. \
     Existe la posibilidad de que el impacto haya causado microfisuras en la placa base. Al desarmar \
     el equipo, estas líneas fisuradas pueden terminar de romperse debido a la manipulación técnica \
     necesaria, manifestando fallas que no eran visibles inicialmente. ElecStore no se responsabiliza \
     por daños preexistentes derivados del golpe que se manifiesten durante la reparación.";

const WARRANTY: &[&str] = &[
    "El cambio de pantalla cuenta con una garantía de entre 30 y 60 días, según la calidad del repuesto.",
    "Cubre exclusivamente fallas de fábrica del módulo.",
    "IMPORTANTE: ElecStore no se hará responsable si el equipo presenta signos de PRESIÓN EXCESIVA, \
     nuevas CAÍDAS o golpes accidentales posterior a la entrega.",
];

const PARTS_POLICY: &[&str] = &[
    "Una vez confirmada la reparación, te avisaremos sobre la existencia del repuesto a conseguir. \
     Existe la posibilidad de que no se consiga el repuesto exacto o, al menos, no con la calidad \
     especificada inicialmente.",
    "Si deseas realizar la reparación con una calidad inferior o distinta de pantalla, deberás \
     consultarlo personalmente con un asesor de ElecStore.",
];

const IMPACT_RISK: &str = "Todo dispositivo golpeado puede presentar microfisuras internas en la placa. \
     La manipulación técnica para el diagnóstico puede terminar de comprometer estas líneas de \
     comunicación que ya fueron debilitadas por el golpe original.";

const FOOTER: &str = "Precios sujetos a variación cambiaria y revisión técnica presencial";

/// Full screen for the current step
pub fn render(view: &SessionView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {STORE_NAME} · Argentina ==");

    if view.step.in_progress() {
        let _ = writeln!(out, "\n{POLICY_BANNER}");
        let _ = writeln!(out, "{}", progress_bar(view.step));
    }
    out.push('\n');

    match view.step {
        Step::Brand => render_brand(&mut out, view),
        Step::Model => render_model(&mut out, view),
        Step::Issue => render_issue(&mut out),
        Step::Details => render_details(&mut out, view),
        Step::Quote => match &view.result {
            Some(result) => render_quote(&mut out, result),
            None => out.push_str("Cotización no disponible.\n"),
        },
        Step::Diagnosis => render_diagnosis(&mut out),
    }

    let _ = writeln!(out, "\n{FOOTER}");
    out
}

/// `[##########..........] 2/4`
pub fn progress_bar(step: Step) -> String {
    let done = usize::from(step.number()).min(4);
    let filled = done * PROGRESS_WIDTH / 4;
    format!(
        "[{}{}] {}/4",
        "#".repeat(filled),
        ".".repeat(PROGRESS_WIDTH - filled),
        done
    )
}

/// Recommendations worth listing under the quote.
///
/// The hidden internal damage advisory is always printed as its own warning
/// block, so recommendations that repeat it are left out of the list. Any
/// mention of fissures counts ("microfisuras", "micro-fisuras", "fisuras en la
/// placa"); a recommendation about a cracked screen worded that way is hidden too.
pub fn display_recommendations(result: &QuoteResult) -> Vec<&str> {
    result
        .recommendations
        .iter()
        .map(String::as_str)
        .filter(|r| !r.to_lowercase().contains("fisura"))
        .collect()
}

fn render_brand(out: &mut String, view: &SessionView) {
    out.push_str("¿Qué marca es tu dispositivo?\n");
    out.push_str("Selecciona la marca para comenzar tu cotización en pesos.\n\n");
    for (i, brand) in BRANDS.iter().enumerate() {
        let marker = if view.request.brand == brand.name { "*" } else { " " };
        let _ = writeln!(out, " {marker}{}. {}", i + 1, brand.name);
    }
}

fn render_model(out: &mut String, view: &SessionView) {
    out.push_str("¿Cuál es el modelo?\n");
    let _ = writeln!(out, "Marca: {}\n", view.request.brand);
    out.push_str("Ingresa el modelo exacto (Ej: Samsung S23 Ultra, Moto G200...)\n");
    if !view.request.model.is_empty() {
        let _ = writeln!(out, "Modelo actual: {}", view.request.model);
    }
}

fn render_issue(out: &mut String) {
    out.push_str("¿Qué problema presenta?\n");
    out.push_str("Cotizaciones automáticas exclusivas para pantallas.\n\n");
    for (i, issue) in COMMON_ISSUES.iter().enumerate() {
        let _ = writeln!(out, "  {}. {} – {}", i + 1, issue.label, issue.description);
    }
}

fn render_details(out: &mut String, view: &SessionView) {
    out.push_str("Detalles finales\n");
    out.push_str("Describe el estado de la pantalla para ajustar el precio.\n");
    out.push_str("Observaciones (Ej: Vidrio astillado, manchas líquidas, falla de táctil parcial...)\n");
    if !view.request.custom_details.is_empty() {
        let _ = writeln!(out, "Observaciones actuales: {}", view.request.custom_details);
    }
    let _ = writeln!(out, "\n! {ESTIMATE_DISCLAIMER}");

    if view.loading {
        out.push_str("\n... Consultando Precios ARS...\n");
    } else {
        out.push_str("\n> Obtener Cotización Final\n");
    }
    if let Some(notification) = &view.notification {
        let _ = writeln!(out, "\n[!] {notification}");
    }
}

fn render_quote(out: &mut String, result: &QuoteResult) {
    out.push_str("Cotización Lista\n");
    out.push_str("Valores estimados en Pesos Argentinos (ARS).\n\n");

    let _ = writeln!(out, "PRECIO ESTIMADO (ARS): {}", result.estimated_price_range);
    out.push_str("Basado en referencias reales de mercado.\n");
    let _ = writeln!(out, "TIEMPO DE REPARACIÓN: {}", result.estimated_time);
    let _ = writeln!(out, "DISPONIBILIDAD DE REPUESTOS: {}", result.parts_availability);

    let _ = writeln!(out, "\nNotas Técnicas\n{}", result.explanation);
    let _ = writeln!(out, "\nADVERTENCIA DE RIESGO TÉCNICO\n{HIDDEN_DAMAGE_WARNING}");

    out.push_str("\nGarantía de Reparación\n");
    for line in WARRANTY {
        let _ = writeln!(out, "  {line}");
    }

    out.push_str("\nPolítica de Repuestos\n");
    for line in PARTS_POLICY {
        let _ = writeln!(out, "  {line}");
    }

    let recommendations = display_recommendations(result);
    if !recommendations.is_empty() {
        out.push_str("\nRecomendaciones adicionales:\n");
        for rec in recommendations {
            let _ = writeln!(out, "  - {rec}");
        }
    }
}

fn render_diagnosis(out: &mut String) {
    out.push_str("Requiere Diagnóstico Avanzado\n");
    out.push_str(
        "Fallas de placa, carga o daños por agua requieren una revisión física exhaustiva \
         para darte un presupuesto real en Pesos.\n",
    );
    let _ = writeln!(out, "\nRiesgo por Impacto\n{IMPACT_RISK}");
}
