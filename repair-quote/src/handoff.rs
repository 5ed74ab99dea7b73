//! Messages handed to channels outside the wizard: the WhatsApp chat with
//! the store and the share sheet.

use crate::controller::SessionView;
use crate::models::{QuoteRequest, QuoteResult};
use crate::provider::prompt::STORE_NAME;
use crate::tasks::Step;

pub fn booking_message(request: &QuoteRequest, result: &QuoteResult) -> String {
    format!(
        "Hola {STORE_NAME}! Acabo de cotizar en la web el cambio de pantalla para mi {} {}. \
         El costo estimado fue de {}. ¿Cómo puedo agendar un turno?",
        request.brand,
        request.model.trim(),
        result.estimated_price_range
    )
}

pub fn diagnosis_message(request: &QuoteRequest) -> String {
    format!(
        "Hola {STORE_NAME}! Necesito un diagnóstico avanzado para mi {} {}. \
         Presenta fallas que no son de pantalla.",
        request.brand,
        request.model.trim()
    )
}

pub fn share_text(request: &QuoteRequest, result: &QuoteResult) -> String {
    format!(
        "Cotización de pantalla para {} {} en {STORE_NAME} Argentina: {}.",
        request.brand,
        request.model.trim(),
        result.estimated_price_range
    )
}

/// `https://wa.me/<phone>?text=<message>` deep link
pub fn whatsapp_link(phone: &str, message: &str) -> String {
    format!("https://wa.me/{}?text={}", phone, urlencoding::encode(message))
}

/// Deep link for the screen the user is on, if that screen offers one
pub fn contact_link(view: &SessionView, phone: &str) -> Option<String> {
    let message = match (view.step, &view.result) {
        (Step::Quote, Some(result)) => booking_message(&view.request, result),
        (Step::Diagnosis, _) => diagnosis_message(&view.request),
        _ => return None,
    };
    Some(whatsapp_link(phone, &message))
}

/// Share text for the current quote, if there is one on screen
pub fn share_for(view: &SessionView) -> Option<String> {
    match (view.step, &view.result) {
        (Step::Quote, Some(result)) => Some(share_text(&view.request, result)),
        _ => None,
    }
}
