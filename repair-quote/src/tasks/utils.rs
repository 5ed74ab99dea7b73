use step_flow::{Context, GraphError, NextAction, Result, TaskResult};
use tracing::debug;

use super::types::{ValidationBlocked, WizardAction, session_keys};
use crate::models::QuoteRequest;

/// The action the user just took
pub async fn read_action(context: &Context) -> Result<WizardAction> {
    context
        .get(session_keys::USER_INPUT)
        .await
        .ok_or_else(|| GraphError::ContextError("user_input not found".to_string()))
}

pub async fn load_request(context: &Context) -> QuoteRequest {
    context
        .get(session_keys::QUOTE_REQUEST)
        .await
        .unwrap_or_default()
}

pub async fn store_request(context: &Context, request: &QuoteRequest) {
    context.set(session_keys::QUOTE_REQUEST, request).await;
}

/// Stay on the current step without treating it as a failure
pub fn blocked(task_id: &str, why: ValidationBlocked) -> TaskResult {
    debug!(task_id = %task_id, reason = why.reason(), "transition blocked");
    TaskResult::wait(why.reason())
}

pub fn moved(status_message: impl Into<String>, next_action: NextAction) -> TaskResult {
    TaskResult::new_with_status(None, next_action, Some(status_message.into()))
}

pub fn restart() -> TaskResult {
    moved("Session reset", NextAction::Reset)
}

pub fn go_back() -> TaskResult {
    moved("Went back", NextAction::GoBack)
}
