use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use step_flow::{Context, NextAction, Result, Task, TaskResult};
use tracing::{error, info};

use super::types::{QUOTE_FAILED_NOTIFICATION, ValidationBlocked, WizardAction, session_keys};
use super::utils::{blocked, go_back, load_request, moved, read_action, restart, store_request};
use crate::models::QuoteResult;
use crate::provider::{QuoteProvider, QuoteProviderError};

/// Keeps the session's loading flag raised for as long as it is alive.
///
/// Dropping the guard lowers the flag, so it comes down on every way out of a
/// submission: success, provider error, timeout or unwinding.
struct LoadingGuard {
    context: Context,
}

impl LoadingGuard {
    /// `None` when a submission is already in flight
    fn acquire(context: &Context) -> Option<Self> {
        if context.get_sync::<bool>(session_keys::LOADING).unwrap_or(false) {
            return None;
        }
        context.set_sync(session_keys::LOADING, true);
        Some(Self {
            context: context.clone(),
        })
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.context.set_sync(session_keys::LOADING, false);
    }
}

/// Step 4: optional damage description, then the one call to the quote provider
pub struct RepairDetailsTask {
    provider: Arc<dyn QuoteProvider>,
    quote_timeout: Duration,
}

impl RepairDetailsTask {
    pub fn new(provider: Arc<dyn QuoteProvider>, quote_timeout: Duration) -> Self {
        Self {
            provider,
            quote_timeout,
        }
    }

    async fn request_quote(&self, context: &Context) -> std::result::Result<QuoteResult, QuoteProviderError> {
        let request = load_request(context).await;
        let quote = tokio::time::timeout(self.quote_timeout, self.provider.quote(&request))
            .await
            .map_err(|_| QuoteProviderError::Timeout(self.quote_timeout))??;
        // Whatever the provider, an incomplete quote is a failed quote
        quote.validate()?;
        Ok(quote)
    }

    async fn submit(&self, context: &Context) -> Result<TaskResult> {
        let Some(_loading) = LoadingGuard::acquire(context) else {
            return Ok(blocked(self.id(), ValidationBlocked::QuoteInFlight));
        };

        let session_id = context
            .get::<String>(session_keys::SESSION_ID)
            .await
            .unwrap_or_else(|| "unknown".to_string());
        context.remove(session_keys::NOTIFICATION).await;

        info!(
            session_id = %session_id,
            task_id = %self.id(),
            provider = %self.provider.name(),
            "requesting quote"
        );

        match self.request_quote(context).await {
            Ok(quote) => {
                context.set(session_keys::QUOTE_RESULT, &quote).await;
                info!(
                    session_id = %session_id,
                    price_range = %quote.estimated_price_range,
                    parts_availability = %quote.parts_availability,
                    "quote ready"
                );
                Ok(moved("Quote ready", NextAction::Continue))
            }
            Err(e) => {
                error!(
                    session_id = %session_id,
                    provider = %self.provider.name(),
                    error = %e,
                    "Error generating quote"
                );
                context
                    .set(session_keys::NOTIFICATION, QUOTE_FAILED_NOTIFICATION)
                    .await;
                Ok(TaskResult::new_with_status(
                    Some(QUOTE_FAILED_NOTIFICATION.to_string()),
                    NextAction::WaitForInput,
                    Some(format!("Quote failed: {e}")),
                ))
            }
        }
    }
}

#[async_trait]
impl Task for RepairDetailsTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        match read_action(&context).await? {
            WizardAction::EditDetails(details) => {
                let mut request = load_request(&context).await;
                request.custom_details = details;
                store_request(&context, &request).await;
                Ok(TaskResult::wait("Details updated"))
            }
            WizardAction::Submit => self.submit(&context).await,
            WizardAction::Back => {
                // a failed attempt belongs to this visit of the step only
                context.remove(session_keys::NOTIFICATION).await;
                Ok(go_back())
            }
            WizardAction::Reset => Ok(restart()),
            _ => Ok(blocked(self.id(), ValidationBlocked::NotAvailableHere)),
        }
    }
}
