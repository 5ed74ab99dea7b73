//! WizardController – owns one quote session and feeds it user actions.
//!
//! Every call to [`WizardController::dispatch`] runs exactly one step of the
//! workflow graph: the action is placed in the session context, the current
//! step's task decides what to do with it, and the graph moves the session
//! forward, back, to the start, or leaves it where it is.
//!
//! `dispatch` takes `&mut self`, so a controller can never have two actions
//! (and therefore two quote requests) in flight at once. Rendering code reads
//! the session through [`SessionView`] snapshots; code that needs to watch the
//! loading flag while a quote is pending can hold a [`SessionHandle`].

use std::sync::Arc;
use std::time::Duration;
use step_flow::{Context, ExecutionResult, Graph, Result, Session};
use tracing::debug;

use crate::models::{QuoteRequest, QuoteResult};
use crate::provider::QuoteProvider;
use crate::tasks::{Step, WizardAction, session_keys};
use crate::workflow::{build_quote_workflow, create_quote_session};

/// Read-only snapshot of the session, handed to the render functions
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub step: Step,
    pub loading: bool,
    pub request: QuoteRequest,
    pub result: Option<QuoteResult>,
    pub notification: Option<String>,
}

/// Cheap, cloneable window onto a session's shared state
#[derive(Debug, Clone)]
pub struct SessionHandle {
    context: Context,
}

impl SessionHandle {
    pub fn is_loading(&self) -> bool {
        self.context
            .get_sync(session_keys::LOADING)
            .unwrap_or(false)
    }

    pub fn request(&self) -> QuoteRequest {
        self.context
            .get_sync(session_keys::QUOTE_REQUEST)
            .unwrap_or_default()
    }
}

pub struct WizardController {
    graph: Arc<Graph>,
    session: Session,
}

impl WizardController {
    pub fn new(provider: Arc<dyn QuoteProvider>, quote_timeout: Duration) -> Self {
        Self {
            graph: Arc::new(build_quote_workflow(provider, quote_timeout)),
            session: create_quote_session(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session.id
    }

    /// Apply one user action. Actions that make no sense at the current step
    /// leave the session untouched.
    pub async fn dispatch(&mut self, action: WizardAction) -> Result<ExecutionResult> {
        let context = self.session.context.clone();
        context.set(session_keys::USER_INPUT, &action).await;
        context.set(session_keys::SESSION_ID, &self.session.id).await;

        let outcome = self.graph.execute_session(&mut self.session).await;
        context.remove(session_keys::USER_INPUT).await;
        let result = outcome?;

        debug!(
            session_id = %self.session.id,
            action = ?action,
            step = self.step().number(),
            status = ?result.status,
            status_message = ?self.session.status_message,
            "action handled"
        );
        Ok(result)
    }

    pub fn step(&self) -> Step {
        Step::from_task_id(&self.session.current_task_id).unwrap_or(Step::Brand)
    }

    pub fn is_loading(&self) -> bool {
        self.handle().is_loading()
    }

    pub fn request(&self) -> QuoteRequest {
        self.handle().request()
    }

    pub fn result(&self) -> Option<QuoteResult> {
        self.session.context.get_sync(session_keys::QUOTE_RESULT)
    }

    /// Message for the user after a failed quote, if any
    pub fn notification(&self) -> Option<String> {
        self.session.context.get_sync(session_keys::NOTIFICATION)
    }

    /// Whether confirming the model would move on; front ends use it to enable the button
    pub fn can_confirm_model(&self) -> bool {
        self.step() == Step::Model && self.request().has_model()
    }

    pub fn can_submit(&self) -> bool {
        self.step() == Step::Details && !self.is_loading()
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            context: self.session.context.clone(),
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            step: self.step(),
            loading: self.is_loading(),
            request: self.request(),
            result: self.result(),
            notification: self.notification(),
        }
    }
}
