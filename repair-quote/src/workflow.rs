use std::sync::Arc;
use std::time::Duration;
use step_flow::{Graph, GraphBuilder, Session, Task};
use uuid::Uuid;

use crate::models::{QuoteRequest, is_other_repairs};
use crate::provider::QuoteProvider;
use crate::tasks::*;

/// Wire the six wizard steps into a graph.
///
/// brand -> model -> issue -> details -> quote, with the issue step branching
/// to the diagnosis screen when the customer picked "other repairs".
pub fn build_quote_workflow(provider: Arc<dyn QuoteProvider>, quote_timeout: Duration) -> Graph {
    let brand_task = Arc::new(BrandSelectionTask);
    let brand_id = brand_task.id().to_string();

    let model_task = Arc::new(ModelEntryTask);
    let model_id = model_task.id().to_string();

    let issue_task = Arc::new(IssueSelectionTask);
    let issue_id = issue_task.id().to_string();

    let details_task = Arc::new(RepairDetailsTask::new(provider, quote_timeout));
    let details_id = details_task.id().to_string();

    let quote_task = Arc::new(QuoteReadyTask);
    let quote_id = quote_task.id().to_string();

    let diagnosis_task = Arc::new(AdvancedDiagnosisTask);
    let diagnosis_id = diagnosis_task.id().to_string();

    GraphBuilder::new("screen_repair_quote")
        .add_task(brand_task)
        .add_task(model_task)
        .add_task(issue_task)
        .add_task(details_task)
        .add_task(quote_task)
        .add_task(diagnosis_task)
        .add_edge(&brand_id, &model_id)
        .add_edge(&model_id, &issue_id)
        .add_conditional_edge(
            &issue_id,
            |context| {
                context
                    .get_sync::<QuoteRequest>(session_keys::QUOTE_REQUEST)
                    .map(|request| is_other_repairs(&request.issue))
                    .unwrap_or(false)
            },
            &diagnosis_id, // yes – needs an in-person diagnosis
            &details_id,   // else – automatic screen quote
        )
        .add_edge(&details_id, &quote_id)
        .set_start_task(&brand_id)
        .build()
}

/// Fresh session positioned at the brand step
pub fn create_quote_session() -> Session {
    let mut session = Session::new_from_task(Uuid::new_v4().to_string(), Step::Brand.task_id());
    session.graph_id = "screen_repair_quote".to_string();
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::RulesQuoteProvider;
    use step_flow::Context;

    #[test]
    fn graph_starts_at_brand_and_routes_issues() {
        let graph = build_quote_workflow(Arc::new(RulesQuoteProvider), Duration::from_secs(1));
        assert_eq!(graph.start_task_id().as_deref(), Some(Step::Brand.task_id()));

        let context = Context::new();
        let mut request = QuoteRequest {
            issue: "Cambio de Pantalla".to_string(),
            ..QuoteRequest::default()
        };
        context.set_sync(session_keys::QUOTE_REQUEST, &request);
        assert_eq!(
            graph.find_next_task(Step::Issue.task_id(), &context).as_deref(),
            Some(Step::Details.task_id())
        );

        request.issue = "Otras Reparaciones".to_string();
        context.set_sync(session_keys::QUOTE_REQUEST, &request);
        assert_eq!(
            graph.find_next_task(Step::Issue.task_id(), &context).as_deref(),
            Some(Step::Diagnosis.task_id())
        );

        assert_eq!(graph.find_next_task(Step::Quote.task_id(), &context), None);
        assert_eq!(graph.find_next_task(Step::Diagnosis.task_id(), &context), None);
    }

    #[test]
    fn new_sessions_are_unique_and_start_at_brand() {
        let a = create_quote_session();
        let b = create_quote_session();
        assert_ne!(a.id, b.id);
        assert_eq!(a.current_task_id, Step::Brand.task_id());
        assert!(a.history.is_empty());
    }
}
