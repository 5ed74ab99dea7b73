pub mod context;
pub mod error;
pub mod graph;
pub mod session;
pub mod task;

// Re-export commonly used types
pub use context::Context;
pub use error::{GraphError, Result};
pub use graph::{ExecutionResult, ExecutionStatus, Graph, GraphBuilder};
pub use session::Session;
pub use task::{NextAction, Task, TaskResult};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Reads the action from the context and reports it as its next move
    struct ScriptedTask {
        id: String,
    }

    impl ScriptedTask {
        fn new(id: &str) -> Arc<Self> {
            Arc::new(Self { id: id.to_string() })
        }
    }

    #[async_trait]
    impl Task for ScriptedTask {
        fn id(&self) -> &str {
            &self.id
        }

        async fn run(&self, context: Context) -> Result<TaskResult> {
            let action: String = context
                .get("action")
                .await
                .ok_or_else(|| GraphError::ContextError("action not found".to_string()))?;
            context.set(format!("visited_{}", self.id), true).await;

            let next_action = match action.as_str() {
                "next" => NextAction::Continue,
                "back" => NextAction::GoBack,
                "reset" => NextAction::Reset,
                "jump" => NextAction::GoTo("missing".to_string()),
                _ => NextAction::WaitForInput,
            };
            Ok(TaskResult::new(Some(format!("ran {}", self.id)), next_action))
        }
    }

    fn linear_graph() -> Graph {
        GraphBuilder::new("test_graph")
            .add_task(ScriptedTask::new("a"))
            .add_task(ScriptedTask::new("b"))
            .add_task(ScriptedTask::new("c"))
            .add_task(ScriptedTask::new("d"))
            .add_edge("a", "b")
            .add_conditional_edge(
                "b",
                |context| context.get_sync::<bool>("take_d").unwrap_or(false),
                "d",
                "c",
            )
            .build()
    }

    async fn step(graph: &Graph, session: &mut Session, action: &str) -> ExecutionResult {
        session.context.set("action", action).await;
        graph.execute_session(session).await.unwrap()
    }

    #[tokio::test]
    async fn test_continue_follows_edges() {
        let graph = linear_graph();
        let mut session = Session::new_from_task("s1".to_string(), "a");

        let result = step(&graph, &mut session, "next").await;
        assert_eq!(result.status, ExecutionStatus::Advanced);
        assert_eq!(result.response.as_deref(), Some("ran a"));
        assert_eq!(session.current_task_id, "b");

        step(&graph, &mut session, "next").await;
        assert_eq!(session.current_task_id, "c");
        assert_eq!(session.history, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_conditional_edge_takes_yes_branch() {
        let graph = linear_graph();
        let mut session = Session::new_from_task("s1".to_string(), "b");
        session.context.set("take_d", true).await;

        step(&graph, &mut session, "next").await;
        assert_eq!(session.current_task_id, "d");
    }

    #[tokio::test]
    async fn test_wait_and_dead_end_stay_put() {
        let graph = linear_graph();
        let mut session = Session::new_from_task("s1".to_string(), "c");

        let result = step(&graph, &mut session, "noop").await;
        assert_eq!(result.status, ExecutionStatus::WaitingForInput);
        assert_eq!(session.current_task_id, "c");

        // c has no outgoing edge
        let result = step(&graph, &mut session, "next").await;
        assert_eq!(result.status, ExecutionStatus::WaitingForInput);
        assert_eq!(session.current_task_id, "c");
    }

    #[tokio::test]
    async fn test_back_and_reset() {
        let graph = linear_graph();
        let mut session = Session::new_from_task("s1".to_string(), "a");
        step(&graph, &mut session, "next").await;
        step(&graph, &mut session, "next").await;

        let result = step(&graph, &mut session, "back").await;
        assert_eq!(result.status, ExecutionStatus::SteppedBack);
        assert_eq!(session.current_task_id, "b");

        let result = step(&graph, &mut session, "reset").await;
        assert_eq!(result.status, ExecutionStatus::Restarted);
        assert_eq!(session.current_task_id, "a");
        assert!(session.history.is_empty());
        assert!(!session.context.contains("visited_b"));
    }

    #[tokio::test]
    async fn test_back_at_start_is_a_no_op() {
        let graph = linear_graph();
        let mut session = Session::new_from_task("s1".to_string(), "a");

        let result = step(&graph, &mut session, "back").await;
        assert_eq!(result.status, ExecutionStatus::WaitingForInput);
        assert_eq!(session.current_task_id, "a");
    }

    #[tokio::test]
    async fn test_goto_unknown_task_fails() {
        let graph = linear_graph();
        let mut session = Session::new_from_task("s1".to_string(), "a");
        session.context.set("action", "jump").await;

        let err = graph.execute_session(&mut session).await.unwrap_err();
        assert!(matches!(err, GraphError::TaskNotFound(id) if id == "missing"));
        assert_eq!(session.current_task_id, "a");
    }

    #[tokio::test]
    async fn test_start_task_override() {
        let graph = GraphBuilder::new("g")
            .add_task(ScriptedTask::new("a"))
            .add_task(ScriptedTask::new("b"))
            .set_start_task("b")
            .set_start_task("unknown")
            .build();

        assert_eq!(graph.start_task_id().as_deref(), Some("b"));
        assert!(graph.get_task("a").is_some());
        assert!(graph.get_task("z").is_none());
    }
}
