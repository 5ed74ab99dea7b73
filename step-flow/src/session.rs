use crate::context::Context;

/// One user's walk through a graph: where they are, how they got there, and
/// the data collected so far.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub graph_id: String,
    pub current_task_id: String,
    /// Tasks visited before the current one, oldest first
    pub history: Vec<String>,
    pub status_message: Option<String>,
    pub context: Context,
}

impl Session {
    pub fn new_from_task(sid: String, task_name: &str) -> Self {
        Self {
            id: sid,
            graph_id: "default".to_string(),
            current_task_id: task_name.to_string(),
            history: Vec::new(),
            status_message: None,
            context: Context::new(),
        }
    }

    /// Move forward, remembering the current task for a later `GoBack`
    pub(crate) fn advance_to(&mut self, task_id: String) {
        let previous = std::mem::replace(&mut self.current_task_id, task_id);
        self.history.push(previous);
    }

    /// Return to the last visited task. Returns false when there is nothing to go back to.
    pub(crate) fn step_back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current_task_id = previous;
                true
            }
            None => false,
        }
    }

    pub(crate) fn restart_at(&mut self, start_task_id: String) {
        self.context.clear();
        self.history.clear();
        self.current_task_id = start_task_id;
    }
}
