use async_trait::async_trait;
use step_flow::{Context, NextAction, Result, Task, TaskResult};
use tracing::info;

use super::types::{ValidationBlocked, WizardAction};
use super::utils::{blocked, go_back, load_request, moved, read_action, restart, store_request};

/// Step 2: free-text model, confirmed once it is not blank
pub struct ModelEntryTask;

#[async_trait]
impl Task for ModelEntryTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        match read_action(&context).await? {
            WizardAction::EditModel(model) => {
                let mut request = load_request(&context).await;
                request.model = model;
                store_request(&context, &request).await;
                Ok(TaskResult::wait("Model updated"))
            }
            WizardAction::ConfirmModel => {
                let request = load_request(&context).await;
                if !request.has_model() {
                    return Ok(blocked(self.id(), ValidationBlocked::EmptyModel));
                }

                info!(task_id = %self.id(), model = %request.model.trim(), "model confirmed");
                Ok(moved(
                    format!("Model confirmed: {}", request.model.trim()),
                    NextAction::Continue,
                ))
            }
            WizardAction::Back => Ok(go_back()),
            WizardAction::Reset => Ok(restart()),
            _ => Ok(blocked(self.id(), ValidationBlocked::NotAvailableHere)),
        }
    }
}
