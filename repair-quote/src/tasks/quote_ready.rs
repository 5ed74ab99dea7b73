use async_trait::async_trait;
use step_flow::{Context, Result, Task, TaskResult};

use super::types::{ValidationBlocked, WizardAction};
use super::utils::{blocked, read_action, restart};

/// Step 5: the quote is on screen. Only a new consultation leaves it.
pub struct QuoteReadyTask;

#[async_trait]
impl Task for QuoteReadyTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        match read_action(&context).await? {
            WizardAction::Reset => Ok(restart()),
            _ => Ok(blocked(self.id(), ValidationBlocked::NotAvailableHere)),
        }
    }
}
