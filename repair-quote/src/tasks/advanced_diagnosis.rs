use async_trait::async_trait;
use step_flow::{Context, Result, Task, TaskResult};

use super::types::{ValidationBlocked, WizardAction};
use super::utils::{blocked, go_back, read_action, restart};

/// Step 6: repairs that need the device on the bench. No automatic quote;
/// the user can go back to pick another issue or start over.
pub struct AdvancedDiagnosisTask;

#[async_trait]
impl Task for AdvancedDiagnosisTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        match read_action(&context).await? {
            WizardAction::Back => Ok(go_back()),
            WizardAction::Reset => Ok(restart()),
            _ => Ok(blocked(self.id(), ValidationBlocked::NotAvailableHere)),
        }
    }
}
