use async_trait::async_trait;
use step_flow::{Context, NextAction, Result, Task, TaskResult};
use tracing::info;

use super::types::{ValidationBlocked, WizardAction};
use super::utils::{blocked, go_back, load_request, moved, read_action, restart, store_request};
use crate::models::{find_issue, is_other_repairs};

/// Step 3: pick what is wrong with the device.
///
/// Records the issue and continues; the workflow graph decides whether that
/// leads to the details step or straight to the advanced diagnosis screen.
pub struct IssueSelectionTask;

#[async_trait]
impl Task for IssueSelectionTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        match read_action(&context).await? {
            WizardAction::SelectIssue(input) => {
                let Some(issue) = find_issue(&input) else {
                    return Ok(blocked(self.id(), ValidationBlocked::UnknownIssue));
                };

                let mut request = load_request(&context).await;
                request.issue = issue.label.to_string();
                store_request(&context, &request).await;

                info!(
                    task_id = %self.id(),
                    issue = %issue.label,
                    needs_diagnosis = is_other_repairs(issue.label),
                    "issue selected"
                );
                Ok(moved(
                    format!("Issue selected: {}", issue.label),
                    NextAction::Continue,
                ))
            }
            WizardAction::Back => Ok(go_back()),
            WizardAction::Reset => Ok(restart()),
            _ => Ok(blocked(self.id(), ValidationBlocked::NotAvailableHere)),
        }
    }
}
