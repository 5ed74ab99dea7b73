use async_trait::async_trait;
use step_flow::{Context, NextAction, Result, Task, TaskResult};
use tracing::info;

use super::types::{ValidationBlocked, WizardAction};
use super::utils::{blocked, load_request, moved, read_action, restart, store_request};
use crate::models::find_brand;

/// Step 1: pick the device brand from the fixed catalog
pub struct BrandSelectionTask;

#[async_trait]
impl Task for BrandSelectionTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        match read_action(&context).await? {
            WizardAction::SelectBrand(input) => {
                let Some(brand) = find_brand(&input) else {
                    return Ok(blocked(self.id(), ValidationBlocked::UnknownBrand));
                };

                let mut request = load_request(&context).await;
                request.brand = brand.name.to_string();
                store_request(&context, &request).await;

                info!(task_id = %self.id(), brand = %brand.name, "brand selected");
                Ok(moved(
                    format!("Brand selected: {}", brand.name),
                    NextAction::Continue,
                ))
            }
            WizardAction::Reset => Ok(restart()),
            _ => Ok(blocked(self.id(), ValidationBlocked::NotAvailableHere)),
        }
    }
}
