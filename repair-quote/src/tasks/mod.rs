// Screen repair quote wizard tasks, one per step
pub mod brand_selection;
pub mod model_entry;
pub mod issue_selection;
pub mod repair_details;
pub mod quote_ready;
pub mod advanced_diagnosis;

// Shared modules
pub mod types;
pub mod utils;

// Re-export task implementations
pub use advanced_diagnosis::AdvancedDiagnosisTask;
pub use brand_selection::BrandSelectionTask;
pub use issue_selection::IssueSelectionTask;
pub use model_entry::ModelEntryTask;
pub use quote_ready::QuoteReadyTask;
pub use repair_details::RepairDetailsTask;

// Re-export session keys and the action/step vocabulary
pub use types::{QUOTE_FAILED_NOTIFICATION, Step, ValidationBlocked, WizardAction, session_keys};
