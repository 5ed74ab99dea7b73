use serde::{Deserialize, Serialize};
use std::any::type_name;

use super::{
    AdvancedDiagnosisTask, BrandSelectionTask, IssueSelectionTask, ModelEntryTask,
    QuoteReadyTask, RepairDetailsTask,
};

/// Shown to the user whenever a quote could not be produced, whatever the cause
pub const QUOTE_FAILED_NOTIFICATION: &str =
    "Hubo un error generando tu cotización. Por favor intenta de nuevo.";

pub mod session_keys {
    pub const USER_INPUT: &str = "user_input";
    pub const SESSION_ID: &str = "session_id";
    pub const QUOTE_REQUEST: &str = "quote_request";
    pub const QUOTE_RESULT: &str = "quote_result";
    pub const LOADING: &str = "loading";
    pub const NOTIFICATION: &str = "notification";
}

/// Everything a user can do in the wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum WizardAction {
    SelectBrand(String),
    EditModel(String),
    ConfirmModel,
    SelectIssue(String),
    EditDetails(String),
    Submit,
    Back,
    Reset,
}

/// The six screens of the wizard, numbered as the user sees them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Step {
    Brand = 1,
    Model = 2,
    Issue = 3,
    Details = 4,
    Quote = 5,
    Diagnosis = 6,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Brand,
        Step::Model,
        Step::Issue,
        Step::Details,
        Step::Quote,
        Step::Diagnosis,
    ];

    pub fn number(self) -> u8 {
        self as u8
    }

    /// ID of the task that handles this step in the workflow graph
    pub fn task_id(self) -> &'static str {
        match self {
            Step::Brand => type_name::<BrandSelectionTask>(),
            Step::Model => type_name::<ModelEntryTask>(),
            Step::Issue => type_name::<IssueSelectionTask>(),
            Step::Details => type_name::<RepairDetailsTask>(),
            Step::Quote => type_name::<QuoteReadyTask>(),
            Step::Diagnosis => type_name::<AdvancedDiagnosisTask>(),
        }
    }

    pub fn from_task_id(task_id: &str) -> Option<Step> {
        Step::ALL.into_iter().find(|step| step.task_id() == task_id)
    }

    /// Steps that still lead to an automatic quote show the banner and progress bar
    pub fn in_progress(self) -> bool {
        self < Step::Quote
    }
}

/// Why a transition was not taken. Not an error: the step just stays put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationBlocked {
    UnknownBrand,
    EmptyModel,
    UnknownIssue,
    QuoteInFlight,
    NotAvailableHere,
}

impl ValidationBlocked {
    pub fn reason(self) -> &'static str {
        match self {
            Self::UnknownBrand => "brand is not in the catalog",
            Self::EmptyModel => "model is empty",
            Self::UnknownIssue => "issue is not in the catalog",
            Self::QuoteInFlight => "a quote request is already pending",
            Self::NotAvailableHere => "action not available at this step",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_round_trip_through_task_ids() {
        for step in Step::ALL {
            assert_eq!(Step::from_task_id(step.task_id()), Some(step));
        }
        assert_eq!(Step::from_task_id("nope"), None);
        assert_eq!(Step::Diagnosis.number(), 6);
        assert!(Step::Details.in_progress());
        assert!(!Step::Quote.in_progress());
    }

    #[test]
    fn actions_serialize_with_a_tag() {
        let json = serde_json::to_value(WizardAction::SelectBrand("Samsung".to_string())).unwrap();
        assert_eq!(json["action"], "select_brand");
        assert_eq!(json["value"], "Samsung");

        let back: WizardAction = serde_json::from_value(serde_json::json!({ "action": "back" })).unwrap();
        assert_eq!(back, WizardAction::Back);
    }
}
