//! Line-oriented input for the terminal front end.

use crate::models::{BRANDS, COMMON_ISSUES};
use crate::tasks::{Step, WizardAction};

/// What one line typed by the user asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Actions to dispatch in order
    Actions(Vec<WizardAction>),
    /// Print the WhatsApp link for the current screen
    Contact,
    /// Print the share text for the current quote
    Share,
    Quit,
}

/// Interpret a line at the given step. `None` means the line meant nothing here.
pub fn parse_line(step: Step, line: &str) -> Option<Command> {
    let input = line.trim();

    match input.to_lowercase().as_str() {
        "v" | "volver" => return Some(Command::Actions(vec![WizardAction::Back])),
        "n" | "nueva" => return Some(Command::Actions(vec![WizardAction::Reset])),
        "w" | "whatsapp" => return Some(Command::Contact),
        "c" | "compartir" => return Some(Command::Share),
        "q" | "salir" => return Some(Command::Quit),
        _ => {}
    }

    let actions = match step {
        Step::Brand if input.is_empty() => return None,
        Step::Brand => vec![WizardAction::SelectBrand(
            pick(input, BRANDS.iter().map(|b| b.name)).unwrap_or(input).to_string(),
        )],
        // Enter accepts whatever model is already typed
        Step::Model if input.is_empty() => vec![WizardAction::ConfirmModel],
        Step::Model => vec![
            WizardAction::EditModel(input.to_string()),
            WizardAction::ConfirmModel,
        ],
        Step::Issue if input.is_empty() => return None,
        Step::Issue => vec![WizardAction::SelectIssue(
            pick(input, COMMON_ISSUES.iter().map(|i| i.label))
                .unwrap_or(input)
                .to_string(),
        )],
        Step::Details if input.is_empty() => vec![WizardAction::Submit],
        Step::Details => vec![
            WizardAction::EditDetails(input.to_string()),
            WizardAction::Submit,
        ],
        Step::Quote | Step::Diagnosis => return None,
    };
    Some(Command::Actions(actions))
}

/// Menu entry for a 1-based number typed by the user
fn pick<'a>(input: &str, mut options: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let n: usize = input.parse().ok()?;
    options.nth(n.checked_sub(1)?)
}

/// Keys available at the given step
pub fn hint(step: Step) -> &'static str {
    match step {
        Step::Brand => "Número o nombre de la marca · q salir",
        Step::Model => "Escribe el modelo y Enter · v volver · n nueva · q salir",
        Step::Issue => "Número del problema · v volver · n nueva · q salir",
        Step::Details => {
            "Observaciones y Enter (vacío para cotizar sin detalles) · v volver · n nueva · q salir"
        }
        Step::Quote => "w agendar por WhatsApp · c compartir · n nueva cotización · q salir",
        Step::Diagnosis => "w contactar técnico · v volver · n nueva consulta · q salir",
    }
}
