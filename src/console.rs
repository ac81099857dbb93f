//! Line commands for the terminal front-end.
//!
//! Each input line maps to one UI event, a form-field edit, or a console
//! action. A bare element id is treated as a click on that element.

use std::str::FromStr;

use crate::handlers::{Key, UiEvent};
use crate::view::{Affordance, ModalId};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Unknown key '{0}' (expected escape or enter)")]
    UnknownKey(String),

    #[error("{0}")]
    InvalidModal(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(UiEvent),
    /// Destructive event; the console asks before dispatching it
    Confirm { prompt: &'static str, event: UiEvent },
    Set { field: String, value: String },
    Show,
    Dismiss,
    Elements,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  set <field> <value>             edit a form field (e.g. set username admin)
  click <element> | <element>     click a bound element (e.g. login-btn)
  key escape                      close every open modal
  key enter <field>               press Enter inside a field
  view <patient-id>               open patient details
  edit <patient-id>               open the edit form
  delete <patient-id>             delete a patient (admin)
  edit-appointment <pid> <aid>    open the appointment edit form (admin)
  delete-appointment <pid> <aid>  delete an appointment (admin)
  close <modal-id>                close one modal
  elements                        list bound elements
  show | dismiss | help | quit";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let mut args = rest.split_whitespace();

        let command = match word {
            "" | "show" => Command::Show,
            "help" | "?" => Command::Help,
            "elements" => Command::Elements,
            "quit" | "exit" => Command::Quit,
            "dismiss" => Command::Dismiss,
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "set",
                        argument: "a field id",
                    });
                }
                Command::Set {
                    field: field.to_string(),
                    value: value.trim().to_string(),
                }
            }
            "click" => Command::Event(UiEvent::Click(
                required(args.next(), "click", "an element id")?.to_string(),
            )),
            "key" => match required(args.next(), "key", "a key name")? {
                k if k.eq_ignore_ascii_case("escape") || k.eq_ignore_ascii_case("esc") => {
                    Command::Event(UiEvent::KeyDown {
                        field: args.next().map(str::to_string),
                        key: Key::Escape,
                    })
                }
                k if k.eq_ignore_ascii_case("enter") => Command::Event(UiEvent::KeyDown {
                    field: args.next().map(str::to_string),
                    key: Key::Enter,
                }),
                other => return Err(CommandError::UnknownKey(other.to_string())),
            },
            "view" => Command::Event(UiEvent::Activate(Affordance::ViewPatient(
                required(args.next(), "view", "a patient id")?.to_string(),
            ))),
            "edit" => Command::Event(UiEvent::Activate(Affordance::EditPatient(
                required(args.next(), "edit", "a patient id")?.to_string(),
            ))),
            "delete" => Command::Confirm {
                prompt: "Delete this patient?",
                event: UiEvent::Activate(Affordance::DeletePatient(
                    required(args.next(), "delete", "a patient id")?.to_string(),
                )),
            },
            "edit-appointment" => {
                let patient_id = required(args.next(), "edit-appointment", "a patient id")?;
                let appointment_id =
                    required(args.next(), "edit-appointment", "an appointment id")?;
                Command::Event(UiEvent::Activate(Affordance::EditAppointment {
                    patient_id: patient_id.to_string(),
                    appointment_id: appointment_id.to_string(),
                }))
            }
            "delete-appointment" => {
                let patient_id = required(args.next(), "delete-appointment", "a patient id")?;
                let appointment_id =
                    required(args.next(), "delete-appointment", "an appointment id")?;
                Command::Confirm {
                    prompt: "Delete this appointment?",
                    event: UiEvent::Activate(Affordance::DeleteAppointment {
                        patient_id: patient_id.to_string(),
                        appointment_id: appointment_id.to_string(),
                    }),
                }
            }
            "close" => {
                let id = required(args.next(), "close", "a modal id")?
                    .parse::<ModalId>()
                    .map_err(CommandError::InvalidModal)?;
                Command::Event(UiEvent::Activate(Affordance::CloseModal(id)))
            }
            element => Command::Event(UiEvent::Click(element.to_string())),
        };

        Ok(command)
    }
}

fn required<'a>(
    arg: Option<&'a str>,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    arg.ok_or(CommandError::MissingArgument { command, argument })
}

/// Only an explicit yes confirms
pub fn is_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
