//! Interactive edit loop.
//!
//! Each pass prompts once per bound field, writes every answer back into the
//! struct, then asks whether the user is done. Passes repeat until the user
//! confirms or the attempt ceiling is reached.

use tracing::{debug, warn};

use crate::binding::EnvConfig;
use crate::error::EnvfigError;
use crate::introspect::fields;
use crate::mutate::set_field;
use crate::prompt::{ChoicePrompt, Prompter, TextPrompt};
use crate::types::{FieldDescriptor, FieldValue, ValueKind};

/// Pass ceiling used when none is configured.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Label of the confirmation prompt closing each pass.
pub const DONE_LABEL: &str = "Done";

/// Run the edit dialog over `config`.
///
/// Fails with [`EnvfigError::TooManyAttempts`] once `max_attempts` passes end
/// without confirmation (a ceiling of 0 allows one pass). A prompt transport
/// error aborts immediately; edits made before it stay in `config`. Values
/// that fail to parse are logged and left unchanged.
pub fn edit_config<C, P>(config: &mut C, prompter: &mut P, max_attempts: usize) -> Result<(), EnvfigError>
where
    C: EnvConfig,
    P: Prompter + ?Sized,
{
    let ceiling = max_attempts.max(1);
    let mut attempts = 0;

    loop {
        for field in fields(config)? {
            let answer = ask(prompter, &field)?;
            if let Err(e) = set_field(config, &field.name, &answer) {
                warn!(name = %field.name, error = %e, "field not updated");
            }
        }

        let done = prompter.run_text(&TextPrompt::confirm(DONE_LABEL, "n"))?;
        if is_yes(&done) {
            debug!(passes = attempts + 1, "edit confirmed");
            return Ok(());
        }

        attempts += 1;
        if attempts >= ceiling {
            return Err(EnvfigError::TooManyAttempts { attempts });
        }
    }
}

fn ask<P: Prompter + ?Sized>(prompter: &mut P, field: &FieldDescriptor) -> Result<String, EnvfigError> {
    if field.kind == ValueKind::Bool {
        let current = matches!(field.value, FieldValue::Bool(true));
        let (_, label) = prompter.run_choice(&ChoicePrompt::boolean(&field.name, current))?;
        return Ok(label);
    }

    let default = field.value.to_text().unwrap_or_default();
    let prompt = TextPrompt::field(&field.name, &default, field.secrecy);
    Ok(prompter.run_text(&prompt)?)
}

/// `y` or `yes`, ignoring case and surrounding whitespace.
pub fn is_yes(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
