//! Prompt transport contract.
//!
//! The editor only talks to a [`Prompter`]: one call per question, no
//! knowledge of how the question is drawn. [`TerminalPrompter`] is the
//! interactive implementation; tests script their own.
//!
//! [`TerminalPrompter`]: crate::TerminalPrompter

use thiserror::Error;

use crate::types::{MASK_GLYPH, SecrecyMode};

/// Failure of the prompt transport itself (not of the answer).
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt interrupted")]
    Interrupted,

    #[error("input stream closed")]
    Closed,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders prompts and returns the user's answers.
pub trait Prompter {
    /// Ask for free text. Implementations return [`TextPrompt::resolve`] of
    /// whatever was entered.
    fn run_text(&mut self, prompt: &TextPrompt) -> Result<String, PromptError>;

    /// Ask the user to pick one option. Returns its index and label.
    fn run_choice(&mut self, prompt: &ChoicePrompt) -> Result<(usize, String), PromptError>;
}

/// A free-text question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPrompt {
    pub label: String,
    /// Returned when the user submits an empty line.
    pub default: String,
    /// Whether the default is placed in the input buffer for in-place editing.
    pub editable: bool,
    pub secrecy: SecrecyMode,
    /// Yes/no question rendered with a `[y/N]` hint.
    pub confirm: bool,
}

impl TextPrompt {
    /// Prompt for a field value. Secret fields are never editable in place.
    pub fn field(label: &str, default: &str, secrecy: SecrecyMode) -> Self {
        Self {
            label: label.to_string(),
            default: default.to_string(),
            editable: secrecy == SecrecyMode::None,
            secrecy,
            confirm: false,
        }
    }

    /// Yes/no confirmation with the given default answer.
    pub fn confirm(label: &str, default: &str) -> Self {
        Self {
            label: label.to_string(),
            default: default.to_string(),
            editable: false,
            secrecy: SecrecyMode::None,
            confirm: true,
        }
    }

    /// The default as it may appear on screen.
    pub fn rendered_default(&self) -> String {
        match self.secrecy {
            SecrecyMode::None => self.default.clone(),
            SecrecyMode::Hide => String::new(),
            SecrecyMode::Mask => MASK_GLYPH.to_string().repeat(self.default.chars().count()),
        }
    }

    /// Character echoed in place of each typed character, if any.
    pub fn mask(&self) -> Option<char> {
        match self.secrecy {
            SecrecyMode::Mask => Some(MASK_GLYPH),
            _ => None,
        }
    }

    /// Whether typed characters are echoed at all.
    pub fn echoes(&self) -> bool {
        self.secrecy != SecrecyMode::Hide
    }

    /// The answer for a submitted line: the line itself, or the default when
    /// nothing was entered.
    pub fn resolve(&self, entered: &str) -> String {
        if entered.is_empty() {
            self.default.clone()
        } else {
            entered.to_string()
        }
    }
}

/// A pick-one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoicePrompt {
    pub label: String,
    pub options: Vec<String>,
    pub selected: usize,
}

impl ChoicePrompt {
    /// `False` / `True`, preselected to `current`.
    pub fn boolean(label: &str, current: bool) -> Self {
        Self {
            label: label.to_string(),
            options: vec!["False".to_string(), "True".to_string()],
            selected: usize::from(current),
        }
    }
}
