//! Terminal prompt transport built on crossterm.
//!
//! # Keybindings
//!
//! | Key | Text prompt | Choice prompt |
//! |-----|-------------|---------------|
//! | Enter | Submit (empty line keeps the default) | Pick highlighted option |
//! | Backspace | Delete last character | |
//! | `k` / Up | | Move selection up |
//! | `j` / Down | | Move selection down |
//! | Esc / Ctrl-C | Interrupt | Interrupt |
//! | Ctrl-D | Close (on an empty line) | Close |
//!
//! Key handling lives in [`LineInput`] and [`ChoiceInput`], which never touch
//! the terminal; [`TerminalPrompter`] only reads events and draws.

use std::io::{self, Stderr, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};

use crate::prompt::{ChoicePrompt, PromptError, Prompter, TextPrompt};
use crate::types::MASK_GLYPH;

/// What a key press did to an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome<T> {
    /// Keep reading keys.
    Pending,
    Submit(T),
    Interrupted,
    Closed,
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Line editor state for one [`TextPrompt`].
#[derive(Debug, Clone)]
pub struct LineInput {
    prompt: TextPrompt,
    buffer: String,
}

impl LineInput {
    /// Editable prompts start with the default in the buffer.
    pub fn new(prompt: &TextPrompt) -> Self {
        let buffer = if prompt.editable {
            prompt.default.clone()
        } else {
            String::new()
        };
        Self {
            prompt: prompt.clone(),
            buffer,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome<String> {
        if key.kind != KeyEventKind::Press {
            return KeyOutcome::Pending;
        }
        if is_ctrl(&key, 'c') {
            return KeyOutcome::Interrupted;
        }
        if is_ctrl(&key, 'd') {
            return if self.buffer.is_empty() {
                KeyOutcome::Closed
            } else {
                KeyOutcome::Pending
            };
        }

        match key.code {
            KeyCode::Esc => KeyOutcome::Interrupted,
            KeyCode::Enter => KeyOutcome::Submit(self.prompt.resolve(&self.buffer)),
            KeyCode::Backspace => {
                self.buffer.pop();
                KeyOutcome::Pending
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.buffer.push(c);
                KeyOutcome::Pending
            }
            _ => KeyOutcome::Pending,
        }
    }

    /// The buffer as it is echoed: nothing when hidden, glyphs when masked.
    pub fn echo(&self) -> String {
        if !self.prompt.echoes() {
            return String::new();
        }
        match self.prompt.mask() {
            Some(glyph) => glyph.to_string().repeat(self.buffer.chars().count()),
            None => self.buffer.clone(),
        }
    }

    /// The full prompt line.
    pub fn render(&self) -> String {
        let hint = if self.prompt.confirm {
            let hint = if self.prompt.default.trim().eq_ignore_ascii_case("y") {
                " [Y/n]"
            } else {
                " [y/N]"
            };
            hint.to_string()
        } else if !self.prompt.editable && !self.prompt.rendered_default().is_empty() {
            format!(" [{}]", self.prompt.rendered_default())
        } else {
            String::new()
        };
        format!("{}{}: {}", self.prompt.label, hint, self.echo())
    }
}

/// Selection state for one [`ChoicePrompt`].
#[derive(Debug, Clone)]
pub struct ChoiceInput {
    prompt: ChoicePrompt,
    selected: usize,
}

impl ChoiceInput {
    pub fn new(prompt: &ChoicePrompt) -> Self {
        let last = prompt.options.len().saturating_sub(1);
        Self {
            prompt: prompt.clone(),
            selected: prompt.selected.min(last),
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome<(usize, String)> {
        if key.kind != KeyEventKind::Press {
            return KeyOutcome::Pending;
        }
        if is_ctrl(&key, 'c') {
            return KeyOutcome::Interrupted;
        }
        if is_ctrl(&key, 'd') {
            return KeyOutcome::Closed;
        }

        match key.code {
            KeyCode::Esc => KeyOutcome::Interrupted,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                KeyOutcome::Pending
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let last = self.prompt.options.len().saturating_sub(1);
                self.selected = (self.selected + 1).min(last);
                KeyOutcome::Pending
            }
            KeyCode::Enter => match self.prompt.options.get(self.selected) {
                Some(option) => KeyOutcome::Submit((self.selected, option.clone())),
                None => KeyOutcome::Closed,
            },
            _ => KeyOutcome::Pending,
        }
    }

    pub fn render(&self) -> String {
        let options: Vec<String> = self
            .prompt
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                if i == self.selected {
                    format!("({MASK_GLYPH}) {option}")
                } else {
                    format!("( ) {option}")
                }
            })
            .collect();
        format!("{}: {}", self.prompt.label, options.join("  "))
    }
}

/// Restores cooked mode when dropped.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Interactive [`Prompter`] drawing single-line prompts on a terminal.
pub struct TerminalPrompter<W: Write = Stderr> {
    out: W,
}

impl TerminalPrompter<Stderr> {
    /// Draw on stderr so stdout stays free for program output.
    pub fn new() -> Self {
        Self { out: io::stderr() }
    }
}

impl Default for TerminalPrompter<Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalPrompter<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    fn draw(&mut self, line: &str) -> io::Result<()> {
        queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(line)
        )?;
        self.out.flush()
    }

    fn finish_line(&mut self) -> io::Result<()> {
        queue!(self.out, Print("\r\n"))?;
        self.out.flush()
    }

    fn run<T>(
        &mut self,
        mut render: impl FnMut() -> String,
        mut on_key: impl FnMut(KeyEvent) -> KeyOutcome<T>,
    ) -> Result<T, PromptError> {
        let _raw = RawModeGuard::enable()?;
        loop {
            let line = render();
            self.draw(&line)?;
            let Event::Key(key) = event::read()? else {
                continue;
            };
            let outcome = on_key(key);
            match outcome {
                KeyOutcome::Pending => continue,
                KeyOutcome::Submit(answer) => {
                    let line = render();
                    self.draw(&line)?;
                    self.finish_line()?;
                    return Ok(answer);
                }
                KeyOutcome::Interrupted => {
                    self.finish_line()?;
                    return Err(PromptError::Interrupted);
                }
                KeyOutcome::Closed => {
                    self.finish_line()?;
                    return Err(PromptError::Closed);
                }
            }
        }
    }
}

impl<W: Write> Prompter for TerminalPrompter<W> {
    fn run_text(&mut self, prompt: &TextPrompt) -> Result<String, PromptError> {
        let input = std::cell::RefCell::new(LineInput::new(prompt));
        self.run(
            || input.borrow().render(),
            |key| input.borrow_mut().handle_key(key),
        )
    }

    fn run_choice(&mut self, prompt: &ChoicePrompt) -> Result<(usize, String), PromptError> {
        let input = std::cell::RefCell::new(ChoiceInput::new(prompt));
        self.run(
            || input.borrow().render(),
            |key| input.borrow_mut().handle_key(key),
        )
    }
}
