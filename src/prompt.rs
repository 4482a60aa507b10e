// Terminal input. Every blocking read the client performs goes through
// `Prompter`, so the menu loop and the negotiators can be driven by a
// script in tests.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use dialoguer::{Editor, Input, Password};

use crate::error::{ClientError, Result};

pub trait Prompter {
    /// Block until a single character key is pressed.
    fn read_key(&mut self) -> Result<char>;

    /// Read a line of text. With `allow_empty` false the prompt repeats
    /// until something is typed.
    fn text(&mut self, prompt: &str, allow_empty: bool) -> Result<String>;

    /// Read a non-negative whole number, re-asking on bad input.
    fn integer(&mut self, prompt: &str) -> Result<u32>;

    /// Read a decimal number, re-asking on bad input.
    fn decimal(&mut self, prompt: &str) -> Result<f64>;

    /// Read a line without echoing it.
    fn password(&mut self, prompt: &str) -> Result<String>;

    /// Hand `path` to the user's editor and write back whatever they saved.
    fn edit_file(&mut self, path: &Path) -> Result<()>;
}

/// Leaves raw mode when dropped, including on the error path.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Reads keys through crossterm and lines through dialoguer.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        TerminalPrompter
    }
}

impl Prompter for TerminalPrompter {
    fn read_key(&mut self) -> Result<char> {
        io::stdout().flush()?;
        let c = {
            let _raw = RawMode::enable()?;
            loop {
                if let Event::Key(KeyEvent {
                    code: KeyCode::Char(c),
                    modifiers,
                    kind: KeyEventKind::Press,
                    ..
                }) = event::read()?
                {
                    if modifiers.contains(KeyModifiers::CONTROL) && matches!(c, 'c' | 'd') {
                        return Err(ClientError::Interrupted);
                    }
                    break c;
                }
            }
        };
        // Echo the key the way a cooked terminal would.
        println!("{c}");
        Ok(c)
    }

    fn text(&mut self, prompt: &str, allow_empty: bool) -> Result<String> {
        let value: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(allow_empty)
            .interact_text()?;
        Ok(value)
    }

    fn integer(&mut self, prompt: &str) -> Result<u32> {
        Ok(Input::<u32>::new().with_prompt(prompt).interact_text()?)
    }

    fn decimal(&mut self, prompt: &str) -> Result<f64> {
        Ok(Input::<f64>::new().with_prompt(prompt).interact_text()?)
    }

    fn password(&mut self, prompt: &str) -> Result<String> {
        Ok(Password::new().with_prompt(prompt).interact()?)
    }

    fn edit_file(&mut self, path: &Path) -> Result<()> {
        let current = fs::read_to_string(path)?;
        match Editor::new().extension(".toml").edit(&current)? {
            Some(edited) => {
                fs::write(path, edited)?;
                tracing::info!(path = %path.display(), "configuration edited");
            }
            None => tracing::debug!("editor closed without saving"),
        }
        Ok(())
    }
}
