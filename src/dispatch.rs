// Numbered menu commands. The session loop filters keys; anything that
// reaches `handle` is one of the nine commands below.

use std::io::Write;

use crate::context::Context;
use crate::entry;
use crate::error::{ClientError, Result};
use crate::session::Session;
use crate::status;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    LogEaten,
    LogExercised,
    RecordWeight,
    SelectDate,
    AddShortcut,
    ShowStatus,
    ShowLog,
    EditConfig,
    Quit,
}

impl Command {
    /// Map a menu number to its command. 0 and anything above 9 are not
    /// commands.
    pub fn from_number(n: u32) -> Option<Self> {
        let command = match n {
            1 => Command::LogEaten,
            2 => Command::LogExercised,
            3 => Command::RecordWeight,
            4 => Command::SelectDate,
            5 => Command::AddShortcut,
            6 => Command::ShowStatus,
            7 => Command::ShowLog,
            8 => Command::EditConfig,
            9 => Command::Quit,
            _ => return None,
        };
        Some(command)
    }
}

/// Run one command to completion. `Ok(false)` ends the session.
pub fn handle(ctx: &mut Context<'_>, session: &Session, command: Command) -> Result<bool> {
    tracing::debug!(?command, "dispatch");
    match command {
        Command::LogEaten | Command::LogExercised => {
            let ate = command == Command::LogEaten;
            let calories = ctx.prompter.integer("Number of calories")?;
            let action = if ate { "eat" } else { "do" };
            let note = ctx.prompter.text(&format!("What did you {action}?"), true)?;
            entry::submit(ctx, session, calories, &note, ate)?;
        }
        Command::RecordWeight => return Err(ClientError::Unimplemented("Weight measurement")),
        // Date paging through lookups has no behavior yet.
        Command::SelectDate => {}
        Command::AddShortcut => add_shortcut(ctx, session)?,
        Command::ShowStatus => status::show_status(ctx, session)?,
        Command::ShowLog => status::show_log(ctx, session)?,
        Command::EditConfig => ctx.prompter.edit_file(ctx.config_path)?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}

fn add_shortcut(ctx: &mut Context<'_>, session: &Session) -> Result<()> {
    write!(ctx.out, "(F)ood or (E)xercise? ")?;
    ctx.out.flush()?;
    let ate = ctx.prompter.read_key()?.eq_ignore_ascii_case(&'f');
    let calories = ctx.prompter.integer("Number of calories")?;
    let name = ctx.prompter.text("Name this entry", false)?;
    entry::submit(ctx, session, calories, &name, ate)?;
    record_shortcut(&name, calories, ate);
    Ok(())
}

/// Quick-lookup storage does not exist on either side yet, so the
/// shortcut is only traced.
fn record_shortcut(name: &str, calories: u32, ate: bool) {
    tracing::info!(name, calories, ate, "quick-lookup shortcut not persisted");
}
