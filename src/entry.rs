// Entry submission: sign the calories, date the entry with the session
// cursor, post it and show today's totals.

use std::io::Write;

use chrono::NaiveDate;
use colored::Colorize;

use crate::api::{EntryPayload, EntryType};
use crate::context::Context;
use crate::error::Result;
use crate::session::Session;
use crate::status;

/// Note sent when the user gives none.
pub const DEFAULT_NOTE: &str = "Command line entry with no note.";

/// Build the payload for an entry. Exercise is stored as a negative delta.
pub fn build_payload(calories: u32, note: &str, ate: bool, occurred_on: NaiveDate) -> EntryPayload {
    let calories = i64::from(calories);
    let (entry_type, calories) = if ate {
        (EntryType::Consumption, calories)
    } else {
        (EntryType::Expenditure, -calories)
    };
    let note = if note.trim().is_empty() {
        DEFAULT_NOTE.to_string()
    } else {
        note.to_string()
    };
    EntryPayload {
        entry_type,
        calories,
        note,
        occurred_on,
    }
}

/// Log an entry on the session's current date, then show today's status.
/// A rejected entry is returned as a fatal error; nothing is retried.
pub fn submit(
    ctx: &mut Context<'_>,
    session: &Session,
    calories: u32,
    note: &str,
    ate: bool,
) -> Result<()> {
    let payload = build_payload(calories, note, ate, session.current_date);
    let token = session.token.as_deref().unwrap_or_default();
    tracing::debug!(?payload, "creating entry");
    ctx.service.create_entry(&payload, token)?;
    let confirmation = format!("Logged {} calories.", payload.calories);
    writeln!(ctx.out, "{}", confirmation.as_str().green())?;
    status::show_status(ctx, session)
}
