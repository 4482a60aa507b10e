// UI layer: the keypress-driven menu loop and first-run setup.
// Each key is handled to completion before the next one is read.

use std::io::{self, Write};

use crate::auth;
use crate::context::Context;
use crate::dispatch::{self, Command};
use crate::enroll;
use crate::error::Result;
use crate::session::Session;

pub fn draw_menu(out: &mut dyn Write, session: &Session) -> io::Result<()> {
    writeln!(out, "Currently entering data for: {}", session.current_date)?;
    writeln!(out, "- Use [ / ] to page through dates.")?;
    writeln!(out)?;
    writeln!(out, "1: Log calories eaten.")?;
    writeln!(out, "2: Log calories exercised.")?;
    writeln!(out, "3: Record a new weight measurement.")?;
    writeln!(out, "4: Select another date.")?;
    writeln!(out, "5: Add an item to your quick-lookups.")?;
    writeln!(out, "6: View status for today.")?;
    writeln!(out, "7: View a log of the past few days.")?;
    writeln!(out, "8: Edit configuration.")?;
    writeln!(out)?;
    writeln!(out, "?: This menu.")?;
    writeln!(out, "Q: Quit.")?;
    writeln!(out)
}

/// Interactive session. Returns when the user quits; fatal errors from a
/// command end the loop and propagate.
pub fn run(ctx: &mut Context<'_>, session: &mut Session) -> Result<()> {
    draw_menu(&mut *ctx.out, session)?;
    loop {
        write!(ctx.out, "Command? ")?;
        ctx.out.flush()?;
        let key = ctx.prompter.read_key()?.to_ascii_lowercase();
        match key {
            '?' => draw_menu(&mut *ctx.out, session)?,
            'q' => return Ok(()),
            '[' | ']' => {
                if key == ']' {
                    session.next_day();
                } else {
                    session.previous_day();
                }
                draw_menu(&mut *ctx.out, session)?;
            }
            '0'..='8' => {
                writeln!(ctx.out)?;
                let command = key.to_digit(10).and_then(Command::from_number);
                match command {
                    Some(command) => {
                        if !dispatch::handle(ctx, session, command)? {
                            return Ok(());
                        }
                    }
                    None => writeln!(ctx.out, "Invalid option.")?,
                }
            }
            _ => writeln!(ctx.out, "Invalid option.")?,
        }
    }
}

/// Welcome screen shown when no stored token exists. Loops until the user
/// has a token, either by logging in or by creating an account.
pub fn setup(ctx: &mut Context<'_>, session: &mut Session) -> Result<()> {
    writeln!(ctx.out, "Welcome to bo.gg!")?;
    while !session.is_authenticated() {
        writeln!(ctx.out)?;
        writeln!(ctx.out, "1: Existing user")?;
        writeln!(ctx.out, "2: New user")?;
        writeln!(ctx.out)?;
        write!(ctx.out, "Command? ")?;
        ctx.out.flush()?;
        let choice = loop {
            match ctx.prompter.read_key()? {
                c @ ('1' | '2') => break c,
                _ => writeln!(ctx.out, "Invalid option.")?,
            }
        };
        writeln!(ctx.out)?;
        if choice == '1' {
            auth::prompt_login(ctx, session)?;
        } else {
            enroll::enrollment(ctx, session)?;
        }
    }
    Ok(())
}
