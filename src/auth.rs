// Login against the token endpoint. A rejected password is an ordinary
// outcome reported to the caller; any other failure propagates.

use std::io::Write;

use crate::context::Context;
use crate::error::{ClientError, Result};
use crate::session::Session;

/// Try `username`/`password`. Returns the token on success and `None`
/// after printing "Invalid login" when the server refuses the pair.
pub fn login(
    ctx: &mut Context<'_>,
    session: &mut Session,
    username: &str,
    password: &str,
) -> Result<Option<String>> {
    session.username = Some(username.to_string());
    match retrieve_token(ctx, session, password) {
        Ok(token) => Ok(Some(token)),
        Err(ClientError::InvalidCredentials) => {
            tracing::info!(username, "login rejected");
            writeln!(ctx.out, "Invalid login")?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Fetch a token for the session's username and keep it in both the
/// session and the config file.
pub fn retrieve_token(ctx: &mut Context<'_>, session: &mut Session, password: &str) -> Result<String> {
    let username = session
        .username
        .clone()
        .ok_or(ClientError::InvalidCredentials)?;
    let token = ctx.service.obtain_token(&username, password)?;
    tracing::info!(username = %username, "token acquired");
    session.token = Some(token.clone());
    ctx.config
        .store_credentials(ctx.config_path, &username, &token)?;
    Ok(token)
}

/// Ask for a username and password and log in. `false` means the
/// credentials were refused.
pub fn prompt_login(ctx: &mut Context<'_>, session: &mut Session) -> Result<bool> {
    let username = ctx.prompter.text("Username", false)?;
    let password = ctx.prompter.password("Password")?;
    let token = login(ctx, session, &username, &password)?;
    drop(password);
    Ok(token.is_some())
}
