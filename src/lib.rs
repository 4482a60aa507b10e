// Library root
// -----------
// This crate exposes the pieces of the bo.gg terminal client. The binary
// (`main.rs`) only parses arguments and calls `cli::run`.
//
// Module responsibilities:
// - `api`: HTTP calls to the backend and the wire types they carry.
// - `auth` / `enroll`: logging in and creating an account.
// - `entry` / `status`: logging calories and showing totals.
// - `dispatch` / `ui`: the numbered commands and the keypress loop.
// - `session`, `context`, `config`, `prompt`: state and collaborators
//   threaded through every call.
pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod enroll;
pub mod entry;
pub mod error;
pub mod prompt;
pub mod session;
pub mod status;
pub mod ui;

#[cfg(test)]
mod testing;

pub use error::{ClientError, Result};
