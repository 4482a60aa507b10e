// Error type shared by every layer of the client. Recoverable conditions
// (bad keypress, server validation) never reach this type; everything here
// either reports a failed login or ends the process.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The token endpoint refused the username/password pair.
    #[error("Invalid login")]
    InvalidCredentials,

    /// Entry creation failed. The message is the full diagnostic dump:
    /// the payload that was sent, the raw body and the response status.
    #[error("{payload}\n{body}\n<Response [{status}]>")]
    EntryRejected {
        payload: String,
        status: StatusCode,
        body: String,
    },

    #[error("{endpoint} returned {status}: {body}")]
    UnexpectedStatus {
        endpoint: String,
        status: StatusCode,
        body: String,
    },

    #[error("server rejected fields that cannot be corrected here: {}", .fields.join(", "))]
    UnhandledValidation { fields: Vec<String> },

    #[error("{0} is not a valid number of calories.")]
    CaloriesOutOfRange(String),

    #[error("{0} not implemented.")]
    Unimplemented(&'static str),

    #[error("interrupted")]
    Interrupted,

    #[error(transparent)]
    Config(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
