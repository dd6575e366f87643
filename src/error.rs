//! Error types for dialog invocation.

use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The dialog was dismissed with an exit code in its cancel set.
    /// Only surfaced under [`CancelPolicy::Propagate`](crate::CancelPolicy);
    /// the default policy exits the process instead.
    #[error("dialog cancelled (exit code {0})")]
    Cancelled(i32),

    /// The dialog program could not be launched. Fatal: no retry, no
    /// fallback program.
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Waiting for the dialog process or draining its stderr failed.
    #[error("failed to wait for dialog process: {0}")]
    Wait(#[from] io::Error),

    /// The answer payload was not valid UTF-8. No fallback encoding is
    /// attempted.
    #[error("dialog payload is not valid UTF-8: {0}")]
    NonUtf8Payload(#[from] FromUtf8Error),

    /// A checklist/radiolist payload could not be split into shell words.
    #[error("failed to parse selection payload: {0}")]
    Selection(#[from] shell_words::ParseError),
}
