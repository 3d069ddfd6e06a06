//! CLI error types.

use caw_proto::ProtoError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Faz connection failed.
    #[error("connection error: {0}")]
    Connection(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A connect or call deadline elapsed.
    #[error("timeout: {0}")]
    Timeout(String),

    /// Unexpected frame or reply shape.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The Faz service rejected the call.
    #[error("faz error (code {code}): {message}")]
    Remote {
        /// RPC status code.
        code: i32,
        /// Detail from the service.
        message: String,
    },

    /// The request could not be packed; nothing was sent.
    #[error("failed to encode request: {0}")]
    Encode(ProtoError),

    /// The reply payload could not be unpacked.
    #[error("failed to decode reply: {0}")]
    Decode(ProtoError),

    /// The command needs an acting user.
    #[error("you need to login to {0}")]
    NotLoggedIn(&'static str),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Command execution failed.
    #[error("command error: {0}")]
    Command(String),

    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<tokio_tungstenite::tungstenite::Error> for CliError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::Connection(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_error_display_connection() {
        let err = CliError::Connection("refused".into());
        assert_eq!(err.to_string(), "connection error: refused");
    }

    #[test]
    fn cli_error_display_not_logged_in() {
        let err = CliError::NotLoggedIn("follow a user");
        assert_eq!(err.to_string(), "you need to login to follow a user");
    }

    #[test]
    fn cli_error_display_remote() {
        let err = CliError::Remote {
            code: 6,
            message: "User already exists.".into(),
        };
        assert_eq!(err.to_string(), "faz error (code 6): User already exists.");
    }

    #[test]
    fn cli_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let cli_err = CliError::from(io_err);
        assert!(matches!(cli_err, CliError::Io(_)));
    }
}
