//! Failures of a `seathold` invocation and the exit status each one gets.

use std::fmt;

use seathold::Error as LibError;

/// Why a command stopped early.
#[derive(Debug)]
pub enum CliError {
    /// Raised by the ticket service or the configuration layer.
    Library(LibError),

    /// Invalid command-line arguments or session script input.
    InvalidArguments(String),

    /// Reading a script or writing output failed.
    Io(std::io::Error),

    /// The layered configuration could not be built.
    Config(String),

    /// The command ran but the outcome is a failure: a bad config file
    /// under `validate` or a refused request under `session --strict`.
    SemanticFailure(String),
}

impl CliError {
    /// Process exit status.
    ///
    /// | code | meaning |
    /// |------|---------|
    /// | 1 | semantic failure |
    /// | 4 | bad arguments or script line |
    /// | 5 | I/O |
    /// | 6 | any other service error |
    /// | 7 | configuration |
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::SemanticFailure(_) => 1,
            CliError::InvalidArguments(_) => 4,
            CliError::Io(_) => 5,
            CliError::Library(lib_err) => match lib_err {
                LibError::Io(_) => 5,
                LibError::Validation { .. }
                | LibError::Configuration(_)
                | LibError::InvalidPath { .. }
                | LibError::HomeDirectoryUnavailable => 7,
                _ => 6,
            },
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::InvalidArguments(msg) => write!(f, "Invalid arguments: {msg}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CliError::SemanticFailure(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        match e {
            LibError::Io(io) => CliError::Io(io),
            other => CliError::Library(other),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}
