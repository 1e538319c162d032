use miette::Diagnostic;
use thiserror::Error;

/// Result type for scheme manager operations
pub type Result<T> = std::result::Result<T, Error>;

/// Custom error types for the terminal scheme manager
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error("I/O error: {0}")]
    #[diagnostic(code(scheme_manager::io_error))]
    Io(String),

    #[error("Config file not found at {path}")]
    #[diagnostic(code(scheme_manager::config_not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse config: {message}")]
    #[diagnostic(code(scheme_manager::parse_error))]
    Parse { message: String },

    #[error("Failed to serialize config: {message}")]
    #[diagnostic(code(scheme_manager::serialize_error))]
    Serialize { message: String },

    #[error("This config has no schemes")]
    #[diagnostic(code(scheme_manager::no_schemes))]
    NoSchemes,

    #[error("No profile named {name}")]
    #[diagnostic(code(scheme_manager::profile_not_found))]
    ProfileNotFound { name: String },

    #[error("No value at path {path}")]
    #[diagnostic(code(scheme_manager::lookup_error))]
    Lookup { path: String },

    #[error("Comment offset invariant violated: {message}")]
    #[diagnostic(code(scheme_manager::offset_invariant))]
    OffsetInvariant { message: String },

    #[error("Cannot resolve settings path: {message}")]
    #[diagnostic(code(scheme_manager::settings_path))]
    SettingsPath { message: String },

    #[error("Internal error: {message}")]
    #[diagnostic(code(scheme_manager::internal_error))]
    Internal { message: String },
}

impl Error {
    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse {
            message: err.to_string(),
        }
    }
}
