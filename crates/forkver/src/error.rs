//! Error type shared by parsing, building and comparing versions

use thiserror::Error;

/// Errors produced while parsing, assembling or ordering versions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid version format: {0}")]
    InvalidVersionFormat(String),
    #[error("A subversion cannot have a subversion of its own")]
    NestedSubversionNotAllowed,
    #[error("The forks \"{left}\" and \"{right}\" are not the same")]
    ForkMismatch { left: String, right: String },
    #[error("A version number needs at least one element")]
    EmptyVersionNumber,
    #[error("Invalid subversion identifier \"{0}\": expected uppercase letters only")]
    InvalidIdentifier(String),
    #[error("Subversion \"{0}\" already exists")]
    DuplicateSubversion(String),
    #[error("Subversion \"{0}\" not found")]
    SubversionNotFound(String),
    #[error("Invalid operator \"{0}\"")]
    InvalidOperator(String),
    #[error("Invalid identifier pattern: {0}")]
    InvalidPattern(String),
}

impl VersionError {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        VersionError::InvalidVersionFormat(message.into())
    }

    /// Check if this error came from malformed version text
    pub fn is_format_error(&self) -> bool {
        matches!(self, VersionError::InvalidVersionFormat(_))
    }
}

impl From<regex::Error> for VersionError {
    fn from(err: regex::Error) -> Self {
        VersionError::InvalidPattern(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VersionError>;
