//! Domain error types.

use std::fmt;

/// A required trade field that was left blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Date,
    Session,
    Pair,
    SetupType,
}

impl RequiredField {
    pub fn label(self) -> &'static str {
        match self {
            RequiredField::Date => "date",
            RequiredField::Session => "session",
            RequiredField::Pair => "pair",
            RequiredField::SetupType => "setup type",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised by `TradeStore::add` when one or more required fields are blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing required fields: {}", join_fields(.missing_fields))]
pub struct ValidationError {
    pub missing_fields: Vec<RequiredField>,
}

impl ValidationError {
    pub fn is_missing(&self, field: RequiredField) -> bool {
        self.missing_fields.contains(&field)
    }
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Top-level error type for ictjournal.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("failed to persist '{key}': {reason}")]
    Persistence { key: String, reason: String },

    #[error("failed to read stored trades under '{key}': {reason}")]
    Deserialization { key: String, reason: String },

    #[error("CSV export failed: {reason}")]
    Export { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no trade with id {id}")]
    TradeNotFound { id: i64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&JournalError> for std::process::ExitCode {
    fn from(err: &JournalError) -> Self {
        let code: u8 = match err {
            JournalError::Io(_) => 1,
            JournalError::ConfigParse { .. } | JournalError::ConfigInvalid { .. } => 2,
            JournalError::Persistence { .. }
            | JournalError::Deserialization { .. }
            | JournalError::Export { .. } => 3,
            JournalError::Validation(_) => 4,
            JournalError::TradeNotFound { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
