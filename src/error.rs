// ─── Error ──────────────────────────────────────────────────────────────────
use smol_str::SmolStr;
use thiserror::Error;

/// Which part of a shape declaration a bad identifier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Typename,
    Field,
}

impl std::fmt::Display for NameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameKind::Typename => f.write_str("type name"),
            NameKind::Field => f.write_str("field name"),
        }
    }
}

/// Why an identifier was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierIssue {
    InvalidCharacters,
    ReservedKeyword,
    LeadingDigit,
    Empty,
}

impl std::fmt::Display for IdentifierIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifierIssue::InvalidCharacters => {
                f.write_str("can only contain alphanumeric characters and underscores")
            }
            IdentifierIssue::ReservedKeyword => f.write_str("cannot be a reserved keyword"),
            IdentifierIssue::LeadingDigit => f.write_str("cannot start with a number"),
            IdentifierIssue::Empty => f.write_str("cannot be empty"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("{kind} {reason}: {name:?}")]
    InvalidIdentifier {
        kind: NameKind,
        name: SmolStr,
        reason: IdentifierIssue,
    },
    #[error("Encountered duplicate field name: {0}")]
    DuplicateField(SmolStr),
    #[error("Field names cannot start with an underscore: {0}")]
    ReservedFieldName(SmolStr),
    #[error("{typename} expected {expected} arguments, got {actual}")]
    ArityError {
        typename: SmolStr,
        expected: usize,
        actual: usize,
    },
    #[error("{typename} expects parameter {field}")]
    MissingField { typename: SmolStr, field: SmolStr },
    #[error("{typename} got unexpected field names: {}", .fields.join(", "))]
    UnexpectedField {
        typename: SmolStr,
        fields: Vec<SmolStr>,
    },
    #[error("{typename} has no field {field}")]
    NoSuchField { typename: SmolStr, field: SmolStr },
    #[error("Index {index} out of range for {typename} with {len} fields")]
    IndexOutOfRange {
        typename: SmolStr,
        index: usize,
        len: usize,
    },
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RecordError {
    pub(crate) fn invalid(kind: NameKind, name: &str, reason: IdentifierIssue) -> Self {
        RecordError::InvalidIdentifier {
            kind,
            name: SmolStr::new(name),
            reason,
        }
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(e: serde_json::Error) -> Self {
        RecordError::Serialization(e.to_string())
    }
}
