use thiserror::Error;

use crate::ir::block::BlockId;

/// Top-level error type for the explorer.
///
/// Only `Decode` and `Io` are fatal (they abort startup). Navigation and
/// input errors are recoverable: the engine reports them as a transient
/// notice and leaves its state untouched. Boundary no-ops — moving past
/// either end of a block, jumping back on an empty stack — are not errors
/// at all; they are defined identity transitions and never reach this type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{}", format_error_pretty("decode error", &format!("{}", _0)))]
    Decode(#[from] DecodeError),

    #[error("{}", format_error_pretty("navigation error", &format!("{}", _0)))]
    Navigation(#[from] NavigationError),

    #[error("{}", format_error_pretty("input error", &format!("{}", _0)))]
    Input(#[from] InputError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Formats an explorer error in a human-friendly style.
fn format_error_pretty(category: &str, msg: &str) -> String {
    format!("[{}] {}", category, msg)
}

// ---------------------------------------------------------------------------
// Decode errors (fatal at startup)
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed IR dump: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate {id} — block ids must be unique within a dump")]
    DuplicateBlock { id: BlockId },

    #[error("the dump's entry point names {entry}, which is not present — cannot start exploring")]
    MissingEntry { entry: BlockId },

    #[error("the dump contains no blocks — there is nothing to explore")]
    EmptyProgram,
}

// ---------------------------------------------------------------------------
// Navigation errors (recoverable, state unchanged)
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("operand {operand} does not reference a jump target")]
    NotNavigable { operand: usize },

    #[error("cannot jump to {what} — it is not defined in this dump")]
    UnresolvedTarget { what: String },
}

// ---------------------------------------------------------------------------
// Input errors (recoverable, dialog state unchanged)
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("'{ch}' is not a digit — the go-to prompt accepts decimal digits only")]
    InvalidDigit { ch: char },
}

impl Error {
    /// Returns a stable diagnostic code string for this error.
    pub fn diagnostic_code(&self) -> &'static str {
        match self {
            Error::Decode(d) => match d {
                DecodeError::Json(_) => "E0001",
                DecodeError::DuplicateBlock { .. } => "E0002",
                DecodeError::MissingEntry { .. } => "E0003",
                DecodeError::EmptyProgram => "E0004",
            },
            Error::Navigation(n) => match n {
                NavigationError::NotNavigable { .. } => "E0100",
                NavigationError::UnresolvedTarget { .. } => "E0101",
            },
            Error::Input(InputError::InvalidDigit { .. }) => "E0200",
            Error::Io(_) => "E0300",
        }
    }
}
