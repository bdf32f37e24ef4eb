//! Configurator error type.
//!
//! Everything fatal funnels into [`ConfigError`]: an unreadable catalog or
//! pricing document, a placement corpus that fails the keyword gate, a
//! malformed project file. Non-fatal import problems never reach this type;
//! they are collected as [`crate::Diagnostics`] instead, and solver
//! trouble inside the engine degrades to the greedy path rather than
//! erroring out.

use thiserror::Error;

/// Fatal configurator failures, surfaced at crate boundaries.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading a source document failed (catalog sheet, pricing overrides,
    /// project file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A structured document did not parse or serialize
    #[error("Parse error: {0}")]
    Parse(String),

    /// The catalog source exists but could not be decoded as a sheet
    #[error("Unreadable catalog: {0}")]
    UnreadableCatalog(String),

    /// Critical placement guidance missing from the loaded rule corpus.
    ///
    /// Raised at engine construction; the engine refuses to serve without
    /// these topics present.
    #[error("Missing critical placement guidelines: {}", missing.join(", "))]
    IncompleteGuidance { missing: Vec<String> },

    /// Input failed a structural check
    #[error("Validation error: {0}")]
    Validation(String),

    /// Optimization failed outside the recoverable fallback paths
    #[error("Solver error: {0}")]
    Solver(String),
}

/// Convenience type alias for Results using ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

// Pricing overrides, project files, and the multi-panel export all go
// through serde_json.
impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
