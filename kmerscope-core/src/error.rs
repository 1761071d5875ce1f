//! Structured error types for the kmerscope workspace.

use thiserror::Error;

/// Unified error type for all kmerscope operations.
///
/// Every variant describes a contract violation by the caller. Nothing here
/// is transient, so nothing is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KmerscopeError {
    /// A byte outside `{A, C, G, T}` (case-insensitive).
    #[error("invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    /// Structurally invalid numeric parameters (k, d, t, window).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Index does not identify a pattern of length `k`.
    #[error("index {index} out of range for k={k}")]
    OutOfRange { index: u64, k: usize },

    /// Operands that must share a length do not.
    #[error("inconsistent length: expected {expected}, got {actual}")]
    InconsistentLength { expected: usize, actual: usize },

    /// A collection that must be non-empty was empty.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Input is well-formed but carries no usable signal (zero totals).
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
}

/// Convenience alias used throughout the kmerscope workspace.
pub type Result<T> = std::result::Result<T, KmerscopeError>;
