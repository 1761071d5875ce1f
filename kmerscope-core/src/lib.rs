//! Shared primitives and traits for the kmerscope workspace.
//!
//! `kmerscope-core` provides the foundation the engine crate builds on:
//!
//! - **Error types** — [`KmerscopeError`] and [`Result`] for structured error handling
//! - **Traits** — [`Sequence`] and [`Summarizable`]

pub mod error;
pub mod traits;

pub use error::{KmerscopeError, Result};
pub use traits::*;
