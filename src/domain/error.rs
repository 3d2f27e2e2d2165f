//! Error types for the zapprove plugin.
//!
//! The review core (store, history, projection, selection) is total and never
//! fails: unknown ids and empty undo stacks are silent no-ops. Errors only
//! arise at the edges of the plugin, while loading seed data, themes, or
//! configuration. They are consolidated in [`ReviewError`] and the [`Result`]
//! alias, implemented with `thiserror`.

use thiserror::Error;

/// The main error type for zapprove operations.
///
/// # Examples
///
/// ```
/// use zapprove::ReviewError;
///
/// fn check_seed(ids_unique: bool) -> Result<(), ReviewError> {
///     if ids_unique {
///         Ok(())
///     } else {
///         Err(ReviewError::Seed("duplicate action id: a1".to_string()))
///     }
/// }
///
/// assert!(check_seed(false).is_err());
/// ```
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The seed action list is malformed.
    ///
    /// Raised for unparsable JSON, missing timestamps, or duplicate ids.
    #[error("Seed error: {0}")]
    Seed(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations, typically while
    /// reading a seed or theme file from the host.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// A configuration value is invalid.
    ///
    /// The string names the offending key and value.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for zapprove operations.
pub type Result<T> = std::result::Result<T, ReviewError>;
