//! Menu error types.

use thiserror::Error;

/// Errors raised by menu construction and mutation.
///
/// Structural validation findings (duplicate ids, cycles) are not errors;
/// they are collected into a [`ValidationReport`](crate::ValidationReport)
/// so many menus can be checked in one pass.
#[derive(Debug, Error)]
pub enum MenuError {
    /// Malformed identifiers, empty labels, disallowed attribute keys, or
    /// duplicate ids on direct insertion.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Builder protocol violations: calls made in a state that cannot
    /// accept them.
    #[error("{0}")]
    Logic(String),
}

/// Result type alias using MenuError.
pub type MenuResult<T> = Result<T, MenuError>;
