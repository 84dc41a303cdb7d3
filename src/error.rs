//! Error type shared by the buffer, window and FFI layers.

use thiserror::Error;

/// Errors raised by this crate.
///
/// Exhausted or under-filled streams are never errors; they surface as
/// `None` or blank slots. Only invalid construction parameters fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A constructor received a parameter outside its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The other half of a feed channel was dropped.
    #[error("feed channel disconnected")]
    Disconnected,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
