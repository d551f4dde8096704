//! Custom error types for the lcf-transcode crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
///
/// Only the recoding path produces errors; the resolution components
/// (codepage table, locale guesser, config lookup, content detector) degrade
/// to the empty sentinel instead of failing.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// A requested encoding name is not recognized by the active backend.
    #[error("Unknown encoding: {0:?}")]
    UnknownEncoding(String),

    /// A decode or encode stage rejected the data, or left input unconsumed.
    ///
    /// `offset` is the byte position into the failing stage's input where the
    /// rejected sequence begins, when the backend reports one. The decode
    /// stage counts source bytes; the encode stage counts bytes of the
    /// Unicode intermediate form.
    #[error("Conversion from {src:?} to {dst:?} failed{}", offset_suffix(.offset))]
    ConversionFailed {
        src: String,
        dst: String,
        offset: Option<usize>,
    },

    /// The capacity-negotiation loop hit its growth bound before the
    /// conversion finished. Only pathological input reaches this.
    #[error("Conversion from {src:?} to {dst:?} exceeded the {limit}-byte output limit")]
    CapacityExceeded {
        src: String,
        dst: String,
        limit: usize,
    },
}

fn offset_suffix(offset: &Option<usize>) -> String {
    match offset {
        Some(at) => format!(" at byte offset {}", at),
        None => String::new(),
    }
}

/// A convenience `Result` type alias using the crate's `TranscodeError` type.
pub type Result<T> = std::result::Result<T, TranscodeError>;
