//! Interchangeable conversion backends.
//!
//! Exactly one backend is active per build, chosen by cargo features and
//! target, never at a call site. Callers receive it through
//! [`active_backend`] or inject one explicitly.
//!
//! # Submodules
//!
//! - `engine`: pure-Rust conversion tables + statistical detector
//!   (feature `engine`, the default)
//! - `native`: the Windows wide-character conversion API
//! - `iconv`: the POSIX multi-byte conversion facility
//!   (feature `posix-iconv`, unix only)

use super::types::error::{Result, TranscodeError};
use super::types::models::{BackendKind, Codepage};

#[cfg(feature = "engine")]
pub mod engine;
#[cfg(all(unix, feature = "posix-iconv"))]
pub mod iconv;
#[cfg(windows)]
pub mod native;

/// Negotiated output capacity never grows beyond this multiple of the input
/// length. No real encoding pair expands anywhere near this far; hitting the
/// bound means the input is pathological.
#[cfg(any(feature = "engine", all(unix, feature = "posix-iconv")))]
pub(crate) const MAX_GROWTH_FACTOR: usize = 16;

/// Floor for the capacity bound, so short inputs can still expand into
/// multi-byte sequences.
#[cfg(any(feature = "engine", all(unix, feature = "posix-iconv")))]
pub(crate) const MIN_CAPACITY: usize = 64;

/// The largest output buffer a conversion of `input_len` bytes may negotiate.
#[cfg(any(feature = "engine", all(unix, feature = "posix-iconv")))]
pub(crate) fn capacity_limit(input_len: usize) -> usize {
    input_len.saturating_mul(MAX_GROWTH_FACTOR).max(MIN_CAPACITY)
}

/// First capacity reservation: one-and-a-half times the input, floored so
/// short fields get room for multi-byte output, capped by the growth bound.
#[cfg(any(feature = "engine", all(unix, feature = "posix-iconv")))]
pub(crate) fn initial_estimate(input_len: usize, limit: usize) -> usize {
    input_len
        .saturating_add(input_len / 2)
        .max(MIN_CAPACITY)
        .min(limit)
}

/// Additional capacity to reserve after an insufficient-capacity signal:
/// double the current capacity, clamped so the total never passes the
/// negotiated bound, or fail once the bound is reached.
#[cfg(any(feature = "engine", all(unix, feature = "posix-iconv")))]
pub(crate) fn grow_step(capacity: usize, limit: usize, src: &str, dst: &str) -> Result<usize> {
    if capacity >= limit {
        return Err(TranscodeError::CapacityExceeded {
            src: src.to_string(),
            dst: dst.to_string(),
            limit,
        });
    }
    Ok(capacity.max(MIN_CAPACITY).min(limit - capacity))
}

/// A character-conversion facility.
///
/// Implementations are zero-sized and stateless; every conversion call
/// acquires and releases its own resources, so concurrent calls from
/// multiple threads are safe.
pub trait Backend {
    /// Which backend family this is.
    fn kind(&self) -> BackendKind;

    /// The canonical Unicode encoding name targeted by the two-argument
    /// recode form.
    fn canonical_unicode(&self) -> &'static str;

    /// Renders a non-zero codepage number in this backend's naming
    /// convention. The zero sentinel is handled before this is called.
    fn name_for_codepage(&self, codepage: Codepage) -> String;

    /// Statistical charset detection over a raw buffer.
    ///
    /// Backends without a detection engine return the empty sentinel for
    /// every input; only the `engine` implementation overrides this.
    fn detect(&self, _buffer: &[u8]) -> String {
        String::new()
    }

    /// Converts `text` from `src` to `dst`. Both names are non-empty; the
    /// empty-source pass-through is applied by the caller before dispatch.
    fn convert(&self, text: &[u8], src: &str, dst: &str) -> Result<Vec<u8>>;
}

/// Backend used when no conversion facility is compiled in.
///
/// It still renders codepage names, so the resolution components stay total,
/// but any attempt to convert under a named encoding fails with
/// [`TranscodeError::UnknownEncoding`]. The empty-source pass-through still
/// applies upstream, so fields without a resolved encoding flow through
/// untouched on this backend too.
#[derive(Debug)]
pub struct IdentityBackend;

impl Backend for IdentityBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Identity
    }

    fn canonical_unicode(&self) -> &'static str {
        "UTF-8"
    }

    fn name_for_codepage(&self, codepage: Codepage) -> String {
        if codepage == 932 {
            "Shift_JIS".to_string()
        } else {
            format!("windows-{}", codepage)
        }
    }

    fn convert(&self, _text: &[u8], src: &str, _dst: &str) -> Result<Vec<u8>> {
        Err(TranscodeError::UnknownEncoding(src.to_string()))
    }
}

/// Returns the backend selected for this build.
///
/// Selection precedence: the detection engine when compiled in, the platform
/// wide-char API on Windows, POSIX iconv where enabled, and the identity
/// fallback otherwise.
#[cfg(feature = "engine")]
pub fn active_backend() -> &'static dyn Backend {
    &engine::EngineBackend
}

#[cfg(all(not(feature = "engine"), windows))]
pub fn active_backend() -> &'static dyn Backend {
    &native::NativeBackend
}

#[cfg(all(not(feature = "engine"), not(windows), unix, feature = "posix-iconv"))]
pub fn active_backend() -> &'static dyn Backend {
    &iconv::IconvBackend
}

#[cfg(all(
    not(feature = "engine"),
    not(windows),
    not(all(unix, feature = "posix-iconv"))
))]
pub fn active_backend() -> &'static dyn Backend {
    &IdentityBackend
}
