//! Byte-buffer transcoding between named encodings.
//!
//! The conversion itself is delegated to a backend; this module owns the
//! policies every backend shares: the empty-source pass-through, the default
//! destination, and the unified failure taxonomy.

use log::{debug, trace};

use super::backend::Backend;
use super::types::error::Result;

/// Converts `text` from the `src` encoding to the `dst` encoding.
///
/// Conversion runs as a two-stage pipeline inside the backend: decode `text`
/// from `src` into the backend's Unicode intermediate form, then encode that
/// form into `dst`. Output capacity is negotiated, growing on demand up to a
/// bounded multiple of the input length, never sized by a fixed multiplier.
///
/// Policies applied before dispatch:
/// - An empty `src` returns `text` unchanged, byte for byte, on every
///   backend. An unresolved source encoding must never corrupt a field.
/// - An empty `dst` targets the backend's canonical Unicode output encoding,
///   exactly like [`recode_to_unicode_with`].
///
/// # Errors
///
/// [`UnknownEncoding`](super::TranscodeError::UnknownEncoding) when the
/// backend does not recognize `src` or `dst`;
/// [`ConversionFailed`](super::TranscodeError::ConversionFailed) when a byte
/// sequence is rejected, a character has no representation in `dst`, or
/// input is left unconsumed;
/// [`CapacityExceeded`](super::TranscodeError::CapacityExceeded) when
/// pathological input exhausts the output growth bound. A failed call never
/// returns partially converted bytes.
pub fn recode_with(backend: &dyn Backend, text: &[u8], src: &str, dst: &str) -> Result<Vec<u8>> {
    if src.is_empty() {
        trace!("No source encoding; {} bytes pass through", text.len());
        return Ok(text.to_vec());
    }
    let dst = if dst.is_empty() { backend.canonical_unicode() } else { dst };

    debug!(
        "Recoding {} bytes from {:?} to {:?} via {} backend",
        text.len(),
        src,
        dst,
        backend.kind()
    );
    backend.convert(text, src, dst)
}

/// Converts `text` from `src` to the backend's canonical Unicode output
/// encoding: UTF-8, or the UTF-16LE code page where output routes through
/// the platform's wide-character API.
///
/// Convenience form of [`recode_with`]; same pass-through policy and errors.
pub fn recode_to_unicode_with(backend: &dyn Backend, text: &[u8], src: &str) -> Result<Vec<u8>> {
    recode_with(backend, text, src, backend.canonical_unicode())
}
