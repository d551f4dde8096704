//! Best-effort content-based encoding detection.

use log::trace;

use super::backend::Backend;

/// Statistically guesses the encoding of `buffer` from its byte patterns.
///
/// Advisory only: the result is a candidate on par with any other hint, not
/// a trusted answer, and callers pick their own priority among hints.
/// Backends without a detection engine return the empty sentinel for every
/// input, including empty input. That is a defined degraded mode, not an
/// error.
pub fn detect(buffer: &[u8], backend: &dyn Backend) -> String {
    let name = backend.detect(buffer);
    if name.is_empty() {
        trace!("No detection result for {} bytes", buffer.len());
    }
    name
}
