//! Codepage-number to encoding-name resolution.

use log::trace;

use super::backend::Backend;
use super::types::models::Codepage;

/// Resolves a legacy codepage number to an encoding name in `backend`'s
/// naming convention.
///
/// The zero sentinel ("no codepage configured") resolves to the empty
/// sentinel. Deterministic, no I/O. A synthesized name for a number the
/// backend has no mapping for surfaces as `UnknownEncoding` at recode time,
/// never here.
pub fn resolve(codepage: Codepage, backend: &dyn Backend) -> String {
    if codepage == 0 {
        return String::new();
    }
    let name = backend.name_for_codepage(codepage);
    trace!("Codepage {} resolves to {:?}", codepage, name);
    name
}
