//! Core encoding resolution and transcoding module

pub mod backend;
pub mod codepage;
pub mod config;
pub mod detect;
pub mod locale;
pub mod recode;
pub mod types;
mod utils;

use std::io::Read;
use std::path::Path;

use backend::active_backend;
pub use backend::Backend;
pub use types::error::{Result, TranscodeError};
pub use types::models::{BackendKind, Codepage, LocaleTag};

/// Resolves a legacy codepage number to an encoding name.
///
/// The zero sentinel ("no codepage configured") resolves to the empty
/// sentinel; everything else yields a name in the active backend's naming
/// convention. Deterministic, no I/O, never fails.
pub fn codepage_to_encoding(codepage: Codepage) -> String {
    codepage::resolve(codepage, active_backend())
}

/// Statistically guesses the encoding of a byte buffer.
///
/// Best effort and advisory only. Returns the empty sentinel when nothing
/// clears the detector's confidence bar, and for every input on backends
/// compiled without a detection engine.
pub fn detect_encoding(buffer: &[u8]) -> String {
    detect::detect(buffer, active_backend())
}

/// Reads the encoding declared in a project INI file (section `[EasyRPG]`,
/// key `Encoding`, a numeric codepage).
///
/// A missing file, absent key, or non-numeric value all yield the empty
/// sentinel; configuration errors are swallowed, never propagated.
pub fn get_encoding(path: impl AsRef<Path>) -> String {
    config::lookup(path.as_ref(), active_backend())
}

/// [`get_encoding`] over any reader instead of a file path.
pub fn get_encoding_from<R: Read>(source: R) -> String {
    config::lookup_from(source, active_backend())
}

/// Guesses a source encoding from the process locale.
///
/// Reads `LC_ALL`/`LC_CTYPE`/`LANG` (first set wins) and maps the language
/// tag to that region's default legacy codepage, falling back to the
/// Western-European default for unrecognized locales. On the
/// platform-native backend this returns the empty sentinel instead: there
/// the converter's own "system default code page" convention applies.
pub fn get_locale_encoding() -> String {
    locale::encoding_for(&LocaleTag::from_env(), active_backend())
}

/// Converts `text` from the `src` encoding to the `dst` encoding.
///
/// An empty `src` passes `text` through unchanged; an empty `dst` targets
/// the canonical Unicode output encoding.
///
/// # Arguments
/// * `text` - Raw bytes of one text field
/// * `src` - Source encoding name, or `""` for pass-through
/// * `dst` - Destination encoding name, or `""` for the canonical Unicode form
///
/// # Errors
///
/// [`TranscodeError::UnknownEncoding`] for a name the active backend does
/// not recognize; [`TranscodeError::ConversionFailed`] for rejected byte
/// sequences, unrepresentable characters, or unconsumed input;
/// [`TranscodeError::CapacityExceeded`] when pathological input exhausts
/// the output growth bound.
pub fn recode(text: &[u8], src: &str, dst: &str) -> Result<Vec<u8>> {
    recode::recode_with(active_backend(), text, src, dst)
}

/// Converts `text` from the `src` encoding to the canonical Unicode output
/// encoding (UTF-8, or the UTF-16LE code page on the platform-native
/// backend).
///
/// Convenience form of [`recode`]; same pass-through policy and errors.
pub fn recode_to_unicode(text: &[u8], src: &str) -> Result<Vec<u8>> {
    recode::recode_to_unicode_with(active_backend(), text, src)
}
