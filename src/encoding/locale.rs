//! Locale-based default codepage guessing.
//!
//! When a game project carries no explicit encoding hint, the host locale is
//! the hint of last resort: players usually run games made for their own
//! region. The tables below map locale language tags to the legacy code page
//! that region's games were most likely written in.

use log::debug;

use super::backend::Backend;
use super::codepage;
use super::types::models::{BackendKind, Codepage, LocaleTag};

/// Codepage for locales with no table entry (Western European).
pub const DEFAULT_CODEPAGE: Codepage = 1252;

/// Region-disambiguated entries as `(language, region, codepage)`. An exact
/// match here beats any language-only entry.
const FULL_TAG_CODEPAGES: &[(&str, &str, Codepage)] = &[
    ("zh", "CN", 936),
    ("zh", "SG", 936),
    ("zh", "TW", 950),
    ("zh", "HK", 950),
];

/// Language-only entries. A language with no entry in either table falls
/// through to [`DEFAULT_CODEPAGE`].
const LANGUAGE_CODEPAGES: &[(&str, Codepage)] = &[
    ("th", 874),
    ("ja", 932),
    ("ko", 949),
    // Central European
    ("cs", 1250),
    ("hu", 1250),
    ("pl", 1250),
    ("ro", 1250),
    ("hr", 1250),
    ("sk", 1250),
    ("sl", 1250),
    // Cyrillic
    ("ru", 1251),
    // Western European
    ("ca", 1252),
    ("da", 1252),
    ("de", 1252),
    ("en", 1252),
    ("es", 1252),
    ("fi", 1252),
    ("fr", 1252),
    ("it", 1252),
    ("nl", 1252),
    ("nb", 1252),
    ("pt", 1252),
    ("sv", 1252),
    ("eu", 1252),
    ("el", 1253),
    ("tr", 1254),
    ("he", 1255),
    ("ar", 1256),
    // Baltic
    ("et", 1257),
    ("lt", 1257),
    ("lv", 1257),
    ("vi", 1258),
];

/// Guesses the default legacy codepage for a locale tag.
///
/// Pure function of `tag`: the same input always yields the same codepage.
/// Lookup precedence: an exact `(language, region)` entry, then a
/// language-only entry, then [`DEFAULT_CODEPAGE`]. Never fails; an
/// unrecognized locale silently falls through to the default.
pub fn guess_codepage(tag: &LocaleTag) -> Codepage {
    if let Some(region) = &tag.region {
        for (language, entry_region, codepage) in FULL_TAG_CODEPAGES {
            if *language == tag.language && *entry_region == region.as_str() {
                return *codepage;
            }
        }
    }
    for (language, codepage) in LANGUAGE_CODEPAGES {
        if *language == tag.language {
            return *codepage;
        }
    }
    DEFAULT_CODEPAGE
}

/// Resolves the locale-guessed codepage to an encoding name in `backend`'s
/// naming convention, ready to use as a recode source.
///
/// The platform-native backend is the exception: its converter reads the
/// system default code page when no name is given, so the guess is skipped
/// and the empty sentinel returned instead.
pub fn encoding_for(tag: &LocaleTag, backend: &dyn Backend) -> String {
    if backend.kind() == BackendKind::Native {
        return String::new();
    }
    let codepage = guess_codepage(tag);
    debug!("Locale {:?} guesses codepage {}", tag.to_string(), codepage);
    codepage::resolve(codepage, backend)
}
