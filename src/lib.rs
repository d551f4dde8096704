//! # lcf-transcode
//!
//! Encoding resolution and transcoding for legacy game-data text fields.
//! Text in these files is stored in region-specific legacy encodings with no
//! self-describing marker; this crate resolves the most likely source
//! encoding from the available hints (project configuration, byte-content
//! statistics, the host locale) and recodes byte strings between named
//! encodings with defined, bounded behavior on failure.
//!
//! **Note:** the conversion backend is fixed per build, never per call: the
//! pure-Rust engine by default (`engine` feature), the platform wide-char
//! API on engine-less Windows builds, POSIX iconv on engine-less unix
//! builds with `posix-iconv`, and a convert-nothing fallback otherwise.
pub mod encoding;

// Re-export the main functions and types for convenience
pub use encoding::{
    codepage_to_encoding, detect_encoding, get_encoding, get_encoding_from, get_locale_encoding,
    recode, recode_to_unicode, Backend, BackendKind, Codepage, LocaleTag, Result, TranscodeError,
};
