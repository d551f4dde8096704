//! Core data structures for encoding resolution.
//!
//! This module defines the fundamental types used throughout the library:
//! - Codepage identifiers and their sentinel
//! - Structured locale tags
//! - Backend family identification

use std::env;
use std::fmt;

/// A legacy numeric code-page identifier (Windows code-page numbering).
///
/// `0` is a sentinel meaning "no codepage configured" and never resolves to
/// a non-empty encoding name.
pub type Codepage = u32;

/// A structured `(language, region)` pair derived from a host locale tag.
///
/// Used only as a lookup key for the locale table; never mutated. The raw
/// tag's codeset and modifier suffixes (`.UTF-8`, `@euro`) are stripped at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTag {
    /// Language part, e.g. `"ja"` in `"ja_JP.UTF-8"`. May be empty when no
    /// locale is configured at all.
    pub language: String,
    /// Region part, e.g. `"JP"` in `"ja_JP.UTF-8"`. `None` for bare
    /// language tags like `"de"` and for the `"C"`/`"POSIX"` locales.
    pub region: Option<String>,
}

impl LocaleTag {
    /// Parses a raw locale tag like `"zh_CN.GB2312"` or `"de_DE@euro"`.
    ///
    /// The codeset (`.…`) and modifier (`@…`) suffixes are dropped, then the
    /// remainder splits into language and region at the first underscore.
    /// Never fails; unusual input just produces a tag no table entry matches.
    pub fn parse(tag: &str) -> Self {
        let base = match tag.find(['.', '@']) {
            Some(idx) => &tag[..idx],
            None => tag,
        };
        match base.split_once('_') {
            Some((language, region)) => Self {
                language: language.to_string(),
                region: Some(region.to_string()),
            },
            None => Self {
                language: base.to_string(),
                region: None,
            },
        }
    }

    /// Reads the process locale from the environment, POSIX precedence:
    /// `LC_ALL`, then `LC_CTYPE`, then `LANG`. The first non-empty value
    /// wins; with none set, the returned tag has an empty language.
    pub fn from_env() -> Self {
        for var in ["LC_ALL", "LC_CTYPE", "LANG"] {
            if let Ok(value) = env::var(var) {
                if !value.is_empty() {
                    return Self::parse(&value);
                }
            }
        }
        Self::parse("")
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}_{}", self.language, region),
            None => write!(f, "{}", self.language),
        }
    }
}

/// Identifies a conversion backend family, for logs and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Pure-Rust conversion tables plus the statistical detector.
    Engine,
    /// The platform's wide-character conversion API (Windows).
    Native,
    /// The POSIX multi-byte conversion facility.
    Iconv,
    /// No conversion facility compiled in; resolves names but converts
    /// nothing.
    Identity,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Engine => "detection-engine",
            BackendKind::Native => "platform-native",
            BackendKind::Iconv => "posix-iconv",
            BackendKind::Identity => "identity",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
