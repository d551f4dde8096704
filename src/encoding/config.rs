//! Project-configuration encoding lookup.
//!
//! Game projects may declare their text encoding in the project INI file,
//! section `[EasyRPG]`, key `Encoding`, holding a numeric codepage. Every
//! failure mode here (missing file, malformed line, absent key, non-numeric
//! value) degrades to the empty sentinel; a configuration problem must never
//! abort the read of the game data itself.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use super::backend::Backend;
use super::codepage;
use super::types::error::Result;
use super::types::models::Codepage;

/// INI section holding the encoding declaration.
const SECTION: &str = "EasyRPG";
/// Key within the section naming the codepage.
const KEY: &str = "Encoding";

/// Reads the declared codepage from the INI file at `path` and resolves it
/// through the codepage table in `backend`'s naming convention.
///
/// An unreadable file is an ordinary miss, reported as the empty sentinel.
pub fn lookup(path: &Path, backend: &dyn Backend) -> String {
    match File::open(path) {
        Ok(file) => lookup_from(file, backend),
        Err(e) => {
            debug!("Config {} not readable ({}); no encoding hint", path.display(), e);
            String::new()
        }
    }
}

/// Reads the declared codepage from any INI-formatted source.
pub fn lookup_from<R: Read>(source: R, backend: &dyn Backend) -> String {
    match scan_ini(source, SECTION, KEY) {
        Ok(Some(value)) => {
            let codepage = parse_codepage_value(&value);
            debug!(
                "Config declares {}={:?} (codepage {})",
                KEY,
                String::from_utf8_lossy(&value),
                codepage
            );
            codepage::resolve(codepage, backend)
        }
        Ok(None) => {
            debug!("Config has no [{}] {} entry", SECTION, KEY);
            String::new()
        }
        Err(e) => {
            debug!("Config unreadable mid-scan ({}); no encoding hint", e);
            String::new()
        }
    }
}

/// Minimal INI scan: `[section]` headers, `key=value` or `key: value` pairs,
/// `;`/`#` comment lines, surrounding whitespace trimmed, section and key
/// matched ASCII case-insensitively. The first match wins.
///
/// Works on raw bytes throughout. Project INI files routinely hold
/// legacy-encoded values in other sections (the game title, for one), so the
/// file as a whole is not valid UTF-8 and must not be decoded to find the
/// one ASCII key wanted here.
fn scan_ini<R: Read>(mut source: R, section: &str, key: &str) -> Result<Option<Vec<u8>>> {
    let mut raw = Vec::new();
    source.read_to_end(&mut raw)?;
    let mut bytes = raw.as_slice();
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF][..]) {
        // UTF-8 BOM before the first section header.
        bytes = rest;
    }

    let mut in_section = false;
    for line in bytes.split(|&b| b == b'\n') {
        let line = line.trim_ascii();
        if line.is_empty() || line[0] == b';' || line[0] == b'#' {
            continue;
        }
        if let Some(rest) = line.strip_prefix(b"[") {
            // A header missing its closing bracket is skipped, leaving the
            // current section in effect.
            if let Some(end) = rest.iter().position(|&b| b == b']') {
                in_section = rest[..end].trim_ascii().eq_ignore_ascii_case(section.as_bytes());
            }
            continue;
        }
        if !in_section {
            continue;
        }
        if let Some(separator) = line.iter().position(|&b| b == b'=' || b == b':') {
            let name = line[..separator].trim_ascii();
            if name.eq_ignore_ascii_case(key.as_bytes()) {
                return Ok(Some(line[separator + 1..].trim_ascii().to_vec()));
            }
        }
    }
    Ok(None)
}

/// Reads the leading integer of `value` with C `atoi` semantics: optional
/// leading whitespace and sign, then a digit run, ignoring whatever follows.
/// Real-world INI files carry values like `"932 "` or `"932 ; cp"`, which
/// must still resolve. A non-numeric or negative value reads as the zero
/// sentinel.
fn parse_codepage_value(value: &[u8]) -> Codepage {
    let mut rest = value.trim_ascii_start();
    let mut negative = false;
    match rest.first() {
        Some(b'-') => {
            negative = true;
            rest = &rest[1..];
        }
        Some(b'+') => {
            rest = &rest[1..];
        }
        _ => {}
    }

    let mut parsed: Codepage = 0;
    let mut digits = 0;
    for &b in rest {
        if !b.is_ascii_digit() {
            break;
        }
        parsed = parsed.saturating_mul(10).saturating_add(u32::from(b - b'0'));
        digits += 1;
    }
    if digits == 0 || negative {
        return 0;
    }
    parsed
}
