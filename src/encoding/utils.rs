//! Byte-level helpers for wide-character buffers.

/// Serializes UTF-16 code units as little-endian bytes.
#[cfg(any(feature = "engine", windows))]
pub(crate) fn utf16le_bytes(units: impl Iterator<Item = u16>) -> Vec<u8> {
    let (lower, _) = units.size_hint();
    let mut out = Vec::with_capacity(lower * 2);
    for unit in units {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

/// Serializes UTF-16 code units as big-endian bytes.
#[cfg(feature = "engine")]
pub(crate) fn utf16be_bytes(units: impl Iterator<Item = u16>) -> Vec<u8> {
    let (lower, _) = units.size_hint();
    let mut out = Vec::with_capacity(lower * 2);
    for unit in units {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out
}

/// Reassembles little-endian bytes into UTF-16 code units.
///
/// Returns `None` for an odd-length buffer, which cannot be a UTF-16LE
/// stream.
#[cfg(windows)]
pub(crate) fn utf16le_units(bytes: &[u8]) -> Option<Vec<u16>> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    Some(
        bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect(),
    )
}
