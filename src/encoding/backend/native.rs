//! Conversion through the Windows wide-character API.
//!
//! Both stages go through the platform converter: `MultiByteToWideChar`
//! decodes source bytes into UTF-16 code units, `WideCharToMultiByte`
//! encodes them into the destination code page. Each call queries the
//! required length first, then converts into an exactly-sized buffer, so no
//! growth loop is needed here. Code page 1200 (UTF-16LE) is refused by the
//! platform API on either side and is handled as a raw serialization of the
//! wide intermediate instead.

use log::trace;
use windows_sys::Win32::Foundation::{GetLastError, ERROR_INVALID_PARAMETER};
use windows_sys::Win32::Globalization::{
    MultiByteToWideChar, WideCharToMultiByte, CP_UTF8, MB_ERR_INVALID_CHARS, WC_ERR_INVALID_CHARS,
};

use crate::encoding::types::error::{Result, TranscodeError};
use crate::encoding::types::models::{BackendKind, Codepage};
use crate::encoding::utils;

use super::Backend;

/// The UTF-16LE code page number; the wide intermediate itself.
const UTF16LE_CODEPAGE: u32 = 1200;

/// Backend for Windows builds without the pure-Rust engine.
#[derive(Debug)]
pub struct NativeBackend;

impl Backend for NativeBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Native
    }

    fn canonical_unicode(&self) -> &'static str {
        "1200"
    }

    fn name_for_codepage(&self, codepage: Codepage) -> String {
        // The platform accepts stringified code page numbers directly.
        codepage.to_string()
    }

    fn convert(&self, text: &[u8], src: &str, dst: &str) -> Result<Vec<u8>> {
        let src_cp = parse_codepage(src)?;
        let dst_cp = parse_codepage(dst)?;
        if text.is_empty() {
            // The platform API rejects zero-length input outright.
            return Ok(Vec::new());
        }

        let wide = decode_to_wide(text, src_cp, src, dst)?;
        encode_from_wide(&wide, dst_cp, src, dst)
    }
}

/// Code page names on this backend are stringified integers.
fn parse_codepage(name: &str) -> Result<u32> {
    name.trim()
        .parse::<u32>()
        .map_err(|_| TranscodeError::UnknownEncoding(name.to_string()))
}

/// Decode stage: source bytes into UTF-16 code units.
fn decode_to_wide(text: &[u8], codepage: u32, src: &str, dst: &str) -> Result<Vec<u16>> {
    if codepage == UTF16LE_CODEPAGE {
        return utils::utf16le_units(text).ok_or_else(|| TranscodeError::ConversionFailed {
            src: src.to_string(),
            dst: dst.to_string(),
            offset: Some(text.len() - 1),
        });
    }

    let text_len = api_len(text.len(), src, dst)?;
    trace!("Decode stage: {} bytes via code page {}", text.len(), codepage);
    unsafe {
        // First call queries the required length in u16 units.
        let needed = MultiByteToWideChar(
            codepage,
            MB_ERR_INVALID_CHARS,
            text.as_ptr(),
            text_len,
            std::ptr::null_mut(),
            0,
        );
        if needed <= 0 {
            return Err(stage_error(GetLastError(), src, src, dst));
        }

        let mut wide: Vec<u16> = Vec::with_capacity(needed as usize);
        let written = MultiByteToWideChar(
            codepage,
            MB_ERR_INVALID_CHARS,
            text.as_ptr(),
            text_len,
            wide.as_mut_ptr(),
            needed,
        );
        if written <= 0 {
            return Err(stage_error(GetLastError(), src, src, dst));
        }
        // The converter filled exactly `written` units of the reserved space.
        wide.set_len(written as usize);
        Ok(wide)
    }
}

/// Encode stage: UTF-16 code units into destination bytes.
fn encode_from_wide(wide: &[u16], codepage: u32, src: &str, dst: &str) -> Result<Vec<u8>> {
    if codepage == UTF16LE_CODEPAGE {
        return Ok(utils::utf16le_bytes(wide.iter().copied()));
    }
    if wide.is_empty() {
        return Ok(Vec::new());
    }

    // WC_ERR_INVALID_CHARS is only valid for UTF-8; legacy code pages
    // report lossy output through the used-default-char flag instead.
    let flags = if codepage == CP_UTF8 { WC_ERR_INVALID_CHARS } else { 0 };
    let mut used_default: i32 = 0;
    let used_default_ptr = if codepage == CP_UTF8 {
        std::ptr::null_mut()
    } else {
        &mut used_default as *mut i32
    };

    let wide_len = api_len(wide.len(), src, dst)?;
    trace!("Encode stage: {} units via code page {}", wide.len(), codepage);
    unsafe {
        let needed = WideCharToMultiByte(
            codepage,
            flags,
            wide.as_ptr(),
            wide_len,
            std::ptr::null_mut(),
            0,
            std::ptr::null(),
            std::ptr::null_mut(),
        );
        if needed <= 0 {
            return Err(stage_error(GetLastError(), dst, src, dst));
        }

        let mut out: Vec<u8> = Vec::with_capacity(needed as usize);
        let written = WideCharToMultiByte(
            codepage,
            flags,
            wide.as_ptr(),
            wide_len,
            out.as_mut_ptr(),
            needed,
            std::ptr::null(),
            used_default_ptr,
        );
        if written <= 0 {
            return Err(stage_error(GetLastError(), dst, src, dst));
        }
        out.set_len(written as usize);

        if used_default != 0 {
            // A character had no representation and was substituted; strict
            // policy treats that as a failed conversion, not lossy success.
            return Err(TranscodeError::ConversionFailed {
                src: src.to_string(),
                dst: dst.to_string(),
                offset: None,
            });
        }
        Ok(out)
    }
}

/// The API takes lengths as `i32`; larger inputs cannot be expressed to it.
fn api_len(len: usize, src: &str, dst: &str) -> Result<i32> {
    i32::try_from(len).map_err(|_| TranscodeError::ConversionFailed {
        src: src.to_string(),
        dst: dst.to_string(),
        offset: None,
    })
}

/// Maps a Win32 error code to the crate taxonomy. `stage_name` is the
/// encoding the failing stage was converting with. The platform reports no
/// byte offsets, so failures carry `offset: None`.
fn stage_error(code: u32, stage_name: &str, src: &str, dst: &str) -> TranscodeError {
    if code == ERROR_INVALID_PARAMETER {
        // An unrecognized or unsupported code page number.
        TranscodeError::UnknownEncoding(stage_name.to_string())
    } else {
        // ERROR_NO_UNICODE_TRANSLATION and anything else mean rejected data.
        TranscodeError::ConversionFailed {
            src: src.to_string(),
            dst: dst.to_string(),
            offset: None,
        }
    }
}
