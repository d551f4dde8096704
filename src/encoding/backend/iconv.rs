//! Conversion through the POSIX multi-byte conversion facility.
//!
//! Used on unix builds compiled without the pure-Rust engine. One
//! conversion descriptor handles the whole src-to-dst transform; the
//! facility's Unicode pivot is internal to it. The output buffer grows on
//! `E2BIG` and continues where the previous call stopped, bounded by
//! [`capacity_limit`][super::capacity_limit]. The descriptor is released on
//! every exit path by an RAII guard.

use std::ffi::CString;

use libc::{c_char, c_int, c_void, size_t, E2BIG};
use log::trace;

use crate::encoding::types::error::{Result, TranscodeError};
use crate::encoding::types::models::{BackendKind, Codepage};

use super::{capacity_limit, grow_step, initial_estimate, Backend};

type IconvHandle = *mut c_void;

// The facility lives in libc itself on glibc and musl; no separate library
// is linked.
extern "C" {
    fn iconv_open(tocode: *const c_char, fromcode: *const c_char) -> IconvHandle;
    fn iconv(
        cd: IconvHandle,
        inbuf: *mut *mut c_char,
        inbytesleft: *mut size_t,
        outbuf: *mut *mut c_char,
        outbytesleft: *mut size_t,
    ) -> size_t;
    fn iconv_close(cd: IconvHandle) -> c_int;
}

const INVALID_HANDLE: IconvHandle = usize::MAX as IconvHandle;
const ICONV_FAILED: size_t = usize::MAX as size_t;

/// Backend for engine-less unix builds.
#[derive(Debug)]
pub struct IconvBackend;

impl Backend for IconvBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Iconv
    }

    fn canonical_unicode(&self) -> &'static str {
        "UTF-8"
    }

    fn name_for_codepage(&self, codepage: Codepage) -> String {
        if codepage == 932 {
            "SHIFT_JIS".to_string()
        } else {
            format!("CP{}", codepage)
        }
    }

    fn convert(&self, text: &[u8], src: &str, dst: &str) -> Result<Vec<u8>> {
        let descriptor = Descriptor::open(src, dst)?;
        let limit = capacity_limit(text.len());
        let mut out: Vec<u8> = Vec::new();
        out.reserve(initial_estimate(text.len(), limit));

        trace!("Converting {} bytes: {:?} -> {:?}", text.len(), src, dst);

        // The input pointer is advanced by the facility; its contents are
        // never written through.
        let mut in_ptr = text.as_ptr() as *mut c_char;
        let mut in_left: size_t = text.len();

        loop {
            let mut out_ptr = spare_ptr(&mut out);
            let mut out_left: size_t = out.capacity() - out.len();
            let room = out_left;

            let rc = unsafe {
                iconv(
                    descriptor.raw(),
                    &mut in_ptr,
                    &mut in_left,
                    &mut out_ptr,
                    &mut out_left,
                )
            };
            let written = room - out_left;
            // Written bytes land in the reserved spare capacity.
            unsafe { out.set_len(out.len() + written) };

            if rc == ICONV_FAILED {
                match last_errno() {
                    E2BIG => out.reserve_exact(grow_step(out.capacity(), limit, src, dst)?),
                    // EILSEQ: rejected sequence. EINVAL: incomplete sequence
                    // at end of input. Both leave the input pointer at it.
                    _ => {
                        return Err(TranscodeError::ConversionFailed {
                            src: src.to_string(),
                            dst: dst.to_string(),
                            offset: Some(text.len() - in_left),
                        })
                    }
                }
                continue;
            }

            if rc > 0 {
                // The return value counts irreversible substitutions (musl
                // replaces unmappable characters instead of failing); strict
                // policy rejects lossy output.
                return Err(TranscodeError::ConversionFailed {
                    src: src.to_string(),
                    dst: dst.to_string(),
                    offset: None,
                });
            }
            if in_left != 0 {
                return Err(TranscodeError::ConversionFailed {
                    src: src.to_string(),
                    dst: dst.to_string(),
                    offset: Some(text.len() - in_left),
                });
            }
            break;
        }

        flush(&descriptor, &mut out, text.len(), limit, src, dst)?;
        Ok(out)
    }
}

/// Emits any closing shift sequence a stateful encoding needs.
fn flush(
    descriptor: &Descriptor,
    out: &mut Vec<u8>,
    input_len: usize,
    limit: usize,
    src: &str,
    dst: &str,
) -> Result<()> {
    loop {
        let mut out_ptr = spare_ptr(out);
        let mut out_left: size_t = out.capacity() - out.len();
        let room = out_left;

        let rc = unsafe {
            iconv(
                descriptor.raw(),
                std::ptr::null_mut(),
                std::ptr::null_mut(),
                &mut out_ptr,
                &mut out_left,
            )
        };
        let written = room - out_left;
        unsafe { out.set_len(out.len() + written) };

        if rc == ICONV_FAILED {
            if last_errno() == E2BIG {
                out.reserve_exact(grow_step(out.capacity(), limit, src, dst)?);
                continue;
            }
            return Err(TranscodeError::ConversionFailed {
                src: src.to_string(),
                dst: dst.to_string(),
                offset: Some(input_len),
            });
        }
        return Ok(());
    }
}

/// Pointer to the first byte of a vector's spare capacity.
fn spare_ptr(out: &mut Vec<u8>) -> *mut c_char {
    // Valid even at capacity == len; the facility then just reports E2BIG.
    unsafe { out.as_mut_ptr().add(out.len()) as *mut c_char }
}

fn last_errno() -> c_int {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

/// Owns a conversion descriptor and releases it on drop.
struct Descriptor(IconvHandle);

impl Descriptor {
    /// Opens a descriptor for the `src` to `dst` conversion. An encoding
    /// pair the facility does not support reports the offending side.
    fn open(src: &str, dst: &str) -> Result<Self> {
        let fromcode = cstring(src)?;
        let tocode = cstring(dst)?;
        // Argument order per the facility: destination first.
        let handle = unsafe { iconv_open(tocode.as_ptr(), fromcode.as_ptr()) };
        if handle == INVALID_HANDLE {
            return Err(unknown_side(src, dst));
        }
        Ok(Self(handle))
    }

    /// Whether the facility recognizes `name` at all (probed against UTF-8).
    fn supports(name: &str) -> bool {
        let Ok(fromcode) = cstring(name) else {
            return false;
        };
        let Ok(tocode) = cstring("UTF-8") else {
            return false;
        };
        let handle = unsafe { iconv_open(tocode.as_ptr(), fromcode.as_ptr()) };
        if handle == INVALID_HANDLE {
            return false;
        }
        unsafe { iconv_close(handle) };
        true
    }

    fn raw(&self) -> IconvHandle {
        self.0
    }
}

impl Drop for Descriptor {
    fn drop(&mut self) {
        unsafe { iconv_close(self.0) };
    }
}

fn cstring(name: &str) -> Result<CString> {
    CString::new(name).map_err(|_| TranscodeError::UnknownEncoding(name.to_string()))
}

/// A failed open does not say which name was rejected; probing each side
/// against UTF-8 recovers that for the error message.
fn unknown_side(src: &str, dst: &str) -> TranscodeError {
    if !Descriptor::supports(src) {
        TranscodeError::UnknownEncoding(src.to_string())
    } else {
        TranscodeError::UnknownEncoding(dst.to_string())
    }
}
