//! Conversion backed by pure-Rust encoding tables and a statistical
//! charset detector.
//!
//! Decoding and encoding run through `encoding_rs` in strict mode: a
//! malformed source sequence or an unmappable character aborts the
//! conversion instead of inserting replacement characters. Output buffers
//! start from a modest estimate and grow on demand, bounded by
//! [`capacity_limit`][super::capacity_limit].

use chardetng::EncodingDetector;
use encoding_rs::{DecoderResult, EncoderResult, Encoding, REPLACEMENT, UTF_16BE, UTF_16LE};
use log::{debug, trace};

use crate::encoding::types::error::{Result, TranscodeError};
use crate::encoding::types::models::{BackendKind, Codepage};
use crate::encoding::utils;

use super::{capacity_limit, grow_step, initial_estimate, Backend};

/// The default backend: `encoding_rs` conversion plus `chardetng` detection.
#[derive(Debug)]
pub struct EngineBackend;

impl Backend for EngineBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Engine
    }

    fn canonical_unicode(&self) -> &'static str {
        "UTF-8"
    }

    fn name_for_codepage(&self, codepage: Codepage) -> String {
        let known = u16::try_from(codepage).ok().and_then(codepage::to_encoding);
        match known {
            Some(encoding) => encoding.name().to_string(),
            None => format!("windows-{}", codepage),
        }
    }

    fn detect(&self, buffer: &[u8]) -> String {
        if buffer.is_empty() {
            return String::new();
        }
        let mut detector = EncodingDetector::new();
        detector.feed(buffer, true);
        let guess = detector.guess(None, true);
        debug!("Detected encoding {:?} from {} bytes", guess.name(), buffer.len());
        guess.name().to_string()
    }

    fn convert(&self, text: &[u8], src: &str, dst: &str) -> Result<Vec<u8>> {
        let src_enc = Encoding::for_label(src.as_bytes())
            .ok_or_else(|| TranscodeError::UnknownEncoding(src.to_string()))?;
        let dst_enc = Encoding::for_label(dst.as_bytes())
            .ok_or_else(|| TranscodeError::UnknownEncoding(dst.to_string()))?;

        let unicode = decode_to_unicode(text, src_enc, src, dst)?;
        encode_from_unicode(&unicode, dst_enc, src, dst)
    }
}

/// Decode stage: source bytes into the Unicode intermediate form.
fn decode_to_unicode(
    text: &[u8],
    encoding: &'static Encoding,
    src: &str,
    dst: &str,
) -> Result<String> {
    let limit = capacity_limit(text.len());
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let mut out = String::new();
    out.reserve(initial_estimate(text.len(), limit));
    let mut consumed = 0;

    trace!("Decode stage: {} bytes as {}", text.len(), encoding.name());
    loop {
        let (result, read) =
            decoder.decode_to_string_without_replacement(&text[consumed..], &mut out, true);
        consumed += read;
        match result {
            DecoderResult::InputEmpty => return Ok(out),
            DecoderResult::OutputFull => {
                out.reserve_exact(grow_step(out.capacity(), limit, src, dst)?);
            }
            DecoderResult::Malformed(bad, pushed_back) => {
                let offset = consumed.saturating_sub(bad as usize + pushed_back as usize);
                return Err(TranscodeError::ConversionFailed {
                    src: src.to_string(),
                    dst: dst.to_string(),
                    offset: Some(offset),
                });
            }
        }
    }
}

/// Encode stage: the Unicode intermediate form into destination bytes.
fn encode_from_unicode(
    unicode: &str,
    encoding: &'static Encoding,
    src: &str,
    dst: &str,
) -> Result<Vec<u8>> {
    // encoding_rs encoders cannot target UTF-16 (its encoder for these
    // encodings silently emits UTF-8), so serialize code units directly.
    if encoding == UTF_16LE {
        return Ok(utils::utf16le_bytes(unicode.encode_utf16()));
    }
    if encoding == UTF_16BE {
        return Ok(utils::utf16be_bytes(unicode.encode_utf16()));
    }
    // The replacement encoding has no encoder of its own; new_encoder() on it
    // silently hands back the UTF-8 encoder, so its labels (hz-gb-2312,
    // iso-2022-cn and friends) are rejected as conversion targets.
    if encoding == REPLACEMENT {
        return Err(TranscodeError::UnknownEncoding(dst.to_string()));
    }

    let limit = capacity_limit(unicode.len());
    let mut encoder = encoding.new_encoder();
    let mut out = Vec::new();
    out.reserve(initial_estimate(unicode.len(), limit));
    let mut consumed = 0;

    trace!("Encode stage: {} bytes as {}", unicode.len(), encoding.name());
    loop {
        let (result, read) = encoder.encode_from_utf8_to_vec_without_replacement(
            &unicode[consumed..],
            &mut out,
            true,
        );
        consumed += read;
        match result {
            EncoderResult::InputEmpty => return Ok(out),
            EncoderResult::OutputFull => {
                out.reserve_exact(grow_step(out.capacity(), limit, src, dst)?);
            }
            EncoderResult::Unmappable(ch) => {
                return Err(TranscodeError::ConversionFailed {
                    src: src.to_string(),
                    dst: dst.to_string(),
                    offset: Some(consumed.saturating_sub(ch.len_utf8())),
                });
            }
        }
    }
}
