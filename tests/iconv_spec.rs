#![cfg(all(unix, feature = "posix-iconv"))]

use lcf_transcode::encoding::backend::iconv::IconvBackend;
use lcf_transcode::encoding::backend::Backend;
use lcf_transcode::encoding::codepage;
use lcf_transcode::encoding::recode::{recode_to_unicode_with, recode_with};
use lcf_transcode::TranscodeError;

type RecodeVector = (
    &'static str,
    &'static str,
    &'static str,
    &'static [u8],
    &'static [u8],
);

const RECODE_VECTORS: &[RecodeVector] = &[
    (
        "shift_jis katakana to utf-8",
        "SHIFT_JIS",
        "UTF-8",
        &[0x83, 0x65, 0x83, 0x58, 0x83, 0x67],
        &[0xE3, 0x83, 0x86, 0xE3, 0x82, 0xB9, 0xE3, 0x83, 0x88],
    ),
    (
        "utf-8 katakana to shift_jis",
        "UTF-8",
        "SHIFT_JIS",
        &[0xE3, 0x83, 0x86, 0xE3, 0x82, 0xB9, 0xE3, 0x83, 0x88],
        &[0x83, 0x65, 0x83, 0x58, 0x83, 0x67],
    ),
    (
        "cp1251 cyrillic to utf-8",
        "CP1251",
        "UTF-8",
        &[0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2],
        &[0xD0, 0x9F, 0xD1, 0x80, 0xD0, 0xB8, 0xD0, 0xB2, 0xD0, 0xB5, 0xD1, 0x82],
    ),
    (
        "cp1252 euro to utf-8",
        "CP1252",
        "UTF-8",
        &[0x80],
        &[0xE2, 0x82, 0xAC],
    ),
    (
        "utf-8 euro to cp1252",
        "UTF-8",
        "CP1252",
        &[0xE2, 0x82, 0xAC],
        &[0x80],
    ),
    (
        "ascii to utf-16le",
        "UTF-8",
        "UTF-16LE",
        b"Hi",
        &[0x48, 0x00, 0x69, 0x00],
    ),
    ("empty input", "SHIFT_JIS", "UTF-8", b"", b""),
];

#[test]
fn recode_vectors_convert_exactly() {
    for (label, src, dst, input, expected) in RECODE_VECTORS {
        let actual = recode_with(&IconvBackend, input, src, dst)
            .unwrap_or_else(|e| panic!("{} failed: {}", label, e));
        assert_eq!(*expected, actual.as_slice(), "byte mismatch for {}", label);
    }
}

#[test]
fn codepage_names_follow_the_posix_convention() {
    let names: &[(u32, &str)] = &[
        (0, ""),
        (932, "SHIFT_JIS"),
        (936, "CP936"),
        (1251, "CP1251"),
        (1252, "CP1252"),
    ];
    for (codepage, expected) in names {
        assert_eq!(
            *expected,
            codepage::resolve(*codepage, &IconvBackend),
            "name mismatch for codepage {}",
            codepage
        );
    }
}

#[test]
fn empty_source_passes_bytes_through_unchanged() {
    let buffers: &[&[u8]] = &[
        b"",
        b"plain ascii",
        &[0x83, 0x65, 0x83, 0x58],
        &[0xFF, 0xFE, 0x00, 0x80, 0xC1],
    ];
    for bytes in buffers {
        assert_eq!(
            *bytes,
            recode_with(&IconvBackend, bytes, "", "UTF-8")
                .expect("pass-through")
                .as_slice()
        );
        assert_eq!(
            *bytes,
            recode_to_unicode_with(&IconvBackend, bytes, "")
                .expect("pass-through")
                .as_slice()
        );
    }
}

#[test]
fn empty_destination_targets_canonical_unicode() {
    assert_eq!("UTF-8", IconvBackend.canonical_unicode());

    let input: &[u8] = &[0x83, 0x65, 0x83, 0x58, 0x83, 0x67];
    let explicit =
        recode_with(&IconvBackend, input, "SHIFT_JIS", "UTF-8").expect("explicit utf-8");
    assert_eq!(
        explicit,
        recode_with(&IconvBackend, input, "SHIFT_JIS", "").expect("defaulted destination")
    );
    assert_eq!(
        explicit,
        recode_to_unicode_with(&IconvBackend, input, "SHIFT_JIS").expect("unicode form")
    );
}

#[test]
fn unknown_encoding_names_are_rejected() {
    match recode_with(&IconvBackend, b"abc", "NONEXISTENT-ENCODING", "UTF-8") {
        Err(TranscodeError::UnknownEncoding(name)) => assert_eq!("NONEXISTENT-ENCODING", name),
        other => panic!("expected unknown source encoding, got {:?}", other),
    }
    match recode_with(&IconvBackend, b"abc", "UTF-8", "NONEXISTENT-ENCODING") {
        Err(TranscodeError::UnknownEncoding(name)) => assert_eq!("NONEXISTENT-ENCODING", name),
        other => panic!("expected unknown destination encoding, got {:?}", other),
    }
}

#[test]
fn conversion_failures_report_the_failing_offset() {
    // 0x80 can never start a utf-8 sequence
    match recode_with(&IconvBackend, b"ab\x80cd", "UTF-8", "CP1252") {
        Err(TranscodeError::ConversionFailed { src, dst, offset }) => {
            assert_eq!("UTF-8", src);
            assert_eq!("CP1252", dst);
            assert_eq!(Some(2), offset);
        }
        other => panic!("expected malformed input failure, got {:?}", other),
    }
    // Three-byte sequence cut short at end of input
    match recode_with(&IconvBackend, b"ab\xE3\x81", "UTF-8", "CP1252") {
        Err(TranscodeError::ConversionFailed { offset, .. }) => assert_eq!(Some(2), offset),
        other => panic!("expected truncated input failure, got {:?}", other),
    }
    // Lone shift_jis lead byte
    match recode_with(&IconvBackend, &[0x83], "SHIFT_JIS", "UTF-8") {
        Err(TranscodeError::ConversionFailed { offset, .. }) => assert_eq!(Some(0), offset),
        other => panic!("expected truncated input failure, got {:?}", other),
    }
    // First character already has no cp1252 form
    match recode_with(&IconvBackend, &[0xE3, 0x81, 0x93], "UTF-8", "CP1252") {
        Err(TranscodeError::ConversionFailed { offset, .. }) => assert_eq!(Some(0), offset),
        other => panic!("expected unmappable character failure, got {:?}", other),
    }
}

#[test]
fn output_capacity_grows_for_expanding_conversions() {
    // Every input byte doubles; the result outgrows the initial estimate
    let input = vec![0xCF; 32768];
    let expected = b"\xD0\x9F".repeat(32768);
    let actual =
        recode_with(&IconvBackend, &input, "CP1251", "UTF-8").expect("expanding conversion");
    assert_eq!(expected, actual);
}

#[test]
fn detection_degrades_to_the_empty_sentinel() {
    assert_eq!("", IconvBackend.detect(b""));
    assert_eq!("", IconvBackend.detect(&[0x83, 0x65, 0x83, 0x58]));
}
