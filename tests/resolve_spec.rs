#![cfg(feature = "engine")]

use lcf_transcode::encoding::backend::engine::EngineBackend;
use lcf_transcode::encoding::backend::{Backend, IdentityBackend};
use lcf_transcode::encoding::{codepage, locale};
use lcf_transcode::{
    codepage_to_encoding, detect_encoding, get_encoding, get_encoding_from, get_locale_encoding,
    LocaleTag,
};
use std::fs;
use std::io::Cursor;

const CODEPAGE_NAMES: &[(u32, &str)] = &[
    (874, "windows-874"),
    (932, "Shift_JIS"),
    (936, "GBK"),
    (949, "EUC-KR"),
    (950, "Big5"),
    (1200, "UTF-16LE"),
    (1250, "windows-1250"),
    (1251, "windows-1251"),
    (1252, "windows-1252"),
    (1253, "windows-1253"),
    (1254, "windows-1254"),
    (1255, "windows-1255"),
    (1256, "windows-1256"),
    (1257, "windows-1257"),
    (1258, "windows-1258"),
    (65001, "UTF-8"),
];

const LOCALE_PARSE_CASES: &[(&str, &str, Option<&str>)] = &[
    ("ja_JP.UTF-8", "ja", Some("JP")),
    ("de_DE@euro", "de", Some("DE")),
    ("zh_CN.GB2312", "zh", Some("CN")),
    ("en_US.ISO8859-1", "en", Some("US")),
    ("th_TH.UTF-8@calendar=buddhist", "th", Some("TH")),
    ("sr@latin", "sr", None),
    ("fr", "fr", None),
    ("C", "C", None),
    ("POSIX", "POSIX", None),
    ("", "", None),
];

const LOCALE_CODEPAGES: &[(&str, u32)] = &[
    ("ja_JP.UTF-8", 932),
    ("ja", 932),
    ("th_TH.UTF-8", 874),
    ("ko_KR", 949),
    ("zh_CN", 936),
    ("zh_SG.UTF-8", 936),
    ("zh_TW", 950),
    ("zh_HK", 950),
    // Chinese without a region has no table entry of its own
    ("zh", 1252),
    ("zh_XX", 1252),
    ("ru_RU.KOI8-R", 1251),
    ("cs_CZ", 1250),
    ("pl", 1250),
    ("de_DE@euro", 1252),
    ("en_US", 1252),
    ("eu_ES", 1252),
    ("el_GR", 1253),
    ("tr_TR", 1254),
    ("he_IL", 1255),
    ("ar_EG", 1256),
    ("lt_LT", 1257),
    ("vi_VN", 1258),
    ("tlh", 1252),
    ("C", 1252),
    ("POSIX", 1252),
    ("", 1252),
];

type IniFixture = (&'static str, &'static [u8], &'static str);

const INI_FIXTURES: &[IniFixture] = &[
    ("plain declaration", b"[EasyRPG]\nEncoding=932\n", "Shift_JIS"),
    ("crlf line endings", b"[EasyRPG]\r\nEncoding=1252\r\n", "windows-1252"),
    ("spaces around separator", b"[EasyRPG]\nEncoding = 936\n", "GBK"),
    ("lowercase section and key", b"[easyrpg]\nencoding=949\n", "EUC-KR"),
    ("colon separator", b"[EasyRPG]\nEncoding: 950\n", "Big5"),
    (
        "trailing junk after number",
        b"[EasyRPG]\nEncoding=1251 ; Cyrillic\n",
        "windows-1251",
    ),
    ("explicit plus sign", b"[EasyRPG]\nEncoding=+932\n", "Shift_JIS"),
    ("utf-8 declaration", b"[EasyRPG]\nEncoding=65001\n", "UTF-8"),
    (
        "utf-8 bom before header",
        b"\xEF\xBB\xBF[EasyRPG]\nEncoding=1250\n",
        "windows-1250",
    ),
    (
        "header with trailing comment",
        b"[EasyRPG] ; tools section\nEncoding=932\n",
        "Shift_JIS",
    ),
    ("padded section name", b"[ EasyRPG ]\nEncoding=932\n", "Shift_JIS"),
    (
        "first declaration wins",
        b"[EasyRPG]\nEncoding=932\nEncoding=1252\n",
        "Shift_JIS",
    ),
    (
        "legacy bytes in another section",
        b"[RPG_RT]\nGameTitle=\x83e\x83X\x83g\nMapEditMode=2\n\n[EasyRPG]\nEncoding=932\n",
        "Shift_JIS",
    ),
    (
        "commented declarations are skipped",
        b"; Encoding=1252\n[EasyRPG]\n# Encoding=1252\nEncoding=874\n",
        "windows-874",
    ),
    ("zero reads as unset", b"[EasyRPG]\nEncoding=0\n", ""),
    ("negative reads as unset", b"[EasyRPG]\nEncoding=-932\n", ""),
    ("non-numeric value", b"[EasyRPG]\nEncoding=auto\n", ""),
    ("wrong section", b"[RPG_RT]\nEncoding=932\n", ""),
    ("key missing", b"[EasyRPG]\nFullPackageFlag=1\n", ""),
    ("key outside any section", b"Encoding=932\n[EasyRPG]\n", ""),
    ("unterminated header", b"[EasyRPG\nEncoding=932\n", ""),
    ("empty file", b"", ""),
];

// "konnichiwa, sekai." in hiragana, UTF-8 and Shift_JIS
const UTF8_GREETING: &[u8] = &[
    0xE3, 0x81, 0x93, 0xE3, 0x82, 0x93, 0xE3, 0x81, 0xAB, 0xE3, 0x81, 0xA1, 0xE3, 0x81, 0xAF,
    0xE3, 0x80, 0x81, 0xE3, 0x81, 0x9B, 0xE3, 0x81, 0x8B, 0xE3, 0x81, 0x84, 0xE3, 0x80, 0x82,
];
const SJIS_GREETING: &[u8] = &[
    0x82, 0xB1, 0x82, 0xF1, 0x82, 0xC9, 0x82, 0xBF, 0x82, 0xCD, 0x81, 0x41, 0x82, 0xB9, 0x82,
    0xA9, 0x82, 0xA2, 0x81, 0x42,
];

#[test]
fn codepage_names_follow_windows_numbering() {
    for (codepage, expected) in CODEPAGE_NAMES {
        assert_eq!(
            *expected,
            codepage_to_encoding(*codepage),
            "name mismatch for codepage {}",
            codepage
        );
        assert_eq!(
            *expected,
            codepage::resolve(*codepage, &EngineBackend),
            "explicit backend disagrees for codepage {}",
            codepage
        );
    }
}

#[test]
fn codepage_zero_reads_as_no_encoding() {
    assert_eq!("", codepage_to_encoding(0));
    assert_eq!("", codepage::resolve(0, &IdentityBackend));
}

#[test]
fn unmapped_codepages_synthesize_windows_names() {
    let unmapped: &[(u32, &str)] = &[
        (437, "windows-437"),
        (12345, "windows-12345"),
        (70000, "windows-70000"),
    ];
    for (codepage, expected) in unmapped {
        assert_eq!(
            *expected,
            codepage_to_encoding(*codepage),
            "synthesized name mismatch for codepage {}",
            codepage
        );
    }
}

#[test]
fn locale_tags_parse_into_language_and_region() {
    for (raw, language, region) in LOCALE_PARSE_CASES {
        let tag = LocaleTag::parse(raw);
        assert_eq!(*language, tag.language, "language mismatch for {:?}", raw);
        assert_eq!(*region, tag.region.as_deref(), "region mismatch for {:?}", raw);
    }
}

#[test]
fn locale_tags_guess_regional_codepages() {
    for (raw, codepage) in LOCALE_CODEPAGES {
        let tag = LocaleTag::parse(raw);
        assert_eq!(
            *codepage,
            locale::guess_codepage(&tag),
            "codepage mismatch for locale {:?}",
            raw
        );
    }
}

#[test]
fn locale_guesses_resolve_through_the_backend() {
    let ja = LocaleTag::parse("ja_JP.UTF-8");
    assert_eq!("Shift_JIS", locale::encoding_for(&ja, &EngineBackend));
    assert_eq!("Shift_JIS", locale::encoding_for(&ja, &IdentityBackend));
    assert_eq!(
        "windows-1251",
        locale::encoding_for(&LocaleTag::parse("ru_RU.KOI8-R"), &EngineBackend)
    );
    assert_eq!(
        "windows-1252",
        locale::encoding_for(&LocaleTag::parse("tlh"), &EngineBackend)
    );
    // Whatever the host locale is, this backend always yields a name
    assert!(!get_locale_encoding().is_empty());
}

#[test]
fn config_fixtures_resolve_declared_codepages() {
    for (label, ini, expected) in INI_FIXTURES {
        let actual = get_encoding_from(Cursor::new(*ini));
        assert_eq!(*expected, actual, "config mismatch for {}", label);
    }
}

#[test]
fn config_lookup_reads_project_ini_from_disk() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("RPG_RT.ini");

    let mut ini = Vec::new();
    ini.extend_from_slice(b"[RPG_RT]\r\nGameTitle=");
    ini.extend_from_slice(&[0x83, 0x65, 0x83, 0x58, 0x83, 0x67]);
    ini.extend_from_slice(b"\r\nMapEditMode=2\r\n\r\n[EasyRPG]\r\nEncoding=932\r\n");
    fs::write(&path, &ini).expect("write ini");

    assert_eq!("Shift_JIS", get_encoding(&path));
    assert_eq!("", get_encoding(dir.path().join("missing.ini")));
}

#[test]
fn detection_recognizes_clear_statistical_signals() {
    assert_eq!("UTF-8", detect_encoding(&UTF8_GREETING.repeat(64)));
    assert_eq!("Shift_JIS", detect_encoding(&SJIS_GREETING.repeat(64)));

    // Pure ASCII is valid UTF-8, which the detector trusts outright
    let ascii = b"A plain ASCII battle log with no charset signal at all.".repeat(8);
    assert_eq!("UTF-8", detect_encoding(&ascii));
}

#[test]
fn detection_degrades_to_the_empty_sentinel() {
    assert_eq!("", detect_encoding(b""));
    assert_eq!("", IdentityBackend.detect(&SJIS_GREETING.repeat(64)));
}
