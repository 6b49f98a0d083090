//! Encoding detection
use crate::types::Encoding;
use chardetng::EncodingDetector;
use memchr::memchr_iter;

/// Whether the data contains an ISO-2022-JP escape intro (`ESC $`,
/// `ESC &`, or `ESC (`). ISO-2022-JP is 7-bit, so it has to be recognized
/// before the ASCII check.
fn has_jis_escape(data: &[u8]) -> bool {
    memchr_iter(0x1B, data).any(|i| matches!(data.get(i + 1).copied(), Some(0x24 | 0x26 | 0x28)))
}

/// Guess the encoding of raw bytes.
///
/// Escape sequences and pure ASCII are recognized directly; everything
/// else goes through the statistical detector and is mapped to one of the
/// supported tags. UTF-8 and non-Japanese guesses come back as
/// [`Encoding::Unknown`].
pub fn detect(data: &[u8]) -> Encoding {
    if has_jis_escape(data) {
        return Encoding::Jis;
    }
    if data.is_ascii() {
        return Encoding::Ascii;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(data, true);
    let guess = detector.guess(None, true);
    if guess == encoding_rs::EUC_JP {
        Encoding::EucJp
    } else if guess == encoding_rs::SHIFT_JIS {
        Encoding::ShiftJis
    } else if guess == encoding_rs::ISO_2022_JP {
        Encoding::Jis
    } else {
        Encoding::Unknown
    }
}

#[test]
fn test_detect_jis() {
    assert_eq!(
        detect(&[0x1B, 0x24, 0x42, 0x46, 0x7C, 0x1B, 0x28, 0x42]),
        Encoding::Jis
    );
    assert_eq!(detect(&[0x41, 0x1B, 0x28, 0x4A, 0x42]), Encoding::Jis);
    // A stray escape without a JIS intro byte is not JIS
    assert_eq!(detect(&[0x1B, 0x41, 0x42]), Encoding::Ascii);
}

#[test]
fn test_detect_ascii() {
    assert_eq!(detect(b"hello world"), Encoding::Ascii);
    assert_eq!(detect(b""), Encoding::Ascii);
}

#[test]
fn test_detect_unknown() {
    // Valid UTF-8 is left alone rather than guessed as a legacy encoding
    assert_eq!(detect("こんにちは".as_bytes()), Encoding::Unknown);
    // Western European text is not Japanese
    assert_eq!(detect(b"caf\xE9 r\xE9sum\xE9"), Encoding::Unknown);
}
