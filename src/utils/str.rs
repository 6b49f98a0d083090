//! String Utilities
use crate::types::Encoding;
use crate::utils::encoding::detect;
use crate::utils::patterns;

/// Bytes reserved so the closing `ESC ( B` never pushes an ISO-2022-JP
/// result over the requested length.
const JIS_HEADROOM: usize = 3;

/// Truncate encoded text to at most `length` bytes without cutting a
/// character in half. The encoding is detected from the content.
pub fn jtruncate(text: &[u8], length: usize) -> Vec<u8> {
    jtruncate_as(text, length, detect(text))
}

/// Truncate encoded text to at most `length` bytes as `encoding`.
///
/// Non-Japanese encodings are cut at the byte offset. An ISO-2022-JP
/// result left in two-byte mode gets `ESC ( B` appended, within the
/// reserved headroom, so the output always stays within `length`.
pub fn jtruncate_as(text: &[u8], length: usize, encoding: Encoding) -> Vec<u8> {
    if length == 0 {
        return Vec::new();
    }
    if text.len() <= length {
        return text.to_vec();
    }
    let rules = match patterns::table_for(encoding) {
        Some(rules) => rules,
        None => return text[..length].to_vec(),
    };
    let budget = if encoding == Encoding::Jis {
        length.saturating_sub(JIS_HEADROOM)
    } else {
        length
    };
    let mut end = text.len();
    while end > budget {
        match patterns::longest_suffix(rules, &text[..end]) {
            Some(n) => end -= n,
            // No character pattern at the tail. Cut the original input at
            // the byte offset instead of looping forever.
            None => return text[..length].to_vec(),
        }
    }
    let mut result = text[..end].to_vec();
    if encoding == Encoding::Jis && ends_in_two_byte_mode(&result) {
        result.extend_from_slice(patterns::JIS_TO_SINGLE_BYTE);
    }
    result
}

/// Whether an ISO-2022-JP buffer ends inside two-byte mode. `ESC $` and
/// `ESC &` enter two-byte mode, `ESC (` returns to single-byte mode.
fn ends_in_two_byte_mode(buf: &[u8]) -> bool {
    let mut two_byte = false;
    for i in memchr::memchr_iter(0x1B, buf) {
        match buf.get(i + 1).copied() {
            Some(0x24) | Some(0x26) => two_byte = true,
            Some(0x28) => two_byte = false,
            _ => {}
        }
    }
    two_byte
}

#[test]
fn test_jtruncate_ascii() {
    assert_eq!(jtruncate(b"hello world", 20), b"hello world");
    assert_eq!(jtruncate(b"hello world", 11), b"hello world");
    assert_eq!(jtruncate(b"hello world", 5), b"hello");
    assert_eq!(jtruncate(b"hello world", 0), b"");
}

#[test]
fn test_jtruncate_euc() {
    // 日本語で (C6FC CBDC B8EC A4C7)
    let text = [0xC6, 0xFC, 0xCB, 0xDC, 0xB8, 0xEC, 0xA4, 0xC7];
    assert_eq!(jtruncate_as(&text, 8, Encoding::EucJp), text);
    // An odd budget drops the partial character entirely
    assert_eq!(jtruncate_as(&text, 5, Encoding::EucJp), text[..4]);
    assert_eq!(jtruncate_as(&text, 4, Encoding::EucJp), text[..4]);
    assert_eq!(jtruncate_as(&text, 1, Encoding::EucJp), text[..0]);
}

#[test]
fn test_jtruncate_euc_three_byte() {
    // ASCII, then a JIS X 0212 character (8F A1 A1), then half-width ｱ (8E B1)
    let text = [0x41, 0x8F, 0xA1, 0xA1, 0x8E, 0xB1];
    assert_eq!(jtruncate_as(&text, 5, Encoding::EucJp), text[..4]);
    assert_eq!(jtruncate_as(&text, 3, Encoding::EucJp), text[..1]);
    assert_eq!(jtruncate_as(&text, 2, Encoding::EucJp), text[..1]);
}

#[test]
fn test_jtruncate_sjis() {
    // 日本語 (93FA 967B 8CEA)
    let text = [0x93, 0xFA, 0x96, 0x7B, 0x8C, 0xEA];
    assert_eq!(jtruncate_as(&text, 6, Encoding::ShiftJis), text);
    assert_eq!(jtruncate_as(&text, 5, Encoding::ShiftJis), text[..4]);
    assert_eq!(jtruncate_as(&text, 4, Encoding::ShiftJis), text[..4]);
    assert_eq!(jtruncate_as(&text, 3, Encoding::ShiftJis), text[..2]);
    // Half-width katakana is single-byte
    let kana = [0xB1, 0xB2, 0xB3];
    assert_eq!(jtruncate_as(&kana, 2, Encoding::ShiftJis), kana[..2]);
}

#[test]
fn test_jtruncate_jis_appends_shift_out() {
    // Shift-in then 日本語, no shift-out
    let text = [
        0x1B, 0x24, 0x42, 0x46, 0x7C, 0x4B, 0x5C, 0x38, 0x6C,
    ];
    let result = jtruncate_as(&text, 7, Encoding::Jis);
    // Trimmed to the escape alone, then closed back to single-byte mode
    assert_eq!(result, [0x1B, 0x24, 0x42, 0x1B, 0x28, 0x42]);
    assert!(result.len() <= 7);
}

#[test]
fn test_jtruncate_jis_recloses() {
    // Shift-in, 日本語, shift-out
    let text = [
        0x1B, 0x24, 0x42, 0x46, 0x7C, 0x4B, 0x5C, 0x38, 0x6C, 0x1B, 0x28, 0x42,
    ];
    assert_eq!(jtruncate_as(&text, 12, Encoding::Jis), text);
    let result = jtruncate_as(&text, 10, Encoding::Jis);
    assert_eq!(
        result,
        [0x1B, 0x24, 0x42, 0x46, 0x7C, 0x4B, 0x5C, 0x1B, 0x28, 0x42]
    );
}

#[test]
fn test_jtruncate_jis_single_byte_end() {
    // "AB", 日 in two-byte mode, shift-out, then "CD". Trimming eats the
    // tail ASCII and the shift-out escape, so the fixup re-closes the
    // buffer.
    let text = [
        0x41, 0x42, 0x1B, 0x24, 0x42, 0x46, 0x7C, 0x1B, 0x28, 0x42, 0x43, 0x44,
    ];
    assert_eq!(
        jtruncate_as(&text, 11, Encoding::Jis),
        [0x41, 0x42, 0x1B, 0x24, 0x42, 0x46, 0x7C, 0x1B, 0x28, 0x42]
    );
    // The result never exceeds the requested length for any budget
    for length in 0..=text.len() {
        assert!(jtruncate_as(&text, length, Encoding::Jis).len() <= length);
    }
}

#[test]
fn test_jtruncate_jis_kana_run() {
    // SI ｱｲｳ SO bracketed run is stripped as one unit
    let text = [0x41, 0x42, 0x0F, 0xB1, 0xB2, 0xB3, 0x0E];
    assert_eq!(jtruncate_as(&text, 6, Encoding::Jis), text[..2]);
    assert_eq!(jtruncate_as(&text, 3, Encoding::Jis), text[..0]);
}

#[test]
fn test_jtruncate_malformed_falls_back() {
    // 0x00 never matches a Shift-JIS trailing pattern
    let text = [0x41, 0x42, 0x00];
    assert_eq!(jtruncate_as(&text, 2, Encoding::ShiftJis), text[..2]);
    // The fallback cuts at the original length, not the JIS budget
    let garbage = [0x1B, 0x1B, 0x1B, 0x1B, 0x1B, 0x1B];
    assert_eq!(jtruncate_as(&garbage, 5, Encoding::Jis), garbage[..5]);
}

#[test]
fn test_jtruncate_unknown_cuts_bytes() {
    let text = [0xFF, 0xFE, 0xFD, 0xFC];
    assert_eq!(jtruncate_as(&text, 3, Encoding::Unknown), text[..3]);
    assert_eq!(jtruncate_as(&text, 3, Encoding::Ascii), text[..3]);
}

#[test]
fn test_jtruncate_idempotent() {
    let text = [0x93, 0xFA, 0x96, 0x7B, 0x8C, 0xEA];
    let once = jtruncate_as(&text, 5, Encoding::ShiftJis);
    assert_eq!(jtruncate_as(&once, 5, Encoding::ShiftJis), once);
    let jis = [
        0x1B, 0x24, 0x42, 0x46, 0x7C, 0x4B, 0x5C, 0x38, 0x6C,
    ];
    let once = jtruncate_as(&jis, 7, Encoding::Jis);
    assert_eq!(jtruncate_as(&once, 7, Encoding::Jis), once);
}

#[test]
fn test_ends_in_two_byte_mode() {
    assert!(ends_in_two_byte_mode(&[0x1B, 0x24, 0x42]));
    assert!(ends_in_two_byte_mode(&[0x1B, 0x24, 0x42, 0x46, 0x7C]));
    assert!(ends_in_two_byte_mode(&[0x1B, 0x26, 0x40, 0x1B, 0x24, 0x42]));
    assert!(ends_in_two_byte_mode(&[0x1B, 0x24, 0x28, 0x44]));
    assert!(!ends_in_two_byte_mode(b"plain text"));
    assert!(!ends_in_two_byte_mode(&[0x1B, 0x24, 0x42, 0x1B, 0x28, 0x42]));
    assert!(!ends_in_two_byte_mode(&[0x1B, 0x28, 0x4A, 0x41, 0x42]));
}
