//! Byte patterns for the trailing characters of Japanese encodings.
use crate::types::Encoding;

/// Inclusive byte range.
#[derive(Clone, Copy, Debug)]
pub struct ByteRange(pub u8, pub u8);

impl ByteRange {
    fn contains(&self, b: u8) -> bool {
        self.0 <= b && b <= self.1
    }
}

/// One byte position in a pattern: the byte must fall in one of the ranges.
type ByteClass = &'static [ByteRange];

fn class_contains(class: ByteClass, b: u8) -> bool {
    class.iter().any(|r| r.contains(b))
}

/// A single complete character or escape sequence, matched at the end of
/// a buffer.
#[derive(Clone, Copy, Debug)]
pub enum TailPattern {
    /// A fixed-width sequence of byte classes.
    Seq(&'static [ByteClass]),
    /// An exact byte sequence.
    Lit(&'static [u8]),
    /// `open`, zero or more bytes in `run`, then `close`.
    Run {
        open: u8,
        run: ByteRange,
        close: u8,
    },
}

impl TailPattern {
    /// Length of the longest suffix of `buf` this pattern matches.
    pub fn match_suffix(&self, buf: &[u8]) -> Option<usize> {
        match self {
            TailPattern::Seq(classes) => {
                if buf.len() < classes.len() {
                    return None;
                }
                let tail = &buf[buf.len() - classes.len()..];
                tail.iter()
                    .zip(classes.iter())
                    .all(|(b, c)| class_contains(c, *b))
                    .then(|| classes.len())
            }
            TailPattern::Lit(lit) => buf.ends_with(lit).then(|| lit.len()),
            TailPattern::Run { open, run, close } => {
                let (last, rest) = buf.split_last()?;
                if last != close {
                    return None;
                }
                let n = rest.iter().rev().take_while(|b| run.contains(**b)).count();
                (rest.len() > n && rest[rest.len() - 1 - n] == *open).then(|| n + 2)
            }
        }
    }
}

/// Valid trailing characters of an EUC-JP buffer.
pub static EUC_JP: &[TailPattern] = &[
    // ASCII / JIS-Roman
    TailPattern::Seq(&[&[ByteRange(0x00, 0x7F)]]),
    // JIS X 0208
    TailPattern::Seq(&[&[ByteRange(0xA1, 0xFE)], &[ByteRange(0xA1, 0xFE)]]),
    // half-width katakana
    TailPattern::Seq(&[&[ByteRange(0x8E, 0x8E)], &[ByteRange(0xA0, 0xDF)]]),
    // JIS X 0212
    TailPattern::Seq(&[
        &[ByteRange(0x8F, 0x8F)],
        &[ByteRange(0xA1, 0xFE)],
        &[ByteRange(0xA1, 0xFE)],
    ]),
];

/// Valid trailing characters of a Shift-JIS buffer.
pub static SHIFT_JIS: &[TailPattern] = &[
    // ASCII / JIS-Roman
    TailPattern::Seq(&[&[ByteRange(0x21, 0x7E)]]),
    // half-width katakana
    TailPattern::Seq(&[&[ByteRange(0xA1, 0xDF)]]),
    // two-byte character
    TailPattern::Seq(&[
        &[ByteRange(0x81, 0x9F), ByteRange(0xE0, 0xEF)],
        &[ByteRange(0x40, 0x7E), ByteRange(0x80, 0xFC)],
    ]),
];

/// Valid trailing characters and escapes of an ISO-2022-JP buffer.
pub static ISO_2022_JP: &[TailPattern] = &[
    // two-byte-mode escapes
    TailPattern::Lit(&[0x1B, 0x24, 0x40]),
    TailPattern::Lit(&[0x1B, 0x24, 0x42]),
    TailPattern::Lit(&[0x1B, 0x26, 0x40, 0x1B, 0x24, 0x42]),
    TailPattern::Lit(&[0x1B, 0x24, 0x28, 0x44]),
    // two-byte character
    TailPattern::Seq(&[&[ByteRange(0x21, 0x7E)], &[ByteRange(0x21, 0x7E)]]),
    // one-byte-mode escape
    TailPattern::Seq(&[
        &[ByteRange(0x1B, 0x1B)],
        &[ByteRange(0x28, 0x28)],
        &[
            ByteRange(0x4A, 0x4A),
            ByteRange(0x48, 0x48),
            ByteRange(0x42, 0x42),
            ByteRange(0x49, 0x49),
        ],
    ]),
    // one-byte character
    TailPattern::Seq(&[&[ByteRange(0x21, 0x5F)]]),
    TailPattern::Run {
        open: 0x0F,
        run: ByteRange(0xA1, 0xDF),
        close: 0x0E,
    },
    TailPattern::Seq(&[&[ByteRange(0x21, 0x7E)]]),
];

/// Escape back to single-byte mode, appended when truncation leaves an
/// ISO-2022-JP buffer in two-byte mode.
pub const JIS_TO_SINGLE_BYTE: &[u8] = &[0x1B, 0x28, 0x42];

/// Returns the pattern table for `encoding`, or `None` when the encoding
/// has no character boundaries to respect.
pub fn table_for(encoding: Encoding) -> Option<&'static [TailPattern]> {
    match encoding {
        Encoding::EucJp => Some(EUC_JP),
        Encoding::ShiftJis => Some(SHIFT_JIS),
        Encoding::Jis => Some(ISO_2022_JP),
        Encoding::Ascii | Encoding::Unknown => None,
    }
}

/// Length of the longest trailing character or escape at the end of `buf`.
pub fn longest_suffix(rules: &[TailPattern], buf: &[u8]) -> Option<usize> {
    rules.iter().filter_map(|r| r.match_suffix(buf)).max()
}

#[test]
fn test_match_suffix_euc() {
    // 語 (B8 EC) beats the single trailing byte rules
    assert_eq!(
        longest_suffix(EUC_JP, &[0xC6, 0xFC, 0xB8, 0xEC]),
        Some(2)
    );
    // JIS X 0212 three-byte unit beats the two-byte JIS X 0208 match
    assert_eq!(
        longest_suffix(EUC_JP, &[0x41, 0x8F, 0xA1, 0xA1]),
        Some(3)
    );
    // half-width katakana
    assert_eq!(longest_suffix(EUC_JP, &[0x8E, 0xB1]), Some(2));
    // plain ASCII
    assert_eq!(longest_suffix(EUC_JP, b"abc"), Some(1));
}

#[test]
fn test_match_suffix_sjis() {
    // 語 (8C EA)
    assert_eq!(
        longest_suffix(SHIFT_JIS, &[0x93, 0xFA, 0x8C, 0xEA]),
        Some(2)
    );
    // half-width katakana ｱ
    assert_eq!(longest_suffix(SHIFT_JIS, &[0x41, 0xB1]), Some(1));
    // two-byte match wins over the ASCII trail byte
    assert_eq!(longest_suffix(SHIFT_JIS, &[0x83, 0x41]), Some(2));
    // lead byte alone matches nothing
    assert_eq!(longest_suffix(SHIFT_JIS, &[0x83]), None);
}

#[test]
fn test_match_suffix_jis() {
    // shift-in escape
    assert_eq!(
        longest_suffix(ISO_2022_JP, &[0x41, 0x1B, 0x24, 0x42]),
        Some(3)
    );
    // the long 1978 compatibility escape wins over its own tail
    assert_eq!(
        longest_suffix(ISO_2022_JP, &[0x1B, 0x26, 0x40, 0x1B, 0x24, 0x42]),
        Some(6)
    );
    // shift-out escape
    assert_eq!(
        longest_suffix(ISO_2022_JP, &[0x46, 0x7C, 0x1B, 0x28, 0x4A]),
        Some(3)
    );
    // katakana run bracketed by SI/SO
    assert_eq!(
        longest_suffix(ISO_2022_JP, &[0x41, 0x0F, 0xB1, 0xB2, 0xB3, 0x0E]),
        Some(5)
    );
    // empty run is still a unit
    assert_eq!(longest_suffix(ISO_2022_JP, &[0x0F, 0x0E]), Some(2));
    // two-byte character
    assert_eq!(longest_suffix(ISO_2022_JP, &[0x46, 0x7C]), Some(2));
}

#[test]
fn test_match_suffix_no_match() {
    assert_eq!(longest_suffix(SHIFT_JIS, &[0x41, 0x00]), None);
    assert_eq!(longest_suffix(ISO_2022_JP, &[0x0E, 0x0F]), None);
    assert_eq!(longest_suffix(EUC_JP, &[]), None);
    assert_eq!(longest_suffix(SHIFT_JIS, &[]), None);
}
