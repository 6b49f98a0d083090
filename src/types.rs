use clap::ValueEnum;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Detected text encoding
pub enum Encoding {
    /// Plain 7-bit ASCII
    Ascii,
    /// EUC-JP encoding
    EucJp,
    /// Shift-JIS encoding
    ShiftJis,
    /// ISO-2022-JP (JIS) encoding
    Jis,
    /// Anything else (including UTF-8)
    Unknown,
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::Unknown
    }
}

impl Encoding {
    /// Whether this encoding has multi-byte characters or shift states
    /// that truncation must respect.
    pub fn is_japanese(&self) -> bool {
        matches!(self, Self::EucJp | Self::ShiftJis | Self::Jis)
    }
}

impl AsRef<str> for Encoding {
    fn as_ref(&self) -> &str {
        match self {
            Encoding::Ascii => "ascii",
            Encoding::EucJp => "euc-jp",
            Encoding::ShiftJis => "shift-jis",
            Encoding::Jis => "iso-2022-jp",
            Encoding::Unknown => "unknown",
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq, PartialOrd, Ord)]
/// Text Encoding
pub enum TextEncoding {
    /// Automatically detect encoding
    Auto,
    #[value(alias("euc-jp"))]
    /// EUC-JP encoding
    Euc,
    #[value(alias("shift-jis"), alias("cp932"))]
    /// Shift-JIS encoding
    Sjis,
    #[value(alias("iso-2022-jp"))]
    /// ISO-2022-JP encoding
    Jis,
}
