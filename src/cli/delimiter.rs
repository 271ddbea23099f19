//! `--delimiter` flag parsing.
//!
//! Accepted forms, keywords and hex case-insensitive:
//! - named: comma, tab, semicolon, pipe, caret
//! - hex byte: 0xNN
//! - a single ASCII character

/// Error returned for an unusable delimiter flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterError {
    Unparseable,
    NotAscii,
    Reserved(u8),
}

impl std::fmt::Display for DelimiterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DelimiterError::Unparseable => {
                write!(f, "expected a named delimiter, 0xNN, or one ASCII character")
            }
            DelimiterError::NotAscii => write!(f, "delimiter must be a single ASCII byte"),
            DelimiterError::Reserved(byte) => {
                write!(f, "byte 0x{byte:02X} cannot be used as a delimiter")
            }
        }
    }
}

impl std::error::Error for DelimiterError {}

pub fn parse_delimiter_arg(raw: &str) -> Result<u8, DelimiterError> {
    if let Some(byte) = named_delimiter(raw) {
        return check_usable(byte);
    }

    let lower = raw.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        if hex.len() != 2 {
            return Err(DelimiterError::Unparseable);
        }
        let byte = u8::from_str_radix(hex, 16).map_err(|_| DelimiterError::Unparseable)?;
        return check_usable(byte);
    }

    match raw.as_bytes() {
        [byte] => check_usable(*byte),
        [] => Err(DelimiterError::Unparseable),
        _ if raw.chars().count() == 1 => Err(DelimiterError::NotAscii),
        _ => Err(DelimiterError::Unparseable),
    }
}

fn named_delimiter(raw: &str) -> Option<u8> {
    match raw.to_ascii_lowercase().as_str() {
        "comma" => Some(b','),
        "tab" => Some(b'\t'),
        "semicolon" => Some(b';'),
        "pipe" => Some(b'|'),
        "caret" => Some(b'^'),
        _ => None,
    }
}

fn check_usable(byte: u8) -> Result<u8, DelimiterError> {
    if byte == 0 || byte > 0x7F {
        return Err(DelimiterError::Reserved(byte));
    }
    // Quote and record terminators collide with the CSV parser itself.
    if matches!(byte, b'"' | b'\r' | b'\n') {
        return Err(DelimiterError::Reserved(byte));
    }
    Ok(byte)
}
