//! Input-byte guardrails: BOM handling and binary-input detection.
//!
//! topr reads UTF-8 (or any ASCII-compatible byte soup) only. A UTF-16/32
//! BOM or an early NUL byte means the file is in a wide encoding or is not
//! text at all, and is refused before parsing starts.

/// How far into the input to look for NUL bytes.
const NUL_SCAN_LIMIT: usize = 8 * 1024;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Why the input bytes were refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingIssue {
    /// UTF-16 BOM at the start of the file.
    Utf16Bom,
    /// UTF-32 BOM at the start of the file.
    Utf32Bom,
    /// NUL byte within the scan window.
    NulByte,
}

impl EncodingIssue {
    pub fn as_str(&self) -> &'static str {
        match self {
            EncodingIssue::Utf16Bom => "utf16_bom",
            EncodingIssue::Utf32Bom => "utf32_bom",
            EncodingIssue::NulByte => "nul_byte",
        }
    }
}

/// Validate raw input bytes and strip a UTF-8 BOM if present.
pub fn guard_input(bytes: &[u8]) -> Result<&[u8], EncodingIssue> {
    // UTF-32 LE BOM starts with the UTF-16 LE BOM bytes; check it first.
    if bytes.starts_with(&[0x00, 0x00, 0xFE, 0xFF]) || bytes.starts_with(&[0xFF, 0xFE, 0x00, 0x00])
    {
        return Err(EncodingIssue::Utf32Bom);
    }
    if bytes.starts_with(&[0xFE, 0xFF]) || bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(EncodingIssue::Utf16Bom);
    }

    let text = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let window = &text[..text.len().min(NUL_SCAN_LIMIT)];
    if window.contains(&0x00) {
        return Err(EncodingIssue::NulByte);
    }
    Ok(text)
}
