//! Cell typing: raw field bytes plus the typed view the ordering consults.
//!
//! Typing rules per field, after ASCII trim:
//! - missing token (empty, `-`, NA, N/A, NULL, NAN, NONE; case-insensitive)
//!   becomes `Missing`
//! - a finite number (optional sign, US thousands separators, exponent)
//!   becomes `Number`
//! - anything else is `Text`, compared on raw bytes
//!
//! `Marker` cells are never produced by typing; they exist only between the
//! stamp-position preprocessor and the strip-marker postprocessor.

/// Typed view of a cell. Raw bytes are kept alongside for emission.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Missing,
    Number(f64),
    Text,
    Marker(u64),
}

/// One cell of a row: original field bytes plus the typed view.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    raw: Vec<u8>,
    value: CellValue,
}

impl Cell {
    /// Type a raw CSV field.
    pub fn from_field(field: &[u8]) -> Self {
        let trimmed = trim_ascii_blanks(field);
        let value = if is_missing_token(trimmed) {
            CellValue::Missing
        } else if let Some(number) = parse_number(trimmed) {
            CellValue::Number(number)
        } else {
            CellValue::Text
        };
        Self {
            raw: field.to_vec(),
            value,
        }
    }

    /// A position-marker cell stamped by the order preprocessor.
    pub fn marker(position: u64) -> Self {
        Self {
            raw: position.to_string().into_bytes(),
            value: CellValue::Marker(position),
        }
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn value(&self) -> &CellValue {
        &self.value
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.value, CellValue::Missing)
    }

    /// Marker position, if this cell is a position marker.
    pub fn marker_position(&self) -> Option<u64> {
        match self.value {
            CellValue::Marker(position) => Some(position),
            _ => None,
        }
    }
}

/// Strip ASCII spaces and tabs from both ends. The only whitespace rule here.
fn trim_ascii_blanks(field: &[u8]) -> &[u8] {
    let is_blank = |b: &u8| *b == b' ' || *b == b'\t';
    let start = field.iter().position(|b| !is_blank(b));
    match start {
        Some(start) => {
            let end = field.iter().rposition(|b| !is_blank(b)).unwrap_or(start);
            &field[start..=end]
        }
        None => b"",
    }
}

/// Missing tokens, matched case-insensitively on a trimmed field.
fn is_missing_token(trimmed: &[u8]) -> bool {
    if trimmed.is_empty() || trimmed == b"-" {
        return true;
    }
    [b"NA".as_slice(), b"N/A", b"NULL", b"NAN", b"NONE"]
        .iter()
        .any(|token| trimmed.eq_ignore_ascii_case(token))
}

/// Parse a trimmed field as a finite number.
///
/// Accepts an optional leading sign, US thousands separators in the integer
/// part (3-digit groups only), a decimal point, and an exponent.
fn parse_number(trimmed: &[u8]) -> Option<f64> {
    if trimmed.is_empty() {
        return None;
    }

    let (negative, digits) = match trimmed[0] {
        b'+' => (false, &trimmed[1..]),
        b'-' => (true, &trimmed[1..]),
        _ => (false, trimmed),
    };
    if digits.is_empty() || matches!(digits[0], b'+' | b'-') {
        return None;
    }

    let ungrouped = if digits.contains(&b',') {
        strip_thousands_separators(digits)?
    } else {
        digits.to_vec()
    };

    let text = std::str::from_utf8(&ungrouped).ok()?;
    let parsed = text.parse::<f64>().ok()?;
    if !parsed.is_finite() {
        return None;
    }
    Some(if negative { -parsed } else { parsed })
}

/// Remove commas if and only if they form valid 3-digit groups in the
/// integer part. Commas anywhere else make the field non-numeric.
fn strip_thousands_separators(digits: &[u8]) -> Option<Vec<u8>> {
    let integer_end = digits
        .iter()
        .position(|b| matches!(b, b'.' | b'e' | b'E'))
        .unwrap_or(digits.len());
    let (integer, rest) = digits.split_at(integer_end);
    if rest.contains(&b',') {
        return None;
    }

    let groups: Vec<&[u8]> = integer.split(|b| *b == b',').collect();
    if groups.len() < 2 {
        return None;
    }
    let head_ok = !groups[0].is_empty()
        && groups[0].len() <= 3
        && groups[0].iter().all(u8::is_ascii_digit);
    let tail_ok = groups[1..]
        .iter()
        .all(|group| group.len() == 3 && group.iter().all(u8::is_ascii_digit));
    if !head_ok || !tail_ok {
        return None;
    }

    let mut out: Vec<u8> = integer.iter().copied().filter(|b| *b != b',').collect();
    out.extend_from_slice(rest);
    Some(out)
}
