use csv::ByteRecord;

/// Marker for a cell that exists but could not be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct InvalidField;

static NULL_TOKENS: &[&str] = &["nan", "na", "null", "none", "nat"];

pub(crate) fn normalize_header(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_start_matches('\u{feff}')
        .trim()
        .to_string()
}

/// Returns the trimmed text of a cell, `None` for absent or null-like cells.
/// Cells that are not valid UTF-8 are reported as invalid.
pub(crate) fn cell_text(record: &ByteRecord, index: usize) -> Result<Option<&str>, InvalidField> {
    let Some(bytes) = record.get(index) else {
        return Ok(None);
    };
    let text = std::str::from_utf8(bytes).map_err(|_| InvalidField)?;
    let trimmed = text.trim();
    if trimmed.is_empty()
        || NULL_TOKENS
            .iter()
            .any(|token| trimmed.eq_ignore_ascii_case(token))
    {
        return Ok(None);
    }
    Ok(Some(trimmed))
}

pub(crate) fn parse_optional_f64(value: Option<&str>) -> Result<Option<f64>, InvalidField> {
    let Some(trimmed) = value else {
        return Ok(None);
    };
    match trimmed.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => Ok(Some(parsed)),
        _ => Err(InvalidField),
    }
}

/// Integers written by dataframe tools sometimes carry a trailing `.0`;
/// whole floats are accepted, fractional ones are not.
pub(crate) fn parse_optional_i64(value: Option<&str>) -> Result<Option<i64>, InvalidField> {
    let Some(trimmed) = value else {
        return Ok(None);
    };
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Ok(Some(parsed));
    }
    match trimmed.parse::<f64>() {
        Ok(parsed)
            if parsed.is_finite()
                && parsed.fract() == 0.0
                && parsed >= i64::MIN as f64
                && parsed <= i64::MAX as f64 =>
        {
            Ok(Some(parsed as i64))
        }
        _ => Err(InvalidField),
    }
}

pub(crate) fn parse_optional_i32(value: Option<&str>) -> Result<Option<i32>, InvalidField> {
    match parse_optional_i64(value)? {
        Some(parsed) => i32::try_from(parsed).map(Some).map_err(|_| InvalidField),
        None => Ok(None),
    }
}

pub(crate) fn clean_optional(value: Option<&str>) -> Option<String> {
    value.map(|v| v.to_string())
}
