//! Lenient cell parsing for scraped catalog data.
//!
//! Scraped tables spell missing values in several ways and keep units next to
//! numbers, so cells are read as text and parsed here.

use serde::{Deserialize, Deserializer};

const MISSING_MARKERS: &[&str] = &["", "none", "nan", "null", "n/a", "-"];

fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    MISSING_MARKERS
        .iter()
        .any(|marker| trimmed.eq_ignore_ascii_case(marker))
}

/// Parse a text cell, mapping missing markers to `None`.
pub fn parse_text(raw: &str) -> Option<String> {
    if is_missing(raw) {
        None
    } else {
        Some(raw.trim().to_string())
    }
}

/// Byte length of the leading number: optional `-`, digits with at most one
/// `.`, then an optional exponent (`e3`, `E-2`) when digits follow it.
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));
    let mut seen_dot = false;
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let digits = bytes[exponent..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits > 0 {
            end = exponent + digits;
        }
    }
    end
}

/// Parse a numeric cell such as `"65 W"`, `"$1,199.99"`, `"3.5 GHz"` or `"1e3"`.
///
/// The leading number is used after stripping a currency sign and thousands
/// separators. A second decimal point right after it (`"2.5.1"`) is an error.
pub fn parse_number(raw: &str) -> Result<Option<f64>, String> {
    if is_missing(raw) {
        return Ok(None);
    }
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    let end = numeric_prefix_len(&cleaned);
    if cleaned[end..].starts_with('.') {
        return Err(format!("invalid number '{}'", raw.trim()));
    }

    cleaned[..end]
        .parse::<f64>()
        .map(Some)
        .map_err(|_| format!("invalid number '{}'", raw.trim()))
}

/// Parse a whole-number cell such as `"8"` or `"4 x 16GB"` (leading count).
pub fn parse_count(raw: &str) -> Result<Option<u32>, String> {
    match parse_number(raw)? {
        None => Ok(None),
        Some(n) if n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64 => Ok(Some(n as u32)),
        Some(_) => Err(format!("invalid count '{}'", raw.trim())),
    }
}

pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_text))
}

pub(crate) fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(raw) => parse_number(&raw).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

pub(crate) fn count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(raw) => parse_count(&raw).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
