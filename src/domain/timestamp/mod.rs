//! Filename timestamp parsing
//!
//! Clip filenames follow `YYYYMMDD_HHMMSS<suffix>.<ext>`. The date token is
//! everything before the first `_`, the time token is the first six
//! characters after it.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::domain::errors::DomainError;

/// Long-form date, e.g. `July 17, 2020`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayDate(String);

impl DisplayDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 12-hour clock time, e.g. `1:51:35 PM`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayTime(String);

impl DisplayTime {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Both overlay lines for a clip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClipTimestamp {
    pub date: DisplayDate,
    pub time: DisplayTime,
}

/// Parse the date token of a filename
pub fn parse_date(filename: &str) -> Result<DisplayDate, DomainError> {
    let token = filename.split('_').next().unwrap_or_default();
    let digits = ascii_digits(token, 8)
        .ok_or_else(|| DomainError::malformed(filename, "date token must be 8 digits (YYYYMMDD)"))?;

    let year = number(&digits[0..4]) as i32;
    let month = number(&digits[4..6]);
    let day = number(&digits[6..8]);

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DomainError::malformed(filename, format!("{} is not a calendar date", token)))?;

    Ok(DisplayDate(date.format("%B %d, %Y").to_string()))
}

/// Parse the time token of a filename
pub fn parse_time(filename: &str) -> Result<DisplayTime, DomainError> {
    let segment = filename
        .split('_')
        .nth(1)
        .ok_or_else(|| DomainError::malformed(filename, "missing time token after '_'"))?;
    let token: String = segment.chars().take(6).collect();
    let digits = ascii_digits(&token, 6)
        .ok_or_else(|| DomainError::malformed(filename, "time token must be 6 digits (HHMMSS)"))?;

    let hour = number(&digits[0..2]);
    let minute = number(&digits[2..4]);
    let second = number(&digits[4..6]);

    let time = NaiveTime::from_hms_opt(hour, minute, second)
        .ok_or_else(|| DomainError::malformed(filename, format!("{} is not a valid time", token)))?;

    let formatted = time.format("%I:%M:%S %p").to_string();
    let display = formatted
        .strip_prefix('0')
        .map(str::to_string)
        .unwrap_or(formatted);

    Ok(DisplayTime(display))
}

/// Parse both overlay lines, failing if either is malformed
pub fn parse_timestamp(filename: &str) -> Result<ClipTimestamp, DomainError> {
    Ok(ClipTimestamp {
        date: parse_date(filename)?,
        time: parse_time(filename)?,
    })
}

fn ascii_digits(token: &str, len: usize) -> Option<&[u8]> {
    let bytes = token.as_bytes();
    (bytes.len() == len && bytes.iter().all(u8::is_ascii_digit)).then_some(bytes)
}

fn number(digits: &[u8]) -> u32 {
    digits
        .iter()
        .fold(0, |acc, digit| acc * 10 + u32::from(digit - b'0'))
}

#[cfg(test)]
mod tests;
