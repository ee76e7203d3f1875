//! Sync token codec.
//!
//! A progress snapshot travels between devices as `v1.YYYYMMDD.<payload>`:
//! the version tag, the start date, and a base64 bitfield with one bit per
//! plan day. The payload is 46 bytes (368 bits) no matter how many days are
//! completed, so the token length never grows with progress. Tokens ride in
//! a URL fragment (`#sync=<token>`) and therefore use the URL-safe alphabet
//! with padding stripped.

use crate::days::PLAN_DAYS;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use thiserror::Error;

const VERSION_TAG: &str = "v1";
const DATE_FORMAT: &str = "%Y%m%d";
/// 46 bytes cover days 1..=365; the three spare bits stay zero.
const BITFIELD_LEN: usize = 46;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SyncError {
    #[error("Unrecognized sync code format")]
    InvalidFormat,

    #[error("Sync code contains an invalid date")]
    InvalidDate,

    #[error("Sync code payload is not valid base64")]
    InvalidEncoding,

    #[error("The plan has not been started yet")]
    NotStarted,
}

/// Decoded token contents. Pure data; applying it to live state is the
/// caller's separate, confirmed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub start_date: NaiveDate,
    pub completed_days: BTreeSet<u16>,
}

pub fn encode(start_date: NaiveDate, completed_days: &BTreeSet<u16>) -> String {
    let mut bits = [0u8; BITFIELD_LEN];
    for &day in completed_days {
        if (1..=PLAN_DAYS).contains(&day) {
            let index = usize::from(day - 1);
            bits[index / 8] |= 1 << (index % 8);
        }
    }

    let payload = B64
        .encode(bits)
        .replace('+', "-")
        .replace('/', "_")
        .trim_end_matches('=')
        .to_string();

    format!(
        "{VERSION_TAG}.{}.{payload}",
        start_date.format(DATE_FORMAT)
    )
}

pub fn decode(token: &str) -> Result<Snapshot, SyncError> {
    let parts: Vec<&str> = token.split('.').collect();
    let [version, date_part, payload] = parts[..] else {
        return Err(SyncError::InvalidFormat);
    };
    if version != VERSION_TAG {
        return Err(SyncError::InvalidFormat);
    }

    let start_date = parse_date_segment(date_part).ok_or(SyncError::InvalidDate)?;

    let mut padded = payload.replace('-', "+").replace('_', "/");
    while padded.len() % 4 != 0 {
        padded.push('=');
    }
    let bytes = B64.decode(padded).map_err(|_| SyncError::InvalidEncoding)?;

    // Bits past the decoded length read as unset, so short payloads decode
    // instead of failing.
    let mut completed_days = BTreeSet::new();
    for day in 1..=PLAN_DAYS {
        let index = usize::from(day - 1);
        if let Some(byte) = bytes.get(index / 8) {
            if byte & (1 << (index % 8)) != 0 {
                completed_days.insert(day);
            }
        }
    }

    Ok(Snapshot {
        start_date,
        completed_days,
    })
}

/// Fixed-position `YYYYMMDD` parse. Stricter than `NaiveDate::parse_from_str`,
/// which tolerates variable-width years.
fn parse_date_segment(segment: &str) -> Option<NaiveDate> {
    if segment.len() != 8 || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = segment[0..4].parse().ok()?;
    let month = segment[4..6].parse().ok()?;
    let day = segment[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Accepts a token pasted verbatim, with a `#sync=` prefix, or as a full
/// share URL, and returns the bare token.
pub fn normalize_token_input(input: &str) -> &str {
    let trimmed = input.trim();
    match trimmed.rfind("#sync=") {
        Some(pos) => &trimmed[pos + "#sync=".len()..],
        None => trimmed,
    }
}
