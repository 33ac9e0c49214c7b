// Copyright 2014-2015 Galen Clark Haynes
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Rust XML-RPC library

use std::fmt;

use chrono::{FixedOffset, NaiveDateTime, TimeZone};

use crate::error::{Error, Result};

// Canonical XML-RPC first, then the extended and fully basic ISO-8601 forms.
// `%.f` also matches an absent fraction.
const LAYOUTS: &[&str] = &[
    "%Y%m%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y%m%dT%H%M%S%.f",
    "%Y-%m-%dT%H%M%S%.f",
];

/// A decoded `<dateTime.iso8601>` value.
///
/// XML-RPC timestamps usually carry no zone, so the wall-clock time is kept
/// as written and the offset only when the payload gave one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DateTime {
    naive: NaiveDateTime,
    offset: Option<FixedOffset>,
}

impl DateTime {
    pub fn new(naive: NaiveDateTime, offset: Option<FixedOffset>) -> DateTime {
        DateTime { naive, offset }
    }

    /// The wall-clock time as written in the payload.
    pub fn naive(&self) -> NaiveDateTime {
        self.naive
    }

    /// The offset suffix of the payload, if it had one.
    pub fn offset(&self) -> Option<FixedOffset> {
        self.offset
    }

    /// Pins the timestamp to its own offset, or to `default` when the payload
    /// had none. Returns `None` only if the result is out of chrono's range.
    pub fn to_fixed_offset(&self, default: FixedOffset) -> Option<chrono::DateTime<FixedOffset>> {
        self.offset
            .unwrap_or(default)
            .from_local_datetime(&self.naive)
            .single()
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.naive.format("%Y%m%dT%H:%M:%S"))?;
        match self.offset {
            Some(offset) => write!(f, "{}", offset),
            None => Ok(()),
        }
    }
}

/// Decodes the text of a `<dateTime.iso8601>` element.
pub fn decode_datetime(text: &str) -> Result<DateTime> {
    let invalid = || Error::InvalidDateTime(text.to_string());
    let (local, offset) = split_offset(text.trim()).ok_or_else(invalid)?;
    LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(local, layout).ok())
        .map(|naive| DateTime::new(naive, offset))
        .ok_or_else(invalid)
}

/// Splits a trailing `Z`, `+HH`, `+HHMM` or `+HH:MM` (or `-`) off the time.
/// `None` means a suffix was present but malformed.
fn split_offset(s: &str) -> Option<(&str, Option<FixedOffset>)> {
    if let Some(local) = s.strip_suffix('Z') {
        return Some((local, FixedOffset::east_opt(0)));
    }
    // only look after the `T`, dates may contain dashes
    let time_start = match s.find('T') {
        Some(i) => i + 1,
        None => return Some((s, None)),
    };
    let sign_at = match s[time_start..].rfind(['+', '-']) {
        Some(i) => time_start + i,
        None => return Some((s, None)),
    };
    let sign = if s[sign_at..].starts_with('-') { -1 } else { 1 };
    let digits: String = s[sign_at + 1..].chars().filter(|c| *c != ':').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if hours > 23 || minutes > 59 {
        return None;
    }
    let offset = FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))?;
    Some((&s[..sign_at], Some(offset)))
}
