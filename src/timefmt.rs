//! Timestamp encoding for record preambles
//!
//! The text form is RFC 3339 at second precision, emitted digit by digit
//! without a format-string interpreter. The binary form is nanoseconds since
//! the Unix epoch.

use chrono::{DateTime, Datelike, FixedOffset, Timelike};

/// Length of `YYYY-MM-DDTHH:MM:SS`
const DATETIME_LEN: usize = 19;

/// Append `YYYY-MM-DDTHH:MM:SS` followed by `Z` or `±HH:MM`
///
/// Years outside `0..=9999` are clamped to fit four digits.
pub fn append_rfc3339(buf: &mut Vec<u8>, t: &DateTime<FixedOffset>) {
    buf.reserve(DATETIME_LEN + 6);

    let year = t.year().clamp(0, 9999) as u32;
    push_2digits(buf, year / 100);
    push_2digits(buf, year % 100);
    buf.push(b'-');
    push_2digits(buf, t.month());
    buf.push(b'-');
    push_2digits(buf, t.day());
    buf.push(b'T');
    push_2digits(buf, t.hour());
    buf.push(b':');
    push_2digits(buf, t.minute());
    buf.push(b':');
    push_2digits(buf, t.second());

    let offset_secs = t.offset().local_minus_utc();
    if offset_secs == 0 {
        buf.push(b'Z');
        return;
    }

    buf.push(if offset_secs < 0 { b'-' } else { b'+' });
    let offset_mins = offset_secs.unsigned_abs() / 60;
    push_2digits(buf, offset_mins / 60);
    buf.push(b':');
    push_2digits(buf, offset_mins % 60);
}

/// Nanoseconds since the Unix epoch, saturating outside the i64 range
#[inline]
pub fn nanos_since_epoch(t: &DateTime<FixedOffset>) -> i64 {
    t.timestamp_nanos_opt().unwrap_or(if t.timestamp() < 0 {
        i64::MIN
    } else {
        i64::MAX
    })
}

#[inline]
fn push_2digits(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&[b'0' + (value / 10) as u8, b'0' + (value % 10) as u8]);
}
