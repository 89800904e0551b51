// SPDX-License-Identifier: AGPL-3.0-or-later

//! Reader for IGC flight log text.
//!
//! An IGC file is a line oriented ASCII format written by flight recorders.
//! Only two record types matter here: `HFDTE` headers carrying the date and
//! `B` records carrying one timed GPS fix each. Everything else is skipped.
//! The resulting track is a sequence of positions in decimal degrees, with
//! longitude on the x axis and latitude on the y axis, so it can serve as a
//! linear operand of a boolean operation.

use std::io::BufRead;

use thiserror::Error;

use crate::geometry::{LineString, Point};

/// One GPS fix of a track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    /// Position, x = longitude and y = latitude in decimal degrees.
    pub point: Point,
    /// Time of the fix in Unix seconds.
    pub time: f64,
}

/// A recorded flight track.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Track {
    /// The fixes in recording order.
    pub points: Vec<TrackPoint>,
}

impl Track {
    /// The track positions as an open path.
    pub fn line_string(&self) -> LineString {
        LineString::new(self.points.iter().map(|fix| fix.point).collect())
    }
}

/// Reasons an IGC input fails to parse.
///
/// Every variant names the 1-based line the problem was found on. The
/// reader fails on the first malformed record.
#[derive(Debug, Error)]
pub enum IgcError {
    /// Reading from the input failed.
    #[error("read error on line {line}: {source}")]
    Read {
        /// 1-based number of the unreadable line.
        line: usize,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The record ended before all of its fields.
    #[error("record on line {line} is too short")]
    ShortRecord {
        /// 1-based number of the offending line.
        line: usize,
    },
    /// A numeric field contains a non-digit.
    #[error("bad number on line {line}")]
    BadNumber {
        /// 1-based number of the offending line.
        line: usize,
    },
    /// A hemisphere letter is not one of N, S, E, W.
    #[error("bad hemisphere letter on line {line}")]
    BadHemisphere {
        /// 1-based number of the offending line.
        line: usize,
    },
}

/// Read a track from IGC text.
///
/// A `B` record before any date header is placed on 2000-01-01.
pub fn read<R: BufRead>(input: R) -> Result<Track, IgcError> {
    let mut points = Vec::new();
    // Day of the current date header, as days since the Unix epoch.
    let mut date = days_from_civil(2000, 1, 1);

    for (index, line) in input.lines().enumerate() {
        let line_number = index + 1;
        let line = line.map_err(|source| IgcError::Read {
            line: line_number,
            source,
        })?;

        if line.starts_with("HFDTE") {
            date = parse_date_header(line.as_bytes(), line_number)?;
        } else if line.starts_with('B') {
            points.push(parse_b_record(line.as_bytes(), line_number, date)?);
        }
        // All other record types are ignored.
    }

    Ok(Track { points })
}

/// Parse `HFDTE` + DDMMYY into days since the Unix epoch.
fn parse_date_header(record: &[u8], line: usize) -> Result<i64, IgcError> {
    let digits = record
        .get(5..11)
        .ok_or(IgcError::ShortRecord { line })?;

    let day = parse_number(&digits[0..2], line)?;
    let month = parse_number(&digits[2..4], line)?;
    let yy = parse_number(&digits[4..6], line)?;
    // Two digit years below 70 fall into the 2000s.
    let year = if yy < 70 { 2000 + yy } else { 1900 + yy };

    Ok(days_from_civil(year, month, day))
}

/// Parse a `B` record: `B` HHMMSS DDMMmmm N/S DDDMMmmm E/W ...
fn parse_b_record(record: &[u8], line: usize, date: i64) -> Result<TrackPoint, IgcError> {
    if record.len() < 24 {
        return Err(IgcError::ShortRecord { line });
    }

    let hour = parse_number(&record[1..3], line)?;
    let minute = parse_number(&record[3..5], line)?;
    let second = parse_number(&record[5..7], line)?;

    // MMmmm is thousandths of minutes, 60000 of them per degree.
    let lat_degrees = parse_number(&record[7..9], line)?;
    let lat_thousandths = parse_number(&record[9..14], line)?;
    let mut latitude = lat_degrees as f64 + lat_thousandths as f64 / 60_000.0;
    match record[14] {
        b'N' => {}
        b'S' => latitude = -latitude,
        _ => return Err(IgcError::BadHemisphere { line }),
    }

    let lon_degrees = parse_number(&record[15..18], line)?;
    let lon_thousandths = parse_number(&record[18..23], line)?;
    let mut longitude = lon_degrees as f64 + lon_thousandths as f64 / 60_000.0;
    match record[23] {
        b'E' => {}
        b'W' => longitude = -longitude,
        _ => return Err(IgcError::BadHemisphere { line }),
    }

    let time = (date * 86_400 + (hour * 60 + minute) * 60 + second) as f64;

    Ok(TrackPoint {
        point: Point::new(longitude, latitude),
        time,
    })
}

fn parse_number(digits: &[u8], line: usize) -> Result<i64, IgcError> {
    let mut value: i64 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return Err(IgcError::BadNumber { line });
        }
        value = value * 10 + i64::from(b - b'0');
    }
    Ok(value)
}

/// Days between the Unix epoch and the given civil date.
///
/// Proleptic Gregorian calendar, negative results before 1970.
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = (month + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}
