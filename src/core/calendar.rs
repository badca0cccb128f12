//! Calendar arithmetic over UTC epoch seconds.
//!
//! Fixed-length units (minutes through weeks) are plain second offsets.
//! Month-based units go through chrono so day-of-month clamping follows the
//! calendar (Jan 31 + 1 month = Feb 28/29).

use std::fmt::Write as _;

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::Timestamp;
use crate::error::{GanttError, GanttResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeUnit {
    Minutes,
    Hours,
    Days,
    Weeks,
    Months,
    Quarters,
    Years,
}

impl TimeUnit {
    #[must_use]
    pub fn fixed_seconds(self) -> Option<i64> {
        match self {
            Self::Minutes => Some(60),
            Self::Hours => Some(3_600),
            Self::Days => Some(86_400),
            Self::Weeks => Some(604_800),
            Self::Months | Self::Quarters | Self::Years => None,
        }
    }

    #[must_use]
    fn months_per_unit(self) -> i64 {
        match self {
            Self::Quarters => 3,
            Self::Years => 12,
            _ => 1,
        }
    }
}

/// Boundary the window edges snap to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundingBoundary {
    Day,
    /// Weeks start on Sunday.
    Week,
    Month,
    Year,
}

pub fn to_datetime(instant: Timestamp) -> GanttResult<NaiveDateTime> {
    DateTime::<Utc>::from_timestamp(instant, 0)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| {
            GanttError::InvalidData(format!(
                "timestamp {instant} is outside the supported calendar range"
            ))
        })
}

#[must_use]
pub fn from_datetime(dt: NaiveDateTime) -> Timestamp {
    dt.and_utc().timestamp()
}

/// Smallest and largest instants chrono can represent.
#[must_use]
pub fn timestamp_bounds() -> (Timestamp, Timestamp) {
    (
        DateTime::<Utc>::MIN_UTC.timestamp(),
        DateTime::<Utc>::MAX_UTC.timestamp(),
    )
}

/// Clamps a fractional instant into the representable range; NaN maps to `fallback`.
#[must_use]
pub fn clamp_fractional(instant: f64, fallback: f64) -> f64 {
    if instant.is_nan() {
        return fallback;
    }
    let (min, max) = timestamp_bounds();
    instant.clamp(min as f64, max as f64)
}

pub fn add_units(instant: Timestamp, unit: TimeUnit, amount: i64) -> GanttResult<Timestamp> {
    match unit.fixed_seconds() {
        Some(unit_seconds) => {
            let shifted = unit_seconds
                .checked_mul(amount)
                .and_then(|delta| instant.checked_add(delta))
                .ok_or_else(|| {
                    GanttError::InvalidData(format!(
                        "adding {amount} {unit:?} to {instant} overflows"
                    ))
                })?;
            to_datetime(shifted)?;
            Ok(shifted)
        }
        None => {
            let months = amount.checked_mul(unit.months_per_unit()).ok_or_else(|| {
                GanttError::InvalidData(format!("adding {amount} {unit:?} overflows"))
            })?;
            add_months(to_datetime(instant)?, months).map(from_datetime)
        }
    }
}

fn add_months(dt: NaiveDateTime, months: i64) -> GanttResult<NaiveDateTime> {
    let magnitude = u32::try_from(months.unsigned_abs()).map_err(|_| {
        GanttError::InvalidData(format!("month offset {months} is out of range"))
    })?;
    let shifted = if months >= 0 {
        dt.checked_add_months(Months::new(magnitude))
    } else {
        dt.checked_sub_months(Months::new(magnitude))
    };
    shifted.ok_or_else(|| {
        GanttError::InvalidData(format!("month offset {months} leaves the calendar range"))
    })
}

/// Whole `unit`s from `start` to `end`, truncated toward zero.
pub fn units_between(start: Timestamp, end: Timestamp, unit: TimeUnit) -> GanttResult<i64> {
    if let Some(unit_seconds) = unit.fixed_seconds() {
        return Ok(end.saturating_sub(start) / unit_seconds);
    }

    let from = to_datetime(start)?;
    let to = to_datetime(end)?;
    let mut months = i64::from(to.year() - from.year()) * 12
        + (i64::from(to.month()) - i64::from(from.month()));
    let landed = add_months(from, months)?;
    if months > 0 && landed > to {
        months -= 1;
    } else if months < 0 && landed < to {
        months += 1;
    }
    Ok(months / unit.months_per_unit())
}

/// Truncates `instant` down to the start of its `boundary` period.
pub fn round_down(instant: Timestamp, boundary: RoundingBoundary) -> GanttResult<Timestamp> {
    let date = to_datetime(instant)?.date();
    let truncated = match boundary {
        RoundingBoundary::Day => Some(date),
        RoundingBoundary::Week => date.checked_sub_days(chrono::Days::new(u64::from(
            date.weekday().num_days_from_sunday(),
        ))),
        RoundingBoundary::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1),
        RoundingBoundary::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
    }
    .ok_or_else(|| {
        GanttError::InvalidData(format!("cannot round {instant} down to {boundary:?}"))
    })?;
    Ok(from_datetime(truncated.and_time(NaiveTime::MIN)))
}

/// Ceiling to the next `boundary`; instants already on a boundary are kept.
pub fn round_up(instant: Timestamp, boundary: RoundingBoundary) -> GanttResult<Timestamp> {
    let floor = round_down(instant, boundary)?;
    if floor == instant {
        return Ok(instant);
    }
    match boundary {
        RoundingBoundary::Day => add_units(floor, TimeUnit::Days, 1),
        RoundingBoundary::Week => add_units(floor, TimeUnit::Weeks, 1),
        RoundingBoundary::Month => add_units(floor, TimeUnit::Months, 1),
        RoundingBoundary::Year => add_units(floor, TimeUnit::Years, 1),
    }
}

/// Formats an instant with a chrono strftime pattern.
///
/// `%Q` expands to the calendar quarter (1-4). Invalid patterns or
/// unrepresentable instants fall back to the raw epoch seconds.
#[must_use]
pub fn format_timestamp(instant: Timestamp, pattern: &str) -> String {
    let Ok(dt) = to_datetime(instant) else {
        return instant.to_string();
    };
    let quarter = (dt.month() - 1) / 3 + 1;
    let expanded = pattern.replace("%Q", &quarter.to_string());

    let mut out = String::new();
    if write!(out, "{}", dt.format(&expanded)).is_err() {
        return instant.to_string();
    }
    out
}

/// Parses a formatted instant; date-only patterns resolve to midnight.
pub fn parse_timestamp(text: &str, pattern: &str) -> GanttResult<Timestamp> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, pattern) {
        return Ok(from_datetime(dt));
    }
    NaiveDate::parse_from_str(text, pattern)
        .map(|date| from_datetime(date.and_time(NaiveTime::MIN)))
        .map_err(|e| {
            GanttError::InvalidData(format!(
                "`{text}` does not match date pattern `{pattern}`: {e}"
            ))
        })
}

/// Rejects patterns chrono cannot format.
pub fn validate_label_pattern(pattern: &str) -> GanttResult<()> {
    use chrono::format::{Item, StrftimeItems};

    let expanded = pattern.replace("%Q", "1");
    if StrftimeItems::new(&expanded).any(|item| matches!(item, Item::Error)) {
        return Err(GanttError::InvalidData(format!(
            "invalid date pattern `{pattern}`"
        )));
    }
    Ok(())
}

/// Finest instant step a pattern can express, in seconds.
///
/// Patterns with a seconds field (or `%s`, RFC 2822/3339) resolve to 1,
/// minutes to 60, hours to 3600, anything coarser to a whole day.
#[must_use]
pub fn pattern_resolution_seconds(pattern: &str) -> i64 {
    use chrono::format::{Fixed, Item, Numeric, StrftimeItems};

    let expanded = pattern.replace("%Q", "1");
    StrftimeItems::new(&expanded)
        .filter_map(|item| match item {
            Item::Numeric(Numeric::Second | Numeric::Timestamp | Numeric::Nanosecond, _)
            | Item::Fixed(
                Fixed::Nanosecond
                | Fixed::Nanosecond3
                | Fixed::Nanosecond6
                | Fixed::Nanosecond9
                | Fixed::RFC2822
                | Fixed::RFC3339,
            ) => Some(1),
            Item::Numeric(Numeric::Minute, _) => Some(60),
            Item::Numeric(Numeric::Hour | Numeric::Hour12, _) => Some(3_600),
            _ => None,
        })
        .min()
        .unwrap_or(86_400)
}

/// Rounds to the nearest multiple of `resolution` seconds since the epoch.
#[must_use]
pub fn round_to_resolution(instant: Timestamp, resolution: i64) -> Timestamp {
    if resolution <= 1 {
        return instant;
    }
    let remainder = instant.rem_euclid(resolution);
    let Some(floor) = instant.checked_sub(remainder) else {
        return instant;
    };
    let (min, max) = timestamp_bounds();
    let nearest = if remainder >= resolution - remainder {
        floor.checked_add(resolution).filter(|&ceil| ceil <= max)
    } else {
        Some(floor)
    };
    nearest.filter(|&value| value >= min).unwrap_or(instant)
}
