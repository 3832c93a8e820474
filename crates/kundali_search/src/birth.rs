//! Birth data: local date-time, timezone and geographic location.
//!
//! Local date-times are parsed with `chrono`; timezones are either a fixed
//! UTC offset (`+05:30`, `-0400`, `Z`) or an IANA name resolved through
//! `chrono-tz`. Everything downstream works in Julian Day UT.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Julian Day of the Unix epoch (1970-01-01T00:00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Accepted local date-time layouts, tried in order.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Geographic location of an observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Geodetic latitude in degrees, north positive, [-90, 90].
    pub latitude: f64,
    /// Geodetic longitude in degrees, east positive, [-180, 180].
    pub longitude: f64,
}

impl GeoLocation {
    /// Validated location.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, SearchError> {
        let loc = Self {
            latitude,
            longitude,
        };
        loc.validate()?;
        Ok(loc)
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(SearchError::InvalidInput(format!(
                "latitude {} outside [-90, 90]",
                self.latitude
            )));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(SearchError::InvalidInput(format!(
                "longitude {} outside [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }
}

/// Timezone of a birth record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BirthTimezone {
    /// Constant offset from UTC.
    Fixed(FixedOffset),
    /// IANA zone with historical and DST rules.
    Named(Tz),
}

impl BirthTimezone {
    /// Parse `Z`, `UTC`, `+HH:MM`, `+HHMM`, `+HH`, or an IANA name.
    pub fn parse(s: &str) -> Result<Self, SearchError> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
            return fixed_offset(0).map(Self::Fixed);
        }
        if s.starts_with('+') || s.starts_with('-') {
            return parse_offset(s).map(Self::Fixed);
        }
        s.parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| SearchError::InvalidInput(format!("unknown timezone '{s}'")))
    }

    /// Resolve a local wall-clock time to UTC.
    ///
    /// An ambiguous local time (DST fall-back) resolves to the earlier
    /// instant; a skipped local time (DST spring-forward) is rejected.
    pub fn to_utc(&self, local: &NaiveDateTime) -> Result<DateTime<Utc>, SearchError> {
        match self {
            Self::Fixed(offset) => resolve(offset.from_local_datetime(local), local),
            Self::Named(tz) => resolve(tz.from_local_datetime(local), local),
        }
    }
}

impl Display for BirthTimezone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(offset) => write!(f, "{offset}"),
            Self::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

fn resolve<Z: TimeZone>(
    result: LocalResult<DateTime<Z>>,
    local: &NaiveDateTime,
) -> Result<DateTime<Utc>, SearchError> {
    match result {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => {
            log::debug!("ambiguous local time {local}, using the earlier instant");
            Ok(earliest.with_timezone(&Utc))
        }
        LocalResult::None => Err(SearchError::InvalidInput(format!(
            "local time {local} does not exist in this timezone"
        ))),
    }
}

fn fixed_offset(seconds: i32) -> Result<FixedOffset, SearchError> {
    FixedOffset::east_opt(seconds)
        .ok_or_else(|| SearchError::InvalidInput(format!("offset {seconds}s out of range")))
}

fn parse_offset(s: &str) -> Result<FixedOffset, SearchError> {
    let bad = || SearchError::InvalidInput(format!("malformed UTC offset '{s}'"));
    let sign = if s.starts_with('-') { -1 } else { 1 };
    let digits: String = s[1..].chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(bad());
    }
    let (hh, mm) = match digits.len() {
        2 => (&digits[..2], "0"),
        4 => (&digits[..2], &digits[2..]),
        _ => return Err(bad()),
    };
    let hours: i32 = hh.parse().map_err(|_| bad())?;
    let minutes: i32 = mm.parse().map_err(|_| bad())?;
    if hours > 14 || minutes >= 60 {
        return Err(bad());
    }
    fixed_offset(sign * (hours * 3600 + minutes * 60))
}

/// Parse an ISO local date-time `YYYY-MM-DDTHH:MM[:SS]`.
pub fn parse_local_datetime(s: &str) -> Result<NaiveDateTime, SearchError> {
    let s = s.trim();
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| {
            SearchError::InvalidInput(format!(
                "date-time '{s}' is not YYYY-MM-DDTHH:MM[:SS]"
            ))
        })
}

/// Julian Day UT of a UTC instant (millisecond resolution).
pub fn jd_from_utc(dt: &DateTime<Utc>) -> f64 {
    dt.timestamp_millis() as f64 / MILLIS_PER_DAY + UNIX_EPOCH_JD
}

/// UTC instant of a Julian Day UT, rounded to the millisecond.
pub fn utc_from_jd(jd_ut: f64) -> Option<DateTime<Utc>> {
    if !jd_ut.is_finite() {
        return None;
    }
    let millis = ((jd_ut - UNIX_EPOCH_JD) * MILLIS_PER_DAY).round();
    if millis.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

/// A validated birth record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirthData {
    /// Local wall-clock date-time of birth.
    pub datetime: NaiveDateTime,
    pub timezone: BirthTimezone,
    pub location: GeoLocation,
}

impl BirthData {
    pub fn new(
        datetime: NaiveDateTime,
        timezone: BirthTimezone,
        location: GeoLocation,
    ) -> Result<Self, SearchError> {
        location.validate()?;
        let birth = Self {
            datetime,
            timezone,
            location,
        };
        birth.utc()?;
        Ok(birth)
    }

    /// Parse all four fields from text and numbers.
    pub fn parse(
        datetime: &str,
        timezone: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, SearchError> {
        Self::new(
            parse_local_datetime(datetime)?,
            BirthTimezone::parse(timezone)?,
            GeoLocation::new(latitude, longitude)?,
        )
    }

    /// Birth instant in UTC.
    pub fn utc(&self) -> Result<DateTime<Utc>, SearchError> {
        self.timezone.to_utc(&self.datetime)
    }

    /// Birth instant as Julian Day UT.
    pub fn jd_ut(&self) -> Result<f64, SearchError> {
        self.utc().map(|dt| jd_from_utc(&dt))
    }
}
