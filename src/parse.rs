//! Reading values out of ISO 8601 text.
//!
//! Text with a `T` is read as a date-time, text with a `:` (but no `T`) as
//! a time of day, and anything else as a date. Calendar dates, ordinal
//! dates, and week dates are all understood.

use std::error::Error as ErrorTrait;
use std::fmt;
use std::str::FromStr;

use crate::alphabet::RangeError;
use crate::cal::{self, CivilDateTime};
use crate::offset::{self, Offset};
use crate::packed::{from_absolute_year, BitDateTime, Fields};


impl FromStr for BitDateTime {
    type Err = Error;

    /// ### Examples
    ///
    /// ```
    /// use bitdt::{BitDateTime, DateType};
    ///
    /// let value: BitDateTime = "2024-06-14T05:34:16.789+05:30".parse().unwrap();
    /// assert_eq!(value.encode(), "N81FNGiQpO+0530");
    ///
    /// let value: BitDateTime = "2024-W24-5".parse().unwrap();
    /// assert_eq!(value.date_type(), DateType::DateOnly);
    /// assert_eq!(value.day(), Some(14));
    /// ```
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.contains('T') {
            let fields = iso8601::datetime(input).map_err(Error::Parse)?;
            let (time, offset) = time_fields(fields.time)?;
            let date = date_fields(fields.date)?;
            let all = date.with_time(time.hour, time.minute, time.second, time.millisecond);
            Self::new(all, offset).map_err(Error::Range)
        }
        else if input.contains(':') {
            let fields = iso8601::time(input).map_err(Error::Parse)?;
            let (time, offset) = time_fields(fields)?;
            Self::new(time, offset).map_err(Error::Range)
        }
        else {
            let fields = iso8601::date(input).map_err(Error::Parse)?;
            let date = date_fields(fields)?;
            Self::new(date, Offset::utc()).map_err(Error::Range)
        }
    }
}


fn date_fields(fields: iso8601::Date) -> Result<Fields, Error> {
    let civil = match fields {
        iso8601::Date::YMD { year, month, day } => {
            let month = month.checked_sub(1).ok_or(cal::Error::OutOfRange).map_err(Error::Calendar)?;
            CivilDateTime::ymd(i64::from(year), month, day)
        }
        iso8601::Date::Week { year, ww, d } => {
            CivilDateTime::week(i64::from(year), ww, d)
        }
        iso8601::Date::Ordinal { year, ddd } => {
            CivilDateTime::ordinal(i64::from(year), ddd)
        }
    };

    let civil = civil.map_err(Error::Calendar)?;
    let year = from_absolute_year(civil.year).ok_or(Error::YearOutOfRange(civil.year))?;
    Ok(Fields::date(year, civil.month, civil.day))
}

fn time_fields(fields: iso8601::Time) -> Result<(Fields, Offset), Error> {
    let hours = i8::try_from(fields.tz_offset_hours).map_err(|_| Error::Offset(offset::Error::OutOfRange))?;
    let minutes = i8::try_from(fields.tz_offset_minutes).map_err(|_| Error::Offset(offset::Error::OutOfRange))?;
    let offset = Offset::of_hours_and_minutes(hours, minutes).map_err(Error::Offset)?;

    let time = Fields::time(fields.hour, fields.minute, fields.second, fields.millisecond);
    Ok((time, offset))
}


#[derive(PartialEq, Debug, Clone)]
pub enum Error {

    /// The text isn’t ISO 8601.
    Parse(String),

    /// The date doesn’t exist on the calendar.
    Calendar(cal::Error),

    /// The year is outside the range the encoding can hold.
    YearOutOfRange(i64),

    /// A time field is out of range.
    Range(RangeError),

    /// The UTC offset is out of range, or its hours and minutes disagree.
    Offset(offset::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Parse(ref string)    => write!(f, "parse error: {}", string),
            Error::Calendar(ref e)      => write!(f, "parsing resulted in an invalid date: {}", e),
            Error::YearOutOfRange(year) => write!(f, "year {} cannot be encoded", year),
            Error::Range(ref e)         => write!(f, "parsing resulted in an invalid time: {}", e),
            Error::Offset(ref e)        => write!(f, "parsing resulted in an invalid offset: {}", e),
        }
    }
}

impl ErrorTrait for Error {
    fn source(&self) -> Option<&(dyn ErrorTrait + 'static)> {
        match *self {
            Error::Calendar(ref e)  => Some(e),
            Error::Range(ref e)     => Some(e),
            Error::Offset(ref e)    => Some(e),
            Error::Parse(_) | Error::YearOutOfRange(_) => None,
        }
    }
}
