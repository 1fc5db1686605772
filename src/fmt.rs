//! Human-readable rendering.
//!
//! `Display` writes a value’s encoded text, and `Debug` writes it out in
//! ISO 8601 style, so a value in a failing test reads as a date.

use std::fmt;

use crate::codec::encode;
use crate::offset::Offset;
use crate::packed::BitDateTime;


/// A value written out in ISO 8601 style. Only the fields that are present
/// get written, so a date-only value has no time part and a time-only
/// value has no date part.
#[derive(Debug, Copy, Clone)]
pub struct Iso(BitDateTime);

impl BitDateTime {

    /// Returns a wrapper that displays this value in ISO 8601 style.
    ///
    /// ### Examples
    ///
    /// ```
    /// use bitdt::{BitDateTime, Fields, Offset};
    ///
    /// let fields = Fields::date(52_024, 5, 14).with_time(5, 34, 16, 789);
    /// let value = BitDateTime::new(fields, Offset::of_quarter_hours(22).unwrap()).unwrap();
    /// assert_eq!(value.iso().to_string(), "2024-06-14T05:34:16.789+05:30");
    ///
    /// let value = BitDateTime::time(12, 0, 0, 0).unwrap();
    /// assert_eq!(value.iso().to_string(), "12:00:00.000");
    /// ```
    pub fn iso(self) -> Iso {
        Iso(self)
    }
}

impl fmt::Display for Iso {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = self.0;

        if value.is_empty() {
            return write!(f, "empty");
        }

        if let (Some(year), Some(month), Some(day)) = (value.absolute_year(), value.month(), value.day()) {
            if year >= 0 && year <= 9999 {
                write!(f, "{:04}-{:02}-{:02}", year, month + 1, day)?;
            }
            else {
                write!(f, "{:+05}-{:02}-{:02}", year, month + 1, day)?;
            }

            if value.hour().is_some() {
                write!(f, "T")?;
            }
        }

        if let Some(hour) = value.hour() {
            write!(f, "{:02}:{:02}:{:02}.{:03}", hour,
                   value.minute().unwrap_or(0), value.second().unwrap_or(0), value.millisecond().unwrap_or(0))?;
        }

        write_offset(f, value.offset())
    }
}

fn write_offset(f: &mut fmt::Formatter, offset: Offset) -> fmt::Result {
    if offset.is_utc() {
        return Ok(());
    }

    let sign = if offset.is_negative() { '-' } else { '+' };
    write!(f, "{}{:02}:{:02}", sign, offset.hours().unsigned_abs(), offset.minutes().unsigned_abs())
}

impl fmt::Debug for BitDateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "BitDateTime({})", self.iso())
    }
}

impl fmt::Display for BitDateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&encode(*self))
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::packed::Fields;

    #[test]
    fn recently() {
        let value = BitDateTime::date(51_600, 1, 28).unwrap();
        assert_eq!(format!("{:?}", value), "BitDateTime(1600-02-28)");
    }

    #[test]
    fn just_then() {
        let value = BitDateTime::date(49_247, 11, 1).unwrap();
        assert_eq!(format!("{:?}", value), "BitDateTime(-0753-12-01)");
    }

    #[test]
    fn far_far_future() {
        let value = BitDateTime::date(60_601, 0, 31).unwrap();
        assert_eq!(format!("{:?}", value), "BitDateTime(+10601-01-31)");
    }

    #[test]
    fn midday() {
        let value = BitDateTime::time(12, 0, 0, 0).unwrap();
        assert_eq!(format!("{:?}", value), "BitDateTime(12:00:00.000)");
    }

    #[test]
    fn date_hour() {
        let value = BitDateTime::new(Fields::date(52_009, 1, 13).with_time(23, 0, 0, 0), Offset::utc()).unwrap();
        assert_eq!(format!("{:?}", value), "BitDateTime(2009-02-13T23:00:00.000)");
    }

    #[test]
    fn negative_offset() {
        let offset = Offset::of_quarter_hours(-14).unwrap();
        let value = BitDateTime::new(Fields::date(52_024, 5, 14).with_time(9, 30, 0, 0), offset).unwrap();
        assert_eq!(format!("{:?}", value), "BitDateTime(2024-06-14T09:30:00.000-03:30)");
    }

    #[test]
    fn empty() {
        assert_eq!(format!("{:?}", BitDateTime::empty()), "BitDateTime(empty)");
    }

    #[test]
    fn display_is_encoded() {
        let value = BitDateTime::date(52_024, 5, 14).unwrap();
        assert_eq!(value.to_string(), "N81FN;");
        assert_eq!(BitDateTime::empty().to_string(), "&");
    }
}
