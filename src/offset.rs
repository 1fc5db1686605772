//! Fixed UTC offsets, and the timezone suffix of the encoded text.
//!
//! Offsets are counted in quarter hours, which covers every offset in
//! actual use. The suffix is a sign followed by two digits of hours, and
//! two more digits of minutes when the offset isn’t a whole number of
//! hours: `+08`, `-05`, `+0530`.

use std::error::Error as ErrorTrait;
use std::fmt;

use log::trace;


const PLUS: char = '+';
const MINUS: char = '-';

const MINUTES_PER_QUARTER: i32 = 15;

/// The largest offset in either direction, in quarter hours: a whole day.
pub const MAX_QUARTER_HOURS: i8 = 96;


/// An offset from UTC, in whole quarter hours.
///
/// A zero offset doubles as “no timezone”: it writes no suffix at all.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Default, Copy, Clone)]
pub struct Offset {
    quarter_hours: i8,
}

impl Offset {

    pub fn utc() -> Self {
        Self { quarter_hours: 0 }
    }

    pub fn of_quarter_hours(quarter_hours: i32) -> Result<Self, Error> {
        let max = i32::from(MAX_QUARTER_HOURS);

        if quarter_hours >= -max && quarter_hours <= max {
            Ok(Self { quarter_hours: quarter_hours as i8 })
        }
        else {
            Err(Error::OutOfRange)
        }
    }

    /// Creates an offset from a number of minutes, discarding any part of a
    /// quarter hour (rounding towards zero).
    pub fn of_minutes(minutes: i32) -> Result<Self, Error> {
        Self::of_quarter_hours(minutes / MINUTES_PER_QUARTER)
    }

    pub fn of_hours_and_minutes(hours: i8, minutes: i8) -> Result<Self, Error> {
        if (hours.is_positive() && minutes.is_negative())
        || (hours.is_negative() && minutes.is_positive()) {
            Err(Error::SignMismatch)
        }
        else if hours < -24 || hours > 24 || minutes <= -60 || minutes >= 60 {
            Err(Error::OutOfRange)
        }
        else {
            let hours = i32::from(hours);
            let minutes = i32::from(minutes);
            Self::of_minutes(hours * 60 + minutes)
        }
    }

    pub fn quarter_hours(self) -> i8 {
        self.quarter_hours
    }

    pub fn total_minutes(self) -> i32 {
        i32::from(self.quarter_hours) * MINUTES_PER_QUARTER
    }

    pub fn total_milliseconds(self) -> i64 {
        i64::from(self.total_minutes()) * 60 * 1000
    }

    pub fn is_utc(self) -> bool {
        self.quarter_hours == 0
    }

    pub fn is_negative(self) -> bool {
        self.quarter_hours < 0
    }

    pub fn hours(self) -> i8 {
        (self.total_minutes() / 60) as i8
    }

    pub fn minutes(self) -> i8 {
        (self.total_minutes() % 60) as i8
    }

    /// Returns the suffix to write after the encoded fields, or `None` for
    /// a zero offset.
    ///
    /// ### Examples
    ///
    /// ```
    /// use bitdt::Offset;
    ///
    /// assert_eq!(Offset::of_quarter_hours(32).unwrap().suffix(), Some("+08".to_string()));
    /// assert_eq!(Offset::of_quarter_hours(-22).unwrap().suffix(), Some("-0530".to_string()));
    /// assert_eq!(Offset::utc().suffix(), None);
    /// ```
    pub fn suffix(self) -> Option<String> {
        if self.is_utc() {
            return None;
        }

        let sign = if self.is_negative() { MINUS } else { PLUS };
        let hours = self.hours().unsigned_abs();
        let minutes = self.minutes().unsigned_abs();

        if minutes == 0 {
            Some(format!("{}{:02}", sign, hours))
        }
        else {
            Some(format!("{}{:02}{:02}", sign, hours, minutes))
        }
    }

    /// Reads an offset out of a suffix token.
    ///
    /// Only the three-character `±HH` and five-character `±HHMM` forms are
    /// understood. Anything else, including a bare sign and the colon form
    /// `±HH:MM`, reads as a zero offset, as does an offset beyond a day.
    pub fn parse_suffix(token: &str) -> Self {
        let total = match token.len() {
            3 => digits(token, 1 .. 3).map(|hours| hours * 60),
            5 => digits(token, 1 .. 3).and_then(|hours| Some(hours * 60 + digits(token, 3 .. 5)?)),
            _ => None,
        };

        let minutes = match (total, token.starts_with(MINUS)) {
            (Some(minutes), true)   => -minutes,
            (Some(minutes), false)  => minutes,
            (None, _) => {
                trace!("Unparseable timezone suffix {:?}, treating as UTC", token);
                return Self::utc();
            }
        };

        Self::of_minutes(minutes).unwrap_or_else(|_| {
            trace!("Timezone suffix {:?} is beyond a day, treating as UTC", token);
            Self::utc()
        })
    }
}

fn digits(token: &str, range: std::ops::Range<usize>) -> Option<i32> {
    let part = token.get(range)?;

    if part.bytes().all(|b| b.is_ascii_digit()) {
        part.parse().ok()
    }
    else {
        None
    }
}

impl fmt::Debug for Offset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_utc() {
            write!(f, "Offset(Z)")
        }
        else {
            let sign = if self.is_negative() { MINUS } else { PLUS };
            write!(f, "Offset({}{:02}:{:02})", sign, self.hours().unsigned_abs(), self.minutes().unsigned_abs())
        }
    }
}


fn is_sign(c: char) -> bool {
    c == PLUS || c == MINUS
}

/// Returns whether the token looks like a timezone suffix: a sign followed
/// by exactly two or four digits. The colon form `±HH:MM` is rejected.
pub fn is_valid_timezone(token: &str) -> bool {
    let mut chars = token.chars();

    match chars.next() {
        Some(c) if is_sign(c) => {},
        _ => return false,
    }

    let digits = chars.as_str();
    digits.bytes().all(|b| b.is_ascii_digit())
        && (digits.len() == 2 || digits.len() == 4)
}

/// Finds where the timezone suffix of an encoded string begins, if it has
/// one.
///
/// A trailing lone sign counts as a suffix (with a zero offset). Otherwise
/// the string is scanned backwards for a sign whose remainder is a valid
/// timezone token.
pub fn find_suffix(text: &str) -> Option<usize> {
    if text.chars().nth(1).is_none() {
        return None;
    }

    if text.ends_with(is_sign) {
        return Some(text.len() - 1);
    }

    text.char_indices()
        .rev()
        .filter(|&(_, c)| is_sign(c))
        .map(|(index, _)| index)
        .find(|&index| is_valid_timezone(&text[index ..]))
}

/// Splits an encoded string into its field part and its timezone suffix.
///
/// ### Examples
///
/// ```
/// use bitdt::offset::split_suffix;
///
/// assert_eq!(split_suffix("N81FN;+0530"), ("N81FN;", Some("+0530")));
/// assert_eq!(split_suffix("N81FN;-"), ("N81FN;", Some("-")));
/// assert_eq!(split_suffix("N81FN;+05:30"), ("N81FN;+05:30", None));
/// ```
pub fn split_suffix(text: &str) -> (&str, Option<&str>) {
    match find_suffix(text) {
        Some(index) => (&text[.. index], Some(&text[index ..])),
        None        => (text, None),
    }
}


#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Error {
    OutOfRange,
    SignMismatch,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::OutOfRange    => write!(f, "offset field out of range"),
            Error::SignMismatch  => write!(f, "sign mismatch"),
        }
    }
}

impl ErrorTrait for Error {
}
