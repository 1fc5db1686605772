//! Proleptic Gregorian calendar arithmetic, for converting between epoch
//! milliseconds and calendar fields.
//!
//! Leap seconds are ignored, as they are everywhere else in this library.

use std::error::Error as ErrorTrait;
use std::fmt;

use crate::system::now_millis;


/// Number of days guaranteed to be in four years.
const DAYS_IN_4Y:   i64 = 365 *   4 +  1;

/// Number of days guaranteed to be in a hundred years.
const DAYS_IN_100Y: i64 = 365 * 100 + 24;

/// Number of days guaranteed to be in four hundred years.
const DAYS_IN_400Y: i64 = 365 * 400 + 97;

const MILLIS_IN_SECOND: i64 = 1000;
const SECONDS_IN_DAY: i64 = 86400;

/// Number of days between **1st January, 1970** and **1st March, 2000**.
///
/// Counting days from just after a possible leap day, at the start of a
/// 400-year cycle, turns most of the calendar maths into plain division.
const EPOCH_DIFFERENCE: i64 = 30 * 365   // 30 years between 2000 and 1970...
                            + 7          // plus seven days for leap years...
                            + 31 + 29;   // plus all the days in January and February in 2000.

/// Number of days between **1st January, 1970** and **1st January, 2000**.
const DAYS_FROM_1970_TO_2000: i64 = 10958;

/// The number of days elapsed at the end of each month, starting at the
/// beginning of March and going backwards, ignoring February.
const TIME_TRIANGLE: &[i64; 11] =
    &[31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30 + 31 + 31,  // January
      31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30 + 31,  // December
      31 + 30 + 31 + 30 + 31 + 31 + 30 + 31 + 30,  // November
      31 + 30 + 31 + 30 + 31 + 31 + 30 + 31,  // October
      31 + 30 + 31 + 30 + 31 + 31 + 30,  // September
      31 + 30 + 31 + 30 + 31 + 31,  // August
      31 + 30 + 31 + 30 + 31,  // July
      31 + 30 + 31 + 30,  // June
      31 + 30 + 31,  // May
      31 + 30,  // April
      31]; // March

/// Days elapsed in a common year before each month begins.
const DAYS_BEFORE_MONTH: [i64; 12] = [ 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334 ];

const FEBRUARY: u32 = 1;


/// A date and time of day on the proleptic Gregorian calendar, with no
/// timezone attached.
///
/// Months count from zero for January, like everywhere else in this
/// library; days count from one.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
pub struct CivilDateTime {
    pub year:        i64,
    pub month:       u32,
    pub day:         u32,
    pub hour:        u32,
    pub minute:      u32,
    pub second:      u32,
    pub millisecond: u32,
}

impl CivilDateTime {

    /// Midnight at the start of the given date, if that date exists.
    ///
    /// ### Examples
    ///
    /// ```
    /// use bitdt::CivilDateTime;
    ///
    /// assert!(CivilDateTime::ymd(2024, 1, 29).is_ok());
    /// assert!(CivilDateTime::ymd(2100, 1, 29).is_err());
    /// ```
    pub fn ymd(year: i64, month: u32, day: u32) -> Result<Self, Error> {
        let _ = days_since_epoch(year, month, day)?;
        Ok(Self { year, month, day, hour: 0, minute: 0, second: 0, millisecond: 0 })
    }

    /// Midnight at the start of the given day of the year, counting from
    /// one for the 1st of January.
    pub fn ordinal(year: i64, yearday: u32) -> Result<Self, Error> {
        if yearday == 0 || yearday > days_in_year(year) {
            return Err(Error::OutOfRange);
        }

        let jan_1 = days_since_epoch(year, 0, 1)?;
        Ok(Self::at_day(jan_1 + i64::from(yearday) - 1))
    }

    /// Midnight at the start of the given ISO 8601 week date. Weekdays run
    /// from 1 for Monday to 7 for Sunday.
    ///
    /// Early days of week 1 and late days of week 53 can belong to the
    /// previous or next calendar year.
    ///
    /// ### Examples
    ///
    /// ```
    /// use bitdt::CivilDateTime;
    ///
    /// let date = CivilDateTime::week(2009, 1, 1).unwrap();
    /// assert_eq!((date.year, date.month, date.day), (2008, 11, 29));
    /// ```
    pub fn week(year: i64, week: u32, weekday: u32) -> Result<Self, Error> {
        if week == 0 || week > 53 || weekday == 0 || weekday > 7 {
            return Err(Error::OutOfRange);
        }

        let jan_4 = days_since_epoch(year, 0, 4)?;
        let correction = weekday_of(jan_4) + 3;
        let yearday = 7 * i64::from(week) + i64::from(weekday) - correction;

        let jan_1 = days_since_epoch(year, 0, 1)?;
        Ok(Self::at_day(jan_1 + yearday - 1))
    }

    /// The date-time a number of milliseconds after **midnight, 1st
    /// January, 1970**, UTC.
    pub fn at_ms(epoch_millis: i64) -> Self {
        let (seconds, millisecond) = split_cycles(epoch_millis, MILLIS_IN_SECOND);
        let (days, seconds) = split_cycles(seconds, SECONDS_IN_DAY);

        Self {
            hour:        (seconds / 3600) as u32,
            minute:      (seconds / 60 % 60) as u32,
            second:      (seconds % 60) as u32,
            millisecond: millisecond as u32,
            ..Self::at_day(days)
        }
    }

    /// The current date and time, in UTC.
    pub fn now() -> Self {
        Self::at_ms(now_millis())
    }

    fn at_day(days_since_1970: i64) -> Self {
        let (year, month, day) = from_days_since_epoch(days_since_1970 - EPOCH_DIFFERENCE);
        Self { year, month, day, hour: 0, minute: 0, second: 0, millisecond: 0 }
    }

    /// The number of milliseconds between **midnight, 1st January, 1970**
    /// and this date-time in UTC, if every field is valid and the result
    /// fits.
    pub fn to_epoch_millis(&self) -> Result<i64, Error> {
        if self.hour >= 24 || self.minute >= 60 || self.second >= 60 || self.millisecond >= 1000 {
            return Err(Error::OutOfRange);
        }

        let days = days_since_epoch(self.year, self.month, self.day)?;
        let seconds = i64::from(self.hour * 3600 + self.minute * 60 + self.second);

        days.checked_mul(SECONDS_IN_DAY)
            .and_then(|s| s.checked_add(seconds))
            .and_then(|s| s.checked_mul(MILLIS_IN_SECOND))
            .and_then(|ms| ms.checked_add(i64::from(self.millisecond)))
            .ok_or(Error::OutOfRange)
    }
}

impl fmt::Debug for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.year >= 0 && self.year <= 9999 {
            write!(f, "CivilDateTime({:04}", self.year)?;
        }
        else {
            write!(f, "CivilDateTime({:+05}", self.year)?;
        }

        write!(f, "-{:02}-{:02}T{:02}:{:02}:{:02}.{:03})",
               self.month + 1, self.day, self.hour, self.minute, self.second, self.millisecond)
    }
}


/// Returns whether the given year is a leap year.
///
/// ### Examples
///
/// ```
/// use bitdt::cal::is_leap_year;
///
/// assert_eq!(is_leap_year(2000), true);
/// assert_eq!(is_leap_year(1900), false);
/// ```
pub fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn days_in_year(year: i64) -> u32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// The number of days in a month, counting months from zero.
#[allow(clippy::match_same_arms)]
pub fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        0 => 31,  1 => if is_leap_year(year) { 29 } else { 28 },
        2 => 31,  3 => 30,
        4 => 31,  5 => 30,
        6 => 31,  7 => 31,
        8 => 30,  9 => 31,
       10 => 30, 11 => 31,
        _ => 0,
    }
}

/// Performs two related calculations for leap years, returning the
/// results as a two-part tuple:
///
/// 1. The number of leap years that have elapsed between 2000 and this year;
/// 2. Whether this year is a leap year or not.
fn leap_year_calculations(year: i64) -> (i64, bool) {
    let year = year - 2000;

    // This calculation is the reverse of from_days_since_epoch.
    let (num_400y_cycles, mut remainder) = split_cycles(year, 400);

    // Standard leap-year calculations, performed on the remainder
    let currently_leap_year = remainder == 0 || (remainder % 100 != 0 && remainder % 4 == 0);

    let num_100y_cycles = remainder / 100;
    remainder -= num_100y_cycles * 100;

    let leap_years_elapsed = remainder / 4
        + 97 * num_400y_cycles  // There are 97 leap years in 400 years
        + 24 * num_100y_cycles  // There are 24 leap years in 100 years
        - if currently_leap_year { 1 } else { 0 };

    (leap_years_elapsed, currently_leap_year)
}

/// The number of days between **1st January, 1970** and the given date,
/// if the date exists.
pub fn days_since_epoch(year: i64, month: u32, day: u32) -> Result<i64, Error> {
    if month >= 12 || day == 0 || day > days_in_month(year, month) || year.checked_sub(2000).is_none() {
        return Err(Error::OutOfRange);
    }

    let (leap_days_elapsed, is_leap_year) = leap_year_calculations(year);
    let leap_day = if is_leap_year && month > FEBRUARY { 1 } else { 0 };
    let days_this_year = DAYS_BEFORE_MONTH[month as usize] + leap_day + i64::from(day - 1);

    (year - 2000).checked_mul(365)
        .and_then(|days| days.checked_add(DAYS_FROM_1970_TO_2000 + leap_days_elapsed))
        .and_then(|days| days.checked_add(days_this_year))
        .ok_or(Error::OutOfRange)
}

/// Computes the year, month, and day, given the number of days that have
/// passed since **1st March, 2000**.
fn from_days_since_epoch(days: i64) -> (i64, u32, u32) {

    // Find the number of 400-year, 100-year, and 4-year cycles, subtracting
    // the days they take up as we go.
    let (num_400y_cycles, mut remainder) = split_cycles(days, DAYS_IN_400Y);

    let num_100y_cycles = remainder / DAYS_IN_100Y;
    remainder -= num_100y_cycles * DAYS_IN_100Y;

    let num_4y_cycles = remainder / DAYS_IN_4Y;
    remainder -= num_4y_cycles * DAYS_IN_4Y;

    let mut years = std::cmp::min(remainder / 365, 3);
    remainder -= years * 365;  // remainder is now days left in this year

    years +=   4 * num_4y_cycles
           + 100 * num_100y_cycles
           + 400 * num_400y_cycles;

    // Scan the time triangle for the month that has the correct number of
    // days elapsed at the end of it. It goes backwards, hence “11 - index”.
    let result = TIME_TRIANGLE.iter()
                              .enumerate()
                              .find(|&(_, days)| *days <= remainder);

    let (mut month, month_days) = match result {
        Some((index, days)) => (11 - index as u32, remainder - *days),
        None => (0, remainder),  // No month found? Then it’s February.
    };

    // Months were counted from March.
    month += 2;

    if month >= 12 {
        years += 1;   // wrap around for January and February
        month -= 12;
    }

    (years + 2000, month, month_days as u32 + 1)
}

/// The ISO weekday, from 1 for Monday to 7 for Sunday, of a number of days
/// since **1st January, 1970**, which was a Thursday.
fn weekday_of(days_since_1970: i64) -> i64 {
    (days_since_1970 + 3).rem_euclid(7) + 1
}

/// Split a number of periods into a number of cycles, and the number of
/// periods left over that don’t fit into a cycle.
///
/// This is a division with remainder, except that a negative remainder
/// gets wrapped around to be positive.
fn split_cycles(number_of_periods: i64, cycle_length: i64) -> (i64, i64) {
    let mut cycles    = number_of_periods / cycle_length;
    let mut remainder = number_of_periods % cycle_length;

    if remainder < 0 {
        remainder += cycle_length;
        cycles    -= 1;
    }

    (cycles, remainder)
}


#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Error {
    OutOfRange,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "datetime field out of range")
    }
}

impl ErrorTrait for Error {
}
