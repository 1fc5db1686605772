//! The packed date-time value, and the date type that says which of its
//! fields are present.
//!
//! All seven fields share a single `u64`, most significant field first, so
//! comparing two packed integers compares the date-times they hold. The low
//! byte holds the date type tag.

use crate::alphabet::{Field, RangeError, MAX_YEAR};
use crate::offset::Offset;


const YEAR_SHIFT:   u32 = 44;
const MONTH_SHIFT:  u32 = 40;
const DAY_SHIFT:    u32 = 35;
const HOUR_SHIFT:   u32 = 30;
const MINUTE_SHIFT: u32 = 24;
const SECOND_SHIFT: u32 = 18;
const MILLI_SHIFT:  u32 = 8;

const YEAR_MASK:   u64 = (1 << 20) - 1;
const MONTH_MASK:  u64 = (1 << 4) - 1;
const DAY_MASK:    u64 = (1 << 5) - 1;
const HOUR_MASK:   u64 = (1 << 5) - 1;
const MINUTE_MASK: u64 = (1 << 6) - 1;
const SECOND_MASK: u64 = (1 << 6) - 1;
const MILLI_MASK:  u64 = (1 << 10) - 1;
const TAG_MASK:    u64 = 0xFF;

/// Relative years count from this many years before year zero, so that
/// every year the encoding can hold is a positive number.
pub const RELATIVE_YEAR_OFFSET: i64 = 50_000;


/// Which of a value’s fields are present.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Copy, Clone)]
#[repr(u8)]
pub enum DateType {

    /// Nothing at all.
    Empty = 0,

    /// Every field, from the year down to the millisecond.
    Full = 1,

    /// A year, month, and day, with no time of day.
    DateOnly = 2,

    /// A time of day, with no date.
    TimeOnly = 3,

    /// A date and an hour. The minute, second, and millisecond are all
    /// zero, and are left out of the encoded text.
    DateHour = 4,
}

impl DateType {

    /// Works out the date type from which fields are zero. A day of zero
    /// counts as “no date”.
    pub fn classify(fields: &Fields) -> Self {
        let no_date = fields.year == 0 && fields.month == 0 && fields.day == 0;
        let no_time = fields.hour == 0 && fields.minute == 0 && fields.second == 0 && fields.millisecond == 0;
        let on_the_hour = fields.minute == 0 && fields.second == 0 && fields.millisecond == 0;

        if no_date && no_time {
            DateType::Empty
        }
        else if no_time {
            DateType::DateOnly
        }
        else if no_date {
            DateType::TimeOnly
        }
        else if on_the_hour && fields.hour != 0 {
            DateType::DateHour
        }
        else {
            DateType::Full
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => DateType::Empty,
            1 => DateType::Full,
            2 => DateType::DateOnly,
            3 => DateType::TimeOnly,
            4 => DateType::DateHour,
            _ => return None,
        })
    }

    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Whether the year, month, and day are present.
    pub fn has_date(self) -> bool {
        matches!(self, DateType::Full | DateType::DateOnly | DateType::DateHour)
    }

    /// Whether the hour is present.
    pub fn has_hour(self) -> bool {
        matches!(self, DateType::Full | DateType::TimeOnly | DateType::DateHour)
    }

    /// Whether the minute, second, and millisecond get written out.
    pub fn has_clock(self) -> bool {
        matches!(self, DateType::Full | DateType::TimeOnly)
    }
}


/// The seven fields of a date-time, as plain numbers.
///
/// The year is relative (see `RELATIVE_YEAR_OFFSET`), the month counts from
/// zero, and the day counts from one. A zero day means there’s no date.
#[derive(PartialEq, Eq, Hash, Debug, Default, Copy, Clone)]
pub struct Fields {
    pub year:        u32,
    pub month:       u32,
    pub day:         u32,
    pub hour:        u32,
    pub minute:      u32,
    pub second:      u32,
    pub millisecond: u32,
}

impl Fields {

    pub fn date(year: u32, month: u32, day: u32) -> Self {
        Self { year, month, day, ..Self::default() }
    }

    pub fn time(hour: u32, minute: u32, second: u32, millisecond: u32) -> Self {
        Self { hour, minute, second, millisecond, ..Self::default() }
    }

    pub fn with_time(self, hour: u32, minute: u32, second: u32, millisecond: u32) -> Self {
        Self { hour, minute, second, millisecond, ..self }
    }

    /// Checks that every field is within its range.
    ///
    /// A day of zero is only allowed when there’s no year or month either,
    /// as otherwise it would silently turn into the first of the month.
    pub fn validate(&self) -> Result<(), RangeError> {
        let _ = Field::Year.check(self.year)?;
        let _ = Field::Month.check(self.month)?;

        if self.day != 0 || self.year != 0 || self.month != 0 {
            let _ = Field::Day.check(self.day)?;
        }

        let _ = Field::Hour.check(self.hour)?;
        let _ = Field::Minute.check(self.minute)?;
        let _ = Field::Second.check(self.second)?;
        let _ = Field::Millisecond.check(self.millisecond)?;
        Ok(())
    }

    fn pack(&self, date_type: DateType) -> u64 {
        let day_index = self.day.saturating_sub(1);

          u64::from(self.year)        << YEAR_SHIFT
        | u64::from(self.month)       << MONTH_SHIFT
        | u64::from(day_index)        << DAY_SHIFT
        | u64::from(self.hour)        << HOUR_SHIFT
        | u64::from(self.minute)      << MINUTE_SHIFT
        | u64::from(self.second)      << SECOND_SHIFT
        | u64::from(self.millisecond) << MILLI_SHIFT
        | u64::from(date_type.tag())
    }
}


/// A date-time packed into a single integer, with an offset from UTC.
///
/// Values are immutable. Two values are equal when both their packed
/// integers and their offsets match; they’re ordered by the packed integer,
/// with the offset only breaking ties.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
pub struct BitDateTime {
    packed: u64,
    offset: Offset,
}

impl BitDateTime {

    /// Creates a value from its fields, working out its date type.
    ///
    /// ### Examples
    ///
    /// ```
    /// use bitdt::{BitDateTime, DateType, Fields, Offset};
    ///
    /// let fields = Fields::date(52_024, 5, 14).with_time(9, 0, 0, 0);
    /// let value = BitDateTime::new(fields, Offset::utc()).unwrap();
    /// assert_eq!(value.date_type(), DateType::DateHour);
    /// assert_eq!(value.day(), Some(14));
    /// assert_eq!(value.minute(), Some(0));
    ///
    /// assert!(BitDateTime::new(Fields::time(24, 0, 0, 0), Offset::utc()).is_err());
    /// ```
    pub fn new(fields: Fields, offset: Offset) -> Result<Self, RangeError> {
        fields.validate()?;
        let date_type = DateType::classify(&fields);

        Ok(Self {
            packed: fields.pack(date_type),
            offset,
        })
    }

    pub fn date(year: u32, month: u32, day: u32) -> Result<Self, RangeError> {
        Self::new(Fields::date(year, month, day), Offset::utc())
    }

    pub fn time(hour: u32, minute: u32, second: u32, millisecond: u32) -> Result<Self, RangeError> {
        Self::new(Fields::time(hour, minute, second, millisecond), Offset::utc())
    }

    /// The value with nothing in it. This is what failed conversions give
    /// back.
    pub fn empty() -> Self {
        Self { packed: 0, offset: Offset::utc() }
    }

    /// Puts a value together from a packed integer, overwriting its low
    /// byte with the given date type. The other bits aren’t checked, so the
    /// result might not be encodable.
    pub fn from_raw_parts(packed: u64, offset: Offset, date_type: DateType) -> Self {
        Self {
            packed: (packed & !TAG_MASK) | u64::from(date_type.tag()),
            offset,
        }
    }

    /// Reads a value back out of a packed integer, taking the date type
    /// from its low byte. Returns `None` if that byte isn’t a date type.
    pub fn from_packed(packed: u64) -> Option<Self> {
        DateType::from_tag((packed & TAG_MASK) as u8)
            .map(|_| Self { packed, offset: Offset::utc() })
    }

    /// Returns a copy of this value with a different offset.
    pub fn with_offset(self, offset: Offset) -> Self {
        Self { offset, ..self }
    }

    fn bits(self, shift: u32, mask: u64) -> u32 {
        ((self.packed >> shift) & mask) as u32
    }

    pub fn packed(self) -> u64 {
        self.packed
    }

    pub fn offset(self) -> Offset {
        self.offset
    }

    /// The timezone suffix this value gets encoded with, if any.
    pub fn timezone(self) -> Option<String> {
        self.offset.suffix()
    }

    /// The date type stored in the low byte. Values put together from
    /// unknown tags count as empty.
    pub fn date_type(self) -> DateType {
        DateType::from_tag((self.packed & TAG_MASK) as u8).unwrap_or(DateType::Empty)
    }

    pub fn is_empty(self) -> bool {
        self.date_type() == DateType::Empty
    }

    /// The relative year.
    pub fn year(self) -> Option<u32> {
        self.date_field(YEAR_SHIFT, YEAR_MASK)
    }

    /// The month, counting from zero for January.
    pub fn month(self) -> Option<u32> {
        self.date_field(MONTH_SHIFT, MONTH_MASK)
    }

    /// The day of the month, counting from one.
    pub fn day(self) -> Option<u32> {
        self.date_field(DAY_SHIFT, DAY_MASK).map(|index| index + 1)
    }

    pub fn hour(self) -> Option<u32> {
        if self.date_type().has_hour() {
            Some(self.bits(HOUR_SHIFT, HOUR_MASK))
        }
        else {
            None
        }
    }

    pub fn minute(self) -> Option<u32> {
        self.clock_field(MINUTE_SHIFT, MINUTE_MASK)
    }

    pub fn second(self) -> Option<u32> {
        self.clock_field(SECOND_SHIFT, SECOND_MASK)
    }

    pub fn millisecond(self) -> Option<u32> {
        self.clock_field(MILLI_SHIFT, MILLI_MASK)
    }

    fn date_field(self, shift: u32, mask: u64) -> Option<u32> {
        if self.date_type().has_date() {
            Some(self.bits(shift, mask))
        }
        else {
            None
        }
    }

    fn clock_field(self, shift: u32, mask: u64) -> Option<u32> {
        match self.date_type() {
            DateType::Full | DateType::TimeOnly  => Some(self.bits(shift, mask)),
            DateType::DateHour                   => Some(0),
            DateType::Empty | DateType::DateOnly => None,
        }
    }

    /// The year counted from year zero rather than from the relative
    /// epoch.
    pub fn absolute_year(self) -> Option<i64> {
        self.year().map(to_absolute_year)
    }

    /// All seven fields, with absent ones as zero.
    pub fn fields(self) -> Fields {
        Fields {
            year:        self.year().unwrap_or(0),
            month:       self.month().unwrap_or(0),
            day:         self.day().unwrap_or(0),
            hour:        self.hour().unwrap_or(0),
            minute:      self.minute().unwrap_or(0),
            second:      self.second().unwrap_or(0),
            millisecond: self.millisecond().unwrap_or(0),
        }
    }

    /// Whether this value comes before the other one. Offsets are ignored.
    pub fn is_before(self, other: Self) -> bool {
        self.packed < other.packed
    }

    /// Whether this value comes after the other one. Offsets are ignored.
    pub fn is_after(self, other: Self) -> bool {
        self.packed > other.packed
    }
}

impl Default for BitDateTime {
    fn default() -> Self {
        Self::empty()
    }
}


pub fn to_absolute_year(relative: u32) -> i64 {
    i64::from(relative) - RELATIVE_YEAR_OFFSET
}

/// Converts a year counted from year zero into a relative year, if it’s in
/// the range the encoding can hold.
///
/// ### Examples
///
/// ```
/// use bitdt::packed::from_absolute_year;
///
/// assert_eq!(from_absolute_year(2024), Some(52_024));
/// assert_eq!(from_absolute_year(-50_000), Some(0));
/// assert_eq!(from_absolute_year(-50_001), None);
/// ```
pub fn from_absolute_year(absolute: i64) -> Option<u32> {
    let relative = absolute.checked_add(RELATIVE_YEAR_OFFSET)?;

    if relative >= 0 && relative <= i64::from(MAX_YEAR) {
        Some(relative as u32)
    }
    else {
        None
    }
}


/// Sorts values by their packed integers, which puts them in date order.
pub fn sort_by_packed(values: &mut [BitDateTime]) {
    values.sort_by_key(|value| value.packed());
}

pub fn to_packed_values(values: &[BitDateTime]) -> Vec<u64> {
    values.iter().map(|value| value.packed()).collect()
}

/// Reads a list of packed integers back into values. Returns `None` if
/// any of them has an unknown date type tag.
pub fn from_packed_values(packed: &[u64]) -> Option<Vec<BitDateTime>> {
    packed.iter().map(|&p| BitDateTime::from_packed(p)).collect()
}
