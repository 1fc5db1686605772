//! The character sets used to spell out each date-time field.
//!
//! Every field gets its own ordered alphabet, and a field value is simply
//! the position of its character in that alphabet. Years take three
//! characters (a base-61 number) and milliseconds take two; every other
//! field fits in a single character.
//!
//! None of these alphabets contain the digit `0`, the zero-run markers, or
//! the `+` and `-` signs, so those characters are free to mean “absent
//! field” and “timezone suffix” in the encoded text.

use std::error::Error as ErrorTrait;
use std::fmt;


/// Months, with January at position 0.
pub const MONTHS: &[u8; 12] = b"ABCDEFGHIJKL";

/// Days of the month. The character at position `n` is day `n + 1`.
pub const DAYS: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ123456";

/// Hours of the day. This deliberately skips `A` and `I`.
pub const HOURS: &[u8; 24] = b"BCDEFGHJKLMNOPQRSTUVWXYZ";

/// Minutes and seconds share this sixty-character alphabet.
pub const SEXAGESIMAL: &[u8; 60] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz12345678";

/// The digits of a base-61 year number.
pub const YEAR_DIGITS: &[u8; 61] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz123456789";

/// The first millisecond character counts whole blocks of 25 milliseconds.
/// Only the first 40 positions are ever produced.
pub const MILLIS_HIGH: &[u8; 41] = b"BCDFGHJKLNPQRSTVWXYZbcdfghjklmnpqrstvwxyz";

/// The second millisecond character counts the milliseconds left over
/// within a block of 25.
pub const MILLIS_LOW: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The largest relative year that fits in three base-61 digits (61³ − 1).
pub const MAX_YEAR: u32 = 61 * 61 * 61 - 1;

/// The largest millisecond value that can be encoded.
pub const MAX_MILLISECOND: u32 = 999;

const MILLIS_BLOCK: u32 = 25;
const YEAR_BASE: u32 = 61;


/// One of the seven date-time fields, in the order they’re written.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum Field {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl Field {

    /// The smallest value this field can hold when it’s present.
    pub fn min(self) -> u32 {
        match self {
            Field::Day => 1,
            _          => 0,
        }
    }

    /// The largest value this field can hold.
    pub fn max(self) -> u32 {
        match self {
            Field::Year         => MAX_YEAR,
            Field::Month        => MONTHS.len() as u32 - 1,
            Field::Day          => DAYS.len() as u32,
            Field::Hour         => HOURS.len() as u32 - 1,
            Field::Minute       => SEXAGESIMAL.len() as u32 - 1,
            Field::Second       => SEXAGESIMAL.len() as u32 - 1,
            Field::Millisecond  => MAX_MILLISECOND,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Field::Year         => "year",
            Field::Month        => "month",
            Field::Day          => "day",
            Field::Hour         => "hour",
            Field::Minute       => "minute",
            Field::Second       => "second",
            Field::Millisecond  => "millisecond",
        }
    }

    pub(crate) fn check(self, value: u32) -> Result<u32, RangeError> {
        if value >= self.min() && value <= self.max() {
            Ok(value)
        }
        else {
            Err(RangeError { field: self, value })
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}


/// A field value that has no character in its alphabet.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct RangeError {
    pub field: Field,
    pub value: u32,
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} value {} out of range (must be between {} and {})",
               self.field, self.value, self.field.min(), self.field.max())
    }
}

impl ErrorTrait for RangeError {
}


fn symbol(alphabet: &[u8], index: u32) -> char {
    char::from(alphabet[index as usize])
}

fn position(alphabet: &[u8], c: char) -> Option<u32> {
    if !c.is_ascii() {
        return None;
    }

    alphabet.iter()
            .position(|&b| char::from(b) == c)
            .map(|index| index as u32)
}


pub fn encode_month(month: u32) -> Result<char, RangeError> {
    Field::Month.check(month).map(|m| symbol(MONTHS, m))
}

pub fn decode_month(c: char) -> Option<u32> {
    position(MONTHS, c)
}

/// Encodes a day of the month, from 1 to 32.
pub fn encode_day(day: u32) -> Result<char, RangeError> {
    Field::Day.check(day).map(|d| symbol(DAYS, d - 1))
}

/// Decodes a day character back into a day of the month, from 1 to 32.
pub fn decode_day(c: char) -> Option<u32> {
    position(DAYS, c).map(|index| index + 1)
}

pub fn encode_hour(hour: u32) -> Result<char, RangeError> {
    Field::Hour.check(hour).map(|h| symbol(HOURS, h))
}

pub fn decode_hour(c: char) -> Option<u32> {
    position(HOURS, c)
}

pub fn encode_minute(minute: u32) -> Result<char, RangeError> {
    Field::Minute.check(minute).map(|m| symbol(SEXAGESIMAL, m))
}

pub fn encode_second(second: u32) -> Result<char, RangeError> {
    Field::Second.check(second).map(|s| symbol(SEXAGESIMAL, s))
}

/// Decodes a minute or second character.
pub fn decode_sexagesimal(c: char) -> Option<u32> {
    position(SEXAGESIMAL, c)
}

/// Encodes a relative year as three base-61 digits, most significant
/// digit first.
///
/// ### Examples
///
/// ```
/// use bitdt::alphabet::encode_year;
///
/// assert_eq!(encode_year(0).unwrap(), "AAA");
/// assert_eq!(encode_year(226_980).unwrap(), "999");
/// assert!(encode_year(226_981).is_err());
/// ```
pub fn encode_year(year: u32) -> Result<String, RangeError> {
    let year = Field::Year.check(year)?;

    Ok([ year / (YEAR_BASE * YEAR_BASE),
         year / YEAR_BASE % YEAR_BASE,
         year % YEAR_BASE ]
        .iter()
        .map(|&digit| symbol(YEAR_DIGITS, digit))
        .collect())
}

/// Decodes a three-character year code. Returns `None` if the code has the
/// wrong length or contains a character outside the year alphabet.
pub fn decode_year(code: &str) -> Option<u32> {
    let mut chars = code.chars();
    let mut year = 0;

    for _ in 0 .. 3 {
        let digit = position(YEAR_DIGITS, chars.next()?)?;
        year = year * YEAR_BASE + digit;
    }

    match chars.next() {
        Some(_) => None,
        None    => Some(year),
    }
}

/// Encodes a millisecond value, from 0 to 999, as two characters.
///
/// ### Examples
///
/// ```
/// use bitdt::alphabet::{encode_milliseconds, decode_milliseconds};
///
/// let code = encode_milliseconds(789).unwrap();
/// assert_eq!(code, "pO");
/// assert_eq!(decode_milliseconds(&code), Some(789));
/// assert!(encode_milliseconds(1000).is_err());
/// ```
pub fn encode_milliseconds(millis: u32) -> Result<String, RangeError> {
    let millis = Field::Millisecond.check(millis)?;

    let mut code = String::with_capacity(2);
    code.push(symbol(MILLIS_HIGH, millis / MILLIS_BLOCK));
    code.push(symbol(MILLIS_LOW, millis % MILLIS_BLOCK));
    Ok(code)
}

/// Decodes a two-character millisecond code.
pub fn decode_milliseconds(code: &str) -> Option<u32> {
    let mut chars = code.chars();
    let high = position(MILLIS_HIGH, chars.next()?)?;
    let low  = position(MILLIS_LOW, chars.next()?)?;

    if chars.next().is_some() {
        return None;
    }

    Some(high * MILLIS_BLOCK + low)
}

/// Returns whether the character belongs to any field alphabet.
pub fn is_field_char(c: char) -> bool {
    [ &MONTHS[..], &DAYS[..], &HOURS[..], &SEXAGESIMAL[..],
      &YEAR_DIGITS[..], &MILLIS_HIGH[..], &MILLIS_LOW[..] ]
        .iter()
        .any(|alphabet| position(alphabet, c).is_some())
}
