//! Turning values into encoded text, and back again.
//!
//! The encoded text is the seven fields in order, each spelled out in its
//! own alphabet (or as `0` when the date type leaves it out), with runs of
//! zeros compressed and the timezone suffix stuck on the end.
//!
//! Neither direction ever fails outright. `encode` falls back to the empty
//! text `&` and `decode` falls back to the empty value; use `try_encode`
//! and `try_decode` to find out what went wrong.

use std::error::Error as ErrorTrait;
use std::fmt;

use log::debug;

use crate::alphabet::{self, Field, RangeError};
use crate::offset::{split_suffix, Offset};
use crate::packed::{BitDateTime, DateType, Fields};
use crate::zeros::{self, ZERO};


/// The encoding of the empty value: a single seven-zero marker.
pub const EMPTY_TEXT: &str = "&";

/// Encoded text shorter than this, once its zeros are expanded, can’t hold
/// all seven fields.
const MIN_EXPANDED_LENGTH: usize = 7;

/// Compressed text shorter than this has to start with a zero to stand any
/// chance of expanding far enough.
const MIN_COMPRESSED_LENGTH: usize = 3;


/// Encodes a value, returning the empty text `&` if any of its fields has
/// no character in its alphabet.
///
/// ### Examples
///
/// ```
/// use bitdt::{BitDateTime, Fields, Offset};
/// use bitdt::codec::encode;
///
/// let fields = Fields::date(52_024, 5, 14).with_time(9, 0, 0, 0);
/// let offset = Offset::of_quarter_hours(-20).unwrap();
/// let value = BitDateTime::new(fields, offset).unwrap();
/// assert_eq!(encode(value), "N81FNL:-05");
/// ```
pub fn encode(value: BitDateTime) -> String {
    try_encode(value).unwrap_or_else(|e| {
        debug!("Encoding {:#x} failed ({}), writing empty text", value.packed(), e);
        EMPTY_TEXT.to_string()
    })
}

/// Encodes a value, or returns the first field that has no character in
/// its alphabet. Only values put together with `from_raw_parts` can fail.
pub fn try_encode(value: BitDateTime) -> Result<String, RangeError> {
    let date_type = value.date_type();
    if date_type == DateType::Empty {
        return Ok(EMPTY_TEXT.to_string());
    }

    let fields = value.fields();
    let mut text = String::with_capacity(10);

    if date_type.has_date() {
        text.push_str(&alphabet::encode_year(fields.year)?);
        text.push(alphabet::encode_month(fields.month)?);
        text.push(alphabet::encode_day(fields.day)?);
    }
    else {
        text.push_str("000");
    }

    if date_type.has_hour() {
        text.push(alphabet::encode_hour(fields.hour)?);
    }
    else {
        text.push(ZERO);
    }

    if date_type.has_clock() {
        text.push(alphabet::encode_minute(fields.minute)?);
        text.push(alphabet::encode_second(fields.second)?);

        if fields.millisecond == 0 {
            text.push(ZERO);
        }
        else {
            text.push_str(&alphabet::encode_milliseconds(fields.millisecond)?);
        }
    }
    else {
        text.push_str("000");
    }

    let mut encoded = zeros::compress(&text);
    if let Some(suffix) = value.timezone() {
        encoded.push_str(&suffix);
    }

    Ok(encoded)
}


/// Decodes encoded text, returning the empty value if the text isn’t
/// valid.
///
/// ### Examples
///
/// ```
/// use bitdt::codec::decode;
///
/// let value = decode("N81FNGiQpO+0530");
/// assert_eq!(value.absolute_year(), Some(2024));
/// assert_eq!(value.millisecond(), Some(789));
/// assert_eq!(value.timezone(), Some("+0530".to_string()));
///
/// assert!(decode("not a date").is_empty());
/// ```
pub fn decode(text: &str) -> BitDateTime {
    try_decode(text).unwrap_or_else(|e| {
        debug!("Decoding {:?} failed ({}), using empty value", text, e);
        BitDateTime::empty()
    })
}

/// Decodes encoded text, or explains why it isn’t valid.
///
/// The date type isn’t taken from the text: it gets worked out again from
/// whichever fields turn out to be present. A year or month without a day
/// is a failure, as there’s no day zero to pack it with.
pub fn try_decode(text: &str) -> Result<BitDateTime, DecodeError> {
    let (body, suffix) = split_suffix(text);
    let offset = suffix.map(Offset::parse_suffix).unwrap_or_default();

    if body.is_empty() {
        return Err(DecodeError::Empty);
    }

    if body == EMPTY_TEXT {
        return Ok(BitDateTime::empty());
    }

    if body.chars().count() < MIN_COMPRESSED_LENGTH && !body.starts_with(ZERO) {
        return Err(DecodeError::TooShort);
    }

    let expanded = zeros::expand(body);
    if expanded.chars().count() < MIN_EXPANDED_LENGTH {
        return Err(DecodeError::TooShort);
    }

    if let Some(c) = expanded.chars().find(|&c| !alphabet::is_field_char(c) && !zeros::is_marker(c)) {
        return Err(DecodeError::InvalidCharacter(c));
    }

    let mut cursor = Cursor { rest: &expanded };
    let year        = cursor.code(Field::Year, 3, alphabet::decode_year)?;
    let month       = cursor.single(Field::Month, alphabet::decode_month)?;
    let day         = cursor.single(Field::Day, alphabet::decode_day)?;
    let hour        = cursor.single(Field::Hour, alphabet::decode_hour)?;
    let minute      = cursor.single(Field::Minute, alphabet::decode_sexagesimal)?;
    let second      = cursor.single(Field::Second, alphabet::decode_sexagesimal)?;
    let millisecond = cursor.code(Field::Millisecond, 2, alphabet::decode_milliseconds)?;

    let all = [ year, month, day, hour, minute, second, millisecond ];
    if all.iter().all(Option::is_none) {
        return Ok(BitDateTime::empty());
    }

    let fields = Fields {
        year:        year.unwrap_or(0),
        month:       month.unwrap_or(0),
        day:         day.unwrap_or(0),
        hour:        hour.unwrap_or(0),
        minute:      minute.unwrap_or(0),
        second:      second.unwrap_or(0),
        millisecond: millisecond.unwrap_or(0),
    };

    BitDateTime::new(fields, offset).map_err(DecodeError::Range)
}


/// Walks through expanded text one field at a time. Running out of text
/// leaves the remaining fields absent.
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {

    fn single(&mut self, field: Field, decode: fn(char) -> Option<u32>) -> Result<Option<u32>, DecodeError> {
        let mut chars = self.rest.chars();
        let c = match chars.next() {
            Some(c) => c,
            None    => return Ok(None),
        };
        self.rest = chars.as_str();

        if c == ZERO {
            return Ok(None);
        }

        match decode(c) {
            Some(value) => Ok(Some(value)),
            None        => Err(DecodeError::UnknownSymbol { field, symbol: c.to_string() }),
        }
    }

    fn code(&mut self, field: Field, width: usize, decode: fn(&str) -> Option<u32>) -> Result<Option<u32>, DecodeError> {
        match self.rest.chars().next() {
            None => return Ok(None),
            Some(ZERO) => {
                self.rest = &self.rest[ZERO.len_utf8() ..];
                return Ok(None);
            }
            Some(_) => {},
        }

        let end = match self.rest.char_indices().nth(width) {
            Some((index, _)) => index,
            None if self.rest.chars().count() == width => self.rest.len(),
            None => return Err(DecodeError::Truncated(field)),
        };

        let code = &self.rest[.. end];
        self.rest = &self.rest[end ..];

        match decode(code) {
            Some(value) => Ok(Some(value)),
            None        => Err(DecodeError::UnknownSymbol { field, symbol: code.to_string() }),
        }
    }
}


impl BitDateTime {

    /// Encodes this value. See `codec::encode`.
    pub fn encode(self) -> String {
        encode(self)
    }

    /// Decodes encoded text. See `codec::decode`.
    pub fn decode(text: &str) -> Self {
        decode(text)
    }
}


/// Why a piece of text couldn’t be decoded.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum DecodeError {

    /// There was nothing left once the timezone suffix was taken off.
    Empty,

    /// The text is too short to hold all seven fields.
    TooShort,

    /// The text contains a character that isn’t in any alphabet, and isn’t
    /// a zero marker either.
    InvalidCharacter(char),

    /// A field’s characters aren’t in that field’s alphabet.
    UnknownSymbol { field: Field, symbol: String },

    /// The text ends partway through a multi-character field.
    Truncated(Field),

    /// The fields decoded, but don’t make a valid value.
    Range(RangeError),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DecodeError::Empty                  => write!(f, "no fields before the timezone suffix"),
            DecodeError::TooShort               => write!(f, "too short to hold every field"),
            DecodeError::InvalidCharacter(c)    => write!(f, "invalid character {:?}", c),
            DecodeError::UnknownSymbol { field, ref symbol } => write!(f, "{:?} is not a valid {}", symbol, field),
            DecodeError::Truncated(field)       => write!(f, "text ends partway through the {}", field),
            DecodeError::Range(ref e)           => write!(f, "decoded an invalid value: {}", e),
        }
    }
}

impl ErrorTrait for DecodeError {
    fn source(&self) -> Option<&(dyn ErrorTrait + 'static)> {
        match *self {
            DecodeError::Range(ref e)  => Some(e),
            _                          => None,
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;

    fn full(y: u32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32, quarters: i32) -> BitDateTime {
        let offset = Offset::of_quarter_hours(quarters).unwrap();
        BitDateTime::new(Fields::date(y, mo, d).with_time(h, mi, s, ms), offset).unwrap()
    }

    #[test]
    fn full_value() {
        assert_eq!(encode(full(50_000, 0, 1, 12, 30, 45, 123, 0)), "NapAAOetGX");
    }

    #[test]
    fn full_value_with_offset() {
        assert_eq!(encode(full(52_024, 5, 14, 5, 34, 16, 789, 22)), "N81FNGiQpO+0530");
    }

    #[test]
    fn date_only() {
        assert_eq!(encode(BitDateTime::date(52_024, 5, 14).unwrap()), "N81FN;");
    }

    #[test]
    fn time_only() {
        assert_eq!(encode(BitDateTime::time(12, 0, 0, 0).unwrap()), ":OAA0");
        assert_eq!(encode(BitDateTime::time(0, 0, 0, 5).unwrap()), ":BAABF");
        assert_eq!(encode(BitDateTime::time(0, 1, 0, 0).unwrap()), ":BBA0");
    }

    #[test]
    fn date_hour() {
        assert_eq!(encode(full(52_024, 5, 14, 9, 0, 0, 0, 0)), "N81FNL:");
        assert_eq!(encode(full(52_024, 5, 14, 9, 30, 0, 0, -14)), "N81FNLeA0-0330");
    }

    #[test]
    fn first_day_of_year_zero() {
        assert_eq!(encode(BitDateTime::date(0, 0, 1).unwrap()), "AAAAA;");
    }

    #[test]
    fn largest_value() {
        assert_eq!(encode(full(226_980, 11, 32, 23, 59, 59, 999, 96)), "999L6Z88yY+24");
    }

    #[test]
    fn empty_value() {
        assert_eq!(encode(BitDateTime::empty()), EMPTY_TEXT);
        assert_eq!(decode(EMPTY_TEXT), BitDateTime::empty());
        assert_eq!(try_decode(EMPTY_TEXT), Ok(BitDateTime::empty()));
    }

    #[test]
    fn unencodable_raw_parts() {
        let month_twelve = 12 << 40;
        let value = BitDateTime::from_raw_parts(month_twelve, Offset::utc(), DateType::DateOnly);
        assert_eq!(try_encode(value).unwrap_err().field, Field::Month);
        assert_eq!(encode(value), EMPTY_TEXT);
    }

    #[test]
    fn decode_full() {
        let value = decode("N81FNGiQpO+0530");
        assert_eq!(value, full(52_024, 5, 14, 5, 34, 16, 789, 22));
    }

    #[test]
    fn decode_reclassifies() {
        let value = decode("N81FNL:");
        assert_eq!(value.date_type(), DateType::DateHour);
        assert_eq!(value.hour(), Some(9));

        // every clock field written out, but all zero
        let value = decode("N81FNLAA0");
        assert_eq!(value.date_type(), DateType::DateHour);
    }

    #[test]
    fn decode_time_only() {
        let value = decode(":OAA0");
        assert_eq!(value.date_type(), DateType::TimeOnly);
        assert_eq!(value.year(), None);
        assert_eq!(value.hour(), Some(12));
    }

    #[test]
    fn decode_rejections() {
        assert_eq!(try_decode(""), Err(DecodeError::Empty));
        assert_eq!(try_decode("+05"), Err(DecodeError::Empty));
        assert_eq!(try_decode("AB"), Err(DecodeError::TooShort));
        assert_eq!(try_decode("ABC"), Err(DecodeError::TooShort));
        assert_eq!(try_decode("N81FN#"), Err(DecodeError::TooShort));
        assert_eq!(try_decode("N81FN;#"), Err(DecodeError::InvalidCharacter('#')));
    }

    #[test]
    fn decode_unknown_symbols() {
        assert_eq!(try_decode("N81MN;"), Err(DecodeError::UnknownSymbol { field: Field::Month, symbol: "M".into() }));
        assert_eq!(try_decode("N81FNAAA0"), Err(DecodeError::UnknownSymbol { field: Field::Hour, symbol: "A".into() }));
        assert_eq!(try_decode("N81FNLAAAA"), Err(DecodeError::UnknownSymbol { field: Field::Millisecond, symbol: "AA".into() }));
    }

    #[test]
    fn decode_truncated() {
        assert_eq!(try_decode("N81FNLAAB"), Err(DecodeError::Truncated(Field::Millisecond)));
    }

    #[test]
    fn decode_runs_out() {
        let value = decode("N81FNLAA");
        assert_eq!(value.date_type(), DateType::DateHour);
    }

    #[test]
    fn decode_ignores_trailing_characters() {
        assert_eq!(decode("N81FNGiQpOAB"), decode("N81FNGiQpO"));
    }

    #[test]
    fn decode_garbage() {
        assert!(decode("hello, world").is_empty());
        assert!(decode("&&&&").is_empty());
        assert!(decode("0000000").is_empty());
    }

    #[test]
    fn decode_range_error() {
        // a date with no day
        assert_eq!(try_decode("N81F0:0").unwrap_err(), DecodeError::Range(RangeError { field: Field::Day, value: 0 }));
    }

    #[test]
    fn colon_suffix_is_not_a_timezone() {
        assert_eq!(try_decode("N81FN;+05:30"), Err(DecodeError::InvalidCharacter('+')));
    }

    #[test]
    fn lone_sign_suffix() {
        let value = decode("N81FN;-");
        assert_eq!(value, BitDateTime::date(52_024, 5, 14).unwrap());
    }

    #[test]
    fn methods() {
        let value = full(52_024, 5, 14, 9, 30, 0, 0, -14);
        assert_eq!(BitDateTime::decode(&value.encode()), value);
    }

    #[test]
    fn error_messages() {
        assert_eq!(DecodeError::Truncated(Field::Millisecond).to_string(), "text ends partway through the millisecond");
        assert_eq!(DecodeError::UnknownSymbol { field: Field::Hour, symbol: "A".into() }.to_string(), "\"A\" is not a valid hour");
    }
}
