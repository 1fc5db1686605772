//! Converting epoch timestamps, in milliseconds, to and from text.
//!
//! A timestamp can be written out either as a plain number in some base,
//! or as a fully encoded date-time with a timezone suffix. Reading text
//! back in, the format can be given explicitly or left for this module to
//! guess.
//!
//! ```
//! use bitdt::epoch::{self, Mode};
//!
//! let stamp = 1_718_323_456_789;
//!
//! let text = epoch::to_text(stamp, None, Mode::Auto);
//! assert_eq!(text, "LXDXF4T1");
//! assert_eq!(epoch::from_text(&text, None), Some(stamp));
//!
//! let text = epoch::to_text(stamp, Some("+0530"), Mode::Auto);
//! assert_eq!(text, "N81FNGiQpO+0530");
//! assert_eq!(epoch::from_text(&text, None), Some(stamp));
//! ```

use std::iter;

use log::{debug, trace};

use crate::cal::CivilDateTime;
use crate::codec::{self, EMPTY_TEXT};
use crate::offset::Offset;
use crate::packed::{from_absolute_year, BitDateTime, Fields};
use crate::radix;
use crate::system::now_millis;


/// The base plain numbers are written in, unless told otherwise.
pub const AUTO_BASE: u32 = 36;

/// Bases to try, in order, when the guessed base doesn’t work.
const FALLBACK_BASES: [u32; 4] = [ 36, 32, 16, 10 ];

/// Timezones that count as UTC in automatic mode.
const UTC_ALIASES: [&str; 4] = [ "UTC", "+00", "Z", "+0000" ];

const MIN_BASE_ENCODED_LENGTH: usize = 6;
const MAX_BASE_ENCODED_LENGTH: usize = 12;


/// How to write a timestamp out.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub enum Mode {

    /// As a base-36 number when there’s no timezone (or it’s UTC), and as
    /// a fully encoded date-time otherwise.
    Auto,

    /// As a number in the given base. Bases outside 2 to 36 fall back to
    /// automatic mode.
    Base(u32),

    /// As a fully encoded date-time.
    Full,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Auto
    }
}


/// Writes a timestamp out as text.
///
/// The timezone can be `UTC`, `Z`, or a numeric offset in the form `±HH`,
/// `±HHMM`, or `±HH:MM`. Anything else is treated as UTC. Returns the empty
/// text `&` if the timestamp can’t be written in the chosen mode.
///
/// The colon form shifts the clock fields but writes no suffix, as the
/// suffix only has room for `±HH` and `±HHMM`. Such text reads back as the
/// local time in UTC.
pub fn to_text(epoch_millis: i64, timezone: Option<&str>, mode: Mode) -> String {
    match mode {
        Mode::Full => {
            to_full_text(epoch_millis, timezone)
        }
        Mode::Base(base) if radix::is_supported(base) => {
            to_base_text(epoch_millis, base)
        }
        Mode::Base(base) => {
            trace!("Base {} is unsupported, using automatic mode", base);
            to_auto_text(epoch_millis, timezone)
        }
        Mode::Auto => {
            to_auto_text(epoch_millis, timezone)
        }
    }
}

fn to_auto_text(epoch_millis: i64, timezone: Option<&str>) -> String {
    match timezone {
        Some(tz) if !is_utc_alias(tz) => to_full_text(epoch_millis, Some(tz)),
        _ => to_base_text(epoch_millis, AUTO_BASE),
    }
}

fn is_utc_alias(timezone: &str) -> bool {
    UTC_ALIASES.iter().any(|&alias| alias == timezone)
}

fn to_base_text(epoch_millis: i64, base: u32) -> String {
    radix::render(epoch_millis, base).unwrap_or_else(|| EMPTY_TEXT.to_string())
}

fn to_full_text(epoch_millis: i64, timezone: Option<&str>) -> String {
    // the clock fields follow the lenient offset, the suffix the strict one
    let shift = parse_timezone(timezone);
    let suffix = timezone.map(Offset::parse_suffix).unwrap_or_default();

    match BitDateTime::at_epoch_millis(epoch_millis, shift) {
        Some(value) => codec::encode(value.with_offset(suffix)),
        None => {
            debug!("Timestamp {} is outside the encodable years", epoch_millis);
            EMPTY_TEXT.to_string()
        }
    }
}


/// Reads a timestamp back in from text.
///
/// With a base from 2 to 36, the text must be a number in that base. With
/// any other base, it must be a fully encoded date-time. With no base at
/// all, text that looks like a number gets its base guessed, with the
/// other common bases and then full decoding as fallbacks.
///
/// Returns `None` if nothing works.
pub fn from_text(text: &str, base: Option<u32>) -> Option<i64> {
    if text.is_empty() {
        return None;
    }

    match base {
        Some(base) if radix::is_supported(base) => radix::parse(text, base),
        Some(_)                                 => from_full_text(text),
        None if is_base_encoded(text)           => from_guessed_base(text),
        None                                    => from_full_text(text),
    }
}

fn from_guessed_base(text: &str) -> Option<i64> {
    let guess = guess_base(text);

    iter::once(guess)
        .chain(FALLBACK_BASES.iter().copied().filter(|&base| base != guess))
        .find_map(|base| radix::parse(text, base))
        .or_else(|| from_full_text(text))
}

fn from_full_text(text: &str) -> Option<i64> {
    let value = codec::decode(text);

    if value.is_empty() {
        debug!("{:?} is neither a number nor an encoded date-time", text);
        return None;
    }

    value.to_epoch_millis()
}

/// Whether the text looks like a number written out by this module: six
/// to twelve digits and upper-case letters.
pub fn is_base_encoded(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        && text.len() >= MIN_BASE_ENCODED_LENGTH
        && text.len() <= MAX_BASE_ENCODED_LENGTH
}

/// Guesses which base a number was written in from the letters it uses.
///
/// ### Examples
///
/// ```
/// use bitdt::epoch::guess_base;
///
/// assert_eq!(guess_base("LXDXF4T1"), 36);     // W to Z only appear in base 36
/// assert_eq!(guess_base("1I0A0UAOL"), 32);    // G to V don’t appear in hex
/// assert_eq!(guess_base("190140F2B15"), 16);
/// ```
pub fn guess_base(text: &str) -> u32 {
    if text.chars().any(|c| ('W' ..= 'Z').contains(&c)) {
        36
    }
    else if text.chars().any(|c| ('G' ..= 'V').contains(&c)) {
        32
    }
    else if text.chars().all(|c| c.is_ascii_digit() || ('A' ..= 'F').contains(&c)) {
        16
    }
    else {
        36
    }
}


/// Returns the current time as text, in automatic mode in UTC.
pub fn now() -> String {
    to_text(now_millis(), None, Mode::Auto)
}

/// Returns the current time as text, with the given timezone and mode.
pub fn now_with(timezone: Option<&str>, mode: Mode) -> String {
    to_text(now_millis(), timezone, mode)
}


/// Reads a timezone for a timestamp. This is more lenient than the suffix
/// of encoded text, as it also accepts `±HH:MM`.
fn parse_timezone(timezone: Option<&str>) -> Offset {
    let tz = match timezone {
        None | Some("UTC") | Some("Z") => return Offset::utc(),
        Some(tz) => tz,
    };

    let digits = match (tz.len(), tz.get(3 .. 4)) {
        (3, _)          => tz.get(1 .. 3).map(|h| (h, "00")),
        (5, _)          => tz.get(1 .. 3).zip(tz.get(3 .. 5)),
        (6, Some(":"))  => tz.get(1 .. 3).zip(tz.get(4 .. 6)),
        _               => None,
    };

    let sign = match tz.chars().next() {
        Some('+') => 1,
        Some('-') => -1,
        _         => 0,
    };

    let minutes = digits
        .filter(|_| sign != 0)
        .and_then(|(h, m)| Some(number(h)? * 60 + number(m)?))
        .map(|minutes| minutes * sign);

    match minutes.map(Offset::of_minutes) {
        Some(Ok(offset)) => offset,
        _ => {
            debug!("Unrecognised timezone {:?}, using UTC", tz);
            Offset::utc()
        }
    }
}

fn number(digits: &str) -> Option<i32> {
    if digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse().ok()
    }
    else {
        None
    }
}


impl BitDateTime {

    /// The date-time at a timestamp, as seen at the given offset from UTC.
    /// Returns `None` if the year is outside the encodable range.
    pub fn at_epoch_millis(epoch_millis: i64, offset: Offset) -> Option<Self> {
        let local = epoch_millis.checked_add(offset.total_milliseconds())?;
        let civil = CivilDateTime::at_ms(local);
        let year = from_absolute_year(civil.year)?;

        let fields = Fields::date(year, civil.month, civil.day)
                            .with_time(civil.hour, civil.minute, civil.second, civil.millisecond);
        Self::new(fields, offset).ok()
    }

    /// The timestamp of this date-time at its offset from UTC.
    ///
    /// Missing fields are filled in: the current year, January, the 1st,
    /// and midnight. Returns `None` for the empty value, or for a date that
    /// doesn’t exist, such as the 30th of February.
    pub fn to_epoch_millis(self) -> Option<i64> {
        if self.is_empty() {
            return None;
        }

        let year = match self.absolute_year() {
            Some(year) => year,
            None       => CivilDateTime::now().year,
        };

        let civil = CivilDateTime {
            year,
            month:       self.month().unwrap_or(0),
            day:         self.day().unwrap_or(1),
            hour:        self.hour().unwrap_or(0),
            minute:      self.minute().unwrap_or(0),
            second:      self.second().unwrap_or(0),
            millisecond: self.millisecond().unwrap_or(0),
        };

        match civil.to_epoch_millis() {
            Ok(local) => local.checked_sub(self.offset().total_milliseconds()),
            Err(e) => {
                debug!("{:?} is not a calendar date ({})", civil, e);
                None
            }
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;

    const STAMP: i64 = 1_718_323_456_789;

    #[test]
    fn auto_is_base_36() {
        assert_eq!(to_text(STAMP, None, Mode::Auto), "LXDXF4T1");
        assert_eq!(to_text(STAMP, None, Mode::Auto), to_text(STAMP, None, Mode::Base(36)));
    }

    #[test]
    fn utc_aliases() {
        for &tz in UTC_ALIASES.iter() {
            assert_eq!(to_text(STAMP, Some(tz), Mode::Auto), "LXDXF4T1");
        }
    }

    #[test]
    fn auto_with_timezone_is_full() {
        assert_eq!(to_text(STAMP, Some("+0530"), Mode::Auto), "N81FNGiQpO+0530");
    }

    #[test]
    fn colon_timezone_shifts_without_a_suffix() {
        assert_eq!(to_text(STAMP, Some("+05:30"), Mode::Auto), "N81FNGiQpO");
        assert_eq!(to_text(STAMP, Some("+05:30"), Mode::Full), "N81FNGiQpO");
        assert_eq!(from_text("N81FNGiQpO", None), Some(STAMP + 19_800_000));
    }

    #[test]
    fn bad_base_means_auto() {
        assert_eq!(to_text(STAMP, None, Mode::Base(1)), "LXDXF4T1");
        assert_eq!(to_text(STAMP, None, Mode::Base(37)), "LXDXF4T1");
    }

    #[test]
    fn full_mode_in_utc() {
        let text = to_text(STAMP, None, Mode::Full);
        assert_eq!(from_text(&text, None), Some(STAMP));
        assert!(!text.contains('+'));
    }

    #[test]
    fn timezones() {
        assert_eq!(parse_timezone(None), Offset::utc());
        assert_eq!(parse_timezone(Some("Z")), Offset::utc());
        assert_eq!(parse_timezone(Some("+08")).quarter_hours(), 32);
        assert_eq!(parse_timezone(Some("-0330")).quarter_hours(), -14);
        assert_eq!(parse_timezone(Some("-03:30")).quarter_hours(), -14);
        assert_eq!(parse_timezone(Some("+24:00")).quarter_hours(), 96);
    }

    #[test]
    fn unrecognised_timezones() {
        assert!(parse_timezone(Some("Europe/London")).is_utc());
        assert!(parse_timezone(Some("+25")).is_utc());
        assert!(parse_timezone(Some("0530")).is_utc());
        assert!(parse_timezone(Some("+05-30")).is_utc());
        assert!(parse_timezone(Some("+0a")).is_utc());
    }

    #[test]
    fn guesses() {
        assert_eq!(guess_base("123456"), 16);
        assert_eq!(guess_base("ABCDEF"), 16);
        assert_eq!(guess_base("GHIJKL"), 32);
        assert_eq!(guess_base("GHIJKW"), 36);
    }

    #[test]
    fn base_encoded() {
        assert!(is_base_encoded("LXDXF4T1"));
        assert!(is_base_encoded("123456"));
        assert!(!is_base_encoded("12345"));
        assert!(!is_base_encoded("1234567890123"));
        assert!(!is_base_encoded("lxdxf4t1"));
        assert!(!is_base_encoded("N81FN;"));
    }

    #[test]
    fn explicit_bases() {
        assert_eq!(from_text("LXDXF4T1", Some(36)), Some(STAMP));
        assert_eq!(from_text("lxdxf4t1", Some(36)), Some(STAMP));
        assert_eq!(from_text("1718323456789", Some(10)), Some(STAMP));
        assert_eq!(from_text("XYZ", Some(16)), None);
    }

    #[test]
    fn out_of_range_base_means_full_decode() {
        assert_eq!(from_text("N81FNGiQpO+0530", Some(0)), Some(STAMP));
        assert_eq!(from_text("N81FNGiQpO+0530", Some(99)), Some(STAMP));
    }

    #[test]
    fn guessed_bases() {
        assert_eq!(from_text("1I0A0UAOL", None), Some(STAMP));
        assert_eq!(from_text("190140F2B15", None), Some(STAMP));
    }

    #[test]
    fn nothing_works() {
        assert_eq!(from_text("", None), None);
        assert_eq!(from_text("&", None), None);
        assert_eq!(from_text("hello, world", None), None);
    }

    #[test]
    fn impossible_dates() {
        // the 30th of February
        let value = BitDateTime::new(Fields::date(52_024, 1, 30), Offset::utc()).unwrap();
        assert_eq!(value.to_epoch_millis(), None);
    }

    #[test]
    fn date_only_is_midnight() {
        let value = BitDateTime::date(52_024, 5, 14).unwrap();
        assert_eq!(value.to_epoch_millis(), Some(1_718_323_200_000));
    }

    #[test]
    fn offsets_move_the_instant() {
        let utc = BitDateTime::date(52_024, 5, 14).unwrap();
        let east = utc.with_offset(Offset::of_quarter_hours(4).unwrap());
        assert_eq!(utc.to_epoch_millis().unwrap() - east.to_epoch_millis().unwrap(), 3_600_000);
    }

    #[test]
    fn unencodable_years() {
        assert_eq!(to_text(i64::MAX, None, Mode::Full), EMPTY_TEXT);
        assert_eq!(BitDateTime::at_epoch_millis(i64::MIN, Offset::utc()), None);
    }

    #[test]
    fn default_mode() {
        assert_eq!(Mode::default(), Mode::Auto);
    }
}
