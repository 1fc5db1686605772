//! Signed integers written out in any base from 2 to 36.
//!
//! Digits above 9 are the upper-case letters. Parsing accepts either case.

use num_traits::{Num, NumCast, PrimInt, Signed};


const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;


pub fn is_supported(base: u32) -> bool {
    base >= MIN_BASE && base <= MAX_BASE
}

/// Writes a number out in the given base, with a leading `-` if it’s
/// negative. Returns `None` for an unsupported base.
///
/// ### Examples
///
/// ```
/// use bitdt::radix::render;
///
/// assert_eq!(render(255_i64, 16), Some("FF".to_string()));
/// assert_eq!(render(-35_i32, 36), Some("-Z".to_string()));
/// assert_eq!(render(10_i64, 37), None);
/// ```
pub fn render<N: PrimInt + Signed>(value: N, base: u32) -> Option<String> {
    if !is_supported(base) {
        return None;
    }

    let radix = <N as NumCast>::from(base)?;
    let mut digits = Vec::new();
    let mut rest = value;

    loop {
        // the remainder has the sign of the value, so it’s never MIN
        let digit = (rest % radix).abs().to_usize()?;
        digits.push(DIGITS[digit]);
        rest = rest / radix;

        if rest.is_zero() {
            break;
        }
    }

    if value.is_negative() {
        digits.push(b'-');
    }

    digits.reverse();
    String::from_utf8(digits).ok()
}

/// Reads a number written out in the given base. Returns `None` for an
/// unsupported base, or for text that isn’t a number in that base.
pub fn parse<N: Num>(text: &str, base: u32) -> Option<N> {
    if !is_supported(base) {
        return None;
    }

    N::from_str_radix(text, base).ok()
}


#[cfg(test)]
mod test {
    use super::*;

    const STAMP: i64 = 1_718_323_456_789;

    #[test]
    fn zero() {
        for base in MIN_BASE ..= MAX_BASE {
            assert_eq!(render(0_i64, base).unwrap(), "0");
        }
    }

    #[test]
    fn stamp_in_every_base() {
        for base in MIN_BASE ..= MAX_BASE {
            let text = render(STAMP, base).unwrap();
            assert_eq!(parse::<i64>(&text, base), Some(STAMP), "base {}", base);
        }
    }

    #[test]
    fn known_renderings() {
        assert_eq!(render(STAMP, 36).unwrap(), "LXDXF4T1");
        assert_eq!(render(STAMP, 32).unwrap(), "1I0A0UAOL");
        assert_eq!(render(STAMP, 16).unwrap(), "190140F2B15");
        assert_eq!(render(STAMP, 8).unwrap(), "31002403625425");
        assert_eq!(render(STAMP, 2).unwrap(), "11001000000010100000011110010101100010101");
    }

    #[test]
    fn extremes() {
        assert_eq!(render(i64::MIN, 16).unwrap(), "-8000000000000000");
        assert_eq!(render(i64::MAX, 36).unwrap(), "1Y2P0IJ32E8E7");
        assert_eq!(parse::<i64>("-8000000000000000", 16), Some(i64::MIN));
    }

    #[test]
    fn small_types() {
        assert_eq!(render(-128_i8, 2).unwrap(), "-10000000");
        assert_eq!(render(127_i8, 36).unwrap(), "3J");
    }

    #[test]
    fn lower_case() {
        assert_eq!(parse::<i64>("lxdxf4t1", 36), Some(STAMP));
    }

    #[test]
    fn malformed() {
        assert_eq!(parse::<i64>("", 10), None);
        assert_eq!(parse::<i64>("12Z", 10), None);
        assert_eq!(parse::<i64>("2", 2), None);
        assert_eq!(parse::<i64>("10", 1), None);
        assert_eq!(parse::<i64>("10", 37), None);
    }
}
