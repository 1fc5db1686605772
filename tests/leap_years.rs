extern crate bitdt;
use bitdt::cal::{is_leap_year, days_in_month, days_in_year};


#[test]
fn year_1600() {
    assert!(is_leap_year(1600));
}

#[test]
fn year_1900() {
    assert!(is_leap_year(1900) == false);
}

#[test]
fn year_2000() {
    assert!(is_leap_year(2000));
}

#[test]
fn year_2038() {
    assert!(is_leap_year(2038) == false);
}

#[test]
fn year_minus_four() {
    assert!(is_leap_year(-4));
}

#[test]
fn february() {
    assert_eq!(days_in_month(2024, 1), 29);
    assert_eq!(days_in_month(2100, 1), 28);
    assert_eq!(days_in_year(2024), 366);
}
