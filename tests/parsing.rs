#![cfg(feature = "parse")]

extern crate bitdt;
use bitdt::{BitDateTime, DateType};
use bitdt::parse::Error;


#[test]
fn date() {
    let value: BitDateTime = "2015-06-26".parse().unwrap();

    assert_eq!(value.date_type(),     DateType::DateOnly);
    assert_eq!(value.absolute_year(), Some(2015));
    assert_eq!(value.month(),         Some(5));
    assert_eq!(value.day(),           Some(26));
}

#[test]
fn date_time() {
    let value: BitDateTime = "2001-02-03T04:05:06.789".parse().unwrap();

    assert_eq!(value.date_type(),   DateType::Full);
    assert_eq!(value.hour(),        Some(4));
    assert_eq!(value.minute(),      Some(5));
    assert_eq!(value.second(),      Some(6));
    assert_eq!(value.millisecond(), Some(789));
    assert!(value.offset().is_utc());
}

#[test]
fn date_time_with_offset() {
    let value: BitDateTime = "2024-06-14T09:00:00-05:00".parse().unwrap();

    assert_eq!(value.date_type(), DateType::DateHour);
    assert_eq!(value.encode(), "N81FNL:-05");
}

#[test]
fn week_date() {
    let value: BitDateTime = "2009-W01-1".parse().unwrap();

    assert_eq!(value.absolute_year(), Some(2008));
    assert_eq!(value.month(),         Some(11));
    assert_eq!(value.day(),           Some(29));
}

#[test]
fn midnight_is_empty() {
    let value: BitDateTime = "00:00:00".parse().unwrap();
    assert!(value.is_empty());
}

#[test]
fn impossible_date() {
    assert!(matches!("2015-13-01".parse::<BitDateTime>(), Err(_)));
    assert!(matches!("2100-02-29".parse::<BitDateTime>(), Err(Error::Calendar(_))));
}

#[test]
fn parsed_values_round_trip() {
    for &text in [ "2015-06-26", "1969-12-31T23:59:59.999", "12:30:45", "2015-W26-5" ].iter() {
        let value: BitDateTime = text.parse().unwrap();
        assert_eq!(BitDateTime::decode(&value.encode()), value, "{}", text);
    }
}
