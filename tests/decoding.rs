extern crate bitdt;
use bitdt::{BitDateTime, DateType};
use bitdt::codec::try_decode;


#[test]
fn full_value() {
    let value = BitDateTime::decode("NapAAOetGX");

    assert_eq!(value.date_type(),     DateType::Full);
    assert_eq!(value.absolute_year(), Some(0));
    assert_eq!(value.month(),         Some(0));
    assert_eq!(value.day(),           Some(1));
    assert_eq!(value.hour(),          Some(12));
    assert_eq!(value.minute(),        Some(30));
    assert_eq!(value.second(),        Some(45));
    assert_eq!(value.millisecond(),   Some(123));
    assert!(value.offset().is_utc());
}

#[test]
fn date_only() {
    let value = BitDateTime::decode("N81FN;");

    assert_eq!(value.date_type(),     DateType::DateOnly);
    assert_eq!(value.absolute_year(), Some(2024));
    assert_eq!(value.month(),         Some(5));
    assert_eq!(value.day(),           Some(14));
    assert_eq!(value.hour(),          None);
    assert_eq!(value.millisecond(),   None);
}

#[test]
fn time_only() {
    let value = BitDateTime::decode(":BAABF");

    assert_eq!(value.date_type(),   DateType::TimeOnly);
    assert_eq!(value.year(),        None);
    assert_eq!(value.day(),         None);
    assert_eq!(value.hour(),        Some(0));
    assert_eq!(value.minute(),      Some(0));
    assert_eq!(value.millisecond(), Some(5));
}

#[test]
fn date_and_hour_with_offset() {
    let value = BitDateTime::decode("N81FNL:-05");

    assert_eq!(value.date_type(),              DateType::DateHour);
    assert_eq!(value.hour(),                   Some(9));
    assert_eq!(value.minute(),                 Some(0));
    assert_eq!(value.offset().quarter_hours(), -20);
    assert_eq!(value.timezone(),               Some("-05".to_string()));
}

#[test]
fn largest_value() {
    let value = BitDateTime::decode("999L6Z88yY+24");

    assert_eq!(value.absolute_year(),          Some(176_980));
    assert_eq!(value.month(),                  Some(11));
    assert_eq!(value.day(),                    Some(32));
    assert_eq!(value.millisecond(),            Some(999));
    assert_eq!(value.offset().quarter_hours(), 96);
}

#[test]
fn unreadable_offsets_are_utc() {
    let value = BitDateTime::decode("N81FN;+");
    assert!(value.offset().is_utc());
    assert_eq!(value.day(), Some(14));
}

#[test]
fn bad_text_is_empty() {
    for &text in [ "", "+05", "AB", "N81MN;", "N81FNLAAB", "hello, world" ].iter() {
        assert!(BitDateTime::decode(text).is_empty(), "{:?}", text);
        assert!(try_decode(text).is_err(), "{:?}", text);
    }
}

#[test]
fn errors_explain_themselves() {
    let error = try_decode("N81MN;").unwrap_err();
    assert_eq!(error.to_string(), "\"M\" is not a valid month");
}
