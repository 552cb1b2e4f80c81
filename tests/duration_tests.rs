use rtcal::errors::AppError;
use rtcal::utils::time::{format_duration, parse_duration, parse_positive_duration};

#[test]
fn test_parse_hhmm() {
    assert_eq!(parse_duration("01:30"), Some(1.5));
    assert_eq!(parse_duration("8:00"), Some(8.0));
    assert_eq!(parse_duration("00:45"), Some(0.75));
}

#[test]
fn test_parse_decimal_hours() {
    assert_eq!(parse_duration("1.5"), Some(1.5));
    assert_eq!(parse_duration("1,25"), Some(1.25));
    assert_eq!(parse_duration(" 2 "), Some(2.0));
}

#[test]
fn test_rejects_garbage() {
    assert_eq!(parse_duration("not a time"), None);
    assert_eq!(parse_duration(""), None);
    assert_eq!(parse_duration("01:75"), None);
    assert_eq!(parse_duration("-1"), None);
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(1.5), "01:30");
    assert_eq!(format_duration(0.0), "00:00");
    assert_eq!(format_duration(7.999), "08:00");
}

#[test]
fn test_whole_quarter_hours_survive_formatting() {
    for quarter in 0..(24 * 4) {
        let hours = quarter as f64 / 4.0;
        let text = format_duration(hours);
        assert_eq!(parse_duration(&text), Some(hours), "{text}");
    }
}

#[test]
fn test_formatting_rounds_to_the_nearest_minute() {
    for step in 0..=24_000 {
        let hours = step as f64 / 1000.0;
        let text = format_duration(hours);
        let parsed = parse_duration(&text).unwrap_or_else(|| panic!("{hours} -> {text}"));
        assert!((parsed - hours).abs() <= 1.0 / 60.0, "{hours} -> {text}");
    }
}

#[test]
fn test_positive_duration_required_for_time_entries() {
    assert!(matches!(
        parse_positive_duration("0"),
        Err(AppError::InvalidDuration(_))
    ));
    assert!(matches!(
        parse_positive_duration("abc"),
        Err(AppError::InvalidDuration(_))
    ));
    assert_eq!(parse_positive_duration("00:15").unwrap(), 0.25);
}
