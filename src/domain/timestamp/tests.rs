// Unit tests for filename timestamp parsing

use super::*;

#[test]
fn test_parse_date_long_form() {
    let date = parse_date("20200717_135135_clip.mp4").unwrap();
    assert_eq!(date.as_str(), "July 17, 2020");
}

#[test]
fn test_parse_date_keeps_day_padding() {
    let date = parse_date("20191203_080000.mov").unwrap();
    assert_eq!(date.to_string(), "December 03, 2019");
}

#[test]
fn test_parse_time_afternoon() {
    let time = parse_time("20200717_135135_clip.mp4").unwrap();
    assert_eq!(time.as_str(), "1:51:35 PM");
}

#[test]
fn test_parse_time_strips_single_hour_zero_only() {
    assert_eq!(parse_time("20200717_130500.mp4").unwrap().as_str(), "1:05:00 PM");
    assert_eq!(parse_time("20200717_090905.mp4").unwrap().as_str(), "9:09:05 AM");
    assert_eq!(parse_time("20200717_000000.mp4").unwrap().as_str(), "12:00:00 AM");
    assert_eq!(parse_time("20200717_221007.mp4").unwrap().as_str(), "10:10:07 PM");
}

#[test]
fn test_time_token_ignores_trailing_characters() {
    assert_eq!(parse_time("20200717_135135.mp4").unwrap().as_str(), "1:51:35 PM");
    assert_eq!(parse_time("20200717_135135abc_x.mp4").unwrap().as_str(), "1:51:35 PM");
}

#[test]
fn test_filename_without_pattern_is_malformed() {
    for name in ["video.mp4", "2020_clip.mp4", "clip_135135.mp4", ""] {
        assert!(
            matches!(parse_date(name), Err(DomainError::MalformedTimestamp { .. })),
            "date of {:?} should be malformed",
            name
        );
    }
    for name in ["video.mp4", "2020_clip.mp4", "20200717.mp4", "20200717_1351.mp4"] {
        assert!(
            matches!(parse_time(name), Err(DomainError::MalformedTimestamp { .. })),
            "time of {:?} should be malformed",
            name
        );
    }
}

#[test]
fn test_invalid_calendar_values_are_malformed() {
    assert!(parse_date("20200230_120000.mp4").is_err());
    assert!(parse_date("20201301_120000.mp4").is_err());
    assert!(parse_time("20200717_246000.mp4").is_err());
    assert!(parse_time("20200717_126000.mp4").is_err());
    assert!(parse_time("20200717_125960.mp4").is_err());
}

#[test]
fn test_leap_day_is_accepted() {
    assert_eq!(parse_date("20200229_101010.mp4").unwrap().as_str(), "February 29, 2020");
}

#[test]
fn test_parse_timestamp_requires_both_parts() {
    let stamp = parse_timestamp("20200717_135135_clip.mp4").unwrap();
    assert_eq!(stamp.date.as_str(), "July 17, 2020");
    assert_eq!(stamp.time.as_str(), "1:51:35 PM");

    let err = parse_timestamp("20200717.mp4").unwrap_err();
    assert!(matches!(err, DomainError::MalformedTimestamp { ref filename, .. } if filename == "20200717.mp4"));
}
