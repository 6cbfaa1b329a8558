use super::*;
use crate::error::ParseError;

#[test]
fn test_split_composite() {
    let raw = "5.828MiB / 7.448GiB";
    assert_eq!(split_composite(raw, Side::First).unwrap(), "5.828MiB");
    assert_eq!(split_composite(raw, Side::Second).unwrap(), "7.448GiB");

    // Surrounding whitespace is dropped
    assert_eq!(split_composite("  913MB / 943MB\n", Side::First).unwrap(), "913MB");
    assert_eq!(split_composite("  913MB / 943MB\n", Side::Second).unwrap(), "943MB");

    // Only the first separator splits
    assert_eq!(split_composite("1B / 2B / 3B", Side::Second).unwrap(), "2B / 3B");
}

#[test]
fn test_split_composite_missing_separator() {
    assert_eq!(
        split_composite("no-separator-here", Side::First),
        Err(ParseError::MalformedCompositeValue(
            "no-separator-here".to_string()
        ))
    );

    // A bare slash is not the separator
    assert!(split_composite("913MB/943MB", Side::Second).is_err());
}

#[test]
fn test_extract_unit_suffix() {
    assert_eq!(extract_unit_suffix("5.828MiB"), "MiB");
    assert_eq!(extract_unit_suffix("36.9kB"), "kB");
    assert_eq!(extract_unit_suffix("0B"), "B");
    assert_eq!(extract_unit_suffix("42"), "");
    assert_eq!(extract_unit_suffix(""), "");
}

#[test]
fn test_extract_magnitude() {
    assert_eq!(extract_magnitude("5.828MiB").unwrap(), 5.828);
    assert_eq!(extract_magnitude("913MB").unwrap(), 913.0);
    assert_eq!(extract_magnitude(".5kB").unwrap(), 0.5);

    // Invalid formats
    assert_eq!(
        extract_magnitude("MiB"),
        Err(ParseError::MalformedNumericValue("MiB".to_string()))
    );
    assert!(extract_magnitude("").is_err());
    assert!(extract_magnitude("1.2.3MB").is_err());
    assert!(extract_magnitude(".GB").is_err());
}

#[test]
fn test_to_base_unit_known_suffixes() {
    assert_eq!(to_base_unit("1B").unwrap(), 1);
    assert_eq!(to_base_unit("0.5kB").unwrap(), 500);
    assert_eq!(to_base_unit("2KiB").unwrap(), 2_000);
    assert_eq!(to_base_unit("7.75MB").unwrap(), 7_750_000);
    assert_eq!(to_base_unit("913MB").unwrap(), 913_000_000);
    assert_eq!(to_base_unit("1.5GiB").unwrap(), 1_500_000_000);
    assert_eq!(to_base_unit("3GB").unwrap(), 3_000_000_000);
}

#[test]
fn test_to_base_unit_is_exact_for_decimal_inputs() {
    // f64 products land just below these, e.g. 4.1 * 1e6 = 4099999.999...
    assert_eq!(to_base_unit("4.1MB").unwrap(), 4_100_000);
    assert_eq!(to_base_unit("5.828MiB").unwrap(), 5_828_000);
    assert_eq!(to_base_unit("7.448GiB").unwrap(), 7_448_000_000);
    assert_eq!(to_base_unit("36.9kB").unwrap(), 36_900);
    assert_eq!(to_base_unit("0.29MB").unwrap(), 290_000);
    assert_eq!(to_base_unit("2.3GB").unwrap(), 2_300_000_000);
    assert_eq!(to_base_unit("0.001GB").unwrap(), 1_000_000);
    assert_eq!(to_base_unit("1.23456789GB").unwrap(), 1_234_567_890);
    assert_eq!(to_base_unit("12.34B").unwrap(), 12);
    assert_eq!(to_base_unit("5.MB").unwrap(), 5_000_000);

    // Fraction digits beyond the multiplier are truncated
    assert_eq!(to_base_unit("0.0000000019GB").unwrap(), 1);
    assert_eq!(to_base_unit("1.99999999999999999999999kB").unwrap(), 1_999);
}

#[test]
fn test_to_base_unit_rejects_values_beyond_u64() {
    assert_eq!(to_base_unit("18446744073709551615B").unwrap(), u64::MAX);

    assert_eq!(
        to_base_unit("18446744073709551616B"),
        Err(ParseError::MalformedNumericValue(
            "18446744073709551616B".to_string()
        ))
    );
    assert!(to_base_unit("99999999999999999999999GB").is_err());
    assert!(to_base_unit_with("20000000000GB", ParseMode::Strict, UnitScale::Decimal).is_err());
    assert!(to_base_unit(&format!("{}B", "9".repeat(60))).is_err());
}

#[test]
fn test_to_base_unit_truncates() {
    assert_eq!(to_base_unit("2.5B").unwrap(), 2);
    assert_eq!(to_base_unit("0.9B").unwrap(), 0);
}

#[test]
fn test_to_base_unit_case_insensitive() {
    assert_eq!(to_base_unit("5MiB").unwrap(), to_base_unit("5mib").unwrap());
    assert_eq!(to_base_unit("5GB").unwrap(), to_base_unit("5gB").unwrap());
    assert_eq!(to_base_unit("5b").unwrap(), 5);
}

#[test]
fn test_to_base_unit_unknown_suffix() {
    // Lenient falls back to zero
    assert_eq!(to_base_unit("5XYZ").unwrap(), 0);
    assert_eq!(to_base_unit("5TiB").unwrap(), 0);

    // Strict rejects, keeping the suffix as written
    assert_eq!(
        to_base_unit_with("5XYZ", ParseMode::Strict, UnitScale::Decimal),
        Err(ParseError::UnknownUnitSuffix("XYZ".to_string()))
    );
}

#[test]
fn test_normalized_output_is_not_an_input() {
    let bytes = to_base_unit("913MB").unwrap();
    assert_eq!(to_base_unit(&bytes.to_string()).unwrap(), 0);
    assert_eq!(
        to_base_unit_with(&bytes.to_string(), ParseMode::Strict, UnitScale::Decimal),
        Err(ParseError::UnknownUnitSuffix(String::new()))
    );
}

#[test]
fn test_to_base_unit_malformed_magnitude_is_error_in_both_modes() {
    assert!(to_base_unit("MiB").is_err());
    assert!(to_base_unit_with("1.2.3MB", ParseMode::Strict, UnitScale::Decimal).is_err());
}

#[test]
fn test_legacy_scale() {
    let legacy = |raw| to_base_unit_with(raw, ParseMode::Lenient, UnitScale::Legacy);

    assert_eq!(legacy("2kB").unwrap(), 20_000);
    assert_eq!(legacy("2KiB").unwrap(), 20_000);
    // Other tiers match the decimal table
    assert_eq!(legacy("2MB").unwrap(), 2_000_000);
    assert_eq!(legacy("2GiB").unwrap(), 2_000_000_000);
    assert_eq!(legacy("2B").unwrap(), 2);
}

#[test]
fn test_percentage_to_number() {
    assert_eq!(percentage_to_number("0.08%").unwrap(), 0.08);
    assert_eq!(percentage_to_number("12%").unwrap(), 12.0);
    assert_eq!(percentage_to_number("250.5%").unwrap(), 250.5);
    assert_eq!(percentage_to_number(" 1.5% ").unwrap(), 1.5);
    assert_eq!(percentage_to_number("1.5 %").unwrap(), 1.5);
}

#[test]
fn test_percentage_to_number_malformed() {
    assert_eq!(
        percentage_to_number("12"),
        Err(ParseError::MalformedPercentageValue("12".to_string()))
    );
    assert!(percentage_to_number("").is_err());
    assert!(percentage_to_number("%").is_err());
    assert!(percentage_to_number("abc%").is_err());
    assert!(percentage_to_number("1.2.3%").is_err());
    assert!(percentage_to_number("-3%").is_err());
    assert!(percentage_to_number("inf%").is_err());
    assert!(percentage_to_number("NaN%").is_err());
}

#[test]
fn test_parser_settings() {
    let parser = Parser::default();
    assert_eq!(parser.mode, ParseMode::Lenient);
    assert_eq!(parser.scale, UnitScale::Decimal);
    assert_eq!(parser.to_base_unit("5XYZ").unwrap(), 0);

    let strict = Parser::strict();
    assert!(strict.to_base_unit("5XYZ").is_err());

    let legacy = Parser::default().with_scale(UnitScale::Legacy);
    assert_eq!(legacy.to_base_unit("1kB").unwrap(), 10_000);

    let strict_legacy = legacy.with_mode(ParseMode::Strict);
    assert_eq!(strict_legacy, Parser::new(ParseMode::Strict, UnitScale::Legacy));
}

#[test]
fn test_parser_measurement() {
    let parser = Parser::default();
    let measurement = parser.measurement("4.1MB / 8.2MB").unwrap();
    assert_eq!(measurement.usage_bytes, 4_100_000);
    assert_eq!(measurement.limit_bytes, 8_200_000);
    assert_eq!(measurement.utilization_percent(), Some(50.0));

    assert_eq!(
        parser.measurement("4.1MB"),
        Err(ParseError::MalformedCompositeValue("4.1MB".to_string()))
    );
    assert_eq!(
        Parser::strict().measurement("1GB / 2TB"),
        Err(ParseError::UnknownUnitSuffix("TB".to_string()))
    );
}

#[test]
fn test_parser_composite_side() {
    let parser = Parser::default();
    let raw = "913MB / 943MB";
    assert_eq!(parser.composite_side(raw, Side::First).unwrap(), 913_000_000);
    assert_eq!(parser.composite_side(raw, Side::Second).unwrap(), 943_000_000);
    assert!(parser.composite_side("913MB", Side::First).is_err());
}
