use log::trace;

use crate::error::{ParseError, Result};
use crate::measurement::{NormalizedMeasurement, RawMeasurement};

/// Multiplier tables and parse modes
mod scale;
pub use scale::{ParseMode, UnitScale};

#[cfg(test)]
mod tests;

/// Separator between the usage and limit halves of a composite value
pub const COMPOSITE_SEPARATOR: &str = " / ";

/// Which half of a composite value to select
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Side {
    /// The usage half, left of the separator
    First,
    /// The limit half, right of the separator
    Second,
}

/// Select one side of a composite value such as `"5.828MiB / 7.448GiB"`
///
/// The value is split on the first separator only, so anything after it
/// belongs to the second side.
pub fn split_composite(raw: &str, side: Side) -> Result<&str> {
    let (first, second) = raw
        .split_once(COMPOSITE_SEPARATOR)
        .ok_or_else(|| ParseError::MalformedCompositeValue(raw.to_string()))?;

    Ok(match side {
        Side::First => first.trim(),
        Side::Second => second.trim(),
    })
}

/// Keep the alphabetic characters of `raw`, case preserved
pub fn extract_unit_suffix(raw: &str) -> String {
    raw.chars().filter(|c| c.is_alphabetic()).collect()
}

/// Fraction digits past this many places never change the truncated result,
/// since every multiplier is a power of ten no larger than 10^18
const MAX_FRACTION_DIGITS: usize = 18;

fn magnitude_digits(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// Keep the digits and decimal points of `raw` and parse the result
pub fn extract_magnitude(raw: &str) -> Result<f64> {
    let digits = magnitude_digits(raw);

    if digits.is_empty() {
        return Err(ParseError::MalformedNumericValue(raw.to_string()));
    }

    digits
        .parse::<f64>()
        .map_err(|_| ParseError::MalformedNumericValue(raw.to_string()))
}

/// `digits * multiplier` truncated toward zero, in integer arithmetic
///
/// `digits` must already be a valid decimal. Returns `None` when the result
/// does not fit in a `u64`.
fn scale_exact(digits: &str, multiplier: u64) -> Option<u64> {
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    let multiplier = u128::from(multiplier);

    let whole = match whole {
        "" => 0,
        whole => whole.parse::<u128>().ok()?,
    };
    let mut scaled = whole.checked_mul(multiplier)?;

    let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    if !fraction.is_empty() {
        let numerator = fraction.parse::<u128>().ok()?;
        let denominator = 10u128.pow(fraction.len() as u32);
        scaled = scaled.checked_add(numerator * multiplier / denominator)?;
    }

    u64::try_from(scaled).ok()
}

/// Normalize a unit-suffixed magnitude to bytes with the default lenient,
/// decimal parser
pub fn to_base_unit(raw: &str) -> Result<u64> {
    to_base_unit_with(raw, ParseMode::Lenient, UnitScale::Decimal)
}

/// Normalize a unit-suffixed magnitude to bytes
///
/// Suffix lookup is case-insensitive. The magnitude is scaled exactly as a
/// decimal and fractional bytes are truncated, so `"4.1MB"` is 4,100,000.
/// Results beyond `u64::MAX` are rejected as malformed.
pub fn to_base_unit_with(raw: &str, mode: ParseMode, scale: UnitScale) -> Result<u64> {
    extract_magnitude(raw)?;
    let suffix = extract_unit_suffix(raw);

    match scale.multiplier(&suffix.to_lowercase()) {
        Some(multiplier) => scale_exact(&magnitude_digits(raw), multiplier)
            .ok_or_else(|| ParseError::MalformedNumericValue(raw.to_string())),
        None => match mode {
            ParseMode::Lenient => {
                trace!("Unknown unit suffix '{suffix}' in '{raw}', using 0");
                Ok(0)
            }
            ParseMode::Strict => Err(ParseError::UnknownUnitSuffix(suffix)),
        },
    }
}

/// Parse a percentage such as `"0.08%"`
///
/// Whitespace around the value and between the number and `%` is ignored, so
/// padded table cells like `" 1.5 %"` parse. Values above 100 are kept
/// as-is; CPU usage on multi-core hosts exceeds 100. Negative and non-finite
/// values are rejected, as no resource usage reading is below zero.
pub fn percentage_to_number(raw: &str) -> Result<f64> {
    let malformed = || ParseError::MalformedPercentageValue(raw.to_string());

    let number = raw.trim().strip_suffix('%').ok_or_else(malformed)?;
    let value = number.trim().parse::<f64>().map_err(|_| malformed())?;

    if !value.is_finite() || value < 0.0 {
        return Err(malformed());
    }

    Ok(value)
}

/// Parser settings bundled so callers can pass one value around
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parser {
    /// Treatment of unknown unit suffixes
    pub mode: ParseMode,
    /// Multiplier table
    pub scale: UnitScale,
}

impl Parser {
    pub fn new(mode: ParseMode, scale: UnitScale) -> Self {
        Self { mode, scale }
    }

    /// A decimal parser that rejects unknown suffixes
    pub fn strict() -> Self {
        Self::new(ParseMode::Strict, UnitScale::Decimal)
    }

    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_scale(mut self, scale: UnitScale) -> Self {
        self.scale = scale;
        self
    }

    /// Normalize a single unit-suffixed magnitude to bytes
    pub fn to_base_unit(&self, raw: &str) -> Result<u64> {
        to_base_unit_with(raw, self.mode, self.scale)
    }

    /// Normalize one side of a composite value to bytes
    pub fn composite_side(&self, raw: &str, side: Side) -> Result<u64> {
        self.to_base_unit(split_composite(raw, side)?)
    }

    /// Normalize both sides of a composite value such as `"913MB / 943MB"`
    pub fn measurement(&self, raw: &str) -> Result<NormalizedMeasurement> {
        RawMeasurement::from_composite(raw)?.normalize(self)
    }

    pub fn percentage(&self, raw: &str) -> Result<f64> {
        percentage_to_number(raw)
    }
}
