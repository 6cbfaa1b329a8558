use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

/// Value-level failures raised while normalizing a single input string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed composite value (expected '<usage> / <limit>'): '{0}'")]
    MalformedCompositeValue(String),
    #[error("Malformed numeric value: '{0}'")]
    MalformedNumericValue(String),
    #[error("Malformed percentage value: '{0}'")]
    MalformedPercentageValue(String),
    #[error("Unknown unit suffix: '{0}'")]
    UnknownUnitSuffix(String),
}
