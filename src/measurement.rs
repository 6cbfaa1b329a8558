use crate::error::Result;
use crate::units::{split_composite, Parser, Side};

/// A usage/limit pair as reported by the monitoring tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMeasurement {
    /// Usage with its unit suffix, e.g. `5.828MiB`
    pub usage: String,
    /// Limit with its unit suffix, e.g. `7.448GiB`
    pub limit: String,
}

/// A usage/limit pair in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedMeasurement {
    pub usage_bytes: u64,
    pub limit_bytes: u64,
}

impl RawMeasurement {
    pub fn new(usage: impl Into<String>, limit: impl Into<String>) -> Self {
        Self {
            usage: usage.into(),
            limit: limit.into(),
        }
    }

    /// Build from a composite value such as `"5.828MiB / 7.448GiB"`
    pub fn from_composite(raw: &str) -> Result<Self> {
        Ok(Self::new(
            split_composite(raw, Side::First)?,
            split_composite(raw, Side::Second)?,
        ))
    }

    pub fn normalize(&self, parser: &Parser) -> Result<NormalizedMeasurement> {
        Ok(NormalizedMeasurement {
            usage_bytes: parser.to_base_unit(&self.usage)?,
            limit_bytes: parser.to_base_unit(&self.limit)?,
        })
    }
}

impl NormalizedMeasurement {
    /// Usage as a percentage of the limit, `None` when there is no limit
    pub fn utilization_percent(&self) -> Option<f64> {
        if self.limit_bytes == 0 {
            return None;
        }
        Some(self.usage_bytes as f64 / self.limit_bytes as f64 * 100.0)
    }
}
