use log::{info, warn};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::{ParseError, Result};
use crate::measurement::RawMeasurement;
use crate::units::Parser;

mod export;
pub use export::{ExportFormat, ReportExporter};
mod reader;
pub use reader::{parse_rows, read_rows, HEADER_FIELD};

/// One sampled entity at one tick, fields as the monitoring tool printed them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRow {
    /// Composite memory usage/limit, e.g. `5.828MiB / 7.448GiB`
    pub memory: String,
    /// CPU percentage, e.g. `0.08%`
    pub cpu: Option<String>,
    /// Memory percentage, e.g. `0.07%`
    pub mem_percent: Option<String>,
}

impl SampleRow {
    pub fn new(memory: impl Into<String>) -> Self {
        Self {
            memory: memory.into(),
            cpu: None,
            mem_percent: None,
        }
    }

    pub fn with_cpu(mut self, cpu: impl Into<String>) -> Self {
        self.cpu = Some(cpu.into());
        self
    }

    pub fn with_mem_percent(mut self, mem_percent: impl Into<String>) -> Self {
        self.mem_percent = Some(mem_percent.into());
        self
    }
}

impl fmt::Display for SampleRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.memory)?;
        if self.cpu.is_some() || self.mem_percent.is_some() {
            write!(f, ",{}", self.cpu.as_deref().unwrap_or(""))?;
        }
        if let Some(mem_percent) = &self.mem_percent {
            write!(f, ",{mem_percent}")?;
        }
        Ok(())
    }
}

/// A row with every field in canonical units
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRow {
    /// Position of the row in the input
    pub index: usize,
    pub usage_bytes: u64,
    pub limit_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mem_percent: Option<f64>,
}

/// A row that could not be normalized
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowFailure {
    /// Position of the row in the input
    pub index: usize,
    /// The row as it was read
    pub input: String,
    #[serde(serialize_with = "serialize_display")]
    pub error: ParseError,
}

/// Outcome of normalizing a batch of rows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub rows: Vec<NormalizedRow>,
    pub failures: Vec<RowFailure>,
}

impl BatchReport {
    /// Number of rows seen, normalized or not
    pub fn total(&self) -> usize {
        self.rows.len() + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

fn serialize_display<T: fmt::Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Normalize one row
pub fn normalize_row(parser: &Parser, index: usize, row: &SampleRow) -> Result<NormalizedRow> {
    let memory = RawMeasurement::from_composite(&row.memory)?.normalize(parser)?;
    let cpu_percent = row
        .cpu
        .as_deref()
        .map(|v| parser.percentage(v))
        .transpose()?;
    let mem_percent = row
        .mem_percent
        .as_deref()
        .map(|v| parser.percentage(v))
        .transpose()?;

    Ok(NormalizedRow {
        index,
        usage_bytes: memory.usage_bytes,
        limit_bytes: memory.limit_bytes,
        cpu_percent,
        mem_percent,
    })
}

/// Normalize every row, recording failures instead of stopping at them
///
/// Rows are independent; output keeps input order.
pub fn normalize_rows(parser: &Parser, rows: &[SampleRow]) -> BatchReport {
    let mut report = BatchReport::default();

    for (index, row) in rows.iter().enumerate() {
        match normalize_row(parser, index, row) {
            Ok(normalized) => report.rows.push(normalized),
            Err(error) => {
                warn!("Skipping row {index} ('{row}'): {error}");
                report.failures.push(RowFailure {
                    index,
                    input: row.to_string(),
                    error,
                });
            }
        }
    }

    info!(
        "Normalized {} of {} rows ({} failed)",
        report.rows.len(),
        report.total(),
        report.failures.len()
    );
    report
}
