use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::batch::BatchReport;
use crate::path_utils;

/// Output format for a batch report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Rows and failures
    #[default]
    Json,
    /// Normalized rows only
    Csv,
}

impl ExportFormat {
    /// Format named by the extension of `path`, ignoring case
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            _ => None,
        }
    }

    /// An explicitly requested format wins, then the extension of `path`,
    /// then `fallback`
    pub fn resolve(explicit: Option<Self>, path: &Path, fallback: Self) -> Self {
        explicit.or_else(|| Self::from_path(path)).unwrap_or(fallback)
    }
}

/// Functions for exporting batch reports
pub struct ReportExporter;

impl ReportExporter {
    /// File extension for reports in this format
    pub fn extension(format: ExportFormat) -> &'static str {
        match format {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }

    /// Pick where the report for `input` goes, if anywhere
    ///
    /// An output file is used as given. Otherwise the report is named after
    /// the input file and placed in `output_dir`.
    pub fn report_path(
        input: &Path,
        output: Option<&Path>,
        output_dir: Option<&Path>,
        format: ExportFormat,
    ) -> Option<PathBuf> {
        if let Some(output) = output {
            return Some(path_utils::expand_path_buf(output));
        }
        let stem = input.file_stem().unwrap_or(input.as_os_str());
        let file_name = format!("{}.{}", stem.to_string_lossy(), Self::extension(format));
        Some(output_dir?.join(file_name))
    }

    pub fn export(report: &BatchReport, path: &Path, format: ExportFormat) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            path_utils::ensure_directory(parent)?;
        }

        match format {
            ExportFormat::Json => Self::export_json(report, path)?,
            ExportFormat::Csv => Self::export_csv(report, path)?,
        }
        info!("Wrote {:?} report to {:?}", format, path);
        Ok(())
    }

    /// Export the full report, failures included, to JSON
    pub fn export_json(report: &BatchReport, path: &Path) -> Result<()> {
        let json_data =
            serde_json::to_string_pretty(report).context("Failed to serialize batch report")?;

        std::fs::write(path, json_data).context("Failed to write batch report to file")?;

        Ok(())
    }

    /// Export normalized rows to CSV. Failures are not included.
    pub fn export_csv(report: &BatchReport, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create report file: {:?}", path))?;

        writeln!(file, "index,usage_bytes,limit_bytes,cpu_percent,mem_percent")?;
        for row in &report.rows {
            writeln!(
                file,
                "{},{},{},{},{}",
                row.index,
                row.usage_bytes,
                row.limit_bytes,
                row.cpu_percent.map(|v| v.to_string()).unwrap_or_default(),
                row.mem_percent.map(|v| v.to_string()).unwrap_or_default(),
            )?;
        }

        Ok(())
    }
}
