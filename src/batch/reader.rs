use anyhow::{Context, Result};
use log::{debug, trace};
use std::path::Path;

use crate::batch::SampleRow;

/// First field of the header line the monitoring tool repeats on every tick
pub const HEADER_FIELD: &str = "MEM USAGE / LIMIT";

/// Read sample rows from a file
pub fn read_rows(path: &Path) -> Result<Vec<SampleRow>> {
    if !path.exists() {
        anyhow::bail!("Sample file not found: {:?}", path);
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read sample file: {:?}", path))?;

    let rows = parse_rows(&contents);
    debug!("Read {} rows from {:?}", rows.len(), path);
    Ok(rows)
}

/// Split text into rows of `memory[,cpu[,mem_percent]]`
///
/// Blank lines and header lines are skipped. Empty optional fields are
/// treated as absent.
pub fn parse_rows(contents: &str) -> Vec<SampleRow> {
    let mut rows = Vec::new();

    for (line_no, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split(',').map(str::trim);
        let memory = fields.next().unwrap_or_default();
        if memory.eq_ignore_ascii_case(HEADER_FIELD) {
            trace!("Skipping header on line {}", line_no + 1);
            continue;
        }

        let mut optional = || fields.next().filter(|f| !f.is_empty()).map(String::from);
        let cpu = optional();
        let mem_percent = optional();

        rows.push(SampleRow {
            memory: memory.to_string(),
            cpu,
            mem_percent,
        });
    }

    rows
}
