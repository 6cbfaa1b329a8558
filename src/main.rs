use anyhow::{Context, Result};
use clap::{Parser as CliParser, Subcommand};
use env_logger::Env;
use log::{debug, info};
use std::path::{Path, PathBuf};

use statnorm::{
    batch::{normalize_rows, read_rows, BatchReport, ExportFormat, ReportExporter},
    config::{
        load_or_default, AppConfig, ConfigOverrides, MergeableConfiguration, CONFIG_ENV,
        DEFAULT_CONFIG,
    },
    path_utils,
    units::{split_composite, ParseMode, Parser, Side, UnitScale},
};

#[derive(CliParser, Debug)]
#[command(
    version,
    about,
    long_about = "Normalize container resource usage strings such as '5.828MiB / 7.448GiB' or '0.08%'"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Application config [default: statnorm.yml if present]
    #[arg(short, long, env = CONFIG_ENV, global = true)]
    config: Option<PathBuf>,

    /// Reject unknown unit suffixes instead of normalizing them to zero
    #[arg(long, global = true)]
    strict: bool,

    /// Multiplier table
    #[arg(long, value_enum, global = true)]
    scale: Option<UnitScale>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Normalize a unit-suffixed value to bytes
    Bytes {
        /// Value such as 5.828MiB
        value: String,
    },
    /// Select one side of a composite value
    Split {
        /// Value such as "5.828MiB / 7.448GiB"
        composite: String,

        /// Side to select
        #[arg(long, value_enum, default_value_t = Side::First)]
        side: Side,
    },
    /// Parse a percentage
    Percent {
        /// Value such as 0.08%
        value: String,
    },
    /// Normalize both sides of a composite value
    Measure {
        /// Value such as "5.828MiB / 7.448GiB"
        composite: String,
    },
    /// Normalize every row of a sample file
    Batch {
        /// File with one `memory[,cpu[,mem_percent]]` row per line
        file: PathBuf,

        /// Report file to write
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,

        /// Directory for the report when no output file is given
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut overrides = ConfigOverrides {
        mode: cli.strict.then_some(ParseMode::Strict),
        scale: cli.scale,
        ..ConfigOverrides::default()
    };
    if let Commands::Batch {
        format, output_dir, ..
    } = &cli.command
    {
        overrides.format = *format;
        overrides.output_dir = output_dir.clone();
    }

    let config = load_or_default(cli.config.as_deref(), Path::new(DEFAULT_CONFIG))?;
    let config = config.merge_with(&overrides)?;
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

fn print_summary(report: &BatchReport) {
    println!(
        "{} rows normalized, {} failed",
        report.rows.len(),
        report.failures.len()
    );
    for failure in &report.failures {
        println!("  row {}: {}", failure.index, failure.error);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let parser = Parser::from(&config);

    match &cli.command {
        Commands::Bytes { value } => {
            println!("{}", parser.to_base_unit(value)?);
        }
        Commands::Split { composite, side } => {
            println!("{}", split_composite(composite, *side)?);
        }
        Commands::Percent { value } => {
            println!("{}", parser.percentage(value)?);
        }
        Commands::Measure { composite } => {
            let measurement = parser.measurement(composite)?;
            println!("usage_bytes: {}", measurement.usage_bytes);
            println!("limit_bytes: {}", measurement.limit_bytes);
            match measurement.utilization_percent() {
                Some(percent) => println!("utilization: {percent:.2}%"),
                None => println!("utilization: n/a"),
            }
        }
        Commands::Batch {
            file,
            output,
            format,
            ..
        } => {
            let file = path_utils::expand_path_buf(file);
            let rows = read_rows(&file)
                .with_context(|| format!("Failed to load samples from {:?}", file))?;
            let report = normalize_rows(&parser, &rows);
            print_summary(&report);

            let path = ReportExporter::report_path(
                &file,
                output.as_deref(),
                config.output_dir.as_deref(),
                config.format,
            );
            if let Some(path) = path {
                let format = ExportFormat::resolve(*format, &path, config.format);
                ReportExporter::export(&report, &path, format)?;
            } else {
                info!("No output file or output_dir given, report not written");
            }
        }
    }

    Ok(())
}
