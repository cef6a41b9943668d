mod about;
mod render;
mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use infrep_core::{Dimension, OutputFormat};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "infrep", version)]
#[command(about = "Influencer marketing report: cost, conversion rate, and CPA")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Describe the expected input workbook and the metrics reported
    About,
    /// Print a KPI report for an input workbook
    Report {
        /// Input workbook (.xlsx or .xls)
        file: PathBuf,
        /// Grouping for the report rows
        #[arg(long, value_enum, default_value_t = Grouping::Influencer)]
        by: Grouping,
        /// Output format: table, markdown, or json (defaults to INFREP_OUTPUT_FORMAT)
        #[arg(long)]
        format: Option<OutputFormat>,
        /// Also print the raw Posts and Conversions sheets
        #[arg(long)]
        raw: bool,
    },
    /// Write all three reports plus the raw sheets to an xlsx workbook
    Export {
        /// Input workbook (.xlsx or .xls)
        file: PathBuf,
        /// Destination path; must end in .xlsx
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Grouping {
    Influencer,
    Month,
    InfluencerMonth,
}

impl Grouping {
    fn dimensions(self) -> &'static [Dimension] {
        match self {
            Grouping::Influencer => infrep_report::BY_INFLUENCER,
            Grouping::Month => infrep_report::BY_MONTH,
            Grouping::InfluencerMonth => infrep_report::BY_INFLUENCER_MONTH,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = infrep_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        None | Some(Commands::About) => {
            print!("{}", about::ABOUT);
            Ok(())
        }
        Some(Commands::Report {
            file,
            by,
            format,
            raw,
        }) => {
            let format = format.unwrap_or(config.output_format);
            report::run_report(&config, &file, by.dimensions(), format, raw)
        }
        Some(Commands::Export { file, out }) => report::run_export(&config, &file, &out),
    }
}

#[cfg(test)]
mod tests;
