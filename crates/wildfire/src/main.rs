// crates/wildfire/src/main.rs

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wildfire_core::analytics::{DEFAULT_TOP_CAUSES, DEFAULT_TOP_STATES};
use wildfire_core::filters::default_filter;
use wildfire_core::frame::{self, ExportFormat};
use wildfire_core::{
    DatasetCache, Epoch, LoadStatus, Pipeline, PipelineConfig, PipelineOutput, RecordFilter,
    Season,
};

mod report;

/// Wildfire record analytics
#[derive(Parser, Debug)]
#[command(author, version, about = "Explore historical US wildfire records", long_about = None)]
struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    /// Print reports as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
struct SourceArgs {
    /// TOML file with `fires_path` / `states_path`
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Fire record CSV (overrides config and WILDFIRE_FIRES_PATH)
    #[arg(long, global = true)]
    fires: Option<PathBuf>,
    /// State reference CSV (overrides config and WILDFIRE_STATES_PATH)
    #[arg(long, global = true)]
    states: Option<PathBuf>,
}

#[derive(Args, Debug, Default, Clone)]
struct FilterArgs {
    /// First fire year to include
    #[arg(long)]
    from_year: Option<i32>,
    /// Last fire year to include
    #[arg(long)]
    to_year: Option<i32>,
    /// State name or code; repeat for several
    #[arg(long)]
    state: Vec<String>,
    /// Winter, Spring, Summer or Fall; repeat for several
    #[arg(long)]
    season: Vec<Season>,
    /// Start from the default selection (latest five years, first ten states)
    #[arg(long)]
    defaults: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Headline figures and the first rows of the filtered set
    Overview {
        #[command(flatten)]
        filter: FilterArgs,
        /// Number of records to list
        #[arg(long, default_value_t = 10)]
        rows: usize,
    },
    /// Yearly, seasonal and monthly trends
    Trends {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// State and cause rankings, month-by-year heatmap and key indicators
    Breakdown {
        #[command(flatten)]
        filter: FilterArgs,
        /// Number of states per ranking
        #[arg(long, default_value_t = DEFAULT_TOP_STATES)]
        top: usize,
        /// Number of causes listed
        #[arg(long, default_value_t = DEFAULT_TOP_CAUSES)]
        causes: usize,
    },
    /// The state code to name mapping in use
    States,
    /// Write the enriched record set to disk
    Export {
        #[arg(short, long)]
        output: PathBuf,
        /// Defaults to the output extension, then CSV
        #[arg(long, value_enum)]
        format: Option<FormatArg>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Csv,
    Parquet,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Parquet => ExportFormat::Parquet,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = resolve_config(&cli.source)?;
    info!(
        fires = %config.fires_path.display(),
        states = %config.states_path.display(),
        "Resolved configuration"
    );

    let pipeline = Pipeline::new(config);
    let cache = DatasetCache::new();
    let output = cache.load(Epoch::default(), &pipeline);

    for warning in &output.warnings {
        warn!(%warning, "Pipeline warning");
    }

    if output.is_empty() {
        report_no_data(&output);
        return Ok(());
    }

    match cli.command {
        Command::Overview { filter, rows } => {
            let filter = build_filter(&filter, &output)?;
            let view = filter.apply(&output.records);
            report::overview(&view, rows, cli.json)
        }
        Command::Trends { filter } => {
            let filter = build_filter(&filter, &output)?;
            let view = filter.apply(&output.records);
            report::trends(&view, cli.json)
        }
        Command::Breakdown {
            filter,
            top,
            causes,
        } => {
            let filter = build_filter(&filter, &output)?;
            let view = filter.apply(&output.records);
            report::breakdown(&view, top, causes, cli.json)
        }
        Command::States => report::states(&output, cli.json),
        Command::Export { output: path, format } => {
            let format = format
                .map(ExportFormat::from)
                .or_else(|| ExportFormat::from_extension(&path))
                .unwrap_or_default();
            let df = frame::export(&output, &path, format)
                .with_context(|| format!("failed to export records to {}", path.display()))?;
            println!(
                "Wrote {} rows x {} columns to {}",
                df.height(),
                df.width(),
                path.display()
            );
            Ok(())
        }
    }
}

/// Defaults, then the optional TOML file, then the environment, then flags.
fn resolve_config(args: &SourceArgs) -> Result<PipelineConfig> {
    let base = match &args.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("failed to load config file {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    let mut config = base.with_env_overrides();
    if let Some(path) = &args.fires {
        config.fires_path = path.clone();
    }
    if let Some(path) = &args.states {
        config.states_path = path.clone();
    }
    Ok(config)
}

fn build_filter(args: &FilterArgs, output: &PipelineOutput) -> Result<RecordFilter> {
    let mut filter = if args.defaults {
        default_filter(&output.records)
    } else {
        RecordFilter::new()
    };

    match (args.from_year, args.to_year) {
        (None, None) => {}
        (Some(from), Some(to)) if from > to => {
            bail!("--from-year ({from}) is after --to-year ({to})");
        }
        (from, to) => {
            let current = filter.years.clone();
            let from = from
                .or_else(|| current.as_ref().map(|range| *range.start()))
                .unwrap_or(i32::MIN);
            let to = to
                .or_else(|| current.as_ref().map(|range| *range.end()))
                .unwrap_or(i32::MAX);
            filter = filter.with_years(from..=to);
        }
    }
    if !args.state.is_empty() {
        filter = filter.with_states(args.state.iter().cloned());
    }
    if !args.season.is_empty() {
        filter = filter.with_seasons(args.season.iter().copied());
    }
    Ok(filter)
}

fn report_no_data(output: &PipelineOutput) {
    match &output.status {
        LoadStatus::Failed { reason } => {
            println!("No data available: the fire record source could not be loaded ({reason}).");
        }
        LoadStatus::Loaded => {
            println!("No data available: the fire record source contains no rows.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn repeated_flags_collect_states_and_seasons() {
        let cli = Cli::try_parse_from([
            "wildfire",
            "trends",
            "--state",
            "CA",
            "--state",
            "Oregon",
            "--season",
            "summer",
            "--from-year",
            "2010",
        ])
        .unwrap();
        let Command::Trends { filter } = cli.command else {
            panic!("expected trends");
        };
        assert_eq!(filter.state, vec!["CA", "Oregon"]);
        assert_eq!(filter.season, vec![Season::Summer]);

        let built = build_filter(&filter, &PipelineOutput::default()).unwrap();
        assert_eq!(built.years, Some(2010..=i32::MAX));
        assert_eq!(built.states.len(), 2);
    }

    #[test]
    fn inverted_year_range_is_rejected() {
        let args = FilterArgs {
            from_year: Some(2015),
            to_year: Some(2010),
            ..FilterArgs::default()
        };
        assert!(build_filter(&args, &PipelineOutput::default()).is_err());
    }

    #[test]
    fn flags_override_config_sources() {
        let args = SourceArgs {
            config: None,
            fires: Some(PathBuf::from("flag_fires.csv")),
            states: None,
        };
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.fires_path, PathBuf::from("flag_fires.csv"));
    }

    #[test]
    fn export_format_flag_parses() {
        let cli = Cli::try_parse_from([
            "wildfire",
            "export",
            "--output",
            "out.bin",
            "--format",
            "parquet",
        ])
        .unwrap();
        let Command::Export { format, .. } = cli.command else {
            panic!("expected export");
        };
        assert_eq!(format.map(ExportFormat::from), Some(ExportFormat::Parquet));
    }
}
