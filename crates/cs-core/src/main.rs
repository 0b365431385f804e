//! casestack - surgical case explorer
//!
//! The main entry point for casestack, handling:
//! - CSV case-record loading and validation
//! - Stacked layout computation (fractions and counts)
//! - SVG/HTML chart generation
//! - Interactive terminal explorer

use clap::{Args, Parser, Subcommand, ValueEnum};
use cs_chart::{ChartGenerator, StatsBlock};
use cs_common::{CaseRecord, OutputFormat, SortOrder};
use cs_core::config::{load_config, AppConfig};
use cs_core::exit_codes::ExitCode;
use cs_core::loader::{load_cases, scan_cases, LoaderError};
use cs_core::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use cs_core::stats::summarize;
use cs_stack::{compute_stack, StackLayout, ValueMode};
use std::path::{Path, PathBuf};

/// casestack - stacked exploration of surgical case records
#[derive(Parser)]
#[command(name = "casestack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Path to the case-record CSV file
    #[arg(long, global = true, env = "CASESTACK_DATA")]
    data: Option<PathBuf>,

    /// Path to the config file (default: ./casestack.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal explorer (default)
    Show,

    /// Per-age-bin record counts
    Stats(StatsArgs),

    /// Compute the stacked layout and print it
    Stack(StackArgs),

    /// Render the chart as SVG or a full HTML page
    Chart(ChartArgs),

    /// Validate a data file without aborting on bad rows
    Check,

    /// Print version information
    Version,
}

/// Value mode for the stacked layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    /// Normalize each bin so segments sum to 1.
    Fraction,
    /// Raw record counts.
    Count,
}

impl From<ModeArg> for ValueMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Fraction => ValueMode::Fraction,
            ModeArg::Count => ValueMode::Count,
        }
    }
}

/// Which column provides the series within each age bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum SeriesField {
    /// Operation type (default, matches the overview).
    #[default]
    Optype,
    /// Individual operation name.
    Opname,
    /// Patient sex.
    Sex,
}

impl SeriesField {
    fn extract(self, record: &CaseRecord) -> Option<String> {
        match self {
            SeriesField::Optype => record.optype.clone(),
            SeriesField::Opname => record.opname.clone(),
            SeriesField::Sex => Some(record.sex.clone()),
        }
    }
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// Bin ordering (overrides config)
    #[arg(long)]
    order: Option<SortOrder>,
}

#[derive(Args, Debug)]
struct StackArgs {
    /// Value mode (overrides config)
    #[arg(long)]
    mode: Option<ModeArg>,

    /// Series column
    #[arg(long, default_value = "optype")]
    by: SeriesField,
}

#[derive(Args, Debug)]
struct ChartArgs {
    /// Output path (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit the bare SVG instead of a full HTML page
    #[arg(long)]
    svg_only: bool,

    /// Page title for HTML output
    #[arg(long, default_value = "Surgical cases by age bin")]
    title: String,

    /// Value mode (overrides config)
    #[arg(long)]
    mode: Option<ModeArg>,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.global.quiet {
        LogLevel::Error
    } else {
        match cli.global.verbose {
            0 => LogLevel::Info,
            1 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    };

    // JSONL logs on stderr when stdout is machine-readable JSON.
    let log_format = if cli.global.format == OutputFormat::Json {
        LogFormat::Jsonl
    } else {
        LogFormat::Human
    };

    let log_config = LogConfig::from_env(Some(log_level), Some(log_format));
    init_logging(&log_config);

    let config = match load_config(cli.global.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(ExitCode::ArgsError.as_i32());
        }
    };

    let exit_code = match cli.command {
        None | Some(Commands::Show) => run_show(&cli.global, &config),
        Some(Commands::Stats(args)) => run_stats(&cli.global, &config, &args),
        Some(Commands::Stack(args)) => run_stack(&cli.global, &config, &args),
        Some(Commands::Chart(args)) => run_chart(&cli.global, &config, &args),
        Some(Commands::Check) => run_check(&cli.global, &config),
        Some(Commands::Version) => {
            println!("casestack {}", env!("CARGO_PKG_VERSION"));
            ExitCode::Clean
        }
    };

    std::process::exit(exit_code.as_i32());
}

/// Resolve the data file from the CLI or config.
fn data_path<'a>(global: &'a GlobalOpts, config: &'a AppConfig) -> Result<&'a Path, ExitCode> {
    global
        .data
        .as_deref()
        .or(config.data.as_deref())
        .ok_or_else(|| {
            eprintln!("error: no data file given (use --data or set `data` in casestack.toml)");
            ExitCode::ArgsError
        })
}

/// Map a loader failure to an exit code, reporting it on stderr.
fn loader_exit(e: LoaderError) -> ExitCode {
    eprintln!("error: {e}");
    match e {
        LoaderError::Open { .. } => ExitCode::IoError,
        LoaderError::MissingColumn(_) | LoaderError::Row { .. } | LoaderError::Csv(_) => {
            ExitCode::DataError
        }
    }
}

fn load_records(global: &GlobalOpts, config: &AppConfig) -> Result<Vec<CaseRecord>, ExitCode> {
    let path = data_path(global, config)?;
    load_cases(path).map_err(loader_exit)
}

fn run_show(global: &GlobalOpts, config: &AppConfig) -> ExitCode {
    #[cfg(feature = "ui")]
    {
        let records = match load_records(global, config) {
            Ok(records) => records,
            Err(code) => return code,
        };
        let session = cs_core::session::ExplorerSession::new(records);
        let app = cs_core::tui::App::new(session);
        match cs_core::tui::run_tui(app) {
            Ok(()) => ExitCode::Clean,
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::InternalError
            }
        }
    }
    #[cfg(not(feature = "ui"))]
    {
        let _ = (global, config);
        eprintln!("error: terminal UI not compiled in (enable the 'ui' feature)");
        ExitCode::ArgsError
    }
}

fn run_stats(global: &GlobalOpts, config: &AppConfig, args: &StatsArgs) -> ExitCode {
    let records = match load_records(global, config) {
        Ok(records) => records,
        Err(code) => return code,
    };

    let order = args.order.unwrap_or(config.stats.order);
    let summary = summarize(&records, order);

    match global.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::InternalError;
            }
        },
        OutputFormat::Summary => {
            println!("{} records in {} bins", summary.total, summary.bins.len());
            for bin in &summary.bins {
                println!("  {}: {}", bin.label, bin.count);
            }
        }
        OutputFormat::Md => {
            println!("| Age bin | Records |");
            println!("| ------- | ------- |");
            for bin in &summary.bins {
                println!("| {} | {} |", bin.label, bin.count);
            }
        }
        OutputFormat::Exitcode => {}
    }
    ExitCode::Clean
}

fn run_stack(global: &GlobalOpts, config: &AppConfig, args: &StackArgs) -> ExitCode {
    let records = match load_records(global, config) {
        Ok(records) => records,
        Err(code) => return code,
    };

    let mode = args.mode.map(ValueMode::from).unwrap_or(config.stack.mode);
    let layout = compute_stack(
        &records,
        |r| r.age_bin.clone(),
        |r| args.by.extract(r),
        mode,
    );

    match global.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&layout) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::InternalError;
            }
        },
        OutputFormat::Summary => print_stack_summary(&layout),
        OutputFormat::Md => print_stack_md(&layout),
        OutputFormat::Exitcode => {}
    }
    ExitCode::Clean
}

fn print_stack_summary(layout: &StackLayout) {
    println!(
        "{} groups, {} series, {} records",
        layout.groups.len(),
        layout.series.len(),
        layout.record_count()
    );
    for group in &layout.groups {
        println!("{}:", group.key.label());
        for (series, segment) in layout.series.iter().zip(&group.segments) {
            if segment.is_degenerate() {
                continue;
            }
            match layout.mode {
                ValueMode::Fraction => {
                    println!("  {}: {:.1}%", series.label(), segment.value() * 100.0)
                }
                ValueMode::Count => println!("  {}: {}", series.label(), segment.value() as usize),
            }
        }
    }
}

fn print_stack_md(layout: &StackLayout) {
    let header: Vec<String> = layout.series.iter().map(|s| s.label().to_string()).collect();
    println!("| Age bin | {} |", header.join(" | "));
    println!("|{}", " ------- |".repeat(header.len() + 1));
    for group in &layout.groups {
        let cells: Vec<String> = group
            .segments
            .iter()
            .map(|s| match layout.mode {
                ValueMode::Fraction => format!("{:.3}", s.value()),
                ValueMode::Count => format!("{}", s.value() as usize),
            })
            .collect();
        println!("| {} | {} |", group.key.label(), cells.join(" | "));
    }
}

fn run_chart(global: &GlobalOpts, config: &AppConfig, args: &ChartArgs) -> ExitCode {
    let records = match load_records(global, config) {
        Ok(records) => records,
        Err(code) => return code,
    };

    let mode = args.mode.map(ValueMode::from).unwrap_or(config.stack.mode);
    let layout = compute_stack(
        &records,
        |r| r.age_bin.clone(),
        |r| r.optype.clone(),
        mode,
    );

    let generator = match ChartGenerator::new(config.chart.clone()) {
        Ok(generator) => generator,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::ArgsError;
        }
    };

    let rendered = if args.svg_only {
        generator.render_svg(&layout)
    } else {
        let stats = StatsBlock::from(&summarize(&records, config.stats.order));
        generator.render_html(&layout, &args.title, Some(&stats))
    };

    let content = match rendered {
        Ok(content) => content,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::InternalError;
        }
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, &content) {
                eprintln!("error: failed to write {}: {e}", path.display());
                return ExitCode::IoError;
            }
            tracing::info!(path = %path.display(), bytes = content.len(), "chart written");
        }
        None => println!("{content}"),
    }
    ExitCode::Clean
}

fn run_check(global: &GlobalOpts, config: &AppConfig) -> ExitCode {
    let path = match data_path(global, config) {
        Ok(path) => path,
        Err(code) => return code,
    };

    let report = match scan_cases(path) {
        Ok(report) => report,
        Err(e) => return loader_exit(e),
    };

    match global.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::InternalError;
            }
        },
        OutputFormat::Summary => {
            println!(
                "{} rows checked, {} valid, {} issue(s)",
                report.total_rows,
                report.valid_rows,
                report.issues.len()
            );
            for issue in &report.issues {
                match &issue.column {
                    Some(column) => println!("  row {} [{}]: {}", issue.row, column, issue.message),
                    None => println!("  row {}: {}", issue.row, issue.message),
                }
            }
        }
        OutputFormat::Md => {
            println!("| Row | Column | Issue |");
            println!("| --- | ------ | ----- |");
            for issue in &report.issues {
                println!(
                    "| {} | {} | {} |",
                    issue.row,
                    issue.column.as_deref().unwrap_or("-"),
                    issue.message
                );
            }
        }
        OutputFormat::Exitcode => {}
    }

    if report.has_issues() {
        ExitCode::DataWarnings
    } else {
        ExitCode::Clean
    }
}
