//! Command implementations and argument parsing for the fontcull CLI.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use fontcull_core::{
    DEFAULT_PROGRAM, ScanError, ScanOutcome, Scanner, ScannerBuilder, SubsetError, SubsetReport,
    SubsetterBuilder,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "fontcull",
    about = "Trim a web font down to the characters a project uses."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Collect the characters used across the project sources.
    Scan(ScanCommand),
    /// Collect characters and subset a font file in place.
    Subset(SubsetCommand),
}

/// Scan configuration shared by both commands.
#[derive(Debug, Args, Clone)]
pub struct ScanArgs {
    /// Project directory to scan.
    #[arg(default_value = ".")]
    pub project_dir: PathBuf,

    /// Directory inside the project to walk for sources.
    #[arg(long = "source-dir", default_value = "src")]
    pub source_dir: PathBuf,

    /// Extra project-relative file merged into the scan.
    #[arg(long = "root-file", default_value = "index.html")]
    pub root_file: PathBuf,

    /// Skip the extra root file entirely.
    #[arg(long = "no-root-file", conflicts_with = "root_file")]
    pub no_root_file: bool,

    /// File extension to accept, replacing the defaults (repeatable).
    #[arg(long = "ext")]
    pub extensions: Vec<String>,

    /// Directory name to skip, replacing the defaults (repeatable).
    #[arg(long = "skip-dir")]
    pub skip_dirs: Vec<String>,
}

/// Options accepted by the `scan` command.
#[derive(Debug, Args, Clone)]
pub struct ScanCommand {
    /// Scan configuration.
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Print every collected character after the summary.
    #[arg(long = "show-chars")]
    pub show_chars: bool,
}

/// Options accepted by the `subset` command.
#[derive(Debug, Args, Clone)]
pub struct SubsetCommand {
    /// Scan configuration.
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Font file to subset in place, relative to the project directory.
    #[arg(long)]
    pub font: PathBuf,

    /// Subsetting program to invoke.
    #[arg(long = "subsetter", default_value = DEFAULT_PROGRAM)]
    pub subsetter: String,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Character collection failed.
    #[error(transparent)]
    Scan(#[from] ScanError),
    /// Font subsetting failed.
    #[error(transparent)]
    Subset(#[from] SubsetError),
}

impl CliError {
    /// Retrieve the stable machine-readable code of the underlying failure.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Scan(err) => err.code().as_str(),
            Self::Subset(err) => err.code().as_str(),
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// Outcome of a scan-only run.
    Scan {
        /// Characters and file counts produced by the walk.
        outcome: ScanOutcome,
        /// Serialized member listing, when requested.
        listing: Option<String>,
    },
    /// Outcome of a full subsetting run.
    Subset {
        /// Size figures for the rewritten font.
        report: SubsetReport,
    },
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when scanning or subsetting fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use fontcull_cli::cli::{Cli, Command, ExecutionSummary, ScanArgs, ScanCommand, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let project = tempfile::tempdir()?;
/// std::fs::create_dir(project.path().join("src"))?;
/// std::fs::write(project.path().join("src/app.ts"), "let x = 1;")?;
/// let cli = Cli {
///     command: Command::Scan(ScanCommand {
///         scan: ScanArgs {
///             project_dir: project.path().to_path_buf(),
///             source_dir: "src".into(),
///             root_file: "index.html".into(),
///             no_root_file: false,
///             extensions: Vec::new(),
///             skip_dirs: Vec::new(),
///         },
///         show_chars: false,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert!(matches!(summary, ExecutionSummary::Scan { .. }));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Scan(scan) => {
            Span::current().record("command", field::display("scan"));
            run_scan(scan)
        }
        Command::Subset(subset) => {
            Span::current().record("command", field::display("subset"));
            run_subset(subset)
        }
    }
}

#[instrument(
    name = "cli.scan",
    err,
    skip(command),
    fields(project_dir = field::Empty),
)]
pub(super) fn run_scan(command: ScanCommand) -> Result<ExecutionSummary, CliError> {
    let ScanCommand { scan, show_chars } = command;
    Span::current().record("project_dir", field::display(scan.project_dir.display()));

    let scanner = build_scanner(&scan)?;
    let outcome = scanner.collect(&scan.project_dir)?;
    info!(
        files_scanned = outcome.files_scanned(),
        files_skipped = outcome.files_skipped(),
        chars = outcome.charset().len(),
        "scan completed"
    );

    let listing = show_chars.then(|| outcome.charset().to_subset_text());
    Ok(ExecutionSummary::Scan { outcome, listing })
}

#[instrument(
    name = "cli.subset",
    err,
    skip(command),
    fields(project_dir = field::Empty, font = field::Empty, subsetter = field::Empty),
)]
pub(super) fn run_subset(command: SubsetCommand) -> Result<ExecutionSummary, CliError> {
    let SubsetCommand {
        scan,
        font,
        subsetter,
    } = command;
    let font_path = scan.project_dir.join(&font);

    let span = Span::current();
    span.record("project_dir", field::display(scan.project_dir.display()));
    span.record("font", field::display(font_path.display()));
    span.record("subsetter", field::display(&subsetter));

    let scanner = build_scanner(&scan)?;
    let outcome = scanner.collect(&scan.project_dir)?;
    let tool = SubsetterBuilder::new().with_program(subsetter).build()?;
    let report = tool.subset(&font_path, outcome.charset())?;
    info!(
        chars = report.char_count(),
        original_bytes = report.original_bytes(),
        subset_bytes = report.subset_bytes(),
        "subset completed"
    );

    Ok(ExecutionSummary::Subset { report })
}

fn build_scanner(args: &ScanArgs) -> Result<Scanner, ScanError> {
    let mut builder = ScannerBuilder::new().with_source_dir(&args.source_dir);
    builder = if args.no_root_file {
        builder.without_root_file()
    } else {
        builder.with_root_file(&args.root_file)
    };
    if !args.extensions.is_empty() {
        builder = builder.with_extensions(args.extensions.iter().cloned());
    }
    if !args.skip_dirs.is_empty() {
        builder = builder.with_skip_dirs(args.skip_dirs.iter().cloned());
    }
    builder.build()
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io::Cursor;
/// # use fontcull_cli::cli::{ExecutionSummary, render_summary};
/// # use fontcull_core::SubsetReport;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary::Subset {
///     report: SubsetReport::new(1200, 330_604, 48_212),
/// };
/// let mut buffer = Cursor::new(Vec::new());
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer.into_inner())?;
/// assert!(text.contains("saved: 85.4%"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Scan { outcome, listing } => {
            writeln!(writer, "scanned files: {}", outcome.files_scanned())?;
            writeln!(writer, "skipped files: {}", outcome.files_skipped())?;
            writeln!(writer, "characters: {}", outcome.charset().len())?;
            if let Some(listing) = listing {
                writeln!(writer, "{listing}")?;
            }
        }
        ExecutionSummary::Subset { report } => {
            writeln!(writer, "characters: {}", report.char_count())?;
            writeln!(
                writer,
                "original: {} bytes",
                group_digits(report.original_bytes())
            )?;
            writeln!(
                writer,
                "subset: {} bytes ({}%)",
                group_digits(report.subset_bytes()),
                report.percent_of_original()
            )?;
            writeln!(writer, "saved: {:.1}%", report.savings_percent())?;
        }
    }
    Ok(())
}

/// Formats `value` with thousands separators, matching the report style.
pub(super) fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
