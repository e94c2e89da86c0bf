//! Command-line interface orchestration for fontcull.
//!
//! The CLI offers a `scan` command that reports which characters a project
//! uses and a `subset` command that additionally rewrites a font in place
//! through an external subsetting tool.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, ScanArgs, ScanCommand, SubsetCommand,
    render_summary, run_cli,
};
