//! Support library for the fontcull CLI binary.
//!
//! Re-exports the CLI module so doctests and integration tests can exercise
//! the scan and subset pipeline without forking a subprocess.

pub mod cli;
pub mod logging;
