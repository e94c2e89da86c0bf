//! Core engine for trimming web fonts down to the characters a project uses.
//!
//! The crate walks a project's source tree to collect every distinct
//! character in use ([`Scanner`]), seeds the collection with a fixed
//! baseline of always-kept characters ([`baseline`]), and drives an
//! external fontTools-style program to rewrite the font in place
//! ([`Subsetter`]). The resulting [`SubsetReport`] carries the
//! before-and-after sizes.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use fontcull_core::{ScannerBuilder, SubsetterBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scanner = ScannerBuilder::new().build()?;
//! let outcome = scanner.collect(Path::new("."))?;
//! let subsetter = SubsetterBuilder::new().build()?;
//! let report = subsetter.subset(Path::new("fonts/app.woff2"), outcome.charset())?;
//! println!("kept {} characters", report.char_count());
//! # Ok(())
//! # }
//! ```

mod charset;
mod error;
mod report;
mod scanner;
mod subset;

pub use charset::{Charset, baseline};
pub use error::{ScanError, ScanErrorCode, SubsetError, SubsetErrorCode};
pub use report::SubsetReport;
pub use scanner::{DEFAULT_EXTENSIONS, DEFAULT_SKIP_DIRS, ScanOutcome, Scanner, ScannerBuilder};
pub use subset::{DEFAULT_PROGRAM, Subsetter, SubsetterBuilder};
