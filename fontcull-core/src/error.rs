//! Error types for the fontcull core library.
//!
//! Defines the error enums exposed by the public API together with the
//! stable machine-readable codes the CLI logs alongside failures.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Errors raised while configuring or running the character scanner.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ScanError {
    /// The scanner was configured with no file extensions to accept.
    #[error("at least one file extension must be configured")]
    EmptyExtensions,
    /// A configured extension was blank, a bare dot, or kept a dot beyond
    /// the leading one.
    #[error("extension `{raw}` is not a usable file extension")]
    InvalidExtension {
        /// The extension exactly as the caller supplied it.
        raw: String,
    },
    /// Reading a matched source file failed for a reason other than invalid
    /// UTF-8 or missing permissions.
    #[error("failed to read `{path}`: {source}")]
    FileRead {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The configured root file exists but could not be read. Unlike walked
    /// files, the root file is read unguarded, so invalid UTF-8 fails here.
    #[error("failed to read root file `{path}`: {source}")]
    RootFileRead {
        /// Path of the root file that could not be read.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
}

/// Stable codes describing [`ScanError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ScanErrorCode {
    /// The scanner was configured with no file extensions to accept.
    EmptyExtensions,
    /// A configured extension was not usable as a file suffix.
    InvalidExtension,
    /// Reading a matched source file failed.
    FileRead,
    /// The configured root file could not be read.
    RootFileRead,
}

impl ScanErrorCode {
    /// Return the stable machine-readable representation of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyExtensions => "SCAN_EMPTY_EXTENSIONS",
            Self::InvalidExtension => "SCAN_INVALID_EXTENSION",
            Self::FileRead => "SCAN_FILE_READ",
            Self::RootFileRead => "SCAN_ROOT_FILE_READ",
        }
    }
}

impl fmt::Display for ScanErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ScanError {
    /// Retrieve the stable [`ScanErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> ScanErrorCode {
        match self {
            Self::EmptyExtensions => ScanErrorCode::EmptyExtensions,
            Self::InvalidExtension { .. } => ScanErrorCode::InvalidExtension,
            Self::FileRead { .. } => ScanErrorCode::FileRead,
            Self::RootFileRead { .. } => ScanErrorCode::RootFileRead,
        }
    }
}

/// Errors raised while configuring or invoking the external subsetter.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SubsetError {
    /// The subsetter was configured with an empty program name.
    #[error("subsetter program name must not be empty")]
    EmptyProgram,
    /// The font file targeted for subsetting does not exist.
    #[error("font file `{path}` does not exist")]
    FontMissing {
        /// Path where the font was expected.
        path: PathBuf,
    },
    /// Querying the font file's size failed.
    #[error("failed to read metadata for `{path}`: {source}")]
    FontMetadata {
        /// Path of the font whose metadata was queried.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The subsetting tool could not be spawned at all.
    #[error("failed to launch subsetter `{program}`: {source}")]
    Launch {
        /// Program name that could not be spawned.
        program: String,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The subsetting tool ran but exited unsuccessfully.
    #[error("subsetter `{program}` failed{}: {stderr}", exit_label(.code))]
    ToolFailed {
        /// Program name that reported the failure.
        program: String,
        /// Exit code, when the tool exited rather than being terminated.
        code: Option<i32>,
        /// Captured standard error output of the tool.
        stderr: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {code}"),
        None => String::new(),
    }
}

/// Stable codes describing [`SubsetError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum SubsetErrorCode {
    /// The subsetter was configured with an empty program name.
    EmptyProgram,
    /// The font file targeted for subsetting does not exist.
    FontMissing,
    /// Querying the font file's size failed.
    FontMetadata,
    /// The subsetting tool could not be spawned.
    Launch,
    /// The subsetting tool exited unsuccessfully.
    ToolFailed,
}

impl SubsetErrorCode {
    /// Return the stable machine-readable representation of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyProgram => "SUBSET_EMPTY_PROGRAM",
            Self::FontMissing => "SUBSET_FONT_MISSING",
            Self::FontMetadata => "SUBSET_FONT_METADATA",
            Self::Launch => "SUBSET_LAUNCH",
            Self::ToolFailed => "SUBSET_TOOL_FAILED",
        }
    }
}

impl fmt::Display for SubsetErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SubsetError {
    /// Retrieve the stable [`SubsetErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> SubsetErrorCode {
        match self {
            Self::EmptyProgram => SubsetErrorCode::EmptyProgram,
            Self::FontMissing { .. } => SubsetErrorCode::FontMissing,
            Self::FontMetadata { .. } => SubsetErrorCode::FontMetadata,
            Self::Launch { .. } => SubsetErrorCode::Launch,
            Self::ToolFailed { .. } => SubsetErrorCode::ToolFailed,
        }
    }
}
