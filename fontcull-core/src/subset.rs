//! External subsetter invocation.
//!
//! Shells out to a fontTools-style subsetting program, overwriting the font
//! in place and measuring its size before and after.

use std::{ffi::OsString, fs, io, path::Path, process::Command};

use tracing::{Span, debug, field, info, instrument};

use crate::{charset::Charset, error::SubsetError, report::SubsetReport};

/// Subsetting program invoked when none is configured explicitly.
pub const DEFAULT_PROGRAM: &str = "pyftsubset";

/// Configures and constructs [`Subsetter`] instances.
#[derive(Debug, Clone)]
pub struct SubsetterBuilder {
    program: String,
}

impl Default for SubsetterBuilder {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_owned(),
        }
    }
}

impl SubsetterBuilder {
    /// Creates a builder that invokes [`DEFAULT_PROGRAM`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the subsetting program to invoke.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Validates the configuration and constructs a [`Subsetter`].
    ///
    /// # Errors
    /// Returns [`SubsetError::EmptyProgram`] when the configured program is
    /// blank.
    pub fn build(self) -> Result<Subsetter, SubsetError> {
        if self.program.trim().is_empty() {
            return Err(SubsetError::EmptyProgram);
        }
        Ok(Subsetter {
            program: self.program,
        })
    }
}

/// Runs the external subsetting program against a font file.
#[derive(Debug)]
pub struct Subsetter {
    program: String,
}

impl Subsetter {
    /// Returns the program the subsetter invokes.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Subsets `font` in place down to the characters in `charset`.
    ///
    /// The font is overwritten by the external program, so its size is
    /// captured before launching and again after a successful run. Standard
    /// error is captured and surfaced when the program reports failure.
    ///
    /// # Errors
    /// Returns [`SubsetError::FontMissing`] or [`SubsetError::FontMetadata`]
    /// when the font cannot be measured, [`SubsetError::Launch`] when the
    /// program cannot be started, and [`SubsetError::ToolFailed`] when it
    /// exits unsuccessfully.
    #[instrument(
        name = "subset.run",
        err,
        skip(self, font, charset),
        fields(
            program = %self.program,
            font = %font.display(),
            chars = charset.len(),
            original_bytes = field::Empty,
            subset_bytes = field::Empty,
        ),
    )]
    pub fn subset(&self, font: &Path, charset: &Charset) -> Result<SubsetReport, SubsetError> {
        let original_bytes = font_size(font)?;
        let subset_text = charset.to_subset_text();
        debug!(program = %self.program, font = %font.display(), "invoking subsetter");
        let output = Command::new(&self.program)
            .args(subset_args(font, &subset_text))
            .output()
            .map_err(|source| SubsetError::Launch {
                program: self.program.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(SubsetError::ToolFailed {
                program: self.program.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        let subset_bytes = font_size(font)?;

        let span = Span::current();
        span.record("original_bytes", original_bytes);
        span.record("subset_bytes", subset_bytes);
        info!(original_bytes, subset_bytes, "subsetting completed");

        Ok(SubsetReport::new(charset.len(), original_bytes, subset_bytes))
    }
}

fn font_size(font: &Path) -> Result<u64, SubsetError> {
    match fs::metadata(font) {
        Ok(metadata) => Ok(metadata.len()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(SubsetError::FontMissing {
            path: font.to_path_buf(),
        }),
        Err(source) => Err(SubsetError::FontMetadata {
            path: font.to_path_buf(),
            source,
        }),
    }
}

fn subset_args(font: &Path, subset_text: &str) -> [OsString; 5] {
    let mut text_arg = OsString::from("--text=");
    text_arg.push(subset_text);
    let mut output_arg = OsString::from("--output-file=");
    output_arg.push(font);
    [
        font.as_os_str().to_owned(),
        text_arg,
        output_arg,
        OsString::from("--no-hinting"),
        OsString::from("--desubroutinize"),
    ]
}
