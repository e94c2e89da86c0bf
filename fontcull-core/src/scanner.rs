//! Directory-walking character collector.
//!
//! Walks a project's source tree, filters files by extension and directory
//! skip-list, and unions every character the accepted files contain on top
//! of the baseline set. One optional root file outside the walked tree is
//! merged as well.

use std::{
    collections::BTreeSet,
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{Span, debug, field, info, instrument, warn};
use walkdir::WalkDir;

use crate::{
    charset::{Charset, baseline},
    error::ScanError,
};

/// File extensions accepted when none are configured explicitly.
pub const DEFAULT_EXTENSIONS: [&str; 7] =
    [".ts", ".vue", ".html", ".json", ".js", ".tsx", ".jsx"];

/// Directory names pruned from the walk when none are configured explicitly.
pub const DEFAULT_SKIP_DIRS: [&str; 9] = [
    "node_modules",
    "dist",
    "docs",
    ".git",
    ".vscode",
    ".nuxt",
    ".output",
    "public",
    "scripts",
];

const DEFAULT_SOURCE_DIR: &str = "src";
const DEFAULT_ROOT_FILE: &str = "index.html";

/// Configures and constructs [`Scanner`] instances.
///
/// # Examples
/// ```
/// use fontcull_core::ScannerBuilder;
///
/// let scanner = ScannerBuilder::new()
///     .with_extensions(["ts", ".HTML"])
///     .build()
///     .expect("extensions are usable");
/// assert_eq!(scanner.source_dir(), std::path::Path::new("src"));
/// ```
#[derive(Debug, Clone)]
pub struct ScannerBuilder {
    source_dir: PathBuf,
    root_file: Option<PathBuf>,
    extensions: Vec<String>,
    skip_dirs: BTreeSet<String>,
}

impl Default for ScannerBuilder {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            root_file: Some(PathBuf::from(DEFAULT_ROOT_FILE)),
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| (*ext).to_owned()).collect(),
            skip_dirs: DEFAULT_SKIP_DIRS.iter().map(|dir| (*dir).to_owned()).collect(),
        }
    }
}

impl ScannerBuilder {
    /// Creates a builder populated with the default web-project profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the project-relative directory that is walked.
    #[must_use]
    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    /// Overrides the project-relative extra file merged after the walk.
    #[must_use]
    pub fn with_root_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.root_file = Some(file.into());
        self
    }

    /// Disables the extra root file entirely.
    #[must_use]
    pub fn without_root_file(mut self) -> Self {
        self.root_file = None;
        self
    }

    /// Replaces the accepted extension set.
    ///
    /// Entries are normalised during [`Self::build`]: lowercased, with a
    /// leading dot added when missing.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the set of directory names pruned from the walk.
    #[must_use]
    pub fn with_skip_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Validates the configuration and constructs a [`Scanner`].
    ///
    /// # Errors
    /// Returns [`ScanError::EmptyExtensions`] when no extensions are
    /// configured and [`ScanError::InvalidExtension`] when an entry is
    /// blank, reduces to a bare dot, or keeps a dot beyond the leading one.
    pub fn build(self) -> Result<Scanner, ScanError> {
        if self.extensions.is_empty() {
            return Err(ScanError::EmptyExtensions);
        }
        let extensions = self
            .extensions
            .iter()
            .map(|raw| normalize_extension(raw))
            .collect::<Result<BTreeSet<_>, _>>()?;
        Ok(Scanner {
            source_dir: self.source_dir,
            root_file: self.root_file,
            extensions,
            skip_dirs: self.skip_dirs,
        })
    }
}

fn normalize_extension(raw: &str) -> Result<String, ScanError> {
    let trimmed = raw.trim();
    let stem = trimmed.strip_prefix('.').unwrap_or(trimmed);
    // `Path::extension` is the suffix after the final dot, so an entry with
    // an interior dot could never match a file.
    if stem.is_empty() || stem.contains('.') {
        return Err(ScanError::InvalidExtension {
            raw: raw.to_owned(),
        });
    }
    Ok(format!(".{}", stem.to_lowercase()))
}

/// Collects the distinct characters used across a project's sources.
///
/// # Examples
/// ```
/// use fontcull_core::{ScannerBuilder, baseline};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let project = tempfile::tempdir()?;
/// let scanner = ScannerBuilder::new().build()?;
/// let outcome = scanner.collect(project.path())?;
/// // An empty project contributes nothing beyond the baseline.
/// assert_eq!(outcome.charset(), baseline());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Scanner {
    source_dir: PathBuf,
    root_file: Option<PathBuf>,
    extensions: BTreeSet<String>,
    skip_dirs: BTreeSet<String>,
}

impl Scanner {
    /// Returns the project-relative directory the scanner walks.
    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Returns the project-relative root file merged after the walk, if any.
    #[must_use]
    pub fn root_file(&self) -> Option<&Path> {
        self.root_file.as_deref()
    }

    /// Walks `project_dir` and returns the collected characters together
    /// with file counts.
    ///
    /// The walk starts from the baseline set, visits regular files whose
    /// lowercased extension is accepted, and prunes skip-listed directory
    /// names at any depth. Files that are not valid UTF-8 or not readable
    /// due to permissions are skipped and counted. A missing source
    /// directory contributes nothing. The root file, when present on disk,
    /// is merged last and must be readable.
    ///
    /// # Errors
    /// Returns [`ScanError::FileRead`] when a walked file fails to read for
    /// any other reason and [`ScanError::RootFileRead`] when the root file
    /// exists but cannot be read.
    #[instrument(
        name = "scan.collect",
        err,
        skip(self, project_dir),
        fields(
            project_dir = %project_dir.display(),
            files_scanned = field::Empty,
            files_skipped = field::Empty,
            chars = field::Empty,
        ),
    )]
    pub fn collect(&self, project_dir: &Path) -> Result<ScanOutcome, ScanError> {
        let mut charset = baseline().clone();
        let mut files_scanned = 0_usize;
        let mut files_skipped = 0_usize;

        let scan_root = project_dir.join(&self.source_dir);
        if scan_root.is_dir() {
            self.walk_tree(&scan_root, &mut charset, &mut files_scanned, &mut files_skipped)?;
        } else {
            warn!(
                path = %scan_root.display(),
                "source directory missing, collecting baseline only"
            );
        }

        if let Some(root_file) = &self.root_file {
            let path = project_dir.join(root_file);
            if path.exists() {
                let contents = fs::read_to_string(&path)
                    .map_err(|source| ScanError::RootFileRead {
                        path: path.clone(),
                        source,
                    })?;
                charset.extend_from_str(&contents);
                files_scanned += 1;
            }
        }

        let span = Span::current();
        span.record("files_scanned", files_scanned);
        span.record("files_skipped", files_skipped);
        span.record("chars", charset.len());
        info!(
            files_scanned,
            files_skipped,
            chars = charset.len(),
            "character collection completed"
        );

        Ok(ScanOutcome {
            charset,
            files_scanned,
            files_skipped,
        })
    }

    fn walk_tree(
        &self,
        scan_root: &Path,
        charset: &mut Charset,
        files_scanned: &mut usize,
        files_skipped: &mut usize,
    ) -> Result<(), ScanError> {
        let walker = WalkDir::new(scan_root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                // Skip names prune directories only, and never the walk root.
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !self.is_skipped(entry.file_name())
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable walk entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.matches_extension(entry.path()) {
                continue;
            }
            match fs::read_to_string(entry.path()) {
                Ok(contents) => {
                    charset.extend_from_str(&contents);
                    *files_scanned += 1;
                }
                Err(err) if is_skippable_read_error(&err) => {
                    debug!(
                        path = %entry.path().display(),
                        error = %err,
                        "skipping unreadable file"
                    );
                    *files_skipped += 1;
                }
                Err(source) => {
                    return Err(ScanError::FileRead {
                        path: entry.path().to_path_buf(),
                        source,
                    });
                }
            }
        }
        Ok(())
    }

    fn is_skipped(&self, name: &std::ffi::OsStr) -> bool {
        name.to_str().is_some_and(|name| self.skip_dirs.contains(name))
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(&format!(".{}", ext.to_lowercase())))
    }
}

/// Only decode and permission failures are tolerated per file; anything else
/// aborts the scan.
fn is_skippable_read_error(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::InvalidData | io::ErrorKind::PermissionDenied
    )
}

/// Characters and file counts produced by [`Scanner::collect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    charset: Charset,
    files_scanned: usize,
    files_skipped: usize,
}

impl ScanOutcome {
    /// Returns the collected character set.
    #[must_use]
    pub fn charset(&self) -> &Charset {
        &self.charset
    }

    /// Consumes the outcome, yielding the collected character set.
    #[must_use]
    pub fn into_charset(self) -> Charset {
        self.charset
    }

    /// Returns how many files contributed characters (root file included).
    #[must_use]
    pub fn files_scanned(&self) -> usize {
        self.files_scanned
    }

    /// Returns how many files were skipped as unreadable or non-UTF-8.
    #[must_use]
    pub fn files_skipped(&self) -> usize {
        self.files_skipped
    }
}
