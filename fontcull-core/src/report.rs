//! Size figures produced by a subsetting run.

/// Before-and-after measurements for one subsetting run.
///
/// # Examples
/// ```
/// use fontcull_core::SubsetReport;
///
/// let report = SubsetReport::new(1200, 330_604, 48_212);
/// assert_eq!(report.percent_of_original(), 14);
/// assert!((report.savings_percent() - 85.4).abs() < 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubsetReport {
    char_count: usize,
    original_bytes: u64,
    subset_bytes: u64,
}

impl SubsetReport {
    /// Creates a report from a character count and the font sizes measured
    /// before and after subsetting.
    #[must_use]
    pub fn new(char_count: usize, original_bytes: u64, subset_bytes: u64) -> Self {
        Self {
            char_count,
            original_bytes,
            subset_bytes,
        }
    }

    /// Returns how many distinct characters were kept in the font.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Returns the font size in bytes before subsetting.
    #[must_use]
    pub fn original_bytes(&self) -> u64 {
        self.original_bytes
    }

    /// Returns the font size in bytes after subsetting.
    #[must_use]
    pub fn subset_bytes(&self) -> u64 {
        self.subset_bytes
    }

    /// Returns the subset size as a whole-number percentage of the original,
    /// rounded down. An empty original reports zero.
    #[must_use]
    pub fn percent_of_original(&self) -> u64 {
        if self.original_bytes == 0 {
            return 0;
        }
        self.subset_bytes * 100 / self.original_bytes
    }

    /// Returns the size reduction as a percentage of the original. Negative
    /// when the font grew. An empty original reports zero.
    #[must_use]
    pub fn savings_percent(&self) -> f64 {
        if self.original_bytes == 0 {
            return 0.0;
        }
        (1.0 - self.subset_bytes as f64 / self.original_bytes as f64) * 100.0
    }
}
