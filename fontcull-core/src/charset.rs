//! Ordered character-set value type and the baseline character constant.
//!
//! A [`Charset`] accumulates every distinct character discovered during a
//! scan. Iteration order is ascending by Unicode scalar value, which is the
//! exact order the subsetting text must be serialized in.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;

/// Characters removed from every [`Charset`] regardless of insertion path.
///
/// Only these four are stripped; other control characters pass through so
/// the subset keeps whatever glyphs the sources genuinely reference.
const STRIPPED_CHARS: [char; 4] = ['\n', '\r', '\t', '\0'];

/// CJK punctuation retained in the baseline set.
const CJK_PUNCTUATION: &str = "，。、；：？！（）【】《》—…·";

/// Mathematical and arrow symbols retained in the baseline set.
const MATH_SYMBOLS: &str = "×÷±≤≥≠→←↑↓";

static BASELINE: Lazy<Charset> = Lazy::new(|| {
    let mut chars = Charset::new();
    for ch in ' '..='~' {
        chars.insert(ch);
    }
    chars.extend_from_str(CJK_PUNCTUATION);
    chars.extend_from_str(MATH_SYMBOLS);
    chars
});

/// Returns the baseline character set that is always retained regardless of
/// scan results: ASCII visible characters, common CJK punctuation, and a
/// handful of mathematical symbols (121 characters in total).
///
/// # Examples
/// ```
/// use fontcull_core::baseline;
///
/// assert_eq!(baseline().len(), 121);
/// assert!(baseline().contains('A'));
/// assert!(baseline().contains('，'));
/// ```
#[must_use]
pub fn baseline() -> &'static Charset {
    &BASELINE
}

/// Ordered set of characters destined for the font subset.
///
/// # Examples
/// ```
/// use fontcull_core::Charset;
///
/// let mut chars = Charset::new();
/// chars.extend_from_str("ba\n中");
/// assert_eq!(chars.to_subset_text(), "ab中");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Charset {
    chars: BTreeSet<char>,
}

impl Charset {
    /// Creates an empty character set.
    ///
    /// # Examples
    /// ```
    /// use fontcull_core::Charset;
    ///
    /// assert!(Charset::new().is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a single character, returning whether the set grew.
    ///
    /// Stripped control characters are rejected and never enter the set.
    ///
    /// # Examples
    /// ```
    /// use fontcull_core::Charset;
    ///
    /// let mut chars = Charset::new();
    /// assert!(chars.insert('a'));
    /// assert!(!chars.insert('a'));
    /// assert!(!chars.insert('\n'));
    /// ```
    pub fn insert(&mut self, ch: char) -> bool {
        if STRIPPED_CHARS.contains(&ch) {
            return false;
        }
        self.chars.insert(ch)
    }

    /// Unions every character of `text` into the set.
    pub fn extend_from_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.insert(ch);
        }
    }

    /// Unions `other` into `self`.
    ///
    /// # Examples
    /// ```
    /// use fontcull_core::Charset;
    ///
    /// let mut left: Charset = "ab".chars().collect();
    /// let right: Charset = "bc".chars().collect();
    /// left.merge(&right);
    /// assert_eq!(left.to_subset_text(), "abc");
    /// ```
    pub fn merge(&mut self, other: &Self) {
        self.chars.extend(other.chars.iter().copied());
    }

    /// Reports whether `ch` is a member of the set.
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    /// Returns the number of distinct characters collected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Reports whether the set holds no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Iterates the members in ascending scalar-value order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }

    /// Serializes the set to the text handed to the subsetting tool: every
    /// member concatenated in ascending scalar-value order.
    ///
    /// # Examples
    /// ```
    /// use fontcull_core::Charset;
    ///
    /// let chars: Charset = "子0a".chars().collect();
    /// assert_eq!(chars.to_subset_text(), "0a子");
    /// ```
    #[must_use]
    pub fn to_subset_text(&self) -> String {
        self.chars.iter().collect()
    }
}

impl FromIterator<char> for Charset {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut chars = Self::new();
        for ch in iter {
            chars.insert(ch);
        }
        chars
    }
}

impl Extend<char> for Charset {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        for ch in iter {
            self.insert(ch);
        }
    }
}
