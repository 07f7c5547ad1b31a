//! Calendar month keys for fee obligations.
//!
//! A fee month is canonically encoded as a zero-padded `"YYYY-MM"` string.
//! That encoding sorts chronologically under plain lexicographic ordering,
//! and database range filters over the stored keys rely on it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when constructing or parsing a month key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MonthKeyError {
    /// Key is not canonical zero-padded `YYYY-MM`.
    #[error("month key must be formatted as YYYY-MM, got {0:?}")]
    Malformed(String),

    /// Month component outside 1-12.
    #[error("month must be between 1 and 12, got {0}")]
    MonthOutOfRange(u8),

    /// Year component does not fit in four digits.
    #[error("year must fit in four digits, got {0}")]
    YearOutOfRange(u16),
}

/// One calendar month of a fee schedule.
///
/// The derived ordering (year first, then month) is identical to
/// lexicographic ordering of the canonical `"YYYY-MM"` strings, so in-memory
/// comparisons and range queries over the stored keys always agree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct FeeMonth {
    year: u16,
    month: u8,
}

impl FeeMonth {
    /// Creates a month key.
    ///
    /// # Errors
    ///
    /// Returns an error if `month` is outside 1-12 or `year` exceeds 9999
    /// (five-digit years would break lexicographic ordering).
    pub const fn new(year: u16, month: u8) -> Result<Self, MonthKeyError> {
        if year > 9999 {
            return Err(MonthKeyError::YearOutOfRange(year));
        }
        if month == 0 || month > 12 {
            return Err(MonthKeyError::MonthOutOfRange(month));
        }
        Ok(Self { year, month })
    }

    /// Year component.
    #[must_use]
    pub const fn year(self) -> u16 {
        self.year
    }

    /// Month component (1-12).
    #[must_use]
    pub const fn month(self) -> u8 {
        self.month
    }

    /// Every month from `self` through `last`, inclusive, in order.
    ///
    /// Empty when `self > last`.
    pub fn through(self, last: Self) -> impl Iterator<Item = Self> {
        (self.index()..=last.index()).map(Self::from_index)
    }

    /// Number of months in `self ..= last`; zero when `self > last`.
    #[must_use]
    pub fn span(self, last: Self) -> u32 {
        if self > last {
            0
        } else {
            last.index() - self.index() + 1
        }
    }

    /// Zero-based count of months since 0000-01.
    fn index(self) -> u32 {
        u32::from(self.year) * 12 + u32::from(self.month) - 1
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_index(index: u32) -> Self {
        // Only reached with indices derived from valid keys.
        Self {
            year: (index / 12) as u16,
            month: (index % 12 + 1) as u8,
        }
    }
}

impl std::fmt::Display for FeeMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for FeeMonth {
    type Err = MonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let canonical = bytes.len() == 7
            && bytes[4] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || b.is_ascii_digit());
        if !canonical {
            return Err(MonthKeyError::Malformed(s.to_string()));
        }

        let year: u16 = s[..4]
            .parse()
            .map_err(|_| MonthKeyError::Malformed(s.to_string()))?;
        let month: u8 = s[5..]
            .parse()
            .map_err(|_| MonthKeyError::Malformed(s.to_string()))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for FeeMonth {
    type Error = MonthKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FeeMonth> for String {
    fn from(month: FeeMonth) -> Self {
        month.to_string()
    }
}
