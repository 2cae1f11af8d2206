//! Ledger entries and the year-month key they are bucketed under.

use std::{borrow::Borrow, fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::errors::KakeiboError;

const YEAR_MONTH_LEN: usize = 7;
const ENTRY_ID_LEN: usize = 8;
const DATE_LEN: usize = 10;

/// One income or expense record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    pub id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub title: String,
    pub category: String,
    /// Comma-separated tag names.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub income: Option<f64>,
    #[serde(default)]
    pub outgo: Option<f64>,
    #[serde(default)]
    pub memo: String,
}

impl LedgerEntry {
    /// Creates an entry with a freshly generated id and no amounts.
    pub fn new(
        date: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Self::new_id(),
            date: date.into(),
            title: title.into(),
            category: category.into(),
            tags: String::new(),
            income: None,
            outgo: None,
            memo: String::new(),
        }
    }

    /// Short random identifier in the same shape as the ones the web client issues.
    pub fn new_id() -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(ENTRY_ID_LEN);
        id
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_income(mut self, amount: f64) -> Self {
        self.income = Some(amount);
        self.outgo = None;
        self
    }

    pub fn with_outgo(mut self, amount: f64) -> Self {
        self.outgo = Some(amount);
        self.income = None;
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Bucket key derived from the first seven characters of `date`.
    ///
    /// Returns `None` when the prefix is not a well-formed `YYYY-MM`; such an
    /// entry can never land in a fetched bucket.
    pub fn year_month(&self) -> Option<YearMonth> {
        self.date
            .get(..YEAR_MONTH_LEN)
            .and_then(|prefix| prefix.parse().ok())
    }

    /// Signed amount for display: income minus outgo, missing values count as zero.
    pub fn amount(&self) -> f64 {
        self.income.unwrap_or(0.0) - self.outgo.unwrap_or(0.0)
    }
}

/// Validated `YYYY-MM` bucket key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth(String);

impl YearMonth {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds a full date string for `day` within this month, e.g. `2024-05-01`.
    pub fn day(&self, day: u32) -> String {
        format!("{}-{:02}", self.0, day)
    }
}

impl FromStr for YearMonth {
    type Err = KakeiboError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let bytes = value.as_bytes();
        let shaped = bytes.len() == YEAR_MONTH_LEN
            && bytes[4] == b'-'
            && bytes[..4].iter().all(u8::is_ascii_digit)
            && bytes[5..].iter().all(u8::is_ascii_digit);
        if !shaped || NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").is_err() {
            return Err(KakeiboError::InvalidYearMonth(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }
}

impl TryFrom<String> for YearMonth {
    type Error = KakeiboError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.0
    }
}

impl Borrow<str> for YearMonth {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parses a full `YYYY-MM-DD` date, as accepted from interactive input.
pub fn parse_entry_date(input: &str) -> Result<NaiveDate, KakeiboError> {
    if input.len() != DATE_LEN {
        return Err(KakeiboError::InvalidDate(input.to_string()));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| KakeiboError::InvalidDate(input.to_string()))
}
