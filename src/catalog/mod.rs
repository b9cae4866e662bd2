pub mod parser;
pub mod store;

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use parser::QuestionParser;
pub use store::{Catalog, FsCatalog};

pub const TITLE: &str = "Title";
pub const DIFFICULTY: &str = "Difficulty";
pub const ACCEPTANCE: &str = "Acceptance %";
pub const FREQUENCY: &str = "Frequency %";
pub const URL: &str = "URL";

/// A company is nothing more than a directory under the data root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Company(String);

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn into_name(self) -> String {
        self.0
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Company {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One CSV data line keyed by the header row. Values are kept verbatim and
/// columns keep the header's order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionRow(IndexMap<String, String>);

impl QuestionRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.get(TITLE)
    }

    pub fn difficulty(&self) -> Option<&str> {
        self.get(DIFFICULTY)
    }

    pub fn acceptance(&self) -> Option<&str> {
        self.get(ACCEPTANCE)
    }

    pub fn frequency(&self) -> Option<&str> {
        self.get(FREQUENCY)
    }

    pub fn url(&self) -> Option<&str> {
        self.get(URL)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QuestionRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Time window keyword selecting which CSV file of a company is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Timeframe {
    All,
    #[default]
    SixMonths,
    ThreeMonths,
    ThirtyDays,
    MoreThanSixMonths,
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [
        Timeframe::All,
        Timeframe::SixMonths,
        Timeframe::ThreeMonths,
        Timeframe::ThirtyDays,
        Timeframe::MoreThanSixMonths,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::All => "all",
            Timeframe::SixMonths => "six-months",
            Timeframe::ThreeMonths => "three-months",
            Timeframe::ThirtyDays => "thirty-days",
            Timeframe::MoreThanSixMonths => "more-than-six-months",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::All => "All Time",
            Timeframe::SixMonths => "Last 6 Months",
            Timeframe::ThreeMonths => "Last 3 Months",
            Timeframe::ThirtyDays => "Last 30 Days",
            Timeframe::MoreThanSixMonths => "More than 6 Months",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.csv", self.as_str())
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| Error::Invalid(format!("Unknown timeframe: {}", s)))
    }
}

/// Difficulty values as written in the CSV files. Matching is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| Error::Invalid(format!("Unknown difficulty: {}", s)))
    }
}
