use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::catalog::{Difficulty, DIFFICULTY, TITLE};
use crate::error::{Error, Result};

/// Case-insensitive substring search over company names. A blank term keeps
/// the whole list.
pub fn filter_companies<'a, T: AsRef<str>>(companies: &'a [T], term: &str) -> Vec<&'a T> {
    if term.trim().is_empty() {
        return companies.iter().collect();
    }

    let needle = term.to_lowercase();
    companies
        .iter()
        .filter(|company| company.as_ref().to_lowercase().contains(&needle))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    pub fn accepts(&self, difficulty: &str) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Only(wanted) => wanted.as_str() == difficulty,
        }
    }
}

impl fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyFilter::All => f.write_str("all"),
            DifficultyFilter::Only(difficulty) => fmt::Display::fmt(difficulty, f),
        }
    }
}

impl FromStr for DifficultyFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "all" {
            return Ok(DifficultyFilter::All);
        }
        s.parse().map(DifficultyFilter::Only)
    }
}

/// Title search plus difficulty selection applied to fetched rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub search: String,
    pub difficulty: DifficultyFilter,
}

impl QuestionFilter {
    pub fn new(search: impl Into<String>, difficulty: DifficultyFilter) -> Self {
        Self {
            search: search.into(),
            difficulty,
        }
    }

    pub fn matches_fields(&self, title: &str, difficulty: &str) -> bool {
        title.to_lowercase().contains(&self.search.to_lowercase())
            && self.difficulty.accepts(difficulty)
    }

    /// Rows that are not JSON objects never match.
    pub fn matches(&self, row: &Value) -> bool {
        let Some(fields) = row.as_object() else {
            return false;
        };

        self.matches_fields(text_field(fields, TITLE), text_field(fields, DIFFICULTY))
    }

    pub fn apply<'a>(&self, rows: &'a [Value]) -> Vec<&'a Value> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }
}

fn text_field<'a>(fields: &'a Map<String, Value>, key: &str) -> &'a str {
    fields.get(key).and_then(Value::as_str).unwrap_or("")
}
