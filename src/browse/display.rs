use serde_json::Value;

use crate::catalog::{ACCEPTANCE, DIFFICULTY, FREQUENCY, TITLE, URL};

/// Badge class for a difficulty label. Unlike the filter, this is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyClass {
    Easy,
    Medium,
    Hard,
    Unknown,
}

impl DifficultyClass {
    pub fn from_label(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "easy" => DifficultyClass::Easy,
            "medium" => DifficultyClass::Medium,
            "hard" => DifficultyClass::Hard,
            _ => DifficultyClass::Unknown,
        }
    }

    pub fn ansi(&self) -> &'static str {
        match self {
            DifficultyClass::Easy => "\x1b[32m",
            DifficultyClass::Medium => "\x1b[33m",
            DifficultyClass::Hard => "\x1b[31m",
            DifficultyClass::Unknown => "\x1b[90m",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyTone {
    High,
    Moderate,
    Low,
}

impl FrequencyTone {
    pub fn for_value(frequency: f64) -> Self {
        if frequency >= 70.0 {
            FrequencyTone::High
        } else if frequency >= 40.0 {
            FrequencyTone::Moderate
        } else {
            FrequencyTone::Low
        }
    }

    pub fn ansi(&self) -> &'static str {
        match self {
            FrequencyTone::High => "\x1b[32m",
            FrequencyTone::Moderate => "\x1b[33m",
            FrequencyTone::Low => "\x1b[31m",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBar {
    /// Percentage of the bar to fill, always within `0..=100`.
    pub width: f64,
    pub tone: FrequencyTone,
}

impl FrequencyBar {
    pub fn new(raw: Option<&str>) -> Self {
        let value = raw.map(parse_frequency).unwrap_or(0.0);
        Self {
            width: value.clamp(0.0, 100.0),
            tone: FrequencyTone::for_value(value),
        }
    }

    /// Text bar of `cells` characters, e.g. `#######---` for 70%.
    pub fn cells(&self, cells: usize) -> String {
        let filled = ((self.width / 100.0) * cells as f64).round() as usize;
        let filled = filled.min(cells);
        format!("{}{}", "#".repeat(filled), "-".repeat(cells - filled))
    }
}

/// Read the leading decimal number of a string, the way browsers' `parseFloat`
/// does: `"85%"` is 85, `" 12.5 times"` is 12.5, anything without a numeric
/// prefix is 0.
pub fn parse_frequency(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    match s[..end].parse::<f64>() {
        Ok(value) if !value.is_nan() => value,
        _ => 0.0,
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Display-ready view of one question, with the placeholders used when a
/// column is missing or empty.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionView<'a> {
    pub title: &'a str,
    pub difficulty: &'a str,
    pub acceptance: &'a str,
    pub frequency_label: &'a str,
    pub url: &'a str,
    pub class: DifficultyClass,
    pub bar: FrequencyBar,
}

impl<'a> QuestionView<'a> {
    pub fn from_value(row: &'a Value) -> Option<Self> {
        let fields = row.as_object()?;
        Some(Self::build(|key| fields.get(key).and_then(Value::as_str)))
    }

    fn build<F>(field: F) -> Self
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let present = |key: &str| field(key).filter(|value| !value.is_empty());
        let difficulty = present(DIFFICULTY);
        let frequency = present(FREQUENCY);

        Self {
            title: present(TITLE).unwrap_or("Untitled Question"),
            difficulty: difficulty.unwrap_or("Unknown"),
            acceptance: present(ACCEPTANCE).unwrap_or("N/A"),
            frequency_label: frequency.unwrap_or("0%"),
            url: present(URL).unwrap_or("#"),
            class: DifficultyClass::from_label(difficulty.unwrap_or("")),
            bar: FrequencyBar::new(frequency),
        }
    }
}
