use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::catalog::QuestionRow;
use crate::error::Result;

/// Turns a question sheet into rows keyed by its header line.
///
/// No type coercion or trimming happens here: every value is exactly the
/// text found in the file. Empty lines are skipped, short records simply
/// lack the trailing columns and fields beyond the header width are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuestionParser;

impl QuestionParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_questions<R: Read>(&self, reader: R) -> Result<Vec<QuestionRow>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let mut rows: Vec<QuestionRow> = Vec::new();

        for (line, record) in reader.records().enumerate() {
            let record = record?;
            if is_blank(&record) {
                continue;
            }
            if record.len() > headers.len() {
                debug!(
                    "Record {} has {} fields, header has {}; extra fields dropped",
                    line + 1,
                    record.len(),
                    headers.len()
                );
            }
            rows.push(headers.iter().zip(record.iter()).collect());
        }

        debug!("Parsed {} question rows", rows.len());
        Ok(rows)
    }

    pub fn parse_str(&self, content: &str) -> Result<Vec<QuestionRow>> {
        self.parse_questions(content.as_bytes())
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record.get(0).map_or(true, str::is_empty)
}
