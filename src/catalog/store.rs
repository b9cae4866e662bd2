use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::catalog::{Company, QuestionParser, QuestionRow, Timeframe};
use crate::error::{Error, Result};

/// Read-only access to the question sheets.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// List every company directory under the data root
    async fn list_companies(&self) -> Result<Vec<Company>>;

    /// Load the rows of one company's sheet for a timeframe keyword
    async fn load_questions(&self, company: &str, timeframe: &str) -> Result<Vec<QuestionRow>>;
}

/// Catalog backed by a directory tree: `<root>/<company>/<timeframe>.csv`.
///
/// Nothing is cached; every call goes back to disk.
#[derive(Debug, Clone)]
pub struct FsCatalog {
    root: PathBuf,
    parser: QuestionParser,
}

impl FsCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            parser: QuestionParser::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the sheet path for a request, refusing anything that is not
    /// a known timeframe keyword or a plain directory name under the root.
    pub fn sheet_path(&self, company: &str, timeframe: &str) -> Result<PathBuf> {
        let timeframe: Timeframe = timeframe
            .parse()
            .map_err(|_| Error::NotFound(format!("Unknown timeframe '{}'", timeframe)))?;

        if !is_plain_name(company) {
            warn!("Rejected company name {:?}", company);
            return Err(Error::NotFound(format!("Unknown company '{}'", company)));
        }

        let company_dir = self.root.join(company);
        if !company_dir.is_dir() {
            return Err(Error::NotFound(format!("Unknown company '{}'", company)));
        }

        Ok(company_dir.join(timeframe.file_name()))
    }
}

#[async_trait]
impl Catalog for FsCatalog {
    async fn list_companies(&self) -> Result<Vec<Company>> {
        debug!("Looking for data in: {}", self.root.display());

        if !self.root.is_dir() {
            return Err(Error::DataRootMissing(self.root.display().to_string()));
        }

        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut companies = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => companies.push(Company::new(name)),
                Err(raw) => warn!("Skipping non UTF-8 directory name {:?}", raw),
            }
        }

        info!("Found {} companies", companies.len());
        Ok(companies)
    }

    async fn load_questions(&self, company: &str, timeframe: &str) -> Result<Vec<QuestionRow>> {
        let path = self.sheet_path(company, timeframe)?;

        if !path.is_file() {
            return Err(Error::NotFound(format!(
                "No {} sheet for '{}'",
                timeframe, company
            )));
        }

        // invalid UTF-8 sequences become U+FFFD instead of failing the sheet
        let bytes = tokio::fs::read(&path).await?;
        let rows = self.parser.parse_str(&String::from_utf8_lossy(&bytes))?;

        debug!("Loaded {} rows from {}", rows.len(), path.display());
        Ok(rows)
    }
}

fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    )
}
