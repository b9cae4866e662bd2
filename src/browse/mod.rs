//! Terminal-side browser for the catalog: company search, per-company
//! question filtering and the text rendering of both pages.

pub mod client;
pub mod display;
pub mod filter;
pub mod page;
pub mod render;

pub use client::{CatalogClient, SheetSource};
pub use display::{parse_frequency, DifficultyClass, FrequencyBar, FrequencyTone, QuestionView};
pub use filter::{filter_companies, DifficultyFilter, QuestionFilter};
pub use page::{CompaniesPage, CompanyPage, CompanyView, FetchTicket};
