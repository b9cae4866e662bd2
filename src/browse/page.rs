use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;

use crate::browse::client::SheetSource;
use crate::browse::filter::{filter_companies, DifficultyFilter, QuestionFilter};
use crate::catalog::{Company, Timeframe};

/// Company listing plus its search box.
pub struct CompaniesPage {
    source: Arc<dyn SheetSource>,
    companies: Vec<Company>,
    search: String,
    loading: bool,
}

impl CompaniesPage {
    pub fn new(source: Arc<dyn SheetSource>) -> Self {
        Self {
            source,
            companies: Vec::new(),
            search: String::new(),
            loading: true,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.companies = self.source.companies().await;
        self.loading = false;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn visible(&self) -> Vec<&Company> {
        filter_companies(&self.companies, &self.search)
    }
}

/// Handed out when a fetch starts; only the newest ticket may land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub company: String,
    pub timeframe: Timeframe,
}

/// State behind a company page.
#[derive(Debug, Clone)]
pub struct CompanyView {
    pub company: String,
    pub timeframe: Timeframe,
    pub filter: QuestionFilter,
    pub loading: bool,
    pub questions: Vec<Value>,
    issued: u64,
}

impl CompanyView {
    pub fn new(company: impl Into<String>) -> Self {
        Self {
            company: company.into(),
            timeframe: Timeframe::default(),
            filter: QuestionFilter::default(),
            loading: true,
            questions: Vec::new(),
            issued: 0,
        }
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        FetchTicket {
            seq: self.issued,
            company: self.company.clone(),
            timeframe: self.timeframe,
        }
    }

    /// Apply a finished fetch. Returns false when a newer fetch was started
    /// in the meantime, in which case the rows are dropped.
    pub fn complete_fetch(&mut self, ticket: &FetchTicket, rows: Vec<Value>) -> bool {
        if ticket.seq != self.issued {
            debug!(
                "Dropping stale response #{} for {}/{} (latest is #{})",
                ticket.seq, ticket.company, ticket.timeframe, self.issued
            );
            return false;
        }

        self.questions = rows;
        self.loading = false;
        true
    }

    pub fn visible(&self) -> Vec<&Value> {
        self.filter.apply(&self.questions)
    }
}

/// A company's question sheet with timeframe, search and difficulty
/// controls. Safe to drive from several tasks at once.
pub struct CompanyPage {
    source: Arc<dyn SheetSource>,
    view: Mutex<CompanyView>,
}

impl CompanyPage {
    pub fn new(source: Arc<dyn SheetSource>, company: impl Into<String>) -> Self {
        Self {
            source,
            view: Mutex::new(CompanyView::new(company)),
        }
    }

    /// Fetch the sheet for the current company and timeframe.
    pub async fn refresh(&self) -> bool {
        let ticket = self.view.lock().begin_fetch();
        let rows = self
            .source
            .questions(&ticket.company, ticket.timeframe)
            .await;
        self.view.lock().complete_fetch(&ticket, rows)
    }

    pub async fn set_timeframe(&self, timeframe: Timeframe) -> bool {
        let ticket = {
            let mut view = self.view.lock();
            view.timeframe = timeframe;
            view.begin_fetch()
        };
        let rows = self
            .source
            .questions(&ticket.company, ticket.timeframe)
            .await;
        self.view.lock().complete_fetch(&ticket, rows)
    }

    pub async fn set_company(&self, company: impl Into<String>) -> bool {
        self.view.lock().company = company.into();
        self.refresh().await
    }

    pub fn set_search(&self, term: impl Into<String>) {
        self.view.lock().filter.search = term.into();
    }

    pub fn set_difficulty(&self, difficulty: DifficultyFilter) {
        self.view.lock().filter.difficulty = difficulty;
    }

    pub fn is_loading(&self) -> bool {
        self.view.lock().loading
    }

    pub fn timeframe(&self) -> Timeframe {
        self.view.lock().timeframe
    }

    /// Rows passing the current filters. Never refetches.
    pub fn visible(&self) -> Vec<Value> {
        self.view.lock().visible().into_iter().cloned().collect()
    }

    pub fn snapshot(&self) -> CompanyView {
        self.view.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    use crate::catalog::Difficulty;

    struct StaticSource;

    #[async_trait]
    impl SheetSource for StaticSource {
        async fn companies(&self) -> Vec<Company> {
            ["accenture", "google", "meta"].into_iter().map(Company::new).collect()
        }

        async fn questions(&self, company: &str, timeframe: Timeframe) -> Vec<Value> {
            vec![
                json!({"Title": format!("{company} {timeframe}"), "Difficulty": "Easy"}),
                json!({"Title": "Hard One", "Difficulty": "Hard"}),
            ]
        }
    }

    #[tokio::test]
    async fn test_companies_page() {
        let mut page = CompaniesPage::new(Arc::new(StaticSource));
        assert!(page.is_loading());

        page.load().await;
        assert!(!page.is_loading());
        assert_eq!(page.visible().len(), 3);

        page.set_search("ACC");
        assert_eq!(page.visible(), vec![&Company::new("accenture")]);
    }

    #[tokio::test]
    async fn test_company_page_defaults_and_filters() {
        let page = CompanyPage::new(Arc::new(StaticSource), "google");
        assert_eq!(page.timeframe(), Timeframe::SixMonths);
        assert!(page.is_loading());

        assert!(page.refresh().await);
        assert!(!page.is_loading());
        assert_eq!(page.visible()[0]["Title"], "google six-months");

        page.set_difficulty(DifficultyFilter::Only(Difficulty::Hard));
        let visible = page.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0]["Title"], "Hard One");

        page.set_difficulty(DifficultyFilter::All);
        page.set_search("SIX");
        assert_eq!(page.visible().len(), 1);
    }

    #[tokio::test]
    async fn test_timeframe_and_company_change_refetch() {
        let page = CompanyPage::new(Arc::new(StaticSource), "google");
        assert!(page.set_timeframe(Timeframe::ThirtyDays).await);
        assert_eq!(page.visible()[0]["Title"], "google thirty-days");

        assert!(page.set_company("meta").await);
        assert_eq!(page.visible()[0]["Title"], "meta thirty-days");
    }

    #[test]
    fn test_stale_ticket_is_dropped() {
        let mut view = CompanyView::new("google");

        view.timeframe = Timeframe::ThreeMonths;
        let first = view.begin_fetch();
        view.timeframe = Timeframe::ThirtyDays;
        let second = view.begin_fetch();

        assert!(view.complete_fetch(&second, vec![json!({"Title": "new"})]));
        assert!(!view.complete_fetch(&first, vec![json!({"Title": "old"})]));

        assert_eq!(view.questions, vec![json!({"Title": "new"})]);
        assert!(!view.loading);
    }

    #[test]
    fn test_loading_until_latest_lands() {
        let mut view = CompanyView::new("google");
        let first = view.begin_fetch();
        let _second = view.begin_fetch();

        assert!(!view.complete_fetch(&first, vec![]));
        assert!(view.loading);
    }
}
