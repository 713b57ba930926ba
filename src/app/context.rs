use std::sync::Arc;

use crate::app::error::Result;
use crate::config::Settings;
use crate::document::{Opener, SystemOpener};
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::Fetcher;
use crate::highlight::Matcher;
use crate::store::{SqliteStore, Store};

pub struct AppContext {
    pub store: Box<dyn Store>,
    pub fetcher: Arc<dyn Fetcher>,
    pub opener: Box<dyn Opener>,
    pub matcher: Matcher,
    pub settings: Settings,
}

impl AppContext {
    /// Wire the real collaborators. Fails on an invalid content pattern or
    /// when the HTTP client cannot be built.
    pub fn new(settings: Settings) -> Result<Self> {
        let matcher = Matcher::new(
            settings.authors.as_deref(),
            settings.abstract_pattern.as_deref(),
            settings.ignore_case,
        )?;
        let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(settings.http_timeout)?);

        Ok(Self {
            store: Box::new(SqliteStore::new(&settings.db_path)),
            fetcher,
            opener: Box::new(SystemOpener),
            matcher,
            settings,
        })
    }

    pub fn browser_label(&self) -> &str {
        self.settings.browser.as_deref().unwrap_or("browser")
    }

    pub fn reader_label(&self) -> &str {
        self.settings.pdf_reader.as_deref().unwrap_or("viewer")
    }
}
