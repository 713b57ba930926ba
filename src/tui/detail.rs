use std::collections::HashSet;

use crate::domain::Entry;
use crate::fetcher::Fetcher;
use crate::scraper::extract_abstract;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbstractOutcome {
    /// The entry already had an abstract.
    Present,
    Fetched,
    /// The page was fetched but carried no abstract block.
    NotFound,
    NoUrl,
    /// A previous attempt this session already ran; nothing was fetched.
    AlreadyAttempted,
    Failed(String),
}

/// Lazily completes abstracts of opened entries. Each entry is fetched at
/// most once per session, whatever the outcome.
#[derive(Debug, Default)]
pub struct DetailController {
    attempted: HashSet<usize>,
}

impl DetailController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether opening entry `index` would hit the network.
    pub fn needs_fetch(&self, index: usize, entry: &Entry) -> bool {
        !entry.has_abstract() && entry.url().is_some() && !self.attempted.contains(&index)
    }

    pub async fn ensure_abstract(
        &mut self,
        index: usize,
        entry: &mut Entry,
        fetcher: &dyn Fetcher,
    ) -> AbstractOutcome {
        if entry.has_abstract() {
            return AbstractOutcome::Present;
        }
        let Some(url) = entry.url().map(str::to_string) else {
            return AbstractOutcome::NoUrl;
        };
        if !self.attempted.insert(index) {
            return AbstractOutcome::AlreadyAttempted;
        }

        match fetcher.fetch_text(&url).await {
            Ok(page) => match extract_abstract(&page) {
                Some(text) => {
                    tracing::debug!(url = %url, "abstract fetched");
                    entry.abstract_text = text;
                    AbstractOutcome::Fetched
                }
                None => {
                    tracing::warn!(url = %url, "no abstract on landing page");
                    AbstractOutcome::NotFound
                }
            },
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "abstract fetch failed");
                AbstractOutcome::Failed(e.status_text())
            }
        }
    }
}

/// Labelled sections of the detail view, in display order. Authors, abstract
/// and comments are always listed; the rest only when present.
pub fn detail_sections(entry: &Entry) -> Vec<(&'static str, String)> {
    let mut sections = vec![
        ("Authors", entry.authors.clone()),
        (
            "Abstract",
            if entry.has_abstract() {
                entry.abstract_text.clone()
            } else {
                "(no abstract)".to_string()
            },
        ),
        ("Comments", entry.comments.clone()),
    ];

    let optional = [
        ("Categories", entry.categories.clone()),
        ("MSC-class", entry.classification.clone()),
        (
            "Submitted",
            entry
                .submitted_at
                .map(|t| t.format("%a, %-d %b %Y %H:%M:%S UTC").to_string())
                .unwrap_or_default(),
        ),
        ("URL", entry.url.clone()),
    ];
    sections.extend(optional.into_iter().filter(|(_, value)| !value.is_empty()));
    sections
}
