//! Highlight classification of entries.
//!
//! Two independent axes are computed per entry: the *match* axis colors the
//! title text and the *saved* axis colors the ordinal marker.

use regex::{Regex, RegexBuilder};

use crate::app::Result;
use crate::domain::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchKind {
    #[default]
    None,
    Author,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub matched: MatchKind,
    pub saved: bool,
}

/// Compiled author and content patterns.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    author: Option<Regex>,
    content: Option<Regex>,
}

impl Matcher {
    /// Build a matcher from whitespace-separated author names and a content
    /// regular expression. Blank inputs disable the corresponding axis.
    pub fn new(
        author_names: Option<&str>,
        content_pattern: Option<&str>,
        ignore_case: bool,
    ) -> Result<Self> {
        let author = match author_names.map(author_pattern) {
            Some(Some(pattern)) => Some(Regex::new(&pattern)?),
            _ => None,
        };

        let content = match content_pattern.map(str::trim) {
            Some(pattern) if !pattern.is_empty() => Some(
                RegexBuilder::new(pattern)
                    .case_insensitive(ignore_case)
                    .multi_line(true)
                    .build()?,
            ),
            _ => None,
        };

        Ok(Self { author, content })
    }

    pub fn is_active(&self) -> bool {
        self.author.is_some() || self.content.is_some()
    }

    pub fn match_kind(&self, entry: &Entry) -> MatchKind {
        if self
            .author
            .as_ref()
            .is_some_and(|re| re.is_match(&entry.authors))
        {
            return MatchKind::Author;
        }

        if self.content.as_ref().is_some_and(|re| {
            re.is_match(&entry.title) || re.is_match(&entry.abstract_text)
        }) {
            return MatchKind::Content;
        }

        MatchKind::None
    }

    pub fn classify(&self, entry: &Entry, saved: bool) -> Classification {
        Classification {
            matched: self.match_kind(entry),
            saved,
        }
    }

    /// Classify every entry, looking store membership up by identifier.
    pub fn classify_all<F>(&self, entries: &[Entry], mut is_saved: F) -> Vec<Classification>
    where
        F: FnMut(&str) -> bool,
    {
        let active = self.is_active();
        if !active {
            tracing::debug!("no author or content pattern configured");
        }

        entries
            .iter()
            .map(|entry| {
                let saved = entry.has_identifier() && is_saved(&entry.identifier);
                if active {
                    self.classify(entry, saved)
                } else {
                    Classification {
                        matched: MatchKind::None,
                        saved,
                    }
                }
            })
            .collect()
    }
}

/// Whole-word alternation over the given names, each matched literally.
fn author_pattern(names: &str) -> Option<String> {
    let mut tokens: Vec<&str> = Vec::new();
    for name in names.split_whitespace() {
        if !tokens.contains(&name) {
            tokens.push(name);
        }
    }
    if tokens.is_empty() {
        return None;
    }

    let alternatives = tokens
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");
    Some(format!(r"\b(?:{})\b", alternatives))
}
