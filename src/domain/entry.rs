use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One announcement extracted from a digest.
///
/// Every text field is empty when the digest block did not carry it; only
/// `submitted_at` uses `Option` because there is no meaningful empty timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub identifier: String,
    pub title: String,
    pub authors: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub comments: String,
    pub categories: String,
    pub classification: String,
    pub submitted_at: Option<DateTime<Utc>>,
    pub url: String,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    pub fn has_identifier(&self) -> bool {
        !self.identifier.is_empty()
    }

    pub fn has_abstract(&self) -> bool {
        !self.abstract_text.trim().is_empty()
    }

    pub fn url(&self) -> Option<&str> {
        if self.url.is_empty() {
            None
        } else {
            Some(&self.url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_empty() {
        let entry = Entry::new();
        assert!(!entry.has_identifier());
        assert!(!entry.has_abstract());
        assert_eq!(entry.url(), None);
        assert_eq!(entry.submitted_at, None);
    }

    #[test]
    fn test_display_title_with_title() {
        let entry = Entry {
            title: "On the Structure of Things".into(),
            ..Entry::new()
        };
        assert_eq!(entry.display_title(), "On the Structure of Things");
    }

    #[test]
    fn test_display_title_without_title() {
        assert_eq!(Entry::new().display_title(), "(Untitled)");
    }

    #[test]
    fn test_whitespace_abstract_counts_as_missing() {
        let entry = Entry {
            abstract_text: "   ".into(),
            ..Entry::new()
        };
        assert!(!entry.has_abstract());
    }

    #[test]
    fn test_serializes_abstract_under_plain_name() {
        let entry = Entry {
            identifier: "1206.3197".into(),
            abstract_text: "We prove a theorem.".into(),
            ..Entry::new()
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["abstract"], "We prove a theorem.");
        assert_eq!(json["identifier"], "1206.3197");
    }
}
