use crate::parser::normalize_whitespace;
use crate::scraper::{scan, TagVisitor};

const SUBMISSION_HISTORY: &str = "Submission history";

/// Abstract text of a landing page: the text of the first `blockquote`
/// that follows a `span` labelled "Abstract".
#[derive(Debug, Default)]
pub struct AbstractExtractor {
    in_blockquote: bool,
    in_span: bool,
    in_abstract: bool,
    done: bool,
    text: String,
}

impl AbstractExtractor {
    pub fn into_abstract(self) -> Option<String> {
        let text = normalize_whitespace(&self.text);
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl TagVisitor for AbstractExtractor {
    fn open_tag(&mut self, name: &str) {
        match name {
            "blockquote" => self.in_blockquote = true,
            "span" => self.in_span = true,
            _ => {}
        }
    }

    fn close_tag(&mut self, name: &str) {
        match name {
            "blockquote" => {
                if self.in_abstract {
                    self.done = true;
                }
                self.in_blockquote = false;
                self.in_abstract = false;
            }
            "span" => self.in_span = false,
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.done || !self.in_blockquote {
            return;
        }
        if self.in_span && !self.in_abstract && text.trim_start().starts_with("Abstract") {
            self.in_abstract = true;
            return;
        }
        if self.in_abstract {
            self.text.push_str(text);
        }
    }
}

/// Revision tags (`v1`, `v2`, ...) listed in bold under the
/// "Submission history" heading, in page order.
#[derive(Debug, Default)]
pub struct VersionExtractor {
    in_heading: bool,
    heading: String,
    in_section: bool,
    in_bold: bool,
    versions: Vec<String>,
}

impl VersionExtractor {
    pub fn into_versions(self) -> Vec<String> {
        self.versions
    }
}

impl TagVisitor for VersionExtractor {
    fn open_tag(&mut self, name: &str) {
        match name {
            "h2" => {
                self.in_heading = true;
                self.heading.clear();
            }
            "b" | "strong" => self.in_bold = true,
            _ => {}
        }
    }

    fn close_tag(&mut self, name: &str) {
        match name {
            "h2" => {
                self.in_heading = false;
                self.in_section = self.heading.trim() == SUBMISSION_HISTORY;
            }
            "b" | "strong" => self.in_bold = false,
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_heading {
            self.heading.push_str(text);
            return;
        }
        if self.in_section && self.in_bold {
            if let Some(version) = version_tag(text.trim()) {
                self.versions.push(version.to_string());
            }
        }
    }
}

/// `[v12]` → `v12`.
fn version_tag(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('[')?.strip_suffix(']')?;
    let digits = inner.strip_prefix('v')?;
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        Some(inner)
    } else {
        None
    }
}

pub fn extract_abstract(markup: &str) -> Option<String> {
    let mut extractor = AbstractExtractor::default();
    scan(markup, &mut extractor);
    extractor.into_abstract()
}

pub fn extract_versions(markup: &str) -> Vec<String> {
    let mut extractor = VersionExtractor::default();
    scan(markup, &mut extractor);
    extractor.into_versions()
}
