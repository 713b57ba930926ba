//! Minimal markup scanning for arXiv landing pages.
//!
//! This is not an HTML parser: [`scan`] walks the markup once and reports
//! opening tags, closing tags and decoded text runs to a [`TagVisitor`].
//! Comments, doctypes and the bodies of `script`/`style` elements are
//! skipped. The extractors in [`extractor`] are small state machines on top.
//!
//! ```text
//! landing page markup → scan → AbstractExtractor / VersionExtractor
//! ```

mod extractor;

pub use extractor::{extract_abstract, extract_versions, AbstractExtractor, VersionExtractor};

use html_escape::decode_html_entities;

/// Callbacks for [`scan`]. Tag names arrive lower-cased.
pub trait TagVisitor {
    fn open_tag(&mut self, _name: &str) {}
    fn close_tag(&mut self, _name: &str) {}
    fn text(&mut self, _text: &str) {}
}

pub fn scan<V: TagVisitor>(markup: &str, visitor: &mut V) {
    let mut rest = markup;

    while !rest.is_empty() {
        let Some(lt) = rest.find('<') else {
            emit_text(rest, visitor);
            break;
        };
        emit_text(&rest[..lt], visitor);
        rest = &rest[lt..];

        if let Some(after) = rest.strip_prefix("<!--") {
            rest = after.find("-->").map_or("", |end| &after[end + 3..]);
            continue;
        }

        // A '<' that cannot start a tag is plain text.
        let starts_tag = rest[1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '/' | '!' | '?'));
        if !starts_tag {
            emit_text("<", visitor);
            rest = &rest[1..];
            continue;
        }

        let Some(gt) = tag_end(rest) else {
            break;
        };
        let tag = &rest[1..gt];
        rest = &rest[gt + 1..];

        if tag.starts_with('!') || tag.starts_with('?') {
            continue;
        }

        if let Some(name) = tag.strip_prefix('/') {
            visitor.close_tag(&tag_name(name));
            continue;
        }

        let name = tag_name(tag);
        visitor.open_tag(&name);
        if tag.trim_end().ends_with('/') {
            visitor.close_tag(&name);
        } else if name == "script" || name == "style" {
            let closing = format!("</{}", name);
            rest = match rest.to_ascii_lowercase().find(&closing) {
                Some(end) => &rest[end..],
                None => "",
            };
        }
    }
}

/// Index of the `>` closing the tag that starts `rest`. A `>` inside a
/// quoted attribute value does not close the tag.
fn tag_end(rest: &str) -> Option<usize> {
    let mut quote: Option<u8> = None;
    let mut after_equals = false;

    for (i, b) in rest.bytes().enumerate().skip(1) {
        match quote {
            Some(q) => {
                if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'>' => return Some(i),
                b'"' | b'\'' if after_equals => quote = Some(b),
                _ => {}
            },
        }
        if !b.is_ascii_whitespace() {
            after_equals = b == b'=';
        }
    }
    None
}

fn tag_name(tag: &str) -> String {
    tag.trim_start()
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

fn emit_text<V: TagVisitor>(raw: &str, visitor: &mut V) {
    if !raw.is_empty() {
        visitor.text(&decode_html_entities(raw));
    }
}
