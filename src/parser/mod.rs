//! Digest parser.
//!
//! A digest body is a run of loosely structured blocks:
//!
//! ```text
//! ------------------------------------------------------------------------------
//! \\
//! arXiv:1206.3197
//! Date: Thu, 14 Jun 2012 18:31:08 GMT   (15kb)
//!
//! Title: A rather long title that the mailer
//!   wraps onto a second line
//! Authors: A. Author, B. Author
//! Categories: math.LO
//! Comments: 12 pages
//! \\
//!   Abstract text, possibly over many lines.
//! \\ ( http://arxiv.org/abs/1206.3197 ,  15kb)
//! ```
//!
//! Parsing is two-level: [`seek_entry`] finds the next block boundary and
//! [`scan_field`] consumes one line (or one multi-line field) at a time until
//! the block ends. Both are bounded by a [`LineCursor`], so truncated input
//! ends the current block instead of reading past the sequence.

pub mod cursor;
pub mod message;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::domain::Entry;

pub use cursor::LineCursor;
pub use message::DigestMessage;

/// Bare `\\` line: opens a block (before the identifier) or an abstract.
pub const ESCAPE_MARKER: &str = "\\\\";
pub const IDENTIFIER_PREFIX: &str = "arXiv:";
pub const LANDING_MARKER: &str = "\\\\ ( http";

const DATE_PREFIX: &str = "Date: ";
const TITLE_PREFIX: &str = "Title: ";
const AUTHORS_PREFIX: &str = "Authors: ";
const CATEGORIES_PREFIX: &str = "Categories: ";
const CLASS_PREFIX: &str = "MSC-class: ";
const COMMENTS_PREFIX: &str = "Comments: ";

/// Day, month, year and time tokens of a `Date:` line.
const STAMP_FORMAT: &str = "%d %b %Y %H:%M:%S";

/// Offset of the URL inside a landing-page marker line (`\\ ( `).
const URL_OFFSET: usize = 5;

/// Outcome of consuming one step of an entry block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStep {
    Continue,
    EntryEnded,
    DigestEnded,
}

/// Parse digest body lines into entries, in source order.
///
/// Blocks missing fields are kept with those fields empty.
pub fn parse_digest<S: AsRef<str>>(lines: &[S]) -> Vec<Entry> {
    let mut cursor = LineCursor::new(lines);
    let mut entries = Vec::new();

    while seek_entry(&mut cursor) {
        let start = cursor.position();
        let (entry, step) = scan_entry(&mut cursor);

        let missing = missing_fields(&entry);
        if !missing.is_empty() {
            tracing::warn!(
                line = start,
                identifier = %entry.identifier,
                missing = ?missing,
                "digest block retained with missing fields"
            );
        }
        entries.push(entry);

        if step == ScanStep::DigestEnded {
            break;
        }
    }

    tracing::info!(count = entries.len(), "parsed digest");
    for (i, entry) in entries.iter().enumerate() {
        tracing::debug!("({}) {}", i + 1, entry.title);
    }

    entries
}

/// Fields a usable block is expected to carry but `entry` lacks.
fn missing_fields(entry: &Entry) -> Vec<&'static str> {
    [
        ("identifier", entry.identifier.is_empty()),
        ("title", entry.title.is_empty()),
        ("url", entry.url.is_empty()),
    ]
    .into_iter()
    .filter_map(|(name, absent)| absent.then_some(name))
    .collect()
}

/// Move the cursor onto the identifier line of the next block.
///
/// Returns `false` once the sequence is exhausted.
pub fn seek_entry<S: AsRef<str>>(cursor: &mut LineCursor<'_, S>) -> bool {
    while !cursor.at_end() {
        let opens_block = cursor.peek() == Some(ESCAPE_MARKER)
            && cursor
                .peek_at(1)
                .is_some_and(|next| next.starts_with(IDENTIFIER_PREFIX));
        cursor.advance();
        if opens_block {
            return true;
        }
    }
    false
}

fn scan_entry<S: AsRef<str>>(cursor: &mut LineCursor<'_, S>) -> (Entry, ScanStep) {
    let mut entry = Entry::new();
    loop {
        match scan_field(cursor, &mut entry) {
            ScanStep::Continue => {}
            step => return (entry, step),
        }
    }
}

/// Consume the field starting at the cursor into `entry`.
pub fn scan_field<S: AsRef<str>>(cursor: &mut LineCursor<'_, S>, entry: &mut Entry) -> ScanStep {
    let Some(line) = cursor.peek() else {
        return ScanStep::DigestEnded;
    };

    if is_separator(line) {
        cursor.advance();
        return ScanStep::EntryEnded;
    }

    if let Some(rest) = line.strip_prefix(IDENTIFIER_PREFIX) {
        entry.identifier = rest.split_whitespace().next().unwrap_or_default().to_string();
        tracing::debug!(identifier = %entry.identifier, "identifier");
        cursor.advance();
    } else if line.starts_with(DATE_PREFIX) {
        entry.submitted_at = parse_submission_date(line);
        if entry.submitted_at.is_none() {
            tracing::warn!(line, "unrecognised date line");
        }
        cursor.advance();
    } else if let Some(rest) = line.strip_prefix(TITLE_PREFIX) {
        entry.title = read_continued(cursor, rest);
        tracing::debug!(title = %entry.title, "title");
    } else if let Some(rest) = line.strip_prefix(AUTHORS_PREFIX) {
        entry.authors = read_continued(cursor, rest);
        tracing::debug!(authors = %entry.authors, "authors");
    } else if let Some(rest) = line.strip_prefix(CATEGORIES_PREFIX) {
        entry.categories = rest.to_string();
        cursor.advance();
    } else if let Some(rest) = line.strip_prefix(CLASS_PREFIX) {
        entry.classification = rest.to_string();
        cursor.advance();
    } else if let Some(rest) = line.strip_prefix(COMMENTS_PREFIX) {
        entry.comments = read_continued(cursor, rest);
    } else if line == ESCAPE_MARKER {
        cursor.advance();
        entry.abstract_text = read_abstract(cursor);
    } else if line.starts_with(LANDING_MARKER) {
        entry.url = extract_url(line);
        tracing::debug!(url = %entry.url, "url");
        cursor.advance();
        return ScanStep::EntryEnded;
    } else {
        tracing::trace!(position = cursor.position(), line, "skipping");
        cursor.advance();
    }

    ScanStep::Continue
}

/// A field whose continuation lines start with a space.
fn read_continued<S: AsRef<str>>(cursor: &mut LineCursor<'_, S>, first: &str) -> String {
    let mut text = first.to_string();
    cursor.advance();

    while let Some(next) = cursor.peek() {
        if !next.starts_with(' ') {
            break;
        }
        text.push(' ');
        text.push_str(next);
        cursor.advance();
    }

    normalize_whitespace(&text)
}

/// Abstract lines run up to (not including) the landing-page marker.
fn read_abstract<S: AsRef<str>>(cursor: &mut LineCursor<'_, S>) -> String {
    let mut text = String::new();

    while let Some(line) = cursor.peek() {
        if line.starts_with(LANDING_MARKER) {
            break;
        }
        text.push(' ');
        text.push_str(line);
        cursor.advance();
    }

    text.trim().to_string()
}

fn is_separator(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.chars().all(|c| c == '-')
}

fn extract_url(line: &str) -> String {
    let rest = line.get(URL_OFFSET..).unwrap_or_default();
    match rest.find(',') {
        Some(end) => rest[..end].trim().to_string(),
        None => rest.trim().trim_end_matches(')').trim_end().to_string(),
    }
}

/// Collapse every whitespace run to a single space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse `Date: Thu, 14 Jun 2012 18:31:08 GMT   (15kb)`.
///
/// Tokens 1 to 5 carry day, month, year, time and zone; the weekday is
/// ignored. The zone is a name (`GMT`, `UTC`, `UT`) or a `+HHMM` offset.
pub fn parse_submission_date(line: &str) -> Option<DateTime<Utc>> {
    let rest = line.strip_prefix(DATE_PREFIX)?;
    let tokens: Vec<&str> = rest.split_whitespace().collect();
    if tokens.len() < 6 {
        return None;
    }

    let stamp = tokens[1..5].join(" ");
    match tokens[5].to_ascii_uppercase().as_str() {
        "GMT" | "UTC" | "UT" | "Z" => NaiveDateTime::parse_from_str(&stamp, STAMP_FORMAT)
            .ok()
            .map(|naive| naive.and_utc()),
        _ => DateTime::parse_from_str(
            &format!("{} {}", stamp, tokens[5]),
            &format!("{} %z", STAMP_FORMAT),
        )
        .ok()
        .map(|dt| dt.with_timezone(&Utc)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    const TWO_ENTRIES: &str = r"This is the daily digest header.
Submissions received since Wed 13 Jun 12 to Thu 14 Jun 12
------------------------------------------------------------------------------
\\
arXiv:1206.3197
Date: Thu, 14 Jun 2012 18:31:08 GMT   (15kb)

Title: Definable sets in ordered
  structures and their
     tame geometry
Authors: Anna Kowalska, Jan
  Nowak
Categories: math.LO
Comments: 12 pages, to appear
  in Fund. Math.
MSC-class: 03C64
\\
  We study definable sets
  in o-minimal structures.
\\ ( http://arxiv.org/abs/1206.3197 ,  15kb)
------------------------------------------------------------------------------
\\
arXiv:1206.3201
Date: Thu, 14 Jun 2012 19:02:44 GMT   (8kb)

Title: Short note on forcing
Authors: Carl Smith
Categories: math.LO math.GN
\\
  Forcing is considered.
\\ ( http://arxiv.org/abs/1206.3201 ,  8kb)
------------------------------------------------------------------------------
%%--%%--%%--%%--%%--%%--%%--%%--%%--%%--%%--%%--%%--%%--%%--%%--%%--%%--%%--%%
";

    fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }

    #[test]
    fn test_two_entries_in_order() {
        let entries = parse_digest(&lines(TWO_ENTRIES));
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].identifier, "1206.3197");
        assert_eq!(
            entries[0].title,
            "Definable sets in ordered structures and their tame geometry"
        );
        assert_eq!(entries[0].url, "http://arxiv.org/abs/1206.3197");

        assert_eq!(entries[1].identifier, "1206.3201");
        assert_eq!(entries[1].title, "Short note on forcing");
        assert_eq!(entries[1].url, "http://arxiv.org/abs/1206.3201");
    }

    #[test]
    fn test_all_fields_of_first_entry() {
        let entries = parse_digest(&lines(TWO_ENTRIES));
        let entry = &entries[0];
        assert_eq!(entry.authors, "Anna Kowalska, Jan Nowak");
        assert_eq!(entry.categories, "math.LO");
        assert_eq!(entry.comments, "12 pages, to appear in Fund. Math.");
        assert_eq!(entry.classification, "03C64");
        assert_eq!(
            entry.abstract_text,
            "We study definable sets   in o-minimal structures."
        );

        let submitted = entry.submitted_at.unwrap();
        assert_eq!(
            (submitted.year(), submitted.month(), submitted.day()),
            (2012, 6, 14)
        );
        assert_eq!(
            (submitted.hour(), submitted.minute(), submitted.second()),
            (18, 31, 8)
        );
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let input = lines(TWO_ENTRIES);
        assert_eq!(parse_digest(&input), parse_digest(&input));
    }

    #[test]
    fn test_missing_authors_does_not_skip_next_entry() {
        let text = r"\\
arXiv:2101.00001
Title: No authors here
\\
  Abstract one.
\\ ( https://arxiv.org/abs/2101.00001 ,  5kb)
------------------------------------------------------------------------------
\\
arXiv:2101.00002
Title: Second
Authors: Someone
\\ ( https://arxiv.org/abs/2101.00002 ,  5kb)
";
        let entries = parse_digest(&lines(text));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].authors, "");
        assert_eq!(entries[0].title, "No authors here");
        assert_eq!(entries[0].url, "https://arxiv.org/abs/2101.00001");
        assert_eq!(entries[1].identifier, "2101.00002");
        assert_eq!(entries[1].authors, "Someone");
    }

    #[test]
    fn test_five_digit_identifier_kept_whole() {
        let text = "\\\\\narXiv:2301.12345 (*cross-listing*)\nTitle: T\n";
        let entries = parse_digest(&lines(text));
        assert_eq!(entries[0].identifier, "2301.12345");
    }

    #[test]
    fn test_truncated_block_ends_without_panic() {
        let text = "\\\\\narXiv:1206.0001\nTitle: Cut\n  off\n\\\\\n  abstract never";
        let entries = parse_digest(&lines(text));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Cut off");
        assert_eq!(entries[0].abstract_text, "abstract never");
        assert_eq!(entries[0].url, "");
    }

    #[test]
    fn test_truncated_after_title_prefix() {
        let text = "\\\\\narXiv:1206.0001\nTitle: Last line";
        let entries = parse_digest(&lines(text));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Last line");
    }

    #[test]
    fn test_escape_marker_without_identifier_is_not_a_boundary() {
        let text = "\\\\\nnot an entry\n\\\\\n";
        assert!(parse_digest(&lines(text)).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let input: Vec<&str> = Vec::new();
        assert!(parse_digest(&input).is_empty());
    }

    #[test]
    fn test_separator_ends_entry_without_url() {
        let text = "\\\\\narXiv:1206.0002\nTitle: Replaced\n-----\n\\\\\narXiv:1206.0003\nTitle: Next\n";
        let entries = parse_digest(&lines(text));
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].url, "");
        assert_eq!(entries[1].identifier, "1206.0003");
    }

    #[test]
    fn test_unknown_lines_are_skipped() {
        let text = "\\\\\narXiv:1206.0004\nJournal-ref: Ann. Math. 1\nReport-no: X-1\nTitle: Kept\n";
        let entries = parse_digest(&lines(text));
        assert_eq!(entries[0].title, "Kept");
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let entries = parse_digest(&lines(TWO_ENTRIES));
        assert!(missing_fields(&entries[0]).is_empty());

        let text = "\\\\\narXiv:1206.0005\nAuthors: Somebody\n-----\n";
        let entries = parse_digest(&lines(text));
        assert_eq!(missing_fields(&entries[0]), vec!["title", "url"]);
        assert_eq!(missing_fields(&Entry::new()), vec!["identifier", "title", "url"]);
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace(" a   b\n  c "), "a b c");
        assert_eq!(normalize_whitespace("\t\n"), "");
        assert_eq!(normalize_whitespace("single"), "single");
    }

    #[test]
    fn test_extract_url_without_comma() {
        assert_eq!(
            extract_url("\\\\ ( https://arxiv.org/abs/2101.00001 )"),
            "https://arxiv.org/abs/2101.00001"
        );
        assert_eq!(
            extract_url("\\\\ ( https://arxiv.org/abs/2101.00001 , 3kb)"),
            "https://arxiv.org/abs/2101.00001"
        );
    }

    #[test]
    fn test_date_with_numeric_offset() {
        let dt = parse_submission_date("Date: Mon, 18 Jun 2012 21:00:00 +0200").unwrap();
        assert_eq!(dt.hour(), 19);
        assert_eq!(dt.day(), 18);
    }

    #[test]
    fn test_date_with_single_digit_day() {
        let dt = parse_submission_date("Date: Mon, 4 Jun 2012 09:05:00 UT   (3kb)").unwrap();
        assert_eq!((dt.month(), dt.day(), dt.hour(), dt.minute()), (6, 4, 9, 5));
    }

    #[test]
    fn test_date_unparseable_is_none() {
        assert!(parse_submission_date("Date: yesterday").is_none());
        assert!(parse_submission_date("Date: Mon, 18 Foo 2012 21:00:00 GMT").is_none());
        assert!(parse_submission_date("Date: Mon, 18 Jun 2012 21:00:00 CEST").is_none());
    }

    #[test]
    fn test_separator_detection() {
        assert!(is_separator("-----"));
        assert!(is_separator("  ---  "));
        assert!(!is_separator(""));
        assert!(!is_separator("-- x --"));
    }
}
