use std::io::Write;

use crate::app::{AppContext, Result};
use crate::domain::Entry;
use crate::highlight::Classification;

/// Print the parsed digest, one line per entry, or the whole collection as
/// JSON.
pub fn list_entries<W: Write>(
    out: &mut W,
    entries: &[Entry],
    classes: &[Classification],
    json: bool,
) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, entries).map_err(std::io::Error::from)?;
        writeln!(out)?;
        return Ok(());
    }

    if entries.is_empty() {
        writeln!(out, "No entries")?;
        return Ok(());
    }

    for (i, entry) in entries.iter().enumerate() {
        let saved = classes.get(i).is_some_and(|c| c.saved);
        let marker = if saved { "*" } else { " " };
        writeln!(
            out,
            "{} {:>4} {:<16} {}",
            marker,
            format!("({})", i + 1),
            entry.identifier,
            entry.display_title()
        )?;
    }

    Ok(())
}

pub fn list_saved<W: Write>(out: &mut W, ctx: &AppContext) -> Result<()> {
    let records = ctx.store.all()?;

    if records.is_empty() {
        writeln!(out, "No saved entries")?;
        return Ok(());
    }

    for record in records {
        let status = record
            .status
            .as_deref()
            .map(|s| format!(" [{}]", s))
            .unwrap_or_default();
        writeln!(
            out,
            "{} {:<16} {}{}",
            record.saved_on.format("%Y-%m-%d"),
            record.entry.identifier,
            record.entry.display_title(),
            status
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::store::SqliteStore;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn entries() -> Vec<Entry> {
        vec![
            Entry {
                identifier: "1206.0001".into(),
                title: "Definable sets".into(),
                ..Entry::new()
            },
            Entry {
                identifier: "1206.0002".into(),
                ..Entry::new()
            },
        ]
    }

    #[test]
    fn test_list_entries_plain() {
        let classes = vec![
            Classification {
                saved: true,
                ..Default::default()
            },
            Classification::default(),
        ];
        let mut out = Vec::new();
        list_entries(&mut out, &entries(), &classes, false).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("*  (1) 1206.0001"));
        assert!(lines[0].ends_with("Definable sets"));
        assert!(lines[1].ends_with("(Untitled)"));
    }

    #[test]
    fn test_list_entries_json() {
        let mut out = Vec::new();
        list_entries(&mut out, &entries(), &[], true).unwrap();

        let parsed: Vec<Entry> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, entries());
        let raw: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(raw[0].get("abstract").is_some());
    }

    #[test]
    fn test_list_saved() {
        let dir = tempdir().unwrap();
        let mut settings = Settings::from_lookup(|_| None, Some(dir.path()));
        settings.db_path = dir.path().join("saved.db");
        let store = SqliteStore::new(&settings.db_path);
        let day = NaiveDate::from_ymd_opt(2012, 6, 4).unwrap();
        store.save_on(&entries()[0], day).unwrap();

        let ctx = AppContext::new(settings).unwrap();
        let mut out = Vec::new();
        list_saved(&mut out, &ctx).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("2012-06-04 1206.0001"));
        assert!(text.trim_end().ends_with("Definable sets"));
    }

    #[test]
    fn test_list_saved_without_store() {
        let dir = tempdir().unwrap();
        let mut settings = Settings::from_lookup(|_| None, Some(dir.path()));
        settings.db_path = dir.path().join("missing.db");

        let ctx = AppContext::new(settings).unwrap();
        let mut out = Vec::new();
        list_saved(&mut out, &ctx).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No saved entries\n");
    }
}
