use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use rusqlite_migration::{Migrations, M};

use crate::app::{DigestError, Result};
use crate::domain::{Entry, SavedRecord};
use crate::store::{DeleteOutcome, SaveOutcome, Store};

const DATE_FORMAT: &str = "%Y-%m-%d";

const COLUMNS: &str =
    "arxiv_nr, title, authors, abstract, url, comments, categories, class, time, date, status";

/// File-backed store. Every operation opens its own connection and closes it
/// on return; nothing is held open between calls.
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        let mut conn = Connection::open(&self.path)?;
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);
        migrations.to_latest(&mut conn)?;
        Ok(conn)
    }

    pub fn save_on(&self, entry: &Entry, saved_on: NaiveDate) -> Result<SaveOutcome> {
        let conn = self.connect()?;
        let inserted = conn.execute(
            &format!(
                "INSERT INTO arxiv ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, NULL)",
                COLUMNS
            ),
            params![
                entry.identifier,
                entry.title,
                entry.authors,
                entry.abstract_text,
                entry.url,
                entry.comments,
                entry.categories,
                entry.classification,
                entry.submitted_at.map(|t| t.to_rfc3339()),
                saved_on.format(DATE_FORMAT).to_string(),
            ],
        );

        match inserted {
            Ok(_) => {
                tracing::info!(identifier = %entry.identifier, "saved entry");
                Ok(SaveOutcome::Saved)
            }
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                tracing::debug!(identifier = %entry.identifier, "entry already saved");
                Ok(SaveOutcome::AlreadySaved)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn record_from_row(row: &Row<'_>) -> rusqlite::Result<SavedRecord> {
        let text = |idx: usize| -> rusqlite::Result<String> {
            Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
        };

        let entry = Entry {
            identifier: text(0)?,
            title: text(1)?,
            authors: text(2)?,
            abstract_text: text(3)?,
            url: text(4)?,
            comments: text(5)?,
            categories: text(6)?,
            classification: text(7)?,
            submitted_at: row
                .get::<_, Option<String>>(8)?
                .and_then(|s| parse_datetime(&s)),
        };

        let saved_on = row
            .get::<_, Option<String>>(9)?
            .and_then(|s| NaiveDate::parse_from_str(&s, DATE_FORMAT).ok())
            .unwrap_or_default();

        Ok(SavedRecord {
            entry,
            saved_on,
            status: row.get(10)?,
        })
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

impl Store for SqliteStore {
    fn save(&self, entry: &Entry) -> Result<SaveOutcome> {
        if !entry.has_identifier() {
            return Err(DigestError::MissingField("identifier"));
        }
        self.save_on(entry, Local::now().date_naive())
    }

    fn delete(&self, identifier: &str) -> Result<DeleteOutcome> {
        if !self.path.exists() {
            return Err(DigestError::StoreMissing(self.path.clone()));
        }

        let conn = self.connect()?;
        let removed = conn.execute("DELETE FROM arxiv WHERE arxiv_nr = ?1", params![identifier])?;
        if removed == 0 {
            Ok(DeleteOutcome::NotSaved)
        } else {
            tracing::info!(identifier, "deleted entry");
            Ok(DeleteOutcome::Removed)
        }
    }

    fn exists(&self, identifier: &str) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }

        let conn = self.connect()?;
        let found = conn
            .query_row(
                "SELECT 1 FROM arxiv WHERE arxiv_nr = ?1",
                params![identifier],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn get(&self, identifier: &str) -> Result<Option<SavedRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let conn = self.connect()?;
        let record = conn
            .query_row(
                &format!("SELECT {} FROM arxiv WHERE arxiv_nr = ?1", COLUMNS),
                params![identifier],
                Self::record_from_row,
            )
            .optional()?;
        Ok(record)
    }

    fn all(&self) -> Result<Vec<SavedRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM arxiv ORDER BY date DESC, arxiv_nr",
            COLUMNS
        ))?;
        let records = stmt
            .query_map([], Self::record_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }
}
