//! Runtime settings taken from the environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetcher::http_fetcher::DEFAULT_TIMEOUT;

const DEFAULT_DB_NAME: &str = ".arxiv.db";
const DEFAULT_LOG_NAME: &str = "arxiv_reader.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Whitespace-separated author names to highlight.
    pub authors: Option<String>,
    /// Regular expression matched against titles and abstracts.
    pub abstract_pattern: Option<String>,
    pub ignore_case: bool,
    pub browser: Option<String>,
    pub pdf_reader: Option<String>,
    pub download_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_path: PathBuf,
    pub http_timeout: Duration,
    /// Variables that were set but could not be used, as `NAME=value`.
    pub rejected: Vec<String>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), dirs::home_dir().as_deref())
    }

    /// Build settings from an arbitrary variable lookup. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F, home: Option<&Path>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let temp = std::env::temp_dir();

        let db_path = var("ARXIV_DB").map(PathBuf::from).unwrap_or_else(|| {
            home.map_or_else(|| temp.join(DEFAULT_DB_NAME), |h| h.join(DEFAULT_DB_NAME))
        });

        let log_path = var("ARXIV_LOG")
            .map(PathBuf::from)
            .unwrap_or_else(|| temp.join(DEFAULT_LOG_NAME));

        let ignore_case = var("ARXIV_PATTERN_IGNORE_CASE")
            .map(|v| !matches!(v.trim().to_lowercase().as_str(), "0" | "false" | "no" | "off"))
            .unwrap_or(true);

        let mut rejected = Vec::new();
        let http_timeout = match var("ARXIV_HTTP_TIMEOUT") {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    rejected.push(format!("ARXIV_HTTP_TIMEOUT={}", v));
                    DEFAULT_TIMEOUT
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        Self {
            authors: var("ARXIV_AUTHORS"),
            abstract_pattern: var("ARXIV_ABSTRACT_PATTERN"),
            ignore_case,
            browser: var("BROWSER"),
            pdf_reader: var("PDFREADER"),
            download_dir: download_dir(var("ARXIV_DOWNLOAD_DIR"), home, &temp),
            db_path,
            log_path,
            http_timeout,
            rejected,
        }
    }
}

impl Settings {
    /// Log the variables that fell back to their defaults. Settings are read
    /// before the log file is known, so this runs once tracing is installed.
    pub fn warn_rejected(&self) {
        for variable in &self.rejected {
            tracing::warn!(variable = %variable, "ignoring invalid setting");
        }
    }
}

/// First existing directory among the configured one, `~/downloads`,
/// `~/Downloads`; the temp directory otherwise.
fn download_dir(configured: Option<String>, home: Option<&Path>, temp: &Path) -> PathBuf {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(dir) = configured {
        candidates.push(PathBuf::from(dir));
    }
    if let Some(home) = home {
        candidates.push(home.join("downloads"));
        candidates.push(home.join("Downloads"));
    }

    candidates
        .into_iter()
        .find(|dir| dir.is_dir())
        .unwrap_or_else(|| temp.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn settings(vars: &[(&str, &str)], home: Option<&Path>) -> Settings {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned(), home)
    }

    #[test]
    fn test_defaults() {
        let home = TempDir::new().unwrap();
        let s = settings(&[], Some(home.path()));

        assert_eq!(s.authors, None);
        assert_eq!(s.abstract_pattern, None);
        assert!(s.ignore_case);
        assert_eq!(s.db_path, home.path().join(".arxiv.db"));
        assert_eq!(s.log_path, std::env::temp_dir().join("arxiv_reader.log"));
        assert_eq!(s.download_dir, std::env::temp_dir());
        assert_eq!(s.http_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_values_from_lookup() {
        let s = settings(
            &[
                ("ARXIV_AUTHORS", "Kowalska Smith"),
                ("ARXIV_ABSTRACT_PATTERN", "o-minimal"),
                ("ARXIV_PATTERN_IGNORE_CASE", "false"),
                ("ARXIV_DB", "/var/lib/arxiv.db"),
                ("ARXIV_LOG", "/var/log/arxiv.log"),
                ("ARXIV_HTTP_TIMEOUT", "3"),
                ("BROWSER", "firefox"),
                ("PDFREADER", "zathura"),
            ],
            None,
        );

        assert_eq!(s.authors.as_deref(), Some("Kowalska Smith"));
        assert_eq!(s.abstract_pattern.as_deref(), Some("o-minimal"));
        assert!(!s.ignore_case);
        assert_eq!(s.db_path, PathBuf::from("/var/lib/arxiv.db"));
        assert_eq!(s.log_path, PathBuf::from("/var/log/arxiv.log"));
        assert_eq!(s.http_timeout, Duration::from_secs(3));
        assert_eq!(s.browser.as_deref(), Some("firefox"));
        assert_eq!(s.pdf_reader.as_deref(), Some("zathura"));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let s = settings(&[("ARXIV_AUTHORS", "  "), ("BROWSER", "")], None);
        assert_eq!(s.authors, None);
        assert_eq!(s.browser, None);
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let s = settings(&[("ARXIV_HTTP_TIMEOUT", "soon")], None);
        assert_eq!(s.http_timeout, DEFAULT_TIMEOUT);
        assert_eq!(s.rejected, vec!["ARXIV_HTTP_TIMEOUT=soon".to_string()]);
        let s = settings(&[("ARXIV_HTTP_TIMEOUT", "0")], None);
        assert_eq!(s.http_timeout, DEFAULT_TIMEOUT);
        assert_eq!(s.rejected, vec!["ARXIV_HTTP_TIMEOUT=0".to_string()]);

        let s = settings(&[("ARXIV_HTTP_TIMEOUT", "30")], None);
        assert!(s.rejected.is_empty());
    }

    #[test]
    fn test_download_dir_candidates() {
        let home = TempDir::new().unwrap();
        std::fs::create_dir(home.path().join("Downloads")).unwrap();

        let s = settings(&[], Some(home.path()));
        assert_eq!(s.download_dir, home.path().join("Downloads"));

        let missing = home.path().join("nope");
        let s = settings(
            &[("ARXIV_DOWNLOAD_DIR", missing.to_str().unwrap())],
            Some(home.path()),
        );
        assert_eq!(s.download_dir, home.path().join("Downloads"));

        let configured = home.path().join("papers");
        std::fs::create_dir(&configured).unwrap();
        let s = settings(
            &[("ARXIV_DOWNLOAD_DIR", configured.to_str().unwrap())],
            Some(home.path()),
        );
        assert_eq!(s.download_dir, configured);
    }
}
