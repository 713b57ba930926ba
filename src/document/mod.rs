//! Full-text documents: locating the newest revision, downloading it and
//! handing files or URLs to external programs.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::app::{DigestError, Result};
use crate::domain::Entry;
use crate::fetcher::Fetcher;
use crate::scraper::extract_versions;

const PDF_BASE: &str = "https://arxiv.org/pdf/";

pub fn pdf_url(identifier: &str, version: &str) -> String {
    format!("{}{}{}.pdf", PDF_BASE, identifier, version)
}

/// Local file name; old-style identifiers (`math/0601001`) contain a slash.
pub fn file_name(identifier: &str, version: &str) -> String {
    format!("{}{}.pdf", identifier.replace('/', "_"), version)
}

/// Last revision tag listed on the entry's landing page.
pub async fn latest_version(fetcher: &dyn Fetcher, entry: &Entry) -> Result<String> {
    let url = entry.url().ok_or(DigestError::MissingField("url"))?;
    let page = fetcher.fetch_text(url).await?;
    extract_versions(&page)
        .pop()
        .ok_or_else(|| DigestError::NoVersions(url.to_string()))
}

async fn download(
    fetcher: &dyn Fetcher,
    entry: &Entry,
    version: &str,
    target: &Path,
) -> Result<()> {
    let url = pdf_url(&entry.identifier, version);
    let bytes = fetcher.fetch(&url).await?;
    tokio::fs::write(target, &bytes).await?;
    tracing::info!(url = %url, target = %target.display(), bytes = bytes.len(), "downloaded document");
    Ok(())
}

fn require_identifier(entry: &Entry) -> Result<()> {
    if entry.has_identifier() {
        Ok(())
    } else {
        Err(DigestError::MissingField("identifier"))
    }
}

/// Download the newest revision into `dir`, replacing any earlier copy of
/// the same revision.
pub async fn download_latest(fetcher: &dyn Fetcher, entry: &Entry, dir: &Path) -> Result<PathBuf> {
    require_identifier(entry)?;
    let version = latest_version(fetcher, entry).await?;
    let target = dir.join(file_name(&entry.identifier, &version));
    download(fetcher, entry, &version, &target).await?;
    Ok(target)
}

/// Path of the newest revision in `dir`, downloading it only when the file
/// is not there yet.
pub async fn ensure_local(fetcher: &dyn Fetcher, entry: &Entry, dir: &Path) -> Result<PathBuf> {
    require_identifier(entry)?;
    let version = latest_version(fetcher, entry).await?;
    let target = dir.join(file_name(&entry.identifier, &version));
    if tokio::fs::try_exists(&target).await? {
        tracing::debug!(target = %target.display(), "document already downloaded");
    } else {
        download(fetcher, entry, &version, &target).await?;
    }
    Ok(target)
}

/// Starts external programs without waiting for them.
pub trait Opener: Send + Sync {
    /// Open `target` with `program`, or with the system default when `None`.
    fn open(&self, program: Option<&str>, target: &OsStr) -> std::io::Result<()>;
}

pub struct SystemOpener;

impl Opener for SystemOpener {
    fn open(&self, program: Option<&str>, target: &OsStr) -> std::io::Result<()> {
        match program {
            Some(program) => open::with_detached(target, program),
            None => open::that_detached(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    const LANDING: &str = "<h2>Submission history</h2>\
        <strong>[v1]</strong> Thu, 14 Jun 2012<br/><strong>[v2]</strong> Mon, 2 Jul 2012";

    #[derive(Default)]
    struct FakeFetcher {
        pages: HashMap<String, Vec<u8>>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        fn with(mut self, url: &str, body: &[u8]) -> Self {
            self.pages.insert(url.to_string(), body.to_vec());
            self
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetcher for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            self.requests.lock().unwrap().push(url.to_string());
            self.pages.get(url).cloned().ok_or_else(|| {
                DigestError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, url.to_string()))
            })
        }
    }

    fn entry() -> Entry {
        Entry {
            identifier: "1206.3197".into(),
            url: "https://arxiv.org/abs/1206.3197".into(),
            ..Entry::new()
        }
    }

    #[test]
    fn test_pdf_url_and_file_name() {
        assert_eq!(pdf_url("1206.3197", "v2"), "https://arxiv.org/pdf/1206.3197v2.pdf");
        assert_eq!(file_name("1206.3197", "v2"), "1206.3197v2.pdf");
        assert_eq!(file_name("math/0601001", "v1"), "math_0601001v1.pdf");
    }

    #[tokio::test]
    async fn test_latest_version_is_last_tag() {
        let fetcher = FakeFetcher::default().with("https://arxiv.org/abs/1206.3197", LANDING.as_bytes());
        assert_eq!(latest_version(&fetcher, &entry()).await.unwrap(), "v2");
    }

    #[tokio::test]
    async fn test_latest_version_without_tags() {
        let fetcher = FakeFetcher::default().with("https://arxiv.org/abs/1206.3197", b"<html></html>");
        assert!(matches!(
            latest_version(&fetcher, &entry()).await,
            Err(DigestError::NoVersions(_))
        ));
    }

    #[tokio::test]
    async fn test_entry_without_url() {
        let fetcher = FakeFetcher::default();
        let mut e = entry();
        e.url.clear();
        assert!(matches!(
            latest_version(&fetcher, &e).await,
            Err(DigestError::MissingField("url"))
        ));
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_download_latest_writes_file() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default()
            .with("https://arxiv.org/abs/1206.3197", LANDING.as_bytes())
            .with("https://arxiv.org/pdf/1206.3197v2.pdf", b"%PDF-1.4");

        let path = download_latest(&fetcher, &entry(), dir.path()).await.unwrap();
        assert_eq!(path, dir.path().join("1206.3197v2.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4");
    }

    #[tokio::test]
    async fn test_ensure_local_reuses_existing_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("1206.3197v2.pdf"), b"cached").unwrap();
        let fetcher = FakeFetcher::default().with("https://arxiv.org/abs/1206.3197", LANDING.as_bytes());

        let path = ensure_local(&fetcher, &entry(), dir.path()).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"cached");
        assert_eq!(fetcher.requests(), vec!["https://arxiv.org/abs/1206.3197"]);
    }

    #[tokio::test]
    async fn test_failed_download_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let fetcher = FakeFetcher::default().with("https://arxiv.org/abs/1206.3197", LANDING.as_bytes());

        assert!(download_latest(&fetcher, &entry(), dir.path()).await.is_err());
        assert!(!dir.path().join("1206.3197v2.pdf").exists());
    }
}
