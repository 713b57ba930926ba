//! # arxiv-digest
//!
//! A terminal reader for the daily arXiv email digest.
//!
//! ## Architecture
//!
//! One digest message is read per run and flows through a short pipeline:
//!
//! ```text
//! Envelope check → Parser → Entries → Highlight → Layout index → TUI
//!                                         ↑
//!                 Detail / document actions → Fetcher, Scraper, Store
//! ```
//!
//! - [`parser`]: checks the sender, decodes the body and splits it into entries
//! - [`highlight`]: author and content patterns, saved-state marking
//! - [`store`]: SQLite store of saved entries
//! - [`tui`]: Terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Browse a digest
//! arxiv-digest digest.eml
//!
//! # Pipe it from the mail client
//! cat digest.eml | arxiv-digest
//!
//! # Print the entries, or the saved ones
//! arxiv-digest digest.eml list --json
//! arxiv-digest saved
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the store,
/// fetcher, external opener, matcher and settings.
pub mod app;

/// Command-line interface using clap.
///
/// - `[INPUT]` - digest file, standard input when absent or `-`
/// - `tui` - browse the digest (default)
/// - `list [--json]` - print the parsed entries
/// - `saved` - print the saved entries
pub mod cli;

/// Configuration.
///
/// Colors and keybindings from `~/.config/arxiv-digest/config.toml`;
/// patterns, programs and paths from the environment.
pub mod config;

/// Landing-page versions, PDF download and external program launch.
pub mod document;

/// Core domain models.
///
/// - [`Entry`](domain::Entry): one announcement of a digest
/// - [`SavedRecord`](domain::SavedRecord): an entry kept in the store
pub mod domain;

/// HTTP fetching with a bounded timeout.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for page and file fetching
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Title coloring by author and content patterns.
pub mod highlight;

/// Mail envelope handling and the digest block scanner.
pub mod parser;

/// Minimal tag scanner for arXiv landing pages.
pub mod scraper;

/// SQLite persistence layer.
///
/// - [`Store`](store::Store): Trait defining storage operations
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;

/// Terminal user interface.
///
/// A word-wrapped list of titles with an expandable detail view per entry.
/// Keybindings: j/k move, Enter opens details, u opens the page, s/d save
/// and delete, g/o fetch and open the PDF, h shows help, q quits.
pub mod tui;
