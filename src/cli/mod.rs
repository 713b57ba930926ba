pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "arxiv-digest")]
#[command(about = "Read an arXiv email digest in the terminal", long_about = None)]
pub struct Cli {
    /// Digest message file; standard input when absent or "-"
    pub input: Option<PathBuf>,

    /// Saved-entries database (overrides ARXIV_DB)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Input file, or `None` for standard input.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|p| p.as_os_str() != "-")
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Browse the digest interactively (default)
    Tui,
    /// Print the entries of the digest
    List {
        /// Emit the entries as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the entries saved in the database
    Saved,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_stdin_and_tui() {
        let cli = Cli::parse_from(["arxiv-digest"]);
        assert_eq!(cli.input_path(), None);
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_dash_means_stdin() {
        let cli = Cli::parse_from(["arxiv-digest", "-", "list"]);
        assert_eq!(cli.input_path(), None);
        assert_eq!(cli.command, Some(Commands::List { json: false }));
    }

    #[test]
    fn test_input_and_db_override() {
        let cli = Cli::parse_from(["arxiv-digest", "digest.eml", "--db", "/tmp/a.db", "list", "--json"]);
        assert_eq!(cli.input_path(), Some(&PathBuf::from("digest.eml")));
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/a.db")));
        assert_eq!(cli.command, Some(Commands::List { json: true }));
    }
}
