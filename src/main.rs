use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, EnvFilter};

use arxiv_digest::app::AppContext;
use arxiv_digest::cli::{commands, Cli, Commands};
use arxiv_digest::config::{Config, Settings};
use arxiv_digest::parser::{parse_digest, DigestMessage};

/// EX_DATAERR from sysexits.h.
const EXIT_NOT_A_DIGEST: u8 = 65;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut settings = Settings::from_env();
    if let Some(db) = &cli.db {
        settings.db_path = db.clone();
    }
    init_tracing(&settings.log_path);
    settings.warn_rejected();
    tracing::debug!(?settings, "settings loaded");

    let command = cli.command.clone().unwrap_or(Commands::Tui);
    if command == Commands::Saved {
        let ctx = AppContext::new(settings)?;
        commands::list_saved(&mut io::stdout().lock(), &ctx)?;
        return Ok(ExitCode::SUCCESS);
    }

    let raw = read_input(cli.input_path().map(|p| p.as_path()))?;
    let message = DigestMessage::parse(&raw).context("failed to read the digest message")?;
    if let Err(e) = message.ensure_digest() {
        tracing::error!(error = %e, "input rejected");
        println!("Not a newsletter from arXiv.");
        return Ok(ExitCode::from(EXIT_NOT_A_DIGEST));
    }

    let entries = parse_digest(&message.lines());
    tracing::info!(
        entries = entries.len(),
        subject = message.subject.as_deref().unwrap_or_default(),
        "digest parsed"
    );

    let ctx = AppContext::new(settings)?;

    match command {
        Commands::Tui => {
            let config = Config::load().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "using default configuration");
                Config::default()
            });
            arxiv_digest::tui::run(&ctx, &config, entries).await?;
        }
        Commands::List { json } => {
            let classes = ctx
                .matcher
                .classify_all(&entries, |id| ctx.store.exists(id).unwrap_or(false));
            commands::list_entries(&mut io::stdout().lock(), &entries, &classes, json)?;
        }
        Commands::Saved => {}
    }

    Ok(ExitCode::SUCCESS)
}

/// Log to a file truncated on each run; the terminal belongs to the TUI.
fn init_tracing(path: &Path) {
    let writer = match File::create(path) {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(e) => {
            eprintln!("Cannot open log file {}: {}", path.display(), e);
            BoxMakeWriter::new(io::sink)
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn read_input(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut raw = Vec::new();
            io::stdin()
                .read_to_end(&mut raw)
                .context("failed to read standard input")?;
            Ok(raw)
        }
    }
}
