#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! CLI for the IMAP attachment fetcher.
//!
//! `run` executes one fetch pass (search unread, extract, persist)
//! and prints the files written; `folders` lists the mailboxes on the
//! server. Zero unread matches and any connection failure exit
//! non-zero, which is what a scheduler wants to see.

use attachment_fetcher::{Config, ExtractionResult, ImapClient, pipeline};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fetcher-cli")]
#[command(about = "Download report attachments from unread IMAP mail")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch unread matching messages and persist their attachments
    Run,

    /// List available IMAP folders
    Folders,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;
    let client = ImapClient::new(config.clone());

    match args.command {
        Command::Run => {
            let result = pipeline::run(&client, &config).await?;
            print_result(&result, args.json)?;
        }
        Command::Folders => {
            let folders = client.list_folders().await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&folders)?);
            } else {
                for folder in &folders {
                    println!("{folder}");
                }
            }
        }
    }

    Ok(())
}

fn print_result(result: &ExtractionResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    if result.written.is_empty() {
        println!("No attachments written.");
    } else {
        println!("Files:");
        for path in &result.written {
            println!("  {}", path.display());
        }
        println!("{} file(s) written", result.written.len());
    }

    for warning in &result.warnings {
        eprintln!("warning: {warning}");
    }

    Ok(())
}
