//! dossier - a CLI client for a remote analysis agent
//!
//! dossier provides:
//! - Request composition (brief, reference URLs, file attachments) into
//!   either of two multipart wire encodings
//! - A blocking HTTP submission path with a clear error taxonomy
//! - Normalization and rendering of the agent's schemaless JSON responses
//!   into predictable report cards (html/json output)

use anyhow::Result;
use clap::Parser;

mod cli;
mod client;
mod commands;
mod core;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
