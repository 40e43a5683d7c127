//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::client::{Endpoint, DEFAULT_API_PATH};
use crate::commands::{self, OutputOptions};
use crate::core::report::OutputFormat;
use crate::core::request::{AnalysisRequest, WireEncoding};

/// dossier - submit analysis briefs to a remote agent and render its
/// responses as readable reports.
#[derive(Parser, Debug)]
#[command(name = "dossier")]
#[command(
    author,
    version,
    about,
    long_about = r#"dossier composes an analysis request (a free-text brief, reference URLs,
attached files), submits it to a remote analysis agent over multipart HTTP,
and renders the agent's JSON response into a predictable report.

The response payload has no fixed shape: the agent may return prose,
discrete answers, tables in several encodings, images, code, a provenance
record, or a structured error, in any combination. dossier classifies
whatever it finds and renders each piece as a card, falling back to a raw
JSON dump when nothing is recognizable.

Output formats:
- html: a standalone HTML report (default)
- json: a flat JSON array of cards, tagged by region

Examples:
    dossier run "Compare revenue 2022 vs 2023" --endpoint https://agent.example.com
    dossier run "Summarize these" --url https://a.example --files data.csv
    dossier render response.json --out report.html
    dossier compose "What changed?" --files q3.csv --encoding fields
"#
)]
pub struct Cli {
    /// Output format (html/json).
    #[arg(
        long,
        global = true,
        default_value = "html",
        value_name = "FORMAT",
        long_help = "Select the report output format.\n\n\
Supported values:\n\
- html (default): a standalone HTML document\n\
- json: a flat JSON array of cards, each tagged with its region"
    )]
    pub format: String,

    /// Pretty-print JSON output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON output with indentation for human readability.\n\n\
Has no effect on the html format."
    )]
    pub pretty: bool,

    /// Write the report to a file instead of stdout.
    #[arg(long, global = true, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Disable colored status output.
    #[arg(
        long,
        global = true,
        long_help = "Disable colored status output. Useful when piping stderr to files or\n\
when your terminal does not support ANSI colors."
    )]
    pub no_color: bool,

    /// Quiet mode (no status lines).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Suppress status lines on stderr. The report itself is still written\n\
to stdout or the --out file."
    )]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable more detailed diagnostics on stderr, including attachment\n\
listings and text part previews."
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Inputs shared by the commands that compose a request.
#[derive(Args, Debug)]
pub struct RequestArgs {
    /// Free-text analysis brief.
    #[arg(value_name = "BRIEF")]
    pub brief: Option<String>,

    /// Reference URL (repeatable, one per flag).
    #[arg(long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// File containing reference URLs, one per line.
    #[arg(
        long,
        value_name = "FILE",
        long_help = "Read reference URLs from a file, one per line. Lines are trimmed and\n\
blank lines dropped; order is preserved. Combines with repeated --url flags."
    )]
    pub urls_file: Option<PathBuf>,

    /// Files to attach to the request.
    #[arg(long, value_name = "FILES", num_args = 0.., long_help = "File paths to attach.\n\n\
Example: --files data.csv notes.txt")]
    pub files: Vec<PathBuf>,

    /// Wire encoding for the multipart body (bundled/fields).
    #[arg(
        long,
        default_value = "bundled",
        value_name = "ENCODING",
        long_help = "Select the multipart wire encoding. Exactly one is active per submission.\n\n\
Supported values:\n\
- bundled (default): one questions.txt part bundling brief and URLs, plus\n\
  one part per attached file\n\
- fields: discrete brief/urls/files form fields (urls as a JSON array)"
    )]
    pub encoding: String,
}

impl RequestArgs {
    /// Build the analysis request from CLI inputs.
    pub fn to_request(&self) -> Result<AnalysisRequest> {
        let urls_raw = commands::gather_urls(&self.urls, self.urls_file.as_deref())?;
        let attachments = commands::load_attachments(&self.files)?;
        Ok(AnalysisRequest::new(
            self.brief.as_deref().unwrap_or(""),
            &urls_raw,
            attachments,
        ))
    }

    pub fn wire_encoding(&self) -> WireEncoding {
        self.encoding.parse().unwrap_or_default()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a request to the agent and render the response.
    #[command(
        long_about = "Compose the request, POST it to the agent, and render the JSON response\n\
into a report.\n\n\
An empty request (no brief, no URLs, no files) is rejected before any\n\
network call. A non-2xx response or network failure renders a single Error\n\
card and exits nonzero; no retries are attempted.\n\n\
Examples:\n\
  dossier run \"Compare revenue 2022 vs 2023\"\n\
  dossier run \"Summarize\" --url https://a.example --files data.csv --out report.html\n"
    )]
    Run {
        #[command(flatten)]
        request: RequestArgs,

        /// Base URL of the analysis agent.
        #[arg(
            long,
            env = "DOSSIER_ENDPOINT",
            value_name = "URL",
            long_help = "Base URL of the analysis agent. The fixed API path is appended.\n\
Can also be set via the DOSSIER_ENDPOINT environment variable."
        )]
        endpoint: String,

        /// API path suffix appended to the base URL.
        #[arg(long, default_value = DEFAULT_API_PATH, value_name = "PATH")]
        api_path: String,

        /// Ask the agent for debug output (adds a debug query flag).
        #[arg(long)]
        debug: bool,
    },

    /// Render a saved response payload without contacting the agent.
    #[command(
        long_about = "Read a JSON payload from a file (or stdin with '-') and render it into\n\
the same report a live submission would produce.\n\n\
Useful for inspecting saved responses and for testing render behavior.\n\n\
Examples:\n\
  dossier render response.json\n\
  cat response.json | dossier render -\n"
    )]
    Render {
        /// Payload file, or '-' for stdin.
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Show the multipart parts a submission would send (dry run).
    #[command(
        long_about = "Compose the request and print one line per multipart part (field name,\n\
file name, media type, size) without sending anything.\n\n\
With --verbose, text parts include an indented content preview.\n\n\
Example:\n\
  dossier compose \"What changed?\" --files q3.csv\n"
    )]
    Compose {
        #[command(flatten)]
        request: RequestArgs,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let opts = OutputOptions {
        format,
        pretty: cli.pretty,
        out: cli.out.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Run {
            request,
            endpoint,
            api_path,
            debug,
        } => {
            let req = request.to_request()?;
            let encoding = request.wire_encoding();
            let endpoint = Endpoint::new(endpoint, api_path, debug);
            commands::run_submit(&req, encoding, endpoint, &opts)
        }

        Commands::Render { input } => commands::run_render(input.as_deref(), &opts),

        Commands::Compose { request } => {
            let req = request.to_request()?;
            commands::run_compose(&req, request.wire_encoding(), &opts)
        }
    }
}
