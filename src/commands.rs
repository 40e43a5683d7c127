//! Command handlers - compose, submit, render

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::client::{AgentClient, Endpoint};
use crate::core::render;
use crate::core::report::{OutputFormat, Report};
use crate::core::request::{AnalysisRequest, Attachment, WireEncoding};
use crate::core::util::{guess_media_type, pretty_bytes};

/// Output destination and verbosity shared by all commands.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub pretty: bool,
    pub out: Option<PathBuf>,
    pub quiet: bool,
    pub verbose: bool,
}

impl OutputOptions {
    fn status(&self, msg: &str) {
        if !self.quiet {
            eprintln!("{}", msg.cyan());
        }
    }

    fn emit(&self, text: &str) -> Result<()> {
        match &self.out {
            Some(path) => fs::write(path, text)
                .with_context(|| format!("Failed to write report: {:?}", path)),
            None => {
                println!("{}", text);
                Ok(())
            }
        }
    }
}

/// Read attachment files and guess their declared media types.
pub fn load_attachments(paths: &[PathBuf]) -> Result<Vec<Attachment>> {
    paths
        .iter()
        .map(|p| {
            let bytes =
                fs::read(p).with_context(|| format!("Failed to read attachment: {:?}", p))?;
            let name = p
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("attachment")
                .to_string();
            Ok(Attachment {
                name,
                media_type: guess_media_type(p).to_string(),
                bytes,
            })
        })
        .collect()
}

/// Join repeated --url values and an optional URL list file into the raw
/// multi-line text the composer splits.
pub fn gather_urls(urls: &[String], urls_file: Option<&Path>) -> Result<String> {
    let mut raw = urls.join("\n");
    if let Some(f) = urls_file {
        let text =
            fs::read_to_string(f).with_context(|| format!("Failed to read URL list: {:?}", f))?;
        if !raw.is_empty() {
            raw.push('\n');
        }
        raw.push_str(&text);
    }
    Ok(raw)
}

/// Submit a request and render the response into a report.
pub fn run_submit(
    req: &AnalysisRequest,
    encoding: WireEncoding,
    endpoint: Endpoint,
    opts: &OutputOptions,
) -> Result<()> {
    let payload = req.compose(encoding)?;

    if opts.verbose {
        for att in &req.attachments {
            eprintln!("  {} ({})", att.name, pretty_bytes(att.bytes.len() as u64));
        }
    }
    opts.status("Submitting…");

    let client = AgentClient::new(endpoint)?;
    let mut report = Report::new();

    match client.submit(payload) {
        Ok(value) => {
            opts.status("Done.");
            render::render(&value, &mut report);
            opts.emit(&report.render(opts.format, opts.pretty))
        }
        Err(err) => {
            if !opts.quiet {
                eprintln!("{}", "Submission failed.".red());
            }
            render::render_transport_error(&err.card_message(), &mut report);
            opts.emit(&report.render(opts.format, opts.pretty))?;
            Err(err.into())
        }
    }
}

/// Render a saved service response without a network round trip.
pub fn run_render(input: Option<&Path>, opts: &OutputOptions) -> Result<()> {
    let text = match input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload: {:?}", path))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read payload from stdin")?;
            buf
        }
    };
    let payload: serde_json::Value =
        serde_json::from_str(&text).context("Payload is not valid JSON")?;

    let mut report = Report::new();
    render::render(&payload, &mut report);
    opts.emit(&report.render(opts.format, opts.pretty))
}

/// Dry-run: print the multipart parts the active encoding would send.
pub fn run_compose(
    req: &AnalysisRequest,
    encoding: WireEncoding,
    opts: &OutputOptions,
) -> Result<()> {
    let payload = req.compose(encoding)?;

    let mut out = String::new();
    for part in &payload.parts {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            part.field,
            part.file_name.as_deref().unwrap_or("-"),
            part.media_type,
            pretty_bytes(part.bytes.len() as u64)
        ));
        if opts.verbose && part.media_type.starts_with("text/") {
            let preview = String::from_utf8_lossy(&part.bytes);
            for line in preview.lines() {
                out.push_str(&format!("    | {}\n", line));
            }
        }
    }
    opts.emit(out.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_attachments_reads_bytes_and_types() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("data.csv");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "a,b\n1,2\n").unwrap();

        let atts = load_attachments(&[path]).unwrap();
        assert_eq!(atts.len(), 1);
        assert_eq!(atts[0].name, "data.csv");
        assert_eq!(atts[0].media_type, "text/csv");
        assert_eq!(atts[0].bytes, b"a,b\n1,2\n");
    }

    #[test]
    fn test_load_attachments_missing_file() {
        let temp = tempdir().unwrap();
        assert!(load_attachments(&[temp.path().join("nope.csv")]).is_err());
    }

    #[test]
    fn test_gather_urls_flags_and_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("urls.txt");
        fs::write(&path, "https://c\nhttps://d\n").unwrap();

        let raw = gather_urls(
            &["https://a".to_string(), "https://b".to_string()],
            Some(&path),
        )
        .unwrap();
        assert_eq!(raw, "https://a\nhttps://b\nhttps://c\nhttps://d\n");
    }

    #[test]
    fn test_gather_urls_flags_only() {
        let raw = gather_urls(&["https://a".to_string()], None).unwrap();
        assert_eq!(raw, "https://a");
    }

    #[test]
    fn test_run_compose_rejects_empty_request() {
        let req = AnalysisRequest::new("", "", Vec::new());
        let opts = OutputOptions::default();
        assert!(run_compose(&req, WireEncoding::Bundled, &opts).is_err());
    }

    #[test]
    fn test_run_render_from_file() {
        let temp = tempdir().unwrap();
        let payload = temp.path().join("payload.json");
        fs::write(&payload, r#"{"answer":"hello"}"#).unwrap();
        let out = temp.path().join("report.html");

        let opts = OutputOptions {
            out: Some(out.clone()),
            ..Default::default()
        };
        run_render(Some(&payload), &opts).unwrap();

        let html = fs::read_to_string(out).unwrap();
        assert!(html.contains("<h3>Findings</h3>"));
        assert!(html.contains("hello"));
    }

    #[test]
    fn test_run_render_invalid_json() {
        let temp = tempdir().unwrap();
        let payload = temp.path().join("payload.json");
        fs::write(&payload, "not json").unwrap();
        let opts = OutputOptions::default();
        assert!(run_render(Some(&payload), &opts).is_err());
    }
}
