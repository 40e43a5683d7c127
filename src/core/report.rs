//! Report model
//!
//! Rendering produces cards appended to one of two regions: the results
//! region for findings, tables, images and code, and the provenance region
//! for the materials record. Regions are ordered and append-only; a render
//! pass never replaces or merges cards.

use chrono::Local;
use serde::Serialize;

use crate::core::html;

/// One rendered unit: a title and an HTML-safe body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub title: String,
    pub body: String,
}

impl Card {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Which output sink a card belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    Results,
    Provenance,
}

/// Output format for the assembled report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Html,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

#[derive(Serialize)]
struct CardRecord<'a> {
    region: RegionKind,
    title: &'a str,
    body: &'a str,
}

/// The two output regions a render pass populates.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub results: Vec<Card>,
    pub provenance: Vec<Card>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a card to a region.
    pub fn push(&mut self, region: RegionKind, card: Card) {
        match region {
            RegionKind::Results => self.results.push(card),
            RegionKind::Provenance => self.provenance.push(card),
        }
    }

    /// Reset both regions, as the host does before each submission.
    #[allow(dead_code)]
    pub fn clear(&mut self) {
        self.results.clear();
        self.provenance.clear();
    }

    /// Render the report in the selected format.
    pub fn render(&self, format: OutputFormat, pretty: bool) -> String {
        match format {
            OutputFormat::Html => self.to_html(),
            OutputFormat::Json => self.to_json(pretty),
        }
    }

    /// Assemble a standalone HTML document with both regions.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
        out.push_str("<meta charset=\"utf-8\">\n<title>Analysis Report</title>\n");
        out.push_str("<style>\n");
        out.push_str(STYLESHEET);
        out.push_str("</style>\n</head>\n<body>\n");

        out.push_str("<section id=\"results\">\n<h2>Results</h2>\n");
        for card in &self.results {
            push_card_html(&mut out, card);
        }
        out.push_str("</section>\n");

        if !self.provenance.is_empty() {
            out.push_str("<section id=\"provenance\">\n<h2>Provenance</h2>\n");
            for card in &self.provenance {
                push_card_html(&mut out, card);
            }
            out.push_str("</section>\n");
        }

        out.push_str(&format!(
            "<footer>Generated {}</footer>\n",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str("</body>\n</html>\n");
        out
    }

    /// Render the cards as a flat JSON array tagged by region.
    pub fn to_json(&self, pretty: bool) -> String {
        let records: Vec<CardRecord> = self
            .results
            .iter()
            .map(|c| (RegionKind::Results, c))
            .chain(self.provenance.iter().map(|c| (RegionKind::Provenance, c)))
            .map(|(region, c)| CardRecord {
                region,
                title: &c.title,
                body: &c.body,
            })
            .collect();

        if pretty {
            serde_json::to_string_pretty(&records).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&records).unwrap_or_else(|_| "[]".to_string())
        }
    }
}

fn push_card_html(out: &mut String, card: &Card) {
    out.push_str("<div class=\"card\">\n<h3>");
    out.push_str(&html::escape(&card.title));
    out.push_str("</h3>\n");
    out.push_str(&card.body);
    out.push_str("\n</div>\n");
}

const STYLESHEET: &str = "\
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 60rem; }
.card { border: 1px solid #ddd; border-radius: 6px; padding: 1rem; margin: 1rem 0; }
.card h3 { margin-top: 0; }
.card pre { overflow-x: auto; background: #f6f6f6; padding: 0.5rem; }
.table-wrap { overflow-x: auto; }
table { border-collapse: collapse; }
th, td { border: 1px solid #ccc; padding: 0.25rem 0.5rem; text-align: left; }
img { max-width: 100%; }
footer { color: #888; font-size: 0.8rem; margin-top: 2rem; }
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_routes_by_region() {
        let mut report = Report::new();
        report.push(RegionKind::Results, Card::new("A", "<p>a</p>"));
        report.push(RegionKind::Provenance, Card::new("B", "<pre>b</pre>"));
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.provenance.len(), 1);
    }

    #[test]
    fn test_clear_resets_both_regions() {
        let mut report = Report::new();
        report.push(RegionKind::Results, Card::new("A", ""));
        report.push(RegionKind::Provenance, Card::new("B", ""));
        report.clear();
        assert!(report.results.is_empty());
        assert!(report.provenance.is_empty());
    }

    #[test]
    fn test_to_html_escapes_titles() {
        let mut report = Report::new();
        report.push(RegionKind::Results, Card::new("<Title>", "<p>x</p>"));
        let out = report.to_html();
        assert!(out.contains("<h3>&lt;Title&gt;</h3>"));
        // body is inserted verbatim
        assert!(out.contains("<p>x</p>"));
    }

    #[test]
    fn test_to_html_omits_empty_provenance_section() {
        let mut report = Report::new();
        report.push(RegionKind::Results, Card::new("A", ""));
        let out = report.to_html();
        assert!(!out.contains("id=\"provenance\""));
    }

    #[test]
    fn test_to_json_region_tags_and_order() {
        let mut report = Report::new();
        report.push(RegionKind::Results, Card::new("First", "1"));
        report.push(RegionKind::Results, Card::new("Second", "2"));
        report.push(RegionKind::Provenance, Card::new("Materials", "3"));

        let out = report.to_json(false);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        let arr = parsed.as_array().unwrap();
        assert_eq!(arr.len(), 3);
        assert_eq!(arr[0]["title"], "First");
        assert_eq!(arr[0]["region"], "results");
        assert_eq!(arr[2]["region"], "provenance");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("html".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("md".parse::<OutputFormat>().is_err());
    }
}
