//! Request composition
//!
//! Turns a brief, raw URL text, and attached files into an inspectable
//! multipart transport payload. Two wire encodings exist and the active one
//! is selected per invocation, never hard-wired: the bundled encoding ships
//! everything inside a synthesized `questions.txt` document, the fields
//! encoding uses discrete form fields.

use anyhow::{bail, Result};

/// Reserved part name for the bundled encoding. The service requires exactly
/// this name and extracts URLs from the document body.
pub const QUESTION_FILE_FIELD: &str = "questions.txt";

/// Field name for attachments. Any name other than the reserved one works
/// for the bundled encoding; the fields encoding requires this one.
pub const FILES_FIELD: &str = "files";

/// Wire encoding variants. Exactly one is active per submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireEncoding {
    /// One `questions.txt` part bundling brief and URLs, plus raw file parts.
    #[default]
    Bundled,
    /// Discrete `brief`, `urls` (JSON array) and `files` parts.
    Fields,
}

impl std::str::FromStr for WireEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bundled" => Ok(WireEncoding::Bundled),
            "fields" => Ok(WireEncoding::Fields),
            _ => Err(format!("Unknown encoding: {}", s)),
        }
    }
}

/// One attached file.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// One part of the multipart body. `file_name` is set for file-like parts
/// and absent for plain form fields.
#[derive(Debug, Clone)]
pub struct Part {
    pub field: String,
    pub file_name: Option<String>,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// The assembled multipart body, kept inspectable until send time.
#[derive(Debug, Clone, Default)]
pub struct TransportPayload {
    pub parts: Vec<Part>,
}

/// Split raw URL text into trimmed, non-empty lines, order preserved.
pub fn split_urls(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// A user-composed analysis request.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub brief: String,
    pub urls: Vec<String>,
    pub attachments: Vec<Attachment>,
}

impl AnalysisRequest {
    pub fn new(brief: &str, urls_raw: &str, attachments: Vec<Attachment>) -> Self {
        Self {
            brief: brief.trim().to_string(),
            urls: split_urls(urls_raw),
            attachments,
        }
    }

    /// True when there is nothing to submit at all.
    pub fn is_empty(&self) -> bool {
        self.brief.is_empty() && self.urls.is_empty() && self.attachments.is_empty()
    }

    /// Body of the bundled `questions.txt` document: the brief, then a blank
    /// line and the newline-joined URLs when any exist.
    pub fn question_text(&self) -> String {
        if self.urls.is_empty() {
            return self.brief.clone();
        }
        let mut lines = vec![self.brief.clone(), String::new()];
        lines.extend(self.urls.iter().cloned());
        lines.join("\n")
    }

    /// Compose the transport payload for the selected encoding.
    ///
    /// Refuses an entirely empty request before any network activity.
    pub fn compose(&self, encoding: WireEncoding) -> Result<TransportPayload> {
        if self.is_empty() {
            bail!("Nothing to submit: enter a brief, or add URLs/files");
        }

        let mut payload = TransportPayload::default();
        match encoding {
            WireEncoding::Bundled => {
                payload.parts.push(Part {
                    field: QUESTION_FILE_FIELD.to_string(),
                    file_name: Some(QUESTION_FILE_FIELD.to_string()),
                    media_type: "text/plain".to_string(),
                    bytes: self.question_text().into_bytes(),
                });
                for att in &self.attachments {
                    payload.parts.push(Part {
                        field: FILES_FIELD.to_string(),
                        file_name: Some(att.name.clone()),
                        media_type: att.media_type.clone(),
                        bytes: att.bytes.clone(),
                    });
                }
            }
            WireEncoding::Fields => {
                if !self.brief.is_empty() {
                    payload.parts.push(Part {
                        field: "brief".to_string(),
                        file_name: None,
                        media_type: "text/plain".to_string(),
                        bytes: self.brief.clone().into_bytes(),
                    });
                }
                if !self.urls.is_empty() {
                    let json = serde_json::to_string(&self.urls)?;
                    payload.parts.push(Part {
                        field: "urls".to_string(),
                        file_name: None,
                        media_type: "application/json".to_string(),
                        bytes: json.into_bytes(),
                    });
                }
                for att in &self.attachments {
                    payload.parts.push(Part {
                        field: FILES_FIELD.to_string(),
                        file_name: Some(att.name.clone()),
                        media_type: att.media_type.clone(),
                        bytes: att.bytes.clone(),
                    });
                }
            }
        }
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(name: &str) -> Attachment {
        Attachment {
            name: name.to_string(),
            media_type: "text/csv".to_string(),
            bytes: b"a,b\n1,2\n".to_vec(),
        }
    }

    #[test]
    fn test_split_urls() {
        let raw = "  https://a.example \n\n\thttps://b.example\t\n   \nhttps://c.example";
        assert_eq!(
            split_urls(raw),
            vec!["https://a.example", "https://b.example", "https://c.example"]
        );
    }

    #[test]
    fn test_split_urls_crlf() {
        assert_eq!(split_urls("https://a\r\nhttps://b\r\n"), vec!["https://a", "https://b"]);
    }

    #[test]
    fn test_empty_request_rejected() {
        let req = AnalysisRequest::new("   ", "\n  \n", Vec::new());
        assert!(req.is_empty());
        assert!(req.compose(WireEncoding::Bundled).is_err());
        assert!(req.compose(WireEncoding::Fields).is_err());
    }

    #[test]
    fn test_question_text_brief_only() {
        let req = AnalysisRequest::new("Compare revenue 2022 vs 2023", "", Vec::new());
        assert_eq!(req.question_text(), "Compare revenue 2022 vs 2023");
    }

    #[test]
    fn test_question_text_with_urls() {
        let req = AnalysisRequest::new("brief", "https://a\nhttps://b", Vec::new());
        assert_eq!(req.question_text(), "brief\n\nhttps://a\nhttps://b");
    }

    #[test]
    fn test_bundled_single_part_for_brief_only() {
        let req = AnalysisRequest::new("Compare revenue 2022 vs 2023", "", Vec::new());
        let payload = req.compose(WireEncoding::Bundled).unwrap();
        assert_eq!(payload.parts.len(), 1);
        let part = &payload.parts[0];
        assert_eq!(part.field, QUESTION_FILE_FIELD);
        assert_eq!(part.file_name.as_deref(), Some(QUESTION_FILE_FIELD));
        assert_eq!(part.bytes, b"Compare revenue 2022 vs 2023");
    }

    #[test]
    fn test_bundled_attachments_under_files_field() {
        let req = AnalysisRequest::new("brief", "", vec![attachment("data.csv")]);
        let payload = req.compose(WireEncoding::Bundled).unwrap();
        assert_eq!(payload.parts.len(), 2);
        assert_eq!(payload.parts[1].field, FILES_FIELD);
        assert_eq!(payload.parts[1].file_name.as_deref(), Some("data.csv"));
        assert_ne!(payload.parts[1].field, QUESTION_FILE_FIELD);
    }

    #[test]
    fn test_fields_encoding_parts() {
        let req = AnalysisRequest::new("brief", "https://a\nhttps://b", vec![attachment("x.csv")]);
        let payload = req.compose(WireEncoding::Fields).unwrap();
        let fields: Vec<&str> = payload.parts.iter().map(|p| p.field.as_str()).collect();
        assert_eq!(fields, vec!["brief", "urls", "files"]);
        assert_eq!(payload.parts[1].bytes, br#"["https://a","https://b"]"#);
        assert!(payload.parts[0].file_name.is_none());
    }

    #[test]
    fn test_fields_encoding_omits_empty_parts() {
        let req = AnalysisRequest::new("", "", vec![attachment("x.csv")]);
        let payload = req.compose(WireEncoding::Fields).unwrap();
        let fields: Vec<&str> = payload.parts.iter().map(|p| p.field.as_str()).collect();
        assert_eq!(fields, vec!["files"]);
    }

    #[test]
    fn test_wire_encoding_parse() {
        assert_eq!("bundled".parse::<WireEncoding>().unwrap(), WireEncoding::Bundled);
        assert_eq!("FIELDS".parse::<WireEncoding>().unwrap(), WireEncoding::Fields);
        assert!("mixed".parse::<WireEncoding>().is_err());
    }
}
