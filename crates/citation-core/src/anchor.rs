//! Source anchors: precise pointers into source documents
//!
//! An anchor renders two ways:
//! - an inline chip for the reader, e.g. `[Bates 0023, L7–L19]`, `[Ex. A, p.12]`, `[pp.23–24]`
//! - a deep-link query for the document viewer, e.g. `bates=0023&hl=L7-L19`
//!
//! Chip priority is strictly Bates > Exhibit > Page. The query keys are a wire
//! contract with the viewer and must not change: `doc`, `exhibit`, `bates`,
//! `batesEnd`, `page`, `pageEnd`, `hl`.

use serde::{Deserialize, Serialize};

use crate::errors::AnchorError;
use crate::EN_DASH;

/// Location inside a source document. Value object; never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceAnchor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bates_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bates_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_end: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_start: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_end: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exhibit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl SourceAnchor {
    pub fn at_page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    pub fn at_bates(bates: impl Into<String>) -> Self {
        Self {
            bates_start: Some(bates.into()),
            ..Self::default()
        }
    }

    pub fn in_exhibit(exhibit_id: impl Into<String>) -> Self {
        Self {
            exhibit_id: Some(exhibit_id.into()),
            ..Self::default()
        }
    }

    pub fn in_document(document_id: impl Into<String>) -> Self {
        Self {
            document_id: Some(document_id.into()),
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_page_range(mut self, start: u32, end: u32) -> Self {
        self.page = Some(start);
        self.page_end = Some(end);
        self
    }

    pub fn with_bates_end(mut self, bates_end: impl Into<String>) -> Self {
        self.bates_end = Some(bates_end.into());
        self
    }

    pub fn with_lines(mut self, start: u32, end: u32) -> Self {
        self.line_start = Some(start);
        self.line_end = Some(end);
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line_start = Some(line);
        self.line_end = None;
        self
    }

    pub fn with_exhibit(mut self, exhibit_id: impl Into<String>) -> Self {
        self.exhibit_id = Some(exhibit_id.into());
        self
    }

    pub fn with_document(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }

    /// At least one of bates, page, exhibit or document must be set
    pub fn is_valid(&self) -> bool {
        non_empty(&self.bates_start).is_some()
            || self.page.is_some()
            || non_empty(&self.exhibit_id).is_some()
            || non_empty(&self.document_id).is_some()
    }

    /// Render the bracketed inline chip. Unlocatable anchors are rejected
    /// instead of rendering an empty `[]`.
    pub fn render_chip(&self) -> Result<String, AnchorError> {
        let locator = if let Some(bates) = non_empty(&self.bates_start) {
            match non_empty(&self.bates_end) {
                Some(end) if end != bates => format!("Bates {}{}{}", bates, EN_DASH, end),
                _ => format!("Bates {}", bates),
            }
        } else if let Some(exhibit) = non_empty(&self.exhibit_id) {
            match self.page_label() {
                Some(pages) => format!("Ex. {}, {}", exhibit, pages),
                None => format!("Ex. {}", exhibit),
            }
        } else if let Some(pages) = self.page_label() {
            pages
        } else if let Some(doc) = non_empty(&self.document_id) {
            format!("Doc. {}", doc)
        } else {
            return Err(AnchorError::Unlocatable);
        };

        let mut chip = format!("[{}", locator);
        if let Some(lines) = self.line_label() {
            chip.push_str(", ");
            chip.push_str(&lines);
        }
        chip.push(']');
        Ok(chip)
    }

    fn page_label(&self) -> Option<String> {
        let start = self.page?;
        Some(match self.page_end {
            Some(end) if end != start => format!("pp.{}{}{}", start, EN_DASH, end),
            _ => format!("p.{}", start),
        })
    }

    fn line_label(&self) -> Option<String> {
        let start = self.line_start?;
        Some(match self.line_end {
            Some(end) if end != start => format!("L{}{}L{}", start, EN_DASH, end),
            _ => format!("L{}", start),
        })
    }

    /// Serialize as a `key=value&...` deep-link query in fixed key order.
    ///
    /// A `lineEnd` without a `lineStart` is not representable in `hl` and is dropped.
    pub fn to_query(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();

        if let Some(doc) = non_empty(&self.document_id) {
            pairs.push(("doc", urlencoding::encode(doc).into_owned()));
        }
        if let Some(exhibit) = non_empty(&self.exhibit_id) {
            pairs.push(("exhibit", urlencoding::encode(exhibit).into_owned()));
        }
        if let Some(bates) = non_empty(&self.bates_start) {
            pairs.push(("bates", urlencoding::encode(bates).into_owned()));
        }
        if let Some(bates_end) = non_empty(&self.bates_end) {
            pairs.push(("batesEnd", urlencoding::encode(bates_end).into_owned()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(page_end) = self.page_end {
            pairs.push(("pageEnd", page_end.to_string()));
        }
        if let Some(start) = self.line_start {
            let hl = match self.line_end {
                Some(end) => format!("L{}-L{}", start, end),
                None => format!("L{}", start),
            };
            pairs.push(("hl", hl));
        }

        pairs
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Parse a deep-link query produced by [`SourceAnchor::to_query`].
    ///
    /// A leading `?` is accepted and keys outside the contract are ignored so
    /// viewers can carry their own parameters.
    pub fn parse_query(query: &str) -> Result<Self, AnchorError> {
        let mut anchor = SourceAnchor::default();
        let query = query.trim().trim_start_matches('?');

        for segment in query.split('&').filter(|s| !s.is_empty()) {
            let (key, raw) = segment
                .split_once('=')
                .ok_or_else(|| AnchorError::MalformedSegment(segment.to_string()))?;
            let value = urlencoding::decode(raw)
                .map_err(|_| invalid(key, raw))?
                .into_owned();
            if value.is_empty() {
                continue;
            }

            match key {
                "doc" => anchor.document_id = Some(value),
                "exhibit" => anchor.exhibit_id = Some(value),
                "bates" => anchor.bates_start = Some(value),
                "batesEnd" => anchor.bates_end = Some(value),
                "page" => anchor.page = Some(parse_number(key, &value)?),
                "pageEnd" => anchor.page_end = Some(parse_number(key, &value)?),
                "hl" => {
                    let (start, end) = parse_highlight(&value)?;
                    anchor.line_start = Some(start);
                    anchor.line_end = end;
                }
                _ => {}
            }
        }

        Ok(anchor)
    }
}

fn invalid(key: &str, value: &str) -> AnchorError {
    AnchorError::InvalidQueryValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_number(key: &str, value: &str) -> Result<u32, AnchorError> {
    value.parse::<u32>().map_err(|_| invalid(key, value))
}

/// `L7-L19` -> (7, Some(19)); `L7` -> (7, None)
fn parse_highlight(value: &str) -> Result<(u32, Option<u32>), AnchorError> {
    let line = |part: &str| -> Result<u32, AnchorError> {
        part.strip_prefix('L')
            .and_then(|n| n.parse::<u32>().ok())
            .ok_or_else(|| invalid("hl", value))
    };

    match value.split_once('-') {
        Some((start, end)) => Ok((line(start)?, Some(line(end)?))),
        None => Ok((line(value)?, None)),
    }
}
