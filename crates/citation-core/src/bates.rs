//! Bates numbering
//!
//! Bates numbers are stamped sequentially across a production set, e.g.
//! `DEF-000123`. Raw numbers coming off OCR or user input are inconsistent
//! ("DEF-45", "DEF 0045"), so everything is normalized before it is cited.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::anchor::SourceAnchor;
use crate::errors::BatesError;
use crate::EN_DASH;

/// Split a raw Bates string into (prefix, trailing digit run)
fn split_trailing_digits(raw: &str) -> Option<(&str, &str)> {
    let start = raw
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    Some(raw.split_at(start))
}

/// Zero-pad the trailing numeric run of a Bates string to `pad_width`,
/// keeping any non-numeric prefix verbatim.
///
/// Strings without digits are returned trimmed but otherwise unchanged.
pub fn normalize_bates(raw: &str, pad_width: usize) -> String {
    let raw = raw.trim();
    match split_trailing_digits(raw) {
        Some((prefix, digits)) => {
            let significant = digits.trim_start_matches('0');
            let significant = if significant.is_empty() { "0" } else { significant };
            format!("{}{:0>width$}", prefix, significant, width = pad_width)
        }
        None => raw.to_string(),
    }
}

/// A single stamped page identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatesNumber {
    pub prefix: String,
    pub number: u64,
    pub pad_width: usize,
}

impl BatesNumber {
    pub fn new(prefix: impl Into<String>, number: u64, pad_width: usize) -> Self {
        Self {
            prefix: prefix.into(),
            number,
            pad_width,
        }
    }

    /// Parse `DEF-000123`, `DEF 123` or `000123`. The pad width is taken from
    /// the digit run as written.
    pub fn parse(raw: &str) -> Result<Self, BatesError> {
        let raw = raw.trim();
        let (prefix, digits) =
            split_trailing_digits(raw).ok_or_else(|| BatesError::NoNumber(raw.to_string()))?;
        let number = digits
            .parse::<u64>()
            .map_err(|_| BatesError::Overflow(raw.to_string()))?;
        let prefix = prefix.trim_end_matches(|c: char| c == '-' || c == '_' || c.is_whitespace());

        Ok(Self {
            prefix: prefix.to_string(),
            number,
            pad_width: digits.len(),
        })
    }

    pub fn next(&self) -> Self {
        Self {
            number: self.number + 1,
            ..self.clone()
        }
    }
}

impl fmt::Display for BatesNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix.is_empty() {
            write!(f, "{:0>width$}", self.number, width = self.pad_width)
        } else {
            write!(
                f,
                "{}-{:0>width$}",
                self.prefix,
                self.number,
                width = self.pad_width
            )
        }
    }
}

/// Inclusive span of Bates numbers sharing a prefix.
///
/// Deserialization goes through [`BatesRange::new`], so a reversed or
/// mixed-prefix range is rejected there too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBatesRange")]
pub struct BatesRange {
    start: BatesNumber,
    end: BatesNumber,
}

#[derive(Deserialize)]
struct RawBatesRange {
    start: BatesNumber,
    end: BatesNumber,
}

impl TryFrom<RawBatesRange> for BatesRange {
    type Error = BatesError;

    fn try_from(raw: RawBatesRange) -> Result<Self, Self::Error> {
        BatesRange::new(raw.start, raw.end)
    }
}

impl BatesRange {
    pub fn new(start: BatesNumber, end: BatesNumber) -> Result<Self, BatesError> {
        if start.prefix != end.prefix {
            return Err(BatesError::PrefixMismatch(start.prefix, end.prefix));
        }
        if start.number > end.number {
            return Err(BatesError::Reversed {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, BatesError> {
        Self::new(BatesNumber::parse(start)?, BatesNumber::parse(end)?)
    }

    pub fn start(&self) -> &BatesNumber {
        &self.start
    }

    pub fn end(&self) -> &BatesNumber {
        &self.end
    }

    /// Number of stamped pages covered
    pub fn len(&self) -> u64 {
        self.end.number - self.start.number + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, bates: &BatesNumber) -> bool {
        bates.prefix == self.start.prefix
            && bates.number >= self.start.number
            && bates.number <= self.end.number
    }

    /// Anchor covering the whole range; single-page ranges carry no end
    pub fn to_anchor(&self) -> SourceAnchor {
        let anchor = SourceAnchor::at_bates(self.start.to_string());
        if self.start.number == self.end.number {
            anchor
        } else {
            anchor.with_bates_end(self.end.to_string())
        }
    }
}

impl fmt::Display for BatesRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.number == self.end.number {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}{}{}", self.start, EN_DASH, self.end)
        }
    }
}
