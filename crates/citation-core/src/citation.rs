//! Case-law and statute citations
//!
//! Formatting follows a fixed legal citation style:
//! - Case: `Name, 12 Cal.3d 456, 460 (1974)` or `Name, 80 Cal.App.4th 12 (Cal. Ct. App. 2000)`
//! - Statute: `Cal. Code Civ. Proc. § 999.1 (2023)`
//!
//! Known limitations: parallel reporters, prior/subsequent history,
//! short-form cites, signals and string citations are not handled.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    /// Highest-court state reporter: jurisdiction abbreviation followed by a series
    /// suffix, e.g. "Cal.2d", "Wash.2d", "N.Y.3d", "Cal.5th"
    static ref STATE_SUPREME_REPORTER: Regex =
        Regex::new(r"^(?:[A-Z][a-z]+\.|(?:[A-Z]\.){2})\s?\d(?:d|th)$").unwrap();
}

/// Reporters that only publish the U.S. Supreme Court
const SUPREME_COURT_REPORTERS: &[&str] = &[
    "U.S.",
    "S. Ct.",
    "S.Ct.",
    "L. Ed.",
    "L. Ed. 2d",
    "L.Ed.",
    "L.Ed.2d",
];

/// Regional reporters whose abbreviation looks like a state series but covers many courts
const REGIONAL_REPORTER_PREFIXES: &[&str] = &["So.", "N.E.", "N.W.", "S.E.", "S.W."];

/// A legal authority cited in a demand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Citation {
    Case(CaseCitation),
    Statute(StatuteCitation),
}

/// Reported judicial decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseCitation {
    pub case_name: String,
    pub volume: u32,
    pub reporter: String,
    pub page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court: Option<String>,
    pub year: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_cite: Option<String>,
}

/// Statutory provision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatuteCitation {
    pub code: String,
    pub section: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
}

impl Citation {
    pub fn case(
        case_name: impl Into<String>,
        volume: u32,
        reporter: impl Into<String>,
        page: u32,
        year: u16,
    ) -> Self {
        Citation::Case(CaseCitation {
            case_name: case_name.into(),
            volume,
            reporter: reporter.into(),
            page,
            court: None,
            year,
            pin_cite: None,
        })
    }

    pub fn statute(code: impl Into<String>, section: impl Into<String>) -> Self {
        Citation::Statute(StatuteCitation {
            code: code.into(),
            section: section.into(),
            year: None,
        })
    }

    /// Set the deciding court (cases only)
    pub fn with_court(mut self, court: impl Into<String>) -> Self {
        if let Citation::Case(ref mut c) = self {
            c.court = Some(court.into());
        }
        self
    }

    /// Set a pin cite (cases only)
    pub fn with_pin_cite(mut self, pin: impl Into<String>) -> Self {
        if let Citation::Case(ref mut c) = self {
            c.pin_cite = Some(pin.into());
        }
        self
    }

    /// Set the code year (statutes only)
    pub fn with_year(mut self, year: u16) -> Self {
        if let Citation::Statute(ref mut s) = self {
            s.year = Some(year);
        }
        self
    }

    pub fn is_case(&self) -> bool {
        matches!(self, Citation::Case(_))
    }

    pub fn is_statute(&self) -> bool {
        matches!(self, Citation::Statute(_))
    }

    /// Render in the fixed citation style. Pure; also the deduplication key.
    pub fn formatted(&self) -> String {
        match self {
            Citation::Case(c) => c.formatted(),
            Citation::Statute(s) => s.formatted(),
        }
    }
}

impl CaseCitation {
    pub fn formatted(&self) -> String {
        let mut out = format!(
            "{}, {} {} {}",
            self.case_name.trim(),
            self.volume,
            self.reporter.trim(),
            self.page
        );

        if let Some(pin) = self.pin_cite.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            out.push_str(", ");
            out.push_str(pin);
        }

        let court = self
            .court
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !reporter_identifies_court(&self.reporter));

        match court {
            Some(court) => out.push_str(&format!(" ({} {})", court, self.year)),
            None => out.push_str(&format!(" ({})", self.year)),
        }

        out
    }
}

impl StatuteCitation {
    pub fn formatted(&self) -> String {
        let mut out = format!("{} § {}", self.code.trim(), self.section.trim());
        if let Some(year) = self.year {
            out.push_str(&format!(" ({})", year));
        }
        out
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

/// True when the reporter alone tells the reader which court decided the case
pub fn reporter_identifies_court(reporter: &str) -> bool {
    let reporter = reporter.trim();
    if SUPREME_COURT_REPORTERS.contains(&reporter) {
        return true;
    }
    if REGIONAL_REPORTER_PREFIXES
        .iter()
        .any(|prefix| reporter.starts_with(prefix))
    {
        return false;
    }
    STATE_SUPREME_REPORTER.is_match(reporter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_case_with_pin_and_court() {
        let cite = Citation::case("Crisci v. Security Ins. Co.", 66, "Cal.App.2d", 425, 1967)
            .with_court("Cal. Ct. App.")
            .with_pin_cite("430");
        assert_eq!(
            cite.formatted(),
            "Crisci v. Security Ins. Co., 66 Cal.App.2d 425, 430 (Cal. Ct. App. 1967)"
        );
    }

    #[test]
    fn test_state_supreme_reporter_omits_court() {
        let cite = Citation::case("Comunale v. Traders & General Ins. Co.", 50, "Cal.2d", 654, 1958)
            .with_court("Cal.");
        assert_eq!(
            cite.formatted(),
            "Comunale v. Traders & General Ins. Co., 50 Cal.2d 654 (1958)"
        );
    }

    #[test]
    fn test_us_reports_omit_court() {
        let cite = Citation::case("State Farm v. Campbell", 538, "U.S.", 408, 2003)
            .with_court("U.S. Supreme Court");
        assert_eq!(cite.formatted(), "State Farm v. Campbell, 538 U.S. 408 (2003)");
    }

    #[test]
    fn test_regional_and_federal_reporters_keep_court() {
        assert!(!reporter_identifies_court("So.2d"));
        assert!(!reporter_identifies_court("F.3d"));
        assert!(!reporter_identifies_court("Cal.App.4th"));
        assert!(reporter_identifies_court("N.Y.3d"));
        assert!(reporter_identifies_court("Cal.5th"));
    }

    #[test]
    fn test_case_without_court_shows_year_only() {
        let cite = Citation::case("Doe v. Roe", 1, "F.3d", 2, 1999);
        assert_eq!(cite.formatted(), "Doe v. Roe, 1 F.3d 2 (1999)");
    }

    #[test]
    fn test_statute_formatting() {
        assert_eq!(
            Citation::statute("Cal. Code Civ. Proc.", "999.1").formatted(),
            "Cal. Code Civ. Proc. § 999.1"
        );
        assert_eq!(
            Citation::statute("Cal. Ins. Code", "790.03").with_year(2024).formatted(),
            "Cal. Ins. Code § 790.03 (2024)"
        );
    }

    #[test]
    fn test_serde_tagged_by_kind() {
        let json = r#"{"kind":"statute","code":"Cal. Civ. Code","section":"3333"}"#;
        let cite: Citation = serde_json::from_str(json).unwrap();
        assert_eq!(cite, Citation::statute("Cal. Civ. Code", "3333"));

        let json = r#"{"kind":"case","caseName":"A v. B","volume":3,"reporter":"Cal.4th","page":9,"year":1993,"pinCite":"12"}"#;
        let cite: Citation = serde_json::from_str(json).unwrap();
        assert_eq!(cite.formatted(), "A v. B, 3 Cal.4th 9, 12 (1993)");
    }

    proptest! {
        /// Property: formatting is a pure function of the citation
        #[test]
        fn formatting_is_idempotent(
            name in "[A-Za-z .&]{1,40}",
            volume in 1u32..999,
            page in 1u32..2000,
            year in 1850u16..2030,
            court in proptest::option::of("[A-Za-z. ]{1,20}"),
        ) {
            let mut cite = Citation::case(name, volume, "Cal.App.4th", page, year);
            if let Some(c) = court {
                cite = cite.with_court(c);
            }
            prop_assert_eq!(cite.formatted(), cite.formatted());
        }
    }
}
