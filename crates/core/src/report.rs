//! Case submissions and the reports produced from them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::CoreError;

/// Case categories offered to the user.
///
/// Records written by other clients may carry a label outside the offered
/// set; it is kept verbatim as [`CaseType::Unlisted`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseType {
    #[serde(rename = "False Case / Fake FIR")]
    FalseCase,
    #[serde(rename = "Property Dispute")]
    PropertyDispute,
    #[serde(rename = "Domestic Violence")]
    DomesticViolence,
    #[serde(rename = "Cyber Crime")]
    CyberCrime,
    #[serde(rename = "Consumer Complaint")]
    ConsumerComplaint,
    #[serde(rename = "Workplace Harassment")]
    WorkplaceHarassment,
    #[serde(rename = "Police Misconduct")]
    PoliceMisconduct,
    #[serde(rename = "Other")]
    Other,
    #[serde(untagged)]
    Unlisted(String),
}

impl CaseType {
    pub const ALL: [Self; 8] = [
        Self::FalseCase,
        Self::PropertyDispute,
        Self::DomesticViolence,
        Self::CyberCrime,
        Self::ConsumerComplaint,
        Self::WorkplaceHarassment,
        Self::PoliceMisconduct,
        Self::Other,
    ];

    /// Human-readable label, identical to the serialized form.
    #[must_use]
    pub fn label(&self) -> &str {
        match *self {
            Self::FalseCase => "False Case / Fake FIR",
            Self::PropertyDispute => "Property Dispute",
            Self::DomesticViolence => "Domestic Violence",
            Self::CyberCrime => "Cyber Crime",
            Self::ConsumerComplaint => "Consumer Complaint",
            Self::WorkplaceHarassment => "Workplace Harassment",
            Self::PoliceMisconduct => "Police Misconduct",
            Self::Other => "Other",
            Self::Unlisted(ref label) => label,
        }
    }

    /// Short kebab-case name used on the command line.
    #[must_use]
    pub fn slug(&self) -> &str {
        match *self {
            Self::FalseCase => "false-case",
            Self::PropertyDispute => "property",
            Self::DomesticViolence => "domestic-violence",
            Self::CyberCrime => "cyber-crime",
            Self::ConsumerComplaint => "consumer",
            Self::WorkplaceHarassment => "workplace",
            Self::PoliceMisconduct => "police",
            Self::Other => "other",
            Self::Unlisted(ref label) => label,
        }
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CaseType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.slug() == s || t.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownVariant { kind: "case type", value: s.to_owned() })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

impl Urgency {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(CoreError::UnknownVariant { kind: "urgency", value: s.to_owned() }),
        }
    }
}

/// What the user filled in on the case form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSubmission {
    #[serde(rename = "type")]
    pub category: CaseType,
    pub description: String,
    pub urgency: Urgency,
}

impl CaseSubmission {
    #[must_use]
    pub fn new(category: CaseType, description: impl Into<String>, urgency: Urgency) -> Self {
        Self { category, description: description.into(), urgency }
    }

    /// Whether the description carries any non-whitespace text.
    #[must_use]
    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }
}

/// Structured result returned by the AI collaborator.
///
/// Only `summary` is interpreted here. Every other field the model returns is
/// kept verbatim in `details` so that records round-trip through both stores
/// without losing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalAnalysis {
    pub summary: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl LegalAnalysis {
    #[must_use]
    pub fn new(summary: impl Into<String>) -> Self {
        Self { summary: summary.into(), details: Map::new() }
    }

    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: Value) -> Self {
        self.details.insert(key.into(), value);
        self
    }
}

/// A completed case analysis as stored in either history store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseReport {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub submission: CaseSubmission,
    pub analysis: LegalAnalysis,
}

impl CaseReport {
    /// New report with a fresh random id, stamped now.
    #[must_use]
    pub fn new(submission: CaseSubmission, analysis: LegalAnalysis) -> Self {
        Self {
            id: crate::new_record_id(),
            timestamp: crate::now_millis(),
            submission,
            analysis,
        }
    }
}
