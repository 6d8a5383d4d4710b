use serde::{Deserialize, Serialize};

/// An uploaded PDF after text extraction.
///
/// Immutable once created. `text_length` counts characters, not bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub filename: String,
    pub text: String,
    pub text_length: usize,
    pub page_count: usize,
    pub file_size: usize,
    pub sha256: String,
}

impl Document {
    pub fn new(
        id: String,
        filename: String,
        text: String,
        page_count: usize,
        file_size: usize,
        sha256: String,
    ) -> Self {
        let text_length = text.chars().count();
        Self {
            id,
            filename,
            text,
            text_length,
            page_count,
            file_size,
            sha256,
        }
    }

    /// First `max_chars` characters of the text, with `...` appended when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        if self.text_length <= max_chars {
            return self.text.clone();
        }
        let mut preview: String = self.text.chars().take(max_chars).collect();
        preview.push_str("...");
        preview
    }
}

/// Structured analysis of a legal document.
///
/// `summary` is required; the four sequences default to empty when the model
/// leaves them out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub summary: String,
    #[serde(default)]
    pub key_clauses: Vec<KeyClause>,
    #[serde(default)]
    pub obligations: Vec<Obligation>,
    #[serde(default)]
    pub risks: Vec<Risk>,
    #[serde(default)]
    pub unusual_terms: Vec<UnusualTerm>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyClause {
    pub clause: String,
    pub explanation: String,
    /// Section reference, e.g. "Section 4.2"
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obligation {
    pub party: String,
    pub obligation: String,
    /// What happens on non-compliance
    #[serde(default)]
    pub consequence: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    /// Risk category, e.g. "Financial" or "Legal"
    #[serde(rename = "type")]
    pub risk_type: String,
    pub severity: RiskSeverity,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnusualTerm {
    pub term: String,
    pub explanation: String,
    #[serde(default)]
    pub recommendation: Option<String>,
}

/// Severity of a [`Risk`].
///
/// Parsed case-insensitively. Words outside the known scale are kept verbatim
/// in `Other` rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskSeverity {
    Low,
    Medium,
    High,
    Critical,
    Other(String),
}

impl RiskSeverity {
    pub fn as_str(&self) -> &str {
        match self {
            RiskSeverity::Low => "Low",
            RiskSeverity::Medium => "Medium",
            RiskSeverity::High => "High",
            RiskSeverity::Critical => "Critical",
            RiskSeverity::Other(s) => s,
        }
    }

    /// Ordering weight used when sorting risks for display; unknown is lowest.
    pub fn rank(&self) -> u8 {
        match self {
            RiskSeverity::Critical => 4,
            RiskSeverity::High => 3,
            RiskSeverity::Medium => 2,
            RiskSeverity::Low => 1,
            RiskSeverity::Other(_) => 0,
        }
    }
}

impl From<String> for RiskSeverity {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "low" => RiskSeverity::Low,
            "medium" | "moderate" => RiskSeverity::Medium,
            "high" => RiskSeverity::High,
            "critical" => RiskSeverity::Critical,
            _ => RiskSeverity::Other(value.trim().to_string()),
        }
    }
}

impl From<RiskSeverity> for String {
    fn from(value: RiskSeverity) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for RiskSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc(text: &str) -> Document {
        Document::new(
            "doc_1".into(),
            "lease.pdf".into(),
            text.into(),
            1,
            1024,
            "abc".into(),
        )
    }

    #[test]
    fn text_length_counts_characters() {
        let d = doc("Café § 83.49");
        assert_eq!(d.text_length, 12);
        assert!(d.text.len() > d.text_length);
    }

    #[test]
    fn preview_truncates_with_ellipsis() {
        let d = doc("abcdefghij");
        assert_eq!(d.preview(4), "abcd...");
        assert_eq!(d.preview(10), "abcdefghij");
        assert_eq!(d.preview(50), "abcdefghij");
    }

    #[test]
    fn analysis_sequences_default_to_empty() {
        let analysis: Analysis =
            serde_json::from_value(json!({ "summary": "A lease." })).unwrap();
        assert_eq!(analysis.summary, "A lease.");
        assert!(analysis.key_clauses.is_empty());
        assert!(analysis.obligations.is_empty());
        assert!(analysis.risks.is_empty());
        assert!(analysis.unusual_terms.is_empty());
    }

    #[test]
    fn analysis_without_summary_is_rejected() {
        let result = serde_json::from_value::<Analysis>(json!({ "key_clauses": [] }));
        assert!(result.is_err());
    }

    #[test]
    fn optional_fields_accept_null_and_absence() {
        let clause: KeyClause = serde_json::from_value(json!({
            "clause": "Termination",
            "explanation": "Either party may end the lease with notice",
            "location": null
        }))
        .unwrap();
        assert_eq!(clause.location, None);

        let obligation: Obligation = serde_json::from_value(json!({
            "party": "Tenant",
            "obligation": "Pay rent monthly"
        }))
        .unwrap();
        assert_eq!(obligation.consequence, None);
    }

    #[test]
    fn risk_uses_type_key_on_the_wire() {
        let risk: Risk = serde_json::from_value(json!({
            "type": "Financial",
            "severity": "HIGH",
            "description": "Uncapped late fees"
        }))
        .unwrap();
        assert_eq!(risk.risk_type, "Financial");
        assert_eq!(risk.severity, RiskSeverity::High);

        let value = serde_json::to_value(&risk).unwrap();
        assert_eq!(value["type"], "Financial");
        assert_eq!(value["severity"], "High");
    }

    #[test]
    fn unknown_severity_is_preserved() {
        let severity = RiskSeverity::from(" Severe ".to_string());
        assert_eq!(severity, RiskSeverity::Other("Severe".into()));
        assert_eq!(severity.to_string(), "Severe");
        assert_eq!(severity.rank(), 0);
    }

    #[test]
    fn moderate_maps_to_medium() {
        assert_eq!(RiskSeverity::from("Moderate".to_string()), RiskSeverity::Medium);
    }
}
