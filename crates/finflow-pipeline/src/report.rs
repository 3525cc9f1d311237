//! Machine-readable head of the analysis artifact.
//!
//! The analyzer prepends a fenced JSON metrics block ahead of the generated
//! narrative so display code can recover exact numbers with a simple
//! pattern search instead of re-parsing prose. This module owns that block
//! format and the cleanup of stray format-marker lines generators sometimes
//! prepend to their output.

use finflow_ledger::Metrics;
use once_cell::sync::Lazy;
use regex::Regex;

static MARKER_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^json\s+\{.*?\}\s*").expect("static pattern"));

static JSON_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[\s\S]*?\}").expect("static pattern"));

/// Serialize metrics into the fenced JSON block embedded at the head of
/// the analysis artifact.
pub fn metrics_block(metrics: &Metrics) -> Result<String, serde_json::Error> {
    let body = serde_json::to_string(metrics)?;
    Ok(format!("```json\n{body}\n```"))
}

/// Recover metrics from an analysis artifact.
///
/// Finds the first `{...}` object in the text and parses it leniently;
/// returns `None` when no parseable block is present.
#[must_use]
pub fn extract_metrics(analysis: &str) -> Option<Metrics> {
    let object = JSON_OBJECT.find(analysis)?;
    serde_json::from_str(object.as_str()).ok()
}

/// Remove a stray leading `json {...}` marker line some generators prepend
/// to their narrative output.
#[must_use]
pub fn strip_marker_line(narrative: &str) -> String {
    MARKER_LINE.replace_all(narrative, "").trim_start().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn metrics_block_round_trip() {
        let metrics = Metrics {
            total_income: 2500.0,
            total_spending: -1100.5,
            net_flow: 1399.5,
        };

        let block = metrics_block(&metrics).unwrap();
        assert!(block.starts_with("```json\n"));
        assert!(block.ends_with("\n```"));

        let recovered = extract_metrics(&block).unwrap();
        assert!((recovered.total_income - 2500.0).abs() < 1e-9);
        assert!((recovered.total_spending + 1100.5).abs() < 1e-9);
        assert!((recovered.net_flow - 1399.5).abs() < 1e-9);
    }

    #[test]
    fn extract_finds_block_ahead_of_narrative() {
        let metrics = Metrics::zero();
        let artifact = format!(
            "{}\n\n# Analysis\n\nSome prose with {{braces}} later.",
            metrics_block(&metrics).unwrap()
        );

        let recovered = extract_metrics(&artifact).unwrap();
        assert!(recovered.is_zero());
    }

    #[test]
    fn extract_returns_none_without_block() {
        assert!(extract_metrics("plain prose, no json here").is_none());
    }

    #[test]
    fn marker_line_is_stripped() {
        let raw = "json {\"total_income\": 1}\n# Executive Summary\n\nBody.";
        assert_eq!(strip_marker_line(raw), "# Executive Summary\n\nBody.");
    }

    #[test]
    fn clean_narrative_unchanged() {
        let clean = "# Executive Summary\n\nBody mentioning json in prose.";
        assert_eq!(strip_marker_line(clean), clean);
    }
}
