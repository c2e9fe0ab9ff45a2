//! JSON report generation

use anyhow::Result;

use super::EvalReport;

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Generate a JSON report
    pub fn generate(report: &EvalReport) -> Result<String> {
        let json = serde_json::to_string_pretty(report)?;
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::sample_report;

    #[test]
    fn test_json_generation() {
        let json = JsonReporter::generate(&sample_report()).unwrap();

        assert!(json.contains("\"segmenter\": \"simple\""));
        assert!(json.contains("true_positive_count"));
        assert!(json.contains("misclassified"));
    }

    #[test]
    fn test_json_report_reads_back() {
        let report = sample_report();
        let json = JsonReporter::generate(&report).unwrap();

        let parsed: EvalReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.counts, report.counts);
        assert_eq!(parsed.outcomes, report.outcomes);
    }
}
