//! Evaluation configuration
//!
//! Configuration options for running evaluations, loadable from TOML, YAML
//! or JSON files.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::corpus::CorpusFormat;
use crate::error::{EvalError, EvalResult};
use crate::report::ReportFormat;
use crate::sample::DEFAULT_SPLIT_TAG;
use crate::segmenters::SegmenterKind;

/// Configuration for evaluation runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Corpus file or directory
    #[serde(default)]
    pub corpus: Option<PathBuf>,

    /// Corpus format; inferred per file when absent
    #[serde(default)]
    pub format: Option<CorpusFormat>,

    /// Segmenter under evaluation
    #[serde(default)]
    pub segmenter: SegmenterKind,

    /// Marks a token boundary with no whitespace in annotated corpora
    #[serde(default = "default_split_tag")]
    pub split_tag: String,

    /// Token pattern for the regex segmenter
    #[serde(default)]
    pub pattern: Option<String>,

    /// Worker threads (1 = sequential)
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Samples per worker per batch
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Report rendering
    #[serde(default)]
    pub report_format: ReportFormat,

    /// Where to save the JSON report
    pub output_dir: Option<PathBuf>,

    /// Log every misclassified sample
    #[serde(default)]
    pub log_misclassified: bool,

    /// Log level used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_split_tag() -> String {
    DEFAULT_SPLIT_TAG.to_string()
}

fn default_workers() -> usize {
    1
}

fn default_chunk_size() -> usize {
    1000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            corpus: None,
            format: None,
            segmenter: SegmenterKind::default(),
            split_tag: default_split_tag(),
            pattern: None,
            workers: default_workers(),
            chunk_size: default_chunk_size(),
            report_format: ReportFormat::default(),
            output_dir: None,
            log_misclassified: false,
            log_level: default_log_level(),
        }
    }
}

impl EvalConfig {
    /// Create a new config for the given corpus
    pub fn new(corpus: impl Into<PathBuf>) -> Self {
        Self {
            corpus: Some(corpus.into()),
            ..Default::default()
        }
    }

    /// Load configuration from a file
    ///
    /// The format follows the extension (`toml`, `yaml`/`yml`, otherwise
    /// JSON). A missing file yields the default configuration.
    pub fn load(path: impl AsRef<Path>) -> EvalResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("Config file {:?} not found, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| EvalError::io_with_path(e, path.display().to_string()))?;

        let config: Self = match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|e| {
                EvalError::config(format!(
                    "Failed to parse TOML config '{}': {}",
                    path.display(),
                    e
                ))
            })?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| {
                EvalError::config(format!(
                    "Failed to parse YAML config '{}': {}",
                    path.display(),
                    e
                ))
            })?,
            _ => serde_json::from_str(&content).map_err(|e| {
                EvalError::config(format!(
                    "Failed to parse JSON config '{}': {}",
                    path.display(),
                    e
                ))
            })?,
        };

        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Check the values that cannot be caught by deserialization
    pub fn validate(&self) -> EvalResult<()> {
        if self.workers == 0 {
            return Err(EvalError::config("workers must be at least 1"));
        }
        if self.chunk_size == 0 {
            return Err(EvalError::config("chunk_size must be at least 1"));
        }
        if self.split_tag.is_empty() {
            return Err(EvalError::config("split_tag must not be empty"));
        }
        Ok(())
    }

    pub fn with_corpus(mut self, corpus: impl Into<PathBuf>) -> Self {
        self.corpus = Some(corpus.into());
        self
    }

    pub fn with_format(mut self, format: CorpusFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_segmenter(mut self, segmenter: SegmenterKind) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Set the regex segmenter pattern
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn with_split_tag(mut self, split_tag: impl Into<String>) -> Self {
        self.split_tag = split_tag.into();
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_report_format(mut self, format: ReportFormat) -> Self {
        self.report_format = format;
        self
    }

    /// Set output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Enable misclassification logging
    pub fn log_misclassified(mut self) -> Self {
        self.log_misclassified = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = EvalConfig::default();
        assert_eq!(config.split_tag, "<SPLIT>");
        assert_eq!(config.workers, 1);
        assert_eq!(config.chunk_size, 1000);
        assert_eq!(config.segmenter, SegmenterKind::Simple);
        assert!(!config.log_misclassified);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = EvalConfig::new("gold.txt")
            .with_segmenter(SegmenterKind::Regex)
            .with_pattern(r"\S+")
            .with_workers(4)
            .with_report_format(ReportFormat::Markdown)
            .log_misclassified();

        assert_eq!(config.corpus, Some(PathBuf::from("gold.txt")));
        assert_eq!(config.pattern.as_deref(), Some(r"\S+"));
        assert_eq!(config.workers, 4);
        assert_eq!(config.report_format, ReportFormat::Markdown);
        assert!(config.log_misclassified);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(EvalConfig::default().with_workers(0).validate().is_err());
        assert!(EvalConfig::default().with_chunk_size(0).validate().is_err());
        assert!(matches!(
            EvalConfig::default().with_split_tag("").validate(),
            Err(EvalError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = EvalConfig::load(temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, EvalConfig::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("segscore.toml");
        fs::write(
            &config_path,
            r#"
corpus = "data/gold"
format = "jsonl"
segmenter = "whitespace"
workers = 3
log_misclassified = true
"#,
        )
        .unwrap();

        let config = EvalConfig::load(&config_path).unwrap();
        assert_eq!(config.corpus, Some(PathBuf::from("data/gold")));
        assert_eq!(config.format, Some(CorpusFormat::JsonLines));
        assert_eq!(config.segmenter, SegmenterKind::Whitespace);
        assert_eq!(config.workers, 3);
        assert_eq!(config.chunk_size, 1000);
        assert!(config.log_misclassified);
    }

    #[test]
    fn test_load_from_yaml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("segscore.yaml");
        fs::write(
            &config_path,
            "segmenter: regex\npattern: '[a-z]+'\nsplit_tag: '|'\nreport_format: table\n",
        )
        .unwrap();

        let config = EvalConfig::load(&config_path).unwrap();
        assert_eq!(config.segmenter, SegmenterKind::Regex);
        assert_eq!(config.pattern.as_deref(), Some("[a-z]+"));
        assert_eq!(config.split_tag, "|");
        assert_eq!(config.report_format, ReportFormat::Table);
    }

    #[test]
    fn test_load_from_json_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("segscore.json");
        fs::write(&config_path, r#"{"chunk_size": 50, "log_level": "debug"}"#).unwrap();

        let config = EvalConfig::load(&config_path).unwrap();
        assert_eq!(config.chunk_size, 50);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("segscore.toml");
        fs::write(&config_path, "workers = \"many\"").unwrap();

        assert!(matches!(
            EvalConfig::load(&config_path),
            Err(EvalError::Config(_))
        ));
    }
}
