//! # Configuration
//!
//! [`ScriptConfig`] holds the options that shape the generated script.
//! [`ExporterConfig`] holds process-level settings read from the environment.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Lowest accepted concurrency.
pub const MIN_CONCURRENCY: u32 = 1;

/// Highest accepted concurrency.
pub const MAX_CONCURRENCY: u32 = 20;

/// Placeholder the filename template is expected to contain.
pub const TITLE_PLACEHOLDER: &str = "{title}";

/// Default name of the exported script.
pub const DEFAULT_FILE_NAME: &str = "wechat_batch_exporter.py";

/// Parameters controlling the behavior of the generated script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptConfig {
    /// Article links the script will download, in input order.
    pub urls: Vec<String>,

    /// Download images and embed them in the document.
    pub include_images: bool,

    /// Directory the script saves documents into.
    pub save_path: String,

    /// Number of worker threads, always in `[1, 20]`.
    pub concurrency: u32,

    /// Output file name pattern, e.g. `{title}.docx`.
    pub filename_template: String,

    /// Route requests through an HTTP proxy.
    pub use_proxy: bool,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            include_images: true,
            save_path: "./outputs".to_string(),
            concurrency: 5,
            filename_template: "{title}.docx".to_string(),
            use_proxy: false,
        }
    }
}

impl ScriptConfig {
    /// Builder: replace the URL list.
    pub fn with_urls(mut self, urls: Vec<String>) -> Self {
        self.urls = urls;
        self
    }

    /// Builder: set concurrency, clamped to the accepted range.
    pub fn with_concurrency(mut self, concurrency: u32) -> Self {
        self.concurrency = concurrency.clamp(MIN_CONCURRENCY, MAX_CONCURRENCY);
        self
    }

    /// Builder: enable or disable image download.
    pub fn with_images(mut self, enabled: bool) -> Self {
        self.include_images = enabled;
        self
    }

    /// Builder: enable or disable proxy support.
    pub fn with_proxy(mut self, enabled: bool) -> Self {
        self.use_proxy = enabled;
        self
    }

    /// Builder: set the save directory.
    pub fn with_save_path(mut self, path: impl Into<String>) -> Self {
        self.save_path = path.into();
        self
    }

    /// Builder: set the filename template.
    pub fn with_filename_template(mut self, template: impl Into<String>) -> Self {
        self.filename_template = template.into();
        self
    }

    /// Whether the filename template contains `{title}`.
    pub fn has_title_placeholder(&self) -> bool {
        self.filename_template.contains(TITLE_PLACEHOLDER)
    }
}

/// Parse a concurrency field the way a numeric form input is read.
///
/// Takes the leading integer of the trimmed input and ignores anything after
/// it. Empty, non-numeric and zero input become `1`; everything else is
/// clamped to `[1, 20]`.
pub fn parse_concurrency(input: &str) -> u32 {
    let trimmed = input.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];

    if digits.is_empty() || negative {
        return MIN_CONCURRENCY;
    }

    // Overflowing input is still "a large number".
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    value.clamp(MIN_CONCURRENCY as u64, MAX_CONCURRENCY as u64) as u32
}

/// Process-level settings for the exporter front end.
///
/// # Example
/// ```rust
/// use wechat2word_core::ExporterConfig;
///
/// let config = ExporterConfig::default()
///     .with_output_dir("./scripts")
///     .with_overwrite(false);
/// assert_eq!(config.file_name, "wechat_batch_exporter.py");
/// ```
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    /// Directory the generated script is written to.
    /// Default: ".", Env: WECHAT2WORD_OUTPUT_DIR
    pub output_dir: PathBuf,

    /// File name of the generated script.
    /// Default: "wechat_batch_exporter.py", Env: WECHAT2WORD_FILE_NAME
    pub file_name: String,

    /// Replace an existing script of the same name.
    /// Default: true, Env: WECHAT2WORD_OVERWRITE=false
    pub overwrite: bool,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_name: DEFAULT_FILE_NAME.to_string(),
            overwrite: true,
        }
    }
}

impl ExporterConfig {
    /// Create a new config from environment variables.
    /// Falls back to defaults for missing variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = env::var("WECHAT2WORD_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("WECHAT2WORD_FILE_NAME") {
            if !v.trim().is_empty() {
                config.file_name = v;
            }
        }
        if let Ok(v) = env::var("WECHAT2WORD_OVERWRITE") {
            config.overwrite = v.to_lowercase() != "false" && v != "0";
        }

        config
    }

    /// Builder: set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Builder: set the script file name.
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Builder: allow or forbid overwriting.
    pub fn with_overwrite(mut self, enabled: bool) -> Self {
        self.overwrite = enabled;
        self
    }

    /// Full path of the exported script.
    pub fn script_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScriptConfig::default();
        assert!(config.urls.is_empty());
        assert!(config.include_images);
        assert!(!config.use_proxy);
        assert_eq!(config.save_path, "./outputs");
        assert_eq!(config.concurrency, 5);
        assert_eq!(config.filename_template, "{title}.docx");
        assert!(config.has_title_placeholder());
    }

    #[test]
    fn concurrency_floor() {
        assert_eq!(parse_concurrency("0"), 1);
        assert_eq!(parse_concurrency(""), 1);
        assert_eq!(parse_concurrency("   "), 1);
        assert_eq!(parse_concurrency("abc"), 1);
        assert_eq!(parse_concurrency("-3"), 1);
    }

    #[test]
    fn concurrency_integer_prefix() {
        assert_eq!(parse_concurrency("7"), 7);
        assert_eq!(parse_concurrency(" 12 "), 12);
        assert_eq!(parse_concurrency("8threads"), 8);
        assert_eq!(parse_concurrency("3.9"), 3);
        assert_eq!(parse_concurrency("+4"), 4);
    }

    #[test]
    fn concurrency_ceiling() {
        assert_eq!(parse_concurrency("20"), 20);
        assert_eq!(parse_concurrency("21"), 20);
        assert_eq!(parse_concurrency("99999999999999999999999"), 20);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ScriptConfig::default()
            .with_concurrency(0)
            .with_images(false)
            .with_proxy(true)
            .with_filename_template("article.docx");

        assert_eq!(config.concurrency, 1);
        assert!(!config.include_images);
        assert!(config.use_proxy);
        assert!(!config.has_title_placeholder());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(ScriptConfig::default()).unwrap();
        assert_eq!(json["includeImages"], true);
        assert_eq!(json["filenameTemplate"], "{title}.docx");
        assert_eq!(json["savePath"], "./outputs");
    }

    #[test]
    fn exporter_script_path() {
        let config = ExporterConfig::default().with_output_dir("out");
        assert_eq!(config.script_path(), PathBuf::from("out").join(DEFAULT_FILE_NAME));
        assert!(config.overwrite);
    }
}
