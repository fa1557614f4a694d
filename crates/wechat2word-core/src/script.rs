//! The generated script and its response parsing.

use crate::{ExporterError, Result};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Structured output returned by the generative service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedScript {
    /// Complete Python source.
    pub code: String,

    /// pip packages the script needs, in service order.
    pub requirements: Vec<String>,

    /// Short guide on how to run the script.
    pub usage_instructions: String,
}

impl GeneratedScript {
    /// Shell line that installs the requirements.
    pub fn install_command(&self) -> String {
        if self.requirements.is_empty() {
            "pip install".to_string()
        } else {
            format!("pip install {}", self.requirements.join(" "))
        }
    }
}

/// Parse the response text into a [`GeneratedScript`].
///
/// All three fields are required. Anything else is logged and reported as
/// [`ExporterError::InvalidScript`]; no partial data is returned.
pub fn parse_generated_script(text: &str) -> Result<GeneratedScript> {
    serde_json::from_str::<GeneratedScript>(text.trim()).map_err(|e| {
        error!("Failed to parse generation response: {}", e);
        ExporterError::InvalidScript(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_fields_verbatim() {
        let body = r#"
            {
              "code": "import requests\n\nprint('  hi  ')\n",
              "requirements": ["requests", "beautifulsoup4", "python-docx", "tqdm"],
              "usageInstructions": "python wechat_batch_exporter.py"
            }
        "#;
        let script = parse_generated_script(body).unwrap();
        assert_eq!(script.code, "import requests\n\nprint('  hi  ')\n");
        assert_eq!(
            script.requirements,
            vec!["requests", "beautifulsoup4", "python-docx", "tqdm"]
        );
        assert_eq!(script.usage_instructions, "python wechat_batch_exporter.py");
    }

    #[test]
    fn missing_field_is_invalid() {
        let body = r#"{"code": "print(1)", "requirements": []}"#;
        let err = parse_generated_script(body).unwrap_err();
        assert!(matches!(err, ExporterError::InvalidScript(_)));
    }

    #[test]
    fn non_json_is_invalid() {
        let err = parse_generated_script("```python\nprint(1)\n```").unwrap_err();
        assert!(matches!(err, ExporterError::InvalidScript(_)));

        let err = parse_generated_script("").unwrap_err();
        assert!(matches!(err, ExporterError::InvalidScript(_)));
    }

    #[test]
    fn wrong_types_are_invalid() {
        let body = r#"{"code": "x", "requirements": "requests", "usageInstructions": "run"}"#;
        assert!(parse_generated_script(body).is_err());
    }

    #[test]
    fn extra_fields_are_ignored() {
        let body = r#"{"code": "x", "requirements": [], "usageInstructions": "run", "notes": 1}"#;
        assert!(parse_generated_script(body).is_ok());
    }

    #[test]
    fn install_command_joins_requirements() {
        let script = GeneratedScript {
            code: String::new(),
            requirements: vec!["requests".into(), "tqdm".into()],
            usage_instructions: String::new(),
        };
        assert_eq!(script.install_command(), "pip install requests tqdm");
    }
}
