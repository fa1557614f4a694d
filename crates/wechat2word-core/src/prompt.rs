//! Prompt construction for the generative service.
//!
//! The instruction is a handlebars template filled from a [`ScriptConfig`].
//! The response schema declares the JSON shape the service must return.

use crate::{ExporterError, Result, ScriptConfig};
use handlebars::Handlebars;
use serde_json::{json, Value};

const PROMPT_TEMPLATE_NAME: &str = "script_prompt";

const PROMPT_TEMPLATE: &str = r#"Generate a highly robust and professional Python script to batch download WeChat Official Account (微信公众号) articles from a list of URLs and convert them into .docx files.

Article URLs (process every one of them, in this order):
{{#each urls}}
- {{this}}
{{/each}}

Configuration Requirements:
- Include images: {{#if include_images}}Yes (download them and embed them in the document; handle the data-src attributes used by WeChat lazy loading){{else}}No (skip all images){{/if}}
- Target directory: {{save_path}}
- Concurrency (Threads): {{concurrency}} (never run more downloads at once than this)
- Filename template: {{filename_template}} (replace {title} with the sanitized article title)
- Proxy support: {{#if use_proxy}}Yes (read the proxy address from the environment or a command-line option){{else}}No{{/if}}

Technical Specifications:
- Use 'requests' for networking.
- Use 'BeautifulSoup4' for HTML parsing (focus on #js_content).
- Use 'python-docx' for Word generation.
{{#if include_images}}
- Handle WeChat's specific lazy-loading image logic (data-src).
{{/if}}
- Include a progress bar using 'tqdm'.
- Implement error handling for invalid URLs or network failures: a failing article is reported and skipped, the rest of the batch continues.
- Print a summary of succeeded and failed articles at the end.
- Add clear comments in Chinese (Simplified).

Response Format: Return a JSON object with:
1. 'code': The complete Python script.
2. 'requirements': List of pip packages needed.
3. 'usageInstructions': Short guide on how to run it.
"#;

/// Render the natural-language instruction for `config`.
pub fn build_prompt(config: &ScriptConfig) -> Result<String> {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);
    registry.set_strict_mode(true);
    registry
        .register_template_string(PROMPT_TEMPLATE_NAME, PROMPT_TEMPLATE)
        .map_err(|e| ExporterError::PromptError(e.to_string()))?;

    let data = json!({
        "urls": config.urls,
        "include_images": config.include_images,
        "save_path": config.save_path,
        "concurrency": config.concurrency,
        "filename_template": config.filename_template,
        "use_proxy": config.use_proxy,
    });

    registry
        .render(PROMPT_TEMPLATE_NAME, &data)
        .map_err(|e| ExporterError::PromptError(e.to_string()))
}

/// JSON schema the service must answer with.
///
/// Uses the OpenAPI subset understood by Gemini's `responseSchema`.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "code": { "type": "STRING" },
            "requirements": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "usageInstructions": { "type": "STRING" }
        },
        "required": ["code", "requirements", "usageInstructions"]
    })
}
