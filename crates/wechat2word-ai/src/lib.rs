//! # WeChat2Word AI
//!
//! Generative service backends for the WeChat2Word script generator.
//!
//! - **Gemini**: Google `generateContent` with a JSON response schema
//!
//! ## Example
//!
//! ```rust,ignore
//! use wechat2word_core::{FieldEdit, FormController};
//!
//! // One-line initialization from environment
//! let generator = wechat2word_ai::gemini("gemini-3-pro-preview")?;
//!
//! let mut form = FormController::new();
//! form.edit(FieldEdit::UrlInput("https://mp.weixin.qq.com/s/abc".into()));
//! form.generate(&generator).await;
//! ```

pub mod gemini;

pub use gemini::{GeminiGenerator, DEFAULT_MODEL};

/// Re-export core types for convenience.
pub use wechat2word_core::{ExporterError, ProviderConfig, Result, ScriptGenerator};

/// Create a Google Gemini generator with a single line.
///
/// The API key comes from `GOOGLE_API_KEY` (or `API_KEY`).
///
/// # Example
///
/// ```rust,ignore
/// let generator = wechat2word_ai::gemini("gemini-3-pro-preview")?;
/// ```
pub fn gemini(model: &str) -> Result<GeminiGenerator> {
    GeminiGenerator::from_env_with_model(model)
}
