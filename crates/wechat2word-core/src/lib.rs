//! # WeChat2Word Core
//!
//! Core library for generating customized WeChat article batch exporters.
//!
//! This crate holds everything except the network transport: the script
//! configuration, article link extraction, prompt building, response parsing
//! and the form state controller that ties them together.
//!
//! ## Example
//!
//! ```rust,ignore
//! use wechat2word_core::{FieldEdit, FormController};
//!
//! let mut form = FormController::new();
//! form.edit(FieldEdit::UrlInput("https://mp.weixin.qq.com/s/abc".into()));
//! form.edit(FieldEdit::Concurrency("8".into()));
//!
//! form.generate(&generator).await;
//! if let Some(script) = form.result() {
//!     println!("{}", script.install_command());
//! }
//! ```

pub mod error;
pub mod config;
pub mod urls;
pub mod prompt;
pub mod provider;
pub mod script;
pub mod client;
pub mod controller;
pub mod export;

pub use error::{ExporterError, Result};
pub use config::{parse_concurrency, ExporterConfig, ScriptConfig};
pub use urls::{count_article_urls, parse_article_urls};
pub use provider::{MockGenerator, ProviderConfig, ScriptGenerator};
pub use script::{parse_generated_script, GeneratedScript};
pub use client::generate_script;
pub use controller::{FieldEdit, FormController, FormState, GenerationStatus, Submission};
pub use export::{export_script, export_with_config};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        ExporterError, FieldEdit, FormController, GeneratedScript, GenerationStatus,
        ProviderConfig, Result, ScriptConfig, ScriptGenerator, Submission,
    };
}
