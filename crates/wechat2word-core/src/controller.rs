//! Form state controller.
//!
//! Owns the URL input buffer, the [`ScriptConfig`] and the outcome of the last
//! generation. State changes only through [`FormController::edit`],
//! [`FormController::submit`], [`FormController::resolve`] and
//! [`FormController::reject`].

use crate::{
    count_article_urls, generate_script, parse_article_urls, parse_concurrency, ExporterError,
    GeneratedScript, ScriptConfig, ScriptGenerator,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Where the current generation stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A request is in flight.
    Pending,
    /// The last request produced a script.
    Resolved,
    /// The last attempt failed, either local validation or the request.
    /// `error` holds the message.
    Rejected,
}

/// A single user edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    /// Raw text of the URL textarea.
    UrlInput(String),
    /// Save path field.
    SavePath(String),
    /// Raw text of the concurrency field.
    Concurrency(String),
    /// Filename template field.
    FilenameTemplate(String),
    /// Include-images checkbox.
    IncludeImages(bool),
    /// Use-proxy checkbox.
    UseProxy(bool),
}

/// Outcome of [`FormController::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Send this configuration to the generator.
    Dispatch(ScriptConfig),
    /// A request is already pending; nothing changed.
    Busy,
    /// Local validation failed; the error message is set.
    Invalid,
}

/// Serializable snapshot of the whole form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub url_input: String,
    pub config: ScriptConfig,
    pub status: GenerationStatus,
    pub result: Option<GeneratedScript>,
    pub error: Option<String>,
}

/// Drives one form through edit, submit, resolve and reject.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    state: FormState,
}

impl FormController {
    /// Create a controller with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a controller from a snapshot.
    ///
    /// A snapshot taken mid-request has no request behind it anymore, so a
    /// pending status is reset to idle.
    pub fn from_state(mut state: FormState) -> Self {
        if state.status == GenerationStatus::Pending {
            state.status = GenerationStatus::Idle;
        }
        state.config.concurrency = state
            .config
            .concurrency
            .clamp(crate::config::MIN_CONCURRENCY, crate::config::MAX_CONCURRENCY);
        Self { state }
    }

    /// Apply a field edit.
    pub fn edit(&mut self, edit: FieldEdit) {
        let config = &mut self.state.config;
        match edit {
            FieldEdit::UrlInput(raw) => self.state.url_input = raw,
            FieldEdit::SavePath(path) => config.save_path = path,
            FieldEdit::Concurrency(raw) => config.concurrency = parse_concurrency(&raw),
            FieldEdit::FilenameTemplate(template) => config.filename_template = template,
            FieldEdit::IncludeImages(enabled) => config.include_images = enabled,
            FieldEdit::UseProxy(enabled) => config.use_proxy = enabled,
        }
    }

    /// Validate the input and, if it is usable, mark a request as pending.
    ///
    /// Input without article links is rejected like a failed request: the
    /// status becomes `Rejected`, the message is set and any earlier script
    /// is kept.
    pub fn submit(&mut self) -> Submission {
        if self.is_busy() {
            debug!("Submit ignored: a generation is already pending");
            return Submission::Busy;
        }

        let urls = parse_article_urls(&self.state.url_input);
        if urls.is_empty() {
            self.reject(&ExporterError::NoValidUrls);
            return Submission::Invalid;
        }

        if !self.state.config.has_title_placeholder() {
            warn!(
                "Filename template {:?} has no {{title}} placeholder",
                self.state.config.filename_template
            );
        }

        self.state.config.urls = urls;
        self.state.status = GenerationStatus::Pending;
        self.state.error = None;
        info!("Submitting {} article links", self.state.config.urls.len());

        Submission::Dispatch(self.state.config.clone())
    }

    /// Record a successful generation.
    pub fn resolve(&mut self, script: GeneratedScript) {
        self.state.result = Some(script);
        self.state.error = None;
        self.state.status = GenerationStatus::Resolved;
    }

    /// Record a failed generation. Any earlier script is kept.
    pub fn reject(&mut self, err: &ExporterError) {
        warn!("Generation failed: {}", err);
        self.state.error = Some(err.user_message());
        self.state.status = GenerationStatus::Rejected;
    }

    /// Submit and, if dispatched, run one generation to completion.
    ///
    /// Returns the submission outcome; the result or error lands in the state.
    pub async fn generate<G>(&mut self, generator: &G) -> Submission
    where
        G: ScriptGenerator + ?Sized,
    {
        let submission = self.submit();
        if let Submission::Dispatch(ref config) = submission {
            match generate_script(generator, config).await {
                Ok(script) => self.resolve(script),
                Err(err) => self.reject(&err),
            }
        }
        submission
    }

    pub fn is_busy(&self) -> bool {
        self.state.status == GenerationStatus::Pending
    }

    /// Whether the generate button is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_busy()
    }

    /// Live "recognized links" counter for the URL input.
    pub fn recognized_url_count(&self) -> usize {
        count_article_urls(&self.state.url_input)
    }

    pub fn status(&self) -> GenerationStatus {
        self.state.status
    }

    pub fn config(&self) -> &ScriptConfig {
        &self.state.config
    }

    pub fn url_input(&self) -> &str {
        &self.state.url_input
    }

    pub fn result(&self) -> Option<&GeneratedScript> {
        self.state.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> FormState {
        self.state.clone()
    }
}
