//! Generation client: one prompt in, one parsed script out.

use crate::{
    parse_generated_script, prompt, GeneratedScript, Result, ScriptConfig, ScriptGenerator,
    provider::GenerationRequest,
};
use tracing::{debug, info, instrument};

/// Generate a script for `config` with a single request.
///
/// Transport and service errors are returned unchanged. A response that does
/// not match the schema becomes [`crate::ExporterError::InvalidScript`].
#[instrument(skip(generator, config), fields(provider = generator.name(), urls = config.urls.len()))]
pub async fn generate_script<G>(generator: &G, config: &ScriptConfig) -> Result<GeneratedScript>
where
    G: ScriptGenerator + ?Sized,
{
    let request = GenerationRequest {
        prompt: prompt::build_prompt(config)?,
        response_schema: prompt::response_schema(),
    };
    debug!("Prompt is {} bytes", request.prompt.len());

    let response = generator.generate(request).await?;
    if let Some(tokens) = response.tokens_used {
        info!("Generation used {} tokens", tokens);
    }

    parse_generated_script(&response.text)
}
