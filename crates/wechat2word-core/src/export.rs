//! Writing the generated script to disk.

use crate::{ExporterConfig, ExporterError, GeneratedScript, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Write `script.code` to `dir/file_name`, creating `dir` if needed.
///
/// Returns the written path. With `overwrite` off an existing file is left
/// alone and [`ExporterError::AlreadyExists`] is returned.
pub async fn export_script(
    script: &GeneratedScript,
    dir: &Path,
    file_name: &str,
    overwrite: bool,
) -> Result<PathBuf> {
    if file_name.trim().is_empty() {
        return Err(ExporterError::ConfigError("file name is empty".to_string()));
    }

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);

    if !overwrite && tokio::fs::try_exists(&path).await? {
        return Err(ExporterError::AlreadyExists(path.display().to_string()));
    }

    tokio::fs::write(&path, &script.code).await?;
    info!("Script written to {:?}", path);
    Ok(path)
}

/// [`export_script`] using the locations from an [`ExporterConfig`].
pub async fn export_with_config(
    script: &GeneratedScript,
    config: &ExporterConfig,
) -> Result<PathBuf> {
    export_script(script, &config.output_dir, &config.file_name, config.overwrite).await
}
