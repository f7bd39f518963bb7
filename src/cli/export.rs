//! Export command - converts an existing markdown template without the TUI.

use anyhow::{Context, Result};
use std::path::Path;

use crate::api::{ApiClient, ExportFormat, ExportRequest};
use crate::config::Config;

/// Export a markdown file through the service and write the result.
pub async fn execute(
    config: &Config,
    input: &Path,
    format: ExportFormat,
    company: &str,
    domain: &str,
    dir: Option<&Path>,
) -> Result<()> {
    let template = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("failed to read {}", input.display()))?;

    let client = ApiClient::new(config.base_url());
    let request = ExportRequest {
        template,
        format,
        company_name: company.to_string(),
        task_or_domain: domain.to_string(),
    };

    let bytes = client.export(&request).await.context("export failed")?;

    let dir = dir.map(Path::to_path_buf).unwrap_or_else(|| config.export_dir());
    let path = dir.join(format.filename());
    tokio::fs::write(&path, &bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!("Saved {}", path.display());
    Ok(())
}
