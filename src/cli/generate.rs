//! Generate command - streams a template to stdout without the TUI.

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::Path;

use crate::api::{ApiClient, GenerateRequest, StreamEvent};
use crate::config::Config;

/// Stream a generated template to stdout, optionally saving it to a file.
pub async fn execute(
    config: &Config,
    company: &str,
    domain: &str,
    output: Option<&Path>,
) -> Result<()> {
    let client = ApiClient::new(config.base_url());
    let request = GenerateRequest {
        company_name: company.to_string(),
        task_or_domain: domain.to_string(),
    };

    let mut rx = client.stream_generate(&request);
    let mut document = String::new();

    while let Some(event) = rx.recv().await {
        match event {
            StreamEvent::Chunk(text) => {
                print!("{}", text);
                let _ = std::io::stdout().flush();
                document.push_str(&text);
            }
            StreamEvent::Done => break,
            StreamEvent::Error(detail) => {
                bail!("failed to generate template: {}", detail);
            }
        }
    }
    println!();

    if let Some(path) = output {
        tokio::fs::write(path, &document)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("Saved {}", path.display());
    }

    Ok(())
}
