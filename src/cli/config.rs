//! Config management CLI commands.

use crate::config::Config;
use anyhow::Result;

/// Show current configuration
pub async fn show() -> Result<()> {
    let config = Config::load().await?;

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

/// Show configuration file path
pub async fn path() -> Result<()> {
    if let Some(global_path) = Config::global_config_path() {
        println!("Global config: {}", global_path.display());
    }

    if let Some(global_dir) = Config::global_config_dir() {
        println!("Config directory: {}", global_dir.display());
    }

    // Check for project config
    let cwd = std::env::current_dir()?;
    let candidates = [
        cwd.join("consultgen.json"),
        cwd.join("consultgen.jsonc"),
        cwd.join(".consultgen").join("consultgen.json"),
        cwd.join(".consultgen").join("consultgen.jsonc"),
    ];

    match candidates.iter().find(|p| p.exists()) {
        Some(project_config) => println!("Project config: {}", project_config.display()),
        None => println!("No project config found in {}", cwd.display()),
    }

    Ok(())
}

/// Initialize configuration file with defaults
pub async fn init() -> Result<()> {
    let config_path = Config::init().await?;
    println!(
        "Created default configuration file at: {}",
        config_path.display()
    );
    println!("\nEdit this file to point the client at your template service:");
    println!(
        r#"
{{
  "base_url": "http://localhost:8000",
  "theme": "dark",
  "export_dir": "~/Documents"
}}
"#
    );
    Ok(())
}
