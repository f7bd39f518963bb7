//! Configuration management.
//!
//! Configuration is layered: the global file
//! (`~/.config/consultgen/consultgen.json`), then a project file
//! (`consultgen.json`/`consultgen.jsonc`, also under `.consultgen/`) found by
//! walking up from the working directory, then environment variables.
//! Later layers win. Files may use JSONC comments, trailing commas and
//! `{env:VAR}` substitution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Default service endpoint when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// JSON schema reference
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Base URL of the template service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Theme name ("dark" or "light")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Directory exported files are written to (defaults to the cwd)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<String>,

    /// Log level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration from all sources.
    pub async fn load() -> Result<Self> {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            if let Some(global_config) = Self::load_file(&global_path).await? {
                config = config.merge(global_config);
            }
        }

        if let Some(project_path) = Self::find_project_config()? {
            if let Some(project_config) = Self::load_file(&project_path).await? {
                config = config.merge(project_config);
            }
        }

        Ok(config.apply_env_overrides())
    }

    /// Effective service endpoint.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Directory exported files land in.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Get the global config directory path.
    pub fn global_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("consultgen"))
    }

    /// Get the global config file path.
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|p| p.join("consultgen.json"))
    }

    /// Find a project config file in the current directory or its parents.
    fn find_project_config() -> Result<Option<PathBuf>> {
        let mut current = std::env::current_dir()?;

        loop {
            for filename in &["consultgen.jsonc", "consultgen.json"] {
                let config_path = current.join(filename);
                if config_path.exists() {
                    return Ok(Some(config_path));
                }
            }

            let dot_dir = current.join(".consultgen");
            if dot_dir.exists() {
                for filename in &["consultgen.jsonc", "consultgen.json"] {
                    let config_path = dot_dir.join(filename);
                    if config_path.exists() {
                        return Ok(Some(config_path));
                    }
                }
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }

    /// Load configuration from a file.
    async fn load_file(path: &Path) -> Result<Option<Config>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Some(Config::default()));
        }

        let content = Self::strip_jsonc_comments(&content);
        let content = Self::strip_trailing_commas(&content);
        let content = Self::substitute_env_vars(&content);

        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(Some(config))
    }

    /// Strip comments from JSONC content.
    fn strip_jsonc_comments(content: &str) -> String {
        let mut result = String::new();
        let mut in_string = false;
        let mut in_line_comment = false;
        let mut in_block_comment = false;
        let mut chars = content.chars().peekable();

        while let Some(c) = chars.next() {
            if in_line_comment {
                if c == '\n' {
                    in_line_comment = false;
                    result.push(c);
                }
                continue;
            }

            if in_block_comment {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    in_block_comment = false;
                }
                continue;
            }

            if c == '"' {
                if !in_string {
                    in_string = true;
                } else {
                    let backslashes = result.chars().rev().take_while(|&ch| ch == '\\').count();
                    if backslashes % 2 == 0 {
                        in_string = false;
                    }
                }
                result.push(c);
                continue;
            }

            if !in_string {
                if c == '/' && chars.peek() == Some(&'/') {
                    chars.next();
                    in_line_comment = true;
                    continue;
                }

                if c == '/' && chars.peek() == Some(&'*') {
                    chars.next();
                    in_block_comment = true;
                    continue;
                }
            }

            result.push(c);
        }

        result
    }

    /// Strip trailing commas from JSON (common in JSONC).
    fn strip_trailing_commas(content: &str) -> String {
        let re = regex::Regex::new(r",(\s*[}\]])").unwrap();
        re.replace_all(content, "$1").to_string()
    }

    /// Substitute environment variables in the format `{env:VAR_NAME}`.
    fn substitute_env_vars(content: &str) -> String {
        let re = regex::Regex::new(r"\{env:([^}]+)\}").unwrap();
        re.replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        })
        .to_string()
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(mut self, other: Config) -> Self {
        if other.schema.is_some() {
            self.schema = other.schema;
        }
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.theme.is_some() {
            self.theme = other.theme;
        }
        if other.export_dir.is_some() {
            self.export_dir = other.export_dir;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
        self
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(mut self) -> Self {
        if let Ok(base_url) = std::env::var("CONSULTGEN_BASE_URL") {
            self.base_url = Some(base_url);
        }
        if let Ok(theme) = std::env::var("CONSULTGEN_THEME") {
            self.theme = Some(theme);
        }
        if let Ok(log_level) = std::env::var("CONSULTGEN_LOG_LEVEL") {
            self.log_level = Some(log_level);
        }
        self
    }

    /// Create a default config file if it doesn't exist.
    pub async fn init() -> Result<PathBuf> {
        let config_dir = Self::global_config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        fs::create_dir_all(&config_dir)
            .await
            .context("Failed to create config directory")?;

        let config_path = config_dir.join("consultgen.json");

        if !config_path.exists() {
            let default_config = Config {
                schema: None,
                base_url: Some(DEFAULT_BASE_URL.to_string()),
                theme: Some("dark".to_string()),
                export_dir: None,
                log_level: Some("warn".to_string()),
            };

            let content = serde_json::to_string_pretty(&default_config)?;
            fs::write(&config_path, content)
                .await
                .context("Failed to write default config file")?;
        }

        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_jsonc_comments() {
        let input = r#"{
            // line comment
            "base_url": "http://example.com", // inline
            /* block
               comment */
            "theme": "dark"
        }"#;

        let result = Config::strip_jsonc_comments(input);
        assert!(!result.contains("//"));
        assert!(!result.contains("/*"));
        assert!(result.contains(r#""base_url": "http://example.com""#));
    }

    #[test]
    fn test_comment_markers_inside_strings_survive() {
        let input = r#"{"base_url": "http://example.com//path"}"#;
        let result = Config::strip_jsonc_comments(input);
        assert_eq!(result, input);
    }

    #[test]
    fn test_strip_trailing_commas() {
        let input = r#"{"theme": "dark", "nested": {"a": 1,},}"#;
        let result = Config::strip_trailing_commas(input);
        let parsed: Result<serde_json::Value, _> = serde_json::from_str(&result);
        assert!(parsed.is_ok());
    }

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("CONSULTGEN_TEST_VAR", "http://svc:9000");
        let input = r#"{"base_url": "{env:CONSULTGEN_TEST_VAR}"}"#;
        let result = Config::substitute_env_vars(input);
        assert_eq!(result, r#"{"base_url": "http://svc:9000"}"#);
    }

    #[test]
    fn test_merge_precedence() {
        let global = Config {
            base_url: Some("http://global:8000".to_string()),
            theme: Some("dark".to_string()),
            ..Default::default()
        };
        let project = Config {
            base_url: Some("http://project:8000".to_string()),
            export_dir: Some("/tmp/exports".to_string()),
            ..Default::default()
        };

        let merged = global.merge(project);
        assert_eq!(merged.base_url(), "http://project:8000");
        assert_eq!(merged.theme.as_deref(), Some("dark"));
        assert_eq!(merged.export_dir(), PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn test_default_base_url() {
        let config = Config::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.export_dir(), PathBuf::from("."));
    }

    #[tokio::test]
    async fn test_load_file_accepts_jsonc() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("consultgen.jsonc");
        tokio::fs::write(
            &path,
            "{\n  // service endpoint\n  \"base_url\": \"http://svc:1234\",\n}",
        )
        .await
        .unwrap();

        let config = Config::load_file(&path).await.unwrap().unwrap();
        assert_eq!(config.base_url(), "http://svc:1234");
    }

    #[tokio::test]
    async fn test_load_file_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_file(&dir.path().join("absent.json"))
            .await
            .unwrap();
        assert!(config.is_none());
    }
}
