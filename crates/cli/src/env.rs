use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use connectors::settings::ENV_PREFIX;

use crate::error::CliError;

/// Configuration variables gathered from the process environment and env files.
/// Later sources override earlier ones.
#[derive(Debug, Clone)]
pub struct EnvManager {
    vars: HashMap<String, String>,
    sensitive_patterns: Vec<String>,
}

impl EnvManager {
    pub fn new() -> Self {
        Self {
            vars: std::env::vars().collect(),
            sensitive_patterns: Self::default_sensitive_patterns(),
        }
    }

    /// `~/.pgfit/env`
    pub fn default_file() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".pgfit").join("env"))
    }

    /// Loads the default env file when it exists.
    pub fn load_default_file(&mut self) -> Result<(), CliError> {
        match Self::default_file() {
            Some(path) if path.is_file() => self.load_from_file(path),
            _ => Ok(()),
        }
    }

    /// Load variables from a .env file
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), CliError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read env file {}: {}", path.display(), e))
        })?;

        self.parse_env_content(&content)
    }

    pub fn all(&self) -> &HashMap<String, String> {
        &self.vars
    }

    /// `PGFIT_*` variables, sorted by name, with sensitive values masked.
    pub fn masked_settings(&self) -> Vec<(String, String)> {
        let mut settings: Vec<(String, String)> = self
            .vars
            .iter()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .map(|(key, value)| {
                let shown = if self.is_sensitive(key) {
                    "********".to_string()
                } else {
                    value.clone()
                };
                (key.clone(), shown)
            })
            .collect();
        settings.sort();
        settings
    }

    fn is_sensitive(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.sensitive_patterns
            .iter()
            .any(|pattern| key.contains(pattern.as_str()))
    }

    fn parse_env_content(&mut self, content: &str) -> Result<(), CliError> {
        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let line = line.strip_prefix("export ").unwrap_or(line);
            let Some((key, value)) = line.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid env file: malformed line {} (expected KEY=VALUE)",
                    line_num + 1
                )));
            };

            let key = key.trim();
            if key.is_empty() {
                return Err(CliError::Config(format!(
                    "Invalid env file: empty key at line {}",
                    line_num + 1
                )));
            }

            self.vars.insert(key.to_string(), Self::unquote_value(value));
        }

        Ok(())
    }

    fn unquote_value(value: &str) -> String {
        let value = value.trim();

        for quote in ['"', '\''] {
            if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
                return value[1..value.len() - 1].to_string();
            }
        }

        value.to_string()
    }

    fn default_sensitive_patterns() -> Vec<String> {
        ["password", "passwd", "secret", "token", "credential"]
            .iter()
            .map(|p| p.to_string())
            .collect()
    }
}

impl Default for EnvManager {
    fn default() -> Self {
        Self::new()
    }
}
