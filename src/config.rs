use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SuggestError};

/// Exclusion rules and payload cap applied to the staged diff before it is
/// handed to an engine. Constructed once at startup and shared by all calls.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
   /// Hard cap on the concatenated diff payload, in characters
   pub max_payload_chars: usize,

   /// Exact basename matches (e.g. "package-lock.json")
   pub excluded_file_names: Vec<String>,

   /// Suffix matches against the full relative path (e.g. ".min.js")
   pub excluded_suffixes: Vec<String>,

   /// Directory markers, each ending with '/'; matched at any depth
   pub excluded_dir_prefixes: Vec<String>,
}

impl Default for FilterConfig {
   fn default() -> Self {
      Self {
         max_payload_chars:    12000,
         excluded_file_names:  vec![
            ".gitignore".to_string(),
            "poetry.lock".to_string(),
            "Pipfile.lock".to_string(),
            "package-lock.json".to_string(),
            "yarn.lock".to_string(),
         ],
         excluded_suffixes:    vec![".lock".to_string(), ".min.js".to_string(), ".map".to_string()],
         excluded_dir_prefixes: vec![
            "node_modules/".to_string(),
            "dist/".to_string(),
            "build/".to_string(),
            ".venv/".to_string(),
            "__pycache__/".to_string(),
         ],
      }
   }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
   /// OpenAI-compatible API base URL for the chatgpt engine
   pub openai_base_url: String,

   /// Optional API key (overridden by the `OPENAI_API_KEY` env var)
   pub openai_api_key: Option<String>,

   /// Ollama server base URL
   pub ollama_base_url: String,

   /// HTTP request timeout in seconds
   pub request_timeout_secs: u64,

   /// HTTP connection timeout in seconds
   pub connect_timeout_secs: u64,

   pub filter: FilterConfig,
}

impl Default for AppConfig {
   fn default() -> Self {
      Self {
         openai_base_url:      "https://api.openai.com/v1".to_string(),
         openai_api_key:       None,
         ollama_base_url:      "http://localhost:11434".to_string(),
         request_timeout_secs: 300,
         connect_timeout_secs: 30,
         filter:               FilterConfig::default(),
      }
   }
}

impl AppConfig {
   /// Load config from the default location (~/.config/llm-commit/config.toml).
   /// Falls back to `Default` if the file doesn't exist. Environment variables
   /// override config file values:
   /// - `OPENAI_API_KEY` overrides `openai_api_key`
   /// - `LLM_COMMIT_OPENAI_URL` overrides `openai_base_url`
   /// - `LLM_COMMIT_OLLAMA_URL` overrides `ollama_base_url`
   pub fn load() -> Result<Self> {
      let config_path = if let Ok(custom_path) = std::env::var("LLM_COMMIT_CONFIG") {
         PathBuf::from(custom_path)
      } else {
         Self::default_config_path().unwrap_or_else(|_| PathBuf::new())
      };

      let mut config = if config_path.exists() {
         Self::from_file(&config_path)?
      } else {
         Self::default()
      };

      Self::apply_env_overrides(&mut config);
      Ok(config)
   }

   /// Load config from a specific file
   pub fn from_file(path: &Path) -> Result<Self> {
      let contents = std::fs::read_to_string(path)
         .map_err(|e| SuggestError::Other(format!("Failed to read config: {e}")))?;
      let mut config: Self = toml::from_str(&contents)
         .map_err(|e| SuggestError::Other(format!("Failed to parse config: {e}")))?;

      Self::apply_env_overrides(&mut config);
      Ok(config)
   }

   fn apply_env_overrides(config: &mut Self) {
      if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
         config.openai_api_key = Some(api_key);
      }

      if let Ok(url) = std::env::var("LLM_COMMIT_OPENAI_URL") {
         config.openai_base_url = url;
      }

      if let Ok(url) = std::env::var("LLM_COMMIT_OLLAMA_URL") {
         config.ollama_base_url = url;
      }
   }

   /// Get default config path (platform-safe)
   /// Tries HOME (Unix/Linux/macOS) then USERPROFILE (Windows)
   pub fn default_config_path() -> Result<PathBuf> {
      if let Ok(home) = std::env::var("HOME") {
         return Ok(PathBuf::from(home).join(".config/llm-commit/config.toml"));
      }

      if let Ok(home) = std::env::var("USERPROFILE") {
         return Ok(PathBuf::from(home).join(".config/llm-commit/config.toml"));
      }

      Err(SuggestError::Other("No home directory found (tried HOME and USERPROFILE)".to_string()))
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_filter_defaults_match_documented_rules() {
      let filter = FilterConfig::default();
      assert_eq!(filter.max_payload_chars, 12000);
      assert!(filter.excluded_file_names.iter().any(|f| f == "package-lock.json"));
      assert!(filter.excluded_file_names.iter().any(|f| f == ".gitignore"));
      assert!(filter.excluded_suffixes.iter().any(|s| s == ".min.js"));
      assert!(filter.excluded_dir_prefixes.iter().any(|d| d == "node_modules/"));
      assert!(filter.excluded_dir_prefixes.iter().all(|d| d.ends_with('/')));
   }

   #[test]
   fn test_app_config_defaults() {
      let config = AppConfig::default();
      assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
      assert_eq!(config.ollama_base_url, "http://localhost:11434");
      assert_eq!(config.request_timeout_secs, 300);
      assert!(config.openai_api_key.is_none());
   }

   #[test]
   fn test_partial_toml_keeps_defaults() {
      let config: AppConfig = toml::from_str(
         r#"
         ollama_base_url = "http://10.0.0.5:11434"

         [filter]
         max_payload_chars = 500
         "#,
      )
      .unwrap();

      assert_eq!(config.ollama_base_url, "http://10.0.0.5:11434");
      assert_eq!(config.filter.max_payload_chars, 500);
      // Untouched fields keep their defaults
      assert_eq!(config.openai_base_url, "https://api.openai.com/v1");
      assert!(config.filter.excluded_file_names.iter().any(|f| f == "yarn.lock"));
   }

   #[test]
   fn test_empty_toml_is_all_defaults() {
      let config: AppConfig = toml::from_str("").unwrap();
      assert_eq!(config.filter.max_payload_chars, 12000);
      assert_eq!(config.connect_timeout_secs, 30);
   }
}
