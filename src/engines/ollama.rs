//! Ollama backend over the local /api/generate endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Engine;
use crate::{
   config::AppConfig,
   error::{Result, SuggestError},
};

pub struct OllamaEngine {
   client:   reqwest::blocking::Client,
   base_url: String,
   model:    String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
   model:       &'a str,
   prompt:      &'a str,
   stream:      bool,
   num_predict: u32,
   temperature: f32,
   top_p:       f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
   #[serde(default)]
   response: Option<String>,
   #[serde(default)]
   error:    Option<String>,
}

impl OllamaEngine {
   pub fn new(model: &str, config: &AppConfig) -> Result<Self> {
      let client = reqwest::blocking::Client::builder()
         .timeout(Duration::from_secs(config.request_timeout_secs))
         .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
         .build()
         .map_err(SuggestError::HttpError)?;

      Ok(Self {
         client,
         base_url: config.ollama_base_url.clone(),
         model: model.to_string(),
      })
   }
}

impl Engine for OllamaEngine {
   fn name(&self) -> &'static str {
      "Ollama"
   }

   fn model(&self) -> &str {
      &self.model
   }

   fn generate_raw(&self, prompt: &str) -> Result<String> {
      let request = GenerateRequest {
         model: &self.model,
         prompt,
         stream: false,
         num_predict: 128,
         temperature: 0.2,
         top_p: 0.9,
      };

      let response = self
         .client
         .post(format!("{}/api/generate", self.base_url))
         .json(&request)
         .send()
         .map_err(|e| {
            if e.is_connect() || e.is_timeout() {
               SuggestError::Connectivity(
                  "Could not reach the Ollama server. Is it running? (ollama serve)".to_string(),
               )
            } else {
               SuggestError::HttpError(e)
            }
         })?;

      let status = response.status();
      if !status.is_success() {
         let body = response.text().unwrap_or_else(|_| "Unknown error".to_string());
         return Err(SuggestError::ApiError { status: status.as_u16(), body });
      }

      let parsed: GenerateResponse = response.json().map_err(SuggestError::HttpError)?;

      if let Some(error) = parsed.error {
         return Err(SuggestError::BadRequest(format!(
            "Ollama error: {error}\nIs the model installed? Try: ollama pull {}",
            self.model
         )));
      }

      let content = parsed.response.unwrap_or_default().trim().to_string();
      if content.is_empty() {
         return Err(SuggestError::BlankCompletion("Ollama".to_string()));
      }

      Ok(content)
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_generate_request_serialization() {
      let request = GenerateRequest {
         model:       "llama3",
         prompt:      "write a commit message",
         stream:      false,
         num_predict: 128,
         temperature: 0.2,
         top_p:       0.9,
      };
      let json = serde_json::to_value(&request).unwrap();
      assert_eq!(json["model"], "llama3");
      assert_eq!(json["stream"], false);
      assert_eq!(json["num_predict"], 128);
   }

   #[test]
   fn test_generate_response_with_error_field() {
      let parsed: GenerateResponse =
         serde_json::from_str(r#"{"error": "model 'llama9' not found"}"#).unwrap();
      assert!(parsed.response.is_none());
      assert_eq!(parsed.error.as_deref(), Some("model 'llama9' not found"));
   }

   #[test]
   fn test_generate_response_happy_path() {
      let parsed: GenerateResponse =
         serde_json::from_str(r#"{"response": "[\"a\"]", "done": true}"#).unwrap();
      assert_eq!(parsed.response.as_deref(), Some("[\"a\"]"));
      assert!(parsed.error.is_none());
   }
}
