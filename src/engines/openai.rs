//! ChatGPT backend over an OpenAI-compatible chat/completions API.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Engine;
use crate::{
   config::AppConfig,
   error::{Result, SuggestError},
};

pub struct OpenAiEngine {
   client:   reqwest::blocking::Client,
   base_url: String,
   api_key:  String,
   model:    String,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
   role:    &'a str,
   content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
   model:       &'a str,
   messages:    Vec<Message<'a>>,
   temperature: f32,
   max_tokens:  u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
   choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
   message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
   #[serde(default)]
   content: Option<String>,
}

impl OpenAiEngine {
   pub fn new(model: &str, config: &AppConfig) -> Result<Self> {
      let api_key = std::env::var("OPENAI_API_KEY")
         .ok()
         .or_else(|| config.openai_api_key.clone())
         .ok_or_else(|| {
            SuggestError::AuthFailed(
               "OPENAI_API_KEY is not set.\nExample: export OPENAI_API_KEY='sk-...'".to_string(),
            )
         })?;

      let client = reqwest::blocking::Client::builder()
         .timeout(Duration::from_secs(config.request_timeout_secs))
         .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
         .build()
         .map_err(SuggestError::HttpError)?;

      Ok(Self {
         client,
         base_url: config.openai_base_url.clone(),
         api_key,
         model: model.to_string(),
      })
   }
}

impl Engine for OpenAiEngine {
   fn name(&self) -> &'static str {
      "ChatGPT"
   }

   fn model(&self) -> &str {
      &self.model
   }

   fn generate_raw(&self, prompt: &str) -> Result<String> {
      let request = ChatRequest {
         model:       &self.model,
         messages:    vec![
            Message { role: "system", content: "You generate git commit messages." },
            Message { role: "user", content: prompt },
         ],
         temperature: 0.3,
         max_tokens:  200,
      };

      let response = self
         .client
         .post(format!("{}/chat/completions", self.base_url))
         .header("Authorization", format!("Bearer {}", self.api_key))
         .json(&request)
         .send()
         .map_err(|e| {
            if e.is_connect() || e.is_timeout() {
               SuggestError::Connectivity(
                  "Could not reach the ChatGPT API (network, firewall or proxy issue)".to_string(),
               )
            } else {
               SuggestError::HttpError(e)
            }
         })?;

      let status = response.status();
      if !status.is_success() {
         let body = response.text().unwrap_or_else(|_| "Unknown error".to_string());
         return Err(match status.as_u16() {
            401 | 403 => SuggestError::AuthFailed(
               "OPENAI_API_KEY was rejected or lacks permission. Check the key.".to_string(),
            ),
            429 => SuggestError::RateLimited(
               "ChatGPT throttled the request (rate limit or quota). Retry later or check your \
                plan."
                  .to_string(),
            ),
            400 => SuggestError::BadRequest(
               "ChatGPT rejected the request; the prompt may be too long. Try staging fewer files."
                  .to_string(),
            ),
            _ => SuggestError::ApiError { status: status.as_u16(), body },
         });
      }

      let parsed: ChatResponse = response.json().map_err(SuggestError::HttpError)?;
      let content = parsed
         .choices
         .first()
         .and_then(|choice| choice.message.content.as_deref())
         .unwrap_or("")
         .trim()
         .to_string();

      if content.is_empty() {
         return Err(SuggestError::BlankCompletion("ChatGPT".to_string()));
      }

      Ok(content)
   }
}
