//! Pluggable text-generation backends.
//!
//! Each backend only turns a prompt into a raw text blob; prompt construction
//! and response normalization are shared free functions, so implementations
//! stay flat and carry no inherited state.

pub mod copilot;
pub mod ollama;
pub mod openai;

use crate::{
   config::AppConfig,
   error::Result,
   prompt, response,
   style::Spinner,
   types::EngineKind,
};

/// A text-generation backend.
pub trait Engine {
   /// Display name for status lines and error context.
   fn name(&self) -> &'static str;

   /// Model identifier passed to the backend.
   fn model(&self) -> &str;

   /// Send one prompt, return the raw response text unmodified.
   fn generate_raw(&self, prompt: &str) -> Result<String>;
}

/// Construct the engine selected on the command line.
pub fn create(kind: EngineKind, model: &str, config: &AppConfig) -> Result<Box<dyn Engine>> {
   match kind {
      EngineKind::Ollama => Ok(Box::new(ollama::OllamaEngine::new(model, config)?)),
      EngineKind::Chatgpt => Ok(Box::new(openai::OpenAiEngine::new(model, config)?)),
      EngineKind::Copilot => Ok(Box::new(copilot::CopilotEngine::new(model)?)),
   }
}

/// One generation round-trip: render the prompt, call the engine under a
/// spinner, normalize the response into a candidate list.
///
/// The spinner is an RAII guard, so it is torn down on every exit path.
pub fn generate_candidates(engine: &dyn Engine, payload: &str) -> Result<Vec<String>> {
   let prompt = prompt::render_commit_prompt(payload)?;

   let spinner = Spinner::start(&format!(
      "{} Generating commit messages with {}",
      crate::style::icons::CRYSTAL_BALL,
      engine.name()
   ));

   let result = engine
      .generate_raw(&prompt)
      .and_then(|raw| response::extract_candidates(&raw));

   spinner.finish(result.is_ok());
   result
}
