//! Prompt template loading and rendering.
//!
//! The default prompt ships embedded in the binary; a user copy at
//! `~/.llm-commit/prompts/commit_message.md` takes precedence when present.

use std::{path::PathBuf, sync::LazyLock};

use parking_lot::Mutex;
use rust_embed::RustEmbed;
use tera::{Context, Tera};

use crate::error::{Result, SuggestError};

/// Embedded prompts folder (compiled into binary)
#[derive(RustEmbed)]
#[folder = "prompts/"]
struct Prompts;

const COMMIT_TEMPLATE: &str = "commit_message.md";

/// Global Tera instance for template rendering (wrapped in Mutex for mutable
/// access)
static TERA: LazyLock<Mutex<Tera>> = LazyLock::new(|| {
   let mut tera = Tera::default();

   // A user-provided template takes precedence over the embedded one
   if let Some(path) = user_prompt_path()
      && path.exists()
      && let Err(e) = tera.add_template_file(&path, Some(COMMIT_TEMPLATE))
   {
      eprintln!("Warning: Failed to load user prompt {}: {e}", path.display());
   }

   if !tera.get_template_names().any(|name| name == COMMIT_TEMPLATE)
      && let Some(embedded) = Prompts::get(COMMIT_TEMPLATE)
   {
      match std::str::from_utf8(embedded.data.as_ref()) {
         Ok(content) => {
            if let Err(e) = tera.add_raw_template(COMMIT_TEMPLATE, content) {
               eprintln!("Warning: Failed to register embedded prompt: {e}");
            }
         },
         Err(e) => {
            eprintln!("Warning: Embedded prompt is not valid UTF-8: {e}");
         },
      }
   }

   // Disable auto-escaping for markdown templates
   tera.autoescape_on(vec![]);

   Mutex::new(tera)
});

/// User prompt directory (~/.llm-commit/prompts/) if a home dir exists.
fn user_prompt_path() -> Option<PathBuf> {
   std::env::var("HOME")
      .or_else(|_| std::env::var("USERPROFILE"))
      .ok()
      .map(|home| PathBuf::from(home).join(".llm-commit/prompts").join(COMMIT_TEMPLATE))
}

/// Render the commit message prompt with the filtered diff payload attached.
pub fn render_commit_prompt(payload: &str) -> Result<String> {
   let mut context = Context::new();
   context.insert("diff", payload);

   let rendered = TERA
      .lock()
      .render(COMMIT_TEMPLATE, &context)
      .map_err(|e| SuggestError::Other(format!("Failed to render commit prompt: {e}")))?;

   Ok(rendered.trim().to_string())
}
