//! Copilot backend driven through the `copilot` CLI.

use std::process::Command;

use super::Engine;
use crate::error::{Result, SuggestError};

pub struct CopilotEngine {
   model: String,
}

impl CopilotEngine {
   pub fn new(model: &str) -> Result<Self> {
      // Cross-platform executable detection (where.exe on Windows)
      if which::which("copilot").is_err() {
         return Err(SuggestError::Other(
            "copilot CLI is not installed.\nInstall it with: brew install copilot".to_string(),
         ));
      }

      Ok(Self { model: model.to_string() })
   }
}

impl Engine for CopilotEngine {
   fn name(&self) -> &'static str {
      "Copilot"
   }

   fn model(&self) -> &str {
      &self.model
   }

   fn generate_raw(&self, prompt: &str) -> Result<String> {
      let output = Command::new("copilot")
         .args(["-p", prompt, "--model", &self.model])
         .output()
         .map_err(|e| SuggestError::Other(format!("Failed to run copilot CLI: {e}")))?;

      let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
      let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

      if !output.status.success() {
         let lowered = stderr.to_lowercase();
         if lowered.contains("authentication") || lowered.contains("login") {
            return Err(SuggestError::AuthFailed(
               "Copilot credentials missing. Run `copilot login` in your shell first.".to_string(),
            ));
         }
         let detail = if stderr.is_empty() { stdout } else { stderr };
         return Err(SuggestError::Other(format!("Copilot CLI failed:\n{detail}")));
      }

      if stdout.is_empty() {
         return Err(SuggestError::BlankCompletion("Copilot".to_string()));
      }

      Ok(stdout)
   }
}
