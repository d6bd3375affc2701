//! CLI arguments and shared enums.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Which text-generation backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum EngineKind {
   #[default]
   Ollama,
   Chatgpt,
   Copilot,
}

/// Icon theme for the file list output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum IconTheme {
   #[default]
   Emoji,
   Nerd,
}

// CLI Args

#[derive(Parser, Debug, Default)]
#[command(
   name = "lcm",
   version,
   about = "Generate commit message candidates for staged changes with an LLM"
)]
pub struct Args {
   /// Engine used to generate commit messages
   #[arg(long, value_enum)]
   pub engine: EngineKind,

   /// Model name for the selected engine (e.g. llama3, qwen3:8b, gpt-4.1-mini)
   #[arg(long, short = 'm')]
   pub model: String,

   /// Icon theme for the file list output
   #[arg(long, value_enum, default_value = "emoji")]
   pub icons: IconTheme,

   /// Prepend the current branch name to the commit message
   /// (branch "PROD-123" makes the message start with "[PROD-123]")
   #[arg(long)]
   pub branch_prefix: bool,

   /// Disable interactive editing of gitmoji and prefix
   #[arg(long)]
   pub no_edit_gitmoji_prefix: bool,

   /// Copy the final message to the clipboard
   #[arg(long)]
   pub copy: bool,

   /// Directory to run git commands in
   #[arg(long, default_value = ".")]
   pub dir: String,

   /// Path to config file (default: ~/.config/llm-commit/config.toml)
   #[arg(long)]
   pub config: Option<PathBuf>,

   /// Extra arguments forwarded to `git commit`, after `--`
   /// (e.g. `lcm --engine ollama -m llama3 -- --no-verify`)
   #[arg(last = true)]
   pub extra_args: Vec<String>,
}
