//! Interactive commit flow: filter the staged diff, generate candidates, let
//! the user pick and tweak one, then commit.

use arboard::Clipboard;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use unicode_normalization::UnicodeNormalization;

use crate::{
   config::AppConfig,
   console::{self, DiffConsole},
   diff,
   engines::{self, Engine},
   error::{Result, SuggestError},
   git, style,
   types::Args,
};

const WRITE_OWN: &str = "\u{270F}\u{FE0F} Write my own";
const KEEP_PREFIX: &str = "\u{274C} Keep as is";

pub struct CommitFlow<'a> {
   pub engine:  &'a dyn Engine,
   pub console: &'a DiffConsole,
   pub config:  &'a AppConfig,
}

impl CommitFlow<'_> {
   /// Run the whole flow and return the exit code of `git commit`.
   pub fn run(&self, args: &Args) -> Result<i32> {
      let raw_diff = git::get_staged_diff(&args.dir)?;

      let files = diff::process(&raw_diff, &self.config.filter);
      self.console.print_diff_files(&files);

      if files.payload.is_empty() {
         return Err(SuggestError::NoRelevantChanges);
      }

      let mut candidates = engines::generate_candidates(self.engine, &files.payload)?;

      if args.branch_prefix {
         let branch = git::current_branch(&args.dir)?;
         candidates = apply_branch_prefix(&candidates, &branch);
      }

      let chosen = self.select_message(&candidates)?;
      let edited = if args.no_edit_gitmoji_prefix {
         chosen
      } else {
         self.edit_gitmoji_prefix(chosen)?
      };

      let message = normalize_message(&edited);
      if message.is_empty() {
         return Err(SuggestError::Cancelled);
      }

      if !self.confirm_commit(&message)? {
         return Err(SuggestError::Cancelled);
      }

      if args.copy {
         match copy_to_clipboard(&message) {
            Ok(()) => println!("{} Copied to clipboard", style::icons::CLIPBOARD),
            Err(e) => println!("Note: Failed to copy to clipboard: {e}"),
         }
      }

      git::commit(&message, &args.extra_args, &args.dir)
   }

   /// Pick one candidate (or start from scratch), then edit it inline.
   fn select_message(&self, candidates: &[String]) -> Result<String> {
      let mut choices: Vec<&str> = candidates.iter().map(String::as_str).collect();
      choices.push(WRITE_OWN);

      let picked = Select::with_theme(&ColorfulTheme::default())
         .with_prompt("Pick a commit message")
         .items(&choices)
         .default(0)
         .interact()?;

      let initial = if picked == candidates.len() { "" } else { candidates[picked].as_str() };

      let edited: String = Input::with_theme(&ColorfulTheme::default())
         .with_prompt("Edit or confirm the message")
         .with_initial_text(initial)
         .allow_empty(true)
         .interact_text()?;

      Ok(edited.trim().to_string())
   }

   /// Offer the gitmoji/prefix table; "keep as is" leaves the message alone.
   fn edit_gitmoji_prefix(&self, message: String) -> Result<String> {
      let gitmoji = console::load_gitmoji();
      if gitmoji.is_empty() {
         return Ok(message);
      }

      let mut choices = vec![KEEP_PREFIX.to_string()];
      choices.extend(gitmoji.iter().map(|(prefix, emoji)| format!("{emoji} {prefix}")));

      let picked = Select::with_theme(&ColorfulTheme::default())
         .with_prompt("Replace the gitmoji and prefix?")
         .items(&choices)
         .default(0)
         .interact()?;

      if picked == 0 {
         return Ok(message);
      }

      Ok(replace_prefix(&message, &choices[picked]))
   }

   fn confirm_commit(&self, message: &str) -> Result<bool> {
      self.console.print_selected_message(message);

      let confirmed = Confirm::with_theme(&ColorfulTheme::default())
         .with_prompt("Commit with this message?")
         .default(true)
         .interact()?;

      Ok(confirmed)
   }
}

/// Prepend "[branch] " to every candidate.
pub fn apply_branch_prefix(candidates: &[String], branch: &str) -> Vec<String> {
   candidates
      .iter()
      .map(|candidate| format!("[{branch}] {candidate}"))
      .collect()
}

/// Swap the leading gitmoji/type prefix of `message` for `replacement`
/// (e.g. "🐛 fix"), keeping a leading "[META]" tag and the text after the
/// first colon.
///
/// "[TEST] ✨ feat: add login" + "🐛 fix" → "[TEST] 🐛 fix: add login"
pub fn replace_prefix(message: &str, replacement: &str) -> String {
   let (meta, rest) = if message.starts_with('[')
      && let Some(end) = message.find(']')
   {
      (&message[..=end], message[end + 1..].trim_start())
   } else {
      ("", message)
   };

   let body = match rest.split_once(':') {
      Some((_, body)) => body.trim_start(),
      None => rest,
   };

   let meta_part = if meta.is_empty() { String::new() } else { format!("{meta} ") };
   format!("{meta_part}{replacement}: {body}").trim().to_string()
}

/// Strip AI-flavored typography from the final message (smart quotes, long
/// dashes, invisible characters) before it reaches `git commit`.
pub fn normalize_message(text: &str) -> String {
   let replaced = text
      .replace(['\u{2018}', '\u{2019}'], "'")
      .replace(['\u{201C}', '\u{201D}'], "\"")
      .replace(['\u{2013}', '\u{2014}'], "-")
      .replace('\u{2026}', "...")
      .replace('\u{00A0}', " ")
      .replace(['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'], "");

   replaced.nfc().collect::<String>().trim().to_string()
}

fn copy_to_clipboard(text: &str) -> Result<()> {
   let mut clipboard = Clipboard::new().map_err(SuggestError::ClipboardError)?;
   clipboard.set_text(text).map_err(SuggestError::ClipboardError)?;
   Ok(())
}
