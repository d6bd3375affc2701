//! Console rendering of the filtered file lists and the selected message.
//!
//! Icon themes live as TOML files embedded in the binary. The emoji theme maps
//! straight to glyph strings; the nerd theme adds a named color per glyph.

use std::collections::HashMap;

use indexmap::IndexMap;
use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::{diff::ProcessedDiff, style, types::IconTheme};

/// Embedded icon themes and the gitmoji prefix table
#[derive(RustEmbed)]
#[folder = "icons/"]
struct IconAssets;

const FALLBACK_ICON: &str = "\u{1F4C4}";

/// One icon, either a bare glyph or a glyph plus a named color.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum IconSpec {
   Plain(String),
   Styled {
      icon:  String,
      #[serde(default)]
      color: Option<String>,
   },
}

impl IconSpec {
   fn icon(&self) -> &str {
      match self {
         Self::Plain(icon) | Self::Styled { icon, .. } => icon,
      }
   }

   fn color(&self) -> Option<&str> {
      match self {
         Self::Plain(_) => None,
         Self::Styled { color, .. } => color.as_deref(),
      }
   }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IconsFile {
   default:    Option<IconSpec>,
   extensions: HashMap<String, IconSpec>,
   filenames:  HashMap<String, IconSpec>,
}

/// Renders [`ProcessedDiff`] file lists and the selected commit message.
pub struct DiffConsole {
   icons: IconsFile,
}

impl DiffConsole {
   /// A theme that fails to load falls back to the default document icon for
   /// everything.
   pub fn new(theme: IconTheme) -> Self {
      let asset = match theme {
         IconTheme::Emoji => "emoji.toml",
         IconTheme::Nerd => "nerd.toml",
      };

      let icons = IconAssets::get(asset)
         .and_then(|file| String::from_utf8(file.data.into_owned()).ok())
         .and_then(|contents| toml::from_str(&contents).ok())
         .unwrap_or_default();

      Self { icons }
   }

   /// Lookup precedence: exact filename, then extension, then theme default.
   fn icon_for(&self, file_path: &str) -> String {
      let path = file_path.replace('\\', "/");
      let filename = path.rsplit('/').next().unwrap_or(&path);
      // Dotfiles like ".gitignore" have no extension
      let suffix = filename
         .rfind('.')
         .filter(|&i| i > 0)
         .map_or("", |i| &filename[i..]);

      let entry = self
         .icons
         .filenames
         .get(filename)
         .or_else(|| self.icons.extensions.get(suffix))
         .or(self.icons.default.as_ref());

      match entry {
         Some(spec) => match spec.color() {
            Some(color) => style::paint(color, spec.icon()),
            None => spec.icon().to_string(),
         },
         None => FALLBACK_ICON.to_string(),
      }
   }

   /// Print the included/excluded file lists, excluded paths dimmed.
   pub fn print_diff_files(&self, files: &ProcessedDiff) {
      println!();
      println!("{} Included in the engine input", style::icons::ROBOT);

      if files.included.is_empty() {
         println!("  {}", style::dim("(none)"));
      } else {
         for file in &files.included {
            println!("  {} {file}", self.icon_for(file));
         }
      }

      if !files.excluded.is_empty() {
         println!();
         println!("{} Excluded from the engine input", style::icons::BLOCKED);
         for file in &files.excluded {
            println!("  {} {}", self.icon_for(file), style::dim(file));
         }
      }

      println!();
   }

   pub fn print_selected_message(&self, message: &str) {
      let width = style::term_width().min(60);
      println!();
      println!("{}", style::separator(width));
      println!("{}", style::bold("Selected commit message:"));
      println!("  {message}");
      println!("{}", style::separator(width));
   }
}

/// Ordered gitmoji prefix table (prefix → emoji). An unreadable asset yields
/// an empty table, which disables the prefix-editing step.
pub fn load_gitmoji() -> IndexMap<String, String> {
   IconAssets::get("gitmoji.toml")
      .and_then(|file| String::from_utf8(file.data.into_owned()).ok())
      .and_then(|contents| toml::from_str(&contents).ok())
      .unwrap_or_default()
}

#[cfg(test)]
mod tests {
   use super::*;

   fn console_with(icons: IconsFile) -> DiffConsole {
      DiffConsole { icons }
   }

   #[test]
   fn test_icon_filename_beats_extension() {
      let mut extensions = HashMap::new();
      extensions.insert(".rs".to_string(), IconSpec::Plain("ext".to_string()));
      let mut filenames = HashMap::new();
      filenames.insert("main.rs".to_string(), IconSpec::Plain("file".to_string()));

      let console = console_with(IconsFile {
         default: Some(IconSpec::Plain("def".to_string())),
         extensions,
         filenames,
      });

      assert_eq!(console.icon_for("src/main.rs"), "file");
      assert_eq!(console.icon_for("src/lib.rs"), "ext");
      assert_eq!(console.icon_for("data.csv"), "def");
   }

   #[test]
   fn test_icon_dotfile_has_no_extension() {
      let mut extensions = HashMap::new();
      extensions.insert(".gitignore".to_string(), IconSpec::Plain("ext".to_string()));

      let console = console_with(IconsFile {
         default: Some(IconSpec::Plain("def".to_string())),
         extensions,
         filenames: HashMap::new(),
      });

      // ".gitignore" is a bare dotfile, not a file with extension ".gitignore"
      assert_eq!(console.icon_for(".gitignore"), "def");
   }

   #[test]
   fn test_icon_missing_everything_falls_back() {
      let console = console_with(IconsFile::default());
      assert_eq!(console.icon_for("whatever.xyz"), FALLBACK_ICON);
   }

   #[test]
   fn test_embedded_themes_parse() {
      for theme in [IconTheme::Emoji, IconTheme::Nerd] {
         let console = DiffConsole::new(theme);
         assert!(console.icons.default.is_some(), "{theme:?} theme should carry a default icon");
      }
   }

   #[test]
   fn test_gitmoji_table_is_ordered() {
      let gitmoji = load_gitmoji();
      assert!(!gitmoji.is_empty());
      let first = gitmoji.keys().next().unwrap();
      assert_eq!(first, "feat");
      assert_eq!(gitmoji.get("fix").map(String::as_str), Some("\u{1F41B}"));
   }

   #[test]
   fn test_backslash_paths_use_basename() {
      let mut filenames = HashMap::new();
      filenames.insert("index.js".to_string(), IconSpec::Plain("file".to_string()));

      let console = console_with(IconsFile {
         default: Some(IconSpec::Plain("def".to_string())),
         extensions: HashMap::new(),
         filenames,
      });

      assert_eq!(console.icon_for(r"src\web\index.js"), "file");
   }
}
