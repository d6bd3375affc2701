//! Terminal styling utilities for consistent CLI output.
//!
//! Respects `NO_COLOR` environment variable and terminal capabilities.

use std::{
   io::{self, Write},
   sync::{OnceLock, mpsc},
   thread,
   time::Duration,
};

use owo_colors::OwoColorize;

/// Whether color output is enabled (cached on first call).
static COLOR_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if colors should be used.
pub fn colors_enabled() -> bool {
   *COLOR_ENABLED.get_or_init(|| {
      // NO_COLOR takes precedence (https://no-color.org/)
      if std::env::var("NO_COLOR").is_ok() {
         return false;
      }
      // Check if stdout is a terminal and supports color
      supports_color::on(supports_color::Stream::Stdout).is_some_and(|level| level.has_basic)
   })
}

// === Color Palette ===

/// Success: checkmarks, completed actions (green + bold).
pub fn success(s: &str) -> String {
   if colors_enabled() {
      s.green().bold().to_string()
   } else {
      s.to_string()
   }
}

/// Error: failures, hard errors (red + bold).
pub fn error(s: &str) -> String {
   if colors_enabled() {
      s.red().bold().to_string()
   } else {
      s.to_string()
   }
}

/// Dim: less important details, excluded file paths.
pub fn dim(s: &str) -> String {
   if colors_enabled() {
      s.dimmed().to_string()
   } else {
      s.to_string()
   }
}

/// Bold: headers, key values.
pub fn bold(s: &str) -> String {
   if colors_enabled() {
      s.bold().to_string()
   } else {
      s.to_string()
   }
}

/// Model/engine name styling (magenta).
pub fn model(s: &str) -> String {
   if colors_enabled() {
      s.magenta().to_string()
   } else {
      s.to_string()
   }
}

/// Paint `s` with a color referenced by name in an icon theme. Unknown names
/// leave the text unstyled.
pub fn paint(color: &str, s: &str) -> String {
   if !colors_enabled() {
      return s.to_string();
   }

   match color {
      "black" => s.black().to_string(),
      "red" => s.red().to_string(),
      "green" => s.green().to_string(),
      "yellow" => s.yellow().to_string(),
      "blue" => s.blue().to_string(),
      "magenta" => s.magenta().to_string(),
      "cyan" => s.cyan().to_string(),
      "gray" | "grey" => s.bright_black().to_string(),
      _ => s.to_string(),
   }
}

/// Get terminal width, capped at 120 columns.
pub fn term_width() -> usize {
   terminal_size::terminal_size()
      .map_or(80, |(w, _)| w.0 as usize)
      .min(120)
}

/// Horizontal separator line.
pub fn separator(width: usize) -> String {
   let line = "\u{2500}".repeat(width);
   if colors_enabled() { dim(&line) } else { line }
}

// === Status Icons ===

pub mod icons {
   pub const SUCCESS: &str = "\u{2713}";
   pub const ERROR: &str = "\u{2717}";
   pub const ROBOT: &str = "\u{1F916}";
   pub const BLOCKED: &str = "\u{1F6AB}";
   pub const WRENCH: &str = "\u{1F527}";
   pub const CRYSTAL_BALL: &str = "\u{1F52E}";
   pub const PENCIL: &str = "\u{270F}\u{FE0F}";
   pub const CLIPBOARD: &str = "\u{1F4CB}";
   pub const CROSS_MARK: &str = "\u{274C}";
}

// === Spinner ===

const SPINNER_FRAMES: &[char] = &[
   '\u{280B}', '\u{2819}', '\u{2839}', '\u{2838}', '\u{283C}', '\u{2834}', '\u{2826}', '\u{2827}',
   '\u{2807}', '\u{280F}',
];

/// Animated progress indicator bound to the lifetime of one blocking call.
///
/// The animation runs on a background thread. [`Spinner::finish`] stops it and
/// prints a status line; dropping the guard without calling `finish` (early
/// return, panic unwind) stops the thread and clears the line instead, so the
/// terminal is never left with a dangling frame.
pub struct Spinner {
   tx:     Option<mpsc::Sender<bool>>,
   handle: Option<thread::JoinHandle<()>>,
}

impl Spinner {
   /// Start the animation. Falls back to a plain printed line when the output
   /// is not a color-capable terminal.
   pub fn start(message: &str) -> Self {
      if !colors_enabled() {
         println!("{message}");
         return Self { tx: None, handle: None };
      }

      let (tx, rx) = mpsc::channel::<bool>();
      let msg = message.to_string();

      let handle = thread::spawn(move || {
         let mut idx = 0;
         loop {
            match rx.try_recv() {
               Ok(succeeded) => {
                  let icon = if succeeded {
                     icons::SUCCESS.green().to_string()
                  } else {
                     icons::ERROR.red().to_string()
                  };
                  print!("\r\x1b[K{icon} {msg}\n");
                  io::stdout().flush().ok();
                  break;
               },
               Err(mpsc::TryRecvError::Disconnected) => {
                  // Guard dropped without finish: just clear the line
                  print!("\r\x1b[K");
                  io::stdout().flush().ok();
                  break;
               },
               Err(mpsc::TryRecvError::Empty) => {},
            }
            print!("\r{} {}", SPINNER_FRAMES[idx].cyan(), msg);
            io::stdout().flush().ok();
            idx = (idx + 1) % SPINNER_FRAMES.len();
            thread::sleep(Duration::from_millis(80));
         }
      });

      Self { tx: Some(tx), handle: Some(handle) }
   }

   /// Stop the animation and print a ✓/✗ status line.
   pub fn finish(mut self, succeeded: bool) {
      if let Some(tx) = self.tx.take() {
         tx.send(succeeded).ok();
      }
      if let Some(handle) = self.handle.take() {
         handle.join().ok();
      }
   }
}

impl Drop for Spinner {
   fn drop(&mut self) {
      // Disconnecting the channel tells the thread to clear the line
      drop(self.tx.take());
      if let Some(handle) = self.handle.take() {
         handle.join().ok();
      }
   }
}
