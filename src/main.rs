use std::process;

use clap::Parser;
use llm_commit::{
   config::AppConfig,
   console::DiffConsole,
   engines,
   error::{Result, SuggestError},
   flow::CommitFlow,
   style,
   types::Args,
};

/// Load config from args or the default location
fn load_config_from_args(args: &Args) -> Result<AppConfig> {
   if let Some(ref config_path) = args.config {
      AppConfig::from_file(config_path)
   } else {
      AppConfig::load()
   }
}

fn run(args: &Args) -> Result<i32> {
   let config = load_config_from_args(args)?;
   let engine = engines::create(args.engine, &args.model, &config)?;

   println!(
      "{} Using engine: {} with model: {}",
      style::icons::WRENCH,
      style::bold(engine.name()),
      style::model(engine.model())
   );

   let console = DiffConsole::new(args.icons);
   let flow = CommitFlow { engine: engine.as_ref(), console: &console, config: &config };
   flow.run(args)
}

fn main() {
   dotenvy::dotenv().ok();
   let args = Args::parse();

   match run(&args) {
      Ok(code) => process::exit(code),
      Err(SuggestError::Cancelled) => {
         println!("  {} Commit cancelled.", style::icons::CROSS_MARK);
         process::exit(0);
      },
      Err(e) => {
         eprintln!("{} {e}", style::error(style::icons::ERROR));
         process::exit(1);
      },
   }
}
