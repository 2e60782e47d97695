//! Chamber Codex - Entry Point
//!
//! Interactive terminal browser for trial chamber sessions. Loads the session
//! index, auto-selects the first session, and lets the user switch sessions
//! and levels.

use chamber_codex::core::config::CodexConfig;
use chamber_codex::core::error::Result;
use chamber_codex::session::SessionController;
use chamber_codex::source::{self, DocumentSource};
use chamber_codex::view::text::index_to_text;
use chamber_codex::view::{KeywordHighlighter, PlainText, TextMarkup};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

/// Trial chamber browser
#[derive(Parser, Debug)]
#[command(name = "chamber-codex")]
#[command(about = "Browse trial chamber sessions with derived HP/ATK/DEF")]
struct Args {
    /// TOML configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Base URL of a static host (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Local directory containing the trialchambers/ folder
    #[arg(long)]
    root: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,

    /// Wrap keywords and numbers in HTML spans
    #[arg(long)]
    highlight: bool,

    /// Print the first session at the given level and exit
    #[arg(long)]
    level: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chamber_codex=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;
    let json_output = args.format.eq_ignore_ascii_case("json");

    let markup: Box<dyn TextMarkup> = if config.highlight {
        Box::new(KeywordHighlighter)
    } else {
        Box::new(PlainText)
    };

    let rt = Runtime::new()?;
    let source = source::from_config(&config)?;
    let mut controller = SessionController::new(source, config);

    if let Err(e) = rt.block_on(controller.initialize()) {
        eprintln!("{}", e);
    }

    // One-shot mode
    if let Some(level) = &args.level {
        controller.select_level(level)?;
        print_current(&controller, markup.as_ref(), json_output)?;
        return Ok(());
    }

    println!("\n=== CHAMBER CODEX ===");
    println!();
    println!("Commands:");
    println!("  sessions / ls     - List sessions");
    println!("  session <n>       - Load session number n");
    println!("  level <n|lN>      - Show level n of the current session");
    println!("  show / s          - Show the current level again");
    println!("  reload            - Reload the session index");
    println!("  quit / q          - Exit");
    println!();
    println!("{}", index_to_text(controller.index()));
    print_current(&controller, markup.as_ref(), json_output)?;

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "sessions" || input == "ls" {
            println!("{}", index_to_text(controller.index()));
            continue;
        }

        if input == "show" || input == "s" {
            print_current(&controller, markup.as_ref(), json_output)?;
            continue;
        }

        if input == "reload" {
            if let Err(e) = rt.block_on(controller.reload_index()) {
                println!("{}", e);
            }
            println!("{}", index_to_text(controller.index()));
            continue;
        }

        if let Some(arg) = input.strip_prefix("session ") {
            let Ok(number) = arg.trim().parse::<i64>() else {
                println!("Usage: session <number>");
                continue;
            };
            let Some(descriptor) = controller.index().find(number).cloned() else {
                println!("No session {}", number);
                continue;
            };
            match rt.block_on(controller.select_session(&descriptor)) {
                Ok(_) => print_current(&controller, markup.as_ref(), json_output)?,
                Err(e) => println!("{}", e),
            }
            continue;
        }

        if let Some(arg) = input.strip_prefix("level ") {
            match controller.select_level(arg) {
                Ok(_) => print_current(&controller, markup.as_ref(), json_output)?,
                Err(e) => println!("{}", e),
            }
            continue;
        }

        println!("Unknown command. Available: sessions, session <n>, level <n>, show, reload, quit");
    }

    Ok(())
}

/// Config file first, then command-line overrides
fn build_config(args: &Args) -> Result<CodexConfig> {
    let mut config = match &args.config {
        Some(path) => CodexConfig::load(path)?,
        None => CodexConfig::default(),
    };
    if let Some(url) = &args.base_url {
        config.base_url = Some(url.clone());
    }
    if let Some(root) = &args.root {
        config.local_root = root.clone();
    }
    if args.highlight {
        config.highlight = true;
    }
    config.validate()?;
    Ok(config)
}

fn print_current<S: DocumentSource>(
    controller: &SessionController<S>,
    markup: &dyn TextMarkup,
    json_output: bool,
) -> Result<()> {
    if let Some(error) = controller.session_error() {
        println!("{}", error);
    }

    let Some(view) = controller.render(markup) else {
        match controller.index_error() {
            Some(error) => println!("No sessions ({})", error),
            None => println!("No session loaded"),
        }
        return Ok(());
    };

    if let Some(session) = controller.selected_session() {
        println!("--- {} ---", session);
    }
    if json_output {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", view);
    }
    Ok(())
}
