//! calcpad: run keypad calculator key scripts from the command line.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use calcpad::calculator::{Calculator, Locale, copy_to_clipboard};
use calcpad::config::Config;
use calcpad::input::parse_script;
use calcpad::view::DisplayView;

#[derive(Parser)]
#[command(name = "calcpad")]
#[command(version, about = "Keypad calculator with chained operations and a memory log")]
struct Cli {
    /// Keys to press, e.g. `3 + 4 + 5 =`. Reads scripts from stdin when empty.
    #[arg(allow_hyphen_values = true)]
    keys: Vec<String>,

    /// Print the display as JSON
    #[arg(long)]
    json: bool,

    /// Also print completed calculations
    #[arg(long)]
    tape: bool,

    /// Copy the final display to the clipboard
    #[arg(long)]
    copy: bool,

    /// Display language
    #[arg(short, long, value_enum)]
    locale: Option<Locale>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }

    let mut calc = config.build_calculator();

    if cli.keys.is_empty() {
        run_interactive(&mut calc, &cli, &config)?;
    } else {
        let script = cli.keys.join(" ");
        press(&mut calc, &script)?;
        print_view(&calc, &cli, &config)?;
    }

    if cli.copy {
        copy_to_clipboard(calc.current_display())?;
    }

    Ok(())
}

/// Read one key script per line, printing the display after each.
fn run_interactive(calc: &mut Calculator, cli: &Cli, config: &Config) -> Result<()> {
    let stdin = io::stdin();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        match press(calc, &line) {
            Ok(()) => print_view(calc, cli, config)?,
            Err(err) => eprintln!("{err:#}"),
        }
    }

    Ok(())
}

fn press(calc: &mut Calculator, script: &str) -> Result<()> {
    let actions = parse_script(script).with_context(|| format!("Invalid key script {script:?}"))?;
    for action in actions {
        calc.dispatch(action);
    }
    Ok(())
}

fn print_view(calc: &Calculator, cli: &Cli, config: &Config) -> Result<()> {
    let mut view = DisplayView::capture(calc);
    if cli.tape {
        view = view.with_tape(calc);
    }

    let mut out = io::stdout().lock();

    if cli.json {
        serde_json::to_writer(&mut out, &view)?;
        writeln!(out)?;
        return Ok(());
    }

    for entry in &view.tape {
        writeln!(out, "{} {}", entry.expression, entry.result)?;
    }
    if config.show_history {
        writeln!(out, "{}", view.history)?;
    }
    if view.memory.is_empty() {
        writeln!(out, "{}", view.display)?;
    } else {
        writeln!(out, "{}  [{}]", view.display, view.memory_badges())?;
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the default level.
fn setup_logging(debug: bool) {
    let default = if debug { "calcpad=debug" } else { "calcpad=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
