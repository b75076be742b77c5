//! Drive an IME session from the terminal.
//!
//! Usage:
//!   cargo run -p ime_repl -- repl
//!   cargo run -p ime_repl -- --config ime.toml repl
//!   cargo run -p ime_repl -- lookup ni
//!   cargo run -p ime_repl -- check data/zh_cn_pinyin.json
//!
//! In the REPL each input line is a sequence of keys: letters type, digits
//! select from the current page, `-` is backspace, `.` is Enter, a space
//! commits the highlighted candidate, `<` and `>` page through candidates.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use syllable_ime_core::{
    CandidateSurface, Dictionary, ImeConfig, ImeSession, KeyEvent, KeyResult, TextField,
    TextTarget,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ime_repl")]
#[command(about = "Type syllables, pick candidates, inspect dictionaries")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Dictionary document (overrides the config file)
    #[arg(short, long, global = true)]
    dict: Option<PathBuf>,

    /// Log session activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive typing session
    Repl,
    /// Print the candidates for one key
    Lookup { key: String },
    /// Validate a dictionary document and print statistics
    Check { path: PathBuf },
}

/// Prints the candidate page as a numbered row, like a panel above the
/// keyboard.
#[derive(Debug, Default)]
struct TerminalSurface {
    row: String,
}

impl CandidateSurface for TerminalSurface {
    fn show(&mut self, candidates: &[String]) {
        self.row = candidates
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}.{}", i + 1, c))
            .collect::<Vec<_>>()
            .join("  ");
    }

    fn clear(&mut self) {
        self.row.clear();
    }

    fn release(&mut self) {
        self.row.clear();
        info!("candidate panel released");
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> anyhow::Result<ImeConfig> {
    let mut config = match &cli.config {
        Some(path) => ImeConfig::load_toml(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ImeConfig::default(),
    };
    if let Some(dict) = &cli.dict {
        config.dictionary = Some(dict.clone());
    }
    Ok(config)
}

fn key_for(ch: char) -> KeyEvent {
    match ch {
        '-' => KeyEvent::Backspace,
        '.' => KeyEvent::Enter,
        '<' => KeyEvent::PageUp,
        '>' => KeyEvent::PageDown,
        c => KeyEvent::from_char(c),
    }
}

fn run_repl(config: ImeConfig) -> anyhow::Result<()> {
    let mut session = ImeSession::from_config(config, TerminalSurface::default())?;
    let mut field = TextField::new();

    println!("Type syllables (e.g. 'ni' then '1'). '-' backspace, '.' enter, '<'/'>' page.");
    println!("Ctrl-D to exit.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        for ch in line.chars() {
            let key = key_for(ch);
            match key {
                KeyEvent::Letter(c) => field.push(c),
                KeyEvent::Enter => field.push('\n'),
                KeyEvent::Backspace => field.delete_chars(1),
                _ => {}
            }
            if let KeyResult::Committed(action) = session.process_key(key)? {
                action.apply(&mut field);
            }
        }
        writeln!(stdout, "text:      {}", field.text().replace('\n', "⏎"))?;
        writeln!(stdout, "syllable:  {}", session.value())?;
        let row = &session.surface().row;
        if !row.is_empty() {
            let list = session.candidates();
            writeln!(
                stdout,
                "candidates [{}/{}]: {}",
                list.current_page() + 1,
                list.num_pages(),
                row
            )?;
        }
        stdout.flush()?;
    }

    session.teardown()?;
    Ok(())
}

fn run_lookup(config: ImeConfig, key: &str) -> anyhow::Result<()> {
    let session = ImeSession::from_config(config, TerminalSurface::default())?;
    let candidates = session.engine()?.lookup(key);
    if candidates.is_empty() {
        println!("(no candidates for '{}')", key);
    } else {
        for (i, c) in candidates.iter().enumerate() {
            println!("{}. {}", i + 1, c);
        }
    }
    Ok(())
}

fn run_check(path: &Path) -> anyhow::Result<()> {
    let dict = Dictionary::load_json(path)?;
    println!("✓ {} is a valid dictionary", path.display());
    println!("  keys:       {}", dict.len());
    println!("  candidates: {}", dict.candidate_count());
    let empty: Vec<&str> = dict
        .keys()
        .into_iter()
        .filter(|k| dict.get_exact(k).is_some_and(|c| c.is_empty()))
        .collect();
    if !empty.is_empty() {
        println!("  ⚠ keys with no candidates: {}", empty.join(", "));
    }
    let unreachable: Vec<&str> = dict
        .keys()
        .into_iter()
        .filter(|k| k.is_empty() || !k.chars().all(|c| c.is_ascii_alphabetic()))
        .collect();
    if !unreachable.is_empty() {
        println!("  ⚠ keys that cannot be typed: {}", unreachable.join(", "));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Repl => run_repl(load_config(&cli)?),
        Commands::Lookup { key } => run_lookup(load_config(&cli)?, key),
        Commands::Check { path } => run_check(path),
    }
}
