//! # Section Lookup CLI
//!
//! Interactive UC/UB section lookup in the terminal.
//!
//! ```text
//! section_cli                      # read-eval loop on stdin
//! section_cli uc 356x406x1299      # answer one query and exit
//! ```
//!
//! Data file locations come from the `SECTION_*` environment variables (see
//! `section_core::config`).

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use section_core::designation::SectionType;
use section_core::presentation::format_text;
use section_core::{LookupConfig, SectionLookup};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Quiet by default so the loop output stays readable; RUST_LOG overrides
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let config = LookupConfig::from_env()?;
    let lookup = SectionLookup::from_config(&config)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    tracing::debug!(policy = %lookup.policy(), one_shot = !args.is_empty(), "tables loaded");
    if !args.is_empty() {
        return Ok(answer_once(&lookup, &args.join(" ")));
    }

    interactive(&lookup)?;
    Ok(ExitCode::SUCCESS)
}

fn answer_once(lookup: &SectionLookup, query: &str) -> ExitCode {
    match lookup.lookup(query) {
        Ok(outcome) => {
            print!("{}", format_text(&outcome));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn interactive(lookup: &SectionLookup) -> io::Result<()> {
    let db = lookup.database();

    println!("Steel Section Lookup (UC/UB)");
    println!("============================");
    println!(
        "Loaded {} UC and {} UB sections",
        db.table(SectionType::UC).len(),
        db.table(SectionType::UB).len()
    );
    print_help();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("\n> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        if input.is_empty() {
            continue;
        }

        match Command::parse(input) {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::List(section_type, prefix) => list(lookup, section_type, &prefix),
            Command::Lookup => match lookup.lookup(input) {
                Ok(outcome) => print!("\n{}", format_text(&outcome)),
                Err(e) => println!("Error: {}", e),
            },
        }
    }

    Ok(())
}

fn list(lookup: &SectionLookup, section_type: SectionType, prefix: &str) {
    let table = lookup.database().table(section_type);
    let rows = table.search(prefix);

    if rows.is_empty() {
        println!("No {} sections match '{}'", section_type, prefix);
        return;
    }

    println!("{} ({}): {} sections", section_type.display_name(), section_type, rows.len());
    for chunk in rows.chunks(6) {
        let names: Vec<&str> = chunk.iter().map(|r| r.designation.as_str()).collect();
        println!("  {}", names.join("  "));
    }
}

fn print_help() {
    println!();
    println!("Format: 'uc 356x406', 'uc, 356x406x1299', 'ub,914x305x576'");
    println!("        'h 300x150x20x10' for a welded H section (D x B x T x t)");
    println!("Commands: 'list uc [prefix]', 'list ub [prefix]', 'help', 'quit'");
}

/// One line of interactive input
#[derive(Debug, PartialEq)]
enum Command {
    Quit,
    Help,
    List(SectionType, String),
    Lookup,
}

impl Command {
    fn parse(input: &str) -> Self {
        let mut words = input.split_whitespace();
        let first = words.next().unwrap_or("").to_ascii_lowercase();

        match first.as_str() {
            "quit" | "exit" | "q" => Command::Quit,
            "help" | "?" => Command::Help,
            "list" => match words.next().and_then(SectionType::from_tag) {
                Some(section_type) => Command::List(section_type, words.collect::<Vec<_>>().join("")),
                None => Command::Help,
            },
            _ => Command::Lookup,
        }
    }
}
