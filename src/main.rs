//! CLI tool to validate and inspect `.env` files.

use std::fs;
use std::process::ExitCode;

use envtree::{Scanner, TokenKind};

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        eprintln!("Usage: envtree <command> [files...]");
        eprintln!();
        eprintln!("Commands:");
        eprintln!("  validate  Check if .env file(s) are valid");
        eprintln!("  dump      Print the resolved NAME=value pairs");
        eprintln!("  tokens    Print the token stream");
        eprintln!();
        eprintln!("Examples:");
        eprintln!("  envtree validate .env");
        eprintln!("  envtree dump .env .env.local");
        eprintln!("  RUST_LOG=envtree=trace envtree tokens .env");
        return ExitCode::from(2);
    }

    let command = args[1].as_str();
    let files = &args[2..];

    if !matches!(command, "validate" | "dump" | "tokens") {
        eprintln!("Unknown command: {command}");
        return ExitCode::from(2);
    }

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in files {
        let content = match fs::read(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        let result = match command {
            "validate" => validate(path, &content),
            "dump" => dump(&content),
            _ => tokens(&content),
        };

        if let Err(e) = result {
            eprintln!("{path}: {e}");
            had_error = true;
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn validate(path: &str, content: &[u8]) -> Result<(), envtree::Error> {
    let source = std::str::from_utf8(content).map_err(envtree::EncodingError::from)?;
    let file = envtree::parse(source)?;
    let assignments = file.assignments().count();
    let comments = file.comments().count();
    eprintln!("{path}: valid ({assignments} assignment(s), {comments} comment(s))");
    Ok(())
}

fn dump(content: &[u8]) -> Result<(), envtree::Error> {
    for (name, value) in &envtree::parse_bytes(content)? {
        println!("{name}={value}");
    }
    Ok(())
}

fn tokens(content: &[u8]) -> Result<(), envtree::Error> {
    let source = std::str::from_utf8(content).map_err(envtree::EncodingError::from)?;
    let mut scanner = Scanner::new(source)?;
    loop {
        let token = scanner.next_token();
        println!(
            "{}:{} {} {:?}",
            token.offset, token.length, token.kind, token.literal
        );
        if token.kind == TokenKind::EndOfInput {
            return Ok(());
        }
    }
}

/// Log to stderr, but only when `RUST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}
