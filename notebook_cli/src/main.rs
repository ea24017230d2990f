//! Interactive notebook console.
//!
//! Reads one command per line from stdin and prints the result. Logs go to
//! stderr, filtered by `RUST_LOG` (default `warn`).

use clap::Parser;
use notebook_cli::{bootstrap, parse_command, Response};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "notebook")]
#[command(about = "Build and validate models of a double theory, one cell at a time")]
struct Args {
    /// Theory to edit under, overriding the profile setting
    #[arg(short, long)]
    theory: Option<String>,

    /// Settings profile
    #[arg(short, long, default_value = "default")]
    profile: String,

    /// Settings overrides file
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Notebook to open
    notebook: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let mut session = match bootstrap(
        args.settings.as_deref(),
        &args.profile,
        args.theory.as_deref(),
    ) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = &args.notebook {
        let load = parse_command(&format!("load {}", path.display()))
            .and_then(|command| session.execute(command));
        if let Err(err) = load {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let _ = write!(stdout, "> ");
    let _ = stdout.flush();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        if !line.trim().is_empty() {
            match parse_command(&line).and_then(|command| session.execute(command)) {
                Ok(Response::Text(text)) => println!("{}", text),
                Ok(Response::Quit) => break,
                Err(err) => println!("error: {}", err),
            }
        }
        let _ = write!(stdout, "> ");
        let _ = stdout.flush();
    }

    ExitCode::SUCCESS
}
