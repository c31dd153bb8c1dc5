use std::io;
use std::process::ExitCode;

use clap::Parser;
use jsoncmd::cli::{self, parse_wrapper_args, wants_help};
use jsoncmd::errors::exit_codes;
use tracing::Level;

/// Query JSON documents with dotted paths, indexes, expansions and filters.
#[derive(Parser, Debug)]
#[command(author, version, about, disable_help_flag = true)]
struct Args {
    /// Log to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Paths and wrapper options, e.g. `a.b,c[] /f data.json` or `/compare left,right`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    words: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    if wants_help(&args.words) {
        println!("{}", cli::HELP);
        return ExitCode::from(exit_codes::USAGE);
    }
    if args.words.is_empty() {
        println!("{}", cli::USAGE);
        return ExitCode::from(exit_codes::USAGE);
    }

    let invocation = parse_wrapper_args(&args.words);
    let stdout = io::stdout();
    match jsoncmd::run(&invocation, &mut stdout.lock()) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
