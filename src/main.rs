//! CLI driver: reads a source file, interprets it, and prints every
//! `show` statement's result to standard output.

use std::{fs, io::Write, path::PathBuf, process::ExitCode};

use clap::Parser;

use formrw::logger::{LogLevel, log_error, set_log_level};
use formrw::{eval, lexer, parser};

#[derive(Parser)]
#[command(about = "Interpret a rewrite-language source file")]
struct Cli {
    /// Source file to interpret.
    path: PathBuf,

    /// Raise the log level. Pass once for warnings, twice for debug
    /// output; by default only errors are logged.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    set_log_level(match cli.verbose {
        0 => LogLevel::Error,
        1 => LogLevel::Warning,
        _ => LogLevel::Debug,
    });

    let source = match fs::read_to_string(&cli.path) {
        Ok(source) => source,
        Err(err) => {
            log_error(format!("cannot read `{}`: {err}", cli.path.display()));
            return ExitCode::FAILURE;
        }
    };

    let source_lines = lexer::source_lines(&source);
    let stdout = std::io::stdout();

    let result = lexer::Lexer::new(&source, &source_lines)
        .tokenize()
        .and_then(|tokens| parser::Parser::new(tokens, &source_lines).parse_program())
        .and_then(|stmts| {
            eval::interpret_program_streaming(&stmts, &source_lines, &mut |line| {
                let mut handle = stdout.lock();
                let _ = writeln!(handle, "{line}");
            })
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_error(err.to_string());
            ExitCode::FAILURE
        }
    }
}
