use std::fs;
use std::path::{Path, PathBuf};

use arith_expr::{Error, Lexer};
use clap::ArgAction;
use clap::Parser;
use clap::Subcommand;
use miette::IntoDiagnostic;
use miette::NamedSource;
use miette::WrapErr;
use miette::miette;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;

const EXIT_PARSE_ERROR: i32 = 65;
const EXIT_EVAL_ERROR: i32 = 70;

#[derive(Parser, Debug)]
#[command(version, about = "Parse and evaluate arithmetic expressions")]
struct Args {
    /// Log more; repeat for trace output
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print every token of the expression in the file
    Tokenize { filename: PathBuf },
    /// Print the syntax tree of the expression in the file
    Parse { filename: PathBuf },
    /// Print the value of the expression in the file, or of `--expr`
    Evaluate {
        #[arg(required_unless_present = "expr")]
        filename: Option<PathBuf>,
        #[arg(short, long, conflicts_with = "filename")]
        expr: Option<String>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(filename: &Path) -> miette::Result<String> {
    fs::read_to_string(filename)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading `{}` failed", filename.display()))
}

/// Renders `error` against the source it came from and exits.
fn fail(error: Error, name: &str, source: String) -> ! {
    let code = match error {
        Error::Parse(_) => EXIT_PARSE_ERROR,
        Error::Eval(_) => EXIT_EVAL_ERROR,
    };
    let report = miette::Report::new(error).with_source_code(NamedSource::new(name, source));
    eprintln!("{report:?}");
    std::process::exit(code);
}

fn main() -> miette::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Commands::Tokenize { filename } => {
            let file_contents = read_source(&filename)?;
            let name = filename.display().to_string();

            for token in Lexer::new(&file_contents) {
                match token {
                    Ok(token) => println!("{token}"),
                    Err(e) => fail(e.into(), &name, file_contents.clone()),
                }
            }
        }
        Commands::Parse { filename } => {
            let file_contents = read_source(&filename)?;
            let name = filename.display().to_string();

            match arith_expr::parse(&file_contents) {
                Ok(tree) => println!("{tree}"),
                Err(e) => fail(e.into(), &name, file_contents),
            }
        }
        Commands::Evaluate { filename, expr } => {
            let (name, source) = match expr {
                Some(expr) => ("<input>".to_string(), expr),
                None => {
                    let filename = filename.ok_or_else(|| miette!("no expression given"))?;
                    let source = read_source(&filename)?;
                    (filename.display().to_string(), source)
                }
            };
            debug!(%name, "evaluating");

            match arith_expr::eval_str(&source) {
                Ok(value) => println!("{value}"),
                Err(e) => fail(e, &name, source),
            }
        }
    }
    Ok(())
}
