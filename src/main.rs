use clap::{Parser as ClapParser, Subcommand};
use ognl_parser::cli::{self, CheckOptions, CheckResult, CliError, OutputFormat};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "ognl")]
#[command(about = "ognl - Parse OGNL expressions into canonical syntax trees")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an expression and print its tree
    Parse {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,

        /// Print the tree as JSON
        #[arg(short, long)]
        json: bool,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Only validate an expression's syntax
    Check {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,
    },

    /// Print the lexer's token stream
    Tokens {
        /// The expression (reads from stdin if not provided)
        expression: Option<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            expression,
            json,
            pretty,
        } => {
            let format = match (json, pretty) {
                (false, _) => OutputFormat::Tree,
                (true, false) => OutputFormat::Json,
                (true, true) => OutputFormat::JsonPretty,
            };
            run_check(expression, format, false)
        }
        Commands::Check { expression } => run_check(expression, OutputFormat::Tree, true),
        Commands::Tokens { expression } => run_tokens(expression),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_expression(expression: Option<String>) -> Result<String, CliError> {
    match expression {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(expression: Option<String>, format: OutputFormat, syntax_only: bool) -> Result<(), CliError> {
    let options = CheckOptions {
        expression: read_expression(expression)?,
        format,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Rendered(output) => println!("{}", output.trim_end()),
    }
    Ok(())
}

fn run_tokens(expression: Option<String>) -> Result<(), CliError> {
    let source = read_expression(expression)?;
    let (lines, has_errors) = cli::execute_tokens(&source);

    for line in lines {
        println!("{}", line);
    }
    if has_errors {
        std::process::exit(1);
    }
    Ok(())
}
