use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use churnwatch::session::{fields_help, INTRO, TITLE};
use churnwatch::{form_from_json, ArtifactPaths, ChurnService, FormSession, ServiceConfig, SubmissionOutcome};
use churnwatch_schema::FIELD_SPECS;
use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(
    name = "churnwatch",
    version,
    about = "Predictive Customer Exit Monitor: score a customer's churn risk",
    long_about = "churnwatch validates a customer's account details and asks a fitted\n\
        preprocessor and classifier whether the customer is likely to churn.\n\n\
        EXAMPLES:\n\
        \n  churnwatch form                          Fill in the form interactively\n\
        \n  churnwatch predict customer.json         Score a customer from a JSON file\n\
        \n  cat customer.json | churnwatch predict --format text\n\
        \n  churnwatch schema                        List fields and accepted values"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Fitted classifier artifact (JSON)
    #[arg(long, value_name = "FILE", global = true)]
    model: Option<PathBuf>,

    /// Fitted preprocessor artifact (JSON)
    #[arg(long, value_name = "FILE", global = true)]
    preprocessor: Option<PathBuf>,

    /// Config file (defaults to ./churnwatch.toml when present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fill in the customer form interactively (default)
    Form,
    /// Score one customer given as a JSON object
    Predict(PredictArgs),
    /// Print the form's fields and their accepted values
    Schema(SchemaArgs),
}

#[derive(Debug, Args)]
struct PredictArgs {
    /// JSON input file; reads stdin when omitted
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct SchemaArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .try_init();
}

fn read_input(input: &Option<PathBuf>) -> Result<String, String> {
    if let Some(path) = input {
        fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {e}", path.display()))
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read from stdin: {e}"))?;
        Ok(buf)
    }
}

fn load_service(cli: &Cli) -> Result<ChurnService, i32> {
    let overrides = ArtifactPaths {
        model: cli.model.clone(),
        preprocessor: cli.preprocessor.clone(),
    };
    let config = ServiceConfig::resolve(&overrides, cli.config.as_deref()).map_err(|e| {
        log::error!("{e}");
        eprintln!("error: {e}");
        2
    })?;
    log::info!(
        "loading artifacts model={} preprocessor={}",
        config.model_path.display(),
        config.preprocessor_path.display()
    );
    ChurnService::load(&config).map_err(|e| {
        log::error!("failed to load artifacts: {e}");
        eprintln!("error: failed to load artifacts: {e}");
        2
    })
}

fn outcome_code(outcome: &SubmissionOutcome) -> i32 {
    match outcome {
        SubmissionOutcome::Predicted(_) => 0,
        SubmissionOutcome::Invalid(_) => 1,
        SubmissionOutcome::InferenceFailed(_) => 2,
    }
}

fn run_form(service: &ChurnService) -> i32 {
    use rustyline::error::ReadlineError;
    use rustyline::Editor;
    let mut rl = match Editor::<(), rustyline::history::DefaultHistory>::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: failed to initialize form: {e}");
            return 2;
        }
    };

    println!("{TITLE}");
    println!("{INTRO}");
    println!("Type :help for commands, :fields for accepted values.");

    let mut session = FormSession::new(service);
    loop {
        match rl.readline(session.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(trimmed);
                }
                let (out, exit) = session.handle_line(&line);
                for l in out {
                    println!("{l}");
                }
                if exit {
                    return 0;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return 0,
            Err(e) => {
                eprintln!("error: form input failed: {e}");
                return 2;
            }
        }
    }
}

fn run_predict(service: &ChurnService, args: &PredictArgs) -> i32 {
    let text = match read_input(&args.input) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    let form = match form_from_json(&text) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };

    let outcome = service.submit(&form);
    match args.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&outcome.report()) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("error: failed to serialize result: {e}");
                return 2;
            }
        },
        OutputFormat::Text => match &outcome {
            SubmissionOutcome::Predicted(p) => println!("{}", p.category),
            SubmissionOutcome::Invalid(e) => {
                eprintln!("error: {e}");
                let names: Vec<&str> = e.fields().iter().map(|k| k.as_str()).collect();
                eprintln!("fields: {}", names.join(", "));
            }
            SubmissionOutcome::InferenceFailed(e) => eprintln!("inference error: {e}"),
        },
    }
    outcome_code(&outcome)
}

fn run_schema(args: &SchemaArgs) -> i32 {
    match args.format {
        OutputFormat::Text => {
            for line in fields_help() {
                println!("{line}");
            }
            0
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&FIELD_SPECS) {
            Ok(s) => {
                println!("{s}");
                0
            }
            Err(e) => {
                eprintln!("error: failed to serialize schema: {e}");
                2
            }
        },
    }
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Command::Schema(ref args)) => run_schema(args),
        Some(Command::Predict(ref args)) => match load_service(&cli) {
            Ok(service) => run_predict(&service, args),
            Err(rc) => rc,
        },
        Some(Command::Form) | None => match load_service(&cli) {
            Ok(service) => run_form(&service),
            Err(rc) => rc,
        },
    }
}

fn main() {
    std::process::exit(run_cli());
}
