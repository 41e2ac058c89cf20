use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::{debug, info};
use oncoscan_model::{ClassifierError, FormInput, ReferenceDataset, TumorClassifier};
use thiserror::Error;

mod config;
mod form_io;
mod render;

use config::{Config, ConfigError};
use form_io::FormError;
use render::OutputMode;

const EXIT_OK: i32 = 0;
const EXIT_INVALID_INPUT: i32 = 1;
const EXIT_STARTUP: i32 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "oncoscan",
    version,
    about = "Classify a breast tumor as benign or malignant from 30 measurement features",
    long_about = "oncoscan scores breast tumor measurements with a logistic-regression model.\n\n\
        The 30 features (mean, standard error and worst values of ten cell-nucleus\n\
        measurements) are min-max normalized against a reference dataset, then\n\
        p = sigmoid(w.x + b) is computed. p > 0.5 is reported as malignant; the\n\
        confidence score is p as a percentage.\n\n\
        EXAMPLES:\n\
        \n  oncoscan predict --set radius_mean=17.99 --set area_mean=1001\n\
        \n  oncoscan predict --input tumor.toml --json\n\
        \n  oncoscan form                          Fill the 30 fields interactively\n\
        \n  oncoscan --model m.json --data wdbc.csv evaluate\n\
        \n  oncoscan describe                      Explain each feature",
    after_help = "Model file: JSON with \"weight\" (30 numbers) and \"bias\".\n\
        Reference dataset: CSV with id, diagnosis and the 30 feature columns."
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./oncoscan.toml if present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Model parameters file (default: model.json)
    #[arg(long, value_name = "FILE", global = true)]
    model: Option<PathBuf>,

    /// Reference dataset used for normalization bounds (default: data.csv)
    #[arg(long = "data", value_name = "FILE", global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify one set of feature values
    #[command(
        about = "Classify one set of feature values",
        long_about = "Fills the form from defaults (every field 0.0), then an optional TOML\n\
            input file, then --set overrides, and classifies it.\n\n\
            A non-numeric field stops the run with a warning naming the field."
    )]
    Predict(PredictArgs),

    /// Enter the 30 fields one by one
    #[command(
        about = "Enter the feature values interactively",
        long_about = "Prompts for each feature in dataset order. An empty answer keeps the\n\
            default 0.0; a non-numeric answer stops the run."
    )]
    Form(OutputArgs),

    /// Describe the input features
    Describe,

    /// Show the per-feature normalization bounds
    Bounds(OutputArgs),

    /// Score the reference dataset against its labels
    Evaluate(OutputArgs),
}

#[derive(Debug, Args, Clone, Default)]
struct OutputArgs {
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args, Clone)]
struct PredictArgs {
    /// Set one field, e.g. --set "concave points_mean=0.147"
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = form_io::parse_assignment)]
    set: Vec<(String, String)>,

    /// TOML file of `name = value` entries
    #[arg(long = "input", value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

#[derive(Debug, Error)]
enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
}

/// Model and bounds, loaded once per process
struct Session {
    classifier: TumorClassifier,
    dataset: ReferenceDataset,
    json_default: bool,
}

impl Session {
    fn open(cli: &Cli) -> Result<Self, SessionError> {
        let config = Config::discover(cli.config.as_deref())?;
        let model_path = config.model_path(cli.model.as_deref());
        let dataset_path = config.dataset_path(cli.data.as_deref());
        debug!(
            "model: {}, dataset: {}",
            model_path.display(),
            dataset_path.display()
        );
        let (classifier, dataset) = TumorClassifier::load(&model_path, &dataset_path)?;
        Ok(Self {
            classifier,
            dataset,
            json_default: config.output.json,
        })
    }

    fn mode(&self, args: &OutputArgs) -> OutputMode {
        OutputMode::from_flag(args.json || self.json_default)
    }
}

fn emit(text: &str) -> i32 {
    let mut stdout = io::stdout().lock();
    match stdout.write_all(text.as_bytes()).and_then(|_| stdout.flush()) {
        Ok(()) => EXIT_OK,
        Err(e) => {
            eprintln!("error: {e}");
            EXIT_STARTUP
        }
    }
}

fn report_form_error(err: &FormError) -> i32 {
    match err {
        FormError::Input(e) => {
            eprintln!("warning: {e}");
            EXIT_INVALID_INPUT
        }
        other => {
            eprintln!("error: {other}");
            EXIT_STARTUP
        }
    }
}

fn classify_and_print(session: &Session, form: &FormInput, mode: OutputMode) -> i32 {
    match session.classifier.classify_form(form) {
        Ok(prediction) => {
            info!(
                "classified as {:?} (p = {:.4})",
                prediction.diagnosis, prediction.probability
            );
            emit(&render::render_prediction(&prediction, mode))
        }
        Err(e) if e.is_user_input() => {
            eprintln!("warning: {e}");
            EXIT_INVALID_INPUT
        }
        Err(e) => {
            eprintln!("error: {e}");
            EXIT_STARTUP
        }
    }
}

fn run_predict(session: &Session, args: &PredictArgs) -> i32 {
    let mut form = session.classifier.blank_form();
    if let Some(path) = &args.input {
        if let Err(e) = form_io::apply_file(&mut form, path) {
            return report_form_error(&e);
        }
    }
    if let Err(e) = form_io::apply_assignments(&mut form, &args.set) {
        return report_form_error(&FormError::Input(e));
    }
    classify_and_print(session, &form, session.mode(&args.output))
}

fn run_form(session: &Session, args: &OutputArgs) -> i32 {
    let mut form = session.classifier.blank_form();
    let stdin = io::stdin();
    if let Err(e) = form_io::prompt_form(&mut form, stdin.lock(), io::stderr()) {
        return report_form_error(&e);
    }
    classify_and_print(session, &form, session.mode(args))
}

fn run_evaluate(session: &Session, args: &OutputArgs) -> i32 {
    match session.classifier.evaluate(&session.dataset) {
        Ok(eval) => emit(&render::render_evaluation(
            &eval,
            &session.dataset,
            session.mode(args),
        )),
        Err(e) => {
            eprintln!("error: {e}");
            EXIT_STARTUP
        }
    }
}

fn with_session(cli: &Cli, run: impl FnOnce(&Session) -> i32) -> i32 {
    match Session::open(cli) {
        Ok(session) => run(&session),
        Err(e) => {
            eprintln!("error: {e}");
            EXIT_STARTUP
        }
    }
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Describe => emit(&render::describe_text()),
        Command::Predict(args) => with_session(&cli, |s| run_predict(s, args)),
        Command::Form(args) => with_session(&cli, |s| run_form(s, args)),
        Command::Bounds(args) => with_session(&cli, |s| {
            emit(&render::render_bounds(s.classifier.bounds(), s.mode(args)))
        }),
        Command::Evaluate(args) => with_session(&cli, |s| run_evaluate(s, args)),
    }
}

fn main() {
    std::process::exit(run_cli());
}
