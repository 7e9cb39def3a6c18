//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Evaluate NEL expressions against JSON variables.
#[derive(Parser, Debug)]
#[command(name = "nel", version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate one expression and print the result
    Eval(EvalArgs),

    /// Read expressions interactively
    Repl(VarArgs),
}

/// Where variables come from
#[derive(Args, Debug, Default)]
pub struct VarArgs {
    /// JSON file whose top-level object becomes the variable tree
    #[arg(long, value_name = "FILE")]
    pub vars: Option<PathBuf>,

    /// Set a single variable, e.g. `--var nation.score=1250.5`; may repeat
    #[arg(long = "var", value_name = "PATH=VALUE")]
    pub var: Vec<String>,

    /// Log every evaluated node (needs `--log-level trace`)
    #[arg(long)]
    pub trace: bool,
}

#[derive(Args, Debug)]
pub struct EvalArgs {
    /// The expression to evaluate
    pub expression: String,

    #[command(flatten)]
    pub vars: VarArgs,

    /// Print the token stream instead of evaluating
    #[arg(long, conflicts_with = "ast")]
    pub tokens: bool,

    /// Print the parsed tree instead of evaluating
    #[arg(long)]
    pub ast: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .init();
}
