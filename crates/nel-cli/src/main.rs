//! `nel`: evaluate NEL expressions from the command line.

mod cli;
mod repl;
mod report;
mod vars;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use nel::{tokenize, Engine, EvalContext, Helpers, NelError};

use crate::cli::{Cli, Command, EvalArgs, VarArgs};
use crate::report::describe_error;

const LOG_TARGET: &str = "nel::cli";

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::init_logging(cli.log_level);

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<ExitCode> {
    match command {
        Command::Eval(args) => run_eval(&args),
        Command::Repl(args) => {
            let (engine, variables) = setup(&args)?;
            let session = repl::Session::new(engine, variables, Helpers::with_prelude());
            repl::run(&session)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn setup(args: &VarArgs) -> Result<(Engine, nel::Variables)> {
    let variables = vars::load(args.vars.as_deref(), &args.var)?;
    let engine = Engine::new()
        .with_context(EvalContext::new().with_trace(args.trace))
        .with_cache(false);
    Ok((engine, variables))
}

fn run_eval(args: &EvalArgs) -> Result<ExitCode> {
    let source = args.expression.as_str();
    log::info!(target: LOG_TARGET, "evaluating `{}`", source);

    if args.tokens {
        return Ok(match tokenize(source) {
            Ok(tokens) => {
                for token in tokens {
                    match &token.value {
                        Some(value) => {
                            println!("{:>4}  {}  {:?}", token.position, token.token_type, value);
                        }
                        None => println!("{:>4}  {}", token.position, token.token_type),
                    }
                }
                ExitCode::SUCCESS
            }
            Err(err) => fail(source, &NelError::from(err)),
        });
    }

    let (engine, variables) = setup(&args.vars)?;

    if args.ast {
        return Ok(match engine.parse(source) {
            Ok(ast) => {
                println!("{}", ast);
                ExitCode::SUCCESS
            }
            Err(err) => fail(source, &NelError::from(err)),
        });
    }

    match engine.evaluate(source, &variables, &Helpers::with_prelude()) {
        Ok(value) if args.json => {
            println!("{}", serde_json::to_string(&value)?);
            Ok(ExitCode::SUCCESS)
        }
        Ok(value) => {
            println!("{}", value);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(fail(source, &err)),
    }
}

fn fail(source: &str, err: &NelError) -> ExitCode {
    eprintln!("{}", describe_error(source, err));
    ExitCode::FAILURE
}
