//! Interactive read-eval-print loop

use anyhow::Result;
use nel::{Engine, Helpers, NelError, Variables};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::report::describe_error;

const LOG_TARGET: &str = "nel::repl";

const HELP: &str = "\
Enter an expression to evaluate it against the loaded variables.

Commands:
  :vars        list every variable path and its value
  :ast <EXPR>  show how an expression parses
  :help        show this message
  :quit        exit (also Ctrl-D)";

/// What the loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Print to stdout and keep reading
    Print(String),

    /// Print to stderr and keep reading
    Error(String),

    /// Nothing to show
    Nothing,

    /// Leave the loop
    Quit,
}

/// State shared by every line of a session.
pub struct Session {
    engine: Engine,
    variables: Variables,
    helpers: Helpers,
}

impl Session {
    pub fn new(engine: Engine, variables: Variables, helpers: Helpers) -> Self {
        Self {
            engine,
            variables,
            helpers,
        }
    }

    /// Handle one line of input.
    pub fn handle(&self, line: &str) -> Outcome {
        let line = line.trim();
        if line.is_empty() {
            return Outcome::Nothing;
        }

        match line.split_once(char::is_whitespace) {
            Some((":ast", source)) => return self.show_ast(source.trim()),
            None if line == ":ast" => return Outcome::Error("usage: :ast <EXPR>".to_string()),
            _ => {}
        }

        match line {
            ":quit" | ":q" | ":exit" => Outcome::Quit,
            ":help" | ":h" => Outcome::Print(HELP.to_string()),
            ":vars" => self.list_variables(),
            command if command.starts_with(':') => {
                Outcome::Error(format!("unknown command `{}`, try :help", command))
            }
            source => match self.engine.evaluate(source, &self.variables, &self.helpers) {
                Ok(value) => Outcome::Print(value.to_string()),
                Err(err) => Outcome::Error(describe_error(source, &err)),
            },
        }
    }

    fn show_ast(&self, source: &str) -> Outcome {
        match self.engine.parse(source) {
            Ok(ast) => Outcome::Print(ast.to_string()),
            Err(err) => Outcome::Error(describe_error(source, &NelError::from(err))),
        }
    }

    fn list_variables(&self) -> Outcome {
        let paths = self.variables.paths();
        if paths.is_empty() {
            return Outcome::Print("(no variables)".to_string());
        }
        let lines: Vec<String> = paths
            .into_iter()
            .map(|(path, value)| format!("{} = {}", path, value))
            .collect();
        Outcome::Print(lines.join("\n"))
    }
}

/// Run the loop until `:quit`, Ctrl-C or end of input.
pub fn run(session: &Session) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    println!("NEL {} (type :help for commands)", nel::VERSION);

    loop {
        let line = match editor.readline("nel> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };

        if !line.trim().is_empty() {
            editor.add_history_entry(line.as_str())?;
        }

        match session.handle(&line) {
            Outcome::Print(text) => println!("{}", text),
            Outcome::Error(text) => eprintln!("{}", text),
            Outcome::Nothing => {}
            Outcome::Quit => break,
        }
    }

    log::debug!(target: LOG_TARGET, "session ended");
    Ok(())
}
