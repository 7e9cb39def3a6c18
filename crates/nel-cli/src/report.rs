//! Turning errors into messages for a terminal

use nel::NelError;

/// Describe an error, pointing at the offending column for syntax errors.
pub fn describe_error(source: &str, err: &NelError) -> String {
    match err {
        NelError::Syntax(syntax) => {
            let column = source
                .get(..syntax.position)
                .map_or(syntax.position, |prefix| prefix.chars().count());
            format!("error: {}\n  {}\n  {}^", err, source, " ".repeat(column))
        }
        NelError::Eval(_) => format!("error: {}", err),
    }
}
