//! Helper call evaluation

use crate::ast::CallNode;
use crate::helpers::HelperContext;
use crate::{Environment, EvalContext, EvalError, Value};

use super::Evaluate;

impl Evaluate for CallNode {
    fn eval(&self, env: &mut Environment<'_>, ctx: &EvalContext) -> Result<Value, EvalError> {
        let helpers = env.helpers();
        let helper = helpers
            .get(&self.name)
            .ok_or_else(|| EvalError::unknown_helper(&self.name))?;

        // Arguments are evaluated left to right, all of them
        let args = self
            .args
            .iter()
            .map(|arg| arg.eval(env, ctx))
            .collect::<Result<Vec<_>, _>>()?;

        let helper_ctx = HelperContext {
            name: &self.name,
            variables: env.variables(),
        };
        helper.call(&helper_ctx, &args)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use crate::error::EvalErrorKind;
    use crate::{eval_node, parse_str, EvalContext, EvalError, Helpers, Value, Variables};

    fn eval_with(source: &str, helpers: &Helpers) -> Result<Value, EvalError> {
        let ast = parse_str(source).unwrap();
        eval_node(&ast, &Variables::new(), helpers, &EvalContext::default())
    }

    #[test]
    fn test_calls_registered_helper() {
        let mut helpers = Helpers::new();
        helpers.register_fn("sum", None, |_, args| {
            let mut total = 0;
            for arg in args {
                total += arg.as_i64().ok_or("expected integers")?;
            }
            Ok(Value::int(total))
        });

        assert_eq!(eval_with("sum(1, 2, 3)", &helpers), Ok(Value::int(6)));
        assert_eq!(eval_with("sum()", &helpers), Ok(Value::int(0)));
    }

    #[test]
    fn test_unknown_helper() {
        let err = eval_with("missing(1)", &Helpers::new()).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::UnknownHelper);
        assert!(err.message.contains("missing"));
    }

    #[test]
    fn test_unknown_helper_checked_before_arguments() {
        let err = eval_with("missing(1 / 0)", &Helpers::new()).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::UnknownHelper);
    }

    #[test]
    fn test_arguments_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);

        let mut helpers = Helpers::new();
        helpers.register_fn("note", Some(1), move |_, args| {
            if let Ok(mut seen) = log.lock() {
                seen.push(args[0].clone());
            }
            Ok(args[0].clone())
        });
        helpers.register_fn("pair", Some(2), |_, _| Ok(Value::Null));

        eval_with("pair(note(1), note(2))", &helpers).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![Value::int(1), Value::int(2)]);
    }

    #[test]
    fn test_argument_error_stops_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut helpers = Helpers::new();
        helpers.register_fn("count", None, move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Null)
        });

        let err = eval_with("count(1, 1 / 0)", &helpers).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_helper_receives_context() {
        let mut helpers = Helpers::new();
        helpers.register_fn("whoami", Some(0), |ctx, _| Ok(Value::string(ctx.name)));
        assert_eq!(eval_with("whoami()", &helpers), Ok(Value::string("whoami")));
    }

    #[test]
    fn test_helper_failure_kind() {
        let helpers = Helpers::with_prelude();
        let err = eval_with("abs('x')", &helpers).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::HelperFailed);
    }
}
