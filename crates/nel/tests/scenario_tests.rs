use nel::*;
use pretty_assertions::assert_eq;

fn nation(score: Value, soldiers: i64) -> Variables {
    let mut military = Variables::new();
    military.insert("soldiers", soldiers);

    let mut nation = Variables::new();
    nation.insert("score", score);
    nation.insert("military", military);

    let mut vars = Variables::new();
    vars.insert("nation", nation);
    vars
}

fn types(source: &str) -> Vec<TokenType> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|t| t.token_type)
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════
// Tokenizer
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_tokenize_path_comparison() {
    assert_eq!(
        types("nation.score > 500"),
        vec![
            TokenType::Identifier,
            TokenType::Dot,
            TokenType::Identifier,
            TokenType::Greater,
            TokenType::Number,
            TokenType::End,
        ]
    );

    let tokens = tokenize("nation.score > 500").unwrap();
    assert!(matches!(
        tokens[4].value,
        Some(Value::Number(Number::Int(500)))
    ));
}

#[test]
fn test_tokenize_rejects_dollar() {
    let err = tokenize("nation.score $ 500").unwrap_err();
    assert_eq!(err.position, 13);
    assert!(err.message.contains('$'));
}

// ═══════════════════════════════════════════════════════════════════════
// Parser
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_parse_precedence() {
    assert_eq!(
        parse_str("1 + 2 * 3").unwrap(),
        Node::binary(
            Node::literal(1),
            BinaryOp::Add,
            Node::binary(Node::literal(2), BinaryOp::Mul, Node::literal(3)),
        )
    );
}

#[test]
fn test_parse_grouping() {
    assert_eq!(
        parse_str("(1 + 2) * 3").unwrap(),
        Node::binary(
            Node::binary(Node::literal(1), BinaryOp::Add, Node::literal(2)),
            BinaryOp::Mul,
            Node::literal(3),
        )
    );
}

#[test]
fn test_parse_incomplete_input() {
    assert!(parse_str("1 +").is_err());
    assert!(parse_str("(1 + 2").is_err());
}

// ═══════════════════════════════════════════════════════════════════════
// Evaluation
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_rule_over_nested_variables() {
    let vars = nation(Value::float(1250.5), 15000);
    let result = evaluate(
        "nation.score > 500 && nation.military.soldiers > 10000",
        &vars,
        &Helpers::new(),
    );
    assert_eq!(result, Ok(Value::Bool(true)));
}

#[test]
fn test_negated_comparison() {
    let vars = nation(Value::int(500), 0);
    let result = evaluate("!(nation.score >= 1000)", &vars, &Helpers::new());
    assert_eq!(result, Ok(Value::Bool(true)));
}

#[test]
fn test_host_helper() {
    let mut helpers = Helpers::new();
    helpers.register_fn("double", Some(1), |_, args| match &args[0] {
        Value::Number(n) => Ok(Value::Number(*n * Number::Int(2))),
        other => Err(format!("cannot double {:?}", other)),
    });

    let result = evaluate("double(2) == 4", &Variables::new(), &helpers);
    assert_eq!(result, Ok(Value::Bool(true)));
}

#[test]
fn test_short_circuit_skips_division_by_zero() {
    let result = evaluate("false && (1 / 0 == 0)", &Variables::new(), &Helpers::new());
    assert_eq!(result, Ok(Value::Bool(false)));
}

#[test]
fn test_integer_literal_stays_integral() {
    let result = evaluate("123", &Variables::new(), &Helpers::new()).unwrap();
    assert!(result.is_integer());
    assert_eq!(result.to_string(), "123");
}

#[test]
fn test_missing_variable_is_an_error_not_null() {
    let vars = nation(Value::int(1), 1);
    let err = evaluate("nation.economy.gdp > 0", &vars, &Helpers::new()).unwrap_err();
    assert_eq!(err.eval_kind(), Some(EvalErrorKind::UnknownVariable));
    assert_eq!(
        err.to_string(),
        "Unknown variable: `nation.economy.gdp` is not defined"
    );
}
