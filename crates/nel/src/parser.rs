//! Recursive-descent parser producing the expression tree.
//!
//! Each precedence level is one function that parses the next-tighter level
//! on both sides and loops while the lookahead is one of its operators,
//! building left-nested [`Node::Binary`] nodes:
//!
//! ```text
//! expression     := or
//! or             := and ("||" and)*
//! and            := comparison ("&&" comparison)*
//! comparison     := additive (("<" | "<=" | ">" | ">=" | "==" | "!=") additive)*
//! additive       := multiplicative (("+" | "-") multiplicative)*
//! multiplicative := unary (("*" | "/" | "%") unary)*
//! unary          := ("!" | "-") unary | primary
//! primary        := NUMBER | STRING | "true" | "false" | "null"
//!                 | IDENTIFIER "(" (expression ("," expression)*)? ")"
//!                 | IDENTIFIER ("." IDENTIFIER)*
//!                 | "(" expression ")"
//! ```
//!
//! Parsing is fail-fast: the first problem is reported as a [`SyntaxError`]
//! and no partial tree is returned.

use crate::ast::{BinaryOp, Node, UnaryOp};
use crate::error::SyntaxError;
use crate::tokenizer::{tokenize, Token, TokenType};
use crate::value::Value;

/// Limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserLimits {
    /// Maximum depth of the finished tree, leaves included.
    ///
    /// Parentheses count toward the nesting while parsing even though they
    /// add no node, so the deepest accepted tree is never deeper than this.
    pub max_depth: usize,
}

impl Default for ParserLimits {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

impl ParserLimits {
    /// Limits with a custom nesting depth.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

/// Parse a token stream with default limits.
///
/// # Errors
///
/// Returns a [`SyntaxError`] for empty input, a missing operand or closing
/// parenthesis, a token left over after a complete expression, or nesting
/// beyond the default depth limit.
pub fn parse(tokens: Vec<Token>) -> Result<Node, SyntaxError> {
    Parser::new(tokens, ParserLimits::default()).parse()
}

/// Parse a token stream with explicit limits.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with_limits(tokens: Vec<Token>, limits: ParserLimits) -> Result<Node, SyntaxError> {
    Parser::new(tokens, limits).parse()
}

/// Tokenize and parse expression text.
///
/// # Errors
///
/// Returns the tokenizer's or the parser's [`SyntaxError`].
pub fn parse_str(source: &str) -> Result<Node, SyntaxError> {
    parse(tokenize(source)?)
}

/// Parser state over a complete token vector.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
    limits: ParserLimits,
}

impl Parser {
    /// Create a parser. A missing `End` sentinel is added.
    pub fn new(mut tokens: Vec<Token>, limits: ParserLimits) -> Self {
        if tokens.last().map(|t| t.token_type) != Some(TokenType::End) {
            let position = tokens.last().map_or(0, |t| t.position);
            tokens.push(Token::new(TokenType::End, position));
        }
        Self {
            tokens,
            current: 0,
            depth: 0,
            limits,
        }
    }

    /// Parse exactly one expression covering the whole token stream.
    pub fn parse(mut self) -> Result<Node, SyntaxError> {
        if self.check(TokenType::End) {
            return Err(SyntaxError::new("empty expression", self.peek().position));
        }

        let node = self.expression()?;

        if !self.check(TokenType::End) {
            let token = self.peek();
            return Err(SyntaxError::new(
                format!("unexpected {} after complete expression", token.describe()),
                token.position,
            ));
        }

        // A chain finished at a tighter level can sit under a looser one,
        // so the running count undercounts mixed precedence.
        if node.depth() > self.limits.max_depth {
            let position = self.tokens.first().map_or(0, |t| t.position);
            return Err(self.too_deep(position));
        }

        Ok(node)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Precedence Levels
    // ═══════════════════════════════════════════════════════════════════

    fn expression(&mut self) -> Result<Node, SyntaxError> {
        self.or()
    }

    fn or(&mut self) -> Result<Node, SyntaxError> {
        self.binary_level(
            |t| match t {
                TokenType::Or => Some(BinaryOp::Or),
                _ => None,
            },
            Self::and,
        )
    }

    fn and(&mut self) -> Result<Node, SyntaxError> {
        self.binary_level(
            |t| match t {
                TokenType::And => Some(BinaryOp::And),
                _ => None,
            },
            Self::comparison,
        )
    }

    fn comparison(&mut self) -> Result<Node, SyntaxError> {
        self.binary_level(
            |t| match t {
                TokenType::EqualEqual => Some(BinaryOp::Eq),
                TokenType::BangEqual => Some(BinaryOp::Ne),
                TokenType::Less => Some(BinaryOp::Lt),
                TokenType::LessEqual => Some(BinaryOp::Le),
                TokenType::Greater => Some(BinaryOp::Gt),
                TokenType::GreaterEqual => Some(BinaryOp::Ge),
                _ => None,
            },
            Self::additive,
        )
    }

    fn additive(&mut self) -> Result<Node, SyntaxError> {
        self.binary_level(
            |t| match t {
                TokenType::Plus => Some(BinaryOp::Add),
                TokenType::Minus => Some(BinaryOp::Sub),
                _ => None,
            },
            Self::multiplicative,
        )
    }

    fn multiplicative(&mut self) -> Result<Node, SyntaxError> {
        self.binary_level(
            |t| match t {
                TokenType::Star => Some(BinaryOp::Mul),
                TokenType::Slash => Some(BinaryOp::Div),
                TokenType::Percent => Some(BinaryOp::Rem),
                _ => None,
            },
            Self::unary,
        )
    }

    /// One left-associative level: `next (op next)*`.
    ///
    /// Every chained operator deepens the tree by one, so each counts
    /// against the depth limit until the level is finished.
    fn binary_level(
        &mut self,
        operator: fn(TokenType) -> Option<BinaryOp>,
        next: fn(&mut Self) -> Result<Node, SyntaxError>,
    ) -> Result<Node, SyntaxError> {
        let mut left = next(self)?;
        let mut chained = 0;

        while let Some(op) = operator(self.peek().token_type) {
            let position = self.advance().position;
            self.enter(position)?;
            chained += 1;

            let right = next(self)?;
            left = Node::binary(left, op, right);
        }

        self.depth -= chained;
        Ok(left)
    }

    fn unary(&mut self) -> Result<Node, SyntaxError> {
        let op = match self.peek().token_type {
            TokenType::Bang => UnaryOp::Not,
            TokenType::Minus => UnaryOp::Neg,
            _ => return self.primary(),
        };

        let position = self.advance().position;
        self.enter(position)?;
        let operand = self.unary()?;
        self.leave();

        Ok(Node::unary(op, operand))
    }

    fn primary(&mut self) -> Result<Node, SyntaxError> {
        let token = self.peek().clone();

        match token.token_type {
            TokenType::Number | TokenType::String => {
                self.advance();
                let position = token.position;
                let value = token.value.ok_or_else(|| {
                    SyntaxError::new("literal token without a value", position)
                })?;
                Ok(Node::literal(value))
            }
            TokenType::True => {
                self.advance();
                Ok(Node::literal(true))
            }
            TokenType::False => {
                self.advance();
                Ok(Node::literal(false))
            }
            TokenType::Null => {
                self.advance();
                Ok(Node::literal(Value::Null))
            }
            TokenType::Identifier => {
                self.advance();
                let name = identifier_name(&token)?;
                if self.check(TokenType::LParen) {
                    self.call(name, token.position)
                } else {
                    self.path(name)
                }
            }
            TokenType::LParen => {
                self.advance();
                self.enter(token.position)?;
                let inner = self.expression()?;
                self.leave();
                self.expect(
                    TokenType::RParen,
                    format!("`(` opened at position {}", token.position),
                )?;
                Ok(inner)
            }
            _ => Err(SyntaxError::new(
                format!("expected expression, found {}", token.describe()),
                token.position,
            )),
        }
    }

    /// `name(` has been seen up to the name; parse the argument list.
    fn call(&mut self, name: String, position: usize) -> Result<Node, SyntaxError> {
        self.advance(); // (
        self.enter(position)?;

        let mut args = Vec::new();
        if !self.check(TokenType::RParen) {
            loop {
                args.push(self.expression()?);
                if !self.match_token(TokenType::Comma) {
                    break;
                }
            }
        }

        self.leave();
        self.expect(TokenType::RParen, format!("call to `{}`", name))?;
        Ok(Node::call(name, args))
    }

    /// `first` has been consumed; collect `. IDENTIFIER` segments.
    fn path(&mut self, first: String) -> Result<Node, SyntaxError> {
        let mut segments = vec![first];

        while self.match_token(TokenType::Dot) {
            let token = self.peek().clone();
            if token.token_type != TokenType::Identifier {
                return Err(SyntaxError::new(
                    format!("expected identifier after `.`, found {}", token.describe()),
                    token.position,
                ));
            }
            self.advance();
            segments.push(identifier_name(&token)?);
        }

        Ok(Node::identifier(segments))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Token Cursor
    // ═══════════════════════════════════════════════════════════════════

    fn peek(&self) -> &Token {
        // `new` guarantees a trailing End token, and `advance` never moves past it.
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.peek().token_type == token_type
    }

    /// Consume the current token and return it. The `End` token is never
    /// consumed, so the cursor cannot run off the vector.
    fn advance(&mut self) -> &Token {
        let index = self.current.min(self.tokens.len() - 1);
        if self.current < self.tokens.len() - 1 {
            self.current += 1;
        }
        &self.tokens[index]
    }

    fn match_token(&mut self, token_type: TokenType) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token_type: TokenType, context: String) -> Result<(), SyntaxError> {
        if self.match_token(token_type) {
            return Ok(());
        }
        let token = self.peek();
        Err(SyntaxError::new(
            format!(
                "expected {} to close {}, found {}",
                token_type,
                context,
                token.describe()
            ),
            token.position,
        ))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Depth Guard
    // ═══════════════════════════════════════════════════════════════════

    /// Every nesting level still needs a node under it, so a level may only
    /// be entered while there is room left for that leaf.
    fn enter(&mut self, position: usize) -> Result<(), SyntaxError> {
        self.depth += 1;
        if self.depth >= self.limits.max_depth {
            return Err(self.too_deep(position));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn too_deep(&self, position: usize) -> SyntaxError {
        SyntaxError::new(
            format!(
                "expression nesting exceeds maximum depth of {}",
                self.limits.max_depth
            ),
            position,
        )
    }
}

fn identifier_name(token: &Token) -> Result<String, SyntaxError> {
    token
        .identifier()
        .map(str::to_string)
        .ok_or_else(|| SyntaxError::new("identifier token without a name", token.position))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_src(src: &str) -> Node {
        parse_str(src).expect("parse failed")
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let expected = Node::binary(
            Node::literal(1),
            BinaryOp::Add,
            Node::binary(Node::literal(2), BinaryOp::Mul, Node::literal(3)),
        );
        assert_eq!(parse_src("1 + 2 * 3"), expected);
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let expected = Node::binary(
            Node::binary(Node::literal(1), BinaryOp::Add, Node::literal(2)),
            BinaryOp::Mul,
            Node::literal(3),
        );
        assert_eq!(parse_src("(1 + 2) * 3"), expected);
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(parse_src("10 - 4 - 3").to_string(), "((10 - 4) - 3)");
        assert_eq!(parse_src("8 / 4 / 2").to_string(), "((8 / 4) / 2)");
        assert_eq!(parse_src("a || b || c").to_string(), "((a || b) || c)");
    }

    #[test]
    fn test_comparisons_chain_left() {
        assert_eq!(parse_src("a < b < c").to_string(), "((a < b) < c)");
        assert_eq!(parse_src("a == b != c").to_string(), "((a == b) != c)");
    }

    #[test]
    fn test_logical_precedence() {
        assert_eq!(
            parse_src("a || b && c == 1").to_string(),
            "(a || (b && (c == 1)))"
        );
    }

    #[test]
    fn test_unary_is_right_binding() {
        assert_eq!(parse_src("!!a").to_string(), "(!(!a))");
        assert_eq!(parse_src("--1").to_string(), "(-(-1))");
        assert_eq!(parse_src("-a * b").to_string(), "((-a) * b)");
        assert_eq!(parse_src("!a && b").to_string(), "((!a) && b)");
    }

    #[test]
    fn test_dotted_path() {
        assert_eq!(
            parse_src("nation.military.soldiers"),
            Node::identifier(["nation", "military", "soldiers"])
        );
    }

    #[test]
    fn test_function_calls() {
        assert_eq!(parse_src("now()"), Node::call("now", vec![]));
        assert_eq!(
            parse_src("max(a.b, 2 + 3)"),
            Node::call(
                "max",
                vec![
                    Node::identifier(["a", "b"]),
                    Node::binary(Node::literal(2), BinaryOp::Add, Node::literal(3)),
                ]
            )
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(parse_src("null"), Node::literal(Value::Null));
        assert_eq!(parse_src("true"), Node::literal(true));
        assert_eq!(parse_src("'abc'"), Node::literal("abc"));
        assert!(matches!(
            parse_src("123"),
            Node::Literal(crate::ast::LiteralNode { value }) if value.is_integer()
        ));
    }

    #[test]
    fn test_error_dangling_operator() {
        let err = parse_str("1 +").unwrap_err();
        assert_eq!(err.position, 3);
        assert!(err.message.contains("end of input"));
    }

    #[test]
    fn test_error_unclosed_paren() {
        let err = parse_str("(1 + 2").unwrap_err();
        assert_eq!(err.position, 6);
        assert!(err.message.contains("`)`"));
    }

    #[test]
    fn test_error_empty_input() {
        assert_eq!(parse_str("").unwrap_err().message, "empty expression");
        assert_eq!(parse_str("   ").unwrap_err().position, 3);
    }

    #[test]
    fn test_error_leftover_tokens() {
        let err = parse_str("1 2").unwrap_err();
        assert_eq!(err.position, 2);
        assert!(err.message.contains("after complete expression"));

        let err = parse_str("(1))").unwrap_err();
        assert_eq!(err.position, 3);
    }

    #[test]
    fn test_error_bad_path_segment() {
        let err = parse_str("nation.").unwrap_err();
        assert!(err.message.contains("expected identifier after `.`"));
        assert!(parse_str("nation.5").is_err());
    }

    #[test]
    fn test_error_call_arguments() {
        assert!(parse_str("f(1,)").is_err());
        assert!(parse_str("f(1 2)").is_err());
        assert!(parse_str("f(,)").is_err());
        let err = parse_str("f(1").unwrap_err();
        assert!(err.message.contains("call to `f`"));
    }

    #[test]
    fn test_error_binary_operator_without_left_operand() {
        assert!(parse_str("* 2").is_err());
        assert!(parse_str("&& true").is_err());
    }

    #[test]
    fn test_depth_limit_on_parentheses() {
        let src = format!("{}1{}", "(".repeat(300), ")".repeat(300));
        let err = parse_str(&src).unwrap_err();
        assert!(err.message.contains("maximum depth of 256"));

        let src = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert!(parse_str(&src).is_ok());
    }

    #[test]
    fn test_depth_limit_on_prefix_operators() {
        let src = format!("{}true", "!".repeat(1000));
        assert!(parse_str(&src).is_err());
    }

    #[test]
    fn test_depth_limit_on_chains() {
        let src = vec!["1"; 400].join(" + ");
        assert!(parse_str(&src).is_err());

        let src = vec!["1"; 100].join(" + ");
        assert!(parse_str(&src).is_ok());
    }

    #[test]
    fn test_depth_limit_boundary_on_prefix_operators() {
        // 256 nodes deep: 255 operators over one literal
        let src = format!("{}true", "!".repeat(255));
        assert_eq!(parse_src(&src).depth(), 256);

        let src = format!("{}true", "!".repeat(256));
        let err = parse_str(&src).unwrap_err();
        assert!(err.message.contains("maximum depth of 256"));
        assert_eq!(err.position, 255);
    }

    #[test]
    fn test_depth_limit_boundary_on_chains() {
        let src = vec!["1"; 256].join(" + ");
        assert_eq!(parse_src(&src).depth(), 256);

        let src = vec!["1"; 257].join(" + ");
        assert!(parse_str(&src).is_err());
    }

    #[test]
    fn test_depth_limit_on_mixed_precedence() {
        // The product alone is 256 deep; the sum puts it one level lower.
        let product = vec!["1"; 256].join(" * ");
        assert_eq!(parse_src(&product).depth(), 256);

        let err = parse_str(&format!("{} + 1", product)).unwrap_err();
        assert!(err.message.contains("maximum depth of 256"));
        assert_eq!(err.position, 0);

        let err = parse_str(&format!("1 + {}", product)).unwrap_err();
        assert!(err.message.contains("maximum depth of 256"));
    }

    #[test]
    fn test_custom_limits() {
        let tokens = tokenize("--1").unwrap();
        assert!(parse_with_limits(tokens.clone(), ParserLimits::with_max_depth(2)).is_err());
        assert!(parse_with_limits(tokens, ParserLimits::with_max_depth(3)).is_ok());

        let tokens = tokenize("((1))").unwrap();
        assert!(parse_with_limits(tokens, ParserLimits::with_max_depth(2)).is_err());
    }

    #[test]
    fn test_missing_end_token_is_tolerated() {
        let tokens = vec![Token::with_value(TokenType::Number, Value::int(1), 0)];
        assert_eq!(parse(tokens).unwrap(), Node::literal(1));
        assert!(parse(Vec::new()).is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for src in [
            "1 + 2 * 3",
            "!(a.b >= 10) || f(x, 'y', -2.5)",
            "a < b < c",
            "-(-1) % 3 != null",
        ] {
            let node = parse_src(src);
            assert_eq!(parse_src(&node.to_string()), node);
        }
    }

    #[test]
    fn test_huge_literal_round_trips() {
        let node = parse_src(&format!("{} > x", "9".repeat(300)));
        assert_eq!(parse_src(&node.to_string()), node);

        assert!(parse_str(&format!("{} > x", "9".repeat(400))).is_err());
    }
}
