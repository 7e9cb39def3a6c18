//! Lexical analysis: turns expression text into a vector of tokens.
//!
//! The tokenizer knows nothing about grammar. It recognizes literals,
//! identifiers, keywords and punctuation, and always terminates the stream
//! with an [`TokenType::End`] token so the parser has a fixed lookahead
//! sentinel. Two-character operators are matched before their
//! one-character prefixes.

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::SyntaxError;
use crate::value::{Number, Value};

/// Kinds of tokens recognized by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Variable segment or helper name
    Identifier,
    /// `.`
    Dot,
    /// Integer or decimal literal
    Number,
    /// Single- or double-quoted string literal
    String,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `!`
    Bang,
    /// `!=`
    BangEqual,
    /// `==`
    EqualEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `&&`
    And,
    /// `||`
    Or,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// End of input
    End,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenType::Identifier => "identifier",
            TokenType::Dot => "`.`",
            TokenType::Number => "number",
            TokenType::String => "string",
            TokenType::True => "`true`",
            TokenType::False => "`false`",
            TokenType::Null => "`null`",
            TokenType::Plus => "`+`",
            TokenType::Minus => "`-`",
            TokenType::Star => "`*`",
            TokenType::Slash => "`/`",
            TokenType::Percent => "`%`",
            TokenType::Bang => "`!`",
            TokenType::BangEqual => "`!=`",
            TokenType::EqualEqual => "`==`",
            TokenType::Less => "`<`",
            TokenType::LessEqual => "`<=`",
            TokenType::Greater => "`>`",
            TokenType::GreaterEqual => "`>=`",
            TokenType::And => "`&&`",
            TokenType::Or => "`||`",
            TokenType::LParen => "`(`",
            TokenType::RParen => "`)`",
            TokenType::Comma => "`,`",
            TokenType::End => "end of input",
        };
        f.write_str(text)
    }
}

/// A single token with its literal payload and source offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is
    pub token_type: TokenType,

    /// Literal payload: the number or string for literals, the name
    /// (as a string value) for identifiers, `None` for everything else
    pub value: Option<Value>,

    /// Byte offset of the first character of the token
    pub position: usize,
}

impl Token {
    /// Create a token without a payload.
    pub fn new(token_type: TokenType, position: usize) -> Self {
        Self {
            token_type,
            value: None,
            position,
        }
    }

    /// Create a token carrying a literal payload.
    pub fn with_value(token_type: TokenType, value: Value, position: usize) -> Self {
        Self {
            token_type,
            value: Some(value),
            position,
        }
    }

    /// The name carried by an identifier token.
    pub fn identifier(&self) -> Option<&str> {
        match self.token_type {
            TokenType::Identifier => self.value.as_ref().and_then(Value::as_str),
            _ => None,
        }
    }

    /// Describe this token for diagnostics.
    pub fn describe(&self) -> String {
        match (&self.token_type, &self.value) {
            (TokenType::Identifier, Some(Value::String(name))) => format!("identifier `{}`", name),
            (TokenType::Number, Some(value)) | (TokenType::String, Some(value)) => {
                format!("{} {}", self.token_type, value)
            }
            (token_type, _) => token_type.to_string(),
        }
    }
}

/// Tokenize expression text into a vector terminated by an `End` token.
///
/// # Errors
///
/// Returns a [`SyntaxError`] for an unterminated string literal or for any
/// character that does not start a token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, SyntaxError> {
    Tokenizer::new(source).run()
}

struct Tokenizer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    tokens: Vec<Token>,
}

impl<'a> Tokenizer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, SyntaxError> {
        while let Some((pos, c)) = self.chars.next() {
            match c {
                ' ' | '\t' | '\n' | '\r' => {}
                c if c.is_ascii_alphabetic() || c == '_' => self.identifier(pos),
                c if c.is_ascii_digit() => self.number(pos)?,
                '"' | '\'' => self.string(pos, c)?,
                '.' => self.push(TokenType::Dot, pos),
                ',' => self.push(TokenType::Comma, pos),
                '(' => self.push(TokenType::LParen, pos),
                ')' => self.push(TokenType::RParen, pos),
                '+' => self.push(TokenType::Plus, pos),
                '-' => self.push(TokenType::Minus, pos),
                '*' => self.push(TokenType::Star, pos),
                '/' => self.push(TokenType::Slash, pos),
                '%' => self.push(TokenType::Percent, pos),
                '!' => {
                    let token_type = self.pick('=', TokenType::BangEqual, TokenType::Bang);
                    self.push(token_type, pos);
                }
                '<' => {
                    let token_type = self.pick('=', TokenType::LessEqual, TokenType::Less);
                    self.push(token_type, pos);
                }
                '>' => {
                    let token_type = self.pick('=', TokenType::GreaterEqual, TokenType::Greater);
                    self.push(token_type, pos);
                }
                '=' => self.pair('=', TokenType::EqualEqual, pos, c)?,
                '&' => self.pair('&', TokenType::And, pos, c)?,
                '|' => self.pair('|', TokenType::Or, pos, c)?,
                other => return Err(unexpected_char(other, pos)),
            }
        }

        self.push(TokenType::End, self.source.len());
        Ok(self.tokens)
    }

    fn push(&mut self, token_type: TokenType, position: usize) {
        self.tokens.push(Token::new(token_type, position));
    }

    /// Consume `next` if it follows, choosing between a two- and one-character token.
    fn pick(&mut self, next: char, double: TokenType, single: TokenType) -> TokenType {
        if self.chars.next_if(|&(_, c)| c == next).is_some() {
            double
        } else {
            single
        }
    }

    /// A two-character operator whose first character is not a token by itself.
    fn pair(
        &mut self,
        next: char,
        token_type: TokenType,
        pos: usize,
        first: char,
    ) -> Result<(), SyntaxError> {
        if self.chars.next_if(|&(_, c)| c == next).is_some() {
            self.push(token_type, pos);
            Ok(())
        } else {
            Err(unexpected_char(first, pos))
        }
    }

    /// Byte offset just past everything consumed so far.
    fn offset(&mut self) -> usize {
        self.chars
            .peek()
            .map_or(self.source.len(), |&(pos, _)| pos)
    }

    fn identifier(&mut self, start: usize) {
        while self
            .chars
            .next_if(|&(_, c)| c.is_ascii_alphanumeric() || c == '_')
            .is_some()
        {}
        let end = self.offset();
        let text = &self.source[start..end];

        let token = match text {
            "true" => Token::new(TokenType::True, start),
            "false" => Token::new(TokenType::False, start),
            "null" => Token::new(TokenType::Null, start),
            name => Token::with_value(TokenType::Identifier, Value::string(name), start),
        };
        self.tokens.push(token);
    }

    fn number(&mut self, start: usize) -> Result<(), SyntaxError> {
        self.skip_digits();

        // Only a `.` followed by a digit belongs to the number; otherwise it
        // is left for the parser as a path separator.
        let mut fractional = false;
        let mut lookahead = self.chars.clone();
        if let (Some((_, '.')), Some((_, d))) = (lookahead.next(), lookahead.next()) {
            if d.is_ascii_digit() {
                self.chars.next();
                self.skip_digits();
                fractional = true;
            }
        }

        let end = self.offset();
        let value = parse_number(&self.source[start..end], fractional)
            .ok_or_else(|| SyntaxError::new("number literal is out of range", start))?;
        self.tokens
            .push(Token::with_value(TokenType::Number, Value::Number(value), start));
        Ok(())
    }

    fn skip_digits(&mut self) {
        while self.chars.next_if(|&(_, c)| c.is_ascii_digit()).is_some() {}
    }

    fn string(&mut self, start: usize, quote: char) -> Result<(), SyntaxError> {
        let content_start = start + quote.len_utf8();
        for (pos, c) in self.chars.by_ref() {
            if c == quote {
                let content = &self.source[content_start..pos];
                self.tokens
                    .push(Token::with_value(TokenType::String, Value::string(content), start));
                return Ok(());
            }
        }
        Err(SyntaxError::new(
            format!("unterminated string starting with {}", quote),
            start,
        ))
    }
}

/// Parse a digit run (with an optional fractional part) into a number.
/// Integers too large for `i64` become floats. A literal too large for any
/// finite `f64` yields `None`.
fn parse_number(text: &str, fractional: bool) -> Option<Number> {
    if !fractional {
        if let Ok(n) = text.parse::<i64>() {
            return Some(Number::Int(n));
        }
    }
    text.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Number::Float)
}

fn unexpected_char(c: char, pos: usize) -> SyntaxError {
    SyntaxError::new(format!("unexpected character `{}`", c), pos)
}
