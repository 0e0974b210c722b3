//! Lexer and parser for `@provider(args)` directives embedded in string
//! leaves.
//!
//! A string leaf is either a plain literal or a whole-string directive:
//! `@name` or `@name(arg, arg, ...)` where each arg is an integer, a decimal
//! or a double-quoted string. Mixed content (literal text around a
//! directive) is deliberately unsupported; anything trailing the directive
//! is a parse error, and anything not starting with `@` is a literal.

use crate::engine::error::EngineError;
use std::iter::Peekable;
use std::str::CharIndices;

/// One argument of a directive.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Arg {
    /// The integer value, if this arg is an integer literal.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Arg::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The string value, if this arg is a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Arg::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// A parsed whole-string directive.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub provider: String,
    pub args: Vec<Arg>,
}

/// Parses a string leaf. Returns `Ok(None)` for plain literals, a
/// [`Directive`] for `@name(...)` leaves, and a
/// [`EngineError::TemplateParse`] with a byte offset for malformed
/// directives.
pub fn parse(leaf: &str) -> Result<Option<Directive>, EngineError> {
    if !leaf.starts_with('@') {
        return Ok(None);
    }

    let mut lexer = Lexer::new(leaf);
    lexer.bump(); // consume '@'

    let provider = lexer.ident();
    if provider.is_empty() {
        return Err(lexer.error("expected provider name after '@'"));
    }

    let args = if lexer.eat('(') {
        lexer.args()?
    } else {
        Vec::new()
    };

    if let Some((_, c)) = lexer.peek() {
        return Err(lexer.error(format!("unexpected '{c}' after directive")));
    }
    Ok(Some(Directive { provider, args }))
}

struct Lexer<'a> {
    src: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices().peekable(),
        }
    }

    fn peek(&mut self) -> Option<(usize, char)> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        self.chars.next()
    }

    fn eat(&mut self, expected: char) -> bool {
        if matches!(self.peek(), Some((_, c)) if c == expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some((_, c)) if c.is_ascii_whitespace()) {
            self.bump();
        }
    }

    fn offset(&mut self) -> usize {
        self.peek().map(|(i, _)| i).unwrap_or(self.src.len())
    }

    fn error(&mut self, msg: impl std::fmt::Display) -> EngineError {
        let at = self.offset();
        EngineError::TemplateParse(format!("{msg} at byte {at} in '{}'", self.src))
    }

    fn ident(&mut self) -> String {
        let mut name = String::new();
        while let Some((_, c)) = self.peek() {
            if c.is_ascii_alphanumeric() {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        name
    }

    /// Parses the argument list after an opening paren, through the close.
    fn args(&mut self) -> Result<Vec<Arg>, EngineError> {
        let mut args = Vec::new();
        self.skip_ws();
        if self.eat(')') {
            return Ok(args);
        }
        loop {
            self.skip_ws();
            args.push(self.arg()?);
            self.skip_ws();
            if self.eat(',') {
                continue;
            }
            if self.eat(')') {
                return Ok(args);
            }
            return Err(self.error("expected ',' or ')' in argument list"));
        }
    }

    fn arg(&mut self) -> Result<Arg, EngineError> {
        match self.peek() {
            Some((_, '"')) => self.string_arg(),
            Some((_, c)) if c.is_ascii_digit() || c == '-' || c == '+' => self.number_arg(),
            Some((_, c)) => Err(self.error(format!("unexpected '{c}' in argument list"))),
            None => Err(self.error("unterminated argument list")),
        }
    }

    fn string_arg(&mut self) -> Result<Arg, EngineError> {
        self.bump(); // opening quote
        let mut value = String::new();
        loop {
            match self.bump() {
                Some((_, '"')) => return Ok(Arg::Str(value)),
                Some((_, '\\')) => match self.bump() {
                    Some((_, c)) if c == '"' || c == '\\' => value.push(c),
                    Some((_, c)) => return Err(self.error(format!("invalid escape '\\{c}'"))),
                    None => return Err(self.error("unterminated string literal")),
                },
                Some((_, c)) => value.push(c),
                None => return Err(self.error("unterminated string literal")),
            }
        }
    }

    fn number_arg(&mut self) -> Result<Arg, EngineError> {
        let start = self.offset();
        let mut text = String::new();
        if let Some((_, c)) = self.peek() {
            if c == '-' || c == '+' {
                text.push(c);
                self.bump();
            }
        }
        let mut is_float = false;
        while let Some((_, c)) = self.peek() {
            if c.is_ascii_digit() {
                text.push(c);
                self.bump();
            } else if c == '.' && !is_float {
                is_float = true;
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        if is_float {
            text.parse::<f64>().map(Arg::Float).map_err(|_| {
                EngineError::TemplateParse(format!(
                    "invalid decimal literal '{text}' at byte {start} in '{}'",
                    self.src
                ))
            })
        } else {
            text.parse::<i64>().map(Arg::Int).map_err(|_| {
                EngineError::TemplateParse(format!(
                    "invalid integer literal '{text}' at byte {start} in '{}'",
                    self.src
                ))
            })
        }
    }
}
