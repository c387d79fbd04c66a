//! Recursive descent grammar that builds lambda-calculus expressions from the
//! whitespace-free token stream.
//!
//! ```text
//! expression  -> application | term
//! application -> term term*            (folded to the left)
//! term        -> "(" expression ")" | abstraction | variable
//! abstraction -> "λ" identifier "." expression
//! variable    -> identifier
//! ```
//!
//! Application has no operator token: two terms next to each other are an
//! application. An abstraction body is a full `expression`, so it extends as
//! far right as the enclosing parentheses allow.

use std::fmt::Display;

use log::debug;

use crate::combinators::failure::describe_remaining;
use crate::combinators::{
    alt, chainl1, map, memoize_failures, nesting_limit, recursive, satisfy, seq, seql, seqr, success,
    ParseFailure, Parser,
};
use crate::expression_tree::Expression;
use crate::lexical_analysis::{run_lexical_analysis, Token};

/// Represents a parsing error.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ParseError {
    /// Some character does not begin any token.
    Tokenization(ParseFailure),
    /// The tokens do not form an expression.
    Grammar(ParseFailure),
    /// An expression was read but tokens are left over after it. Leftover
    /// input that begins a term is reported as `Grammar` instead, since the
    /// term there failed to parse.
    TrailingInput(ParseFailure),
}

impl ParseError {
    /// The combinator failure behind this error.
    pub fn failure(&self) -> &ParseFailure {
        match self {
            Self::Tokenization(failure) | Self::Grammar(failure) | Self::TrailingInput(failure) => {
                failure
            }
        }
    }
}

/// Display trait implementation for ParseError.
impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tokenization(failure) => {
                return write!(f, "Unrecognized input while tokenizing.\n{}", failure);
            }

            Self::Grammar(failure) => {
                return write!(f, "Input is not a lambda expression.\n{}", failure);
            }

            Self::TrailingInput(failure) => {
                return write!(f, "Unexpected input after the expression.\n{}", failure);
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Deepest nesting of parenthesised expressions and abstraction bodies the
/// grammar accepts.
pub const MAX_NESTING_DEPTH: usize = 128;

// Matches exactly one token equal to `expected`.
fn exact_token(expected: Token) -> Parser<Token, Token> {
    satisfy(move |token: &Token| *token == expected)
}

/// Matches an identifier token and yields its name.
fn identifier_token() -> Parser<String, Token> {
    map(
        |token: Token| token.to_string(),
        satisfy(|token: &Token| matches!(token, Token::Identifier(_))),
    )
}

/// Matches `λ name .` and yields the name.
fn binder_token() -> Parser<String, Token> {
    seql(seqr(exact_token(Token::Lambda), identifier_token()), exact_token(Token::Dot))
}

fn variable() -> Parser<Expression, Token> {
    map(|name: String| Expression::variable(name), identifier_token())
}

fn abstraction(expression: Parser<Expression, Token>) -> Parser<Expression, Token> {
    seq(
        map(
            |binder: String| move |body: Expression| Expression::abstraction(binder, body),
            binder_token(),
        ),
        expression,
    )
}

fn parens(expression: Parser<Expression, Token>) -> Parser<Expression, Token> {
    seqr(
        exact_token(Token::LParen),
        seql(expression, exact_token(Token::RParen)),
    )
}

/// Tries to parse according to the production
/// `term -> (expression) | abstraction | variable`.
fn term(expression: Parser<Expression, Token>) -> Parser<Expression, Token> {
    memoize_failures(alt(vec![
        parens(expression.clone()),
        abstraction(expression),
        variable(),
    ]))
}

/// Parses one or more juxtaposed terms as left-associative application.
fn application(term: Parser<Expression, Token>) -> Parser<Expression, Token> {
    chainl1(
        term,
        success(|func: Expression, arg: Expression| Expression::application(func, arg)),
    )
}

/// Builds a parser for the production `expression -> application | term`.
///
/// `expression` and `term` remember the positions where they failed, so a
/// failing term is not parsed again when `expression` falls back from
/// `application` to `term`. Build a new parser for each token stream.
pub fn expression() -> Parser<Expression, Token> {
    recursive(|expression| {
        let term = term(nesting_limit(MAX_NESTING_DEPTH, expression));

        memoize_failures(alt(vec![application(term.clone()), term]))
    })
}

// Tokens that can begin a term.
fn starts_term(token: &Token) -> bool {
    matches!(token, Token::LParen | Token::Lambda | Token::Identifier(_))
}

/// Parses a token stream, already stripped of whitespace, into an
/// expression.
pub fn parse_recursive_descent(tokens: &[Token]) -> Result<Expression, ParseError> {
    let parsed = expression().parse(tokens).map_err(ParseError::Grammar)?;

    let leftover = parsed.remaining;
    if leftover.is_empty() {
        return Ok(parsed.value);
    }

    // The expression stopped before a token that begins a term, so that term
    // is malformed rather than extra. A fresh parser gives the full reason.
    if leftover.first().is_some_and(starts_term) {
        if let Err(failure) = expression().parse(leftover) {
            return Err(ParseError::Grammar(failure));
        }
    }

    Err(ParseError::TrailingInput(ParseFailure::IncompleteInput {
        remaining: describe_remaining(leftover),
    }))
}

/// Tokenizes and parses `input` as a single lambda expression.
pub fn parse_expression(input: &str) -> Result<Expression, ParseError> {
    let tokens = run_lexical_analysis(input, true).map_err(ParseError::Tokenization)?;
    let expr = parse_recursive_descent(&tokens)?;

    debug!("parsed expression with {} nodes", expr.node_count());

    Ok(expr)
}
