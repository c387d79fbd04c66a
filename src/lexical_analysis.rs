//! Turns lambda-calculus source text into a flat stream of tokens.
//!
//! The tokenizer is itself a grammar over characters, written with the same
//! combinators that the expression grammar uses over tokens.

use std::fmt::Display;

use log::debug;

use crate::combinators::{
    alt, char_exact, char_range, complete, many, many1, map, one_of_chars, run_parser, seq, seqr,
    success, ParseFailure, Parser,
};

/// Characters that separate tokens.
const WHITESPACE_CHARS: [char; 6] = [' ', '\n', '\t', '\r', '\u{0B}', '\u{0C}'];

/// The binder symbol, as written in source.
pub const LAMBDA_CHAR: char = 'λ';

/// ASCII spelling accepted in place of `LAMBDA_CHAR`.
pub const LAMBDA_ALIAS_CHAR: char = '\\';

// Represents a single token of the language.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Token {
    Identifier(String),
    Lambda,
    Dot,
    LParen,
    RParen,
    Whitespace(String),
}

impl Token {
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Whitespace(_))
    }
}

/// Display trait implementation for Token, giving back its source text.
impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Lambda => write!(f, "{}", LAMBDA_CHAR),
            Token::Dot => write!(f, "."),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Whitespace(text) => write!(f, "{}", text),
        }
    }
}

// Characters that may follow the first character of an identifier.
fn identifier_tail_char() -> Parser<char, char> {
    alt(vec![
        char_range('a', 'z'),
        char_exact('_'),
        char_range('A', 'Z'),
        char_range('0', '9'),
    ])
}

/// Recognizes `[a-z_][a-zA-Z0-9_]*`.
pub fn identifier() -> Parser<String, char> {
    let head = alt(vec![char_range('a', 'z'), char_exact('_')]);
    let prepend = |first: char| {
        move |rest: Vec<char>| std::iter::once(first).chain(rest).collect::<String>()
    };

    seq(map(prepend, head), many(identifier_tail_char()))
}

/// Recognizes a run of one or more whitespace characters.
pub fn whitespace() -> Parser<String, char> {
    map(
        |chars: Vec<char>| chars.into_iter().collect::<String>(),
        many1(one_of_chars(&WHITESPACE_CHARS)),
    )
}

/// Recognizes any single token.
pub fn token() -> Parser<Token, char> {
    let lambda = alt(vec![char_exact(LAMBDA_CHAR), char_exact(LAMBDA_ALIAS_CHAR)]);

    alt(vec![
        map(Token::Identifier, identifier()),
        seqr(lambda, success(Token::Lambda)),
        seqr(char_exact('.'), success(Token::Dot)),
        seqr(char_exact('('), success(Token::LParen)),
        seqr(char_exact(')'), success(Token::RParen)),
        map(Token::Whitespace, whitespace()),
    ])
}

/// Recognizes a whole source string as tokens. Fails if any character does
/// not start a token.
pub fn token_stream() -> Parser<Vec<Token>, char> {
    complete(many(token()))
}

/// Drops whitespace tokens, which only serve to separate other tokens.
pub fn discard_whitespace(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .filter(|token| !token.is_whitespace())
        .collect()
}

/// Given a string, returns the tokens that comprise it. Whitespace tokens are
/// dropped when `discard_uninteresting` is set.
pub fn run_lexical_analysis(
    program_str: &str,
    discard_uninteresting: bool,
) -> Result<Vec<Token>, ParseFailure> {
    let chars: Vec<char> = program_str.chars().collect();
    let tokens = run_parser(&token_stream(), &chars)?;

    debug!("tokenized {} chars into {} tokens", chars.len(), tokens.len());

    if !discard_uninteresting {
        return Ok(tokens);
    }

    let tokens = discard_whitespace(tokens);
    debug!("{} tokens remain after discarding whitespace", tokens.len());

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Token {
        Token::Identifier(String::from(name))
    }

    // Test if identifiers follow [a-z_][a-zA-Z0-9_]*.
    #[test]
    fn test_identifier() {
        let parser = complete(identifier());

        for accepted in ["x", "_", "var_1", "fooBar9", "_Tmp"] {
            let input: Vec<char> = accepted.chars().collect();
            assert_eq!(
                run_parser(&parser, &input),
                Ok(String::from(accepted)),
                "expected {:?} to be an identifier",
                accepted
            );
        }

        for rejected in ["X", "9x", "", "x-y"] {
            let input: Vec<char> = rejected.chars().collect();
            assert!(
                run_parser(&parser, &input).is_err(),
                "expected {:?} to be rejected",
                rejected
            );
        }
    }

    // Test if run_lexical_analysis keeps whitespace when asked to.
    #[test]
    fn test_token_stream_with_whitespace() {
        let tokens = run_lexical_analysis("(λx . x)  y", false).expect("tokenizing failed");

        assert_eq!(
            tokens,
            vec![
                Token::LParen,
                Token::Lambda,
                ident("x"),
                Token::Whitespace(String::from(" ")),
                Token::Dot,
                Token::Whitespace(String::from(" ")),
                ident("x"),
                Token::RParen,
                Token::Whitespace(String::from("  ")),
                ident("y"),
            ]
        );
    }

    // Test if whitespace of every kind is discarded.
    #[test]
    fn test_discard_whitespace() {
        let tokens =
            run_lexical_analysis(" \t\r\n\u{0B}\u{0C}x \n y ", true).expect("tokenizing failed");

        assert_eq!(tokens, vec![ident("x"), ident("y")]);
    }

    // Test if the backslash is read as a lambda.
    #[test]
    fn test_backslash_lambda() {
        let with_alias = run_lexical_analysis(r"\x.x", true).expect("tokenizing failed");
        let with_lambda = run_lexical_analysis("λx.x", true).expect("tokenizing failed");

        assert_eq!(with_alias, with_lambda);
        assert_eq!(with_alias[0], Token::Lambda);
    }

    // Test if adjacent identifiers need whitespace to be told apart.
    #[test]
    fn test_identifiers_are_maximal() {
        let tokens = run_lexical_analysis("ab c", true).expect("tokenizing failed");

        assert_eq!(tokens, vec![ident("ab"), ident("c")]);
    }

    // Test if an unknown character is a tokenization failure.
    #[test]
    fn test_unknown_character() {
        let result = run_lexical_analysis("x $ y", true);

        assert_eq!(
            result,
            Err(ParseFailure::IncompleteInput {
                remaining: String::from("$ y")
            })
        );
    }

    // Test if the empty string has no tokens.
    #[test]
    fn test_empty_input() {
        assert_eq!(run_lexical_analysis("", true), Ok(vec![]));
    }

    // Test if tokens print as their source text.
    #[test]
    fn test_token_display() {
        let tokens = run_lexical_analysis(r"(\f. f_1)", false).expect("tokenizing failed");
        let printed: String = tokens.iter().map(|token| token.to_string()).collect();

        assert_eq!(printed, "(λf. f_1)");
    }
}
