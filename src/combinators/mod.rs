//! A small parser-combinator library, generic over the input element type.
//!
//! The same combinators drive both the character-level tokenizer and the
//! token-level expression grammar.

pub mod derived;
pub mod failure;
pub mod primitives;

pub use derived::{
    chainl1, char_exact, char_range, many, many1, map, memoize_failures, nesting_limit,
    one_of_chars, seql, seqr,
};
pub use failure::ParseFailure;
pub use primitives::{
    alt, complete, failure, lazy, recursive, run_parser, satisfy, seq, success, ParseResult, Parsed,
    Parser,
};
