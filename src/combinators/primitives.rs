//! The parser type and the fundamental combinators every other combinator is
//! built from.

use std::fmt::Display;
use std::rc::Rc;

use once_cell::unsync::OnceCell;

use crate::combinators::failure::{describe_remaining, ParseFailure};

/// A successful parse: the produced value and the input left over.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<'i, T, U> {
    pub value: T,
    pub remaining: &'i [U],
}

/// Result of running a parser over a slice of `U`.
pub type ParseResult<'i, T, U> = Result<Parsed<'i, T, U>, ParseFailure>;

type ParseFn<T, U> = dyn for<'i> Fn(&'i [U]) -> ParseResult<'i, T, U>;

/// A parser producing a `T` from a sequence of `U`.
///
/// Parsers are immutable values. Cloning one is cheap and combining parsers
/// always builds a new parser; nothing ever mutates an existing one.
pub struct Parser<T, U> {
    parse_fn: Rc<ParseFn<T, U>>,
}

impl<T, U> Clone for Parser<T, U> {
    fn clone(&self) -> Self {
        Self {
            parse_fn: Rc::clone(&self.parse_fn),
        }
    }
}

impl<T, U> Parser<T, U> {
    /// Wraps a parsing function.
    pub fn new<F>(parse_fn: F) -> Self
    where
        F: for<'i> Fn(&'i [U]) -> ParseResult<'i, T, U> + 'static,
    {
        Self {
            parse_fn: Rc::new(parse_fn),
        }
    }

    /// Runs the parser on `input`.
    pub fn parse<'i>(&self, input: &'i [U]) -> ParseResult<'i, T, U> {
        (self.parse_fn)(input)
    }
}

/// Always succeeds with `value` without consuming input.
pub fn success<T, U>(value: T) -> Parser<T, U>
where
    T: Clone + 'static,
    U: 'static,
{
    Parser::new(move |input| {
        Ok(Parsed {
            value: value.clone(),
            remaining: input,
        })
    })
}

/// Always fails with `message` without consuming input.
pub fn failure<T, U>(message: impl Into<String>) -> Parser<T, U>
where
    T: 'static,
    U: 'static,
{
    let message = message.into();

    Parser::new(move |_| {
        Err(ParseFailure::Failure {
            message: message.clone(),
        })
    })
}

/// Consumes one element if `predicate` holds on it.
pub fn satisfy<U, P>(predicate: P) -> Parser<U, U>
where
    U: Clone + Display + 'static,
    P: Fn(&U) -> bool + 'static,
{
    Parser::new(move |input: &[U]| match input.split_first() {
        None => Err(ParseFailure::UnexpectedEndOfInput),
        Some((first, rest)) => {
            if predicate(first) {
                Ok(Parsed {
                    value: first.clone(),
                    remaining: rest,
                })
            } else {
                Err(ParseFailure::PredicateNotSatisfied {
                    remaining: describe_remaining(input),
                })
            }
        }
    })
}

/// Applicative sequencing: runs `pf` for a function, then `pa` on what is
/// left for its argument, and applies one to the other.
pub fn seq<F, A, B, U>(pf: Parser<F, U>, pa: Parser<A, U>) -> Parser<B, U>
where
    F: FnOnce(A) -> B + 'static,
    A: 'static,
    B: 'static,
    U: 'static,
{
    Parser::new(move |input| {
        let function = pf
            .parse(input)
            .map_err(|failure| ParseFailure::SeqFunction(Box::new(failure)))?;
        let argument = pa
            .parse(function.remaining)
            .map_err(|failure| ParseFailure::SeqArgument(Box::new(failure)))?;

        Ok(Parsed {
            value: (function.value)(argument.value),
            remaining: argument.remaining,
        })
    })
}

/// Ordered choice. Every alternative is tried against the original input and
/// the first success wins; if none succeeds, all of their failures are kept.
pub fn alt<T, U>(parsers: Vec<Parser<T, U>>) -> Parser<T, U>
where
    T: 'static,
    U: 'static,
{
    Parser::new(move |input| {
        let mut failures = Vec::with_capacity(parsers.len());

        for parser in &parsers {
            match parser.parse(input) {
                Ok(parsed) => return Ok(parsed),
                Err(failure) => failures.push(failure),
            }
        }

        Err(ParseFailure::AllAlternativesFailed(failures))
    })
}

/// Succeeds only if `parser` succeeds and leaves no input behind.
pub fn complete<T, U>(parser: Parser<T, U>) -> Parser<T, U>
where
    T: 'static,
    U: Display + 'static,
{
    Parser::new(move |input| {
        let parsed = parser.parse(input)?;

        if !parsed.remaining.is_empty() {
            return Err(ParseFailure::IncompleteInput {
                remaining: describe_remaining(parsed.remaining),
            });
        }

        Ok(parsed)
    })
}

/// Defers building a parser until it is first run.
///
/// Self-referential grammar rules go through here; otherwise building the
/// rule would build itself again without end. The built parser is cached.
pub fn lazy<T, U, F>(thunk: F) -> Parser<T, U>
where
    T: 'static,
    U: 'static,
    F: Fn() -> Parser<T, U> + 'static,
{
    let cell: OnceCell<Parser<T, U>> = OnceCell::new();

    Parser::new(move |input| cell.get_or_init(&thunk).parse(input))
}

/// Builds a parser that refers to itself.
///
/// `rule` gets a handle to the parser being defined and returns its
/// definition. Unlike `lazy`, every run of the handle goes through that one
/// definition, so the grammar stays a finite graph and any state it keeps is
/// shared by all of its recursive calls.
pub fn recursive<T, U, F>(rule: F) -> Parser<T, U>
where
    T: 'static,
    U: 'static,
    F: FnOnce(Parser<T, U>) -> Parser<T, U>,
{
    let slot: Rc<OnceCell<Parser<T, U>>> = Rc::new(OnceCell::new());

    // The handle only holds a weak reference, so the definition does not
    // keep itself alive.
    let weak_slot = Rc::downgrade(&slot);
    let handle = Parser::new(move |input| {
        let definition = weak_slot.upgrade().and_then(|slot| slot.get().cloned());
        match definition {
            Some(parser) => parser.parse(input),
            None => Err(unbound_recursive_rule()),
        }
    });

    let _ = slot.set(rule(handle));

    Parser::new(move |input| match slot.get() {
        Some(parser) => parser.parse(input),
        None => Err(unbound_recursive_rule()),
    })
}

fn unbound_recursive_rule() -> ParseFailure {
    ParseFailure::Failure {
        message: String::from("Recursive rule ran outside of its definition"),
    }
}

/// Runs `parser` over all of `input` and returns its value.
///
/// Trailing input is not checked here; wrap the parser in `complete` for
/// that.
pub fn run_parser<T, U>(parser: &Parser<T, U>, input: &[U]) -> Result<T, ParseFailure> {
    parser.parse(input).map(|parsed| parsed.value)
}
