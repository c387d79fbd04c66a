//! Combinators built on top of the primitives.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fmt::Display;

use crate::combinators::failure::{describe_remaining, ParseFailure};
use crate::combinators::primitives::{alt, satisfy, seq, success, Parsed, Parser};

/// Transforms the value of a successful parse.
pub fn map<A, B, U, F>(f: F, parser: Parser<A, U>) -> Parser<B, U>
where
    A: 'static,
    B: 'static,
    U: 'static,
    F: Fn(A) -> B + Clone + 'static,
{
    seq(success(f), parser)
}

/// Runs both parsers and keeps the left value.
pub fn seql<A, B, U>(pa: Parser<A, U>, pb: Parser<B, U>) -> Parser<A, U>
where
    A: 'static,
    B: 'static,
    U: 'static,
{
    seq(map(|a: A| move |_: B| a, pa), pb)
}

/// Runs both parsers and keeps the right value.
pub fn seqr<A, B, U>(pa: Parser<A, U>, pb: Parser<B, U>) -> Parser<B, U>
where
    A: 'static,
    B: 'static,
    U: 'static,
{
    seq(map(|_: A| |b: B| b, pa), pb)
}

/// Zero or more repetitions of `parser`.
///
/// Repetition stops at the first failure, or as soon as `parser` succeeds
/// without consuming anything.
pub fn many<T, U>(parser: Parser<T, U>) -> Parser<Vec<T>, U>
where
    T: 'static,
    U: 'static,
{
    Parser::new(move |input| {
        let mut values = Vec::new();
        let mut remaining = input;

        while let Ok(parsed) = parser.parse(remaining) {
            if parsed.remaining.len() == remaining.len() {
                break;
            }

            values.push(parsed.value);
            remaining = parsed.remaining;
        }

        Ok(Parsed {
            value: values,
            remaining,
        })
    })
}

/// One or more repetitions of `parser`.
pub fn many1<T, U>(parser: Parser<T, U>) -> Parser<Vec<T>, U>
where
    T: 'static,
    U: 'static,
{
    let cons = |first: T| {
        move |rest: Vec<T>| {
            let mut values = Vec::with_capacity(rest.len() + 1);
            values.push(first);
            values.extend(rest);
            values
        }
    };

    seq(map(cons, parser.clone()), many(parser))
}

/// Parses `p (op p)*` and folds the results from the left with the
/// functions `op` produces.
///
/// Left-recursive rules such as `e -> e op t | t` are written with this
/// instead of recursing on themselves.
pub fn chainl1<T, U, F>(parser: Parser<T, U>, op: Parser<F, U>) -> Parser<T, U>
where
    T: 'static,
    U: 'static,
    F: FnOnce(T, T) -> T + 'static,
{
    let operations = many(seq(map(|f: F| move |rhs: T| (f, rhs), op), parser.clone()));
    let fold_left = |first: T| {
        move |rest: Vec<(F, T)>| rest.into_iter().fold(first, |acc, (f, rhs)| f(acc, rhs))
    };

    seq(map(fold_left, parser), operations)
}

/// Remembers each input `parser` failed on and fails again at once when run
/// on it a second time.
///
/// Entries are keyed by where the input starts and how long it is, so the
/// returned parser must only ever see suffixes of a single input; build a
/// new one per input. Repeats are reported as `AlreadyReported` rather than
/// copied, which keeps failure trees from growing with every retry of the
/// same position. Successes are not cached.
pub fn memoize_failures<T, U>(parser: Parser<T, U>) -> Parser<T, U>
where
    T: 'static,
    U: Display + 'static,
{
    let failed_at: RefCell<HashSet<(usize, usize)>> = RefCell::new(HashSet::new());

    Parser::new(move |input: &[U]| {
        let key = (input.as_ptr() as usize, input.len());

        if failed_at.borrow().contains(&key) {
            return Err(ParseFailure::AlreadyReported {
                remaining: describe_remaining(input),
            });
        }

        let result = parser.parse(input);
        if result.is_err() {
            failed_at.borrow_mut().insert(key);
        }

        result
    })
}

/// Fails with `NestingTooDeep` instead of running `parser` when more than
/// `max_depth` runs of it are already in progress.
///
/// Wrapping the recursion point of a grammar with this bounds how deep the
/// parse can recurse.
pub fn nesting_limit<T, U>(max_depth: usize, parser: Parser<T, U>) -> Parser<T, U>
where
    T: 'static,
    U: 'static,
{
    let depth = Cell::new(0_usize);

    Parser::new(move |input| {
        if depth.get() >= max_depth {
            return Err(ParseFailure::NestingTooDeep { max_depth });
        }

        depth.set(depth.get() + 1);
        let result = parser.parse(input);
        depth.set(depth.get() - 1);

        result
    })
}

/// Matches exactly the character `expected`.
pub fn char_exact(expected: char) -> Parser<char, char> {
    satisfy(move |c: &char| *c == expected)
}

/// Matches any character in `from..=to`.
pub fn char_range(from: char, to: char) -> Parser<char, char> {
    satisfy(move |c: &char| (from..=to).contains(c))
}

/// Matches any one of `options`.
pub fn one_of_chars(options: &[char]) -> Parser<char, char> {
    alt(options.iter().copied().map(char_exact).collect())
}
