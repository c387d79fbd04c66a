//! Structured failures produced by the combinators.

use std::fmt::{self, Display};

/// How many input elements a failure keeps when describing the remaining
/// input.
const REMAINING_PREVIEW_LEN: usize = 32;

/// Represents why a parser rejected its input.
///
/// Failures are ordinary values: they are built by the primitive that gave
/// up and wrapped by every combinator they pass through, so the `Display`
/// output reads as a tree of every path that was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    /// Raised by the `failure` primitive.
    Failure { message: String },
    /// `satisfy` ran out of input.
    UnexpectedEndOfInput,
    /// `satisfy` saw an element its predicate rejected.
    PredicateNotSatisfied { remaining: String },
    /// The function half of a `seq` failed.
    SeqFunction(Box<ParseFailure>),
    /// The argument half of a `seq` failed.
    SeqArgument(Box<ParseFailure>),
    /// Every branch of an `alt` failed, in the order they were tried.
    AllAlternativesFailed(Vec<ParseFailure>),
    /// A `complete` parser succeeded on a prefix only.
    IncompleteInput { remaining: String },
    /// A memoized parser already failed at this input; the first failure
    /// holds the details.
    AlreadyReported { remaining: String },
    /// A `nesting_limit` parser was entered more than `max_depth` times
    /// without returning.
    NestingTooDeep { max_depth: usize },
}

impl ParseFailure {
    fn fmt_nested(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);

        match self {
            Self::Failure { message } => write!(f, "FAILURE: {}", message),
            Self::UnexpectedEndOfInput => write!(f, "SATISFY: Unexpected end of input"),
            Self::PredicateNotSatisfied { remaining } => write!(
                f,
                "SATISFY: Failed to satisfy condition at\n{}  - {}",
                indent, remaining
            ),
            Self::SeqFunction(inner) => {
                write!(f, "SEQ: Failed to parse function\n{}  - ", indent)?;
                inner.fmt_nested(f, depth + 1)
            }
            Self::SeqArgument(inner) => {
                write!(f, "SEQ: Failed to parse argument\n{}  - ", indent)?;
                inner.fmt_nested(f, depth + 1)
            }
            Self::AllAlternativesFailed(children) => {
                write!(f, "ALT: All alternatives failed")?;
                for child in children {
                    write!(f, "\n{}  - ", indent)?;
                    child.fmt_nested(f, depth + 1)?;
                }
                Ok(())
            }
            Self::IncompleteInput { remaining } => write!(
                f,
                "COMPLETE: Parser did not consume entire input\n{}  - Remaining: {}",
                indent, remaining
            ),
            Self::AlreadyReported { remaining } => write!(
                f,
                "MEMO: Failed here before, see above\n{}  - {}",
                indent, remaining
            ),
            Self::NestingTooDeep { max_depth } => {
                write!(f, "NESTING: Input nested more than {} levels deep", max_depth)
            }
        }
    }
}

impl Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_nested(f, 0)
    }
}

impl std::error::Error for ParseFailure {}

/// Renders the start of the unconsumed input for use in a failure message.
pub fn describe_remaining<U: Display>(remaining: &[U]) -> String {
    let mut out: String = remaining
        .iter()
        .take(REMAINING_PREVIEW_LEN)
        .map(|element| element.to_string())
        .collect();

    if remaining.len() > REMAINING_PREVIEW_LEN {
        out.push_str("...");
    }

    out
}
