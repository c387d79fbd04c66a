//! Data structures to represent lambda calculus expressions, the two
//! traversal operators over them, and the computations derived from those.

use std::collections::BTreeSet;
use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::lexical_analysis::LAMBDA_CHAR;

lazy_static! {
    static ref IDENTIFIER_REGEX: Regex =
        Regex::new(r"^[a-z_][a-zA-Z0-9_]*$").expect("Unable to compile identifier regex.");
}

/// Checks whether `name` can be written as a variable or binder in source.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER_REGEX.is_match(name)
}

/// Errors raised when building an expression by hand.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AstError {
    InvalidIdentifier(String),
}

impl Display for AstError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIdentifier(name) => {
                return write!(f, "{:?} is not a valid identifier", name);
            }
        }
    }
}

impl std::error::Error for AstError {}

/// Represents a lambda-calculus expression.
///
/// Every node carries a `metadata` slot. Freshly parsed trees use `()`;
/// annotation passes build a new tree with a richer type rather than
/// writing into an existing one.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Expression<M = ()> {
    Abstraction {
        binder: String,
        body: Box<Expression<M>>,
        metadata: M,
    },
    Application {
        func: Box<Expression<M>>,
        arg: Box<Expression<M>>,
        metadata: M,
    },
    Variable {
        name: String,
        metadata: M,
    },
}

impl Expression {
    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable {
            name: name.into(),
            metadata: (),
        }
    }

    pub fn abstraction(binder: impl Into<String>, body: Expression) -> Self {
        Expression::Abstraction {
            binder: binder.into(),
            body: Box::new(body),
            metadata: (),
        }
    }

    pub fn application(func: Expression, arg: Expression) -> Self {
        Expression::Application {
            func: Box::new(func),
            arg: Box::new(arg),
            metadata: (),
        }
    }

    /// Like `variable`, but rejects names the tokenizer would not produce.
    pub fn try_variable(name: impl Into<String>) -> Result<Self, AstError> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(AstError::InvalidIdentifier(name));
        }
        Ok(Self::variable(name))
    }

    /// Like `abstraction`, but rejects binders the tokenizer would not
    /// produce.
    pub fn try_abstraction(binder: impl Into<String>, body: Expression) -> Result<Self, AstError> {
        let binder = binder.into();
        if !is_identifier(&binder) {
            return Err(AstError::InvalidIdentifier(binder));
        }
        Ok(Self::abstraction(binder, body))
    }
}

// Which kind of node a printed subexpression came from.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Shape {
    Abstraction,
    Application,
    Variable,
}

// A parent node waiting on the fold of one of its children.
enum PendingFold<'a, M, R> {
    Body { binder: &'a str },
    Func { arg: &'a Expression<M> },
    Arg { func: R },
}

impl<M> Expression<M> {
    pub fn metadata(&self) -> &M {
        match self {
            Expression::Abstraction { metadata, .. }
            | Expression::Application { metadata, .. }
            | Expression::Variable { metadata, .. } => metadata,
        }
    }

    /// Dispatches on the outermost node only.
    pub fn match_with<R>(
        &self,
        on_abstraction: impl FnOnce(&str, &Expression<M>) -> R,
        on_application: impl FnOnce(&Expression<M>, &Expression<M>) -> R,
        on_variable: impl FnOnce(&str) -> R,
    ) -> R {
        match self {
            Expression::Abstraction { binder, body, .. } => on_abstraction(binder, body),
            Expression::Application { func, arg, .. } => on_application(func, arg),
            Expression::Variable { name, .. } => on_variable(name),
        }
    }

    /// Folds the tree bottom-up: children are folded first and their results
    /// handed to the case for their parent.
    pub fn cata<R>(
        &self,
        case_abstraction: impl Fn(&str, R) -> R,
        case_application: impl Fn(R, R) -> R,
        case_variable: impl Fn(&str) -> R,
    ) -> R {
        self.cata_with(&case_abstraction, &case_application, &case_variable)
    }

    // Walks the tree with an explicit stack, so deep trees such as long
    // applications do not recurse once per level.
    fn cata_with<R, A, P, V>(&self, case_abstraction: &A, case_application: &P, case_variable: &V) -> R
    where
        A: Fn(&str, R) -> R,
        P: Fn(R, R) -> R,
        V: Fn(&str) -> R,
    {
        let mut pending: Vec<PendingFold<'_, M, R>> = Vec::new();
        let mut current = self;

        loop {
            // Descend along the leftmost path to a variable.
            let mut folded = loop {
                match current {
                    Expression::Abstraction { binder, body, .. } => {
                        pending.push(PendingFold::Body { binder: binder.as_str() });
                        current = &**body;
                    }
                    Expression::Application { func, arg, .. } => {
                        pending.push(PendingFold::Func { arg: &**arg });
                        current = &**func;
                    }
                    Expression::Variable { name, .. } => break case_variable(name),
                }
            };

            // Climb back up until some application still has its argument
            // left to fold.
            loop {
                match pending.pop() {
                    None => return folded,
                    Some(PendingFold::Body { binder }) => {
                        folded = case_abstraction(binder, folded);
                    }
                    Some(PendingFold::Func { arg }) => {
                        pending.push(PendingFold::Arg { func: folded });
                        current = arg;
                        break;
                    }
                    Some(PendingFold::Arg { func }) => {
                        folded = case_application(func, folded);
                    }
                }
            }
        }
    }

    /// Number of nodes on the longest path from this node to a variable.
    pub fn depth(&self) -> usize {
        self.cata(
            |_, body: usize| 1 + body,
            |func: usize, arg: usize| 1 + func.max(arg),
            |_| 1,
        )
    }

    /// Number of variable occurrences.
    pub fn leaf_count(&self) -> usize {
        self.cata(|_, body: usize| body, |func: usize, arg: usize| func + arg, |_| 1)
    }

    pub fn node_count(&self) -> usize {
        self.cata(
            |_, body: usize| 1 + body,
            |func: usize, arg: usize| 1 + func + arg,
            |_| 1,
        )
    }

    /// Computes the free variables in the expression.
    pub fn free_variables(&self) -> BTreeSet<String> {
        self.cata(
            |binder, mut body: BTreeSet<String>| {
                body.remove(binder);
                body
            },
            |mut func: BTreeSet<String>, arg| {
                func.extend(arg);
                func
            },
            |name| BTreeSet::from([name.to_string()]),
        )
    }

    /// Collects the names introduced by abstractions.
    pub fn bound_variables(&self) -> BTreeSet<String> {
        self.cata(
            |binder, mut body: BTreeSet<String>| {
                body.insert(binder.to_string());
                body
            },
            |mut func: BTreeSet<String>, arg| {
                func.extend(arg);
                func
            },
            |_| BTreeSet::new(),
        )
    }

    /// Copies the tree without its metadata.
    pub fn strip_metadata(&self) -> Expression {
        self.cata(
            |binder, body| Expression::abstraction(binder, body),
            |func, arg| Expression::application(func, arg),
            |name| Expression::variable(name),
        )
    }
}

// Wraps `text` in parentheses when `needs_parens` is set.
fn parenthesize(text: String, needs_parens: bool) -> String {
    if needs_parens {
        format!("({})", text)
    } else {
        text
    }
}

// Prints an expression so that parsing the output gives back the same tree.
fn expr_to_string<M>(expr: &Expression<M>) -> String {
    let (text, _) = expr.cata(
        |binder, (body, _): (String, Shape)| (format!("{}{}. {}", LAMBDA_CHAR, binder, body), Shape::Abstraction),
        |(func, func_shape), (arg, arg_shape)| {
            // An abstraction would swallow everything after it, and an
            // application in argument position would re-associate.
            let func = parenthesize(func, func_shape == Shape::Abstraction);
            let arg = parenthesize(arg, arg_shape != Shape::Variable);
            (format!("{} {}", func, arg), Shape::Application)
        },
        |name| (name.to_string(), Shape::Variable),
    );

    text
}

impl<M> Display for Expression<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", expr_to_string(self))
    }
}
