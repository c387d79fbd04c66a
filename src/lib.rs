//! This crate parses lambda calculus expressions with a small
//! parser-combinator library and annotates the resulting trees with the
//! layout sizes renderers need.

pub mod combinators;
pub mod end_to_end;
pub mod expression_tree;
pub mod lexical_analysis;
pub mod recursive_descent_parsing;
pub mod sample_expressions;

pub use expression_tree::{size_expression, Expression, SizeMetadata, SizedExpression};
pub use recursive_descent_parsing::{parse_expression, ParseError};
