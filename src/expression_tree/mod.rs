//! The expression tree, its traversals, and the layout annotation pass.

pub mod expression_ast;
pub mod size_annotation;

#[cfg(test)]
pub(crate) mod random_trees;

pub use expression_ast::{is_identifier, AstError, Expression};
pub use size_annotation::{size_expression, SizeMetadata, SizedExpression};
