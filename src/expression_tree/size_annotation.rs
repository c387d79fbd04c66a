//! Attaches layout sizes to every node of an expression.

use log::debug;
use serde::Serialize;

use crate::expression_tree::expression_ast::Expression;

/// Layout data for one node.
///
/// `width` counts the variables below the node and `height` the levels down
/// to the deepest variable. `root` is the horizontal position of the node
/// relative to the left edge of its subtree, in units of leaf slots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeMetadata {
    pub width: usize,
    pub height: usize,
    pub root: f64,
}

impl SizeMetadata {
    pub const LEAF: SizeMetadata = SizeMetadata {
        width: 1,
        height: 1,
        root: 0.0,
    };

    fn abstraction(body: &SizeMetadata) -> Self {
        SizeMetadata {
            width: body.width,
            height: 1 + body.height,
            root: body.root,
        }
    }

    fn application(func: &SizeMetadata, arg: &SizeMetadata) -> Self {
        SizeMetadata {
            width: func.width + arg.width,
            height: 1 + func.height.max(arg.height),
            root: (func.root + func.width as f64 + arg.root) / 2.0,
        }
    }
}

pub type SizedExpression = Expression<SizeMetadata>;

/// Builds a new tree with `SizeMetadata` on every node. Whatever metadata
/// `expr` already carries is ignored and left untouched.
pub fn size_expression<M>(expr: &Expression<M>) -> SizedExpression {
    let sized = expr.cata(
        |binder, body: SizedExpression| Expression::Abstraction {
            binder: binder.to_string(),
            metadata: SizeMetadata::abstraction(body.metadata()),
            body: Box::new(body),
        },
        |func: SizedExpression, arg: SizedExpression| Expression::Application {
            metadata: SizeMetadata::application(func.metadata(), arg.metadata()),
            func: Box::new(func),
            arg: Box::new(arg),
        },
        |name| Expression::Variable {
            name: name.to_string(),
            metadata: SizeMetadata::LEAF,
        },
    );

    debug!(
        "sized expression: width {}, height {}",
        sized.metadata().width,
        sized.metadata().height
    );

    sized
}
