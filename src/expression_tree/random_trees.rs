//! Seeded random expressions for the property tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::expression_tree::expression_ast::Expression;

const NAMES: [&str; 6] = ["x", "y", "z", "f", "g_1", "_long_Name"];

fn random_name(rng: &mut StdRng) -> &'static str {
    NAMES[rng.gen_range(0..NAMES.len())]
}

/// Builds a random tree no deeper than `max_depth`.
pub fn random_expression(rng: &mut StdRng, max_depth: usize) -> Expression {
    if max_depth <= 1 || rng.gen_bool(0.25) {
        return Expression::variable(random_name(rng));
    }

    if rng.gen_bool(0.4) {
        let binder = random_name(rng);
        Expression::abstraction(binder, random_expression(rng, max_depth - 1))
    } else {
        let func = random_expression(rng, max_depth - 1);
        let arg = random_expression(rng, max_depth - 1);
        Expression::application(func, arg)
    }
}

/// Builds `count` trees from a fixed seed, so failures are reproducible.
pub fn random_expressions(seed: u64, count: usize, max_depth: usize) -> Vec<Expression> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| random_expression(&mut rng, max_depth))
        .collect()
}
