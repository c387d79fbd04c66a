//! A few well-known combinators, handy as demo input.

use crate::expression_tree::Expression;

fn var(name: &str) -> Expression {
    Expression::variable(name)
}

fn abs(binder: &str, body: Expression) -> Expression {
    Expression::abstraction(binder, body)
}

fn app(func: Expression, arg: Expression) -> Expression {
    Expression::application(func, arg)
}

/// Names accepted by `by_name`.
pub const SAMPLE_NAMES: [&str; 4] = ["S", "K", "I", "Y"];

/// `λx. λy. λz. x z (y z)`
pub fn s() -> Expression {
    abs(
        "x",
        abs(
            "y",
            abs(
                "z",
                app(app(var("x"), var("z")), app(var("y"), var("z"))),
            ),
        ),
    )
}

/// `λx. λy. x`
pub fn k() -> Expression {
    abs("x", abs("y", var("x")))
}

/// `λx. x`
pub fn i() -> Expression {
    abs("x", var("x"))
}

/// `λf. (λx. f (x x)) (λx. f (x x))`
pub fn y() -> Expression {
    let half = || abs("x", app(var("f"), app(var("x"), var("x"))));
    abs("f", app(half(), half()))
}

/// Looks up a sample by name, ignoring case.
pub fn by_name(name: &str) -> Option<Expression> {
    match name.to_ascii_uppercase().as_str() {
        "S" => Some(s()),
        "K" => Some(k()),
        "I" => Some(i()),
        "Y" => Some(y()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression_tree::size_expression;
    use crate::recursive_descent_parsing::parse_expression;

    // Test if every sample matches its documented source text.
    #[test]
    fn test_samples_match_source() {
        let cases = [
            (s(), r"\x. \y. \z. x z (y z)"),
            (k(), r"\x. \y. x"),
            (i(), r"\x. x"),
            (y(), r"\f. (\x. f (x x)) (\x. f (x x))"),
        ];

        for (sample, source) in cases {
            assert_eq!(parse_expression(source), Ok(sample));
        }
    }

    // Test if samples are closed terms.
    #[test]
    fn test_samples_are_closed() {
        for name in SAMPLE_NAMES {
            let sample = by_name(name).expect("sample missing");
            assert!(sample.free_variables().is_empty(), "{} has free variables", name);
        }
    }

    // Test if lookup ignores case and rejects unknown names.
    #[test]
    fn test_by_name() {
        assert_eq!(by_name("k"), Some(k()));
        assert_eq!(by_name("Omega"), None);
    }

    // Test if the Y combinator has the expected layout sizes.
    #[test]
    fn test_y_sizes() {
        let sized = size_expression(&y());

        assert_eq!(sized.metadata().width, 6);
        assert_eq!(sized.metadata().height, 6);
    }
}
