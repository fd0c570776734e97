use std::collections::HashMap;

use marginal::{evaluate, normalize, parse_expr, rational, Expr};

fn parsed(src: &str) -> Expr {
    parse_expr(src).unwrap()
}

fn canon(src: &str) -> Expr {
    normalize(parse_expr(src).unwrap())
}

#[test]
fn caret_and_python_power_operators_agree() {
    assert_eq!(parsed("x*y**4"), parsed("x*y^4"));
    assert_eq!(parsed("x**2 + y**2"), parsed("x^2 + y^2"));
}

#[test]
fn decimals_parse_exactly() {
    assert_eq!(parsed("0.25"), Expr::Constant(rational(1, 4)));
    assert_eq!(parsed("2.5"), Expr::Constant(rational(5, 2)));
}

#[test]
fn literal_quotients_fold_to_exact_rationals() {
    assert_eq!(canon("1/2"), Expr::Constant(rational(1, 2)));
    assert_eq!(canon("3/6"), Expr::Constant(rational(1, 2)));
}

#[test]
fn division_is_left_associative() {
    assert_eq!(parsed("x/2/3"), parsed("(x/2)/3"));

    let mut env = HashMap::new();
    env.insert("x".to_string(), 6.0);
    assert_eq!(evaluate(&parsed("x/2/3"), &env).unwrap(), 1.0);
}

#[test]
fn power_binds_only_to_its_immediate_operand() {
    assert_eq!(parsed("x**1/2"), parsed("(x**1)/2"));
    assert_eq!(parsed("x^1/2"), parsed("(x^1)/2"));
}

#[test]
fn zero_denominator_parses_without_panicking() {
    let expr = normalize(parsed("1/0"));
    assert!(evaluate(&expr, &HashMap::new()).unwrap().is_infinite());
}

#[test]
fn sqrt_is_a_half_power() {
    assert_eq!(canon("sqrt(x)"), canon("x^(1/2)"));
}

#[test]
fn ln_is_an_alias_for_log() {
    assert_eq!(parsed("ln(x)"), parsed("log(x)"));
}

#[test]
fn function_prefix_identifiers_stay_identifiers() {
    assert_eq!(parsed("expr"), Expr::var("expr"));
    assert_eq!(parsed("exp(x)"), Expr::Exp(Expr::var("x").boxed()));
}

#[test]
fn precedence_binds_pow_tighter_than_mul() {
    assert_eq!(parsed("2*x^3"), parsed("2*(x^3)"));
}

#[test]
fn malformed_input_is_rejected() {
    assert!(parse_expr("x +* y").is_err());
    assert!(parse_expr("").is_err());
    assert!(parse_expr("(x + y").is_err());
    assert!(parse_expr("sqrt x").is_err());
}
