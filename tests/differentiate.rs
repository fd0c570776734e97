use marginal::{differentiate, normalize, parse_expr, pretty, Expr};

fn canon(src: &str) -> Expr {
    normalize(parse_expr(src).unwrap())
}

fn diff(var: &str, src: &str) -> Expr {
    normalize(differentiate(var, &parse_expr(src).unwrap()))
}

fn assert_diff(var: &str, src: &str, expected: &str) {
    let got = diff(var, src);
    let want = canon(expected);
    assert_eq!(got, want, "d/d{var} {src}: got {}", pretty(&got));
}

#[test]
fn derivatives_of_atoms() {
    assert_diff("x", "x", "1");
    assert_diff("x", "y", "0");
    assert_diff("x", "5", "0");
}

#[test]
fn polynomial_rules() {
    assert_diff("x", "2*x^2 + 3*x", "4*x + 3");
    assert_diff("x", "x^4", "4*x^3");
    assert_diff("x", "(x + 1)*(x - 1)", "2*x");
}

#[test]
fn cobb_douglas_marginal_utilities() {
    assert_diff("x", "x*y^4", "y^4");
    assert_diff("y", "x*y^4", "4*x*y^3");
}

#[test]
fn quotient_rule() {
    assert_diff("x", "x/(x + 1)", "1/(x + 1)^2");
}

#[test]
fn log_and_exp_chain_rules() {
    assert_diff("x", "log(x)", "1/x");
    assert_diff("x", "exp(x^2)", "2*x*exp(x^2)");
    assert_diff("x", "log(x^2 + 1)", "2*x/(x^2 + 1)");
}

#[test]
fn variable_exponent_uses_logarithmic_derivative() {
    assert_diff("x", "x^x", "x^x*(log(x) + 1)");
}
