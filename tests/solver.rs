use marginal::{isolate, normalize, parse_expr, pretty, solve_pair, Expr};

fn canon(src: &str) -> Expr {
    normalize(parse_expr(src).unwrap())
}

fn solved(equation: &str, var: &str) -> Expr {
    isolate(&parse_expr(equation).unwrap(), var).unwrap()
}

fn assert_isolates(equation: &str, var: &str, expected: &str) {
    let got = solved(equation, var);
    let want = canon(expected);
    assert_eq!(got, want, "{equation} for {var}: got {}", pretty(&got));
}

#[test]
fn linear_equations() {
    assert_isolates("2*x - 6", "x", "3");
    assert_isolates("x + 4*y - 40", "x", "40 - 4*y");
}

#[test]
fn parameters_stay_symbolic() {
    assert_isolates("Py*y - 4*Px*x", "x", "Py*y/(4*Px)");
    assert_isolates("x + 4*y - I", "y", "(I - x)/4");
}

#[test]
fn denominators_are_cleared() {
    assert_isolates("y/(4*x) - 1/4", "x", "y");
    assert_isolates("1/x - 1", "x", "1");
}

#[test]
fn pure_powers_take_roots() {
    assert_isolates("x^4 - 16", "x", "2");
    assert_isolates("x^2 - 9", "x", "3");
    assert_isolates("x^2 - 2", "x", "2^(1/2)");
}

#[test]
fn quadratics_take_the_positive_branch() {
    assert_isolates("x^2 - 5*x + 6", "x", "3");
}

#[test]
fn unsolvable_shapes_are_reported() {
    assert!(isolate(&parse_expr("log(x) + x").unwrap(), "x").is_err());
    assert!(isolate(&parse_expr("y - 1").unwrap(), "x").is_err());
    assert!(isolate(&parse_expr("x - x").unwrap(), "x").is_err());
}

#[test]
fn tangency_and_budget_solve_together() {
    let tangency = parse_expr("y/(4*x) - 1/4").unwrap();
    let budget = parse_expr("x + 4*y - 40").unwrap();
    let (x, y) = solve_pair(&tangency, &budget, "x", "y").unwrap();
    assert_eq!(x, canon("8"));
    assert_eq!(y, canon("8"));
}

#[test]
fn solve_pair_swaps_roles_when_needed() {
    // The first equation pins down y alone; x must come from the second.
    let fixed = parse_expr("y - 2").unwrap();
    let budget = parse_expr("x + y - 10").unwrap();
    let (x, y) = solve_pair(&fixed, &budget, "x", "y").unwrap();
    assert_eq!(x, canon("8"));
    assert_eq!(y, canon("2"));
}
