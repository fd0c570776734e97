use marginal::{normalize, parse_expr, pretty, rational, Expr, Problem};

fn canon(src: &str) -> Expr {
    normalize(parse_expr(src).unwrap())
}

fn problem(utility: &str, px: i64, py: i64, income: i64) -> Problem {
    Problem::new(
        utility,
        rational(px, 1),
        rational(py, 1),
        rational(income, 1),
    )
    .unwrap()
}

#[test]
fn cobb_douglas_mrs() {
    let p = problem("x*y^4", 1, 4, 40);
    let mrs = p.mrs().unwrap();
    assert_eq!(mrs, canon("y/(4*x)"), "got {}", pretty(&mrs));
}

#[test]
fn cobb_douglas_interior_optimum() {
    let p = problem("x*y^4", 1, 4, 40);
    let optimum = p.optimum().unwrap();
    assert_eq!(optimum.x, canon("8"));
    assert_eq!(optimum.y, canon("8"));
    assert_eq!(optimum.to_f64().unwrap(), (8.0, 8.0));
}

#[test]
fn perfect_substitutes_corner_on_x() {
    // MRS is 1/2 everywhere, above the price ratio 1/4: spend it all on x.
    let p = problem("x + 2*y", 1, 4, 40);
    let optimum = p.optimum().unwrap();
    assert_eq!(optimum.x, canon("40"));
    assert_eq!(optimum.y, canon("0"));
}

#[test]
fn perfect_substitutes_corner_on_y() {
    // MRS 1/2 below the price ratio 1: y is the better buy.
    let p = problem("x + 2*y", 1, 1, 40);
    let optimum = p.optimum().unwrap();
    assert_eq!(optimum.x, canon("0"));
    assert_eq!(optimum.y, canon("40"));
}

#[test]
fn quasilinear_interior_optimum() {
    let p = problem("log(x) + y", 1, 1, 4);
    let optimum = p.optimum().unwrap();
    assert_eq!(optimum.x, canon("1"));
    assert_eq!(optimum.y, canon("3"));
}

#[test]
fn quasilinear_negative_quantity_clamps_to_corner() {
    // Tangency would put y at -1/2; the feasible optimum is all income on x.
    let p = Problem::new("log(x) + y", rational(1, 1), rational(1, 1), rational(1, 2)).unwrap();
    let optimum = p.optimum().unwrap();
    assert_eq!(optimum.x, canon("1/2"));
    assert_eq!(optimum.y, canon("0"));
}

#[test]
fn utility_must_reference_only_the_two_goods() {
    assert!(Problem::new("x*z", rational(1, 1), rational(1, 1), rational(1, 1)).is_err());
}

#[test]
fn nonpositive_prices_and_income_are_rejected() {
    assert!(Problem::new("x*y", rational(0, 1), rational(1, 1), rational(1, 1)).is_err());
    assert!(Problem::new("x*y", rational(1, 1), rational(-1, 1), rational(1, 1)).is_err());
    assert!(Problem::new("x*y", rational(1, 1), rational(1, 1), rational(0, 1)).is_err());
}

#[test]
fn utility_independent_of_y_has_no_mrs() {
    let p = problem("x", 1, 1, 10);
    assert!(p.mrs().is_err());
}

#[test]
fn with_income_and_with_prices_leave_the_original_alone() {
    let p = problem("x*y^4", 1, 4, 40);
    let richer = p.with_income(rational(80, 1)).unwrap();
    let repriced = p.with_prices(rational(2, 1), rational(4, 1)).unwrap();

    assert_eq!(p.income(), &rational(40, 1));
    assert_eq!(richer.income(), &rational(80, 1));
    assert_eq!(repriced.px(), &rational(2, 1));

    let optimum = richer.optimum().unwrap();
    assert_eq!(optimum.x, canon("16"));
    assert_eq!(optimum.y, canon("16"));

    assert!(p.with_income(rational(0, 1)).is_err());
    assert!(p.with_prices(rational(1, 1), rational(0, 1)).is_err());
}
