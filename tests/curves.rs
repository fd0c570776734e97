use std::collections::HashMap;

use marginal::{evaluate, normalize, parse_expr, pretty, rational, Expr, Problem};

fn canon(src: &str) -> Expr {
    normalize(parse_expr(src).unwrap())
}

fn cobb_douglas() -> Problem {
    Problem::new("x*y^4", rational(1, 1), rational(4, 1), rational(40, 1)).unwrap()
}

#[test]
fn engel_curves_are_linear_in_income() {
    let engel = cobb_douglas().engel_curves().unwrap();
    assert_eq!(
        engel.x_of_income,
        canon("I/5"),
        "got {}",
        pretty(&engel.x_of_income)
    );
    assert_eq!(engel.y_of_income, canon("I/5"));
}

#[test]
fn demand_curves_fall_in_own_price() {
    let demand = cobb_douglas().demand_curves().unwrap();
    assert_eq!(
        demand.x_of_px,
        canon("8/Px"),
        "got {}",
        pretty(&demand.x_of_px)
    );
    assert_eq!(demand.y_of_py, canon("32/Py"));
}

#[test]
fn demand_curves_evaluate_at_the_problem_prices_to_the_optimum() {
    let demand = cobb_douglas().demand_curves().unwrap();
    let mut env = HashMap::new();
    env.insert("Px".to_string(), 1.0);
    assert_eq!(evaluate(&demand.x_of_px, &env).unwrap(), 8.0);
    let mut env = HashMap::new();
    env.insert("Py".to_string(), 4.0);
    assert_eq!(evaluate(&demand.y_of_py, &env).unwrap(), 8.0);
}

#[test]
fn income_consumption_curve_is_the_tangency_locus() {
    let icc = cobb_douglas().income_consumption_curve().unwrap();
    assert_eq!(icc, canon("x"), "got {}", pretty(&icc));
}

#[test]
fn price_consumption_curve_is_flat_for_cobb_douglas() {
    // y spending is a fixed income share, so sweeping Px leaves y at 8.
    let pcc = cobb_douglas().price_consumption_curve().unwrap();
    assert_eq!(pcc, canon("8"), "got {}", pretty(&pcc));
}

#[test]
fn indifference_curve_passes_through_the_optimum() {
    let p = cobb_douglas();
    let optimum = p.optimum().unwrap();
    let curve = p.indifference_curve(&optimum).unwrap();
    assert_eq!(curve, canon("(32768/x)^(1/4)"), "got {}", pretty(&curve));

    let mut env = HashMap::new();
    env.insert("x".to_string(), 8.0);
    let y = evaluate(&curve, &env).unwrap();
    assert!((y - 8.0).abs() < 1e-9);
}

#[test]
fn perfect_substitutes_have_no_closed_form_curves() {
    let p = Problem::new("x + 2*y", rational(1, 1), rational(4, 1), rational(40, 1)).unwrap();
    assert!(p.engel_curves().is_err());
    assert!(p.demand_curves().is_err());
    assert!(p.income_consumption_curve().is_err());
    assert!(p.price_consumption_curve().is_err());
}
