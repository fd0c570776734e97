//! Closed-form equation solving for consumer-choice systems.
//!
//! Equations are understood as `expr = 0`. Denominators are cleared first, the
//! numerator is collected as a power series in the target variable with
//! symbolic coefficients, and linear, single-power, and quadratic shapes are
//! solved exactly. Anything else is reported as a typed error rather than
//! guessed at.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::error::{ChoiceError, Result};
use crate::expr::{Expr, Rational, one, zero};
use crate::format::pretty;
use crate::simplify::{
    build_product_from_parts, collect_product, exponent_map, flatten_sum, normalize, simplify_add,
    simplify_div, simplify_fully, simplify_mul, simplify_neg, simplify_pow, simplify_sub,
    substitute,
};
use num_traits::{One, Signed, Zero};

/// Solve `equation = 0` for `var`, returning the isolated value. The result
/// may reference other free symbols of the equation.
pub fn isolate(equation: &Expr, var: &str) -> Result<Expr> {
    let eq = normalize(equation.clone());
    let (num, _den) = as_ratio(&eq);
    let mut powers = collect_powers(&simplify_fully(num), var)?;
    powers.retain(|_, coeff| !coeff.is_zero());

    if powers.is_empty() {
        return Err(ChoiceError::NoClosedForm(format!(
            "equation {} = 0 holds identically",
            pretty(&eq)
        )));
    }

    if powers.len() == 1 {
        let (exp, _) = powers.iter().next().expect("single power term");
        if exp.is_zero() {
            return Err(ChoiceError::NoClosedForm(format!(
                "{var} does not appear in {}",
                pretty(&eq)
            )));
        }
        if exp.is_negative() {
            return Err(ChoiceError::NoClosedForm(format!(
                "{} = 0 has no solution for {var}",
                pretty(&eq)
            )));
        }
        return Ok(zero());
    }

    // Divide through by the lowest power so the constant slot is populated.
    let min = powers.keys().next().cloned().expect("non-empty power map");
    if !min.is_zero() {
        powers = powers
            .into_iter()
            .map(|(k, v)| (k - min.clone(), v))
            .collect();
    }

    let keys: Vec<Rational> = powers.keys().cloned().collect();
    debug!(var, terms = keys.len(), "collected power form");

    if keys.len() == 2 {
        let c0 = powers.get(&Rational::zero()).cloned().expect("constant slot");
        let k = keys[1].clone();
        let ck = powers.get(&k).cloned().expect("leading slot");
        let base = simplify_div(simplify_neg(c0), ck);
        let solution = if k.is_one() {
            base
        } else {
            simplify_pow(base, Expr::Constant(k.recip()))
        };
        return Ok(normalize(solution));
    }

    if keys == [Rational::zero(), Rational::one(), Rational::from_integer(2.into())] {
        return quadratic_root(&powers).map(normalize);
    }

    Err(ChoiceError::NoClosedForm(format!(
        "cannot isolate {var} in {}",
        pretty(&eq)
    )))
}

/// Solve the two-equation system `{eq_a = 0, eq_b = 0}` for `(var_a, var_b)`
/// by isolation and substitution. `eq_a` is tried for `var_a` first; when it
/// only pins down `var_b` (a tangency condition free of `var_a`), the roles
/// are swapped.
pub fn solve_pair(
    eq_a: &Expr,
    eq_b: &Expr,
    var_a: &str,
    var_b: &str,
) -> Result<(Expr, Expr)> {
    match isolate(eq_a, var_a) {
        Ok(expr_a) => {
            debug!(var = var_a, value = %pretty(&expr_a), "isolated from first equation");
            let reduced = substitute(eq_b, var_a, &expr_a);
            let value_b = isolate(&reduced, var_b)?;
            let value_a = normalize(substitute(&expr_a, var_b, &value_b));
            Ok((value_a, value_b))
        }
        Err(_) => {
            let expr_b = isolate(eq_a, var_b)?;
            debug!(var = var_b, value = %pretty(&expr_b), "isolated from first equation");
            let reduced = substitute(eq_b, var_b, &expr_b);
            let value_a = isolate(&reduced, var_a)?;
            let value_b = normalize(substitute(&expr_b, var_a, &value_a));
            Ok((value_a, value_b))
        }
    }
}

/// Positive branch of the quadratic formula for `c2*v^2 + c1*v + c0 = 0`.
fn quadratic_root(powers: &BTreeMap<Rational, Expr>) -> Result<Expr> {
    let c0 = powers.get(&Rational::zero()).cloned().unwrap_or_else(zero);
    let c1 = powers.get(&Rational::one()).cloned().unwrap_or_else(zero);
    let c2 = powers
        .get(&Rational::from_integer(2.into()))
        .cloned()
        .unwrap_or_else(zero);

    let disc = simplify_fully(simplify_sub(
        simplify_mul(c1.clone(), c1.clone()),
        simplify_mul(
            Expr::Constant(Rational::from_integer(4.into())),
            simplify_mul(c2.clone(), c0),
        ),
    ));
    if let Some(r) = disc.as_rational() {
        if r.is_negative() {
            return Err(ChoiceError::NoClosedForm(
                "quadratic has no real roots".to_string(),
            ));
        }
    }
    let sqrt_disc = simplify_pow(disc, Expr::Constant(Rational::new(1.into(), 2.into())));
    let numer = simplify_add(simplify_neg(c1), sqrt_disc);
    let denom = simplify_mul(Expr::Constant(Rational::from_integer(2.into())), c2);
    Ok(simplify_div(numer, denom))
}

/// Split an expression into `(numerator, denominator)` with all quotients
/// cleared, so that `expr = 0` iff `numerator = 0` away from poles.
fn as_ratio(expr: &Expr) -> (Expr, Expr) {
    match expr {
        Expr::Add(a, b) => {
            let (na, da) = as_ratio(a);
            let (nb, db) = as_ratio(b);
            (
                simplify_add(
                    simplify_mul(na, db.clone()),
                    simplify_mul(nb, da.clone()),
                ),
                simplify_mul(da, db),
            )
        }
        Expr::Sub(a, b) => {
            let (na, da) = as_ratio(a);
            let (nb, db) = as_ratio(b);
            (
                simplify_sub(
                    simplify_mul(na, db.clone()),
                    simplify_mul(nb, da.clone()),
                ),
                simplify_mul(da, db),
            )
        }
        Expr::Mul(a, b) => {
            let (na, da) = as_ratio(a);
            let (nb, db) = as_ratio(b);
            (simplify_mul(na, nb), simplify_mul(da, db))
        }
        Expr::Div(a, b) => {
            let (na, da) = as_ratio(a);
            let (nb, db) = as_ratio(b);
            (simplify_mul(na, db), simplify_mul(da, nb))
        }
        Expr::Neg(a) => {
            let (na, da) = as_ratio(a);
            (simplify_neg(na), da)
        }
        Expr::Pow(base, exp) => match &**exp {
            Expr::Constant(e) if e.is_integer() => {
                let (nb, db) = as_ratio(base);
                let abs = Expr::Constant(e.abs());
                if e.is_negative() {
                    (
                        simplify_pow(db, abs.clone()),
                        simplify_pow(nb, abs),
                    )
                } else {
                    (
                        simplify_pow(nb, abs.clone()),
                        simplify_pow(db, abs),
                    )
                }
            }
            _ => (expr.clone(), one()),
        },
        other => (other.clone(), one()),
    }
}

/// Collect `sum` as a power series in `var` with symbolic coefficients.
/// Errors when `var` occurs somewhere it cannot be factored out of, e.g.
/// inside `log` or in a non-constant exponent.
fn collect_powers(sum: &Expr, var: &str) -> Result<BTreeMap<Rational, Expr>> {
    let mut map: BTreeMap<Rational, Expr> = BTreeMap::new();
    for term in flatten_sum(sum) {
        let (coeff, factors) = collect_product(&term);
        let mut exp_of_var = Rational::zero();
        let mut rest: HashMap<Expr, Rational> = HashMap::new();
        for (base, e) in exponent_map(factors) {
            if base.as_variable() == Some(var) {
                exp_of_var += e;
            } else if base.contains_var(var) {
                return Err(ChoiceError::Unsupported(format!(
                    "cannot isolate {var} in {}",
                    pretty(sum)
                )));
            } else {
                rest.insert(base, e);
            }
        }
        let coeff_expr = build_product_from_parts(coeff, rest);
        map.entry(exp_of_var)
            .and_modify(|acc| *acc = simplify_add(acc.clone(), coeff_expr.clone()))
            .or_insert(coeff_expr);
    }
    Ok(map)
}
