//! Numeric evaluation of expressions for curve sampling.

use std::collections::HashMap;

use crate::error::{ChoiceError, Result};
use crate::expr::Expr;
use crate::format::pretty;
use num_traits::ToPrimitive;

/// Evaluate `expr` at the variable assignment in `env`.
pub fn evaluate(expr: &Expr, env: &HashMap<String, f64>) -> Result<f64> {
    match expr {
        Expr::Variable(name) => env.get(name).copied().ok_or_else(|| {
            ChoiceError::NonNumeric(format!("unbound variable {name} in {}", pretty(expr)))
        }),
        Expr::Constant(r) => r
            .to_f64()
            .ok_or_else(|| ChoiceError::NonNumeric(format!("constant out of range: {}", pretty(expr)))),
        Expr::Add(a, b) => Ok(evaluate(a, env)? + evaluate(b, env)?),
        Expr::Sub(a, b) => Ok(evaluate(a, env)? - evaluate(b, env)?),
        Expr::Mul(a, b) => Ok(evaluate(a, env)? * evaluate(b, env)?),
        Expr::Div(a, b) => Ok(evaluate(a, env)? / evaluate(b, env)?),
        Expr::Pow(a, b) => Ok(evaluate(a, env)?.powf(evaluate(b, env)?)),
        Expr::Neg(a) => Ok(-evaluate(a, env)?),
        Expr::Exp(a) => Ok(evaluate(a, env)?.exp()),
        Expr::Log(a) => Ok(evaluate(a, env)?.ln()),
    }
}

/// `n` evenly spaced points over `[lo, hi]`, endpoints included.
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![lo];
    }
    let step = (hi - lo) / (n - 1) as f64;
    (0..n).map(|i| lo + step * i as f64).collect()
}

/// Sample `expr` as a function of `var` over `[lo, hi]`, holding the other
/// bindings in `env` fixed. Points where the value is not finite are skipped.
pub fn sample_curve(
    expr: &Expr,
    var: &str,
    env: &HashMap<String, f64>,
    lo: f64,
    hi: f64,
    n: usize,
) -> Result<Vec<(f64, f64)>> {
    let mut scope = env.clone();
    let mut points = Vec::with_capacity(n);
    for t in linspace(lo, hi, n) {
        scope.insert(var.to_string(), t);
        let value = evaluate(expr, &scope)?;
        if value.is_finite() {
            points.push((t, value));
        }
    }
    Ok(points)
}
