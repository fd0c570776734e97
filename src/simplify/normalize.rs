use std::collections::HashMap;

use crate::expr::{Expr, Rational};
use crate::simplify::{
    simplify_add, simplify_div, simplify_fully, simplify_mul, simplify_neg, simplify_pow,
    simplify_sub,
};
use num_traits::{One, Signed, ToPrimitive, Zero};

const NORMALIZE_SIZE_LIMIT: usize = 160;

/// Rewrite products and quotients into a canonical exponent-collected form,
/// e.g. `y^4/(4*x*y^3)` becomes `1/4*y*x^-1`.
pub fn normalize(expr: Expr) -> Expr {
    let simplified = simplify_fully(expr);
    simplify_fully(normalize_once(simplified, NORMALIZE_SIZE_LIMIT))
}

fn normalize_once(expr: Expr, size_limit: usize) -> Expr {
    if expr_size(&expr) > size_limit {
        return simplify_fully(expr);
    }

    match expr {
        Expr::Add(a, b) => simplify_add(
            normalize_once(*a, size_limit),
            normalize_once(*b, size_limit),
        ),
        Expr::Sub(a, b) => simplify_sub(
            normalize_once(*a, size_limit),
            normalize_once(*b, size_limit),
        ),
        Expr::Mul(_, _) => normalize_product(expr, size_limit),
        Expr::Div(a, b) => {
            let num = normalize_once(*a, size_limit);
            let den = normalize_once(*b, size_limit);
            // Division by a constant zero stays symbolic.
            if den.is_zero() {
                simplify_div(num, den)
            } else {
                normalize_product(Expr::Div(num.boxed(), den.boxed()), size_limit)
            }
        }
        Expr::Pow(base, exp) => normalize_pow_form(*base, *exp, size_limit),
        Expr::Neg(inner) => simplify_neg(normalize_once(*inner, size_limit)),
        Expr::Exp(inner) => Expr::Exp(normalize_once(*inner, size_limit).boxed()),
        Expr::Log(inner) => Expr::Log(normalize_once(*inner, size_limit).boxed()),
        other => other,
    }
}

fn normalize_product(expr: Expr, size_limit: usize) -> Expr {
    let (mut const_factor, factors) = collect_product(&expr);
    if const_factor.is_zero() {
        return Expr::Constant(Rational::zero());
    }

    let mut exponents: HashMap<Expr, Rational> = HashMap::new();
    for factor in factors {
        let normalized = normalize_once(factor, size_limit);
        let (c_inner, inner_factors) = collect_product(&normalized);
        const_factor *= c_inner;
        if const_factor.is_zero() {
            return Expr::Constant(Rational::zero());
        }
        for (base, exp) in exponent_map(inner_factors) {
            match base {
                Expr::Constant(c) if exp.is_integer() => {
                    const_factor *= pow_rational(&c, &exp);
                    if const_factor.is_zero() {
                        return Expr::Constant(Rational::zero());
                    }
                }
                other => add_exponent(&mut exponents, other, exp),
            }
        }
    }

    build_product_from_parts(const_factor, exponents)
}

fn normalize_pow_form(base: Expr, exp: Expr, size_limit: usize) -> Expr {
    let base_norm = normalize_once(base, size_limit);
    let exp_norm = normalize_once(exp, size_limit);

    let maybe_const_exp = match &exp_norm {
        Expr::Constant(c) => Some(c.clone()),
        _ => None,
    };

    // Collapse nested powers only when the outer exponent is an integer to avoid branch changes.
    if let Some(e_outer) = maybe_const_exp.clone() {
        if e_outer.is_integer() {
            if let Expr::Pow(inner_base, inner_exp) = &base_norm {
                if let Expr::Constant(e_inner) = &**inner_exp {
                    let combined = Expr::Constant(e_inner.clone() * e_outer);
                    let merged = simplify_pow((**inner_base).clone(), combined);
                    return normalize_once(merged, size_limit);
                }
            }
        }
    }

    // Distribute over products for integer exponents.
    if let Some(e) = maybe_const_exp {
        if e.is_integer() {
            if let Some(distributed) = distribute_pow_over_product(&base_norm, &e) {
                return simplify_fully(distributed);
            }
        }
    }

    simplify_pow(base_norm, exp_norm)
}

fn distribute_pow_over_product(base: &Expr, exp: &Rational) -> Option<Expr> {
    let (mut const_factor, factors) = collect_product(base);
    if factors.is_empty() || (factors.len() == 1 && const_factor.is_one()) {
        return None;
    }

    const_factor = pow_rational(&const_factor, exp);
    let mut exps: HashMap<Expr, Rational> = HashMap::new();
    for f in factors {
        match f {
            Expr::Pow(base, inner_exp) => {
                if let Expr::Constant(inner_e) = *inner_exp {
                    add_exponent(&mut exps, *base, inner_e * exp.clone());
                } else {
                    add_exponent(&mut exps, Expr::Pow(base, inner_exp), exp.clone());
                }
            }
            other => add_exponent(&mut exps, other, exp.clone()),
        }
    }

    Some(build_product_from_parts(const_factor, exps))
}

fn add_exponent(map: &mut HashMap<Expr, Rational>, base: Expr, exp: Rational) {
    map.entry(base).and_modify(|e| *e += &exp).or_insert(exp);
}

pub(crate) fn build_product_from_parts(
    const_factor: Rational,
    exponents: HashMap<Expr, Rational>,
) -> Expr {
    if const_factor.is_zero() {
        return Expr::Constant(Rational::zero());
    }
    let mut items: Vec<(Expr, Rational)> = exponents
        .into_iter()
        .filter(|(_, e)| !e.is_zero())
        .collect();
    items.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut result = if const_factor.is_one() {
        None
    } else {
        Some(Expr::Constant(const_factor))
    };

    for (base, exp) in items {
        let factor = if exp == Rational::one() {
            base
        } else {
            simplify_pow(base, Expr::Constant(exp))
        };
        result = Some(match result {
            None => factor,
            Some(acc) => simplify_mul(acc, factor),
        });
    }

    result.unwrap_or_else(|| Expr::Constant(Rational::one()))
}

pub(crate) fn exponent_map(factors: Vec<Expr>) -> HashMap<Expr, Rational> {
    let mut exps = HashMap::new();
    for f in factors {
        match f {
            Expr::Pow(base, exp) => {
                if let Expr::Constant(e) = *exp {
                    if let Expr::Pow(inner_base, inner_exp) = *base {
                        if let Expr::Constant(inner_e) = *inner_exp {
                            add_exponent(&mut exps, *inner_base, inner_e * e.clone());
                            continue;
                        } else {
                            let rebuilt = Expr::Pow(inner_base, inner_exp);
                            add_exponent(&mut exps, rebuilt, e);
                            continue;
                        }
                    }
                    add_exponent(&mut exps, *base, e);
                } else {
                    add_exponent(&mut exps, Expr::Pow(base, exp), Rational::one());
                }
            }
            other => add_exponent(&mut exps, other, Rational::one()),
        }
    }
    exps
}

pub(crate) fn collect_product(expr: &Expr) -> (Rational, Vec<Expr>) {
    match expr {
        Expr::Constant(c) => (c.clone(), Vec::new()),
        Expr::Neg(inner) => {
            let (c, f) = collect_product(inner);
            (-c, f)
        }
        Expr::Mul(a, b) => {
            let (ca, mut fa) = collect_product(a);
            let (cb, mut fb) = collect_product(b);
            fa.append(&mut fb);
            (ca * cb, fa)
        }
        Expr::Div(a, b) => {
            let (ca, mut fa) = collect_product(a);
            let (cb, fb) = collect_product(b);
            if cb.is_zero() {
                return (Rational::one(), vec![expr.clone()]);
            }
            for factor in fb {
                fa.push(Expr::Pow(
                    factor.boxed(),
                    Expr::Constant(Rational::from_integer((-1).into())).boxed(),
                ));
            }
            (ca / cb, fa)
        }
        other => (Rational::one(), vec![other.clone()]),
    }
}

fn pow_rational(base: &Rational, exp: &Rational) -> Rational {
    if exp.is_zero() {
        return Rational::one();
    }
    if !exp.is_integer() {
        return base.clone();
    }
    let n = exp.to_integer();
    if let Some(pow) = n.abs().to_u32() {
        let num = base.numer().pow(pow);
        let den = base.denom().pow(pow);
        if n.is_negative() {
            return Rational::new(den, num);
        } else {
            return Rational::new(num, den);
        }
    }
    base.clone()
}

fn expr_size(expr: &Expr) -> usize {
    match expr {
        Expr::Variable(_) | Expr::Constant(_) => 1,
        Expr::Neg(inner) | Expr::Exp(inner) | Expr::Log(inner) => 1 + expr_size(inner),
        Expr::Add(a, b)
        | Expr::Sub(a, b)
        | Expr::Mul(a, b)
        | Expr::Div(a, b)
        | Expr::Pow(a, b) => 1 + expr_size(a) + expr_size(b),
    }
}
