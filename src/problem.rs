//! Consumer-choice problems: a utility function, unit prices, and income,
//! plus the equilibrium objects derived from them.
//!
//! A `Problem` is immutable. Curve derivations never rewrite prices or income
//! in place; sweeps go through the reserved symbols `Px`, `Py`, and `I`, and
//! manual sweeps can use the `with_*` copies.

use std::collections::HashMap;

use tracing::debug;

use crate::calculus::differentiate;
use crate::error::{ChoiceError, Result};
use crate::eval::evaluate;
use crate::expr::{Expr, Rational, add, div, mul, sub, zero};
use crate::parser::parse_expr;
use crate::simplify::{normalize, simplify_fully, substitute};
use crate::solver::{isolate, solve_pair};
use num_traits::Signed;

pub const GOOD_X: &str = "x";
pub const GOOD_Y: &str = "y";
pub const PRICE_X_SYMBOL: &str = "Px";
pub const PRICE_Y_SYMBOL: &str = "Py";
pub const INCOME_SYMBOL: &str = "I";

/// A utility-maximization problem over two goods under a linear budget.
#[derive(Debug, Clone)]
pub struct Problem {
    utility: Expr,
    px: Rational,
    py: Rational,
    income: Rational,
}

/// Quantities of the two goods, kept symbolic so exact bundles stay exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    pub x: Expr,
    pub y: Expr,
}

impl Bundle {
    pub fn to_f64(&self) -> Result<(f64, f64)> {
        let env = HashMap::new();
        Ok((evaluate(&self.x, &env)?, evaluate(&self.y, &env)?))
    }
}

/// Quantities demanded as functions of the income symbol `I`, prices fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngelCurves {
    pub x_of_income: Expr,
    pub y_of_income: Expr,
}

/// Own-price demand: `x` as a function of `Px` and `y` as a function of `Py`,
/// income and the other price fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandCurves {
    pub x_of_px: Expr,
    pub y_of_py: Expr,
}

impl Problem {
    /// Parse a utility expression over the goods `x` and `y` and pair it with
    /// strictly positive prices and income.
    pub fn new(utility: &str, px: Rational, py: Rational, income: Rational) -> Result<Self> {
        if !px.is_positive() || !py.is_positive() || !income.is_positive() {
            return Err(ChoiceError::Unsupported(
                "prices and income must be positive".to_string(),
            ));
        }
        let utility = parse_expr(utility)?;
        for var in utility.variables() {
            if var != GOOD_X && var != GOOD_Y {
                return Err(ChoiceError::Unsupported(format!(
                    "utility may only reference {GOOD_X} and {GOOD_Y}, found {var}"
                )));
            }
        }
        Ok(Problem {
            utility,
            px,
            py,
            income,
        })
    }

    pub fn utility(&self) -> &Expr {
        &self.utility
    }

    pub fn px(&self) -> &Rational {
        &self.px
    }

    pub fn py(&self) -> &Rational {
        &self.py
    }

    pub fn income(&self) -> &Rational {
        &self.income
    }

    /// Same preferences and prices at a different income.
    pub fn with_income(&self, income: Rational) -> Result<Self> {
        if !income.is_positive() {
            return Err(ChoiceError::Unsupported(
                "prices and income must be positive".to_string(),
            ));
        }
        Ok(Problem {
            income,
            ..self.clone()
        })
    }

    /// Same preferences and income at different prices.
    pub fn with_prices(&self, px: Rational, py: Rational) -> Result<Self> {
        if !px.is_positive() || !py.is_positive() {
            return Err(ChoiceError::Unsupported(
                "prices and income must be positive".to_string(),
            ));
        }
        Ok(Problem {
            px,
            py,
            ..self.clone()
        })
    }

    /// Marginal rate of substitution `u_x / u_y`, normalized.
    pub fn mrs(&self) -> Result<Expr> {
        let du_dx = differentiate(GOOD_X, &self.utility);
        let du_dy = differentiate(GOOD_Y, &self.utility);
        if simplify_fully(du_dy.clone()).is_zero() {
            return Err(ChoiceError::Unsupported(
                "utility does not depend on y".to_string(),
            ));
        }
        Ok(normalize(div(du_dx, du_dy)))
    }

    /// The utility-maximizing bundle on the budget line.
    pub fn optimum(&self) -> Result<Bundle> {
        let mrs = self.mrs()?;
        let ratio = self.price_ratio();

        // Constant MRS means perfect substitutes: compare slopes and spend
        // the whole income on a single good.
        if let Some(m) = mrs.as_rational() {
            return Ok(if *m > ratio {
                debug!("constant MRS above price ratio, corner on x");
                self.corner_on_x()
            } else {
                debug!("constant MRS at or below price ratio, corner on y");
                self.corner_on_y()
            });
        }

        let tangency = sub(mrs, Expr::Constant(ratio));
        let budget = self.budget(
            Expr::Constant(self.px.clone()),
            Expr::Constant(self.py.clone()),
            Expr::Constant(self.income.clone()),
        );
        let (x, y) = solve_pair(&tangency, &budget, GOOD_X, GOOD_Y)?;
        let bundle = Bundle { x, y };

        let (x_val, y_val) = bundle.to_f64()?;
        if x_val < 0.0 {
            debug!(x = x_val, "interior solution infeasible, corner on y");
            Ok(self.corner_on_y())
        } else if y_val < 0.0 {
            debug!(y = y_val, "interior solution infeasible, corner on x");
            Ok(self.corner_on_x())
        } else {
            Ok(bundle)
        }
    }

    /// Quantities demanded as functions of income at the problem's prices.
    pub fn engel_curves(&self) -> Result<EngelCurves> {
        let tangency = self.tangency()?;
        let budget = self.budget(
            Expr::Constant(self.px.clone()),
            Expr::Constant(self.py.clone()),
            Expr::var(INCOME_SYMBOL),
        );
        let (x_of_income, y_of_income) = solve_pair(&tangency, &budget, GOOD_X, GOOD_Y)?;
        Ok(EngelCurves {
            x_of_income,
            y_of_income,
        })
    }

    /// Own-price demand curves at the problem's income.
    pub fn demand_curves(&self) -> Result<DemandCurves> {
        let (x_of_px, _) = self.demand_pair_x()?;
        let (_, y_of_py) = self.demand_pair_y()?;
        Ok(DemandCurves { x_of_px, y_of_py })
    }

    /// `y` as a function of `x` along the tangency locus as income sweeps.
    pub fn income_consumption_curve(&self) -> Result<Expr> {
        isolate(&self.tangency()?, GOOD_Y)
    }

    /// `y` as a function of `x` along the optimum path as `Px` sweeps.
    pub fn price_consumption_curve(&self) -> Result<Expr> {
        let (x_of_px, y_of_px) = self.demand_pair_x()?;
        if !y_of_px.contains_var(PRICE_X_SYMBOL) {
            return Ok(y_of_px);
        }
        let px_of_x = isolate(&sub(x_of_px, Expr::var(GOOD_X)), PRICE_X_SYMBOL)?;
        Ok(normalize(substitute(&y_of_px, PRICE_X_SYMBOL, &px_of_x)))
    }

    /// `y` as a function of `x` at the utility level of `bundle`.
    pub fn indifference_curve(&self, bundle: &Bundle) -> Result<Expr> {
        let level = simplify_fully(substitute(
            &substitute(&self.utility, GOOD_X, &bundle.x),
            GOOD_Y,
            &bundle.y,
        ));
        isolate(&sub(self.utility.clone(), level), GOOD_Y)
    }

    fn price_ratio(&self) -> Rational {
        self.px.clone() / self.py.clone()
    }

    fn corner_on_x(&self) -> Bundle {
        Bundle {
            x: Expr::Constant(self.income.clone() / self.px.clone()),
            y: zero(),
        }
    }

    fn corner_on_y(&self) -> Bundle {
        Bundle {
            x: zero(),
            y: Expr::Constant(self.income.clone() / self.py.clone()),
        }
    }

    fn tangency(&self) -> Result<Expr> {
        Ok(sub(self.mrs()?, Expr::Constant(self.price_ratio())))
    }

    fn budget(&self, px: Expr, py: Expr, income: Expr) -> Expr {
        sub(
            add(mul(px, Expr::var(GOOD_X)), mul(py, Expr::var(GOOD_Y))),
            income,
        )
    }

    fn demand_pair_x(&self) -> Result<(Expr, Expr)> {
        let tangency = sub(
            self.mrs()?,
            div(
                Expr::var(PRICE_X_SYMBOL),
                Expr::Constant(self.py.clone()),
            ),
        );
        let budget = self.budget(
            Expr::var(PRICE_X_SYMBOL),
            Expr::Constant(self.py.clone()),
            Expr::Constant(self.income.clone()),
        );
        solve_pair(&tangency, &budget, GOOD_X, GOOD_Y)
    }

    fn demand_pair_y(&self) -> Result<(Expr, Expr)> {
        let tangency = sub(
            self.mrs()?,
            div(
                Expr::Constant(self.px.clone()),
                Expr::var(PRICE_Y_SYMBOL),
            ),
        );
        let budget = self.budget(
            Expr::Constant(self.px.clone()),
            Expr::var(PRICE_Y_SYMBOL),
            Expr::Constant(self.income.clone()),
        );
        solve_pair(&tangency, &budget, GOOD_X, GOOD_Y)
    }
}
