//! Symbolic consumer-choice toolkit: utility parsing, marginal analysis,
//! optimal bundles, Engel and demand curves, and chart rendering.

pub mod calculus;
pub mod chart;
pub mod error;
pub mod eval;
pub mod expr;
pub mod format;
pub mod parser;
pub mod problem;
pub mod report;
pub mod simplify;
pub mod solver;

pub use calculus::differentiate;
pub use chart::render_analysis;
pub use error::{ChoiceError, Result};
pub use eval::{evaluate, linspace, sample_curve};
pub use expr::{Expr, Rational, add, div, mul, neg, one, pow, rational, sub, zero};
pub use format::pretty;
pub use parser::parse_expr;
pub use problem::{
    Bundle, DemandCurves, EngelCurves, Problem, GOOD_X, GOOD_Y, INCOME_SYMBOL, PRICE_X_SYMBOL,
    PRICE_Y_SYMBOL,
};
pub use report::analysis_summary;
pub use simplify::{normalize, simplify, simplify_fully, simplify_with_limit, substitute};
pub use solver::{isolate, solve_pair};
