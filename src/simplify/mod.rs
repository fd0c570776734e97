//! Symbolic simplification, normalization, and substitution utilities.

mod normalize;
mod rules;
mod substitute;

pub use normalize::normalize;
pub(crate) use normalize::{build_product_from_parts, collect_product, exponent_map};
pub use rules::{
    simplify, simplify_add, simplify_div, simplify_fully, simplify_mul, simplify_neg, simplify_pow,
    simplify_sub, simplify_with_limit,
};
pub(crate) use rules::flatten_sum;
pub use substitute::substitute;
