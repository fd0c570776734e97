//! Symbolic differentiation for the algebra utility functions use.

mod differentiate;

pub use differentiate::differentiate;
