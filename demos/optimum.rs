//! Full textual analysis of a Cobb-Douglas style problem.
//!
//! Run with: `cargo run --example optimum`

use marginal::{analysis_summary, rational, Problem};

fn main() {
    tracing_subscriber::fmt::init();

    let problem = match Problem::new("x*y^4", rational(1, 1), rational(4, 1), rational(40, 1)) {
        Ok(problem) => problem,
        Err(err) => {
            eprintln!("failed to set up problem: {err}");
            std::process::exit(1);
        }
    };

    match analysis_summary(&problem) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        Err(err) => {
            eprintln!("analysis failed: {err}");
            std::process::exit(1);
        }
    }
}
