//! Render the five-panel analysis figure to an SVG file.
//!
//! Run with: `cargo run --example charts`

use marginal::{rational, render_analysis, Problem};

fn main() {
    tracing_subscriber::fmt::init();

    let problem = match Problem::new("x*y^4", rational(1, 1), rational(4, 1), rational(40, 1)) {
        Ok(problem) => problem,
        Err(err) => {
            eprintln!("failed to set up problem: {err}");
            std::process::exit(1);
        }
    };

    let path = "consumer-analysis.svg";
    if let Err(err) = render_analysis(&problem, path) {
        eprintln!("rendering failed: {err}");
        std::process::exit(1);
    }
    println!("wrote {path}");
}
