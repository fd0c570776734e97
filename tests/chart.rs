use std::fs;

use marginal::{rational, render_analysis, Problem};

#[test]
fn renders_the_five_panel_figure() {
    let p = Problem::new("x*y^4", rational(1, 1), rational(4, 1), rational(40, 1)).unwrap();
    let path = std::env::temp_dir().join("marginal-analysis-test.svg");

    render_analysis(&p, &path).unwrap();

    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Consumer optimum"));
    assert!(svg.contains("Engel curve for product X"));
    assert!(svg.contains("Product demand Y"));
    fs::remove_file(&path).ok();
}

#[test]
fn corner_problems_still_render() {
    let p = Problem::new("x + 2*y", rational(1, 1), rational(4, 1), rational(40, 1)).unwrap();
    let path = std::env::temp_dir().join("marginal-analysis-corner-test.svg");

    render_analysis(&p, &path).unwrap();

    assert!(fs::read_to_string(&path).unwrap().contains("<svg"));
    fs::remove_file(&path).ok();
}
