use marginal::{analysis_summary, rational, Problem};

#[test]
fn full_report_for_a_well_behaved_problem() {
    let p = Problem::new("x*y^4", rational(1, 1), rational(4, 1), rational(40, 1)).unwrap();
    let lines = analysis_summary(&p).unwrap();

    assert_eq!(lines.len(), 10);
    assert!(lines[0].starts_with("Utility:"));
    assert!(lines[1].contains("Px = 1"));
    assert!(lines[3].contains("x = 8"));
    assert!(lines[3].contains("y = 8"));
    assert!(lines.iter().any(|l| l.starts_with("Engel curve for x:")));
    assert!(lines.iter().any(|l| l.starts_with("Demand for y:")));
}

#[test]
fn report_degrades_per_curve_for_perfect_substitutes() {
    let p = Problem::new("x + 2*y", rational(1, 1), rational(4, 1), rational(40, 1)).unwrap();
    let lines = analysis_summary(&p).unwrap();

    // Corner optimum still reported; each curve line explains the failure.
    assert_eq!(lines.len(), 8);
    assert!(lines[3].contains("x = 40"));
    assert!(lines[3].contains("y = 0"));
}
