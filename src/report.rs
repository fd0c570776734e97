//! Human-readable summary of a full consumer-choice analysis.

use crate::error::{ChoiceError, Result};
use crate::format::pretty;
use crate::problem::Problem;

/// Render the complete analysis into lines for CLI/demo output. Curves
/// without a closed form degrade to an explanatory line instead of failing
/// the whole report.
pub fn analysis_summary(problem: &Problem) -> Result<Vec<String>> {
    let mut lines = vec![
        format!("Utility: u(x, y) = {}", pretty(problem.utility())),
        format!(
            "Prices: Px = {}, Py = {}; income I = {}",
            problem.px(),
            problem.py(),
            problem.income()
        ),
        format!("MRS(x, y) = {}", pretty(&problem.mrs()?)),
    ];

    let optimum = problem.optimum()?;
    lines.push(format!(
        "Optimum bundle: x = {}, y = {}",
        pretty(&optimum.x),
        pretty(&optimum.y)
    ));

    match problem.engel_curves() {
        Ok(engel) => {
            lines.push(format!("Engel curve for x: x(I) = {}", pretty(&engel.x_of_income)));
            lines.push(format!("Engel curve for y: y(I) = {}", pretty(&engel.y_of_income)));
        }
        Err(e) if is_degenerate(&e) => lines.push(format!("Engel curves: {e}")),
        Err(e) => return Err(e),
    }

    match problem.demand_curves() {
        Ok(demand) => {
            lines.push(format!("Demand for x: x(Px) = {}", pretty(&demand.x_of_px)));
            lines.push(format!("Demand for y: y(Py) = {}", pretty(&demand.y_of_py)));
        }
        Err(e) if is_degenerate(&e) => lines.push(format!("Demand curves: {e}")),
        Err(e) => return Err(e),
    }

    match problem.income_consumption_curve() {
        Ok(icc) => lines.push(format!("Income consumption curve: y = {}", pretty(&icc))),
        Err(e) if is_degenerate(&e) => lines.push(format!("Income consumption curve: {e}")),
        Err(e) => return Err(e),
    }

    match problem.price_consumption_curve() {
        Ok(pcc) => lines.push(format!("Price consumption curve: y = {}", pretty(&pcc))),
        Err(e) if is_degenerate(&e) => lines.push(format!("Price consumption curve: {e}")),
        Err(e) => return Err(e),
    }

    Ok(lines)
}

fn is_degenerate(err: &ChoiceError) -> bool {
    matches!(
        err,
        ChoiceError::NoClosedForm(_) | ChoiceError::Unsupported(_)
    )
}
