//! SVG chart rendering: the five-panel consumer analysis figure.

use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use crate::error::{ChoiceError, Result};
use crate::eval::{linspace, sample_curve};
use crate::problem::{GOOD_X, INCOME_SYMBOL, PRICE_X_SYMBOL, PRICE_Y_SYMBOL, Problem};
use num_traits::ToPrimitive;

const SAMPLES: usize = 1000;

const ENGEL_X_COLOR: RGBColor = GREEN;
const ENGEL_Y_COLOR: RGBColor = RGBColor(218, 165, 32);
const DEMAND_X_COLOR: RGBColor = RGBColor(128, 0, 128);
const DEMAND_Y_COLOR: RGBColor = RED;

/// Render the full analysis to an SVG file: consumer optimum, Engel curve for
/// each good, and own-price demand for each good, stacked vertically.
/// Panels whose curve has no closed form are drawn empty.
pub fn render_analysis(problem: &Problem, path: impl AsRef<Path>) -> Result<()> {
    let px = rat_f64(problem.px())?;
    let py = rat_f64(problem.py())?;
    let income = rat_f64(problem.income())?;
    let x_max = income / px;
    let y_max = income / py;
    let env = HashMap::new();

    let optimum = problem.optimum()?;
    let opt_point = optimum.to_f64()?;

    let indifference: Vec<(f64, f64)> = match problem.indifference_curve(&optimum) {
        Ok(expr) => sample_curve(&expr, GOOD_X, &env, x_max / 1000.0, x_max, SAMPLES)?
            .into_iter()
            .filter(|&(_, y)| (0.0..=y_max * 1.5).contains(&y))
            .collect(),
        Err(e) if is_degenerate(&e) => Vec::new(),
        Err(e) => return Err(e),
    };
    let budget_line: Vec<(f64, f64)> = linspace(0.0, x_max, SAMPLES)
        .into_iter()
        .map(|x| (x, (income - px * x) / py))
        .collect();

    let (engel_x, engel_y) = match problem.engel_curves() {
        Ok(engel) => (
            quantity_vs_parameter(&engel.x_of_income, INCOME_SYMBOL, 0.0, income * 2.0)?,
            quantity_vs_parameter(&engel.y_of_income, INCOME_SYMBOL, 0.0, income * 2.0)?,
        ),
        Err(e) if is_degenerate(&e) => (Vec::new(), Vec::new()),
        Err(e) => return Err(e),
    };

    let (demand_x, demand_y) = match problem.demand_curves() {
        Ok(demand) => (
            quantity_vs_parameter(&demand.x_of_px, PRICE_X_SYMBOL, px * 0.25, px * 2.5)?,
            quantity_vs_parameter(&demand.y_of_py, PRICE_Y_SYMBOL, py * 0.25, py * 2.5)?,
        ),
        Err(e) if is_degenerate(&e) => (Vec::new(), Vec::new()),
        Err(e) => return Err(e),
    };

    let root = SVGBackend::new(path.as_ref(), (560, 2200)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;
    let panels = root.split_evenly((5, 1));

    draw_panel(
        &panels[0],
        "Consumer optimum",
        "Product X",
        "Product Y",
        0.0..upper(x_max),
        0.0..upper(y_max),
        &[(&indifference, BLUE), (&budget_line, BLACK)],
        Some(opt_point),
    )?;

    draw_panel(
        &panels[1],
        "Engel curve for product X",
        "Product X",
        "Income I",
        0.0..upper(max_abscissa(&engel_x)),
        0.0..upper(income * 2.0),
        &[(&engel_x, ENGEL_X_COLOR)],
        None,
    )?;

    draw_panel(
        &panels[2],
        "Engel curve for product Y",
        "Product Y",
        "Income I",
        0.0..upper(max_abscissa(&engel_y)),
        0.0..upper(income * 2.0),
        &[(&engel_y, ENGEL_Y_COLOR)],
        None,
    )?;

    draw_panel(
        &panels[3],
        "Product demand X",
        "Product X",
        "Price X",
        0.0..upper(max_abscissa(&demand_x)),
        0.0..upper(px * 2.5),
        &[(&demand_x, DEMAND_X_COLOR)],
        None,
    )?;

    draw_panel(
        &panels[4],
        "Product demand Y",
        "Product Y",
        "Price Y",
        0.0..upper(max_abscissa(&demand_y)),
        0.0..upper(py * 2.5),
        &[(&demand_y, DEMAND_Y_COLOR)],
        None,
    )?;

    root.present().map_err(draw_err)?;
    debug!(path = %path.as_ref().display(), "analysis chart written");
    Ok(())
}

/// Sample `expr` against the sweep symbol and return (quantity, parameter)
/// pairs, which is the orientation the Engel and demand panels use.
fn quantity_vs_parameter(
    expr: &crate::expr::Expr,
    symbol: &str,
    lo: f64,
    hi: f64,
) -> Result<Vec<(f64, f64)>> {
    let env = HashMap::new();
    Ok(sample_curve(expr, symbol, &env, lo, hi, SAMPLES)?
        .into_iter()
        .filter(|&(_, q)| q >= 0.0)
        .map(|(p, q)| (q, p))
        .collect())
}

#[allow(clippy::too_many_arguments)]
fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    caption: &str,
    x_desc: &str,
    y_desc: &str,
    x_range: Range<f64>,
    y_range: Range<f64>,
    series: &[(&Vec<(f64, f64)>, RGBColor)],
    point: Option<(f64, f64)>,
) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 16))
        .margin(8)
        .x_label_area_size(32)
        .y_label_area_size(44)
        .build_cartesian_2d(x_range, y_range)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()
        .map_err(draw_err)?;

    for (points, color) in series {
        if points.is_empty() {
            continue;
        }
        chart
            .draw_series(LineSeries::new(points.iter().copied(), color))
            .map_err(draw_err)?;
    }

    if let Some((x, y)) = point {
        chart
            .draw_series(std::iter::once(Circle::new((x, y), 4, RED.filled())))
            .map_err(draw_err)?;
    }

    Ok(())
}

fn max_abscissa(points: &[(f64, f64)]) -> f64 {
    points.iter().map(|&(x, _)| x).fold(0.0, f64::max)
}

fn upper(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}

fn rat_f64(r: &crate::expr::Rational) -> Result<f64> {
    r.to_f64()
        .ok_or_else(|| ChoiceError::NonNumeric("price or income out of f64 range".to_string()))
}

fn is_degenerate(err: &ChoiceError) -> bool {
    matches!(
        err,
        ChoiceError::NoClosedForm(_) | ChoiceError::Unsupported(_)
    )
}

fn draw_err<E: std::fmt::Display>(err: E) -> ChoiceError {
    ChoiceError::Render(err.to_string())
}
