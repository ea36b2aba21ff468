//! Plain-text rendering of analysis results.

use std::fmt::Write;

use crate::portal::cumulative_loads;
use crate::results::{round_to, ResultGrid};
use crate::structure::Structure;

/// Render the forces of every story as a text report.
///
/// Values are rounded half away from zero to `precision` decimal places and
/// are otherwise taken verbatim from `grid`.
///
/// # Examples
/// ```
/// use portalx::{analyze, render_report, Structure};
///
/// let frame = Structure::uniform(vec![3.0], &[4.0], vec![10.0]);
/// let grid = analyze(&frame).expect("valid frame");
/// let report = render_report(&frame, &grid, 2);
/// assert!(report.contains("Column shear:   5.00  5.00"));
/// ```
#[must_use]
pub fn render_report(structure: &Structure, grid: &ResultGrid, precision: usize) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Portal Method analysis: {} stories, total lateral load = {:.precision$}",
        structure.story_count,
        structure.total_lateral_load()
    )
    .expect("writing to string cannot fail");

    let story_shears = cumulative_loads(&structure.lateral_loads);
    for (forces, (height, shear)) in grid
        .stories()
        .zip(structure.story_heights.iter().zip(story_shears))
    {
        writeln!(
            &mut output,
            "\nStory {} (height = {:.precision$}, story shear = {:.precision$})",
            forces.story + 1,
            height,
            shear
        )
        .expect("writing to string cannot fail");
        write_row(&mut output, "Column shear", forces.column_shear, precision);
        write_row(&mut output, "Column moment", forces.column_moment, precision);
        write_row(&mut output, "Girder moment", forces.girder_moment, precision);
        write_row(&mut output, "Girder shear", forces.girder_shear, precision);
    }

    output
}

/// Append one labelled row of values.
fn write_row(output: &mut String, label: &str, values: &[f64], precision: usize) {
    write!(output, "  {:<14}", format!("{label}:")).expect("writing to string cannot fail");
    let decimals = u32::try_from(precision).unwrap_or(u32::MAX);
    for &value in values {
        let value = round_to(value, decimals);
        write!(output, "{value:>6.precision$}").expect("writing to string cannot fail");
    }
    output.push('\n');
}
