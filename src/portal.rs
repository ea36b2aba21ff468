//! Portal Method analysis of rigid frames under lateral load.
//!
//! Each story is processed from the top down in three passes:
//!
//! 1. the cumulative story shear is split among the columns, interior
//!    columns taking twice the share of the two exterior ones, and each
//!    column moment is its shear times half the story height;
//! 2. girder moments follow from joint equilibrium, sweeping left to right;
//! 3. girder shears follow from the moments at both ends of each span.
//!
//! See <https://en.wikipedia.org/wiki/Portal_method> for background.

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::results::ResultGrid;
use crate::structure::Structure;

/// Which column moments from the stories above are added at a joint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentAccumulation {
    /// Only the column of the story directly above meets the joint.
    #[default]
    AdjacentStory,
    /// The columns of every story above are summed at the joint.
    AllStoriesAbove,
}

/// Settings for an analysis run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Column moment accumulation rule for girder joints.
    #[serde(default)]
    pub accumulation: MomentAccumulation,
}

/// Analyse a frame with the default [`AnalysisOptions`].
///
/// # Errors
///
/// Returns the first [`ValidationError`] in `structure`; nothing is computed
/// for an invalid structure.
///
/// # Examples
/// ```
/// use portalx::{analyze, Structure};
///
/// let frame = Structure::uniform(vec![3.0, 3.0], &[4.0, 4.0], vec![10.0, 10.0]);
/// let grid = analyze(&frame).expect("valid frame");
/// assert_eq!(grid.column_shear[0], vec![2.5, 5.0, 2.5]);
/// assert_eq!(grid.girder_moment[1], vec![11.25, 11.25]);
/// ```
pub fn analyze(structure: &Structure) -> Result<ResultGrid, ValidationError> {
    analyze_with(structure, &AnalysisOptions::default())
}

/// Analyse a frame with explicit options.
///
/// # Errors
///
/// Returns the first [`ValidationError`] in `structure`.
pub fn analyze_with(
    structure: &Structure,
    options: &AnalysisOptions,
) -> Result<ResultGrid, ValidationError> {
    structure.validate()?;

    let story_loads = cumulative_loads(&structure.lateral_loads);
    let mut grid = ResultGrid::default();
    for story in 0..structure.story_count {
        let shears = column_shears(story_loads[story], structure.num_columns(story));
        let moments = column_moments(&shears, structure.story_heights[story]);
        grid.column_shear.push(shears);
        grid.column_moment.push(moments);

        let joints = joint_column_moments(
            structure,
            &grid.column_moment,
            story,
            options.accumulation,
        );
        let girder_moment = girder_moments(&joints);
        let girder_shear = girder_shears(&girder_moment, &joints, &structure.span_lengths[story]);
        grid.girder_moment.push(girder_moment);
        grid.girder_shear.push(girder_shear);
    }
    Ok(grid)
}

/// Running total of the lateral loads from the roof down.
///
/// Entry `i` is the shear carried through story `i`.
#[must_use]
pub fn cumulative_loads(lateral_loads: &[f64]) -> Vec<f64> {
    lateral_loads
        .iter()
        .scan(0.0, |total, load| {
            *total += load;
            Some(*total)
        })
        .collect()
}

/// Number of exterior-column shares a story's shear is divided into.
///
/// The two exterior columns count once and every interior column twice.
/// A single bay has no interior columns and divides by two.
#[must_use]
pub fn effective_column_units(num_columns: usize) -> usize {
    num_columns + num_columns.saturating_sub(2)
}

/// Distribute a story shear among `num_columns` columns.
#[must_use]
pub fn column_shears(story_shear: f64, num_columns: usize) -> Vec<f64> {
    let exterior = story_shear / effective_column_units(num_columns) as f64;
    (0..num_columns)
        .map(|column| {
            if column == 0 || column + 1 == num_columns {
                exterior
            } else {
                2.0 * exterior
            }
        })
        .collect()
}

/// Column end moments, with the point of inflection at mid-height.
#[must_use]
pub fn column_moments(shears: &[f64], story_height: f64) -> Vec<f64> {
    shears.iter().map(|shear| shear * story_height * 0.5).collect()
}

/// Sum of the column moments meeting at each joint along the top of `story`.
///
/// `column_moments` must hold the rows for `story` and every story above it.
/// A column with no counterpart above contributes nothing from that story.
#[must_use]
pub fn joint_column_moments(
    structure: &Structure,
    column_moments: &[Vec<f64>],
    story: usize,
    accumulation: MomentAccumulation,
) -> Vec<f64> {
    let upper_stories = match accumulation {
        MomentAccumulation::AdjacentStory => story.saturating_sub(1)..story,
        MomentAccumulation::AllStoriesAbove => 0..story,
    };
    column_moments[story]
        .iter()
        .enumerate()
        .map(|(column, moment)| {
            let inherited: f64 = upper_stories
                .clone()
                .filter(|&upper| structure.column_exists(upper, column))
                .map(|upper| column_moments[upper][column])
                .sum();
            moment + inherited
        })
        .collect()
}

/// Girder end moments from equilibrium at each joint, swept left to right.
///
/// `joints` holds one joint moment per column; the result has one moment per
/// span. The first girder balances its joint alone and every later girder
/// balances what the girder to its left leaves over.
#[must_use]
pub fn girder_moments(joints: &[f64]) -> Vec<f64> {
    let spans = joints.len().saturating_sub(1);
    let mut moments: Vec<f64> = Vec::with_capacity(spans);
    for &joint in &joints[..spans] {
        let moment = match moments.last() {
            None => joint,
            Some(previous) => (joint - previous).abs(),
        };
        moments.push(moment);
    }
    moments
}

/// Girder shears from the moments at both ends of each span.
///
/// The right-end moment of a span is the moment of the next girder, or the
/// joint moment of the last column for the rightmost span.
#[must_use]
pub fn girder_shears(girder_moments: &[f64], joints: &[f64], span_lengths: &[f64]) -> Vec<f64> {
    girder_moments
        .iter()
        .zip(span_lengths)
        .enumerate()
        .map(|(span, (left, length))| {
            let right = girder_moments
                .get(span + 1)
                .copied()
                .unwrap_or(joints[span + 1]);
            (left + right) / length
        })
        .collect()
}
