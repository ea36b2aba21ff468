//! Member forces produced by a Portal Method analysis.

use serde::{Deserialize, Serialize};

/// Column and girder forces for every story of a frame.
///
/// Rows are indexed top to bottom like the [`Structure`](crate::Structure)
/// they were computed from. Column rows hold one entry per column and girder
/// rows one entry per span. Values are magnitudes at full precision.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultGrid {
    /// Shear carried by each column.
    pub column_shear: Vec<Vec<f64>>,
    /// End moment of each column.
    pub column_moment: Vec<Vec<f64>>,
    /// End moment of each girder from joint equilibrium.
    pub girder_moment: Vec<Vec<f64>>,
    /// Shear in each girder.
    pub girder_shear: Vec<Vec<f64>>,
}

/// Borrowed view of the forces on one story.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StoryForces<'a> {
    /// Story index, counted from the top.
    pub story: usize,
    /// Column shears, left to right.
    pub column_shear: &'a [f64],
    /// Column moments, left to right.
    pub column_moment: &'a [f64],
    /// Girder moments, left to right.
    pub girder_moment: &'a [f64],
    /// Girder shears, left to right.
    pub girder_shear: &'a [f64],
}

/// Location and magnitude of the largest value in one of the result rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Governing {
    /// Story index, counted from the top.
    pub story: usize,
    /// Column or span index, counted from the left.
    pub index: usize,
    /// The governing value.
    pub value: f64,
}

impl ResultGrid {
    /// Number of stories in the grid.
    #[must_use]
    pub fn story_count(&self) -> usize {
        self.column_shear.len()
    }

    /// Return the forces on a single story.
    #[must_use]
    pub fn story(&self, story: usize) -> Option<StoryForces<'_>> {
        Some(StoryForces {
            story,
            column_shear: self.column_shear.get(story)?,
            column_moment: self.column_moment.get(story)?,
            girder_moment: self.girder_moment.get(story)?,
            girder_shear: self.girder_shear.get(story)?,
        })
    }

    /// Iterate over the stories from the top down.
    pub fn stories(&self) -> impl Iterator<Item = StoryForces<'_>> {
        (0..self.story_count()).filter_map(move |story| self.story(story))
    }

    /// Return a copy with every value rounded to `decimals` places.
    ///
    /// Intended for presentation only; feeding rounded values back into a
    /// calculation changes later results.
    ///
    /// # Examples
    /// ```
    /// use portalx::{analyze, Structure};
    ///
    /// let frame = Structure::uniform(vec![3.0], &[7.0], vec![10.0]);
    /// let grid = analyze(&frame).expect("valid frame").rounded(2);
    /// assert_eq!(grid.girder_shear[0], vec![2.14]);
    /// ```
    #[must_use]
    pub fn rounded(&self, decimals: u32) -> Self {
        let round_rows = |rows: &[Vec<f64>]| -> Vec<Vec<f64>> {
            rows.iter()
                .map(|row| row.iter().map(|&value| round_to(value, decimals)).collect())
                .collect()
        };
        Self {
            column_shear: round_rows(&self.column_shear),
            column_moment: round_rows(&self.column_moment),
            girder_moment: round_rows(&self.girder_moment),
            girder_shear: round_rows(&self.girder_shear),
        }
    }

    /// Find the column with the largest end moment.
    #[must_use]
    pub fn max_column_moment(&self) -> Option<Governing> {
        governing(&self.column_moment)
    }

    /// Find the girder with the largest end moment.
    #[must_use]
    pub fn max_girder_moment(&self) -> Option<Governing> {
        governing(&self.girder_moment)
    }

    /// Find the girder with the largest shear.
    #[must_use]
    pub fn max_girder_shear(&self) -> Option<Governing> {
        governing(&self.girder_shear)
    }
}

/// Locate the largest value in a set of rows, preferring the first on ties.
fn governing(rows: &[Vec<f64>]) -> Option<Governing> {
    let mut best: Option<Governing> = None;
    for (story, row) in rows.iter().enumerate() {
        for (index, &value) in row.iter().enumerate() {
            if best.map_or(true, |current| value > current.value) {
                best = Some(Governing { story, index, value });
            }
        }
    }
    best
}

/// Round `value` to `decimals` places, with halves rounded away from zero.
///
/// `value` is returned unchanged when scaling it by `10^decimals` would leave
/// the range of `f64`; at that many places there is nothing left to round.
///
/// # Examples
/// ```
/// use portalx::round_to;
///
/// assert_eq!(round_to(1.875, 2), 1.88);
/// assert_eq!(round_to(-0.125, 2), -0.13);
/// assert_eq!(round_to(1.875, 400), 1.875);
/// ```
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let Ok(exponent) = i32::try_from(decimals) else {
        return value;
    };
    let scale = 10_f64.powi(exponent);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}
