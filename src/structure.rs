//! Frame topology and lateral loading.
//!
//! Every per-story sequence is indexed top to bottom: index `0` is the roof
//! story and index `story_count - 1` is the ground story.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Field, StructureFileError, ValidationError};
use crate::portal::effective_column_units;

/// Bay arrangement used when drawing the frame.
///
/// The tag is carried through for rendering layers and has no influence on
/// the computed forces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// Every story has the same bays.
    #[default]
    Uniform,
    /// The number or length of bays changes between stories.
    Variable,
}

/// Description of a multi-story, multi-bay rigid frame under lateral load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    /// Number of stories in the frame.
    pub story_count: usize,
    /// Height of each story.
    pub story_heights: Vec<f64>,
    /// Number of bays on each story.
    pub spans_per_story: Vec<usize>,
    /// Length of every bay on each story, left to right.
    pub span_lengths: Vec<Vec<f64>>,
    /// Lateral load applied at the floor level of each story.
    pub lateral_loads: Vec<f64>,
    /// Rendering hint, ignored by the analysis.
    #[serde(default)]
    pub layout_kind: LayoutKind,
}

impl Structure {
    /// Build a structure, deriving the story and bay counts from the supplied sequences.
    ///
    /// The layout kind is [`LayoutKind::Variable`] when any two stories differ
    /// in their bays, otherwise [`LayoutKind::Uniform`].
    ///
    /// # Examples
    /// ```
    /// use portalx::{LayoutKind, Structure};
    ///
    /// let frame = Structure::new(
    ///     vec![3.0, 3.0],
    ///     vec![vec![4.0, 4.0], vec![4.0, 4.0]],
    ///     vec![10.0, 10.0],
    /// );
    /// assert_eq!(frame.story_count, 2);
    /// assert_eq!(frame.spans_per_story, vec![2, 2]);
    /// assert_eq!(frame.layout_kind, LayoutKind::Uniform);
    /// ```
    #[must_use]
    pub fn new(
        story_heights: Vec<f64>,
        span_lengths: Vec<Vec<f64>>,
        lateral_loads: Vec<f64>,
    ) -> Self {
        let spans_per_story = span_lengths.iter().map(Vec::len).collect();
        let layout_kind = if span_lengths.windows(2).all(|pair| pair[0] == pair[1]) {
            LayoutKind::Uniform
        } else {
            LayoutKind::Variable
        };
        Self {
            story_count: story_heights.len(),
            story_heights,
            spans_per_story,
            span_lengths,
            lateral_loads,
            layout_kind,
        }
    }

    /// Build a frame where every story has the same bays.
    #[must_use]
    pub fn uniform(story_heights: Vec<f64>, bays: &[f64], lateral_loads: Vec<f64>) -> Self {
        let span_lengths = vec![bays.to_vec(); story_heights.len()];
        Self::new(story_heights, span_lengths, lateral_loads)
    }

    /// Parse and validate a structure from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`StructureFileError::Parse`] when the document is malformed and
    /// [`StructureFileError::Invalid`] when it describes an invalid frame.
    pub fn from_json(document: &str) -> Result<Self, StructureFileError> {
        let structure: Structure = serde_json::from_str(document)?;
        structure.validate()?;
        Ok(structure)
    }

    /// Read, parse and validate a structure from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`StructureFileError::Read`] when the file cannot be read, otherwise
    /// the errors of [`Structure::from_json`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, StructureFileError> {
        let path = path.as_ref();
        log::debug!("reading structure from {}", path.display());
        let document = std::fs::read_to_string(path).map_err(|source| StructureFileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&document)
    }

    /// Number of columns on a story.
    ///
    /// # Panics
    ///
    /// Panics when `story` is out of range.
    #[must_use]
    pub fn num_columns(&self, story: usize) -> usize {
        self.spans_per_story[story] + 1
    }

    /// Number of bays on a story.
    ///
    /// # Panics
    ///
    /// Panics when `story` is out of range.
    #[must_use]
    pub fn num_spans(&self, story: usize) -> usize {
        self.spans_per_story[story]
    }

    /// Sum of all lateral loads.
    #[must_use]
    pub fn total_lateral_load(&self) -> f64 {
        self.lateral_loads.iter().sum()
    }

    /// Whether `story` has a column at index `column`, counting from the left edge.
    ///
    /// Returns `false` for stories that do not exist.
    #[must_use]
    pub fn column_exists(&self, story: usize, column: usize) -> bool {
        self.spans_per_story
            .get(story)
            .map_or(false, |spans| column < spans + 1)
    }

    /// Index of the column on the story directly above that meets `column`
    /// of `story` at its top joint, or `None` for the roof story and for
    /// columns introduced at this floor.
    ///
    /// # Examples
    /// ```
    /// use portalx::Structure;
    ///
    /// let frame = Structure::new(
    ///     vec![3.0, 3.0],
    ///     vec![vec![4.0], vec![4.0, 4.0]],
    ///     vec![5.0, 5.0],
    /// );
    /// assert_eq!(frame.column_above(1, 1), Some(1));
    /// assert_eq!(frame.column_above(1, 2), None);
    /// assert_eq!(frame.column_above(0, 0), None);
    /// ```
    #[must_use]
    pub fn column_above(&self, story: usize, column: usize) -> Option<usize> {
        let above = story.checked_sub(1)?;
        self.column_exists(above, column).then_some(column)
    }

    /// Check that the structure can be analysed.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found, checking the story count,
    /// then the length of every per-story field, then each story from the top.
    /// A story whose forces would exceed the range of `f64` is rejected with
    /// [`ValidationError::ForceOverflow`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.story_count == 0 {
            return Err(ValidationError::NoStories);
        }
        let lengths = [
            (Field::StoryHeights, self.story_heights.len()),
            (Field::SpansPerStory, self.spans_per_story.len()),
            (Field::SpanLengths, self.span_lengths.len()),
            (Field::LateralLoads, self.lateral_loads.len()),
        ];
        for (field, found) in lengths {
            if found != self.story_count {
                return Err(ValidationError::StoryCountMismatch {
                    field,
                    expected: self.story_count,
                    found,
                });
            }
        }
        let mut bounds = ForceBounds::default();
        for story in 0..self.story_count {
            self.validate_story(story)?;
            bounds.advance(self, story)?;
        }
        Ok(())
    }

    /// Check the fields of a single story.
    fn validate_story(&self, story: usize) -> Result<(), ValidationError> {
        let height = self.story_heights[story];
        if !(height.is_finite() && height > 0.0) {
            return Err(ValidationError::NonPositiveHeight { story, height });
        }
        let spans = self.spans_per_story[story];
        if spans == 0 {
            return Err(ValidationError::NoSpans { story });
        }
        let lengths = &self.span_lengths[story];
        if lengths.len() != spans {
            return Err(ValidationError::SpanLengthCountMismatch {
                story,
                expected: spans,
                found: lengths.len(),
            });
        }
        if let Some((span, &length)) = lengths
            .iter()
            .enumerate()
            .find(|(_, length)| !(length.is_finite() && **length > 0.0))
        {
            return Err(ValidationError::NonPositiveSpanLength { story, span, length });
        }
        let load = self.lateral_loads[story];
        if !(load.is_finite() && load >= 0.0) {
            return Err(ValidationError::NegativeLateralLoad { story, load });
        }
        Ok(())
    }
}

/// Running upper bounds on the forces of the stories checked so far.
///
/// Finite inputs can still overflow once loads accumulate, so each story is
/// checked against the largest values the analysis can produce for it.
#[derive(Debug, Default)]
struct ForceBounds {
    /// Cumulative lateral load down to the current story.
    story_shear: f64,
    /// Sum of the largest column moment of every story so far, which bounds
    /// any joint moment and therefore any girder moment.
    joint_moment: f64,
}

impl ForceBounds {
    /// Fold in `story` and reject it if any of its forces would not be finite.
    fn advance(&mut self, structure: &Structure, story: usize) -> Result<(), ValidationError> {
        let overflow = Err(ValidationError::ForceOverflow { story });

        self.story_shear += structure.lateral_loads[story];
        if !self.story_shear.is_finite() {
            return overflow;
        }

        let columns = structure.num_columns(story);
        let exterior = self.story_shear / effective_column_units(columns) as f64;
        let column_shear = if columns > 2 { 2.0 * exterior } else { exterior };
        let shear_height = column_shear * structure.story_heights[story];
        if !shear_height.is_finite() {
            return overflow;
        }

        self.joint_moment += shear_height * 0.5;
        let shortest = structure.span_lengths[story]
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        let girder_shear = (self.joint_moment + self.joint_moment) / shortest;
        if !(self.joint_moment.is_finite() && girder_shear.is_finite()) {
            return overflow;
        }
        Ok(())
    }
}
