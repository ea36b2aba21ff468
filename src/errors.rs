//! Error types produced while validating or loading frame structures.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Input field of a [`Structure`](crate::Structure) named by a validation failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// The declared number of stories.
    StoryCount,
    /// Story heights, indexed top to bottom.
    StoryHeights,
    /// Number of bays on each story.
    SpansPerStory,
    /// Bay lengths on each story.
    SpanLengths,
    /// Lateral load applied at each floor level.
    LateralLoads,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::StoryCount => "story_count",
            Field::StoryHeights => "story_heights",
            Field::SpansPerStory => "spans_per_story",
            Field::SpanLengths => "span_lengths",
            Field::LateralLoads => "lateral_loads",
        };
        f.write_str(name)
    }
}

/// Error returned when a structure cannot be analysed.
///
/// Validation stops at the first violation, so each variant identifies a
/// single offending field and, where one applies, the story it was found on.
///
/// # Examples
///
/// ```
/// use portalx::{Field, Structure, ValidationError};
///
/// let structure = Structure::new(vec![3.0], vec![vec![4.0]], vec![-1.0]);
/// let error = structure.validate().expect_err("negative load rejected");
/// assert_eq!(error, ValidationError::NegativeLateralLoad { story: 0, load: -1.0 });
/// assert_eq!(error.field(), Field::LateralLoads);
/// assert_eq!(error.story(), Some(0));
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Returned when the structure declares no stories.
    #[error("structure must have at least one story")]
    NoStories,
    /// Returned when a per-story field does not have one entry per story.
    #[error("{field} has {found} entries but the structure has {expected} stories")]
    StoryCountMismatch {
        /// Field whose length disagrees with the story count.
        field: Field,
        /// Declared number of stories.
        expected: usize,
        /// Number of entries supplied.
        found: usize,
    },
    /// Returned when a story height is zero, negative or not finite.
    #[error("story {story}: height must be positive (received {height})")]
    NonPositiveHeight {
        /// Story index, counted from the top.
        story: usize,
        /// Rejected height.
        height: f64,
    },
    /// Returned when a story has no bays.
    #[error("story {story}: at least one span is required")]
    NoSpans {
        /// Story index, counted from the top.
        story: usize,
    },
    /// Returned when the span lengths of a story disagree with its bay count.
    #[error("story {story}: expected {expected} span lengths, received {found}")]
    SpanLengthCountMismatch {
        /// Story index, counted from the top.
        story: usize,
        /// Declared number of spans on the story.
        expected: usize,
        /// Number of span lengths supplied.
        found: usize,
    },
    /// Returned when a span length is zero, negative or not finite.
    #[error("story {story}, span {span}: length must be positive (received {length})")]
    NonPositiveSpanLength {
        /// Story index, counted from the top.
        story: usize,
        /// Span index, counted from the left.
        span: usize,
        /// Rejected length.
        length: f64,
    },
    /// Returned when a lateral load is negative or not finite.
    #[error("story {story}: lateral load must be non-negative (received {load})")]
    NegativeLateralLoad {
        /// Story index, counted from the top.
        story: usize,
        /// Rejected load.
        load: f64,
    },
    /// Returned when the accumulated loads make a story's forces exceed the range of `f64`.
    #[error("story {story}: forces exceed the representable range")]
    ForceOverflow {
        /// Story index, counted from the top.
        story: usize,
    },
}

impl ValidationError {
    /// Return the input field that failed validation.
    #[must_use]
    pub fn field(&self) -> Field {
        match self {
            ValidationError::NoStories => Field::StoryCount,
            ValidationError::StoryCountMismatch { field, .. } => *field,
            ValidationError::NonPositiveHeight { .. } => Field::StoryHeights,
            ValidationError::NoSpans { .. } => Field::SpansPerStory,
            ValidationError::SpanLengthCountMismatch { .. }
            | ValidationError::NonPositiveSpanLength { .. } => Field::SpanLengths,
            ValidationError::NegativeLateralLoad { .. } | ValidationError::ForceOverflow { .. } => {
                Field::LateralLoads
            }
        }
    }

    /// Return the story on which the violation was found, if it is story specific.
    #[must_use]
    pub fn story(&self) -> Option<usize> {
        match self {
            ValidationError::NoStories | ValidationError::StoryCountMismatch { .. } => None,
            ValidationError::NonPositiveHeight { story, .. }
            | ValidationError::NoSpans { story }
            | ValidationError::SpanLengthCountMismatch { story, .. }
            | ValidationError::NonPositiveSpanLength { story, .. }
            | ValidationError::NegativeLateralLoad { story, .. }
            | ValidationError::ForceOverflow { story } => Some(*story),
        }
    }
}

/// Error returned when reading a structure description from disk.
#[derive(Debug, Error)]
pub enum StructureFileError {
    /// Returned when the file cannot be read.
    #[error("unable to read {path:?}: {source}")]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the contents are not a valid structure document.
    #[error("malformed structure document: {0}")]
    Parse(#[from] serde_json::Error),
    /// Returned when the document parses but describes an invalid frame.
    #[error("invalid structure: {0}")]
    Invalid(#[from] ValidationError),
}
