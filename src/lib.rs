#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod errors;
pub mod portal;
pub mod report;
pub mod results;
pub mod structure;

pub use errors::{Field, StructureFileError, ValidationError};
pub use portal::{analyze, analyze_with, AnalysisOptions, MomentAccumulation};
pub use report::render_report;
pub use results::{round_to, Governing, ResultGrid, StoryForces};
pub use structure::{LayoutKind, Structure};
