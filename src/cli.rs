use std::path::PathBuf;

use portalx::{AnalysisOptions, MomentAccumulation};
use thiserror::Error;

/// Usage line printed alongside argument errors.
pub const USAGE: &str = "usage: portalx <structure.json> [--all-stories] [--precision N] [--json]";

/// Settings collected from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    /// Path to the structure document.
    pub path: PathBuf,
    /// Options forwarded to the analysis.
    pub analysis: AnalysisOptions,
    /// Decimal places for output; `None` keeps full precision in JSON output.
    pub precision: Option<usize>,
    /// Print the result grid as JSON instead of a text report.
    pub json: bool,
}

/// Error returned when the command line cannot be interpreted.
#[derive(Debug, Error, PartialEq)]
pub enum CliError {
    /// Returned when no structure file is given.
    #[error("missing structure file\n{}", USAGE)]
    MissingPath,
    /// Returned when `--precision` has no value.
    #[error("--precision requires a value\n{}", USAGE)]
    MissingPrecision,
    /// Returned when `--precision` is not a non-negative integer.
    #[error("invalid precision {0:?}\n{}", USAGE)]
    InvalidPrecision(String),
    /// Returned for flags that are not recognised.
    #[error("unknown option {0:?}\n{}", USAGE)]
    UnknownOption(String),
    /// Returned when more than one structure file is given.
    #[error("unexpected argument {0:?}\n{}", USAGE)]
    UnexpectedArgument(String),
}

/// Interpret the arguments that follow the program name.
pub fn parse_args<I>(args: I) -> Result<CliOptions, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut path = None;
    let mut analysis = AnalysisOptions::default();
    let mut precision = None;
    let mut json = false;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--all-stories" => analysis.accumulation = MomentAccumulation::AllStoriesAbove,
            "--json" => json = true,
            "--precision" => {
                let value = args.next().ok_or(CliError::MissingPrecision)?;
                let decimals = value
                    .parse::<usize>()
                    .map_err(|_| CliError::InvalidPrecision(value.clone()))?;
                precision = Some(decimals);
            }
            flag if flag.starts_with("--") => return Err(CliError::UnknownOption(arg)),
            _ if path.is_none() => path = Some(PathBuf::from(arg)),
            _ => return Err(CliError::UnexpectedArgument(arg)),
        }
    }

    Ok(CliOptions {
        path: path.ok_or(CliError::MissingPath)?,
        analysis,
        precision,
        json,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| (*arg).to_string()).collect()
    }

    #[test]
    fn defaults_to_adjacent_story_text_report() {
        let options = parse_args(args(&["frame.json"])).expect("valid arguments");
        assert_eq!(options.path, PathBuf::from("frame.json"));
        assert_eq!(options.analysis, AnalysisOptions::default());
        assert_eq!(options.precision, None);
        assert!(!options.json);
    }

    #[test]
    fn flags_may_appear_in_any_order() {
        let options = parse_args(args(&[
            "--json",
            "--precision",
            "3",
            "frame.json",
            "--all-stories",
        ]))
        .expect("valid arguments");
        assert_eq!(options.analysis.accumulation, MomentAccumulation::AllStoriesAbove);
        assert_eq!(options.precision, Some(3));
        assert!(options.json);
    }

    #[test]
    fn malformed_arguments_are_rejected() {
        assert_eq!(parse_args(args(&[])), Err(CliError::MissingPath));
        assert_eq!(
            parse_args(args(&["frame.json", "--precision"])),
            Err(CliError::MissingPrecision)
        );
        assert_eq!(
            parse_args(args(&["frame.json", "--precision", "-1"])),
            Err(CliError::InvalidPrecision("-1".to_string()))
        );
        assert_eq!(
            parse_args(args(&["frame.json", "--verbose"])),
            Err(CliError::UnknownOption("--verbose".to_string()))
        );
        assert_eq!(
            parse_args(args(&["a.json", "b.json"])),
            Err(CliError::UnexpectedArgument("b.json".to_string()))
        );
    }
}
