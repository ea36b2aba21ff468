mod cli;

use cli::parse_args;
use portalx::{analyze_with, render_report, Structure};
use std::error::Error;

/// Decimal places used by the text report when none are requested.
const DEFAULT_PRECISION: usize = 2;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Read the structure file and flags from the command line. Options that
    // change the numbers (the moment accumulation rule) are kept apart from
    // options that only change the presentation (precision and JSON output).
    let options = parse_args(std::env::args().skip(1))?;

    // Loading validates the frame, so a bad document never reaches the engine.
    let structure = Structure::from_path(&options.path)?;
    log::debug!(
        "loaded {} stories with spans {:?} ({:?} layout)",
        structure.story_count,
        structure.spans_per_story,
        structure.layout_kind
    );
    log::debug!("column moment accumulation: {:?}", options.analysis.accumulation);

    // Run the Portal Method: story shear splits among the columns with the
    // interior ones taking a double share, columns bend about a point of
    // inflection at mid-height, and girder moments follow from equilibrium at
    // each joint. See https://en.wikipedia.org/wiki/Portal_method.
    let grid = analyze_with(&structure, &options.analysis)?;

    // The largest moments are what an engineer sizes members for, so they are
    // worth surfacing even when only the log is read.
    if let Some(governing) = grid.max_girder_moment() {
        log::info!(
            "governing girder moment {:.3} at story {}, span {}",
            governing.value,
            governing.story + 1,
            governing.index + 1
        );
    }
    if let Some(governing) = grid.max_column_moment() {
        log::info!(
            "governing column moment {:.3} at story {}, column {}",
            governing.value,
            governing.story + 1,
            governing.index + 1
        );
    }

    // Rounding happens only here, after the analysis, so displayed values
    // never feed back into the calculation.
    if options.json {
        let grid = match options.precision {
            Some(decimals) => grid.rounded(u32::try_from(decimals).unwrap_or(u32::MAX)),
            None => grid,
        };
        println!("{}", serde_json::to_string_pretty(&grid)?);
    } else {
        let precision = options.precision.unwrap_or(DEFAULT_PRECISION);
        println!("{}", render_report(&structure, &grid, precision));
    }

    Ok(())
}
