use portalx::{analyze_with, render_report, AnalysisOptions, MomentAccumulation, Structure};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A setback frame: one bay at the roof widening to three at the ground
    let frame = Structure::new(
        vec![3.0, 3.5, 4.0],
        vec![vec![5.0], vec![5.0, 6.0], vec![5.0, 6.0, 4.0]],
        vec![8.0, 12.0, 15.0],
    );

    // Compare the two column moment accumulation rules
    for accumulation in [MomentAccumulation::AdjacentStory, MomentAccumulation::AllStoriesAbove] {
        let grid = analyze_with(&frame, &AnalysisOptions { accumulation })?;
        println!("{accumulation:?}");
        println!("{}", render_report(&frame, &grid, 2));
    }

    Ok(())
}
