use portalx::{analyze, Structure};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Two stories, two 4 m bays, 10 kN at each floor level
    let frame = Structure::uniform(vec![3.0, 3.0], &[4.0, 4.0], vec![10.0, 10.0]);

    // Analyse the frame
    let grid = analyze(&frame)?;

    // Print the girder shears rounded for display
    for forces in grid.rounded(2).stories() {
        println!("Story {} girder shear: {:?}", forces.story + 1, forces.girder_shear);
    }

    Ok(())
}
