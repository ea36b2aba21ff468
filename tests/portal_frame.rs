#![warn(clippy::pedantic)]

use approx::assert_relative_eq;
use portalx::{
    analyze, analyze_with, AnalysisOptions, Field, MomentAccumulation, ResultGrid, Structure,
    ValidationError,
};

fn two_story_frame() -> Structure {
    Structure::uniform(vec![3.0, 3.0], &[4.0, 4.0], vec![10.0, 10.0])
}

fn setback_frame() -> Structure {
    Structure::new(
        vec![3.0, 3.5, 4.0],
        vec![vec![5.0], vec![5.0, 6.0], vec![5.0, 6.0, 4.0]],
        vec![8.0, 12.0, 15.0],
    )
}

fn assert_rows(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert_relative_eq!(*a, *e, epsilon = 1.0e-9);
    }
}

fn assert_all_finite(grid: &ResultGrid) {
    for rows in [
        &grid.column_shear,
        &grid.column_moment,
        &grid.girder_moment,
        &grid.girder_shear,
    ] {
        assert!(rows.iter().flatten().all(|value| value.is_finite()));
    }
}

#[test]
fn single_bay_matches_closed_form() {
    let (load, height, span) = (12.0, 3.5, 6.0);
    let frame = Structure::uniform(vec![height], &[span], vec![load]);
    let grid = analyze(&frame).expect("single bay analyses");

    let moment = load * height / 4.0;
    assert_rows(&grid.column_shear[0], &[load / 2.0, load / 2.0]);
    assert_rows(&grid.column_moment[0], &[moment, moment]);
    assert_rows(&grid.girder_moment[0], &[moment]);
    assert_rows(&grid.girder_shear[0], &[(moment + moment) / span]);
}

#[test]
fn two_story_frame_matches_hand_calculation() {
    let grid = analyze(&two_story_frame()).expect("two story frame analyses");

    assert_rows(&grid.column_shear[0], &[2.5, 5.0, 2.5]);
    assert_rows(&grid.column_moment[0], &[3.75, 7.5, 3.75]);
    assert_rows(&grid.girder_moment[0], &[3.75, 3.75]);
    assert_rows(&grid.girder_shear[0], &[1.875, 1.875]);

    // The ground story joints also carry the roof story's column moments.
    assert_rows(&grid.column_shear[1], &[5.0, 10.0, 5.0]);
    assert_rows(&grid.column_moment[1], &[7.5, 15.0, 7.5]);
    assert_rows(&grid.girder_moment[1], &[11.25, 11.25]);
    assert_rows(&grid.girder_shear[1], &[5.625, 5.625]);
}

#[test]
fn grid_shape_follows_bay_counts() {
    let frame = setback_frame();
    let grid = analyze(&frame).expect("setback frame analyses");

    assert_eq!(grid.story_count(), frame.story_count);
    for forces in grid.stories() {
        let spans = frame.spans_per_story[forces.story];
        assert_eq!(forces.column_shear.len(), spans + 1);
        assert_eq!(forces.column_moment.len(), spans + 1);
        assert_eq!(forces.girder_moment.len(), spans);
        assert_eq!(forces.girder_shear.len(), spans);
    }
}

#[test]
fn interior_columns_take_double_shear() {
    for bays in 2..=6 {
        let frame = Structure::uniform(vec![3.0], &vec![4.0; bays], vec![30.0]);
        let grid = analyze(&frame).expect("frame analyses");
        let shears = &grid.column_shear[0];
        let exterior = shears[0];
        assert_relative_eq!(shears[bays], exterior);
        for interior in &shears[1..bays] {
            assert_relative_eq!(*interior, 2.0 * exterior, epsilon = 1.0e-12);
        }
        assert_relative_eq!(shears.iter().sum::<f64>(), 30.0, epsilon = 1.0e-9);
    }
}

#[test]
fn column_shear_never_decreases_down_the_frame() {
    let frame = Structure::uniform(
        vec![3.0, 3.0, 3.0, 3.0],
        &[4.0, 5.0, 4.0],
        vec![6.0, 0.0, 4.5, 2.0],
    );
    let grid = analyze(&frame).expect("frame analyses");
    for story in 1..frame.story_count {
        for (lower, upper) in grid.column_shear[story].iter().zip(&grid.column_shear[story - 1]) {
            assert!(lower >= upper);
        }
    }
}

#[test]
fn new_columns_inherit_no_moment() {
    let grid = analyze(&setback_frame()).expect("setback frame analyses");

    assert_rows(&grid.column_moment[0], &[6.0, 6.0]);
    assert_rows(&grid.girder_moment[0], &[6.0]);
    assert_rows(&grid.girder_shear[0], &[2.4]);

    // Column 2 of the middle story starts at that floor.
    assert_rows(&grid.column_moment[1], &[8.75, 17.5, 8.75]);
    assert_rows(&grid.girder_moment[1], &[14.75, 8.75]);
    assert_rows(&grid.girder_shear[1], &[4.7, 17.5 / 6.0]);

    let third = 35.0 / 3.0;
    assert_rows(&grid.column_moment[2], &[third, 2.0 * third, 2.0 * third, third]);
    assert_rows(
        &grid.girder_moment[2],
        &[third + 8.75, third + 8.75, third],
    );
    assert_rows(
        &grid.girder_shear[2],
        &[
            2.0 * (third + 8.75) / 5.0,
            (2.0 * third + 8.75) / 6.0,
            2.0 * third / 4.0,
        ],
    );
}

#[test]
fn all_stories_accumulation_adds_every_column_above() {
    let frame = setback_frame();
    let adjacent = analyze(&frame).expect("setback frame analyses");
    let all = analyze_with(
        &frame,
        &AnalysisOptions {
            accumulation: MomentAccumulation::AllStoriesAbove,
        },
    )
    .expect("setback frame analyses");

    // Column shears and moments never depend on the accumulation rule.
    assert_eq!(adjacent.column_shear, all.column_shear);
    assert_eq!(adjacent.column_moment, all.column_moment);
    // The two rules agree until a joint has more than one story above it.
    assert_eq!(adjacent.girder_moment[..2], all.girder_moment[..2]);

    let third = 35.0 / 3.0;
    assert_rows(
        &all.girder_moment[2],
        &[third + 14.75, third + 8.75, third],
    );
    assert_rows(
        &all.girder_shear[2],
        &[
            (2.0 * third + 23.5) / 5.0,
            (2.0 * third + 8.75) / 6.0,
            2.0 * third / 4.0,
        ],
    );
}

#[test]
fn stories_depend_only_on_stories_above() {
    let frame = setback_frame();
    let full = analyze(&frame).expect("setback frame analyses");
    let again = analyze(&frame).expect("setback frame analyses");
    assert_eq!(full, again);

    for stories in 1..frame.story_count {
        let upper = Structure::new(
            frame.story_heights[..stories].to_vec(),
            frame.span_lengths[..stories].to_vec(),
            frame.lateral_loads[..stories].to_vec(),
        );
        let partial = analyze(&upper).expect("upper frame analyses");
        assert_eq!(partial.column_shear[..], full.column_shear[..stories]);
        assert_eq!(partial.girder_moment[..], full.girder_moment[..stories]);
        assert_eq!(partial.girder_shear[..], full.girder_shear[..stories]);
    }
}

#[test]
fn unloaded_frame_yields_zero_forces() {
    let frame = Structure::uniform(vec![3.0, 3.0], &[4.0, 6.0, 4.0], vec![0.0, 0.0]);
    let grid = analyze(&frame).expect("unloaded frame analyses");
    assert_all_finite(&grid);
    assert!(grid.girder_shear.iter().flatten().all(|value| *value == 0.0));
}

#[test]
fn mixed_scale_frames_give_finite_results() {
    let frame = Structure::new(
        vec![0.5, 12.0, 3.0],
        vec![vec![0.1; 5], vec![25.0], vec![3.0, 0.2]],
        vec![1.0e-6, 1.0e6, 0.0],
    );
    let grid = analyze(&frame).expect("frame analyses");
    assert_all_finite(&grid);
}

#[test]
fn loads_that_would_overflow_are_rejected() {
    let frame = Structure::uniform(vec![3.0, 3.0], &[4.0, 4.0], vec![1.0e308, 1.0e308]);
    let error = analyze(&frame).expect_err("accumulated load overflows");
    assert_eq!(error, ValidationError::ForceOverflow { story: 1 });
    assert_eq!(error.field(), Field::LateralLoads);

    // The roof story alone stays within range and analyses cleanly.
    let roof = Structure::uniform(vec![3.0], &[4.0, 4.0], vec![1.0e308]);
    let grid = analyze(&roof).expect("roof story analyses");
    assert_all_finite(&grid);
}

#[test]
fn invalid_frames_report_field_and_story() {
    let mut frame = two_story_frame();
    frame.span_lengths[1] = vec![4.0, -4.0];
    let error = analyze(&frame).expect_err("negative span rejected");
    assert_eq!(
        error,
        ValidationError::NonPositiveSpanLength {
            story: 1,
            span: 1,
            length: -4.0,
        }
    );
    assert_eq!(error.field(), Field::SpanLengths);
    assert_eq!(error.story(), Some(1));
}

#[test]
fn bundled_document_loads_and_analyses() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/two_story.json");
    let frame = Structure::from_path(path).expect("bundled structure loads");
    assert_eq!(frame, two_story_frame());

    let grid = analyze(&frame).expect("bundled structure analyses");
    let serialized = serde_json::to_string(&grid).expect("grid serializes");
    let restored: ResultGrid = serde_json::from_str(&serialized).expect("grid deserializes");
    assert_eq!(restored, grid);
}

#[test]
fn concurrent_analyses_agree() {
    let frame = setback_frame();
    let expected = analyze(&frame).expect("setback frame analyses");
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let frame = frame.clone();
            std::thread::spawn(move || analyze(&frame))
        })
        .collect();
    for handle in handles {
        let grid = handle
            .join()
            .expect("analysis thread completes")
            .expect("setback frame analyses");
        assert_eq!(grid, expected);
    }
}
