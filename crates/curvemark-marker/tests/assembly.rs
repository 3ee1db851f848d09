use curvemark_core::{GeometryError, GEOMETRY_EPSILON};
use curvemark_marker::{
    generate_markers, MarkerAssembly, MarkerConfig, MarkerError, MarkerJob, MarkerKind,
    TubeProfile,
};

fn assembly() -> MarkerAssembly {
    MarkerAssembly::new(&MarkerConfig::default()).unwrap()
}

#[test]
fn test_assembly_is_deterministic() {
    let job = MarkerJob::new(1800.0, 1300.0, 1520.0)
        .with_deflection(45.0)
        .with_kind(MarkerKind::Zipper(TubeProfile::Tube55));

    let first = assembly().assemble(&job).unwrap();
    let second = assembly().assemble(&job).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_cross_grain_naming() {
    let job = MarkerJob::new(600.0, 1300.0, 520.0).with_deflection(30.0);
    let pieces = assembly().assemble(&job).unwrap();
    let suffixes: Vec<&str> = pieces.iter().map(|p| p.suffix()).collect();
    assert_eq!(suffixes, vec!["_01", "_02", "_03"]);

    // Only the last piece carries the curve
    assert_eq!(pieces[0].outline().arc_count(), 0);
    assert_eq!(pieces[1].outline().arc_count(), 0);
    assert_eq!(pieces[2].outline().arc_count(), 1);
    for piece in &pieces {
        assert!(piece.outline().is_closed(GEOMETRY_EPSILON));
    }
}

#[test]
fn test_single_cross_grain_piece_has_empty_suffix() {
    let job = MarkerJob::new(600.0, 400.0, 520.0);
    let pieces = assembly().assemble(&job).unwrap();
    assert_eq!(pieces.len(), 1);
    assert_eq!(pieces[0].suffix(), "");
    assert_eq!(pieces[0].file_name("awning"), "awning.dxf");
}

#[test]
fn test_with_grain_curve_lands_in_positive_quadrant() {
    let job = MarkerJob::new(480.0, 1000.0, 520.0).with_deflection(40.0);
    let pieces = assembly().assemble(&job).unwrap();
    assert_eq!(pieces.len(), 1);

    let outline = pieces[0].outline();
    assert!(outline.is_closed(GEOMETRY_EPSILON));
    assert_eq!(outline.arc_count(), 1);

    let bounds = outline.bounds();
    assert!(bounds.min_x > -GEOMETRY_EPSILON);
    assert!(bounds.min_y > -GEOMETRY_EPSILON);
    // Height along the feed, width across the roll
    assert!((bounds.max_x - 1000.0).abs() < 1e-6);
    assert!((bounds.max_y - 480.0).abs() < 1e-6);

    // The curved edge now runs across the roll at the far end of the feed
    let arc = outline.arcs().next().unwrap();
    assert!(arc.start().x > 999.0 && arc.end().x > 999.0);
    assert!(arc.contains_angle(180.0));
}

#[test]
fn test_zipper_with_grain() {
    let job = MarkerJob::new(1400.0, 900.0, 1520.0)
        .with_kind(MarkerKind::Zipper(TubeProfile::Tube80));
    let pieces = generate_markers(&job, &MarkerConfig::default()).unwrap();
    assert_eq!(pieces.len(), 1);
    assert_eq!(pieces[0].outline().arc_count(), 2);
    assert!(pieces[0].outline().is_closed(GEOMETRY_EPSILON));
}

#[test]
fn test_invalid_job_values() {
    let assembly = assembly();
    for job in [
        MarkerJob::new(0.0, 800.0, 1500.0),
        MarkerJob::new(500.0, 0.0, 1500.0),
        MarkerJob::new(500.0, 800.0, -3.0),
        MarkerJob::new(500.0, 800.0, 1500.0).with_deflection(-1.0),
        MarkerJob::new(f64::NAN, 800.0, 1500.0),
    ] {
        let err = assembly.assemble(&job).unwrap_err();
        assert!(
            matches!(err, MarkerError::InvalidDimensions(_)),
            "unexpected error for {:?}: {}",
            job,
            err
        );
    }
}

#[test]
fn test_oversized_deflection_is_rejected_not_clamped() {
    let job = MarkerJob::new(500.0, 800.0, 1500.0).with_deflection(300.0);
    let err = assembly().assemble(&job).unwrap_err();
    assert!(matches!(err, MarkerError::InvalidDimensions(_)));
    assert!(err.to_string().contains("deflection"));
}

#[test]
fn test_unreachable_segmentation() {
    let job = MarkerJob::new(500.0, 800.0, 20.0);
    let err = assembly().assemble(&job).unwrap_err();
    assert!(matches!(err, MarkerError::UnreachableSegmentation { .. }));
    assert!(err.is_user_input());
}

#[test]
fn test_flat_curve_fails_the_whole_job() {
    // Sag too small to separate the apex from the chord
    let job = MarkerJob::new(600.0, 1090.0, 520.0).with_deflection(1e-13);
    let assembly = assembly();
    assert_eq!(assembly.plan(&job).unwrap().segments.len(), 3);

    let result = assembly.assemble(&job);
    assert!(matches!(
        result,
        Err(MarkerError::DegenerateGeometry(
            GeometryError::CollinearPoints { .. }
        ))
    ));
    assert!(!result.unwrap_err().is_user_input());
}
