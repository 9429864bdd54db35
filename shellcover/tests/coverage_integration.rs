//! Integration tests for complete coverage runs.
//!
//! These tests exercise the whole flow:
//! - coordinate files → ReferencePoints
//! - CoverageConfig → CoverageEstimator + BatchDriver
//! - observers (coordinate log, disc projection) receiving batches
//!
//! Run with: `cargo test --test coverage_integration`

use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;

use shellcover::driver::{HIT_LOG_FILE, MISS_LOG_FILE};
use shellcover::{
    BatchDriver, CoordinateLog, CoverageConfig, CoverageError, CoverageEstimator, DiscProjection,
    NullObserver, ObserverSet, ReferencePoints,
};

// ============================================================================
// Helper Functions
// ============================================================================

/// Write a coordinate file and return its path.
fn write_points(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Octahedron vertices on the unit sphere.
const OCTAHEDRON: &str = "\
 1  0  0
-1  0  0
 0  1  0
 0 -1  0
 0  0  1
 0  0 -1
";

fn seeded_run(points: &ReferencePoints, config: &CoverageConfig) -> shellcover::RunSummary {
    let mut estimator = CoverageEstimator::from_config(points.as_slice(), config).unwrap();
    let mut rng = StdRng::seed_from_u64(config.seed().unwrap_or(0));
    BatchDriver::new(config)
        .run(&mut estimator, &mut rng, &mut NullObserver)
        .unwrap()
}

// ============================================================================
// Integration Tests
// ============================================================================

#[test]
fn test_octahedron_cap_coverage() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_points(dir.path(), "octa.xyz", OCTAHEDRON);
    let points = ReferencePoints::load(&[file]).unwrap();
    assert_eq!(points.len(), 6);

    // Six disjoint caps of half-angle 0.5 rad
    let config = CoverageConfig::builder()
        .point_radius(0.5)
        .iterations(2_000)
        .batch_size(50)
        .seed(31)
        .build()
        .unwrap();

    let summary = seeded_run(&points, &config);
    let estimate = summary.estimate.unwrap();

    let expected = 6.0 * (1.0 - 0.5_f64.cos()) / 2.0;
    assert_eq!(estimate.samples, 100_000);
    assert!(
        (estimate.hit_fraction - expected).abs() < 0.01,
        "fraction {} expected {}",
        estimate.hit_fraction,
        expected
    );
    assert!((estimate.area - estimate.hit_fraction * 4.0 * PI).abs() < 1e-12);
}

#[test]
fn test_multiple_files_concatenate() {
    let dir = tempfile::tempdir().unwrap();
    let north = write_points(dir.path(), "north.xyz", "0 0 1\n");
    let south = write_points(dir.path(), "south.xyz", "# south pole\n0 0 -1\n");

    let points = ReferencePoints::load(&[north, south]).unwrap();
    assert_eq!(points.len(), 2);

    let estimator = CoverageEstimator::new(points.as_slice(), 0.1, 1.0).unwrap();
    assert!(estimator.evaluate_hit(0.0, 0.0));
    assert!(estimator.evaluate_hit(PI, 0.0));
}

#[test]
fn test_identical_seeds_give_identical_runs() {
    let points = ReferencePoints::parse(OCTAHEDRON, Path::new("octa")).unwrap();
    let config = CoverageConfig::builder()
        .point_radius(0.3)
        .iterations(300)
        .batch_size(4)
        .seed(2025)
        .build()
        .unwrap();

    let a = seeded_run(&points, &config).estimate.unwrap();
    let b = seeded_run(&points, &config).estimate.unwrap();

    assert_eq!(a.samples, b.samples);
    assert_eq!(a.hits, b.hits);
    assert_eq!(a.area.to_bits(), b.area.to_bits());
    assert_eq!(a.report_line(300, 300), b.report_line(300, 300));
}

#[test]
fn test_dense_coverage_converges_to_one() {
    let points = ReferencePoints::parse("3 4 0\n", Path::new("single")).unwrap();
    let config = CoverageConfig::builder()
        .shell_radius(2.0)
        .point_radius(2.0 * PI + 0.1)
        .iterations(500)
        .batch_size(20)
        .seed(1)
        .build()
        .unwrap();

    let estimate = seeded_run(&points, &config).estimate.unwrap();
    assert_eq!(estimate.hit_fraction, 1.0);
    assert!((estimate.area - 4.0 * PI * 2.0).abs() < 1e-12);
}

#[test]
fn test_verbose_logs_and_projection() {
    let dir = tempfile::tempdir().unwrap();
    let points = ReferencePoints::parse(OCTAHEDRON, Path::new("octa")).unwrap();
    let config = CoverageConfig::builder()
        .point_radius(0.4)
        .iterations(40)
        .batch_size(5)
        .seed(12)
        .verbose(true)
        .visual(true)
        .output_dir(dir.path())
        .build()
        .unwrap();

    let mut estimator = CoverageEstimator::from_config(points.as_slice(), &config).unwrap();
    let mut rng = StdRng::seed_from_u64(12);
    let mut log = CoordinateLog::create(config.output_dir()).unwrap();
    let mut projection = DiscProjection::new(points.as_slice(), config.visual_2d_clip());

    let summary = {
        let mut observers = ObserverSet::new();
        observers.push(&mut log);
        observers.push(&mut projection);
        BatchDriver::new(&config)
            .run(&mut estimator, &mut rng, &mut observers)
            .unwrap()
    };
    let estimate = summary.estimate.unwrap();

    let hit_lines = fs::read_to_string(dir.path().join(HIT_LOG_FILE)).unwrap();
    let miss_lines = fs::read_to_string(dir.path().join(MISS_LOG_FILE)).unwrap();
    assert_eq!(hit_lines.lines().count() as u64, estimate.hits);
    assert_eq!(
        miss_lines.lines().count() as u64,
        estimate.samples - estimate.hits
    );
    assert!(hit_lines.lines().all(|l| l.starts_with("H ")));
    assert_eq!(log.hits_written(), estimate.hits);

    let frame = projection.frame();
    assert_eq!(frame.frame, 40);
    assert_eq!(frame.hits.len() as u64, estimate.hits);
    assert_eq!(frame.hits.len() + frame.misses.len(), 200);
    assert_eq!(frame.reference.len(), 6);
    assert!(frame.bounds.is_some());
}

#[test]
fn test_empty_input_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let empty = write_points(dir.path(), "empty.xyz", "\n# nothing here\n");

    let err: CoverageError = ReferencePoints::load(&[empty]).unwrap_err().into();
    assert!(matches!(err, CoverageError::Input(_)));
}

#[test]
fn test_restricted_azimuth_band() {
    // Reference on +x; sampling only the wedge around +x raises the hit rate
    let points = ReferencePoints::parse("1 0 0\n", Path::new("x")).unwrap();
    let full = CoverageConfig::builder()
        .point_radius(0.5)
        .iterations(1_000)
        .batch_size(20)
        .seed(5)
        .build()
        .unwrap();
    let wedge = CoverageConfig::builder()
        .point_radius(0.5)
        .iterations(1_000)
        .batch_size(20)
        .seed(5)
        .azimuth_range(0.0, 0.5)
        .build()
        .unwrap();

    let full_fraction = seeded_run(&points, &full).estimate.unwrap().hit_fraction;
    let wedge_fraction = seeded_run(&points, &wedge).estimate.unwrap().hit_fraction;
    assert!(wedge_fraction > 3.0 * full_fraction);
}
