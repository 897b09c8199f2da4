//! Tests for paper scaling and the user-to-device coordinate pipeline.

use hpglkit_core::HpglError;
use hpglkit_core::model::{PaperScaler, PaperSize, YAxis};
use hpglkit_core::pipeline::CoordinatePipeline;
use hpglkit_core::utils::approx_eq;

fn assert_point(actual: (f64, f64), expected: (f64, f64)) {
    assert!(
        approx_eq(actual.0, expected.0, 1e-6) && approx_eq(actual.1, expected.1, 1e-6),
        "expected {expected:?}, got {actual:?}"
    );
}

fn a4_pipeline(canvas_height: f64) -> CoordinatePipeline {
    let scaler = PaperScaler::new(PaperSize::A4, canvas_height).unwrap();
    CoordinatePipeline::new(scaler, YAxis::Down)
}

// ============================================================================
// PaperSize / PaperScaler
// ============================================================================

#[test]
fn test_paper_presets() {
    assert_eq!(PaperSize::A4.width(), 11040.0);
    assert_eq!(PaperSize::A4.height(), 7721.0);
    assert_eq!(PaperSize::A3.width(), 16158.0);
    assert_eq!(PaperSize::A3.height(), 11040.0);
    assert_eq!(PaperSize::default(), PaperSize::A4);
}

#[test]
fn test_paper_size_parsing() {
    assert_eq!("A3".parse::<PaperSize>().unwrap(), PaperSize::A3);
    assert_eq!(" a4 ".parse::<PaperSize>().unwrap(), PaperSize::A4);
    assert!(matches!(
        "Letter".parse::<PaperSize>(),
        Err(HpglError::Configuration(_))
    ));
    assert_eq!(PaperSize::A3.to_string(), "A3");
}

#[test]
fn test_scaler_ratio_from_height() {
    let scaler = PaperScaler::new(PaperSize::A4, 1000.0).unwrap();
    assert!(approx_eq(scaler.ratio(), 7.721, 1e-12));
    assert_point(scaler.to_device((500.0, 100.0)), (3860.5, 772.1));
    let (w, h) = scaler.to_device_extent(10.0, 20.0);
    assert_point((w, h), (77.21, 154.42));

    let a3 = PaperScaler::new(PaperSize::A3, 1104.0).unwrap();
    assert!(approx_eq(a3.ratio(), 10.0, 1e-12));
}

#[test]
fn test_scaler_rejects_non_positive_height() {
    assert!(matches!(
        PaperScaler::new(PaperSize::A4, 0.0),
        Err(HpglError::Configuration(_))
    ));
    assert!(matches!(
        PaperScaler::new(PaperSize::A4, -5.0),
        Err(HpglError::Configuration(_))
    ));
    assert!(PaperScaler::new(PaperSize::A4, f64::NAN).is_err());
}

// ============================================================================
// CoordinatePipeline
// ============================================================================

#[test]
fn test_centered_point_is_unchanged_by_flip() {
    let p = a4_pipeline(1000.0);
    assert_point(p.to_device(500.0, 500.0), (3860.5, 3860.5));
}

#[test]
fn test_off_center_point_is_flipped() {
    let p = a4_pipeline(1000.0);
    assert_point(p.to_device(500.0, 100.0), (3860.5, 6948.9));
}

#[test]
fn test_top_left_maps_to_top_of_paper() {
    let p = a4_pipeline(700.0);
    assert_point(p.to_device(0.0, 0.0), (0.0, 7721.0));
    assert_point(p.to_device(0.0, 700.0), (0.0, 0.0));
}

#[test]
fn test_y_up_canvas_is_not_flipped() {
    let scaler = PaperScaler::new(PaperSize::A4, 7721.0).unwrap();
    let p = CoordinatePipeline::new(scaler, YAxis::Up);
    assert!(!p.flips());
    assert_point(p.to_device(10.0, 20.0), (10.0, 20.0));
}

#[test]
fn test_transform_applies_before_scaling() {
    let mut p = a4_pipeline(1000.0);
    p.transforms_mut().translate(100.0, 0.0);
    assert_point(p.to_device(0.0, 1000.0), (772.1, 0.0));
}

#[test]
fn test_extent_ignores_transform() {
    let mut p = a4_pipeline(1000.0);
    p.transforms_mut().translate(50.0, 50.0);
    p.transforms_mut().rotate(1.0);
    let (w, h) = p.to_device_extent(100.0, 50.0);
    assert_point((w, h), (772.1, 386.05));
}

#[test]
fn test_round_trip_recovers_transformed_point() {
    for y_axis in [YAxis::Down, YAxis::Up] {
        let scaler = PaperScaler::new(PaperSize::A3, 733.0).unwrap();
        let mut p = CoordinatePipeline::new(scaler, y_axis);
        p.transforms_mut().translate(12.5, -3.0);
        p.transforms_mut().rotate(0.3);

        for &(x, y) in &[(0.0, 0.0), (10.0, 20.0), (-400.0, 123.456), (999.0, 0.001)] {
            let device = p.to_device(x, y);
            let back = p.from_device(device);
            assert_point(back, p.transforms().apply((x, y)));
        }
    }
}

#[test]
fn test_try_to_device_rejects_non_finite_points() {
    let p = a4_pipeline(1000.0);
    assert_point(p.try_to_device(500.0, 100.0).unwrap(), (3860.5, 6948.9));
    assert!(matches!(
        p.try_to_device(f64::NAN, 0.0),
        Err(HpglError::Precondition(_))
    ));
    assert!(matches!(
        p.try_to_device(0.0, f64::INFINITY),
        Err(HpglError::Precondition(_))
    ));
}
