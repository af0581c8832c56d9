use approx::assert_abs_diff_eq;
use diff_spotter::{AnalysisError, AnalysisParams, PixelBuffer, detect, detect_with_report};
use image::{Rgba, RgbaImage};

const GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

fn gray(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, GRAY)
}

fn paint(image: &mut RgbaImage, x0: u32, y0: u32, side: u32, color: Rgba<u8>) {
    for y in y0..y0 + side {
        for x in x0..x0 + side {
            image.put_pixel(x, y, color);
        }
    }
}

fn red_square_pair() -> (PixelBuffer, PixelBuffer) {
    let original = gray(100, 100);
    let mut modified = original.clone();
    paint(&mut modified, 40, 40, 20, RED);
    (PixelBuffer::from_image(original), PixelBuffer::from_image(modified))
}

#[test]
fn identical_solid_images_have_no_differences() {
    let image = PixelBuffer::from_image(gray(100, 100));
    for params in [
        AnalysisParams::LOW,
        AnalysisParams::MEDIUM,
        AnalysisParams::HIGH,
        AnalysisParams {
            blur_radius: 0.0,
            color_threshold: 0.0,
            min_region_size: 0,
            ..AnalysisParams::default()
        },
    ] {
        assert!(detect(&image, &image.clone(), &params).unwrap().is_empty());
    }
}

#[test]
fn single_red_square_is_one_centred_difference() {
    let (original, modified) = red_square_pair();
    let params = AnalysisParams {
        color_threshold: 40.0,
        min_region_size: 50,
        ..AnalysisParams::default()
    };

    let differences = detect(&original, &modified, &params).unwrap();
    assert_eq!(differences.len(), 1);

    let difference = &differences[0];
    assert_eq!(difference.id, 0);
    assert_abs_diff_eq!(difference.x, 0.495, epsilon = 0.01);
    assert_abs_diff_eq!(difference.y, 0.495, epsilon = 0.01);
    assert!(difference.radius > 0.0);
    // The circle covers at least the painted square.
    assert!(difference.radius >= 0.095);
    assert_eq!(difference.found_time, None);
}

#[test]
fn unreachable_threshold_finds_nothing() {
    let (original, modified) = red_square_pair();
    let params = AnalysisParams {
        color_threshold: 255.0,
        min_region_size: 50,
        ..AnalysisParams::default()
    };

    let report = detect_with_report(&original, &modified, &params).unwrap();
    assert_eq!(report.diff_pixel_count, 0);
    assert!(report.differences.is_empty());
}

#[test]
fn merge_distance_decides_between_one_and_two_differences() {
    let original = gray(300, 300);
    let mut modified = original.clone();
    paint(&mut modified, 40, 145, 10, RED);
    paint(&mut modified, 250, 145, 10, RED);
    let (original, modified) = (PixelBuffer::from_image(original), PixelBuffer::from_image(modified));

    let params = AnalysisParams {
        blur_radius: 1.0,
        color_threshold: 40.0,
        min_region_size: 50,
        max_region_size_percent: 1.0,
        merge_distance: 5.0,
        ..AnalysisParams::default()
    };

    let separate = detect(&original, &modified, &params).unwrap();
    assert_eq!(separate.len(), 2);
    // Equal radii keep discovery order: the left square first.
    assert!(separate[0].x < separate[1].x);
    assert_eq!(separate.iter().map(|d| d.id).collect::<Vec<_>>(), vec![0, 1]);

    let merged = detect(
        &original,
        &modified,
        &AnalysisParams {
            merge_distance: 250.0,
            ..params
        },
    )
    .unwrap();
    assert_eq!(merged.len(), 1);
    assert_abs_diff_eq!(merged[0].x, 149.5 / 300.0, epsilon = 0.01);
    assert!(merged[0].radius > separate[0].radius);
}

#[test]
fn mismatched_dimensions_fail_without_output() {
    let original = PixelBuffer::from_image(gray(100, 100));
    let modified = PixelBuffer::from_image(gray(100, 101));

    match detect(&original, &modified, &AnalysisParams::default()) {
        Err(AnalysisError::DimensionMismatch { original, modified }) => {
            assert_eq!(original, (100, 100));
            assert_eq!(modified, (100, 101));
        }
        other => panic!("expected DimensionMismatch, got {other:?}"),
    }
}

#[test]
fn zero_sized_images_are_rejected() {
    let empty = PixelBuffer::from_raw(0, 100, Vec::new()).unwrap();
    assert!(matches!(
        detect(&empty, &empty.clone(), &AnalysisParams::default()),
        Err(AnalysisError::ZeroDimension { width: 0, height: 100 })
    ));
}

#[test]
fn oversized_change_is_not_a_difference() {
    // A change covering most of the image is capped by maxRegionSizePercent.
    let original = gray(100, 100);
    let mut modified = original.clone();
    paint(&mut modified, 10, 10, 80, RED);

    let differences = detect(
        &PixelBuffer::from_image(original),
        &PixelBuffer::from_image(modified),
        &AnalysisParams::default(),
    )
    .unwrap();
    assert!(differences.is_empty());
}

#[test]
fn overlapping_candidates_keep_the_larger() {
    // A big square and a small one whose padded circles overlap but whose
    // boxes are too far apart to merge.
    let original = gray(200, 200);
    let mut modified = original.clone();
    paint(&mut modified, 50, 50, 40, RED);
    paint(&mut modified, 102, 60, 12, RED);

    let params = AnalysisParams {
        blur_radius: 1.0,
        color_threshold: 40.0,
        min_region_size: 50,
        merge_distance: 5.0,
        max_region_size_percent: 0.5,
        circle_radius_multiplier: 1.5,
        ..AnalysisParams::default()
    };
    let differences = detect(
        &PixelBuffer::from_image(original),
        &PixelBuffer::from_image(modified),
        &params,
    )
    .unwrap();

    assert_eq!(differences.len(), 1);
    assert_abs_diff_eq!(differences[0].x, 69.5 / 200.0, epsilon = 0.01);
}

#[test]
fn results_are_ordered_by_radius() {
    let original = gray(300, 300);
    let mut modified = original.clone();
    paint(&mut modified, 20, 20, 12, RED);
    paint(&mut modified, 150, 150, 30, RED);
    paint(&mut modified, 240, 30, 20, RED);

    let params = AnalysisParams {
        blur_radius: 1.0,
        color_threshold: 40.0,
        min_region_size: 50,
        merge_distance: 5.0,
        ..AnalysisParams::default()
    };
    let differences = detect(
        &PixelBuffer::from_image(original),
        &PixelBuffer::from_image(modified),
        &params,
    )
    .unwrap();

    assert_eq!(differences.len(), 3);
    for (id, pair) in differences.windows(2).enumerate() {
        assert_eq!(pair[0].id, id);
        assert!(pair[0].radius >= pair[1].radius);
    }
    assert_abs_diff_eq!(differences[0].x, 164.5 / 300.0, epsilon = 0.01);
}
