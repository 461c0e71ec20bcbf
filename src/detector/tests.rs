use super::*;
use crate::color::{ColorRange, Hsv};
use crate::frame::Frame;
use crate::geometry::Point;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

const BACKGROUND: Rgb<u8> = Rgb([20, 20, 20]);
const TARGET: Rgb<u8> = Rgb([220, 30, 30]);
const DECOY: Rgb<u8> = Rgb([30, 30, 220]);

fn create_test_detector() -> TargetDetector {
    let range = ColorRange::new(Hsv::new(0, 150, 150), Hsv::new(10, 255, 255)).unwrap();
    TargetDetector::new(range)
}

fn create_test_frame(blobs: &[((i32, i32), i32, Rgb<u8>)]) -> Frame {
    let mut image = RgbImage::from_pixel(200, 200, BACKGROUND);
    for &(center, radius, color) in blobs {
        draw_filled_circle_mut(&mut image, center, radius, color);
    }
    Frame::new(1, image)
}

fn candidate(x: i32, y: i32, distance: f64) -> TargetCandidate {
    TargetCandidate {
        centroid: Point::new(x, y),
        radius: 3.0,
        distance,
        area: 20,
    }
}

#[test]
fn test_empty_frame_has_no_candidates() {
    let detector = create_test_detector();
    let frame = create_test_frame(&[]);

    assert!(detector.detect(&frame, Point::new(100, 100)).is_empty());
    assert!(select_nearest(&detector.detect(&frame, Point::new(100, 100))).is_none());
}

#[test]
fn test_other_colors_are_ignored() {
    let detector = create_test_detector();
    let frame = create_test_frame(&[((50, 50), 8, DECOY)]);

    assert!(detector.detect(&frame, Point::new(100, 100)).is_empty());
}

#[test]
fn test_single_blob_reduced_to_circle() {
    let detector = create_test_detector();
    let frame = create_test_frame(&[((160, 100), 5, TARGET)]);
    let center = Point::new(100, 100);

    let candidates = detector.detect(&frame, center);
    assert_eq!(candidates.len(), 1);

    let target = &candidates[0];
    assert_eq!(target.centroid, Point::new(160, 100));
    assert!((target.radius - 5.0).abs() < 0.75, "radius {}", target.radius);
    assert!((target.distance - 60.0).abs() < 1e-9);
    assert!(target.area > 50);
}

#[test]
fn test_mask_marks_only_matching_pixels() {
    let detector = create_test_detector();
    let frame = create_test_frame(&[((30, 30), 4, TARGET)]);

    let mask = detector.mask(&frame);
    assert_eq!(mask.get_pixel(30, 30)[0], 255);
    assert_eq!(mask.get_pixel(150, 150)[0], 0);
}

#[test]
fn test_nearest_candidate_selected() {
    let detector = create_test_detector();
    let frame = create_test_frame(&[
        ((20, 20), 6, TARGET),
        ((130, 110), 4, TARGET),
        ((180, 180), 6, TARGET),
    ]);
    let center = Point::new(100, 100);

    let candidates = detector.detect(&frame, center);
    assert_eq!(candidates.len(), 3);

    let nearest = select_nearest(&candidates).unwrap();
    assert_eq!(nearest.centroid, Point::new(130, 110));
    for other in &candidates {
        assert!(nearest.distance <= other.distance);
    }
}

#[test]
fn test_select_nearest_prefers_first_on_tie() {
    let candidates = vec![
        candidate(10, 0, 10.0),
        candidate(0, 5, 5.0),
        candidate(-5, 0, 5.0),
        candidate(0, 8, 8.0),
    ];

    let nearest = select_nearest(&candidates).unwrap();
    assert_eq!(nearest.centroid, Point::new(0, 5));
}

#[test]
fn test_select_nearest_empty() {
    assert!(select_nearest(&[]).is_none());
}

fn create_rect_frame(left: u32, top: u32, width: u32, height: u32) -> Frame {
    let mut image = RgbImage::from_pixel(200, 200, BACKGROUND);
    for y in top..top + height {
        for x in left..left + width {
            image.put_pixel(x, y, TARGET);
        }
    }
    Frame::new(1, image)
}

#[test]
fn test_rectangle_circle_spans_diagonal() {
    let detector = create_test_detector();
    let frame = create_rect_frame(40, 40, 20, 10);

    let candidates = detector.detect(&frame, Point::new(100, 100));
    assert_eq!(candidates.len(), 1);

    // Corners (40, 40) and (59, 49) lie on the circle; interior and edge pixels do not matter
    let target = &candidates[0];
    assert!(
        (target.radius - 442f64.sqrt() / 2.0).abs() < 1e-6,
        "radius {}",
        target.radius
    );
    assert_eq!(target.centroid, Point::new(50, 45));
    assert_eq!(target.area, 200);
}

#[test]
fn test_half_pixel_center_rounds_up() {
    let detector = create_test_detector();
    let frame = create_rect_frame(10, 10, 2, 2);

    let candidates = detector.detect(&frame, Point::new(100, 100));
    assert_eq!(candidates.len(), 1);
    assert!((candidates[0].radius - 0.5f64.sqrt()).abs() < 1e-9);
    assert_eq!(candidates[0].centroid, Point::new(11, 11));
}

#[test]
fn test_single_row_and_single_pixel_blobs() {
    let detector = create_test_detector();
    let mut image = RgbImage::from_pixel(200, 200, BACKGROUND);
    for x in 20..31 {
        image.put_pixel(x, 5, TARGET);
    }
    image.put_pixel(150, 150, TARGET);
    let frame = Frame::new(1, image);

    let candidates = detector.detect(&frame, Point::new(100, 100));
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].centroid, Point::new(25, 5));
    assert!((candidates[0].radius - 5.0).abs() < 1e-9);
    assert_eq!(candidates[1].centroid, Point::new(150, 150));
    assert_eq!(candidates[1].radius, 0.0);
}
