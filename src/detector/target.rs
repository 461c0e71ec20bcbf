use super::circle::{min_enclosing_circle, Circle};
use crate::color::{ColorRange, Hsv};
use crate::frame::Frame;
use crate::geometry::{pixel_distance, Point};

use image::{GrayImage, Luma};
use imageproc::geometry::convex_hull;
use imageproc::point::Point as PixelPoint;
use imageproc::region_labelling::{connected_components, Connectivity};
use std::collections::BTreeMap;
use tracing::trace;

/// A color blob reduced to its enclosing circle
#[derive(Debug, Clone, PartialEq)]
pub struct TargetCandidate {
    /// Enclosing circle center rounded to the nearest pixel
    pub centroid: Point,
    /// Enclosing circle radius in pixels
    pub radius: f64,
    /// Distance from the reference center to `centroid`
    pub distance: f64,
    /// Number of matching pixels in the blob
    pub area: u32,
}

/// Horizontal extent of a blob on one row
#[derive(Debug, Clone, Copy)]
struct RowSpan {
    min_x: u32,
    max_x: u32,
}

#[derive(Debug, Default)]
struct BlobExtent {
    rows: BTreeMap<u32, RowSpan>,
    area: u32,
}

impl BlobExtent {
    fn add(&mut self, x: u32, y: u32) {
        self.area += 1;
        self.rows
            .entry(y)
            .and_modify(|span| {
                span.min_x = span.min_x.min(x);
                span.max_x = span.max_x.max(x);
            })
            .or_insert(RowSpan { min_x: x, max_x: x });
    }

    /// Row extremes bound the same convex hull as the full pixel set
    fn outline(&self) -> Vec<PixelPoint<i32>> {
        let mut points = Vec::with_capacity(self.rows.len() * 2);
        for (&y, span) in &self.rows {
            points.push(PixelPoint::new(span.min_x as i32, y as i32));
            if span.max_x != span.min_x {
                points.push(PixelPoint::new(span.max_x as i32, y as i32));
            }
        }
        points
    }

    fn enclosing_circle(&self) -> Option<Circle> {
        let hull: Vec<(f64, f64)> = convex_hull(&self.outline())
            .into_iter()
            .map(|point| (point.x as f64, point.y as f64))
            .collect();
        min_enclosing_circle(&hull)
    }
}

/// Finds blobs of the calibrated color in a frame
#[derive(Debug, Clone)]
pub struct TargetDetector {
    color_range: ColorRange,
}

impl TargetDetector {
    pub fn new(color_range: ColorRange) -> Self {
        Self { color_range }
    }

    /// Build the binary in-range mask of a frame
    pub fn mask(&self, frame: &Frame) -> GrayImage {
        let image = &frame.image;
        GrayImage::from_fn(image.width(), image.height(), |x, y| {
            if self
                .color_range
                .contains(Hsv::from_rgb(*image.get_pixel(x, y)))
            {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        })
    }

    /// Find every connected region of the target color.
    ///
    /// Candidates are returned in label order, which follows the raster position of
    /// each blob's first pixel. An empty vector means no target in view.
    pub fn detect(&self, frame: &Frame, center: Point) -> Vec<TargetCandidate> {
        let mask = self.mask(frame);
        let labels = connected_components(&mask, Connectivity::Eight, Luma([0u8]));

        let mut blobs: BTreeMap<u32, BlobExtent> = BTreeMap::new();
        for (x, y, label) in labels.enumerate_pixels() {
            let label = label[0];
            if label > 0 {
                blobs.entry(label).or_default().add(x, y);
            }
        }

        let candidates: Vec<TargetCandidate> = blobs
            .values()
            .filter_map(|blob| {
                let circle = blob.enclosing_circle()?;
                // Rounded, not truncated: solver noise must not move a still target
                let centroid = Point::new(
                    circle.center.0.round() as i32,
                    circle.center.1.round() as i32,
                );
                Some(TargetCandidate {
                    centroid,
                    radius: circle.radius,
                    distance: pixel_distance(center, centroid),
                    area: blob.area,
                })
            })
            .collect();

        trace!(
            "Frame {}: {} candidate blob(s) in range",
            frame.id,
            candidates.len()
        );
        candidates
    }
}

/// Candidate with the smallest distance; the first one found wins ties
pub fn select_nearest(candidates: &[TargetCandidate]) -> Option<&TargetCandidate> {
    candidates.iter().fold(None, |best, candidate| match best {
        Some(current) if candidate.distance >= current.distance => Some(current),
        _ => Some(candidate),
    })
}
