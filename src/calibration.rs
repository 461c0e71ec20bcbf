//! Setup-phase inputs: capture region, player anchor and target color.
//!
//! Calibration happens once before the control loop is built. A loop can only
//! be constructed from a complete [`Calibration`], so decision logic never runs
//! with a missing region, center or color range.

use crate::color::{ColorRange, Hsv};
use crate::config::{CalibrationConfig, CaptureConfig};
use crate::error::{ColorbotError, Result};
use crate::frame::Region;
use crate::geometry::Point;
use image::Rgb;
use tracing::info;

/// Complete calibration state, read-only while the loop runs
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    pub region: Region,
    pub center: Point,
    pub color_range: ColorRange,
}

impl Calibration {
    /// Validate and assemble calibration values
    pub fn new(region: Region, center: Point, color_range: ColorRange) -> Result<Self> {
        if region.is_empty() {
            return Err(ColorbotError::InvalidCalibration {
                details: format!("capture region {} has no area", region),
            });
        }

        let inside = center.x >= 0
            && center.y >= 0
            && (center.x as u32) < region.width
            && (center.y as u32) < region.height;
        if !inside {
            return Err(ColorbotError::InvalidCalibration {
                details: format!(
                    "center ({}, {}) lies outside region {}",
                    center.x, center.y, region
                ),
            });
        }

        Ok(Self {
            region,
            center,
            color_range,
        })
    }
}

/// Produces calibration before the control loop starts
pub trait CalibrationSource {
    fn calibrate(&mut self) -> Result<Calibration>;
}

/// Calibration read from the `[capture]` and `[calibration]` configuration sections
pub struct ConfigCalibration {
    capture: CaptureConfig,
    calibration: CalibrationConfig,
}

impl ConfigCalibration {
    pub fn new(capture: CaptureConfig, calibration: CalibrationConfig) -> Self {
        Self {
            capture,
            calibration,
        }
    }

    fn color_range(&self) -> Result<ColorRange> {
        match (
            self.calibration.color_lower,
            self.calibration.color_upper,
            self.calibration.sample_rgb,
        ) {
            (Some((lh, ls, lv)), Some((uh, us, uv)), _) => {
                ColorRange::new(Hsv::new(lh, ls, lv), Hsv::new(uh, us, uv))
            }
            (None, None, Some((r, g, b))) => {
                let sample = Hsv::from_rgb(Rgb([r, g, b]));
                info!("Sampled RGB ({}, {}, {}) is HSV {:?}", r, g, b, sample);
                ColorRange::from_sample(sample, self.calibration.tolerance)
            }
            (Some(_), None, _) | (None, Some(_), _) => Err(ColorbotError::calibration_missing(
                "color range needs both color_lower and color_upper",
            )),
            (None, None, None) => Err(ColorbotError::calibration_missing(
                "color range (color_lower/color_upper or sample_rgb)",
            )),
        }
    }
}

impl CalibrationSource for ConfigCalibration {
    fn calibrate(&mut self) -> Result<Calibration> {
        let region = self
            .capture
            .region
            .map(Region::from)
            .ok_or_else(|| ColorbotError::calibration_missing("capture region"))?;
        let center = self
            .calibration
            .center
            .map(Point::from)
            .ok_or_else(|| ColorbotError::calibration_missing("reference center"))?;
        let color_range = self.color_range()?;

        let calibration = Calibration::new(region, center, color_range)?;
        info!("Region selected: {}", calibration.region);
        info!(
            "Center set to: ({}, {})",
            calibration.center.x, calibration.center.y
        );
        info!(
            "Color range set to: lower={:?}, upper={:?}",
            calibration.color_range.lower(),
            calibration.color_range.upper()
        );

        Ok(calibration)
    }
}
