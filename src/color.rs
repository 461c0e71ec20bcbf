//! HSV color handling in the common 8-bit convention: hue is halved into
//! `0..=179`, saturation and value span `0..=255`.

use crate::error::{ColorbotError, Result};
use image::Rgb;
use serde::{Deserialize, Serialize};

pub const HUE_MAX: u8 = 179;
pub const CHANNEL_MAX: u8 = 255;

/// 8-bit HSV triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }

    /// Convert an RGB pixel
    pub fn from_rgb(pixel: Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        let (rf, gf, bf) = (r as f32, g as f32, b as f32);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let v = max;

        if max == 0 {
            return Self::new(0, 0, 0);
        }

        let delta = (max - min) as f32;
        let s = (delta * 255.0 / max as f32).round() as u8;

        if delta == 0.0 {
            return Self::new(0, s, v);
        }

        let vf = max as f32;
        let mut hue = if vf == rf {
            60.0 * (gf - bf) / delta
        } else if vf == gf {
            120.0 + 60.0 * (bf - rf) / delta
        } else {
            240.0 + 60.0 * (rf - gf) / delta
        };
        if hue < 0.0 {
            hue += 360.0;
        }

        let h = (hue / 2.0).round() as u16;
        Self::new((h % 180) as u8, s, v)
    }

    fn as_array(&self) -> [u8; 3] {
        [self.h, self.s, self.v]
    }
}

/// Inclusive HSV bounds used to mask the target color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRange {
    lower: Hsv,
    upper: Hsv,
}

impl ColorRange {
    /// Create a validated range
    pub fn new(lower: Hsv, upper: Hsv) -> Result<Self> {
        if lower.h > HUE_MAX || upper.h > HUE_MAX {
            return Err(ColorbotError::InvalidColorRange {
                details: format!("hue must be within 0..={}", HUE_MAX),
            });
        }

        let ordered = lower
            .as_array()
            .iter()
            .zip(upper.as_array().iter())
            .all(|(lo, hi)| lo <= hi);
        if !ordered {
            return Err(ColorbotError::InvalidColorRange {
                details: format!("lower {:?} exceeds upper {:?}", lower, upper),
            });
        }

        Ok(Self { lower, upper })
    }

    /// Derive a range around a sampled color with a relative tolerance per channel
    pub fn from_sample(sample: Hsv, tolerance: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&tolerance) {
            return Err(ColorbotError::InvalidColorRange {
                details: format!("tolerance {} outside 0.0..=1.0", tolerance),
            });
        }

        // Bounds are inclusive integers, so round inward with a small slack for float error
        let widen = |value: u8, max: u8| {
            let value = value as f64;
            let spread = value * tolerance as f64;
            let lo = ((value - spread).max(0.0) - 1e-6).ceil().max(0.0) as u8;
            let hi = ((value + spread).min(max as f64) + 1e-6).floor() as u8;
            (lo, hi)
        };

        let (h_lo, h_hi) = widen(sample.h, HUE_MAX);
        let (s_lo, s_hi) = widen(sample.s, CHANNEL_MAX);
        let (v_lo, v_hi) = widen(sample.v, CHANNEL_MAX);

        Self::new(Hsv::new(h_lo, s_lo, v_lo), Hsv::new(h_hi, s_hi, v_hi))
    }

    pub fn lower(&self) -> Hsv {
        self.lower
    }

    pub fn upper(&self) -> Hsv {
        self.upper
    }

    /// Inclusive component-wise test
    pub fn contains(&self, color: Hsv) -> bool {
        (self.lower.h..=self.upper.h).contains(&color.h)
            && (self.lower.s..=self.upper.s).contains(&color.s)
            && (self.lower.v..=self.upper.v).contains(&color.v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_colors() {
        assert_eq!(Hsv::from_rgb(Rgb([255, 0, 0])), Hsv::new(0, 255, 255));
        assert_eq!(Hsv::from_rgb(Rgb([0, 255, 0])), Hsv::new(60, 255, 255));
        assert_eq!(Hsv::from_rgb(Rgb([0, 0, 255])), Hsv::new(120, 255, 255));
        assert_eq!(Hsv::from_rgb(Rgb([0, 0, 0])), Hsv::new(0, 0, 0));
        assert_eq!(Hsv::from_rgb(Rgb([128, 128, 128])), Hsv::new(0, 0, 128));
    }

    #[test]
    fn test_hue_stays_in_range() {
        // Magenta-ish red wraps close to 360 degrees
        let hsv = Hsv::from_rgb(Rgb([255, 0, 1]));
        assert!(hsv.h <= HUE_MAX);
    }

    #[test]
    fn test_range_validation() {
        assert!(ColorRange::new(Hsv::new(10, 10, 10), Hsv::new(20, 20, 20)).is_ok());
        assert!(ColorRange::new(Hsv::new(30, 10, 10), Hsv::new(20, 20, 20)).is_err());
        assert!(ColorRange::new(Hsv::new(0, 0, 0), Hsv::new(180, 20, 20)).is_err());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = ColorRange::new(Hsv::new(10, 100, 100), Hsv::new(20, 200, 200)).unwrap();
        assert!(range.contains(Hsv::new(10, 100, 100)));
        assert!(range.contains(Hsv::new(20, 200, 200)));
        assert!(!range.contains(Hsv::new(21, 150, 150)));
        assert!(!range.contains(Hsv::new(15, 99, 150)));
    }

    #[test]
    fn test_from_sample() {
        let range = ColorRange::from_sample(Hsv::new(100, 200, 250), 0.05).unwrap();
        assert_eq!(range.lower(), Hsv::new(95, 190, 238));
        assert_eq!(range.upper(), Hsv::new(105, 210, 255));
        assert!(range.contains(Hsv::new(100, 200, 250)));

        assert!(ColorRange::from_sample(Hsv::new(0, 0, 0), 1.5).is_err());
    }
}
