use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Screen rectangle sampled every tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Check the region has a non-zero area
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether the region lies inside an image of the given size
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.left
            .checked_add(self.width)
            .is_some_and(|right| right <= width)
            && self
                .top
                .checked_add(self.height)
                .is_some_and(|bottom| bottom <= height)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}+{}+{}",
            self.width, self.height, self.left, self.top
        )
    }
}

impl From<(u32, u32, u32, u32)> for Region {
    fn from((left, top, width, height): (u32, u32, u32, u32)) -> Self {
        Self::new(left, top, width, height)
    }
}

/// One captured frame of the configured region
#[derive(Debug, Clone)]
pub struct Frame {
    /// Unique frame identifier
    pub id: u64,
    /// Pixel data (shared ownership so the frame stays immutable)
    pub image: Arc<RgbImage>,
}

impl Frame {
    /// Create a new frame
    pub fn new(id: u64, image: RgbImage) -> Self {
        Self {
            id,
            image: Arc::new(image),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Check frame dimensions against the region it was captured from
    pub fn matches_region(&self, region: &Region) -> bool {
        self.width() == region.width && self.height() == region.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_bounds() {
        let region = Region::new(10, 20, 100, 50);
        assert!(region.fits_within(110, 70));
        assert!(!region.fits_within(109, 70));
        assert!(!region.fits_within(110, 69));
        assert!(!region.is_empty());
        assert!(Region::new(0, 0, 0, 10).is_empty());
        assert!(!Region::new(u32::MAX, 0, 10, 10).fits_within(u32::MAX, 10));
    }

    #[test]
    fn test_region_display() {
        assert_eq!(Region::new(5, 6, 300, 200).to_string(), "300x200+5+6");
    }

    #[test]
    fn test_frame_matches_region() {
        let frame = Frame::new(1, RgbImage::new(64, 48));
        assert!(frame.matches_region(&Region::new(100, 100, 64, 48)));
        assert!(!frame.matches_region(&Region::new(0, 0, 48, 64)));
        assert_eq!(frame.width(), 64);
        assert_eq!(frame.height(), 48);
    }
}
