use super::FrameSource;
use crate::error::{CaptureError, Result};
use crate::frame::{Frame, Region};

use image::RgbImage;

/// In-memory frames for tests and demos, cycled in order
#[derive(Debug, Clone)]
pub struct StaticSource {
    images: Vec<RgbImage>,
    next_index: usize,
    frame_counter: u64,
}

impl StaticSource {
    pub fn new(images: Vec<RgbImage>) -> Self {
        Self {
            images,
            next_index: 0,
            frame_counter: 0,
        }
    }
}

impl FrameSource for StaticSource {
    fn capture(&mut self, region: &Region) -> Result<Frame> {
        let image = self
            .images
            .get(self.next_index)
            .cloned()
            .ok_or_else(|| CaptureError::NoFrames {
                path: "<memory>".to_string(),
            })?;
        self.next_index = (self.next_index + 1) % self.images.len();

        let frame = Frame::new(self.frame_counter + 1, image);
        if !frame.matches_region(region) {
            return Err(CaptureError::RegionOutOfBounds {
                width: frame.width(),
                height: frame.height(),
                region: region.to_string(),
            }
            .into());
        }

        self.frame_counter += 1;
        Ok(frame)
    }
}
