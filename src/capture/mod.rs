mod mock;
mod sequence;

use crate::error::Result;
use crate::frame::{Frame, Region};

pub use mock::StaticSource;
pub use sequence::ImageSequenceSource;

/// Produces one frame of the capture region per call
pub trait FrameSource {
    /// Capture `region`; the frame must have the region's dimensions
    fn capture(&mut self, region: &Region) -> Result<Frame>;
}

impl<T: FrameSource + ?Sized> FrameSource for Box<T> {
    fn capture(&mut self, region: &Region) -> Result<Frame> {
        (**self).capture(region)
    }
}
