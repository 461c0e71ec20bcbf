use super::FrameSource;
use crate::error::{CaptureError, Result};
use crate::frame::{Frame, Region};

use image::imageops;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "ppm"];

/// Replays screenshots from a directory in file name order, looping forever.
///
/// Each screenshot is treated as the whole screen and cropped to the capture region.
pub struct ImageSequenceSource {
    paths: Vec<PathBuf>,
    next_index: usize,
    frame_counter: u64,
}

impl ImageSequenceSource {
    /// Collect the images in `dir`
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && is_image(path))
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(CaptureError::NoFrames {
                path: dir.display().to_string(),
            }
            .into());
        }

        info!("Replaying {} frame(s) from {}", paths.len(), dir.display());
        Ok(Self {
            paths,
            next_index: 0,
            frame_counter: 0,
        })
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

impl FrameSource for ImageSequenceSource {
    fn capture(&mut self, region: &Region) -> Result<Frame> {
        let path = &self.paths[self.next_index];
        self.next_index = (self.next_index + 1) % self.paths.len();

        let screen = image::open(path)
            .map_err(|e| CaptureError::Decode {
                path: path.display().to_string(),
                details: e.to_string(),
            })?
            .to_rgb8();

        if !region.fits_within(screen.width(), screen.height()) {
            return Err(CaptureError::RegionOutOfBounds {
                width: screen.width(),
                height: screen.height(),
                region: region.to_string(),
            }
            .into());
        }

        let cropped = imageops::crop_imm(
            &screen,
            region.left,
            region.top,
            region.width,
            region.height,
        )
        .to_image();

        self.frame_counter += 1;
        debug!("Captured frame {} from {}", self.frame_counter, path.display());
        Ok(Frame::new(self.frame_counter, cropped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_frame(dir: &Path, name: &str, color: Rgb<u8>) {
        let mut image = RgbImage::from_pixel(40, 30, Rgb([0, 0, 0]));
        image.put_pixel(12, 11, color);
        image.save(dir.join(name)).unwrap();
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();
        assert!(ImageSequenceSource::open(dir.path()).is_err());
    }

    #[test]
    fn test_replays_in_order_and_crops() {
        let dir = tempfile::tempdir().unwrap();
        write_frame(dir.path(), "b.png", Rgb([0, 255, 0]));
        write_frame(dir.path(), "a.png", Rgb([255, 0, 0]));

        let mut source = ImageSequenceSource::open(dir.path()).unwrap();

        let region = Region::new(10, 10, 20, 10);
        let first = source.capture(&region).unwrap();
        assert!(first.matches_region(&region));
        assert_eq!(*first.image.get_pixel(2, 1), Rgb([255, 0, 0]));

        let second = source.capture(&region).unwrap();
        assert_eq!(*second.image.get_pixel(2, 1), Rgb([0, 255, 0]));
        assert!(second.id > first.id);

        // Loops back to the first file
        let third = source.capture(&region).unwrap();
        assert_eq!(*third.image.get_pixel(2, 1), Rgb([255, 0, 0]));
    }

    #[test]
    fn test_region_outside_screenshot() {
        let dir = tempfile::tempdir().unwrap();
        write_frame(dir.path(), "a.png", Rgb([255, 0, 0]));

        let mut source = ImageSequenceSource::open(dir.path()).unwrap();
        assert!(source.capture(&Region::new(30, 0, 20, 10)).is_err());
    }
}
