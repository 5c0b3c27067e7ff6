// Captured screen frame shared by perception backends.
use crate::errors::{MowerError, MowerResult};
use crate::executor::device::Device;
use crate::perception::types::{Coordinate, Pixel};

pub struct Frame {
    image: image::RgbImage,
}

impl Frame {
    pub fn new(image: image::RgbImage) -> Self {
        Self { image }
    }

    /// Decodes a `screencap -p` PNG.
    pub fn from_png(bytes: &[u8]) -> MowerResult<Self> {
        let img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?;
        Ok(Self::new(img.to_rgb8()))
    }

    /// Captures and decodes the current screen of `device`.
    pub async fn capture(device: &dyn Device) -> MowerResult<Self> {
        let bytes = device.screencap().await?;
        let frame = Self::from_png(&bytes)?;
        tracing::debug!(width = frame.width(), height = frame.height(), "frame captured");
        Ok(frame)
    }

    pub fn width(&self) -> i32 {
        self.image.width() as i32
    }

    pub fn height(&self) -> i32 {
        self.image.height() as i32
    }

    pub fn dimensions(&self) -> (i32, i32) {
        (self.width(), self.height())
    }

    pub fn sample(&self, at: Coordinate) -> MowerResult<Pixel> {
        if at.x < 0 || at.y < 0 || at.x >= self.width() || at.y >= self.height() {
            return Err(MowerError::recognize(format!(
                "sample at ({}, {}) outside {}x{} frame",
                at.x,
                at.y,
                self.width(),
                self.height()
            )));
        }
        Ok(*self.image.get_pixel(at.x as u32, at.y as u32))
    }

    pub fn image(&self) -> &image::RgbImage {
        &self.image
    }
}
