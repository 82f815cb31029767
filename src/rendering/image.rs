use macroquad::prelude::{BLACK, Image};

use super::surface::{DisplaySurface, PixelFormat, SurfaceLayout};
use super::Rgb;

/// A macroquad CPU-side [`Image`] used as the display surface.
///
/// The window binary uploads it to a texture once per frame; the image
/// itself never touches the GPU, so this also works headless.
pub struct ImageSurface {
    image: Image,
}

impl ImageSurface {
    const FORMAT: PixelFormat = PixelFormat::RGBA8888;

    /// Opaque black image of the given size. Macroquad images are limited
    /// to 65535 pixels a side; larger requests are clamped.
    pub fn new(width: usize, height: usize) -> Self {
        let clamp = |n: usize| u16::try_from(n).unwrap_or(u16::MAX);
        Self {
            image: Image::gen_image_color(clamp(width), clamp(height), BLACK),
        }
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width() + x) * Self::FORMAT.bytes_per_pixel
    }
}

impl DisplaySurface for ImageSurface {
    fn width(&self) -> usize {
        usize::from(self.image.width)
    }

    fn height(&self) -> usize {
        usize::from(self.image.height)
    }

    fn layout(&self) -> SurfaceLayout {
        SurfaceLayout::Linear {
            format: Self::FORMAT,
            stride: self.width() * Self::FORMAT.bytes_per_pixel,
        }
    }

    fn mapped_data(&mut self) -> Option<&mut [u8]> {
        Some(self.image.bytes.as_mut_slice())
    }

    fn get_pixel(&self, x: usize, y: usize) -> Rgb {
        let at = self.offset(x, y);
        Self::FORMAT.read(&self.image.bytes[at..at + 4])
    }

    fn set_pixel(&mut self, x: usize, y: usize, colour: Rgb) {
        let at = self.offset(x, y);
        Self::FORMAT.write(&mut self.image.bytes[at..at + 4], colour);
    }

    /// Back to opaque black; a zeroed RGBA image would be transparent.
    fn clear(&mut self) {
        self.image
            .bytes
            .chunks_exact_mut(4)
            .for_each(|px| Self::FORMAT.write(px, Rgb::BLACK));
    }
}
