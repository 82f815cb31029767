//! Display surfaces a [`Region`](super::Region) can be composited onto.
//!
//! A surface either exposes its memory as a linear array of fixed-size
//! pixels ([`SurfaceLayout::Linear`]) or only offers per-pixel accessors
//! ([`SurfaceLayout::Indexed`]). [`Display`] inspects the layout once when it
//! wraps a surface and keeps the chosen composite path for every later frame.

use crate::error::{Error, Result};

use super::Rgb;

/// Byte layout of one pixel in a linear surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelFormat {
    pub bytes_per_pixel: usize,
    pub red: usize,
    pub green: usize,
    pub blue: usize,
    /// Offset and fixed value of the fourth byte, if the format has one.
    pub pad: Option<(usize, u8)>,
}

impl PixelFormat {
    /// 32-bit little-endian XRGB, the usual Linux framebuffer layout:
    /// blue, green, red, then an unused byte.
    pub const XRGB8888: Self = Self {
        bytes_per_pixel: 4,
        red: 2,
        green: 1,
        blue: 0,
        pad: Some((3, 0)),
    };

    /// Byte-ordered RGBA with opaque alpha, as used by macroquad images.
    pub const RGBA8888: Self = Self {
        bytes_per_pixel: 4,
        red: 0,
        green: 1,
        blue: 2,
        pad: Some((3, 0xFF)),
    };

    /// Packed 24-bit RGB with no pad byte.
    pub const RGB888: Self = Self {
        bytes_per_pixel: 3,
        red: 0,
        green: 1,
        blue: 2,
        pad: None,
    };

    /// Check that every channel lands on its own byte inside the pixel.
    pub fn validate(&self) -> Result<()> {
        let mut offsets = vec![self.red, self.green, self.blue];
        offsets.extend(self.pad.map(|(offset, _)| offset));

        if let Some(&bad) = offsets.iter().find(|&&o| o >= self.bytes_per_pixel) {
            return Err(Error::UnsupportedSurfaceFormat(format!(
                "channel offset {bad} outside a {}-byte pixel",
                self.bytes_per_pixel
            )));
        }
        offsets.sort_unstable();
        if offsets.windows(2).any(|w| w[0] == w[1]) {
            return Err(Error::UnsupportedSurfaceFormat(
                "two channels share a byte".to_owned(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn write(&self, dst: &mut [u8], colour: Rgb) {
        dst[self.red] = colour.r;
        dst[self.green] = colour.g;
        dst[self.blue] = colour.b;
        if let Some((offset, value)) = self.pad {
            dst[offset] = value;
        }
    }

    #[inline]
    pub fn read(&self, src: &[u8]) -> Rgb {
        Rgb::new(src[self.red], src[self.green], src[self.blue])
    }
}

/// How a surface's backing memory may be addressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceLayout {
    /// Rows of `stride` bytes, pixels in `format`.
    Linear { format: PixelFormat, stride: usize },
    /// Only the per-pixel accessors may be used.
    Indexed,
}

/// Contract of the hardware (or in-memory) display surface.
///
/// Opening and closing the underlying device belongs to whoever creates the
/// surface; the pixel region only borrows it.
pub trait DisplaySurface {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    fn layout(&self) -> SurfaceLayout;

    fn is_linear(&self) -> bool {
        matches!(self.layout(), SurfaceLayout::Linear { .. })
    }

    /// Backing memory, `None` unless the layout is linear.
    fn mapped_data(&mut self) -> Option<&mut [u8]>;

    /// Caller guarantees `x < width()` and `y < height()`.
    fn get_pixel(&self, x: usize, y: usize) -> Rgb;

    /// Caller guarantees `x < width()` and `y < height()`.
    fn set_pixel(&mut self, x: usize, y: usize, colour: Rgb);

    /// Zero the whole surface
    fn clear(&mut self);
}

/// Composite path chosen for a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlitPath {
    /// Direct writes into mapped memory.
    Linear { format: PixelFormat, stride: usize },
    /// One `set_pixel` call per pixel.
    PerPixel,
}

/// A surface plus the composite path selected for it.
pub struct Display<S> {
    surface: S,
    path: BlitPath,
}

impl<S: DisplaySurface> Display<S> {
    /// Wrap `surface`, probing its layout once.
    ///
    /// Fails with `UnsupportedSurfaceFormat` when the surface claims to be
    /// linear but its pixel format or stride can't be written directly.
    pub fn new(surface: S) -> Result<Self> {
        let path = match surface.layout() {
            SurfaceLayout::Indexed => BlitPath::PerPixel,
            SurfaceLayout::Linear { format, stride } => {
                format.validate()?;
                let row_bytes = surface.width() * format.bytes_per_pixel;
                if stride < row_bytes {
                    return Err(Error::UnsupportedSurfaceFormat(format!(
                        "stride {stride} is shorter than a {row_bytes}-byte row"
                    )));
                }
                BlitPath::Linear { format, stride }
            }
        };
        tracing::debug!(
            ?path,
            width = surface.width(),
            height = surface.height(),
            "display surface ready"
        );
        Ok(Self { surface, path })
    }

    pub const fn path(&self) -> BlitPath {
        self.path
    }

    pub fn width(&self) -> usize {
        self.surface.width()
    }

    pub fn height(&self) -> usize {
        self.surface.height()
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub const fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_inner(self) -> S {
        self.surface
    }

    pub fn clear(&mut self) {
        self.surface.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::MemorySurface;

    #[test]
    fn test_builtin_formats_are_valid() {
        for format in [PixelFormat::XRGB8888, PixelFormat::RGBA8888, PixelFormat::RGB888] {
            assert!(format.validate().is_ok(), "{format:?}");
        }
    }

    #[test]
    fn test_overlapping_channels_rejected() {
        let format = PixelFormat { green: 0, ..PixelFormat::RGB888 };
        assert!(matches!(format.validate(), Err(Error::UnsupportedSurfaceFormat(_))));
    }

    #[test]
    fn test_pad_outside_pixel_rejected() {
        let format = PixelFormat { pad: Some((3, 0)), ..PixelFormat::RGB888 };
        assert!(format.validate().is_err());
    }

    #[test]
    fn test_format_write_order() {
        let mut px = [0u8; 4];
        PixelFormat::XRGB8888.write(&mut px, Rgb::new(1, 2, 3));
        assert_eq!(px, [3, 2, 1, 0]);
        PixelFormat::RGBA8888.write(&mut px, Rgb::new(1, 2, 3));
        assert_eq!(px, [1, 2, 3, 255]);
        assert_eq!(PixelFormat::RGBA8888.read(&px), Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_path_selected_from_layout() {
        let linear = Display::new(MemorySurface::linear(4, 4, PixelFormat::XRGB8888)).unwrap();
        assert!(matches!(linear.path(), BlitPath::Linear { stride: 16, .. }));

        let indexed = Display::new(MemorySurface::indexed(4, 4)).unwrap();
        assert_eq!(indexed.path(), BlitPath::PerPixel);
    }

    #[test]
    fn test_short_stride_rejected() {
        let surface = MemorySurface::with_stride(4, 4, PixelFormat::XRGB8888, 12);
        assert!(matches!(Display::new(surface), Err(Error::UnsupportedSurfaceFormat(_))));
    }
}
