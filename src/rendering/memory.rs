use super::surface::{DisplaySurface, PixelFormat, SurfaceLayout};
use super::Rgb;

/// Display surface backed by a plain byte vector.
///
/// Can pose either as a linear surface in any [`PixelFormat`] or as an
/// indexed one that only answers per-pixel calls. Used for headless runs,
/// benchmarks and tests.
#[derive(Clone, Debug)]
pub struct MemorySurface {
    width: usize,
    height: usize,
    format: PixelFormat,
    stride: usize,
    linear: bool,
    data: Vec<u8>,
}

impl MemorySurface {
    /// Linear surface with tightly packed rows
    pub fn linear(width: usize, height: usize, format: PixelFormat) -> Self {
        Self::with_stride(width, height, format, width * format.bytes_per_pixel)
    }

    /// Linear surface whose rows are `stride` bytes apart
    pub fn with_stride(width: usize, height: usize, format: PixelFormat, stride: usize) -> Self {
        Self {
            width,
            height,
            format,
            stride,
            linear: true,
            data: vec![0; stride * height],
        }
    }

    /// Surface that refuses direct memory access
    pub fn indexed(width: usize, height: usize) -> Self {
        Self {
            linear: false,
            ..Self::linear(width, height, PixelFormat::RGB888)
        }
    }

    /// Raw bytes, whatever the layout
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        y * self.stride + x * self.format.bytes_per_pixel
    }
}

impl DisplaySurface for MemorySurface {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn layout(&self) -> SurfaceLayout {
        if self.linear {
            SurfaceLayout::Linear { format: self.format, stride: self.stride }
        } else {
            SurfaceLayout::Indexed
        }
    }

    fn mapped_data(&mut self) -> Option<&mut [u8]> {
        self.linear.then_some(self.data.as_mut_slice())
    }

    fn get_pixel(&self, x: usize, y: usize) -> Rgb {
        let at = self.offset(x, y);
        self.format.read(&self.data[at..at + self.format.bytes_per_pixel])
    }

    fn set_pixel(&mut self, x: usize, y: usize, colour: Rgb) {
        let at = self.offset(x, y);
        let bpp = self.format.bytes_per_pixel;
        self.format.write(&mut self.data[at..at + bpp], colour);
    }

    fn clear(&mut self) {
        self.data.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_accessors() {
        let mut surface = MemorySurface::linear(3, 2, PixelFormat::XRGB8888);
        surface.set_pixel(2, 1, Rgb::new(10, 20, 30));
        assert_eq!(surface.get_pixel(2, 1), Rgb::new(10, 20, 30));
        assert_eq!(&surface.bytes()[20..24], &[30, 20, 10, 0]);
    }

    #[test]
    fn test_indexed_hides_memory() {
        let mut surface = MemorySurface::indexed(2, 2);
        assert!(!surface.is_linear());
        assert!(surface.mapped_data().is_none());
    }

    #[test]
    fn test_clear() {
        let mut surface = MemorySurface::linear(2, 2, PixelFormat::RGBA8888);
        surface.set_pixel(0, 0, Rgb::WHITE);
        surface.clear();
        assert!(surface.bytes().iter().all(|&b| b == 0));
    }
}
