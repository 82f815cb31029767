use crate::error::{Error, Result};

use super::surface::{BlitPath, Display, DisplaySurface, PixelFormat};
use super::Rgb;

/// Bytes per pixel in a region buffer
const BPP: usize = 3;

/// Offscreen 24-bit drawing canvas.
///
/// Pixels are stored row-major as `r, g, b` triples; pixel (x, y) starts at
/// byte `(y * width + x) * 3`. A new region is zeroed (black).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

/// Overlap of a region placed at an offset with a surface, in region pixels.
struct Span {
    x0: usize,
    x1: usize,
    y0: usize,
    y1: usize,
    dx: usize,
    dy: usize,
}

impl Region {
    /// Create a black region
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(BPP))
            .ok_or(Error::InvalidDimension { width, height })?;
        Ok(Self { width, height, data: vec![0; len] })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Raw `r, g, b` bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some((y * self.width + x) * BPP)
    }

    /// Colour at (`x`, `y`), `None` outside the region
    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgb> {
        self.index(x, y)
            .map(|i| Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2]))
    }

    /// Write one pixel. Coordinates outside the region are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i64, y: i64, colour: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.data[i..i + BPP].copy_from_slice(&[colour.r, colour.g, colour.b]);
        }
    }

    /// Write one pixel at a fraction of its brightness (0.0..=1.0), channels
    /// truncated toward zero. Same bounds as [`Region::set_pixel`].
    pub fn set_pixel_scaled(&mut self, x: i64, y: i64, colour: Rgb, brightness: f32) {
        self.set_pixel(x, y, colour.scaled(brightness));
    }

    /// Fill `[x1, x2) x [y1, y2)`. Corners may come in either order; the
    /// part outside the region is clipped.
    pub fn fill_rect(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, colour: Rgb) {
        let (x1, x2) = (x1.min(x2), x1.max(x2));
        let (y1, y2) = (y1.min(y2), y1.max(y2));
        // Clamp first so a huge off-canvas rectangle costs nothing.
        let (w, h) = (self.width as i64, self.height as i64);
        let (x1, x2) = (x1.clamp(0, w), x2.clamp(0, w));
        let (y1, y2) = (y1.clamp(0, h), y2.clamp(0, h));
        for y in y1..y2 {
            for x in x1..x2 {
                self.set_pixel(x, y, colour);
            }
        }
    }

    /// Outline of `[x1, x2) x [y1, y2)`, one pixel wide. Interior untouched.
    /// Edges outside the region are skipped, the rest clipped.
    pub fn draw_rect(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, colour: Rgb) {
        let (x1, x2) = (x1.min(x2), x1.max(x2));
        let (y1, y2) = (y1.min(y2), y1.max(y2));
        if x1 == x2 || y1 == y2 {
            return;
        }
        let (w, h) = (self.width as i64, self.height as i64);
        let (cx1, cx2) = (x1.clamp(0, w), x2.clamp(0, w));
        let (cy1, cy2) = (y1.clamp(0, h), y2.clamp(0, h));

        for y in [y1, y2 - 1] {
            if (0..h).contains(&y) {
                for x in cx1..cx2 {
                    self.set_pixel(x, y, colour);
                }
            }
        }
        for x in [x1, x2 - 1] {
            if (0..w).contains(&x) {
                for y in cy1..cy2 {
                    self.set_pixel(x, y, colour);
                }
            }
        }
    }

    /// Set the whole region to one colour
    pub fn clear(&mut self, colour: Rgb) {
        self.data
            .chunks_exact_mut(BPP)
            .for_each(|px| px.copy_from_slice(&[colour.r, colour.g, colour.b]));
    }

    /// Scale every channel to `percent`% of its value, truncating.
    /// Percentages above 100 saturate at 255.
    pub fn darken(&mut self, percent: u32) {
        let percent = u64::from(percent);
        self.data.iter_mut().for_each(|c| {
            *c = (u64::from(*c) * percent / 100).min(255) as u8;
        });
    }

    fn span(&self, surface_width: usize, surface_height: usize, x: i64, y: i64) -> Option<Span> {
        let clip = |offset: i64, len: usize, bound: usize| -> Option<(usize, usize, usize)> {
            let start = usize::try_from(offset.saturating_neg()).unwrap_or(0);
            let end = usize::try_from((bound as i64).saturating_sub(offset))
                .unwrap_or(0)
                .min(len);
            let dst = usize::try_from(offset).unwrap_or(0);
            (start < end).then_some((start, end, dst))
        };
        let (x0, x1, dx) = clip(x, self.width, surface_width)?;
        let (y0, y1, dy) = clip(y, self.height, surface_height)?;
        Some(Span { x0, x1, y0, y1, dx, dy })
    }

    /// Composite this region onto `display` with its top-left corner at
    /// (`x`, `y`). Parts falling outside the surface are clipped.
    pub fn to_display<S: DisplaySurface>(
        &self,
        display: &mut Display<S>,
        x: i64,
        y: i64,
    ) -> Result<()> {
        let Some(span) = self.span(display.width(), display.height(), x, y) else {
            return Ok(());
        };
        match display.path() {
            BlitPath::Linear { format, stride } => {
                let height = display.height();
                let data = display.surface_mut().mapped_data().ok_or_else(|| {
                    let reason = "linear surface has no mapped memory";
                    Error::UnsupportedSurfaceFormat(reason.to_owned())
                })?;
                if data.len() < stride * height {
                    return Err(Error::UnsupportedSurfaceFormat(format!(
                        "mapped memory holds {} bytes, layout needs {}",
                        data.len(),
                        stride * height
                    )));
                }
                self.blit_linear(data, format, stride, &span);
            }
            BlitPath::PerPixel => {
                let surface = display.surface_mut();
                for sy in span.y0..span.y1 {
                    let row = sy * self.width;
                    for sx in span.x0..span.x1 {
                        let i = (row + sx) * BPP;
                        let colour = Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2]);
                        surface.set_pixel(sx - span.x0 + span.dx, sy - span.y0 + span.dy, colour);
                    }
                }
            }
        }
        Ok(())
    }

    fn blit_linear(&self, data: &mut [u8], format: PixelFormat, stride: usize, span: &Span) {
        let bpp = format.bytes_per_pixel;
        let cols = span.x1 - span.x0;
        for sy in span.y0..span.y1 {
            let src_start = (sy * self.width + span.x0) * BPP;
            let src = &self.data[src_start..src_start + cols * BPP];
            let dst_start = (sy - span.y0 + span.dy) * stride + span.dx * bpp;
            let dst = &mut data[dst_start..dst_start + cols * bpp];

            for (px, out) in src.chunks_exact(BPP).zip(dst.chunks_exact_mut(bpp)) {
                format.write(out, Rgb::new(px[0], px[1], px[2]));
            }
        }
    }

    /// Fill this region from `display`, reading the rectangle whose top-left
    /// corner is at (`x`, `y`). Always goes through the per-pixel accessor;
    /// pixels that fall outside the surface are left unchanged.
    pub fn from_display<S: DisplaySurface>(&mut self, display: &Display<S>, x: i64, y: i64) {
        let Some(span) = self.span(display.width(), display.height(), x, y) else {
            return;
        };
        let surface = display.surface();
        for sy in span.y0..span.y1 {
            for sx in span.x0..span.x1 {
                let colour = surface.get_pixel(sx - span.x0 + span.dx, sy - span.y0 + span.dy);
                let i = (sy * self.width + sx) * BPP;
                self.data[i..i + BPP].copy_from_slice(&[colour.r, colour.g, colour.b]);
            }
        }
    }
}
