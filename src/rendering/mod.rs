mod colour;
mod draw;
mod image;
mod memory;
mod region;
mod surface;

pub use colour::{Rgb, parse_colour};
pub use draw::{CellStyle, draw_life};
pub use image::ImageSurface;
pub use memory::MemorySurface;
pub use region::Region;
pub use surface::{BlitPath, Display, DisplaySurface, PixelFormat, SurfaceLayout};
