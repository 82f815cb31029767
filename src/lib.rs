// Domain layer - automaton engine and rules
pub mod domain;

// Rendering layer - pixel region, colours, display surfaces
pub mod rendering;

// Application layer - session driver and configuration
pub mod application;

mod error;

// Re-exports for convenience
pub use application::{Session, SessionConfig};
pub use domain::{CellState, Life, Pattern, Rule};
pub use error::{Error, Result};
pub use rendering::{Display, DisplaySurface, PixelFormat, Region, Rgb};
