use thiserror::Error;

/// All the ways the engine, the pixel region and the session can fail.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Width or height of a grid or region is zero.
    #[error("invalid dimension {width}x{height}: width and height must be positive")]
    InvalidDimension { width: usize, height: usize },

    /// Coordinate outside a grid whose accessors validate instead of clipping.
    #[error("cell ({x}, {y}) lies outside the {width}x{height} grid")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Linear surface whose layout the fast composite path cannot write.
    #[error("unsupported surface format: {0}")]
    UnsupportedSurfaceFormat(String),

    /// Birth/survival rule string that is not a set of digits 0-8.
    #[error("invalid rule: {0}")]
    InvalidRule(String),

    /// Neither a `#RRGGBB` code nor a known colour name.
    #[error("couldn't parse colour: {0}")]
    UnknownColour(String),

    /// Display region does not fit on the surface at all.
    #[error(
        "display region ({region_width}x{region_height}) is larger than the screen \
         ({surface_width}x{surface_height})"
    )]
    RegionTooLarge {
        region_width: usize,
        region_height: usize,
        surface_width: usize,
        surface_height: usize,
    },

    /// Seed pattern name with no known shape.
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),

    /// Setting whose value can't be parsed into its type.
    #[error("invalid value {value:?} for {name}")]
    InvalidSetting { name: String, value: String },

    /// Display region fits, but not at the requested offset.
    #[error("display region at ({x}, {y}) lies partly outside the screen")]
    RegionOffscreen { x: i64, y: i64 },
}

pub type Result<T> = std::result::Result<T, Error>;
