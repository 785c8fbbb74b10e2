use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Registry slot index outside `0..=65535`.
    #[error("buffer index {index} is outside the range of 0-65535")]
    Range { index: usize },

    /// Texture write outside the texture's own extent.
    #[error("coordinates ({x}, {y}) are out of range for a {width}x{height} texture")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    #[error("buffer is {}x{} but the surface is configured for {}x{}", .buffer.0, .buffer.1, .surface.0, .surface.1)]
    GeometryMismatch {
        buffer: (u32, u32),
        surface: (u32, u32),
    },

    /// The surface could not take the requested extent right now.
    #[error("surface rejected extent {width}x{height}")]
    SurfaceRange { width: u32, height: u32 },

    #[error("surface I/O failed: {0}")]
    TransientIo(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Errors a window swallows for the current frame instead of surfacing.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::TransientIo(_) | Error::SurfaceRange { .. })
    }
}
