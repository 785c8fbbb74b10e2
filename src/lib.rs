//! Character-cell rendering: a pixel buffer of glyphs and palette colors,
//! region shaders, reusable textures, and a window that blits frames onto
//! a console surface.

pub mod config;
pub mod core;
pub mod error;
pub mod surface;
pub mod window;

#[cfg(test)]
mod tests;

pub use config::{BlitStrategy, SweepMode, WindowConfig};
pub use crate::core::{BufferRegistry, Color, Pixel, PixelBuffer, PixelTransform, Region, Shader, Texture};
pub use error::{Error, Result};
#[cfg(feature = "crossterm")]
pub use surface::CrosstermSurface;
pub use surface::{ConsoleSurface, Coord, DestRect, Encoding, MemorySurface, NativeCell};
pub use window::{BlitPath, FrameStatus, Window};
