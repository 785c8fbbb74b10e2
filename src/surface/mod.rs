pub mod memory;
#[cfg(feature = "crossterm")]
pub mod terminal;

use crate::core::{Color, Pixel};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Character plus packed color attribute, as consumed by a bulk write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeCell {
    pub character: char,
    /// Foreground in the low nibble, background in the high nibble.
    pub attributes: u16,
}

impl NativeCell {
    pub fn foreground(&self) -> Option<Color> {
        Color::from_index((self.attributes & 0x0F) as u8)
    }

    pub fn background(&self) -> Option<Color> {
        Color::from_index(((self.attributes >> 4) & 0x0F) as u8)
    }
}

impl From<&Pixel> for NativeCell {
    fn from(pixel: &Pixel) -> Self {
        Self {
            character: pixel.character,
            attributes: pixel.attributes(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Coord {
    pub x: u16,
    pub y: u16,
}

impl Coord {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Absolute destination rectangle, inclusive on all four edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DestRect {
    pub left: u16,
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    #[default]
    Unicode,
    Ascii,
}

/// Output sink a [`Window`](crate::Window) blits into.
///
/// Implementations report transient trouble (interrupted writes, a window
/// momentarily too small) as [`Error::TransientIo`](crate::Error::TransientIo)
/// or [`Error::SurfaceRange`](crate::Error::SurfaceRange).
pub trait ConsoleSurface {
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;

    fn set_title(&mut self, title: &str) -> Result<()>;

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()>;

    fn set_encoding(&mut self, encoding: Encoding) -> Result<()>;

    /// Whether [`write_region`](Self::write_region) is available.
    fn supports_bulk_write(&self) -> bool;

    /// Writes `cells` (row-major, `extent.x * extent.y` long) starting at
    /// `origin` within the cell array, into `dest` on the surface.
    fn write_region(
        &mut self,
        cells: &[NativeCell],
        origin: Coord,
        extent: Coord,
        dest: DestRect,
    ) -> Result<()>;

    fn write_cell_at(&mut self, at: Coord, character: char, fg: Color, bg: Color) -> Result<()>;

    fn cursor_position(&mut self) -> Result<Coord>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

pub use memory::MemorySurface;
#[cfg(feature = "crossterm")]
pub use terminal::CrosstermSurface;
