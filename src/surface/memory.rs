use super::{ConsoleSurface, Coord, DestRect, Encoding, NativeCell};
use crate::core::{Color, Pixel};
use crate::error::{Error, Result};
use std::io;

/// In-process surface that keeps what was written to it.
///
/// Useful headless and as a test double: it can be built without bulk-write
/// support, capped at a maximum extent, and told to fail its next write.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    width: u32,
    height: u32,
    cells: Vec<NativeCell>,
    title: String,
    cursor: Coord,
    cursor_visible: bool,
    encoding: Encoding,
    bulk: bool,
    max_extent: Option<(u32, u32)>,
    pending_failure: Option<io::ErrorKind>,
    bulk_writes: usize,
    cell_writes: usize,
    last_region: Option<Vec<NativeCell>>,
}

/// Row-major offset, computed in `usize` so large extents cannot wrap.
fn cell_offset(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            title: String::new(),
            cursor: Coord::default(),
            cursor_visible: true,
            encoding: Encoding::default(),
            bulk: true,
            max_extent: None,
            pending_failure: None,
            bulk_writes: 0,
            cell_writes: 0,
            last_region: None,
        }
    }

    /// A surface that only offers per-cell writes.
    pub fn without_bulk_write() -> Self {
        Self {
            bulk: false,
            ..Self::new()
        }
    }

    /// Resizes beyond `width x height` fail with [`Error::SurfaceRange`].
    pub fn with_max_extent(mut self, width: u32, height: u32) -> Self {
        self.set_max_extent(width, height);
        self
    }

    pub fn set_max_extent(&mut self, width: u32, height: u32) {
        self.max_extent = Some((width, height));
    }

    /// Makes the next resize or write fail with an I/O error of `kind`.
    pub fn fail_next(&mut self, kind: io::ErrorKind) {
        self.pending_failure = Some(kind);
    }

    fn take_failure(&mut self) -> Result<()> {
        match self.pending_failure.take() {
            Some(kind) => Err(io::Error::new(kind, "injected surface failure").into()),
            None => Ok(()),
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn bulk_writes(&self) -> usize {
        self.bulk_writes
    }

    pub fn cell_writes(&self) -> usize {
        self.cell_writes
    }

    /// Cell array passed to the most recent bulk write.
    pub fn last_region(&self) -> Option<&[NativeCell]> {
        self.last_region.as_deref()
    }

    pub fn cell(&self, x: u32, y: u32) -> Option<NativeCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(cell_offset(self.width, x, y)).copied()
    }

    /// Current contents of row `y` as text.
    pub fn row_text(&self, y: u32) -> Option<String> {
        if y >= self.height {
            return None;
        }
        let start = cell_offset(self.width, 0, y);
        let end = start + self.width as usize;
        Some(self.cells[start..end].iter().map(|c| c.character).collect())
    }
}

impl ConsoleSurface for MemorySurface {
    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.take_failure()?;
        if let Some((max_w, max_h)) = self.max_extent {
            if width > max_w || height > max_h {
                return Err(Error::SurfaceRange { width, height });
            }
        }
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.cells = vec![NativeCell::from(&Pixel::EMPTY); width as usize * height as usize];
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.title = title.to_string();
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        self.cursor_visible = visible;
        Ok(())
    }

    fn set_encoding(&mut self, encoding: Encoding) -> Result<()> {
        self.encoding = encoding;
        Ok(())
    }

    fn supports_bulk_write(&self) -> bool {
        self.bulk
    }

    fn write_region(
        &mut self,
        cells: &[NativeCell],
        origin: Coord,
        extent: Coord,
        dest: DestRect,
    ) -> Result<()> {
        if !self.bulk {
            return Err(io::Error::new(io::ErrorKind::Unsupported, "bulk write unavailable").into());
        }
        self.take_failure()?;
        let (extent_w, extent_h) = (extent.x as usize, extent.y as usize);
        if cells.len() != extent_w * extent_h {
            return Err(Error::SurfaceRange {
                width: extent.x as u32,
                height: extent.y as u32,
            });
        }

        for dy in 0..=(dest.bottom.saturating_sub(dest.top)) as usize {
            for dx in 0..=(dest.right.saturating_sub(dest.left)) as usize {
                let (sx, sy) = (origin.x as usize + dx, origin.y as usize + dy);
                let (tx, ty) = (dest.left as u32 + dx as u32, dest.top as u32 + dy as u32);
                if sx >= extent_w || sy >= extent_h || tx >= self.width || ty >= self.height {
                    continue;
                }
                self.cells[cell_offset(self.width, tx, ty)] = cells[sy * extent_w + sx];
            }
        }

        self.bulk_writes += 1;
        self.last_region = Some(cells.to_vec());
        Ok(())
    }

    fn write_cell_at(&mut self, at: Coord, character: char, fg: Color, bg: Color) -> Result<()> {
        self.take_failure()?;
        let (x, y) = (at.x as u32, at.y as u32);
        if x >= self.width || y >= self.height {
            return Err(Error::SurfaceRange {
                width: x + 1,
                height: y + 1,
            });
        }
        self.cells[cell_offset(self.width, x, y)] =
            NativeCell::from(&Pixel::new(character, fg, bg));
        self.cursor = Coord::new(at.x.saturating_add(1), at.y);
        self.cell_writes += 1;
        Ok(())
    }

    fn cursor_position(&mut self) -> Result<Coord> {
        Ok(self.cursor)
    }
}
