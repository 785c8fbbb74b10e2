use super::pixel::{Color, Pixel};
use super::shader::Shader;
use super::texture::Texture;
use crate::config::SweepMode;
use crate::surface::NativeCell;

/// The frame canvas: a flat row-major array of `width * height` pixels.
///
/// Every write is clipped. Coordinates outside `[0, width) x [0, height)`
/// and indices at or past `size()` are dropped without error.
///
/// There is no internal locking or double buffering. One writer at a time;
/// mutating while the same buffer is being rendered can tear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    cells: Vec<Pixel>,
    width: u32,
    height: u32,
    sweep: SweepMode,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_sweep(width, height, SweepMode::Full)
    }

    /// Construction always fills every cell; `sweep` only governs later
    /// clears, shader passes and slow renders.
    pub fn with_sweep(width: u32, height: u32, sweep: SweepMode) -> Self {
        Self {
            cells: vec![Pixel::EMPTY; width as usize * height as usize],
            width,
            height,
            sweep,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn sweep(&self) -> SweepMode {
        self.sweep
    }

    /// Number of leading cells a whole-buffer sweep visits.
    pub fn sweep_len(&self) -> usize {
        match self.sweep {
            SweepMode::Full => self.size(),
            SweepMode::SkipLast => self.size().saturating_sub(1),
        }
    }

    /// A zero-width buffer has no cells; every index maps to `(0, 0)`.
    #[inline]
    pub fn to_2d(&self, index: usize) -> (u32, u32) {
        let width = self.width as usize;
        if width == 0 {
            return (0, 0);
        }
        ((index % width) as u32, (index / width) as u32)
    }

    #[inline]
    pub fn to_1d(&self, x: u32, y: u32) -> usize {
        x as usize + y as usize * self.width as usize
    }

    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(self.to_1d(x as u32, y as u32))
    }

    pub fn get(&self, index: usize) -> Option<Pixel> {
        self.cells.get(index).copied()
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Pixel> {
        self.index_of(x, y).map(|idx| self.cells[idx])
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.cells
    }

    pub fn row(&self, y: u32) -> Option<&[Pixel]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.width as usize;
        let end = start + self.width as usize;
        Some(&self.cells[start..end])
    }

    /// 1-D write. No-op when `index >= size()`.
    pub fn set(&mut self, index: usize, pixel: Pixel) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = pixel;
        }
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, pixel: Pixel) {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = pixel;
        }
    }

    /// Fills `width x height` cells from `(x, y)`, clipping each one.
    pub fn set_rectangle(&mut self, x: i32, y: i32, width: i32, height: i32, pixel: Pixel) {
        for yi in y..y.saturating_add(height) {
            for xi in x..x.saturating_add(width) {
                self.set_pixel(xi, yi, pixel);
            }
        }
    }

    /// Copies `texture` with its top-left at `(x, y)`. Cells landing outside
    /// the buffer are dropped; the texture is not touched.
    pub fn set_texture(&mut self, x: i32, y: i32, texture: &Texture) {
        for (yi, row) in texture.rows().enumerate() {
            for (xi, pixel) in row.iter().enumerate() {
                self.set_pixel(x.saturating_add(xi as i32), y.saturating_add(yi as i32), *pixel);
            }
        }
    }

    /// Stamps `text` along row `y`, one cell per `char`, without wrapping.
    pub fn set_string(&mut self, x: i32, y: i32, text: &str, foreground: Color, background: Color) {
        for (i, c) in text.chars().enumerate() {
            self.set_pixel(
                x.saturating_add(i as i32),
                y,
                Pixel::new(c, foreground, background),
            );
        }
    }

    pub fn clear(&mut self, pixel: Pixel) {
        let len = self.sweep_len();
        self.cells[..len].fill(pixel);
    }

    pub fn apply_shader(&mut self, shader: &Shader) {
        let len = self.sweep_len();
        for idx in 0..len {
            let (x, y) = self.to_2d(idx);
            self.cells[idx] = shader.execute(x as i32, y as i32, self.cells[idx]);
        }
    }

    /// Native cell array for a bulk write. Always covers the whole buffer.
    pub fn to_native_cells(&self) -> Vec<NativeCell> {
        self.cells.iter().map(NativeCell::from).collect()
    }
}
