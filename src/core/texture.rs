use super::pixel::{Color, Pixel};
use super::shader::Shader;
use crate::error::{Error, Result};

/// Fixed-size pixel grid used as a blit source.
///
/// Unlike [`PixelBuffer`](super::PixelBuffer), writes outside the texture fail
/// with [`Error::OutOfBounds`] rather than being clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    cells: Vec<Pixel>,
    width: u32,
    height: u32,
}

impl Texture {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: vec![Pixel::EMPTY; width as usize * height as usize],
            width,
            height,
        }
    }

    /// One row per line, one cell per `char`. Short lines are padded with
    /// [`Pixel::EMPTY`].
    pub fn from_text(lines: &[&str], foreground: Color, background: Color) -> Self {
        let width = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0) as u32;
        let mut texture = Self::new(width, lines.len() as u32);

        for (y, line) in lines.iter().enumerate() {
            for (x, c) in line.chars().enumerate() {
                let idx = y * width as usize + x;
                texture.cells[idx] = Pixel::new(c, foreground, background);
            }
        }
        texture
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Pixel> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, pixel: Pixel) -> Result<()> {
        let Some(idx) = self.index(x, y) else {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        };
        self.cells[idx] = pixel;
        Ok(())
    }

    pub fn fill(&mut self, pixel: Pixel) {
        self.cells.fill(pixel);
    }

    /// Runs `shader` over the whole texture. There is no sweep policy here;
    /// every cell is visited.
    pub fn apply_shader(&mut self, shader: &Shader) {
        let width = self.width as usize;
        for (idx, cell) in self.cells.iter_mut().enumerate() {
            let x = (idx % width) as i32;
            let y = (idx / width) as i32;
            *cell = shader.execute(x, y, *cell);
        }
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        // chunks() panics on zero
        self.cells.chunks(self.width.max(1) as usize)
    }
}
