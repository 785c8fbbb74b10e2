use super::{ConsoleSurface, Coord, DestRect, Encoding, NativeCell};
use crate::core::Color;
use crate::error::{Error, Result};
use crossterm::{
    cursor::{self, Hide, MoveTo, Show},
    execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, SetSize, SetTitle},
};
use std::io::{self, Stdout, Write};

/// Terminal surface driven through crossterm.
///
/// The bulk path queues a whole region and flushes once. The per-cell path
/// flushes after every cell.
pub struct CrosstermSurface<W: Write = Stdout> {
    writer: W,
    bulk: bool,
    encoding: Encoding,
}

impl CrosstermSurface<Stdout> {
    pub fn stdout() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> CrosstermSurface<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            bulk: true,
            encoding: Encoding::default(),
        }
    }

    /// Forces callers onto the per-cell path.
    pub fn per_cell(mut self) -> Self {
        self.bulk = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn glyph(&self, c: char) -> char {
        match self.encoding {
            Encoding::Ascii if !c.is_ascii() => '?',
            _ => c,
        }
    }
}

pub fn to_crossterm_color(color: Color) -> CtColor {
    match color {
        Color::Black => CtColor::Black,
        Color::DarkBlue => CtColor::DarkBlue,
        Color::DarkGreen => CtColor::DarkGreen,
        Color::DarkCyan => CtColor::DarkCyan,
        Color::DarkRed => CtColor::DarkRed,
        Color::DarkMagenta => CtColor::DarkMagenta,
        Color::DarkYellow => CtColor::DarkYellow,
        Color::Gray => CtColor::Grey,
        Color::DarkGray => CtColor::DarkGrey,
        Color::Blue => CtColor::Blue,
        Color::Green => CtColor::Green,
        Color::Cyan => CtColor::Cyan,
        Color::Red => CtColor::Red,
        Color::Magenta => CtColor::Magenta,
        Color::Yellow => CtColor::Yellow,
        Color::White => CtColor::White,
    }
}

impl<W: Write> ConsoleSurface for CrosstermSurface<W> {
    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(Error::SurfaceRange { width, height });
        };
        queue!(self.writer, SetSize(w, h))?;
        self.writer.flush()?;

        let (cols, rows) = terminal::size()?;
        if cols < w || rows < h {
            return Err(Error::SurfaceRange { width, height });
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(self.writer, SetTitle(title))?;
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            execute!(self.writer, Show)?;
        } else {
            execute!(self.writer, Hide)?;
        }
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
        let extent_w = extent.x as usize;
        if cells.len() != extent_w * extent.y as usize {
            return Err(Error::SurfaceRange {
                width: extent.x as u32,
                height: extent.y as u32,
            });
        }

        let mut attributes = None;
        for (dy, ty) in (dest.top..=dest.bottom).enumerate() {
            let sy = origin.y as usize + dy;
            if sy >= extent.y as usize {
                break;
            }
            queue!(self.writer, MoveTo(dest.left, ty))?;
            for dx in 0..=(dest.right.saturating_sub(dest.left)) as usize {
                let sx = origin.x as usize + dx;
                if sx >= extent_w {
                    break;
                }
                let cell = cells[sy * extent_w + sx];
                if attributes != Some(cell.attributes) {
                    let fg = cell.foreground().unwrap_or(Color::Gray);
                    let bg = cell.background().unwrap_or(Color::Black);
                    queue!(
                        self.writer,
                        SetForegroundColor(to_crossterm_color(fg)),
                        SetBackgroundColor(to_crossterm_color(bg))
                    )?;
                    attributes = Some(cell.attributes);
                }
                let glyph = self.glyph(cell.character);
                queue!(self.writer, Print(glyph))?;
            }
        }
        queue!(self.writer, ResetColor)?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_cell_at(&mut self, at: Coord, character: char, fg: Color, bg: Color) -> Result<()> {
        let glyph = self.glyph(character);
        execute!(
            self.writer,
            MoveTo(at.x, at.y),
            SetForegroundColor(to_crossterm_color(fg)),
            SetBackgroundColor(to_crossterm_color(bg)),
            Print(glyph)
        )?;
        Ok(())
    }

    fn cursor_position(&mut self) -> Result<Coord> {
        let (x, y) = cursor::position()?;
        Ok(Coord::new(x, y))
    }

    fn flush(&mut self) -> Result<()> {
        execute!(self.writer, ResetColor)?;
        Ok(())
    }
}
