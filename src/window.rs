use crate::config::{BlitStrategy, WindowConfig};
use crate::core::PixelBuffer;
use crate::error::{Error, Result};
use crate::surface::{ConsoleSurface, Coord, DestRect};

/// Which path a frame went out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlitPath {
    /// One bulk region write.
    Fast,
    /// One cursor-addressed write per cell.
    Slow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Presented(BlitPath),
    /// A transient surface error cut the frame short. The next render starts fresh.
    Dropped,
}

/// Owns a surface and projects [`PixelBuffer`]s of the configured geometry onto it.
pub struct Window<S: ConsoleSurface> {
    surface: S,
    config: WindowConfig,
}

impl<S: ConsoleSurface> Window<S> {
    /// Applies the configured chrome and sizes the surface.
    pub fn new(mut surface: S, config: WindowConfig) -> Result<Self> {
        surface.set_title(&config.title)?;
        surface.set_cursor_visible(!config.hide_cursor)?;
        surface.set_encoding(config.encoding)?;
        surface.resize(config.width, config.height)?;

        if config.strategy == BlitStrategy::Fast && !surface.supports_bulk_write() {
            log::warn!("Bulk write requested but unsupported by surface, using per-cell path");
        }
        log::debug!(
            "Window '{}' created: {}x{}, strategy {:?}",
            config.title,
            config.width,
            config.height,
            config.strategy
        );
        Ok(Self { surface, config })
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn cursor_position(&mut self) -> Result<Coord> {
        self.surface.cursor_position()
    }

    /// Path the next frame will take.
    pub fn active_path(&self) -> BlitPath {
        match self.config.strategy {
            BlitStrategy::Slow => BlitPath::Slow,
            _ if self.surface.supports_bulk_write() => BlitPath::Fast,
            BlitStrategy::Fast | BlitStrategy::Auto => BlitPath::Slow,
        }
    }

    /// Renders `buffer`.
    ///
    /// A buffer whose dimensions differ from the window's is rejected with
    /// [`Error::GeometryMismatch`]. Transient surface errors are logged and
    /// reported as [`FrameStatus::Dropped`]; they are not retried.
    pub fn render(&mut self, buffer: &PixelBuffer) -> Result<FrameStatus> {
        let surface_dims = (self.config.width, self.config.height);
        let buffer_dims = (buffer.width(), buffer.height());
        if buffer_dims != surface_dims {
            return Err(Error::GeometryMismatch {
                buffer: buffer_dims,
                surface: surface_dims,
            });
        }

        let path = self.active_path();
        match self.blit(buffer, path) {
            Ok(()) => Ok(FrameStatus::Presented(path)),
            Err(err) if err.is_transient() => {
                log::warn!("Dropped frame: {}", err);
                Ok(FrameStatus::Dropped)
            }
            Err(err) => Err(err),
        }
    }

    fn blit(&mut self, buffer: &PixelBuffer, path: BlitPath) -> Result<()> {
        self.surface.resize(self.config.width, self.config.height)?;
        match path {
            BlitPath::Fast => self.blit_fast(buffer),
            BlitPath::Slow => self.blit_slow(buffer),
        }
    }

    fn blit_fast(&mut self, buffer: &PixelBuffer) -> Result<()> {
        let (w, h) = surface_extent(buffer)?;
        if buffer.size() == 0 {
            return Ok(());
        }
        let cells = buffer.to_native_cells();
        let dest = DestRect {
            left: 0,
            top: 0,
            right: w - 1,
            bottom: h - 1,
        };
        log::trace!("Bulk write of {} cells", cells.len());
        self.surface
            .write_region(&cells, Coord::new(0, 0), Coord::new(w, h), dest)
    }

    fn blit_slow(&mut self, buffer: &PixelBuffer) -> Result<()> {
        surface_extent(buffer)?;
        let len = buffer.sweep_len();
        log::trace!("Per-cell write of {} cells", len);
        for (idx, pixel) in buffer.pixels()[..len].iter().enumerate() {
            let (x, y) = buffer.to_2d(idx);
            let at = Coord::new(x as u16, y as u16);
            self.surface
                .write_cell_at(at, pixel.character, pixel.foreground, pixel.background)?;
        }
        self.surface.flush()
    }
}

/// Buffer extent in surface coordinates, which are 16-bit.
fn surface_extent(buffer: &PixelBuffer) -> Result<(u16, u16)> {
    match (u16::try_from(buffer.width()), u16::try_from(buffer.height())) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(Error::SurfaceRange {
            width: buffer.width(),
            height: buffer.height(),
        }),
    }
}
