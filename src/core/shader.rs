use super::pixel::Pixel;
use std::fmt;

/// Per-coordinate pixel transform run by a [`Shader`].
pub trait PixelTransform {
    fn transform(&self, x: i32, y: i32, input: Pixel) -> Pixel;
}

impl<F> PixelTransform for F
where
    F: Fn(i32, i32, Pixel) -> Pixel,
{
    fn transform(&self, x: i32, y: i32, input: Pixel) -> Pixel {
        self(x, y, input)
    }
}

/// Rectangle a shader is scoped to.
///
/// Both edges are inclusive: a region of width `W` covers `W + 1` columns,
/// `x..=x + width`. The same holds vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && x <= self.x.saturating_add(self.width)
            && y >= self.y
            && y <= self.y.saturating_add(self.height)
    }
}

pub struct Shader {
    region: Region,
    transform: Box<dyn PixelTransform>,
}

impl Shader {
    pub fn new<T>(x: i32, y: i32, width: i32, height: i32, transform: T) -> Self
    where
        T: PixelTransform + 'static,
    {
        Self {
            region: Region::new(x, y, width, height),
            transform: Box::new(transform),
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Runs the transform inside the region and passes `input` through elsewhere.
    pub fn execute(&self, x: i32, y: i32, input: Pixel) -> Pixel {
        if self.region.contains(x, y) {
            self.transform.transform(x, y, input)
        } else {
            input
        }
    }
}

impl fmt::Debug for Shader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shader")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}
