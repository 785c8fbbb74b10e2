pub mod buffer;
pub mod pixel;
pub mod registry;
pub mod shader;
pub mod texture;

pub use buffer::PixelBuffer;
pub use pixel::{Color, Pixel};
pub use registry::BufferRegistry;
pub use shader::{PixelTransform, Region, Shader};
pub use texture::Texture;
