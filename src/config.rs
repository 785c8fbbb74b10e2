use crate::core::PixelBuffer;
use crate::error::Result;
use crate::surface::Encoding;
use serde::{Deserialize, Serialize};

/// How far a whole-buffer sweep (clear, shader pass, slow render) walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepMode {
    /// Every cell in `0..size`.
    #[default]
    Full,
    /// Stops one short at `0..size - 1`, leaving the final cell untouched.
    SkipLast,
}

/// Which blit path a window uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlitStrategy {
    /// Bulk write when the surface supports it, per-cell otherwise.
    #[default]
    Auto,
    Fast,
    Slow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default)]
    pub title: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub strategy: BlitStrategy,
    #[serde(default)]
    pub sweep: SweepMode,
    #[serde(default = "default_hide_cursor")]
    pub hide_cursor: bool,
    #[serde(default)]
    pub encoding: Encoding,
}

fn default_hide_cursor() -> bool {
    true
}

impl WindowConfig {
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            strategy: BlitStrategy::default(),
            sweep: SweepMode::default(),
            hide_cursor: default_hide_cursor(),
            encoding: Encoding::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_strategy(mut self, strategy: BlitStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_sweep(mut self, sweep: SweepMode) -> Self {
        self.sweep = sweep;
        self
    }

    /// A buffer with this window's geometry and sweep policy.
    pub fn new_buffer(&self) -> PixelBuffer {
        PixelBuffer::with_sweep(self.width, self.height, self.sweep)
    }
}
