use super::buffer::PixelBuffer;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Number of addressable slots; valid indices are `0..=65535`.
pub const SLOT_COUNT: usize = 65536;

/// Numbered buffer slots plus the index of the currently bound one.
///
/// Slots are sparse, so an empty registry costs nothing. Binding an empty
/// slot is allowed; [`bound`](Self::bound) then yields `None` until a buffer
/// is inserted there.
#[derive(Debug, Default)]
pub struct BufferRegistry {
    slots: BTreeMap<u16, PixelBuffer>,
    bound: u16,
}

fn slot(index: usize) -> Result<u16> {
    u16::try_from(index).map_err(|_| Error::Range { index })
}

impl BufferRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `buffer` at `index`, returning whatever was there.
    pub fn insert(&mut self, index: usize, buffer: PixelBuffer) -> Result<Option<PixelBuffer>> {
        Ok(self.slots.insert(slot(index)?, buffer))
    }

    pub fn remove(&mut self, index: usize) -> Result<Option<PixelBuffer>> {
        Ok(self.slots.remove(&slot(index)?))
    }

    pub fn get(&self, index: usize) -> Result<Option<&PixelBuffer>> {
        Ok(self.slots.get(&slot(index)?))
    }

    pub fn bind(&mut self, index: usize) -> Result<()> {
        self.bound = slot(index)?;
        log::debug!("Bound buffer slot {}", self.bound);
        Ok(())
    }

    pub fn bound_index(&self) -> usize {
        self.bound as usize
    }

    pub fn bound(&self) -> Option<&PixelBuffer> {
        self.slots.get(&self.bound)
    }

    pub fn bound_mut(&mut self) -> Option<&mut PixelBuffer> {
        self.slots.get_mut(&self.bound)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
