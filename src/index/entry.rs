//! Corpus entries and the stable handles that refer to them

use crate::index::signature::{ImageSignatures, Signature};
use image::RgbImage;
use std::cell::OnceCell;

/// Stable handle to an entry of a [`ColorIndex`](crate::index::ColorIndex)
///
/// Grids and histories hold handles, never entries; identity comparisons
/// (exclusion sets, history membership) are handle comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(usize);

impl EntryId {
    /// Handle for the entry at `position` in index order
    pub const fn new(position: usize) -> Self {
        Self(position)
    }

    /// Position of the entry in index order
    pub const fn position(self) -> usize {
        self.0
    }
}

/// One indexed corpus image
#[derive(Debug)]
pub struct ColorEntry {
    identifier: String,
    signatures: ImageSignatures,
    cooldown: u32,
    rendering: OnceCell<RgbImage>,
}

impl ColorEntry {
    /// Create an entry with no cooldown and no cached rendering
    pub fn new(identifier: impl Into<String>, signatures: ImageSignatures) -> Self {
        Self {
            identifier: identifier.into(),
            signatures,
            cooldown: 0,
            rendering: OnceCell::new(),
        }
    }

    /// Corpus-relative file name
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Raw RGB average
    pub const fn rgb(&self) -> Signature {
        self.signatures.rgb
    }

    /// Luma/chroma average used for matching
    pub const fn luma_chroma(&self) -> Signature {
        self.signatures.luma_chroma
    }

    /// Remaining matcher passes before this entry is scored again
    pub const fn cooldown(&self) -> u32 {
        self.cooldown
    }

    /// Overwrite the cooldown counter
    pub const fn set_cooldown(&mut self, cooldown: u32) {
        self.cooldown = cooldown;
    }

    /// Decay the cooldown by one matcher pass
    ///
    /// Returns whether the entry may be scored in this pass: entries without
    /// cooldown always may, cooling entries only on the pass that brings the
    /// counter to zero.
    pub const fn tick_cooldown(&mut self) -> bool {
        if self.cooldown == 0 {
            return true;
        }
        self.cooldown -= 1;
        self.cooldown == 0
    }

    /// Cached cell-size rendering, if it has been produced
    pub fn cached_rendering(&self) -> Option<&RgbImage> {
        self.rendering.get()
    }

    /// Cached rendering, producing it with `render` on first access
    pub(crate) fn rendering_or_init<F>(&self, render: F) -> &RgbImage
    where
        F: FnOnce() -> RgbImage,
    {
        self.rendering.get_or_init(render)
    }
}
