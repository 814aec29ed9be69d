//! Fixed-capacity text buffer for typed weight input

use crate::io::configuration::WEIGHT_BUFFER_CAPACITY;

/// Pending characters typed before an apply-weights command
///
/// Writes past the capacity wrap around and overwrite the oldest slots
/// instead of growing.
#[derive(Debug, Clone)]
pub struct WeightBuffer {
    slots: Vec<char>,
    capacity: usize,
    written: usize,
}

impl Default for WeightBuffer {
    fn default() -> Self {
        Self::with_capacity(WEIGHT_BUFFER_CAPACITY)
    }
}

impl WeightBuffer {
    /// Buffer wrapping after `capacity` characters (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            written: 0,
        }
    }

    /// Record one character
    pub fn push(&mut self, c: char) {
        let slot = self.written % self.capacity;
        if let Some(existing) = self.slots.get_mut(slot) {
            *existing = c;
        } else {
            self.slots.push(c);
        }
        self.written += 1;
    }

    /// Current content
    pub fn text(&self) -> String {
        self.slots.iter().collect()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Return the content and reset the buffer
    pub fn take(&mut self) -> String {
        let text = self.text();
        self.slots.clear();
        self.written = 0;
        text
    }
}
