//! Fixed-capacity working storage owned by a [`SpatialContext`].
//!
//! Every buffer is reserved once when the context is created and never grows
//! afterwards, so one event costs a bounded amount of memory no matter how
//! much terrain or how many bystanders it touches.
//!
//! [`SpatialContext`]: crate::SpatialContext

use sense_core::{ObserverId, SectorType, SpatialError, SpatialResult};

/// Maximum obstacles recorded along one path.
pub const MAX_OBSTACLES: usize = 100;

/// Maximum nearby entities tracked per event.
pub const MAX_NEARBY_ENTITIES: usize = 50;

/// Maximum rendered message length in bytes.
pub const MAX_MESSAGE_LEN: usize = 1024;

// ── Bounded ───────────────────────────────────────────────────────────────────

/// A `Vec` that refuses to grow past the capacity it was created with.
#[derive(Clone, Debug)]
pub struct Bounded<T> {
    items:    Vec<T>,
    capacity: usize,
    what:     &'static str,
}

impl<T> Bounded<T> {
    /// Reserve exactly `capacity` slots up front.  Allocation failure is
    /// reported as [`SpatialError::Memory`] instead of aborting.
    pub fn try_with_capacity(what: &'static str, capacity: usize) -> SpatialResult<Self> {
        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity)
            .map_err(|e| SpatialError::Memory(format!("{what}: {e}")))?;
        Ok(Self { items, capacity, what })
    }

    /// Append an item, or fail with [`SpatialError::Capacity`] when full.
    pub fn push(&mut self, item: T) -> SpatialResult<()> {
        if self.is_full() {
            return Err(SpatialError::Capacity { what: self.what, capacity: self.capacity });
        }
        self.items.push(item);
        Ok(())
    }

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a Bounded<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ── Obstacles and entities ────────────────────────────────────────────────────

/// One map cell on a stimulus path that attenuates it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub x:      i32,
    pub y:      i32,
    pub sector: SectorType,
    /// Fraction of the stimulus this cell absorbs on its own.
    pub weight: f32,
}

pub type ObstacleList = Bounded<Obstacle>;
pub type EntityList = Bounded<ObserverId>;

// ── MessageBuffer ─────────────────────────────────────────────────────────────

/// Rendered perception text, capped at [`MAX_MESSAGE_LEN`] bytes.
///
/// Writes past the cap are truncated on a `char` boundary and flagged.
#[derive(Clone, Debug, Default)]
pub struct MessageBuffer {
    text:      String,
    truncated: bool,
}

impl MessageBuffer {
    pub fn try_new() -> SpatialResult<Self> {
        let mut text = String::new();
        text.try_reserve_exact(MAX_MESSAGE_LEN)
            .map_err(|e| SpatialError::Memory(format!("message buffer: {e}")))?;
        Ok(Self { text, truncated: false })
    }

    /// Replace the contents.
    pub fn set(&mut self, s: &str) {
        self.text.clear();
        self.truncated = false;
        self.push_str(s);
    }

    /// Append, truncating at the cap.
    pub fn push_str(&mut self, s: &str) {
        let room = MAX_MESSAGE_LEN.saturating_sub(self.text.len());
        if s.len() <= room {
            self.text.push_str(s);
            return;
        }
        let mut cut = room;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        self.text.push_str(&s[..cut]);
        self.truncated = true;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.truncated = false;
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// `true` if the last write lost text to the cap.
    #[inline]
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }
}

impl std::fmt::Display for MessageBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
