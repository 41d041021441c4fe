//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys.  The
//! inner integer is `pub` so hosts can map their own entity handles onto
//! `ObserverId` without ceremony.

use std::fmt;

/// Declare an id newtype: copyable, ordered, hashable, printable as
/// `Name(n)` and usable as a `Vec` index.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Identifier the engine assigns to a registered sensory system.
    pub struct SystemId(u16);
}

typed_id! {
    /// Opaque handle to a host entity that may perceive stimuli.
    pub struct ObserverId(u32);
}

impl ObserverId {
    /// No observer: what a fresh context points at until one is set.
    pub const INVALID: ObserverId = ObserverId(u32::MAX);
}
