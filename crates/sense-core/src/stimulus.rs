//! Stimulus categories and a compact set type over them.
//!
//! Line-of-sight and modifier strategies declare which stimulus types they
//! can serve, so one strategy may back several senses.  [`StimulusSet`] keeps
//! that declaration typed instead of passing raw bit masks around.

use std::fmt;

/// The sense a stimulus addresses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StimulusType {
    Visual,
    Audio,
    Empathy,
    Magical,
    Scent,
    Vibration,
}

impl StimulusType {
    pub const ALL: [StimulusType; 6] = [
        StimulusType::Visual,
        StimulusType::Audio,
        StimulusType::Empathy,
        StimulusType::Magical,
        StimulusType::Scent,
        StimulusType::Vibration,
    ];

    #[inline]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for StimulusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A set of [`StimulusType`]s.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct StimulusSet(u8);

impl StimulusSet {
    pub const EMPTY: StimulusSet = StimulusSet(0);

    /// Build a set from a slice of types.
    pub fn of(types: &[StimulusType]) -> Self {
        types.iter().fold(Self::EMPTY, |set, &t| set.with(t))
    }

    /// Copy of `self` with `t` added.
    #[inline]
    #[must_use]
    pub fn with(self, t: StimulusType) -> Self {
        StimulusSet(self.0 | t.bit())
    }

    #[inline]
    pub fn insert(&mut self, t: StimulusType) {
        self.0 |= t.bit();
    }

    #[inline]
    pub fn contains(self, t: StimulusType) -> bool {
        self.0 & t.bit() != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = StimulusType> {
        StimulusType::ALL.into_iter().filter(move |&t| self.contains(t))
    }
}

impl FromIterator<StimulusType> for StimulusSet {
    fn from_iter<I: IntoIterator<Item = StimulusType>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, |set, t| set.with(t))
    }
}

impl fmt::Debug for StimulusSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
