//! Where a stimulus lies relative to its observer, and how messages say so.

use std::fmt;

use crate::Position;

/// Horizontal radius (cells, per axis) inside which a source counts as
/// "nearby" rather than having a compass bearing.
pub const NEARBY_RADIUS: i32 = 2;

/// Minor-axis offset (cells) beyond which a bearing becomes a diagonal.
pub const DIAGONAL_THRESHOLD: i32 = 5;

/// Bearing from the observer to the stimulus source.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Source and observer occupy the same point.
    #[default]
    Here,
    /// Horizontally within [`NEARBY_RADIUS`] at roughly the same height.
    Nearby,
    Above,
    Below,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Bearing of `source` as seen from `observer`.
    pub fn between(observer: Position, source: Position) -> Direction {
        let (dx, dy, dz) = observer.delta_to(source);
        if dx == 0 && dy == 0 && dz == 0 {
            return Direction::Here;
        }
        let r = i64::from(NEARBY_RADIUS);
        if dx.abs() <= r && dy.abs() <= r {
            return match dz {
                dz if dz > r  => Direction::Above,
                dz if dz < -r => Direction::Below,
                _ => Direction::Nearby,
            };
        }
        Self::compass(dx, dy)
    }

    /// Eight-way bearing for a horizontal offset.  The dominant axis picks
    /// the cardinal; the minor axis turns it diagonal past
    /// [`DIAGONAL_THRESHOLD`].
    fn compass(dx: i64, dy: i64) -> Direction {
        let t = i64::from(DIAGONAL_THRESHOLD);
        if dx.abs() > dy.abs() {
            match (dx > 0, dy) {
                (true, dy) if dy > t   => Direction::NorthEast,
                (true, dy) if dy < -t  => Direction::SouthEast,
                (true, _)              => Direction::East,
                (false, dy) if dy > t  => Direction::NorthWest,
                (false, dy) if dy < -t => Direction::SouthWest,
                (false, _)             => Direction::West,
            }
        } else {
            match (dy > 0, dx) {
                (true, dx) if dx > t   => Direction::NorthEast,
                (true, dx) if dx < -t  => Direction::NorthWest,
                (true, _)              => Direction::North,
                (false, dx) if dx > t  => Direction::SouthEast,
                (false, dx) if dx < -t => Direction::SouthWest,
                (false, _)             => Direction::South,
            }
        }
    }

    /// Bare compass name, e.g. `"northeast"`.
    pub fn label(self) -> &'static str {
        match self {
            Direction::Here      => "here",
            Direction::Nearby    => "nearby",
            Direction::Above     => "above",
            Direction::Below     => "below",
            Direction::North     => "north",
            Direction::NorthEast => "northeast",
            Direction::East      => "east",
            Direction::SouthEast => "southeast",
            Direction::South     => "south",
            Direction::SouthWest => "southwest",
            Direction::West      => "west",
            Direction::NorthWest => "northwest",
        }
    }

    /// Phrase for where the observer looks: `"to the north"`, `"above"`.
    pub fn toward(self) -> String {
        match self {
            Direction::Here | Direction::Nearby | Direction::Above | Direction::Below => {
                self.label().to_owned()
            }
            _ => format!("to the {}", self.label()),
        }
    }

    /// Phrase for where a sound arrives from: `"from the north"`, `"from above"`.
    pub fn from(self) -> String {
        match self {
            Direction::Here | Direction::Nearby => self.label().to_owned(),
            Direction::Above | Direction::Below => format!("from {}", self.label()),
            _ => format!("from the {}", self.label()),
        }
    }

    /// `true` for the two purely vertical bearings.
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Above | Direction::Below)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
