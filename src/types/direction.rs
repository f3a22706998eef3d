//! Direction - Which root copies into which for a cycle

use serde::Serialize;
use std::fmt;

/// One of the two configured roots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The primary music library
    Library,
    /// The removable-disk mirror
    Mirror,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Library => write!(f, "library"),
            Side::Mirror => write!(f, "mirror"),
        }
    }
}

/// Copy direction, decided per cycle from inventory sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Direction {
    pub source: Side,
    pub target: Side,
}

impl Direction {
    /// Library copies into mirror
    pub const LIBRARY_TO_MIRROR: Direction = Direction {
        source: Side::Library,
        target: Side::Mirror,
    };

    /// Mirror copies into library
    pub const MIRROR_TO_LIBRARY: Direction = Direction {
        source: Side::Mirror,
        target: Side::Library,
    };

    /// The side with more files is the source. Ties go library → mirror.
    pub fn from_counts(library: usize, mirror: usize) -> Self {
        if mirror > library {
            Self::MIRROR_TO_LIBRARY
        } else {
            Self::LIBRARY_TO_MIRROR
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}
