//! Content flags for collision filtering.
//!
//! Each solid carries a content mask, and every trace carries a mask of the
//! contents it collides with. Solids outside the trace mask are skipped.

use serde::{Deserialize, Serialize};

/// Content flags describe what type of volume a solid is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContentFlags(pub u32);

impl ContentFlags {
    /// Empty space - nothing here.
    pub const EMPTY: Self = Self(0);

    /// Solid world geometry - walls, floors, stairs.
    pub const SOLID: Self = Self(1 << 0);

    /// Player clip - blocks players but is otherwise invisible.
    pub const PLAYER_CLIP: Self = Self(1 << 1);

    /// Trigger volume - never blocks movement.
    pub const TRIGGER: Self = Self(1 << 2);

    /// Standard mask for player movement traces.
    pub const MASK_PLAYER_SOLID: Self = Self(Self::SOLID.0 | Self::PLAYER_CLIP.0);

    /// Check if these flags contain a specific flag.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any of the given flags are set.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }
}

impl std::ops::BitOr for ContentFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_mask() {
        let mask = ContentFlags::MASK_PLAYER_SOLID;
        assert!(mask.contains(ContentFlags::SOLID));
        assert!(mask.contains(ContentFlags::PLAYER_CLIP));
        assert!(!mask.intersects(ContentFlags::TRIGGER));
    }

    #[test]
    fn test_bitor_combines() {
        let combined = ContentFlags::SOLID | ContentFlags::TRIGGER;
        assert!(combined.intersects(ContentFlags::MASK_PLAYER_SOLID));
        assert!(combined.contains(ContentFlags::TRIGGER));
        assert!(!ContentFlags::EMPTY.intersects(combined));
    }
}
