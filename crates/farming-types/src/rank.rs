//! Rarity ranks used to bucket unit and equipment drops.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Coarse rarity classification of a dropped unit or equipment item.
///
/// Variants are declared from most common to rarest, so the derived
/// ordering (and the iteration order of rank-keyed maps) runs B, A, S, SS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Rank {
    /// Lowest tracked rarity.
    B,
    /// Second tier.
    A,
    /// Third tier.
    S,
    /// Rarest tracked tier.
    SS,
}

impl Rank {
    /// Every rank, in ascending rarity.
    pub const ALL: [Self; 4] = [Self::B, Self::A, Self::S, Self::SS];

    /// Display label, identical to the serialized form.
    pub const fn label(self) -> &'static str {
        match self {
            Self::B => "B",
            Self::A => "A",
            Self::S => "S",
            Self::SS => "SS",
        }
    }
}

impl core::fmt::Display for Rank {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}
