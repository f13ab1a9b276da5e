//! Shared type definitions for farming session statistics.
//!
//! This crate is the single source of truth for the record the stats engine
//! maintains and the intercepted payloads it consumes. Record types flow
//! downstream to `TypeScript` via `ts-rs` for the display overlay.
//!
//! # Modules
//!
//! - [`rank`] -- Rarity ranks used to bucket drops
//! - [`stats`] -- The [`FarmingStats`] record, [`Resources`], and [`Drops`]
//! - [`payload`] -- Typed stage-entry and wave-clear payloads

pub mod payload;
pub mod rank;
pub mod stats;

// Re-export all public types at crate root for convenience.
pub use payload::{
    BattleserverEnterRequest, BattleserverEnterResponse, ClearRewardInfo, CurrencyInfo,
    ItemReward, PayloadError, UnitReward, WaveClearResponse,
};
pub use rank::Rank;
pub use stats::{Drops, FarmingStats, RankCounts, Resources, seeded_rank_counts};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the display layer.

    #[test]
    fn export_bindings() {
        // ts-rs writes bindings to `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::rank::Rank::export_all();
        let _ = crate::stats::Resources::export_all();
        let _ = crate::stats::Drops::export_all();
        let _ = crate::stats::FarmingStats::export_all();
    }
}
