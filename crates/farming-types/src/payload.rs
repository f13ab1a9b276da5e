//! Intercepted request/response payloads consumed by the stats engine.
//!
//! Field names follow the game's wire format (`PascalCase`). Only the fields
//! the engine reads are modelled; everything else in the payload is ignored
//! on decode.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::stats::Resources;

/// Errors that can occur when decoding an intercepted payload.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// The payload was not valid JSON for the expected shape.
    #[error("failed to decode {payload} payload: {source}")]
    Decode {
        /// Which payload was being decoded.
        payload: &'static str,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

/// Decode a payload from a JSON value, tagging errors with `payload`.
pub fn decode<T: DeserializeOwned>(
    payload: &'static str,
    value: serde_json::Value,
) -> Result<T, PayloadError> {
    serde_json::from_value(value).map_err(|source| PayloadError::Decode { payload, source })
}

// ---------------------------------------------------------------------------
// Stage entry
// ---------------------------------------------------------------------------

/// Request body of a stage entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BattleserverEnterRequest {
    /// Stage identifier.
    pub stage_key_string: String,
    /// Selected squad number.
    pub selected_squad_no: u32,
}

/// Response body of a stage entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BattleserverEnterResponse {
    /// Currency totals after the sortie cost was paid.
    pub currency_info: CurrencyInfo,
}

/// Currency totals, each split into a purchased and a free amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CurrencyInfo {
    /// Parts.
    pub metal: f64,
    /// Free parts.
    pub free_metal: f64,
    /// Nutrients.
    pub nutrient: f64,
    /// Free nutrients.
    pub free_nutrient: f64,
    /// Power.
    pub power: f64,
    /// Free power.
    pub free_power: f64,
}

impl CurrencyInfo {
    /// Sum each currency with its free amount.
    pub fn totals(&self) -> Resources {
        Resources::new(
            self.metal + self.free_metal,
            self.nutrient + self.free_nutrient,
            self.power + self.free_power,
        )
    }
}

// ---------------------------------------------------------------------------
// Wave clear
// ---------------------------------------------------------------------------

/// Response body of a wave clear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WaveClearResponse {
    /// Rewards granted for the cleared wave.
    #[serde(default)]
    pub clear_reward_info: ClearRewardInfo,
}

/// Unit and item rewards of a cleared wave, in the order the game sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClearRewardInfo {
    /// Unit rewards.
    #[serde(rename = "PCRewardList", default)]
    pub pc_reward_list: Vec<UnitReward>,
    /// Item rewards (equipment and materials).
    #[serde(rename = "ItemRewardList", default)]
    pub item_reward_list: Vec<ItemReward>,
}

/// A single unit reward.
///
/// The grade is kept as sent, absent or out of range included, so one odd
/// entry does not fail the whole wave.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct UnitReward {
    /// Raw rarity grade.
    pub grade: Option<i64>,
}

impl UnitReward {
    /// A unit reward with the given grade.
    pub const fn with_grade(grade: i64) -> Self {
        Self { grade: Some(grade) }
    }
}

/// A single item reward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ItemReward {
    /// Item key, e.g. `Equip_Chip_Atk_T3`.
    pub item_key_string: Option<String>,
}

impl ItemReward {
    /// An item reward with the given key.
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            item_key_string: Some(key.into()),
        }
    }
}
