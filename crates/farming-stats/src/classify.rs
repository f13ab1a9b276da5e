//! Fixed grade and item-key classification into [`Rank`]s.
//!
//! Rewards that do not map to a rank are not tracked: materials, consumables
//! and low-grade units all fall through to `None`.

use farming_types::{Rank, RankCounts};

/// Prefix shared by every equipment item key.
const EQUIPMENT_PREFIX: &str = "Equip_";

/// Separator before the tier digit at the end of an equipment item key.
const TIER_SEPARATOR: &str = "_T";

/// Map a unit reward's raw grade to its rank.
///
/// Grades 2 through 5 map to B, A, S and SS. A missing grade yields `None`.
pub const fn grade_to_rank(grade: Option<i64>) -> Option<Rank> {
    match grade {
        Some(2) => Some(Rank::B),
        Some(3) => Some(Rank::A),
        Some(4) => Some(Rank::S),
        Some(5) => Some(Rank::SS),
        _ => None,
    }
}

/// Map an equipment item key to its rank.
///
/// Equipment keys look like `Equip_Chip_Atk_T3`; tiers `T1` through `T4` map
/// to B, A, S and SS. Any other key, or no key at all, yields `None`.
pub fn item_key_to_rank(item_key: Option<&str>) -> Option<Rank> {
    let body = item_key?.strip_prefix(EQUIPMENT_PREFIX)?;
    let (name, tier) = body.rsplit_once(TIER_SEPARATOR)?;
    if name.is_empty() {
        return None;
    }
    match tier {
        "1" => Some(Rank::B),
        "2" => Some(Rank::A),
        "3" => Some(Rank::S),
        "4" => Some(Rank::SS),
        _ => None,
    }
}

/// Add one to `counts` for every rank yielded by `ranks`.
///
/// Returns a new map; `counts` itself is left as it was. Ranks missing from
/// the input map start at zero.
pub fn tally<I>(counts: &RankCounts, ranks: I) -> RankCounts
where
    I: IntoIterator<Item = Rank>,
{
    ranks.into_iter().fold(counts.clone(), |mut acc, rank| {
        let slot = acc.entry(rank).or_insert(0);
        *slot = slot.saturating_add(1);
        acc
    })
}

#[cfg(test)]
mod tests {
    use farming_types::seeded_rank_counts;

    use super::*;

    #[test]
    fn grades_map_to_ranks() {
        assert_eq!(grade_to_rank(Some(2)), Some(Rank::B));
        assert_eq!(grade_to_rank(Some(3)), Some(Rank::A));
        assert_eq!(grade_to_rank(Some(4)), Some(Rank::S));
        assert_eq!(grade_to_rank(Some(5)), Some(Rank::SS));
    }

    #[test]
    fn unknown_grades_are_unmapped() {
        assert_eq!(grade_to_rank(Some(0)), None);
        assert_eq!(grade_to_rank(Some(1)), None);
        assert_eq!(grade_to_rank(Some(6)), None);
        assert_eq!(grade_to_rank(Some(300)), None);
        assert_eq!(grade_to_rank(Some(-2)), None);
        assert_eq!(grade_to_rank(None), None);
    }

    #[test]
    fn equipment_tiers_map_to_ranks() {
        assert_eq!(item_key_to_rank(Some("Equip_Chip_Atk_T1")), Some(Rank::B));
        assert_eq!(item_key_to_rank(Some("Equip_Chip_Def_T2")), Some(Rank::A));
        assert_eq!(item_key_to_rank(Some("Equip_System_Acc_T3")), Some(Rank::S));
        assert_eq!(item_key_to_rank(Some("Equip_Sub_Spine_T4")), Some(Rank::SS));
    }

    #[test]
    fn non_equipment_keys_are_unmapped() {
        assert_eq!(item_key_to_rank(Some("Consumable_RepairKit")), None);
        assert_eq!(item_key_to_rank(Some("Material_Core_T3")), None);
        assert_eq!(item_key_to_rank(Some("Equip_Chip_Atk_T5")), None);
        assert_eq!(item_key_to_rank(Some("Equip_Chip_Atk")), None);
        assert_eq!(item_key_to_rank(Some("Equip__T3")), None);
        assert_eq!(item_key_to_rank(Some("")), None);
        assert_eq!(item_key_to_rank(None), None);
    }

    #[test]
    fn tally_counts_without_touching_input() {
        let counts = seeded_rank_counts();
        let next = tally(&counts, [Rank::S, Rank::S, Rank::B]);
        assert_eq!(next.get(&Rank::S), Some(&2));
        assert_eq!(next.get(&Rank::B), Some(&1));
        assert_eq!(next.get(&Rank::SS), Some(&0));
        assert_eq!(counts.get(&Rank::S), Some(&0));
    }
}
