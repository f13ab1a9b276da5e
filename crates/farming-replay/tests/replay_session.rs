//! Replays a recorded two-lap session and checks the report.

#![allow(clippy::unwrap_used)]

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use farming_replay::{Replayer, ReplayError};
use farming_types::{Rank, Resources};

fn fixture() -> BufReader<File> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("session.jsonl");
    BufReader::new(File::open(path).unwrap())
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn two_lap_session_report() {
    let mut replayer = Replayer::new();
    let applied = replayer.replay(fixture()).unwrap();
    assert_eq!(applied, 7);

    let report = replayer.report(true);
    let stats = &report.stats;

    assert_eq!(stats.lap_count, 2);
    assert_eq!(stats.latest_enter_stage_key.as_deref(), Some("Ev3_Stage_8_4"));
    assert_eq!(stats.latest_enter_squad, Some(1));
    assert_close(stats.total_waiting_time, 10.0);
    // 40 + 30 + 5 in the first lap; the second lap's first wave measures
    // from the previous wave boundary (50) and then 5 until leaving.
    assert_close(stats.total_round_time, 130.0);
    assert_eq!(
        stats.current_squad_costs,
        Some(Resources::new(10.0, 8.0, 6.0))
    );
    assert_eq!(
        stats.latest_resources,
        Some(Resources::new(990.0, 792.0, 594.0))
    );

    assert_eq!(stats.drops.units.get(&Rank::B), Some(&1));
    assert_eq!(stats.drops.units.get(&Rank::A), Some(&0));
    assert_eq!(stats.drops.units.get(&Rank::S), Some(&1));
    assert_eq!(stats.drops.units.get(&Rank::SS), Some(&1));
    assert_eq!(stats.drops.equipments.get(&Rank::S), Some(&1));
    assert_eq!(stats.drops.total_equipments(), 1);

    let summary = report.summary.unwrap();
    assert_close(summary.elapsed_seconds, 125.0);
    assert_close(summary.average_round_seconds.unwrap(), 65.0);
    assert_close(summary.average_waiting_seconds.unwrap(), 5.0);
    assert_eq!(summary.total_unit_drops, 3);
}

#[test]
fn report_serializes_for_display_layer() {
    let mut replayer = Replayer::new();
    replayer.replay(fixture()).unwrap();

    let json = serde_json::to_value(replayer.report(false)).unwrap();
    assert_eq!(json["events"], 7);
    assert_eq!(json["stats"]["lapCount"], 2);
    assert_eq!(json["stats"]["drops"]["units"]["SS"], 1);
    assert!(json.get("summary").is_none());
}

#[test]
fn switching_stage_mid_recording_resets() {
    let mut replayer = Replayer::new();
    replayer.replay(fixture()).unwrap();

    let next = r#"{"at":"2024-05-01T12:03:00Z","kind":"enter","req":{"StageKeyString":"Ev3_Stage_9_1","SelectedSquadNo":1},"res":{"CurrencyInfo":{"Metal":970,"Nutrient":780,"Power":580}}}"#;
    replayer.replay(next.as_bytes()).unwrap();

    let stats = replayer.report(false).stats;
    assert_eq!(stats.lap_count, 0);
    assert_close(stats.total_round_time, 0.0);
    assert_close(stats.total_waiting_time, 0.0);
    assert_eq!(stats.drops.total_units(), 0);
    assert!(stats.current_squad_costs.is_none());
    assert_eq!(
        stats.latest_resources,
        Some(Resources::new(970.0, 780.0, 580.0))
    );
}

#[test]
fn odd_reward_entries_do_not_drop_the_wave() {
    let mut replayer = Replayer::new();
    let lines = [
        r#"{"at":"2024-05-01T12:00:00Z","kind":"enter","req":{"StageKeyString":"Ev3_Stage_8_4","SelectedSquadNo":1},"res":{"CurrencyInfo":{"Metal":1000,"Nutrient":800,"Power":600}}}"#,
        r#"{"at":"2024-05-01T12:00:30Z","kind":"wave_clear","res":{"ClearRewardInfo":{"PCRewardList":[{"Grade":4},{"Grade":300}],"ItemRewardList":[{},{"ItemKeyString":"Equip_Chip_Atk_T3"}]}}}"#,
    ]
    .join("\n");

    assert_eq!(replayer.replay(lines.as_bytes()).unwrap(), 2);

    let stats = replayer.report(false).stats;
    assert_eq!(stats.drops.units.get(&Rank::S), Some(&1));
    assert_eq!(stats.drops.total_units(), 1);
    assert_eq!(stats.drops.equipments.get(&Rank::S), Some(&1));
    assert_close(stats.total_round_time, 30.0);
}

#[test]
fn error_mentions_line() {
    let mut replayer = Replayer::new();
    let err = replayer
        .replay(r#"{"at":"yesterday","kind":"leave"}"#.as_bytes())
        .unwrap_err();
    assert!(matches!(err, ReplayError::Line { line: 1, .. }));
    assert!(err.to_string().starts_with("line 1:"));
}
