//! Drives a [`StatsEngine`] from a JSON-lines recording.
//!
//! Each non-blank line is one intercepted event:
//!
//! ```text
//! {"at": "2024-05-01T12:00:00Z", "kind": "enter", "req": {...}, "res": {...}}
//! {"at": "2024-05-01T12:01:30Z", "kind": "wave_clear", "res": {...}}
//! {"at": "2024-05-01T12:03:10Z", "kind": "leave"}
//! ```
//!
//! The engine's clock is set to each line's `at` before the event is fed
//! in, so the report reproduces the timings of the recorded session.

use std::io::BufRead;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use farming_stats::{
    Clock, FarmingSummary, ManualClock, SharedStore, StatsEngine, StatsStore, store,
};
use farming_types::payload::{self, BattleserverEnterRequest, BattleserverEnterResponse};
use farming_types::{FarmingStats, WaveClearResponse};

use crate::error::ReplayError;

/// Kind of a recorded event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Stage entry: request carries stage and squad, response carries currency.
    Enter,
    /// Stage exit.
    Leave,
    /// Wave clear: response carries rewards.
    WaveClear,
}

impl EventKind {
    const fn name(self) -> &'static str {
        match self {
            Self::Enter => "enter",
            Self::Leave => "leave",
            Self::WaveClear => "wave_clear",
        }
    }
}

/// One line of a recording.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordedEvent {
    /// When the event was intercepted.
    pub at: DateTime<Utc>,
    /// What kind of event it was.
    pub kind: EventKind,
    /// Request body, if recorded.
    #[serde(default)]
    pub req: Option<serde_json::Value>,
    /// Response body, if recorded.
    #[serde(default)]
    pub res: Option<serde_json::Value>,
}

/// Final state of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Number of events replayed.
    pub events: u64,
    /// The accumulated record.
    pub stats: FarmingStats,
    /// Derived averages, if requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<FarmingSummary>,
}

/// Replays recorded events through a fresh engine.
#[derive(Debug)]
pub struct Replayer {
    engine: StatsEngine<ManualClock>,
    clock: ManualClock,
    store: SharedStore,
    events: u64,
}

impl Default for Replayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Replayer {
    /// Create a replayer over an empty store.
    pub fn new() -> Self {
        let clock = ManualClock::new(DateTime::<Utc>::UNIX_EPOCH);
        let store = StatsStore::shared();
        let engine = StatsEngine::new(store.clone(), clock.clone());
        Self {
            engine,
            clock,
            store,
            events: 0,
        }
    }

    /// Replay every line of `reader`. Returns the number of events applied.
    pub fn replay<R: BufRead>(&mut self, reader: R) -> Result<u64, ReplayError> {
        let start = self.events;
        for (index, line) in reader.lines().enumerate() {
            let line_no = index.saturating_add(1);
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let event: RecordedEvent = serde_json::from_str(&line)
                .map_err(|source| ReplayError::Line {
                    line: line_no,
                    source,
                })?;
            self.apply(event, line_no)?;
        }
        let applied = self.events.saturating_sub(start);
        info!(events = applied, "Replay finished");
        Ok(applied)
    }

    /// Feed one recorded event into the engine.
    ///
    /// `line` is only used to label errors.
    pub fn apply(&mut self, event: RecordedEvent, line: usize) -> Result<(), ReplayError> {
        let RecordedEvent { at, kind, req, res } = event;
        self.clock.set(at);
        debug!(line, kind = kind.name(), %at, "Replaying event");

        match kind {
            EventKind::Enter => {
                let req: BattleserverEnterRequest =
                    decode_required(req, line, kind, "req", "battleserver_enter request")?;
                let res: BattleserverEnterResponse =
                    decode_required(res, line, kind, "res", "battleserver_enter response")?;
                self.engine
                    .on_enter(&req.stage_key_string, req.selected_squad_no);
                self.engine.on_squad_cost_sample(&res.currency_info);
            }
            EventKind::Leave => self.engine.on_leave(),
            EventKind::WaveClear => {
                let res: WaveClearResponse =
                    decode_required(res, line, kind, "res", "wave_clear response")?;
                let rewards = &res.clear_reward_info;
                self.engine
                    .on_drops_sample(&rewards.pc_reward_list, &rewards.item_reward_list);
                self.engine.on_tick();
            }
        }

        self.events = self.events.saturating_add(1);
        Ok(())
    }

    /// Build a report of the current state.
    pub fn report(&self, include_summary: bool) -> Report {
        let stats = store::read(&self.store).get();
        let summary =
            include_summary.then(|| FarmingSummary::from_stats(&stats, self.clock.now()));
        Report {
            events: self.events,
            stats,
            summary,
        }
    }
}

fn decode_required<T: serde::de::DeserializeOwned>(
    value: Option<serde_json::Value>,
    line: usize,
    kind: EventKind,
    field: &'static str,
    payload_name: &'static str,
) -> Result<T, ReplayError> {
    let value = value.ok_or(ReplayError::MissingPayload {
        line,
        kind: kind.name(),
        field,
    })?;
    payload::decode(payload_name, value).map_err(|source| ReplayError::Payload { line, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_parses_snake_case() {
        let kind: Result<EventKind, _> = serde_json::from_str("\"wave_clear\"");
        assert_eq!(kind.ok(), Some(EventKind::WaveClear));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let mut replayer = Replayer::new();
        let applied = replayer.replay("\n   \n".as_bytes());
        assert_eq!(applied.ok(), Some(0));
    }

    #[test]
    fn enter_without_response_is_error() {
        let mut replayer = Replayer::new();
        let line = r#"{"at":"2024-05-01T12:00:00Z","kind":"enter","req":{"StageKeyString":"A","SelectedSquadNo":1}}"#;
        let err = replayer.replay(line.as_bytes()).err();
        assert!(matches!(
            err,
            Some(ReplayError::MissingPayload {
                line: 1,
                field: "res",
                ..
            })
        ));
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let mut replayer = Replayer::new();
        let input = "{\"at\":\"2024-05-01T12:00:00Z\",\"kind\":\"leave\"}\nnot json\n";
        let err = replayer.replay(input.as_bytes()).err();
        assert!(matches!(err, Some(ReplayError::Line { line: 2, .. })));
    }

    #[test]
    fn bad_payload_reports_line_number() {
        let mut replayer = Replayer::new();
        let line = r#"{"at":"2024-05-01T12:00:00Z","kind":"wave_clear","res":{"ClearRewardInfo":{"PCRewardList":[{"Grade":"S"}]}}}"#;
        let err = replayer.replay(line.as_bytes()).err();
        assert!(matches!(err, Some(ReplayError::Payload { line: 1, .. })));
    }
}
