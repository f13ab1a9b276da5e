//! Replay harness for the farming stats engine.
//!
//! Reads a JSON-lines recording of intercepted game traffic, feeds it through
//! a [`StatsEngine`](farming_stats::StatsEngine) on a recorded clock, and
//! reports the accumulated record.
//!
//! # Architecture
//!
//! ```text
//! recording.jsonl --> RecordedEvent --> payload decode --> StatsEngine --> Report (JSON)
//! ```

pub mod error;
pub mod logging;
pub mod replay;

pub use error::ReplayError;
pub use replay::{EventKind, RecordedEvent, Replayer, Report};
