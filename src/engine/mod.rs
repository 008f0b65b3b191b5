//! The synchronization and monitoring engine.

pub mod monitor;
pub mod scheduler;
pub mod store;
pub mod synchronizer;

pub use monitor::{MonitorPhase, ProbeOutcome, RefreshOutcome, monitor_phase, probe, refresh};
pub use scheduler::{SchedulerSettings, run_once, run_sport};
pub use store::{GameStateStore, SportState, StatePatch};
pub use synchronizer::{SyncOutcome, select_last_game, select_next_game, sync_sport};
