use super::scheduler::Scheduler;
use crate::warn;
use std::path::PathBuf;
use std::time::Duration;

/// Tunables of the executive. Defaults match the virtual Intellisat; the
/// environment may override them for bench runs.
#[derive(Debug, Clone)]
pub struct ExecConfig {
    /// Systick period.
    pub tick_period: Duration,
    /// One-time wait after release from the host vehicle.
    pub release_wait: Duration,
    /// Where the snapshot record lives.
    pub snapshot_path: PathBuf,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            // TODO: flight release wait is 30 min, shortened for the virtual sat
            release_wait: Duration::from_secs(5),
            tick_period: Scheduler::SYSTICK_DUR,
            snapshot_path: PathBuf::from("./dumps/snapshot.json"),
        }
    }
}

impl ExecConfig {
    /// Defaults with `INTELLISAT_TICK_US`, `INTELLISAT_RELEASE_WAIT_S` and
    /// `INTELLISAT_SNAPSHOT` applied on top. Unparsable values are ignored
    /// with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var("INTELLISAT_TICK_US") {
            match raw.parse::<u64>() {
                Ok(us) if us > 0 => config.tick_period = Duration::from_micros(us),
                _ => warn!("Ignoring invalid INTELLISAT_TICK_US {raw:?}."),
            }
        }
        if let Ok(raw) = std::env::var("INTELLISAT_RELEASE_WAIT_S") {
            match raw.parse::<u64>() {
                Ok(secs) => config.release_wait = Duration::from_secs(secs),
                _ => warn!("Ignoring invalid INTELLISAT_RELEASE_WAIT_S {raw:?}."),
            }
        }
        if let Ok(path) = std::env::var("INTELLISAT_SNAPSHOT") {
            config.snapshot_path = PathBuf::from(path);
        }
        config
    }
}
