use crate::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The persisted slice of executive state. The contract is only that a saved
/// record restores bit-for-bit; the storage medium behind the trait is
/// external (flash on hardware, a JSON file on the virtual Intellisat).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotRecord {
    pub status_bits: u16,
    pub reboot_count: u32,
}

pub trait SnapshotStore: Send {
    /// Loads the last saved record, if any survives.
    fn restore(&self) -> Option<SnapshotRecord>;

    /// Persists `record`. Failures are logged and swallowed; the executive
    /// keeps flying on stale state rather than aborting.
    fn save(&self, record: &SnapshotRecord);
}

/// File-backed store writing the record as pretty JSON.
pub struct JsonSnapshot {
    path: PathBuf,
}

impl JsonSnapshot {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl SnapshotStore for JsonSnapshot {
    fn restore(&self) -> Option<SnapshotRecord> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Discarding unreadable snapshot {:?}: {e}.", self.path);
                None
            }
        }
    }

    fn save(&self, record: &SnapshotRecord) {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .is_err()
                .then(|| warn!("Failed creating snapshot directory {parent:?}."));
        }
        match serde_json::to_string_pretty(record) {
            Ok(json) => {
                fs::write(&self.path, json)
                    .is_err()
                    .then(|| warn!("Failed writing snapshot to {:?}.", self.path));
            }
            Err(e) => warn!("Failed encoding snapshot: {e}."),
        }
    }
}
