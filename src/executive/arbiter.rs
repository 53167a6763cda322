use super::mode::Mode;
use super::status_word::{ModeRequests, StatusWord};
use crate::tasks::TaskTable;

/// Fallback mode when nothing is due. Error correction is cheap and always
/// safe to run, so it doubles as the keep-alive.
pub const KEEP_ALIVE: Mode = Mode::Ecc;

/// The priority arbiter. Polls every mode's sense procedure in priority
/// order, latches a request bit for each positive answer, and returns the
/// highest-priority pending mode.
///
/// Pending-but-not-selected modes keep their bits and are reconsidered on the
/// next tick. If nothing at all is pending after sensing, the [`KEEP_ALIVE`]
/// request is latched and returned instead. `status_bits` is never touched.
pub fn systems_check(table: &TaskTable, requests: &ModeRequests) -> Mode {
    for entry in table.entries() {
        if entry.sense() {
            requests.request(entry.mode());
        }
    }
    match highest_pending(requests.pending()) {
        Some(mode) => mode,
        None => {
            requests.request(KEEP_ALIVE);
            KEEP_ALIVE
        }
    }
}

/// Mode selection for the dispatcher: reads the pending word only, no
/// sensing. Falls back to [`KEEP_ALIVE`] without latching a bit when the word
/// is empty (possible between a completed run and the next tick).
pub fn mode_select(word: &StatusWord) -> Mode {
    highest_pending(word.pending_modes()).unwrap_or(KEEP_ALIVE)
}

fn highest_pending(bits: u16) -> Option<Mode> {
    Mode::PRIORITY.into_iter().find(|mode| bits & mode.bit() != 0)
}
