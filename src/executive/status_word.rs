use super::mode::Mode;
use std::sync::{
    atomic::{AtomicU16, Ordering},
    Arc,
};

/// Persistent mission flags held in `status_bits`.
///
/// Only [`StatusFlag::Start`] is in use; the word leaves room for future
/// mission flags next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFlag {
    /// First-boot sequence completed; every later boot takes the warm path.
    Start,
}

impl StatusFlag {
    fn bit(self) -> u16 {
        match self {
            StatusFlag::Start => 1,
        }
    }
}

/// The two-field status word shared between the dispatcher and the tick task.
///
/// `status_bits` carries mission flags, `mode_bits` carries one
/// requested/pending bit per [`Mode`]. All accesses are single-word atomic
/// read-modify-writes, so the tick task may interleave at any point without
/// tearing a half-written word. Re-setting a set bit and re-clearing a clear
/// bit are no-ops.
#[derive(Debug, Default)]
pub struct StatusWord {
    status_bits: AtomicU16,
    mode_bits: AtomicU16,
}

impl StatusWord {
    pub fn new() -> Self { Self::default() }

    pub fn set_flag(&self, flag: StatusFlag) {
        self.status_bits.fetch_or(flag.bit(), Ordering::SeqCst);
    }

    pub fn clear_flag(&self, flag: StatusFlag) {
        self.status_bits.fetch_and(!flag.bit(), Ordering::SeqCst);
    }

    pub fn flag(&self, flag: StatusFlag) -> bool {
        self.status_bits.load(Ordering::SeqCst) & flag.bit() != 0
    }

    /// Latches the pending bit for `mode`.
    pub fn request_mode(&self, mode: Mode) {
        self.mode_bits.fetch_or(mode.bit(), Ordering::SeqCst);
    }

    /// Clears the pending bit for `mode`. Only the dispatcher calls this,
    /// directly after the mode's run returned normally.
    pub fn clear_mode(&self, mode: Mode) {
        self.mode_bits.fetch_and(!mode.bit(), Ordering::SeqCst);
    }

    pub fn mode_requested(&self, mode: Mode) -> bool {
        self.pending_modes() & mode.bit() != 0
    }

    /// Snapshot of the whole pending-mode word.
    pub fn pending_modes(&self) -> u16 { self.mode_bits.load(Ordering::SeqCst) }

    /// Snapshot of the mission-flag word, as persisted across boots.
    pub fn status_bits(&self) -> u16 { self.status_bits.load(Ordering::SeqCst) }

    /// Merges persisted mission flags back in after a warm boot.
    pub fn restore_status(&self, bits: u16) {
        self.status_bits.fetch_or(bits, Ordering::SeqCst);
    }
}

/// Narrow capability handed to the tick path: it may latch and observe mode
/// requests but can never clear one. The full [`StatusWord`] stays with the
/// dispatcher.
#[derive(Clone)]
pub struct ModeRequests(Arc<StatusWord>);

impl ModeRequests {
    pub fn new(word: Arc<StatusWord>) -> Self { Self(word) }

    pub fn request(&self, mode: Mode) { self.0.request_mode(mode); }

    pub fn pending(&self) -> u16 { self.0.pending_modes() }
}
