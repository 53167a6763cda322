use crate::fatal;
use strum_macros::Display;

/// Operational mode of the spacecraft. The declaration order is the arbiter's
/// priority ladder, highest first; each variant doubles as the bit index of
/// its pending-request bit in the status word.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Charging,
    Detumble,
    Comms,
    Hdd,
    Mrw,
    Ecc,
}

impl Mode {
    pub const COUNT: usize = 6;

    /// All modes in priority order. This is also the task table layout.
    pub const PRIORITY: [Mode; Self::COUNT] = [
        Mode::Charging,
        Mode::Detumble,
        Mode::Comms,
        Mode::Hdd,
        Mode::Mrw,
        Mode::Ecc,
    ];

    /// Numeric mode id, equal to the priority rank and the request bit index.
    pub fn index(self) -> usize {
        match self {
            Mode::Charging => 0,
            Mode::Detumble => 1,
            Mode::Comms => 2,
            Mode::Hdd => 3,
            Mode::Mrw => 4,
            Mode::Ecc => 5,
        }
    }

    /// Single-bit mask of this mode's request bit.
    pub fn bit(self) -> u16 { 1 << self.index() }

    /// Inverse of [`Mode::index`].
    ///
    /// # Panics
    /// An out-of-range id is a corrupt caller and aborts immediately.
    pub fn from_index(index: usize) -> Self {
        *Self::PRIORITY
            .get(index)
            .unwrap_or_else(|| fatal!("Invalid mode id {index}!"))
    }
}
