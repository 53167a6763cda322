use crate::executive::Mode;
use crate::fatal;
use std::{future::Future, pin::Pin};

/// Sense procedure: should this mode run now?
pub type SenseFn = fn() -> bool;
/// Idempotent preparation step executed before each activation.
pub type ConfigureFn = fn();
/// The mode body. May sleep for a bounded period of simulated work; the
/// dispatcher drops the future when the tick task preempts it.
pub type RunFn = fn() -> Pin<Box<dyn Future<Output = ()> + Send>>;
/// Post-run release hook, also invoked on the preemption path.
pub type CleanFn = fn();

/// One task table row: a mode id and its `(sense, configure, run, clean)`
/// quadruple. None of the four procedures mutate the table.
pub struct TaskEntry {
    mode: Mode,
    sense: SenseFn,
    configure: ConfigureFn,
    run: RunFn,
    clean: CleanFn,
}

impl TaskEntry {
    pub const fn new(
        mode: Mode,
        sense: SenseFn,
        configure: ConfigureFn,
        run: RunFn,
        clean: CleanFn,
    ) -> Self {
        Self { mode, sense, configure, run, clean }
    }

    pub fn mode(&self) -> Mode { self.mode }

    pub fn sense(&self) -> bool { (self.sense)() }

    pub fn configure(&self) { (self.configure)() }

    pub fn run(&self) -> Pin<Box<dyn Future<Output = ()> + Send>> { (self.run)() }

    pub fn clean(&self) { (self.clean)() }
}

/// The static mode catalogue, one entry per [`Mode`] in priority order.
/// Built once at program start and immutable afterwards.
pub struct TaskTable {
    entries: [TaskEntry; Mode::COUNT],
}

impl TaskTable {
    pub const fn new(entries: [TaskEntry; Mode::COUNT]) -> Self { Self { entries } }

    /// O(1) row lookup by mode id.
    ///
    /// # Panics
    /// A row whose id does not match its slot means the table is corrupt;
    /// that is a programming error and aborts immediately.
    pub fn lookup(&self, mode: Mode) -> &TaskEntry {
        let entry = &self.entries[mode.index()];
        if entry.mode != mode {
            fatal!("Corrupt task table: slot {} holds {}!", mode.index(), entry.mode);
        }
        entry
    }

    /// The highest-priority entry, used to seed the current-task slot.
    pub fn first(&self) -> &TaskEntry { &self.entries[0] }

    pub fn entries(&self) -> &[TaskEntry] { &self.entries }

    /// Checks the `lookup(id).id == id` invariant over the whole table.
    pub fn verify(&self) {
        for mode in Mode::PRIORITY {
            self.lookup(mode);
        }
    }
}
