//! The flight executive: status word, priority arbiter, tick scheduler and
//! the mode dispatch superloop, collected into one [`Executive`] value that
//! owns every piece of process-wide state.

mod arbiter;
mod config;
mod dispatcher;
mod mode;
mod scheduler;
mod snapshot;
mod status_word;


pub use arbiter::{mode_select, systems_check, KEEP_ALIVE};
pub use config::ExecConfig;
pub use dispatcher::Dispatcher;
pub use mode::Mode;
pub use scheduler::{CurrentTask, PreemptionGate, Scheduler, TickCounter};
pub use snapshot::{JsonSnapshot, SnapshotRecord, SnapshotStore};
pub use status_word::{ModeRequests, StatusFlag, StatusWord};

use crate::tasks::TaskTable;
use crate::{info, warn};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Aggregate of the executive's shared state: the status word, the published
/// current task, the preemption gate and the shutdown token, plus the reboot
/// counter and the snapshot store behind it. Constructed once in `main` and
/// consumed by [`Executive::run`]; the tick task receives only the narrow
/// handles it needs.
pub struct Executive {
    table: &'static TaskTable,
    flags: Arc<StatusWord>,
    curr: Arc<CurrentTask>,
    gate: Arc<PreemptionGate>,
    shutdown: CancellationToken,
    ticks: Arc<TickCounter>,
    config: ExecConfig,
    store: Box<dyn SnapshotStore>,
    reboot_count: u32,
}

impl Executive {
    pub fn new(table: &'static TaskTable, config: ExecConfig, store: Box<dyn SnapshotStore>) -> Self {
        table.verify();
        Self {
            table,
            flags: Arc::new(StatusWord::new()),
            curr: Arc::new(CurrentTask::new(table.first().mode())),
            gate: Arc::new(PreemptionGate::new()),
            shutdown: CancellationToken::new(),
            ticks: Arc::new(TickCounter::new()),
            config,
            store,
            reboot_count: 0,
        }
    }

    /// Marks the first-boot sequence as already completed, skipping the
    /// release wait. Test harness hook, applied before [`Executive::startup`].
    pub fn preset_start(&self) { self.flags.set_flag(StatusFlag::Start); }

    pub fn flags(&self) -> Arc<StatusWord> { Arc::clone(&self.flags) }

    pub fn reboot_count(&self) -> u32 { self.reboot_count }

    /// Initial startup mode. Cold boots sit out the release wait before
    /// latching [`StatusFlag::Start`]; warm boots restore the persisted
    /// record instead. Either way the reboot counter advances and the record
    /// is saved back.
    pub async fn startup(&mut self) {
        if !self.flags.flag(StatusFlag::Start) {
            info!("First startup detected");
            info!("Starting {}s release wait...", self.config.release_wait.as_secs());
            tokio::time::sleep(self.config.release_wait).await;
            // Latched only after the wait survives, so a failure during the
            // wait state retries the cold path on the next boot.
            self.flags.set_flag(StatusFlag::Start);
        } else if let Some(record) = self.store.restore() {
            info!("Loading backups (reboot {})", record.reboot_count);
            self.flags.restore_status(record.status_bits);
            self.reboot_count = record.reboot_count;
        } else {
            warn!("Warm boot without snapshot record, continuing with defaults.");
        }
        self.reboot_count += 1;
        self.store.save(&SnapshotRecord {
            status_bits: self.flags.status_bits(),
            reboot_count: self.reboot_count,
        });
    }

    /// Runs the executive to completion: one initial arbitration, then the
    /// tick task and the superloop side by side. Returns only when the test
    /// tick budget expires; in flight it never does.
    pub async fn run(self, tick_budget: Option<u64>) {
        info!("start");
        systems_check(self.table, &ModeRequests::new(Arc::clone(&self.flags)));
        self.curr.store(self.table.first().mode());
        if tick_budget == Some(0) {
            self.shutdown.cancel();
        }

        let scheduler = Scheduler::new(
            self.table,
            ModeRequests::new(Arc::clone(&self.flags)),
            Arc::clone(&self.curr),
            Arc::clone(&self.gate),
            self.shutdown.clone(),
            Arc::clone(&self.ticks),
            self.config.tick_period,
            tick_budget,
        );
        tokio::spawn(scheduler.run());

        Dispatcher::new(
            self.table,
            Arc::clone(&self.flags),
            Arc::clone(&self.curr),
            Arc::clone(&self.gate),
            self.shutdown.clone(),
            Arc::clone(&self.ticks),
        )
        .run()
        .await;
    }
}
