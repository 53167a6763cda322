use super::arbiter::mode_select;
use super::scheduler::{CurrentTask, PreemptionGate, TickCounter};
use super::status_word::StatusWord;
use crate::tasks::TaskTable;
use crate::{event, info, log};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// The superloop. Selects the highest-priority pending task, publishes it,
/// arms the preemption gate, and races the task's run against the armed
/// token:
///
/// - run returned normally: exactly that task's pending bit is cleared;
/// - token fired: the run future is dropped where it stood, the task's
///   `clean()` hook releases whatever it held, and the bit stays pending for
///   reconsideration.
///
/// There is no terminal state in flight; the loop only exits when the
/// test-harness shutdown token fires.
pub struct Dispatcher {
    table: &'static TaskTable,
    flags: Arc<StatusWord>,
    curr: Arc<CurrentTask>,
    gate: Arc<PreemptionGate>,
    shutdown: CancellationToken,
    ticks: Arc<TickCounter>,
}

impl Dispatcher {
    pub fn new(
        table: &'static TaskTable,
        flags: Arc<StatusWord>,
        curr: Arc<CurrentTask>,
        gate: Arc<PreemptionGate>,
        shutdown: CancellationToken,
        ticks: Arc<TickCounter>,
    ) -> Self {
        Self { table, flags, curr, gate, shutdown, ticks }
    }

    pub async fn run(&self) {
        loop {
            if self.shutdown.is_cancelled() {
                info!("Terminating kernel");
                return;
            }
            println!();

            let entry = self.table.lookup(mode_select(&self.flags));
            // Publish before arming: a tick landing between the two cancels a
            // stale token and the fresh one survives until the next tick.
            self.curr.store(entry.mode());
            let c_tok = self.gate.arm();

            entry.configure();
            info!("ID: {}", entry.mode().index());

            tokio::select! {
                () = entry.run() => {
                    self.flags.clear_mode(entry.mode());
                    info!("Task {} is successful", entry.mode().index());
                }
                () = c_tok.cancelled() => {
                    entry.clean();
                    log!("Task {} preempted, left pending", entry.mode().index());
                }
            }

            event!("Systick handler count: {}", self.ticks.elapsed());
        }
    }
}
