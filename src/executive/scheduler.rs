use super::arbiter::systems_check;
use super::mode::Mode;
use super::status_word::ModeRequests;
use crate::event;
use crate::tasks::TaskTable;
use std::sync::{
    atomic::{AtomicU64, AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Single-word slot publishing the mode the dispatcher is currently carrying.
/// Written by the dispatcher once per iteration, read by the tick task to
/// decide whether preemption is warranted. The tick task never writes it.
pub struct CurrentTask {
    id: AtomicUsize,
}

impl CurrentTask {
    pub fn new(mode: Mode) -> Self {
        Self { id: AtomicUsize::new(mode.index()) }
    }

    pub fn store(&self, mode: Mode) { self.id.store(mode.index(), Ordering::SeqCst); }

    pub fn get(&self) -> Mode { Mode::from_index(self.id.load(Ordering::SeqCst)) }
}

/// Hands one fresh [`CancellationToken`] to each superloop iteration and lets
/// the tick task cancel whichever one is armed. Cancelling abandons the
/// running task's future mid-flight and control re-enters mode selection.
pub struct PreemptionGate {
    armed: Mutex<CancellationToken>,
}

impl Default for PreemptionGate {
    fn default() -> Self { Self::new() }
}

impl PreemptionGate {
    pub fn new() -> Self {
        Self { armed: Mutex::new(CancellationToken::new()) }
    }

    /// Swaps in a fresh token for the coming iteration and returns it.
    /// A previously fired token stays cancelled, so re-arming is mandatory
    /// before every run.
    pub fn arm(&self) -> CancellationToken {
        let fresh = CancellationToken::new();
        let mut armed = self.armed.lock().expect("[FATAL] Preemption gate poisoned!");
        *armed = fresh.clone();
        fresh
    }

    /// Cancels the armed token, unwinding the current run.
    pub fn fire(&self) {
        self.armed.lock().expect("[FATAL] Preemption gate poisoned!").cancel();
    }
}

/// Monotonic count of delivered ticks, shared for trace output.
#[derive(Default)]
pub struct TickCounter(AtomicU64);

impl TickCounter {
    pub fn new() -> Self { Self::default() }

    pub fn elapsed(&self) -> u64 { self.0.load(Ordering::SeqCst) }

    fn advance(&self) -> u64 { self.0.fetch_add(1, Ordering::SeqCst) + 1 }
}

/// The systick task, the hosted stand-in for the timer interrupt. Every tick
/// it re-runs the arbiter and, when the selection disagrees with the
/// published current task, fires the preemption gate. It owns only the narrow
/// handles the tick path needs: request latching, current-task reads, and the
/// gate.
pub struct Scheduler {
    table: &'static TaskTable,
    requests: ModeRequests,
    curr: Arc<CurrentTask>,
    gate: Arc<PreemptionGate>,
    shutdown: CancellationToken,
    ticks: Arc<TickCounter>,
    period: Duration,
    budget: Option<u64>,
}

impl Scheduler {
    /// Default systick period, 10 000 us.
    pub const SYSTICK_DUR: Duration = Duration::from_micros(10_000);

    #[allow(clippy::too_many_arguments)]
    pub fn new(
        table: &'static TaskTable,
        requests: ModeRequests,
        curr: Arc<CurrentTask>,
        gate: Arc<PreemptionGate>,
        shutdown: CancellationToken,
        ticks: Arc<TickCounter>,
        period: Duration,
        budget: Option<u64>,
    ) -> Self {
        Self { table, requests, curr, gate, shutdown, ticks, period, budget }
    }

    /// Runs the tick loop until shutdown. With a tick budget (test harness
    /// only), exhausting it cancels the executive-wide shutdown token; the
    /// dispatcher then exits at the end of its current iteration.
    pub async fn run(self) {
        let mut systick = interval_at(Instant::now() + self.period, self.period);
        systick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            systick.tick().await;
            if self.shutdown.is_cancelled() {
                return;
            }
            self.on_tick();
            let elapsed = self.ticks.advance();
            if self.budget.is_some_and(|max| elapsed >= max) {
                event!("Tick budget exhausted after {elapsed} ticks");
                self.shutdown.cancel();
                return;
            }
        }
    }

    /// One tick: arbitrate, then preempt iff the decision moved away from the
    /// running task. The current-task slot itself is never mutated here, so a
    /// survived tick leaves the dispatcher exactly where it was.
    fn on_tick(&self) {
        let next = systems_check(self.table, &self.requests);
        if next != self.curr.get() {
            event!("Tick arbitration: {next} preempts {}", self.curr.get());
            self.gate.fire();
        }
    }
}
