use super::base_task::{TaskEntry, TaskTable};
use super::FLIGHT_TABLE;
use crate::executive::Mode;
use std::{
    future::Future,
    pin::Pin,
    sync::atomic::{AtomicUsize, Ordering},
};

#[test]
fn flight_table_rows_match_their_slots() {
    FLIGHT_TABLE.verify();
    for (rank, mode) in Mode::PRIORITY.into_iter().enumerate() {
        let entry = FLIGHT_TABLE.lookup(mode);
        assert_eq!(entry.mode(), mode);
        assert_eq!(entry.mode().index(), rank);
    }
    assert_eq!(FLIGHT_TABLE.first().mode(), Mode::Charging);
}

#[test]
fn flight_senses_answer() {
    // Sense procedures are defined to always return a boolean, never hang.
    for entry in FLIGHT_TABLE.entries() {
        let _ = entry.sense();
    }
}

static SENSED: AtomicUsize = AtomicUsize::new(0);
static CONFIGURED: AtomicUsize = AtomicUsize::new(0);
static RAN: AtomicUsize = AtomicUsize::new(0);
static CLEANED: AtomicUsize = AtomicUsize::new(0);

fn probe_sense() -> bool {
    SENSED.fetch_add(1, Ordering::SeqCst);
    true
}
fn probe_configure() { CONFIGURED.fetch_add(1, Ordering::SeqCst); }
fn probe_run() -> Pin<Box<dyn Future<Output = ()> + Send>> {
    Box::pin(async {
        RAN.fetch_add(1, Ordering::SeqCst);
    })
}
fn probe_clean() { CLEANED.fetch_add(1, Ordering::SeqCst); }

#[tokio::test]
async fn entry_dispatches_to_each_procedure() {
    let entry = TaskEntry::new(Mode::Mrw, probe_sense, probe_configure, probe_run, probe_clean);
    assert!(entry.sense());
    entry.configure();
    entry.configure();
    entry.run().await;
    entry.clean();
    assert_eq!(SENSED.load(Ordering::SeqCst), 1);
    // Configure is idempotent preparation; calling it twice is legal.
    assert_eq!(CONFIGURED.load(Ordering::SeqCst), 2);
    assert_eq!(RAN.load(Ordering::SeqCst), 1);
    assert_eq!(CLEANED.load(Ordering::SeqCst), 1);
}

fn never() -> bool { false }
fn noop() {}
fn idle_run() -> Pin<Box<dyn Future<Output = ()> + Send>> { Box::pin(async {}) }

fn idle(mode: Mode) -> TaskEntry { TaskEntry::new(mode, never, noop, idle_run, noop) }

#[test]
#[should_panic(expected = "Corrupt task table")]
fn swapped_rows_are_fatal() {
    let table = TaskTable::new([
        idle(Mode::Detumble),
        idle(Mode::Charging),
        idle(Mode::Comms),
        idle(Mode::Hdd),
        idle(Mode::Mrw),
        idle(Mode::Ecc),
    ]);
    table.verify();
}
