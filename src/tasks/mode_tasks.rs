use super::base_task::{TaskEntry, TaskTable};
use crate::executive::Mode;
use crate::{event, info, log};
use rand::Rng;
use std::{future::Future, pin::Pin, time::Duration};

/// The flight task table. Sense and run bodies are the simulated stand-ins
/// used on the virtual Intellisat; hardware drivers replace them one row at a
/// time during integration.
pub static FLIGHT_TABLE: TaskTable = TaskTable::new([
    TaskEntry::new(Mode::Charging, battery_due, config_charging, run_charging, clean_charging),
    TaskEntry::new(Mode::Detumble, detumble_due, config_detumble, run_detumble, clean_detumble),
    TaskEntry::new(Mode::Comms, comms_due, config_comms, run_comms, clean_comms),
    TaskEntry::new(Mode::Hdd, hdd_due, config_hdd, run_hdd, clean_hdd),
    TaskEntry::new(Mode::Mrw, mrw_due, config_mrw, run_mrw, clean_mrw),
    TaskEntry::new(Mode::Ecc, ecc_due, config_ecc, run_ecc, clean_ecc),
]);

/* Sense procedures */

// Battery polls rarely; the keep-alive default covers the quiet ticks.
fn battery_due() -> bool { rand::rng().random_range(0..101) == 0 }
fn detumble_due() -> bool { rand::rng().random_range(0..4) == 0 }
fn comms_due() -> bool { rand::rng().random_range(0..4) == 0 }
fn hdd_due() -> bool { rand::rng().random_range(0..4) == 0 }
fn mrw_due() -> bool { rand::rng().random_range(0..4) == 0 }
fn ecc_due() -> bool { rand::rng().random_range(0..4) == 0 }

/* Configure procedures */

fn config_charging() { info!("Configuring {}", Mode::Charging); }
fn config_detumble() {}
fn config_comms() {}
fn config_hdd() {}
fn config_mrw() {}
fn config_ecc() {}

/* Run procedures */

/// Bounded simulated work, 10 ms to 1.01 s per activation.
async fn simulated_work(mode: Mode) {
    info!("Run '{mode}'");
    let work = Duration::from_millis(rand::rng().random_range(0..11) * 100 + 10);
    tokio::time::sleep(work).await;
}

fn run_charging() -> Pin<Box<dyn Future<Output = ()> + Send>> {
    Box::pin(simulated_work(Mode::Charging))
}
fn run_detumble() -> Pin<Box<dyn Future<Output = ()> + Send>> {
    Box::pin(simulated_work(Mode::Detumble))
}
fn run_comms() -> Pin<Box<dyn Future<Output = ()> + Send>> {
    Box::pin(simulated_work(Mode::Comms))
}
fn run_hdd() -> Pin<Box<dyn Future<Output = ()> + Send>> {
    Box::pin(simulated_work(Mode::Hdd))
}
fn run_mrw() -> Pin<Box<dyn Future<Output = ()> + Send>> {
    Box::pin(simulated_work(Mode::Mrw))
}
fn run_ecc() -> Pin<Box<dyn Future<Output = ()> + Send>> {
    Box::pin(simulated_work(Mode::Ecc))
}

/* Clean procedures */

fn release(mode: Mode) {
    log!("Cleanup ID: {}", mode.index());
    event!("Released resources held by {mode}");
}

fn clean_charging() { release(Mode::Charging); }
fn clean_detumble() { release(Mode::Detumble); }
fn clean_comms() { release(Mode::Comms); }
fn clean_hdd() { release(Mode::Hdd); }
fn clean_mrw() { release(Mode::Mrw); }
fn clean_ecc() { release(Mode::Ecc); }
