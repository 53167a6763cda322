mod executive;
mod logger;
mod tasks;

use executive::{ExecConfig, Executive, JsonSnapshot};

/// Virtual Intellisat harness arguments: `argv[1]` bounds the run to N ticks
/// (omitted or unparsable means unlimited, negative behaves like 0) and
/// `argv[2]` == `1` presets the start flag so the release wait is skipped.
fn harness_args() -> (Option<u64>, bool) {
    let args: Vec<String> = std::env::args().collect();
    let tick_budget = args
        .get(1)
        .and_then(|raw| raw.parse::<i64>().ok())
        .map(|n| u64::try_from(n).unwrap_or(0));
    let preset_start = args.get(2).and_then(|raw| raw.parse::<i64>().ok()) == Some(1);
    (tick_budget, preset_start)
}

#[tokio::main]
async fn main() {
    let (tick_budget, preset_start) = harness_args();
    match tick_budget {
        Some(n) => info!("Inputted handler count: {n}"),
        None => info!("Unlimited tick run"),
    }

    let config = ExecConfig::from_env();
    let store = JsonSnapshot::new(&config.snapshot_path);
    let mut exec = Executive::new(&tasks::FLIGHT_TABLE, config, Box::new(store));
    if preset_start {
        exec.preset_start();
    }

    exec.startup().await;
    exec.run(tick_budget).await;
}
