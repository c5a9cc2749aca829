//! Chest simulation CLI.
//!
//! Runs the demo scenario against a chest and logs what the network sees.
//!
//! # Usage
//!
//! ```bash
//! chest-sim [slots]
//! ```
//!
//! # Example
//!
//! ```bash
//! RUST_LOG=slotlink_port=debug chest-sim 27
//! ```

use example::{ChestSim, demo_script};
use slotlink_core::PortConfig;
use slotlink_core::telemetry::{TracingConfig, TracingFormat, init_tracing};

fn main() {
    let mut telemetry = TracingConfig::new().with_format(TracingFormat::Compact);
    if let Ok(filter) = std::env::var("RUST_LOG") {
        telemetry = telemetry.with_env_filter(filter);
    }
    init_tracing(&telemetry);

    let slots = match std::env::args().nth(1).map(|arg| arg.parse::<usize>()) {
        None => 9,
        Some(Ok(slots)) => slots,
        Some(Err(error)) => {
            tracing::error!(%error, "usage: chest-sim [slots]");
            std::process::exit(1);
        }
    };

    let config = PortConfig::new().with_tick_interval(2, 20);
    let mut sim = match ChestSim::new(&config, slots, 64) {
        Ok(sim) => sim,
        Err(error) => {
            tracing::error!(%error, "invalid port config");
            std::process::exit(1);
        }
    };

    sim.run(&demo_script());

    for stack in sim.network_view().iter() {
        tracing::info!(item = %stack.key(), amount = stack.amount(), "network view");
    }
    tracing::info!(
        in_sync = sim.network_view() == sim.live_view(),
        interval = ?sim.interval(),
        stats = ?sim.stats(),
        "simulation finished"
    );
}
