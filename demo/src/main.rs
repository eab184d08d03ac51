//! hold demo: global mouse presses in, long-press/tick lines out.
//!
//! Options come from the environment: `HOLD_THRESHOLD_MS`,
//! `HOLD_INTERVAL_MS`, `HOLD_CONTINUOUS=1`.

use hold_core::{ClosureSink, PressConfig, PressDriver};
use hold_platform::start_mouse_hook;
use tracing::info;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hold_demo=info,hold_core=debug,hold_platform=info".into()),
        )
        .try_init();
}

fn config_from_env() -> PressConfig {
    let mut config = PressConfig::for_mouse();
    if let Some(ms) = env_u64("HOLD_THRESHOLD_MS") {
        config.hold_threshold_ms = ms;
    }
    if let Some(ms) = env_u64("HOLD_INTERVAL_MS") {
        config.interval_ms = ms;
    }
    config.continuous = std::env::var("HOLD_CONTINUOUS").map_or(false, |v| v == "1");
    config
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

fn main() {
    init_logging();

    let config = config_from_env();
    info!(?config, "starting press driver");

    let sink = ClosureSink::new(
        |event| println!("long press: {:?}", event),
        || println!("tick"),
    );
    let driver = PressDriver::spawn(config, sink).expect("invalid press configuration");
    let hook = start_mouse_hook(driver.notifier());

    println!("watching mouse presses; press Enter to exit");
    let mut line = String::new();
    let _ = std::io::stdin().read_line(&mut line);

    hook.stop();
    driver.shutdown();
}
