use std::path::PathBuf;

use anyhow::Context;
use tuna_events::{init_logging, run_demo, DispatcherConfig, BUILD_DATE, VERSION};

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::info!(version = VERSION, built = BUILD_DATE, "tuna-events demo");

    // Optional dispatcher config file (.json or .toml)
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => DispatcherConfig::load_from_file(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => DispatcherConfig::default(),
    };

    let report = run_demo(&config);
    for invocation in &report.invocations {
        tracing::info!(%invocation, "Listener invoked");
    }
    for (index, proceed) in report.results.iter().enumerate() {
        tracing::info!(click = index + 1, default_action = proceed, "Click dispatched");
    }

    Ok(())
}
