//! # tuna-events
//!
//! Synchronous event dispatch for embedding into host objects:
//! - Named events delivered to listeners in registration order
//! - Cancelable default actions (`prevent_default`)
//! - Bubbling through a chain of propagation parents
//! - `stop_propagation` / `stop_immediate_propagation` control
//!
//! ## Architecture
//!
//! 1. **tuna-events-core** - Event, EventTarget capability, EventDispatcher, config
//! 2. **tuna-events** - Facade re-exports, logging setup and the demo binary

pub mod widgets;

pub use tuna_events_core::{
    config, dispatcher, error, event, listener, target, types, shared, ConfigError,
    DispatchArg, DispatcherConfig, DispatcherId, Error, Event, EventDispatcher, EventTarget,
    IterationPolicy, Listener, ListenerFn, ListenerPanicPolicy, Result, Shared,
};

pub use widgets::{run_demo, ClickData, DemoReport, Widget};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
