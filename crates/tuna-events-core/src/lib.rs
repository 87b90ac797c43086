//! # tuna-events core
//!
//! Event objects, listener registry and bubbling dispatcher.
//!
//! Objects publish named events to registered listeners. Listeners can cancel
//! the default action of an event and stop it from travelling further, either
//! after the current dispatcher (`stop_propagation`) or right away
//! (`stop_immediate_propagation`). Dispatchers may name a propagation parent,
//! to which bubbling events are forwarded once local listeners have run.
//!
//! Dispatch is synchronous and single-threaded. Listeners run in registration
//! order on the caller's stack and may re-enter the dispatcher.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tuna_events_core::{Event, EventDispatcher, Listener};
//!
//! let window = EventDispatcher::<()>::new();
//! let button = EventDispatcher::with_parent(&window);
//!
//! window.add_event_listener("click", Listener::new(|_, event, _| {
//!     event.prevent_default();
//! }));
//!
//! let click = Event::for_target(&button, "click", true);
//! assert!(!button.dispatch(&click, None));
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod listener;
pub mod target;
pub mod types;

pub use config::{DispatcherConfig, IterationPolicy, ListenerPanicPolicy};
pub use dispatcher::{DispatcherId, EventDispatcher};
pub use error::{ConfigError, Error, Result};
pub use event::Event;
pub use listener::{Listener, ListenerFn};
pub use target::{DispatchArg, EventTarget};
pub use types::{shared, Shared};
