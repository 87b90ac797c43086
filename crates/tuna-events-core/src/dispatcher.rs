//! Event dispatcher implementation.
//!
//! Provides [`EventDispatcher`], the stock [`EventTarget`]: a per-type
//! listener registry plus the synchronous dispatch and bubbling protocol.
//!
//! ## Dispatch order
//!
//! ```text
//! dispatch(arg, data)
//!   ├─► resolve event (raw type ─► new non-bubbling event targeting self)
//!   ├─► no bucket for type ─► return !default_prevented
//!   ├─► walk bucket in registration order
//!   │       └─ after each listener: immediate stop? ─► break
//!   ├─► parent alive && bubbling && !propagation_stopped
//!   │       └─► parent.dispatch(same event, None)
//!   └─► return !default_prevented
//! ```
//!
//! No registry borrow is held while a listener runs, so listeners may
//! dispatch again, add or remove listeners and clear buckets.

use std::cell::RefCell;
use std::panic::AssertUnwindSafe;
use std::rc::{Rc, Weak};
use uuid::Uuid;

use crate::config::{DispatcherConfig, IterationPolicy, ListenerPanicPolicy};
use crate::event::Event;
use crate::listener::Listener;
use crate::target::{DispatchArg, EventTarget};
use crate::types::ListenerMap;

/// Unique identifier of a dispatcher, used in log output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DispatcherId(Uuid);

impl DispatcherId {
    /// Create a new unique dispatcher ID
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for DispatcherId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Dispatcher({})", &self.0.to_string()[..8])
    }
}

/// Listener registry with synchronous, bubbling dispatch
///
/// Dispatchers are always created behind an [`Rc`] so that events built from
/// a raw type can name the dispatcher as their target. The propagation parent
/// is held weakly; dropping the parent simply ends bubbling at this
/// dispatcher.
pub struct EventDispatcher<D = ()> {
    /// Identifier used in log output
    id: DispatcherId,
    /// Handle to this dispatcher, used as the target of raw-type events
    this: Weak<EventDispatcher<D>>,
    /// Registered listeners by event type
    listeners: RefCell<ListenerMap<D>>,
    /// Where bubbling events go after local listeners ran
    propagation_parent: Option<Weak<dyn EventTarget<D>>>,
    /// Configuration
    config: DispatcherConfig,
}

impl<D: 'static> EventDispatcher<D> {
    /// Create a dispatcher with no propagation parent
    pub fn new() -> Rc<Self> {
        Self::with_config(DispatcherConfig::default(), None)
    }

    /// Create a dispatcher that bubbles events to `parent`
    pub fn with_parent<P>(parent: &Rc<P>) -> Rc<Self>
    where
        P: EventTarget<D> + 'static,
    {
        let parent: Weak<P> = Rc::downgrade(parent);
        Self::with_parent_target(parent)
    }

    /// Create a dispatcher that bubbles events to an already type-erased parent
    pub fn with_parent_target(parent: Weak<dyn EventTarget<D>>) -> Rc<Self> {
        Self::with_config(DispatcherConfig::default(), Some(parent))
    }

    /// Create a dispatcher with custom configuration
    pub fn with_config(
        config: DispatcherConfig,
        propagation_parent: Option<Weak<dyn EventTarget<D>>>,
    ) -> Rc<Self> {
        let dispatcher = Rc::new_cyclic(|this| Self {
            id: DispatcherId::new(),
            this: this.clone(),
            listeners: RefCell::new(ListenerMap::new()),
            propagation_parent,
            config,
        });
        tracing::debug!(
            dispatcher = %dispatcher.id,
            has_parent = dispatcher.propagation_parent.is_some(),
            iteration = %dispatcher.config.iteration,
            panic_policy = %dispatcher.config.panic_policy,
            "Dispatcher created"
        );
        dispatcher
    }

    /// Notify listeners of an event
    ///
    /// `event` is either a raw type, for which a non-bubbling event targeting
    /// this dispatcher is built, or a prepared [`Event`] that is used as-is.
    /// Returns `false` if any listener, here or in a parent, prevented the
    /// default action.
    pub fn dispatch<'a>(&self, event: impl Into<DispatchArg<'a, D>>, data: Option<&D>) -> bool {
        match event.into() {
            DispatchArg::Event(event) => self.dispatch_event(event, data),
            DispatchArg::Type(event_type) => {
                let target: Weak<dyn EventTarget<D>> = self.this.clone();
                let event = Event::new(target, event_type, false);
                self.dispatch_event(&event, data)
            }
        }
    }

    fn dispatch_event(&self, event: &Event<D>, data: Option<&D>) -> bool {
        let event_type = event.event_type();
        let Some(len) = self.listeners.borrow().get(event_type).map(Vec::len) else {
            tracing::trace!(dispatcher = %self.id, %event, "No listeners registered");
            return !event.is_default_prevented();
        };

        tracing::trace!(dispatcher = %self.id, %event, listeners = len, "Dispatching event");

        match self.config.iteration {
            IterationPolicy::Live => {
                for index in 0..len {
                    let listener = self
                        .listeners
                        .borrow()
                        .get(event_type)
                        .and_then(|bucket| bucket.get(index).cloned());
                    // The bucket shrank (or was cleared) under the cursor.
                    let Some(listener) = listener else {
                        break;
                    };

                    self.invoke(&listener, event, data);
                    if event.is_immediate_propagation_stopped() {
                        break;
                    }
                }
            }
            IterationPolicy::Snapshot => {
                let snapshot = self
                    .listeners
                    .borrow()
                    .get(event_type)
                    .cloned()
                    .unwrap_or_default();
                for listener in &snapshot {
                    self.invoke(listener, event, data);
                    if event.is_immediate_propagation_stopped() {
                        break;
                    }
                }
            }
        }

        if event.is_bubbling() && !event.is_propagation_stopped() {
            if let Some(parent) = self.propagation_parent.as_ref().and_then(Weak::upgrade) {
                tracing::trace!(dispatcher = %self.id, %event, "Bubbling to parent");
                parent.dispatch(DispatchArg::Event(event), None);
            }
        }

        !event.is_default_prevented()
    }

    fn invoke(&self, listener: &Listener<D>, event: &Event<D>, data: Option<&D>) {
        if self.config.trace_dispatch {
            tracing::trace!(dispatcher = %self.id, %event, ?listener, "Invoking listener");
        }

        match self.config.panic_policy {
            ListenerPanicPolicy::Propagate => listener.call(self, event, data),
            ListenerPanicPolicy::Isolate => {
                let result =
                    std::panic::catch_unwind(AssertUnwindSafe(|| listener.call(self, event, data)));
                if let Err(payload) = result {
                    tracing::error!(
                        dispatcher = %self.id,
                        %event,
                        ?listener,
                        panic = panic_message(&*payload),
                        "Listener panicked"
                    );
                }
            }
        }
    }

    /// Register a listener for an event type
    ///
    /// Adding a listener that is already registered for the type is a no-op.
    pub fn add_event_listener(&self, event_type: &str, listener: Listener<D>) {
        let mut listeners = self.listeners.borrow_mut();
        match listeners.get_mut(event_type) {
            Some(bucket) if bucket.contains(&listener) => return,
            Some(bucket) => bucket.push(listener),
            None => {
                listeners.insert(event_type.to_string(), vec![listener]);
            }
        }
        tracing::debug!(dispatcher = %self.id, event_type, "Listener added");
    }

    /// Unregister a listener for an event type
    ///
    /// The bucket for the type is kept even when it becomes empty.
    pub fn remove_event_listener(&self, event_type: &str, listener: &Listener<D>) {
        let mut listeners = self.listeners.borrow_mut();
        let Some(bucket) = listeners.get_mut(event_type) else {
            return;
        };
        if let Some(index) = bucket.iter().position(|l| l == listener) {
            bucket.remove(index);
            tracing::debug!(dispatcher = %self.id, event_type, "Listener removed");
        }
    }

    /// Check whether a listener is registered for an event type
    pub fn has_event_listener(&self, event_type: &str, listener: &Listener<D>) -> bool {
        self.listeners
            .borrow()
            .get(event_type)
            .is_some_and(|bucket| bucket.contains(listener))
    }

    /// Remove every listener of one event type, or of all types
    pub fn remove_all_event_listeners(&self, event_type: Option<&str>) {
        let mut listeners = self.listeners.borrow_mut();
        match event_type {
            Some(event_type) => {
                listeners.remove(event_type);
            }
            None => listeners.clear(),
        }
        tracing::debug!(dispatcher = %self.id, ?event_type, "Listeners cleared");
    }

    /// Get the number of listeners registered for an event type
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.listeners.borrow().get(event_type).map_or(0, Vec::len)
    }

    /// Check whether any listener is registered for an event type
    pub fn has_listeners(&self, event_type: &str) -> bool {
        self.listener_count(event_type) > 0
    }

    /// Get the event types that have a listener bucket, sorted
    pub fn event_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.listeners.borrow().keys().cloned().collect();
        types.sort();
        types
    }

    /// Get the propagation parent, if it is set and still alive
    pub fn propagation_parent(&self) -> Option<Rc<dyn EventTarget<D>>> {
        self.propagation_parent.as_ref().and_then(Weak::upgrade)
    }

    /// Get the dispatcher ID
    pub fn id(&self) -> DispatcherId {
        self.id
    }

    /// Get the current configuration
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }
}

impl<D: 'static> EventTarget<D> for EventDispatcher<D> {
    fn dispatch(&self, event: DispatchArg<'_, D>, data: Option<&D>) -> bool {
        EventDispatcher::dispatch(self, event, data)
    }

    fn add_event_listener(&self, event_type: &str, listener: Listener<D>) {
        EventDispatcher::add_event_listener(self, event_type, listener)
    }

    fn remove_event_listener(&self, event_type: &str, listener: &Listener<D>) {
        EventDispatcher::remove_event_listener(self, event_type, listener)
    }

    fn has_event_listener(&self, event_type: &str, listener: &Listener<D>) -> bool {
        EventDispatcher::has_event_listener(self, event_type, listener)
    }
}

impl<D> std::fmt::Debug for EventDispatcher<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listeners = self
            .listeners
            .try_borrow()
            .map(|map| map.values().map(Vec::len).sum::<usize>());
        f.debug_struct("EventDispatcher")
            .field("id", &self.id)
            .field("listeners", &listeners.ok())
            .field("has_parent", &self.propagation_parent.is_some())
            .field("config", &self.config)
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string panic payload>")
}
