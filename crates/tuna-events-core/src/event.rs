//! Event value object
//!
//! An [`Event`] carries the immutable facts of one occurrence (its target,
//! type and whether it bubbles) together with the flags listeners use to
//! influence the rest of the dispatch:
//! - default prevention, reported back by `dispatch`
//! - propagation stop, which suppresses bubbling to the parent
//! - immediate propagation stop, which also ends the current listener walk
//!
//! Flags live in [`Cell`]s so that the single instance handed to every
//! listener along a bubbling chain can be updated through a shared reference.
//! Once set, a flag is never cleared.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::target::EventTarget;

/// A single occurrence dispatched through an [`EventTarget`]
pub struct Event<D = ()> {
    /// Object the event is attributed to.
    target: Weak<dyn EventTarget<D>>,
    /// Event category used to select listeners.
    event_type: String,
    /// Whether the event is forwarded to propagation parents.
    bubbling: bool,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
    immediate_propagation_stopped: Cell<bool>,
}

impl<D> Event<D> {
    /// Create a new event attributed to `target`
    ///
    /// Any string is accepted as the type, including an empty one.
    pub fn new(
        target: Weak<dyn EventTarget<D>>,
        event_type: impl Into<String>,
        bubbling: bool,
    ) -> Self {
        Self {
            target,
            event_type: event_type.into(),
            bubbling,
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
            immediate_propagation_stopped: Cell::new(false),
        }
    }

    /// Create a new event attributed to a concrete target
    pub fn for_target<T>(target: &Rc<T>, event_type: impl Into<String>, bubbling: bool) -> Self
    where
        T: EventTarget<D> + 'static,
        D: 'static,
    {
        let target: Weak<T> = Rc::downgrade(target);
        Self::new(target, event_type, bubbling)
    }

    /// Get the object the event is attributed to
    ///
    /// Returns `None` once that object has been dropped.
    pub fn target(&self) -> Option<Rc<dyn EventTarget<D>>> {
        self.target.upgrade()
    }

    /// Check whether `candidate` is the object this event is attributed to
    pub fn is_target<T: ?Sized>(&self, candidate: &T) -> bool {
        std::ptr::addr_eq(self.target.as_ptr(), candidate as *const T)
    }

    /// Get the event type
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Whether the event bubbles to propagation parents
    pub fn is_bubbling(&self) -> bool {
        self.bubbling
    }

    /// Cancel the default action associated with this event
    ///
    /// Does not affect listener iteration or bubbling.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Whether the default action has been canceled
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    /// Stop bubbling after the current dispatcher's listeners have run
    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    /// Whether bubbling has been stopped
    ///
    /// Also true after [`stop_immediate_propagation`](Self::stop_immediate_propagation).
    pub fn is_propagation_stopped(&self) -> bool {
        self.immediate_propagation_stopped.get() || self.propagation_stopped.get()
    }

    /// Stop all further handling of this event
    ///
    /// No more listeners of the current dispatcher run after the calling one
    /// returns, and the event does not bubble.
    pub fn stop_immediate_propagation(&self) {
        self.immediate_propagation_stopped.set(true);
    }

    /// Whether all further handling has been stopped
    pub fn is_immediate_propagation_stopped(&self) -> bool {
        self.immediate_propagation_stopped.get()
    }
}

impl<D> std::fmt::Debug for Event<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("event_type", &self.event_type)
            .field("bubbling", &self.bubbling)
            .field("default_prevented", &self.is_default_prevented())
            .field("propagation_stopped", &self.is_propagation_stopped())
            .field(
                "immediate_propagation_stopped",
                &self.is_immediate_propagation_stopped(),
            )
            .finish()
    }
}

impl<D> std::fmt::Display for Event<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.bubbling {
            write!(f, "{} (bubbling)", self.event_type)
        } else {
            write!(f, "{}", self.event_type)
        }
    }
}
