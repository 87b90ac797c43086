//! Event target capability
//!
//! [`EventTarget`] is the operation set any object implements to take part in
//! event dispatch. [`EventDispatcher`](crate::EventDispatcher) is the stock
//! implementation; host objects usually own one and delegate to it.
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use tuna_events_core::{DispatchArg, Event, EventDispatcher, EventTarget, Listener};
//!
//! struct Button {
//!     events: Rc<EventDispatcher>,
//! }
//!
//! impl EventTarget for Button {
//!     fn dispatch(&self, event: DispatchArg<'_>, data: Option<&()>) -> bool {
//!         self.events.dispatch(event, data)
//!     }
//!     // add/remove/has delegate the same way
//! }
//! ```
//!
//! A delegating host does not replace the dispatcher in what listeners see:
//! the context argument is still the owned [`EventDispatcher`](crate::EventDispatcher),
//! and events dispatched from a raw type still target it. Hosts that want to
//! be the event target build the event themselves with
//! [`Event::for_target`] and dispatch [`DispatchArg::Event`].
//!
//! `Rc<T>` is an [`EventTarget`] whenever `T` is, so shared handles (including
//! `Rc<dyn EventTarget<D>>`) can be passed wherever a target is expected.
//! With the trait in scope, method calls on an `Rc` receiver pick the trait
//! method and need a [`DispatchArg`] rather than a bare `&str`.

use std::rc::Rc;

use crate::event::Event;
use crate::listener::Listener;

/// What to dispatch: an event type or a prepared event
pub enum DispatchArg<'a, D = ()> {
    /// A raw type; the dispatcher builds a non-bubbling event for it.
    Type(&'a str),
    /// A prepared event, forwarded as-is.
    Event(&'a Event<D>),
}

impl<D> Clone for DispatchArg<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for DispatchArg<'_, D> {}

impl<D> std::fmt::Debug for DispatchArg<'_, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchArg::Type(event_type) => f.debug_tuple("Type").field(event_type).finish(),
            DispatchArg::Event(event) => f.debug_tuple("Event").field(event).finish(),
        }
    }
}

impl<'a, D> From<&'a str> for DispatchArg<'a, D> {
    fn from(event_type: &'a str) -> Self {
        DispatchArg::Type(event_type)
    }
}

impl<'a, D> From<&'a String> for DispatchArg<'a, D> {
    fn from(event_type: &'a String) -> Self {
        DispatchArg::Type(event_type)
    }
}

impl<'a, D> From<&'a Event<D>> for DispatchArg<'a, D> {
    fn from(event: &'a Event<D>) -> Self {
        DispatchArg::Event(event)
    }
}

/// Objects that publish events to registered listeners
pub trait EventTarget<D = ()> {
    /// Notify listeners of an event
    ///
    /// Returns `false` if any listener along the dispatch chain prevented the
    /// default action.
    fn dispatch(&self, event: DispatchArg<'_, D>, data: Option<&D>) -> bool;

    /// Register a listener for an event type
    ///
    /// Registering the same listener twice for one type has no effect.
    fn add_event_listener(&self, event_type: &str, listener: Listener<D>);

    /// Unregister a listener for an event type
    fn remove_event_listener(&self, event_type: &str, listener: &Listener<D>);

    /// Check whether a listener is registered for an event type
    fn has_event_listener(&self, event_type: &str, listener: &Listener<D>) -> bool;
}

impl<D, T: EventTarget<D> + ?Sized> EventTarget<D> for Rc<T> {
    fn dispatch(&self, event: DispatchArg<'_, D>, data: Option<&D>) -> bool {
        (**self).dispatch(event, data)
    }

    fn add_event_listener(&self, event_type: &str, listener: Listener<D>) {
        (**self).add_event_listener(event_type, listener)
    }

    fn remove_event_listener(&self, event_type: &str, listener: &Listener<D>) {
        (**self).remove_event_listener(event_type, listener)
    }

    fn has_event_listener(&self, event_type: &str, listener: &Listener<D>) -> bool {
        (**self).has_event_listener(event_type, listener)
    }
}
