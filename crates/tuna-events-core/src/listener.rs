//! Listener handles
//!
//! A [`Listener`] wraps a callback in a reference-counted handle. Handles are
//! compared by identity: clones of a handle are the same listener, while two
//! handles created from identical closures are different listeners. Keep a
//! clone of the handle to remove the listener later.

use std::rc::Rc;

use crate::dispatcher::EventDispatcher;
use crate::event::Event;

/// Callback signature for event listeners
///
/// Receives the dispatcher running the listener, the event and the data
/// supplied to `dispatch` (`None` when the caller supplied none, and always
/// `None` for bubbled dispatches).
pub type ListenerFn<D> = dyn Fn(&EventDispatcher<D>, &Event<D>, Option<&D>);

/// Identity-compared handle to an event listener
pub struct Listener<D = ()>(Rc<ListenerFn<D>>);

impl<D> Listener<D> {
    /// Wrap a callback in a new listener handle
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&EventDispatcher<D>, &Event<D>, Option<&D>) + 'static,
    {
        Self(Rc::new(callback))
    }

    /// Invoke the listener
    pub fn call(&self, context: &EventDispatcher<D>, event: &Event<D>, data: Option<&D>) {
        (self.0)(context, event, data)
    }

    /// Check whether two handles refer to the same listener
    pub fn ptr_eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl<D> Clone for Listener<D> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<D> PartialEq for Listener<D> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<D> Eq for Listener<D> {}

impl<D, F> From<F> for Listener<D>
where
    F: Fn(&EventDispatcher<D>, &Event<D>, Option<&D>) + 'static,
{
    fn from(callback: F) -> Self {
        Self::new(callback)
    }
}

impl<D> std::fmt::Debug for Listener<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Listener({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}
