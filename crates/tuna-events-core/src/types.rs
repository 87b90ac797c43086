//! Type aliases for commonly used complex types.
//!
//! Dispatch is single-threaded, so shared state is built from `Rc<RefCell<T>>`
//! rather than `Arc<Mutex<T>>`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tuna_events_core::types::*;
//!
//! // Instead of: Rc<RefCell<Vec<String>>>
//! let log: Shared<Vec<String>> = shared(Vec::new());
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::listener::Listener;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// Listeners typically capture one of these to record what they observed.
///
/// # Example
/// ```rust,ignore
/// let clicks: Shared<u32> = shared(0);
/// *clicks.borrow_mut() += 1;
/// ```
pub type Shared<T> = Rc<RefCell<T>>;

/// Listeners registered for one event type, in invocation order.
pub type ListenerBucket<D> = Vec<Listener<D>>;

/// Listener buckets keyed by event type.
pub type ListenerMap<D> = HashMap<String, ListenerBucket<D>>;

/// Create a new `Shared<T>` from a value.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
