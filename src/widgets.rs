//! Widget tree used by the demo binary
//!
//! Each [`Widget`] owns an [`EventDispatcher`] and exposes it through
//! [`EventTarget`] by delegation, the way host objects embed the dispatcher
//! capability. Child widgets bubble to their parent widget.

use std::rc::{Rc, Weak};
use tuna_events_core::{
    shared, DispatchArg, DispatcherConfig, Event, EventDispatcher, EventTarget, Listener, Shared,
};

/// Pointer position carried by click events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickData {
    /// Horizontal position in pixels.
    pub x: i32,
    /// Vertical position in pixels.
    pub y: i32,
}

/// A named node in the widget tree
///
/// Listeners registered through a widget receive the widget's inner
/// [`EventDispatcher`] as their context, and raw-type dispatches target that
/// dispatcher. [`Widget::click`] builds its event with the widget itself as
/// target, so click listeners can identify the originating widget through
/// [`Event::is_target`].
pub struct Widget {
    name: String,
    events: Rc<EventDispatcher<ClickData>>,
}

impl Widget {
    /// Create a root widget
    pub fn root(name: impl Into<String>, config: DispatcherConfig) -> Rc<Self> {
        Rc::new(Self {
            name: name.into(),
            events: EventDispatcher::with_config(config, None),
        })
    }

    /// Create a widget whose events bubble to `parent`
    pub fn child(
        name: impl Into<String>,
        parent: &Rc<Widget>,
        config: DispatcherConfig,
    ) -> Rc<Self> {
        let parent: Weak<Widget> = Rc::downgrade(parent);
        let parent: Weak<dyn EventTarget<ClickData>> = parent;
        Rc::new(Self {
            name: name.into(),
            events: EventDispatcher::with_config(config, Some(parent)),
        })
    }

    /// Get the widget name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dispatch a bubbling click that originates at this widget
    pub fn click(self: &Rc<Self>, position: ClickData) -> bool {
        let event = Event::for_target(self, "click", true);
        self.dispatch(DispatchArg::Event(&event), Some(&position))
    }
}

impl EventTarget<ClickData> for Widget {
    fn dispatch(&self, event: DispatchArg<'_, ClickData>, data: Option<&ClickData>) -> bool {
        self.events.dispatch(event, data)
    }

    fn add_event_listener(&self, event_type: &str, listener: Listener<ClickData>) {
        self.events.add_event_listener(event_type, listener)
    }

    fn remove_event_listener(&self, event_type: &str, listener: &Listener<ClickData>) {
        self.events.remove_event_listener(event_type, listener)
    }

    fn has_event_listener(&self, event_type: &str, listener: &Listener<ClickData>) -> bool {
        self.events.has_event_listener(event_type, listener)
    }
}

impl std::fmt::Debug for Widget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Widget")
            .field("name", &self.name)
            .field("events", &self.events)
            .finish()
    }
}

/// What the demo observed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoReport {
    /// `"<widget>:<event>"` entries in invocation order.
    pub invocations: Vec<String>,
    /// Result of each click dispatch, in order.
    pub results: Vec<bool>,
}

/// Build a window > toolbar > button tree and click it three times
///
/// 1. A plain click bubbles from the button up to the window.
/// 2. A click inside the "disabled" area is canceled by the button.
/// 3. The toolbar swallows the click once it has been told to.
pub fn run_demo(config: &DispatcherConfig) -> DemoReport {
    let window = Widget::root("window", config.clone());
    let toolbar = Widget::child("toolbar", &window, config.clone());
    let button = Widget::child("button", &toolbar, config.clone());
    let log: Shared<Vec<String>> = shared(Vec::new());

    for widget in [&window, &toolbar, &button] {
        let log = log.clone();
        let name = widget.name().to_string();
        widget.add_event_listener(
            "click",
            Listener::new(move |_, event: &Event<ClickData>, _| {
                log.borrow_mut().push(format!("{}:{}", name, event.event_type()));
            }),
        );
    }

    button.add_event_listener(
        "click",
        Listener::new(|_, event: &Event<ClickData>, data: Option<&ClickData>| {
            if data.is_some_and(|p| p.x < 0) {
                tracing::info!("Click in disabled area, canceling");
                event.prevent_default();
            }
        }),
    );

    let mut results = vec![
        button.click(ClickData { x: 10, y: 4 }),
        button.click(ClickData { x: -1, y: 4 }),
    ];

    let swallow = Listener::new(|_, event: &Event<ClickData>, _| event.stop_propagation());
    toolbar.add_event_listener("click", swallow.clone());
    results.push(button.click(ClickData { x: 3, y: 3 }));
    toolbar.remove_event_listener("click", &swallow);

    tracing::info!(?results, "Demo finished");
    let invocations = log.borrow().clone();
    DemoReport {
        invocations,
        results,
    }
}
