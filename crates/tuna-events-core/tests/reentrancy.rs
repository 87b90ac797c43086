use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;
use tuna_events_core::{
    shared, DispatcherConfig, Event, EventDispatcher, IterationPolicy, Listener,
    ListenerPanicPolicy, Shared,
};

fn recorder(log: &Shared<Vec<&'static str>>, name: &'static str) -> Listener {
    let log = log.clone();
    Listener::new(move |_, _, _| log.borrow_mut().push(name))
}

fn dispatcher_with(iteration: IterationPolicy) -> Rc<EventDispatcher> {
    EventDispatcher::with_config(
        DispatcherConfig {
            iteration,
            ..Default::default()
        },
        None,
    )
}

/// Registers `[a, b, c]` for "click" where `a` removes the listener selected
/// by `target` before recording itself.
fn register_remover(
    dispatcher: &EventDispatcher,
    log: &Shared<Vec<&'static str>>,
    target: &'static str,
) {
    let b = recorder(log, "b");
    let c = recorder(log, "c");
    let a_slot: Shared<Option<Listener>> = shared(None);

    let victim = match target {
        "b" => Some(b.clone()),
        "c" => Some(c.clone()),
        _ => None,
    };
    let slot = a_slot.clone();
    let a_log = log.clone();
    let a = Listener::new(move |context: &EventDispatcher, _, _| {
        let victim = victim.clone().or_else(|| slot.borrow().clone());
        if let Some(victim) = victim {
            context.remove_event_listener("click", &victim);
        }
        a_log.borrow_mut().push("a");
    });
    *a_slot.borrow_mut() = Some(a.clone());

    dispatcher.add_event_listener("click", a);
    dispatcher.add_event_listener("click", b);
    dispatcher.add_event_listener("click", c);
}

#[test]
fn test_live_self_removal_skips_next_listener() {
    let dispatcher = dispatcher_with(IterationPolicy::Live);
    let log = shared(Vec::new());
    register_remover(&dispatcher, &log, "a");

    dispatcher.dispatch("click", None);
    assert_eq!(*log.borrow(), vec!["a", "c"]);

    log.borrow_mut().clear();
    dispatcher.dispatch("click", None);
    assert_eq!(*log.borrow(), vec!["b", "c"]);
}

#[test]
fn test_snapshot_self_removal_runs_everyone() {
    let dispatcher = dispatcher_with(IterationPolicy::Snapshot);
    let log = shared(Vec::new());
    register_remover(&dispatcher, &log, "a");

    dispatcher.dispatch("click", None);
    assert_eq!(*log.borrow(), vec!["a", "b", "c"]);

    log.borrow_mut().clear();
    dispatcher.dispatch("click", None);
    assert_eq!(*log.borrow(), vec!["b", "c"]);
}

#[test]
fn test_live_removal_ahead_of_cursor() {
    let dispatcher = dispatcher_with(IterationPolicy::Live);
    let log = shared(Vec::new());
    register_remover(&dispatcher, &log, "b");

    dispatcher.dispatch("click", None);
    assert_eq!(*log.borrow(), vec!["a", "c"]);
}

#[test]
fn test_live_walk_ends_when_bucket_shrinks() {
    let dispatcher = dispatcher_with(IterationPolicy::Live);
    let log = shared(Vec::new());
    register_remover(&dispatcher, &log, "c");

    dispatcher.dispatch("click", None);
    assert_eq!(*log.borrow(), vec!["a", "b"]);
}

#[test]
fn test_snapshot_removal_ahead_of_cursor() {
    let dispatcher = dispatcher_with(IterationPolicy::Snapshot);
    let log = shared(Vec::new());
    register_remover(&dispatcher, &log, "c");

    dispatcher.dispatch("click", None);
    assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    assert_eq!(dispatcher.listener_count("click"), 2);
}

#[test]
fn test_listener_added_during_walk_runs_next_time() {
    for policy in [IterationPolicy::Live, IterationPolicy::Snapshot] {
        let dispatcher = dispatcher_with(policy);
        let log = shared(Vec::new());
        let late = recorder(&log, "late");
        let adder_log = log.clone();

        dispatcher.add_event_listener(
            "click",
            Listener::new(move |context: &EventDispatcher, _, _| {
                adder_log.borrow_mut().push("adder");
                context.add_event_listener("click", late.clone());
            }),
        );

        dispatcher.dispatch("click", None);
        assert_eq!(*log.borrow(), vec!["adder"], "policy {policy}");

        dispatcher.dispatch("click", None);
        assert_eq!(
            *log.borrow(),
            vec!["adder", "adder", "late"],
            "policy {policy}"
        );
    }
}

#[test]
fn test_clearing_registry_mid_walk() {
    let cases = [
        (IterationPolicy::Live, vec!["clear"]),
        (IterationPolicy::Snapshot, vec!["clear", "after"]),
    ];

    for (policy, expected) in cases {
        let dispatcher = dispatcher_with(policy);
        let log = shared(Vec::new());
        let clear_log = log.clone();

        dispatcher.add_event_listener(
            "click",
            Listener::new(move |context: &EventDispatcher, _, _| {
                clear_log.borrow_mut().push("clear");
                context.remove_all_event_listeners(None);
            }),
        );
        dispatcher.add_event_listener("click", recorder(&log, "after"));

        assert!(dispatcher.dispatch("click", None));
        assert_eq!(*log.borrow(), expected, "policy {policy}");
        assert!(dispatcher.event_types().is_empty());
    }
}

#[test]
fn test_reentrant_dispatch_of_other_type() {
    let dispatcher = EventDispatcher::new();
    let log = shared(Vec::new());
    let outer_log = log.clone();

    dispatcher.add_event_listener(
        "outer",
        Listener::new(move |context: &EventDispatcher, _, _| {
            outer_log.borrow_mut().push("outer-start");
            context.dispatch("inner", None);
            outer_log.borrow_mut().push("outer-end");
        }),
    );
    dispatcher.add_event_listener("inner", recorder(&log, "inner"));

    assert!(dispatcher.dispatch("outer", None));
    assert_eq!(*log.borrow(), vec!["outer-start", "inner", "outer-end"]);
}

#[test]
fn test_reentrant_dispatch_of_same_type() {
    let dispatcher = EventDispatcher::new();
    let depth = Rc::new(Cell::new(0));
    let calls = Rc::new(Cell::new(0));

    let listener_depth = depth.clone();
    let listener_calls = calls.clone();
    dispatcher.add_event_listener(
        "ping",
        Listener::new(move |context: &EventDispatcher, _, _| {
            listener_calls.set(listener_calls.get() + 1);
            if listener_depth.get() < 2 {
                listener_depth.set(listener_depth.get() + 1);
                context.dispatch("ping", None);
            }
        }),
    );

    assert!(dispatcher.dispatch("ping", None));
    assert_eq!(calls.get(), 3);
}

#[test]
fn test_nested_event_flags_are_independent() {
    let dispatcher = EventDispatcher::new();
    let inner_result = Rc::new(Cell::new(true));

    let result = inner_result.clone();
    dispatcher.add_event_listener(
        "outer",
        Listener::new(move |context: &EventDispatcher, event: &Event, _| {
            event.prevent_default();
            result.set(context.dispatch("inner", None));
        }),
    );

    assert!(!dispatcher.dispatch("outer", None));
    assert!(inner_result.get());
}

#[test]
fn test_panic_propagates_by_default() {
    let dispatcher = EventDispatcher::new();
    let log = shared(Vec::new());

    dispatcher.add_event_listener("click", Listener::new(|_, _, _| panic!("listener failed")));
    dispatcher.add_event_listener("click", recorder(&log, "after"));

    let outcome = catch_unwind(AssertUnwindSafe(|| dispatcher.dispatch("click", None)));
    assert!(outcome.is_err());
    assert!(log.borrow().is_empty());

    // The registry is not left borrowed.
    dispatcher.add_event_listener("resize", recorder(&log, "resize"));
    assert!(dispatcher.dispatch("resize", None));
    assert_eq!(*log.borrow(), vec!["resize"]);
}

#[test]
fn test_isolated_panic_continues_walk() {
    let dispatcher = EventDispatcher::with_config(
        DispatcherConfig {
            panic_policy: ListenerPanicPolicy::Isolate,
            ..Default::default()
        },
        None,
    );
    let log = shared(Vec::new());

    dispatcher.add_event_listener(
        "click",
        Listener::new(|_, event: &Event, _| {
            event.prevent_default();
            panic!("listener failed");
        }),
    );
    dispatcher.add_event_listener("click", recorder(&log, "after"));

    assert!(!dispatcher.dispatch("click", None));
    assert_eq!(*log.borrow(), vec!["after"]);
}

#[test]
fn test_isolated_panic_with_owned_message() {
    let dispatcher = EventDispatcher::<()>::with_config(
        DispatcherConfig {
            panic_policy: ListenerPanicPolicy::Isolate,
            trace_dispatch: true,
            ..Default::default()
        },
        None,
    );
    let code = 17;
    dispatcher.add_event_listener(
        "click",
        Listener::new(move |_, _, _| panic!("listener failed with code {code}")),
    );

    assert!(dispatcher.dispatch("click", None));
}
