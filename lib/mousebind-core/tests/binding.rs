use mousebind_core::binding::{
    Binding, BindingError, CallbackOutcome, EventType, Modifiers, FAULT_MESSAGE,
};
use mousebind_core::platform::mock::{MockEvent, MockEventSource, MockNotifier};
use mousebind_core::platform::{EventProperty, RawEvent};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

fn drag(modifiers: &str) -> MockEvent {
    MockEvent::new(EventType::LeftMouseDragged, modifiers)
}

/// A binding on alt+leftMouseDragged that counts its calls and returns `result`
fn counting_binding(
    source: &MockEventSource,
    calls: &Arc<AtomicUsize>,
    result: bool,
) -> Binding<MockEventSource> {
    let calls = calls.clone();
    Binding::builder(source, "alt", "leftMouseDragged")
        .notifier(MockNotifier::new())
        .callback(move |_: &MockEvent| {
            calls.fetch_add(1, Ordering::SeqCst);
            result
        })
        .build()
        .unwrap()
}

#[test]
fn test_exact_match_consumes() {
    let source = MockEventSource::new();
    let calls = counter();
    let binding = counting_binding(&source, &calls, true);
    binding.enable();

    let delivery = source.deliver(drag("alt"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(!delivery.propagated);

    let delivery = source.deliver(drag("alt+shift"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(delivery.propagated);
}

#[test]
fn test_subset_and_superset_do_not_fire() {
    let source = MockEventSource::new();
    let calls = counter();
    let binding = Binding::create(
        &source,
        "cmd+shift",
        "leftMouseDragged",
        None,
        {
            let calls = calls.clone();
            move |_: &MockEvent| {
                calls.fetch_add(1, Ordering::SeqCst);
            }
        },
    )
    .unwrap();
    binding.enable();

    for modifiers in ["", "cmd", "shift", "cmd+shift+alt", "cmd+shift+ctrl", "ctrl+alt"] {
        assert!(source.deliver(drag(modifiers)).propagated, "{modifiers}");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    assert!(!source.deliver(drag("⇧⌘")).propagated);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_other_event_types_do_not_fire() {
    let source = MockEventSource::new();
    let calls = counter();
    let binding = counting_binding(&source, &calls, true);
    binding.enable();

    let delivery = source.deliver(MockEvent::new(EventType::RightMouseDragged, "alt"));
    assert!(delivery.propagated);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_no_modifiers_binding() {
    let source = MockEventSource::new();
    let calls = counter();
    let binding = Binding::builder(&source, Modifiers::default(), "otherMouseDown")
        .notifier(MockNotifier::new())
        .callback({
            let calls = calls.clone();
            move |_: &MockEvent| {
                calls.fetch_add(1, Ordering::SeqCst);
                false
            }
        })
        .build()
        .unwrap();
    binding.enable();

    assert!(source.deliver(MockEvent::new(EventType::OtherMouseDown, "")).propagated);
    assert!(source.deliver(MockEvent::new(EventType::OtherMouseDown, "ctrl")).propagated);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unrecognized_type_creates_no_tap() {
    let source = MockEventSource::new();
    let result = Binding::create(&source, "alt", "leftMouseWobbled", None, |_: &MockEvent| true);
    assert_eq!(
        result.unwrap_err(),
        BindingError::UnrecognizedEventType("leftMouseWobbled".to_string())
    );
    assert_eq!(source.tap_count(), 0);
}

#[test]
fn test_missing_callback() {
    let source = MockEventSource::new();
    let result = Binding::builder(&source, "alt", "leftMouseDragged").build();
    assert_eq!(result.unwrap_err(), BindingError::MissingCallback);
    assert_eq!(source.tap_count(), 0);
}

#[test]
fn test_platform_failure_on_create() {
    let source = MockEventSource::new();
    source.set_fail_create(true);
    let result = Binding::create(&source, "alt", "leftMouseDragged", None, |_: &MockEvent| true);
    assert!(matches!(result, Err(BindingError::Platform(_))));
}

#[test]
fn test_created_disabled() {
    let source = MockEventSource::new();
    let calls = counter();
    let binding = counting_binding(&source, &calls, true);

    assert!(!binding.is_enabled());
    assert_eq!(source.tap_count(), 1);
    assert_eq!(source.running_tap_count(), 0);
    assert!(source.deliver(drag("alt")).propagated);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_unit_return_consumes() {
    let source = MockEventSource::new();
    let binding = Binding::create(&source, "alt", "leftMouseDragged", None, |_: &MockEvent| {})
        .unwrap();
    binding.enable();
    assert!(!source.deliver(drag("alt")).propagated);
}

#[test]
fn test_false_propagates() {
    let source = MockEventSource::new();
    let calls = counter();
    let binding = counting_binding(&source, &calls, false);
    binding.enable();

    assert!(source.deliver(drag("alt")).propagated);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_emitted_events_regardless_of_decision() {
    for decision in [true, false] {
        let source = MockEventSource::new();
        let binding = Binding::create(
            &source,
            "alt",
            "leftMouseDragged",
            None,
            move |_: &MockEvent| {
                let e1 = MockEvent::new(EventType::ScrollWheel, "")
                    .with_property(EventProperty::ScrollPointDeltaAxis1, 1);
                let e2 = MockEvent::new(EventType::ScrollWheel, "")
                    .with_property(EventProperty::ScrollPointDeltaAxis1, 2);
                (decision, vec![e1, e2])
            },
        )
        .unwrap();
        binding.enable();

        let delivery = source.deliver(drag("alt"));
        assert_eq!(delivery.propagated, !decision);
        let values: Vec<i64> = delivery
            .emitted
            .iter()
            .map(|e| e.properties[&EventProperty::ScrollPointDeltaAxis1])
            .collect();
        assert_eq!(values, vec![1, 2]);
    }
}

#[test]
fn test_events_without_decision_consume() {
    let source = MockEventSource::new();
    let binding = Binding::create(
        &source,
        "alt",
        "leftMouseDragged",
        None,
        |event: &MockEvent| vec![event.clone()],
    )
    .unwrap();
    binding.enable();

    let delivery = source.deliver(drag("alt"));
    assert!(!delivery.propagated);
    assert_eq!(delivery.emitted, vec![drag("alt")]);
}

#[test]
fn test_explicit_outcome() {
    let source = MockEventSource::new();
    let binding = Binding::create(
        &source,
        "alt",
        "leftMouseDragged",
        None,
        |_: &MockEvent| CallbackOutcome::<MockEvent>::decided(false),
    )
    .unwrap();
    binding.enable();
    assert!(source.deliver(drag("alt")).propagated);
}

#[test]
fn test_panic_disables_binding() {
    let source = MockEventSource::new();
    let notifier = MockNotifier::new();
    let calls = counter();
    let binding = Binding::builder(&source, "alt", "leftMouseDragged")
        .notifier(notifier.clone())
        .callback({
            let calls = calls.clone();
            move |_: &MockEvent| -> bool {
                calls.fetch_add(1, Ordering::SeqCst);
                panic!("callback exploded");
            }
        })
        .build()
        .unwrap();
    binding.enable();

    let delivery = source.deliver(drag("alt"));
    assert!(!delivery.propagated);
    assert!(!binding.is_enabled());
    assert_eq!(source.running_tap_count(), 0);
    assert_eq!(notifier.messages(), vec![FAULT_MESSAGE.to_string()]);

    assert!(source.deliver(drag("alt")).propagated);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    binding.enable();
    source.deliver(drag("alt"));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_error_result_disables_binding() {
    let source = MockEventSource::new();
    let notifier = MockNotifier::new();
    let binding = Binding::builder(&source, "alt", "leftMouseDragged")
        .notifier(notifier.clone())
        .callback(|_: &MockEvent| -> Result<bool, String> { Err("no scroll target".to_string()) })
        .build()
        .unwrap();
    binding.enable();

    assert!(!source.deliver(drag("alt")).propagated);
    assert!(!binding.is_enabled());
    assert_eq!(notifier.messages(), vec![FAULT_MESSAGE.to_string()]);
}

#[test]
fn test_disable_stops_delivery() {
    let source = MockEventSource::new();
    let calls = counter();
    let binding = counting_binding(&source, &calls, true);
    binding.enable().disable();

    assert!(source.deliver(drag("alt")).propagated);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_in_flight_event_after_disable_is_ignored() {
    let source = MockEventSource::new();
    let calls = counter();
    let notifier = MockNotifier::new();
    let binding = Binding::builder(&source, "alt", "leftMouseDragged")
        .message("Dragging")
        .notifier(notifier.clone())
        .callback({
            let calls = calls.clone();
            move |_: &MockEvent| {
                calls.fetch_add(1, Ordering::SeqCst);
                true
            }
        })
        .build()
        .unwrap();
    binding.enable().disable();

    let delivery = source.deliver_in_flight(drag("alt"));
    assert!(delivery.propagated);
    assert!(delivery.emitted.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(notifier.messages().is_empty());
}

#[test]
fn test_in_flight_event_after_fault_is_ignored() {
    let source = MockEventSource::new();
    let calls = counter();
    let binding = Binding::builder(&source, "alt", "leftMouseDragged")
        .notifier(MockNotifier::new())
        .callback({
            let calls = calls.clone();
            move |_: &MockEvent| -> Result<bool, String> {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("failed".to_string())
            }
        })
        .build()
        .unwrap();
    binding.enable();

    source.deliver(drag("alt"));
    assert!(source.deliver_in_flight(drag("alt")).propagated);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_enable_disable_idempotent() {
    let source = MockEventSource::new();
    let calls = counter();
    let binding = counting_binding(&source, &calls, true);

    binding.enable().enable();
    assert!(binding.is_enabled());
    assert_eq!(source.running_tap_count(), 1);

    binding.disable().disable();
    assert!(!binding.is_enabled());
    assert_eq!(source.running_tap_count(), 0);

    binding.enable();
    source.deliver(drag("alt"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_enable_failure_stays_disabled() {
    let source = MockEventSource::new();
    let calls = counter();
    let binding = counting_binding(&source, &calls, true);

    source.set_fail_start(true);
    binding.enable();
    assert!(!binding.is_enabled());

    source.set_fail_start(false);
    binding.enable();
    assert!(binding.is_enabled());
}

#[test]
fn test_message_shown_only_on_match() {
    let source = MockEventSource::new();
    let notifier = MockNotifier::new();
    let binding = Binding::builder(&source, "ctrl", "scrollWheel")
        .message("Zooming")
        .notifier(notifier.clone())
        .callback(|_: &MockEvent| true)
        .build()
        .unwrap();
    binding.enable();
    assert_eq!(binding.message(), Some("Zooming"));

    source.deliver(MockEvent::new(EventType::ScrollWheel, "ctrl+alt"));
    assert!(notifier.messages().is_empty());

    source.deliver(MockEvent::new(EventType::ScrollWheel, "ctrl"));
    source.deliver(MockEvent::new(EventType::ScrollWheel, "control"));
    assert_eq!(notifier.messages(), vec!["Zooming", "Zooming"]);
}

#[test]
fn test_callback_may_disable_itself() {
    let source = MockEventSource::new();
    let slot: Arc<Mutex<Option<Arc<Binding<MockEventSource>>>>> = Arc::new(Mutex::new(None));
    let binding = Arc::new(
        Binding::create(&source, "alt", "leftMouseDragged", None, {
            let slot = slot.clone();
            move |_: &MockEvent| {
                if let Some(binding) = slot.lock().unwrap().as_ref() {
                    binding.disable();
                }
                true
            }
        })
        .unwrap(),
    );
    *slot.lock().unwrap() = Some(binding.clone());
    binding.enable();

    assert!(!source.deliver(drag("alt")).propagated);
    assert!(!binding.is_enabled());
    assert!(source.deliver(drag("alt")).propagated);

    slot.lock().unwrap().take();
}

#[test]
fn test_callback_may_drop_its_own_binding() {
    let source = MockEventSource::new();
    let slot: Arc<Mutex<Option<Binding<MockEventSource>>>> = Arc::new(Mutex::new(None));
    let binding = Binding::create(&source, "alt", "leftMouseDragged", None, {
        let slot = slot.clone();
        move |_: &MockEvent| {
            let owned = slot.lock().unwrap().take();
            drop(owned);
            false
        }
    })
    .unwrap();
    binding.enable();
    *slot.lock().unwrap() = Some(binding);

    assert!(source.deliver(drag("alt")).propagated);
    assert_eq!(source.tap_count(), 0);
    assert!(source.deliver(drag("alt")).propagated);
}

#[test]
fn test_emitted_event_can_rewrite_the_original() {
    let source = MockEventSource::new();
    let binding = Binding::create(
        &source,
        "ctrl",
        "otherMouseDown",
        None,
        |event: &MockEvent| {
            let mut remapped = event.clone();
            remapped.set_property(EventProperty::ButtonNumber, 3);
            (true, vec![remapped])
        },
    )
    .unwrap();
    binding.enable();

    let press = MockEvent::new(EventType::OtherMouseDown, "ctrl")
        .with_property(EventProperty::ButtonNumber, 4);
    let delivery = source.deliver(press);
    assert!(!delivery.propagated);
    assert_eq!(delivery.emitted.len(), 1);
    assert_eq!(delivery.emitted[0].property(EventProperty::ButtonNumber), 3);
}

#[test]
fn test_bindings_on_same_type_coexist() {
    let source = MockEventSource::new();
    let alt_calls = counter();
    let shift_calls = counter();
    let _alt = {
        let calls = alt_calls.clone();
        let binding = Binding::create(&source, "alt", "leftMouseDragged", None, move |_: &MockEvent| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
        binding.enable();
        binding
    };
    let _alt_shift = {
        let calls = shift_calls.clone();
        let binding =
            Binding::create(&source, "alt+shift", "leftMouseDragged", None, move |_: &MockEvent| {
                calls.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        binding.enable();
        binding
    };

    source.deliver(drag("alt+shift"));
    source.deliver(drag("alt"));
    source.deliver(drag("alt+shift"));
    assert_eq!(alt_calls.load(Ordering::SeqCst), 1);
    assert_eq!(shift_calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_drop_releases_tap() {
    let source = MockEventSource::new();
    let calls = counter();
    let binding = counting_binding(&source, &calls, true);
    binding.enable();
    drop(binding);

    assert_eq!(source.tap_count(), 0);
    assert!(source.deliver(drag("alt")).propagated);
}

#[test]
fn test_display() {
    let source = MockEventSource::new();
    let binding =
        Binding::create(&source, "⇧⌥", "leftMouseDragged", None, |_: &MockEvent| true).unwrap();
    assert_eq!(binding.to_string(), "alt+shift+leftMouseDragged");
    assert_eq!(binding.event_type(), EventType::LeftMouseDragged);
    assert_eq!(binding.modifiers(), Modifiers::parse("alt+shift"));
}
