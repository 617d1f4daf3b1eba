use fennec::{
    errors::DjError,
    player::{DeviceBinder, EventReconciler, GuardState, Reaction},
    types::{PlaybackState, PlayerEvent},
};

fn state(paused: bool, position: u64, duration: u64) -> PlayerEvent {
    PlayerEvent::StateChanged(Some(PlaybackState {
        paused,
        position,
        duration,
    }))
}

#[test]
fn test_reconciler_starts_listening() {
    let reconciler = EventReconciler::new();
    assert_eq!(reconciler.state(), GuardState::Listening);
    assert!(!reconciler.is_guarded());
}

#[test]
fn test_natural_end_requests_advance() {
    let mut reconciler = EventReconciler::new();
    assert_eq!(reconciler.reconcile(&state(true, 0, 200_000)), Reaction::Advance);
}

#[test]
fn test_other_states_are_ignored() {
    let mut reconciler = EventReconciler::new();

    // paused mid-track
    assert_eq!(reconciler.reconcile(&state(true, 5_000, 200_000)), Reaction::Ignore);
    // playing from the start
    assert_eq!(reconciler.reconcile(&state(false, 0, 200_000)), Reaction::Ignore);
    // nothing loaded yet
    assert_eq!(reconciler.reconcile(&state(true, 0, 0)), Reaction::Ignore);
    assert_eq!(
        reconciler.reconcile(&PlayerEvent::StateChanged(None)),
        Reaction::Ignore
    );
}

#[test]
fn test_armed_guard_swallows_exactly_one_state_change() {
    let mut reconciler = EventReconciler::new();
    reconciler.arm_guard();

    assert_eq!(reconciler.reconcile(&state(true, 0, 200_000)), Reaction::Swallowed);
    assert_eq!(reconciler.state(), GuardState::Listening);
    assert_eq!(reconciler.reconcile(&state(true, 0, 200_000)), Reaction::Advance);
}

#[test]
fn test_guard_is_consumed_by_non_end_states_too() {
    let mut reconciler = EventReconciler::new();
    reconciler.arm_guard();

    assert_eq!(reconciler.reconcile(&state(false, 0, 200_000)), Reaction::Swallowed);
    assert!(!reconciler.is_guarded());
}

#[test]
fn test_empty_state_keeps_the_guard() {
    let mut reconciler = EventReconciler::new();
    reconciler.arm_guard();

    assert_eq!(
        reconciler.reconcile(&PlayerEvent::StateChanged(None)),
        Reaction::Ignore
    );
    assert!(reconciler.is_guarded());
}

#[test]
fn test_arming_twice_still_hides_one_event() {
    let mut reconciler = EventReconciler::new();
    reconciler.arm_guard();
    reconciler.arm_guard();

    assert_eq!(reconciler.reconcile(&state(true, 0, 1)), Reaction::Swallowed);
    assert_eq!(reconciler.reconcile(&state(true, 0, 1)), Reaction::Advance);
}

#[test]
fn test_out_of_band_events_ignore_the_guard() {
    let mut reconciler = EventReconciler::new();
    reconciler.arm_guard();

    assert_eq!(
        reconciler.reconcile(&PlayerEvent::AuthenticationError("expired".to_string())),
        Reaction::Reauthenticate("expired".to_string())
    );
    assert_eq!(
        reconciler.reconcile(&PlayerEvent::PlaybackError("bad stream".to_string())),
        Reaction::Advance
    );
    assert!(reconciler.is_guarded());
}

#[test]
fn test_readiness_events_map_to_binding() {
    let mut reconciler = EventReconciler::new();

    assert_eq!(
        reconciler.reconcile(&PlayerEvent::Ready {
            device_id: "dev".to_string()
        }),
        Reaction::Bind("dev".to_string())
    );
    assert_eq!(
        reconciler.reconcile(&PlayerEvent::NotReady { device_id: None }),
        Reaction::Unbind
    );
}

#[test]
fn test_diagnostic_events_are_only_logged() {
    let mut reconciler = EventReconciler::new();

    assert!(matches!(
        reconciler.reconcile(&PlayerEvent::InitializationError("no drm".to_string())),
        Reaction::Log(m) if m.contains("no drm")
    ));
    assert!(matches!(
        reconciler.reconcile(&PlayerEvent::AccountError("not premium".to_string())),
        Reaction::Log(m) if m.contains("not premium")
    ));
}

#[test]
fn test_device_binder_follows_readiness() {
    let mut binder = DeviceBinder::new();
    assert!(matches!(binder.require(), Err(DjError::DeviceUnavailable)));

    binder.on_ready("first");
    binder.on_ready("second");
    assert_eq!(binder.require().unwrap(), "second");
    assert_eq!(binder.device_id(), Some("second"));

    binder.on_not_ready();
    assert!(!binder.is_bound());
    assert!(matches!(binder.require(), Err(DjError::DeviceUnavailable)));
}
