//! End-to-end boundary behaviour on virtual time.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use recoverykit::boundary::{
    AnalyticsEvent, AnalyticsEventType, Boundary, BoundaryConfig, BoundaryUpdate,
    ConnectivityFlag, DispatchOutcome, HealthStatus, Navigation, NavigationLog, Rendered,
    ResetHandle, LAST_RESORT_MESSAGE,
};
use recoverykit::error::{ErrorKind, Failure};
use recoverykit::recovery::RecoveryActionType;
use recoverykit::retry::RetryPhase;
use recoverykit::surface::{PanelState, SurfaceRenderer};

type View = &'static str;

fn failing(status: u16) -> impl FnMut() -> Result<View, Failure> {
    move || Err(Failure::with_status_code(status, "request failed"))
}

fn succeeding() -> impl FnMut() -> Result<View, Failure> {
    || Ok("recipes")
}

fn auto_retry(delay_ms: u64) -> BoundaryConfig {
    BoundaryConfig::new()
        .with_auto_retry(true)
        .with_retry_delay(Duration::from_millis(delay_ms))
        .with_max_retries(3)
        .with_status_page_url("/status")
}

type Recorded = Arc<Mutex<Vec<AnalyticsEvent>>>;

fn record_analytics(config: BoundaryConfig) -> (Boundary<View>, Recorded) {
    let events: Recorded = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let boundary = Boundary::builder(config.with_analytics(true))
        .on_analytics_event(move |event| sink.lock().unwrap().push(event.clone()))
        .build();
    (boundary, events)
}

fn event_types(events: &Recorded) -> Vec<AnalyticsEventType> {
    events.lock().unwrap().iter().map(|e| e.event).collect()
}

/// Drives the boundary until the countdown fires, returning every
/// countdown value seen, the initial one included.
async fn run_countdown(boundary: &mut Boundary<View>) -> (Vec<u32>, u32) {
    let mut seen = vec![boundary.state().retry_countdown_seconds];
    loop {
        match boundary.next_event().await {
            Some(BoundaryUpdate::Countdown { remaining_seconds }) => {
                assert!(boundary.state().is_consistent(boundary.config().max_retries));
                seen.push(remaining_seconds);
            }
            Some(BoundaryUpdate::AutoRetried { attempt }) => return (seen, attempt),
            other => panic!("unexpected update {:?}", other),
        }
    }
}

#[test]
fn scenario_a_not_found_offers_home_then_back() {
    let mut boundary = Boundary::new(BoundaryConfig::new().with_home_url("/"));
    let rendered = boundary.render(&mut failing(404));
    let surface = rendered.surface().expect("built-in surface");

    let types: Vec<_> = surface.actions.iter().map(|a| a.action_type).collect();
    assert_eq!(
        types,
        vec![RecoveryActionType::GoHome, RecoveryActionType::GoBack]
    );
    assert!(surface.actions[0].is_primary);
    assert!(!surface.actions[1].is_primary);
    assert_eq!(surface.countdown_seconds, None);

    let state = boundary.state();
    let metadata = state.metadata.unwrap();
    assert_eq!(metadata.kind, ErrorKind::NotFound);
    assert!(!metadata.retryable);
    assert_eq!(state.retry_countdown_seconds, 0);
    assert!(!state.is_retrying);
}

#[tokio::test(start_paused = true)]
async fn scenario_b_countdown_reaches_zero_then_resets() {
    let mut boundary = Boundary::new(auto_retry(3000));
    let rendered = boundary.render(&mut failing(503));
    assert_eq!(rendered.surface().unwrap().countdown_seconds, Some(3));

    let started = tokio::time::Instant::now();
    let (seen, attempt) = run_countdown(&mut boundary).await;
    let elapsed = started.elapsed();

    assert_eq!(seen, vec![3, 2, 1, 0]);
    assert!(seen.windows(2).all(|pair| pair[1] <= pair[0]));
    assert_eq!(attempt, 1);
    assert!(elapsed >= Duration::from_secs(3) && elapsed < Duration::from_secs(4));

    let state = boundary.state();
    assert!(!state.has_failure);
    assert_eq!(state.retry_attempt, 1);
    assert_eq!(state.retry_countdown_seconds, 0);

    assert_eq!(
        boundary.render(&mut succeeding()),
        Rendered::Content("recipes")
    );
}

#[tokio::test(start_paused = true)]
async fn scenario_c_manual_retry_interrupts_countdown() {
    let mut boundary = Boundary::new(auto_retry(3000));
    boundary.render(&mut failing(503));

    assert_eq!(
        boundary.next_event().await,
        Some(BoundaryUpdate::Countdown {
            remaining_seconds: 2
        })
    );

    assert_eq!(
        boundary.dispatch(RecoveryActionType::Retry),
        DispatchOutcome::RetryPending { attempt: 1 }
    );
    let state = boundary.state();
    assert_eq!(state.retry_countdown_seconds, 0);
    assert_eq!(state.retry_phase, RetryPhase::Idle);
    assert!(state.is_retrying);
    assert!(boundary.surface().unwrap().retrying);

    assert_eq!(
        boundary.next_event().await,
        Some(BoundaryUpdate::ManualRetried { attempt: 1 })
    );
    assert!(!boundary.has_failure());
    assert_eq!(boundary.state().retry_attempt, 1);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(boundary.drain_ready().is_empty());
    assert_eq!(boundary.state().retry_attempt, 1);
}

#[test]
fn scenario_d_login_primary_pushes_route() {
    let navigation = NavigationLog::new();
    let mut boundary = Boundary::builder(BoundaryConfig::new().with_login_url("/login"))
        .with_router(navigation.clone())
        .build();

    let rendered = boundary.render(&mut failing(401));
    let primary = rendered
        .surface()
        .and_then(|surface| surface.primary_action())
        .map(|action| action.action_type)
        .unwrap();
    assert_eq!(primary, RecoveryActionType::Login);

    assert_eq!(
        boundary.dispatch(primary),
        DispatchOutcome::Navigated("/login".to_string())
    );
    assert_eq!(
        navigation.entries(),
        vec![Navigation::Push("/login".to_string())]
    );
}

#[tokio::test(start_paused = true)]
async fn scenario_e_fourth_failure_gets_no_countdown() {
    let mut boundary = Boundary::new(auto_retry(1000));
    let mut child = failing(500);

    for expected in 1..=3 {
        boundary.render(&mut child);
        assert!(boundary.state().retry_countdown_seconds > 0);
        let (_, attempt) = run_countdown(&mut boundary).await;
        assert_eq!(attempt, expected);
    }

    let rendered = boundary.render(&mut child);
    let surface = rendered.surface().unwrap();
    assert_eq!(surface.countdown_seconds, None);
    assert!(surface.exhausted);
    assert!(surface.has_action(RecoveryActionType::Retry));
    assert!(surface.actions.iter().all(|action| !action.disabled));

    assert_eq!(boundary.state().retry_phase, RetryPhase::Exhausted);
    assert!(!boundary.is_waiting());
    assert_eq!(boundary.next_event().await, None);

    // Exhaustion is idempotent.
    boundary.report(Failure::with_status_code(500, "again"));
    assert_eq!(boundary.state().retry_phase, RetryPhase::Exhausted);
    assert!(!boundary.is_waiting());
}

#[tokio::test(start_paused = true)]
async fn test_reset_cancels_both_timers() {
    let mut boundary = Boundary::new(auto_retry(3000));
    boundary.render(&mut failing(503));
    assert!(boundary.is_waiting());

    boundary.reset();
    assert!(boundary.state().is_all_clear());
    assert!(!boundary.is_waiting());

    tokio::time::sleep(Duration::from_secs(6)).await;
    assert!(boundary.drain_ready().is_empty());
    let state = boundary.state();
    assert!(state.is_all_clear());
    assert_eq!(state.retry_attempt, 0);
}

#[tokio::test(start_paused = true)]
async fn test_unmount_mid_countdown_stops_updates() {
    let (mut boundary, events) = record_analytics(auto_retry(3000));
    boundary.render(&mut failing(503));
    assert!(boundary.next_event().await.is_some());

    boundary.unmount();
    assert!(!boundary.is_waiting());

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(boundary.next_event().await, None);
    assert!(boundary.drain_ready().is_empty());
    assert_eq!(boundary.state().retry_attempt, 0);
    assert_eq!(event_types(&events), vec![AnalyticsEventType::ErrorDisplayed]);
}

#[tokio::test(start_paused = true)]
async fn test_analytics_lifecycle() {
    let (mut boundary, events) = record_analytics(auto_retry(1000));

    boundary.render(&mut failing(503));
    run_countdown(&mut boundary).await;
    assert!(boundary.render(&mut succeeding()).is_content());
    assert_eq!(boundary.state().retry_attempt, 0);

    boundary.render(&mut failing(500));
    boundary.dispatch(RecoveryActionType::Retry);
    assert_eq!(
        boundary.next_event().await,
        Some(BoundaryUpdate::ManualRetried { attempt: 1 })
    );

    assert_eq!(
        event_types(&events),
        vec![
            AnalyticsEventType::ErrorDisplayed,
            AnalyticsEventType::ErrorRetry,
            AnalyticsEventType::ErrorResolved,
            AnalyticsEventType::ErrorDisplayed,
            AnalyticsEventType::ErrorRetry,
            AnalyticsEventType::ErrorResolved,
        ]
    );

    let recorded = events.lock().unwrap();
    assert_eq!(recorded[0].kind, ErrorKind::ServiceUnavailable);
    assert_eq!(recorded[0].status_code, Some(503));
    assert_eq!(recorded[0].retry_attempt, None);
    assert_eq!(recorded[1].retry_attempt, Some(1));
    assert_eq!(recorded[2].retry_attempt, Some(1));
    assert_eq!(recorded[4].retry_attempt, Some(1));
    assert_eq!(recorded[5].retry_attempt, Some(1));
    assert!(recorded.iter().all(|event| event.timestamp_ms > 0));
}

#[test]
fn test_not_found_is_not_tracked() {
    let (mut boundary, events) = record_analytics(BoundaryConfig::new());
    boundary.render(&mut failing(404));
    assert!(event_types(&events).is_empty());

    boundary.reset();
    assert_eq!(event_types(&events), vec![AnalyticsEventType::ErrorResolved]);
}

#[test]
fn test_analytics_disabled_emits_nothing() {
    let events: Recorded = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let mut boundary = Boundary::builder(BoundaryConfig::new())
        .on_analytics_event(move |event| sink.lock().unwrap().push(event.clone()))
        .build();

    boundary.render(&mut failing(500));
    boundary.reset();
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn test_on_error_called_once_per_catch() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let mut boundary = Boundary::builder(BoundaryConfig::new().with_name("recipe-list"))
        .on_error(move |failure, info| {
            sink.lock()
                .unwrap()
                .push((failure.status(), info.boundary.clone(), info.retry_attempt));
        })
        .build();

    let mut child = failing(500);
    boundary.render(&mut child);
    boundary.render(&mut child);

    assert_eq!(
        *calls.lock().unwrap(),
        vec![(Some(500), Some("recipe-list".to_string()), 0)]
    );
}

#[test]
fn test_panicking_callbacks_are_contained() {
    let mut boundary = Boundary::builder(BoundaryConfig::new().with_analytics(true))
        .on_error(|_, _| panic!("reporter offline"))
        .on_analytics_event(|_| panic!("analytics offline"))
        .build();

    let rendered = boundary.render(&mut failing(500));
    assert!(rendered.surface().is_some());
    assert!(boundary.state().has_failure);
}

#[test]
fn test_custom_fallback_replaces_surface() {
    let handle: Arc<Mutex<Option<ResetHandle>>> = Arc::new(Mutex::new(None));
    let stash = Arc::clone(&handle);
    let mut boundary: Boundary<String> =
        Boundary::builder(BoundaryConfig::new().with_home_url("/"))
            .with_fallback(move |props| {
                *stash.lock().unwrap() = Some(props.reset.clone());
                Ok(format!(
                    "{} {} {}",
                    props.metadata.kind,
                    props.error.message(),
                    props.recovery_actions.len()
                ))
            })
            .build();

    let mut child = || Err::<String, _>(Failure::with_status_code(404, "no such recipe"));
    assert_eq!(
        boundary.render(&mut child),
        Rendered::Custom("not-found no such recipe 2".to_string())
    );

    let reset = handle.lock().unwrap().clone().unwrap();
    assert!(reset.reset());
    assert_eq!(boundary.drain_ready(), vec![BoundaryUpdate::Reset]);
    assert!(!boundary.has_failure());
}

#[test]
fn test_failing_fallback_renders_last_resort() {
    let mut broken: Boundary<String> = Boundary::builder(BoundaryConfig::new())
        .with_fallback(|_props| Err(Failure::new("fallback broke")))
        .build();
    let mut child = || Err::<String, _>(Failure::with_status_code(500, "boom"));
    assert_eq!(
        broken.render(&mut child),
        Rendered::LastResort(LAST_RESORT_MESSAGE)
    );
    assert!(broken.has_failure());

    let mut panicking: Boundary<String> = Boundary::builder(BoundaryConfig::new())
        .with_fallback(|_props| -> Result<String, Failure> { panic!("fallback exploded") })
        .build();
    assert_eq!(
        panicking.render(&mut child),
        Rendered::LastResort(LAST_RESORT_MESSAGE)
    );
}

#[test]
fn test_refresh_and_back_use_platform_and_router() {
    let navigation = NavigationLog::new();
    let mut boundary = Boundary::builder(BoundaryConfig::new())
        .with_router(navigation.clone())
        .with_platform(navigation.clone())
        .build();

    boundary.render(&mut failing(408));
    assert_eq!(
        boundary.dispatch(RecoveryActionType::Refresh),
        DispatchOutcome::Reloaded
    );

    boundary.reset();
    boundary.render(&mut failing(410));
    assert_eq!(
        boundary.dispatch(RecoveryActionType::GoBack),
        DispatchOutcome::WentBack
    );

    assert_eq!(
        navigation.entries(),
        vec![Navigation::Reload, Navigation::Back]
    );
}

#[test]
fn test_page_sets_title_and_toggles_details() {
    let navigation = NavigationLog::new();
    let mut boundary = Boundary::builder(BoundaryConfig::new().with_seo(true))
        .with_platform(navigation.clone())
        .build();

    boundary.render(&mut failing(404));
    assert_eq!(
        navigation.entries(),
        vec![Navigation::Title("404 - Page Not Found".to_string())]
    );

    let collapsed = boundary.surface().unwrap();
    assert_eq!(
        collapsed.details.as_ref().map(|d| d.state()),
        Some(PanelState::Collapsed)
    );

    assert!(boundary.toggle_details());
    let expanded = boundary.surface().unwrap();
    let text = SurfaceRenderer::new().with_colors(false).render(&expanded);
    assert!(text.contains("  message: request failed"));
    assert!(text.contains("  status: 404"));
}

#[tokio::test(start_paused = true)]
async fn test_service_tracks_connectivity_and_health() {
    let flag = ConnectivityFlag::new(true);
    let config = BoundaryConfig::service().with_connectivity_poll(Duration::from_secs(30));
    let mut boundary = Boundary::builder(config)
        .with_connectivity(flag.clone())
        .build();

    assert_eq!(boundary.health(), Some(HealthStatus::Healthy));
    boundary.render(&mut failing(503));
    assert_eq!(boundary.health(), Some(HealthStatus::Unhealthy));

    flag.set(false);
    tokio::time::sleep(Duration::from_secs(31)).await;
    assert_eq!(
        boundary.drain_ready(),
        vec![BoundaryUpdate::ConnectivityChanged { online: false }]
    );
    assert!(!boundary.state().network_online);
    assert_eq!(
        boundary.surface().unwrap().health,
        Some(HealthStatus::Offline)
    );

    assert!(boundary.connectivity_handle().set_online(true));
    assert_eq!(
        boundary.drain_ready(),
        vec![BoundaryUpdate::ConnectivityChanged { online: true }]
    );
    assert_eq!(boundary.health(), Some(HealthStatus::Unhealthy));

    // Unchanged signals are not updates.
    boundary.connectivity_handle().set_online(true);
    assert!(boundary.drain_ready().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_service_backoff_grows_per_attempt() {
    let config = BoundaryConfig::service()
        .with_auto_retry(true)
        .with_retry_delay(Duration::from_millis(1000))
        .with_backoff_multiplier(2.0)
        .with_max_retries(3);
    let mut boundary = Boundary::new(config);
    let mut child = failing(503);

    let mut countdowns = Vec::new();
    for _ in 0..3 {
        boundary.render(&mut child);
        countdowns.push(boundary.state().retry_countdown_seconds);
        run_countdown(&mut boundary).await;
    }
    assert_eq!(countdowns, vec![1, 2, 4]);
}

#[test]
fn test_page_ignores_connectivity_signals() {
    let mut boundary: Boundary<View> = Boundary::new(BoundaryConfig::new());
    assert!(boundary.connectivity_handle().set_online(false));
    assert!(boundary.drain_ready().is_empty());
    assert!(boundary.state().network_online);
    assert_eq!(boundary.health(), None);
}

#[test]
fn test_reset_handle_from_another_task() {
    tokio_test::block_on(async {
        let mut boundary = Boundary::new(BoundaryConfig::new());
        boundary.render(&mut failing(500));

        let handle = boundary.reset_handle();
        let sent = tokio::spawn(async move { handle.reset() }).await.unwrap();
        assert!(sent);
        assert_eq!(boundary.drain_ready(), vec![BoundaryUpdate::Reset]);
        assert!(boundary.state().is_all_clear());
    });
}
