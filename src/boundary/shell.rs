//! The boundary shell: guards a child render and coordinates recovery.
//!
//! The shell owns the classifier, the planner and the retry controller and
//! keeps them in step with one captured failure. Timers never touch the
//! shell directly; they post [`BoundaryEvent`]s to its queue, and the owner
//! drains the queue with [`Boundary::next_event`] or
//! [`Boundary::drain_ready`].

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::{debug, error, info, warn};

use super::config::{BoundaryConfig, BoundaryVariant};
use super::connectivity::{AssumeOnline, Connectivity, ConnectivityHandle, HealthStatus};
use super::hooks::{isolate, AnalyticsEvent, AnalyticsEventType, Hooks, RenderInfo};
use super::navigation::{Detached, Platform, Router};
use super::state::BoundaryState;
use super::BoundaryEvent;
use crate::error::{ErrorClassifier, ErrorMetadata, Failure, MessageDetector};
use crate::recovery::{ActionHandler, RecoveryAction, RecoveryActionType, RecoveryPlanner};
use crate::retry::{timer, RetryController, RetryEmitter, RetryOutcome, RetryPhase, ScopedTask};
use crate::surface::{detail_lines, DetailsPanel, PanelState, RecoverySurface};

/// Shown when a custom fallback itself fails.
pub const LAST_RESORT_MESSAGE: &str =
    "Something went wrong and the error page could not be displayed. Please reload the page.";

/// A child render guarded by a boundary.
pub trait Guarded<V> {
    fn render(&mut self) -> Result<V, Failure>;
}

impl<V, F> Guarded<V> for F
where
    F: FnMut() -> Result<V, Failure>,
{
    fn render(&mut self) -> Result<V, Failure> {
        self()
    }
}

/// What a custom fallback receives.
pub struct FallbackProps<'a> {
    pub error: &'a Failure,
    pub metadata: &'a ErrorMetadata,
    pub recovery_actions: Vec<RecoveryAction>,
    pub reset: ResetHandle,
}

/// Replaces the built-in recovery surface entirely.
pub trait FallbackRenderer<V> {
    fn render(&self, props: FallbackProps<'_>) -> Result<V, Failure>;
}

impl<V, F> FallbackRenderer<V> for F
where
    F: Fn(FallbackProps<'_>) -> Result<V, Failure>,
{
    fn render(&self, props: FallbackProps<'_>) -> Result<V, Failure> {
        self(props)
    }
}

/// Asks a boundary to reset. Cloneable; safe to keep after unmount.
#[derive(Debug, Clone)]
pub struct ResetHandle {
    sender: mpsc::UnboundedSender<BoundaryEvent>,
}

impl ResetHandle {
    /// Queues a reset. Returns false once the boundary is gone.
    pub fn reset(&self) -> bool {
        self.sender.send(BoundaryEvent::Reset).is_ok()
    }
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered<V> {
    /// The child rendered; its output is passed through unchanged.
    Content(V),
    /// The custom fallback rendered.
    Custom(V),
    /// The built-in recovery surface.
    Surface(RecoverySurface),
    /// The custom fallback failed too.
    LastResort(&'static str),
}

impl<V> Rendered<V> {
    pub fn is_content(&self) -> bool {
        matches!(self, Rendered::Content(_))
    }

    pub fn content(self) -> Option<V> {
        match self {
            Rendered::Content(view) => Some(view),
            _ => None,
        }
    }

    pub fn surface(&self) -> Option<&RecoverySurface> {
        match self {
            Rendered::Surface(surface) => Some(surface),
            _ => None,
        }
    }
}

/// A visible change produced by a queued event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryUpdate {
    /// The countdown moved.
    Countdown { remaining_seconds: u32 },
    /// The countdown expired and the boundary reset.
    AutoRetried { attempt: u32 },
    /// A manual retry finished its optimistic window and the boundary reset.
    ManualRetried { attempt: u32 },
    /// A fallback requested a reset.
    Reset,
    /// Service variant: connectivity flipped.
    ConnectivityChanged { online: bool },
}

/// What [`Boundary::dispatch`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A manual retry is in flight; the boundary resets when it elapses.
    RetryPending { attempt: u32 },
    /// The boundary reset immediately.
    Reset,
    Reloaded,
    WentBack,
    Navigated(String),
    /// The action's custom handler ran.
    Handled,
    /// The action is not offered for the current failure.
    Unavailable,
    /// No failure is held, or the action is disabled.
    Ignored,
}

struct Captured {
    error: Failure,
    metadata: ErrorMetadata,
}

struct ManualRetry {
    generation: u64,
    task: ScopedTask,
}

/// Builds a [`Boundary`].
pub struct BoundaryBuilder<V> {
    config: BoundaryConfig,
    hooks: Hooks,
    classifier: Option<ErrorClassifier>,
    handlers: Vec<(RecoveryActionType, ActionHandler)>,
    router: Arc<dyn Router>,
    platform: Arc<dyn Platform>,
    probe: Arc<dyn Connectivity>,
    fallback: Option<Box<dyn FallbackRenderer<V>>>,
}

impl<V> BoundaryBuilder<V> {
    pub fn new(config: BoundaryConfig) -> Self {
        Self {
            config,
            hooks: Hooks::default(),
            classifier: None,
            handlers: Vec::new(),
            router: Arc::new(Detached),
            platform: Arc::new(Detached),
            probe: Arc::new(AssumeOnline),
            fallback: None,
        }
    }

    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn on_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Failure, &RenderInfo) + Send + Sync + 'static,
    {
        self.hooks = self.hooks.on_error(hook);
        self
    }

    pub fn on_analytics_event<F>(mut self, hook: F) -> Self
    where
        F: Fn(&AnalyticsEvent) + Send + Sync + 'static,
    {
        self.hooks = self.hooks.on_analytics_event(hook);
        self
    }

    /// Replaces the classifier derived from the configuration.
    pub fn with_classifier(mut self, classifier: ErrorClassifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Runs `handler` for `action_type` when no destination URL is set.
    pub fn with_action_handler<F>(mut self, action_type: RecoveryActionType, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let handler: ActionHandler = Arc::new(handler);
        self.handlers.push((action_type, handler));
        self
    }

    pub fn with_router<R: Router + 'static>(mut self, router: R) -> Self {
        self.router = Arc::new(router);
        self
    }

    pub fn with_platform<P: Platform + 'static>(mut self, platform: P) -> Self {
        self.platform = Arc::new(platform);
        self
    }

    /// Probe polled by the service variant.
    pub fn with_connectivity<C: Connectivity + 'static>(mut self, probe: C) -> Self {
        self.probe = Arc::new(probe);
        self
    }

    pub fn with_fallback<F>(mut self, fallback: F) -> Self
    where
        F: Fn(FallbackProps<'_>) -> Result<V, Failure> + 'static,
    {
        self.fallback = Some(Box::new(fallback));
        self
    }

    pub fn with_fallback_renderer<R>(mut self, fallback: R) -> Self
    where
        R: FallbackRenderer<V> + 'static,
    {
        self.fallback = Some(Box::new(fallback));
        self
    }

    /// Mounts the boundary. The service variant starts its connectivity
    /// poll here, so call this inside a tokio runtime.
    pub fn build(self) -> Boundary<V> {
        let config = self.config;

        let classifier = self.classifier.unwrap_or_else(|| {
            let classifier =
                ErrorClassifier::new().with_overrides(config.status_overrides.clone());
            if config.detect_from_message {
                classifier.with_detector(MessageDetector::new())
            } else {
                classifier
            }
        });

        let planner = self
            .handlers
            .into_iter()
            .fold(RecoveryPlanner::new(config.urls()), |planner, (kind, handler)| {
                planner.with_handler(kind, handler)
            });

        let (sender, events) = mpsc::unbounded_channel();
        let retry_sender = sender.clone();
        let emit: RetryEmitter =
            Arc::new(move |event| retry_sender.send(BoundaryEvent::Retry(event)).is_ok());
        let retry = RetryController::new(config.retry_policy(), config.max_retries, emit);

        let service = config.variant == BoundaryVariant::Service;
        let network_online = !service || self.probe.is_online();
        let poll = if service {
            start_poll(&config, Arc::clone(&self.probe), sender.clone())
        } else {
            None
        };

        debug!(
            boundary = config.name.as_deref().unwrap_or("boundary"),
            variant = ?config.variant,
            auto_retry = config.enable_auto_retry,
            max_retries = config.max_retries,
            "boundary mounted"
        );

        Boundary {
            config,
            hooks: self.hooks,
            classifier,
            planner,
            router: self.router,
            platform: self.platform,
            fallback: self.fallback,
            retry,
            captured: None,
            details: PanelState::Collapsed,
            network_online,
            recovering: false,
            manual: None,
            manual_generation: 0,
            poll,
            sender,
            events,
            mounted: true,
        }
    }
}

fn start_poll(
    config: &BoundaryConfig,
    probe: Arc<dyn Connectivity>,
    sender: mpsc::UnboundedSender<BoundaryEvent>,
) -> Option<ScopedTask> {
    let period = config.connectivity_poll();
    if period.is_zero() {
        warn!("connectivity polling disabled: poll period is zero");
        return None;
    }
    timer::every(period, move || {
        sender
            .send(BoundaryEvent::Connectivity(probe.is_online()))
            .is_ok()
    })
}

/// Guards a child render and recovers from its failures.
pub struct Boundary<V> {
    config: BoundaryConfig,
    hooks: Hooks,
    classifier: ErrorClassifier,
    planner: RecoveryPlanner,
    router: Arc<dyn Router>,
    platform: Arc<dyn Platform>,
    fallback: Option<Box<dyn FallbackRenderer<V>>>,
    retry: RetryController,
    captured: Option<Captured>,
    details: PanelState,
    network_online: bool,
    /// Set by a reset; cleared by the next render, successful or not.
    recovering: bool,
    manual: Option<ManualRetry>,
    manual_generation: u64,
    poll: Option<ScopedTask>,
    sender: mpsc::UnboundedSender<BoundaryEvent>,
    events: mpsc::UnboundedReceiver<BoundaryEvent>,
    mounted: bool,
}

impl<V> Boundary<V> {
    pub fn builder(config: BoundaryConfig) -> BoundaryBuilder<V> {
        BoundaryBuilder::new(config)
    }

    /// Mounts a boundary with no hooks, navigation or custom fallback.
    pub fn new(config: BoundaryConfig) -> Self {
        BoundaryBuilder::new(config).build()
    }

    pub fn config(&self) -> &BoundaryConfig {
        &self.config
    }

    pub fn has_failure(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn name(&self) -> &str {
        self.config.name.as_deref().unwrap_or("boundary")
    }

    /// Renders the child, or the recovery view while a failure is held.
    ///
    /// Errors and panics from the child are captured; nothing escapes.
    pub fn render<G>(&mut self, child: &mut G) -> Rendered<V>
    where
        G: Guarded<V> + ?Sized,
    {
        if self.captured.is_none() {
            match catch_unwind(AssertUnwindSafe(|| child.render())) {
                Ok(Ok(view)) => {
                    self.child_rendered();
                    return Rendered::Content(view);
                }
                Ok(Err(failure)) => self.report(failure),
                Err(payload) => self.report(Failure::from_panic(payload)),
            }
        }
        self.render_recovery()
    }

    fn child_rendered(&mut self) {
        if !self.recovering {
            return;
        }
        self.recovering = false;
        info!(
            boundary = self.name(),
            attempts = self.retry.attempt(),
            "child recovered"
        );
        self.retry.mark_recovered();
    }

    fn render_recovery(&self) -> Rendered<V> {
        let Some(captured) = &self.captured else {
            return Rendered::LastResort(LAST_RESORT_MESSAGE);
        };

        let Some(fallback) = &self.fallback else {
            return match self.surface() {
                Some(surface) => Rendered::Surface(surface),
                None => Rendered::LastResort(LAST_RESORT_MESSAGE),
            };
        };

        let props = FallbackProps {
            error: &captured.error,
            metadata: &captured.metadata,
            recovery_actions: self.recovery_actions(),
            reset: self.reset_handle(),
        };
        match catch_unwind(AssertUnwindSafe(|| fallback.render(props))) {
            Ok(Ok(view)) => Rendered::Custom(view),
            Ok(Err(failure)) => {
                error!(
                    boundary = self.name(),
                    error = %failure,
                    "custom fallback failed; showing last-resort message"
                );
                Rendered::LastResort(LAST_RESORT_MESSAGE)
            }
            Err(payload) => {
                let failure = Failure::from_panic(payload);
                error!(
                    boundary = self.name(),
                    error = %failure,
                    "custom fallback panicked; showing last-resort message"
                );
                Rendered::LastResort(LAST_RESORT_MESSAGE)
            }
        }
    }

    /// Captures a failure raised outside a render pass.
    ///
    /// A failure already held is replaced wholesale, and any pending
    /// countdown or manual retry is cancelled.
    pub fn report(&mut self, failure: Failure) {
        let metadata = self.classifier.classify(&failure);
        warn!(
            boundary = self.name(),
            kind = %metadata.kind,
            status = ?metadata.status_code,
            retryable = metadata.retryable,
            error = %failure,
            "failure captured"
        );

        self.recovering = false;
        self.manual = None;
        self.details = PanelState::Collapsed;

        let info = RenderInfo {
            boundary: self.config.name.clone(),
            variant: self.config.variant,
            retry_attempt: self.retry.attempt(),
        };
        self.hooks.error(&failure, &info);

        if self.config.variant == BoundaryVariant::Page && self.config.enable_seo {
            let title = metadata.kind.document_title();
            let platform = &self.platform;
            isolate("set_title", || platform.set_title(title));
        }

        if metadata.kind.is_tracked() {
            self.emit(AnalyticsEvent::new(
                AnalyticsEventType::ErrorDisplayed,
                &metadata,
            ));
        }

        let auto_retry = self.config.enable_auto_retry && self.mounted;
        let phase = self.retry.arm(metadata.retryable, auto_retry);
        debug!(boundary = self.name(), ?phase, "retry controller armed");

        self.captured = Some(Captured {
            error: failure,
            metadata,
        });
    }

    /// Returns to the all-clear state and cancels every pending retry.
    ///
    /// The attempt count survives; it starts over once the child renders.
    pub fn reset(&mut self) {
        self.retry.cancel();
        self.manual = None;
        self.details = PanelState::Collapsed;

        let Some(captured) = self.captured.take() else {
            return;
        };
        self.recovering = true;
        info!(
            boundary = self.name(),
            kind = %captured.metadata.kind,
            attempt = self.retry.attempt(),
            "boundary reset"
        );
        self.emit(
            AnalyticsEvent::new(AnalyticsEventType::ErrorResolved, &captured.metadata)
                .with_retry_attempt(self.retry.attempt()),
        );
    }

    fn emit(&self, event: AnalyticsEvent) {
        if !self.config.enable_analytics {
            return;
        }
        debug!(event = %event.event, kind = %event.kind, "analytics event");
        self.hooks.analytics(&event);
    }

    /// Runs a recovery action offered for the current failure.
    pub fn dispatch(&mut self, action_type: RecoveryActionType) -> DispatchOutcome {
        if self.captured.is_none() {
            return DispatchOutcome::Ignored;
        }
        let Some(action) = self
            .recovery_actions()
            .into_iter()
            .find(|action| action.action_type == action_type)
        else {
            debug!(action = %action_type, "action not offered for this failure");
            return DispatchOutcome::Unavailable;
        };
        if action.disabled {
            return DispatchOutcome::Ignored;
        }

        info!(boundary = self.name(), action = %action_type, "recovery action dispatched");
        match action_type {
            RecoveryActionType::Retry => self.manual_retry(),
            RecoveryActionType::Refresh => {
                let platform = &self.platform;
                isolate("reload", || platform.reload());
                DispatchOutcome::Reloaded
            }
            RecoveryActionType::GoBack => {
                let router = &self.router;
                isolate("back", || router.back());
                DispatchOutcome::WentBack
            }
            _ => {
                if let Some(url) = action.destination_url {
                    let router = &self.router;
                    isolate("push", || router.push(&url));
                    DispatchOutcome::Navigated(url)
                } else if let Some(handler) = action.handler {
                    isolate("action handler", || handler());
                    DispatchOutcome::Handled
                } else {
                    DispatchOutcome::Unavailable
                }
            }
        }
    }

    fn manual_retry(&mut self) -> DispatchOutcome {
        let attempt = self.retry.manual_retry();
        if let Some(captured) = &self.captured {
            self.emit(
                AnalyticsEvent::new(AnalyticsEventType::ErrorRetry, &captured.metadata)
                    .with_retry_attempt(attempt),
            );
        }

        self.manual_generation += 1;
        let generation = self.manual_generation;
        let sender = self.sender.clone();
        let task = timer::after(self.config.manual_retry_delay(), move || {
            if sender
                .send(BoundaryEvent::ManualRetryElapsed { generation })
                .is_err()
            {
                debug!(generation, "manual retry elapsed after unmount");
            }
        });

        match task {
            Some(task) => {
                self.manual = Some(ManualRetry { generation, task });
                DispatchOutcome::RetryPending { attempt }
            }
            None => {
                self.reset();
                DispatchOutcome::Reset
            }
        }
    }

    /// Page variant: shows or hides the raw error details. Returns the new
    /// visibility.
    pub fn toggle_details(&mut self) -> bool {
        if self.config.variant != BoundaryVariant::Page || self.captured.is_none() {
            return false;
        }
        self.details.toggle();
        debug!(visible = self.details.is_expanded(), "details panel toggled");
        self.details.is_expanded()
    }

    /// Waits for the next queued event that changes what is shown.
    ///
    /// Returns `None` once unmounted, or when nothing is queued and no
    /// countdown or manual retry is pending.
    pub async fn next_event(&mut self) -> Option<BoundaryUpdate> {
        loop {
            if !self.mounted {
                return None;
            }
            let event = match self.events.try_recv() {
                Ok(event) => event,
                Err(TryRecvError::Disconnected) => return None,
                Err(TryRecvError::Empty) if self.is_waiting() => self.events.recv().await?,
                // A timer that has just finished queued its event first.
                Err(TryRecvError::Empty) => self.events.try_recv().ok()?,
            };
            if let Some(update) = self.apply(event) {
                return Some(update);
            }
        }
    }

    /// Applies every event already queued, without waiting.
    pub fn drain_ready(&mut self) -> Vec<BoundaryUpdate> {
        let mut updates = Vec::new();
        while self.mounted {
            match self.events.try_recv() {
                Ok(event) => updates.extend(self.apply(event)),
                Err(_) => break,
            }
        }
        updates
    }

    fn apply(&mut self, event: BoundaryEvent) -> Option<BoundaryUpdate> {
        match event {
            BoundaryEvent::Retry(event) => match self.retry.on_event(event) {
                RetryOutcome::Ticked { remaining_seconds } => {
                    debug!(boundary = self.name(), remaining_seconds, "retry countdown");
                    Some(BoundaryUpdate::Countdown { remaining_seconds })
                }
                RetryOutcome::Fired { attempt } => {
                    if let Some(captured) = &self.captured {
                        self.emit(
                            AnalyticsEvent::new(AnalyticsEventType::ErrorRetry, &captured.metadata)
                                .with_retry_attempt(attempt),
                        );
                    }
                    self.reset();
                    Some(BoundaryUpdate::AutoRetried { attempt })
                }
                RetryOutcome::Stale => {
                    debug!(generation = event.generation(), "stale retry event discarded");
                    None
                }
            },
            BoundaryEvent::ManualRetryElapsed { generation } => {
                if self.manual.as_ref().map(|manual| manual.generation) != Some(generation) {
                    return None;
                }
                self.reset();
                Some(BoundaryUpdate::ManualRetried {
                    attempt: self.retry.attempt(),
                })
            }
            BoundaryEvent::Reset => {
                if self.captured.is_none() {
                    return None;
                }
                self.reset();
                Some(BoundaryUpdate::Reset)
            }
            BoundaryEvent::Connectivity(online) => {
                if self.config.variant != BoundaryVariant::Service || online == self.network_online
                {
                    return None;
                }
                self.network_online = online;
                info!(boundary = self.name(), online, "connectivity changed");
                Some(BoundaryUpdate::ConnectivityChanged { online })
            }
        }
    }

    /// True while a countdown or a manual retry will still post an event.
    pub fn is_waiting(&self) -> bool {
        self.mounted
            && (self.retry.has_pending_timer()
                || self
                    .manual
                    .as_ref()
                    .is_some_and(|manual| manual.task.is_active()))
    }

    pub fn state(&self) -> BoundaryState {
        let service = self.config.variant == BoundaryVariant::Service;
        BoundaryState {
            has_failure: self.captured.is_some(),
            captured_error: self.captured.as_ref().map(|c| c.error.clone()),
            metadata: self.captured.as_ref().map(|c| c.metadata.clone()),
            retry_attempt: self.retry.attempt(),
            is_retrying: self.manual.is_some() || self.retry.is_counting_down(),
            retry_countdown_seconds: self.retry.remaining_seconds(),
            retry_phase: self.retry.phase(),
            details_visible: !service && self.details.is_expanded(),
            network_online: !service || self.network_online,
        }
    }

    /// Actions for the current failure; empty when none is held. Retry is
    /// disabled while a manual retry is in flight.
    pub fn recovery_actions(&self) -> Vec<RecoveryAction> {
        let Some(captured) = &self.captured else {
            return Vec::new();
        };
        let mut actions = self.planner.plan(captured.metadata.kind);
        if self.manual.is_some() {
            for action in actions
                .iter_mut()
                .filter(|action| action.action_type == RecoveryActionType::Retry)
            {
                action.disabled = true;
            }
        }
        actions
    }

    /// The built-in recovery view for the current failure.
    pub fn surface(&self) -> Option<RecoverySurface> {
        let captured = self.captured.as_ref()?;
        let mut surface = RecoverySurface::new(&captured.metadata, &self.recovery_actions());
        surface.countdown_seconds = self
            .retry
            .is_counting_down()
            .then(|| self.retry.remaining_seconds());
        surface.retrying = self.manual.is_some();
        surface.exhausted = self.retry.phase() == RetryPhase::Exhausted;
        surface.retry_attempt = self.retry.attempt();
        surface.max_retries = self.retry.max_retries();
        surface.boundary = self.config.name.clone();
        match self.config.variant {
            BoundaryVariant::Page => {
                surface.details = Some(
                    DetailsPanel::new(detail_lines(&captured.error, &captured.metadata))
                        .with_state(self.details),
                );
            }
            BoundaryVariant::Service => surface.health = self.health(),
        }
        Some(surface)
    }

    /// Service variant only.
    pub fn health(&self) -> Option<HealthStatus> {
        (self.config.variant == BoundaryVariant::Service).then(|| {
            HealthStatus::derive(
                self.network_online,
                self.captured.as_ref().map(|c| &c.metadata),
            )
        })
    }

    pub fn connectivity_handle(&self) -> ConnectivityHandle {
        ConnectivityHandle::new(self.sender.clone())
    }

    pub fn reset_handle(&self) -> ResetHandle {
        ResetHandle {
            sender: self.sender.clone(),
        }
    }

    /// Cancels every timer and stops accepting events. Idempotent.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.retry.cancel();
        self.manual = None;
        self.poll = None;
        self.events.close();
        while self.events.try_recv().is_ok() {}
        info!(boundary = self.name(), "boundary unmounted");
    }
}

impl<V> Drop for Boundary<V> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<V> fmt::Debug for Boundary<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Boundary")
            .field("config", &self.config)
            .field("retry", &self.retry)
            .field("has_failure", &self.captured.is_some())
            .field("manual_retry", &self.manual.is_some())
            .field("polling", &self.poll.is_some())
            .field("mounted", &self.mounted)
            .finish()
    }
}
