use std::{
    sync::{Arc, Mutex, MutexGuard, Weak},
    time::Duration,
};

use time::OffsetDateTime;
use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use crate::{
    domain::{
        models::{FinishedSession, HoursWorked, Session},
        ports::outbound::Clock,
        SessionError,
    },
    time_utils::local_date,
};

use super::SessionSnapshotStore;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Callback invoked with the current session on every tick and state change.
///
/// Listeners run while the coordinator holds its notification lock and must
/// not call back into the coordinator.
pub type SessionListener = Arc<dyn Fn(&Session) + Send + Sync>;

/// Opaque handle returned by [`SessionCoordinator::attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

struct CoordinatorState {
    session: Session,
    // Set by `stop`, taken by a submission, cleared by `reset`.
    finished: Option<FinishedSession>,
    listeners: Vec<(ListenerHandle, SessionListener)>,
    next_listener_id: u64,
    ticker: Option<JoinHandle<()>>,
    hydrated: bool,
}

struct Shared {
    state: Mutex<CoordinatorState>,
    // Held while listeners run so notifications are delivered in mutation order.
    notify: Mutex<()>,
    store: SessionSnapshotStore,
    clock: Arc<dyn Clock>,
    tick_interval: Duration,
}

/// Process-wide owner of the tracked session.
///
/// Views attach and detach freely; the session and its tick loop live as
/// long as the coordinator, not as long as any view. Cloning is cheap and
/// every clone refers to the same session.
#[derive(Clone)]
pub struct SessionCoordinator {
    shared: Arc<Shared>,
}

impl SessionCoordinator {
    pub fn new(store: SessionSnapshotStore, clock: Arc<dyn Clock>) -> Self {
        Self::with_tick_interval(store, clock, DEFAULT_TICK_INTERVAL)
    }

    pub fn with_tick_interval(
        store: SessionSnapshotStore,
        clock: Arc<dyn Clock>,
        tick_interval: Duration,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(CoordinatorState {
                    session: Session::idle(),
                    finished: None,
                    listeners: Vec::new(),
                    next_listener_id: 0,
                    ticker: None,
                    hydrated: false,
                }),
                notify: Mutex::new(()),
                store,
                clock,
                tick_interval,
            }),
        }
    }

    /// Register a listener. The first attach rehydrates from the snapshot store.
    ///
    /// The new listener is immediately called with the current session.
    pub fn attach(&self, listener: SessionListener) -> ListenerHandle {
        let mut state = self.shared.lock_state();

        if !state.hydrated {
            state.hydrated = true;
            if state.session.is_idle() && state.finished.is_none() {
                self.shared.rehydrate(&mut state);
            }
        }

        let handle = ListenerHandle(state.next_listener_id);
        state.next_listener_id += 1;
        state.listeners.push((handle, listener.clone()));

        if state.session.running {
            Shared::ensure_ticker(&self.shared, &mut state);
        }

        tracing::debug!(
            "Listener {:?} attached ({} total)",
            handle,
            state.listeners.len()
        );

        let session = state.session.clone();
        let _notify = self.shared.lock_notify();
        drop(state);
        listener(&session);

        handle
    }

    /// Remove a listener. A running session keeps ticking with no listeners.
    pub fn detach(&self, handle: ListenerHandle) {
        let mut state = self.shared.lock_state();
        state.listeners.retain(|(h, _)| *h != handle);

        if !state.session.running {
            if let Some(ticker) = state.ticker.take() {
                ticker.abort();
            }
        }

        tracing::debug!(
            "Listener {:?} detached ({} remaining)",
            handle,
            state.listeners.len()
        );
    }

    /// Time in. Returns the recorded start instant.
    pub fn start(&self) -> Result<OffsetDateTime, SessionError> {
        let mut state = self.shared.lock_state();
        if state.session.running {
            tracing::debug!("Rejected start: session already running");
            return Err(SessionError::AlreadyRunning);
        }

        if let Some(unsubmitted) = state.finished.take() {
            tracing::warn!(
                "Discarding unsubmitted session of {} from {}",
                unsubmitted.hours_worked(),
                unsubmitted.work_date()
            );
        }

        let started_at = self.shared.clock.now();
        state.session = Session::started(started_at);
        self.shared.persist(&state);
        Shared::ensure_ticker(&self.shared, &mut state);

        tracing::info!("Session started at {}", started_at);
        self.shared.publish(state);
        Ok(started_at)
    }

    /// Time out. Freezes the display and returns the worked duration.
    pub fn stop(&self) -> Result<FinishedSession, SessionError> {
        let mut state = self.shared.lock_state();
        let (true, Some(started_at)) = (state.session.running, state.session.started_at) else {
            tracing::debug!("Rejected stop: no session running");
            return Err(SessionError::NotRunning);
        };

        let now = self.shared.clock.now();
        let worked = HoursWorked::between(started_at, now);
        let finished = FinishedSession::new(worked, local_date(now));
        state.session = Session::finished(worked);
        state.finished = Some(finished.clone());
        self.shared.persist(&state);
        if let Some(ticker) = state.ticker.take() {
            ticker.abort();
        }

        tracing::info!("Session stopped after {}", worked);
        self.shared.publish(state);
        Ok(finished)
    }

    /// The stopped session waiting to be submitted, if any.
    ///
    /// Survives reloads, including zero-length sessions, and is empty while a
    /// submission of it is in flight.
    pub fn pending(&self) -> Option<FinishedSession> {
        self.shared.lock_state().finished.clone()
    }

    /// Claim the pending session for one submission.
    pub(crate) fn take_pending(&self) -> Result<FinishedSession, SessionError> {
        let mut state = self.shared.lock_state();
        if state.session.running {
            return Err(SessionError::StillRunning);
        }
        state.finished.take().ok_or(SessionError::NothingToSubmit)
    }

    /// Hand back a session whose submission failed so it can be retried.
    ///
    /// Dropped if the user has started or stopped a newer session meanwhile.
    pub(crate) fn restore_pending(&self, finished: FinishedSession) {
        let mut state = self.shared.lock_state();
        if state.session.running || state.finished.is_some() {
            tracing::warn!(
                "Dropping unsubmitted session of {}: a newer session replaced it",
                finished.hours_worked()
            );
            return;
        }

        state.session = Session::finished(finished.hours_worked());
        state.finished = Some(finished);
        self.shared.persist(&state);
        self.shared.publish(state);
    }

    /// Clear a session whose submission was stored, unless a newer one took its place.
    pub(crate) fn settle_submitted(&self) -> bool {
        let state = self.shared.lock_state();
        if state.session.running || state.finished.is_some() {
            tracing::debug!("Submission stored; keeping the newer session");
            return false;
        }
        self.shared.clear(state);
        true
    }

    /// Drop a finished session from memory and from the snapshot store.
    ///
    /// Refused if a new session has been started in the meantime.
    pub fn reset(&self) -> Result<(), SessionError> {
        let state = self.shared.lock_state();
        if state.session.running {
            return Err(SessionError::AlreadyRunning);
        }
        self.shared.clear(state);
        Ok(())
    }

    pub fn session(&self) -> Session {
        self.shared.lock_state().session.clone()
    }

    pub fn is_running(&self) -> bool {
        self.shared.lock_state().session.running
    }

    /// Whether a tick loop is currently scheduled.
    pub fn is_ticking(&self) -> bool {
        self.shared
            .lock_state()
            .ticker
            .as_ref()
            .is_some_and(|t| !t.is_finished())
    }

    pub fn listener_count(&self) -> usize {
        self.shared.lock_state().listeners.len()
    }
}

impl Shared {
    fn lock_state(&self) -> MutexGuard<'_, CoordinatorState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_notify(&self) -> MutexGuard<'_, ()> {
        self.notify.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn persist(&self, state: &CoordinatorState) {
        let mut snapshot = state.session.snapshot();
        snapshot.work_date = state.finished.as_ref().map(FinishedSession::work_date);
        self.store.save(&snapshot);
    }

    fn clear(&self, mut state: MutexGuard<'_, CoordinatorState>) {
        state.session = Session::idle();
        state.finished = None;
        self.store.clear();

        tracing::debug!("Session reset");
        self.publish(state);
    }

    /// Notify all listeners with the session in `state`, then release it.
    fn publish(&self, state: MutexGuard<'_, CoordinatorState>) {
        let session = state.session.clone();
        let listeners: Vec<SessionListener> =
            state.listeners.iter().map(|(_, l)| l.clone()).collect();

        let _notify = self.lock_notify();
        drop(state);
        for listener in listeners {
            listener(&session);
        }
    }

    fn rehydrate(&self, state: &mut CoordinatorState) {
        let Some(snapshot) = self.store.load() else {
            return;
        };

        match (snapshot.running, snapshot.started_at()) {
            (true, Some(started_at)) => {
                state.session = Session::resumed(started_at, self.clock.now());
                self.persist(state);
                tracing::info!(
                    "Resumed session started at {} ({} elapsed)",
                    started_at,
                    state.session.elapsed_display
                );
            }
            (false, _) => {
                let Ok(worked) = snapshot.elapsed_display.parse::<HoursWorked>() else {
                    return;
                };
                // Snapshots written before the work date was stored fall back to today.
                let work_date = snapshot
                    .work_date
                    .unwrap_or_else(|| local_date(self.clock.now()));
                state.session = Session::finished(worked);
                state.finished = Some(FinishedSession::new(worked, work_date));
                tracing::debug!("Restored stopped session of {} from {}", worked, work_date);
            }
            (true, None) => {}
        }
    }

    fn ensure_ticker(shared: &Arc<Self>, state: &mut CoordinatorState) {
        if state.ticker.as_ref().is_some_and(|t| !t.is_finished()) {
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No async runtime available; elapsed time will not tick");
            return;
        };

        let weak = Arc::downgrade(shared);
        let period = shared.tick_interval;
        state.ticker = Some(runtime.spawn(run_ticker(weak, period)));
    }

    /// One tick. Returns false once the session is no longer running.
    fn tick(&self) -> bool {
        let mut state = self.lock_state();
        let Some(worked) = state.session.elapsed_at(self.clock.now()) else {
            return false;
        };

        state.session.elapsed_display = worked.to_string();
        self.persist(&state);
        tracing::trace!("Tick {}", state.session.elapsed_display);

        self.publish(state);
        true
    }
}

async fn run_ticker(shared: Weak<Shared>, period: Duration) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        let Some(strong) = shared.upgrade() else {
            break;
        };
        if !strong.tick() {
            break;
        }
    }
}
