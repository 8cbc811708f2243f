//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the terminal driver but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`stageroom_app::Runtime`] orchestration code runs in both production and
//! simulation.
//!
//! The driver is a cheap handle over shared state: keep a clone to script
//! steps before the run and to inspect renders and alerts after it.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use stageroom_app::{App, AppEvent, Driver, ViewMode, ViewState};
use stageroom_core::{RoleName, StoreReader};
use thiserror::Error;

use crate::{ClientSnapshot, InvariantRegistry};

/// Error type for simulation driver.
#[derive(Debug, Clone, Error)]
pub enum SimDriverError {
    /// An invariant failed at a quiescent point.
    #[error("invariant violation at poll {poll}: {details}")]
    Invariant {
        /// Poll count when the check failed.
        poll: usize,
        /// Every violation, one per line.
        details: String,
    },
}

/// One scripted step.
enum Step {
    /// Deliver a batch of user events.
    Input(Vec<AppEvent>),
    /// Run a closure against the outside world, e.g. a room handle.
    Outside(Box<dyn FnOnce() + Send>),
}

/// What the driver observed on one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// View state at render time.
    pub view: ViewState,
    /// Roster labels at render time.
    pub roster: Vec<String>,
}

#[derive(Default)]
struct SharedState {
    script: VecDeque<Step>,
    frames: Vec<Frame>,
    alerts: Vec<String>,
    polls: usize,
    stopped: bool,
    /// Local role at the first poll of the current room session.
    role_at_connect: Option<RoleName>,
    in_room: bool,
}

/// Invariant checking against a live store view.
struct Checker {
    registry: InvariantRegistry,
    store: Box<dyn StoreReader + Send + Sync>,
}

/// Simulation driver for deterministic testing.
///
/// Each poll delivers the next scripted step. When the script runs out the
/// driver reports [`AppEvent::Unload`], so every run ends with the App
/// leaving the room and quitting.
#[derive(Clone)]
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
    checker: Option<Arc<Checker>>,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SimDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimDriver").field("checks", &self.checker.is_some()).finish_non_exhaustive()
    }
}

impl SimDriver {
    /// Create a simulation driver with an empty script.
    pub fn new() -> Self {
        Self { state: Arc::new(Mutex::new(SharedState::default())), checker: None }
    }

    /// Check invariants at every poll against `store`.
    ///
    /// Polls happen only once every store notification has been applied, so
    /// the App must agree with the store each time.
    #[must_use]
    pub fn with_invariants(
        mut self,
        registry: InvariantRegistry,
        store: impl StoreReader + Send + Sync + 'static,
    ) -> Self {
        self.checker = Some(Arc::new(Checker { registry, store: Box::new(store) }));
        self
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Script a batch of user events.
    pub fn push_input(&self, events: impl IntoIterator<Item = AppEvent>) {
        self.lock().script.push_back(Step::Input(events.into_iter().collect()));
    }

    /// Script a single user event.
    pub fn push_event(&self, event: AppEvent) {
        self.push_input([event]);
    }

    /// Script an outside action, run when its step is reached.
    pub fn push_outside(&self, f: impl FnOnce() + Send + 'static) {
        self.lock().script.push_back(Step::Outside(Box::new(f)));
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> Vec<Frame> {
        self.lock().frames.clone()
    }

    /// Alerts shown so far.
    pub fn alerts(&self) -> Vec<String> {
        self.lock().alerts.clone()
    }

    /// Number of polls so far.
    pub fn polls(&self) -> usize {
        self.lock().polls
    }

    /// Whether the runtime released the driver.
    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }

    fn check(&self, app: &App, poll: usize) -> Result<(), SimDriverError> {
        let Some(checker) = &self.checker else {
            return Ok(());
        };
        let role_at_connect = self.track_connect_role(app, checker.store.as_ref());
        let snapshot = ClientSnapshot::capture(app, checker.store.as_ref())
            .with_role_at_connect(role_at_connect);
        checker.registry.check_all(&snapshot).map_err(|violations| {
            let details: Vec<_> = violations.iter().map(ToString::to_string).collect();
            SimDriverError::Invariant { poll, details: details.join("\n") }
        })
    }

    /// Record the store's local role on the first poll after the App enters
    /// the room; forget it once the App is back on the join form.
    fn track_connect_role(&self, app: &App, store: &dyn StoreReader) -> Option<RoleName> {
        let mut state = self.lock();
        let in_room = app.view().mode == ViewMode::Room;
        if !in_room {
            state.role_at_connect = None;
        } else if !state.in_room {
            state.role_at_connect = store.local_role().map(|r| r.name);
        }
        state.in_room = in_room;
        state.role_at_connect.clone()
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_events(&mut self, app: &App) -> Result<Vec<AppEvent>, Self::Error> {
        let (poll, step) = {
            let mut state = self.lock();
            state.polls += 1;
            (state.polls, state.script.pop_front())
        };
        self.check(app, poll)?;

        match step {
            Some(Step::Input(events)) => Ok(events),
            Some(Step::Outside(f)) => {
                f();
                Ok(vec![])
            },
            None => Ok(vec![AppEvent::Unload]),
        }
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        let frame = Frame {
            view: *app.view(),
            roster: app.roster().iter().map(|e| e.label.clone()).collect(),
        };
        self.lock().frames.push(frame);
        Ok(())
    }

    fn alert(&mut self, _app: &App, message: &str) -> Result<(), Self::Error> {
        tracing::debug!(%message, "alert");
        self.lock().alerts.push(message.to_string());
        Ok(())
    }

    fn stop(&mut self) {
        self.lock().stopped = true;
    }
}
