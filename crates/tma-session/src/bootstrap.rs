//! Login → profile → roles bootstrap as an explicit state machine.
//!
//! Runs are single-flight per sequencer: every run takes a generation
//! ticket, and a run whose ticket is no longer current drops its results
//! instead of writing them. Starting a new run therefore supersedes any run
//! still in flight, and `dispose` supersedes all of them.

use crate::context::SessionContext;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tma_api_types::{BackendProfile, Role};
use tma_client::{ApiClient, ApiError, HttpTransport};
use tracing::{debug, info, warn};

pub const MAIN_BUTTON_TEXT: &str = "Show More Actions";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failed,
    /// The session recorded an init data problem; nothing was sent.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Authenticating,
    FetchingProfile,
    FetchingRoles,
    Settled(Outcome),
}

impl Phase {
    pub fn is_loading(self) -> bool {
        matches!(
            self,
            Phase::Authenticating | Phase::FetchingProfile | Phase::FetchingRoles
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BootstrapSnapshot {
    pub phase: Phase,
    pub profile: Option<BackendProfile>,
    pub roles: Vec<Role>,
    pub error: Option<String>,
}

impl BootstrapSnapshot {
    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    pub fn can_retry(&self) -> bool {
        self.phase == Phase::Settled(Outcome::Failed)
    }
}

/// What a single `run` call amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Host not ready or no user yet; nothing happened.
    Waiting,
    Settled(Outcome),
    /// A newer run or `dispose` took over; this run's results were dropped.
    Superseded,
}

type Observer = Box<dyn Fn(&BootstrapSnapshot)>;

pub struct BootstrapSequencer<T> {
    session: SessionContext,
    client: Rc<ApiClient<T>>,
    snapshot: RefCell<BootstrapSnapshot>,
    generation: Cell<u64>,
    disposed: Cell<bool>,
    observers: RefCell<Vec<Observer>>,
    last_error: RefCell<Option<ApiError>>,
    main_button_action: RefCell<Option<Rc<dyn Fn()>>>,
    main_button_bound: Cell<bool>,
}

impl<T: HttpTransport> BootstrapSequencer<T> {
    pub fn new(session: SessionContext, client: Rc<ApiClient<T>>) -> Self {
        Self {
            session,
            client,
            snapshot: RefCell::new(BootstrapSnapshot::default()),
            generation: Cell::new(0),
            disposed: Cell::new(false),
            observers: RefCell::new(Vec::new()),
            last_error: RefCell::new(None),
            main_button_action: RefCell::new(None),
            main_button_bound: Cell::new(false),
        }
    }

    /// Click action bound to the host main button after the first
    /// successful run.
    #[must_use]
    pub fn with_main_button_action(self, action: impl Fn() + 'static) -> Self {
        *self.main_button_action.borrow_mut() = Some(Rc::new(action));
        self
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn client(&self) -> &Rc<ApiClient<T>> {
        &self.client
    }

    pub fn snapshot(&self) -> BootstrapSnapshot {
        self.snapshot.borrow().clone()
    }

    /// The failure behind the last `Settled(Failed)`, with its full
    /// `source()` chain. The snapshot only carries its message.
    pub fn take_error(&self) -> Option<ApiError> {
        self.last_error.borrow_mut().take()
    }

    /// Called with a fresh snapshot after every transition.
    pub fn subscribe(&self, observer: impl Fn(&BootstrapSnapshot) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    /// Unmount: in-flight runs finish their I/O but never touch state again.
    pub fn dispose(&self) {
        self.disposed.set(true);
        self.generation.set(self.generation.get() + 1);
        self.observers.borrow_mut().clear();
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// User-triggered retry. Replays the whole sequence from the start.
    pub async fn retry(&self) -> RunOutcome {
        info!("retrying bootstrap sequence");
        self.run().await
    }

    pub async fn run(&self) -> RunOutcome {
        if self.disposed.get() {
            return RunOutcome::Superseded;
        }

        let state = self.session.state();
        if !state.ready || state.user.is_none() {
            debug!(
                ready = state.ready,
                has_user = state.user.is_some(),
                "bootstrap waiting for host readiness"
            );
            return RunOutcome::Waiting;
        }

        let ticket = self.next_ticket();

        if state.init_data_error.is_some() {
            warn!("skipping authentication due to initData error");
            self.update(ticket, |snapshot| {
                snapshot.phase = Phase::Settled(Outcome::Skipped);
                snapshot.error = None;
            });
            return RunOutcome::Settled(Outcome::Skipped);
        }

        self.last_error.borrow_mut().take();
        self.update(ticket, |snapshot| {
            snapshot.phase = Phase::Authenticating;
            snapshot.error = None;
        });

        match self.sequence(ticket).await {
            Ok(Some((profile, roles))) => {
                info!(roles = roles.len(), "bootstrap sequence completed");
                self.update(ticket, |snapshot| {
                    snapshot.phase = Phase::Settled(Outcome::Success);
                    snapshot.profile = Some(profile);
                    snapshot.roles = roles;
                    snapshot.error = None;
                });
                self.surface_main_button();
                RunOutcome::Settled(Outcome::Success)
            }
            Ok(None) => RunOutcome::Superseded,
            Err(err) => {
                if !self.is_current(ticket) {
                    debug!(error = %err, "dropping failure of superseded run");
                    return RunOutcome::Superseded;
                }
                warn!(error = %err, "bootstrap sequence failed");
                let message = err.to_string();
                *self.last_error.borrow_mut() = Some(err);
                self.update(ticket, |snapshot| {
                    snapshot.phase = Phase::Settled(Outcome::Failed);
                    snapshot.profile = None;
                    snapshot.roles.clear();
                    snapshot.error = Some(message);
                });
                RunOutcome::Settled(Outcome::Failed)
            }
        }
    }

    /// `Ok(None)` means the run was superseded part way.
    async fn sequence(
        &self,
        ticket: u64,
    ) -> Result<Option<(BackendProfile, Vec<Role>)>, ApiError> {
        let login = self.client.login_with_telegram().await?;
        if !self.is_current(ticket) {
            return Ok(None);
        }
        debug!(response = %login.0, "authenticated with backend");
        self.transition(ticket, Phase::FetchingProfile);

        let profile = self.client.current_user().await?;
        if !self.is_current(ticket) {
            return Ok(None);
        }

        let Some(user_id) = profile.user_id() else {
            debug!("profile has no usable user id; skipping roles");
            return Ok(Some((profile, Vec::new())));
        };
        self.transition(ticket, Phase::FetchingRoles);

        let roles = self.client.user_roles(&user_id).await?;
        if !self.is_current(ticket) {
            return Ok(None);
        }
        Ok(Some((profile, roles)))
    }

    fn next_ticket(&self) -> u64 {
        let ticket = self.generation.get() + 1;
        self.generation.set(ticket);
        ticket
    }

    fn is_current(&self, ticket: u64) -> bool {
        !self.disposed.get() && self.generation.get() == ticket
    }

    fn transition(&self, ticket: u64, phase: Phase) {
        self.update(ticket, |snapshot| snapshot.phase = phase);
    }

    fn update(&self, ticket: u64, apply: impl FnOnce(&mut BootstrapSnapshot)) {
        if !self.is_current(ticket) {
            return;
        }
        let snapshot = {
            let mut current = self.snapshot.borrow_mut();
            apply(&mut current);
            current.clone()
        };
        for observer in self.observers.borrow().iter() {
            observer(&snapshot);
        }
    }

    fn surface_main_button(&self) {
        let Some(button) = self.session.bridge().and_then(|bridge| bridge.main_button()) else {
            return;
        };
        button.set_text(MAIN_BUTTON_TEXT);
        button.show();

        let action = self.main_button_action.borrow().clone();
        if let Some(action) = action {
            if !self.main_button_bound.replace(true) {
                button.on_click(Box::new(move || action()));
            }
        }
    }
}
