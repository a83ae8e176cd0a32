//! Session state built once from the host bridge, plus the provider scope
//! through which views reach it.

use crate::bridge::{HostBridge, HostIdentity};
use crate::theme::{ThemeSurface, apply_theme};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;
use thiserror::Error;
use tma_api_types::HostUser;
use tma_client::InitData;
use tracing::{debug, error};

pub const HOST_UNAVAILABLE_MESSAGE: &str =
    "Telegram WebApp is not available. Please open this app from Telegram.";
pub const MISSING_INIT_DATA_MESSAGE: &str =
    "Telegram initData is missing. This app needs to be opened from Telegram.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Set only after theme variables were applied.
    pub ready: bool,
    pub user: Option<HostUser>,
    pub telegram_available: bool,
    /// Non-fatal unless `telegram_available` is false.
    pub init_data_error: Option<String>,
}

struct SessionInner {
    state: SessionState,
    identity: HostIdentity,
    bridge: Option<Rc<dyn HostBridge>>,
}

/// Read-only, single-assignment session handle. Clones share one state.
#[derive(Clone)]
pub struct SessionContext {
    inner: Rc<SessionInner>,
}

impl SessionContext {
    /// Runs the one-time host initialization.
    ///
    /// A missing bridge stops immediately with no side effects. A missing
    /// credential is recorded but initialization continues in degraded mode.
    pub fn initialize(bridge: Option<Rc<dyn HostBridge>>, surface: &dyn ThemeSurface) -> Self {
        let Some(bridge) = bridge else {
            error!("Telegram WebApp is not available");
            return Self::from_parts(
                SessionState {
                    ready: false,
                    user: None,
                    telegram_available: false,
                    init_data_error: Some(HOST_UNAVAILABLE_MESSAGE.to_owned()),
                },
                HostIdentity::default(),
                None,
            );
        };

        let identity = HostIdentity::from_bridge(bridge.as_ref());
        let mut state = SessionState {
            telegram_available: true,
            ..SessionState::default()
        };

        if identity.init_data().is_empty() {
            error!("Telegram initData is missing");
            state.init_data_error = Some(MISSING_INIT_DATA_MESSAGE.to_owned());
        }

        match apply_theme(surface, &bridge.theme_params()) {
            Ok(()) => {
                state.user = identity.user().cloned();
                bridge.ready();
                bridge.expand();
                state.ready = true;
                debug!(has_user = state.user.is_some(), "Telegram WebApp initialized");
            }
            Err(err) => {
                error!(error = %err, "error initializing Telegram WebApp");
                state.init_data_error = Some(format!("Error initializing Telegram WebApp: {err}"));
            }
        }

        Self::from_parts(state, identity, Some(bridge))
    }

    fn from_parts(
        state: SessionState,
        identity: HostIdentity,
        bridge: Option<Rc<dyn HostBridge>>,
    ) -> Self {
        Self {
            inner: Rc::new(SessionInner {
                state,
                identity,
                bridge,
            }),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.inner.state
    }

    pub fn ready(&self) -> bool {
        self.inner.state.ready
    }

    pub fn user(&self) -> Option<&HostUser> {
        self.inner.state.user.as_ref()
    }

    pub fn telegram_available(&self) -> bool {
        self.inner.state.telegram_available
    }

    pub fn init_data_error(&self) -> Option<&str> {
        self.inner.state.init_data_error.as_deref()
    }

    pub fn init_data(&self) -> &InitData {
        self.inner.identity.init_data()
    }

    pub fn bridge(&self) -> Option<&Rc<dyn HostBridge>> {
        self.inner.bridge.as_ref()
    }

    pub fn same_session(&self, other: &SessionContext) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("state", &self.inner.state)
            .field("init_data", self.inner.identity.init_data())
            .field("bridge", &self.inner.bridge.is_some())
            .finish()
    }
}

// ── Provider scope ──

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("session context used outside of a mounted session provider")]
    NotProvided,
}

thread_local! {
    static PROVIDED: RefCell<Vec<(u64, SessionContext)>> = const { RefCell::new(Vec::new()) };
    static NEXT_MOUNT: Cell<u64> = const { Cell::new(0) };
}

/// Keeps a provided session mounted; dropping it unmounts.
#[must_use = "the session is unmounted as soon as the guard is dropped"]
pub struct ProviderGuard {
    mount_id: u64,
    _not_send: PhantomData<Rc<()>>,
}

impl Drop for ProviderGuard {
    fn drop(&mut self) {
        let mount_id = self.mount_id;
        // The stack may already be gone during thread teardown.
        let _ = PROVIDED.try_with(|stack| stack.borrow_mut().retain(|(id, _)| *id != mount_id));
    }
}

/// Mounts `ctx` for the current thread. The most recent mount wins.
pub fn provide(ctx: SessionContext) -> ProviderGuard {
    let mount_id = NEXT_MOUNT.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    });
    PROVIDED.with(|stack| stack.borrow_mut().push((mount_id, ctx)));
    ProviderGuard {
        mount_id,
        _not_send: PhantomData,
    }
}

pub fn try_use_session() -> Result<SessionContext, ContextError> {
    PROVIDED.with(|stack| {
        stack
            .borrow()
            .last()
            .map(|(_, ctx)| ctx.clone())
            .ok_or(ContextError::NotProvided)
    })
}

/// # Panics
///
/// Panics when no provider is mounted. That is a wiring bug, not a
/// recoverable runtime condition.
pub fn use_session() -> SessionContext {
    match try_use_session() {
        Ok(ctx) => ctx,
        Err(err) => panic!("{err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBridge, RecordingSurface, ada};
    use crate::theme::{BUTTON_COLOR_VAR, TEXT_COLOR_RGB_VAR};
    use tma_api_types::ThemeParams;

    fn bridge(fake: FakeBridge) -> (Rc<FakeBridge>, Option<Rc<dyn HostBridge>>) {
        let fake = Rc::new(fake);
        let dyn_bridge: Rc<dyn HostBridge> = fake.clone();
        (fake, Some(dyn_bridge))
    }

    #[test]
    fn missing_bridge_is_fatal_and_side_effect_free() {
        let surface = RecordingSurface::default();
        let ctx = SessionContext::initialize(None, &surface);

        assert!(!ctx.telegram_available());
        assert!(!ctx.ready());
        assert_eq!(ctx.init_data_error(), Some(HOST_UNAVAILABLE_MESSAGE));
        assert!(surface.names().is_empty());
        assert!(ctx.bridge().is_none());
    }

    #[test]
    fn full_initialization_applies_theme_then_signals_host() {
        let theme = ThemeParams {
            text_color: Some("#102030".to_owned()),
            ..ThemeParams::default()
        };
        let (fake, dyn_bridge) = bridge(FakeBridge::new("query_id=1").with_theme(theme));
        let surface = RecordingSurface::default();

        let ctx = SessionContext::initialize(dyn_bridge, &surface);

        assert!(ctx.ready());
        assert!(ctx.telegram_available());
        assert_eq!(ctx.init_data_error(), None);
        assert_eq!(ctx.user(), Some(&ada()));
        assert_eq!(ctx.init_data().as_str(), "query_id=1");
        assert_eq!(surface.get(TEXT_COLOR_RGB_VAR).as_deref(), Some("16, 32, 48"));
        assert_eq!(surface.names().len(), 6);
        assert_eq!(*fake.calls.borrow(), ["ready", "expand"]);
    }

    #[test]
    fn empty_credential_degrades_but_stays_usable() {
        let (_fake, dyn_bridge) = bridge(FakeBridge::new(""));
        let surface = RecordingSurface::default();

        let ctx = SessionContext::initialize(dyn_bridge, &surface);

        assert!(ctx.ready());
        assert!(ctx.telegram_available());
        assert_eq!(ctx.init_data_error(), Some(MISSING_INIT_DATA_MESSAGE));
        assert!(ctx.user().is_some());
    }

    #[test]
    fn bridge_without_user_is_still_ready() {
        let (_fake, dyn_bridge) = bridge(FakeBridge::new("abc").without_user());
        let ctx = SessionContext::initialize(dyn_bridge, &RecordingSurface::default());

        assert!(ctx.ready());
        assert!(ctx.user().is_none());
    }

    #[test]
    fn theme_failure_leaves_session_not_ready() {
        let (fake, dyn_bridge) = bridge(FakeBridge::new("abc"));
        let surface = RecordingSurface::failing_on(BUTTON_COLOR_VAR);

        let ctx = SessionContext::initialize(dyn_bridge, &surface);

        assert!(!ctx.ready());
        assert!(ctx.telegram_available());
        assert!(ctx.user().is_none());
        let err = ctx.init_data_error().unwrap_or_default();
        assert!(err.starts_with("Error initializing Telegram WebApp:"), "{err}");
        assert!(fake.calls.borrow().is_empty());
    }

    #[test]
    fn provider_scope_controls_access() {
        assert_eq!(try_use_session().unwrap_err(), ContextError::NotProvided);

        let ctx = SessionContext::initialize(None, &RecordingSurface::default());
        {
            let _guard = provide(ctx.clone());
            assert!(use_session().same_session(&ctx));

            let inner = SessionContext::initialize(None, &RecordingSurface::default());
            let inner_guard = provide(inner.clone());
            assert!(use_session().same_session(&inner));
            drop(inner_guard);

            assert!(use_session().same_session(&ctx));
        }
        assert!(try_use_session().is_err());
    }

    #[test]
    #[should_panic(expected = "outside of a mounted session provider")]
    fn use_session_outside_provider_panics() {
        let _ = use_session();
    }

    #[test]
    fn remount_reruns_initialization() {
        let (fake, dyn_bridge) = bridge(FakeBridge::new("abc"));
        let surface = RecordingSurface::default();

        let first = SessionContext::initialize(dyn_bridge.clone(), &surface);
        let second = SessionContext::initialize(dyn_bridge, &surface);

        assert!(!first.same_session(&second));
        assert_eq!(first.state(), second.state());
        assert_eq!(fake.calls.borrow().len(), 4);
    }
}
