//! Global application state.
//!
//! Uses `RefCell`-wrapped `thread_local!` storage (WASM is single-threaded).
//! Holds the mounted session provider and the bootstrap sequencer; views
//! reach the session itself through `tma_session::use_session()`.

use crate::api::FetchTransport;
use std::cell::RefCell;
use std::rc::Rc;
use tma_client::ApiClient;
use tma_session::{BootstrapSequencer, ProviderGuard};

pub type Sequencer = BootstrapSequencer<FetchTransport>;

#[derive(Default)]
pub struct AppState {
    pub provider: Option<ProviderGuard>,
    pub sequencer: Option<Rc<Sequencer>>,
}

thread_local! {
    static STATE: RefCell<AppState> = RefCell::new(AppState::default());
}

/// Run a closure with shared read access to the state.
pub fn with<F, R>(f: F) -> R
where
    F: FnOnce(&AppState) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

/// Run a closure with mutable access to the state.
pub fn with_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut AppState) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}

pub fn mount(provider: ProviderGuard, sequencer: Rc<Sequencer>) {
    with_mut(|s| {
        s.provider = Some(provider);
        s.sequencer = Some(sequencer);
    });
}

/// Drops the provider and stops any in-flight bootstrap from writing state.
pub fn unmount() {
    let (provider, sequencer) = with_mut(|s| (s.provider.take(), s.sequencer.take()));
    if let Some(sequencer) = sequencer {
        sequencer.dispose();
    }
    drop(provider);
}

/// `pagehide` handler. A page entering the back/forward cache keeps its
/// state so it works again when restored.
pub fn on_pagehide(persisted: bool) {
    if !persisted {
        unmount();
    }
}

/// Cloned out so callers never hold the state borrow across an `.await`.
pub fn sequencer() -> Option<Rc<Sequencer>> {
    with(|s| s.sequencer.clone())
}

pub fn client() -> Option<Rc<ApiClient<FetchTransport>>> {
    with(|s| s.sequencer.as_ref().map(|seq| seq.client().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tma_client::{ClientConfig, InitData};
    use tma_session::{SessionContext, ThemeError, ThemeSurface, provide, try_use_session};

    struct NullSurface;

    impl ThemeSurface for NullSurface {
        fn set_property(&self, _name: &str, _value: &str) -> Result<(), ThemeError> {
            Ok(())
        }
    }

    fn mount_detached() -> Rc<Sequencer> {
        let session = SessionContext::initialize(None, &NullSurface);
        let provider = provide(session.clone());
        let client = ApiClient::new(ClientConfig::default(), InitData::default(), FetchTransport::new());
        let sequencer = Rc::new(BootstrapSequencer::new(session, Rc::new(client)));
        mount(provider, sequencer.clone());
        sequencer
    }

    #[test]
    fn cached_pagehide_keeps_app_mounted() {
        let sequencer = mount_detached();

        on_pagehide(true);

        assert!(state_sequencer_is(&sequencer));
        assert!(client().is_some());
        assert!(try_use_session().is_ok());
        assert!(!sequencer.is_disposed());
    }

    #[test]
    fn final_pagehide_unmounts_and_disposes() {
        let sequencer = mount_detached();

        on_pagehide(false);

        assert!(super::sequencer().is_none());
        assert!(client().is_none());
        assert!(try_use_session().is_err());
        assert!(sequencer.is_disposed());
    }

    fn state_sequencer_is(expected: &Rc<Sequencer>) -> bool {
        super::sequencer().is_some_and(|current| Rc::ptr_eq(&current, expected))
    }
}
