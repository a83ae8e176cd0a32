//! Telegram Mini App WASM Frontend
//!
//! Profile screen plus an endpoint test panel, running inside Telegram's
//! WebView. Session and bootstrap logic live in `tma-session`; this crate
//! only binds them to the browser.

pub mod api;
pub mod bridge;
pub mod dom;
pub mod events;
pub mod panel;
pub mod profile;
pub mod state;
pub mod theme;
pub mod view;

use gloo_console as console;
use std::rc::Rc;
use tma_client::ApiClient;
use tma_session::{BootstrapSequencer, HostBridge, RunOutcome, SessionContext, provide};
use wasm_bindgen::prelude::*;

const MAIN_BUTTON_ALERT: &str = "Main button clicked!";

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init().await
}

async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;

    let bridge = bridge::WebAppBridge::detect().map(|b| Rc::new(b) as Rc<dyn HostBridge>);
    let surface = theme::DocumentSurface::root()?;
    let session = SessionContext::initialize(bridge, &surface);
    if let Some(err) = session.init_data_error() {
        console::warn!(err);
    }
    let provider = provide(session.clone());

    let client = ApiClient::new(
        api::client_config(),
        session.init_data().clone(),
        api::FetchTransport::new(),
    )
    .with_host_user_id(session.user().map(|user| user.id));

    let sequencer = Rc::new(
        BootstrapSequencer::new(session, Rc::new(client)).with_main_button_action(|| {
            let _ = gloo_utils::window().alert_with_message(MAIN_BUTTON_ALERT);
        }),
    );
    {
        let els = els.clone();
        sequencer.subscribe(move |snapshot| view::refresh(&els, snapshot));
    }
    state::mount(provider, sequencer.clone());

    view::refresh(&els, &sequencer.snapshot());
    events::bind_events(&els)?;

    match sequencer.run().await {
        RunOutcome::Waiting => console::log!("bootstrap waiting: Telegram session not ready"),
        RunOutcome::Settled(outcome) => console::log!(format!("bootstrap settled: {outcome:?}")),
        RunOutcome::Superseded => {}
    }
    Ok(())
}
