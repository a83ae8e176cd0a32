//! Event binding.
//!
//! Wires the retry button, the endpoint panel and page teardown.

use crate::dom::Elements;
use crate::panel;
use crate::state;
use gloo_console as console;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Helper: attach async click handler to an element.
macro_rules! on_click_async {
    ($el:expr, $els:expr, $handler:expr) => {{
        let els = $els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let els2 = els.clone();
            wasm_bindgen_futures::spawn_local(async move {
                $handler(&els2).await;
            });
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(els: &Elements) -> Result<(), JsValue> {
    on_click_async!(els.retry_btn, els, on_retry);

    for (endpoint, button) in panel::render_buttons(els)? {
        let els = els.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let els2 = els.clone();
            wasm_bindgen_futures::spawn_local(async move {
                panel::on_endpoint(&els2, endpoint).await;
            });
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }

    let cb = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let persisted = event
            .dyn_ref::<web_sys::PageTransitionEvent>()
            .is_some_and(|event| event.persisted());
        state::on_pagehide(persisted);
    }) as Box<dyn FnMut(_)>);
    gloo_utils::window()
        .add_event_listener_with_callback("pagehide", cb.as_ref().unchecked_ref())?;
    cb.forget();

    Ok(())
}

/// Snapshot changes reach the view through the sequencer's observer.
async fn on_retry(_els: &Elements) {
    let Some(sequencer) = state::sequencer() else {
        console::warn!("retry requested before the app was mounted");
        return;
    };
    sequencer.retry().await;
}
