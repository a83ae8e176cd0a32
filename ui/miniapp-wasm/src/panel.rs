//! Developer panel: one button per backend endpoint, results in a `<pre>`.

use crate::api;
use crate::dom::{self, Elements};
use crate::state;
use tma_client::DemoEndpoint;
use wasm_bindgen::prelude::*;

pub const BUTTON_ID_PREFIX: &str = "api-";

/// Creates the endpoint buttons. Listeners are attached in `events`.
pub fn render_buttons(els: &Elements) -> Result<Vec<(DemoEndpoint, web_sys::Element)>, JsValue> {
    dom::clear(&els.api_buttons);
    let mut buttons = Vec::with_capacity(DemoEndpoint::ALL.len());
    for endpoint in DemoEndpoint::ALL {
        let button = dom::create("button", Some("endpoint"), Some(endpoint.label()))?;
        button.set_id(&format!("{BUTTON_ID_PREFIX}{}", endpoint.slug()));
        button.set_attribute(
            "title",
            &format!("{} {}", endpoint.method().as_str(), endpoint.path()),
        )?;
        els.api_buttons.append_child(&button)?;
        buttons.push((endpoint, button));
    }
    Ok(buttons)
}

pub async fn on_endpoint(els: &Elements, endpoint: DemoEndpoint) {
    let Some(client) = state::client() else {
        api::set_result_error(&els.api_result, "App is not initialized.");
        return;
    };
    match client.call(endpoint).await {
        Ok(result) => api::set_result(&els.api_result, &result),
        Err(e) => api::set_result_error(&els.api_result, &e.report()),
    }
}
