//! Renders a projected `Screen` into the static skeleton in `index.html`.

use crate::dom::{self, Elements};
use crate::profile;
use gloo_console as console;
use tma_session::{BootstrapSnapshot, ReadyBody, ReadyScreen, Screen, use_session};
use wasm_bindgen::prelude::*;

/// Re-projects the mounted session with `snapshot` and renders it.
pub fn refresh(els: &Elements, snapshot: &BootstrapSnapshot) {
    let session = use_session();
    let screen = Screen::project(session.state(), snapshot);
    if let Err(err) = render(els, &screen) {
        console::error!("failed to render screen", err);
    }
}

pub fn render(els: &Elements, screen: &Screen) -> Result<(), JsValue> {
    dom::set_text(&els.title, screen.title());
    dom::set_visible(&els.blocking_view, matches!(screen, Screen::HostUnavailable { .. }));
    dom::set_visible(&els.initializing_view, matches!(screen, Screen::Initializing));
    dom::set_visible(&els.ready_view, matches!(screen, Screen::Ready(_)));

    match screen {
        Screen::HostUnavailable { message } => {
            dom::set_text(&els.blocking_message, message);
            Ok(())
        }
        Screen::Initializing => Ok(()),
        Screen::Ready(ready) => render_ready(els, ready),
    }
}

fn render_ready(els: &Elements, ready: &ReadyScreen) -> Result<(), JsValue> {
    dom::set_visible(&els.info_banner, ready.info_banner.is_some());
    if let Some(info) = &ready.info_banner {
        dom::set_text(&els.info_message, &info.message);
        dom::set_text(&els.info_note, info.note);
    }

    dom::set_visible(&els.error_banner, ready.error_banner.is_some());
    if let Some(banner) = &ready.error_banner {
        dom::set_text(&els.error_message, &banner.message);
        els.retry_btn.set_text_content(Some(banner.retry_label));
    }

    match &ready.body {
        ReadyBody::Loading => {
            dom::set_visible(&els.loading, true);
            dom::set_visible(&els.content, false);
        }
        ReadyBody::Content {
            profile_card,
            backend_json,
            roles,
        } => {
            dom::set_visible(&els.loading, false);
            dom::set_visible(&els.content, true);
            profile::render_profile_card(&els.profile_card, profile_card)?;

            dom::set_visible(&els.backend_card, backend_json.is_some());
            dom::set_text(&els.backend_json, backend_json.as_deref().unwrap_or_default());

            dom::set_visible(&els.roles_card, !roles.is_empty());
            dom::clear(&els.roles_list);
            for role in roles {
                let item = dom::create("li", None, Some(&role.name))?;
                item.set_attribute("data-role-id", &role.id.to_string())?;
                els.roles_list.append_child(&item)?;
            }
        }
    }
    Ok(())
}
