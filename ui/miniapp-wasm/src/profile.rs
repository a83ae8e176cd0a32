//! Telegram user card.

use crate::dom;
use tma_session::ProfileCard;
use tma_session::screen::NO_USER_TITLE;
use wasm_bindgen::prelude::*;

pub fn render_profile_card(el: &web_sys::Element, card: &ProfileCard) -> Result<(), JsValue> {
    dom::clear(el);

    match card {
        ProfileCard::Missing { reason } => {
            dom::add_class(el, "missing");
            el.append_child(&dom::create("h3", None, Some(NO_USER_TITLE))?.into())?;
            el.append_child(&dom::create("p", None, Some(reason))?.into())?;
        }
        ProfileCard::User {
            display_name,
            username,
            telegram_id,
            language,
            premium,
            avatar_initial,
        } => {
            dom::remove_class(el, "missing");

            let header = dom::create("div", Some("user-header"), None)?;
            let avatar = dom::create("div", Some("user-avatar"), Some(&avatar_initial.to_string()))?;
            header.append_child(&avatar)?;

            let info = dom::create("div", Some("user-info"), None)?;
            let name = dom::create("h2", Some("user-name"), Some(display_name))?;
            if let Some(username) = username {
                let handle = format!(" (@{username})");
                name.append_child(&dom::create("span", None, Some(&handle))?.into())?;
            }
            info.append_child(&name)?;
            let id = format!("Telegram ID: {telegram_id}");
            info.append_child(&dom::create("p", Some("user-id"), Some(&id))?.into())?;
            header.append_child(&info)?;
            el.append_child(&header)?;

            el.append_child(&detail("Language:", language)?.into())?;
            if *premium {
                el.append_child(&detail("Status:", "Telegram Premium")?.into())?;
            }
        }
    }
    Ok(())
}

fn detail(label: &str, value: &str) -> Result<web_sys::Element, JsValue> {
    let row = dom::create("div", Some("user-detail"), None)?;
    row.append_child(&dom::create("span", Some("detail-label"), Some(label))?.into())?;
    row.append_child(&dom::create("span", Some("detail-value"), Some(value))?.into())?;
    Ok(row)
}
