//! DOM element bindings.
//!
//! All fields are resolved once at startup. To add new UI elements, add a
//! field here and bind it in `Elements::bind()`.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

// ── Helpers ──

pub fn document() -> Document {
    gloo_utils::document()
}

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    document().query_selector(selector).ok()?
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn clear(el: &Element) {
    el.set_inner_html("");
}

pub fn add_class(el: &Element, cls: &str) {
    let _ = el.class_list().add_1(cls);
}

pub fn remove_class(el: &Element, cls: &str) {
    let _ = el.class_list().remove_1(cls);
}

pub fn set_visible(el: &Element, visible: bool) {
    let _ = el.class_list().toggle_with_force("hidden", !visible);
}

/// Creates `<tag class="...">text</tag>`.
pub fn create(tag: &str, class: Option<&str>, text: Option<&str>) -> Result<Element, JsValue> {
    let el = document().create_element(tag)?;
    if let Some(class) = class {
        el.set_class_name(class);
    }
    if let Some(text) = text {
        el.set_text_content(Some(text));
    }
    Ok(el)
}

// ── Elements struct ──

/// All DOM element references used by the mini app.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    // Screens
    pub blocking_view: Element,
    pub blocking_message: Element,
    pub initializing_view: Element,
    pub ready_view: Element,
    pub title: Element,

    // Banners
    pub info_banner: Element,
    pub info_message: Element,
    pub info_note: Element,
    pub error_banner: Element,
    pub error_message: Element,
    pub retry_btn: HtmlElement,

    // Content
    pub loading: Element,
    pub content: Element,
    pub profile_card: Element,
    pub backend_card: Element,
    pub backend_json: Element,
    pub roles_card: Element,
    pub roles_list: Element,

    // API test panel
    pub api_buttons: Element,
    pub api_result: Element,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_html {
    ($id:expr) => {
        by_id_typed::<HtmlElement>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing html element #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            blocking_view: get_el!("blockingView"),
            blocking_message: get_el!("blockingMessage"),
            initializing_view: get_el!("initializingView"),
            ready_view: get_el!("readyView"),
            title: get_el!("title"),

            info_banner: get_el!("infoBanner"),
            info_message: get_el!("infoMessage"),
            info_note: get_el!("infoNote"),
            error_banner: get_el!("errorBanner"),
            error_message: get_el!("errorMessage"),
            retry_btn: get_html!("retryBtn"),

            loading: get_el!("loading"),
            content: get_el!("content"),
            profile_card: get_el!("profileCard"),
            backend_card: get_el!("backendCard"),
            backend_json: get_el!("backendJson"),
            roles_card: get_el!("rolesCard"),
            roles_list: get_el!("rolesList"),

            api_buttons: get_el!("apiButtons"),
            api_result: get_el!("apiResult"),
        })
    }
}
