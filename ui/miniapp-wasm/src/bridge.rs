//! `window.Telegram.WebApp` behind the session's `HostBridge` trait.
//!
//! Every member is looked up with `Reflect` so older Telegram clients that
//! lack a method simply turn the call into a no-op.

use gloo_console as console;
use std::rc::Rc;
use tma_api_types::{HostUser, ThemeParams};
use tma_session::{HostBridge, MainButton};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

fn get(target: &JsValue, key: &str) -> Option<JsValue> {
    js_sys::Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

fn method(target: &JsValue, name: &str) -> Option<js_sys::Function> {
    get(target, name).and_then(|f| f.dyn_into::<js_sys::Function>().ok())
}

fn call0(target: &JsValue, name: &str) {
    if let Some(f) = method(target, name) {
        if let Err(err) = f.call0(target) {
            console::warn!(format!("WebApp.{name}() failed"), err);
        }
    }
}

fn call1(target: &JsValue, name: &str, arg: &JsValue) {
    if let Some(f) = method(target, name) {
        if let Err(err) = f.call1(target, arg) {
            console::warn!(format!("WebApp.{name}() failed"), err);
        }
    }
}

pub struct WebAppBridge {
    web_app: JsValue,
}

impl WebAppBridge {
    /// `None` when the page is not running inside Telegram.
    pub fn detect() -> Option<Self> {
        let window: JsValue = web_sys::window()?.into();
        let web_app = get(&get(&window, "Telegram")?, "WebApp")?;
        Some(Self { web_app })
    }
}

impl HostBridge for WebAppBridge {
    fn init_data(&self) -> String {
        get(&self.web_app, "initData")
            .and_then(|value| value.as_string())
            .unwrap_or_default()
    }

    fn user(&self) -> Option<HostUser> {
        let raw = get(&get(&self.web_app, "initDataUnsafe")?, "user")?;
        match serde_wasm_bindgen::from_value(raw) {
            Ok(user) => Some(user),
            Err(err) => {
                console::warn!(format!("ignoring malformed initDataUnsafe.user: {err}"));
                None
            }
        }
    }

    fn theme_params(&self) -> ThemeParams {
        get(&self.web_app, "themeParams")
            .and_then(|raw| serde_wasm_bindgen::from_value(raw).ok())
            .unwrap_or_default()
    }

    fn ready(&self) {
        call0(&self.web_app, "ready");
    }

    fn expand(&self) {
        call0(&self.web_app, "expand");
    }

    fn main_button(&self) -> Option<Rc<dyn MainButton>> {
        let button = get(&self.web_app, "MainButton")?;
        Some(Rc::new(TelegramMainButton { button }))
    }
}

pub struct TelegramMainButton {
    button: JsValue,
}

impl MainButton for TelegramMainButton {
    fn set_text(&self, text: &str) {
        call1(&self.button, "setText", &JsValue::from_str(text));
    }

    fn show(&self) {
        call0(&self.button, "show");
    }

    fn on_click(&self, handler: Box<dyn Fn()>) {
        let cb = Closure::wrap(handler);
        call1(&self.button, "onClick", cb.as_ref());
        cb.forget();
    }
}
