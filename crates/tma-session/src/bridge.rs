//! Capability view of the host WebView object.
//!
//! The real implementation reads `window.Telegram.WebApp`; tests substitute
//! a fake. Absence of the host is expressed by not having a bridge at all.

use std::rc::Rc;
use tma_api_types::{HostUser, ThemeParams};
use tma_client::InitData;

/// The host's bottom call-to-action control.
pub trait MainButton {
    fn set_text(&self, text: &str);
    fn show(&self);
    fn on_click(&self, handler: Box<dyn Fn()>);
}

pub trait HostBridge {
    /// Raw signed `initData`; empty when the host did not provide one.
    fn init_data(&self) -> String;

    /// `initDataUnsafe.user`, if present and well-formed.
    fn user(&self) -> Option<HostUser>;

    fn theme_params(&self) -> ThemeParams;

    /// Tells the host the app is ready to be shown. No-op when unsupported.
    fn ready(&self) {}

    /// Expands the WebView to full height. No-op when unsupported.
    fn expand(&self) {}

    fn main_button(&self) -> Option<Rc<dyn MainButton>> {
        None
    }
}

/// Identity read once from the bridge and never refreshed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostIdentity {
    init_data: InitData,
    user: Option<HostUser>,
}

impl HostIdentity {
    pub fn from_bridge(bridge: &dyn HostBridge) -> Self {
        Self {
            init_data: InitData::new(bridge.init_data()),
            user: bridge.user(),
        }
    }

    pub fn init_data(&self) -> &InitData {
        &self.init_data
    }

    pub fn user(&self) -> Option<&HostUser> {
        self.user.as_ref()
    }
}
