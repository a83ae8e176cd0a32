//! Stand-in host for running the session outside Telegram.

use anyhow::Context;
use std::env;
use tma_api_types::{HostUser, ThemeParams};
use tma_session::{HostBridge, ThemeError, ThemeSurface};
use tracing::{debug, info};

pub const INIT_DATA_ENV: &str = "TMA_INIT_DATA";
pub const USER_JSON_ENV: &str = "TMA_USER_JSON";

/// Host bridge fed from the environment instead of a WebView.
#[derive(Debug, Clone, Default)]
pub struct StaticBridge {
    init_data: String,
    user: Option<HostUser>,
}

impl StaticBridge {
    pub fn new(init_data: impl Into<String>, user: Option<HostUser>) -> Self {
        Self {
            init_data: init_data.into(),
            user,
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let init_data = env::var(INIT_DATA_ENV).unwrap_or_default();
        let user = match env::var(USER_JSON_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Some(parse_user(&raw)?),
            _ => None,
        };
        Ok(Self::new(init_data, user))
    }
}

pub fn parse_user(raw: &str) -> anyhow::Result<HostUser> {
    serde_json::from_str(raw).with_context(|| format!("{USER_JSON_ENV} is not a valid user object"))
}

impl HostBridge for StaticBridge {
    fn init_data(&self) -> String {
        self.init_data.clone()
    }

    fn user(&self) -> Option<HostUser> {
        self.user.clone()
    }

    fn theme_params(&self) -> ThemeParams {
        ThemeParams::default()
    }

    fn ready(&self) {
        info!("host signalled ready");
    }
}

/// Logs theme variables instead of styling anything.
pub struct LogSurface;

impl ThemeSurface for LogSurface {
    fn set_property(&self, name: &str, value: &str) -> Result<(), ThemeError> {
        debug!(name, value, "theme variable");
        Ok(())
    }
}
