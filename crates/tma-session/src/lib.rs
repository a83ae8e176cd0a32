//! Host session and bootstrap sequencing for the Telegram Mini App.
//!
//! [`SessionContext`] is built once from the host bridge and shared through
//! the provider scope. [`BootstrapSequencer`] drives login, profile and roles
//! against the backend, and [`Screen`] projects both into what the view
//! renders.

pub mod bootstrap;
pub mod bridge;
pub mod context;
pub mod screen;
pub mod theme;

#[cfg(test)]
mod testing;

pub use bootstrap::{
    BootstrapSequencer, BootstrapSnapshot, MAIN_BUTTON_TEXT, Outcome, Phase, RunOutcome,
};
pub use bridge::{HostBridge, HostIdentity, MainButton};
pub use context::{
    ContextError, ProviderGuard, SessionContext, SessionState, provide, try_use_session,
    use_session,
};
pub use screen::{ErrorBanner, InfoBanner, ProfileCard, ReadyBody, ReadyScreen, Screen};
pub use theme::{Rgb, ThemeError, ThemeSurface, apply_theme, hex_to_rgb, theme_variables};
