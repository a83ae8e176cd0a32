//! What the home screen shows for a given session and bootstrap snapshot.
//!
//! Pure projection; the wasm UI renders the result into the DOM.

use crate::bootstrap::BootstrapSnapshot;
use crate::context::SessionState;
use tma_api_types::{HostUser, Role};

pub const HOST_UNAVAILABLE_TEXT: &str = "This app must be opened from within Telegram. \
     Please open this app using Telegram's WebApp feature.";
pub const INITIALIZING_TEXT: &str = "Initializing Telegram Mini App...";
pub const READY_TITLE: &str = "Telegram User Profile";
pub const LIMITED_FEATURES_NOTE: &str = "Some features may be limited";
pub const RETRY_LABEL: &str = "Retry Authentication";
pub const NO_USER_TITLE: &str = "No User Data Available";
const NO_USER_DEFAULT_REASON: &str = "User information is not available. This might happen if \
     the app is opened outside of Telegram or if Telegram did not provide user data.";

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    /// Blocking; there is nothing to retry.
    HostUnavailable { message: String },
    Initializing,
    Ready(ReadyScreen),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadyScreen {
    pub info_banner: Option<InfoBanner>,
    pub error_banner: Option<ErrorBanner>,
    pub body: ReadyBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoBanner {
    pub message: String,
    pub note: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub message: String,
    pub retry_label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReadyBody {
    Loading,
    Content {
        profile_card: ProfileCard,
        /// Pretty-printed `/users/me` payload.
        backend_json: Option<String>,
        /// Empty means the roles card is omitted.
        roles: Vec<Role>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileCard {
    Missing {
        reason: String,
    },
    User {
        display_name: String,
        username: Option<String>,
        telegram_id: String,
        language: String,
        premium: bool,
        avatar_initial: char,
    },
}

impl ProfileCard {
    pub fn from_host(user: Option<&HostUser>, init_data_error: Option<&str>) -> Self {
        let Some(user) = user else {
            let reason = match init_data_error {
                Some(err) => format!("Cannot retrieve user information: {err}"),
                None => NO_USER_DEFAULT_REASON.to_owned(),
            };
            return ProfileCard::Missing { reason };
        };

        let first_name = user.first_name.trim();
        let first_name = if first_name.is_empty() { "Unknown" } else { first_name };
        let display_name = match user.last_name.as_deref().map(str::trim) {
            Some(last) if !last.is_empty() => format!("{first_name} {last}"),
            _ => first_name.to_owned(),
        };

        ProfileCard::User {
            avatar_initial: user.first_name.trim().chars().next().unwrap_or('U'),
            display_name,
            username: user.username.clone().filter(|name| !name.is_empty()),
            telegram_id: if user.id == 0 {
                "Unknown".to_owned()
            } else {
                user.id.to_string()
            },
            language: user
                .language_code
                .clone()
                .filter(|code| !code.is_empty())
                .unwrap_or_else(|| "Not specified".to_owned()),
            premium: user.is_premium,
        }
    }
}

impl Screen {
    pub fn project(session: &SessionState, snapshot: &BootstrapSnapshot) -> Self {
        if !session.telegram_available {
            return Screen::HostUnavailable {
                message: HOST_UNAVAILABLE_TEXT.to_owned(),
            };
        }
        if !session.ready {
            return Screen::Initializing;
        }

        let info_banner = session.init_data_error.as_ref().map(|err| InfoBanner {
            message: err.clone(),
            note: LIMITED_FEATURES_NOTE,
        });
        let error_banner = snapshot.error.as_ref().map(|err| ErrorBanner {
            message: err.clone(),
            retry_label: RETRY_LABEL,
        });

        let body = if snapshot.is_loading() {
            ReadyBody::Loading
        } else {
            ReadyBody::Content {
                profile_card: ProfileCard::from_host(
                    session.user.as_ref(),
                    session.init_data_error.as_deref(),
                ),
                backend_json: snapshot.profile.as_ref().map(|p| p.to_pretty_json()),
                roles: snapshot.roles.clone(),
            }
        };

        Screen::Ready(ReadyScreen {
            info_banner,
            error_banner,
            body,
        })
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::HostUnavailable { .. } => "Error",
            Screen::Initializing => "",
            Screen::Ready(_) => READY_TITLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::{Outcome, Phase};
    use crate::testing::ada;
    use serde_json::json;
    use tma_api_types::{BackendProfile, EntityId};

    fn ready_session() -> SessionState {
        SessionState {
            ready: true,
            user: Some(ada()),
            telegram_available: true,
            init_data_error: None,
        }
    }

    fn ready(screen: Screen) -> ReadyScreen {
        match screen {
            Screen::Ready(ready) => ready,
            other => panic!("expected ready screen, got {other:?}"),
        }
    }

    #[test]
    fn unavailable_host_blocks_everything() {
        let session = SessionState {
            init_data_error: Some("gone".to_owned()),
            ..SessionState::default()
        };
        let screen = Screen::project(&session, &BootstrapSnapshot::default());

        assert_eq!(
            screen,
            Screen::HostUnavailable {
                message: HOST_UNAVAILABLE_TEXT.to_owned()
            }
        );
        assert_eq!(screen.title(), "Error");
    }

    #[test]
    fn not_ready_shows_initializing() {
        let session = SessionState {
            telegram_available: true,
            ..SessionState::default()
        };
        assert_eq!(
            Screen::project(&session, &BootstrapSnapshot::default()),
            Screen::Initializing
        );
    }

    #[test]
    fn loading_hides_content_but_keeps_banners() {
        let session = SessionState {
            init_data_error: Some("Telegram initData is missing.".to_owned()),
            ..ready_session()
        };
        let snapshot = BootstrapSnapshot {
            phase: Phase::FetchingProfile,
            ..BootstrapSnapshot::default()
        };

        let screen = ready(Screen::project(&session, &snapshot));
        assert_eq!(screen.body, ReadyBody::Loading);
        let info = screen.info_banner.expect("info banner");
        assert_eq!(info.note, LIMITED_FEATURES_NOTE);
        assert!(screen.error_banner.is_none());
    }

    #[test]
    fn settled_success_shows_all_cards() {
        let snapshot = BootstrapSnapshot {
            phase: Phase::Settled(Outcome::Success),
            profile: Some(BackendProfile(json!({"user": {"id": 42}}))),
            roles: vec![Role {
                id: EntityId::Number(1),
                name: "admin".to_owned(),
            }],
            error: None,
        };

        let screen = ready(Screen::project(&ready_session(), &snapshot));
        let ReadyBody::Content {
            profile_card,
            backend_json,
            roles,
        } = screen.body
        else {
            panic!("expected content");
        };
        assert_eq!(roles.len(), 1);
        assert!(backend_json.unwrap_or_default().contains("\"id\": 42"));
        assert_eq!(
            profile_card,
            ProfileCard::User {
                display_name: "Ada Lovelace".to_owned(),
                username: Some("ada".to_owned()),
                telegram_id: "42".to_owned(),
                language: "en".to_owned(),
                premium: true,
                avatar_initial: 'A',
            }
        );
    }

    #[test]
    fn failure_surfaces_retry_banner() {
        let snapshot = BootstrapSnapshot {
            phase: Phase::Settled(Outcome::Failed),
            error: Some("Failed to fetch user data.".to_owned()),
            ..BootstrapSnapshot::default()
        };

        let screen = ready(Screen::project(&ready_session(), &snapshot));
        let banner = screen.error_banner.expect("error banner");
        assert_eq!(banner.message, "Failed to fetch user data.");
        assert_eq!(banner.retry_label, RETRY_LABEL);
        assert!(matches!(
            screen.body,
            ReadyBody::Content { backend_json: None, ref roles, .. } if roles.is_empty()
        ));
    }

    #[test]
    fn empty_credential_shows_limited_profile_without_backend_data() {
        let session = SessionState {
            init_data_error: Some(crate::context::MISSING_INIT_DATA_MESSAGE.to_owned()),
            ..ready_session()
        };
        let snapshot = BootstrapSnapshot {
            phase: Phase::Settled(Outcome::Skipped),
            ..BootstrapSnapshot::default()
        };

        let screen = ready(Screen::project(&session, &snapshot));
        let info = screen.info_banner.expect("info banner");
        assert_eq!(info.message, crate::context::MISSING_INIT_DATA_MESSAGE);
        assert_eq!(info.note, LIMITED_FEATURES_NOTE);
        assert!(screen.error_banner.is_none());
        let ReadyBody::Content {
            profile_card,
            backend_json,
            roles,
        } = screen.body
        else {
            panic!("expected content");
        };
        assert_eq!(backend_json, None);
        assert!(roles.is_empty());
        assert!(matches!(profile_card, ProfileCard::User { .. }));
    }

    #[test]
    fn missing_user_explains_why() {
        assert_eq!(
            ProfileCard::from_host(None, Some("boom")),
            ProfileCard::Missing {
                reason: "Cannot retrieve user information: boom".to_owned()
            }
        );
        let ProfileCard::Missing { reason } = ProfileCard::from_host(None, None) else {
            panic!("expected missing card");
        };
        assert!(reason.starts_with("User information is not available."));
    }

    #[test]
    fn sparse_user_gets_placeholders() {
        let user = HostUser {
            id: 7,
            ..HostUser::default()
        };
        let ProfileCard::User {
            display_name,
            language,
            avatar_initial,
            username,
            premium,
            ..
        } = ProfileCard::from_host(Some(&user), None)
        else {
            panic!("expected user card");
        };
        assert_eq!(display_name, "Unknown");
        assert_eq!(language, "Not specified");
        assert_eq!(avatar_initial, 'U');
        assert_eq!(username, None);
        assert!(!premium);
    }
}
