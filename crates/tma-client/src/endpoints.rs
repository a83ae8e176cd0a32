use crate::transport::Method;

pub const LOGIN_PATH: &str = "/auth/login/telegram";
pub const CURRENT_USER_PATH: &str = "/users/me";

pub fn user_roles_path(user_id: &str) -> String {
    format!("/users/{}/roles", encode_path_segment(user_id))
}

/// Endpoints exposed on the developer test panel. No behavioural contract
/// beyond showing whatever comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoEndpoint {
    Login,
    TmaSecurity,
    PublicHello,
    PublicInfo,
    ProtectedProfile,
    AdminOnly,
    Roles,
    Restaurants,
    Menu,
}

impl DemoEndpoint {
    pub const ALL: [DemoEndpoint; 9] = [
        DemoEndpoint::Login,
        DemoEndpoint::TmaSecurity,
        DemoEndpoint::PublicHello,
        DemoEndpoint::PublicInfo,
        DemoEndpoint::ProtectedProfile,
        DemoEndpoint::AdminOnly,
        DemoEndpoint::Roles,
        DemoEndpoint::Restaurants,
        DemoEndpoint::Menu,
    ];

    pub fn method(self) -> Method {
        match self {
            DemoEndpoint::Login => Method::Post,
            _ => Method::Get,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            DemoEndpoint::Login => LOGIN_PATH,
            DemoEndpoint::TmaSecurity => "/auth/tma-security",
            DemoEndpoint::PublicHello => "/public/hello",
            DemoEndpoint::PublicInfo => "/public/info",
            DemoEndpoint::ProtectedProfile => "/protected/profile",
            DemoEndpoint::AdminOnly => "/protected/admin-only",
            DemoEndpoint::Roles => "/roles",
            DemoEndpoint::Restaurants => "/restaurants",
            DemoEndpoint::Menu => "/menu",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DemoEndpoint::Login => "Login with Telegram",
            DemoEndpoint::TmaSecurity => "Get Security Info",
            DemoEndpoint::PublicHello => "Public Hello",
            DemoEndpoint::PublicInfo => "Public Info",
            DemoEndpoint::ProtectedProfile => "Protected Profile",
            DemoEndpoint::AdminOnly => "Admin Only",
            DemoEndpoint::Roles => "List Roles",
            DemoEndpoint::Restaurants => "List Restaurants",
            DemoEndpoint::Menu => "Show Menu",
        }
    }

    /// Short name used by the probe CLI and as DOM id suffix.
    pub fn slug(self) -> &'static str {
        match self {
            DemoEndpoint::Login => "login",
            DemoEndpoint::TmaSecurity => "tma-security",
            DemoEndpoint::PublicHello => "hello",
            DemoEndpoint::PublicInfo => "info",
            DemoEndpoint::ProtectedProfile => "profile",
            DemoEndpoint::AdminOnly => "admin-only",
            DemoEndpoint::Roles => "roles",
            DemoEndpoint::Restaurants => "restaurants",
            DemoEndpoint::Menu => "menu",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim();
        Self::ALL.into_iter().find(|endpoint| endpoint.slug() == slug)
    }
}

fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.trim().bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_path_escapes_reserved_characters() {
        assert_eq!(user_roles_path("42"), "/users/42/roles");
        assert_eq!(user_roles_path("a/b c"), "/users/a%2Fb%20c/roles");
    }

    #[test]
    fn slugs_round_trip_for_every_endpoint() {
        for endpoint in DemoEndpoint::ALL {
            assert_eq!(DemoEndpoint::from_slug(endpoint.slug()), Some(endpoint));
        }
        assert_eq!(DemoEndpoint::from_slug("nope"), None);
    }

    #[test]
    fn only_login_is_a_post() {
        let posts: Vec<_> = DemoEndpoint::ALL
            .into_iter()
            .filter(|e| e.method() == Method::Post)
            .collect();
        assert_eq!(posts, [DemoEndpoint::Login]);
    }
}
