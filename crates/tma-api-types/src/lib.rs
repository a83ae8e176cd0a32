use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier as the backend sends it: either a JSON number or a string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum EntityId {
    Number(i64),
    Text(String),
}

impl EntityId {
    /// Zero and blank ids are treated as absent.
    pub fn is_usable(&self) -> bool {
        match self {
            EntityId::Number(value) => *value != 0,
            EntityId::Text(value) => !value.trim().is_empty(),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(value) => write!(f, "{value}"),
            EntityId::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        EntityId::Number(value)
    }
}

/// User record from `initDataUnsafe.user`. Not verified on this side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct HostUser {
    pub id: i64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(default)]
    pub is_premium: bool,
}

/// Colours from `themeParams`. Every field is optional on the host side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ThemeParams {
    #[serde(default)]
    pub bg_color: Option<String>,
    #[serde(default)]
    pub text_color: Option<String>,
    #[serde(default)]
    pub button_color: Option<String>,
    #[serde(default)]
    pub button_text_color: Option<String>,
    #[serde(default)]
    pub secondary_bg_color: Option<String>,
}

/// Body of `POST /auth/login/telegram`, passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct LoginPayload(pub serde_json::Value);

/// Body of `GET /users/me`. Only `user.id` is interpreted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct BackendProfile(pub serde_json::Value);

impl BackendProfile {
    pub fn user_id(&self) -> Option<EntityId> {
        let raw = self.0.get("user")?.get("id")?;
        let id: EntityId = serde_json::from_value(raw.clone()).ok()?;
        id.is_usable().then_some(id)
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    pub id: EntityId,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_user_id_accepts_numbers_and_strings() {
        let numeric = BackendProfile(json!({"user": {"id": 42, "name": "x"}}));
        assert_eq!(numeric.user_id(), Some(EntityId::Number(42)));

        let text = BackendProfile(json!({"user": {"id": "u-7"}}));
        assert_eq!(text.user_id(), Some(EntityId::Text("u-7".to_owned())));
    }

    #[test]
    fn profile_user_id_rejects_missing_zero_and_blank() {
        assert_eq!(BackendProfile(json!({})).user_id(), None);
        assert_eq!(BackendProfile(json!({"user": null})).user_id(), None);
        assert_eq!(BackendProfile(json!({"user": {"id": 0}})).user_id(), None);
        assert_eq!(BackendProfile(json!({"user": {"id": "  "}})).user_id(), None);
        assert_eq!(BackendProfile(json!({"user": {"id": true}})).user_id(), None);
    }

    #[test]
    fn host_user_optional_fields_default() {
        let user: HostUser = serde_json::from_value(json!({
            "id": 7,
            "first_name": "Ada",
            "allows_write_to_pm": true
        }))
        .expect("host user should parse");

        assert_eq!(user.id, 7);
        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.last_name, None);
        assert!(!user.is_premium);
    }

    #[test]
    fn roles_keep_backend_order() {
        let roles: Vec<Role> = serde_json::from_value(json!([
            {"id": 2, "name": "waiter"},
            {"id": "1", "name": "admin"}
        ]))
        .expect("roles should parse");

        let names: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["waiter", "admin"]);
        assert_eq!(roles[1].id.to_string(), "1");
    }
}
