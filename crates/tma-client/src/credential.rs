use std::fmt;

/// Canonical header carrying the signed init data.
pub const INIT_DATA_HEADER: &str = "Telegram-Init-Data";

/// Header name used by the older gateway deployment. Only sent when
/// `ClientConfig::send_header_alias` is set.
pub const INIT_DATA_HEADER_ALIAS: &str = "X-Telegram-Init-Data";

const PREVIEW_CHARS: usize = 50;

/// The opaque `initData` string Telegram signs for this session.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct InitData(String);

impl InitData {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Truncated form safe to put in logs.
    pub fn preview(&self) -> String {
        let mut preview: String = self.0.chars().take(PREVIEW_CHARS).collect();
        if self.0.chars().count() > PREVIEW_CHARS {
            preview.push_str("...");
        }
        preview
    }
}

impl fmt::Debug for InitData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("InitData").field(&self.preview()).finish()
    }
}

impl From<&str> for InitData {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for InitData {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_counts_as_empty() {
        assert!(InitData::new("").is_empty());
        assert!(InitData::new("  \n").is_empty());
        assert!(!InitData::new("query_id=abc").is_empty());
    }

    #[test]
    fn preview_truncates_long_values() {
        let long = "a".repeat(80);
        let data = InitData::new(long);
        assert_eq!(data.preview(), format!("{}...", "a".repeat(50)));

        let short = InitData::new("abc");
        assert_eq!(short.preview(), "abc");
        assert_eq!(format!("{short:?}"), "InitData(\"abc\")");
    }
}
