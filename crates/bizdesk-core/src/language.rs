//! Request language selection.

use serde::{Deserialize, Serialize};

/// Languages the message tables are written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    /// Resolve a two-letter tag. Anything unrecognised falls back to
    /// the default language.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().get(..2).map(str::to_ascii_lowercase).as_deref() {
            Some("ar") => Language::Ar,
            _ => Language::default(),
        }
    }

    /// Resolve from an `Accept-Language` header value. Only the first
    /// listed language is considered.
    pub fn from_accept_language(header: Option<&str>) -> Self {
        header
            .and_then(|value| value.split(',').next())
            .map(Self::from_tag)
            .unwrap_or_default()
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }
}
