//! Card records and listing pages as returned by the card API

use super::client::FetchError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Image shown for cards the API returns without one
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/223x310.png";

/// Stable card identifier
///
/// The API hands out string ids, but numeric ids are accepted and kept in
/// their decimal form so both spellings key the same selection entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawCardId", into = "String")]
pub struct CardId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCardId {
    Text(String),
    Number(i64),
}

impl From<RawCardId> for CardId {
    fn from(raw: RawCardId) -> Self {
        match raw {
            RawCardId::Text(s) => CardId(s),
            RawCardId::Number(n) => CardId(n.to_string()),
        }
    }
}

impl From<CardId> for String {
    fn from(id: CardId) -> Self {
        id.0
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        CardId(value.to_string())
    }
}

impl From<i64> for CardId {
    fn from(value: i64) -> Self {
        CardId(value.to_string())
    }
}

impl CardId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSet {
    #[serde(default)]
    pub name: String,
}

/// A card as delivered by the API
///
/// Only the fields the views read are typed. Everything else the API sends
/// is kept in `extra` and serialized back out untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set: Option<CardSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Card {
    /// Minimal card, mostly useful for building fixtures
    pub fn new(id: impl Into<CardId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: None,
            set: None,
            text: None,
            extra: Map::new(),
        }
    }

    pub fn image_url_or_placeholder(&self) -> &str {
        self.image_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(PLACEHOLDER_IMAGE_URL)
    }

    pub fn set_name(&self) -> Option<&str> {
        self.set.as_ref().map(|s| s.name.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub next: Option<String>,
}

/// One page of the card listing
///
/// Missing `cards` and `_totalCount` default to empty, which is what a
/// not-found response body decodes to.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CardPage {
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(rename = "_totalCount", default)]
    pub total_count: u64,
    #[serde(rename = "_links", default)]
    pub links: Option<PageLinks>,
}

impl CardPage {
    /// Decode a response body already parsed as JSON
    pub fn from_value(body: Value) -> Result<Self, FetchError> {
        serde_json::from_value(body)
            .map_err(|e| FetchError::Malformed(format!("unexpected listing shape: {}", e)))
    }

    /// Whether the server advertised a following page
    pub fn has_next(&self) -> bool {
        self.links
            .as_ref()
            .and_then(|links| links.next.as_deref())
            .is_some_and(|next| !next.is_empty())
    }
}
