use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Content type used when the caller does not override it.
pub const DEFAULT_CONTENT_TYPE: &str = "text/vnd.tiddlywiki";

/// One generated tiddler as it appears in the import JSON.
///
/// Field order matches the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Tiddler {
    /// `"{prefix} {index}"`.
    pub title: String,
    /// Body text, template-expanded or lorem.
    pub text: String,
    /// TiddlyWiki timestamp (`YYYYMMDDhhmmssSSS`, UTC).
    pub created: String,
    /// Always equal to `created`.
    pub modified: String,
    /// Space-separated tag list with `[[...]]` quoting.
    pub tags: String,
    /// Content type (e.g. `text/vnd.tiddlywiki`).
    #[serde(rename = "type")]
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<String>,
}

impl Tiddler {
    /// Build a tiddler whose `created` and `modified` share one timestamp.
    pub fn new(
        title: String,
        text: String,
        timestamp: String,
        tags: String,
        content_type: String,
    ) -> Self {
        Self {
            title,
            text,
            modified: timestamp.clone(),
            created: timestamp,
            tags,
            content_type,
            creator: None,
            modifier: None,
        }
    }

    /// Attach creator/modifier, dropping empty values.
    pub fn with_authors(mut self, creator: Option<&str>, modifier: Option<&str>) -> Self {
        self.creator = non_empty(creator);
        self.modifier = non_empty(modifier);
        self
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
