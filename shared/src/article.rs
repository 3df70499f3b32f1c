//! Article payloads exchanged with the backend and the editor's pending cover.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Full article payload as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Backend identifier.
    pub id: String,
    /// Headline shown in lists and the editor form.
    #[serde(default)]
    pub title: String,
    /// Short summary shown under the title.
    #[serde(default)]
    pub description: String,
    /// Rich-text body (HTML).
    #[serde(default)]
    pub text: String,
    /// URL of the stored cover photo, if any.
    #[serde(default)]
    pub cover_photo: Option<String>,
    /// Tag labels. Payloads carrying anything other than a list here load
    /// with an empty tag list.
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    /// Whether the article has been published.
    #[serde(default)]
    pub published: bool,
}

/// Dashboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListItem {
    /// Backend identifier.
    pub id: String,
    /// Headline.
    #[serde(default)]
    pub title: String,
    /// Short summary.
    #[serde(default)]
    pub description: String,
    /// Cover photo URL.
    #[serde(default)]
    pub cover_photo: Option<String>,
    /// Publication status.
    #[serde(default)]
    pub published: bool,
}

impl From<Article> for ArticleListItem {
    fn from(a: Article) -> Self {
        ArticleListItem {
            id: a.id,
            title: a.title,
            description: a.description,
            cover_photo: a.cover_photo,
            published: a.published,
        }
    }
}

/// A local image selected or cropped in the browser, not yet uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct PendingImage {
    /// File name sent with the multipart part.
    pub file_name: String,
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl fmt::Debug for PendingImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingImage")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// The two shapes a cover photo can take while editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverPhoto {
    /// Already on the server; sent back as a plain URL field.
    Stored(String),
    /// Chosen locally; sent as a multipart file part.
    Pending(PendingImage),
}

impl CoverPhoto {
    /// Returns the pending upload, if this cover still needs one.
    pub fn pending(&self) -> Option<&PendingImage> {
        match self {
            CoverPhoto::Pending(image) => Some(image),
            CoverPhoto::Stored(_) => None,
        }
    }

    /// Returns the stored URL, if the cover is already on the server.
    pub fn stored_url(&self) -> Option<&str> {
        match self {
            CoverPhoto::Stored(url) => Some(url),
            CoverPhoto::Pending(_) => None,
        }
    }
}

/// Everything a create/update call sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDraft {
    /// `None` creates a new article.
    pub id: Option<String>,
    /// Headline.
    pub title: String,
    /// Short summary.
    pub description: String,
    /// Rich-text body.
    pub text: String,
    /// Tag labels, order not significant.
    pub tags: Vec<String>,
    /// Cover photo, if one is set.
    pub cover: Option<CoverPhoto>,
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let tags = match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(tag) => Some(tag),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn tags_string_field_loads_empty() {
        let article: Article =
            serde_json::from_value(json!({ "id": "1", "title": "t", "tags": "rust,wasm" }))
                .expect("payload should parse");
        assert!(article.tags.is_empty());
    }

    #[test]
    fn missing_and_null_tags_load_empty() {
        let missing: Article = serde_json::from_value(json!({ "id": "1" })).expect("parse");
        let null: Article =
            serde_json::from_value(json!({ "id": "1", "tags": null })).expect("parse");
        assert!(missing.tags.is_empty());
        assert!(null.tags.is_empty());
    }

    #[test]
    fn tag_list_keeps_only_strings() {
        let article: Article =
            serde_json::from_value(json!({ "id": "1", "tags": ["x", 3, "y", null] }))
                .expect("parse");
        assert_eq!(article.tags, vec!["x".to_string(), "y".to_string()]);
    }

    #[test]
    fn cover_photo_uses_camel_case() {
        let article: Article =
            serde_json::from_value(json!({ "id": "42", "coverPhoto": "url1" })).expect("parse");
        assert_eq!(article.cover_photo.as_deref(), Some("url1"));
    }

    #[test]
    fn pending_debug_hides_bytes() {
        let image = PendingImage {
            file_name: "a.png".to_string(),
            mime_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        };
        let rendered = format!("{image:?}");
        assert!(rendered.contains("len: 3"));
        assert!(!rendered.contains("[1, 2, 3]"));
    }
}
