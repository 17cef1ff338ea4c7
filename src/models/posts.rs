use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One page of `GET /posts?q=author`.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct PostsPage {
    #[serde(default)]
    pub elements: Vec<Post>,
    #[serde(default)]
    pub paging: Paging,
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct Paging {
    #[serde(default)]
    pub start: u32,
    #[serde(default)]
    pub count: u32,
    pub total: Option<u32>,
}

/// A post as returned by the posts finder. Only the fields the CLI shows
/// are typed; the rest is kept in `other_fields`.
#[derive(Deserialize, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub commentary: String,
    pub visibility: Option<String>,
    pub lifecycle_state: Option<String>,
    /// Epoch milliseconds.
    pub created_at: Option<i64>,
    pub published_at: Option<i64>,
    pub content: Option<Value>,

    #[serde(flatten)]
    pub other_fields: HashMap<String, Value>,
}

impl Post {
    /// Short label for the kind of content attached.
    pub fn content_kind(&self) -> &'static str {
        match self.content.as_ref().and_then(Value::as_object) {
            None => "text",
            Some(content) if content.contains_key("article") => "article",
            Some(content) if content.contains_key("multiImage") => "images",
            Some(content) if content.contains_key("poll") => "poll",
            Some(content) if content.contains_key("media") => "media",
            Some(_) => "other",
        }
    }
}

/// Fields that can be changed on an existing post. Unset fields are left
/// alone by the partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostUpdate {
    pub commentary: Option<String>,
    pub content_call_to_action_label: Option<String>,
    pub content_landing_page: Option<String>,
}

impl PostUpdate {
    pub fn is_empty(&self) -> bool {
        self.commentary.is_none()
            && self.content_call_to_action_label.is_none()
            && self.content_landing_page.is_none()
    }

    /// The `$set` map of a partial-update patch.
    pub fn to_set_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        if let Some(commentary) = &self.commentary {
            fields.insert("commentary".to_string(), Value::from(commentary.as_str()));
        }
        if let Some(label) = &self.content_call_to_action_label {
            fields.insert(
                "contentCallToActionLabel".to_string(),
                Value::from(label.as_str()),
            );
        }
        if let Some(page) = &self.content_landing_page {
            fields.insert("contentLandingPage".to_string(), Value::from(page.as_str()));
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_posts_page_tolerates_missing_fields() {
        let page: PostsPage = serde_json::from_value(json!({
            "elements": [
                {"id": "urn:li:share:1", "commentary": "hi", "createdAt": 1700000000000i64,
                 "distribution": {"feedDistribution": "MAIN_FEED"}},
                {"id": "urn:li:share:2", "content": {"poll": {}}}
            ],
            "paging": {"start": 0, "count": 10}
        }))
        .unwrap();

        assert_eq!(page.elements.len(), 2);
        assert_eq!(page.elements[0].commentary, "hi");
        assert_eq!(page.elements[0].created_at, Some(1_700_000_000_000));
        assert!(page.elements[0].other_fields.contains_key("distribution"));
        assert_eq!(page.elements[0].content_kind(), "text");
        assert_eq!(page.elements[1].content_kind(), "poll");
        assert_eq!(page.paging.count, 10);
        assert_eq!(page.paging.total, None);

        let empty: PostsPage = serde_json::from_value(json!({})).unwrap();
        assert!(empty.elements.is_empty());
    }

    #[test]
    fn test_post_update_set_fields() {
        let update = PostUpdate {
            commentary: Some("edited".to_string()),
            content_landing_page: Some("https://example.com".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
        assert_eq!(
            Value::Object(update.to_set_fields()),
            json!({"commentary": "edited", "contentLandingPage": "https://example.com"})
        );
        assert!(PostUpdate::default().to_set_fields().is_empty());
    }
}
