use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub mod auth;
pub mod content;
pub mod media;
pub mod posts;

pub use auth::{TokenResponse, UserInfo};
pub use content::{ContentPayload, PollDuration};
pub use media::{MediaKind, TransferReceipt, UploadSession};
pub use posts::{Paging, Post, PostUpdate, PostsPage};

/// Who can see a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    #[default]
    Public,
    Connections,
    LoggedIn,
    Container,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "PUBLIC",
            Visibility::Connections => "CONNECTIONS",
            Visibility::LoggedIn => "LOGGED_IN",
            Visibility::Container => "CONTAINER",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "PUBLIC" => Ok(Visibility::Public),
            "CONNECTIONS" => Ok(Visibility::Connections),
            "LOGGED_IN" => Ok(Visibility::LoggedIn),
            "CONTAINER" => Ok(Visibility::Container),
            other => Err(format!(
                "unknown visibility '{}' (expected PUBLIC, CONNECTIONS, LOGGED_IN or CONTAINER)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactionType {
    Like,
    Praise,
    Empathy,
    Interest,
    Appreciation,
    Entertainment,
}

impl ReactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReactionType::Like => "LIKE",
            ReactionType::Praise => "PRAISE",
            ReactionType::Empathy => "EMPATHY",
            ReactionType::Interest => "INTEREST",
            ReactionType::Appreciation => "APPRECIATION",
            ReactionType::Entertainment => "ENTERTAINMENT",
        }
    }
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LIKE" => Ok(ReactionType::Like),
            "PRAISE" => Ok(ReactionType::Praise),
            "EMPATHY" => Ok(ReactionType::Empathy),
            "INTEREST" => Ok(ReactionType::Interest),
            "APPRECIATION" => Ok(ReactionType::Appreciation),
            "ENTERTAINMENT" => Ok(ReactionType::Entertainment),
            other => Err(format!("unknown reaction type '{}'", other)),
        }
    }
}

/// Result of creating a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResult {
    /// From the `x-restli-id` header. Empty if the server left it out, in
    /// which case the post still counts as created.
    pub post_urn: String,
    pub status_code: u16,
}

/// URN(s) of the media uploaded on the way to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum UploadedMedia {
    #[serde(rename = "imageUrn")]
    Image(String),
    #[serde(rename = "documentUrn")]
    Document(String),
    #[serde(rename = "videoUrn")]
    Video(String),
    #[serde(rename = "imageUrns")]
    Images(Vec<String>),
}

/// A [`PostResult`] together with the media it carries. Serializes flat,
/// e.g. `{"postUrn": "...", "statusCode": 201, "imageUrn": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaPostResult {
    #[serde(flatten)]
    pub post: PostResult,
    #[serde(flatten)]
    pub media: UploadedMedia,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResult {
    pub comment_urn: String,
    pub status_code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_visibility_parse_and_display() {
        assert_eq!("public".parse::<Visibility>(), Ok(Visibility::Public));
        assert_eq!("logged-in".parse::<Visibility>(), Ok(Visibility::LoggedIn));
        assert_eq!("CONTAINER".parse::<Visibility>(), Ok(Visibility::Container));
        assert!("friends".parse::<Visibility>().is_err());
        assert_eq!(Visibility::LoggedIn.to_string(), "LOGGED_IN");
        assert_eq!(json!(Visibility::Connections), json!("CONNECTIONS"));
    }

    #[test]
    fn test_reaction_type_parse() {
        assert_eq!("praise".parse::<ReactionType>(), Ok(ReactionType::Praise));
        assert!("DISLIKE".parse::<ReactionType>().is_err());
        assert_eq!(json!(ReactionType::Entertainment), json!("ENTERTAINMENT"));
    }

    #[test]
    fn test_media_post_result_serializes_flat() {
        let result = MediaPostResult {
            post: PostResult {
                post_urn: "urn:li:share:1".to_string(),
                status_code: 201,
            },
            media: UploadedMedia::Image("urn:li:image:1".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"postUrn": "urn:li:share:1", "statusCode": 201, "imageUrn": "urn:li:image:1"})
        );

        let result = MediaPostResult {
            post: PostResult {
                post_urn: String::new(),
                status_code: 201,
            },
            media: UploadedMedia::Images(vec!["a".into(), "b".into()]),
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"postUrn": "", "statusCode": 201, "imageUrns": ["a", "b"]})
        );
    }
}
