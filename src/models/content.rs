//! Rich content that can be attached to a post.
//!
//! A post carries at most one [`ContentPayload`]. It serializes to the
//! externally tagged shape the posts API expects, e.g.
//! `{"media": {"id": "urn:li:image:1", "altText": "..."}}`.

use crate::client::{LinkedInClientError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const MIN_POLL_OPTIONS: usize = 2;
pub const MAX_POLL_OPTIONS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentPayload {
    Article(Article),
    Media(MediaContent),
    MultiImage(MultiImage),
    Poll(Poll),
}

/// Link preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub source: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A single uploaded image, document or video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaContent {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MultiImage {
    pub images: Vec<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRef {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Poll {
    pub question: String,
    pub options: Vec<PollOption>,
    pub settings: PollSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollOption {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollSettings {
    pub duration: PollDuration,
    pub vote_selection_type: VoteSelectionType,
    pub is_voter_visible_to_author: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VoteSelectionType {
    #[default]
    SingleVote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PollDuration {
    OneDay,
    #[default]
    ThreeDays,
    SevenDays,
    FourteenDays,
}

impl PollDuration {
    pub fn as_str(self) -> &'static str {
        match self {
            PollDuration::OneDay => "ONE_DAY",
            PollDuration::ThreeDays => "THREE_DAYS",
            PollDuration::SevenDays => "SEVEN_DAYS",
            PollDuration::FourteenDays => "FOURTEEN_DAYS",
        }
    }
}

impl fmt::Display for PollDuration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PollDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "ONE_DAY" => Ok(PollDuration::OneDay),
            "THREE_DAYS" => Ok(PollDuration::ThreeDays),
            "SEVEN_DAYS" => Ok(PollDuration::SevenDays),
            "FOURTEEN_DAYS" => Ok(PollDuration::FourteenDays),
            other => Err(format!(
                "unknown poll duration '{}' (expected ONE_DAY, THREE_DAYS, SEVEN_DAYS or FOURTEEN_DAYS)",
                other
            )),
        }
    }
}

impl ContentPayload {
    /// Article link. The title falls back to the URL itself.
    pub fn article(source: &str, title: Option<&str>, description: Option<&str>) -> Self {
        ContentPayload::Article(Article {
            source: source.to_string(),
            title: non_empty(title).unwrap_or_else(|| source.to_string()),
            description: non_empty(description),
        })
    }

    /// Uploaded image with optional alt text.
    pub fn image(id: impl Into<String>, alt_text: Option<&str>) -> Self {
        ContentPayload::Media(MediaContent {
            id: id.into(),
            alt_text: non_empty(alt_text),
            title: None,
        })
    }

    /// Uploaded document or video; both carry a title instead of alt text.
    pub fn titled_media(id: impl Into<String>, title: impl Into<String>) -> Self {
        ContentPayload::Media(MediaContent {
            id: id.into(),
            alt_text: None,
            title: Some(title.into()),
        })
    }

    /// Several images in order. `alt_texts` is matched by position and may be
    /// shorter than `ids`; empty entries are skipped.
    pub fn multi_image<S: AsRef<str>>(ids: &[String], alt_texts: &[S]) -> Self {
        let images = ids
            .iter()
            .enumerate()
            .map(|(i, id)| ImageRef {
                id: id.clone(),
                alt_text: non_empty(alt_texts.get(i).map(|s| s.as_ref())),
            })
            .collect();

        ContentPayload::MultiImage(MultiImage { images })
    }
}

impl Poll {
    /// A single-vote poll whose votes are visible to the author.
    /// Fails unless there are between two and four options.
    pub fn new<I, S>(question: &str, options: I, duration: PollDuration) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<PollOption> = options
            .into_iter()
            .map(|text| PollOption { text: text.into() })
            .collect();

        if !(MIN_POLL_OPTIONS..=MAX_POLL_OPTIONS).contains(&options.len()) {
            return Err(LinkedInClientError::InvalidInput(format!(
                "A poll needs {} to {} options, got {}",
                MIN_POLL_OPTIONS,
                MAX_POLL_OPTIONS,
                options.len()
            )));
        }

        Ok(Self {
            question: question.to_string(),
            options,
            settings: PollSettings {
                duration,
                vote_selection_type: VoteSelectionType::SingleVote,
                is_voter_visible_to_author: true,
            },
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_article_serialization() {
        let payload = ContentPayload::article("https://example.com", None, None);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"article": {"source": "https://example.com", "title": "https://example.com"}})
        );

        let payload =
            ContentPayload::article("https://example.com", Some("Example"), Some("A site"));
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"article": {
                "source": "https://example.com",
                "title": "Example",
                "description": "A site"
            }})
        );
    }

    #[test]
    fn test_empty_article_title_falls_back_to_source() {
        let payload = ContentPayload::article("https://x.io", Some(""), None);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"article": {"source": "https://x.io", "title": "https://x.io"}})
        );
    }

    #[test]
    fn test_image_media_serialization() {
        let payload = ContentPayload::image("urn:li:image:1", Some("a cat"));
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"media": {"id": "urn:li:image:1", "altText": "a cat"}})
        );

        // Empty alt text is dropped, not sent as "".
        let payload = ContentPayload::image("urn:li:image:1", Some(""));
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"media": {"id": "urn:li:image:1"}})
        );
    }

    #[test]
    fn test_titled_media_serialization() {
        let payload = ContentPayload::titled_media("urn:li:document:9", "report.pdf");
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"media": {"id": "urn:li:document:9", "title": "report.pdf"}})
        );
    }

    #[test]
    fn test_multi_image_alignment() {
        let ids: Vec<String> = (1..=4).map(|i| format!("urn:li:image:{}", i)).collect();
        let payload = ContentPayload::multi_image(&ids, &["first", "", "third"]);

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"multiImage": {"images": [
                {"id": "urn:li:image:1", "altText": "first"},
                {"id": "urn:li:image:2"},
                {"id": "urn:li:image:3", "altText": "third"},
                {"id": "urn:li:image:4"}
            ]}})
        );
    }

    #[test]
    fn test_multi_image_without_alt_texts() {
        let ids = vec!["urn:li:image:a".to_string(), "urn:li:image:b".to_string()];
        let ContentPayload::MultiImage(multi) = ContentPayload::multi_image::<&str>(&ids, &[])
        else {
            panic!("expected multi image payload");
        };
        assert_eq!(multi.images.len(), 2);
        assert!(multi.images.iter().all(|image| image.alt_text.is_none()));
        assert_eq!(multi.images[0].id, "urn:li:image:a");
        assert_eq!(multi.images[1].id, "urn:li:image:b");
    }

    #[test]
    fn test_poll_serialization() {
        let poll = Poll::new("Tabs or spaces?", ["Tabs", "Spaces"], PollDuration::default())
            .unwrap();
        assert_eq!(
            serde_json::to_value(ContentPayload::Poll(poll)).unwrap(),
            json!({"poll": {
                "question": "Tabs or spaces?",
                "options": [{"text": "Tabs"}, {"text": "Spaces"}],
                "settings": {
                    "duration": "THREE_DAYS",
                    "voteSelectionType": "SINGLE_VOTE",
                    "isVoterVisibleToAuthor": true
                }
            }})
        );
    }

    #[test]
    fn test_poll_option_count_bounds() {
        assert!(Poll::new("q", ["only"], PollDuration::OneDay).is_err());
        assert!(Poll::new("q", ["a", "b", "c", "d", "e"], PollDuration::OneDay).is_err());
        assert!(Poll::new("q", ["a", "b", "c", "d"], PollDuration::OneDay).is_ok());
        assert!(matches!(
            Poll::new("q", Vec::<String>::new(), PollDuration::OneDay),
            Err(LinkedInClientError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_poll_duration_parsing() {
        assert_eq!("one_day".parse::<PollDuration>(), Ok(PollDuration::OneDay));
        assert_eq!(
            "FOURTEEN-DAYS".parse::<PollDuration>(),
            Ok(PollDuration::FourteenDays)
        );
        assert!("FOREVER".parse::<PollDuration>().is_err());
        assert_eq!(PollDuration::SevenDays.to_string(), "SEVEN_DAYS");
    }
}
