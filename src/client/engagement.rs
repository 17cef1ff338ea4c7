use super::transport::{ApiRequest, Transport};
use super::{encode_urn, LinkedInClient, Result};
use crate::models::{CommentResult, ReactionType};
use log::info;
use serde_json::json;

impl<T: Transport> LinkedInClient<T> {
    /// Comment on a post as the configured member.
    pub async fn add_comment(&self, post_urn: &str, text: &str) -> Result<CommentResult> {
        let body = json!({
            "actor": self.person_urn()?,
            "message": { "text": text },
        });

        let response = self
            .transport
            .request(ApiRequest::post_json(
                format!("/socialActions/{}/comments", encode_urn(post_urn)),
                body,
            ))
            .await?;

        let comment_urn = response.restli_id();
        info!("Commented on {} ({})", post_urn, comment_urn);

        Ok(CommentResult {
            comment_urn,
            status_code: response.status,
        })
    }

    /// React to a post. Returns the HTTP status.
    pub async fn add_reaction(&self, post_urn: &str, reaction: ReactionType) -> Result<u16> {
        let actor = encode_urn(&self.person_urn()?);

        let response = self
            .transport
            .request(ApiRequest::post_json(
                format!("/reactions?actor={}", actor),
                json!({
                    "root": post_urn,
                    "reactionType": reaction,
                }),
            ))
            .await?;

        info!("Reacted {} to {}", reaction, post_urn);
        Ok(response.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::RecordingTransport;
    use crate::client::LinkedInClientError;

    fn member_client(transport: RecordingTransport) -> LinkedInClient<RecordingTransport> {
        LinkedInClient::with_transport(transport, Some("abc123".to_string()))
    }

    #[tokio::test]
    async fn test_add_comment() {
        let transport = RecordingTransport::new().respond_with_header(
            201,
            "x-restli-id",
            "urn:li:comment:(urn:li:share:1,42)",
        );
        let client = member_client(transport);

        let result = client
            .add_comment("urn:li:share:1", "Nice post")
            .await
            .unwrap();
        assert_eq!(result.comment_urn, "urn:li:comment:(urn:li:share:1,42)");
        assert_eq!(result.status_code, 201);

        assert_eq!(
            client.transport().described_calls(),
            vec!["POST /socialActions/urn%3Ali%3Ashare%3A1/comments"]
        );
        assert_eq!(
            client.transport().json_bodies()[0],
            json!({"actor": "urn:li:person:abc123", "message": {"text": "Nice post"}})
        );
    }

    #[tokio::test]
    async fn test_add_reaction() {
        let client = member_client(RecordingTransport::new().respond_status(201));

        let status = client
            .add_reaction("urn:li:share:1", ReactionType::Praise)
            .await
            .unwrap();
        assert_eq!(status, 201);

        assert_eq!(
            client.transport().described_calls(),
            vec!["POST /reactions?actor=urn%3Ali%3Aperson%3Aabc123"]
        );
        assert_eq!(
            client.transport().json_bodies()[0],
            json!({"root": "urn:li:share:1", "reactionType": "PRAISE"})
        );
    }

    #[tokio::test]
    async fn test_reaction_requires_person() {
        let client = LinkedInClient::with_transport(RecordingTransport::new(), None);
        let err = client
            .add_reaction("urn:li:share:1", ReactionType::Like)
            .await
            .unwrap_err();
        assert!(matches!(err, LinkedInClientError::Configuration(_)));
        assert!(client.transport().calls().is_empty());
    }
}
