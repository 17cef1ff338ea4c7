use super::transport::{ApiBase, ApiRequest, Transport};
use super::{encode_urn, LinkedInClient, Result};
use crate::models::{ContentPayload, PostResult, PostUpdate, PostsPage, Visibility};
use log::{debug, info};
use serde::Serialize;
use serde_json::{json, Value};

const FEED_DISTRIBUTION: &str = "MAIN_FEED";
const LIFECYCLE_PUBLISHED: &str = "PUBLISHED";

/// Everything that goes into a new post.
#[derive(Debug, Clone, Default)]
pub struct PostOptions {
    pub commentary: String,
    pub visibility: Visibility,
    pub content: Option<ContentPayload>,
    pub reshare_disabled: bool,
}

impl PostOptions {
    pub fn new(commentary: impl Into<String>) -> Self {
        Self {
            commentary: commentary.into(),
            ..Self::default()
        }
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn content(mut self, content: ContentPayload) -> Self {
        self.content = Some(content);
        self
    }

    pub fn reshare_disabled(mut self, disabled: bool) -> Self {
        self.reshare_disabled = disabled;
        self
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PostBody<'a> {
    author: String,
    commentary: &'a str,
    visibility: Visibility,
    distribution: Distribution,
    lifecycle_state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a ContentPayload>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    is_reshare_disabled_by_author: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Distribution {
    feed_distribution: &'static str,
}

impl<T: Transport> LinkedInClient<T> {
    /// Body of `POST /posts`. Uploads must already be done: the payload only
    /// carries URNs.
    pub fn build_post_body(&self, options: &PostOptions) -> Result<Value> {
        let body = PostBody {
            author: self.person_urn()?,
            commentary: &options.commentary,
            visibility: options.visibility,
            distribution: Distribution {
                feed_distribution: FEED_DISTRIBUTION,
            },
            lifecycle_state: LIFECYCLE_PUBLISHED,
            content: options.content.as_ref(),
            is_reshare_disabled_by_author: options.reshare_disabled,
        };
        Ok(serde_json::to_value(body)?)
    }

    /// Create a post as the configured member.
    pub async fn create_post(
        &self,
        commentary: &str,
        visibility: Visibility,
        content: Option<ContentPayload>,
    ) -> Result<PostResult> {
        let options = PostOptions {
            commentary: commentary.to_string(),
            visibility,
            content,
            reshare_disabled: false,
        };
        self.create_post_with_options(&options).await
    }

    pub async fn create_post_with_options(&self, options: &PostOptions) -> Result<PostResult> {
        let body = self.build_post_body(options)?;
        let response = self
            .transport
            .request(ApiRequest::post_json("/posts", body))
            .await?;

        // The new URN is only in the x-restli-id header, never the body
        let post_urn = response.restli_id();
        if post_urn.is_empty() {
            debug!(
                "Post created (HTTP {}) but no x-restli-id header was returned",
                response.status
            );
        } else {
            info!("Created post {}", post_urn);
        }

        Ok(PostResult {
            post_urn,
            status_code: response.status,
        })
    }

    /// The configured member's own posts, newest first.
    pub async fn get_my_posts(&self, limit: u32, offset: u32) -> Result<PostsPage> {
        let author = encode_urn(&self.person_urn()?);
        let response = self
            .transport
            .request(ApiRequest::get(
                ApiBase::Rest,
                format!(
                    "/posts?q=author&author={}&start={}&count={}",
                    author, offset, limit
                ),
            ))
            .await?;

        Ok(serde_json::from_value(response.json()?)?)
    }

    /// Returns the HTTP status (204 on success).
    pub async fn delete_post(&self, post_urn: &str) -> Result<u16> {
        let response = self
            .transport
            .request(ApiRequest::delete(format!("/posts/{}", encode_urn(post_urn))))
            .await?;

        info!("Deleted post {}", post_urn);
        Ok(response.status)
    }

    /// Partial update; only the fields set in `update` change.
    pub async fn update_post(&self, post_urn: &str, update: &PostUpdate) -> Result<u16> {
        let request = ApiRequest::post_json(
            format!("/posts/{}", encode_urn(post_urn)),
            json!({ "patch": { "$set": update.to_set_fields() } }),
        )
        .with_header("X-RestLi-Method", "PARTIAL_UPDATE");

        let response = self.transport.request(request).await?;
        Ok(response.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::{RecordedCall, RecordingTransport};
    use crate::client::LinkedInClientError;
    use reqwest::Method;

    fn member_client(transport: RecordingTransport) -> LinkedInClient<RecordingTransport> {
        LinkedInClient::with_transport(transport, Some("abc123".to_string()))
    }

    #[test]
    fn test_text_post_body_has_no_content() {
        let client = member_client(RecordingTransport::new());
        let body = client
            .build_post_body(&PostOptions::new("hello").visibility(Visibility::Public))
            .unwrap();

        assert_eq!(
            body,
            json!({
                "author": "urn:li:person:abc123",
                "commentary": "hello",
                "visibility": "PUBLIC",
                "distribution": {"feedDistribution": "MAIN_FEED"},
                "lifecycleState": "PUBLISHED"
            })
        );
        assert!(body.get("content").is_none());
        assert!(body.get("isReshareDisabledByAuthor").is_none());
    }

    #[test]
    fn test_post_body_with_content_and_reshare_flag() {
        let client = member_client(RecordingTransport::new());
        let options = PostOptions::new("look")
            .visibility(Visibility::Connections)
            .content(ContentPayload::image("urn:li:image:1", None))
            .reshare_disabled(true);
        let body = client.build_post_body(&options).unwrap();

        assert_eq!(body["visibility"], "CONNECTIONS");
        assert_eq!(body["content"], json!({"media": {"id": "urn:li:image:1"}}));
        assert_eq!(body["isReshareDisabledByAuthor"], true);
    }

    #[test]
    fn test_post_body_is_byte_identical_across_builds() {
        let client = member_client(RecordingTransport::new());
        let options = PostOptions::new("same").content(ContentPayload::article(
            "https://example.com",
            Some("t"),
            Some("d"),
        ));

        let first = serde_json::to_vec(&client.build_post_body(&options).unwrap()).unwrap();
        let second = serde_json::to_vec(&client.build_post_body(&options).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_post_body_requires_person() {
        let client = LinkedInClient::with_transport(RecordingTransport::new(), None);
        assert!(matches!(
            client.build_post_body(&PostOptions::new("x")),
            Err(LinkedInClientError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_create_post_reads_urn_from_header() {
        let transport =
            RecordingTransport::new().respond_with_header(201, "x-restli-id", "urn:li:share:777");
        let client = member_client(transport);

        let result = client
            .create_post("hello", Visibility::Public, None)
            .await
            .unwrap();
        assert_eq!(result.post_urn, "urn:li:share:777");
        assert_eq!(result.status_code, 201);
        assert_eq!(client.transport().described_calls(), vec!["POST /posts"]);
    }

    #[tokio::test]
    async fn test_create_post_without_header_still_succeeds() {
        let transport = RecordingTransport::new().respond_json(201, json!({"id": "ignored"}));
        let client = member_client(transport);

        let result = client
            .create_post("hello", Visibility::Public, None)
            .await
            .unwrap();
        assert_eq!(result.post_urn, "");
        assert_eq!(result.status_code, 201);
    }

    #[tokio::test]
    async fn test_create_post_rejected() {
        let transport = RecordingTransport::new().respond_json(500, json!({"message": "boom"}));
        let client = member_client(transport);

        let err = client
            .create_post("hello", Visibility::Public, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            LinkedInClientError::RemoteRejected { status: 500, .. }
        ));
    }

    #[tokio::test]
    async fn test_get_my_posts_query() {
        let transport = RecordingTransport::new().respond_json(
            200,
            json!({"elements": [{"id": "urn:li:share:1", "commentary": "hi"}], "paging": {"start": 5, "count": 20}}),
        );
        let client = member_client(transport);

        let page = client.get_my_posts(20, 5).await.unwrap();
        assert_eq!(page.elements.len(), 1);
        assert_eq!(page.paging.start, 5);
        assert_eq!(
            client.transport().described_calls(),
            vec!["GET /posts?q=author&author=urn%3Ali%3Aperson%3Aabc123&start=5&count=20"]
        );
    }

    #[tokio::test]
    async fn test_delete_post_encodes_urn() {
        let transport = RecordingTransport::new().respond_status(204);
        let client = member_client(transport);

        let status = client.delete_post("urn:li:share:123").await.unwrap();
        assert_eq!(status, 204);
        assert_eq!(
            client.transport().described_calls(),
            vec!["DELETE /posts/urn%3Ali%3Ashare%3A123"]
        );
    }

    #[tokio::test]
    async fn test_update_post_is_partial_update() {
        let client = member_client(RecordingTransport::new());
        let update = PostUpdate {
            commentary: Some("edited".to_string()),
            ..Default::default()
        };

        client.update_post("urn:li:share:9", &update).await.unwrap();

        let calls = client.transport().calls();
        let RecordedCall::Request(request) = &calls[0] else {
            panic!("expected a JSON request");
        };
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/posts/urn%3Ali%3Ashare%3A9");
        assert_eq!(
            request.headers,
            vec![("X-RestLi-Method".to_string(), "PARTIAL_UPDATE".to_string())]
        );
        assert_eq!(
            client.transport().json_bodies()[0],
            json!({"patch": {"$set": {"commentary": "edited"}}})
        );
    }
}
