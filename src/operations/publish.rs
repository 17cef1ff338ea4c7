use crate::client::posts::PostOptions;
use crate::client::{HttpTransport, LinkedInClient, Result, Transport};
use crate::config::AppConfig;
use crate::models::{PollDuration, PostResult, UploadedMedia, Visibility};
use log::info;
use std::path::PathBuf;
use super::finish;

/// What gets attached to the new post
#[derive(Debug, Clone, PartialEq)]
pub enum PublishContent {
    Text,
    Link {
        url: String,
        title: Option<String>,
        description: Option<String>,
    },
    Image {
        path: PathBuf,
        alt_text: Option<String>,
    },
    Document {
        path: PathBuf,
        title: Option<String>,
    },
    Video {
        path: PathBuf,
        title: Option<String>,
    },
    Images {
        paths: Vec<PathBuf>,
        alt_texts: Vec<String>,
    },
    Poll {
        question: String,
        options: Vec<String>,
        duration: PollDuration,
    },
}

/// Configuration options for publishing a post
#[derive(Debug, Clone)]
pub struct PublishOptions {
    /// Text of the post
    pub commentary: String,
    pub visibility: Visibility,
    /// Only honoured for plain text posts
    pub reshare_disabled: bool,
    pub content: PublishContent,
}

/// Result of a publish operation
#[derive(Debug)]
pub struct PublishResult {
    /// Whether the post was created
    pub success: bool,
    /// The created post (if successful)
    pub post: Option<PostResult>,
    /// URNs of uploaded media, in upload order
    pub media_urns: Vec<String>,
    /// Formatted message for CLI output
    pub message: String,
}

/// Operation for publishing a post, uploading any media first
pub struct PublishOperation<T: Transport = HttpTransport> {
    /// Configuration options for the operation
    options: PublishOptions,
    /// LinkedIn client for API interactions
    client: LinkedInClient<T>,
}

impl<T: Transport> PublishOperation<T> {
    /// Create a new publish operation with a custom LinkedIn client
    pub fn with_client(options: PublishOptions, client: LinkedInClient<T>) -> Self {
        Self { options, client }
    }

    /// Execute the publish operation
    pub async fn execute(&self) -> Result<PublishResult> {
        let commentary = self.options.commentary.as_str();
        let visibility = self.options.visibility;

        let outcome = match &self.options.content {
            PublishContent::Text => self
                .client
                .create_post_with_options(
                    &PostOptions::new(commentary)
                        .visibility(visibility)
                        .reshare_disabled(self.options.reshare_disabled),
                )
                .await
                .map(|post| (post, Vec::new())),
            PublishContent::Link {
                url,
                title,
                description,
            } => self
                .client
                .create_post_with_link(
                    commentary,
                    url,
                    title.as_deref(),
                    description.as_deref(),
                    visibility,
                )
                .await
                .map(|post| (post, Vec::new())),
            PublishContent::Poll {
                question,
                options,
                duration,
            } => self
                .client
                .create_poll(question, options.iter().cloned(), commentary, *duration, visibility)
                .await
                .map(|post| (post, Vec::new())),
            PublishContent::Image { path, alt_text } => self
                .client
                .create_post_with_image(commentary, path, alt_text.as_deref(), visibility)
                .await
                .map(|result| (result.post, media_urns(result.media))),
            PublishContent::Document { path, title } => self
                .client
                .create_post_with_document(commentary, path, title.as_deref(), visibility)
                .await
                .map(|result| (result.post, media_urns(result.media))),
            PublishContent::Video { path, title } => self
                .client
                .create_post_with_video(commentary, path, title.as_deref(), visibility)
                .await
                .map(|result| (result.post, media_urns(result.media))),
            PublishContent::Images { paths, alt_texts } => self
                .client
                .create_post_with_multi_images(commentary, paths, alt_texts, visibility)
                .await
                .map(|result| (result.post, media_urns(result.media))),
        };

        match outcome {
            Ok((post, media_urns)) => {
                let mut message = if post.post_urn.is_empty() {
                    format!(
                        "Post created (HTTP {}), but LinkedIn did not return its URN",
                        post.status_code
                    )
                } else {
                    format!("Post created successfully! URN: {}", post.post_urn)
                };
                for urn in &media_urns {
                    message.push_str(&format!("\nUploaded media: {}", urn));
                }

                Ok(PublishResult {
                    success: true,
                    post: Some(post),
                    media_urns,
                    message,
                })
            }
            Err(err) => Ok(PublishResult {
                success: false,
                post: None,
                media_urns: Vec::new(),
                message: format!("Error publishing post: {}", err),
            }),
        }
    }
}

fn media_urns(media: UploadedMedia) -> Vec<String> {
    match media {
        UploadedMedia::Image(urn) | UploadedMedia::Document(urn) | UploadedMedia::Video(urn) => {
            vec![urn]
        }
        UploadedMedia::Images(urns) => urns,
    }
}

/// CLI handler function for every publishing command
pub async fn handle_publish_command(config: &AppConfig, options: PublishOptions) -> Result<()> {
    info!("Publishing {} post", content_label(&options.content));

    let operation = PublishOperation::with_client(options, config.create_client()?);
    let result = operation.execute().await?;
    finish(result.success, result.message)
}

fn content_label(content: &PublishContent) -> &'static str {
    match content {
        PublishContent::Text => "text",
        PublishContent::Link { .. } => "link",
        PublishContent::Image { .. } => "image",
        PublishContent::Document { .. } => "document",
        PublishContent::Video { .. } => "video",
        PublishContent::Images { .. } => "multi-image",
        PublishContent::Poll { .. } => "poll",
    }
}
