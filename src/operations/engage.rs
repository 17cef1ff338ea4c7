use crate::client::{HttpTransport, LinkedInClient, Result, Transport};
use crate::config::AppConfig;
use crate::models::ReactionType;
use log::info;
use super::finish;

/// How to engage with a post
#[derive(Debug, Clone, PartialEq)]
pub enum Engagement {
    Comment(String),
    React(ReactionType),
}

/// Configuration options for commenting on or reacting to a post
#[derive(Debug, Clone)]
pub struct EngageOptions {
    /// URN of the post to engage with
    pub post_urn: String,
    pub engagement: Engagement,
}

/// Result of an engagement operation
#[derive(Debug)]
pub struct EngageResult {
    /// Whether LinkedIn accepted the comment or reaction
    pub success: bool,
    /// URN of the created comment (comments only, may be empty)
    pub comment_urn: Option<String>,
    /// Formatted message for CLI output
    pub message: String,
}

/// Operation for commenting on or reacting to a post
pub struct EngageOperation<T: Transport = HttpTransport> {
    options: EngageOptions,
    client: LinkedInClient<T>,
}

impl<T: Transport> EngageOperation<T> {
    pub fn with_client(options: EngageOptions, client: LinkedInClient<T>) -> Self {
        Self { options, client }
    }

    pub async fn execute(&self) -> Result<EngageResult> {
        let urn = &self.options.post_urn;
        info!("Engaging with {}", urn);

        let result = match &self.options.engagement {
            Engagement::Comment(text) => match self.client.add_comment(urn, text).await {
                Ok(comment) => EngageResult {
                    success: true,
                    message: format!("Comment created successfully! URN: {}", comment.comment_urn),
                    comment_urn: Some(comment.comment_urn),
                },
                Err(err) => EngageResult {
                    success: false,
                    comment_urn: None,
                    message: format!(
                        "Error creating comment: {}\n\nNote: commenting requires the w_member_social scope.",
                        err
                    ),
                },
            },
            Engagement::React(reaction) => match self.client.add_reaction(urn, *reaction).await {
                Ok(status) => EngageResult {
                    success: true,
                    comment_urn: None,
                    message: format!("Reacted {} (HTTP {})", reaction, status),
                },
                Err(err) => EngageResult {
                    success: false,
                    comment_urn: None,
                    message: format!("Error reacting to post: {}", err),
                },
            },
        };

        Ok(result)
    }
}

/// CLI handler function for comment and react commands
pub async fn handle_engage_command(config: &AppConfig, options: EngageOptions) -> Result<()> {
    let operation = EngageOperation::with_client(options, config.create_client()?);
    let result = operation.execute().await?;
    finish(result.success, result.message)
}
