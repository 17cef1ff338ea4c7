use crate::client::{HttpTransport, LinkedInClient, LinkedInClientError, Result, Transport};
use crate::config::AppConfig;
use crate::models::PostUpdate;
use super::finish;

/// Change to apply to an existing post
#[derive(Debug, Clone, PartialEq)]
pub enum ManageAction {
    Update(PostUpdate),
    Delete,
}

/// Configuration options for changing an existing post
#[derive(Debug, Clone)]
pub struct ManageOptions {
    /// URN of the post, e.g. `urn:li:share:123`
    pub post_urn: String,
    pub action: ManageAction,
}

/// Result of an update or delete
#[derive(Debug)]
pub struct ManageResult {
    pub success: bool,
    /// HTTP status returned by LinkedIn (if the call was made)
    pub status_code: Option<u16>,
    /// Formatted message for CLI output
    pub message: String,
}

/// Operation for editing or deleting one of the member's posts
pub struct ManageOperation<T: Transport = HttpTransport> {
    options: ManageOptions,
    client: LinkedInClient<T>,
}

impl<T: Transport> ManageOperation<T> {
    pub fn with_client(options: ManageOptions, client: LinkedInClient<T>) -> Self {
        Self { options, client }
    }

    pub async fn execute(&self) -> Result<ManageResult> {
        let urn = &self.options.post_urn;

        let outcome = match &self.options.action {
            ManageAction::Update(update) if update.is_empty() => {
                Err(LinkedInClientError::InvalidInput(
                    "Nothing to update: give new commentary or call-to-action fields".to_string(),
                ))
            }
            ManageAction::Update(update) => self
                .client
                .update_post(urn, update)
                .await
                .map(|status| (status, format!("Post {} updated", urn))),
            ManageAction::Delete => self
                .client
                .delete_post(urn)
                .await
                .map(|status| (status, format!("Post {} deleted", urn))),
        };

        Ok(match outcome {
            Ok((status, message)) => ManageResult {
                success: true,
                status_code: Some(status),
                message,
            },
            Err(err) => ManageResult {
                success: false,
                status_code: None,
                message: format!("Error changing post {}: {}", urn, err),
            },
        })
    }
}

/// CLI handler function for update and delete commands
pub async fn handle_manage_command(config: &AppConfig, options: ManageOptions) -> Result<()> {
    let operation = ManageOperation::with_client(options, config.create_client()?);
    let result = operation.execute().await?;
    finish(result.success, result.message)
}
