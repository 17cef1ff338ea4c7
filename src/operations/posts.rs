use crate::client::{HttpTransport, LinkedInClient, Result, Transport};
use crate::config::AppConfig;
use crate::models::{Post, PostsPage};
use chrono::DateTime;
use chrono_tz::Tz;
use log::{error, info};

/// Configuration options for listing the member's posts
#[derive(Debug, Clone)]
pub struct PostsOptions {
    /// The number of posts to retrieve
    pub count: u32,
    /// Index of the first post (paging offset)
    pub start: u32,
    /// Display posts in a brief, one-line format
    pub brief: bool,
    /// Timezone used to display post timestamps
    pub timezone: Tz,
}

impl Default for PostsOptions {
    fn default() -> Self {
        Self {
            count: 10,
            start: 0,
            brief: false,
            timezone: Tz::UTC,
        }
    }
}

/// Result of a posts fetch operation
#[derive(Debug)]
pub struct PostsResult {
    /// The number of posts found
    pub post_count: usize,
    /// Formatted output (for CLI display)
    pub formatted_output: String,
    /// The raw API response data
    pub raw_response: PostsPage,
}

/// Operation for listing the authenticated member's posts
pub struct PostsOperation<T: Transport = HttpTransport> {
    /// Configuration options for the operation
    options: PostsOptions,
    /// LinkedIn client for API interactions
    client: LinkedInClient<T>,
}

impl<T: Transport> PostsOperation<T> {
    /// Create a new posts operation with a custom LinkedIn client
    pub fn with_client(options: PostsOptions, client: LinkedInClient<T>) -> Self {
        Self { options, client }
    }

    /// Execute the posts operation
    pub async fn execute(&self) -> Result<PostsResult> {
        info!(
            "Fetching {} posts starting at {}",
            self.options.count, self.options.start
        );

        let page = self
            .client
            .get_my_posts(self.options.count, self.options.start)
            .await?;

        let mut output = String::new();
        if page.elements.is_empty() {
            output.push_str("No posts found.\n");
        } else {
            match page.paging.total {
                Some(total) => output.push_str(&format!(
                    "Found {} posts (of {})\n",
                    page.elements.len(),
                    total
                )),
                None => output.push_str(&format!("Found {} posts\n", page.elements.len())),
            }

            if self.options.brief {
                self.format_brief_output(&page, &mut output);

                output.push_str("\nPost Type Legend:\n");
                output.push_str("[T] = Text post\n");
                output.push_str("[A] = Article link\n");
                output.push_str("[M] = Image, document or video\n");
                output.push_str("[G] = Multi-image\n");
                output.push_str("[P] = Poll\n");
            } else {
                self.format_detailed_output(&page, &mut output);
            }
        }

        Ok(PostsResult {
            post_count: page.elements.len(),
            formatted_output: output,
            raw_response: page,
        })
    }

    fn timestamp(&self, post: &Post, format: &str) -> String {
        post.created_at
            .and_then(DateTime::from_timestamp_millis)
            .map(|utc| utc.with_timezone(&self.options.timezone).format(format).to_string())
            .unwrap_or_else(|| "-".to_string())
    }

    // Internal helper method for brief output format
    fn format_brief_output(&self, page: &PostsPage, output: &mut String) {
        for (i, post) in page.elements.iter().enumerate() {
            let post_type = match post.content_kind() {
                "text" => "T",
                "article" => "A",
                "media" => "M",
                "images" => "G",
                "poll" => "P",
                _ => "?",
            };

            // Truncate the commentary if necessary (40 chars), safely handling UTF-8
            let text = post.commentary.trim().replace('\n', " ");
            let excerpt = if text.is_empty() {
                "[No commentary]".to_string()
            } else if text.chars().count() > 40 {
                format!("\"{}...\"", text.chars().take(37).collect::<String>())
            } else {
                format!("\"{}\"", text)
            };

            output.push_str(&format!(
                "{:2}. [{}] [{}] {} | {}\n",
                i + 1,
                post_type,
                self.timestamp(post, "%Y-%m-%d %H:%M"),
                excerpt,
                post.id
            ));
        }
    }

    // Internal helper method for detailed output format
    fn format_detailed_output(&self, page: &PostsPage, output: &mut String) {
        for post in &page.elements {
            output.push_str("\n============ POST =============\n");
            output.push_str(&format!(
                "[{}] [{}]\n",
                self.timestamp(post, "%Y-%m-%d %H:%M:%S"),
                self.options.timezone
            ));
            output.push_str(&format!("URN: {} (use this for update/delete)\n", post.id));
            output.push_str(&format!("Content: {}\n", post.content_kind()));
            if let Some(visibility) = &post.visibility {
                output.push_str(&format!("Visibility: {}\n", visibility));
            }
            if let Some(state) = &post.lifecycle_state {
                output.push_str(&format!("State: {}\n", state));
            }
            output.push('\n');
            output.push_str(&post.commentary);
            output.push_str("\n================================\n\n");
        }
    }
}

/// CLI handler function for posts command
pub async fn handle_posts_command(config: &AppConfig, options: PostsOptions) -> Result<()> {
    let operation = PostsOperation::with_client(options, config.create_client()?);
    match operation.execute().await {
        Ok(result) => {
            print!("{}", result.formatted_output);
            Ok(())
        }
        Err(err) => {
            error!("Error fetching posts: {}", err);
            Err(err)
        }
    }
}
