//! LinkedIn REST API client: posts, media uploads, engagement and OAuth.
//!
//! Media posts are a sequence of calls: open an upload session, PUT the
//! bytes to the returned URL, finalize (videos only), then create the post
//! that references the media URN. The `create_post_with_*` helpers on
//! [`LinkedInClient`] run that whole sequence.

pub mod cli;
pub mod client;
pub mod config;
pub mod models;
pub mod operations;

pub use client::auth::authorization_url;
pub use client::{ClientConfig, LinkedInClient, LinkedInClientError, Result};
pub use models::{
    CommentResult, ContentPayload, MediaPostResult, PollDuration, PostResult, ReactionType,
    UploadedMedia, Visibility,
};
