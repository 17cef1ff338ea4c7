use crate::models::{PollDuration, ReactionType, Visibility};
use chrono_tz::Tz;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "linkedrust",
    version = "0.1",
    about = "Rust client for the LinkedIn REST API: posts, media uploads and engagement."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

fn parse_timezone(value: &str) -> Result<Tz, String> {
    value
        .parse::<Tz>()
        .map_err(|_| format!("unknown timezone '{}'", value))
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Print the URL a member visits to authorize your app.
    /// No request is made.
    AuthUrl {
        /// Redirect URL registered for the app.
        #[arg(long, help = "OAuth redirect URI", required = true)]
        redirect_uri: String,

        /// Defaults to LINKEDIN_CLIENT_ID.
        #[arg(long, help = "LinkedIn app client ID")]
        client_id: Option<String>,

        /// Repeat for several scopes. Defaults to openid, profile, email, w_member_social.
        #[arg(long = "scope", help = "Scope to request (repeatable)")]
        scopes: Vec<String>,

        #[arg(long, help = "Opaque state echoed back on the redirect")]
        state: Option<String>,
    },

    /// Log in through the browser and print the resulting tokens.
    /// Needs LINKEDIN_CLIENT_ID and LINKEDIN_CLIENT_SECRET, and
    /// http://localhost:<port>/callback registered as a redirect URL.
    Login {
        /// Port to use for the localhost callback (default: LINKEDIN_OAUTH_PORT or 8080).
        #[arg(long, help = "Port to use for the OAuth callback")]
        port: Option<u16>,

        #[arg(long = "scope", help = "Scope to request (repeatable)")]
        scopes: Vec<String>,
    },

    /// Trade LINKEDIN_REFRESH_TOKEN for a new access token.
    Refresh,

    /// Show the member the access token belongs to.
    Whoami,

    /// List your own posts, newest first.
    Posts {
        #[arg(long, short, help = "Number of posts to retrieve", default_value_t = 10)]
        count: u32,

        #[arg(long, help = "Index of the first post", default_value_t = 0)]
        start: u32,

        /// Display posts in a brief, one-line format.
        #[arg(long, short, help = "Show posts in a brief one-line format")]
        brief: bool,

        #[arg(
            long,
            help = "Timezone for timestamps, e.g. America/Los_Angeles",
            default_value = "UTC",
            value_parser = parse_timezone
        )]
        timezone: Tz,
    },

    /// Publish a text-only post.
    Post {
        #[arg(help = "Post text", required = true)]
        text: String,

        #[arg(long, default_value = "PUBLIC", help = "PUBLIC, CONNECTIONS, LOGGED_IN or CONTAINER")]
        visibility: Visibility,

        #[arg(long, help = "Stop others from resharing the post")]
        no_reshare: bool,
    },

    /// Publish a post with an article link preview.
    Link {
        #[arg(help = "Post text", required = true)]
        text: String,

        #[arg(help = "URL to share", required = true)]
        url: String,

        /// Defaults to the URL.
        #[arg(long, help = "Article title")]
        title: Option<String>,

        #[arg(long, help = "Article description")]
        description: Option<String>,

        #[arg(long, default_value = "PUBLIC")]
        visibility: Visibility,
    },

    /// Upload an image and publish it.
    Image {
        #[arg(help = "Post text", required = true)]
        text: String,

        #[arg(help = "Image file (jpg, png, gif)", required = true)]
        path: PathBuf,

        #[arg(long, help = "Alternative text for the image")]
        alt_text: Option<String>,

        #[arg(long, default_value = "PUBLIC")]
        visibility: Visibility,
    },

    /// Upload a document (PDF, PPT(X), DOC(X)) and publish it.
    Document {
        #[arg(help = "Post text", required = true)]
        text: String,

        #[arg(help = "Document file", required = true)]
        path: PathBuf,

        /// Defaults to the file name.
        #[arg(long, help = "Document title")]
        title: Option<String>,

        #[arg(long, default_value = "PUBLIC")]
        visibility: Visibility,
    },

    /// Upload a video, finalize it and publish it.
    Video {
        #[arg(help = "Post text", required = true)]
        text: String,

        #[arg(help = "Video file", required = true)]
        path: PathBuf,

        /// Defaults to the file name.
        #[arg(long, help = "Video title")]
        title: Option<String>,

        #[arg(long, default_value = "PUBLIC")]
        visibility: Visibility,
    },

    /// Upload several images and publish them as one post.
    Images {
        #[arg(help = "Post text", required = true)]
        text: String,

        #[arg(help = "Image files, in display order", required = true, num_args = 1..)]
        paths: Vec<PathBuf>,

        /// Matched to the images by position.
        #[arg(long = "alt-text", help = "Alternative text (repeatable)")]
        alt_texts: Vec<String>,

        #[arg(long, default_value = "PUBLIC")]
        visibility: Visibility,
    },

    /// Publish a single-vote poll.
    Poll {
        #[arg(help = "Poll question", required = true)]
        question: String,

        /// Two to four options.
        #[arg(long = "option", help = "Poll option (repeat 2-4 times)", required = true)]
        options: Vec<String>,

        #[arg(long, help = "Post text", default_value = "")]
        text: String,

        #[arg(long, default_value = "THREE_DAYS", help = "ONE_DAY, THREE_DAYS, SEVEN_DAYS or FOURTEEN_DAYS")]
        duration: PollDuration,

        #[arg(long, default_value = "PUBLIC")]
        visibility: Visibility,
    },

    /// Change the text or call to action of an existing post.
    Update {
        #[arg(help = "Post URN, e.g. urn:li:share:123", required = true)]
        urn: String,

        #[arg(long, help = "New post text")]
        text: Option<String>,

        #[arg(long, help = "New call-to-action label, e.g. LEARN_MORE")]
        cta_label: Option<String>,

        #[arg(long, help = "New landing page URL")]
        landing_page: Option<String>,
    },

    /// Delete one of your posts.
    Delete {
        #[arg(help = "Post URN", required = true)]
        urn: String,
    },

    /// Comment on a post.
    Comment {
        #[arg(help = "Post URN", required = true)]
        urn: String,

        #[arg(help = "Comment text", required = true)]
        text: String,
    },

    /// React to a post.
    React {
        #[arg(help = "Post URN", required = true)]
        urn: String,

        #[arg(
            long,
            default_value = "LIKE",
            help = "LIKE, PRAISE, EMPATHY, INTEREST, APPRECIATION or ENTERTAINMENT"
        )]
        reaction: ReactionType,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Commands {
        let mut argv = vec!["linkedrust"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().command
    }

    #[test]
    fn test_post_defaults() {
        match parse(&["post", "Hello world"]) {
            Commands::Post {
                text,
                visibility,
                no_reshare,
            } => {
                assert_eq!(text, "Hello world");
                assert_eq!(visibility, Visibility::Public);
                assert!(!no_reshare);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_visibility_is_case_insensitive() {
        match parse(&["post", "Hi", "--visibility", "logged-in"]) {
            Commands::Post { visibility, .. } => assert_eq!(visibility, Visibility::LoggedIn),
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(Cli::try_parse_from(["linkedrust", "post", "Hi", "--visibility", "friends"]).is_err());
    }

    #[test]
    fn test_images_collects_paths_and_alt_texts() {
        match parse(&[
            "images", "Trip", "a.jpg", "b.png", "--alt-text", "first", "--alt-text", "second",
        ]) {
            Commands::Images {
                paths, alt_texts, ..
            } => {
                assert_eq!(paths, vec![PathBuf::from("a.jpg"), PathBuf::from("b.png")]);
                assert_eq!(alt_texts, vec!["first", "second"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_poll_options_and_duration() {
        match parse(&[
            "poll", "Tabs?", "--option", "Tabs", "--option", "Spaces", "--duration", "one_day",
        ]) {
            Commands::Poll {
                question,
                options,
                duration,
                text,
                ..
            } => {
                assert_eq!(question, "Tabs?");
                assert_eq!(options, vec!["Tabs", "Spaces"]);
                assert_eq!(duration, PollDuration::OneDay);
                assert_eq!(text, "");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_react_and_posts() {
        match parse(&["react", "urn:li:share:1", "--reaction", "praise"]) {
            Commands::React { reaction, .. } => assert_eq!(reaction, ReactionType::Praise),
            other => panic!("unexpected command: {:?}", other),
        }

        match parse(&["posts", "-c", "3", "--brief", "--timezone", "Europe/Berlin"]) {
            Commands::Posts {
                count,
                start,
                brief,
                timezone,
            } => {
                assert_eq!(count, 3);
                assert_eq!(start, 0);
                assert!(brief);
                assert_eq!(timezone, chrono_tz::Europe::Berlin);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["linkedrust", "posts", "--timezone", "Mars/Base"]).is_err());
    }
}
