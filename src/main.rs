use clap::Parser;
use linkedrust::cli::{Cli, Commands};
use linkedrust::client::Result;
use linkedrust::config::AppConfig;
use linkedrust::models::PostUpdate;
use linkedrust::operations::auth::{
    handle_auth_url_command, handle_login_command, handle_refresh_command,
};
use linkedrust::operations::engage::{handle_engage_command, EngageOptions, Engagement};
use linkedrust::operations::manage::{handle_manage_command, ManageAction, ManageOptions};
use linkedrust::operations::posts::{handle_posts_command, PostsOptions};
use linkedrust::operations::publish::{handle_publish_command, PublishContent, PublishOptions};
use linkedrust::operations::whoami::handle_whoami_command;
use log::error;

#[tokio::main]
async fn main() {
    // RUST_LOG overrides the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = AppConfig::load();

    if let Err(err) = run(cli.command, &config).await {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn publish(
    commentary: String,
    visibility: linkedrust::models::Visibility,
    content: PublishContent,
) -> PublishOptions {
    PublishOptions {
        commentary,
        visibility,
        reshare_disabled: false,
        content,
    }
}

async fn run(command: Commands, config: &AppConfig) -> Result<()> {
    match command {
        Commands::AuthUrl {
            redirect_uri,
            client_id,
            scopes,
            state,
        } => handle_auth_url_command(config, client_id, redirect_uri, scopes, state),
        Commands::Login { port, scopes } => handle_login_command(config, port, scopes).await,
        Commands::Refresh => handle_refresh_command(config).await,
        Commands::Whoami => handle_whoami_command(config).await,
        Commands::Posts {
            count,
            start,
            brief,
            timezone,
        } => {
            let options = PostsOptions {
                count,
                start,
                brief,
                timezone,
            };
            handle_posts_command(config, options).await
        }
        Commands::Post {
            text,
            visibility,
            no_reshare,
        } => {
            let options = PublishOptions {
                reshare_disabled: no_reshare,
                ..publish(text, visibility, PublishContent::Text)
            };
            handle_publish_command(config, options).await
        }
        Commands::Link {
            text,
            url,
            title,
            description,
            visibility,
        } => {
            let content = PublishContent::Link {
                url,
                title,
                description,
            };
            handle_publish_command(config, publish(text, visibility, content)).await
        }
        Commands::Image {
            text,
            path,
            alt_text,
            visibility,
        } => {
            let content = PublishContent::Image { path, alt_text };
            handle_publish_command(config, publish(text, visibility, content)).await
        }
        Commands::Document {
            text,
            path,
            title,
            visibility,
        } => {
            let content = PublishContent::Document { path, title };
            handle_publish_command(config, publish(text, visibility, content)).await
        }
        Commands::Video {
            text,
            path,
            title,
            visibility,
        } => {
            let content = PublishContent::Video { path, title };
            handle_publish_command(config, publish(text, visibility, content)).await
        }
        Commands::Images {
            text,
            paths,
            alt_texts,
            visibility,
        } => {
            let content = PublishContent::Images { paths, alt_texts };
            handle_publish_command(config, publish(text, visibility, content)).await
        }
        Commands::Poll {
            question,
            options,
            text,
            duration,
            visibility,
        } => {
            let content = PublishContent::Poll {
                question,
                options,
                duration,
            };
            handle_publish_command(config, publish(text, visibility, content)).await
        }
        Commands::Update {
            urn,
            text,
            cta_label,
            landing_page,
        } => {
            let update = PostUpdate {
                commentary: text,
                content_call_to_action_label: cta_label,
                content_landing_page: landing_page,
            };
            let options = ManageOptions {
                post_urn: urn,
                action: ManageAction::Update(update),
            };
            handle_manage_command(config, options).await
        }
        Commands::Delete { urn } => {
            let options = ManageOptions {
                post_urn: urn,
                action: ManageAction::Delete,
            };
            handle_manage_command(config, options).await
        }
        Commands::Comment { urn, text } => {
            let options = EngageOptions {
                post_urn: urn,
                engagement: Engagement::Comment(text),
            };
            handle_engage_command(config, options).await
        }
        Commands::React { urn, reaction } => {
            let options = EngageOptions {
                post_urn: urn,
                engagement: Engagement::React(reaction),
            };
            handle_engage_command(config, options).await
        }
    }
}
