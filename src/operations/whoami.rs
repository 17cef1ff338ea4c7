use crate::client::{HttpTransport, LinkedInClient, Result, Transport};
use crate::config::AppConfig;
use crate::models::UserInfo;
use log::error;

/// Result of looking up the token's member
#[derive(Debug)]
pub struct WhoamiResult {
    pub user: UserInfo,
    /// Formatted output (for CLI display)
    pub formatted_output: String,
}

/// Operation for showing which member the access token belongs to
pub struct WhoamiOperation<T: Transport = HttpTransport> {
    client: LinkedInClient<T>,
}

impl<T: Transport> WhoamiOperation<T> {
    pub fn with_client(client: LinkedInClient<T>) -> Self {
        Self { client }
    }

    pub async fn execute(&self) -> Result<WhoamiResult> {
        let user = self.client.get_user_info().await?;

        let mut output = String::new();
        if let Some(name) = &user.name {
            output.push_str(&format!("Name: {}\n", name));
        }
        if let Some(email) = &user.email {
            output.push_str(&format!("Email: {}\n", email));
        }
        output.push_str(&format!("Person ID: {}\n", user.sub));
        output.push_str(&format!("Person URN: urn:li:person:{}\n", user.sub));

        if let Some(configured) = self.client.person_id() {
            if configured != user.sub {
                output.push_str(&format!(
                    "Warning: LINKEDIN_PERSON_ID is {}, which is not this member\n",
                    configured
                ));
            }
        }

        Ok(WhoamiResult {
            user,
            formatted_output: output,
        })
    }
}

/// CLI handler function for whoami command
pub async fn handle_whoami_command(config: &AppConfig) -> Result<()> {
    config.require_access_token()?;

    let operation = WhoamiOperation::with_client(config.create_client()?);
    match operation.execute().await {
        Ok(result) => {
            print!("{}", result.formatted_output);
            Ok(())
        }
        Err(err) => {
            error!("Error fetching user info: {}", err);
            Err(err)
        }
    }
}
