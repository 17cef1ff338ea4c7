use super::transport::{ApiBase, ApiRequest, Transport};
use super::{LinkedInClient, Result};
use crate::models::UserInfo;
use log::debug;

impl<T: Transport> LinkedInClient<T> {
    /// Profile of the member the access token belongs to. Works without a
    /// person id; `sub` in the answer is that id.
    pub async fn get_user_info(&self) -> Result<UserInfo> {
        let response = self
            .transport
            .request(ApiRequest::get(ApiBase::V2, "/userinfo"))
            .await?;

        debug!("Userinfo response: {}", response.body);
        Ok(serde_json::from_str(&response.body)?)
    }
}
