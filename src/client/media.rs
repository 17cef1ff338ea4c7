//! Media uploads: open a session, PUT the bytes, finalize videos.
//!
//! A video goes through `init_upload -> transfer_binary -> finalize_video`
//! before its URN can be attached to a post. Images and documents skip the
//! last step. A failure at any step ends the attempt; the remote session that
//! was already opened is simply abandoned.

use super::transport::{ApiRequest, Transport};
use super::{LinkedInClient, LinkedInClientError, Result};
use crate::models::{MediaKind, TransferReceipt, UploadSession};
use log::{debug, info};
use serde_json::{json, Value};

const FINALIZE_VIDEO_PATH: &str = "/videos?action=finalizeUpload";

impl<T: Transport> LinkedInClient<T> {
    /// Open an upload session for `kind`, owned by the configured member.
    ///
    /// Videos must declare their exact size up front.
    pub async fn init_upload(
        &self,
        kind: MediaKind,
        size_bytes: Option<u64>,
    ) -> Result<UploadSession> {
        let body = self.initialize_upload_body(kind, size_bytes)?;

        let response = self
            .transport
            .request(ApiRequest::post_json(kind.initialize_path(), body))
            .await?;
        let json = response.json()?;
        debug!("Initialize {} upload response: {:?}", kind, json);

        let value = &json["value"];
        let upload_url = match kind {
            MediaKind::Video => &value["uploadInstructions"][0]["uploadUrl"],
            _ => &value["uploadUrl"],
        };
        let transfer_target = required_str(upload_url, kind, "upload URL")?;
        let content_id = required_str(&value[kind.urn_field()], kind, "URN")?;

        info!("Opened {} upload session for {}", kind, content_id);

        Ok(UploadSession {
            kind,
            transfer_target,
            content_id,
            size_bytes: size_bytes.filter(|_| kind == MediaKind::Video),
        })
    }

    pub async fn init_image_upload(&self) -> Result<UploadSession> {
        self.init_upload(MediaKind::Image, None).await
    }

    pub async fn init_document_upload(&self) -> Result<UploadSession> {
        self.init_upload(MediaKind::Document, None).await
    }

    pub async fn init_video_upload(&self, file_size_bytes: u64) -> Result<UploadSession> {
        self.init_upload(MediaKind::Video, Some(file_size_bytes))
            .await
    }

    /// Body of an `initializeUpload` call. Same inputs, same JSON.
    pub fn initialize_upload_body(
        &self,
        kind: MediaKind,
        size_bytes: Option<u64>,
    ) -> Result<Value> {
        let owner = self.person_urn()?;

        let request = match (kind, size_bytes) {
            (MediaKind::Video, Some(size)) => json!({
                "owner": owner,
                "fileSizeBytes": size,
                "uploadCaptions": false,
                "uploadThumbnail": false,
            }),
            (MediaKind::Video, None) => {
                return Err(LinkedInClientError::InvalidInput(
                    "A video upload needs its size in bytes".to_string(),
                ))
            }
            _ => json!({ "owner": owner }),
        };

        Ok(json!({ "initializeUploadRequest": request }))
    }

    /// PUT the file bytes to the session's pre-signed URL.
    pub async fn transfer_binary(
        &self,
        session: &UploadSession,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<TransferReceipt> {
        self.upload_binary(&session.transfer_target, data, content_type)
            .await
    }

    /// Like [`transfer_binary`](Self::transfer_binary) for a bare upload URL.
    pub async fn upload_binary(
        &self,
        upload_url: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<TransferReceipt> {
        let size = data.len();
        let response = self
            .transport
            .put_binary(upload_url, data, content_type)
            .await?;

        debug!("Uploaded {} bytes: HTTP {}", size, response.status);

        Ok(TransferReceipt {
            status_code: response.status,
            etag: response
                .header("etag")
                .filter(|etag| !etag.is_empty())
                .map(str::to_string),
        })
    }

    /// Mark a single-part video upload as complete.
    ///
    /// Needs the receipt of the transfer: its etag is the only uploaded part
    /// id. A receipt without an etag is rejected without calling the API.
    pub async fn finalize_video(&self, video_urn: &str, receipt: &TransferReceipt) -> Result<u16> {
        let etag = receipt.etag.as_deref().ok_or_else(|| {
            LinkedInClientError::MalformedResponse(format!(
                "Upload of {} returned no etag; cannot finalize",
                video_urn
            ))
        })?;

        let response = self
            .transport
            .request(ApiRequest::post_json(
                FINALIZE_VIDEO_PATH,
                json!({
                    "finalizeUploadRequest": {
                        "video": video_urn,
                        "uploadToken": "",
                        "uploadedPartIds": [etag],
                    }
                }),
            ))
            .await?;

        info!("Finalized video upload {}", video_urn);
        Ok(response.status)
    }
}

fn required_str(value: &Value, kind: MediaKind, what: &str) -> Result<String> {
    match value.as_str() {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(LinkedInClientError::MalformedResponse(format!(
            "Initialize {} upload response has no {}",
            kind, what
        ))),
    }
}
