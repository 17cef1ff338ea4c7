//! Multi-call workflows: upload media, then post it.
//!
//! Every local file is read before the first remote call, so a bad path
//! never leaves an orphaned upload session behind.

use super::transport::Transport;
use super::{LinkedInClient, LinkedInClientError, Result};
use crate::models::content::Poll;
use crate::models::{
    ContentPayload, MediaKind, MediaPostResult, PollDuration, PostResult, UploadedMedia,
    Visibility,
};
use log::info;
use std::path::Path;

impl<T: Transport> LinkedInClient<T> {
    /// Post with an article link preview. No upload involved.
    pub async fn create_post_with_link(
        &self,
        commentary: &str,
        url: &str,
        title: Option<&str>,
        description: Option<&str>,
        visibility: Visibility,
    ) -> Result<PostResult> {
        self.create_post(
            commentary,
            visibility,
            Some(ContentPayload::article(url, title, description)),
        )
        .await
    }

    pub async fn create_post_with_image(
        &self,
        commentary: &str,
        image_path: impl AsRef<Path>,
        alt_text: Option<&str>,
        visibility: Visibility,
    ) -> Result<MediaPostResult> {
        let image_path = image_path.as_ref();
        let data = read_file(image_path).await?;

        let image_urn = self.upload_media(MediaKind::Image, image_path, data).await?;

        let post = self
            .create_post(
                commentary,
                visibility,
                Some(ContentPayload::image(image_urn.clone(), alt_text)),
            )
            .await?;

        Ok(MediaPostResult {
            post,
            media: UploadedMedia::Image(image_urn),
        })
    }

    /// The title defaults to the file name.
    pub async fn create_post_with_document(
        &self,
        commentary: &str,
        document_path: impl AsRef<Path>,
        title: Option<&str>,
        visibility: Visibility,
    ) -> Result<MediaPostResult> {
        let document_path = document_path.as_ref();
        let data = read_file(document_path).await?;

        let document_urn = self
            .upload_media(MediaKind::Document, document_path, data)
            .await?;

        let title = media_title(title, document_path);
        let post = self
            .create_post(
                commentary,
                visibility,
                Some(ContentPayload::titled_media(document_urn.clone(), title)),
            )
            .await?;

        Ok(MediaPostResult {
            post,
            media: UploadedMedia::Document(document_urn),
        })
    }

    /// Uploads, finalizes, then posts. The title defaults to the file name.
    pub async fn create_post_with_video(
        &self,
        commentary: &str,
        video_path: impl AsRef<Path>,
        title: Option<&str>,
        visibility: Visibility,
    ) -> Result<MediaPostResult> {
        let video_path = video_path.as_ref();
        let data = read_file(video_path).await?;

        let video_urn = self.upload_media(MediaKind::Video, video_path, data).await?;

        let title = media_title(title, video_path);
        let post = self
            .create_post(
                commentary,
                visibility,
                Some(ContentPayload::titled_media(video_urn.clone(), title)),
            )
            .await?;

        Ok(MediaPostResult {
            post,
            media: UploadedMedia::Video(video_urn),
        })
    }

    /// Post several images. URNs come back in the order of `image_paths`;
    /// `alt_texts` is matched by position and may be shorter.
    pub async fn create_post_with_multi_images<P, S>(
        &self,
        commentary: &str,
        image_paths: &[P],
        alt_texts: &[S],
        visibility: Visibility,
    ) -> Result<MediaPostResult>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let mut files = Vec::with_capacity(image_paths.len());
        for path in image_paths {
            let path = path.as_ref();
            files.push((path, read_file(path).await?));
        }

        let mut image_urns = Vec::with_capacity(files.len());
        for (path, data) in files {
            image_urns.push(self.upload_media(MediaKind::Image, path, data).await?);
        }

        let post = self
            .create_post(
                commentary,
                visibility,
                Some(ContentPayload::multi_image(&image_urns, alt_texts)),
            )
            .await?;

        Ok(MediaPostResult {
            post,
            media: UploadedMedia::Images(image_urns),
        })
    }

    /// Single-vote poll with two to four options.
    pub async fn create_poll<I, S>(
        &self,
        question: &str,
        options: I,
        commentary: &str,
        duration: PollDuration,
        visibility: Visibility,
    ) -> Result<PostResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let poll = Poll::new(question, options, duration)?;
        self.create_post(commentary, visibility, Some(ContentPayload::Poll(poll)))
            .await
    }

    /// Run the whole upload sequence for one file and return its URN.
    async fn upload_media(&self, kind: MediaKind, path: &Path, data: Vec<u8>) -> Result<String> {
        let content_type = kind.mime_type(path);
        let size = data.len() as u64;

        let session = match kind {
            MediaKind::Video => self.init_video_upload(size).await?,
            _ => self.init_upload(kind, None).await?,
        };
        let receipt = self.transfer_binary(&session, data, content_type).await?;

        if kind == MediaKind::Video {
            self.finalize_video(&session.content_id, &receipt).await?;
        }

        info!(
            "Uploaded {} ({} bytes, {}) as {}",
            path.display(),
            size,
            content_type,
            session.content_id
        );
        Ok(session.content_id)
    }
}

/// Read a whole file, mapping any failure to [`LinkedInClientError::LocalIo`].
pub async fn read_file(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|source| LinkedInClientError::LocalIo {
            path: path.to_path_buf(),
            source,
        })
}

/// The caller's title, or the file name when it is missing or empty.
fn media_title(title: Option<&str>, path: &Path) -> String {
    match title {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => file_name(path),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
