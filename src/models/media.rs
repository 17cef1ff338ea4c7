use serde::Serialize;
use std::fmt;
use std::path::Path;

pub const OCTET_STREAM: &str = "application/octet-stream";

const IMAGE_MIMES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
];

const DOCUMENT_MIMES: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("ppt", "application/vnd.ms-powerpoint"),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
];

const VIDEO_MIMES: &[(&str, &str)] = &[
    ("mp4", "video/mp4"),
    ("mov", "video/quicktime"),
    ("avi", "video/x-msvideo"),
    ("wmv", "video/x-ms-wmv"),
    ("webm", "video/webm"),
    ("mkv", "video/x-matroska"),
    ("m4v", "video/x-m4v"),
    ("flv", "video/x-flv"),
];

/// The three kinds of media LinkedIn accepts uploads for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Document,
    Video,
}

impl MediaKind {
    /// Path of the `initializeUpload` action for this kind.
    pub fn initialize_path(self) -> &'static str {
        match self {
            MediaKind::Image => "/images?action=initializeUpload",
            MediaKind::Document => "/documents?action=initializeUpload",
            MediaKind::Video => "/videos?action=initializeUpload",
        }
    }

    /// Field of the initialize response `value` holding the new URN.
    pub fn urn_field(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Document => "document",
            MediaKind::Video => "video",
        }
    }

    fn mime_table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            MediaKind::Image => IMAGE_MIMES,
            MediaKind::Document => DOCUMENT_MIMES,
            MediaKind::Video => VIDEO_MIMES,
        }
    }

    /// Content type for a file of this kind, from its extension alone.
    /// Unknown or missing extensions map to `application/octet-stream`.
    pub fn mime_type(self, path: impl AsRef<Path>) -> &'static str {
        let ext = match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_ascii_lowercase(),
            None => return OCTET_STREAM,
        };

        self.mime_table()
            .iter()
            .find(|(known, _)| *known == ext)
            .map(|(_, mime)| *mime)
            .unwrap_or(OCTET_STREAM)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.urn_field())
    }
}

/// A remote upload slot: where to PUT the bytes and the URN they will have.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSession {
    pub kind: MediaKind,
    pub transfer_target: String,
    pub content_id: String,
    /// Declared size, only sent for video.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

/// Outcome of a binary PUT.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferReceipt {
    pub status_code: u16,
    /// Set only when the upload target answered with a non-empty `etag`.
    /// Video uploads always get one; image and document uploads usually don't.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
}
