use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use wpmoly_common::{AttachmentId, MovieId};

use crate::metadata::RemoteImage;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// AJAX action handling an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadAction {
    /// Attach an image to the movie.
    UploadImage,
    /// Attach an image and make it the featured image.
    SetFeatured,
}

impl UploadAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UploadImage => "wpml_upload_image",
            Self::SetFeatured => "wpml_set_featured",
        }
    }
}

/// One upload to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub action: UploadAction,
    pub image: RemoteImage,
    pub title: String,
    pub post_id: MovieId,
    pub tmdb_id: u64,
}

impl UploadRequest {
    /// Form fields, with the image encoded as `image[...]` entries.
    pub fn form(&self, nonce: &str) -> Vec<(String, String)> {
        let mut fields = vec![
            ("action".to_string(), self.action.as_str().to_string()),
            ("wpml_check".to_string(), nonce.to_string()),
            ("image[file_path]".to_string(), self.image.file_path.clone()),
        ];
        if self.action == UploadAction::UploadImage {
            fields.push(("image[width]".to_string(), self.image.width.to_string()));
            fields.push(("image[height]".to_string(), self.image.height.to_string()));
            if let Some(language) = &self.image.language {
                fields.push(("image[iso_639_1]".to_string(), language.clone()));
            }
        }
        fields.push(("title".to_string(), self.title.clone()));
        fields.push(("post_id".to_string(), self.post_id.to_string()));
        fields.push(("tmdb_id".to_string(), self.tmdb_id.to_string()));
        fields
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("upload request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upload endpoint returned HTTP {0}")]
    Status(u16),

    #[error("upload was not accepted: {0:?}")]
    Rejected(String),
}

/// Sends uploads to the host.
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Upload one image; a success yields the new attachment's id.
    async fn upload(&self, request: &UploadRequest) -> Result<AttachmentId, UploadError>;
}

/// [`Uploader`] posting forms to the host's AJAX endpoint.
///
/// Requests are not retried.
#[derive(Debug, Clone)]
pub struct AjaxUploader {
    client: reqwest::Client,
    endpoint: String,
    nonce: String,
}

impl AjaxUploader {
    pub fn new(endpoint: impl Into<String>, nonce: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            nonce: nonce.into(),
        })
    }
}

#[async_trait]
impl Uploader for AjaxUploader {
    async fn upload(&self, request: &UploadRequest) -> Result<AttachmentId, UploadError> {
        debug!(
            action = request.action.as_str(),
            file = %request.image.file_path,
            post_id = %request.post_id,
            "posting upload"
        );

        let resp = self
            .client
            .post(&self.endpoint)
            .form(&request.form(&self.nonce))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(UploadError::Status(status.as_u16()));
        }

        let body = resp.text().await?;
        parse_attachment_id(&body)
    }
}

/// A successful response body is a bare attachment id.
fn parse_attachment_id(body: &str) -> Result<AttachmentId, UploadError> {
    body.parse::<AttachmentId>()
        .ok()
        .filter(|id| id.get() > 0)
        .ok_or_else(|| UploadError::Rejected(body.trim().chars().take(200).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(action: UploadAction) -> UploadRequest {
        UploadRequest {
            action,
            image: RemoteImage {
                file_path: "/hZkgoQYus5vegHoetLkCJzb17zJ.jpg".into(),
                url: "https://image.tmdb.org/t/p/original/hZkgoQYus5vegHoetLkCJzb17zJ.jpg".into(),
                width: 1280,
                height: 720,
                language: Some("en".into()),
                vote_average: 5.3,
            },
            title: "Image from Fight Club".into(),
            post_id: MovieId::new(42),
            tmdb_id: 550,
        }
    }

    fn field<'a>(form: &'a [(String, String)], key: &str) -> Option<&'a str> {
        form.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_upload_form() {
        let form = request(UploadAction::UploadImage).form("nonce123");
        assert_eq!(field(&form, "action"), Some("wpml_upload_image"));
        assert_eq!(field(&form, "wpml_check"), Some("nonce123"));
        assert_eq!(field(&form, "image[file_path]"), Some("/hZkgoQYus5vegHoetLkCJzb17zJ.jpg"));
        assert_eq!(field(&form, "image[width]"), Some("1280"));
        assert_eq!(field(&form, "title"), Some("Image from Fight Club"));
        assert_eq!(field(&form, "post_id"), Some("42"));
        assert_eq!(field(&form, "tmdb_id"), Some("550"));
    }

    #[test]
    fn test_featured_form_sends_only_the_path() {
        let form = request(UploadAction::SetFeatured).form("n");
        assert_eq!(field(&form, "action"), Some("wpml_set_featured"));
        assert_eq!(field(&form, "image[file_path]"), Some("/hZkgoQYus5vegHoetLkCJzb17zJ.jpg"));
        assert_eq!(field(&form, "image[width]"), None);
    }

    #[test]
    fn test_parse_attachment_id() {
        assert_eq!(parse_attachment_id("1234").unwrap(), AttachmentId::new(1234));
        assert_eq!(parse_attachment_id(" 77\n").unwrap(), AttachmentId::new(77));
        assert!(matches!(parse_attachment_id("0"), Err(UploadError::Rejected(_))));
        assert!(matches!(parse_attachment_id("-1"), Err(UploadError::Rejected(_))));
        assert!(matches!(parse_attachment_id("<p>error</p>"), Err(UploadError::Rejected(_))));
        assert!(matches!(parse_attachment_id(""), Err(UploadError::Rejected(_))));
    }
}
