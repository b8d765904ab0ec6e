use std::sync::Arc;

use tracing::{info, warn};
use wpmoly_common::AttachmentId;

use super::progress::Session;
use super::upload::{UploadAction, UploadError, UploadRequest, Uploader};
use crate::metadata::RemoteImage;

/// Progress shown as soon as a poster upload starts.
const START_PERCENT: u8 = 40;

/// What the user picked in the poster picker.
#[derive(Debug, Clone, PartialEq)]
pub enum PosterSelection {
    /// A result-set entry carrying remote image data.
    Remote(RemoteImage),
    /// A bare image path with no remote data attached.
    Path(String),
}

/// Sets a movie's featured image from a remote poster.
pub struct PosterPicker {
    uploader: Arc<dyn Uploader>,
    session: Session,
    image_base_url: String,
}

impl PosterPicker {
    pub fn new(uploader: Arc<dyn Uploader>, session: Session, image_base_url: impl Into<String>) -> Self {
        Self {
            uploader,
            session,
            image_base_url: image_base_url.into(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Upload `selection` and return the resulting featured image.
    ///
    /// A bare path is not uploaded when the movie already has a featured
    /// image; `current` is returned as is. The session reports `Done!` and
    /// closes whether or not the upload succeeded.
    pub async fn select(
        &self,
        selection: PosterSelection,
        current: Option<AttachmentId>,
    ) -> Result<Option<AttachmentId>, UploadError> {
        self.session
            .begin("Please wait while the poster is uploading...", START_PERCENT);

        let image = match selection {
            PosterSelection::Remote(image) => image,
            PosterSelection::Path(_) if current.is_some() => {
                info!(post_id = %self.session.post_id, "featured image already set");
                self.session.set_percent(100);
                self.session.finish().await;
                return Ok(current);
            }
            PosterSelection::Path(path) => RemoteImage::from_path(&path, &self.image_base_url),
        };

        let request = UploadRequest {
            action: UploadAction::SetFeatured,
            image,
            title: self.session.title.clone(),
            post_id: self.session.post_id,
            tmdb_id: self.session.tmdb_id,
        };

        let result = self.uploader.upload(&request).await;
        match &result {
            Ok(id) => {
                info!(attachment = %id, post_id = %self.session.post_id, "featured image set");
                self.session.set_percent(100);
            }
            Err(err) => {
                warn!(file = %request.image.file_path, error = %err, "poster upload failed");
            }
        }

        self.session.finish().await;
        result.map(Some)
    }
}
