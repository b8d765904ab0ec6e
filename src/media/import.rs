use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::join_all;
use tracing::{info, warn};
use wpmoly_common::AttachmentId;

use super::progress::Session;
use super::upload::{UploadAction, UploadRequest, Uploader};
use crate::metadata::RemoteImage;

/// Outcome of a bulk import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// Attachments created, in completion order.
    pub attachments: Vec<AttachmentId>,
    /// Images whose upload failed.
    pub failed: Vec<RemoteImage>,
}

impl ImportReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Imports a selection of remote images into a movie.
///
/// Every upload starts at once; there is no concurrency cap and no ordering
/// between completions. Only successful uploads advance the progress bar,
/// so a failed upload leaves the session short of `Done!`.
pub struct ImageImporter {
    uploader: Arc<dyn Uploader>,
    session: Session,
}

impl ImageImporter {
    pub fn new(uploader: Arc<dyn Uploader>, session: Session) -> Self {
        Self { uploader, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Progress percentage after `done` of `total` uploads.
    pub fn percent(done: usize, total: usize) -> u8 {
        if total == 0 || done >= total {
            return 100;
        }
        ((done * 100) as f64 / total as f64).round() as u8
    }

    pub async fn import(&self, selection: Vec<RemoteImage>) -> ImportReport {
        let total = selection.len();
        self.session
            .begin("Please wait while the images are uploading.", 0);

        if total == 0 {
            self.session.finish().await;
            return ImportReport::default();
        }

        info!(
            post_id = %self.session.post_id,
            tmdb_id = self.session.tmdb_id,
            total,
            "importing images"
        );

        let title = format!("Image from {}", self.session.title);
        let done = AtomicUsize::new(0);
        let completed = Mutex::new(Vec::with_capacity(total));

        let uploads = selection.into_iter().map(|image| {
            let request = UploadRequest {
                action: UploadAction::UploadImage,
                image,
                title: title.clone(),
                post_id: self.session.post_id,
                tmdb_id: self.session.tmdb_id,
            };
            let done = &done;
            let completed = &completed;

            async move {
                match self.uploader.upload(&request).await {
                    Ok(id) => {
                        let count = done.fetch_add(1, Ordering::SeqCst) + 1;
                        if let Ok(mut completed) = completed.lock() {
                            completed.push(id);
                        }
                        self.session.set_percent(Self::percent(count, total));
                        if count < total {
                            self.session.append_status(" .");
                        }
                        info!(attachment = %id, file = %request.image.file_path, count, total, "image imported");
                        None
                    }
                    Err(err) => {
                        warn!(file = %request.image.file_path, error = %err, "image upload failed");
                        Some(request.image)
                    }
                }
            }
        });

        let failed: Vec<RemoteImage> = join_all(uploads).await.into_iter().flatten().collect();
        let report = ImportReport {
            attachments: completed.into_inner().unwrap_or_default(),
            failed,
        };

        if done.load(Ordering::SeqCst) == total {
            self.session.finish().await;
        } else {
            warn!(
                imported = report.attachments.len(),
                failed = report.failed.len(),
                "import finished with failures"
            );
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::upload::UploadError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;
    use wpmoly_common::MovieId;

    /// Succeeds for every path except those containing "bad".
    struct FakeUploader {
        next_id: AtomicUsize,
        seen: Mutex<Vec<UploadRequest>>,
    }

    impl FakeUploader {
        fn new() -> Self {
            Self {
                next_id: AtomicUsize::new(100),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Uploader for FakeUploader {
        async fn upload(&self, request: &UploadRequest) -> Result<AttachmentId, UploadError> {
            self.seen.lock().unwrap().push(request.clone());
            if request.image.file_path.contains("bad") {
                return Err(UploadError::Rejected("0".into()));
            }
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            Ok(AttachmentId::new(id as u64))
        }
    }

    fn images(paths: &[&str]) -> Vec<RemoteImage> {
        paths
            .iter()
            .map(|p| RemoteImage::from_path(p, "https://image.tmdb.org/t/p/original"))
            .collect()
    }

    fn importer(uploader: Arc<FakeUploader>) -> ImageImporter {
        let session = Session::new(MovieId::new(7), 550, "Fight Club", Duration::from_millis(5));
        ImageImporter::new(uploader, session)
    }

    #[test]
    fn test_percent() {
        assert_eq!(ImageImporter::percent(1, 3), 33);
        assert_eq!(ImageImporter::percent(2, 3), 67);
        assert_eq!(ImageImporter::percent(3, 3), 100);
        assert_eq!(ImageImporter::percent(1, 8), 13);
        assert_eq!(ImageImporter::percent(0, 0), 100);
    }

    #[tokio::test]
    async fn test_all_uploads_succeed() {
        let uploader = Arc::new(FakeUploader::new());
        let importer = importer(uploader.clone());

        let report = importer.import(images(&["/a.jpg", "/b.jpg", "/c.jpg"])).await;

        assert!(report.is_complete());
        assert_eq!(report.attachments.len(), 3);

        let progress = importer.session().progress();
        assert_eq!(progress.percent, 100);
        assert!(progress.is_done());
        assert!(progress.closed);

        let seen = uploader.seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|r| r.title == "Image from Fight Club"));
        assert!(seen.iter().all(|r| r.action == UploadAction::UploadImage));
    }

    #[tokio::test]
    async fn test_failure_stalls_progress() {
        let uploader = Arc::new(FakeUploader::new());
        let importer = importer(uploader.clone());

        let report = importer
            .import(images(&["/a.jpg", "/bad.jpg", "/c.jpg", "/d.jpg"]))
            .await;

        assert!(!report.is_complete());
        assert_eq!(report.attachments.len(), 3);
        assert_eq!(report.failed[0].file_path, "/bad.jpg");

        let progress = importer.session().progress();
        assert_eq!(progress.percent, 75);
        assert!(!progress.is_done());
        assert!(!progress.closed);
        // Every upload was still attempted.
        assert_eq!(uploader.seen.lock().unwrap().len(), 4);
    }

    /// Holds every upload until `n` of them are in flight at once.
    struct GatedUploader {
        gate: tokio::sync::Barrier,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl Uploader for GatedUploader {
        async fn upload(&self, _request: &UploadRequest) -> Result<AttachmentId, UploadError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            self.gate.wait().await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(AttachmentId::new(1))
        }
    }

    /// Answers after a per-image delay, with an id taken from the path.
    struct DelayedUploader;

    #[async_trait]
    impl Uploader for DelayedUploader {
        async fn upload(&self, request: &UploadRequest) -> Result<AttachmentId, UploadError> {
            let (delay, id) = match request.image.file_path.as_str() {
                "/slow.jpg" => (100, 1),
                "/medium.jpg" => (50, 2),
                _ => (10, 3),
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok(AttachmentId::new(id))
        }
    }

    #[tokio::test]
    async fn test_uploads_run_concurrently() {
        let uploader = Arc::new(GatedUploader {
            gate: tokio::sync::Barrier::new(4),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        });
        let session = Session::new(MovieId::new(7), 550, "Fight Club", Duration::ZERO);
        let importer = ImageImporter::new(uploader.clone(), session);

        // One upload at a time would never get past the barrier.
        let report = tokio::time::timeout(
            Duration::from_secs(5),
            importer.import(images(&["/a.jpg", "/b.jpg", "/c.jpg", "/d.jpg"])),
        )
        .await
        .expect("uploads did not overlap");

        assert_eq!(report.attachments.len(), 4);
        assert_eq!(uploader.peak.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_progress_follows_completion_order() {
        let session = Session::new(MovieId::new(7), 550, "Fight Club", Duration::ZERO);
        let mut rx = session.subscribe();
        let importer = ImageImporter::new(Arc::new(DelayedUploader), session);

        let watcher = tokio::spawn(async move {
            let mut seen: Vec<u8> = Vec::new();
            while rx.changed().await.is_ok() {
                let progress = rx.borrow_and_update().clone();
                if progress.percent > 0 && seen.last() != Some(&progress.percent) {
                    seen.push(progress.percent);
                }
                if progress.closed {
                    break;
                }
            }
            seen
        });

        let report = importer
            .import(images(&["/slow.jpg", "/medium.jpg", "/fast.jpg"]))
            .await;

        assert_eq!(
            report.attachments,
            vec![AttachmentId::new(3), AttachmentId::new(2), AttachmentId::new(1)]
        );
        assert_eq!(watcher.await.unwrap(), vec![33, 67, 100]);
    }

    #[tokio::test]
    async fn test_empty_selection_closes() {
        let importer = importer(Arc::new(FakeUploader::new()));
        let report = importer.import(Vec::new()).await;
        assert!(report.attachments.is_empty());
        assert!(importer.session().progress().closed);
    }
}
