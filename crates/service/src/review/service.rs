use std::sync::Arc;

use backend::BackendError;
use models::Review;
use tracing::{info, instrument};

use crate::review::repository::ReviewRepository;

/// Application service over the review accessor.
pub struct ReviewService<R: ReviewRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ReviewRepository + ?Sized> Clone for ReviewService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: ReviewRepository + ?Sized> ReviewService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Review>, BackendError> {
        self.repo.list_all().await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), BackendError> {
        self.repo.delete(id).await?;
        info!(%id, "deleted review");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<u64, BackendError> {
        self.repo.count().await
    }

    #[instrument(skip(self))]
    pub async fn average_rating(&self) -> Result<f64, BackendError> {
        self.repo.average_rating().await
    }

    /// The newest `limit` reviews.
    pub async fn latest(&self, limit: usize) -> Result<Vec<Review>, BackendError> {
        let mut rows = self.list_all().await?;
        rows.truncate(limit);
        Ok(rows)
    }
}
