use models::Review;
use tracing::warn;

use crate::review::{ReviewRepository, ReviewService};

/// Review moderation page. Deletion failures are only logged.
pub struct ReviewListView<R: ReviewRepository + ?Sized> {
    service: ReviewService<R>,
    pub reviews: Vec<Review>,
    pub loading: bool,
}

impl<R: ReviewRepository + ?Sized> ReviewListView<R> {
    pub fn new(service: ReviewService<R>) -> Self {
        Self { service, reviews: Vec::new(), loading: true }
    }

    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.service.list_all().await {
            Ok(rows) => self.reviews = rows,
            Err(e) => {
                warn!(error = %e, "error fetching reviews");
                self.reviews.clear();
            }
        }
        self.loading = false;
    }

    /// Returns whether the review was deleted; on success the list is reloaded.
    pub async fn delete(&mut self, id: &str) -> bool {
        match self.service.delete(id).await {
            Ok(()) => {
                self.refresh().await;
                true
            }
            Err(e) => {
                warn!(error = %e, %id, "error deleting review");
                false
            }
        }
    }
}
