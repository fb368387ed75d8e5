use async_trait::async_trait;
use backend::{BackendClient, BackendError};
use models::review::{self, average_rating, ReviewRating};
use models::Review;

/// Review accessor: read and delete over the `reviews` collection.
/// Reviews are authored elsewhere, so there is no create or update.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// All rows, newest first, each carrying its product's title.
    async fn list_all(&self) -> Result<Vec<Review>, BackendError>;
    async fn delete(&self, id: &str) -> Result<(), BackendError>;
    async fn count(&self) -> Result<u64, BackendError>;
    /// Mean of the rating column, 0 when there are no reviews.
    async fn average_rating(&self) -> Result<f64, BackendError>;
}

#[derive(Clone, Debug)]
pub struct RestReviewRepository {
    pub client: BackendClient,
}

impl RestReviewRepository {
    pub fn new(client: BackendClient) -> Self { Self { client } }
}

#[async_trait]
impl ReviewRepository for RestReviewRepository {
    async fn list_all(&self) -> Result<Vec<Review>, BackendError> {
        self.client
            .table(review::TABLE)
            .select(review::SELECT_WITH_PRODUCT)
            .order("created_at", false)
            .execute()
            .await
    }

    async fn delete(&self, id: &str) -> Result<(), BackendError> {
        self.client.table(review::TABLE).delete().eq("id", id).execute_empty().await
    }

    async fn count(&self) -> Result<u64, BackendError> {
        self.client.table(review::TABLE).count().exact_count().await
    }

    async fn average_rating(&self) -> Result<f64, BackendError> {
        let ratings: Vec<ReviewRating> = self.client.table(review::TABLE).select("rating").execute().await?;
        Ok(average_rating(&ratings))
    }
}

/// In-memory repository for tests and doc examples.
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use backend::PostgrestError;
    use crate::product::repository::mock::newest_first;
    use models::ProductRef;

    #[derive(Default)]
    pub struct InMemoryReviewRepository {
        rows: Mutex<Vec<Review>>,
        product_titles: Mutex<HashMap<String, String>>,
        failure: Mutex<Option<String>>,
    }

    fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
        m.lock().unwrap_or_else(PoisonError::into_inner)
    }

    impl InMemoryReviewRepository {
        /// Seed review rows; `products` is filled on read from [`Self::with_product_title`].
        pub fn with_rows(rows: Vec<Review>) -> Self {
            let repo = Self::default();
            *lock(&repo.rows) = rows;
            repo
        }

        #[must_use]
        pub fn with_product_title(self, product_id: &str, title: &str) -> Self {
            lock(&self.product_titles).insert(product_id.to_string(), title.to_string());
            self
        }

        pub fn set_failure(&self, message: Option<&str>) {
            *lock(&self.failure) = message.map(str::to_string);
        }

        fn check(&self) -> Result<(), BackendError> {
            match lock(&self.failure).as_ref() {
                Some(message) => Err(BackendError::Api(PostgrestError {
                    status: 500,
                    code: None,
                    message: message.clone(),
                    details: None,
                    hint: None,
                })),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl ReviewRepository for InMemoryReviewRepository {
        async fn list_all(&self) -> Result<Vec<Review>, BackendError> {
            self.check()?;
            let titles = lock(&self.product_titles);
            let mut rows: Vec<Review> = lock(&self.rows)
                .iter()
                .cloned()
                .map(|mut r| {
                    r.product = titles.get(&r.product_id).map(|t| ProductRef { title: t.clone() });
                    r
                })
                .collect();
            rows.sort_by(|a, b| newest_first(&a.created_at, &b.created_at));
            Ok(rows)
        }

        async fn delete(&self, id: &str) -> Result<(), BackendError> {
            self.check()?;
            lock(&self.rows).retain(|r| r.id != id);
            Ok(())
        }

        async fn count(&self) -> Result<u64, BackendError> {
            self.check()?;
            Ok(lock(&self.rows).len() as u64)
        }

        async fn average_rating(&self) -> Result<f64, BackendError> {
            self.check()?;
            let ratings: Vec<ReviewRating> =
                lock(&self.rows).iter().map(|r| ReviewRating { rating: Some(r.rating) }).collect();
            Ok(average_rating(&ratings))
        }
    }
}
