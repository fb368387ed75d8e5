use async_trait::async_trait;
use backend::{BackendClient, BackendError};
use models::{product, NewProduct, Product, ProductPatch};

/// Catalog accessor: CRUD over the `products` collection.
///
/// Every method hands back the store's error as-is.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All rows, newest `created_at` first.
    async fn list_all(&self) -> Result<Vec<Product>, BackendError>;
    /// Fails unless exactly one row has this id.
    async fn get_by_id(&self, id: &str) -> Result<Product, BackendError>;
    async fn create(&self, product: &NewProduct) -> Result<Product, BackendError>;
    async fn update(&self, id: &str, patch: &ProductPatch) -> Result<Product, BackendError>;
    async fn delete(&self, id: &str) -> Result<(), BackendError>;
    async fn count(&self) -> Result<u64, BackendError>;
}

/// Repository backed by the hosted store's REST endpoint.
#[derive(Clone, Debug)]
pub struct RestProductRepository {
    pub client: BackendClient,
}

impl RestProductRepository {
    pub fn new(client: BackendClient) -> Self { Self { client } }
}

#[async_trait]
impl ProductRepository for RestProductRepository {
    async fn list_all(&self) -> Result<Vec<Product>, BackendError> {
        self.client.table(product::TABLE).select("*").order("created_at", false).execute().await
    }

    async fn get_by_id(&self, id: &str) -> Result<Product, BackendError> {
        self.client.table(product::TABLE).select("*").eq("id", id).single().await
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, BackendError> {
        self.client.table(product::TABLE).insert(product).execute_first().await
    }

    async fn update(&self, id: &str, patch: &ProductPatch) -> Result<Product, BackendError> {
        self.client.table(product::TABLE).update(patch).eq("id", id).execute_first().await
    }

    async fn delete(&self, id: &str) -> Result<(), BackendError> {
        self.client.table(product::TABLE).delete().eq("id", id).execute_empty().await
    }

    async fn count(&self) -> Result<u64, BackendError> {
        self.client.table(product::TABLE).count().exact_count().await
    }
}

/// In-memory repository with the store's observable behavior, for tests and doc examples.
pub mod mock {
    use super::*;
    use std::cmp::Ordering;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use backend::{errors::NOT_SINGLE_ROW, PostgrestError};
    use chrono::{DateTime, Duration, Utc};

    #[derive(Default)]
    pub struct InMemoryProductRepository {
        rows: Mutex<Vec<Product>>,
        last_created: Mutex<Option<DateTime<Utc>>>,
        failure: Mutex<Option<String>>,
    }

    impl InMemoryProductRepository {
        /// Seed rows as-is; their `created_at` values are kept.
        pub fn with_rows(rows: Vec<Product>) -> Self {
            let repo = Self::default();
            *lock(&repo.rows) = rows;
            repo
        }

        /// Make every following call fail with a 500 carrying `message`; `None` heals it.
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

        /// Strictly increasing timestamps, so newest-first ordering is total.
        fn next_created_at(&self) -> DateTime<Utc> {
            let mut last = lock(&self.last_created);
            let now = Utc::now();
            let next = match *last {
                Some(prev) if prev >= now => prev + Duration::microseconds(1),
                _ => now,
            };
            *last = Some(next);
            next
        }
    }

    /// `order=created_at.desc` as the store applies it: NULLs first, then newest.
    pub(crate) fn newest_first(a: &Option<DateTime<Utc>>, b: &Option<DateTime<Utc>>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => b.cmp(a),
        }
    }

    fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
        m.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn not_single(count: usize) -> BackendError {
        BackendError::Api(PostgrestError {
            status: 406,
            code: Some(NOT_SINGLE_ROW.into()),
            message: "JSON object requested, multiple (or no) rows returned".into(),
            details: Some(format!("The result contains {count} rows")),
            hint: None,
        })
    }

    #[async_trait]
    impl ProductRepository for InMemoryProductRepository {
        async fn list_all(&self) -> Result<Vec<Product>, BackendError> {
            self.check()?;
            let mut rows = lock(&self.rows).clone();
            rows.sort_by(|a, b| newest_first(&a.created_at, &b.created_at));
            Ok(rows)
        }

        async fn get_by_id(&self, id: &str) -> Result<Product, BackendError> {
            self.check()?;
            let rows = lock(&self.rows);
            let matching: Vec<&Product> = rows.iter().filter(|p| p.id == id).collect();
            match matching.as_slice() {
                [one] => Ok((*one).clone()),
                other => Err(not_single(other.len())),
            }
        }

        async fn create(&self, product: &NewProduct) -> Result<Product, BackendError> {
            self.check()?;
            let created_at = self.next_created_at();
            let mut rows = lock(&self.rows);
            if rows.iter().any(|p| p.id == product.id) {
                return Err(BackendError::Api(PostgrestError {
                    status: 409,
                    code: Some("23505".into()),
                    message: "duplicate key value violates unique constraint \"products_pkey\"".into(),
                    details: Some(format!("Key (id)=({}) already exists.", product.id)),
                    hint: None,
                }));
            }
            let stored = product.clone().into_product(Some(created_at));
            rows.push(stored.clone());
            Ok(stored)
        }

        async fn update(&self, id: &str, patch: &ProductPatch) -> Result<Product, BackendError> {
            self.check()?;
            let mut rows = lock(&self.rows);
            let row = rows
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| BackendError::EmptyResult { table: product::TABLE.into() })?;
            patch.apply_to(row);
            Ok(row.clone())
        }

        async fn delete(&self, id: &str) -> Result<(), BackendError> {
            self.check()?;
            lock(&self.rows).retain(|p| p.id != id);
            Ok(())
        }

        async fn count(&self) -> Result<u64, BackendError> {
            self.check()?;
            Ok(lock(&self.rows).len() as u64)
        }
    }
}
