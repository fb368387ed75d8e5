use std::sync::Arc;

use backend::BackendError;
use models::{NewProduct, Product, ProductPatch};
use tracing::{info, instrument};

use crate::product::repository::ProductRepository;

/// Application service over the catalog accessor.
/// Adds tracing and the "recent products" slice used by the dashboard.
pub struct ProductService<R: ProductRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ProductRepository + ?Sized> Clone for ProductService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: ProductRepository + ?Sized> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// # Examples
    /// ```
    /// use service::product::{repository::mock::InMemoryProductRepository, ProductService};
    /// use models::NewProduct;
    /// use std::sync::Arc;
    /// let svc = ProductService::new(Arc::new(InMemoryProductRepository::default()));
    /// let desk = NewProduct { id: "desk".into(), title: "Desk".into(), ..Default::default() };
    /// let stored = tokio_test::block_on(svc.create(&desk)).unwrap();
    /// assert!(stored.created_at.is_some());
    /// assert_eq!(tokio_test::block_on(svc.list_all()).unwrap().len(), 1);
    /// ```
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Product>, BackendError> {
        self.repo.list_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Product, BackendError> {
        self.repo.get_by_id(id).await
    }

    #[instrument(skip(self, product), fields(id = %product.id))]
    pub async fn create(&self, product: &NewProduct) -> Result<Product, BackendError> {
        let stored = self.repo.create(product).await?;
        info!(id = %stored.id, title = %stored.title, "created product");
        Ok(stored)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: &ProductPatch) -> Result<Product, BackendError> {
        let updated = self.repo.update(id, patch).await?;
        info!(id = %updated.id, "updated product");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), BackendError> {
        self.repo.delete(id).await?;
        info!(%id, "deleted product");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn count(&self) -> Result<u64, BackendError> {
        self.repo.count().await
    }

    /// The newest `limit` products.
    pub async fn recent(&self, limit: usize) -> Result<Vec<Product>, BackendError> {
        let mut rows = self.list_all().await?;
        rows.truncate(limit);
        Ok(rows)
    }
}
