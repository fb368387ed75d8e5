use models::Product;
use tracing::warn;

use crate::errors::{AdminAlert, ServiceError};
use crate::product::{ProductRepository, ProductService};
use crate::views::ProductForm;

/// Product management page: the list, a loading flag and the row being edited.
pub struct ProductListView<R: ProductRepository + ?Sized> {
    service: ProductService<R>,
    pub products: Vec<Product>,
    pub loading: bool,
    pub editing: Option<Product>,
}

impl<R: ProductRepository + ?Sized> ProductListView<R> {
    /// Starts in the loading state until the first [`refresh`](Self::refresh).
    pub fn new(service: ProductService<R>) -> Self {
        Self { service, products: Vec::new(), loading: true, editing: None }
    }

    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.service.list_all().await {
            Ok(rows) => self.products = rows,
            Err(e) => {
                warn!(error = %e, "error fetching products");
                self.products.clear();
            }
        }
        self.loading = false;
    }

    /// Blank form in "add" mode.
    pub fn open_add(&mut self) -> ProductForm {
        self.editing = None;
        ProductForm::default()
    }

    /// Form pre-filled from `product`, in "edit" mode.
    pub fn open_edit(&mut self, product: &Product) -> ProductForm {
        self.editing = Some(product.clone());
        ProductForm::from(product)
    }

    pub fn close_form(&mut self) {
        self.editing = None;
    }

    /// Update the row being edited, or create a new one, then reload the list.
    pub async fn save(&mut self, form: &ProductForm) -> Result<Product, AdminAlert> {
        let saved = self.persist(form).await.map_err(|e| AdminAlert::new("Error saving product", &e))?;
        self.editing = None;
        self.refresh().await;
        Ok(saved)
    }

    async fn persist(&self, form: &ProductForm) -> Result<Product, ServiceError> {
        match &self.editing {
            Some(current) => Ok(self.service.update(&current.id, &form.to_patch()?).await?),
            None => Ok(self.service.create(&form.to_new_product()?).await?),
        }
    }

    /// Delete then reload. Another administrator's concurrent edit may land in between.
    pub async fn delete(&mut self, id: &str) -> Result<(), AdminAlert> {
        self.service.delete(id).await.map_err(|e| AdminAlert::new("Error deleting product", &e))?;
        self.refresh().await;
        Ok(())
    }
}
