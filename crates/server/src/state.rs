use std::sync::Arc;

use backend::BackendClient;
use service::{
    ProductRepository, ProductService, RestProductRepository, RestReviewRepository, ReviewRepository,
    ReviewService,
};

/// Shared by every handler. Repositories sit behind trait objects so tests
/// can swap in the in-memory ones.
#[derive(Clone)]
pub struct ServerState {
    pub products: ProductService<dyn ProductRepository>,
    pub reviews: ReviewService<dyn ReviewRepository>,
}

impl ServerState {
    pub fn new(products: Arc<dyn ProductRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { products: ProductService::new(products), reviews: ReviewService::new(reviews) }
    }

    pub fn from_client(client: BackendClient) -> Self {
        Self::new(
            Arc::new(RestProductRepository::new(client.clone())),
            Arc::new(RestReviewRepository::new(client)),
        )
    }
}
