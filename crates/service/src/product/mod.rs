pub mod repository;
pub mod service;

pub use repository::{ProductRepository, RestProductRepository};
pub use service::ProductService;
