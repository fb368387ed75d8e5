pub mod repository;
pub mod service;

pub use repository::{RestReviewRepository, ReviewRepository};
pub use service::ReviewService;
