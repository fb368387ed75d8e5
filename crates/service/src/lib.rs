//! Catalog and review accessors plus the dashboard logic built on them.
//! - Repository traits are the seam to the store; REST and in-memory impls are interchangeable.
//! - Services add tracing and the small conveniences the dashboard needs.
//! - `views` holds the state each admin page keeps between requests.

pub mod errors;
pub mod metrics;
pub mod product;
pub mod review;
pub mod views;

pub use metrics::{collect_metrics, count_out_of_stock, DashboardMetrics};
pub use product::{ProductRepository, ProductService, RestProductRepository};
pub use review::{RestReviewRepository, ReviewRepository, ReviewService};
