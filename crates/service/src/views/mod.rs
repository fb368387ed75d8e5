//! State kept by each admin page: the fetched rows and a loading flag.
//!
//! List failures are logged and shown as an empty list. Mutation failures on
//! the product page come back as an [`AdminAlert`](crate::errors::AdminAlert).

pub mod dashboard;
pub mod product_form;
pub mod product_list;
pub mod review_list;

pub use dashboard::{AnalyticsPanel, LatestReviewsPanel, MetricCard, RecentProductsPanel};
pub use product_form::ProductForm;
pub use product_list::ProductListView;
pub use review_list::ReviewListView;
