use models::{Product, Review};
use serde::Serialize;
use tracing::warn;

use crate::metrics::{collect_metrics, DashboardMetrics};
use crate::product::{ProductRepository, ProductService};
use crate::review::{ReviewRepository, ReviewService};

/// Rows shown by the "recent"/"latest" dashboard panels.
pub const PANEL_ROWS: usize = 5;

#[derive(Debug, Clone, Default, Serialize)]
pub struct RecentProductsPanel {
    pub products: Vec<Product>,
}

impl RecentProductsPanel {
    pub async fn load<R: ProductRepository + ?Sized>(service: &ProductService<R>) -> Self {
        match service.recent(PANEL_ROWS).await {
            Ok(products) => Self { products },
            Err(e) => {
                warn!(error = %e, "error fetching recent products");
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LatestReviewsPanel {
    pub reviews: Vec<Review>,
}

impl LatestReviewsPanel {
    pub async fn load<R: ReviewRepository + ?Sized>(service: &ReviewService<R>) -> Self {
        match service.latest(PANEL_ROWS).await {
            Ok(reviews) => Self { reviews },
            Err(e) => {
                warn!(error = %e, "error fetching latest reviews");
                Self::default()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub label: &'static str,
    pub value: String,
}

/// Summary counters; stays at zero when the aggregation fails.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct AnalyticsPanel {
    pub metrics: DashboardMetrics,
}

impl AnalyticsPanel {
    pub async fn load<P, R>(products: &ProductService<P>, reviews: &ReviewService<R>) -> Self
    where
        P: ProductRepository + ?Sized,
        R: ReviewRepository + ?Sized,
    {
        match collect_metrics(products, reviews).await {
            Ok(metrics) => Self { metrics },
            Err(e) => {
                warn!(error = %e, "error fetching analytics");
                Self::default()
            }
        }
    }

    pub fn cards(&self) -> Vec<MetricCard> {
        let m = &self.metrics;
        vec![
            MetricCard { label: "Total Products", value: m.products.to_string() },
            MetricCard { label: "Total Reviews", value: m.reviews.to_string() },
            MetricCard { label: "Average Rating", value: m.avg_rating_display() },
            MetricCard { label: "Out of Stock", value: m.out_of_stock.to_string() },
        ]
    }
}
