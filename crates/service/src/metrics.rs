//! Dashboard summary counters.

use backend::BackendError;
use models::Product;
use serde::Serialize;
use tracing::{info, instrument};

use crate::product::{ProductRepository, ProductService};
use crate::review::{ReviewRepository, ReviewService};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub products: u64,
    pub reviews: u64,
    pub avg_rating: f64,
    pub out_of_stock: usize,
}

impl DashboardMetrics {
    /// Average rating as shown on the dashboard card, one decimal place.
    pub fn avg_rating_display(&self) -> String {
        format!("{:.1}", self.avg_rating)
    }
}

/// Products whose stock is zero or below.
pub fn count_out_of_stock(products: &[Product]) -> usize {
    products.iter().filter(|p| p.is_out_of_stock()).count()
}

/// Issue the four dashboard reads together and fold them into counters.
///
/// The first failing read fails the whole aggregation; there is no partial result.
#[instrument(skip_all)]
pub async fn collect_metrics<P, R>(
    products: &ProductService<P>,
    reviews: &ReviewService<R>,
) -> Result<DashboardMetrics, BackendError>
where
    P: ProductRepository + ?Sized,
    R: ReviewRepository + ?Sized,
{
    let (product_count, review_count, avg_rating, all_products) = tokio::try_join!(
        products.count(),
        reviews.count(),
        reviews.average_rating(),
        products.list_all(),
    )?;

    let metrics = DashboardMetrics {
        products: product_count,
        reviews: review_count,
        avg_rating,
        out_of_stock: count_out_of_stock(&all_products),
    };
    info!(products = metrics.products, reviews = metrics.reviews, out_of_stock = metrics.out_of_stock, "dashboard metrics collected");
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use models::NewProduct;

    use crate::product::repository::mock::InMemoryProductRepository;
    use crate::review::repository::mock::InMemoryReviewRepository;
    use crate::review::service::tests::review;

    fn product(id: &str, stock: i64) -> Product {
        NewProduct { id: id.into(), stock, ..NewProduct::default() }.into_product(None)
    }

    #[test]
    fn out_of_stock_counts_zero_and_negative() {
        let rows = [product("a", 0), product("b", 5), product("c", -1), product("d", 10)];
        assert_eq!(count_out_of_stock(&rows), 2);
        assert_eq!(count_out_of_stock(&[]), 0);
    }

    #[test]
    fn avg_rating_display_has_one_decimal() {
        let m = DashboardMetrics { avg_rating: 4.26, ..Default::default() };
        assert_eq!(m.avg_rating_display(), "4.3");
        assert_eq!(DashboardMetrics::default().avg_rating_display(), "0.0");
    }

    #[tokio::test]
    async fn collects_all_four_reads() {
        let products = ProductService::new(Arc::new(InMemoryProductRepository::with_rows(vec![
            product("a", 0),
            product("b", 5),
            product("c", -1),
            product("d", 10),
        ])));
        let reviews = ReviewService::new(Arc::new(InMemoryReviewRepository::with_rows(vec![
            review("r1", "a", 5.0, 1),
            review("r2", "b", 3.0, 2),
            review("r3", "c", 4.0, 3),
        ])));

        let m = collect_metrics(&products, &reviews).await.unwrap();
        assert_eq!(m, DashboardMetrics { products: 4, reviews: 3, avg_rating: 4.0, out_of_stock: 2 });
    }

    #[tokio::test]
    async fn empty_store_yields_zeroes() {
        let products = ProductService::new(Arc::new(InMemoryProductRepository::default()));
        let reviews = ReviewService::new(Arc::new(InMemoryReviewRepository::default()));
        assert_eq!(collect_metrics(&products, &reviews).await.unwrap(), DashboardMetrics::default());
    }

    #[tokio::test]
    async fn one_failing_read_fails_everything() {
        let products = ProductService::new(Arc::new(InMemoryProductRepository::with_rows(vec![product("a", 1)])));
        let review_repo = Arc::new(InMemoryReviewRepository::default());
        review_repo.set_failure(Some("reviews unavailable"));
        let reviews = ReviewService::new(review_repo);

        let err = collect_metrics(&products, &reviews).await.unwrap_err();
        assert_eq!(err.to_string(), "reviews unavailable");
    }
}
