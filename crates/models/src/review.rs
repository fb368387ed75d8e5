use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::nullable;

pub const TABLE: &str = "reviews";

/// Select list for review rows joined one hop to their product's title.
pub const SELECT_WITH_PRODUCT: &str = "*,products(title)";

pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// One row of the `reviews` table, optionally carrying the embedded product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub product_id: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub user_name: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub comment: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub date: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub avatar: String,
    #[serde(default, deserialize_with = "nullable::timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Embedded `products(title)`; absent when not selected, `null` when the product is gone.
    #[serde(default, rename = "products", skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductRef>,
}

impl Review {
    pub fn product_title(&self) -> &str {
        self.product
            .as_ref()
            .map(|p| p.title.as_str())
            .filter(|t| !t.is_empty())
            .unwrap_or(UNKNOWN_PRODUCT)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub title: String,
}

/// Projection used by the average-rating read (`select=rating`).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct ReviewRating {
    #[serde(default)]
    pub rating: Option<f64>,
}

/// Arithmetic mean of the ratings; a missing rating counts as 0, an empty set yields 0.
pub fn average_rating(ratings: &[ReviewRating]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: f64 = ratings.iter().map(|r| r.rating.unwrap_or(0.0)).sum();
    sum / ratings.len() as f64
}
