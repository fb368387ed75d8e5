use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::nullable;

pub const TABLE: &str = "products";

/// One row of the `products` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub detailed_description: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub image_url: String,
    #[serde(default)]
    pub images: Value,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub category: String,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub stock: i64,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub rating: f64,
    #[serde(default)]
    pub features: Value,
    #[serde(default, deserialize_with = "nullable::or_default")]
    pub link: String,
    /// Assigned by the store on insert.
    #[serde(default, deserialize_with = "nullable::timestamp", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn is_out_of_stock(&self) -> bool {
        self.stock <= 0
    }
}

/// Insert payload: every column except the server-assigned `created_at`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub detailed_description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub images: Value,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub features: Value,
    #[serde(default)]
    pub link: String,
}

impl From<Product> for NewProduct {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            detailed_description: p.detailed_description,
            image_url: p.image_url,
            images: p.images,
            price: p.price,
            category: p.category,
            stock: p.stock,
            rating: p.rating,
            features: p.features,
            link: p.link,
        }
    }
}

impl NewProduct {
    /// The row the store would hold after inserting this payload.
    pub fn into_product(self, created_at: Option<DateTime<Utc>>) -> Product {
        Product {
            id: self.id,
            title: self.title,
            description: self.description,
            detailed_description: self.detailed_description,
            image_url: self.image_url,
            images: self.images,
            price: self.price,
            category: self.category,
            stock: self.stock,
            rating: self.rating,
            features: self.features,
            link: self.link,
            created_at,
        }
    }
}

/// Partial update. Only `Some` fields are sent, so the store leaves the rest untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the set fields into `product`.
    pub fn apply_to(&self, product: &mut Product) {
        fn set<T: Clone>(dst: &mut T, src: &Option<T>) {
            if let Some(v) = src {
                *dst = v.clone();
            }
        }
        set(&mut product.title, &self.title);
        set(&mut product.description, &self.description);
        set(&mut product.detailed_description, &self.detailed_description);
        set(&mut product.image_url, &self.image_url);
        set(&mut product.images, &self.images);
        set(&mut product.price, &self.price);
        set(&mut product.category, &self.category);
        set(&mut product.stock, &self.stock);
        set(&mut product.rating, &self.rating);
        set(&mut product.features, &self.features);
        set(&mut product.link, &self.link);
    }
}
