//! Row shapes of the hosted store's `products` and `reviews` tables.
//!
//! Rows travel as JSON; nothing here talks to the network.

pub mod nullable;
pub mod product;
pub mod review;

pub use product::{NewProduct, Product, ProductPatch};
pub use review::{ProductRef, Review, ReviewRating};
