use models::{NewProduct, Product, ProductPatch};

use crate::errors::FormError;

/// Editable product fields, one per form input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductForm {
    pub id: String,
    pub title: String,
    pub description: String,
    pub detailed_description: String,
    pub image_url: String,
    pub price: f64,
    pub category: String,
    pub stock: i64,
    pub rating: f64,
    pub link: String,
    editing: bool,
}

impl From<&Product> for ProductForm {
    /// Pre-fill from an existing row; the id becomes read-only.
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.clone(),
            title: p.title.clone(),
            description: p.description.clone(),
            detailed_description: p.detailed_description.clone(),
            image_url: p.image_url.clone(),
            price: p.price,
            category: p.category.clone(),
            stock: p.stock,
            rating: p.rating,
            link: p.link.clone(),
            editing: true,
        }
    }
}

impl ProductForm {
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Store one raw input value. Numeric fields are parsed; an empty input reads as 0.
    pub fn set_field(&mut self, name: &str, raw: &str) -> Result<(), FormError> {
        match name {
            "id" if self.editing => return Err(FormError::ReadOnly("id")),
            "id" => self.id = raw.to_string(),
            "title" => self.title = raw.to_string(),
            "description" => self.description = raw.to_string(),
            "detailed_description" => self.detailed_description = raw.to_string(),
            "image_url" => self.image_url = raw.to_string(),
            "category" => self.category = raw.to_string(),
            "link" => self.link = raw.to_string(),
            "price" => self.price = parse_number("price", raw)?,
            "rating" => self.rating = parse_number("rating", raw)?,
            "stock" => self.stock = parse_number("stock", raw)?,
            other => return Err(FormError::UnknownField(other.to_string())),
        }
        Ok(())
    }

    fn check_required(&self) -> Result<(), FormError> {
        if self.id.trim().is_empty() {
            return Err(FormError::Required("id"));
        }
        if self.title.trim().is_empty() {
            return Err(FormError::Required("title"));
        }
        Ok(())
    }

    /// Insert payload; `images` and `features` are not edited here and start empty.
    pub fn to_new_product(&self) -> Result<NewProduct, FormError> {
        self.check_required()?;
        Ok(NewProduct {
            id: self.id.trim().to_string(),
            title: self.title.clone(),
            description: self.description.clone(),
            detailed_description: self.detailed_description.clone(),
            image_url: self.image_url.clone(),
            price: self.price,
            category: self.category.clone(),
            stock: self.stock,
            rating: self.rating,
            link: self.link.clone(),
            ..NewProduct::default()
        })
    }

    /// Update payload carrying every form field; columns outside the form stay untouched.
    pub fn to_patch(&self) -> Result<ProductPatch, FormError> {
        self.check_required()?;
        Ok(ProductPatch {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            detailed_description: Some(self.detailed_description.clone()),
            image_url: Some(self.image_url.clone()),
            price: Some(self.price),
            category: Some(self.category.clone()),
            stock: Some(self.stock),
            rating: Some(self.rating),
            link: Some(self.link.clone()),
            ..ProductPatch::default()
        })
    }
}

fn parse_number<T: std::str::FromStr + Default>(field: &'static str, raw: &str) -> Result<T, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    trimmed.parse().map_err(|_| FormError::NotANumber { field, value: raw.to_string() })
}
