//! Article domain type.
//!
//! An article is the only entity stockroom manages. Every attribute is
//! free text; the system never parses prices or validates references.
//! JSON field names are the ones used by the stored catalogue documents.

use serde::{Deserialize, Serialize};

/// A catalogue article.
///
/// `code` is the identifying field and is always serialized, so a body
/// without `articulo` round-trips as an empty code. Every other attribute
/// is omitted from JSON when absent, which means replacing an article with
/// a body that lacks a field drops that field from the stored document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Unique article code (the external resource key).
    #[serde(rename = "articulo", default)]
    pub code: String,
    #[serde(rename = "descrip", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Manufacturer's original part reference.
    #[serde(rename = "original", default, skip_serializing_if = "Option::is_none")]
    pub original_reference: Option<String>,
    /// Price as entered; stored verbatim.
    #[serde(rename = "precio", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(rename = "foto", default, skip_serializing_if = "Option::is_none")]
    pub photo_reference: Option<String>,
    #[serde(rename = "comentario", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(rename = "marca", default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(rename = "modelos", default, skip_serializing_if = "Option::is_none")]
    pub models: Option<String>,
    #[serde(rename = "motores", default, skip_serializing_if = "Option::is_none")]
    pub engines: Option<String>,
    /// Category used by the by-category listing.
    #[serde(rename = "rubro", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Article {
    /// Document field holding the article code.
    pub const CODE_FIELD: &'static str = "articulo";

    /// Document field holding the article category.
    pub const CATEGORY_FIELD: &'static str = "rubro";

    /// Create an article with only its code set.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the price.
    #[must_use]
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Whether the identifying field is empty.
    pub fn has_code(&self) -> bool {
        !self.code.is_empty()
    }
}
