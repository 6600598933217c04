//! Raw input collected by the add-shop form

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{CoffeeShopStyle, PriceRange};
use crate::types::ImageSource;
use crate::validation::not_blank;

/// Unvalidated form state. Strings are kept exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShopForm {
    #[validate(custom = "not_blank")]
    #[serde(default)]
    pub name: String,

    #[validate(custom = "not_blank")]
    #[serde(default)]
    pub address: String,

    /// Unset means the default tier
    #[serde(default)]
    pub price_range: Option<PriceRange>,

    /// Selected styles, in selection order
    #[serde(default)]
    pub styles: Vec<CoffeeShopStyle>,

    /// Images, in upload order
    #[serde(default)]
    pub images: Vec<ImageSource>,
}

impl ShopForm {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            ..Self::default()
        }
    }

    pub fn with_price_range(mut self, price_range: PriceRange) -> Self {
        self.price_range = Some(price_range);
        self
    }

    pub fn effective_price_range(&self) -> PriceRange {
        self.price_range.unwrap_or_default()
    }

    pub fn is_selected(&self, style_id: &str) -> bool {
        self.styles.iter().any(|s| s.id == style_id)
    }

    /// Select the style, or deselect it if already selected.
    /// Returns whether it is selected afterwards.
    pub fn toggle_style(&mut self, style: &CoffeeShopStyle) -> bool {
        if let Some(pos) = self.styles.iter().position(|s| s.id == style.id) {
            self.styles.remove(pos);
            false
        } else {
            self.styles.push(style.clone());
            true
        }
    }

    pub fn add_image(&mut self, image: ImageSource) {
        self.images.push(image);
    }

    pub fn remove_image(&mut self, index: usize) -> Option<ImageSource> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    /// Clear everything after a successful submit
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
