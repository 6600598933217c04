//! Record builder: validates form input and produces drafts for the store

use shared::{
    validate_shop_form, CoffeeShop, CoffeeShopDraft, CoffeeShopStyle, FieldErrors, ShopForm,
    StyleCatalog, IMAGE_SIZE_HINT_BYTES,
};

use crate::error::CatalogResult;
use crate::ids::{IdAllocator, SequentialAllocator};
use crate::services::images::resolve_images;
use crate::services::store::CatalogStore;

/// Builds drafts from raw form input and keeps the known styles
pub struct ShopBuilder {
    styles: StyleCatalog,
    style_ids: Box<dyn IdAllocator>,
    image_size_hint: usize,
}

impl Default for ShopBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ShopBuilder {
    pub fn new() -> Self {
        Self {
            styles: StyleCatalog::default(),
            style_ids: Box::new(SequentialAllocator::with_prefix("style-")),
            image_size_hint: IMAGE_SIZE_HINT_BYTES,
        }
    }

    pub fn with_styles(mut self, styles: StyleCatalog) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_style_ids(mut self, ids: impl IdAllocator + 'static) -> Self {
        self.style_ids = Box::new(ids);
        self
    }

    pub fn with_image_size_hint(mut self, bytes: usize) -> Self {
        self.image_size_hint = bytes;
        self
    }

    pub fn known_styles(&self) -> &[CoffeeShopStyle] {
        self.styles.styles()
    }

    pub fn image_size_hint(&self) -> usize {
        self.image_size_hint
    }

    /// Create a style the user typed in, add it to the known styles and
    /// select it on the form. Blank names are ignored.
    pub fn coin_style(&mut self, form: &mut ShopForm, name: &str) -> Option<CoffeeShopStyle> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let style = CoffeeShopStyle::new(self.style_ids.next_id(), name);
        self.styles.insert(style.clone());
        form.styles.push(style.clone());
        tracing::debug!(id = %style.id, name = %style.name, "Coined new style");
        Some(style)
    }

    /// Check required fields and normalize the input into a draft
    pub fn validate_and_build(&self, form: &ShopForm) -> Result<CoffeeShopDraft, FieldErrors> {
        validate_shop_form(form)?;

        Ok(CoffeeShopDraft {
            name: form.name.trim().to_string(),
            address: form.address.trim().to_string(),
            price_range: form.effective_price_range(),
            styles: form.styles.clone(),
            image_urls: resolve_images(&form.images, self.image_size_hint),
        })
    }

    /// Validate, add to the store and reset the form. The store is not
    /// touched when validation fails; the form is kept when anything fails.
    pub fn submit(&self, form: &mut ShopForm, store: &CatalogStore) -> CatalogResult<CoffeeShop> {
        let draft = self.validate_and_build(form)?;
        let shop = store.add(draft)?;
        form.reset();
        Ok(shop)
    }
}
