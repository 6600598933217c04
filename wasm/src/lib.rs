//! WebAssembly module for the Coffee Shop Catalog
//!
//! Exposes the catalog to the browser UI:
//! - `list`, `add`, `delete` against `localStorage`
//! - `validateAndBuild` and `submit` for the add-shop form
//! - ad-hoc style creation
//! - notifications for the UI to show as toasts
//!
//! Everything crosses the boundary as JSON strings.

pub mod console_log;
mod web_storage;

use std::sync::Arc;

use coffee_shop_catalog::notification::RecordingNotifier;
use coffee_shop_catalog::{
    CatalogError, CatalogResult, CatalogStore, ShopBuilder, Storage, UnavailableStorage,
};
use serde::Serialize;
use shared::{CoffeeShopDraft, ShopForm};
use wasm_bindgen::prelude::*;

pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;
pub use web_storage::WebStorage;

/// Initialize the WASM module and send tracing output to the console
#[wasm_bindgen(start)]
pub fn init() {
    console_log::init();
    tracing::info!("Coffee shop catalog module loaded");
}

/// Catalog handle owned by the page
#[wasm_bindgen]
pub struct CatalogHandle {
    store: CatalogStore,
    builder: ShopBuilder,
    notifier: Arc<RecordingNotifier>,
}

#[wasm_bindgen]
impl CatalogHandle {
    /// Use `localStorage`, or serve the demo shops without persistence
    /// when it is not reachable.
    #[wasm_bindgen(constructor)]
    pub fn new() -> CatalogHandle {
        match WebStorage::local() {
            Some(storage) => Self::with_storage(storage),
            None => Self::with_storage(UnavailableStorage),
        }
    }

    /// JSON array of shops, newest first
    pub fn list(&self) -> Result<String, JsValue> {
        self.list_json().map_err(to_js)
    }

    /// Add a draft (JSON) and return the stored shop (JSON)
    pub fn add(&self, draft_json: &str) -> Result<String, JsValue> {
        self.add_json(draft_json).map_err(to_js)
    }

    #[wasm_bindgen(js_name = delete)]
    pub fn delete_shop(&self, id: &str) -> Result<(), JsValue> {
        self.store.delete(id).map_err(to_js)
    }

    /// Draft (JSON) for a valid form, or the field errors
    #[wasm_bindgen(js_name = validateAndBuild)]
    pub fn validate_and_build(&self, form_json: &str) -> Result<String, JsValue> {
        self.validate_and_build_json(form_json).map_err(to_js)
    }

    /// Validate and add in one step
    pub fn submit(&self, form_json: &str) -> Result<String, JsValue> {
        self.submit_json(form_json).map_err(to_js)
    }

    #[wasm_bindgen(js_name = knownStyles)]
    pub fn known_styles(&self) -> Result<String, JsValue> {
        to_json(self.builder.known_styles()).map_err(to_js)
    }

    /// Coin a style and return the updated form (JSON)
    #[wasm_bindgen(js_name = coinStyle)]
    pub fn coin_style(&mut self, form_json: &str, name: &str) -> Result<String, JsValue> {
        self.coin_style_json(form_json, name).map_err(to_js)
    }

    /// Drain pending notifications (JSON array)
    #[wasm_bindgen(js_name = takeNotifications)]
    pub fn take_notifications(&self) -> Result<String, JsValue> {
        to_json(&self.notifier.take()).map_err(to_js)
    }

    #[wasm_bindgen(js_name = imageSizeHint)]
    pub fn image_size_hint(&self) -> usize {
        self.builder.image_size_hint()
    }
}

impl Default for CatalogHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogHandle {
    pub fn with_storage(storage: impl Storage + 'static) -> Self {
        let notifier = Arc::new(RecordingNotifier::new());
        Self {
            store: CatalogStore::new(storage).with_notifier(notifier.clone()),
            builder: ShopBuilder::new(),
            notifier,
        }
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    fn list_json(&self) -> CatalogResult<String> {
        to_json(&self.store.list())
    }

    fn add_json(&self, draft_json: &str) -> CatalogResult<String> {
        let draft: CoffeeShopDraft = from_json(draft_json)?;
        to_json(&self.store.add(draft)?)
    }

    fn validate_and_build_json(&self, form_json: &str) -> CatalogResult<String> {
        let form: ShopForm = from_json(form_json)?;
        to_json(&self.builder.validate_and_build(&form)?)
    }

    fn submit_json(&self, form_json: &str) -> CatalogResult<String> {
        let mut form: ShopForm = from_json(form_json)?;
        to_json(&self.builder.submit(&mut form, &self.store)?)
    }

    fn coin_style_json(&mut self, form_json: &str, name: &str) -> CatalogResult<String> {
        let mut form: ShopForm = from_json(form_json)?;
        self.builder.coin_style(&mut form, name);
        to_json(&form)
    }
}

fn from_json<T: serde::de::DeserializeOwned>(raw: &str) -> CatalogResult<T> {
    serde_json::from_str(raw).map_err(|e| CatalogError::InvalidInput(e.to_string()))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> CatalogResult<String> {
    serde_json::to_string(value).map_err(CatalogError::Serialization)
}

/// Errors reach JS as `Error` objects whose message is the JSON error detail
fn to_js(err: CatalogError) -> JsValue {
    let detail = err.detail();
    web_sys::console::error_1(&JsValue::from_str(&err.to_string()));
    let message = serde_json::to_string(&detail).unwrap_or(detail.message);
    js_sys::Error::new(&message).into()
}
