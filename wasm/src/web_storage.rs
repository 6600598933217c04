//! Browser `localStorage` as a catalog storage backend

use coffee_shop_catalog::{Storage, StorageError};
use wasm_bindgen::JsValue;

pub struct WebStorage {
    inner: web_sys::Storage,
}

impl WebStorage {
    /// `None` outside a browser window or when storage access is denied
    pub fn local() -> Option<Self> {
        let window = web_sys::window()?;
        let inner = window.local_storage().ok()??;
        Some(Self { inner })
    }
}

impl Storage for WebStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key).map_err(js_error)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set_item(key, value).map_err(js_error)
    }
}

/// `setItem` throws a DOMException (usually QuotaExceededError)
fn js_error(value: JsValue) -> StorageError {
    let message = value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&value, &JsValue::from_str("name"))
                .ok()
                .and_then(|name| name.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", value));
    StorageError::Backend(message)
}
