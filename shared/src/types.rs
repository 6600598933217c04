//! Common types used across the catalog

use serde::{Deserialize, Serialize};

/// Advisory per-image upload size shown to the user (5 MiB). Never enforced.
pub const IMAGE_SIZE_HINT_BYTES: usize = 5 * 1024 * 1024;

/// An image attached to the form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageSource {
    /// Raw file contents picked by the user
    #[serde(rename_all = "camelCase")]
    Upload {
        #[serde(default)]
        file_name: Option<String>,
        mime_type: String,
        bytes: Vec<u8>,
    },
    /// Already displayable: a remote URL or a data URI
    Url { url: String },
}

impl ImageSource {
    pub fn upload(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        ImageSource::Upload {
            file_name: None,
            mime_type: mime_type.into(),
            bytes,
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        ImageSource::Url { url: url.into() }
    }

    /// Payload size, when known
    pub fn size_bytes(&self) -> Option<usize> {
        match self {
            ImageSource::Upload { bytes, .. } => Some(bytes.len()),
            ImageSource::Url { .. } => None,
        }
    }

    pub fn exceeds_size_hint(&self, hint_bytes: usize) -> bool {
        self.size_bytes().is_some_and(|size| size > hint_bytes)
    }
}
