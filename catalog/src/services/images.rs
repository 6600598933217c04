//! Turns attached images into display-ready URLs

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use shared::ImageSource;

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Uploaded bytes become a base64 data URI; URLs pass through unchanged
pub fn resolve_image(source: &ImageSource) -> String {
    match source {
        ImageSource::Upload {
            mime_type, bytes, ..
        } => data_uri(mime_type, bytes),
        ImageSource::Url { url } => url.clone(),
    }
}

/// Resolve images in upload order. Oversized uploads are logged, not rejected.
pub fn resolve_images(sources: &[ImageSource], size_hint_bytes: usize) -> Vec<String> {
    sources
        .iter()
        .map(|source| {
            if source.exceeds_size_hint(size_hint_bytes) {
                tracing::warn!(
                    size = source.size_bytes().unwrap_or_default(),
                    hint = size_hint_bytes,
                    "Image is larger than the recommended upload size"
                );
            }
            resolve_image(source)
        })
        .collect()
}

pub fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    let mime_type = match mime_type.trim() {
        "" => FALLBACK_MIME_TYPE,
        m => m,
    };
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_becomes_data_uri() {
        let image = ImageSource::upload("image/png", b"hello".to_vec());
        assert_eq!(resolve_image(&image), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn test_missing_mime_type() {
        assert_eq!(data_uri("  ", &[0xff]), "data:application/octet-stream;base64,/w==");
    }

    #[test]
    fn test_url_passes_through() {
        let image = ImageSource::url("https://img.example/latte.jpg");
        assert_eq!(resolve_image(&image), "https://img.example/latte.jpg");
    }

    #[test]
    fn test_oversized_image_is_still_resolved() {
        let images = vec![
            ImageSource::url("https://img.example/a.jpg"),
            ImageSource::upload("image/jpeg", vec![7; 16]),
        ];
        let urls = resolve_images(&images, 8);
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0], "https://img.example/a.jpg");
        assert!(urls[1].starts_with("data:image/jpeg;base64,"));
    }
}
