/// Default page size for catalog listings (matches the storefront grid)
pub const DEFAULT_PAGE_SIZE: i64 = 12;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Maximum upload size for plan documents (PDF/ZIP/RAR)
pub const MAX_DOCUMENT_SIZE: usize = 50 * 1024 * 1024;

/// Maximum upload size for images (plan photos and avatars)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Raster image formats accepted for plan photos and avatars
pub const ALLOWED_IMAGE_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Archive/document formats accepted for downloadable plan files
pub const ALLOWED_DOCUMENT_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/zip",
    "application/x-zip-compressed",
    "application/x-rar-compressed",
    "application/vnd.rar",
];

pub fn is_image_mime_allowed(content_type: &str) -> bool {
    ALLOWED_IMAGE_MIME_TYPES.contains(&content_type)
}

pub fn is_document_mime_allowed(content_type: &str) -> bool {
    ALLOWED_DOCUMENT_MIME_TYPES.contains(&content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_whitelist_accepts_raster_formats() {
        assert!(is_image_mime_allowed("image/jpeg"));
        assert!(is_image_mime_allowed("image/png"));
        assert!(is_image_mime_allowed("image/webp"));
    }

    #[test]
    fn image_whitelist_rejects_other_types() {
        assert!(!is_image_mime_allowed("image/svg+xml"));
        assert!(!is_image_mime_allowed("application/pdf"));
        assert!(!is_image_mime_allowed("text/html"));
    }

    #[test]
    fn document_whitelist_accepts_pdf_and_archives() {
        assert!(is_document_mime_allowed("application/pdf"));
        assert!(is_document_mime_allowed("application/zip"));
        assert!(is_document_mime_allowed("application/x-rar-compressed"));
    }

    #[test]
    fn document_whitelist_rejects_executables_and_images() {
        assert!(!is_document_mime_allowed("application/octet-stream"));
        assert!(!is_document_mime_allowed("image/png"));
    }
}
