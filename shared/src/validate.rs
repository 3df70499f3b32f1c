//! Cover photo file checks, run before a file becomes the pending cover.

use thiserror::Error;

/// MIME types accepted as cover photos.
pub const ACCEPTED_IMAGE_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/gif", "image/webp"];

/// Why a selected file was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileError {
    /// Zero-byte file.
    #[error("The selected file is empty")]
    Empty,
    /// Not one of [`ACCEPTED_IMAGE_TYPES`].
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    /// Larger than the configured limit.
    #[error("File is too large ({size} bytes, limit {limit})")]
    TooLarge {
        /// Size of the file.
        size: usize,
        /// Configured limit.
        limit: usize,
    },
}

/// Checks a cover candidate by MIME type and size.
pub fn validate_cover_file(mime_type: &str, size: usize, limit: usize) -> Result<(), FileError> {
    if size == 0 {
        return Err(FileError::Empty);
    }
    let normalized = mime_type.trim().to_ascii_lowercase();
    if !ACCEPTED_IMAGE_TYPES.contains(&normalized.as_str()) {
        return Err(FileError::UnsupportedType(mime_type.to_string()));
    }
    if size > limit {
        return Err(FileError::TooLarge {
            size,
            limit,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_images() {
        for mime in ACCEPTED_IMAGE_TYPES {
            assert!(validate_cover_file(mime, 10, 100).is_ok());
        }
        assert!(validate_cover_file("IMAGE/PNG", 10, 100).is_ok());
    }

    #[test]
    fn rejects_other_types() {
        assert_eq!(
            validate_cover_file("application/pdf", 10, 100),
            Err(FileError::UnsupportedType("application/pdf".to_string()))
        );
    }

    #[test]
    fn rejects_empty_and_oversized() {
        assert_eq!(validate_cover_file("image/png", 0, 100), Err(FileError::Empty));
        assert_eq!(
            validate_cover_file("image/png", 101, 100),
            Err(FileError::TooLarge {
                size: 101,
                limit: 100
            })
        );
    }
}
