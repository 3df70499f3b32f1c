//! Controller tunables and their defaults.

/// Widest viewport, in CSS pixels, that still uses the mobile drawer.
pub const MOBILE_BREAKPOINT_PX: u32 = 599;

/// Cover photos are cropped to this width/height ratio.
pub const COVER_ASPECT_RATIO: f64 = 16.0 / 9.0;

/// Toast duration for save/publish/delete results.
pub const ARTICLE_TOAST_MS: u32 = 4000;

/// Toast duration for tag add/duplicate messages.
pub const TAG_TOAST_MS: u32 = 2000;

/// Toast duration when nothing more specific applies.
pub const DEFAULT_TOAST_MS: u32 = 3000;

/// Largest accepted cover photo.
pub const MAX_COVER_BYTES: usize = 5 * 1024 * 1024;

/// Tunables shared by the controllers.
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// See [`MOBILE_BREAKPOINT_PX`].
    pub mobile_breakpoint_px: u32,
    /// See [`COVER_ASPECT_RATIO`].
    pub cover_aspect_ratio: f64,
    /// See [`ARTICLE_TOAST_MS`].
    pub article_toast_ms: u32,
    /// See [`TAG_TOAST_MS`].
    pub tag_toast_ms: u32,
    /// See [`DEFAULT_TOAST_MS`].
    pub default_toast_ms: u32,
    /// See [`MAX_COVER_BYTES`].
    pub max_cover_bytes: usize,
    /// Avatar adopted right after registration.
    pub default_profile_picture: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint_px: MOBILE_BREAKPOINT_PX,
            cover_aspect_ratio: COVER_ASPECT_RATIO,
            article_toast_ms: ARTICLE_TOAST_MS,
            tag_toast_ms: TAG_TOAST_MS,
            default_toast_ms: DEFAULT_TOAST_MS,
            max_cover_bytes: MAX_COVER_BYTES,
            default_profile_picture: "/images/default-profile.png".to_string(),
        }
    }
}
