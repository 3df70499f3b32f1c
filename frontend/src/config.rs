//! Configuration for the frontend application

use lighthouse_shared::UiConfig;

/// Base URL for static assets and routes
/// - For local development: "/"
/// - For the static mock deployment: "/lighthouse/"
#[cfg(not(feature = "mock"))]
pub const BASE_URL: &str = "/";

#[cfg(feature = "mock")]
pub const BASE_URL: &str = "/lighthouse/";

/// Avatar shown right after registration, before the author uploads one.
pub const DEFAULT_PROFILE_PICTURE: &str = "static/default-profile.svg";

/// localStorage key holding the session token.
pub const TOKEN_STORAGE_KEY: &str = "lighthouse.token";

/// Helper function to construct asset paths
pub fn asset_path(path: &str) -> String {
    // Remove leading slash if present
    let path = path.strip_prefix('/').unwrap_or(path);
    format!("{}{}", BASE_URL, path)
}

/// Controller tunables with the deployed avatar path.
pub fn ui_config() -> UiConfig {
    UiConfig {
        default_profile_picture: asset_path(DEFAULT_PROFILE_PICTURE),
        ..UiConfig::default()
    }
}
