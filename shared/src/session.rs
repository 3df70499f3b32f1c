//! Identity values exchanged with the auth and author services.

use serde::{Deserialize, Serialize};

use crate::article::PendingImage;

/// Login form payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Account e-mail.
    pub email: String,
    /// Plain password, sent over TLS only.
    pub password: String,
}

/// Registration form payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Display name.
    pub name: String,
    /// Account e-mail.
    pub email: String,
    /// Plain password.
    pub password: String,
}

/// Successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthOutcome {
    /// Bearer token to store in the session.
    pub token: String,
    /// Display name of the account.
    pub name: String,
    /// Avatar URL, absent for fresh accounts.
    #[serde(default)]
    pub profile_picture: Option<String>,
}

/// Dismissal value of the login modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    /// Name to show in the nav bar.
    pub name: String,
    /// Avatar to show, if the account has one.
    pub avatar: Option<String>,
}

/// Fields the settings modal may change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsChange {
    /// New display name.
    pub name: Option<String>,
    /// New avatar file.
    pub avatar: Option<PendingImage>,
}

impl SettingsChange {
    /// Whether nothing would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.avatar.is_none()
    }
}

/// Dismissal value of the settings modal; only present fields are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SettingsResult {
    /// Updated display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Updated avatar URL.
    #[serde(default)]
    pub image: Option<String>,
}

/// Whether a token with `exp` (seconds since the epoch) is expired at
/// `now_ms` (milliseconds since the epoch).
pub fn is_expired(exp_secs: u64, now_ms: f64) -> bool {
    (exp_secs as f64) * 1000.0 <= now_ms
}
