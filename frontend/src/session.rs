//! Session token kept in `localStorage`.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use lighthouse_shared::session::is_expired;
use serde::Deserialize;

use crate::config::TOKEN_STORAGE_KEY;

#[derive(Deserialize)]
struct Claims {
    exp: Option<u64>,
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Stored token, if any.
pub fn token() -> Option<String> {
    storage()?
        .get_item(TOKEN_STORAGE_KEY)
        .ok()
        .flatten()
        .filter(|token| !token.trim().is_empty())
}

pub fn store_token(token: &str) {
    if let Some(storage) = storage() {
        if storage.set_item(TOKEN_STORAGE_KEY, token).is_err() {
            web_sys::console::warn_1(&"Failed to persist session token".into());
        }
    }
}

pub fn clear_token() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(TOKEN_STORAGE_KEY);
    }
}

/// `exp` claim of a JWT, without verifying the signature.
pub fn token_expiry(token: &str) -> Option<u64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice::<Claims>(&bytes).ok()?.exp
}

/// A token is usable when present and, if it carries `exp`, not expired.
pub fn token_is_live(token: &str, now_ms: f64) -> bool {
    match token_expiry(token) {
        Some(exp) => !is_expired(exp, now_ms),
        None => token.split('.').count() == 3,
    }
}

/// Synchronous session check used for menu rendering.
pub fn has_live_token() -> bool {
    token().is_some_and(|token| token_is_live(&token, js_sys::Date::now()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(payload: &str) -> String {
        format!("eyJhbGciOiJIUzI1NiJ9.{}.sig", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn reads_exp_claim() {
        assert_eq!(token_expiry(&jwt(r#"{"sub":"1","exp":1700000000}"#)), Some(1_700_000_000));
        assert_eq!(token_expiry(&jwt(r#"{"sub":"1"}"#)), None);
        assert_eq!(token_expiry("garbage"), None);
    }

    #[test]
    fn liveness_follows_exp() {
        let token = jwt(r#"{"exp":100}"#);
        assert!(token_is_live(&token, 99_000.0));
        assert!(!token_is_live(&token, 100_000.0));
        assert!(token_is_live(&jwt("{}"), 1.0));
        assert!(!token_is_live("not-a-jwt", 1.0));
    }
}
