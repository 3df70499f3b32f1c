//! Modal dialogs: a one-shot exit channel plus the small forms behind each
//! dialog.
//!
//! A dialog gets a [`ModalCloser`] and its opener awaits the matching
//! [`ModalResult`]. The closer is consumed on its single exit; dropping it
//! without closing reads as a dismissal (`None`).

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::channel::oneshot;
use thiserror::Error;

use crate::{
    article::PendingImage,
    crop::{CropRect, CropSelection},
    error::ServiceError,
    services::{AuthService, AuthorService},
    session::{Credentials, LoginResult, Registration, SettingsChange, SettingsResult},
};

/// Creates a connected closer/result pair.
pub fn modal<T>() -> (ModalCloser<T>, ModalResult<T>) {
    let (tx, rx) = oneshot::channel();
    (
        ModalCloser {
            tx,
        },
        ModalResult {
            rx,
        },
    )
}

/// The dialog side; consumed when the dialog closes.
pub struct ModalCloser<T> {
    tx: oneshot::Sender<T>,
}

impl<T> ModalCloser<T> {
    /// Closes with a value, or dismisses when `value` is `None`.
    pub fn close(self, value: Option<T>) {
        if let Some(value) = value {
            // The opener may already be gone; nothing to deliver then.
            let _ = self.tx.send(value);
        }
    }

    /// Closes without a value.
    pub fn dismiss(self) {
        self.close(None);
    }
}

/// The opener side; resolves to the dismissal value.
pub struct ModalResult<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> ModalResult<T> {
    /// A result that is already settled, for dialogs that closed synchronously.
    pub fn ready(value: Option<T>) -> Self {
        let (closer, result) = modal();
        closer.close(value);
        result
    }
}

impl<T> Future for ModalResult<T> {
    type Output = Option<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        Pin::new(&mut self.rx).poll(cx).map(Result::ok)
    }
}

/// Why a form cannot be confirmed yet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// A required field is blank.
    #[error("{0} is required")]
    Missing(&'static str),
    /// The delete confirmation does not match the article title.
    #[error("Confirmation does not match the article title")]
    Mismatch,
    /// The settings form would not change anything.
    #[error("Nothing to update")]
    NothingToChange,
}

/// Failure of a form that calls a service on submit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// Local validation failed; no call was made.
    #[error(transparent)]
    Invalid(#[from] FormError),
    /// The service rejected the request.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl SubmitError {
    /// Text for the inline error or toast.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Invalid(err) => err.to_string(),
            SubmitError::Service(err) => err.user_message(),
        }
    }
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::Missing(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Dismissal value of the create-article dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    /// Title of the article to create.
    pub title: String,
}

/// Create-article dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateArticleForm {
    /// Title input.
    pub title: String,
}

impl CreateArticleForm {
    /// Confirmed value, once the title is present.
    pub fn validate(&self) -> Result<NewArticle, FormError> {
        Ok(NewArticle {
            title: required(&self.title, "Title")?,
        })
    }
}

/// Delete-article confirmation dialog; the author types the title to
/// confirm.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteArticleForm {
    /// Title of the article being deleted.
    pub article_title: String,
    /// What the author typed.
    pub confirmation: String,
}

impl DeleteArticleForm {
    /// Dialog for the given article.
    pub fn for_article(title: impl Into<String>) -> Self {
        Self {
            article_title: title.into(),
            confirmation: String::new(),
        }
    }

    /// `Ok(true)` once the confirmation is present and matches.
    pub fn validate(&self) -> Result<bool, FormError> {
        let typed = required(&self.confirmation, "Confirmation")?;
        if typed != self.article_title.trim() {
            return Err(FormError::Mismatch);
        }
        Ok(true)
    }
}

/// Login dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    /// E-mail input.
    pub email: String,
    /// Password input.
    pub password: String,
}

impl LoginForm {
    /// Credentials, once both fields are present.
    pub fn validate(&self) -> Result<Credentials, FormError> {
        let email = required(&self.email, "Email")?;
        if self.password.is_empty() {
            return Err(FormError::Missing("Password"));
        }
        Ok(Credentials {
            email,
            password: self.password.clone(),
        })
    }

    /// Signs in and produces the dismissal value.
    pub async fn submit(&self, auth: &dyn AuthService) -> Result<LoginResult, SubmitError> {
        let credentials = self.validate()?;
        let outcome = auth.login(&credentials).await?;
        Ok(LoginResult {
            name: outcome.name,
            avatar: outcome.profile_picture,
        })
    }
}

/// Registration dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    /// Display name input.
    pub name: String,
    /// E-mail input.
    pub email: String,
    /// Password input.
    pub password: String,
}

impl RegisterForm {
    /// Registration payload, once every field is present.
    pub fn validate(&self) -> Result<Registration, FormError> {
        let name = required(&self.name, "Name")?;
        let email = required(&self.email, "Email")?;
        if self.password.is_empty() {
            return Err(FormError::Missing("Password"));
        }
        Ok(Registration {
            name,
            email,
            password: self.password.clone(),
        })
    }

    /// Creates the account; the dismissal value is the new display name.
    pub async fn submit(&self, auth: &dyn AuthService) -> Result<String, SubmitError> {
        let registration = self.validate()?;
        let outcome = auth.register(&registration).await?;
        Ok(outcome.name)
    }
}

/// Author settings dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsForm {
    /// New display name; blank keeps the current one.
    pub name: String,
    /// New avatar file.
    pub avatar: Option<PendingImage>,
}

impl SettingsForm {
    /// The change to send; at least one field must be set.
    pub fn validate(&self) -> Result<SettingsChange, FormError> {
        let name = Some(self.name.trim().to_string()).filter(|name| !name.is_empty());
        let change = SettingsChange {
            name,
            avatar: self.avatar.clone(),
        };
        if change.is_empty() {
            return Err(FormError::NothingToChange);
        }
        Ok(change)
    }

    /// Applies the change and produces the dismissal value.
    pub async fn submit(&self, author: &dyn AuthorService) -> Result<SettingsResult, SubmitError> {
        let change = self.validate()?;
        Ok(author.update_settings(&change).await?)
    }
}

/// What the editor passes to the cover preview dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct CropRequest {
    /// Image source (stored URL or data URL).
    pub src: String,
    /// Locked width/height ratio.
    pub aspect_ratio: f64,
}

/// Cover preview dialog state.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePreview {
    request: CropRequest,
    selection: Option<CropSelection>,
}

impl ImagePreview {
    /// Dialog seeded with the editor's request.
    pub fn new(request: CropRequest) -> Self {
        Self {
            request,
            selection: None,
        }
    }

    /// Image source to display.
    pub fn src(&self) -> &str {
        &self.request.src
    }

    /// Called once the image has loaded and its natural size is known.
    pub fn image_loaded(&mut self, width: f64, height: f64) {
        self.selection = Some(CropSelection::new(width, height, self.request.aspect_ratio));
    }

    /// Current selection, if the image has loaded.
    pub fn selection(&self) -> Option<CropRect> {
        self.selection.as_ref().map(CropSelection::rect)
    }

    /// Drags the selection.
    pub fn move_by(&mut self, dx: f64, dy: f64) {
        if let Some(selection) = self.selection.as_mut() {
            selection.move_by(dx, dy);
        }
    }

    /// Zooms the selection.
    pub fn set_scale(&mut self, scale: f64) {
        if let Some(selection) = self.selection.as_mut() {
            selection.set_scale(scale);
        }
    }

    /// Rectangle to crop; confirmation is blocked until the image is loaded.
    pub fn confirm(&self) -> Result<CropRect, FormError> {
        self.selection()
            .filter(|rect| !rect.is_empty())
            .ok_or(FormError::Missing("Image"))
    }
}
