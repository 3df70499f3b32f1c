//! Platform-independent core of the Lighthouse authoring UI.
//!
//! Everything here compiles both natively and for `wasm32`: the article data
//! model, per-screen controllers (editor, dashboard, navigation bar), modal
//! forms, and the service traits the browser crate implements over HTTP.

pub mod article;
pub mod cancel;
pub mod config;
pub mod crop;
pub mod dashboard;
pub mod editor;
pub mod error;
pub mod modal;
pub mod nav;
pub mod notify;
pub mod services;
pub mod session;
pub mod supersede;
pub mod tags;
pub mod validate;

pub use article::{Article, ArticleDraft, ArticleListItem, CoverPhoto, PendingImage};
pub use cancel::CancellationToken;
pub use config::UiConfig;
pub use error::{ServiceError, ServiceResult};
pub use notify::{Notification, NotificationLevel, Notifier};
pub use tags::{TagError, TagSet};
