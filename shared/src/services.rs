//! Seams to the backend and to the host page.
//!
//! The browser crate implements these over HTTP (or in memory with the
//! `mock` feature); tests implement them with scripted doubles. Everything is
//! single-threaded, hence `?Send`.

use std::rc::Rc;

use async_trait::async_trait;

use crate::{
    article::{Article, ArticleDraft, ArticleListItem},
    error::ServiceResult,
    session::{AuthOutcome, Credentials, Registration, SettingsChange, SettingsResult},
};

/// Opaque upload credential handed to the rich-text surface.
pub type UploadCredential = serde_json::Value;

/// Article CRUD.
#[async_trait(?Send)]
pub trait ArticleService {
    /// Fetches one article.
    async fn get_article(&self, id: &str) -> ServiceResult<Article>;
    /// Lists the current user's articles.
    async fn list_articles(&self) -> ServiceResult<Vec<ArticleListItem>>;
    /// Creates an empty article with a title.
    async fn create_article(&self, title: &str) -> ServiceResult<Article>;
    /// Creates (`draft.id == None`) or updates an article.
    async fn save_article(&self, draft: &ArticleDraft) -> ServiceResult<Article>;
    /// Publishes a saved article.
    async fn publish_article(&self, id: &str) -> ServiceResult<()>;
    /// Deletes an article.
    async fn delete_article(&self, id: &str) -> ServiceResult<()>;
}

/// Image storage used by the rich-text body.
#[async_trait(?Send)]
pub trait ImageService {
    /// Credential the editor needs to upload inline images.
    async fn upload_credential(&self) -> ServiceResult<UploadCredential>;
    /// Deletes a stored image by its URL.
    async fn delete_image(&self, src: &str) -> ServiceResult<()>;
}

/// Global tag catalog.
#[async_trait(?Send)]
pub trait TagService {
    /// Suggestions matching `prefix`, in display order.
    async fn filter_tags(&self, prefix: &str) -> ServiceResult<Vec<String>>;
    /// Registers a new tag.
    async fn add_tag(&self, name: &str) -> ServiceResult<()>;
}

/// Profile of the signed-in author.
#[async_trait(?Send)]
pub trait AuthorService {
    /// Display name.
    async fn display_name(&self) -> ServiceResult<String>;
    /// Avatar URL.
    async fn profile_picture(&self) -> ServiceResult<String>;
    /// Applies a settings change and returns what actually changed.
    async fn update_settings(&self, change: &SettingsChange) -> ServiceResult<SettingsResult>;
}

/// Session owner.
#[async_trait(?Send)]
pub trait AuthService {
    /// Rejects when the stored token is missing, invalid or expired.
    async fn check_token(&self) -> ServiceResult<()>;
    /// Synchronous view of the session.
    fn is_authenticated(&self) -> bool;
    /// Drops the session.
    fn logout(&self);
    /// Signs in and stores the session.
    async fn login(&self, credentials: &Credentials) -> ServiceResult<AuthOutcome>;
    /// Creates an account and stores the session.
    async fn register(&self, registration: &Registration) -> ServiceResult<AuthOutcome>;
}

/// GitHub gist embeds.
#[async_trait(?Send)]
pub trait GistService {
    /// Embed HTML for the gist with this id.
    async fn fetch_gist(&self, id: &str) -> ServiceResult<String>;
}

/// Route changes requested by controllers.
pub trait Navigator {
    /// Goes to the public home page.
    fn go_home(&self);
    /// Opens the editor for an article.
    fn open_editor(&self, article_id: &str);
}

/// Adapter over the third-party rich-text editor.
///
/// Registrations take single-argument callbacks: the content callback gets
/// the full body HTML, the image callback gets the `src` of the removed image.
pub trait RichTextSurface {
    /// Replaces the body.
    fn set_html(&self, html: &str);
    /// Current body.
    fn html(&self) -> String;
    /// Inserts HTML at the cursor.
    fn insert_html(&self, html: &str);
    /// Hands over the inline-image upload credential.
    fn configure_uploads(&self, credential: &UploadCredential);
    /// Creates the editor instance; called once uploads are configured.
    fn initialize(&self);
    /// Called with the new body whenever the content changes.
    fn on_content_changed(&self, callback: Box<dyn Fn(String)>);
    /// Called with the `src` of every image removed from the body.
    fn on_image_removed(&self, callback: Box<dyn Fn(String)>);
}

/// Ends a session a controller found expired: drops the token and leaves for
/// the public home page.
#[derive(Clone)]
pub struct SessionExit {
    /// Session owner.
    pub auth: Rc<dyn AuthService>,
    /// Route changes.
    pub navigator: Rc<dyn Navigator>,
}

impl SessionExit {
    /// Logs out and navigates home.
    pub fn end(&self) {
        self.auth.logout();
        self.navigator.go_home();
    }
}

/// Everything the editor screen talks to.
#[derive(Clone)]
pub struct EditorServices {
    /// Article CRUD.
    pub articles: Rc<dyn ArticleService>,
    /// Inline images.
    pub images: Rc<dyn ImageService>,
    /// Tag catalog.
    pub tags: Rc<dyn TagService>,
    /// Gist embeds.
    pub gists: Rc<dyn GistService>,
    /// Logout path for expired sessions.
    pub session: SessionExit,
}
