#![allow(dead_code, reason = "each test binary uses a different subset of the doubles")]

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
};

use async_trait::async_trait;
use futures::channel::oneshot;
use lighthouse_shared::{
    services::{
        ArticleService, AuthService, AuthorService, EditorServices, GistService, ImageService,
        Navigator, RichTextSurface, SessionExit, TagService, UploadCredential,
    },
    session::{AuthOutcome, Credentials, Registration, SettingsChange, SettingsResult},
    Article, ArticleDraft, ArticleListItem, ServiceError, ServiceResult,
};
use serde_json::json;

/// Scripted backend: records every call, answers from its fields, and can
/// hold a call open until the test releases its gate.
pub struct MockBackend {
    pub calls: RefCell<Vec<String>>,
    gates: RefCell<HashMap<String, oneshot::Receiver<()>>>,

    pub article: RefCell<ServiceResult<Article>>,
    pub listed: RefCell<Vec<ArticleListItem>>,
    pub list_error: RefCell<Option<ServiceError>>,
    pub saved: RefCell<Vec<ArticleDraft>>,
    pub save_error: RefCell<Option<ServiceError>>,
    pub created: RefCell<Vec<String>>,
    pub delete_error: RefCell<Option<ServiceError>>,
    pub publish_error: RefCell<Option<ServiceError>>,

    pub credential: RefCell<ServiceResult<UploadCredential>>,
    pub delete_image_error: RefCell<Option<ServiceError>>,

    pub suggestions: RefCell<HashMap<String, Vec<String>>>,
    pub add_tag_error: RefCell<Option<ServiceError>>,

    pub token_valid: Cell<bool>,
    pub authenticated: Cell<bool>,
    pub logged_out: Cell<usize>,
    pub name: RefCell<String>,
    pub picture: RefCell<String>,

    pub went_home: Cell<usize>,
    pub opened_editor: RefCell<Vec<String>>,

    pub gist_html: RefCell<String>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            gates: RefCell::new(HashMap::new()),
            article: RefCell::new(Err(ServiceError::Http {
                status: 404,
                reason: Some("Article not found".to_string()),
            })),
            listed: RefCell::new(Vec::new()),
            list_error: RefCell::new(None),
            saved: RefCell::new(Vec::new()),
            save_error: RefCell::new(None),
            created: RefCell::new(Vec::new()),
            delete_error: RefCell::new(None),
            publish_error: RefCell::new(None),
            credential: RefCell::new(Ok(json!({ "bucket": "covers", "policy": "abc" }))),
            delete_image_error: RefCell::new(None),
            suggestions: RefCell::new(HashMap::new()),
            add_tag_error: RefCell::new(None),
            token_valid: Cell::new(true),
            authenticated: Cell::new(true),
            logged_out: Cell::new(0),
            name: RefCell::new("Ada".to_string()),
            picture: RefCell::new("https://cdn.example.com/ada.png".to_string()),
            went_home: Cell::new(0),
            opened_editor: RefCell::new(Vec::new()),
            gist_html: RefCell::new("<script src=\"gist.js\"></script>".to_string()),
        }
    }
}

impl MockBackend {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Holds the next call recorded as `key` until the returned sender fires
    /// (or is dropped).
    pub fn gate(&self, key: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.borrow_mut().insert(key.to_string(), rx);
        tx
    }

    pub fn calls_to(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    async fn enter(&self, key: String) {
        self.calls.borrow_mut().push(key.clone());
        let gate = self.gates.borrow_mut().remove(&key);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
    }

    pub fn editor_services(self: &Rc<Self>) -> EditorServices {
        EditorServices {
            articles: self.clone(),
            images: self.clone(),
            tags: self.clone(),
            gists: self.clone(),
            session: SessionExit {
                auth: self.clone(),
                navigator: self.clone(),
            },
        }
    }
}

fn take_err(slot: &RefCell<Option<ServiceError>>) -> ServiceResult<()> {
    match slot.borrow().clone() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[async_trait(?Send)]
impl ArticleService for MockBackend {
    async fn get_article(&self, id: &str) -> ServiceResult<Article> {
        self.enter(format!("get_article:{id}")).await;
        self.article.borrow().clone()
    }

    async fn list_articles(&self) -> ServiceResult<Vec<ArticleListItem>> {
        self.enter("list_articles".to_string()).await;
        take_err(&self.list_error)?;
        Ok(self.listed.borrow().clone())
    }

    async fn create_article(&self, title: &str) -> ServiceResult<Article> {
        self.enter(format!("create_article:{title}")).await;
        self.created.borrow_mut().push(title.to_string());
        Ok(Article {
            id: format!("new-{}", self.created.borrow().len()),
            title: title.to_string(),
            description: String::new(),
            text: String::new(),
            cover_photo: None,
            tags: Vec::new(),
            published: false,
        })
    }

    async fn save_article(&self, draft: &ArticleDraft) -> ServiceResult<Article> {
        self.enter("save_article".to_string()).await;
        if let Some(err) = self.save_error.borrow().clone() {
            return Err(err);
        }
        self.saved.borrow_mut().push(draft.clone());
        Ok(Article {
            id: draft.id.clone().unwrap_or_else(|| "created-1".to_string()),
            title: draft.title.clone(),
            description: draft.description.clone(),
            text: draft.text.clone(),
            cover_photo: draft
                .cover
                .as_ref()
                .map(|cover| cover.stored_url().unwrap_or("https://cdn.example.com/new.png"))
                .map(str::to_string),
            tags: draft.tags.clone(),
            published: false,
        })
    }

    async fn publish_article(&self, id: &str) -> ServiceResult<()> {
        self.enter(format!("publish_article:{id}")).await;
        take_err(&self.publish_error)
    }

    async fn delete_article(&self, id: &str) -> ServiceResult<()> {
        self.enter(format!("delete_article:{id}")).await;
        take_err(&self.delete_error)
    }
}

#[async_trait(?Send)]
impl ImageService for MockBackend {
    async fn upload_credential(&self) -> ServiceResult<UploadCredential> {
        self.enter("upload_credential".to_string()).await;
        self.credential.borrow().clone()
    }

    async fn delete_image(&self, src: &str) -> ServiceResult<()> {
        self.enter(format!("delete_image:{src}")).await;
        take_err(&self.delete_image_error)
    }
}

#[async_trait(?Send)]
impl TagService for MockBackend {
    async fn filter_tags(&self, prefix: &str) -> ServiceResult<Vec<String>> {
        self.enter(format!("filter_tags:{prefix}")).await;
        Ok(self
            .suggestions
            .borrow()
            .get(prefix)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_tag(&self, name: &str) -> ServiceResult<()> {
        self.enter(format!("add_tag:{name}")).await;
        take_err(&self.add_tag_error)
    }
}

#[async_trait(?Send)]
impl AuthorService for MockBackend {
    async fn display_name(&self) -> ServiceResult<String> {
        self.enter("display_name".to_string()).await;
        Ok(self.name.borrow().clone())
    }

    async fn profile_picture(&self) -> ServiceResult<String> {
        self.enter("profile_picture".to_string()).await;
        Ok(self.picture.borrow().clone())
    }

    async fn update_settings(&self, change: &SettingsChange) -> ServiceResult<SettingsResult> {
        self.enter("update_settings".to_string()).await;
        Ok(SettingsResult {
            name: change.name.clone(),
            image: change
                .avatar
                .as_ref()
                .map(|image| format!("https://cdn.example.com/{}", image.file_name)),
        })
    }
}

#[async_trait(?Send)]
impl AuthService for MockBackend {
    async fn check_token(&self) -> ServiceResult<()> {
        self.enter("check_token".to_string()).await;
        if self.token_valid.get() {
            Ok(())
        } else {
            Err(ServiceError::SessionExpired)
        }
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated.get()
    }

    fn logout(&self) {
        self.calls.borrow_mut().push("logout".to_string());
        self.logged_out.set(self.logged_out.get() + 1);
        self.authenticated.set(false);
    }

    async fn login(&self, credentials: &Credentials) -> ServiceResult<AuthOutcome> {
        self.enter(format!("login:{}", credentials.email)).await;
        if credentials.password != "secret" {
            return Err(ServiceError::Http {
                status: 401,
                reason: Some("Wrong email or password".to_string()),
            });
        }
        self.authenticated.set(true);
        Ok(AuthOutcome {
            token: "token".to_string(),
            name: self.name.borrow().clone(),
            profile_picture: Some(self.picture.borrow().clone()),
        })
    }

    async fn register(&self, registration: &Registration) -> ServiceResult<AuthOutcome> {
        self.enter(format!("register:{}", registration.email)).await;
        self.authenticated.set(true);
        Ok(AuthOutcome {
            token: "token".to_string(),
            name: registration.name.clone(),
            profile_picture: None,
        })
    }
}

#[async_trait(?Send)]
impl GistService for MockBackend {
    async fn fetch_gist(&self, id: &str) -> ServiceResult<String> {
        self.enter(format!("fetch_gist:{id}")).await;
        Ok(self.gist_html.borrow().clone())
    }
}

impl Navigator for MockBackend {
    fn go_home(&self) {
        self.went_home.set(self.went_home.get() + 1);
    }

    fn open_editor(&self, article_id: &str) {
        self.opened_editor.borrow_mut().push(article_id.to_string());
    }
}

/// In-memory rich-text surface.
#[derive(Default)]
pub struct MockSurface {
    pub html: RefCell<String>,
    pub inserted: RefCell<Vec<String>>,
    pub credential: RefCell<Option<UploadCredential>>,
    pub initialized: Cell<bool>,
    content_changed: RefCell<Option<Box<dyn Fn(String)>>>,
    image_removed: RefCell<Option<Box<dyn Fn(String)>>>,
}

impl MockSurface {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Simulates the author typing: replaces the body and fires the callback.
    pub fn type_html(&self, html: &str) {
        *self.html.borrow_mut() = html.to_string();
        if let Some(callback) = self.content_changed.borrow().as_ref() {
            callback(html.to_string());
        }
    }

    /// Simulates deleting an image from the body.
    pub fn remove_image(&self, src: &str) {
        if let Some(callback) = self.image_removed.borrow().as_ref() {
            callback(src.to_string());
        }
    }
}

impl RichTextSurface for MockSurface {
    fn set_html(&self, html: &str) {
        *self.html.borrow_mut() = html.to_string();
    }

    fn html(&self) -> String {
        self.html.borrow().clone()
    }

    fn insert_html(&self, html: &str) {
        self.inserted.borrow_mut().push(html.to_string());
        self.html.borrow_mut().push_str(html);
    }

    fn configure_uploads(&self, credential: &UploadCredential) {
        *self.credential.borrow_mut() = Some(credential.clone());
    }

    fn initialize(&self) {
        self.initialized.set(true);
    }

    fn on_content_changed(&self, callback: Box<dyn Fn(String)>) {
        *self.content_changed.borrow_mut() = Some(callback);
    }

    fn on_image_removed(&self, callback: Box<dyn Fn(String)>) {
        *self.image_removed.borrow_mut() = Some(callback);
    }
}

pub fn article_42() -> Article {
    serde_json::from_value(json!({
        "id": "42",
        "title": "A",
        "description": "B",
        "text": "<p>hi</p>",
        "tags": ["x", "y"],
        "coverPhoto": "url1"
    }))
    .expect("fixture parses")
}
