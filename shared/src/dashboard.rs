//! Dashboard listing the current author's articles.

use std::{cell::RefCell, rc::Rc};

use tracing::warn;

use crate::{
    article::ArticleListItem,
    cancel::CancellationToken,
    config::UiConfig,
    error::ServiceError,
    modal::{ModalResult, NewArticle},
    notify::{Notification, Notifier},
    services::{ArticleService, AuthService, Navigator, SessionExit},
    session::SettingsResult,
};

/// Toast shown after a delete.
pub const MSG_DELETED: &str = "Successfully deleted article";
/// Toast shown after a publish from the list.
pub const MSG_PUBLISHED: &str = "Successfully published article";
/// Toast shown after the settings dialog saved something.
pub const MSG_SETTINGS_SAVED: &str = "Settings updated";

/// What the dashboard renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    /// The author's articles, newest first as served.
    pub articles: Vec<ArticleListItem>,
    /// A list fetch is in flight.
    pub loading: bool,
}

struct Shared {
    articles: Rc<dyn ArticleService>,
    session: SessionExit,
    notifier: Rc<dyn Notifier>,
    config: UiConfig,
    token: CancellationToken,
    state: RefCell<DashboardState>,
    observer: RefCell<Option<Rc<dyn Fn()>>>,
}

impl Shared {
    fn update(&self, f: impl FnOnce(&mut DashboardState)) {
        f(&mut self.state.borrow_mut());
        if self.token.is_cancelled() {
            return;
        }
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            observer();
        }
    }

    fn notify(&self, notification: Notification) {
        if !self.token.is_cancelled() {
            self.notifier.notify(notification);
        }
    }

    fn fail(&self, err: &ServiceError, duration_ms: u32) {
        if self.token.is_cancelled() {
            return;
        }
        self.notifier.notify(Notification::error(err.user_message(), duration_ms));
        if err.is_session_failure() {
            warn!("session rejected, logging out");
            self.session.end();
        }
    }
}

/// Controller for one dashboard instance.
#[derive(Clone)]
pub struct ArticleDashboard {
    inner: Rc<Shared>,
}

impl ArticleDashboard {
    /// Empty dashboard.
    pub fn new(
        articles: Rc<dyn ArticleService>,
        auth: Rc<dyn AuthService>,
        navigator: Rc<dyn Navigator>,
        notifier: Rc<dyn Notifier>,
        config: UiConfig,
    ) -> Self {
        Self {
            inner: Rc::new(Shared {
                articles,
                session: SessionExit {
                    auth,
                    navigator,
                },
                notifier,
                config,
                token: CancellationToken::new(),
                state: RefCell::new(DashboardState::default()),
                observer: RefCell::new(None),
            }),
        }
    }

    /// Called after every state change, until teardown.
    pub fn set_observer(&self, observer: Rc<dyn Fn()>) {
        *self.inner.observer.borrow_mut() = Some(observer);
    }

    /// Copy of the current state.
    pub fn state(&self) -> DashboardState {
        self.inner.state.borrow().clone()
    }

    /// Refreshes the list from the backend.
    pub async fn load(&self) {
        let shared = &self.inner;
        shared.update(|state| state.loading = true);
        let articles = shared.articles.clone();
        match shared.token.run(articles.list_articles()).await {
            Some(Ok(list)) => shared.update(|state| {
                state.articles = list;
                state.loading = false;
            }),
            Some(Err(err)) => {
                warn!(error = %err, "failed to list articles");
                shared.update(|state| state.loading = false);
                shared.fail(&err, shared.config.default_toast_ms);
            },
            None => {},
        }
    }

    /// Waits for the create dialog; a confirmed title creates the article
    /// and opens it in the editor.
    pub async fn create(&self, dialog: ModalResult<NewArticle>) {
        let shared = &self.inner;
        let Some(Some(new_article)) = shared.token.run(dialog).await else {
            return;
        };
        let articles = shared.articles.clone();
        match shared.token.run(articles.create_article(&new_article.title)).await {
            Some(Ok(article)) => {
                let id = article.id.clone();
                shared.update(|state| state.articles.insert(0, article.into()));
                shared.session.navigator.open_editor(&id);
            },
            Some(Err(err)) => {
                warn!(error = %err, "failed to create article");
                shared.fail(&err, shared.config.article_toast_ms);
            },
            None => {},
        }
    }

    /// Waits for the delete confirmation and removes the article.
    pub async fn delete(&self, article_id: &str, dialog: ModalResult<bool>) {
        let shared = &self.inner;
        let Some(Some(true)) = shared.token.run(dialog).await else {
            return;
        };
        let articles = shared.articles.clone();
        match shared.token.run(articles.delete_article(article_id)).await {
            Some(Ok(())) => {
                shared.update(|state| state.articles.retain(|article| article.id != article_id));
                shared.notify(Notification::success(MSG_DELETED, shared.config.article_toast_ms));
            },
            Some(Err(err)) => {
                warn!(article_id = %article_id, error = %err, "failed to delete article");
                shared.fail(&err, shared.config.article_toast_ms);
            },
            None => {},
        }
    }

    /// Publishes an article from the list.
    pub async fn publish(&self, article_id: &str) {
        let shared = &self.inner;
        let articles = shared.articles.clone();
        match shared.token.run(articles.publish_article(article_id)).await {
            Some(Ok(())) => {
                shared.update(|state| {
                    if let Some(article) =
                        state.articles.iter_mut().find(|article| article.id == article_id)
                    {
                        article.published = true;
                    }
                });
                shared.notify(Notification::success(MSG_PUBLISHED, shared.config.article_toast_ms));
            },
            Some(Err(err)) => {
                warn!(article_id = %article_id, error = %err, "failed to publish article");
                shared.fail(&err, shared.config.article_toast_ms);
            },
            None => {},
        }
    }

    /// Waits for the settings dialog (which saves on its own) and confirms.
    pub async fn edit_settings(&self, dialog: ModalResult<SettingsResult>) {
        let shared = &self.inner;
        if let Some(Some(result)) = shared.token.run(dialog).await {
            if result.name.is_some() || result.image.is_some() {
                shared.notify(Notification::success(
                    MSG_SETTINGS_SAVED,
                    shared.config.default_toast_ms,
                ));
            }
        }
    }

    /// Cancels pending calls and dialogs.
    pub fn teardown(&self) {
        self.inner.token.cancel();
        self.inner.observer.borrow_mut().take();
    }
}
