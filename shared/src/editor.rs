//! Editor screen controller.
//!
//! Owns the per-screen state (form, body, tag set, suggestions, cover photo,
//! saving flag) and every asynchronous call the screen issues. All calls run
//! under the screen's [`CancellationToken`]; after [`EditorScreen::teardown`]
//! no result is applied and no toast is shown.

use std::{
    cell::RefCell,
    future::Future,
    rc::{Rc, Weak},
};

use futures::task::{LocalSpawn, LocalSpawnExt};
use tracing::{debug, warn};
use url::Url;

use crate::{
    article::{ArticleDraft, CoverPhoto, PendingImage},
    cancel::CancellationToken,
    config::UiConfig,
    error::ServiceError,
    modal::{CropRequest, FormError, ModalResult},
    notify::{Notification, Notifier},
    services::{EditorServices, RichTextSurface},
    supersede::Supersede,
    tags::{TagError, TagSet},
    validate::{validate_cover_file, FileError},
};

/// Toast shown when `save` is called with an invalid form.
pub const MSG_FORM_INVALID: &str = "Form is invalid";
/// Toast shown after a successful save.
pub const MSG_SAVED: &str = "Successfully saved article";
/// Toast shown after a successful publish.
pub const MSG_PUBLISHED: &str = "Successfully published article";
/// Toast shown when publishing an article that was never saved.
pub const MSG_PUBLISH_UNSAVED: &str = "Save the article before publishing";
/// Toast shown for a duplicate tag.
pub const MSG_TAG_EXISTS: &str = "Tag already exists";
/// Toast shown for an unrecognized gist reference.
pub const MSG_BAD_GIST: &str = "Not a valid gist link";

/// Form fields bound to the editor's inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorFormValues {
    /// Title input.
    pub title: String,
    /// Description input.
    pub description: String,
    /// Newly selected or cropped cover, awaiting upload.
    pub cover: Option<PendingImage>,
}

impl EditorFormValues {
    /// Title and description are required.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::Missing("Title"));
        }
        if self.description.trim().is_empty() {
            return Err(FormError::Missing("Description"));
        }
        Ok(())
    }
}

/// Snapshot of everything the editor view renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    /// Id of the article being edited; `None` until the first save of a new
    /// article.
    pub article_id: Option<String>,
    /// Bound form fields.
    pub form: EditorFormValues,
    /// Rich-text body as last reported by the surface.
    pub body: String,
    /// Tags attached to the article.
    pub tags: TagSet,
    /// Text typed into the tag input.
    pub tag_input: String,
    /// Suggestions for the latest tag query.
    pub suggestions: Vec<String>,
    /// Source of the cover preview: a stored URL or a data URL.
    pub image: Option<String>,
    /// Cover URL already stored on the server.
    pub stored_cover: Option<String>,
    /// A save is in flight.
    pub saving: bool,
    /// An article load is in flight.
    pub loading: bool,
}

/// How a call to [`EditorScreen::save`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The form was invalid; nothing was sent.
    Invalid,
    /// Another save was already running; nothing was sent.
    InFlight,
    /// The backend accepted the draft.
    Saved,
    /// The backend rejected the draft.
    Failed(ServiceError),
    /// The screen was torn down before the call finished.
    Cancelled,
}

struct Shared {
    services: EditorServices,
    notifier: Rc<dyn Notifier>,
    config: UiConfig,
    token: CancellationToken,
    state: RefCell<EditorState>,
    load_query: Supersede,
    tag_query: Supersede,
    surface: RefCell<Option<Rc<dyn RichTextSurface>>>,
    observer: RefCell<Option<Rc<dyn Fn()>>>,
}

impl Shared {
    fn update<R>(&self, f: impl FnOnce(&mut EditorState) -> R) -> R {
        let out = f(&mut self.state.borrow_mut());
        self.changed();
        out
    }

    fn changed(&self) {
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

    fn success(&self, message: impl Into<String>, duration_ms: u32) {
        self.notify(Notification::success(message, duration_ms));
    }

    fn error(&self, message: impl Into<String>, duration_ms: u32) {
        self.notify(Notification::error(message, duration_ms));
    }

    /// Reports a failed call. A dead session logs the author out instead of
    /// leaving them on a screen whose every call will fail.
    fn fail(&self, err: &ServiceError, duration_ms: u32) {
        if self.token.is_cancelled() {
            return;
        }
        self.error(err.user_message(), duration_ms);
        if err.is_session_failure() {
            warn!("session rejected, logging out");
            self.services.session.end();
        }
    }

    fn surface(&self) -> Option<Rc<dyn RichTextSurface>> {
        self.surface.borrow().clone()
    }
}

/// Holds the saving flag for the duration of one save; dropping it clears the
/// flag on every exit path, including cancellation.
struct SavingGuard {
    shared: Rc<Shared>,
}

impl SavingGuard {
    fn acquire(shared: &Rc<Shared>) -> Option<Self> {
        let acquired = {
            let mut state = shared.state.borrow_mut();
            if state.saving {
                false
            } else {
                state.saving = true;
                true
            }
        };
        if !acquired {
            return None;
        }
        shared.changed();
        Some(Self {
            shared: shared.clone(),
        })
    }
}

impl Drop for SavingGuard {
    fn drop(&mut self) {
        self.shared.state.borrow_mut().saving = false;
        self.shared.changed();
    }
}

/// Controller for one editor screen instance.
#[derive(Clone)]
pub struct EditorScreen {
    inner: Rc<Shared>,
}

impl EditorScreen {
    /// New screen with an empty form.
    pub fn new(services: EditorServices, notifier: Rc<dyn Notifier>, config: UiConfig) -> Self {
        Self {
            inner: Rc::new(Shared {
                services,
                notifier,
                config,
                token: CancellationToken::new(),
                state: RefCell::new(EditorState::default()),
                load_query: Supersede::new(),
                tag_query: Supersede::new(),
                surface: RefCell::new(None),
                observer: RefCell::new(None),
            }),
        }
    }

    /// Called after every state change, until teardown.
    pub fn set_observer(&self, observer: Rc<dyn Fn()>) {
        *self.inner.observer.borrow_mut() = Some(observer);
    }

    /// Copy of the current state.
    pub fn state(&self) -> EditorState {
        self.inner.state.borrow().clone()
    }

    /// Current form values.
    pub fn form_values(&self) -> EditorFormValues {
        self.inner.state.borrow().form.clone()
    }

    /// The screen's cancellation token.
    pub fn token(&self) -> CancellationToken {
        self.inner.token.clone()
    }

    /// Binds the title input.
    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.inner.update(|state| state.form.title = title);
    }

    /// Binds the description input.
    pub fn set_description(&self, description: impl Into<String>) {
        let description = description.into();
        self.inner.update(|state| state.form.description = description);
    }

    /// Fetches the article and fills the form. A newer `load` supersedes an
    /// older one still in flight.
    pub fn load(&self, article_id: &str) -> impl Future<Output = ()> + 'static {
        let shared = self.inner.clone();
        let article_id = article_id.to_string();
        let ticket = shared.load_query.begin();
        shared.update(|state| {
            state.article_id = Some(article_id.clone());
            state.loading = true;
        });
        debug!(article_id = %article_id, "loading article");

        async move {
            let services = shared.services.clone();
            let fetched = shared
                .token
                .run(ticket.run(services.articles.get_article(&article_id)))
                .await
                .flatten();
            let Some(result) = fetched else {
                return;
            };
            match result {
                Ok(article) => {
                    shared.update(|state| {
                        state.form = EditorFormValues {
                            title: article.title,
                            description: article.description,
                            cover: None,
                        };
                        state.body = article.text;
                        state.image = article.cover_photo.clone();
                        state.stored_cover = article.cover_photo;
                        state.tags = TagSet::from_list(article.tags);
                        state.tag_input.clear();
                        state.suggestions.clear();
                        state.loading = false;
                    });
                    if let Some(surface) = shared.surface() {
                        let body = shared.state.borrow().body.clone();
                        surface.set_html(&body);
                    }
                },
                Err(err) => {
                    warn!(article_id = %article_id, error = %err, "failed to load article");
                    shared.update(|state| {
                        let article_id = state.article_id.take();
                        let saving = state.saving;
                        *state = EditorState {
                            article_id,
                            saving,
                            ..EditorState::default()
                        };
                    });
                    shared.fail(&err, shared.config.default_toast_ms);
                },
            }
        }
    }

    /// Convenience for the view: saves the current form with its own
    /// validity.
    pub async fn submit(&self) -> SaveOutcome {
        let values = self.form_values();
        let is_valid = values.validate().is_ok();
        self.save(values, is_valid).await
    }

    /// Creates or updates the article. Invalid forms never reach the network;
    /// a save already in flight makes this a no-op.
    pub async fn save(&self, values: EditorFormValues, is_valid: bool) -> SaveOutcome {
        let shared = &self.inner;
        if !is_valid {
            shared.error(MSG_FORM_INVALID, shared.config.default_toast_ms);
            return SaveOutcome::Invalid;
        }
        let Some(_saving) = SavingGuard::acquire(shared) else {
            debug!("save ignored, another save is in flight");
            return SaveOutcome::InFlight;
        };

        let draft = {
            let state = shared.state.borrow();
            let cover = match values.cover.clone() {
                Some(pending) => Some(CoverPhoto::Pending(pending)),
                None => state.stored_cover.clone().map(CoverPhoto::Stored),
            };
            ArticleDraft {
                id: state.article_id.clone(),
                title: values.title.trim().to_string(),
                description: values.description.trim().to_string(),
                text: shared
                    .surface()
                    .map(|surface| surface.html())
                    .unwrap_or_else(|| state.body.clone()),
                tags: state.tags.to_vec(),
                cover,
            }
        };

        let services = shared.services.clone();
        let Some(result) = shared.token.run(services.articles.save_article(&draft)).await else {
            return SaveOutcome::Cancelled;
        };
        match result {
            Ok(article) => {
                shared.update(|state| {
                    state.article_id = Some(article.id);
                    state.form.cover = None;
                    if article.cover_photo.is_some() {
                        state.stored_cover = article.cover_photo;
                    }
                });
                shared.success(MSG_SAVED, shared.config.article_toast_ms);
                SaveOutcome::Saved
            },
            Err(err) => {
                warn!(error = %err, "failed to save article");
                shared.fail(&err, shared.config.article_toast_ms);
                SaveOutcome::Failed(err)
            },
        }
    }

    /// Publishes the saved article.
    pub async fn publish(&self) {
        let shared = &self.inner;
        let Some(article_id) = shared.state.borrow().article_id.clone() else {
            shared.error(MSG_PUBLISH_UNSAVED, shared.config.default_toast_ms);
            return;
        };
        let services = shared.services.clone();
        match shared.token.run(services.articles.publish_article(&article_id)).await {
            Some(Ok(())) => shared.success(MSG_PUBLISHED, shared.config.article_toast_ms),
            Some(Err(err)) => {
                warn!(article_id = %article_id, error = %err, "failed to publish article");
                shared.fail(&err, shared.config.article_toast_ms);
            },
            None => {},
        }
    }

    /// Adds `candidate`, exactly as given, unless it is already there. Blank
    /// candidates are refused without a toast.
    pub fn add_tag(&self, candidate: &str) -> Result<(), TagError> {
        let shared = &self.inner;
        let candidate = candidate.to_string();
        let inserted = shared.state.borrow_mut().tags.insert(candidate.clone());
        match inserted {
            Ok(()) => {
                shared.tag_query.clear();
                shared.update(|state| {
                    state.tag_input.clear();
                    state.suggestions.clear();
                });
                shared.success(format!("Added the tag: {candidate}"), shared.config.tag_toast_ms);
                Ok(())
            },
            Err(err) => {
                if matches!(err, TagError::Duplicate(_)) {
                    shared.error(MSG_TAG_EXISTS, shared.config.tag_toast_ms);
                }
                Err(err)
            },
        }
    }

    /// A suggestion was picked from the autocomplete list.
    pub fn select_suggestion(&self, tag: &str) -> Result<(), TagError> {
        self.add_tag(tag)
    }

    /// Enter pressed in the tag input: registers the typed tag with the
    /// catalog, then adds it locally.
    pub async fn submit_tag_input(&self) {
        let shared = &self.inner;
        let candidate = shared.state.borrow().tag_input.trim().to_string();
        if candidate.is_empty() {
            return;
        }
        if shared.state.borrow().tags.contains(&candidate) {
            shared.error(MSG_TAG_EXISTS, shared.config.tag_toast_ms);
            return;
        }
        let services = shared.services.clone();
        match shared.token.run(services.tags.add_tag(&candidate)).await {
            Some(Ok(())) => {
                let _ = self.add_tag(&candidate);
            },
            Some(Err(err)) => {
                warn!(tag = %candidate, error = %err, "failed to register tag");
                shared.fail(&err, shared.config.tag_toast_ms);
            },
            None => {},
        }
    }

    /// Removes a tag; absent tags are ignored.
    pub fn remove_tag(&self, tag: &str) {
        self.inner.update(|state| {
            state.tags.remove(tag);
        });
    }

    /// Tag input changed: records the text and queries suggestions. The
    /// returned future only applies its result while it is the latest query.
    pub fn filter_tags(&self, partial_text: &str) -> impl Future<Output = ()> + 'static {
        let shared = self.inner.clone();
        let query = partial_text.trim().to_string();
        let ticket = if query.is_empty() {
            shared.tag_query.clear();
            None
        } else {
            Some(shared.tag_query.begin())
        };
        let input = partial_text.to_string();
        shared.update(|state| {
            state.tag_input = input;
            if query.is_empty() {
                state.suggestions.clear();
            }
        });

        async move {
            let Some(ticket) = ticket else {
                return;
            };
            let services = shared.services.clone();
            let fetched = shared
                .token
                .run(ticket.run(services.tags.filter_tags(&query)))
                .await
                .flatten();
            match fetched {
                Some(Ok(suggestions)) => shared.update(|state| state.suggestions = suggestions),
                Some(Err(err)) => {
                    warn!(query = %query, error = %err, "tag suggestions failed");
                    shared.fail(&err, shared.config.default_toast_ms);
                },
                None => {},
            }
        }
    }

    /// A file was picked in the cover input. `preview_src` is the data URL
    /// the view rendered from it.
    pub fn select_cover_file(&self, file: PendingImage, preview_src: String) -> Result<(), FileError> {
        let shared = &self.inner;
        if let Err(err) =
            validate_cover_file(&file.mime_type, file.bytes.len(), shared.config.max_cover_bytes)
        {
            shared.error(err.to_string(), shared.config.default_toast_ms);
            return Err(err);
        }
        shared.update(|state| {
            state.form.cover = Some(file);
            state.image = Some(preview_src);
        });
        Ok(())
    }

    /// Whether there is an image to open in the preview dialog.
    pub fn can_preview_image(&self) -> bool {
        self.inner.state.borrow().image.is_some()
    }

    /// Seed for the crop dialog: the current image and the cover aspect ratio.
    pub fn cover_preview_request(&self) -> Option<CropRequest> {
        let src = self.inner.state.borrow().image.clone()?;
        Some(CropRequest {
            src,
            aspect_ratio: self.inner.config.cover_aspect_ratio,
        })
    }

    /// Applies the crop dialog's dismissal value. The crop goes through the
    /// same checks as a picked file; a rejected crop keeps the previous cover.
    pub fn apply_cropped_cover(&self, cropped: Option<PendingImage>) -> Result<(), FileError> {
        let shared = &self.inner;
        let Some(image) = cropped else {
            return Ok(());
        };
        if let Err(err) =
            validate_cover_file(&image.mime_type, image.bytes.len(), shared.config.max_cover_bytes)
        {
            shared.error(err.to_string(), shared.config.default_toast_ms);
            return Err(err);
        }
        shared.update(|state| state.form.cover = Some(image));
        Ok(())
    }

    /// Waits for the crop dialog to close and applies its result.
    pub async fn preview_cover(&self, dialog: ModalResult<PendingImage>) {
        if let Some(cropped) = self.inner.token.run(dialog).await {
            if let Err(err) = self.apply_cropped_cover(cropped) {
                debug!(error = %err, "cropped cover rejected");
            }
        }
    }

    /// Best-effort deletion of an image removed from the body.
    pub async fn remove_image(&self, src: &str) {
        remove_image(&self.inner, src.to_string()).await;
    }

    /// Embeds a GitHub gist at the cursor.
    pub async fn insert_gist(&self, reference: &str) {
        let shared = &self.inner;
        let Some(gist_id) = parse_gist_id(reference) else {
            shared.error(MSG_BAD_GIST, shared.config.default_toast_ms);
            return;
        };
        let services = shared.services.clone();
        match shared.token.run(services.gists.fetch_gist(&gist_id)).await {
            Some(Ok(html)) => {
                if let Some(surface) = shared.surface() {
                    surface.insert_html(&html);
                }
            },
            Some(Err(err)) => {
                warn!(gist = %gist_id, error = %err, "failed to fetch gist");
                shared.fail(&err, shared.config.default_toast_ms);
            },
            None => {},
        }
    }

    /// Connects the rich-text surface: registers the content and image
    /// callbacks, then fetches the upload credential and initializes the
    /// surface with it. Image deletions are spawned on `spawner`.
    pub fn attach_surface(
        &self,
        surface: Rc<dyn RichTextSurface>,
        spawner: Rc<dyn LocalSpawn>,
    ) -> impl Future<Output = ()> + 'static {
        let shared = self.inner.clone();
        *shared.surface.borrow_mut() = Some(surface.clone());

        let weak: Weak<Shared> = Rc::downgrade(&shared);
        surface.on_content_changed(Box::new(move |html| {
            if let Some(shared) = weak.upgrade() {
                if !shared.token.is_cancelled() {
                    shared.state.borrow_mut().body = html;
                }
            }
        }));

        let weak: Weak<Shared> = Rc::downgrade(&shared);
        surface.on_image_removed(Box::new(move |src| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            if let Err(err) = spawner.spawn_local(remove_image(&shared, src)) {
                warn!(error = %err, "could not spawn image deletion");
            }
        }));

        async move {
            let services = shared.services.clone();
            match shared.token.run(services.images.upload_credential()).await {
                Some(Ok(credential)) => {
                    surface.configure_uploads(&credential);
                    surface.initialize();
                    let body = shared.state.borrow().body.clone();
                    if !body.is_empty() {
                        surface.set_html(&body);
                    }
                },
                Some(Err(err)) => {
                    warn!(error = %err, "failed to fetch upload credential");
                    shared.fail(&err, shared.config.default_toast_ms);
                },
                None => {},
            }
        }
    }

    /// Cancels every pending call; later completions are discarded.
    pub fn teardown(&self) {
        debug!("editor screen torn down");
        self.inner.token.cancel();
        self.inner.load_query.clear();
        self.inner.tag_query.clear();
        self.inner.surface.borrow_mut().take();
        self.inner.observer.borrow_mut().take();
    }
}

fn remove_image(shared: &Rc<Shared>, src: String) -> impl Future<Output = ()> + 'static {
    let shared = shared.clone();
    async move {
        let services = shared.services.clone();
        if let Some(Err(err)) = shared.token.run(services.images.delete_image(&src)).await {
            warn!(src = %src, error = %err, "failed to delete image");
            shared.fail(&err, shared.config.article_toast_ms);
        }
    }
}

/// Extracts the gist id from a gist URL or a bare hex id.
pub fn parse_gist_id(reference: &str) -> Option<String> {
    let reference = reference.trim();
    let candidate = match Url::parse(reference) {
        Ok(url) => {
            if url.host_str() != Some("gist.github.com") {
                return None;
            }
            let last = url.path_segments()?.filter(|segment| !segment.is_empty()).last()?;
            last.trim_end_matches(".js").to_string()
        },
        Err(_) => reference.to_string(),
    };
    let valid = !candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_hexdigit());
    valid.then_some(candidate)
}
