//! Navigation bar controller: session-aware identity display and the mobile
//! drawer.

use std::{cell::RefCell, future::Future, rc::Rc};

use futures::future::join;
use tracing::{debug, warn};

use crate::{
    cancel::CancellationToken,
    config::UiConfig,
    modal::ModalResult,
    notify::{Notification, Notifier},
    services::{AuthService, AuthorService, Navigator},
    session::{LoginResult, SettingsResult},
};

/// Mobile drawer state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Drawer {
    /// Hidden.
    #[default]
    Closed,
    /// Shown over the page.
    Open,
}

/// Inputs of the drawer state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerEvent {
    /// Hamburger button.
    Toggle,
    /// Login, register or settings was invoked.
    ModalOpened,
    /// Viewport width changed to the given CSS pixels.
    Resized(u32),
    /// The session ended.
    LoggedOut,
}

impl Drawer {
    /// Transition for `event`; `breakpoint` is the widest mobile viewport.
    pub fn next(self, event: DrawerEvent, breakpoint: u32) -> Drawer {
        match (self, event) {
            (Drawer::Closed, DrawerEvent::Toggle) => Drawer::Open,
            (Drawer::Open, DrawerEvent::Toggle) => Drawer::Closed,
            (_, DrawerEvent::ModalOpened | DrawerEvent::LoggedOut) => Drawer::Closed,
            (Drawer::Open, DrawerEvent::Resized(width)) if width > breakpoint => Drawer::Closed,
            (state, DrawerEvent::Resized(_)) => state,
        }
    }

    /// Whether the drawer is shown.
    pub fn is_open(self) -> bool {
        self == Drawer::Open
    }
}

/// What the nav bar renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    /// Drawer state.
    pub drawer: Drawer,
    /// Display name of the signed-in author.
    pub name: Option<String>,
    /// Avatar URL of the signed-in author.
    pub avatar: Option<String>,
}

/// Collaborators of the nav bar.
#[derive(Clone)]
pub struct NavServices {
    /// Session owner.
    pub auth: Rc<dyn AuthService>,
    /// Profile lookups.
    pub author: Rc<dyn AuthorService>,
    /// Route changes.
    pub navigator: Rc<dyn Navigator>,
}

struct Shared {
    services: NavServices,
    notifier: Rc<dyn Notifier>,
    config: UiConfig,
    token: CancellationToken,
    state: RefCell<NavState>,
    observer: RefCell<Option<Rc<dyn Fn()>>>,
}

impl Shared {
    fn update(&self, f: impl FnOnce(&mut NavState)) {
        f(&mut self.state.borrow_mut());
        if self.token.is_cancelled() {
            return;
        }
        let observer = self.observer.borrow().clone();
        if let Some(observer) = observer {
            observer();
        }
    }

    fn drawer(&self, event: DrawerEvent) {
        let breakpoint = self.config.mobile_breakpoint_px;
        let current = self.state.borrow().drawer;
        let next = current.next(event, breakpoint);
        if next != current {
            self.update(|state| state.drawer = next);
        }
    }
}

/// Controller for one nav bar instance.
#[derive(Clone)]
pub struct NavBar {
    inner: Rc<Shared>,
}

impl NavBar {
    /// New nav bar with the drawer closed and no identity shown.
    pub fn new(services: NavServices, notifier: Rc<dyn Notifier>, config: UiConfig) -> Self {
        Self {
            inner: Rc::new(Shared {
                services,
                notifier,
                config,
                token: CancellationToken::new(),
                state: RefCell::new(NavState::default()),
                observer: RefCell::new(None),
            }),
        }
    }

    /// Called after every state change, until teardown.
    pub fn set_observer(&self, observer: Rc<dyn Fn()>) {
        *self.inner.observer.borrow_mut() = Some(observer);
    }

    /// Copy of the current state.
    pub fn state(&self) -> NavState {
        self.inner.state.borrow().clone()
    }

    /// Synchronous session check for menu rendering.
    pub fn is_logged_in(&self) -> bool {
        self.inner.services.auth.is_authenticated()
    }

    /// Verifies the session; a valid one loads name and avatar, an invalid
    /// one forces logout.
    pub async fn init(&self) {
        let shared = &self.inner;
        let services = shared.services.clone();
        match shared.token.run(services.auth.check_token()).await {
            Some(Ok(())) => {},
            Some(Err(err)) => {
                debug!(error = %err, "session check rejected, logging out");
                self.logout();
                return;
            },
            None => return,
        }

        let lookups = join(services.author.display_name(), services.author.profile_picture());
        let Some((name, avatar)) = shared.token.run(lookups).await else {
            return;
        };
        match (name, avatar) {
            (Ok(name), Ok(avatar)) => shared.update(|state| {
                state.name = Some(name);
                state.avatar = Some(avatar);
            }),
            (name, avatar) => {
                if let Ok(name) = name {
                    shared.update(|state| state.name = Some(name));
                }
                if let Ok(avatar) = avatar {
                    shared.update(|state| state.avatar = Some(avatar));
                }
                warn!("failed to load author profile");
                shared.notifier.notify(Notification::error(
                    "Could not load your profile",
                    shared.config.default_toast_ms,
                ));
            },
        }
    }

    /// Hamburger button.
    pub fn toggle_drawer(&self) {
        self.inner.drawer(DrawerEvent::Toggle);
    }

    /// Viewport resized to `width` CSS pixels.
    pub fn resize(&self, width: u32) {
        self.inner.drawer(DrawerEvent::Resized(width));
    }

    /// Opens the login dialog: closes the drawer now, adopts the returned
    /// identity when the dialog closes with one.
    pub fn login(&self, dialog: ModalResult<LoginResult>) -> impl Future<Output = ()> + 'static {
        let shared = self.inner.clone();
        shared.drawer(DrawerEvent::ModalOpened);
        async move {
            if let Some(Some(result)) = shared.token.run(dialog).await {
                let avatar =
                    result.avatar.unwrap_or_else(|| shared.config.default_profile_picture.clone());
                shared.update(|state| {
                    state.name = Some(result.name);
                    state.avatar = Some(avatar);
                });
            }
        }
    }

    /// Opens the registration dialog; a returned name is shown with the
    /// default avatar.
    pub fn register(&self, dialog: ModalResult<String>) -> impl Future<Output = ()> + 'static {
        let shared = self.inner.clone();
        shared.drawer(DrawerEvent::ModalOpened);
        async move {
            let Some(Some(name)) = shared.token.run(dialog).await else {
                return;
            };
            if name.is_empty() {
                return;
            }
            let avatar = shared.config.default_profile_picture.clone();
            shared.update(|state| {
                state.name = Some(name);
                state.avatar = Some(avatar);
            });
        }
    }

    /// Opens the settings dialog; only the fields present in the result are
    /// merged.
    pub fn edit_settings(
        &self,
        dialog: ModalResult<SettingsResult>,
    ) -> impl Future<Output = ()> + 'static {
        let shared = self.inner.clone();
        shared.drawer(DrawerEvent::ModalOpened);
        async move {
            let Some(Some(result)) = shared.token.run(dialog).await else {
                return;
            };
            shared.update(|state| {
                if let Some(name) = result.name.filter(|name| !name.is_empty()) {
                    state.name = Some(name);
                }
                if let Some(image) = result.image.filter(|image| !image.is_empty()) {
                    state.avatar = Some(image);
                }
            });
        }
    }

    /// Ends the session, goes home and closes the drawer.
    pub fn logout(&self) {
        let shared = &self.inner;
        shared.services.auth.logout();
        shared.services.navigator.go_home();
        shared.update(|state| {
            state.name = None;
            state.avatar = None;
        });
        shared.drawer(DrawerEvent::LoggedOut);
    }

    /// Cancels pending lookups and dialogs.
    pub fn teardown(&self) {
        self.inner.token.cancel();
        self.inner.observer.borrow_mut().take();
    }
}
