use std::{cell::RefCell, rc::Rc};

use lighthouse_shared::{
    dashboard::ArticleDashboard,
    editor::EditorScreen,
    modal::{modal, ModalCloser, ModalResult},
    nav::NavBar,
};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{ScrollBehavior, ScrollToOptions};
use yew::prelude::*;
use yew_router::prelude::use_location;

/// A screen controller the view re-renders from.
pub trait Screen: Clone + 'static {
    fn set_observer(&self, observer: Rc<dyn Fn()>);
    fn teardown(&self);
}

impl Screen for EditorScreen {
    fn set_observer(&self, observer: Rc<dyn Fn()>) {
        EditorScreen::set_observer(self, observer);
    }

    fn teardown(&self) {
        EditorScreen::teardown(self);
    }
}

impl Screen for NavBar {
    fn set_observer(&self, observer: Rc<dyn Fn()>) {
        NavBar::set_observer(self, observer);
    }

    fn teardown(&self) {
        NavBar::teardown(self);
    }
}

impl Screen for ArticleDashboard {
    fn set_observer(&self, observer: Rc<dyn Fn()>) {
        ArticleDashboard::set_observer(self, observer);
    }

    fn teardown(&self) {
        ArticleDashboard::teardown(self);
    }
}

/// Creates a controller once per component instance, re-renders on every
/// state change it reports, and tears it down on unmount.
///
/// Effects declared after this hook see the observer already attached.
#[hook]
pub fn use_screen<S, F>(init: F) -> S
where
    S: Screen,
    F: FnOnce() -> S,
{
    let screen = use_mut_ref(|| None::<S>);
    let created = {
        let mut slot = screen.borrow_mut();
        slot.get_or_insert_with(init).clone()
    };
    let update = use_force_update();

    {
        let screen = created.clone();
        use_effect_with((), move |_| {
            screen.set_observer(Rc::new(move || update.force_update()));
            move || screen.teardown()
        });
    }

    created
}

/// Opener side of a modal dialog rendered by the same component.
///
/// [`open`](Self::open) shows the dialog and hands back the future the
/// controller awaits; the dialog reports through [`on_close`](Self::on_close).
pub struct UseModalHandle<T> {
    closer: Rc<RefCell<Option<ModalCloser<T>>>>,
    open: UseStateHandle<bool>,
}

impl<T> Clone for UseModalHandle<T> {
    fn clone(&self) -> Self {
        Self {
            closer: self.closer.clone(),
            open: self.open.clone(),
        }
    }
}

impl<T: 'static> UseModalHandle<T> {
    pub fn is_open(&self) -> bool {
        *self.open
    }

    /// Shows the dialog. A dialog still open from an earlier call is
    /// dismissed first.
    pub fn open(&self) -> ModalResult<T> {
        let (closer, result) = modal();
        if let Some(previous) = self.closer.borrow_mut().replace(closer) {
            previous.dismiss();
        }
        self.open.set(true);
        result
    }

    pub fn close(&self, value: Option<T>) {
        if let Some(closer) = self.closer.borrow_mut().take() {
            closer.close(value);
        }
        self.open.set(false);
    }

    pub fn on_close(&self) -> Callback<Option<T>> {
        let handle = self.clone();
        Callback::from(move |value| handle.close(value))
    }
}

#[hook]
pub fn use_modal<T: 'static>() -> UseModalHandle<T> {
    let closer = use_mut_ref(|| None);
    let open = use_state(|| false);
    UseModalHandle {
        closer,
        open,
    }
}

/// Reports the viewport width on mount and on every `resize`.
#[hook]
pub fn use_viewport_width(on_resize: Callback<u32>) {
    use_effect_with((), move |_| {
        let listener = web_sys::window().map(|window| {
            let report = {
                let window = window.clone();
                move || {
                    let width = window
                        .inner_width()
                        .ok()
                        .and_then(|value| value.as_f64())
                        .unwrap_or_default();
                    on_resize.emit(width.max(0.0) as u32);
                }
            };
            report();
            let closure = Closure::wrap(Box::new(report) as Box<dyn Fn()>);
            if window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
                .is_err()
            {
                web_sys::console::warn_1(&"Failed to watch viewport size".into());
            }
            (window, closure)
        });

        move || {
            if let Some((window, closure)) = listener {
                let _ = window.remove_event_listener_with_callback(
                    "resize",
                    closure.as_ref().unchecked_ref(),
                );
            }
        }
    });
}

/// Automatically scroll the viewport to the top whenever the current route
/// changes.
#[hook]
pub fn use_scroll_to_top() {
    let location = use_location();

    use_effect_with(location, move |location| {
        if location.is_some() {
            scroll_window_to_top();
        }

        || ()
    });
}

fn scroll_window_to_top() {
    if let Some(window) = web_sys::window() {
        let options = ScrollToOptions::new();
        options.set_left(0.0);
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}
