use std::rc::Rc;

use lighthouse_shared::{Notification, NotificationLevel, Notifier};
use yew::prelude::*;
use yew_hooks::prelude::use_timeout;

use crate::i18n::current::toast as t;

#[derive(Debug, Clone, PartialEq)]
struct ToastEntry {
    id: u32,
    notification: Notification,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastState {
    entries: Vec<ToastEntry>,
    next_id: u32,
}

pub enum ToastAction {
    Push(Notification),
    Dismiss(u32),
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(notification) => {
                next.entries.push(ToastEntry {
                    id: next.next_id,
                    notification,
                });
                next.next_id = next.next_id.wrapping_add(1);
            },
            ToastAction::Dismiss(id) => next.entries.retain(|entry| entry.id != id),
        }
        Rc::new(next)
    }
}

pub type ToastContext = UseReducerHandle<ToastState>;

/// Notifier the controllers push toasts through. Outside a
/// [`ToastProvider`] toasts only reach the console.
#[hook]
pub fn use_notifier() -> Rc<dyn Notifier> {
    let context = use_context::<ToastContext>();
    Rc::new(move |notification: Notification| match context.as_ref() {
        Some(context) => context.dispatch(ToastAction::Push(notification)),
        None => web_sys::console::warn_1(&notification.message.as_str().into()),
    })
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Html,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let state = use_reducer(ToastState::default);

    let on_dismiss = {
        let state = state.clone();
        Callback::from(move |id: u32| state.dispatch(ToastAction::Dismiss(id)))
    };

    html! {
        <ContextProvider<ToastContext> context={state.clone()}>
            {props.children.clone()}
            <div
                class={classes!(
                    "fixed", "bottom-6", "left-1/2", "-translate-x-1/2", "z-[200]",
                    "flex", "flex-col", "items-center", "gap-2", "w-[min(92vw,32rem)]"
                )}
                role="region"
                aria-label={t::REGION_ARIA}
            >
                { for state.entries.iter().map(|entry| html! {
                    <Toast
                        key={entry.id}
                        id={entry.id}
                        notification={entry.notification.clone()}
                        on_dismiss={on_dismiss.clone()}
                    />
                }) }
            </div>
        </ContextProvider<ToastContext>>
    }
}

#[derive(Properties, PartialEq)]
struct ToastProps {
    id: u32,
    notification: Notification,
    on_dismiss: Callback<u32>,
}

#[function_component(Toast)]
fn toast(props: &ToastProps) -> Html {
    let dismiss = {
        let on_dismiss = props.on_dismiss.clone();
        let id = props.id;
        Callback::from(move |_| on_dismiss.emit(id))
    };

    {
        let dismiss = dismiss.clone();
        use_timeout(move || dismiss.emit(()), props.notification.duration_ms);
    }

    let (tone, icon) = match props.notification.level {
        NotificationLevel::Success => (
            classes!("bg-emerald-600", "text-white"),
            "fa-circle-check",
        ),
        NotificationLevel::Error => (classes!("bg-red-600", "text-white"), "fa-triangle-exclamation"),
    };

    html! {
        <div
            class={classes!(
                "toast", "flex", "items-center", "gap-3", "w-full", "rounded-xl",
                "px-4", "py-3", "text-sm", "shadow-xl", tone
            )}
            role={if props.notification.level == NotificationLevel::Error { "alert" } else { "status" }}
        >
            <i class={classes!("fas", icon)} aria-hidden="true"></i>
            <p class="flex-1">{ props.notification.message.clone() }</p>
            <button
                type="button"
                class={classes!(
                    "inline-flex", "h-7", "w-7", "items-center", "justify-center",
                    "rounded-full", "hover:bg-black/15"
                )}
                aria-label={t::DISMISS_ARIA}
                onclick={dismiss.reform(|_: MouseEvent| ())}
            >
                {"×"}
            </button>
        </div>
    }
}
