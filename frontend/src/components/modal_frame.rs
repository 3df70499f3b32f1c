use yew::prelude::*;

use crate::i18n::current::common;

#[derive(Properties, PartialEq)]
pub struct ModalFrameProps {
    pub title: AttrValue,
    /// Backdrop click, Escape and the close button.
    pub on_dismiss: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

/// Overlay, panel and title bar shared by every dialog.
#[function_component(ModalFrame)]
pub fn modal_frame(props: &ModalFrameProps) -> Html {
    let on_backdrop = props.on_dismiss.reform(|_: MouseEvent| ());
    let on_close = props.on_dismiss.reform(|_: MouseEvent| ());
    let on_keydown = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Escape" {
                on_dismiss.emit(());
            }
        })
    };

    html! {
        <div
            class={classes!("fixed", "inset-0", "z-[150]", "flex", "items-center", "justify-center", "p-4")}
            onkeydown={on_keydown}
        >
            <div
                class={classes!("absolute", "inset-0", "bg-[rgba(15,23,42,0.55)]", "backdrop-blur-[6px]")}
                onclick={on_backdrop}
            />
            <section
                class={classes!(
                    "relative", "w-full", "max-w-lg", "max-h-[90vh]", "overflow-y-auto",
                    "rounded-2xl", "border", "border-[var(--border)]", "bg-[var(--surface)]",
                    "text-[var(--text)]", "shadow-[var(--shadow-16)]", "p-6"
                )}
                role="dialog"
                aria-modal="true"
                aria-label={props.title.clone()}
            >
                <header class={classes!("flex", "items-center", "justify-between", "mb-4")}>
                    <h2 class={classes!("text-lg", "font-semibold")}>{ props.title.clone() }</h2>
                    <button
                        type="button"
                        class={classes!(
                            "inline-flex", "h-8", "w-8", "items-center", "justify-center",
                            "rounded-full", "text-lg", "hover:bg-[var(--surface-alt)]"
                        )}
                        aria-label={common::CLOSE_ARIA}
                        onclick={on_close}
                    >
                        {"×"}
                    </button>
                </header>
                { props.children.clone() }
            </section>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ModalActionsProps {
    pub submit_label: AttrValue,
    #[prop_or_default]
    pub busy: bool,
    #[prop_or_default]
    pub danger: bool,
    pub on_cancel: Callback<()>,
}

/// Cancel / submit row at the bottom of a dialog form.
#[function_component(ModalActions)]
pub fn modal_actions(props: &ModalActionsProps) -> Html {
    let submit_tone = if props.danger {
        classes!("bg-red-600", "hover:bg-red-700")
    } else {
        classes!("bg-[var(--primary)]", "hover:opacity-90")
    };

    html! {
        <div class={classes!("flex", "justify-end", "gap-2", "mt-6")}>
            <button
                type="button"
                class={classes!("btn-ghost", "px-4", "h-10", "rounded-lg", "hover:bg-[var(--surface-alt)]")}
                onclick={props.on_cancel.reform(|_: MouseEvent| ())}
            >
                { common::CANCEL }
            </button>
            <button
                type="submit"
                disabled={props.busy}
                class={classes!(
                    "px-4", "h-10", "rounded-lg", "text-white", "font-medium",
                    "disabled:opacity-50", submit_tone
                )}
            >
                { props.submit_label.clone() }
            </button>
        </div>
    }
}

/// Inline error line under a dialog form.
#[derive(Properties, PartialEq)]
pub struct FormErrorProps {
    pub message: Option<String>,
}

#[function_component(FormErrorLine)]
pub fn form_error_line(props: &FormErrorProps) -> Html {
    match &props.message {
        Some(message) => html! {
            <p class={classes!("mt-3", "text-sm", "text-red-600")} role="alert">{ message.clone() }</p>
        },
        None => Html::default(),
    }
}
