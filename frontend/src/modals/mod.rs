//! Dialog views. Each one reports through an `on_close` callback carrying
//! its dismissal value; `None` means dismissed.

pub mod create;
pub mod delete;
pub mod gist;
pub mod image_preview;
pub mod login;
pub mod register;
pub mod settings;

use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Keeps a text field's state in sync with its `<input>`.
fn bind_text(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |event: InputEvent| {
        if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
            state.set(input.value());
        }
    })
}

fn field_classes() -> Classes {
    classes!(
        "w-full", "border", "border-[var(--border)]", "rounded-lg", "px-3", "h-10",
        "bg-[var(--surface)]", "text-[var(--text)]", "focus:outline-none",
        "focus:border-[var(--primary)]"
    )
}

fn label_classes() -> Classes {
    classes!("block", "text-sm", "font-medium", "mb-1", "mt-3")
}
