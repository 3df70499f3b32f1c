use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::i18n::{current::editor as t, fill_one};

#[derive(Properties, PartialEq)]
pub struct TagInputProps {
    pub tags: Vec<String>,
    pub input: String,
    pub suggestions: Vec<String>,
    pub on_input: Callback<String>,
    pub on_enter: Callback<()>,
    pub on_select: Callback<String>,
    pub on_remove: Callback<String>,
}

/// Tag chips plus a text input with an autocomplete list.
#[function_component(TagInput)]
pub fn tag_input(props: &TagInputProps) -> Html {
    let on_input = {
        let on_input = props.on_input.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(target) = event.target_dyn_into::<HtmlInputElement>() {
                on_input.emit(target.value());
            }
        })
    };

    let on_keydown = {
        let on_enter = props.on_enter.clone();
        Callback::from(move |event: KeyboardEvent| {
            if event.key() == "Enter" {
                event.prevent_default();
                on_enter.emit(());
            }
        })
    };

    html! {
        <div class={classes!("tag-input", "relative")}>
            <div class={classes!("flex", "flex-wrap", "gap-2", "mb-2")}>
                { for props.tags.iter().map(|tag| {
                    let on_remove = props.on_remove.clone();
                    let name = tag.clone();
                    html! {
                        <span class={classes!(
                            "inline-flex", "items-center", "gap-1", "rounded-full", "px-3", "py-1",
                            "text-sm", "bg-[var(--surface-alt)]", "border", "border-[var(--border)]"
                        )}>
                            { tag.clone() }
                            <button
                                type="button"
                                class={classes!("ml-1", "text-[var(--muted)]", "hover:text-red-600")}
                                aria-label={fill_one(t::REMOVE_TAG_ARIA_TEMPLATE, tag)}
                                onclick={Callback::from(move |_: MouseEvent| on_remove.emit(name.clone()))}
                            >
                                {"×"}
                            </button>
                        </span>
                    }
                }) }
            </div>
            <input
                type="text"
                value={props.input.clone()}
                placeholder={t::TAG_PLACEHOLDER}
                oninput={on_input}
                onkeydown={on_keydown}
                autocomplete="off"
                class={classes!(
                    "w-full", "border", "border-[var(--border)]", "rounded-lg", "px-3", "h-10",
                    "bg-[var(--surface)]", "focus:outline-none", "focus:border-[var(--primary)]"
                )}
            />
            if !props.suggestions.is_empty() {
                <ul
                    class={classes!(
                        "absolute", "z-20", "mt-1", "w-full", "max-h-56", "overflow-y-auto",
                        "rounded-lg", "border", "border-[var(--border)]", "bg-[var(--surface)]",
                        "shadow-[var(--shadow-8)]"
                    )}
                    role="listbox"
                >
                    { for props.suggestions.iter().map(|suggestion| {
                        let on_select = props.on_select.clone();
                        let name = suggestion.clone();
                        html! {
                            <li
                                role="option"
                                class={classes!("px-3", "py-2", "cursor-pointer", "hover:bg-[var(--surface-alt)]")}
                                onclick={Callback::from(move |_: MouseEvent| on_select.emit(name.clone()))}
                            >
                                { suggestion.clone() }
                            </li>
                        }
                    }) }
                </ul>
            }
        </div>
    }
}
