use yew::prelude::*;

use crate::i18n::current::{common, loading_spinner as t};

/// Ring diameter in pixels.
#[derive(Clone, Copy, PartialEq)]
pub enum SpinnerSize {
    Medium,
    Large,
}

impl SpinnerSize {
    fn px(self) -> u32 {
        match self {
            SpinnerSize::Medium => 40,
            SpinnerSize::Large => 56,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct LoadingSpinnerProps {
    #[prop_or(SpinnerSize::Medium)]
    pub size: SpinnerSize,
    /// Covers the page and blocks input underneath, e.g. while an article loads.
    #[prop_or_default]
    pub overlay: bool,
    /// Visible caption under the ring; screen readers always get one.
    #[prop_or_default]
    pub caption: Option<AttrValue>,
}

#[function_component(LoadingSpinner)]
pub fn loading_spinner(props: &LoadingSpinnerProps) -> Html {
    let px = props.size.px();
    let ring = html! {
        <svg
            width={px.to_string()}
            height={px.to_string()}
            viewBox="0 0 24 24"
            class={classes!("animate-spin", "text-[var(--primary)]")}
            aria-hidden="true"
        >
            <circle cx="12" cy="12" r="10" fill="none" stroke="currentColor" stroke-opacity="0.2" stroke-width="3" />
            <path d="M22 12a10 10 0 0 0-10-10" fill="none" stroke="currentColor" stroke-width="3" stroke-linecap="round" />
        </svg>
    };
    let caption = match &props.caption {
        Some(text) => html! {
            <span class={classes!("text-sm", "text-[var(--muted)]")}>{ text.clone() }</span>
        },
        None => html! { <span class={classes!("sr-only")}>{ common::LOADING }</span> },
    };
    let body = html! {
        <div
            class={classes!("flex", "flex-col", "items-center", "justify-center", "gap-3", "p-6")}
            role="status"
            aria-live="polite"
            aria-label={t::ARIA_LABEL}
        >
            { ring }
            { caption }
        </div>
    };

    if !props.overlay {
        return body;
    }
    html! {
        <div class={classes!(
            "fixed", "inset-0", "z-40", "grid", "place-items-center",
            "bg-[var(--surface)]/70", "backdrop-blur-sm"
        )}>
            { body }
        </div>
    }
}
