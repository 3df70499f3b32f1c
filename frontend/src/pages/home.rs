use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{hooks::use_scroll_to_top, i18n::current::home as t, router::Route, session};

#[function_component(HomePage)]
pub fn home_page() -> Html {
    use_scroll_to_top();
    let signed_in = session::has_live_token();

    html! {
        <main class={classes!("max-w-3xl", "mx-auto", "px-4", "py-16", "text-center")}>
            <h1 class={classes!("text-4xl", "font-bold", "mb-4")}>{ t::TITLE }</h1>
            <p class={classes!("text-lg", "text-[var(--muted)]", "mb-8")}>{ t::TAGLINE }</p>
            if signed_in {
                <Link<Route>
                    to={Route::Articles}
                    classes={classes!(
                        "inline-flex", "items-center", "gap-2", "px-5", "h-11", "rounded-lg",
                        "bg-[var(--primary)]", "text-white", "font-medium", "hover:opacity-90"
                    )}
                >
                    <i class="fas fa-file-lines" aria-hidden="true"></i>
                    { t::GO_TO_ARTICLES }
                </Link<Route>>
            } else {
                <p class={classes!("text-sm", "text-[var(--muted)]")}>{ t::SIGNED_OUT_HINT }</p>
            }
        </main>
    }
}
