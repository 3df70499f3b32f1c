use yew::prelude::*;
use yew_router::prelude::Link;

use crate::{i18n::current::not_found_page as t, router::Route};

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <main class={classes!("max-w-3xl", "mx-auto", "px-4", "py-16", "text-center")}>
            <h2 class={classes!("text-2xl", "font-semibold", "mb-2")}>{ t::TITLE }</h2>
            <p class={classes!("mb-6")}>{ t::BODY }</p>
            <Link<Route> to={Route::Home} classes="text-[var(--primary)] underline">
                { t::BACK_HOME }
            </Link<Route>>
        </main>
    }
}
