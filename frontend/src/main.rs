//! Browser UI of The Lighthouse: article editor, dashboard and navigation.

mod api;
mod components;
mod config;
mod froala;
mod hooks;
mod i18n;
mod modals;
#[cfg(feature = "mock")]
mod models;
mod pages;
mod router;
mod session;
mod utils;

use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    html! {
        <router::AppRouter />
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
