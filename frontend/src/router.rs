use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    components::{header::Header, toast::ToastProvider},
    pages,
};

#[derive(Routable, Clone, PartialEq, Debug)]
pub enum Route {
    #[cfg(not(feature = "mock"))]
    #[at("/")]
    Home,
    #[cfg(feature = "mock")]
    #[at("/lighthouse/")]
    Home,

    #[cfg(not(feature = "mock"))]
    #[at("/articles")]
    Articles,
    #[cfg(feature = "mock")]
    #[at("/lighthouse/articles")]
    Articles,

    #[cfg(not(feature = "mock"))]
    #[at("/editor")]
    NewArticle,
    #[cfg(feature = "mock")]
    #[at("/lighthouse/editor")]
    NewArticle,

    #[cfg(not(feature = "mock"))]
    #[at("/editor/:id")]
    Editor { id: String },
    #[cfg(feature = "mock")]
    #[at("/lighthouse/editor/:id")]
    Editor { id: String },

    #[not_found]
    #[cfg(not(feature = "mock"))]
    #[at("/404")]
    NotFound,
    #[not_found]
    #[cfg(feature = "mock")]
    #[at("/lighthouse/404")]
    NotFound,
}

/// Route changes requested by the controllers.
pub struct RouteNavigator {
    navigator: Option<Navigator>,
}

impl RouteNavigator {
    pub fn new(navigator: Option<Navigator>) -> Self {
        Self {
            navigator,
        }
    }

    fn push(&self, route: &Route) {
        match &self.navigator {
            Some(navigator) => navigator.push(route),
            None => web_sys::console::warn_1(&"Navigation requested outside the router".into()),
        }
    }
}

impl lighthouse_shared::services::Navigator for RouteNavigator {
    fn go_home(&self) {
        self.push(&Route::Home);
    }

    fn open_editor(&self, article_id: &str) {
        self.push(&Route::Editor {
            id: article_id.to_string(),
        });
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <pages::home::HomePage /> },
        Route::Articles => html! { <pages::articles::ArticlesPage /> },
        Route::NewArticle => html! { <pages::editor::EditorPage /> },
        Route::Editor {
            id,
        } => {
            html! { <pages::editor::EditorPage key={id.clone()} id={Some(id.clone())} /> }
        },
        Route::NotFound => html! { <pages::not_found::NotFoundPage /> },
    }
}

#[function_component(AppRouter)]
pub fn app_router() -> Html {
    html! {
        <BrowserRouter>
            <ToastProvider>
                <div class="flex flex-col bg-[var(--bg)]" style="min-height: 100vh; min-height: 100svh;">
                    <Header />
                    <div class="flex-1 pt-[var(--space-sm)]">
                        <Switch<Route> render={switch} />
                    </div>
                </div>
            </ToastProvider>
        </BrowserRouter>
    }
}
