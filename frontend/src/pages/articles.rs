use std::rc::Rc;

use lighthouse_shared::{
    dashboard::ArticleDashboard, modal::NewArticle, session::SettingsResult, ArticleListItem,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    api::ApiClient,
    components::{
        loading_spinner::{LoadingSpinner, SpinnerSize},
        toast::use_notifier,
    },
    config,
    hooks::{use_modal, use_screen, use_scroll_to_top},
    i18n::current::dashboard as t,
    modals::{create::CreateArticleModal, delete::DeleteArticleModal, settings::SettingsModal},
    router::{Route, RouteNavigator},
};

#[function_component(ArticlesPage)]
pub fn articles_page() -> Html {
    use_scroll_to_top();
    let notifier = use_notifier();
    let navigator = use_navigator();
    let dashboard = use_screen(move || {
        ArticleDashboard::new(
            Rc::new(ApiClient),
            Rc::new(ApiClient),
            Rc::new(RouteNavigator::new(navigator)),
            notifier,
            config::ui_config(),
        )
    });
    let create_modal = use_modal::<NewArticle>();
    let delete_modal = use_modal::<bool>();
    let settings_modal = use_modal::<SettingsResult>();
    let delete_target = use_state(|| None::<ArticleListItem>);

    {
        let dashboard = dashboard.clone();
        use_effect_with((), move |_| {
            spawn_local(async move { dashboard.load().await });
            || ()
        });
    }

    let on_create = {
        let dashboard = dashboard.clone();
        let create_modal = create_modal.clone();
        Callback::from(move |_: MouseEvent| {
            let dialog = create_modal.open();
            let dashboard = dashboard.clone();
            spawn_local(async move { dashboard.create(dialog).await });
        })
    };

    let on_settings = {
        let dashboard = dashboard.clone();
        let settings_modal = settings_modal.clone();
        Callback::from(move |_: MouseEvent| {
            let dialog = settings_modal.open();
            let dashboard = dashboard.clone();
            spawn_local(async move { dashboard.edit_settings(dialog).await });
        })
    };

    let on_delete = {
        let dashboard = dashboard.clone();
        let delete_modal = delete_modal.clone();
        let delete_target = delete_target.clone();
        Callback::from(move |article: ArticleListItem| {
            let article_id = article.id.clone();
            delete_target.set(Some(article));
            let dialog = delete_modal.open();
            let dashboard = dashboard.clone();
            spawn_local(async move { dashboard.delete(&article_id, dialog).await });
        })
    };

    let on_publish = {
        let dashboard = dashboard.clone();
        Callback::from(move |article_id: String| {
            let dashboard = dashboard.clone();
            spawn_local(async move { dashboard.publish(&article_id).await });
        })
    };

    let state = dashboard.state();

    let body = if state.loading && state.articles.is_empty() {
        html! { <LoadingSpinner size={SpinnerSize::Large} /> }
    } else if state.articles.is_empty() {
        html! { <p class={classes!("py-12", "text-center", "text-[var(--muted)]")}>{ t::EMPTY }</p> }
    } else {
        html! {
            <ul class={classes!("grid", "gap-4", "sm:grid-cols-2")}>
                { for state.articles.iter().map(|article| html! {
                    <ArticleRow
                        key={article.id.clone()}
                        article={article.clone()}
                        on_delete={on_delete.clone()}
                        on_publish={on_publish.clone()}
                    />
                }) }
            </ul>
        }
    };

    html! {
        <main class={classes!("max-w-5xl", "mx-auto", "px-4", "py-8")}>
            <div class={classes!("flex", "flex-wrap", "items-center", "gap-3", "mb-6")}>
                <h1 class={classes!("text-2xl", "font-semibold", "mr-auto")}>{ t::TITLE }</h1>
                <button
                    type="button"
                    class={classes!("px-4", "h-10", "rounded-lg", "border", "border-[var(--border)]")}
                    onclick={on_settings}
                >
                    <i class="fas fa-gear mr-2" aria-hidden="true"></i>
                    { t::SETTINGS }
                </button>
                <button
                    type="button"
                    class={classes!(
                        "px-4", "h-10", "rounded-lg", "bg-[var(--primary)]", "text-white",
                        "font-medium", "hover:opacity-90"
                    )}
                    onclick={on_create}
                >
                    <i class="fas fa-plus mr-2" aria-hidden="true"></i>
                    { t::NEW_ARTICLE }
                </button>
            </div>
            { body }

            if create_modal.is_open() {
                <CreateArticleModal on_close={create_modal.on_close()} />
            }
            if delete_modal.is_open() {
                <DeleteArticleModal
                    article_title={(*delete_target).as_ref().map(|a| a.title.clone()).unwrap_or_default()}
                    on_close={delete_modal.on_close()}
                />
            }
            if settings_modal.is_open() {
                <SettingsModal on_close={settings_modal.on_close()} />
            }
        </main>
    }
}

#[derive(Properties, PartialEq)]
struct ArticleRowProps {
    article: ArticleListItem,
    on_delete: Callback<ArticleListItem>,
    on_publish: Callback<String>,
}

#[function_component(ArticleRow)]
fn article_row(props: &ArticleRowProps) -> Html {
    let article = &props.article;
    let on_delete = {
        let article = article.clone();
        props.on_delete.reform(move |_: MouseEvent| article.clone())
    };
    let on_publish = {
        let id = article.id.clone();
        props.on_publish.reform(move |_: MouseEvent| id.clone())
    };
    let action = classes!(
        "px-3", "h-9", "rounded-lg", "text-sm", "border", "border-[var(--border)]",
        "hover:bg-[var(--surface-alt)]"
    );

    html! {
        <li class={classes!(
            "flex", "flex-col", "rounded-xl", "overflow-hidden", "border",
            "border-[var(--border)]", "bg-[var(--surface)]"
        )}>
            if let Some(cover) = article.cover_photo.as_ref() {
                <img
                    src={cover.clone()}
                    alt={t::COVER_ALT}
                    class={classes!("w-full", "aspect-video", "object-cover")}
                    loading="lazy"
                />
            }
            <div class={classes!("flex", "flex-col", "gap-2", "p-4", "flex-1")}>
                <div class={classes!("flex", "items-center", "gap-2")}>
                    <h2 class={classes!("font-semibold", "text-lg", "mr-auto")}>{ article.title.clone() }</h2>
                    <span class={classes!(
                        "text-xs", "rounded-full", "px-2", "py-0.5",
                        if article.published { "bg-emerald-100 text-emerald-800" } else { "bg-amber-100 text-amber-800" }
                    )}>
                        { if article.published { t::PUBLISHED } else { t::DRAFT } }
                    </span>
                </div>
                <p class={classes!("text-sm", "text-[var(--muted)]", "flex-1")}>{ article.description.clone() }</p>
                <div class={classes!("flex", "gap-2", "mt-2")}>
                    <Link<Route> to={Route::Editor { id: article.id.clone() }} classes={classes!(action.clone(), "inline-flex", "items-center")}>
                        { t::EDIT }
                    </Link<Route>>
                    if !article.published {
                        <button type="button" class={action.clone()} onclick={on_publish}>{ t::PUBLISH }</button>
                    }
                    <button
                        type="button"
                        class={classes!(action, "text-red-600")}
                        onclick={on_delete}
                    >
                        { t::DELETE }
                    </button>
                </div>
            </div>
        </li>
    }
}
