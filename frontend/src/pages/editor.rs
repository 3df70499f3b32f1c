use std::rc::Rc;

use lighthouse_shared::{
    editor::EditorScreen,
    modal::CropRequest,
    services::{EditorServices, SessionExit},
    PendingImage,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::use_navigator;

use crate::{
    api::ApiClient,
    components::{
        loading_spinner::LoadingSpinner, tag_input::TagInput, toast::use_notifier,
    },
    config,
    froala::FroalaSurface,
    hooks::{use_modal, use_screen, use_scroll_to_top},
    i18n::current::editor as t,
    modals::{gist::GistModal, image_preview::ImagePreviewModal},
    router::RouteNavigator,
    utils::{data_url, log_error, picked_file, read_file, WasmSpawner},
};

#[derive(Properties, PartialEq)]
pub struct EditorPageProps {
    /// Article to edit; a new article when absent.
    #[prop_or_default]
    pub id: Option<String>,
}

#[function_component(EditorPage)]
pub fn editor_page(props: &EditorPageProps) -> Html {
    use_scroll_to_top();
    let notifier = use_notifier();
    let navigator = use_navigator();
    let screen = use_screen(move || {
        EditorScreen::new(
            EditorServices {
                articles: Rc::new(ApiClient),
                images: Rc::new(ApiClient),
                tags: Rc::new(ApiClient),
                gists: Rc::new(ApiClient),
                session: SessionExit {
                    auth: Rc::new(ApiClient),
                    navigator: Rc::new(RouteNavigator::new(navigator)),
                },
            },
            notifier,
            config::ui_config(),
        )
    });
    let crop_modal = use_modal::<PendingImage>();
    let gist_modal = use_modal::<String>();
    let crop_request = use_state(|| None::<CropRequest>);
    let surface_ref = use_node_ref();

    {
        let screen = screen.clone();
        use_effect_with(props.id.clone(), move |id| {
            if let Some(id) = id.as_deref() {
                spawn_local(screen.load(id));
            }
            || ()
        });
    }

    {
        let screen = screen.clone();
        let surface_ref = surface_ref.clone();
        let gist_modal = gist_modal.clone();
        use_effect_with((), move |_| {
            match surface_ref.cast::<HtmlElement>() {
                Some(element) => {
                    let on_gist: Rc<dyn Fn()> = {
                        let screen = screen.clone();
                        Rc::new(move || {
                            let dialog = gist_modal.open();
                            let screen = screen.clone();
                            spawn_local(async move {
                                if let Some(reference) = dialog.await {
                                    screen.insert_gist(&reference).await;
                                }
                            });
                        })
                    };
                    let surface = FroalaSurface::new(element, on_gist);
                    spawn_local(screen.attach_surface(surface, Rc::new(WasmSpawner)));
                },
                None => web_sys::console::error_1(&"Editor container is missing".into()),
            }
            || ()
        });
    }

    let state = screen.state();

    let on_title = {
        let screen = screen.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                screen.set_title(input.value());
            }
        })
    };

    let on_description = {
        let screen = screen.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlTextAreaElement>() {
                screen.set_description(input.value());
            }
        })
    };

    let on_cover = {
        let screen = screen.clone();
        Callback::from(move |event: Event| {
            let Some(file) = picked_file(&event) else {
                return;
            };
            let screen = screen.clone();
            spawn_local(async move {
                match read_file(&file).await {
                    Ok(image) => {
                        let preview = data_url(&image);
                        // Refusals are already reported as a toast.
                        let _ = screen.select_cover_file(image, preview);
                    },
                    Err(err) => web_sys::console::error_2(&"Failed to read file".into(), &err),
                }
            });
        })
    };

    let on_preview = {
        let screen = screen.clone();
        let crop_modal = crop_modal.clone();
        let crop_request = crop_request.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(request) = screen.cover_preview_request() else {
                return;
            };
            crop_request.set(Some(request));
            let dialog = crop_modal.open();
            let screen = screen.clone();
            spawn_local(async move { screen.preview_cover(dialog).await });
        })
    };

    let on_tag_input = {
        let screen = screen.clone();
        Callback::from(move |text: String| spawn_local(screen.filter_tags(&text)))
    };

    let on_tag_enter = {
        let screen = screen.clone();
        Callback::from(move |_: ()| {
            let screen = screen.clone();
            spawn_local(async move { screen.submit_tag_input().await });
        })
    };

    let on_tag_select = {
        let screen = screen.clone();
        Callback::from(move |tag: String| {
            if let Err(err) = screen.select_suggestion(&tag) {
                log_error("Tag not added", err);
            }
        })
    };

    let on_tag_remove = {
        let screen = screen.clone();
        Callback::from(move |tag: String| screen.remove_tag(&tag))
    };

    let on_submit = {
        let screen = screen.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let screen = screen.clone();
            spawn_local(async move {
                screen.submit().await;
            });
        })
    };

    let on_publish = {
        let screen = screen.clone();
        Callback::from(move |_: MouseEvent| {
            let screen = screen.clone();
            spawn_local(async move { screen.publish().await });
        })
    };

    let cover_src = state.form.cover.as_ref().map(data_url).or_else(|| state.image.clone());
    let field = classes!(
        "w-full", "border", "border-[var(--border)]", "rounded-lg", "px-3", "py-2",
        "bg-[var(--surface)]", "text-[var(--text)]", "focus:outline-none",
        "focus:border-[var(--primary)]"
    );
    let label = classes!("block", "text-sm", "font-medium", "mb-1", "mt-4");

    html! {
        <main class={classes!("max-w-4xl", "mx-auto", "px-4", "py-8")}>
            if state.loading {
                <LoadingSpinner overlay={true} caption={t::LOADING_ARTICLE} />
            }
            <h1 class={classes!("text-2xl", "font-semibold", "mb-4")}>
                { if props.id.is_some() { t::PAGE_TITLE_EDIT } else { t::PAGE_TITLE_NEW } }
            </h1>
            <form onsubmit={on_submit}>
                <label class={label.clone()} for="editor-title">{ t::TITLE_LABEL }</label>
                <input
                    id="editor-title"
                    type="text"
                    class={field.clone()}
                    value={state.form.title.clone()}
                    oninput={on_title}
                />

                <label class={label.clone()} for="editor-description">{ t::DESCRIPTION_LABEL }</label>
                <textarea
                    id="editor-description"
                    rows="3"
                    class={field}
                    value={state.form.description.clone()}
                    oninput={on_description}
                />

                <label class={label.clone()} for="editor-cover">{ t::COVER_LABEL }</label>
                <div class={classes!("flex", "flex-wrap", "items-center", "gap-3")}>
                    if let Some(src) = cover_src {
                        <img
                            src={src}
                            alt={t::COVER_ALT}
                            class={classes!("h-24", "aspect-video", "object-cover", "rounded-lg")}
                        />
                    }
                    <input id="editor-cover" type="file" accept="image/*" onchange={on_cover} />
                    <button
                        type="button"
                        class={classes!("px-3", "h-9", "rounded-lg", "border", "border-[var(--border)]", "disabled:opacity-40")}
                        disabled={!screen.can_preview_image()}
                        onclick={on_preview}
                    >
                        { t::PREVIEW_COVER }
                    </button>
                </div>

                <label class={label}>{ t::TAGS_LABEL }</label>
                <TagInput
                    tags={state.tags.to_vec()}
                    input={state.tag_input.clone()}
                    suggestions={state.suggestions.clone()}
                    on_input={on_tag_input}
                    on_enter={on_tag_enter}
                    on_select={on_tag_select}
                    on_remove={on_tag_remove}
                />

                <div ref={surface_ref} class={classes!("froala-surface", "mt-6")} />

                <div class={classes!("flex", "justify-end", "gap-2", "mt-6")}>
                    <button
                        type="button"
                        class={classes!("px-4", "h-10", "rounded-lg", "border", "border-[var(--border)]")}
                        onclick={on_publish}
                    >
                        { t::PUBLISH }
                    </button>
                    <button
                        type="submit"
                        disabled={state.saving}
                        class={classes!(
                            "px-4", "h-10", "rounded-lg", "bg-[var(--primary)]", "text-white",
                            "font-medium", "disabled:opacity-50"
                        )}
                    >
                        { if state.saving { t::SAVING } else { t::SAVE } }
                    </button>
                </div>
            </form>

            if crop_modal.is_open() {
                if let Some(request) = (*crop_request).clone() {
                    <ImagePreviewModal request={request} on_close={crop_modal.on_close()} />
                }
            }
            if gist_modal.is_open() {
                <GistModal on_close={gist_modal.on_close()} />
            }
        </main>
    }
}
