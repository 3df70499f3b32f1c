use lighthouse_shared::{
    config::MAX_COVER_BYTES, modal::SettingsForm, session::SettingsResult,
    validate::validate_cover_file, PendingImage,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{bind_text, field_classes, label_classes};
use crate::{
    api::ApiClient,
    components::modal_frame::{FormErrorLine, ModalActions, ModalFrame},
    i18n::current::settings_modal as t,
    utils::{data_url, picked_file, read_file},
};

#[derive(Properties, PartialEq)]
pub struct SettingsModalProps {
    /// What the backend actually changed.
    pub on_close: Callback<Option<SettingsResult>>,
}

/// Saves on its own; openers only react to the result.
#[function_component(SettingsModal)]
pub fn settings_modal(props: &SettingsModalProps) -> Html {
    let name = use_state(String::new);
    let avatar = use_state(|| None::<PendingImage>);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let on_avatar = {
        let avatar = avatar.clone();
        let error = error.clone();
        Callback::from(move |event: Event| {
            let Some(file) = picked_file(&event) else {
                return;
            };
            let avatar = avatar.clone();
            let error = error.clone();
            spawn_local(async move {
                match read_file(&file).await {
                    Ok(image) => {
                        match validate_cover_file(&image.mime_type, image.bytes.len(), MAX_COVER_BYTES)
                        {
                            Ok(()) => {
                                error.set(None);
                                avatar.set(Some(image));
                            },
                            Err(err) => error.set(Some(err.to_string())),
                        }
                    },
                    Err(err) => {
                        web_sys::console::error_2(&"Failed to read file".into(), &err);
                    },
                }
            });
        })
    };

    let on_submit = {
        let name = name.clone();
        let avatar = avatar.clone();
        let error = error.clone();
        let busy = busy.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *busy {
                return;
            }
            let form = SettingsForm {
                name: (*name).clone(),
                avatar: (*avatar).clone(),
            };
            busy.set(true);
            error.set(None);
            let error = error.clone();
            let busy = busy.clone();
            let on_close = on_close.clone();
            spawn_local(async move {
                match form.submit(&ApiClient).await {
                    Ok(result) => on_close.emit(Some(result)),
                    Err(err) => {
                        busy.set(false);
                        error.set(Some(err.user_message()));
                    },
                }
            });
        })
    };
    let on_dismiss = props.on_close.reform(|_: ()| None);

    html! {
        <ModalFrame title={t::TITLE} on_dismiss={on_dismiss.clone()}>
            <form onsubmit={on_submit}>
                <label class={label_classes()} for="settings-name">{ t::NAME }</label>
                <input
                    id="settings-name"
                    type="text"
                    class={field_classes()}
                    placeholder={t::NAME_PLACEHOLDER}
                    value={(*name).clone()}
                    oninput={bind_text(&name)}
                />
                <label class={label_classes()} for="settings-avatar">{ t::AVATAR }</label>
                <div class={classes!("flex", "items-center", "gap-3")}>
                    if let Some(image) = (*avatar).as_ref() {
                        <img
                            src={data_url(image)}
                            alt={t::AVATAR}
                            class={classes!("h-12", "w-12", "rounded-full", "object-cover")}
                        />
                    }
                    <input id="settings-avatar" type="file" accept="image/*" onchange={on_avatar} />
                </div>
                <FormErrorLine message={(*error).clone()} />
                <ModalActions submit_label={t::SUBMIT} busy={*busy} on_cancel={on_dismiss} />
            </form>
        </ModalFrame>
    }
}
