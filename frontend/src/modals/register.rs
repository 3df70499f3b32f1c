use lighthouse_shared::modal::RegisterForm;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{bind_text, field_classes, label_classes};
use crate::{
    api::ApiClient,
    components::modal_frame::{FormErrorLine, ModalActions, ModalFrame},
    i18n::current::register_modal as t,
};

#[derive(Properties, PartialEq)]
pub struct RegisterModalProps {
    /// Display name of the new account.
    pub on_close: Callback<Option<String>>,
}

#[function_component(RegisterModal)]
pub fn register_modal(props: &RegisterModalProps) -> Html {
    let name = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let on_submit = {
        let name = name.clone();
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let busy = busy.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *busy {
                return;
            }
            let form = RegisterForm {
                name: (*name).clone(),
                email: (*email).clone(),
                password: (*password).clone(),
            };
            busy.set(true);
            error.set(None);
            let error = error.clone();
            let busy = busy.clone();
            let on_close = on_close.clone();
            spawn_local(async move {
                match form.submit(&ApiClient).await {
                    Ok(name) => on_close.emit(Some(name)),
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
                <label class={label_classes()} for="register-name">{ t::NAME }</label>
                <input
                    id="register-name"
                    type="text"
                    class={field_classes()}
                    value={(*name).clone()}
                    oninput={bind_text(&name)}
                />
                <label class={label_classes()} for="register-email">{ t::EMAIL }</label>
                <input
                    id="register-email"
                    type="email"
                    autocomplete="username"
                    class={field_classes()}
                    value={(*email).clone()}
                    oninput={bind_text(&email)}
                />
                <label class={label_classes()} for="register-password">{ t::PASSWORD }</label>
                <input
                    id="register-password"
                    type="password"
                    autocomplete="new-password"
                    class={field_classes()}
                    value={(*password).clone()}
                    oninput={bind_text(&password)}
                />
                <FormErrorLine message={(*error).clone()} />
                <ModalActions submit_label={t::SUBMIT} busy={*busy} on_cancel={on_dismiss} />
            </form>
        </ModalFrame>
    }
}
