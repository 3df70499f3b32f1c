use lighthouse_shared::{modal::LoginForm, session::LoginResult};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::{bind_text, field_classes, label_classes};
use crate::{
    api::ApiClient,
    components::modal_frame::{FormErrorLine, ModalActions, ModalFrame},
    i18n::current::login_modal as t,
};

#[derive(Properties, PartialEq)]
pub struct LoginModalProps {
    pub on_close: Callback<Option<LoginResult>>,
}

/// Signs in on submit; stays open with the reason when the backend refuses.
#[function_component(LoginModal)]
pub fn login_modal(props: &LoginModalProps) -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let on_submit = {
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
            let form = LoginForm {
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
                <label class={label_classes()} for="login-email">{ t::EMAIL }</label>
                <input
                    id="login-email"
                    type="email"
                    autocomplete="username"
                    class={field_classes()}
                    value={(*email).clone()}
                    oninput={bind_text(&email)}
                />
                <label class={label_classes()} for="login-password">{ t::PASSWORD }</label>
                <input
                    id="login-password"
                    type="password"
                    autocomplete="current-password"
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
