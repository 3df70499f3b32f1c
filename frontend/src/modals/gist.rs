use yew::prelude::*;

use super::{bind_text, field_classes, label_classes};
use crate::{
    components::modal_frame::{ModalActions, ModalFrame},
    i18n::current::gist_modal as t,
};

#[derive(Properties, PartialEq)]
pub struct GistModalProps {
    /// The typed gist link; the editor validates it.
    pub on_close: Callback<Option<String>>,
}

#[function_component(GistModal)]
pub fn gist_modal(props: &GistModalProps) -> Html {
    let reference = use_state(String::new);

    let on_submit = {
        let reference = reference.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            on_close.emit(Some((*reference).clone()));
        })
    };
    let on_dismiss = props.on_close.reform(|_: ()| None);

    html! {
        <ModalFrame title={t::TITLE} on_dismiss={on_dismiss.clone()}>
            <form onsubmit={on_submit}>
                <label class={label_classes()} for="gist-link">{ t::LINK_LABEL }</label>
                <input
                    id="gist-link"
                    type="text"
                    class={field_classes()}
                    placeholder={t::LINK_PLACEHOLDER}
                    value={(*reference).clone()}
                    oninput={bind_text(&reference)}
                />
                <ModalActions submit_label={t::SUBMIT} on_cancel={on_dismiss} />
            </form>
        </ModalFrame>
    }
}
