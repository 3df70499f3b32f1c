use lighthouse_shared::modal::DeleteArticleForm;
use yew::prelude::*;

use super::{bind_text, field_classes};
use crate::{
    components::modal_frame::{FormErrorLine, ModalActions, ModalFrame},
    i18n::{current::delete_modal as t, fill_one},
};

#[derive(Properties, PartialEq)]
pub struct DeleteArticleModalProps {
    pub article_title: String,
    /// `Some(true)` once the author confirmed.
    pub on_close: Callback<Option<bool>>,
}

#[function_component(DeleteArticleModal)]
pub fn delete_article_modal(props: &DeleteArticleModalProps) -> Html {
    let confirmation = use_state(String::new);
    let error = use_state(|| None::<String>);

    let on_submit = {
        let confirmation = confirmation.clone();
        let error = error.clone();
        let article_title = props.article_title.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let form = DeleteArticleForm {
                article_title: article_title.clone(),
                confirmation: (*confirmation).clone(),
            };
            match form.validate() {
                Ok(confirmed) => on_close.emit(Some(confirmed)),
                Err(err) => error.set(Some(err.to_string())),
            }
        })
    };
    let on_dismiss = props.on_close.reform(|_: ()| None);

    html! {
        <ModalFrame title={t::TITLE} on_dismiss={on_dismiss.clone()}>
            <form onsubmit={on_submit}>
                <p class={classes!("text-sm", "mb-3")}>
                    { fill_one(t::PROMPT_TEMPLATE, &props.article_title) }
                </p>
                <input
                    type="text"
                    class={field_classes()}
                    value={(*confirmation).clone()}
                    oninput={bind_text(&confirmation)}
                />
                <FormErrorLine message={(*error).clone()} />
                <ModalActions submit_label={t::SUBMIT} danger={true} on_cancel={on_dismiss} />
            </form>
        </ModalFrame>
    }
}
