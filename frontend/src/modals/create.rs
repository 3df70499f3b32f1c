use lighthouse_shared::modal::{CreateArticleForm, NewArticle};
use yew::prelude::*;

use super::{bind_text, field_classes, label_classes};
use crate::{
    components::modal_frame::{FormErrorLine, ModalActions, ModalFrame},
    i18n::current::create_modal as t,
};

#[derive(Properties, PartialEq)]
pub struct CreateArticleModalProps {
    pub on_close: Callback<Option<NewArticle>>,
}

#[function_component(CreateArticleModal)]
pub fn create_article_modal(props: &CreateArticleModalProps) -> Html {
    let title = use_state(String::new);
    let error = use_state(|| None::<String>);

    let on_submit = {
        let title = title.clone();
        let error = error.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let form = CreateArticleForm {
                title: (*title).clone(),
            };
            match form.validate() {
                Ok(article) => on_close.emit(Some(article)),
                Err(err) => error.set(Some(err.to_string())),
            }
        })
    };
    let on_dismiss = props.on_close.reform(|_: ()| None);

    html! {
        <ModalFrame title={t::TITLE} on_dismiss={on_dismiss.clone()}>
            <form onsubmit={on_submit}>
                <label class={label_classes()} for="create-title">{ t::TITLE_LABEL }</label>
                <input
                    id="create-title"
                    type="text"
                    class={field_classes()}
                    value={(*title).clone()}
                    oninput={bind_text(&title)}
                />
                <FormErrorLine message={(*error).clone()} />
                <ModalActions submit_label={t::SUBMIT} on_cancel={on_dismiss} />
            </form>
        </ModalFrame>
    }
}
