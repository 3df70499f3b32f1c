use std::rc::Rc;

use lighthouse_shared::{
    modal::{CropRequest, ImagePreview},
    PendingImage,
};
use web_sys::{HtmlImageElement, HtmlInputElement};
use yew::prelude::*;

use crate::{
    components::modal_frame::{FormErrorLine, ModalActions, ModalFrame},
    i18n::current::image_preview_modal as t,
    utils::crop_to_png,
};

#[derive(Debug, Clone, PartialEq)]
struct PreviewModel {
    preview: ImagePreview,
    natural_size: Option<(f64, f64)>,
    scale: f64,
}

enum PreviewAction {
    Loaded(f64, f64),
    Move(f64, f64),
    Scale(f64),
}

impl Reducible for PreviewModel {
    type Action = PreviewAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            PreviewAction::Loaded(width, height) => {
                next.preview.image_loaded(width, height);
                next.natural_size = Some((width, height));
                next.scale = 1.0;
            },
            PreviewAction::Move(dx, dy) => next.preview.move_by(dx, dy),
            PreviewAction::Scale(scale) => {
                next.preview.set_scale(scale);
                next.scale = scale;
            },
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
pub struct ImagePreviewModalProps {
    pub request: CropRequest,
    /// The cropped PNG.
    pub on_close: Callback<Option<PendingImage>>,
}

/// Shows the cover with a draggable, zoomable crop frame locked to the
/// requested aspect ratio.
#[function_component(ImagePreviewModal)]
pub fn image_preview_modal(props: &ImagePreviewModalProps) -> Html {
    let model = {
        let request = props.request.clone();
        use_reducer(move || PreviewModel {
            preview: ImagePreview::new(request),
            natural_size: None,
            scale: 1.0,
        })
    };
    let image_ref = use_node_ref();
    let drag_origin = use_mut_ref(|| None::<(i32, i32)>);
    let error = use_state(|| None::<String>);

    let on_load = {
        let model = model.clone();
        let image_ref = image_ref.clone();
        Callback::from(move |_: Event| {
            if let Some(image) = image_ref.cast::<HtmlImageElement>() {
                model.dispatch(PreviewAction::Loaded(
                    f64::from(image.natural_width()),
                    f64::from(image.natural_height()),
                ));
            }
        })
    };

    let on_drag_start = {
        let drag_origin = drag_origin.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            *drag_origin.borrow_mut() = Some((event.client_x(), event.client_y()));
        })
    };

    let on_drag = {
        let drag_origin = drag_origin.clone();
        let model = model.clone();
        let image_ref = image_ref.clone();
        Callback::from(move |event: MouseEvent| {
            let Some((x, y)) = *drag_origin.borrow() else {
                return;
            };
            let Some(image) = image_ref.cast::<HtmlImageElement>() else {
                return;
            };
            let shown = f64::from(image.client_width().max(1));
            let ratio = f64::from(image.natural_width()) / shown;
            let dx = f64::from(event.client_x() - x) * ratio;
            let dy = f64::from(event.client_y() - y) * ratio;
            *drag_origin.borrow_mut() = Some((event.client_x(), event.client_y()));
            model.dispatch(PreviewAction::Move(dx, dy));
        })
    };

    let on_drag_end = {
        let drag_origin = drag_origin.clone();
        Callback::from(move |_: MouseEvent| {
            drag_origin.borrow_mut().take();
        })
    };

    let on_zoom = {
        let model = model.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                if let Ok(percent) = input.value().parse::<f64>() {
                    model.dispatch(PreviewAction::Scale(percent / 100.0));
                }
            }
        })
    };

    let on_submit = {
        let model = model.clone();
        let image_ref = image_ref.clone();
        let error = error.clone();
        let on_close = props.on_close.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let rect = match model.preview.confirm() {
                Ok(rect) => rect,
                Err(err) => {
                    error.set(Some(err.to_string()));
                    return;
                },
            };
            let Some(image) = image_ref.cast::<HtmlImageElement>() else {
                return;
            };
            match crop_to_png(&image, rect) {
                Ok(cropped) => on_close.emit(Some(cropped)),
                Err(err) => {
                    web_sys::console::error_2(&"Failed to crop image".into(), &err);
                    error.set(Some(lighthouse_shared::error::GENERIC_FAILURE.to_string()));
                },
            }
        })
    };
    let on_dismiss = props.on_close.reform(|_: ()| None);

    let frame = match (model.preview.selection(), model.natural_size) {
        (Some(rect), Some((width, height))) if width > 0.0 && height > 0.0 => {
            let style = format!(
                "left:{:.4}%;top:{:.4}%;width:{:.4}%;height:{:.4}%;",
                rect.x / width * 100.0,
                rect.y / height * 100.0,
                rect.width / width * 100.0,
                rect.height / height * 100.0,
            );
            html! {
                <div
                    class={classes!(
                        "absolute", "cursor-move", "border-2", "border-dashed", "border-white",
                        "shadow-[0_0_0_9999px_rgba(0,0,0,0.45)]"
                    )}
                    style={style}
                    onmousedown={on_drag_start}
                />
            }
        },
        _ => Html::default(),
    };

    html! {
        <ModalFrame title={t::TITLE} on_dismiss={on_dismiss.clone()}>
            <form onsubmit={on_submit}>
                <div
                    class={classes!("relative", "overflow-hidden", "rounded-lg", "select-none")}
                    onmousemove={on_drag}
                    onmouseup={on_drag_end.clone()}
                    onmouseleave={on_drag_end}
                >
                    <img
                        ref={image_ref}
                        src={model.preview.src().to_string()}
                        alt={t::IMAGE_ALT}
                        crossorigin="anonymous"
                        class={classes!("block", "w-full", "h-auto")}
                        onload={on_load}
                        draggable="false"
                    />
                    { frame }
                </div>
                <label class={classes!("flex", "items-center", "gap-3", "mt-4", "text-sm")}>
                    { t::ZOOM }
                    <input
                        type="range"
                        min="10"
                        max="100"
                        step="1"
                        class="flex-1"
                        value={format!("{:.0}", model.scale * 100.0)}
                        oninput={on_zoom}
                    />
                </label>
                <FormErrorLine message={(*error).clone()} />
                <ModalActions submit_label={t::SUBMIT} on_cancel={on_dismiss} />
            </form>
        </ModalFrame>
    }
}
