use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::task::{LocalFutureObj, LocalSpawn, SpawnError};
use lighthouse_shared::{crop::CropRect, PendingImage};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};
use yew::TargetCast;

/// Runs controller-spawned futures on the browser's microtask queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct WasmSpawner;

impl LocalSpawn for WasmSpawner {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        wasm_bindgen_futures::spawn_local(future);
        Ok(())
    }
}

/// Reads a picked file into memory.
pub async fn read_file(file: &web_sys::File) -> Result<PendingImage, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    Ok(PendingImage {
        file_name: file.name(),
        mime_type: file.type_(),
        bytes: js_sys::Uint8Array::new(&buffer).to_vec(),
    })
}

/// `data:` URL for previewing an image that is not uploaded yet.
pub fn data_url(image: &PendingImage) -> String {
    format!("data:{};base64,{}", image.mime_type, STANDARD.encode(&image.bytes))
}

/// Draws `rect` of a loaded image onto a canvas and returns it as PNG.
///
/// Fails for cross-origin images served without CORS headers (tainted
/// canvas).
pub fn crop_to_png(image: &HtmlImageElement, rect: CropRect) -> Result<PendingImage, JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("document unavailable"))?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(JsValue::from)?;
    canvas.set_width(rect.width.round() as u32);
    canvas.set_height(rect.height.round() as u32);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into()
        .map_err(JsValue::from)?;
    context.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
        image,
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        0.0,
        0.0,
        rect.width,
        rect.height,
    )?;

    let url = canvas.to_data_url_with_type("image/png")?;
    let encoded = url.split_once(',').map(|(_, data)| data).unwrap_or_default();
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| JsValue::from_str(&format!("Decode error: {}", e)))?;
    Ok(PendingImage {
        file_name: "cover.png".to_string(),
        mime_type: "image/png".to_string(),
        bytes,
    })
}

/// First file of an `<input type="file">` change event.
pub fn picked_file(event: &web_sys::Event) -> Option<web_sys::File> {
    event
        .target_dyn_into::<web_sys::HtmlInputElement>()
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
}

pub fn log_error(context: &str, err: impl std::fmt::Display) {
    web_sys::console::error_1(&format!("{}: {}", context, err).into());
}
