//! [`RichTextSurface`] over the Froala editor loaded by `index.html`.

use std::{cell::RefCell, rc::Rc};

use js_sys::{Function, Object, Reflect};
use lighthouse_shared::services::{RichTextSurface, UploadCredential};
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, HtmlElement};

use crate::i18n::current::editor as t;

const TOOLBAR: &[&str] = &[
    "fullscreen", "bold", "italic", "underline", "strikeThrough", "subscript", "superscript",
    "|", "inlineStyle", "paragraphStyle", "|", "paragraphFormat", "align", "formatOL",
    "formatUL", "outdent", "indent", "quote", "-", "insertLink", "insertImage", "insertVideo",
    "insertFile", "insertTable", "|", "emoticons", "specialCharacters", "insertHR", "selectAll",
    "clearFormatting", "|", "print", "spellChecker", "help", "html", "|", "undo", "redo",
    "github",
];

type Slot<T> = Rc<RefCell<Option<T>>>;

fn editor_options() -> serde_json::Value {
    let toolbar = TOOLBAR;
    json!({
        "placeholderText": t::PLACEHOLDER,
        "charCounterCount": true,
        "htmlAllowedTags": [".*"],
        "htmlAllowedAttrs": [".*"],
        "htmlAllowedStyleProps": [".*"],
        "pasteAllowedStyleProps": [".*"],
        "linkAlwaysBlank": true,
        "toolbarSticky": false,
        "keepFormatOnDelete": true,
        "tabSpaces": 2,
        "toolbarButtons": toolbar,
        "toolbarButtonsMD": toolbar,
        "toolbarButtonsSM": toolbar,
        "toolbarButtonsXS": toolbar,
    })
}

fn to_js(value: &serde_json::Value) -> Result<JsValue, JsValue> {
    js_sys::JSON::parse(&value.to_string())
}

fn html_call(editor: &JsValue, method: &str, arg: Option<&str>) -> Result<JsValue, JsValue> {
    let html = Reflect::get(editor, &"html".into())?;
    let function: Function = Reflect::get(&html, &method.into())?.dyn_into()?;
    match arg {
        Some(arg) => function.call1(&html, &arg.into()),
        None => function.call0(&html),
    }
}

/// `src` of the image wrapper Froala passes to `image.removed`.
fn removed_image_src(img: &JsValue) -> Option<String> {
    let element = match img.dyn_ref::<Element>() {
        Some(element) => element.clone(),
        None => Reflect::get(img, &JsValue::from(0)).ok()?.dyn_into::<Element>().ok()?,
    };
    element.get_attribute("src").filter(|src| !src.is_empty())
}

fn report(context: &str, err: &JsValue) {
    web_sys::console::error_2(&context.into(), err);
}

/// One Froala instance bound to a container element.
pub struct FroalaSurface {
    element: HtmlElement,
    options: RefCell<serde_json::Value>,
    editor: Slot<JsValue>,
    pending_html: Rc<RefCell<String>>,
    content_changed: Slot<Box<dyn Fn(String)>>,
    image_removed: Slot<Box<dyn Fn(String)>>,
    on_gist: Rc<dyn Fn()>,
    listeners: RefCell<Vec<Closure<dyn FnMut(JsValue)>>>,
}

impl FroalaSurface {
    /// `on_gist` runs when the toolbar's gist button is clicked.
    pub fn new(element: HtmlElement, on_gist: Rc<dyn Fn()>) -> Rc<Self> {
        Rc::new(Self {
            element,
            options: RefCell::new(editor_options()),
            editor: Rc::new(RefCell::new(None)),
            pending_html: Rc::new(RefCell::new(String::new())),
            content_changed: Rc::new(RefCell::new(None)),
            image_removed: Rc::new(RefCell::new(None)),
            on_gist,
            listeners: RefCell::new(Vec::new()),
        })
    }

    fn constructor() -> Result<Function, JsValue> {
        Reflect::get(&js_sys::global(), &"FroalaEditor".into())?.dyn_into()
    }

    fn register_gist_command(&self, constructor: &Function) -> Result<(), JsValue> {
        let define_icon: Function = Reflect::get(constructor, &"DefineIcon".into())?.dyn_into()?;
        define_icon.call2(
            constructor,
            &"github".into(),
            &to_js(&json!({ "NAME": "github", "template": "font_awesome_5b" }))?,
        )?;

        let on_gist = self.on_gist.clone();
        let callback = Closure::<dyn FnMut(JsValue)>::new(move |_| on_gist());
        let command = to_js(&json!({ "title": t::GIST_COMMAND, "focus": true, "undo": true }))?;
        Reflect::set(&command, &"callback".into(), callback.as_ref().unchecked_ref())?;
        let register: Function = Reflect::get(constructor, &"RegisterCommand".into())?.dyn_into()?;
        register.call2(constructor, &"github".into(), &command)?;
        self.listeners.borrow_mut().push(callback);
        Ok(())
    }

    fn events(&self) -> Result<JsValue, JsValue> {
        let events = Object::new();

        let content_changed = {
            let editor = self.editor.clone();
            let callback = self.content_changed.clone();
            Closure::<dyn FnMut(JsValue)>::new(move |_| {
                let Some(editor) = editor.borrow().clone() else {
                    return;
                };
                if let Some(html) = html_call(&editor, "get", None).ok().and_then(|v| v.as_string()) {
                    if let Some(callback) = callback.borrow().as_ref() {
                        callback(html);
                    }
                }
            })
        };
        Reflect::set(&events, &"contentChanged".into(), content_changed.as_ref().unchecked_ref())?;

        let image_removed = {
            let callback = self.image_removed.clone();
            Closure::<dyn FnMut(JsValue)>::new(move |img: JsValue| {
                let Some(src) = removed_image_src(&img) else {
                    return;
                };
                if let Some(callback) = callback.borrow().as_ref() {
                    callback(src);
                }
            })
        };
        Reflect::set(&events, &"image.removed".into(), image_removed.as_ref().unchecked_ref())?;

        let initialized = {
            let editor = self.editor.clone();
            let pending = self.pending_html.clone();
            Closure::<dyn FnMut(JsValue)>::new(move |_| {
                let html = pending.borrow().clone();
                if let Some(editor) = editor.borrow().as_ref() {
                    if let Err(err) = html_call(editor, "set", Some(&html)) {
                        report("Failed to set editor content", &err);
                    }
                }
            })
        };
        Reflect::set(&events, &"initialized".into(), initialized.as_ref().unchecked_ref())?;

        self.listeners
            .borrow_mut()
            .extend([content_changed, image_removed, initialized]);
        Ok(events.into())
    }

    fn try_initialize(&self) -> Result<(), JsValue> {
        let constructor = Self::constructor()?;
        if let Err(err) = self.register_gist_command(&constructor) {
            report("Failed to register the gist command", &err);
        }
        let options = to_js(&self.options.borrow())?;
        Reflect::set(&options, &"events".into(), &self.events()?)?;
        let args = js_sys::Array::of2(&self.element, &options);
        let editor = Reflect::construct(&constructor, &args)?;
        *self.editor.borrow_mut() = Some(editor);
        Ok(())
    }
}

impl RichTextSurface for FroalaSurface {
    fn set_html(&self, html: &str) {
        *self.pending_html.borrow_mut() = html.to_string();
        if let Some(editor) = self.editor.borrow().as_ref() {
            if let Err(err) = html_call(editor, "set", Some(html)) {
                report("Failed to set editor content", &err);
            }
        }
    }

    fn html(&self) -> String {
        self.editor
            .borrow()
            .as_ref()
            .and_then(|editor| html_call(editor, "get", None).ok())
            .and_then(|value| value.as_string())
            .unwrap_or_else(|| self.pending_html.borrow().clone())
    }

    fn insert_html(&self, html: &str) {
        match self.editor.borrow().as_ref() {
            Some(editor) => {
                if let Err(err) = html_call(editor, "insert", Some(html)) {
                    report("Failed to insert into editor", &err);
                }
            },
            None => self.pending_html.borrow_mut().push_str(html),
        }
    }

    fn configure_uploads(&self, credential: &UploadCredential) {
        if let Some(options) = self.options.borrow_mut().as_object_mut() {
            options.insert("imageUploadToS3".to_string(), credential.clone());
        }
    }

    fn initialize(&self) {
        if self.editor.borrow().is_some() {
            return;
        }
        if let Err(err) = self.try_initialize() {
            report("Failed to initialize the editor", &err);
        }
    }

    fn on_content_changed(&self, callback: Box<dyn Fn(String)>) {
        *self.content_changed.borrow_mut() = Some(callback);
    }

    fn on_image_removed(&self, callback: Box<dyn Fn(String)>) {
        *self.image_removed.borrow_mut() = Some(callback);
    }
}

impl Drop for FroalaSurface {
    fn drop(&mut self) {
        if let Some(editor) = self.editor.borrow_mut().take() {
            if let Ok(destroy) = Reflect::get(&editor, &"destroy".into())
                .and_then(|value| value.dyn_into::<Function>().map_err(JsValue::from))
            {
                let _ = destroy.call0(&editor);
            }
        }
    }
}
