//! Browser side of the text overlay

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlInputElement};

use super::{label_style, name_input_style, name_max_length};
use crate::error::BootError;
use crate::platform::Viewport;
use crate::sim::Label;

const LAYER_ID: &str = "ui-layer";
const NAME_INPUT_ID: &str = "player-name-input";

/// Pool of label elements reused frame to frame
pub struct TextLayer {
    document: Document,
    root: HtmlElement,
    pool: Vec<HtmlElement>,
    /// Text and style last written to each pooled element
    written: Vec<(String, String)>,
    visible: usize,
}

impl TextLayer {
    pub fn attach(document: &Document) -> Result<Self, BootError> {
        let root = document
            .get_element_by_id(LAYER_ID)
            .ok_or(BootError::MissingElement(LAYER_ID))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| BootError::WrongElementType(LAYER_ID))?;
        Ok(Self {
            document: document.clone(),
            root,
            pool: Vec::new(),
            written: Vec::new(),
            visible: 0,
        })
    }

    /// Place the layer over the game area
    pub fn fit(&self, viewport: &Viewport) {
        let size = viewport.size();
        let style = self.root.style();
        let _ = style.set_property("left", &format!("{}px", viewport.offset.x));
        let _ = style.set_property("top", &format!("{}px", viewport.offset.y));
        let _ = style.set_property("width", &format!("{}px", size.x));
        let _ = style.set_property("height", &format!("{}px", size.y));
    }

    fn element(&mut self, index: usize) -> Option<HtmlElement> {
        while self.pool.len() <= index {
            let el = self
                .document
                .create_element("div")
                .ok()?
                .dyn_into::<HtmlElement>()
                .ok()?;
            let _ = el.set_attribute("class", "ui-label");
            self.root.append_child(&el).ok()?;
            self.pool.push(el);
            self.written.push((String::new(), String::new()));
        }
        Some(self.pool[index].clone())
    }

    /// Show exactly `labels`, touching the DOM only where something changed
    pub fn sync(&mut self, labels: &[Label], viewport: &Viewport) {
        for (i, label) in labels.iter().enumerate() {
            let Some(el) = self.element(i) else {
                log::warn!("Failed to create label element");
                return;
            };
            let style = label_style(label, viewport);
            let (text, css) = &mut self.written[i];
            if *text != label.text {
                el.set_text_content(Some(&label.text));
                *text = label.text.clone();
            }
            if *css != style {
                let _ = el.set_attribute("style", &style);
                *css = style;
            }
        }
        for i in labels.len()..self.visible.min(self.pool.len()) {
            let _ = self.pool[i].set_attribute("style", "display:none");
            self.written[i].1 = String::from("display:none");
        }
        self.visible = labels.len();
    }
}

/// The player-name text field shown by the settings overlay
#[derive(Default)]
pub struct NameInput {
    input: Option<HtmlInputElement>,
    center: glam::Vec2,
    width: f32,
}

impl NameInput {
    pub fn show(&mut self, document: &Document, value: &str, center: glam::Vec2, width: f32, viewport: &Viewport) {
        self.hide();
        let Some(root) = document.get_element_by_id(LAYER_ID) else {
            log::warn!("Missing #{LAYER_ID}");
            return;
        };
        let input = match document
            .create_element("input")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            Some(input) => input,
            None => {
                log::warn!("Failed to create name input");
                return;
            }
        };
        input.set_id(NAME_INPUT_ID);
        input.set_type("text");
        input.set_value(value);
        let _ = input.set_attribute("maxlength", &name_max_length());
        let _ = input.set_attribute("autocomplete", "off");
        let _ = input.set_attribute("style", &name_input_style(center, width, viewport));
        if root.append_child(&input).is_err() {
            return;
        }
        let _ = input.focus();
        self.center = center;
        self.width = width;
        self.input = Some(input);
    }

    pub fn hide(&mut self) {
        if let Some(input) = self.input.take() {
            input.remove();
        }
    }

    /// Current field contents, while the field exists
    pub fn value(&self) -> Option<String> {
        self.input.as_ref().map(|i| i.value())
    }

    pub fn is_focused(&self, document: &Document) -> bool {
        match (&self.input, document.active_element()) {
            (Some(input), Some(active)) => active.id() == input.id(),
            _ => false,
        }
    }

    /// Keep the field aligned after a resize
    pub fn fit(&self, viewport: &Viewport) {
        if let Some(input) = &self.input {
            let _ = input.set_attribute("style", &name_input_style(self.center, self.width, viewport));
        }
    }
}
