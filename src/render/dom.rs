//! `web-sys` binding for [`Element`] and [`RenderTarget`].
//!
//! `JsValue` errors from individual mutations are dropped: a class that
//! fails to apply on one element should not abort the widget.

use wasm_bindgen::JsCast;

use super::{Element, RenderTarget};
use crate::error::FolioError;

#[derive(Debug, Clone, PartialEq)]
pub struct DomElement(pub web_sys::Element);

impl DomElement {
    fn html(&self) -> Option<&web_sys::HtmlElement> {
        self.0.dyn_ref::<web_sys::HtmlElement>()
    }
}

fn collect(list: Result<web_sys::NodeList, wasm_bindgen::JsValue>) -> Vec<DomElement> {
    let Ok(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .map(DomElement)
        .collect()
}

impl Element for DomElement {
    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        let _ = self.0.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.0.class_list().remove_1(class);
    }

    fn classes(&self) -> Vec<String> {
        self.0.class_name().split_whitespace().map(str::to_owned).collect()
    }

    fn set_class_name(&self, value: &str) {
        self.0.set_class_name(value);
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attr(&self, name: &str, value: &str) {
        let _ = self.0.set_attribute(name, value);
    }

    fn style(&self, property: &str) -> Option<String> {
        let value = self.html()?.style().get_property_value(property).ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn set_style(&self, property: &str, value: &str) {
        let Some(html) = self.html() else {
            return;
        };
        let style = html.style();
        let _ = if value.is_empty() {
            style.remove_property(property).map(drop)
        } else {
            style.set_property(property, value)
        };
    }

    fn text(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn value(&self) -> String {
        if let Some(input) = self.0.dyn_ref::<web_sys::HtmlInputElement>() {
            input.value()
        } else if let Some(area) = self.0.dyn_ref::<web_sys::HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = self.0.dyn_ref::<web_sys::HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn is_checked(&self) -> bool {
        self.0.dyn_ref::<web_sys::HtmlInputElement>().is_some_and(web_sys::HtmlInputElement::checked)
    }

    fn is_disabled(&self) -> bool {
        // `:disabled` also covers fields inside a disabled fieldset.
        self.0.matches(":disabled").unwrap_or(false)
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(button) = self.0.dyn_ref::<web_sys::HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if let Some(input) = self.0.dyn_ref::<web_sys::HtmlInputElement>() {
            input.set_disabled(disabled);
        } else if disabled {
            let _ = self.0.set_attribute("disabled", "");
        } else {
            let _ = self.0.remove_attribute("disabled");
        }
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent_element().map(DomElement)
    }

    fn children(&self) -> Vec<Self> {
        let children = self.0.children();
        (0..children.length()).filter_map(|i| children.item(i)).map(DomElement).collect()
    }

    fn contains(&self, other: &Self) -> bool {
        self.0.contains(Some(other.0.as_ref()))
    }

    fn is_connected(&self) -> bool {
        self.0.is_connected()
    }

    fn query_all(&self, selector: &str) -> Vec<Self> {
        collect(self.0.query_selector_all(selector))
    }

    fn offset_top(&self) -> f64 {
        self.html().map_or(0.0, |h| f64::from(h.offset_top()))
    }

    fn scroll_into_view(&self) {
        let options = web_sys::ScrollIntoViewOptions::new();
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        options.set_block(web_sys::ScrollLogicalPosition::Start);
        self.0.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn append_element(&self, tag: &str, class: &str) -> Option<Self> {
        let document = self.0.owner_document()?;
        let child = document.create_element(tag).ok()?;
        child.set_class_name(class);
        self.0.append_child(&child).ok()?;
        Some(DomElement(child))
    }

    fn append_text(&self, text: &str) {
        let _ = self.0.append_with_str_1(text);
    }

    fn remove(&self) {
        self.0.remove();
    }

    fn reset_form(&self) {
        if let Some(form) = self.0.dyn_ref::<web_sys::HtmlFormElement>() {
            form.reset();
        }
    }
}

/// The live document of the current window.
#[derive(Debug, Clone)]
pub struct DomPage {
    window: web_sys::Window,
    document: web_sys::Document,
}

impl DomPage {
    /// Bind to `window.document`.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Js`] outside a browser window.
    pub fn from_window() -> Result<Self, FolioError> {
        let window = web_sys::window().ok_or_else(|| FolioError::Js("no window".into()))?;
        let document = window.document().ok_or_else(|| FolioError::Js("no document".into()))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &web_sys::Window {
        &self.window
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }
}

impl RenderTarget for DomPage {
    type Element = DomElement;

    fn root(&self) -> Option<DomElement> {
        self.document.document_element().map(DomElement)
    }

    fn body(&self) -> Option<DomElement> {
        self.document.body().map(|b| DomElement(b.into()))
    }

    fn query_all(&self, selector: &str) -> Vec<DomElement> {
        collect(self.document.query_selector_all(selector))
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_width(&self) -> f64 {
        self.window.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(0.0)
    }
}
