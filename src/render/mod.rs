//! Render-target abstraction.
//!
//! SYSTEM CONTEXT
//! ==============
//! The runtime only needs a narrow slice of the DOM: selector queries in
//! document order, class and attribute edits, inline styles, a little tree
//! navigation, and scroll metrics. [`RenderTarget`] and [`Element`] capture
//! exactly that slice. [`dom`] binds it to `web-sys`; [`memory`] is a small
//! in-process page used by tests.
//!
//! Every mutator is infallible from the caller's point of view. The DOM
//! binding swallows the rare `JsValue` error the way the browser script it
//! replaces would have.

#[cfg(feature = "hydrate")]
pub mod dom;
pub mod memory;

pub use memory::{MemoryElement, MemoryPage};

pub trait Element: Clone + PartialEq + std::fmt::Debug + 'static {
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);

    /// Add or remove `class` to match `on`.
    fn set_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    fn classes(&self) -> Vec<String>;
    fn set_class_name(&self, value: &str);

    fn attr(&self, name: &str) -> Option<String>;
    fn set_attr(&self, name: &str, value: &str);

    /// Inline style property, `None` when unset.
    fn style(&self, property: &str) -> Option<String>;
    fn set_style(&self, property: &str, value: &str);

    fn text(&self) -> String;
    fn set_text(&self, text: &str);

    /// Current value of a form field; empty for other elements.
    fn value(&self) -> String;
    /// Checkedness of a checkbox or radio input; `false` for anything else.
    fn is_checked(&self) -> bool;
    fn is_disabled(&self) -> bool;
    fn set_disabled(&self, disabled: bool);

    fn parent(&self) -> Option<Self>;
    fn children(&self) -> Vec<Self>;
    /// Whether `other` is this element or one of its descendants.
    fn contains(&self, other: &Self) -> bool;
    fn is_connected(&self) -> bool;

    /// Descendants matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self>;

    fn query(&self, selector: &str) -> Option<Self> {
        self.query_all(selector).into_iter().next()
    }

    /// Distance from the top of the document, in CSS pixels.
    fn offset_top(&self) -> f64;
    /// Smoothly scroll this element to the top of the viewport.
    fn scroll_into_view(&self);

    /// Append a new `<tag class="...">` child and return it.
    fn append_element(&self, tag: &str, class: &str) -> Option<Self>;
    /// Append a bare text node.
    fn append_text(&self, text: &str);
    fn remove(&self);
    /// Reset a `<form>` to its initial values. No-op for other elements.
    fn reset_form(&self);
}

pub trait RenderTarget {
    type Element: Element;

    /// The `<html>` element.
    fn root(&self) -> Option<Self::Element>;
    fn body(&self) -> Option<Self::Element>;

    /// Elements matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    fn query(&self, selector: &str) -> Option<Self::Element> {
        self.query_all(selector).into_iter().next()
    }

    /// Vertical scroll offset of the page.
    fn scroll_y(&self) -> f64;
    /// Layout viewport width in CSS pixels.
    fn viewport_width(&self) -> f64;
}
