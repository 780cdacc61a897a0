//! Contact form: field focus styling and guarded submission.
//!
//! ARCHITECTURE
//! ============
//! Submitting is the one asynchronous flow on the page. Dispatching
//! [`Event::FormSubmit`](super::Event::FormSubmit) hands the host a
//! [`Submission`] carrying the endpoint, the field values, and a
//! [`SubmitGuard`]. The guard marks the form in flight and puts the button
//! into its sending state; dropping it (success, failure, or a cancelled
//! task) restores the button and clears the flag. The flag is shared through
//! an `Rc<Cell<bool>>` so the guard never needs to borrow the runtime.
//!
//! The browser host posts the live form element's own data set.
//! [`ContactForm::values`] follows the same successful-control rules, so the
//! collected values match what the browser sends.

use std::cell::Cell;
use std::rc::Rc;

use crate::render::Element;

/// Button label while a submission is in flight.
pub const SENDING_LABEL: &str = "Sending...";

/// Input types that never contribute a value.
const SKIPPED_INPUT_TYPES: [&str; 5] = ["submit", "button", "reset", "image", "file"];

/// The `(name, value)` pair `field` contributes to the form data set, if any.
fn entry<E: Element>(field: &E) -> Option<(String, String)> {
    let name = field.attr("name").filter(|name| !name.is_empty())?;
    if field.is_disabled() {
        return None;
    }
    let kind = field.attr("type").unwrap_or_default().to_ascii_lowercase();
    if SKIPPED_INPUT_TYPES.contains(&kind.as_str()) {
        return None;
    }
    if kind == "checkbox" || kind == "radio" {
        if !field.is_checked() {
            return None;
        }
        return Some((name, field.attr("value").unwrap_or_else(|| "on".to_owned())));
    }
    Some((name, field.value()))
}

#[derive(Debug)]
pub(crate) struct ContactForm<E> {
    pub(crate) form: E,
    /// Text fields that get focus styling.
    pub(crate) fields: Vec<E>,
    controls: Vec<E>,
    pub(crate) button: Option<E>,
    pub(crate) in_flight: Rc<Cell<bool>>,
}

impl<E: Element> ContactForm<E> {
    pub(crate) fn new(form: E) -> Self {
        let fields = form.query_all("input, textarea");
        let controls = form.query_all("input, textarea, select");
        let button = form.query("button[type=\"submit\"]");
        Self { form, fields, controls, button, in_flight: Rc::new(Cell::new(false)) }
    }

    /// Values of the successful controls, in document order.
    pub(crate) fn values(&self) -> Vec<(String, String)> {
        self.controls.iter().filter_map(entry).collect()
    }

    pub(crate) fn endpoint(&self) -> String {
        self.form.attr("action").unwrap_or_default()
    }

    /// Start a submission, or `None` if one is already in flight.
    pub(crate) fn begin(&self) -> Option<Submission> {
        if self.in_flight.get() {
            return None;
        }
        Some(Submission {
            endpoint: self.endpoint(),
            fields: self.values(),
            guard: SubmitGuard::engage(self.button.clone(), Rc::clone(&self.in_flight)),
        })
    }
}

/// A form post the host must perform.
#[derive(Debug)]
pub struct Submission {
    pub endpoint: String,
    pub fields: Vec<(String, String)>,
    pub guard: SubmitGuard,
}

/// Holds the submit button in its sending state until dropped.
pub struct SubmitGuard {
    restore: Option<Box<dyn FnOnce()>>,
    in_flight: Rc<Cell<bool>>,
}

impl SubmitGuard {
    fn engage<E: Element>(button: Option<E>, in_flight: Rc<Cell<bool>>) -> Self {
        in_flight.set(true);
        let restore = button.map(|button| {
            let label = button.text();
            button.set_text(SENDING_LABEL);
            button.set_disabled(true);
            Box::new(move || {
                button.set_text(&label);
                button.set_disabled(false);
            }) as Box<dyn FnOnce()>
        });
        Self { restore, in_flight }
    }
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.in_flight.set(false);
        if let Some(restore) = self.restore.take() {
            restore();
        }
    }
}

impl std::fmt::Debug for SubmitGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmitGuard").field("in_flight", &self.in_flight.get()).finish_non_exhaustive()
    }
}
