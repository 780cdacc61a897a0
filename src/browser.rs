//! Browser entry point.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page loads the WASM bundle as a module script. [`start`] installs the
//! panic hook and console logger, waits for the DOM if it is still parsing,
//! then mounts a [`Runtime`] on the live document and turns every binding
//! into a listener. Listeners and timer tasks reach the runtime through a
//! `Weak`; the only strong reference lives in a thread-local for the life of
//! the page.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use time::{Date, Month};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::config::{CONFIG_ELEMENT_ID, SiteConfig};
use crate::error::FolioError;
use crate::net::api::{form_data, post_form_data, submit_form};
use crate::render::dom::{DomElement, DomPage};
use crate::runtime::{Binding, Event, Outcome, Runtime, Source, Submission, Trigger};
use crate::store::StorageAdapter;
use crate::store::local::LocalStorage;
use crate::timer::GlooScheduler;

type PageRuntime = Runtime<DomPage, GlooScheduler, LocalStorage>;
type SharedRuntime = Rc<RefCell<PageRuntime>>;

thread_local! {
    static RUNTIME: RefCell<Option<SharedRuntime>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) keeps the existing logger.
    let _ = console_log::init_with_level(log::Level::Info);

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.ready_state() == "loading" {
        let boot_later = Closure::once_into_js(boot);
        if let Err(err) = document.add_event_listener_with_callback("DOMContentLoaded", boot_later.unchecked_ref()) {
            log::error!("cannot wait for DOMContentLoaded: {err:?}");
        }
    } else {
        boot();
    }
}

fn boot() {
    if let Err(err) = try_boot() {
        log::error!("folio failed to start: {err}");
    }
}

fn try_boot() -> Result<(), FolioError> {
    let page = DomPage::from_window()?;
    let config = load_config(page.document());
    let today = today_utc()?;
    let runtime = Runtime::builder(page, GlooScheduler, StorageAdapter::new(LocalStorage::new()), today)
        .config(config)
        .mount();
    attach(&runtime)?;
    RUNTIME.with(|slot| *slot.borrow_mut() = Some(runtime));
    Ok(())
}

/// Read the optional JSON override block; defaults on absence or error.
fn load_config(document: &web_sys::Document) -> SiteConfig {
    let Some(raw) = document.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) else {
        return SiteConfig::default();
    };
    SiteConfig::from_json(&raw).unwrap_or_else(|err| {
        log::warn!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
        SiteConfig::default()
    })
}

/// Today's date in UTC, the calendar like counters accrue on.
fn today_utc() -> Result<Date, FolioError> {
    let now = js_sys::Date::new_0();
    let month = u8::try_from(now.get_utc_month() + 1)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(|| FolioError::Date("month out of range".into()))?;
    let year = i32::try_from(now.get_utc_full_year()).map_err(|e| FolioError::Date(e.to_string()))?;
    let day = u8::try_from(now.get_utc_date()).map_err(|e| FolioError::Date(e.to_string()))?;
    Date::from_calendar_date(year, month, day).map_err(|e| FolioError::Date(e.to_string()))
}

// =============================================================================
// LISTENERS
// =============================================================================

fn attach(runtime: &SharedRuntime) -> Result<(), FolioError> {
    let bindings: Vec<Binding<DomElement>> = runtime.borrow().bindings().to_vec();
    let (page_window, page_document) = {
        let rt = runtime.borrow();
        (rt.target().window().clone(), rt.target().document().clone())
    };
    let threshold = runtime.borrow().config().reveal_threshold;
    let weak = Rc::downgrade(runtime);

    let mut revealed = Vec::new();
    for binding in bindings {
        let Some(name) = binding.trigger.dom_event() else {
            if let Source::Element(el) = binding.source {
                revealed.push(el);
            }
            continue;
        };
        let target: web_sys::EventTarget = match &binding.source {
            Source::Element(el) => el.0.clone().into(),
            Source::Document => page_document.clone().into(),
            Source::Window => page_window.clone().into(),
        };
        listen(&target, name, binding.trigger, binding.event, weak.clone())?;
    }
    if !revealed.is_empty() {
        observe_reveals(&revealed, threshold, weak)?;
    }
    Ok(())
}

fn listen(
    target: &web_sys::EventTarget,
    name: &str,
    trigger: Trigger,
    event: Event<DomElement>,
    weak: Weak<RefCell<PageRuntime>>,
) -> Result<(), FolioError> {
    let handler = Closure::<dyn FnMut(web_sys::Event)>::new(move |dom_event: web_sys::Event| {
        let clicked = dom_event.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()).map(DomElement);
        let outcome = PageRuntime::dispatch_weak(&weak, event.clone().with_target(clicked));
        match outcome {
            Some(Outcome::PreventDefault) => dom_event.prevent_default(),
            Some(Outcome::Submit(submission)) => {
                dom_event.prevent_default();
                let body = live_form_data(&weak);
                spawn_submit(weak.clone(), submission, body);
            }
            Some(Outcome::Continue) | None => {}
        }
    });
    if trigger == Trigger::Scroll {
        let options = web_sys::AddEventListenerOptions::new();
        options.set_passive(true);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            name,
            handler.as_ref().unchecked_ref(),
            &options,
        )?;
    } else {
        target.add_event_listener_with_callback(name, handler.as_ref().unchecked_ref())?;
    }
    // Listeners live as long as the page.
    handler.forget();
    Ok(())
}

fn observe_reveals(
    sections: &[DomElement],
    threshold: f64,
    weak: Weak<RefCell<PageRuntime>>,
) -> Result<(), FolioError> {
    let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<web_sys::IntersectionObserverEntry>() else {
                continue;
            };
            if entry.is_intersecting() {
                PageRuntime::dispatch_weak(&weak, Event::Reveal(DomElement(entry.target())));
            }
        }
    });
    let init = web_sys::IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    let observer = web_sys::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    for section in sections {
        observer.observe(&section.0);
    }
    callback.forget();
    Ok(())
}

// =============================================================================
// FORM SUBMISSION
// =============================================================================

/// The mounted form's own data set, taken before the task yields.
fn live_form_data(weak: &Weak<RefCell<PageRuntime>>) -> Option<web_sys::FormData> {
    let shared = weak.upgrade()?;
    let runtime = shared.try_borrow().ok()?;
    let form = runtime.contact_form()?;
    match form_data(&form.0) {
        Ok(body) => Some(body),
        Err(err) => {
            log::warn!("posting collected fields instead of the form: {err}");
            None
        }
    }
}

fn spawn_submit(weak: Weak<RefCell<PageRuntime>>, submission: Submission, body: Option<web_sys::FormData>) {
    wasm_bindgen_futures::spawn_local(async move {
        let Submission { endpoint, fields, guard } = submission;
        let result = match body {
            Some(body) => post_form_data(&endpoint, body).await,
            None => submit_form(&endpoint, &fields).await,
        };
        let notice = weak.upgrade().map(|shared| {
            let mut runtime = shared.borrow_mut();
            runtime.finish_submit(&result)
        });
        if let Some(notice) = notice {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(notice);
            }
        }
        drop(guard);
    });
}
