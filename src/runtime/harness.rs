//! Test host: mounts a runtime on a `MemoryPage` and fires its bindings the
//! way the browser layer would.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use time::Date;
use time::macros::date;

use super::{Event, Outcome, Runtime, Source, Trigger};
use crate::config::SiteConfig;
use crate::render::{MemoryElement, MemoryPage};
use crate::store::{MemoryStore, StorageAdapter};
use crate::timer::ManualScheduler;

pub(crate) type TestRuntime = Runtime<MemoryPage, ManualScheduler, Rc<MemoryStore>>;

pub(crate) const TODAY: Date = date!(2024 - 06 - 01);

pub(crate) struct Harness {
    pub page: MemoryPage,
    pub scheduler: ManualScheduler,
    pub store: Rc<MemoryStore>,
    pub runtime: Rc<RefCell<TestRuntime>>,
}

impl Harness {
    pub fn mount(page: MemoryPage) -> Self {
        Self::mount_with(page, SiteConfig::default(), Rc::new(MemoryStore::new()), TODAY)
    }

    pub fn mount_with(page: MemoryPage, config: SiteConfig, store: Rc<MemoryStore>, today: Date) -> Self {
        let scheduler = ManualScheduler::new();
        let runtime = Runtime::builder(page.clone(), scheduler.clone(), StorageAdapter::new(Rc::clone(&store)), today)
            .config(config)
            .seed(|| 25)
            .mount();
        Self { page, scheduler, store, runtime }
    }

    /// Events bound to `source` for `trigger`, in binding order.
    fn events_for(&self, source: &Source<MemoryElement>, trigger: Trigger) -> Vec<Event<MemoryElement>> {
        let runtime = self.runtime.borrow();
        runtime
            .bindings()
            .iter()
            .filter(|b| b.trigger == trigger && b.source == *source)
            .map(|b| b.event.clone())
            .collect()
    }

    pub fn dispatch(&self, event: Event<MemoryElement>) -> Outcome {
        self.runtime.borrow_mut().dispatch(event)
    }

    /// Fire `trigger` on `element` and every ancestor, like a bubbling DOM
    /// event, returning each dispatch outcome.
    pub fn fire(&self, element: &MemoryElement, trigger: Trigger) -> Vec<Outcome> {
        let mut events = Vec::new();
        let mut cursor = Some(element.clone());
        while let Some(current) = cursor {
            events.extend(self.events_for(&Source::Element(current.clone()), trigger));
            cursor = crate::render::Element::parent(&current);
        }
        if trigger == Trigger::Click {
            events.extend(
                self.events_for(&Source::Document, trigger).into_iter().map(|e| e.with_target(Some(element.clone()))),
            );
        }
        events.into_iter().map(|event| self.dispatch(event)).collect()
    }

    pub fn click(&self, element: &MemoryElement) -> Vec<Outcome> {
        self.fire(element, Trigger::Click)
    }

    pub fn scroll_to(&self, y: f64) {
        self.page.set_scroll_y(y);
        for event in self.events_for(&Source::Window, Trigger::Scroll) {
            self.dispatch(event);
        }
    }

    pub fn advance_ms(&self, ms: u64) {
        self.scheduler.advance(Duration::from_millis(ms));
    }

    pub fn query(&self, selector: &str) -> MemoryElement {
        crate::render::RenderTarget::query(&self.page, selector).unwrap_or_else(|| panic!("no `{selector}` in fixture"))
    }

    pub fn query_all(&self, selector: &str) -> Vec<MemoryElement> {
        crate::render::RenderTarget::query_all(&self.page, selector)
    }
}
