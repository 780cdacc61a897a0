//! Widget runtime: discovers widgets on the page, owns their state and
//! timers, and applies every transition to the render target.
//!
//! ARCHITECTURE
//! ============
//! ```text
//! RuntimeBuilder::mount()
//!   -> Rc<RefCell<Runtime>>     (timer tasks keep a Weak back-reference)
//!   -> bindings()               (host attaches one listener per binding)
//!
//! DOM event / timer tick
//!   -> Runtime::dispatch(Event)
//!     -> state machine transition (state::*)
//!     -> element updates + timer replace/drop
//!   -> Outcome                  (continue, prevent default, or submit)
//! ```
//!
//! The runtime is generic over the [`RenderTarget`], the [`Scheduler`], and
//! the [`KeyValueStore`], so the same code drives the browser
//! (`DomPage`, `GlooScheduler`, `LocalStorage`) and the host-side tests
//! (`MemoryPage`, `ManualScheduler`, `MemoryStore`).
//!
//! ERROR HANDLING
//! ==============
//! Widgets mount one at a time. A widget whose elements are missing is
//! skipped with a debug log; any other mount error is logged as a warning.
//! Neither stops the remaining widgets from mounting.

mod carousel;
mod event;
mod form;
mod menu;
mod page;
mod projects;

#[cfg(test)]
mod harness;
#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use time::Date;

pub use event::{Binding, Event, Outcome, Source, Trigger};
pub use form::{SENDING_LABEL, Submission, SubmitGuard};

use crate::config::SiteConfig;
use crate::error::FolioError;
use crate::render::{Element, RenderTarget};
use crate::state::carousel::Carousel;
use crate::state::counter::random_like_seed;
use crate::state::pagination::Paginator;
use crate::state::scroll::NavbarScroll;
use crate::state::toggle::{GroupId, ToggleRegistry};
use crate::store::{KeyValueStore, StorageAdapter};
use crate::timer::Scheduler;

use carousel::CarouselWidget;
use form::ContactForm;
use menu::GroupView;
use projects::ProjectList;

type MountFn<T> = fn(&mut T) -> Result<(), FolioError>;

/// Collects the runtime's collaborators before mounting.
pub struct RuntimeBuilder<R, S, K> {
    target: R,
    scheduler: S,
    storage: StorageAdapter<K>,
    today: Date,
    config: SiteConfig,
    seed: fn() -> u32,
}

impl<R, S, K> RuntimeBuilder<R, S, K>
where
    R: RenderTarget + 'static,
    S: Scheduler + 'static,
    K: KeyValueStore + 'static,
{
    #[must_use]
    pub fn config(mut self, config: SiteConfig) -> Self {
        self.config = config;
        self
    }

    /// Seed for like counters seen for the first time.
    #[must_use]
    pub fn seed(mut self, seed: fn() -> u32) -> Self {
        self.seed = seed;
        self
    }

    /// Build the runtime and mount every widget found on the page.
    pub fn mount(self) -> Rc<RefCell<Runtime<R, S, K>>> {
        let runtime = Rc::new_cyclic(|this| {
            RefCell::new(Runtime {
                this: this.clone(),
                target: self.target,
                scheduler: self.scheduler,
                storage: self.storage,
                config: self.config,
                today: self.today,
                seed: self.seed,
                bindings: Vec::new(),
                toggles: ToggleRegistry::new(),
                views: BTreeMap::new(),
                carousels: Vec::new(),
                projects: None,
                navbar: None,
                sections: Vec::new(),
                spy_links: Vec::new(),
                form: None,
                theme_icon: None,
            })
        });
        runtime.borrow_mut().mount_all();
        runtime
    }
}

/// Every mounted widget on one page.
pub struct Runtime<R: RenderTarget, S: Scheduler, K> {
    this: Weak<RefCell<Self>>,
    target: R,
    scheduler: S,
    storage: StorageAdapter<K>,
    config: SiteConfig,
    today: Date,
    seed: fn() -> u32,
    bindings: Vec<Binding<R::Element>>,
    toggles: ToggleRegistry,
    views: BTreeMap<GroupId, GroupView<R::Element>>,
    carousels: Vec<Option<CarouselWidget<R::Element, S::Handle>>>,
    projects: Option<ProjectList<R::Element, S::Handle>>,
    navbar: Option<(R::Element, NavbarScroll)>,
    sections: Vec<R::Element>,
    spy_links: Vec<R::Element>,
    form: Option<ContactForm<R::Element>>,
    theme_icon: Option<R::Element>,
}

impl<R, S, K> Runtime<R, S, K>
where
    R: RenderTarget + 'static,
    S: Scheduler + 'static,
    K: KeyValueStore + 'static,
{
    /// Start building a runtime for `target`. `today` is the calendar date
    /// like counters accrue against.
    pub fn builder(target: R, scheduler: S, storage: StorageAdapter<K>, today: Date) -> RuntimeBuilder<R, S, K> {
        RuntimeBuilder { target, scheduler, storage, today, config: SiteConfig::default(), seed: random_like_seed }
    }

    fn mount_all(&mut self) {
        let widgets: [(&str, MountFn<Self>); 12] = [
            ("theme", Self::mount_theme),
            ("navbar", Self::mount_navbar),
            ("nav menu", Self::mount_nav_menu),
            ("dropdowns", Self::mount_dropdowns),
            ("category dropdown", Self::mount_category),
            ("anchors", Self::mount_anchors),
            ("reveal", Self::mount_reveal),
            ("scroll spy", Self::mount_scroll_spy),
            ("contact form", Self::mount_contact_form),
            ("carousels", Self::mount_carousels),
            ("projects", Self::mount_projects),
            ("like counters", Self::mount_like_counters),
        ];
        for (name, mount) in widgets {
            match mount(self) {
                Ok(()) => {}
                Err(FolioError::MissingElement { selector }) => log::debug!("skipping {name}: no `{selector}` on page"),
                Err(err) => log::warn!("failed to mount {name}: {err}"),
            }
        }
        if let Err(err) = self.mount_project_dates() {
            log::debug!("skipping project dates: {err}");
        }
        log::info!(
            "folio mounted: {} bindings, {} carousels, {} toggle groups",
            self.bindings.len(),
            self.carousels.iter().flatten().count(),
            self.toggles.len()
        );
    }

    /// Listeners the host must attach, in mount order.
    pub fn bindings(&self) -> &[Binding<R::Element>] {
        &self.bindings
    }

    pub fn target(&self) -> &R {
        &self.target
    }

    pub fn storage(&self) -> &StorageAdapter<K> {
        &self.storage
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// State of carousel `id`, `None` once unmounted.
    pub fn carousel(&self, id: usize) -> Option<&Carousel> {
        self.carousels.get(id)?.as_ref().map(|w| &w.machine)
    }

    /// Whether carousel `id` has a running autoplay timer.
    pub fn carousel_has_timer(&self, id: usize) -> bool {
        self.carousels.get(id).and_then(Option::as_ref).is_some_and(CarouselWidget::has_timer)
    }

    pub fn toggles(&self) -> &ToggleRegistry {
        &self.toggles
    }

    pub fn paginator(&self) -> Option<&Paginator> {
        self.projects.as_ref().map(|p| &p.paginator)
    }

    /// Apply `event` and report what the host should do with the DOM event.
    pub fn dispatch(&mut self, event: Event<R::Element>) -> Outcome {
        match event {
            Event::Scroll => self.on_scroll(),
            Event::Reveal(section) => {
                section.add_class("visible");
                Outcome::Continue
            }
            Event::AnchorClicked(anchor) => self.on_anchor(&anchor),
            Event::MenuToggle(id) => self.on_menu_toggle(id),
            Event::NavLinkClicked => self.on_nav_link(),
            Event::DropdownTrigger(id) => self.on_dropdown_trigger(id),
            Event::DocumentClick(target) => self.on_document_click(target.as_ref()),
            Event::CarouselNext(id) => self.on_carousel(id, Carousel::next),
            Event::CarouselPrev(id) => self.on_carousel(id, Carousel::prev),
            Event::CarouselGoto(id, slide) => self.on_carousel(id, |c| c.goto(slide)),
            Event::CarouselPause(id) => self.on_carousel(id, Carousel::pause),
            Event::CarouselResume(id) => self.on_carousel(id, Carousel::resume),
            Event::CarouselTick(id) => self.on_carousel_tick(id),
            Event::FilterSelected(index) => self.on_filter_selected(index),
            Event::PageSelected(index) => self.on_page_selected(index),
            Event::FilterFadeDone(index) => self.on_fade_done(index),
            Event::FieldFocused(field) => Self::on_field_focus(&field, true),
            Event::FieldBlurred(field) => Self::on_field_focus(&field, false),
            Event::FormSubmit => self.on_form_submit(),
            Event::ThemeToggle => self.on_theme_toggle(),
        }
    }

    /// Dispatch through a weak reference, as timer tasks and listeners do.
    ///
    /// Returns `None` when the runtime is gone or already mid-dispatch (an
    /// event raised synchronously by one of its own page updates).
    pub fn dispatch_weak(this: &Weak<RefCell<Self>>, event: Event<R::Element>) -> Option<Outcome> {
        let shared = this.upgrade()?;
        let Ok(mut runtime) = shared.try_borrow_mut() else {
            log::debug!("dropping re-entrant event {event:?}");
            return None;
        };
        Some(runtime.dispatch(event))
    }

    /// Stop every timer and forget every widget.
    pub fn unmount_all(&mut self) {
        self.carousels.clear();
        self.projects = None;
        self.navbar = None;
        self.sections.clear();
        self.spy_links.clear();
        self.form = None;
        self.theme_icon = None;
        self.views.clear();
        self.toggles = ToggleRegistry::new();
        self.bindings.clear();
        log::info!("folio unmounted");
    }
}
