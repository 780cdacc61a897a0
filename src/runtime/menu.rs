//! Mobile nav, dropdowns, and the category dropdown.
//!
//! All three are open/closed groups in the [`ToggleRegistry`]; this module
//! maps group state onto classes and decides which groups a document click
//! lands inside.
//!
//! [`ToggleRegistry`]: crate::state::toggle::ToggleRegistry

use crate::error::FolioError;
use crate::render::{Element, RenderTarget};
use crate::state::toggle::{GroupId, ToggleGroup};
use crate::store::KeyValueStore;
use crate::timer::Scheduler;

use super::{Binding, Event, Outcome, Runtime, Source, Trigger};

/// How a toggle group shows up on the page.
#[derive(Debug, Clone)]
pub(crate) enum GroupView<E> {
    /// Hamburger button plus the link list it reveals.
    Nav { hamburger: E, links: E },
    /// A `.dropdown`; only toggled on narrow viewports.
    Dropdown(E),
    /// The project category picker.
    Category(E),
    /// Project filter; has no open state.
    Filter,
}

impl<E: Element> GroupView<E> {
    /// Whether a click on `target` counts as inside this group.
    fn hit(&self, target: &E) -> bool {
        match self {
            Self::Nav { hamburger, links } => hamburger.contains(target) || links.contains(target),
            Self::Dropdown(root) | Self::Category(root) => root.contains(target),
            Self::Filter => false,
        }
    }
}

impl<R, S, K> Runtime<R, S, K>
where
    R: RenderTarget + 'static,
    S: Scheduler + 'static,
    K: KeyValueStore + 'static,
{
    pub(super) fn mount_nav_menu(&mut self) -> Result<(), FolioError> {
        let hamburger = self.target.query(".hamburger").ok_or_else(|| FolioError::missing(".hamburger"))?;
        let links = self.target.query(".nav-links").ok_or_else(|| FolioError::missing(".nav-links"))?;
        let id = self.toggles.register(ToggleGroup::new("nav"));
        self.bindings.push(Binding::on(hamburger.clone(), Trigger::Click, Event::MenuToggle(id)));
        for link in links.query_all("a") {
            self.bindings.push(Binding::on(link, Trigger::Click, Event::NavLinkClicked));
        }
        self.views.insert(id, GroupView::Nav { hamburger, links });
        self.bind_document_click();
        Ok(())
    }

    pub(super) fn mount_dropdowns(&mut self) -> Result<(), FolioError> {
        let triggers = self.target.query_all(".dropdown-trigger");
        if triggers.is_empty() {
            return Err(FolioError::missing(".dropdown-trigger"));
        }
        for trigger in triggers {
            let Some(root) = trigger.parent() else {
                continue;
            };
            let existing = self.views.iter().find_map(|(id, view)| match view {
                GroupView::Dropdown(el) if *el == root => Some(*id),
                _ => None,
            });
            let id = existing.unwrap_or_else(|| {
                let id = self.toggles.register(ToggleGroup::new("dropdown").exclusive_in("dropdown"));
                self.views.insert(id, GroupView::Dropdown(root));
                id
            });
            self.bindings.push(Binding::on(trigger, Trigger::Click, Event::DropdownTrigger(id)));
        }
        self.bind_document_click();
        Ok(())
    }

    pub(super) fn mount_category(&mut self) -> Result<(), FolioError> {
        let root = self.target.query(".category-dropdown").ok_or_else(|| FolioError::missing(".category-dropdown"))?;
        let label = self.target.query(".category-label").ok_or_else(|| FolioError::missing(".category-label"))?;
        let id = self.toggles.register(ToggleGroup::new("category"));
        self.views.insert(id, GroupView::Category(root));
        self.bindings.push(Binding::on(label, Trigger::Click, Event::DropdownTrigger(id)));
        self.bind_document_click();
        Ok(())
    }

    fn bind_document_click(&mut self) {
        let binding = Binding { source: Source::Document, trigger: Trigger::Click, event: Event::DocumentClick(None) };
        if !self.bindings.contains(&binding) {
            self.bindings.push(binding);
        }
    }

    pub(super) fn is_mobile(&self) -> bool {
        self.target.viewport_width() <= self.config.mobile_breakpoint_px
    }

    pub(super) fn group_of(&self, matches: impl Fn(&GroupView<R::Element>) -> bool) -> Option<GroupId> {
        self.views.iter().find_map(|(id, view)| matches(view).then_some(*id))
    }

    /// Render the open state of `id`.
    pub(super) fn apply_group(&self, id: GroupId) {
        let open = self.toggles.get(id).is_some_and(ToggleGroup::is_open);
        match self.views.get(&id) {
            Some(GroupView::Nav { hamburger, links }) => {
                hamburger.set_class("active", open);
                links.set_class("active", open);
                if let Some(body) = self.target.body() {
                    body.set_style("overflow", if open { "hidden" } else { "" });
                }
            }
            Some(GroupView::Dropdown(root) | GroupView::Category(root)) => root.set_class("active", open),
            Some(GroupView::Filter) | None => {}
        }
    }

    pub(super) fn close_group(&mut self, id: GroupId) {
        if self.toggles.close(id) {
            self.apply_group(id);
        }
    }

    pub(super) fn on_menu_toggle(&mut self, id: GroupId) -> Outcome {
        let (_, closed) = self.toggles.toggle_open(id);
        for other in closed {
            self.apply_group(other);
        }
        self.apply_group(id);
        Outcome::Continue
    }

    pub(super) fn on_dropdown_trigger(&mut self, id: GroupId) -> Outcome {
        let is_dropdown = matches!(self.views.get(&id), Some(GroupView::Dropdown(_)));
        if is_dropdown && !self.is_mobile() {
            return Outcome::Continue;
        }
        self.on_menu_toggle(id);
        if is_dropdown { Outcome::PreventDefault } else { Outcome::Continue }
    }

    pub(super) fn on_nav_link(&mut self) -> Outcome {
        if self.is_mobile() {
            if let Some(id) = self.group_of(|view| matches!(view, GroupView::Nav { .. })) {
                self.close_group(id);
            }
        }
        Outcome::Continue
    }

    pub(super) fn on_document_click(&mut self, target: Option<&R::Element>) -> Outcome {
        let keep: Vec<GroupId> = match target {
            Some(target) => self.views.iter().filter(|(_, view)| view.hit(target)).map(|(id, _)| *id).collect(),
            None => Vec::new(),
        };
        for id in self.toggles.close_all_except(&keep) {
            self.apply_group(id);
        }
        Outcome::Continue
    }
}
