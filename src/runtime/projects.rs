//! Project grid: filtering, pagination, like counters, and date labels.
//!
//! DESIGN
//! ======
//! The filter is a [`ToggleGroup`] whose members are the cards (tags = the
//! card's classes). The [`Paginator`] pages over the cards that pass the
//! filter, so a card is displayed iff it passes and its position among the
//! passing cards lies on the current page. Picking a filter returns to page
//! one.
//!
//! Cards dropped by a filter change fade first and leave the flow when the
//! fade timer fires. The timer re-checks, so a card brought back by a quick
//! second click stays put.

use std::time::Duration;

use crate::error::FolioError;
use crate::render::{Element, RenderTarget};
use crate::state::counter::{CounterKey, DailyCounter};
use crate::state::pagination::{PageRequest, Paginator};
use crate::state::toggle::{Filter, GroupId, Member, ToggleGroup};
use crate::store::KeyValueStore;
use crate::timer::Scheduler;
use crate::util::dates::format_project_date;

use super::menu::GroupView;
use super::{Binding, Event, Outcome, Runtime, Trigger};

pub(crate) struct ProjectList<E, H> {
    pub(crate) group: GroupId,
    pub(crate) cards: Vec<E>,
    pub(crate) filter_buttons: Vec<E>,
    pub(crate) page_buttons: Vec<E>,
    pub(crate) paginator: Paginator,
    fades: Vec<Option<H>>,
}

fn show_card<E: Element>(card: &E) {
    card.set_style("opacity", "1");
    card.set_style("transform", "scale(1)");
    card.set_style("display", "block");
}

fn fade_card<E: Element>(card: &E) {
    card.set_style("opacity", "0");
    card.set_style("transform", "scale(0.8)");
}

impl<E: Element, H> ProjectList<E, H> {
    fn highlight_page(&self) {
        let current = self.paginator.current().to_string();
        for button in &self.page_buttons {
            button.set_class("active", button.attr("data-page").is_some_and(|p| p.trim() == current));
        }
    }
}

impl<R, S, K> Runtime<R, S, K>
where
    R: RenderTarget + 'static,
    S: Scheduler + 'static,
    K: KeyValueStore + 'static,
{
    pub(super) fn mount_projects(&mut self) -> Result<(), FolioError> {
        let cards = match self.target.query(".project-grid") {
            Some(grid) => grid.children(),
            None => self.target.query_all(".project-card"),
        };
        if cards.is_empty() {
            return Err(FolioError::missing(".project-card"));
        }

        let members = cards
            .iter()
            .enumerate()
            .map(|(i, card)| Member::new(card.attr("id").unwrap_or_else(|| format!("project-{i}")), card.classes()))
            .collect();
        let group = self.toggles.register(ToggleGroup::new("projects").with_members(members));
        self.views.insert(group, GroupView::Filter);

        let filter_buttons = self.target.query_all(".filter-btn");
        for (i, button) in filter_buttons.iter().enumerate() {
            self.bindings.push(Binding::on(button.clone(), Trigger::Click, Event::FilterSelected(i)));
        }
        let page_buttons = self.target.query_all(".page-btn");
        for (i, button) in page_buttons.iter().enumerate() {
            self.bindings.push(Binding::on(button.clone(), Trigger::Click, Event::PageSelected(i)));
        }

        let fades = cards.iter().map(|_| None).collect();
        let paginator = Paginator::new(self.config.projects_per_page);
        log::debug!("mounted {} project cards", cards.len());
        self.projects = Some(ProjectList { group, cards, filter_buttons, page_buttons, paginator, fades });
        self.render_projects(false);
        Ok(())
    }

    /// Cards passing the active filter, by index.
    fn filtered_cards(&self) -> Vec<usize> {
        let Some(list) = &self.projects else {
            return Vec::new();
        };
        let Some(group) = self.toggles.get(list.group) else {
            return Vec::new();
        };
        (0..list.cards.len()).filter(|&i| group.is_visible(i)).collect()
    }

    /// Whether card `index` is displayed under the current filter and page.
    pub(super) fn is_card_shown(&self, index: usize) -> bool {
        let Some(list) = &self.projects else {
            return false;
        };
        let filtered = self.filtered_cards();
        filtered.iter().position(|&i| i == index).is_some_and(|pos| list.paginator.is_on_page(pos, filtered.len()))
    }

    /// Apply filter and page to every card. With `fade`, cards the filter
    /// rejects fade out before leaving the flow.
    fn render_projects(&mut self, fade: bool) {
        let shown: Vec<bool> = {
            let count = self.projects.as_ref().map_or(0, |l| l.cards.len());
            (0..count).map(|i| self.is_card_shown(i)).collect()
        };
        let rejected: Vec<bool> = match &self.projects {
            Some(list) => {
                let group = self.toggles.get(list.group);
                (0..list.cards.len()).map(|i| !group.is_some_and(|g| g.is_visible(i))).collect()
            }
            None => return,
        };
        let fade_delay = Duration::from_millis(u64::from(self.config.filter_fade_ms));
        let updates: Vec<Option<Option<S::Handle>>> = shown
            .iter()
            .zip(&rejected)
            .enumerate()
            .map(|(i, (&shown, &rejected))| {
                if shown {
                    Some(None)
                } else if fade && rejected {
                    Some(Some(self.fade_timer(i, fade_delay)))
                } else {
                    None
                }
            })
            .collect();

        let Some(list) = &mut self.projects else {
            return;
        };
        for (i, card) in list.cards.iter().enumerate() {
            if shown[i] {
                show_card(card);
            } else if fade && rejected[i] {
                fade_card(card);
            } else {
                card.set_style("display", "none");
            }
        }
        // Replacing a slot drops the old handle; untouched slots keep fading.
        for (slot, update) in list.fades.iter_mut().zip(updates) {
            if let Some(handle) = update {
                *slot = handle;
            }
        }
        list.highlight_page();
    }

    fn fade_timer(&self, index: usize, delay: Duration) -> S::Handle {
        let this = self.this.clone();
        self.scheduler.after(
            delay,
            Box::new(move || {
                Self::dispatch_weak(&this, Event::FilterFadeDone(index));
            }),
        )
    }

    pub(super) fn on_filter_selected(&mut self, index: usize) -> Outcome {
        let Some(list) = &mut self.projects else {
            return Outcome::Continue;
        };
        let Some(button) = list.filter_buttons.get(index).cloned() else {
            return Outcome::Continue;
        };
        for other in &list.filter_buttons {
            other.remove_class("active");
        }
        button.add_class("active");
        let filter = Filter::parse(&button.attr("data-filter").unwrap_or_default());
        list.paginator.reset();
        let group = list.group;

        for id in self.toggles.set_filter(group, filter) {
            self.apply_group(id);
        }
        self.render_projects(true);
        if let Some(category) = self.group_of(|view| matches!(view, GroupView::Category(_))) {
            self.close_group(category);
        }
        Outcome::Continue
    }

    pub(super) fn on_page_selected(&mut self, index: usize) -> Outcome {
        let count = self.filtered_cards().len();
        let Some(list) = &mut self.projects else {
            return Outcome::Continue;
        };
        let request = list.page_buttons.get(index).and_then(|b| b.attr("data-page")).and_then(|p| PageRequest::parse(&p));
        let Some(request) = request else {
            return Outcome::PreventDefault;
        };
        if list.paginator.apply(request, count) {
            self.render_projects(false);
        }
        Outcome::PreventDefault
    }

    pub(super) fn on_fade_done(&mut self, index: usize) -> Outcome {
        let shown = self.is_card_shown(index);
        let Some(list) = &mut self.projects else {
            return Outcome::Continue;
        };
        if let Some(slot) = list.fades.get_mut(index) {
            *slot = None;
        }
        if !shown {
            if let Some(card) = list.cards.get(index) {
                card.set_style("display", "none");
            }
        }
        Outcome::Continue
    }

    pub(super) fn mount_like_counters(&mut self) -> Result<(), FolioError> {
        let containers = self.target.query_all(".project-links");
        if containers.is_empty() {
            return Err(FolioError::missing(".project-links"));
        }
        let counter = DailyCounter::new(&self.storage);
        for (i, links) in containers.iter().enumerate() {
            for link in links.query_all("a") {
                if link.text().trim().to_lowercase().contains("case study") {
                    link.remove();
                }
            }
            for stale in links.query_all(".like-count") {
                stale.remove();
            }

            let likes = counter.observe(&CounterKey::project_like(i), self.today, self.seed);
            let Some(badge) = links.append_element("div", "like-count neumorphic") else {
                log::warn!("cannot create like badge for project {i}");
                continue;
            };
            badge.append_element("i", "fas fa-heart");
            badge.append_text(" ");
            if let Some(count) = badge.append_element("span", "") {
                count.set_text(&likes.to_string());
            }
            links.set_style("justify-content", "space-between");
            links.set_style("align-items", "center");
        }
        Ok(())
    }

    pub(super) fn mount_project_dates(&mut self) -> Result<(), FolioError> {
        let labels = self.target.query_all(".project-date");
        if labels.is_empty() {
            return Err(FolioError::missing(".project-date"));
        }
        for label in labels {
            match format_project_date(&label.text()) {
                Ok(formatted) => label.set_text(&formatted),
                Err(err) => log::debug!("leaving project date as written: {err}"),
            }
        }
        Ok(())
    }
}
