//! Page-wide behaviors: navbar, scroll-spy, reveal, anchors, contact form,
//! and theme.

use crate::error::FolioError;
use crate::net::api::notice_for;
use crate::render::{Element, RenderTarget};
use crate::state::scroll::{NavbarScroll, active_section};
use crate::store::KeyValueStore;
use crate::timer::Scheduler;
use crate::util::theme::{self, Theme};

use super::form::ContactForm;
use super::{Binding, Event, Outcome, Runtime, Source, Trigger};

impl<R, S, K> Runtime<R, S, K>
where
    R: RenderTarget + 'static,
    S: Scheduler + 'static,
    K: KeyValueStore + 'static,
{
    fn bind_scroll(&mut self) {
        let binding = Binding { source: Source::Window, trigger: Trigger::Scroll, event: Event::Scroll };
        if !self.bindings.contains(&binding) {
            self.bindings.push(binding);
        }
    }

    // =========================================================================
    // SCROLL
    // =========================================================================

    pub(super) fn mount_navbar(&mut self) -> Result<(), FolioError> {
        let navbar = self.target.query(".navbar").ok_or_else(|| FolioError::missing(".navbar"))?;
        self.navbar = Some((navbar, NavbarScroll::new(self.config.scroll_threshold_px)));
        self.bind_scroll();
        Ok(())
    }

    pub(super) fn mount_scroll_spy(&mut self) -> Result<(), FolioError> {
        let sections = self.target.query_all("section");
        if sections.is_empty() {
            return Err(FolioError::missing("section"));
        }
        self.spy_links = self.target.query_all(".nav-links a");
        self.sections = sections;
        self.bind_scroll();
        Ok(())
    }

    pub(super) fn mount_reveal(&mut self) -> Result<(), FolioError> {
        let sections = self.target.query_all("section");
        if sections.is_empty() {
            return Err(FolioError::missing("section"));
        }
        for section in sections {
            self.bindings.push(Binding::on(section.clone(), Trigger::Intersect, Event::Reveal(section)));
        }
        Ok(())
    }

    pub(super) fn on_scroll(&mut self) -> Outcome {
        let y = self.target.scroll_y();
        if let Some((navbar, state)) = &mut self.navbar {
            let hide = state.on_scroll(y);
            navbar.set_class("hide", hide);
        }

        if !self.sections.is_empty() {
            let ids: Vec<(Option<String>, f64)> = self.sections.iter().map(|s| (s.attr("id"), s.offset_top())).collect();
            let current = active_section(ids.iter().map(|(id, top)| (id.as_deref(), *top)), y, self.config.section_offset_px);
            for link in &self.spy_links {
                let href = link.attr("href").unwrap_or_default();
                let target = href.strip_prefix('#');
                link.set_class("active", current.is_some() && target == current);
            }
        }
        Outcome::Continue
    }

    // =========================================================================
    // ANCHORS
    // =========================================================================

    pub(super) fn mount_anchors(&mut self) -> Result<(), FolioError> {
        let anchors = self.target.query_all("a[href^=\"#\"]");
        if anchors.is_empty() {
            return Err(FolioError::missing("a[href^=\"#\"]"));
        }
        for anchor in anchors {
            self.bindings.push(Binding::on(anchor.clone(), Trigger::Click, Event::AnchorClicked(anchor)));
        }
        Ok(())
    }

    pub(super) fn on_anchor(&self, anchor: &R::Element) -> Outcome {
        let href = anchor.attr("href").unwrap_or_default();
        match href.strip_prefix('#').filter(|id| !id.is_empty()) {
            Some(id) => match self.target.query(&format!("#{id}")) {
                Some(section) => section.scroll_into_view(),
                None => log::debug!("anchor {href} has no target"),
            },
            None => log::debug!("ignoring bare anchor"),
        }
        Outcome::PreventDefault
    }

    // =========================================================================
    // CONTACT FORM
    // =========================================================================

    pub(super) fn mount_contact_form(&mut self) -> Result<(), FolioError> {
        let form = self.target.query(".contact-form").ok_or_else(|| FolioError::missing(".contact-form"))?;
        let form = ContactForm::new(form);
        for field in &form.fields {
            self.bindings.push(Binding::on(field.clone(), Trigger::Focus, Event::FieldFocused(field.clone())));
            self.bindings.push(Binding::on(field.clone(), Trigger::Blur, Event::FieldBlurred(field.clone())));
        }
        self.bindings.push(Binding::on(form.form.clone(), Trigger::Submit, Event::FormSubmit));
        self.form = Some(form);
        Ok(())
    }

    pub(super) fn on_field_focus(field: &R::Element, focused: bool) -> Outcome {
        if let Some(parent) = field.parent() {
            if focused {
                parent.add_class("focused");
            } else if field.value().is_empty() {
                parent.remove_class("focused");
            }
        }
        Outcome::Continue
    }

    pub(super) fn on_form_submit(&mut self) -> Outcome {
        let Some(form) = &self.form else {
            return Outcome::Continue;
        };
        match form.begin() {
            Some(submission) => {
                log::info!("submitting contact form to {}", submission.endpoint);
                Outcome::Submit(submission)
            }
            None => {
                log::debug!("contact form already sending; ignoring submit");
                Outcome::PreventDefault
            }
        }
    }

    /// The mounted contact `<form>`, if any.
    pub fn contact_form(&self) -> Option<&R::Element> {
        self.form.as_ref().map(|form| &form.form)
    }

    /// Record the result of a submission and return the notice to show.
    ///
    /// A successful post resets the form. The caller drops the submission's
    /// guard afterwards to restore the button.
    pub fn finish_submit(&mut self, result: &Result<(), FolioError>) -> &'static str {
        match result {
            Ok(()) => {
                if let Some(form) = &self.form {
                    form.form.reset_form();
                }
            }
            Err(err) => log::error!("contact form submission failed: {err}"),
        }
        notice_for(result)
    }

    // =========================================================================
    // THEME
    // =========================================================================

    pub(super) fn mount_theme(&mut self) -> Result<(), FolioError> {
        let toggle = self.target.query("#themeToggle").ok_or_else(|| FolioError::missing("#themeToggle"))?;
        self.theme_icon = toggle.query("i");
        if let Some(saved) = theme::read_preference(&self.storage) {
            self.apply_theme(saved);
        }
        self.bindings.push(Binding::on(toggle, Trigger::Click, Event::ThemeToggle));
        Ok(())
    }

    fn apply_theme(&self, theme: Theme) {
        if let Some(root) = self.target.root() {
            root.set_attr(theme::ATTRIBUTE, theme.as_str());
        }
        if let Some(icon) = &self.theme_icon {
            icon.set_class_name(theme.icon_class());
        }
    }

    pub(super) fn on_theme_toggle(&mut self) -> Outcome {
        let current = self
            .target
            .root()
            .and_then(|root| root.attr(theme::ATTRIBUTE))
            .and_then(|raw| Theme::parse(&raw))
            .unwrap_or_default();
        let next = current.toggled();
        self.apply_theme(next);
        theme::save_preference(&self.storage, next);
        log::debug!("theme switched to {}", next.as_str());
        Outcome::Continue
    }
}
