use std::rc::Rc;

use super::harness::{Harness, TODAY};
use super::*;
use crate::config::SiteConfig;
use crate::net::api::{FAILURE_NOTICE, SUCCESS_NOTICE};
use crate::render::{Element, MemoryPage};
use crate::store::{KeyValueStore, MemoryStore};

fn landing_page() -> MemoryPage {
    let page = MemoryPage::new();
    let body = page.body_element();
    let links = body.child("nav").with_class("navbar").child("ul").with_class("nav-links");
    for id in ["home", "about", "contact"] {
        links.child("a").with_attr("href", &format!("#{id}"));
    }
    body.child("button").with_id("themeToggle").child("i").with_class("fas fa-moon");
    body.child("section").with_id("home").with_offset_top(0.0);
    body.child("section").with_id("about").with_offset_top(800.0);
    let contact = body.child("section").with_id("contact").with_offset_top(1600.0);
    let form = contact.child("form").with_class("contact-form").with_attr("action", "https://forms.example/f/abc");
    form.child("div").with_class("form-group").child("input").with_attr("name", "name");
    form.child("div").with_class("form-group").child("textarea").with_attr("name", "message");
    form.child("button").with_attr("type", "submit").with_text("Send Message");
    page
}

fn submit(h: &Harness) -> Outcome {
    h.fire(&h.query(".contact-form"), Trigger::Submit).into_iter().next().expect("submit binding")
}

// =============================================================================
// NAVBAR
// =============================================================================

#[test]
fn navbar_hides_when_scrolling_down_past_threshold() {
    let h = Harness::mount(landing_page());
    let navbar = h.query(".navbar");
    h.scroll_to(40.0);
    assert!(!navbar.has_class("hide"));
    h.scroll_to(120.0);
    assert!(navbar.has_class("hide"));
    h.scroll_to(90.0);
    assert!(!navbar.has_class("hide"));
}

#[test]
fn negative_overscroll_clamps_last_position() {
    let h = Harness::mount(landing_page());
    h.scroll_to(-30.0);
    assert!(!h.query(".navbar").has_class("hide"));
    h.scroll_to(60.0);
    assert!(h.query(".navbar").has_class("hide"));
}

// =============================================================================
// SCROLL-SPY AND REVEAL
// =============================================================================

#[test]
fn scroll_spy_marks_current_section_link() {
    let h = Harness::mount(landing_page());
    let links = h.query_all(".nav-links a");
    h.scroll_to(760.0);
    let active: Vec<bool> = links.iter().map(|l| l.has_class("active")).collect();
    assert_eq!(active, [false, true, false]);
    h.scroll_to(100.0);
    let active: Vec<bool> = links.iter().map(|l| l.has_class("active")).collect();
    assert_eq!(active, [true, false, false]);
}

#[test]
fn intersecting_section_is_revealed() {
    let h = Harness::mount(landing_page());
    let about = h.query("#about");
    assert!(!about.has_class("visible"));
    h.fire(&about, Trigger::Intersect);
    assert!(about.has_class("visible"));
    assert!(!h.query("#home").has_class("visible"));
}

// =============================================================================
// ANCHORS
// =============================================================================

#[test]
fn anchor_click_scrolls_to_target() {
    let h = Harness::mount(landing_page());
    let outcomes = h.click(&h.query("a[href=\"#contact\"]"));
    assert!(outcomes.iter().any(Outcome::prevents_default));
    assert_eq!(h.query("#contact").scroll_count(), 1);
    assert_eq!(h.query("#about").scroll_count(), 0);
}

#[test]
fn anchor_without_target_is_a_no_op() {
    let page = landing_page();
    let orphan = page.body_element().child("a").with_attr("href", "#missing");
    let h = Harness::mount(page);
    let outcomes = h.click(&orphan);
    assert!(outcomes.iter().any(Outcome::prevents_default));
    assert!(h.query_all("section").iter().all(|s| s.scroll_count() == 0));
}

// =============================================================================
// CONTACT FORM
// =============================================================================

#[test]
fn focus_and_blur_style_field_group() {
    let h = Harness::mount(landing_page());
    let input = h.query(".contact-form input");
    let group = input.parent().expect("form group");
    h.fire(&input, Trigger::Focus);
    assert!(group.has_class("focused"));
    h.fire(&input, Trigger::Blur);
    assert!(!group.has_class("focused"));

    h.fire(&input, Trigger::Focus);
    input.set_value("Ada");
    h.fire(&input, Trigger::Blur);
    assert!(group.has_class("focused"));
}

#[test]
fn submit_engages_guard_and_collects_fields() {
    let h = Harness::mount(landing_page());
    h.query(".contact-form input").set_value("Ada");
    h.query(".contact-form textarea").set_value("Hello");
    let button = h.query(".contact-form button");

    let Outcome::Submit(submission) = submit(&h) else {
        panic!("expected a submission");
    };
    assert_eq!(submission.endpoint, "https://forms.example/f/abc");
    assert_eq!(
        submission.fields,
        [("name".to_owned(), "Ada".to_owned()), ("message".to_owned(), "Hello".to_owned())]
    );
    assert_eq!(button.text(), SENDING_LABEL);
    assert!(button.is_disabled());

    drop(submission);
    assert_eq!(button.text(), "Send Message");
    assert!(!button.is_disabled());
}

#[test]
fn submission_follows_browser_form_data_rules() {
    let page = landing_page();
    let form = crate::render::RenderTarget::query(&page, ".contact-form").expect("fixture");
    let service = form.child("select").with_attr("name", "service");
    service.set_value("design");
    form.child("input").with_attr("type", "checkbox").with_attr("name", "subscribe");
    form.child("input").with_attr("type", "checkbox").with_attr("name", "updates").set_checked(true);
    form.child("input").with_attr("type", "radio").with_attr("name", "budget").with_attr("value", "small");
    form.child("input")
        .with_attr("type", "radio")
        .with_attr("name", "budget")
        .with_attr("value", "large")
        .set_checked(true);
    let locked = form.child("input").with_attr("name", "referrer");
    locked.set_value("ads");
    locked.set_disabled(true);
    form.child("input").with_attr("type", "file").with_attr("name", "attachment");
    form.child("input").with_attr("type", "submit").with_attr("name", "go");

    let h = Harness::mount(page);
    assert_eq!(h.runtime.borrow().contact_form(), Some(&form));
    h.query(".contact-form input[name=\"name\"]").set_value("Ada");
    let Outcome::Submit(submission) = submit(&h) else {
        panic!("expected a submission");
    };
    let names: Vec<&str> = submission.fields.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, ["name", "message", "service", "updates", "budget"]);
    let value = |key: &str| submission.fields.iter().find(|(name, _)| name == key).map(|(_, v)| v.clone());
    assert_eq!(value("service").as_deref(), Some("design"));
    assert_eq!(value("updates").as_deref(), Some("on"));
    assert_eq!(value("budget").as_deref(), Some("large"));
}

#[test]
fn select_fields_get_no_focus_binding() {
    let page = landing_page();
    let form = crate::render::RenderTarget::query(&page, ".contact-form").expect("fixture");
    let select = form.child("div").with_class("form-group").child("select").with_attr("name", "service");
    let h = Harness::mount(page);
    h.fire(&select, Trigger::Focus);
    assert!(!select.parent().expect("group").has_class("focused"));
}

#[test]
fn second_submit_in_flight_is_ignored() {
    let h = Harness::mount(landing_page());
    let first = submit(&h);
    assert!(matches!(first, Outcome::Submit(_)));
    assert!(matches!(submit(&h), Outcome::PreventDefault));
    drop(first);
    assert!(matches!(submit(&h), Outcome::Submit(_)));
}

#[test]
fn successful_submit_resets_form() {
    let h = Harness::mount(landing_page());
    let input = h.query(".contact-form input");
    input.set_value("Ada");
    let Outcome::Submit(submission) = submit(&h) else {
        panic!("expected a submission");
    };
    let notice = h.runtime.borrow_mut().finish_submit(&Ok(()));
    drop(submission);
    assert_eq!(notice, SUCCESS_NOTICE);
    assert_eq!(input.value(), "");
    assert_eq!(h.query(".contact-form").reset_count(), 1);
    assert!(!h.query(".contact-form button").is_disabled());
}

#[test]
fn failed_submit_keeps_values_and_restores_button() {
    let h = Harness::mount(landing_page());
    let input = h.query(".contact-form input");
    input.set_value("Ada");
    let Outcome::Submit(submission) = submit(&h) else {
        panic!("expected a submission");
    };
    let notice = h.runtime.borrow_mut().finish_submit(&Err(FolioError::Status { status: 500 }));
    drop(submission);
    assert_eq!(notice, FAILURE_NOTICE);
    assert_eq!(input.value(), "Ada");
    let button = h.query(".contact-form button");
    assert_eq!(button.text(), "Send Message");
    assert!(!button.is_disabled());
}

// =============================================================================
// THEME
// =============================================================================

#[test]
fn saved_theme_applied_at_mount() {
    let store = Rc::new(MemoryStore::with_entries([("theme", "dark")]));
    let h = Harness::mount_with(landing_page(), SiteConfig::default(), store, TODAY);
    assert_eq!(h.page.html().attr("data-theme").as_deref(), Some("dark"));
    assert_eq!(h.query("#themeToggle i").attr("class").as_deref(), Some("fas fa-sun"));
}

#[test]
fn no_saved_theme_leaves_page_alone() {
    let h = Harness::mount(landing_page());
    assert_eq!(h.page.html().attr("data-theme"), None);
    assert_eq!(h.query("#themeToggle i").attr("class").as_deref(), Some("fas fa-moon"));
}

#[test]
fn toggle_flips_and_persists() {
    let h = Harness::mount(landing_page());
    let toggle = h.query("#themeToggle");
    h.click(&toggle);
    assert_eq!(h.page.html().attr("data-theme").as_deref(), Some("dark"));
    assert_eq!(h.store.get("theme").as_deref(), Some("dark"));
    assert!(h.query("#themeToggle i").has_class("fa-sun"));

    h.click(&toggle);
    assert_eq!(h.page.html().attr("data-theme").as_deref(), Some("light"));
    assert_eq!(h.store.get("theme").as_deref(), Some("light"));
    assert!(h.query("#themeToggle i").has_class("fa-moon"));
}

// =============================================================================
// ISOLATION
// =============================================================================

#[test]
fn empty_page_mounts_nothing() {
    let h = Harness::mount(MemoryPage::new());
    assert!(h.runtime.borrow().bindings().is_empty());
    assert!(h.runtime.borrow().toggles().is_empty());
}
