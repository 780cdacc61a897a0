use super::*;

fn cards() -> Vec<Member> {
    vec![
        Member::new("p0", ["project-card", "web"]),
        Member::new("p1", ["project-card", "mobile"]),
        Member::new("p2", ["project-card", "web", "design"]),
    ]
}

// =============================================================
// Filter
// =============================================================

#[test]
fn filter_parse_recognizes_all() {
    assert_eq!(Filter::parse("all"), Filter::All);
    assert_eq!(Filter::parse("ALL"), Filter::All);
    assert_eq!(Filter::parse(""), Filter::All);
    assert_eq!(Filter::parse(" web "), Filter::Tag("web".to_owned()));
}

#[test]
fn default_filter_shows_everything() {
    let group = ToggleGroup::new("projects").with_members(cards());
    assert_eq!(group.active_filter(), &Filter::All);
    assert_eq!(group.visibility(), [true, true, true]);
}

#[test]
fn tag_filter_shows_exactly_matching_members() {
    let mut registry = ToggleRegistry::new();
    let id = registry.register(ToggleGroup::new("projects").with_members(cards()));
    registry.set_filter(id, Filter::parse("web"));
    let group = registry.get(id).expect("group");
    assert_eq!(group.visibility(), [true, false, true]);
    assert!(group.is_visible(0));
    assert!(!group.is_visible(1));
    assert!(!group.is_visible(9));
}

#[test]
fn unmatched_tag_hides_everything() {
    let mut registry = ToggleRegistry::new();
    let id = registry.register(ToggleGroup::new("projects").with_members(cards()));
    registry.set_filter(id, Filter::parse("blockchain"));
    assert_eq!(registry.get(id).expect("group").visible_count(), 0);
}

#[test]
fn all_restores_every_member_after_any_filter() {
    let mut registry = ToggleRegistry::new();
    let id = registry.register(ToggleGroup::new("projects").with_members(cards()));
    for tag in ["web", "mobile", "nothing", "design"] {
        registry.set_filter(id, Filter::parse(tag));
        registry.set_filter(id, Filter::All);
        assert_eq!(registry.get(id).expect("group").visible_count(), 3, "after {tag}");
    }
}

#[test]
fn filter_on_unknown_group_is_noop() {
    let mut registry = ToggleRegistry::new();
    assert!(registry.set_filter(4, Filter::All).is_empty());
}

// =============================================================
// Open state and exclusivity
// =============================================================

#[test]
fn toggle_flips_open_state() {
    let mut registry = ToggleRegistry::new();
    let nav = registry.register(ToggleGroup::new("nav"));
    assert_eq!(registry.toggle_open(nav), (true, vec![]));
    assert!(registry.get(nav).expect("nav").is_open());
    assert_eq!(registry.toggle_open(nav), (false, vec![]));
}

#[test]
fn opening_exclusive_group_closes_family_siblings() {
    let mut registry = ToggleRegistry::new();
    let a = registry.register(ToggleGroup::new("a").exclusive_in("dropdown"));
    let b = registry.register(ToggleGroup::new("b").exclusive_in("dropdown"));
    let nav = registry.register(ToggleGroup::new("nav").exclusive_in("nav"));
    registry.toggle_open(nav);
    registry.toggle_open(a);
    let (open, closed) = registry.toggle_open(b);
    assert!(open);
    assert_eq!(closed, [a]);
    assert!(!registry.get(a).expect("a").is_open());
    assert!(registry.get(nav).expect("nav").is_open(), "other families stay open");
}

#[test]
fn closing_does_not_touch_siblings() {
    let mut registry = ToggleRegistry::new();
    let a = registry.register(ToggleGroup::new("a").exclusive_in("dropdown"));
    registry.toggle_open(a);
    assert_eq!(registry.toggle_open(a), (false, vec![]));
}

#[test]
fn non_exclusive_groups_coexist() {
    let mut registry = ToggleRegistry::new();
    let a = registry.register(ToggleGroup::new("a"));
    let b = registry.register(ToggleGroup::new("b"));
    registry.toggle_open(a);
    let (_, closed) = registry.toggle_open(b);
    assert!(closed.is_empty());
    assert!(registry.get(a).expect("a").is_open());
}

#[test]
fn exclusive_set_filter_closes_siblings() {
    let mut registry = ToggleRegistry::new();
    let menu = registry.register(ToggleGroup::new("menu").exclusive_in("panel"));
    let filter = registry.register(ToggleGroup::new("filter").exclusive_in("panel").with_members(cards()));
    registry.toggle_open(menu);
    assert_eq!(registry.set_filter(filter, Filter::parse("web")), [menu]);
}

#[test]
fn close_all_reports_only_open_groups() {
    let mut registry = ToggleRegistry::new();
    let a = registry.register(ToggleGroup::new("a"));
    let _b = registry.register(ToggleGroup::new("b"));
    let c = registry.register(ToggleGroup::new("c"));
    registry.toggle_open(a);
    registry.toggle_open(c);
    assert_eq!(registry.close_all(), [a, c]);
    assert!(registry.close_all().is_empty());
}

#[test]
fn close_all_except_keeps_listed_groups() {
    let mut registry = ToggleRegistry::new();
    let a = registry.register(ToggleGroup::new("a"));
    let b = registry.register(ToggleGroup::new("b"));
    registry.toggle_open(a);
    registry.toggle_open(b);
    assert_eq!(registry.close_all_except(&[b]), [a]);
    assert!(registry.get(b).expect("b").is_open());
}

#[test]
fn close_reports_previous_state() {
    let mut registry = ToggleRegistry::new();
    let a = registry.register(ToggleGroup::new("a"));
    assert!(!registry.close(a));
    registry.toggle_open(a);
    assert!(registry.close(a));
    assert!(!registry.close(99));
}
