//! Show/hide groups: menus, dropdowns, and tag filters.
//!
//! DESIGN
//! ======
//! A [`ToggleGroup`] has an open flag (menus, dropdowns) and a tag filter over
//! its members (project cards). Exclusive groups belong to a named family;
//! opening one closes the other open members of that family, so a dropdown
//! never closes the mobile menu it lives in.
//!
//! Registry operations return the ids of groups they closed as a side
//! effect so the host can update the page for exactly those groups.

#[cfg(test)]
#[path = "toggle_test.rs"]
mod toggle_test;

use std::collections::BTreeSet;

pub type GroupId = usize;

/// The tag a filter button selects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Tag(String),
}

impl Filter {
    /// `"all"` (any case) is the catch-all; anything else is a tag.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Tag(raw.to_owned())
        }
    }

    pub fn matches(&self, tags: &BTreeSet<String>) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => tags.contains(tag),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: String,
    pub match_tags: BTreeSet<String>,
}

impl Member {
    pub fn new<I, T>(id: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self { id: id.into(), match_tags: tags.into_iter().map(Into::into).collect() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleGroup {
    name: String,
    members: Vec<Member>,
    active_filter: Filter,
    family: Option<String>,
    open: bool,
}

impl ToggleGroup {
    /// A closed, non-exclusive group with no members.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), members: Vec::new(), active_filter: Filter::All, family: None, open: false }
    }

    /// Make the group exclusive within `family`.
    #[must_use]
    pub fn exclusive_in(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    #[must_use]
    pub fn with_members(mut self, members: Vec<Member>) -> Self {
        self.members = members;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn active_filter(&self) -> &Filter {
        &self.active_filter
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.members.get(index).is_some_and(|m| self.active_filter.matches(&m.match_tags))
    }

    /// Per-member visibility under the active filter, in member order.
    pub fn visibility(&self) -> Vec<bool> {
        self.members.iter().map(|m| self.active_filter.matches(&m.match_tags)).collect()
    }

    pub fn visible_count(&self) -> usize {
        self.visibility().into_iter().filter(|v| *v).count()
    }
}

/// Every toggle group mounted on the page.
#[derive(Debug, Clone, Default)]
pub struct ToggleRegistry {
    groups: Vec<ToggleGroup>,
}

impl ToggleRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, group: ToggleGroup) -> GroupId {
        self.groups.push(group);
        self.groups.len() - 1
    }

    pub fn get(&self, id: GroupId) -> Option<&ToggleGroup> {
        self.groups.get(id)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Set the group's filter. An exclusive group also closes its open siblings.
    pub fn set_filter(&mut self, id: GroupId, filter: Filter) -> Vec<GroupId> {
        let Some(group) = self.groups.get_mut(id) else {
            return Vec::new();
        };
        group.active_filter = filter;
        self.close_siblings(id)
    }

    /// Flip the open state of `id`. Returns the new state and any siblings closed.
    pub fn toggle_open(&mut self, id: GroupId) -> (bool, Vec<GroupId>) {
        let Some(group) = self.groups.get(id) else {
            return (false, Vec::new());
        };
        let opening = !group.open;
        let closed = if opening { self.close_siblings(id) } else { Vec::new() };
        self.groups[id].open = opening;
        (opening, closed)
    }

    /// Close `id`. Returns `true` if it was open.
    pub fn close(&mut self, id: GroupId) -> bool {
        match self.groups.get_mut(id) {
            Some(group) if group.open => {
                group.open = false;
                true
            }
            _ => false,
        }
    }

    /// Close every open group.
    pub fn close_all(&mut self) -> Vec<GroupId> {
        self.close_all_except(&[])
    }

    /// Close every open group not listed in `keep` (click-outside handling).
    pub fn close_all_except(&mut self, keep: &[GroupId]) -> Vec<GroupId> {
        let mut closed = Vec::new();
        for (id, group) in self.groups.iter_mut().enumerate() {
            if group.open && !keep.contains(&id) {
                group.open = false;
                closed.push(id);
            }
        }
        closed
    }

    fn close_siblings(&mut self, id: GroupId) -> Vec<GroupId> {
        let Some(family) = self.groups[id].family.clone() else {
            return Vec::new();
        };
        let mut closed = Vec::new();
        for (other_id, other) in self.groups.iter_mut().enumerate() {
            if other_id != id && other.open && other.family.as_deref() == Some(family.as_str()) {
                other.open = false;
                closed.push(other_id);
            }
        }
        closed
    }
}
