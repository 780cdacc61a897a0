//! Events the runtime reacts to, and the bindings that produce them.
//!
//! A [`Binding`] says "when `trigger` fires on `source`, dispatch `event`".
//! The runtime builds the binding list at mount; the browser layer turns
//! each entry into a DOM listener (or an `IntersectionObserver` target) and
//! tests fire them directly.

use crate::state::toggle::GroupId;

use super::form::Submission;

/// Input to [`super::Runtime::dispatch`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event<E> {
    /// Window scrolled.
    Scroll,
    /// Section entered the viewport.
    Reveal(E),
    /// In-page anchor clicked.
    AnchorClicked(E),
    /// Hamburger clicked.
    MenuToggle(GroupId),
    /// Link inside the nav menu clicked.
    NavLinkClicked,
    /// Dropdown trigger or category label clicked.
    DropdownTrigger(GroupId),
    /// Any click on the document, with the clicked element once known.
    DocumentClick(Option<E>),
    CarouselNext(usize),
    CarouselPrev(usize),
    /// Indicator `(carousel, slide)` clicked.
    CarouselGoto(usize, usize),
    CarouselPause(usize),
    CarouselResume(usize),
    /// Autoplay timer fired.
    CarouselTick(usize),
    /// Filter button at this index clicked.
    FilterSelected(usize),
    /// Page button at this index clicked.
    PageSelected(usize),
    /// Fade-out of the project card at this index finished.
    FilterFadeDone(usize),
    FieldFocused(E),
    FieldBlurred(E),
    FormSubmit,
    ThemeToggle,
}

impl<E> Event<E> {
    /// Fill in the click target of a [`Event::DocumentClick`]; other events
    /// are returned unchanged.
    #[must_use]
    pub fn with_target(self, target: Option<E>) -> Self {
        match self {
            Self::DocumentClick(_) => Self::DocumentClick(target),
            other => other,
        }
    }
}

/// What happened on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Click,
    PointerEnter,
    PointerLeave,
    TouchStart,
    TouchEnd,
    Focus,
    Blur,
    Submit,
    Scroll,
    /// Element became visible; not a DOM event.
    Intersect,
}

impl Trigger {
    /// DOM event name, `None` for [`Trigger::Intersect`].
    #[must_use]
    pub fn dom_event(self) -> Option<&'static str> {
        Some(match self {
            Self::Click => "click",
            Self::PointerEnter => "mouseenter",
            Self::PointerLeave => "mouseleave",
            Self::TouchStart => "touchstart",
            Self::TouchEnd => "touchend",
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::Submit => "submit",
            Self::Scroll => "scroll",
            Self::Intersect => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Source<E> {
    Element(E),
    Document,
    Window,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding<E> {
    pub source: Source<E>,
    pub trigger: Trigger,
    pub event: Event<E>,
}

impl<E> Binding<E> {
    pub fn on(element: E, trigger: Trigger, event: Event<E>) -> Self {
        Self { source: Source::Element(element), trigger, event }
    }
}

/// What the host should do with the DOM event after dispatch.
#[derive(Debug)]
pub enum Outcome {
    Continue,
    PreventDefault,
    /// Prevent default and post the form; see [`Submission`].
    Submit(Submission),
}

impl Outcome {
    pub fn prevents_default(&self) -> bool {
        !matches!(self, Self::Continue)
    }
}
