//! Carousel widgets: discovery, rendering, and autoplay timers.
//!
//! Each mounted carousel owns its state machine and at most one timer
//! handle. Restarting means replacing the handle, cancelling means dropping
//! it. A tick that finds any of the carousel's frames gone from the document
//! unmounts the widget, which drops the handle and stops the timer.

use std::time::Duration;

use crate::config::CarouselConfig;
use crate::error::FolioError;
use crate::render::{Element, RenderTarget};
use crate::state::carousel::{Carousel, Step, TimerCommand};
use crate::store::KeyValueStore;
use crate::timer::Scheduler;

use super::{Binding, Event, Outcome, Runtime, Trigger};

/// What a carousel switches between.
#[derive(Debug)]
pub(crate) enum Frames<E> {
    /// One element per slide; the active one gets `active`.
    Slides(Vec<E>),
    /// A single image whose `src` cycles through `sources`.
    Image { image: E, sources: Vec<String> },
}

impl<E: Element> Frames<E> {
    fn len(&self) -> usize {
        match self {
            Self::Slides(slides) => slides.len(),
            Self::Image { sources, .. } => sources.len(),
        }
    }

    /// Whether every frame is still in the document.
    fn is_attached(&self) -> bool {
        match self {
            Self::Slides(slides) => slides.iter().all(Element::is_connected),
            Self::Image { image, .. } => image.is_connected(),
        }
    }

    fn show(&self, index: usize) {
        match self {
            Self::Slides(slides) => {
                for (i, slide) in slides.iter().enumerate() {
                    slide.set_class("active", i == index);
                }
            }
            Self::Image { image, sources } => {
                if let Some(src) = sources.get(index) {
                    image.set_attr("src", src);
                }
            }
        }
    }
}

pub(crate) struct CarouselWidget<E, H> {
    pub(crate) name: String,
    pub(crate) machine: Carousel,
    frames: Frames<E>,
    indicators: Vec<E>,
    timer: Option<H>,
}

impl<E: Element, H> CarouselWidget<E, H> {
    fn show(&self, index: usize) {
        self.frames.show(index);
        for (i, dot) in self.indicators.iter().enumerate() {
            dot.set_class("active", i == index);
        }
    }

    pub(crate) fn has_timer(&self) -> bool {
        self.timer.is_some()
    }
}

/// Resolve `selector` inside `scope`, or page-wide without one.
fn find_all<R: RenderTarget>(target: &R, scope: Option<&R::Element>, selector: &str) -> Vec<R::Element> {
    match scope {
        Some(scope) => scope.query_all(selector),
        None => target.query_all(selector),
    }
}

fn find<R: RenderTarget>(target: &R, scope: Option<&R::Element>, selector: &str) -> Option<R::Element> {
    find_all(target, scope, selector).into_iter().next()
}

impl<R, S, K> Runtime<R, S, K>
where
    R: RenderTarget + 'static,
    S: Scheduler + 'static,
    K: KeyValueStore + 'static,
{
    pub(super) fn mount_carousels(&mut self) -> Result<(), FolioError> {
        let configs = self.config.carousels.clone();
        for config in &configs {
            let scopes = match &config.scope {
                Some(selector) => self.target.query_all(selector).into_iter().map(Some).collect(),
                None => vec![None],
            };
            let mut mounted = 0usize;
            for scope in scopes {
                if self.mount_carousel(config, scope.as_ref()) {
                    mounted += 1;
                }
            }
            if mounted == 0 {
                log::debug!("no {} carousel on page", config.name);
            }
        }
        Ok(())
    }

    fn mount_carousel(&mut self, config: &CarouselConfig, scope: Option<&R::Element>) -> bool {
        let frames = if config.sources.is_empty() {
            Frames::Slides(find_all(&self.target, scope, &config.slides))
        } else {
            let Some(image) = find(&self.target, scope, &config.slides) else {
                return false;
            };
            Frames::Image { image, sources: config.sources.clone() }
        };
        if frames.len() == 0 {
            return false;
        }

        let id = self.carousels.len();
        let indicators = config.indicators.as_deref().map(|sel| find_all(&self.target, scope, sel)).unwrap_or_default();
        for (slide, dot) in indicators.iter().enumerate() {
            self.bindings.push(Binding::on(dot.clone(), Trigger::Click, Event::CarouselGoto(id, slide)));
        }
        if let Some(prev) = config.prev.as_deref().and_then(|sel| find(&self.target, scope, sel)) {
            self.bindings.push(Binding::on(prev, Trigger::Click, Event::CarouselPrev(id)));
        }
        if let Some(next) = config.next.as_deref().and_then(|sel| find(&self.target, scope, sel)) {
            self.bindings.push(Binding::on(next, Trigger::Click, Event::CarouselNext(id)));
        }

        let pause_area = match config.pause_area.as_deref() {
            Some(sel) => find(&self.target, scope, sel),
            None => scope.cloned(),
        };
        if let Some(area) = pause_area {
            if config.pause_on_hover {
                self.bindings.push(Binding::on(area.clone(), Trigger::PointerEnter, Event::CarouselPause(id)));
                self.bindings.push(Binding::on(area.clone(), Trigger::PointerLeave, Event::CarouselResume(id)));
            }
            if config.pause_on_touch {
                self.bindings.push(Binding::on(area.clone(), Trigger::TouchStart, Event::CarouselPause(id)));
                self.bindings.push(Binding::on(area, Trigger::TouchEnd, Event::CarouselResume(id)));
            }
        }

        let machine = Carousel::new(frames.len(), Duration::from_millis(u64::from(config.period_ms)));
        let mut step = machine.start();
        if matches!(frames, Frames::Image { .. }) {
            // The image keeps its markup `src` until the first tick.
            step.show = None;
        }
        log::debug!("mounted {} carousel #{id} with {} slides", config.name, machine.slide_count());
        self.carousels.push(Some(CarouselWidget { name: config.name.clone(), machine, frames, indicators, timer: None }));
        self.apply_carousel_step(id, step);
        true
    }

    fn autoplay_timer(&self, id: usize, period: Duration) -> S::Handle {
        let this = self.this.clone();
        self.scheduler.every(
            period,
            Box::new(move || {
                Self::dispatch_weak(&this, Event::CarouselTick(id));
            }),
        )
    }

    fn apply_carousel_step(&mut self, id: usize, step: Step) {
        let Some(widget) = self.carousels.get(id).and_then(Option::as_ref) else {
            return;
        };
        if let Some(index) = step.show {
            widget.show(index);
        }
        let timer = match step.timer {
            TimerCommand::Keep => return,
            TimerCommand::Restart => Some(self.autoplay_timer(id, widget.machine.period())),
            TimerCommand::Cancel => None,
        };
        if let Some(Some(widget)) = self.carousels.get_mut(id) {
            // Assigning drops the previous handle, cancelling its timer.
            widget.timer = timer;
        }
    }

    /// Run `transition` on carousel `id` and render the result.
    pub(super) fn on_carousel(&mut self, id: usize, transition: impl FnOnce(&mut Carousel) -> Step) -> Outcome {
        let Some(Some(widget)) = self.carousels.get_mut(id) else {
            return Outcome::Continue;
        };
        let step = transition(&mut widget.machine);
        self.apply_carousel_step(id, step);
        Outcome::Continue
    }

    pub(super) fn on_carousel_tick(&mut self, id: usize) -> Outcome {
        let Some(Some(widget)) = self.carousels.get(id) else {
            return Outcome::Continue;
        };
        if !widget.frames.is_attached() {
            log::debug!("{} carousel #{id} left the page; stopping autoplay", widget.name);
            self.unmount_carousel(id);
            return Outcome::Continue;
        }
        self.on_carousel(id, Carousel::tick)
    }

    /// Drop carousel `id` and its timer.
    pub fn unmount_carousel(&mut self, id: usize) {
        if let Some(slot) = self.carousels.get_mut(id) {
            *slot = None;
        }
    }
}
