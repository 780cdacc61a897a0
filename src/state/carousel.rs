//! Slideshow state machine shared by every carousel on the page.
//!
//! Transitions return a [`Step`] describing what the host must do: which
//! slide to show and what to do with the autoplay timer. The machine itself
//! never touches the page or a clock, so every rule is testable in
//! isolation.
//!
//! Timer rules: manual navigation restarts the autoplay period (a queued
//! tick can never land right after a click), `pause` cancels it, `resume`
//! starts a fresh full period. A machine with zero slides ignores everything.

#[cfg(test)]
#[path = "carousel_test.rs"]
mod carousel_test;

use std::time::Duration;

/// What the host should do with the carousel's autoplay timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerCommand {
    /// Leave the current timer (or lack of one) alone.
    #[default]
    Keep,
    /// Drop the current timer and start a new one with a full period.
    Restart,
    /// Drop the current timer.
    Cancel,
}

/// The outcome of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Step {
    /// Slide to mark active, if the transition (re)selected one.
    pub show: Option<usize>,
    pub timer: TimerCommand,
}

impl Step {
    /// Nothing to render, timer untouched.
    pub const IDLE: Self = Self { show: None, timer: TimerCommand::Keep };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    slide_count: usize,
    active: usize,
    autoplay: bool,
    period: Duration,
}

impl Carousel {
    /// A carousel on slide 0 with autoplay enabled.
    #[must_use]
    pub fn new(slide_count: usize, period: Duration) -> Self {
        Self { slide_count, active: 0, autoplay: true, period }
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    fn is_empty(&self) -> bool {
        self.slide_count == 0
    }

    /// Initial render: show the current slide and start autoplay.
    pub fn start(&self) -> Step {
        if self.is_empty() {
            return Step::IDLE;
        }
        Step { show: Some(self.active), timer: self.autoplay_restart() }
    }

    pub fn next(&mut self) -> Step {
        if self.is_empty() {
            return Step::IDLE;
        }
        self.active = (self.active + 1) % self.slide_count;
        self.navigated()
    }

    pub fn prev(&mut self) -> Step {
        if self.is_empty() {
            return Step::IDLE;
        }
        self.active = (self.active + self.slide_count - 1) % self.slide_count;
        self.navigated()
    }

    /// Jump to slide `index`. Out-of-range indices are ignored.
    pub fn goto(&mut self, index: usize) -> Step {
        if index >= self.slide_count {
            return Step::IDLE;
        }
        self.active = index;
        self.navigated()
    }

    /// Autoplay timer fired.
    pub fn tick(&mut self) -> Step {
        if self.is_empty() || !self.autoplay {
            return Step::IDLE;
        }
        self.active = (self.active + 1) % self.slide_count;
        Step { show: Some(self.active), timer: TimerCommand::Keep }
    }

    pub fn pause(&mut self) -> Step {
        let was_playing = self.autoplay;
        self.autoplay = false;
        if was_playing && !self.is_empty() {
            Step { show: None, timer: TimerCommand::Cancel }
        } else {
            Step::IDLE
        }
    }

    pub fn resume(&mut self) -> Step {
        self.autoplay = true;
        Step { show: None, timer: self.autoplay_restart() }
    }

    fn navigated(&self) -> Step {
        Step { show: Some(self.active), timer: self.autoplay_restart() }
    }

    fn autoplay_restart(&self) -> TimerCommand {
        if self.autoplay && !self.is_empty() {
            TimerCommand::Restart
        } else {
            TimerCommand::Keep
        }
    }
}
