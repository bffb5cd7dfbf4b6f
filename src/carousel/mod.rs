//! Circular carousel over a fixed number of image slots.
//!
//! Index arithmetic is plain mod N: navigation always lands on the adjacent
//! slot even if that slot turned out to be unavailable. Unavailable slots are
//! skipped only when rendering (no thumbnail, empty stage) and when the
//! currently shown slot exhausts its candidates, in which case the carousel
//! moves forward to the nearest slot that can still load.

pub mod resolver;

pub use resolver::{ExtensionResolver, Resolution, ResolveError};

use crate::config::{CarouselConfig, ConfigError};
use crate::timing::{Schedule, Scheduler, Task};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// One `<img>` the page should show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slide {
    pub slot: usize,
    pub src: String,
    pub alt: String,
    pub class: &'static str,
}

/// Everything the page needs to draw the track. `None` means "omit the element".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CarouselView {
    pub prev_thumb: Option<Slide>,
    pub outgoing: Option<Slide>,
    pub incoming: Option<Slide>,
    pub next_thumb: Option<Slide>,
}

#[derive(Clone, Debug)]
pub struct Carousel {
    resolver: ExtensionResolver,
    current: usize,
    previous: Option<usize>,
    animating: bool,
    transition_ms: u32,
}

impl Carousel {
    pub fn new(config: &CarouselConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            resolver: ExtensionResolver::new(
                config.slot_count,
                config.base_path.clone(),
                config.extensions.clone(),
            ),
            current: 0,
            previous: None,
            animating: false,
            transition_ms: config.transition_ms,
        })
    }

    pub fn slot_count(&self) -> usize {
        self.resolver.slot_count()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn previous_index(&self) -> Option<usize> {
        self.previous
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn resolver(&self) -> &ExtensionResolver {
        &self.resolver
    }

    pub fn prev_slot(&self) -> usize {
        let n = self.slot_count();
        (self.current + n - 1) % n
    }

    pub fn next_slot(&self) -> usize {
        (self.current + 1) % self.slot_count()
    }

    pub fn go_next(&mut self, timers: &mut impl Scheduler) {
        let to = self.next_slot();
        self.move_to(to, timers);
    }

    pub fn go_prev(&mut self, timers: &mut impl Scheduler) {
        let to = self.prev_slot();
        self.move_to(to, timers);
    }

    pub fn go(&mut self, direction: Direction, timers: &mut impl Scheduler) {
        match direction {
            Direction::Prev => self.go_prev(timers),
            Direction::Next => self.go_next(timers),
        }
    }

    /// Fired by [`Task::EndTransition`]. Safe to call any number of times.
    pub fn finish_transition(&mut self) {
        self.animating = false;
    }

    /// The page failed to load the image for `slot`. Advances that slot's
    /// fallback cursor; if the shown slot just ran out of candidates the
    /// carousel moves on to the next slot that can still load.
    pub fn on_image_error(&mut self, slot: usize, timers: &mut impl Scheduler) {
        let was_available = self.resolver.is_available(slot);
        let now = self.resolver.on_load_failure(slot);
        if !was_available || now != Some(Resolution::Unavailable) || slot != self.current {
            return;
        }
        if let Some(to) = self.next_available_after(self.current) {
            self.move_to(to, timers);
        }
    }

    /// Failure reported by a specific `<img>`. The same slot can be on screen
    /// twice (thumbnail and outgoing slide), so a failure for a path that is no
    /// longer the one being attempted is stale and ignored; each candidate is
    /// consumed once.
    pub fn on_image_failed(&mut self, slot: usize, src: &str, timers: &mut impl Scheduler) {
        if self.resolver.try_resolve_path(slot).as_deref() != Ok(src) {
            return;
        }
        self.on_image_error(slot, timers);
    }

    /// Render model for the current state.
    pub fn view(&self) -> CarouselView {
        let prev = self.prev_slot();
        let next = self.next_slot();
        let outgoing = match self.previous {
            Some(p) if self.animating => self.slide(p, "Previous".to_string(), "slide-image fade-out"),
            _ => None,
        };
        let incoming_class = if self.animating {
            "slide-image fade-in"
        } else {
            "slide-image shown"
        };
        CarouselView {
            prev_thumb: self.slide(prev, "Previous memory".to_string(), "carousel-thumb"),
            outgoing,
            incoming: self.slide(
                self.current,
                format!("Memory {}", self.current + 1),
                incoming_class,
            ),
            next_thumb: self.slide(next, "Next memory".to_string(), "carousel-thumb"),
        }
    }

    fn slide(&self, slot: usize, alt: String, class: &'static str) -> Option<Slide> {
        let src = self.resolver.try_resolve_path(slot).ok()?;
        Some(Slide {
            slot,
            src,
            alt,
            class,
        })
    }

    fn move_to(&mut self, to: usize, timers: &mut impl Scheduler) {
        // With a single slot there is nothing to fade away from.
        self.previous = (to != self.current).then_some(self.current);
        self.current = to;
        self.animating = true;
        timers.schedule(Schedule::new(self.transition_ms, Task::EndTransition));
    }

    fn next_available_after(&self, from: usize) -> Option<usize> {
        let n = self.slot_count();
        (1..n)
            .map(|step| (from + step) % n)
            .find(|&slot| self.resolver.is_available(slot))
    }
}
