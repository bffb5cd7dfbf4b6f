//! Gate + carousel wired together behind the inputs the page produces.
//! Nothing here touches the DOM, so the whole interaction can be driven
//! natively with a [`crate::timing::ManualScheduler`].

use crate::carousel::{Carousel, CarouselView, Direction};
use crate::config::{CarouselConfig, ConfigError};
use crate::gate::Gate;
use crate::timing::{Scheduler, Task};

/// Map a `KeyboardEvent.key` to a navigation direction.
pub fn nav_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowLeft" => Some(Direction::Prev),
        "ArrowRight" => Some(Direction::Next),
        _ => None,
    }
}

#[derive(Clone, Debug)]
pub struct App {
    config: CarouselConfig,
    gate: Gate,
    carousel: Carousel,
}

impl App {
    pub fn new(config: CarouselConfig) -> Result<Self, ConfigError> {
        let carousel = Carousel::new(&config)?;
        let gate = Gate::new(config.secret.clone(), config.reveal_delay_ms);
        Ok(Self {
            config,
            gate,
            carousel,
        })
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn is_unlocked(&self) -> bool {
        self.gate.is_unlocked()
    }

    pub fn set_answer(&mut self, text: impl Into<String>) {
        self.gate.set_answer(text);
    }

    pub fn submit(&mut self, timers: &mut impl Scheduler) -> bool {
        self.gate.submit(timers)
    }

    /// Returns true when the key was consumed (the page should then suppress
    /// the browser default, e.g. horizontal scrolling).
    pub fn key_down(&mut self, key: &str, timers: &mut impl Scheduler) -> bool {
        match nav_key(key) {
            Some(direction) if self.is_unlocked() => {
                self.carousel.go(direction, timers);
                true
            }
            _ => false,
        }
    }

    /// Thumbnail or control-button click.
    pub fn navigate(&mut self, direction: Direction, timers: &mut impl Scheduler) -> bool {
        if !self.is_unlocked() {
            return false;
        }
        self.carousel.go(direction, timers);
        true
    }

    pub fn image_error(&mut self, slot: usize, timers: &mut impl Scheduler) {
        self.carousel.on_image_error(slot, timers);
    }

    /// Image failure as reported by the page, carrying the `src` that failed.
    pub fn image_failed(&mut self, slot: usize, src: &str, timers: &mut impl Scheduler) {
        self.carousel.on_image_failed(slot, src, timers);
    }

    pub fn run(&mut self, task: Task) {
        match task {
            Task::EndTransition => self.carousel.finish_transition(),
            Task::RevealCarousel => self.gate.reveal(),
        }
    }

    /// Track contents, or `None` while the carousel is not mounted yet.
    pub fn carousel_view(&self) -> Option<CarouselView> {
        self.is_unlocked().then(|| self.carousel.view())
    }
}
