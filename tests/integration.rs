// Integration tests (native) for the `memory-carousel` crate.
// These drive the whole gate + carousel interaction through the public API
// with a manual clock, so they run under `cargo test` on the host.

use memory_carousel::{App, CarouselConfig, Direction, ManualScheduler, Task};

fn app() -> App {
    App::new(CarouselConfig::default()).expect("default config is valid")
}

/// Advance the clock and feed every task that came due back into the app.
fn tick(app: &mut App, timers: &mut ManualScheduler, ms: u64) -> Vec<Task> {
    let fired = timers.advance(ms);
    for task in &fired {
        app.run(*task);
    }
    fired
}

fn unlock(app: &mut App, timers: &mut ManualScheduler) {
    app.set_answer("Gualala");
    assert!(app.submit(timers));
    tick(app, timers, 1200);
}

#[test]
fn exact_answer_unlocks_then_reveals_after_delay() {
    let mut timers = ManualScheduler::new();
    let mut app = app();
    app.set_answer("Gualala");
    assert!(app.submit(&mut timers));
    assert!(app.is_unlocked());
    assert!(app.gate().prompt_visible());
    assert!(!app.gate().carousel_visible());

    assert!(tick(&mut app, &mut timers, 1199).is_empty());
    assert!(app.gate().prompt_visible());

    assert_eq!(tick(&mut app, &mut timers, 1), vec![Task::RevealCarousel]);
    assert!(!app.gate().prompt_visible());
    assert!(app.gate().carousel_visible());

    assert!(app.key_down("ArrowRight", &mut timers));
    assert_eq!(app.carousel().current_index(), 1);
}

#[test]
fn padded_mixed_case_answer_unlocks() {
    let mut timers = ManualScheduler::new();
    let mut app = app();
    app.set_answer("  GuAlAla  ");
    assert!(app.submit(&mut timers));
}

#[test]
fn wrong_answers_do_not_unlock() {
    let mut timers = ManualScheduler::new();
    let mut app = app();
    for attempt in ["gualala2", ""] {
        app.set_answer(attempt);
        assert!(!app.submit(&mut timers), "{attempt:?} should not unlock");
    }
    assert!(!app.is_unlocked());
    assert_eq!(timers.pending(), 0);
}

#[test]
fn keys_before_unlock_change_nothing() {
    let mut timers = ManualScheduler::new();
    let mut app = app();
    for key in ["ArrowLeft", "ArrowRight"] {
        assert!(!app.key_down(key, &mut timers));
    }
    assert_eq!(app.carousel().current_index(), 0);
    assert_eq!(app.carousel().previous_index(), None);
    assert!(!app.carousel().is_animating());
    assert_eq!(timers.pending(), 0);
}

#[test]
fn keys_after_unlock_step_by_one_with_wraparound() {
    let mut timers = ManualScheduler::new();
    let mut app = app();
    unlock(&mut app, &mut timers);

    assert!(app.key_down("ArrowLeft", &mut timers));
    assert_eq!(app.carousel().current_index(), 15);
    assert_eq!(app.carousel().previous_index(), Some(0));
    assert!(app.key_down("ArrowRight", &mut timers));
    assert_eq!(app.carousel().current_index(), 0);
    assert_eq!(app.carousel().previous_index(), Some(15));
}

#[test]
fn animation_flag_clears_after_transition() {
    let mut timers = ManualScheduler::new();
    let mut app = app();
    unlock(&mut app, &mut timers);

    app.navigate(Direction::Next, &mut timers);
    assert!(app.carousel().is_animating());
    tick(&mut app, &mut timers, 449);
    assert!(app.carousel().is_animating());
    tick(&mut app, &mut timers, 1);
    assert!(!app.carousel().is_animating());
}

#[test]
fn rapid_navigation_lets_the_first_timer_end_the_fade() {
    let mut timers = ManualScheduler::new();
    let mut app = app();
    unlock(&mut app, &mut timers);

    app.key_down("ArrowRight", &mut timers);
    tick(&mut app, &mut timers, 300);
    app.key_down("ArrowRight", &mut timers);
    assert_eq!(app.carousel().previous_index(), Some(1));
    assert_eq!(app.carousel().current_index(), 2);

    // the first navigation's timer is not cancelled
    assert_eq!(tick(&mut app, &mut timers, 150), vec![Task::EndTransition]);
    assert!(!app.carousel().is_animating());
    assert_eq!(tick(&mut app, &mut timers, 300), vec![Task::EndTransition]);
    assert!(!app.carousel().is_animating());
}

#[test]
fn slot_with_no_loadable_extension_is_never_rendered() {
    let mut timers = ManualScheduler::new();
    let mut app = app();
    unlock(&mut app, &mut timers);

    let candidates = app.config().extensions.clone();
    for ext in &candidates {
        app.image_failed(5, &format!("/photo6.{ext}"), &mut timers);
    }
    assert!(!app.carousel().resolver().is_available(5));

    for _ in 0..5 {
        app.key_down("ArrowRight", &mut timers);
        let view = app.carousel_view().expect("unlocked");
        for slide in [view.prev_thumb, view.outgoing, view.incoming, view.next_thumb]
            .into_iter()
            .flatten()
        {
            assert_ne!(slide.slot, 5);
        }
    }
    assert_eq!(app.carousel().current_index(), 5);
}

#[test]
fn fallback_finds_a_later_extension() {
    let mut timers = ManualScheduler::new();
    let mut app = app();
    unlock(&mut app, &mut timers);

    for ext in ["jpg", "JPG", "jpeg", "JPEG"] {
        app.image_failed(0, &format!("/photo1.{ext}"), &mut timers);
    }
    let view = app.carousel_view().expect("unlocked");
    assert_eq!(view.incoming.map(|s| s.src).as_deref(), Some("/photo1.PNG"));
    assert_eq!(app.carousel().current_index(), 0);
}

#[test]
fn current_slot_failing_completely_moves_the_carousel_on() {
    let mut timers = ManualScheduler::new();
    let mut app = app();
    unlock(&mut app, &mut timers);

    let attempts = app.config().extensions.len();
    for _ in 0..attempts {
        app.image_error(0, &mut timers);
    }
    assert_eq!(app.carousel().current_index(), 1);
    assert!(app.carousel().is_animating());
    tick(&mut app, &mut timers, 450);
    assert!(!app.carousel().is_animating());
}
