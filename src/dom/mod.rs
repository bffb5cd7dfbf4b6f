//! Browser glue: builds the markup, forwards page events into [`App`], runs
//! scheduled tasks on `setTimeout`, and re-renders after every state change.
//!
//! Listeners are delegated to the root element and keyed off `data-action`
//! / `data-slot` attributes, so re-rendering the track never drops a
//! listener that is still executing.

use std::cell::RefCell;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlImageElement, HtmlInputElement, KeyboardEvent, Node, Window,
    window,
};

use crate::app::App;
use crate::carousel::{CarouselView, Direction, Slide};
use crate::config::CarouselConfig;
use crate::timing::{Schedule, Scheduler, Task};

mod style;

const ROOT_ID: &str = "app";

struct Mounted {
    app: App,
    prompt: Element,
    carousel: Element,
    track: Element,
    stage: Element,
    // Images currently in the track, indexed like `ROLES`. Patched in place
    // so a class or fallback `src` change does not re-create the element.
    shown: [Option<Shown>; 4],
    _listeners: Vec<EventListener>,
}

struct Shown {
    slide: Slide,
    el: Element,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
    PrevThumb,
    Outgoing,
    Incoming,
    NextThumb,
}

const ROLES: [Role; 4] = [Role::PrevThumb, Role::Outgoing, Role::Incoming, Role::NextThumb];

impl Role {
    fn pick(self, view: &CarouselView) -> Option<&Slide> {
        match self {
            Role::PrevThumb => view.prev_thumb.as_ref(),
            Role::Outgoing => view.outgoing.as_ref(),
            Role::Incoming => view.incoming.as_ref(),
            Role::NextThumb => view.next_thumb.as_ref(),
        }
    }

    fn action(self) -> Option<&'static str> {
        match self {
            Role::PrevThumb => Some("prev"),
            Role::NextThumb => Some("next"),
            Role::Outgoing | Role::Incoming => None,
        }
    }
}

/// How one `<img>` changes between two renders.
#[derive(Debug, PartialEq, Eq)]
enum ImagePatch {
    Keep,
    Remove,
    Insert,
    /// Different slot: a fresh element, so its fade animation starts over.
    Replace,
    /// Same slot: update `src`/`alt`/`class` on the existing element.
    Update,
}

fn image_patch(old: Option<&Slide>, new: Option<&Slide>) -> ImagePatch {
    match (old, new) {
        (None, None) => ImagePatch::Keep,
        (Some(_), None) => ImagePatch::Remove,
        (None, Some(_)) => ImagePatch::Insert,
        (Some(o), Some(n)) if o.slot != n.slot => ImagePatch::Replace,
        (Some(o), Some(n)) if o == n => ImagePatch::Keep,
        (Some(_), Some(_)) => ImagePatch::Update,
    }
}

thread_local! {
    static APP_STATE: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

fn with_app<R>(f: impl FnOnce(&mut Mounted) -> R) -> Option<R> {
    APP_STATE.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// One-shot `setTimeout` per task. Handles are forgotten: tasks cannot be
/// cancelled and running a stale one is harmless.
struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&mut self, schedule: Schedule) {
        let task = schedule.task;
        Timeout::new(schedule.delay_ms, move || {
            with_app(|m| m.app.run(task));
            if task == Task::RevealCarousel {
                gloo::console::log!("memory carousel: revealed");
            }
            render();
        })
        .forget();
    }
}

pub(crate) fn mount(config: CarouselConfig) -> Result<(), JsValue> {
    if APP_STATE.with(|cell| cell.borrow().is_some()) {
        return Ok(());
    }
    let app = App::new(config).map_err(|err| JsValue::from_str(&err.to_string()))?;

    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    install_style(&doc, app.config())?;

    let root = match doc.get_element_by_id(ROOT_ID) {
        Some(el) => el,
        None => {
            let el = doc.create_element("div")?;
            el.set_id(ROOT_ID);
            doc.body()
                .ok_or_else(|| JsValue::from_str("no body"))?
                .append_child(&el)?;
            el
        }
    };
    root.set_class_name("App");
    root.set_attribute("role", "main")?;
    root.set_inner_html("");

    let prompt = build_prompt(&doc, app.config())?;
    let (carousel, track, stage) = build_carousel(&doc)?;
    root.append_child(&prompt)?;
    root.append_child(&carousel)?;

    let listeners = root_listeners(&root);
    install_keyboard(&win)?;

    let slots = app.config().slot_count;
    APP_STATE.with(|cell| {
        *cell.borrow_mut() = Some(Mounted {
            app,
            prompt,
            carousel,
            track,
            stage,
            shown: [None, None, None, None],
            _listeners: listeners,
        })
    });
    gloo::console::log!(format!("memory carousel: mounted with {slots} slots"));
    render();
    Ok(())
}

fn install_style(doc: &Document, config: &CarouselConfig) -> Result<(), JsValue> {
    if doc.get_element_by_id(style::STYLE_ID).is_some() {
        return Ok(());
    }
    let el = doc.create_element("style")?;
    el.set_id(style::STYLE_ID);
    el.set_text_content(Some(&style::stylesheet(
        config.transition_ms,
        config.reveal_delay_ms,
    )));
    match doc.head() {
        Some(head) => head.append_child(&el)?,
        None => doc
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&el)?,
    };
    Ok(())
}

fn element(doc: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = doc.create_element(tag)?;
    el.set_class_name(class);
    Ok(el)
}

fn build_prompt(doc: &Document, config: &CarouselConfig) -> Result<Element, JsValue> {
    let card = element(doc, "div", "prompt-card")?;

    let heading = element(doc, "h1", "prompt-question")?;
    for line in &config.question {
        let span = element(doc, "span", "prompt-line")?;
        span.set_text_content(Some(line));
        heading.append_child(&span)?;
    }
    card.append_child(&heading)?;

    let form = element(doc, "form", "prompt-form")?;
    let label = element(doc, "label", "sr-only")?;
    label.set_attribute("for", "answer")?;
    label.set_text_content(Some("Answer"));
    let input = element(doc, "input", "prompt-input")?;
    input.set_id("answer");
    input.set_attribute("type", "text")?;
    input.set_attribute("placeholder", &config.placeholder)?;
    input.set_attribute("autocomplete", "off")?;
    let submit = element(doc, "button", "sr-only")?;
    submit.set_attribute("type", "submit")?;
    submit.set_text_content(Some("Submit"));
    form.append_child(&label)?;
    form.append_child(&input)?;
    form.append_child(&submit)?;
    card.append_child(&form)?;
    Ok(card)
}

fn build_carousel(doc: &Document) -> Result<(Element, Element, Element), JsValue> {
    let carousel = element(doc, "div", "carousel")?;
    carousel.set_attribute("hidden", "")?;
    let track = element(doc, "div", "carousel-track")?;
    let stage = element(doc, "div", "carousel-stage")?;
    track.append_child(&stage)?;
    let controls = element(doc, "div", "carousel-controls")?;
    for (action, label, glyph) in [
        ("prev", "Previous photo", "◀"),
        ("next", "Next photo", "▶"),
    ] {
        let button = element(doc, "button", "nav-btn")?;
        button.set_attribute("type", "button")?;
        button.set_attribute("data-action", action)?;
        button.set_attribute("aria-label", label)?;
        button.set_text_content(Some(glyph));
        controls.append_child(&button)?;
    }
    carousel.append_child(&track)?;
    carousel.append_child(&controls)?;
    Ok((carousel, track, stage))
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn action_direction(action: &str) -> Option<Direction> {
    match action {
        "prev" => Some(Direction::Prev),
        "next" => Some(Direction::Next),
        _ => None,
    }
}

fn root_listeners(root: &Element) -> Vec<EventListener> {
    let click = EventListener::new(root, "click", |event: &Event| {
        let direction = event_element(event)
            .and_then(|el| el.closest("[data-action]").ok().flatten())
            .and_then(|el| el.get_attribute("data-action"))
            .and_then(|action| action_direction(&action));
        let Some(direction) = direction else {
            return;
        };
        if with_app(|m| m.app.navigate(direction, &mut TimeoutScheduler)).unwrap_or(false) {
            render();
        }
    });

    let input = EventListener::new(root, "input", |event: &Event| {
        if let Some(field) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        {
            let value = field.value();
            with_app(|m| m.app.set_answer(value));
        }
    });

    let submit = EventListener::new_with_options(
        root,
        "submit",
        EventListenerOptions::enable_prevent_default(),
        |event: &Event| {
            event.prevent_default();
            if with_app(|m| m.app.submit(&mut TimeoutScheduler)).unwrap_or(false) {
                gloo::console::log!("memory carousel: unlocked");
                render();
            }
        },
    );

    // `error` does not bubble; catch it on the way down instead.
    let error = EventListener::new_with_options(
        root,
        "error",
        EventListenerOptions::run_in_capture_phase(),
        |event: &Event| {
            let Some(img) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlImageElement>().ok())
            else {
                return;
            };
            let Some(slot) = img
                .get_attribute("data-slot")
                .and_then(|s| s.parse::<usize>().ok())
            else {
                return;
            };
            let src = img.get_attribute("src").unwrap_or_default();
            with_app(|m| m.app.image_failed(slot, &src, &mut TimeoutScheduler));
            render();
        },
    );

    vec![click, input, submit, error]
}

fn install_keyboard(win: &Window) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
        let key = evt.key();
        let consumed =
            with_app(|m| m.app.key_down(&key, &mut TimeoutScheduler)).unwrap_or(false);
        if consumed {
            evt.prevent_default();
            render();
        }
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn render() {
    if let Some(Err(err)) = with_app(render_into) {
        gloo::console::error!("memory carousel: render failed", err);
    }
}

fn render_into(m: &mut Mounted) -> Result<(), JsValue> {
    let gate = m.app.gate();
    let (unlocked, prompt_visible, carousel_visible) = (
        gate.is_unlocked(),
        gate.prompt_visible(),
        gate.carousel_visible(),
    );

    if prompt_visible {
        m.prompt.remove_attribute("hidden")?;
        m.prompt.set_class_name(if unlocked {
            "prompt-card fade-out"
        } else {
            "prompt-card"
        });
    } else {
        m.prompt.set_attribute("hidden", "")?;
    }

    let Some(view) = m.app.carousel_view() else {
        m.carousel.set_attribute("hidden", "")?;
        return Ok(());
    };
    m.carousel.remove_attribute("hidden")?;
    m.carousel.set_class_name(if carousel_visible {
        "carousel show"
    } else {
        "carousel"
    });

    let doc = m
        .track
        .owner_document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    for (idx, role) in ROLES.into_iter().enumerate() {
        let wanted = role.pick(&view);
        let current = m.shown[idx].take();
        let patch = image_patch(current.as_ref().map(|s| &s.slide), wanted);
        m.shown[idx] = match (patch, current, wanted) {
            (ImagePatch::Remove, Some(old), _) => {
                old.el.remove();
                None
            }
            (ImagePatch::Insert, _, Some(slide)) => {
                let el = image(&doc, slide, role.action())?;
                insert_image(role, &el, &m.track, &m.stage)?;
                Some(Shown {
                    slide: slide.clone(),
                    el,
                })
            }
            (ImagePatch::Replace, Some(old), Some(slide)) => {
                let el = image(&doc, slide, role.action())?;
                if let Some(parent) = old.el.parent_node() {
                    parent.replace_child(&el, &old.el)?;
                }
                Some(Shown {
                    slide: slide.clone(),
                    el,
                })
            }
            (ImagePatch::Update, Some(old), Some(slide)) => {
                update_image(&old.el, &old.slide, slide)?;
                Some(Shown {
                    slide: slide.clone(),
                    el: old.el,
                })
            }
            (_, current, _) => current,
        };
    }
    Ok(())
}

fn insert_image(role: Role, el: &Element, track: &Element, stage: &Element) -> Result<(), JsValue> {
    match role {
        Role::PrevThumb => {
            let stage: &Node = stage;
            track.insert_before(el, Some(stage))?;
        }
        // Outgoing stays underneath the incoming slide.
        Role::Outgoing => {
            let first = stage.first_child();
            stage.insert_before(el, first.as_ref())?;
        }
        Role::Incoming => {
            stage.append_child(el)?;
        }
        Role::NextThumb => {
            track.append_child(el)?;
        }
    }
    Ok(())
}

fn update_image(el: &Element, old: &Slide, new: &Slide) -> Result<(), JsValue> {
    if old.src != new.src {
        el.set_attribute("src", &new.src)?;
    }
    if old.alt != new.alt {
        el.set_attribute("alt", &new.alt)?;
    }
    if old.class != new.class {
        el.set_class_name(new.class);
    }
    Ok(())
}

fn image(doc: &Document, slide: &Slide, action: Option<&str>) -> Result<Element, JsValue> {
    let img = element(doc, "img", slide.class)?;
    img.set_attribute("alt", &slide.alt)?;
    img.set_attribute("data-slot", &slide.slot.to_string())?;
    if let Some(action) = action {
        img.set_attribute("data-action", action)?;
    }
    img.set_attribute("src", &slide.src)?;
    Ok(img)
}
