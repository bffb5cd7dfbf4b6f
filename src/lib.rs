//! Memory Carousel core crate.
//!
//! A question prompt guards a looping photo carousel. Each photo slot probes
//! an ordered list of file extensions until one loads; slots that exhaust the
//! list are dropped from display for the rest of the session.
//!
//! The state machine (`app`, `carousel`, `gate`, `timing`) is plain Rust and
//! testable natively; `dom` binds it to the page when built for wasm.

use wasm_bindgen::prelude::*;

pub mod app;
pub mod carousel;
pub mod config;
pub mod gate;
pub mod timing;

mod dom;

pub use app::App;
pub use carousel::{Carousel, CarouselView, Direction, ExtensionResolver, Resolution, ResolveError, Slide};
pub use config::{CarouselConfig, ConfigError};
pub use gate::Gate;
pub use timing::{ManualScheduler, Schedule, Scheduler, Task};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Mount the widget into `#app` (created if missing) with the default config.
#[wasm_bindgen]
pub fn start_app() -> Result<(), JsValue> {
    dom::mount(CarouselConfig::default())
}

/// Mount with a JSON config; fields left out keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_app_with_config(json: &str) -> Result<(), JsValue> {
    let config = CarouselConfig::from_json(json).map_err(|err| JsValue::from_str(&err.to_string()))?;
    dom::mount(config)
}
