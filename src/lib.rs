#[macro_use]
mod utils;

pub mod color;
pub mod contact;
pub mod field;
pub mod menu;
pub mod overlay;
pub mod particle;
pub mod pointer;
pub mod renderer;
pub mod year;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Entry point called by the page once the module is loaded. Every
/// enhancement is optional: a missing element just means that piece is
/// skipped, and a failure in one never stops the others.
#[wasm_bindgen]
pub fn initialize() -> Result<(), JsValue> {
    utils::set_panic_hook();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    if let Err(e) = year::stamp(&document) {
        console_warn!("year stamp failed: {:?}", e);
    }

    if let Err(e) = menu::NavMenu::find(&document).and_then(|nav| match nav {
        Some(nav) => nav.bind(&document),
        None => Ok(()),
    }) {
        console_warn!("navigation menu not bound: {:?}", e);
    }

    if let Err(e) = contact::DomForm::find(&window, &document).and_then(|form| match form {
        Some(form) => form.bind(),
        None => Ok(()),
    }) {
        console_warn!("contact form not bound: {:?}", e);
    }

    let on_load = {
        let window = window.clone();
        Closure::once_into_js(move || {
            if let Err(e) = overlay::launch(&window) {
                console_warn!("particle background not started: {:?}", e);
            }
        })
    };
    // The page may have finished loading before the module did
    if document.ready_state() == "complete" {
        window.set_timeout_with_callback(on_load.unchecked_ref())?;
    } else {
        window.add_event_listener_with_callback("load", on_load.unchecked_ref())?;
    }

    Ok(())
}
