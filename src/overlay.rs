// Puts the particle field on the page: creates the canvas, keeps it sized
// to its host, feeds it pointer positions and drives it every frame.

use crate::field::ParticleField;
use crate::renderer::Renderer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, MouseEvent, Window};

pub const CANVAS_ID: &str = "particle-canvas";
pub const HOST_ID: &str = "tsparticles";
pub const HERO_SELECTOR: &str = ".hero";
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

const CANVAS_STYLE: [(&str, &str); 6] = [
    ("position", "absolute"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("pointer-events", "none"),
];

pub fn prefers_reduced_motion(window: &Window) -> bool {
    match window.match_media(REDUCED_MOTION_QUERY) {
        Ok(Some(query)) => query.matches(),
        _ => false,
    }
}

pub struct ParticleOverlay {
    window: Window,
    host: Element,
    canvas: HtmlCanvasElement,
    renderer: Renderer,
    field: ParticleField,
    resize_pending: bool,
}

impl ParticleOverlay {
    /// Creates and attaches the canvas. Returns None without touching the
    /// document when reduced motion is requested or there is no host.
    pub fn mount(
        window: &Window,
        document: &Document,
        reduced_motion: bool,
    ) -> Result<Option<ParticleOverlay>, JsValue> {
        if reduced_motion {
            return Ok(None);
        }

        let (host, as_first_child) = match document.get_element_by_id(HOST_ID) {
            Some(host) => (host, false),
            None => match document.query_selector(HERO_SELECTOR)? {
                Some(hero) => (hero, true),
                None => return Ok(None),
            },
        };

        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()?;
        canvas.set_id(CANVAS_ID);
        let style = canvas.style();
        for (property, value) in CANVAS_STYLE.iter() {
            style.set_property(property, value)?;
        }

        if as_first_child {
            host.insert_before(&canvas, host.first_child().as_ref())?;
        } else {
            host.append_child(&canvas)?;
        }

        let renderer = Renderer::new(&canvas)?;
        let mut overlay = ParticleOverlay {
            window: window.clone(),
            host,
            canvas,
            renderer,
            field: ParticleField::new(),
            resize_pending: false,
        };
        overlay.reinitialize();
        Ok(Some(overlay))
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    // Size the canvas to the host's box and respawn the particles
    pub fn reinitialize(&mut self) {
        let rect = self.host.get_bounding_client_rect();
        let width = rect.width().max(0.0).floor();
        let height = rect.height().max(0.0).floor();
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.field
            .reinitialize(width, height, &mut rand::thread_rng());
    }

    pub fn resize_pending(&self) -> bool {
        self.resize_pending
    }

    /// Marks a resize as pending. Returns false when one is already waiting
    /// for the next frame, in which case nothing new should be scheduled.
    pub fn schedule_resize(&mut self) -> bool {
        if self.resize_pending {
            return false;
        }
        self.resize_pending = true;
        true
    }

    // Runs on the frame after a resize
    pub fn resize_frame(&mut self) {
        self.resize_pending = false;
        self.reinitialize();
    }

    pub fn frame(&mut self) {
        self.field.tick(&mut self.renderer);
    }

    fn track_pointer(&mut self, event: &MouseEvent) {
        let rect = self.canvas.get_bounding_client_rect();
        self.field.set_pointer(
            event.client_x() as f64 - rect.left(),
            event.client_y() as f64 - rect.top(),
        );
    }

    /// Hooks up pointer and resize listeners and starts the frame loop.
    /// Nothing is ever unregistered; the overlay lives as long as the page.
    pub fn run(self) -> Result<(), JsValue> {
        let window = self.window.clone();
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        let overlay = Rc::new(RefCell::new(self));

        {
            let overlay = overlay.clone();
            let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
                overlay.borrow_mut().track_pointer(&event);
            }) as Box<dyn FnMut(_)>);
            window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
            on_move.forget();
        }

        // mouseleave on the root element fires when the pointer leaves the viewport
        if let Some(root) = document.document_element() {
            let overlay = overlay.clone();
            let on_leave = Closure::wrap(Box::new(move |_: MouseEvent| {
                overlay.borrow_mut().field.clear_pointer();
            }) as Box<dyn FnMut(_)>);
            root.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;
            on_leave.forget();
        }

        {
            let resize_frame = {
                let overlay = overlay.clone();
                Closure::wrap(Box::new(move || {
                    overlay.borrow_mut().resize_frame();
                }) as Box<dyn FnMut()>)
            };
            let overlay = overlay.clone();
            let window_k = window.clone();
            let on_resize = Closure::wrap(Box::new(move || {
                let mut overlay = overlay.borrow_mut();
                if !overlay.schedule_resize() {
                    return;
                }
                if let Err(e) = window_k.request_animation_frame(resize_frame.as_ref().unchecked_ref()) {
                    console_warn!("particles: could not schedule resize: {:?}", e);
                    overlay.resize_frame();
                }
            }) as Box<dyn FnMut()>);
            window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
            on_resize.forget();
        }

        // `f` holds the animation-frame closure so it can keep requesting itself
        let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();
        let window_k = window.clone();
        *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            overlay.borrow_mut().frame();
            if let Some(next) = f.borrow().as_ref() {
                if let Err(e) = window_k.request_animation_frame(next.as_ref().unchecked_ref()) {
                    console_warn!("particles: animation stopped: {:?}", e);
                }
            }
        }) as Box<dyn FnMut()>));

        if let Some(first) = g.borrow().as_ref() {
            window.request_animation_frame(first.as_ref().unchecked_ref())?;
        }
        Ok(())
    }
}

/// Window `load` handler: mounts the overlay unless the user asked for
/// reduced motion or the page has nowhere to put it.
pub fn launch(window: &Window) -> Result<(), JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let reduced_motion = prefers_reduced_motion(window);
    match ParticleOverlay::mount(window, &document, reduced_motion)? {
        Some(overlay) => {
            console_log!(
                "particles: {} particles on a {}x{} canvas",
                overlay.field().particles().len(),
                overlay.field().width(),
                overlay.field().height()
            );
            overlay.run()
        }
        None => Ok(()),
    }
}
