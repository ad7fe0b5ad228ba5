// Renderer struct that draws the particle field onto a 2D canvas context.
// Drawing goes through the Surface trait so the field can be rendered
// without a browser.

use crate::color::Color;
use std::f64::consts::PI;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_disc(&mut self, center: [f64; 2], radius: f64, color: Color, alpha: f64);
    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, alpha: f64);
}

pub struct Renderer {
    pub context: CanvasRenderingContext2d,
}

impl Renderer {
    pub const LINE_WIDTH: f64 = 1.0;

    // Grabs the 2d context from a canvas on the DOM
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Renderer { context })
    }
}

impl Surface for Renderer {
    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_disc(&mut self, center: [f64; 2], radius: f64, color: Color, alpha: f64) {
        #[allow(deprecated)]
        self.context
            .set_fill_style(&JsValue::from_str(&color.to_css()));
        self.context.set_global_alpha(alpha);
        self.context.begin_path();
        let _ = self.context.arc(center[0], center[1], radius, 0.0, PI * 2.0);
        self.context.close_path();
        self.context.fill();
        self.context.set_global_alpha(1.0);
    }

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], color: Color, alpha: f64) {
        #[allow(deprecated)]
        self.context
            .set_stroke_style(&JsValue::from_str(&color.to_css_with_alpha(alpha)));
        self.context.set_line_width(Renderer::LINE_WIDTH);
        self.context.set_global_alpha(alpha);
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
        self.context.set_global_alpha(1.0);
    }
}
