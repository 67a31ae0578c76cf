//! [`Surface`] backed by a `<canvas>` 2D context.
//!
//! This is the only module that touches [`web_sys::CanvasRenderingContext2d`].
//! Fallible context calls come back as [`SurfaceError::Backend`].

use crate::geometry::Point;
use crate::surface::{Paint, Surface, SurfaceError, SurfaceResult, TextAlign};
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

fn js_err(e: JsValue) -> SurfaceError {
    SurfaceError::Backend(format!("{:?}", e))
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Result<Self, SurfaceError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_err)?
            .ok_or_else(|| SurfaceError::Unavailable(canvas.id()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| SurfaceError::Unavailable(canvas.id()))?;
        ctx.set_text_baseline("middle");
        Ok(CanvasSurface { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn set_size(&mut self, width: f64, height: f64) {
        // Resizing a canvas resets its context state, baseline included.
        self.canvas.set_width(width.max(0.0).round() as u32);
        self.canvas.set_height(height.max(0.0).round() as u32);
        self.ctx.set_text_baseline("middle");
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_fill(&mut self, paint: &Paint) -> SurfaceResult {
        match paint {
            Paint::Color(color) => self.ctx.set_fill_style_str(color),
            Paint::Radial(g) => {
                let gradient = self
                    .ctx
                    .create_radial_gradient(
                        g.center.x,
                        g.center.y,
                        g.inner_radius,
                        g.center.x,
                        g.center.y,
                        g.outer_radius,
                    )
                    .map_err(js_err)?;
                for stop in &g.stops {
                    gradient
                        .add_color_stop(stop.offset as f32, &stop.color)
                        .map_err(js_err)?;
                }
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
        Ok(())
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(align.as_css());
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, p: Point) {
        self.ctx.move_to(p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        self.ctx.line_to(p.x, p.y);
    }

    fn arc(&mut self, center: Point, radius: f64) -> SurfaceResult {
        self.ctx
            .arc(center.x, center.y, radius, 0.0, TAU)
            .map_err(js_err)
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn stroke_text(&mut self, text: &str, at: Point) -> SurfaceResult {
        self.ctx.stroke_text(text, at.x, at.y).map_err(js_err)
    }

    fn fill_text(&mut self, text: &str, at: Point) -> SurfaceResult {
        self.ctx.fill_text(text, at.x, at.y).map_err(js_err)
    }

    fn measure_text(&mut self, text: &str) -> Result<f64, SurfaceError> {
        Ok(self.ctx.measure_text(text).map_err(js_err)?.width())
    }
}
