//! Canvas2D surface adapter
//!
//! Wraps the browser's `CanvasRenderingContext2d` behind the `Surface`
//! trait. Fallible context calls are ignored here; a failed draw costs one
//! frame, never the run.

use web_sys::CanvasRenderingContext2d;

use super::{Surface, TextAlign};

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Clear the backing store before a frame.
    pub fn clear(&self, w: f32, h: f32) {
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }
}

impl Surface for CanvasSurface {
    fn fill_rect(&mut self, color: &str, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn stroke_rect(&mut self, color: &str, line_width: f32, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_text(&mut self, color: &str, font: &str, align: TextAlign, text: &str, x: f32, y: f32) {
        self.ctx.set_fill_style_str(color);
        self.ctx.set_font(font);
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }

    fn push_translate(&mut self, dx: f32, dy: f32) {
        self.ctx.save();
        let _ = self.ctx.translate(-dx as f64, -dy as f64);
    }

    fn pop_translate(&mut self) {
        self.ctx.restore();
    }
}
