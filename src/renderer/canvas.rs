//! Canvas 2D surface for the browser overlay

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Surface;
use crate::error::FxError;
use crate::fx::particle::Color;

/// Overlay canvas plus its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Bind to a canvas element; fails when no 2D context is available
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Result<Self, FxError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| FxError::SurfaceUnavailable(format!("{:?}", e)))?
            .ok_or_else(|| FxError::SurfaceUnavailable("no 2d context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FxError::SurfaceUnavailable("context is not 2d".to_string()))?;
        Ok(Self { canvas, ctx })
    }

    /// Look up the overlay canvas by element id
    pub fn from_element_id(id: &str) -> Result<Self, FxError> {
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .ok_or_else(|| FxError::SurfaceUnavailable(format!("no element #{}", id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| FxError::SurfaceUnavailable(format!("#{} is not a canvas", id)))?;
        Self::from_canvas(canvas)
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn sync_to_viewport(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.ctx.save();
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.fill();
        self.ctx.restore();
    }

    fn fill_square(&mut self, center: Vec2, side: f32, rotation: f32, color: Color, alpha: f32) {
        let half = side as f64 / 2.0;
        self.ctx.save();
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_fill_style_str(&color.to_css());
        let _ = self.ctx.translate(center.x as f64, center.y as f64);
        let _ = self.ctx.rotate(rotation as f64);
        self.ctx.fill_rect(-half, -half, side as f64, side as f64);
        self.ctx.restore();
    }
}
