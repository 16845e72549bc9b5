//! In-memory surface that records draw calls

use glam::Vec2;

use super::Surface;
use crate::fx::particle::Color;

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
    Square {
        center: Vec2,
        side: f32,
        rotation: f32,
        color: Color,
        alpha: f32,
    },
}

impl DrawCommand {
    pub fn alpha(&self) -> f32 {
        match self {
            DrawCommand::Circle { alpha, .. } | DrawCommand::Square { alpha, .. } => *alpha,
        }
    }
}

/// Surface that keeps the draw calls issued since the last clear
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: (u32, u32),
    viewport: (u32, u32),
    commands: Vec<DrawCommand>,
    clears: usize,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl RecordingSurface {
    /// Surface whose viewport is `width` x `height`; pixel size follows on sync
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (0, 0),
            viewport: (width, height),
            commands: Vec::new(),
            clears: 0,
        }
    }

    /// Simulate the hosting viewport changing size
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    /// Draw calls since the last clear, oldest first
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_blank(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear_count(&self) -> usize {
        self.clears
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn sync_to_viewport(&mut self) {
        self.size = self.viewport;
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn fill_square(&mut self, center: Vec2, side: f32, rotation: f32, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Square {
            center,
            side,
            rotation,
            color,
            alpha,
        });
    }
}
