/*
 * Renderer Module
 *
 * This module provides NannouSurface, the DrawingSurface used by the window
 * shell, and the view function that presents it.
 *
 * The surface records into a nannou `Draw`. Canvas coordinates (origin at
 * the top-left, y down) are mapped into nannou's window space (origin at the
 * center, y up). A full clear resets the `Draw`, so every animation frame
 * starts from an empty command list.
 */

use log::error;
use nannou::prelude::*;

use crate::app::Model;
use crate::palette::Color;
use crate::surface::{DrawingSurface, Path, PathSegment, Size};

pub struct NannouSurface {
    draw: Draw,
    displayed: Size,
    backing: Size,
    background: Color,
    path: Path,
    fill_color: Color,
    stroke_color: Color,
    line_width: f32,
}

impl NannouSurface {
    pub fn new(draw: Draw, displayed: Size, background: Color) -> Self {
        Self {
            draw,
            displayed,
            backing: displayed,
            background,
            path: Path::default(),
            fill_color: Color::rgba(0, 0, 0, 1.0),
            stroke_color: Color::rgba(0, 0, 0, 1.0),
            line_width: 1.0,
        }
    }

    pub fn draw(&self) -> &Draw {
        &self.draw
    }

    // The window (the surface's container) was laid out at a new size
    pub fn set_displayed_size(&mut self, size: Size) {
        self.displayed = size;
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    fn to_window(&self, point: Vec2) -> Point2 {
        pt2(
            point.x - self.backing.width / 2.0,
            self.backing.height / 2.0 - point.y,
        )
    }
}

pub fn to_srgba(color: Color) -> Srgba {
    let (r, g, b, a) = color.to_f32();
    srgba(r, g, b, a)
}

impl DrawingSurface for NannouSurface {
    fn displayed_size(&self) -> Size {
        self.displayed
    }

    fn set_backing_size(&mut self, size: Size) {
        self.backing = size;
        self.draw.reset();
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let covers_all = x <= 0.0
            && y <= 0.0
            && x + width >= self.backing.width
            && y + height >= self.backing.height;

        if covers_all {
            self.draw.reset();
        } else {
            let center = self.to_window(vec2(x + width / 2.0, y + height / 2.0));
            self.draw
                .rect()
                .xy(center)
                .w_h(width, height)
                .color(to_srgba(self.background));
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn close_path(&mut self) {
        self.path.push(PathSegment::Close);
    }

    fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32) {
        self.path.push(PathSegment::Arc {
            center,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn move_to(&mut self, point: Vec2) {
        self.path.push(PathSegment::MoveTo(point));
    }

    fn line_to(&mut self, point: Vec2) {
        self.path.push(PathSegment::LineTo(point));
    }

    fn fill(&mut self) {
        let color = to_srgba(self.fill_color);
        for (center, radius) in self.path.discs() {
            self.draw
                .ellipse()
                .xy(self.to_window(center))
                .radius(radius)
                .color(color);
        }
    }

    fn stroke(&mut self) {
        let color = to_srgba(self.stroke_color);
        for (from, to) in self.path.lines() {
            self.draw
                .line()
                .start(self.to_window(from))
                .end(self.to_window(to))
                .weight(self.line_width)
                .color(color);
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    frame.clear(to_srgba(model.background()));

    if let Some(animator) = &model.animator {
        if let Err(err) = animator.surface().draw().to_frame(app, &frame) {
            error!("failed to render particle field: {:?}", err);
        }
    }

    // Draw the egui UI
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        error!("failed to render controls: {:?}", err);
    }
}
