/*
 * Surface Module
 *
 * This module defines the DrawingSurface trait, a 2D immediate-mode drawing
 * context in the style of an HTML canvas: set a style, build a path, then
 * fill or stroke it. Coordinates have their origin at the top-left corner
 * with y growing downwards.
 *
 * It also provides:
 * - Path, the shared path model both surfaces interpret on fill/stroke
 * - RecordingSurface, which keeps every command for inspection
 */

use nannou::prelude::*;

use crate::palette::Color;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

pub trait DrawingSurface {
    /// Size the surface is currently displayed at, as laid out by its container.
    fn displayed_size(&self) -> Size;

    /// Resolution of the backing store drawn into.
    fn set_backing_size(&mut self, size: Size);

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn begin_path(&mut self);
    fn close_path(&mut self);
    fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32);
    fn move_to(&mut self, point: Vec2);
    fn line_to(&mut self, point: Vec2);
    fn fill(&mut self);
    fn stroke(&mut self);
    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f32);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    Arc {
        center: Vec2,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    },
    Close,
}

// The current path of a surface, rebuilt after every begin_path
#[derive(Clone, Debug, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    // Discs to paint when the path is filled (center, radius)
    pub fn discs(&self) -> impl Iterator<Item = (Vec2, f32)> + '_ {
        self.segments.iter().filter_map(|segment| match *segment {
            PathSegment::Arc { center, radius, .. } => Some((center, radius)),
            _ => None,
        })
    }

    // Straight segments to paint when the path is stroked
    pub fn lines(&self) -> Vec<(Vec2, Vec2)> {
        let mut lines = Vec::new();
        let mut subpath_start: Option<Vec2> = None;
        let mut cursor: Option<Vec2> = None;

        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(p) => {
                    subpath_start = Some(p);
                    cursor = Some(p);
                }
                PathSegment::LineTo(p) => {
                    if let Some(from) = cursor {
                        lines.push((from, p));
                    } else {
                        subpath_start = Some(p);
                    }
                    cursor = Some(p);
                }
                PathSegment::Close => {
                    if let (Some(from), Some(to)) = (cursor, subpath_start) {
                        if from != to {
                            lines.push((from, to));
                        }
                    }
                    cursor = subpath_start;
                }
                PathSegment::Arc { .. } => {}
            }
        }

        lines
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    SetBackingSize(Size),
    ClearRect { x: f32, y: f32, width: f32, height: f32 },
    BeginPath,
    ClosePath,
    Arc { center: Vec2, radius: f32, start_angle: f32, end_angle: f32 },
    MoveTo(Vec2),
    LineTo(Vec2),
    Fill,
    Stroke,
    SetFillColor(Color),
    SetStrokeColor(Color),
    SetLineWidth(f32),
}

// Geometry that actually reached the surface
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Disc { center: Vec2, radius: f32, color: Color },
    Line { from: Vec2, to: Vec2, color: Color, width: f32 },
}

/// A surface that draws nothing and remembers everything. Used as the fake
/// in tests and benchmarks.
///
/// The command log keeps growing until it is drained with `take_commands`,
/// so a long run must drain it every frame.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    displayed: Size,
    backing: Size,
    commands: Vec<DrawCommand>,
    // Shapes painted since the last full clear
    visible: Vec<Shape>,
    path: Path,
    fill_color: Color,
    stroke_color: Color,
    line_width: f32,
}

impl RecordingSurface {
    pub fn new(displayed: Size) -> Self {
        Self {
            displayed,
            backing: Size::default(),
            commands: Vec::new(),
            visible: Vec::new(),
            path: Path::default(),
            fill_color: Color::rgba(0, 0, 0, 1.0),
            stroke_color: Color::rgba(0, 0, 0, 1.0),
            line_width: 1.0,
        }
    }

    // Simulates the container being laid out at a new size
    pub fn set_displayed_size(&mut self, size: Size) {
        self.displayed = size;
    }

    pub fn backing_size(&self) -> Size {
        self.backing
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn visible_shapes(&self) -> &[Shape] {
        &self.visible
    }

    pub fn visible_discs(&self) -> impl Iterator<Item = &Shape> {
        self.visible.iter().filter(|s| matches!(s, Shape::Disc { .. }))
    }

    pub fn visible_lines(&self) -> impl Iterator<Item = &Shape> {
        self.visible.iter().filter(|s| matches!(s, Shape::Line { .. }))
    }

    fn covers_backing(&self, x: f32, y: f32, width: f32, height: f32) -> bool {
        x <= 0.0 && y <= 0.0 && x + width >= self.backing.width && y + height >= self.backing.height
    }
}

impl DrawingSurface for RecordingSurface {
    fn displayed_size(&self) -> Size {
        self.displayed
    }

    fn set_backing_size(&mut self, size: Size) {
        // Resizing a canvas backing store wipes it
        self.backing = size;
        self.visible.clear();
        self.commands.push(DrawCommand::SetBackingSize(size));
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if self.covers_backing(x, y, width, height) {
            self.visible.clear();
        }
        self.commands.push(DrawCommand::ClearRect { x, y, width, height });
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.commands.push(DrawCommand::BeginPath);
    }

    fn close_path(&mut self) {
        self.path.push(PathSegment::Close);
        self.commands.push(DrawCommand::ClosePath);
    }

    fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32) {
        self.path.push(PathSegment::Arc { center, radius, start_angle, end_angle });
        self.commands.push(DrawCommand::Arc { center, radius, start_angle, end_angle });
    }

    fn move_to(&mut self, point: Vec2) {
        self.path.push(PathSegment::MoveTo(point));
        self.commands.push(DrawCommand::MoveTo(point));
    }

    fn line_to(&mut self, point: Vec2) {
        self.path.push(PathSegment::LineTo(point));
        self.commands.push(DrawCommand::LineTo(point));
    }

    fn fill(&mut self) {
        let color = self.fill_color;
        let discs: Vec<_> = self.path.discs().collect();
        self.visible
            .extend(discs.into_iter().map(|(center, radius)| Shape::Disc { center, radius, color }));
        self.commands.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        let color = self.stroke_color;
        let width = self.line_width;
        for (from, to) in self.path.lines() {
            self.visible.push(Shape::Line { from, to, color, width });
        }
        self.commands.push(DrawCommand::Stroke);
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
        self.commands.push(DrawCommand::SetFillColor(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
        self.commands.push(DrawCommand::SetStrokeColor(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
        self.commands.push(DrawCommand::SetLineWidth(width));
    }
}
