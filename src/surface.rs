//! Minimal 2D drawing surface the chart renders onto.
//!
//! The browser implementation lives in [`crate::canvas`]. [`RecordingSurface`]
//! keeps every call as a [`DrawOp`] so layer order and styles can be checked
//! without a canvas.

use crate::geometry::Point;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// The backing context refused an operation.
    Backend(String),
    /// No 2D context could be obtained for the element.
    Unavailable(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::Backend(msg) => write!(f, "Drawing surface error: {}", msg),
            SurfaceError::Unavailable(what) => write!(f, "No 2D context available for {}", what),
        }
    }
}

impl std::error::Error for SurfaceError {}

pub type SurfaceResult = Result<(), SurfaceError>;

#[derive(Debug, Clone, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub stops: Vec<GradientStop>,
}

impl RadialGradient {
    /// Concentric gradient from `inner_radius` to `outer_radius` around `center`.
    pub fn new(center: Point, inner_radius: f64, outer_radius: f64) -> Self {
        RadialGradient {
            center,
            inner_radius,
            outer_radius,
            stops: Vec::new(),
        }
    }

    pub fn with_stop(mut self, offset: f64, color: impl Into<String>) -> Self {
        self.stops.push(GradientStop {
            offset,
            color: color.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Color(String),
    Radial(RadialGradient),
}

impl From<&str> for Paint {
    fn from(color: &str) -> Self {
        Paint::Color(color.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Canvas-like drawing operations. State setters follow canvas semantics:
/// they stay in effect until changed or until a matching `restore`.
pub trait Surface {
    /// Drawable size in CSS pixels.
    fn size(&self) -> (f64, f64);
    fn set_size(&mut self, width: f64, height: f64);

    fn clear(&mut self);
    fn save(&mut self);
    fn restore(&mut self);

    fn set_stroke_color(&mut self, color: &str);
    fn set_fill(&mut self, paint: &Paint) -> SurfaceResult;
    fn set_line_width(&mut self, width: f64);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn arc(&mut self, center: Point, radius: f64) -> SurfaceResult;
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn stroke_text(&mut self, text: &str, at: Point) -> SurfaceResult;
    fn fill_text(&mut self, text: &str, at: Point) -> SurfaceResult;
    fn measure_text(&mut self, text: &str) -> Result<f64, SurfaceError>;

    /// Trace a closed polygon through `points` as the current path.
    fn polygon(&mut self, points: &[Point]) {
        self.begin_path();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            self.move_to(*first);
            for p in iter {
                self.line_to(*p);
            }
            self.close_path();
        }
    }
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Save,
    Restore,
    StrokeColor(String),
    Fill(Paint),
    LineWidth(f64),
    Font(String),
    TextAlign(TextAlign),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Arc(Point, f64),
    ClosePath,
    FillPath,
    StrokePath,
    StrokeText(String, Point),
    FillText(String, Point),
}

/// In-memory surface that records calls instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    depth: usize,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        RecordingSurface {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drop recorded calls, keeping the size.
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    /// Current save/restore nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Text of every `fill_text` call, in order.
    pub fn filled_text(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillText(text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn save(&mut self) {
        self.depth += 1;
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.ops.push(DrawOp::Restore);
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.ops.push(DrawOp::StrokeColor(color.to_string()));
    }

    fn set_fill(&mut self, paint: &Paint) -> SurfaceResult {
        self.ops.push(DrawOp::Fill(paint.clone()));
        Ok(())
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(DrawOp::LineWidth(width));
    }

    fn set_font(&mut self, font: &str) {
        self.ops.push(DrawOp::Font(font.to_string()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ops.push(DrawOp::TextAlign(align));
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.ops.push(DrawOp::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.ops.push(DrawOp::LineTo(p));
    }

    fn arc(&mut self, center: Point, radius: f64) -> SurfaceResult {
        if radius < 0.0 {
            return Err(SurfaceError::Backend(format!("negative arc radius {}", radius)));
        }
        self.ops.push(DrawOp::Arc(center, radius));
        Ok(())
    }

    fn close_path(&mut self) {
        self.ops.push(DrawOp::ClosePath);
    }

    fn fill(&mut self) {
        self.ops.push(DrawOp::FillPath);
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::StrokePath);
    }

    fn stroke_text(&mut self, text: &str, at: Point) -> SurfaceResult {
        self.ops.push(DrawOp::StrokeText(text.to_string(), at));
        Ok(())
    }

    fn fill_text(&mut self, text: &str, at: Point) -> SurfaceResult {
        self.ops.push(DrawOp::FillText(text.to_string(), at));
        Ok(())
    }

    fn measure_text(&mut self, text: &str) -> Result<f64, SurfaceError> {
        // Rough fixed-advance estimate; good enough for layout checks.
        Ok(text.chars().count() as f64 * 8.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn polygon_traces_closed_path() {
        let mut s = RecordingSurface::new(10.0, 10.0);
        let pts = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
        s.polygon(&pts);
        assert_eq!(
            s.ops(),
            &[
                DrawOp::BeginPath,
                DrawOp::MoveTo(pts[0]),
                DrawOp::LineTo(pts[1]),
                DrawOp::LineTo(pts[2]),
                DrawOp::ClosePath,
            ]
        );
    }

    #[test]
    fn empty_polygon_only_begins_path() {
        let mut s = RecordingSurface::new(10.0, 10.0);
        s.polygon(&[]);
        assert_eq!(s.ops(), &[DrawOp::BeginPath]);
    }

    #[test]
    fn save_restore_tracks_depth() {
        let mut s = RecordingSurface::new(1.0, 1.0);
        s.save();
        s.save();
        s.restore();
        assert_eq!(s.depth(), 1);
        s.restore();
        s.restore();
        assert_eq!(s.depth(), 0);
    }
}
