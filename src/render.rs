//! Chart layers. Each layer is a [`RenderHook`] that draws one part of a frame
//! and leaves the surface state as it found it.
//!
//! The controller runs its layers in registration order. The default stack is
//! background, grid, dataset, labels. Labels go last so nothing covers them.

use crate::chart::ChartAppearance;
use crate::config::*;
use crate::geometry::{value_points, Point, RadarAnchor};
use crate::surface::{Paint, RadialGradient, Surface, SurfaceResult, TextAlign};

/// Everything a layer needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub anchor: RadarAnchor,
    pub labels: &'a [&'a str],
    pub values: &'a [f64],
    pub scale_max: f64,
    pub label_offset: f64,
    pub interactive: bool,
    pub appearance: &'a ChartAppearance,
}

impl Frame<'_> {
    pub fn axis_count(&self) -> usize {
        self.labels.len()
    }
}

pub trait RenderHook {
    /// Short identifier, used in logs.
    fn name(&self) -> &'static str;

    fn draw(&self, surface: &mut dyn Surface, frame: &Frame<'_>) -> SurfaceResult;
}

/// Run `body` between `save` and `restore`. The restore happens on the
/// error path too.
pub fn with_saved_state<F>(surface: &mut dyn Surface, body: F) -> SurfaceResult
where
    F: FnOnce(&mut dyn Surface) -> SurfaceResult,
{
    surface.save();
    let result = body(surface);
    surface.restore();
    result
}

fn draw_spokes(surface: &mut dyn Surface, anchor: &RadarAnchor, n: usize) {
    surface.begin_path();
    for vertex in anchor.vertices(n) {
        surface.move_to(anchor.center);
        surface.line_to(vertex);
    }
    surface.stroke();
}

/// Pentagon backdrop: gradient fill, then spokes, then outline.
#[derive(Debug, Clone, Default)]
pub struct BackgroundRenderer;

impl BackgroundRenderer {
    pub fn gradient(anchor: &RadarAnchor, accent: &str) -> RadialGradient {
        RadialGradient::new(anchor.center, 0.0, anchor.radius)
            .with_stop(GRADIENT_HIGHLIGHT_STOP, GRADIENT_HIGHLIGHT)
            .with_stop(GRADIENT_ACCENT_STOP, accent)
            .with_stop(1.0, accent)
    }
}

impl RenderHook for BackgroundRenderer {
    fn name(&self) -> &'static str {
        "background"
    }

    fn draw(&self, surface: &mut dyn Surface, frame: &Frame<'_>) -> SurfaceResult {
        let anchor = frame.anchor;
        let n = frame.axis_count();
        let vertices = anchor.vertices(n);

        with_saved_state(surface, |s| {
            let gradient = Self::gradient(&anchor, frame.appearance.stroke());
            s.set_fill(&Paint::Radial(gradient))?;
            s.polygon(&vertices);
            s.fill();

            s.set_stroke_color(SPOKE_COLOR);
            s.set_line_width(SPOKE_WIDTH);
            draw_spokes(s, &anchor, n);

            s.set_stroke_color(OUTLINE_COLOR);
            s.set_line_width(OUTLINE_WIDTH);
            s.polygon(&vertices);
            s.stroke();
            Ok(())
        })
    }
}

/// Concentric rings plus angle lines, scaled to the chart radius.
#[derive(Debug, Clone)]
pub struct GridRenderer {
    pub rings: usize,
}

impl Default for GridRenderer {
    fn default() -> Self {
        GridRenderer { rings: GRID_RINGS }
    }
}

impl RenderHook for GridRenderer {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn draw(&self, surface: &mut dyn Surface, frame: &Frame<'_>) -> SurfaceResult {
        let anchor = frame.anchor;
        let n = frame.axis_count();
        let rings = self.rings;

        with_saved_state(surface, |s| {
            s.set_stroke_color(GRID_COLOR);
            s.set_line_width(1.0);
            for ring in 1..=rings {
                let r = anchor.radius * ring as f64 / rings as f64;
                s.polygon(&RadarAnchor::new(anchor.center, r).vertices(n));
                s.stroke();
            }

            s.set_stroke_color(SPOKE_COLOR);
            draw_spokes(s, &anchor, n);
            Ok(())
        })
    }
}

/// The stat polygon itself, with point markers on interactive charts.
#[derive(Debug, Clone, Default)]
pub struct DatasetRenderer;

impl RenderHook for DatasetRenderer {
    fn name(&self) -> &'static str {
        "dataset"
    }

    fn draw(&self, surface: &mut dyn Surface, frame: &Frame<'_>) -> SurfaceResult {
        let points = value_points(&frame.anchor, frame.values, frame.scale_max);
        let appearance = frame.appearance;

        with_saved_state(surface, |s| {
            s.set_fill(&Paint::Color(appearance.fill().to_string()))?;
            s.polygon(&points);
            s.fill();
            s.set_stroke_color(appearance.stroke());
            s.set_line_width(DATASET_BORDER_WIDTH);
            s.stroke();

            if frame.interactive {
                s.set_fill(&Paint::from(POINT_FILL_COLOR))?;
                for p in &points {
                    s.begin_path();
                    s.arc(*p, POINT_RADIUS)?;
                    s.fill();
                    s.stroke();
                }
            }
            Ok(())
        })
    }
}

/// Axis labels, outlined in the accent color and filled white.
#[derive(Debug, Clone, Default)]
pub struct LabelRenderer;

impl RenderHook for LabelRenderer {
    fn name(&self) -> &'static str {
        "labels"
    }

    fn draw(&self, surface: &mut dyn Surface, frame: &Frame<'_>) -> SurfaceResult {
        let anchors = frame
            .anchor
            .label_anchors(frame.axis_count(), frame.label_offset);

        with_saved_state(surface, |s| {
            s.set_font(LABEL_FONT);
            s.set_text_align(TextAlign::Center);
            s.set_line_width(LABEL_STROKE_WIDTH);
            s.set_stroke_color(frame.appearance.stroke());
            s.set_fill(&Paint::from(LABEL_FILL_COLOR))?;
            let center = frame.anchor.center;
            for (label, anchor) in frame.labels.iter().zip(anchors) {
                // Push side labels outward by half their width so centered
                // text does not run back over the polygon.
                let side = anchor.x - center.x;
                let at = if side.abs() > 1.0 {
                    let half = s.measure_text(label)? / 2.0;
                    Point::new(anchor.x + side.signum() * half, anchor.y)
                } else {
                    anchor
                };
                s.stroke_text(label, at)?;
                s.fill_text(label, at)?;
            }
            Ok(())
        })
    }
}
