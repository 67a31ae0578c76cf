//! Radar chart controller.
//!
//! A controller owns one drawing surface, the stats it shows, and the colors
//! derived from the accent. It starts `Uninitialized` and becomes `Ready` once
//! it is given a surface. After that it is only resized and redrawn, never
//! rebuilt.

use crate::color::{to_rgba, ColorError};
use crate::config::*;
use crate::geometry::{anchor_for_area, auto_scale_max, RadarAnchor};
use crate::render::{
    BackgroundRenderer, DatasetRenderer, Frame, GridRenderer, LabelRenderer, RenderHook,
};
use crate::stats::{StatVector, STAT_LABELS};
use crate::surface::{Surface, SurfaceError};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug)]
pub enum ChartError {
    /// The chart has no surface yet.
    NotReady(&'static str),
    Color(ColorError),
    Surface(SurfaceError),
    Config(String),
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::NotReady(name) => write!(f, "The {} chart has not been initialized", name),
            ChartError::Color(e) => write!(f, "{}", e),
            ChartError::Surface(e) => write!(f, "{}", e),
            ChartError::Config(msg) => write!(f, "Invalid chart config: {}", msg),
        }
    }
}

impl std::error::Error for ChartError {}

impl From<ColorError> for ChartError {
    fn from(e: ColorError) -> Self {
        ChartError::Color(e)
    }
}

impl From<SurfaceError> for ChartError {
    fn from(e: SurfaceError) -> Self {
        ChartError::Surface(e)
    }
}

/// Stroke and fill colors of the stat polygon. The fill is always derived
/// from the stroke at [`FILL_ALPHA`], so there is no way to set it directly.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartAppearance {
    stroke: String,
    fill: String,
}

impl ChartAppearance {
    pub fn from_accent(hex: &str) -> Result<Self, ColorError> {
        let fill = to_rgba(hex, FILL_ALPHA)?;
        Ok(ChartAppearance {
            stroke: hex.trim().to_string(),
            fill,
        })
    }

    pub fn stroke(&self) -> &str {
        &self.stroke
    }

    pub fn fill(&self) -> &str {
        &self.fill
    }
}

impl Default for ChartAppearance {
    fn default() -> Self {
        ChartAppearance {
            stroke: DEFAULT_CHART_COLOR.to_string(),
            fill: format!("rgba(146,223,236,{})", FILL_ALPHA),
        }
    }
}

/// Upper end of the radial scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMax {
    /// Round the largest stat up to a whole number.
    Auto,
    Fixed(f64),
}

impl ScaleMax {
    pub fn resolve(self, values: &[f64]) -> f64 {
        match self {
            ScaleMax::Auto => auto_scale_max(values),
            ScaleMax::Fixed(max) => max,
        }
    }
}

/// Per-chart settings. The two charts on the page differ in scale, label
/// offset, and which layers they draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub label_offset: f64,
    pub scale_max: ScaleMax,
    pub interactive: bool,
    pub background: bool,
    pub grid: bool,
    pub padding: f64,
    /// Fixed center and radius. When set, resizing keeps this anchor instead
    /// of re-centering on the surface.
    pub pinned_anchor: Option<RadarAnchor>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::live()
    }
}

impl ChartConfig {
    /// The editing chart: uncapped values, point markers, no pentagon backdrop.
    pub fn live() -> Self {
        ChartConfig {
            label_offset: LABEL_OFFSET_LIVE,
            scale_max: ScaleMax::Auto,
            interactive: true,
            background: false,
            grid: true,
            padding: CHART_PADDING,
            pinned_anchor: None,
        }
    }

    /// The card chart: fixed 0..10 scale over the gradient pentagon.
    pub fn overlay() -> Self {
        ChartConfig {
            label_offset: LABEL_OFFSET_OVERLAY,
            scale_max: ScaleMax::Fixed(STAT_CAP),
            interactive: false,
            background: true,
            grid: false,
            padding: CHART_PADDING,
            pinned_anchor: None,
        }
    }

    /// Apply a JSON object of field overrides on top of `self`.
    pub fn with_overrides(self, json: &str) -> Result<Self, ChartError> {
        let overrides: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ChartError::Config(e.to_string()))?;
        let serde_json::Value::Object(overrides) = overrides else {
            return Err(ChartError::Config("expected a JSON object".into()));
        };

        let mut merged = serde_json::to_value(&self).map_err(|e| ChartError::Config(e.to_string()))?;
        if let serde_json::Value::Object(fields) = &mut merged {
            for (key, value) in overrides {
                if !fields.contains_key(&key) {
                    return Err(ChartError::Config(format!("unknown field '{}'", key)));
                }
                fields.insert(key, value);
            }
        }
        serde_json::from_value(merged).map_err(|e| ChartError::Config(e.to_string()))
    }

    /// Layers implied by the flags, in drawing order. Labels are not among
    /// them; the controller always draws those last.
    fn default_layers(&self) -> Vec<Box<dyn RenderHook>> {
        let mut layers: Vec<Box<dyn RenderHook>> = Vec::new();
        if self.background {
            layers.push(Box::new(BackgroundRenderer));
        }
        if self.grid {
            layers.push(Box::new(GridRenderer::default()));
        }
        layers.push(Box::new(DatasetRenderer));
        layers
    }
}

enum ChartState<S> {
    Uninitialized,
    Ready(S),
}

pub struct ChartController<S: Surface> {
    name: &'static str,
    config: ChartConfig,
    state: ChartState<S>,
    layers: Vec<Box<dyn RenderHook>>,
    labels: LabelRenderer,
    stats: StatVector,
    appearance: ChartAppearance,
    anchor: Option<RadarAnchor>,
}

impl<S: Surface> ChartController<S> {
    pub fn new(name: &'static str, config: ChartConfig) -> Self {
        let layers = config.default_layers();
        ChartController {
            name,
            config,
            state: ChartState::Uninitialized,
            layers,
            labels: LabelRenderer,
            stats: StatVector::zero(),
            appearance: ChartAppearance::default(),
            anchor: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ChartState::Ready(_))
    }

    pub fn surface(&self) -> Option<&S> {
        match &self.state {
            ChartState::Ready(surface) => Some(surface),
            ChartState::Uninitialized => None,
        }
    }

    pub fn stats(&self) -> StatVector {
        self.stats
    }

    pub fn appearance(&self) -> &ChartAppearance {
        &self.appearance
    }

    /// Anchor used by the last rendered frame.
    pub fn anchor(&self) -> Option<RadarAnchor> {
        self.anchor
    }

    pub fn layer_names(&self) -> Vec<&'static str> {
        self.layers
            .iter()
            .map(|l| l.name())
            .chain(std::iter::once(self.labels.name()))
            .collect()
    }

    /// Add a layer above the existing ones but still beneath the labels.
    pub fn register_layer(&mut self, layer: Box<dyn RenderHook>) {
        debug!("{} chart: registering layer '{}'", self.name, layer.name());
        self.layers.push(layer);
    }

    /// Bind `surface` unless the chart is already ready. Returns whether the
    /// surface was taken; a ready chart keeps its original surface.
    pub fn ensure_ready(&mut self, surface: S) -> bool {
        if self.is_ready() {
            return false;
        }
        let (w, h) = surface.size();
        info!("{} chart ready ({}x{})", self.name, w, h);
        self.state = ChartState::Ready(surface);
        true
    }

    /// Store new data and colors without drawing.
    pub fn bind(&mut self, stats: StatVector, appearance: ChartAppearance) {
        self.stats = stats;
        self.appearance = appearance;
    }

    /// Bind new data and colors, then redraw.
    pub fn refresh(&mut self, stats: StatVector, appearance: ChartAppearance) -> Result<(), ChartError> {
        self.bind(stats, appearance);
        self.render()
    }

    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), ChartError> {
        match &mut self.state {
            ChartState::Ready(surface) => surface.set_size(width, height),
            ChartState::Uninitialized => return Err(ChartError::NotReady(self.name)),
        }
        self.render()
    }

    /// Redraw the current data with every registered layer, in order.
    pub fn render(&mut self) -> Result<(), ChartError> {
        let surface = match &mut self.state {
            ChartState::Ready(surface) => surface,
            ChartState::Uninitialized => return Err(ChartError::NotReady(self.name)),
        };

        let (width, height) = surface.size();
        let anchor = self
            .config
            .pinned_anchor
            .unwrap_or_else(|| anchor_for_area(width, height, self.config.padding));
        self.anchor = Some(anchor);

        let values = self.stats.values();
        let frame = Frame {
            anchor,
            labels: &STAT_LABELS,
            values: &values,
            scale_max: self.config.scale_max.resolve(&values),
            label_offset: self.config.label_offset,
            interactive: self.config.interactive,
            appearance: &self.appearance,
        };

        surface.clear();
        for layer in &self.layers {
            layer.draw(&mut *surface, &frame)?;
        }
        self.labels.draw(&mut *surface, &frame)?;
        debug!(
            "{} chart rendered {:?} on scale 0..{} with {} layers",
            self.name,
            values,
            frame.scale_max,
            self.layers.len() + 1
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::surface::{DrawOp, Paint, RecordingSurface};
    use approx::assert_abs_diff_eq;
    use test_log::test;

    fn ready(config: ChartConfig) -> ChartController<RecordingSurface> {
        let mut chart = ChartController::new("test", config);
        assert!(chart.ensure_ready(RecordingSurface::new(300.0, 300.0)));
        chart
    }

    #[test]
    fn appearance_fill_follows_stroke() {
        let look = ChartAppearance::from_accent("#92dfec").unwrap();
        assert_eq!(look.stroke(), "#92dfec");
        assert_eq!(look.fill(), "rgba(146,223,236,0.75)");
        assert_eq!(ChartAppearance::default(), look);
        assert!(ChartAppearance::from_accent("teal").is_err());
    }

    #[test]
    fn refresh_before_ready_stores_data_but_fails() {
        let mut chart: ChartController<RecordingSurface> = ChartController::new("overlay", ChartConfig::overlay());
        let stats = StatVector::new([1.0, 2.0, 3.0, 4.0, 5.0]);
        let err = chart.refresh(stats, ChartAppearance::default()).unwrap_err();
        assert!(matches!(err, ChartError::NotReady("overlay")));
        assert_eq!(chart.stats(), stats);
        assert!(chart.anchor().is_none());
    }

    #[test]
    fn ensure_ready_is_idempotent() {
        let mut chart = ready(ChartConfig::live());
        assert!(!chart.ensure_ready(RecordingSurface::new(10.0, 10.0)));
        assert_eq!(chart.surface().unwrap().size(), (300.0, 300.0));
    }

    #[test]
    fn live_and_overlay_layer_stacks() {
        let live: ChartController<RecordingSurface> = ChartController::new("live", ChartConfig::live());
        let overlay: ChartController<RecordingSurface> = ChartController::new("overlay", ChartConfig::overlay());
        assert_eq!(live.layer_names(), vec!["grid", "dataset", "labels"]);
        assert_eq!(overlay.layer_names(), vec!["background", "dataset", "labels"]);
    }

    #[test]
    fn background_is_drawn_before_labels() {
        let mut chart = ready(ChartConfig::overlay());
        chart
            .refresh(StatVector::new([10.0, 8.0, 4.0, 10.0, 6.0]), ChartAppearance::default())
            .unwrap();
        let ops = chart.surface().unwrap().ops();
        let gradient = ops
            .iter()
            .position(|op| matches!(op, DrawOp::Fill(Paint::Radial(_))))
            .unwrap();
        let first_label = ops
            .iter()
            .position(|op| matches!(op, DrawOp::StrokeText(..)))
            .unwrap();
        assert!(gradient < first_label);
        assert_eq!(ops.first(), Some(&DrawOp::Clear));
    }

    #[test]
    fn live_chart_has_no_gradient_backdrop() {
        let mut chart = ready(ChartConfig::live());
        chart.render().unwrap();
        let ops = chart.surface().unwrap().ops();
        assert!(!ops.iter().any(|op| matches!(op, DrawOp::Fill(Paint::Radial(_)))));
    }

    #[test]
    fn resize_recenters_unless_pinned() {
        let mut chart = ready(ChartConfig::overlay());
        chart.resize(400.0, 200.0).unwrap();
        let anchor = chart.anchor().unwrap();
        assert_eq!(anchor.center, Point::new(200.0, 100.0));
        assert_abs_diff_eq!(anchor.radius, 100.0 - CHART_PADDING);

        let pinned = RadarAnchor::new(Point::new(120.0, 130.0), 90.0);
        let mut chart = ready(ChartConfig {
            pinned_anchor: Some(pinned),
            ..ChartConfig::overlay()
        });
        chart.resize(640.0, 480.0).unwrap();
        assert_eq!(chart.anchor(), Some(pinned));
        assert_eq!(chart.surface().unwrap().size(), (640.0, 480.0));
    }

    #[test]
    fn registered_layers_draw_beneath_the_labels() {
        struct Cover;
        impl RenderHook for Cover {
            fn name(&self) -> &'static str {
                "cover"
            }
            fn draw(&self, surface: &mut dyn Surface, frame: &Frame<'_>) -> crate::surface::SurfaceResult {
                let anchors = frame.anchor.label_anchors(frame.labels.len(), frame.label_offset);
                surface.polygon(&anchors);
                surface.set_fill(&Paint::from("#000000"))?;
                surface.fill();
                Ok(())
            }
        }

        let mut chart = ready(ChartConfig::overlay());
        chart.register_layer(Box::new(Cover));
        assert_eq!(chart.layer_names(), vec!["background", "dataset", "cover", "labels"]);
        chart.render().unwrap();

        let ops = chart.surface().unwrap().ops();
        let last_label = ops
            .iter()
            .rposition(|op| matches!(op, DrawOp::FillText(..)))
            .unwrap();
        let last_fill = ops.iter().rposition(|op| matches!(op, DrawOp::Fill(_))).unwrap();
        assert!(last_fill < last_label);
        assert_eq!(chart.surface().unwrap().filled_text().last(), Some(&"Defense"));
    }

    #[test]
    fn overrides_merge_over_preset() {
        let config = ChartConfig::overlay()
            .with_overrides(r#"{"label_offset": 55, "scale_max": {"fixed": 20.0}}"#)
            .unwrap();
        assert_eq!(config.label_offset, 55.0);
        assert_eq!(config.scale_max, ScaleMax::Fixed(20.0));
        assert!(config.background);

        assert!(ChartConfig::live().with_overrides("[1, 2]").is_err());
        assert!(ChartConfig::live().with_overrides(r#"{"colour": "red"}"#).is_err());
    }

    #[test]
    fn scale_resolves_auto_and_fixed() {
        let values = [12.0, 8.0, 4.0, 10.0, 6.0];
        assert_eq!(ScaleMax::Auto.resolve(&values), 12.0);
        assert_eq!(ScaleMax::Fixed(10.0).resolve(&values), 10.0);
    }
}
