//! Application-level configuration constants.

// Colors
pub const DEFAULT_CHART_COLOR: &str = "#92dfec";
pub const FILL_ALPHA: f64 = 0.75;
pub const GRADIENT_HIGHLIGHT: &str = "#f4fdff";
pub const SPOKE_COLOR: &str = "#6db5c0";
pub const OUTLINE_COLOR: &str = "#184046";
pub const GRID_COLOR: &str = "#184046";
pub const LABEL_FILL_COLOR: &str = "#ffffff";
pub const POINT_FILL_COLOR: &str = "#ffffff";

// Gradient stop offsets for the pentagon background
pub const GRADIENT_HIGHLIGHT_STOP: f64 = 0.0;
pub const GRADIENT_ACCENT_STOP: f64 = 0.25;

// Line widths (px)
pub const SPOKE_WIDTH: f64 = 1.0;
pub const OUTLINE_WIDTH: f64 = 3.0;
pub const DATASET_BORDER_WIDTH: f64 = 2.0;
pub const LABEL_STROKE_WIDTH: f64 = 3.0;
pub const POINT_RADIUS: f64 = 5.0;

// Labels
pub const LABEL_FONT: &str = "italic 16px Candara";
pub const LABEL_OFFSET_LIVE: f64 = 20.0;
pub const LABEL_OFFSET_OVERLAY: f64 = 30.0;

// Chart scale
pub const STAT_CAP: f64 = 10.0;
pub const GRID_RINGS: usize = 5;
pub const CHART_PADDING: f64 = 40.0;

// UI Behavior
pub const OVERLAY_SETTLE_MS: u32 = 150;

// Canvas sizes (CSS pixels)
pub const LIVE_CANVAS_SIZE: u32 = 360;
pub const OVERLAY_CANVAS_SIZE: u32 = 300;

// Export
pub const DEFAULT_EXPORT_FILENAME: &str = "character_chart.png";
pub const EXPORT_FILE_SUFFIX: &str = "_card.png";
pub const CARD_ELEMENT_ID: &str = "characterBox";
pub const EXPORT_CONTROL_IDS: [&str; 2] = ["closeBtn", "downloadBtn"];

// Text shown in place of blank card fields
pub const BLANK_FIELD: &str = "-";
