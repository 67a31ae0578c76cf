use log::{error, info, LevelFilter};
use wasm_bindgen::prelude::*;
use wasm_bindgen_console_logger::DEFAULT_LOGGER;

pub mod app;
pub mod browser;
pub mod canvas;
pub mod chart;
pub mod color;
pub mod config;
pub mod export;
pub mod geometry;
pub mod render;
pub mod stats;
pub mod surface;

pub use app::{CardText, CharacterForm, InputSource, StatCard};
pub use chart::{ChartAppearance, ChartConfig, ChartController, ChartError, ScaleMax};
pub use color::{to_rgba, ColorError};
pub use export::{export_card, export_filename, CardImage, ExportError};
pub use geometry::{label_anchors, polygon_vertices, Point, RadarAnchor};
pub use stats::{StatVector, STAT_LABELS};
pub use surface::{RecordingSurface, Surface, SurfaceError};

/// Map a level name to a filter. Unknown or missing names fall back to
/// `Info`.
pub fn parse_log_level(level: Option<&str>) -> LevelFilter {
    match level.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Install the console logger and panic hook. Safe to call more than once.
#[wasm_bindgen]
pub fn init_logs() {
    match log::set_logger(&DEFAULT_LOGGER) {
        Ok(_) => info!("Initialized console logger"),
        Err(e) => error!("failed to set console logger: {}", e),
    };
    log::set_max_level(LevelFilter::Info);
    console_error_panic_hook::set_once();
}

/// Change the log level at runtime, e.g. `update_log_level("debug")` from
/// the browser console.
#[wasm_bindgen]
pub fn update_log_level(level: JsValue) {
    let level: Option<String> = serde_wasm_bindgen::from_value(level).unwrap_or_default();
    log::set_max_level(parse_log_level(level.as_deref()));
}
