//! Card export: rasterize the card element and hand back a PNG data URL.
//!
//! Buttons drawn over the card are hidden for the capture by a
//! [`HiddenControls`] guard, which shows them again when dropped. That happens
//! whether the capture succeeds, fails or panics.

use crate::config::{DEFAULT_EXPORT_FILENAME, EXPORT_FILE_SUFFIX};
use futures::future::LocalBoxFuture;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static NON_SLUG_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

const PNG_DATA_URL_PREFIX: &str = "data:image/png";

#[derive(Debug, Clone, PartialEq)]
pub enum ExportError {
    /// The rasterizer rejected the capture.
    Raster(String),
    /// The rasterizer returned something other than a PNG data URL.
    InvalidImage(String),
    /// The card element could not be found.
    MissingCard(String),
    /// The browser download could not be started.
    Download(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Raster(msg) => write!(f, "Could not capture the card: {}", msg),
            ExportError::InvalidImage(head) => {
                write!(f, "Capture did not produce a PNG image (got '{}')", head)
            }
            ExportError::MissingCard(id) => write!(f, "Card element '{}' not found", id),
            ExportError::Download(msg) => write!(f, "Could not start the download: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}

/// Something on the page that can be shown or hidden without changing layout.
pub trait ControlVisibility {
    fn set_visible(&self, visible: bool);
}

/// Turns a DOM subtree (or a stand-in) into a PNG data URL.
pub trait Rasterizer {
    type Target: ?Sized;

    fn rasterize<'a>(&'a self, target: &'a Self::Target) -> LocalBoxFuture<'a, Result<String, ExportError>>;
}

/// Hides `controls` for as long as it is alive.
pub struct HiddenControls<'a, C: ControlVisibility> {
    controls: &'a [C],
}

impl<'a, C: ControlVisibility> HiddenControls<'a, C> {
    pub fn hide(controls: &'a [C]) -> Self {
        for control in controls {
            control.set_visible(false);
        }
        debug!("hid {} controls for capture", controls.len());
        HiddenControls { controls }
    }
}

impl<C: ControlVisibility> Drop for HiddenControls<'_, C> {
    fn drop(&mut self) {
        for control in self.controls {
            control.set_visible(true);
        }
    }
}

/// A finished export, ready to be offered as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct CardImage {
    pub filename: String,
    pub data_url: String,
}

/// Download name for a character: `nova_prime_card.png` for "Nova Prime",
/// or the default name when nothing usable is left.
pub fn export_filename(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let slug = NON_SLUG_CHARS.replace_all(&lowered, "_");
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        DEFAULT_EXPORT_FILENAME.to_string()
    } else {
        format!("{}{}", slug, EXPORT_FILE_SUFFIX)
    }
}

/// Capture `card` with the controls hidden and return the image.
pub async fn export_card<R, C>(
    rasterizer: &R,
    card: &R::Target,
    controls: &[C],
    name: &str,
) -> Result<CardImage, ExportError>
where
    R: Rasterizer,
    C: ControlVisibility,
{
    let filename = export_filename(name);
    let captured = {
        let _hidden = HiddenControls::hide(controls);
        rasterizer.rasterize(card).await
    };

    let data_url = match captured {
        Ok(url) => url,
        Err(e) => {
            warn!("card export failed: {}", e);
            return Err(e);
        }
    };
    if !data_url.starts_with(PNG_DATA_URL_PREFIX) {
        let head: String = data_url.chars().take(24).collect();
        return Err(ExportError::InvalidImage(head));
    }

    info!("exported card as {} ({} bytes)", filename, data_url.len());
    Ok(CardImage { filename, data_url })
}
