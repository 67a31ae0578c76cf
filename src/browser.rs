//! JavaScript and DOM interop for the card page.
//! Card capture goes through `html2canvas`, wrapped by card_export.js.

use crate::config::{CARD_ELEMENT_ID, EXPORT_CONTROL_IDS};
use crate::export::{CardImage, ControlVisibility, ExportError, Rasterizer};
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use log::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, File, FileReader, HtmlAnchorElement, HtmlElement};

#[wasm_bindgen(module = "/card_export.js")]
extern "C" {
    /// Resolves to a PNG data URL of `element`.
    #[wasm_bindgen(js_name = captureCard, catch)]
    fn capture_card(element: &Element) -> Result<js_sys::Promise, JsValue>;
}

fn describe(e: &JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{:?}", e))
}

/// Rasterizes DOM elements with `html2canvas`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Html2Canvas;

async fn capture(target: &Element) -> Result<String, ExportError> {
    let promise = capture_card(target).map_err(|e| ExportError::Raster(describe(&e)))?;
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| ExportError::Raster(describe(&e)))?;
    value
        .as_string()
        .ok_or_else(|| ExportError::InvalidImage(describe(&value)))
}

impl Rasterizer for Html2Canvas {
    type Target = Element;

    fn rasterize<'a>(&'a self, target: &'a Element) -> LocalBoxFuture<'a, Result<String, ExportError>> {
        capture(target).boxed_local()
    }
}

impl ControlVisibility for HtmlElement {
    fn set_visible(&self, visible: bool) {
        let value = if visible { "visible" } else { "hidden" };
        if let Err(e) = self.style().set_property("visibility", value) {
            warn!("could not set visibility on #{}: {}", self.id(), describe(&e));
        }
    }
}

/// The card element to capture.
pub fn card_element() -> Result<Element, ExportError> {
    gloo_utils::document()
        .get_element_by_id(CARD_ELEMENT_ID)
        .ok_or_else(|| ExportError::MissingCard(CARD_ELEMENT_ID.to_string()))
}

/// Buttons that sit on top of the card and must not appear in the export.
pub fn export_controls() -> Vec<HtmlElement> {
    let document = gloo_utils::document();
    EXPORT_CONTROL_IDS
        .iter()
        .filter_map(|id| document.get_element_by_id(id))
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// Start a client-side download of `image`.
pub fn trigger_download(image: &CardImage) -> Result<(), ExportError> {
    let link = gloo_utils::document()
        .create_element("a")
        .map_err(|e| ExportError::Download(describe(&e)))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| ExportError::Download("created element is not an anchor".into()))?;
    link.set_download(&image.filename);
    link.set_href(&image.data_url);
    link.click();
    Ok(())
}

/// Read an uploaded file into a `data:` URL.
pub async fn read_file_as_data_url(file: File) -> Result<String, JsValue> {
    let reader = FileReader::new()?;
    let (tx, rx) = oneshot::channel::<Result<JsValue, JsValue>>();

    let onloadend = {
        let reader = reader.clone();
        Closure::once(move || {
            // The receiver only goes away if the caller stopped waiting.
            let _ = tx.send(reader.result());
        })
    };
    reader.set_onloadend(Some(onloadend.as_ref().unchecked_ref()));
    reader.read_as_data_url(&file)?;

    let result = rx
        .await
        .map_err(|_| JsValue::from_str("file reader dropped"))??;
    reader.set_onloadend(None);
    result
        .as_string()
        .ok_or_else(|| JsValue::from_str("file could not be read"))
}

/// Query-string value of `key` on the current page, if any.
pub fn query_param(key: &str) -> Option<String> {
    let search = gloo_utils::window().location().search().ok()?;
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.to_string())
}
