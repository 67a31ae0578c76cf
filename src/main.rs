//! Main module for the stat card page using Yew.
//! Wires the form, both radar charts, the card overlay and PNG export.

use gloo_timers::callback::Timeout;
use log::{debug, info, warn};
use stat_card::app::SettleTicket;
use stat_card::browser::{
    card_element, export_controls, query_param, read_file_as_data_url, trigger_download,
    Html2Canvas,
};
use stat_card::canvas::CanvasSurface;
use stat_card::config::{OVERLAY_CANVAS_SIZE, OVERLAY_SETTLE_MS};
use stat_card::{
    export_card, init_logs, parse_log_level, CardText, ChartConfig, InputSource, StatCard,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlCanvasElement, HtmlInputElement};
use yew::prelude::*;

mod components;
mod hooks;

use components::{CardOverlay, CharacterFormView, InfoPanel, LiveChart};
use hooks::use_form_refs;

type SharedCard = Rc<RefCell<StatCard<CanvasSurface>>>;

// ──────────────────────────────────────────────────────────────────────────────
// Helper functions

/// Chart preset with optional JSON overrides from a `data-*` attribute on
/// `<body>`, e.g. `data-overlay-chart='{"label_offset": 55}'`.
fn configured(attr: &str, base: ChartConfig) -> ChartConfig {
    let overrides = gloo_utils::document()
        .body()
        .and_then(|body| body.get_attribute(attr));
    match overrides {
        Some(json) => base.clone().with_overrides(&json).unwrap_or_else(|e| {
            warn!("ignoring {}: {}", attr, e);
            base
        }),
        None => base,
    }
}

/// Laid-out size of the canvas, or its nominal size if layout has not
/// produced one yet.
fn measured_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
    let (w, h) = (canvas.client_width(), canvas.client_height());
    if w > 0 && h > 0 {
        (w as f64, h as f64)
    } else {
        (OVERLAY_CANVAS_SIZE as f64, OVERLAY_CANVAS_SIZE as f64)
    }
}

/// Runs once the overlay reveal has settled.
fn settle_overlay(card: &SharedCard, ticket: SettleTicket, canvas_ref: &NodeRef) {
    let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
        warn!("overlay canvas not mounted");
        return;
    };
    let (width, height) = measured_size(&canvas);
    let result = card
        .borrow_mut()
        .settle(ticket, || CanvasSurface::from_canvas(canvas), width, height);
    match result {
        Ok(true) => debug!("overlay drawn at {}x{}", width, height),
        Ok(false) => debug!("overlay settle skipped"),
        Err(e) => warn!("overlay chart failed: {}", e),
    }
}

/// Primary application component wiring state, effects, and UI elements.
#[function_component(App)]
fn app() -> Html {
    let refs = use_form_refs();
    let live_canvas = use_node_ref();
    let overlay_canvas = use_node_ref();
    let card: SharedCard = use_mut_ref(|| {
        StatCard::new(
            configured("data-live-chart", ChartConfig::live()),
            configured("data-overlay-chart", ChartConfig::overlay()),
        )
    });

    let card_text = use_state(CardText::default);
    let overlay_text = use_state(CardText::default);
    let overlay_open = use_state(|| false);
    let image_src = use_state(|| AttrValue::from(""));
    // Pending overlay settle; replacing or clearing it cancels the timer.
    let settle_timer = use_mut_ref(|| None::<Timeout>);
    let exporting = use_state(|| false);
    let notice = use_state(|| None::<AttrValue>);

    // Bind the live chart to its canvas on mount
    {
        let card = card.clone();
        let live_canvas = live_canvas.clone();
        use_effect_with((), move |_| {
            match live_canvas.cast::<HtmlCanvasElement>() {
                Some(canvas) => match CanvasSurface::from_canvas(canvas) {
                    Ok(surface) => {
                        if let Err(e) = card.borrow_mut().attach_live(surface) {
                            warn!("live chart failed to draw: {}", e);
                        }
                    }
                    Err(e) => warn!("live chart unavailable: {}", e),
                },
                None => warn!("live chart canvas not mounted"),
            }
        });
    }

    // Re-read the whole form and redraw; used by inputs and the Update button.
    let apply = {
        let card = card.clone();
        let refs = refs.clone();
        let card_text = card_text.clone();
        Callback::from(move |_: ()| match card.borrow_mut().update_from(&refs) {
            Ok(text) => card_text.set(text),
            Err(e) => warn!("could not apply form: {}", e),
        })
    };
    let on_field_input = apply.reform(|_: InputEvent| ());
    let on_update = apply.reform(|_: MouseEvent| ());

    let on_view = {
        let card = card.clone();
        let refs = refs.clone();
        let overlay_open = overlay_open.clone();
        let overlay_text = overlay_text.clone();
        let overlay_canvas = overlay_canvas.clone();
        let settle_timer = settle_timer.clone();
        Callback::from(move |_: MouseEvent| {
            overlay_text.set(refs.read().card_text());
            overlay_open.set(true);

            let ticket = card.borrow_mut().open_overlay();
            let card = card.clone();
            let overlay_canvas = overlay_canvas.clone();
            let handle = Timeout::new(OVERLAY_SETTLE_MS, move || {
                settle_overlay(&card, ticket, &overlay_canvas);
            });
            *settle_timer.borrow_mut() = Some(handle);
        })
    };

    let on_close = {
        let card = card.clone();
        let overlay_open = overlay_open.clone();
        let settle_timer = settle_timer.clone();
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| {
            card.borrow_mut().close_overlay();
            settle_timer.borrow_mut().take();
            overlay_open.set(false);
            notice.set(None);
        })
    };

    let on_download = {
        let refs = refs.clone();
        let exporting = exporting.clone();
        let notice = notice.clone();
        Callback::from(move |_: MouseEvent| {
            if *exporting {
                return;
            }
            exporting.set(true);
            notice.set(None);

            let name = refs.read().name;
            let exporting = exporting.clone();
            let notice = notice.clone();
            spawn_local(async move {
                let outcome = match card_element() {
                    Ok(element) => {
                        let controls = export_controls();
                        export_card(&Html2Canvas, &element, controls.as_slice(), &name).await
                    }
                    Err(e) => Err(e),
                };
                match outcome.and_then(|image| trigger_download(&image).map(|_| image)) {
                    Ok(image) => info!("download started: {}", image.filename),
                    Err(e) => {
                        warn!("export failed: {}", e);
                        notice.set(Some(AttrValue::from(e.to_string())));
                    }
                }
                exporting.set(false);
            });
        })
    };

    let on_image = {
        let image_src = image_src.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let image_src = image_src.clone();
            spawn_local(async move {
                match read_file_as_data_url(file).await {
                    Ok(url) => image_src.set(AttrValue::from(url)),
                    Err(e) => warn!("could not read image: {:?}", e),
                }
            });
        })
    };

    html! {
        <div class="container">
            <h1>{ "Character Stat Card" }</h1>
            <div class="editor">
                <CharacterFormView refs={refs.clone()} oninput={on_field_input} onimage={on_image} />
                <div class="preview">
                    <img id="uploadedImg" src={(*image_src).clone()} alt="" />
                    <LiveChart canvas={live_canvas.clone()} />
                    <InfoPanel text={(*card_text).clone()} />
                </div>
            </div>
            <div class="actions">
                <button id="updateBtn" onclick={on_update}>{ "Update" }</button>
                <button id="viewBtn" onclick={on_view}>{ "View Card" }</button>
            </div>
            <CardOverlay
                open={*overlay_open}
                image_src={(*image_src).clone()}
                text={(*overlay_text).clone()}
                canvas={overlay_canvas.clone()}
                busy={*exporting}
                notice={(*notice).clone()}
                onclose={on_close}
                ondownload={on_download}
            />
        </div>
    }
}

/// Entry point: installs logging, then renders the page.
fn main() {
    init_logs();
    log::set_max_level(parse_log_level(query_param("log").as_deref()));
    yew::Renderer::<App>::new().render();
}
