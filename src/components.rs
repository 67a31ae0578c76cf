//! Pure Yew view components for the stat card page.
//!
//! These render from props only; state and side effects live in `main.rs`.

use crate::hooks::FormRefs;
use stat_card::config::{DEFAULT_CHART_COLOR, LIVE_CANVAS_SIZE, OVERLAY_CANVAS_SIZE};
use stat_card::{CardText, STAT_LABELS};
use yew::prelude::*;

/// Stat, identity and color inputs.
#[derive(Properties, PartialEq)]
pub struct CharacterFormProps {
    pub refs: FormRefs,
    /// Fired on every keystroke in a stat field or color change.
    pub oninput: Callback<InputEvent>,
    pub onimage: Callback<Event>,
}

#[function_component(CharacterFormView)]
pub fn character_form(props: &CharacterFormProps) -> Html {
    let text_field = |id: &'static str, label: &'static str, node: &NodeRef| {
        html! {
            <div class="form-group">
                <label for={id}>{ label }</label>
                <input type="text" id={id} ref={node.clone()} />
            </div>
        }
    };

    html! {
        <div class="character-form">
            { text_field("name", "Name:", &props.refs.name) }
            { text_field("ability", "Ability:", &props.refs.ability) }
            { text_field("level", "Level:", &props.refs.level) }
            { STAT_LABELS.iter().zip(props.refs.stats.iter()).map(|(label, node)| {
                let id = label.to_lowercase();
                html! {
                    <div class="form-group stat-field" key={id.clone()}>
                        <label for={id.clone()}>{ format!("{}:", label) }</label>
                        <input type="number"
                            id={id}
                            min="0"
                            step="0.5"
                            placeholder="0"
                            ref={node.clone()}
                            oninput={props.oninput.clone()}
                        />
                    </div>
                }
            }).collect::<Html>() }
            <div class="form-group">
                <label for="colorPicker">{ "Chart Color:" }</label>
                <input type="color"
                    id="colorPicker"
                    value={DEFAULT_CHART_COLOR}
                    ref={props.refs.color.clone()}
                    oninput={props.oninput.clone()}
                />
            </div>
            <div class="form-group">
                <label for="imgInput">{ "Image:" }</label>
                <input type="file" id="imgInput" accept="image/*" onchange={props.onimage.clone()} />
            </div>
        </div>
    }
}

/// Name, ability and level as shown beside the live chart.
#[derive(Properties, PartialEq)]
pub struct InfoPanelProps {
    pub text: CardText,
}

#[function_component(InfoPanel)]
pub fn info_panel(props: &InfoPanelProps) -> Html {
    let text = &props.text;
    html! {
        <div class="info-panel">
            <p>{ "Name: " }<span id="dispName">{ text.name.clone() }</span></p>
            <p>{ "Ability: " }<span id="dispAbility">{ text.ability.clone() }</span></p>
            <p>{ "Level: " }<span id="dispLevel">{ text.level.clone() }</span></p>
        </div>
    }
}

/// The live chart canvas.
#[derive(Properties, PartialEq)]
pub struct LiveChartProps {
    pub canvas: NodeRef,
}

#[function_component(LiveChart)]
pub fn live_chart(props: &LiveChartProps) -> Html {
    html! {
        <div class="chart-area">
            <canvas id="radarChart1"
                ref={props.canvas.clone()}
                width={LIVE_CANVAS_SIZE.to_string()}
                height={LIVE_CANVAS_SIZE.to_string()}
            />
        </div>
    }
}

/// The card overlay: image, capped chart, text and the export controls.
#[derive(Properties, PartialEq)]
pub struct CardOverlayProps {
    pub open: bool,
    pub image_src: AttrValue,
    pub text: CardText,
    pub canvas: NodeRef,
    pub busy: bool,
    pub notice: Option<AttrValue>,
    pub onclose: Callback<MouseEvent>,
    pub ondownload: Callback<MouseEvent>,
}

#[function_component(CardOverlay)]
pub fn card_overlay(props: &CardOverlayProps) -> Html {
    let class = classes!("overlay", (!props.open).then_some("hidden"));
    let text = &props.text;

    html! {
        <div id="overlay" class={class}>
            <div id="characterBox" class="character-box">
                <button id="closeBtn" class="close-button" onclick={props.onclose.clone()}>{ "✕" }</button>
                <img id="overlayImg" src={props.image_src.clone()} alt="" />
                <div class="overlay-chart">
                    <canvas id="radarChart2"
                        ref={props.canvas.clone()}
                        width={OVERLAY_CANVAS_SIZE.to_string()}
                        height={OVERLAY_CANVAS_SIZE.to_string()}
                    />
                </div>
                <div class="overlay-info">
                    <h2 id="overlayName">{ text.name.clone() }</h2>
                    <p>{ "Ability: " }<span id="overlayAbility">{ text.ability.clone() }</span></p>
                    <p>{ "Level: " }<span id="overlayLevel">{ text.level.clone() }</span></p>
                </div>
                <button id="downloadBtn"
                    class="download-button"
                    disabled={props.busy}
                    onclick={props.ondownload.clone()}
                >
                    { if props.busy { "Exporting…" } else { "Download PNG" } }
                </button>
            </div>
            if let Some(notice) = &props.notice {
                <div class="export-notice">{ notice.to_string() }</div>
            }
        </div>
    }
}
