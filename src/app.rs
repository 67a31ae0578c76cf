//! Page state: the accent color, both charts and the overlay lifecycle.
//!
//! Form values are pulled through an [`InputSource`] when needed rather than
//! read from DOM ids, so the whole flow runs against plain structs in tests.

use crate::chart::{ChartAppearance, ChartConfig, ChartController, ChartError};
use crate::config::{BLANK_FIELD, DEFAULT_CHART_COLOR, STAT_CAP};
use crate::stats::{StatVector, STAT_COUNT};
use crate::surface::{Surface, SurfaceError};
use log::{debug, info};

/// Raw text of every form field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharacterForm {
    pub stats: [String; STAT_COUNT],
    pub name: String,
    pub ability: String,
    pub level: String,
    pub color: String,
}

impl CharacterForm {
    pub fn stats(&self) -> StatVector {
        StatVector::from_inputs(&self.stats)
    }

    /// Picker value, or the default accent when the picker is empty.
    pub fn accent(&self) -> &str {
        match self.color.trim() {
            "" => DEFAULT_CHART_COLOR,
            color => color,
        }
    }

    pub fn card_text(&self) -> CardText {
        CardText {
            name: or_blank(&self.name),
            ability: or_blank(&self.ability),
            level: or_blank(&self.level),
        }
    }
}

fn or_blank(text: &str) -> String {
    match text.trim() {
        "" => BLANK_FIELD.to_string(),
        t => t.to_string(),
    }
}

/// Text shown on the info panel and on the card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardText {
    pub name: String,
    pub ability: String,
    pub level: String,
}

impl Default for CardText {
    fn default() -> Self {
        CardText {
            name: BLANK_FIELD.to_string(),
            ability: BLANK_FIELD.to_string(),
            level: BLANK_FIELD.to_string(),
        }
    }
}

/// Anything that can produce the current form values on demand.
pub trait InputSource {
    fn read(&self) -> CharacterForm;
}

impl InputSource for CharacterForm {
    fn read(&self) -> CharacterForm {
        self.clone()
    }
}

/// Proof that an overlay open was requested. Only the newest ticket settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleTicket(u64);

/// Open/close bookkeeping for the overlay's delayed first paint.
///
/// Every open or close starts a new generation, so a settle scheduled
/// before the latest open or close is dropped.
#[derive(Debug, Clone, Default)]
pub struct OverlaySchedule {
    generation: u64,
    open: bool,
}

impl OverlaySchedule {
    pub fn open(&mut self) -> SettleTicket {
        self.generation += 1;
        self.open = true;
        SettleTicket(self.generation)
    }

    pub fn close(&mut self) {
        self.generation += 1;
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_current(&self, ticket: SettleTicket) -> bool {
        self.open && ticket.0 == self.generation
    }
}

pub struct StatCard<S: Surface> {
    accent: String,
    live: ChartController<S>,
    overlay: ChartController<S>,
    schedule: OverlaySchedule,
    text: CardText,
}

impl<S: Surface> StatCard<S> {
    pub fn new(live: ChartConfig, overlay: ChartConfig) -> Self {
        StatCard {
            accent: DEFAULT_CHART_COLOR.to_string(),
            live: ChartController::new("live", live),
            overlay: ChartController::new("overlay", overlay),
            schedule: OverlaySchedule::default(),
            text: CardText::default(),
        }
    }

    pub fn accent(&self) -> &str {
        &self.accent
    }

    pub fn card_text(&self) -> &CardText {
        &self.text
    }

    pub fn live(&self) -> &ChartController<S> {
        &self.live
    }

    pub fn overlay(&self) -> &ChartController<S> {
        &self.overlay
    }

    pub fn overlay_open(&self) -> bool {
        self.schedule.is_open()
    }

    /// Bind the live chart to its surface and draw the empty chart.
    pub fn attach_live(&mut self, surface: S) -> Result<(), ChartError> {
        if self.live.ensure_ready(surface) {
            self.live.render()?;
        }
        Ok(())
    }

    /// Apply the form: the live chart gets the raw stats, the overlay chart
    /// (if it exists) gets them capped. Returns the text for the info panel.
    pub fn update(&mut self, form: &CharacterForm) -> Result<CardText, ChartError> {
        let appearance = ChartAppearance::from_accent(form.accent())?;
        let stats = form.stats();
        self.accent = appearance.stroke().to_string();
        self.text = form.card_text();

        self.live.refresh(stats, appearance.clone())?;
        let capped = stats.cap(STAT_CAP);
        if self.overlay.is_ready() {
            self.overlay.refresh(capped, appearance)?;
        } else {
            self.overlay.bind(capped, appearance);
        }
        debug!("applied form: stats {:?}, accent {}", stats.values(), self.accent);
        Ok(self.text.clone())
    }

    pub fn update_from(&mut self, inputs: &impl InputSource) -> Result<CardText, ChartError> {
        self.update(&inputs.read())
    }

    pub fn open_overlay(&mut self) -> SettleTicket {
        self.schedule.open()
    }

    pub fn close_overlay(&mut self) {
        self.schedule.close();
    }

    /// Finish an overlay open once layout has settled: create the overlay
    /// chart on first use, size it, and draw the capped stats.
    ///
    /// Returns `Ok(false)` without touching anything when the ticket is stale.
    pub fn settle<F>(
        &mut self,
        ticket: SettleTicket,
        make_surface: F,
        width: f64,
        height: f64,
    ) -> Result<bool, ChartError>
    where
        F: FnOnce() -> Result<S, SurfaceError>,
    {
        if !self.schedule.is_current(ticket) {
            debug!("overlay settle {:?} superseded", ticket);
            return Ok(false);
        }
        if !self.overlay.is_ready() {
            self.overlay.ensure_ready(make_surface()?);
            info!("overlay chart created");
        }
        let appearance = ChartAppearance::from_accent(&self.accent)?;
        self.overlay.bind(self.live.stats().cap(STAT_CAP), appearance);
        self.overlay.resize(width, height)?;
        Ok(true)
    }
}

impl<S: Surface> Default for StatCard<S> {
    fn default() -> Self {
        Self::new(ChartConfig::live(), ChartConfig::overlay())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use test_log::test;

    fn form(stats: [&str; 5], color: &str) -> CharacterForm {
        CharacterForm {
            stats: stats.map(String::from),
            name: "Nova".into(),
            ability: "".into(),
            level: " 7 ".into(),
            color: color.into(),
        }
    }

    fn card() -> StatCard<RecordingSurface> {
        let mut card = StatCard::default();
        card.attach_live(RecordingSurface::new(360.0, 360.0)).unwrap();
        card
    }

    #[test]
    fn card_text_falls_back_to_dash() {
        let text = form(["1"; 5], "#000000").card_text();
        assert_eq!(text.name, "Nova");
        assert_eq!(text.ability, "-");
        assert_eq!(text.level, "7");
    }

    #[test]
    fn blank_picker_uses_default_accent() {
        assert_eq!(form(["1"; 5], "").accent(), DEFAULT_CHART_COLOR);
    }

    #[test]
    fn attach_live_draws_zero_chart() {
        let card = card();
        assert!(card.live().is_ready());
        assert!(!card.overlay().is_ready());
        assert_eq!(card.live().stats(), StatVector::zero());
        assert!(!card.live().surface().unwrap().ops().is_empty());
    }

    #[test]
    fn update_sets_accent_last_writer_wins() {
        let mut card = card();
        card.update(&form(["1"; 5], "#ff0000")).unwrap();
        card.update(&form(["1"; 5], "#00ff00")).unwrap();
        assert_eq!(card.accent(), "#00ff00");
        assert_eq!(card.live().appearance().fill(), "rgba(0,255,0,0.75)");
    }

    #[test]
    fn invalid_accent_leaves_state_untouched() {
        let mut card = card();
        card.update(&form(["3"; 5], "#123456")).unwrap();
        let err = card.update(&form(["9"; 5], "blue")).unwrap_err();
        assert!(matches!(err, ChartError::Color(_)));
        assert_eq!(card.accent(), "#123456");
        assert_eq!(card.live().stats().values(), [3.0; 5]);
    }

    #[test]
    fn stale_settle_is_ignored() {
        let mut card = card();
        let first = card.open_overlay();
        card.close_overlay();
        let second = card.open_overlay();

        let stale = card
            .settle(first, || Ok(RecordingSurface::new(300.0, 300.0)), 300.0, 300.0)
            .unwrap();
        assert!(!stale);
        assert!(!card.overlay().is_ready());

        let fresh = card
            .settle(second, || Ok(RecordingSurface::new(300.0, 300.0)), 300.0, 300.0)
            .unwrap();
        assert!(fresh);
        assert!(card.overlay().is_ready());
    }

    #[test]
    fn settle_after_close_does_nothing() {
        let mut card = card();
        let ticket = card.open_overlay();
        card.close_overlay();
        assert!(!card.overlay_open());
        let ran = card
            .settle(ticket, || Ok(RecordingSurface::new(1.0, 1.0)), 1.0, 1.0)
            .unwrap();
        assert!(!ran);
    }

    #[test]
    fn overlay_is_created_once_and_reused() {
        let mut card = card();
        let t = card.open_overlay();
        card.settle(t, || Ok(RecordingSurface::new(300.0, 300.0)), 300.0, 300.0)
            .unwrap();
        card.close_overlay();

        let t = card.open_overlay();
        let ran = card
            .settle(
                t,
                || -> Result<RecordingSurface, SurfaceError> { panic!("overlay surface rebuilt") },
                320.0,
                280.0,
            )
            .unwrap();
        assert!(ran);
        assert_eq!(card.overlay().surface().unwrap().size(), (320.0, 280.0));
    }

    #[test]
    fn surface_failure_propagates() {
        let mut card = card();
        let t = card.open_overlay();
        let err = card
            .settle(t, || Err(SurfaceError::Unavailable("canvas".into())), 300.0, 300.0)
            .unwrap_err();
        assert!(matches!(err, ChartError::Surface(_)));
        assert!(!card.overlay().is_ready());
    }
}
