//! The five character stats and the capped projection shown on the card.

use serde::{Deserialize, Serialize};

/// Axis labels, in vertex order (first label sits at the top of the chart).
pub const STAT_LABELS: [&str; 5] = ["Power", "Speed", "Trick", "Recovery", "Defense"];

pub const STAT_COUNT: usize = STAT_LABELS.len();

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatVector {
    pub power: f64,
    pub speed: f64,
    pub trick: f64,
    pub recovery: f64,
    pub defense: f64,
}

impl StatVector {
    pub fn new(values: [f64; STAT_COUNT]) -> Self {
        let [power, speed, trick, recovery, defense] = values;
        StatVector {
            power,
            speed,
            trick,
            recovery,
            defense,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Values in display order.
    pub fn values(&self) -> [f64; STAT_COUNT] {
        [self.power, self.speed, self.trick, self.recovery, self.defense]
    }

    pub fn max_value(&self) -> f64 {
        self.values().into_iter().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Clamp each stat to at most `max`. Only the upper bound is touched,
    /// so negative stats pass through.
    pub fn cap(&self, max: f64) -> StatVector {
        StatVector::new(self.values().map(|v| v.min(max)))
    }

    /// Parse raw field text. Anything that is blank, non-numeric or
    /// non-finite counts as 0.
    pub fn from_inputs<I, S>(raw: I) -> StatVector
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = [0.0; STAT_COUNT];
        for (slot, text) in values.iter_mut().zip(raw) {
            *slot = parse_stat(text.as_ref());
        }
        StatVector::new(values)
    }
}

/// Parse a single stat field, defaulting to 0.
///
/// The whole trimmed field must be a number: trailing junk such as `"5abc"`
/// reads as 0 rather than as its numeric prefix. Stat inputs are
/// `type="number"`, so the browser never hands over such text.
pub fn parse_stat(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn cap_clamps_only_the_upper_bound() {
        let stats = StatVector::new([12.0, 3.0, 0.0, 10.5, -1.0]);
        let capped = stats.cap(10.0);
        assert_eq!(capped.values(), [10.0, 3.0, 0.0, 10.0, -1.0]);
        // source untouched
        assert_eq!(stats.values(), [12.0, 3.0, 0.0, 10.5, -1.0]);
    }

    #[test]
    fn unparsable_inputs_become_zero() {
        let stats = StatVector::from_inputs(["", "5", "abc", "3.5", "10"]);
        assert_eq!(stats.values(), [0.0, 5.0, 0.0, 3.5, 10.0]);
    }

    #[test]
    fn inputs_are_trimmed_and_non_finite_rejected() {
        let stats = StatVector::from_inputs([" 7 ", "NaN", "inf", "-2", "1e1"]);
        assert_eq!(stats.values(), [7.0, 0.0, 0.0, -2.0, 10.0]);
    }

    #[test]
    fn numeric_prefix_is_not_enough() {
        assert_eq!(parse_stat("5abc"), 0.0);
        assert_eq!(parse_stat("3.5 pts"), 0.0);
        assert_eq!(parse_stat("\t6.5\n"), 6.5);
    }

    #[test]
    fn short_input_leaves_remaining_stats_at_zero() {
        let stats = StatVector::from_inputs(vec!["4".to_string()]);
        assert_eq!(stats.values(), [4.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn max_value_picks_largest_stat() {
        assert_eq!(StatVector::new([1.0, 9.0, 3.0, 2.0, 0.0]).max_value(), 9.0);
    }
}
