//! Feature extraction for pool launch risk scoring.
//!
//! Turns a raw pool initialization event into the fixed feature set the
//! scoring model is trained on.

use crate::error::Result;
use crate::types::event::{ActionKind, PoolEvent};
use crate::types::features::{FeatureVector, FEATURE_NAMES};
use tracing::debug;

/// Default early window in seconds
pub const DEFAULT_EARLY_WINDOW: f64 = 5.0;

/// Feature extractor that transforms pool events into model input features.
pub struct FeatureExtractor {
    /// Seconds after pool init within which trades count as early
    early_window: f64,
}

impl FeatureExtractor {
    /// Create a new feature extractor with the default early window.
    pub fn new() -> Self {
        Self::with_early_window(DEFAULT_EARLY_WINDOW)
    }

    /// Create a feature extractor with a custom early window.
    pub fn with_early_window(early_window: f64) -> Self {
        Self { early_window }
    }

    pub fn early_window(&self) -> f64 {
        self.early_window
    }

    /// Extract features from a pool event.
    ///
    /// An action is early when `timestamp - init_timestamp <= early_window`.
    /// There is no lower bound, so actions stamped before pool init count too.
    pub fn extract(&self, event: &PoolEvent) -> FeatureVector {
        let now = event.extract_timestamp.unwrap_or(event.init_timestamp);

        let mut buys = 0u64;
        let mut sells = 0u64;
        for action in &event.actions {
            if action.timestamp - event.init_timestamp > self.early_window {
                continue;
            }
            match action.kind {
                ActionKind::Buy => buys += 1,
                ActionKind::Sell => sells += 1,
                ActionKind::Other => {}
            }
        }

        let total = buys + sells;
        let early_buy_sell_ratio = if total > 0 {
            buys as f64 / total as f64
        } else {
            0.0
        };

        let features = FeatureVector {
            lp_size: event.initial_lp,
            initial_burn: event.burned_amount,
            mint_authority_burned: u8::from(event.mint_authority_burned),
            time_since_init: now - event.init_timestamp,
            early_buy_count: buys,
            early_sell_count: sells,
            early_buy_sell_ratio,
        };

        debug!(
            early_window = self.early_window,
            actions = event.actions.len(),
            early_buys = buys,
            early_sells = sells,
            "Features extracted"
        );

        features
    }

    /// Parse an event from JSON and extract its features.
    pub fn extract_json(&self, input: &str) -> Result<FeatureVector> {
        let event = PoolEvent::from_json_str(input)?;
        Ok(self.extract(&event))
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        FEATURE_NAMES.len()
    }

    /// Get feature names in model input order.
    pub fn feature_names(&self) -> Vec<&'static str> {
        FEATURE_NAMES.to_vec()
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract features from an event using the given early window.
pub fn extract(event: &PoolEvent, early_window: f64) -> FeatureVector {
    FeatureExtractor::with_early_window(early_window).extract(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::event::Action;

    const INIT: f64 = 1_000_000.0;

    /// Buys inside the window, sells one second past it
    fn make_event(buys: usize, sells: usize, window: f64) -> PoolEvent {
        let mut actions = Vec::new();
        for i in 0..buys {
            actions.push(Action::buy(INIT + i as f64 + 0.5));
        }
        for _ in 0..sells {
            actions.push(Action::sell(INIT + window + 1.0));
        }

        PoolEvent {
            initial_lp: 123.45,
            burned_amount: 10.0,
            mint_authority_burned: true,
            init_timestamp: INIT,
            extract_timestamp: Some(INIT + 2.0),
            actions,
        }
    }

    #[test]
    fn test_feature_extraction() {
        let extractor = FeatureExtractor::new();
        let features = extractor.extract(&make_event(3, 2, 5.0));

        assert_eq!(features.lp_size, 123.45);
        assert_eq!(features.initial_burn, 10.0);
        assert_eq!(features.mint_authority_burned, 1);
        assert!((features.time_since_init - 2.0).abs() < 1e-9);
        assert_eq!(features.early_buy_count, 3);
        assert_eq!(features.early_sell_count, 0);
        assert_eq!(features.early_buy_sell_ratio, 1.0);
    }

    #[test]
    fn test_no_actions() {
        let features = extract(&make_event(0, 0, 5.0), 5.0);

        assert_eq!(features.early_buy_count, 0);
        assert_eq!(features.early_sell_count, 0);
        assert_eq!(features.early_buy_sell_ratio, 0.0);
        assert!(!features.early_buy_sell_ratio.is_nan());
    }

    #[test]
    fn test_time_since_init_defaults_to_zero() {
        let mut event = make_event(1, 0, 5.0);
        event.extract_timestamp = None;

        assert_eq!(extract(&event, 5.0).time_since_init, 0.0);
    }

    #[test]
    fn test_counts_within_window() {
        let window = 5.0;
        for buys in 0..4 {
            for sells in 0..4 {
                let mut actions = Vec::new();
                for i in 0..buys {
                    actions.push(Action::buy(INIT + window * i as f64 / 3.0));
                }
                for i in 0..sells {
                    actions.push(Action::sell(INIT + window * i as f64 / 3.0));
                }
                let event = PoolEvent {
                    actions,
                    ..make_event(0, 0, window)
                };

                let features = extract(&event, window);
                assert_eq!(features.early_buy_count, buys);
                assert_eq!(features.early_sell_count, sells);
                assert!((0.0..=1.0).contains(&features.early_buy_sell_ratio));
            }
        }
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let event = PoolEvent {
            actions: vec![Action::buy(INIT + 5.0), Action::sell(INIT + 5.000_001)],
            ..make_event(0, 0, 5.0)
        };

        let features = extract(&event, 5.0);
        assert_eq!(features.early_buy_count, 1);
        assert_eq!(features.early_sell_count, 0);
    }

    #[test]
    fn test_actions_before_init_count_as_early() {
        let event = PoolEvent {
            actions: vec![Action::buy(INIT - 100.0), Action::sell(INIT - 1.0)],
            ..make_event(0, 0, 5.0)
        };

        let features = extract(&event, 5.0);
        assert_eq!(features.early_buy_count, 1);
        assert_eq!(features.early_sell_count, 1);
        assert_eq!(features.early_buy_sell_ratio, 0.5);
    }

    #[test]
    fn test_other_actions_ignored() {
        let event = PoolEvent {
            actions: vec![
                Action {
                    kind: ActionKind::Other,
                    timestamp: INIT + 1.0,
                },
                Action::sell(INIT + 1.0),
            ],
            ..make_event(0, 0, 5.0)
        };

        let features = extract(&event, 5.0);
        assert_eq!(features.early_sell_count, 1);
        assert_eq!(features.early_buy_sell_ratio, 0.0);
    }

    #[test]
    fn test_mint_flag_is_zero_or_one() {
        let mut event = make_event(0, 0, 5.0);
        event.mint_authority_burned = false;
        assert_eq!(extract(&event, 5.0).mint_authority_burned, 0);

        let features = FeatureExtractor::new()
            .extract_json(
                r#"{"initial_lp": 1, "burned_amount": 0, "mint_authority_burned": 7,
                    "init_timestamp": 0, "actions": []}"#,
            )
            .unwrap();
        assert_eq!(features.mint_authority_burned, 1);
    }

    #[test]
    fn test_integer_amounts_serialize_as_reals() {
        let features = FeatureExtractor::new()
            .extract_json(
                r#"{"initial_lp": 1, "burned_amount": 2, "mint_authority_burned": true,
                    "init_timestamp": 10, "actions": []}"#,
            )
            .unwrap();

        let json = serde_json::to_string(&features).unwrap();
        assert!(json.contains("\"lp_size\":1.0"), "{}", json);
        assert!(json.contains("\"initial_burn\":2.0"), "{}", json);
        assert!(json.contains("\"early_buy_count\":0"), "{}", json);
    }

    #[test]
    fn test_negative_values_flow_through() {
        let event = PoolEvent {
            initial_lp: -1.0,
            burned_amount: -2.0,
            extract_timestamp: Some(INIT - 3.0),
            ..make_event(0, 0, 5.0)
        };

        let features = extract(&event, 5.0);
        assert_eq!(features.lp_size, -1.0);
        assert_eq!(features.initial_burn, -2.0);
        assert_eq!(features.time_since_init, -3.0);
    }

    #[test]
    fn test_feature_count() {
        let extractor = FeatureExtractor::new();
        assert_eq!(extractor.feature_count(), 7);
        assert_eq!(extractor.feature_names().len(), 7);
        assert_eq!(extractor.early_window(), DEFAULT_EARLY_WINDOW);
    }
}
