//! Feature vector produced from a pool event

use serde::{Deserialize, Serialize};

/// Feature names in model input order
pub const FEATURE_NAMES: [&str; 7] = [
    "lp_size",
    "initial_burn",
    "mint_authority_burned",
    "time_since_init",
    "early_buy_count",
    "early_sell_count",
    "early_buy_sell_ratio",
];

/// Fixed-shape features describing a pool launch.
///
/// Serializes as a flat JSON object with keys in `FEATURE_NAMES` order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Liquidity supplied at pool creation
    pub lp_size: f64,
    /// LP tokens burned at creation
    pub initial_burn: f64,
    /// 1 if mint authority was relinquished, else 0
    pub mint_authority_burned: u8,
    /// Seconds between pool init and extraction
    pub time_since_init: f64,
    /// Buys inside the early window
    pub early_buy_count: u64,
    /// Sells inside the early window
    pub early_sell_count: u64,
    /// buys / (buys + sells), 0.0 when there were no early trades
    pub early_buy_sell_ratio: f64,
}

impl FeatureVector {
    /// Number of features in a row
    pub const fn feature_count() -> usize {
        FEATURE_NAMES.len()
    }

    /// Dense row in `FEATURE_NAMES` order, as fed to a model
    pub fn to_row(&self) -> [f64; 7] {
        [
            self.lp_size,
            self.initial_burn,
            f64::from(self.mint_authority_burned),
            self.time_since_init,
            self.early_buy_count as f64,
            self.early_sell_count as f64,
            self.early_buy_sell_ratio,
        ]
    }
}
