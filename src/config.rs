//! Validation limits for bulk orders.
//!
//! `OrderConfig::default()` carries the standard per-side cap. Hosts that need a
//! different cap can load one from the environment with [`OrderConfig::from_env`].

use log::{info, warn};

/// Default maximum number of price levels per side of a bulk order.
pub const DEFAULT_MAX_LEVELS_PER_SIDE: usize = 30;

/// Environment variable read by [`OrderConfig::from_env`].
pub const MAX_LEVELS_ENV: &str = "BULK_ORDER_MAX_LEVELS";

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OrderConfig {
    /// Maximum ladder depth per side. Requests deeper than this are rejected.
    pub max_levels_per_side: usize,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            max_levels_per_side: DEFAULT_MAX_LEVELS_PER_SIDE,
        }
    }
}

impl OrderConfig {
    /// Reads `BULK_ORDER_MAX_LEVELS`. Unset or unparsable values fall back to the default.
    pub fn from_env() -> Self {
        let max_levels_per_side = match std::env::var(MAX_LEVELS_ENV) {
            Ok(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    warn!(
                        "ignoring {}={:?}, using default {}",
                        MAX_LEVELS_ENV, raw, DEFAULT_MAX_LEVELS_PER_SIDE
                    );
                    DEFAULT_MAX_LEVELS_PER_SIDE
                }
            },
            Err(_) => DEFAULT_MAX_LEVELS_PER_SIDE,
        };
        info!("order config loaded max_levels_per_side={}", max_levels_per_side);
        Self { max_levels_per_side }
    }
}
