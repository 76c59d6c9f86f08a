//! Synthetic bulk quote generator.
//!
//! Deterministic, configurable stream of valid [`BulkOrderRequest`]s for property
//! tests, benchmarks and demos. Same seed ⇒ same sequence of quotes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bulk_order::{new_bulk_order_request_with_config, BulkOrderRequest};
use crate::config::OrderConfig;
use crate::error::OrderError;
use crate::types::{AccountId, Price, Size};

/// Configuration for the quote generator. All ranges are inclusive.
///
/// [`Generator::new`] repairs inverted ranges and zero ticks or sizes, so any
/// configuration yields valid quotes.
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// RNG seed. Same seed ⇒ same quote stream.
    pub seed: u64,
    /// Number of quotes produced by [`Generator::all_requests`].
    pub num_requests: usize,
    /// Number of distinct accounts (1..=num_accounts).
    pub num_accounts: u64,
    /// Mid price range; each quote picks a mid and spreads around it.
    pub mid_min: Price,
    pub mid_max: Price,
    /// Gap between adjacent levels on one side.
    pub tick: Price,
    /// Levels per side (capped by the validation config).
    pub levels_min: usize,
    pub levels_max: usize,
    pub size_min: Size,
    pub size_max: Size,
    /// Probability that a quote carries only one side (0.0..=1.0).
    pub one_sided_ratio: f64,
    pub validation: OrderConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            num_requests: 100,
            num_accounts: 5,
            mid_min: 10_000,
            mid_max: 10_100,
            tick: 1,
            levels_min: 1,
            levels_max: 10,
            size_min: 1,
            size_max: 500,
            one_sided_ratio: 0.1,
            validation: OrderConfig::default(),
        }
    }
}

/// Deterministic quote stream.
pub struct Generator {
    rng: StdRng,
    config: GeneratorConfig,
    /// Per-account sequence numbers, index = account - 1.
    sequence_numbers: Vec<u64>,
}

impl Generator {
    pub fn new(mut config: GeneratorConfig) -> Self {
        if config.mid_min > config.mid_max {
            std::mem::swap(&mut config.mid_min, &mut config.mid_max);
        }
        if config.size_min > config.size_max {
            std::mem::swap(&mut config.size_min, &mut config.size_max);
        }
        if config.levels_min > config.levels_max {
            std::mem::swap(&mut config.levels_min, &mut config.levels_max);
        }
        config.size_min = config.size_min.max(1);
        config.size_max = config.size_max.max(config.size_min);
        config.tick = config.tick.max(1);
        config.levels_max = config.levels_max.max(1);
        let rng = StdRng::seed_from_u64(config.seed);
        let accounts = config.num_accounts.max(1) as usize;
        Self {
            rng,
            config,
            sequence_numbers: vec![0; accounts],
        }
    }

    fn ladder(&mut self, levels: usize) -> Vec<Size> {
        (0..levels)
            .map(|_| self.rng.gen_range(self.config.size_min..=self.config.size_max))
            .collect()
    }

    /// Next quote. Sequence numbers increase per account.
    pub fn next_request(&mut self) -> Result<BulkOrderRequest<()>, OrderError> {
        let c = &self.config;
        let max_levels = c.levels_max.min(c.validation.max_levels_per_side).max(1);
        let min_levels = c.levels_min.clamp(1, max_levels);
        let tick = c.tick;
        let account_index = self.rng.gen_range(0..self.sequence_numbers.len());
        let mid = self.rng.gen_range(c.mid_min..=c.mid_max);
        // Keep the bottom bid above zero and the top ask within range.
        let bid_cap = usize::try_from(mid / tick).unwrap_or(usize::MAX);
        let ask_cap = usize::try_from((Price::MAX - mid) / tick)
            .unwrap_or(usize::MAX)
            .saturating_add(1);
        let mut bid_levels = self.rng.gen_range(min_levels..=max_levels).min(bid_cap);
        let mut ask_levels = self.rng.gen_range(min_levels..=max_levels).min(ask_cap);
        if self.rng.gen::<f64>() < self.config.one_sided_ratio {
            // Only drop a side when the other one still has levels.
            if self.rng.gen::<bool>() && ask_levels > 0 {
                bid_levels = 0;
            } else if bid_levels > 0 {
                ask_levels = 0;
            }
        }
        let bid_prices: Vec<Price> = (1..=bid_levels as u64).map(|i| mid - i * tick).collect();
        let ask_prices: Vec<Price> = (0..ask_levels as u64).map(|i| mid + i * tick).collect();
        let bid_sizes = self.ladder(bid_prices.len());
        let ask_sizes = self.ladder(ask_prices.len());

        self.sequence_numbers[account_index] += 1;
        new_bulk_order_request_with_config(
            AccountId(account_index as u64 + 1),
            self.sequence_numbers[account_index],
            bid_prices,
            bid_sizes,
            ask_prices,
            ask_sizes,
            (),
            &self.config.validation,
        )
    }

    pub fn take_requests(&mut self, n: usize) -> Result<Vec<BulkOrderRequest<()>>, OrderError> {
        (0..n).map(|_| self.next_request()).collect()
    }

    /// The full stream as defined by `config.num_requests`.
    pub fn all_requests(&mut self) -> Result<Vec<BulkOrderRequest<()>>, OrderError> {
        self.take_requests(self.config.num_requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    #[test]
    fn same_seed_same_stream() {
        let c = GeneratorConfig {
            seed: 42,
            num_requests: 10,
            ..Default::default()
        };
        let a = Generator::new(c.clone()).all_requests().unwrap();
        let b = Generator::new(c).all_requests().unwrap();
        assert_eq!(a.len(), 10);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_different_stream() {
        let config = |seed| GeneratorConfig {
            seed,
            num_requests: 5,
            ..Default::default()
        };
        let a = Generator::new(config(1)).all_requests().unwrap();
        let b = Generator::new(config(2)).all_requests().unwrap();
        assert_ne!(a, b, "different seeds should produce different quotes");
    }

    #[test]
    fn sequence_numbers_increase_per_account() {
        let requests = Generator::new(GeneratorConfig {
            seed: 7,
            num_requests: 50,
            num_accounts: 3,
            ..Default::default()
        })
        .all_requests()
        .unwrap();
        let mut last = std::collections::HashMap::new();
        for r in &requests {
            let prev = last.insert(r.account(), r.sequence_number()).unwrap_or(0);
            assert_eq!(r.sequence_number(), prev + 1);
        }
    }

    #[test]
    fn levels_respect_validation_cap() {
        let requests = Generator::new(GeneratorConfig {
            seed: 3,
            num_requests: 30,
            levels_min: 40,
            levels_max: 60,
            ..Default::default()
        })
        .all_requests()
        .unwrap();
        for r in &requests {
            assert!(r.prices(Side::Buy).len() <= 30);
            assert!(r.prices(Side::Sell).len() <= 30);
        }
    }

    #[test]
    fn inverted_ranges_are_repaired() {
        let requests = Generator::new(GeneratorConfig {
            seed: 11,
            num_requests: 40,
            mid_min: 500,
            mid_max: 400,
            tick: 0,
            levels_min: 5,
            levels_max: 2,
            size_min: 50,
            size_max: 0,
            ..Default::default()
        })
        .all_requests()
        .unwrap();
        for r in &requests {
            for side in [Side::Buy, Side::Sell] {
                assert!(r.sizes(side).iter().all(|&s| (1..=50).contains(&s)));
                assert!(r.prices(side).len() <= 5);
            }
        }
    }

    #[test]
    fn one_sided_quotes_at_the_price_edges_stay_valid() {
        for mid in [0, Price::MAX] {
            let requests = Generator::new(GeneratorConfig {
                seed: 5,
                num_requests: 50,
                mid_min: mid,
                mid_max: mid,
                one_sided_ratio: 1.0,
                ..Default::default()
            })
            .all_requests()
            .unwrap();
            assert_eq!(requests.len(), 50);
            for r in &requests {
                let (bids, asks) = (r.prices(Side::Buy), r.prices(Side::Sell));
                assert!(bids.is_empty() != asks.is_empty());
                if mid == 0 {
                    assert!(bids.is_empty());
                }
            }
        }
    }
}
