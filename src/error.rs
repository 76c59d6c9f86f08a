//! Error taxonomy for order construction, matching and reinsertion.
//!
//! Every variant maps to a stable numeric code (see [`OrderError::code`]) so a host
//! can surface the exact rule that was broken to the submitter.

use crate::types::Side;
use thiserror::Error;

/// Failure of a single construction, validation or match call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderError {
    #[error("sequence number must be positive")]
    InvalidSequenceNumber,

    #[error("bid prices and bid sizes differ in length")]
    BidLengthMismatch,

    #[error("ask prices and ask sizes differ in length")]
    AskLengthMismatch,

    #[error("bulk order has no levels on either side")]
    EmptyOrder,

    #[error("bid ladder contains a zero size")]
    BidZeroSize,

    #[error("ask ladder contains a zero size")]
    AskZeroSize,

    #[error("bid prices must be strictly descending")]
    InvalidBidOrder,

    #[error("ask prices must be strictly ascending")]
    InvalidAskOrder,

    #[error("{side:?} ladder has {levels} levels, cap is {max}")]
    TooManyLevels { side: Side, levels: usize, max: usize },

    #[error("best bid {best_bid} must be below best ask {best_ask}")]
    PriceCrossing { best_bid: u64, best_ask: u64 },

    #[error("operation called on the wrong order variant")]
    VariantMismatch,

    #[error("unknown time-in-force index {0}")]
    InvalidTimeInForce(u8),

    #[error("no active {0:?} level")]
    NoActiveLevel(Side),

    #[error("match size {requested} exceeds level size {available}")]
    MatchSizeExceedsLevel { requested: u64, available: u64 },

    #[error("price {0} cannot be reinserted into the ladder")]
    UnexpectedReinsertPrice(u64),

    #[error("level size {current} plus {added} overflows")]
    SizeOverflow { current: u64, added: u64 },

    #[error("existing order belongs to account {existing}, request is for {requested}")]
    AccountMismatch { requested: u64, existing: u64 },

    #[error("order size must be positive")]
    ZeroSize,

    #[error("remaining size {remaining} exceeds original size {orig}")]
    RemainingExceedsOriginal { remaining: u64, orig: u64 },
}

impl OrderError {
    /// Stable code for this error. Never renumbered.
    pub fn code(&self) -> u64 {
        match self {
            OrderError::InvalidSequenceNumber => 1,
            OrderError::BidLengthMismatch => 2,
            OrderError::AskLengthMismatch => 3,
            OrderError::EmptyOrder => 4,
            OrderError::BidZeroSize => 5,
            OrderError::AskZeroSize => 6,
            OrderError::InvalidBidOrder => 7,
            OrderError::InvalidAskOrder => 8,
            OrderError::TooManyLevels { .. } => 9,
            OrderError::PriceCrossing { .. } => 10,
            OrderError::VariantMismatch => 11,
            OrderError::InvalidTimeInForce(_) => 12,
            OrderError::NoActiveLevel(_) => 13,
            OrderError::MatchSizeExceedsLevel { .. } => 14,
            OrderError::UnexpectedReinsertPrice(_) => 15,
            OrderError::SizeOverflow { .. } => 16,
            OrderError::AccountMismatch { .. } => 17,
            OrderError::ZeroSize => 18,
            OrderError::RemainingExceedsOriginal { .. } => 19,
        }
    }

    /// True for errors raised while validating a bulk order request.
    pub fn is_malformed_bulk_request(&self) -> bool {
        matches!(self.code(), 1..=10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let all = [
            OrderError::InvalidSequenceNumber,
            OrderError::BidLengthMismatch,
            OrderError::AskLengthMismatch,
            OrderError::EmptyOrder,
            OrderError::BidZeroSize,
            OrderError::AskZeroSize,
            OrderError::InvalidBidOrder,
            OrderError::InvalidAskOrder,
            OrderError::TooManyLevels { side: Side::Buy, levels: 31, max: 30 },
            OrderError::PriceCrossing { best_bid: 10, best_ask: 10 },
            OrderError::VariantMismatch,
            OrderError::InvalidTimeInForce(3),
            OrderError::NoActiveLevel(Side::Sell),
            OrderError::MatchSizeExceedsLevel { requested: 2, available: 1 },
            OrderError::UnexpectedReinsertPrice(5),
            OrderError::SizeOverflow { current: u64::MAX, added: 1 },
            OrderError::AccountMismatch { requested: 2, existing: 1 },
            OrderError::ZeroSize,
            OrderError::RemainingExceedsOriginal { remaining: 2, orig: 1 },
        ];
        let mut codes: Vec<u64> = all.iter().map(OrderError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn malformed_request_classification() {
        assert!(OrderError::EmptyOrder.is_malformed_bulk_request());
        assert!(OrderError::PriceCrossing { best_bid: 2, best_ask: 1 }.is_malformed_bulk_request());
        assert!(!OrderError::VariantMismatch.is_malformed_bulk_request());
        assert!(!OrderError::InvalidTimeInForce(9).is_malformed_bulk_request());
        let mismatch = OrderError::AccountMismatch { requested: 2, existing: 1 };
        assert!(!mismatch.is_malformed_bulk_request());
    }

    #[test]
    fn display_mentions_values() {
        let err = OrderError::TooManyLevels { side: Side::Buy, levels: 31, max: 30 };
        assert!(err.to_string().contains("31"));
        assert!(err.to_string().contains("30"));
    }
}
