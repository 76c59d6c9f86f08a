//! Core identifiers and order attribute variants.
//!
//! All identifiers are newtype wrappers. [`OrderType`], [`TimeInForce`] and
//! [`TriggerCondition`] are closed enums; callers match on them exhaustively.

use crate::error::OrderError;

/// Price in ticks.
pub type Price = u64;
/// Size in lots.
pub type Size = u64;

/// Unique order identifier. Minted with bit-reversed counter values (see
/// [`crate::context::next_order_id`]).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct OrderId(pub u128);

impl OrderId {
    pub fn new(id: u128) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u128 {
        self.0
    }
}

/// Owner of an order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct AccountId(pub u64);

/// Client-chosen label scoped to one account. Unique within an account only.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AccountClientOrderId {
    pub account: AccountId,
    pub client_order_id: String,
}

impl AccountClientOrderId {
    pub fn new(account: AccountId, client_order_id: impl Into<String>) -> Self {
        Self {
            account,
            client_order_id: client_order_id.into(),
        }
    }
}

/// Priority index; earlier allocations compare smaller.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct IncreasingIdx {
    pub idx: u128,
}

impl IncreasingIdx {
    pub fn new(idx: u128) -> Self {
        Self { idx }
    }

    pub fn into_decreasing_idx(self) -> DecreasingIdx {
        into_decreasing_idx(self)
    }
}

/// Complement of an [`IncreasingIdx`]: earlier allocations compare larger.
/// Only obtainable through [`into_decreasing_idx`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct DecreasingIdx {
    pub idx: u128,
}

/// `u128::MAX - idx`.
pub fn into_decreasing_idx(idx: IncreasingIdx) -> DecreasingIdx {
    DecreasingIdx {
        idx: u128::MAX - idx.idx,
    }
}

/// Order side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn is_bid(&self) -> bool {
        matches!(self, Side::Buy)
    }

    pub fn from_is_bid(is_bid: bool) -> Self {
        if is_bid {
            Side::Buy
        } else {
            Side::Sell
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Discriminator between single and bulk orders. Carries no order data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum OrderType {
    Single = 0,
    Bulk = 1,
}

impl OrderType {
    pub fn is_single(&self) -> bool {
        matches!(self, OrderType::Single)
    }

    pub fn is_bulk(&self) -> bool {
        matches!(self, OrderType::Bulk)
    }

    pub fn tag(&self) -> u8 {
        *self as u8
    }
}

/// Time-in-force for single orders. Bulk orders are maker-only and have none.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TimeInForce {
    /// Rest on the book until filled or cancelled.
    GoodTillCancelled,
    /// Rest only; reject if it would take liquidity.
    PostOnly,
    /// Fill what crosses immediately, discard the rest.
    ImmediateOrCancel,
}

impl TimeInForce {
    /// Maps `0, 1, 2` to GTC, PostOnly, IOC.
    pub fn from_index(index: u8) -> Result<Self, OrderError> {
        match index {
            0 => Ok(TimeInForce::GoodTillCancelled),
            1 => Ok(TimeInForce::PostOnly),
            2 => Ok(TimeInForce::ImmediateOrCancel),
            other => Err(OrderError::InvalidTimeInForce(other)),
        }
    }

    pub fn index(&self) -> u8 {
        match self {
            TimeInForce::GoodTillCancelled => 0,
            TimeInForce::PostOnly => 1,
            TimeInForce::ImmediateOrCancel => 2,
        }
    }
}

impl TryFrom<u8> for TimeInForce {
    type Error = OrderError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index)
    }
}

/// Deferred activation predicate for conditional orders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TriggerCondition {
    /// Activates once the market price rises to this price.
    PriceAbove(Price),
    /// Activates once the market price falls to this price.
    PriceBelow(Price),
    /// Activates at this time (microseconds).
    TimeAt(u64),
}

/// One slot per condition kind, in the order (price-below, price-above, time-at).
pub type TriggerConditionIndices = (Option<Price>, Option<Price>, Option<u64>);

impl TriggerCondition {
    /// Decomposes the condition so callers can index all kinds uniformly.
    pub fn indices(&self) -> TriggerConditionIndices {
        match *self {
            TriggerCondition::PriceBelow(price) => (Some(price), None, None),
            TriggerCondition::PriceAbove(price) => (None, Some(price), None),
            TriggerCondition::TimeAt(time) => (None, None, Some(time)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_in_force_index_round_trip() {
        for i in 0u8..3 {
            assert_eq!(TimeInForce::from_index(i).unwrap().index(), i);
        }
        assert_eq!(
            TimeInForce::from_index(1).unwrap(),
            TimeInForce::PostOnly
        );
    }

    #[test]
    fn time_in_force_unknown_index_rejected() {
        assert_eq!(
            TimeInForce::from_index(3),
            Err(OrderError::InvalidTimeInForce(3))
        );
        assert!(TimeInForce::try_from(255u8).is_err());
    }

    #[test]
    fn trigger_condition_indices_fill_one_slot() {
        assert_eq!(TriggerCondition::PriceBelow(90).indices(), (Some(90), None, None));
        assert_eq!(TriggerCondition::PriceAbove(110).indices(), (None, Some(110), None));
        assert_eq!(TriggerCondition::TimeAt(1_000).indices(), (None, None, Some(1_000)));
    }

    #[test]
    fn decreasing_idx_is_complement_and_reverses_order() {
        let a = IncreasingIdx::new(5);
        let b = IncreasingIdx::new(6);
        assert_eq!(into_decreasing_idx(a).idx, u128::MAX - 5);
        assert!(a < b);
        assert!(a.into_decreasing_idx() > b.into_decreasing_idx());
        assert_eq!(into_decreasing_idx(IncreasingIdx::new(0)).idx, u128::MAX);
    }

    #[test]
    fn order_type_tags() {
        assert_eq!(OrderType::Single.tag(), 0);
        assert_eq!(OrderType::Bulk.tag(), 1);
        assert!(OrderType::Bulk.is_bulk() && !OrderType::Bulk.is_single());
    }

    #[test]
    fn side_helpers() {
        assert!(Side::Buy.is_bid());
        assert_eq!(Side::from_is_bid(false), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn account_client_order_id_scoped_by_account() {
        let a = AccountClientOrderId::new(AccountId(1), "quote-1");
        let b = AccountClientOrderId::new(AccountId(2), "quote-1");
        assert_ne!(a, b);
        assert_eq!(a, AccountClientOrderId::new(AccountId(1), String::from("quote-1")));
    }
}
