//! Bulk orders: one resting object holding a price/size ladder per side.
//!
//! A [`BulkOrderRequest`] is validated once at construction; the ladders are then
//! only shrunk by matching, restored by reinsertion, or cleared by
//! [`BulkOrder::set_empty`]. Level 0 of each side is the active level, the only one
//! the host engine reads during top-of-book matching.
//!
//! Bids are ordered best (highest) first, asks best (lowest) first.

use crate::config::OrderConfig;
use crate::error::OrderError;
use crate::matching::{
    new_bulk_order_match_details, new_order_match, OrderMatch, OrderMatchDetails,
};
use crate::types::{AccountId, IncreasingIdx, OrderId, Price, Side, Size};
use log::warn;

/// Validated multi-level quote from one account.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct BulkOrderRequest<M> {
    account: AccountId,
    order_sequence_number: u64,
    bid_prices: Vec<Price>,
    bid_sizes: Vec<Size>,
    ask_prices: Vec<Price>,
    ask_sizes: Vec<Size>,
    metadata: M,
}

/// Validates against [`OrderConfig::default`].
pub fn new_bulk_order_request<M>(
    account: AccountId,
    order_sequence_number: u64,
    bid_prices: Vec<Price>,
    bid_sizes: Vec<Size>,
    ask_prices: Vec<Price>,
    ask_sizes: Vec<Size>,
    metadata: M,
) -> Result<BulkOrderRequest<M>, OrderError> {
    new_bulk_order_request_with_config(
        account,
        order_sequence_number,
        bid_prices,
        bid_sizes,
        ask_prices,
        ask_sizes,
        metadata,
        &OrderConfig::default(),
    )
}

#[allow(clippy::too_many_arguments)]
pub fn new_bulk_order_request_with_config<M>(
    account: AccountId,
    order_sequence_number: u64,
    bid_prices: Vec<Price>,
    bid_sizes: Vec<Size>,
    ask_prices: Vec<Price>,
    ask_sizes: Vec<Size>,
    metadata: M,
    config: &OrderConfig,
) -> Result<BulkOrderRequest<M>, OrderError> {
    if order_sequence_number == 0 {
        return Err(OrderError::InvalidSequenceNumber);
    }
    if bid_prices.len() != bid_sizes.len() {
        return Err(OrderError::BidLengthMismatch);
    }
    if ask_prices.len() != ask_sizes.len() {
        return Err(OrderError::AskLengthMismatch);
    }
    if bid_prices.is_empty() && ask_prices.is_empty() {
        return Err(OrderError::EmptyOrder);
    }
    for (side, levels) in [(Side::Buy, bid_prices.len()), (Side::Sell, ask_prices.len())] {
        if levels > config.max_levels_per_side {
            return Err(OrderError::TooManyLevels {
                side,
                levels,
                max: config.max_levels_per_side,
            });
        }
    }
    if bid_sizes.contains(&0) {
        return Err(OrderError::BidZeroSize);
    }
    if ask_sizes.contains(&0) {
        return Err(OrderError::AskZeroSize);
    }
    if !bid_prices.windows(2).all(|w| w[0] > w[1]) {
        return Err(OrderError::InvalidBidOrder);
    }
    if !ask_prices.windows(2).all(|w| w[0] < w[1]) {
        return Err(OrderError::InvalidAskOrder);
    }
    if let (Some(&best_bid), Some(&best_ask)) = (bid_prices.first(), ask_prices.first()) {
        if best_bid >= best_ask {
            return Err(OrderError::PriceCrossing { best_bid, best_ask });
        }
    }
    Ok(BulkOrderRequest {
        account,
        order_sequence_number,
        bid_prices,
        bid_sizes,
        ask_prices,
        ask_sizes,
        metadata,
    })
}

impl<M> BulkOrderRequest<M> {
    pub fn account(&self) -> AccountId {
        self.account
    }

    pub fn sequence_number(&self) -> u64 {
        self.order_sequence_number
    }

    pub fn metadata(&self) -> &M {
        &self.metadata
    }

    pub fn prices(&self, side: Side) -> &[Price] {
        match side {
            Side::Buy => &self.bid_prices,
            Side::Sell => &self.ask_prices,
        }
    }

    pub fn sizes(&self, side: Side) -> &[Size] {
        match side {
            Side::Buy => &self.bid_sizes,
            Side::Sell => &self.ask_sizes,
        }
    }

    fn ladder_mut(&mut self, side: Side) -> (&mut Vec<Price>, &mut Vec<Size>) {
        match side {
            Side::Buy => (&mut self.bid_prices, &mut self.bid_sizes),
            Side::Sell => (&mut self.ask_prices, &mut self.ask_sizes),
        }
    }

    /// (account, sequence number, bid prices, bid sizes, ask prices, ask sizes, metadata).
    #[allow(clippy::type_complexity)]
    pub fn into_parts(
        self,
    ) -> (AccountId, u64, Vec<Price>, Vec<Size>, Vec<Price>, Vec<Size>, M) {
        (
            self.account,
            self.order_sequence_number,
            self.bid_prices,
            self.bid_sizes,
            self.ask_prices,
            self.ask_sizes,
            self.metadata,
        )
    }
}

/// A placed bulk order: request plus identity.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct BulkOrder<M> {
    order_request: BulkOrderRequest<M>,
    order_id: OrderId,
    unique_priority_idx: IncreasingIdx,
    creation_time_micros: u64,
}

pub fn new_bulk_order<M>(
    order_id: OrderId,
    unique_priority_idx: IncreasingIdx,
    order_request: BulkOrderRequest<M>,
    creation_time_micros: u64,
) -> BulkOrder<M> {
    BulkOrder {
        order_request,
        order_id,
        unique_priority_idx,
        creation_time_micros,
    }
}

impl<M> BulkOrder<M> {
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn account(&self) -> AccountId {
        self.order_request.account
    }

    pub fn sequence_number(&self) -> u64 {
        self.order_request.order_sequence_number
    }

    pub fn unique_priority_idx(&self) -> IncreasingIdx {
        self.unique_priority_idx
    }

    pub fn creation_time_micros(&self) -> u64 {
        self.creation_time_micros
    }

    pub fn metadata(&self) -> &M {
        &self.order_request.metadata
    }

    pub fn request(&self) -> &BulkOrderRequest<M> {
        &self.order_request
    }

    pub fn prices(&self, side: Side) -> &[Price] {
        self.order_request.prices(side)
    }

    pub fn sizes(&self, side: Side) -> &[Size] {
        self.order_request.sizes(side)
    }

    /// Level-0 price of `side`, or `None` if that side is empty.
    pub fn active_price(&self, side: Side) -> Option<Price> {
        self.prices(side).first().copied()
    }

    /// Level-0 size of `side`, or `None` if that side is empty.
    pub fn active_size(&self, side: Side) -> Option<Size> {
        self.sizes(side).first().copied()
    }

    /// Sum of all level sizes on `side`. Widened so a full ladder cannot overflow.
    pub fn total_remaining_size(&self, side: Side) -> u128 {
        self.sizes(side).iter().map(|&size| u128::from(size)).sum()
    }

    /// True when both ladders are empty.
    pub fn is_empty(&self) -> bool {
        self.order_request.bid_prices.is_empty() && self.order_request.ask_prices.is_empty()
    }

    /// Clears both ladders. Identity fields are kept.
    pub fn set_empty(&mut self) {
        let request = &mut self.order_request;
        request.bid_prices.clear();
        request.bid_sizes.clear();
        request.ask_prices.clear();
        request.ask_sizes.clear();
    }

    /// Snapshot of level 0 of `side`.
    pub fn active_match_details(&self, side: Side) -> Result<OrderMatchDetails<M>, OrderError>
    where
        M: Clone,
    {
        let (price, size) = match (self.active_price(side), self.active_size(side)) {
            (Some(price), Some(size)) => (price, size),
            _ => return Err(OrderError::NoActiveLevel(side)),
        };
        Ok(new_bulk_order_match_details(
            self.order_id,
            self.account(),
            self.unique_priority_idx,
            price,
            size,
            side,
            self.sequence_number(),
            self.creation_time_micros,
            self.order_request.metadata.clone(),
        ))
    }

    /// Drops level 0 of `side` if its size reached zero, making the next level active.
    /// Returns whether a level was dropped.
    pub fn advance_exhausted_level(&mut self, side: Side) -> bool {
        let (prices, sizes) = self.order_request.ladder_mut(side);
        if sizes.first() == Some(&0) {
            prices.remove(0);
            sizes.remove(0);
            true
        } else {
            false
        }
    }

    /// Returns a matched remainder to the ladder.
    ///
    /// The remainder is added to the level at the same price if one exists, otherwise
    /// a new level is inserted where it keeps the side strictly ordered.
    pub fn reinsert_order(&mut self, other: &OrderMatchDetails<M>) -> Result<(), OrderError> {
        let OrderMatchDetails::BulkOrder {
            order_id,
            account,
            unique_priority_idx,
            price,
            remaining_size,
            side,
            sequence_number,
            ..
        } = other
        else {
            return Err(OrderError::VariantMismatch);
        };
        if *order_id != self.order_id
            || *account != self.account()
            || *unique_priority_idx != self.unique_priority_idx
            || *sequence_number != self.sequence_number()
        {
            warn!(
                "bulk reinsert rejected order_id={} other_order_id={} priority={} \
                 other_priority={} sequence_number={} other_sequence_number={}",
                self.order_id.0,
                order_id.0,
                self.unique_priority_idx.idx,
                unique_priority_idx.idx,
                self.sequence_number(),
                sequence_number
            );
            return Err(OrderError::VariantMismatch);
        }
        if *remaining_size == 0 {
            return Ok(());
        }
        let (price, side) = (*price, *side);
        if let Some(opposite_best) = self.active_price(side.opposite()) {
            let crosses = match side {
                Side::Buy => price >= opposite_best,
                Side::Sell => price <= opposite_best,
            };
            if crosses {
                return Err(OrderError::UnexpectedReinsertPrice(price));
            }
        }
        let (prices, sizes) = self.order_request.ladder_mut(side);
        // First level whose price is no better than the reinserted one.
        let slot = prices.iter().position(|&p| match side {
            Side::Buy => p <= price,
            Side::Sell => p >= price,
        });
        match slot {
            Some(i) if prices[i] == price => {
                sizes[i] = sizes[i]
                    .checked_add(*remaining_size)
                    .ok_or(OrderError::SizeOverflow {
                        current: sizes[i],
                        added: *remaining_size,
                    })?;
            }
            Some(i) => {
                prices.insert(i, price);
                sizes.insert(i, *remaining_size);
            }
            None => {
                prices.push(price);
                sizes.push(*remaining_size);
            }
        }
        Ok(())
    }

    /// (request, order id, priority index, creation time).
    pub fn into_parts(self) -> (BulkOrderRequest<M>, OrderId, IncreasingIdx, u64) {
        (
            self.order_request,
            self.order_id,
            self.unique_priority_idx,
            self.creation_time_micros,
        )
    }
}

/// Fills `matched_size` against level 0 of `side` and snapshots the level after the fill.
///
/// The level stays in place even when it reaches zero; call
/// [`BulkOrder::advance_exhausted_level`] to move on to the next level.
pub fn new_bulk_order_match<M: Clone>(
    order: &mut BulkOrder<M>,
    side: Side,
    matched_size: Size,
) -> Result<OrderMatch<M>, OrderError> {
    let available = order
        .active_size(side)
        .ok_or(OrderError::NoActiveLevel(side))?;
    let remaining = available
        .checked_sub(matched_size)
        .ok_or(OrderError::MatchSizeExceedsLevel {
            requested: matched_size,
            available,
        })?;
    let (_, sizes) = order.order_request.ladder_mut(side);
    sizes[0] = remaining;
    let details = order.active_match_details(side)?;
    Ok(new_order_match(details, matched_size))
}

/// Result of placing a bulk order for an account.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub enum BulkOrderPlaceResponse<M> {
    Success {
        order: BulkOrder<M>,
        cancelled_bid_prices: Vec<Price>,
        cancelled_bid_sizes: Vec<Size>,
        cancelled_ask_prices: Vec<Price>,
        cancelled_ask_sizes: Vec<Size>,
        /// Sequence number of the order this one replaced, if any.
        previous_seq_num: Option<u64>,
    },
    Rejection {
        account: AccountId,
        sequence_number: u64,
        existing_sequence_number: u64,
    },
}

pub fn new_bulk_order_place_response_success<M>(
    order: BulkOrder<M>,
    cancelled_bid_prices: Vec<Price>,
    cancelled_bid_sizes: Vec<Size>,
    cancelled_ask_prices: Vec<Price>,
    cancelled_ask_sizes: Vec<Size>,
    previous_seq_num: Option<u64>,
) -> BulkOrderPlaceResponse<M> {
    BulkOrderPlaceResponse::Success {
        order,
        cancelled_bid_prices,
        cancelled_bid_sizes,
        cancelled_ask_prices,
        cancelled_ask_sizes,
        previous_seq_num,
    }
}

pub fn new_bulk_order_place_response_rejection<M>(
    account: AccountId,
    sequence_number: u64,
    existing_sequence_number: u64,
) -> BulkOrderPlaceResponse<M> {
    BulkOrderPlaceResponse::Rejection {
        account,
        sequence_number,
        existing_sequence_number,
    }
}

impl<M> BulkOrderPlaceResponse<M> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejection { .. })
    }

    /// The placed order, for a success.
    pub fn order(&self) -> Option<&BulkOrder<M>> {
        match self {
            Self::Success { order, .. } => Some(order),
            Self::Rejection { .. } => None,
        }
    }
}
