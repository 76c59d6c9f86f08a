//! Identity and priority minting, plus the host-facing order context.
//!
//! The monotonic counter and wall clock are collaborators owned by the host and
//! passed in explicitly ([`MonotonicCounter`], [`Clock`]). [`OrderContext`] bundles
//! them with an [`OrderConfig`] so the host can turn validated requests into
//! placed orders without minting ids itself.

use crate::bulk_order::{
    new_bulk_order, new_bulk_order_place_response_rejection, new_bulk_order_place_response_success,
    new_bulk_order_request_with_config, BulkOrder, BulkOrderPlaceResponse, BulkOrderRequest,
};
use crate::config::OrderConfig;
use crate::error::OrderError;
use crate::single_order::{SingleOrder, SingleOrderRequest};
use crate::types::{AccountId, IncreasingIdx, OrderId, Price, Side, Size};
use log::{debug, info, warn};
use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of strictly increasing values.
pub trait MonotonicCounter {
    fn next(&mut self) -> u128;
}

impl<C: MonotonicCounter + ?Sized> MonotonicCounter for &mut C {
    fn next(&mut self) -> u128 {
        (**self).next()
    }
}

/// Wall-clock source for creation timestamps.
pub trait Clock {
    fn now_micros(&self) -> u64;
}

/// In-memory counter yielding 1, 2, 3, ...
///
/// Saturates at `u128::MAX`: once reached, every call returns `u128::MAX`.
#[derive(Clone, Debug)]
pub struct AscendingIdGenerator {
    next: u128,
}

impl AscendingIdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Resume from a persisted position.
    pub fn starting_at(next: u128) -> Self {
        Self { next }
    }

    pub fn peek(&self) -> u128 {
        self.next
    }
}

impl Default for AscendingIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicCounter for AscendingIdGenerator {
    fn next(&mut self) -> u128 {
        let value = self.next;
        self.next = self.next.saturating_add(1);
        value
    }
}

/// Microseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_micros(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(0)
    }
}

/// Clock that only moves when told to. For replay and tests.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(now_micros: u64) -> Self {
        Self {
            now: Cell::new(now_micros),
        }
    }

    pub fn set(&self, now_micros: u64) {
        self.now.set(now_micros);
    }

    /// Moves the clock forward, stopping at `u64::MAX`.
    pub fn advance(&self, micros: u64) {
        self.now.set(self.now.get().saturating_add(micros));
    }
}

impl Clock for ManualClock {
    fn now_micros(&self) -> u64 {
        self.now.get()
    }
}

/// Reverses the bit order of `v` by swapping progressively larger blocks.
/// An involution, hence a bijection on `u128`.
pub fn reverse_bits(mut v: u128) -> u128 {
    const M1: u128 = 0x5555_5555_5555_5555_5555_5555_5555_5555;
    const M2: u128 = 0x3333_3333_3333_3333_3333_3333_3333_3333;
    const M4: u128 = 0x0F0F_0F0F_0F0F_0F0F_0F0F_0F0F_0F0F_0F0F;
    const M8: u128 = 0x00FF_00FF_00FF_00FF_00FF_00FF_00FF_00FF;
    const M16: u128 = 0x0000_FFFF_0000_FFFF_0000_FFFF_0000_FFFF;
    const M32: u128 = 0x0000_0000_FFFF_FFFF_0000_0000_FFFF_FFFF;
    v = ((v >> 1) & M1) | ((v & M1) << 1);
    v = ((v >> 2) & M2) | ((v & M2) << 2);
    v = ((v >> 4) & M4) | ((v & M4) << 4);
    v = ((v >> 8) & M8) | ((v & M8) << 8);
    v = ((v >> 16) & M16) | ((v & M16) << 16);
    v = ((v >> 32) & M32) | ((v & M32) << 32);
    v.rotate_left(64)
}

/// Next order id: the counter value with its bits reversed, so consecutive ids
/// land far apart in an id-ordered index.
pub fn next_order_id<C: MonotonicCounter>(counter: &mut C) -> OrderId {
    OrderId(reverse_bits(counter.next()))
}

/// Next priority index, in allocation order.
pub fn next_increasing_idx<C: MonotonicCounter>(counter: &mut C) -> IncreasingIdx {
    IncreasingIdx::new(counter.next())
}

/// Counter, clock and limits used to mint orders.
#[derive(Debug)]
pub struct OrderContext<C, K> {
    counter: C,
    clock: K,
    config: OrderConfig,
}

impl<C: MonotonicCounter, K: Clock> OrderContext<C, K> {
    pub fn new(counter: C, clock: K, config: OrderConfig) -> Self {
        Self {
            counter,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &OrderConfig {
        &self.config
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    pub fn next_order_id(&mut self) -> OrderId {
        next_order_id(&mut self.counter)
    }

    pub fn next_increasing_idx(&mut self) -> IncreasingIdx {
        next_increasing_idx(&mut self.counter)
    }

    pub fn now_micros(&self) -> u64 {
        self.clock.now_micros()
    }

    /// Validates a bulk request against this context's limits.
    #[allow(clippy::too_many_arguments)]
    pub fn bulk_order_request<M>(
        &self,
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
            &self.config,
        )
    }

    /// Assigns id, priority and creation time to a validated request.
    pub fn new_bulk_order<M>(&mut self, request: BulkOrderRequest<M>) -> BulkOrder<M> {
        let order_id = self.next_order_id();
        let priority = self.next_increasing_idx();
        let created = self.now_micros();
        debug!(
            "bulk order minted order_id={} priority={} account={} sequence_number={}",
            order_id.0,
            priority.idx,
            request.account().0,
            request.sequence_number()
        );
        new_bulk_order(order_id, priority, request, created)
    }

    pub fn new_single_order<M>(&mut self, request: SingleOrderRequest<M>) -> SingleOrder<M> {
        let order_id = self.next_order_id();
        let priority = self.next_increasing_idx();
        let created = self.now_micros();
        debug!(
            "single order minted order_id={} priority={} account={} side={:?} price={} size={}",
            order_id.0,
            priority.idx,
            request.account().0,
            request.side(),
            request.price(),
            request.orig_size()
        );
        SingleOrder::new(request, order_id, priority, created)
    }

    /// Places `request`, replacing the account's `existing` bulk order if any.
    ///
    /// A request whose sequence number does not exceed the existing one is rejected
    /// and `existing` is left untouched. Otherwise `existing` is emptied in place, its
    /// former ladders are reported as cancelled, and a freshly minted order is returned.
    ///
    /// Fails with [`OrderError::AccountMismatch`] when `existing` belongs to another
    /// account; nothing is minted and `existing` is left untouched.
    pub fn place_bulk_order<M>(
        &mut self,
        request: BulkOrderRequest<M>,
        existing: Option<&mut BulkOrder<M>>,
    ) -> Result<BulkOrderPlaceResponse<M>, OrderError> {
        let account = request.account();
        let sequence_number = request.sequence_number();
        let mut cancelled = (Vec::new(), Vec::new(), Vec::new(), Vec::new());
        let mut previous_seq_num = None;
        if let Some(prev) = existing {
            if prev.account() != account {
                warn!(
                    "bulk order rejected account={} existing_account={}",
                    account.0,
                    prev.account().0
                );
                return Err(OrderError::AccountMismatch {
                    requested: account.0,
                    existing: prev.account().0,
                });
            }
            if prev.sequence_number() >= sequence_number {
                warn!(
                    "bulk order rejected account={} sequence_number={} existing_sequence_number={}",
                    account.0,
                    sequence_number,
                    prev.sequence_number()
                );
                return Ok(new_bulk_order_place_response_rejection(
                    account,
                    sequence_number,
                    prev.sequence_number(),
                ));
            }
            cancelled = (
                prev.prices(Side::Buy).to_vec(),
                prev.sizes(Side::Buy).to_vec(),
                prev.prices(Side::Sell).to_vec(),
                prev.sizes(Side::Sell).to_vec(),
            );
            previous_seq_num = Some(prev.sequence_number());
            prev.set_empty();
        }
        let order = self.new_bulk_order(request);
        info!(
            "bulk order placed order_id={} account={} sequence_number={} bids={} asks={} \
             replaced={:?}",
            order.order_id().0,
            account.0,
            sequence_number,
            order.prices(Side::Buy).len(),
            order.prices(Side::Sell).len(),
            previous_seq_num
        );
        let (bid_prices, bid_sizes, ask_prices, ask_sizes) = cancelled;
        Ok(new_bulk_order_place_response_success(
            order,
            bid_prices,
            bid_sizes,
            ask_prices,
            ask_sizes,
            previous_seq_num,
        ))
    }
}
