//! Single orders: one price, one size, optional time-in-force and trigger.

use crate::error::OrderError;
use crate::matching::{
    new_order_match, new_single_order_match_details, OrderMatch, OrderMatchDetails,
};
use crate::types::{
    AccountClientOrderId, AccountId, IncreasingIdx, OrderId, Price, Side, Size, TimeInForce,
    TriggerCondition,
};

/// Order request as submitted, before an id and priority are assigned.
///
/// Sizes are only set through [`SingleOrderRequest::new`] and matching, so
/// `0 < orig_size` and `remaining_size <= orig_size` always hold.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SingleOrderRequest<M> {
    account: AccountId,
    client_order_id: Option<String>,
    price: Price,
    orig_size: Size,
    remaining_size: Size,
    side: Side,
    trigger_condition: Option<TriggerCondition>,
    time_in_force: TimeInForce,
    metadata: M,
}

impl<M> SingleOrderRequest<M> {
    /// Fresh request with `remaining_size == orig_size` and no trigger.
    /// Fails with [`OrderError::ZeroSize`] when `size` is zero.
    pub fn new(
        account: AccountId,
        client_order_id: Option<String>,
        price: Price,
        size: Size,
        side: Side,
        time_in_force: TimeInForce,
        metadata: M,
    ) -> Result<Self, OrderError> {
        if size == 0 {
            return Err(OrderError::ZeroSize);
        }
        Ok(Self {
            account,
            client_order_id,
            price,
            orig_size: size,
            remaining_size: size,
            side,
            trigger_condition: None,
            time_in_force,
            metadata,
        })
    }

    pub fn with_trigger_condition(mut self, trigger_condition: TriggerCondition) -> Self {
        self.trigger_condition = Some(trigger_condition);
        self
    }

    pub fn account(&self) -> AccountId {
        self.account
    }

    pub fn client_order_id(&self) -> Option<&str> {
        self.client_order_id.as_deref()
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn orig_size(&self) -> Size {
        self.orig_size
    }

    pub fn remaining_size(&self) -> Size {
        self.remaining_size
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn trigger_condition(&self) -> Option<TriggerCondition> {
        self.trigger_condition
    }

    pub fn time_in_force(&self) -> TimeInForce {
        self.time_in_force
    }

    pub fn metadata(&self) -> &M {
        &self.metadata
    }
}

/// A single order with its identity assigned.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SingleOrder<M> {
    request: SingleOrderRequest<M>,
    order_id: OrderId,
    unique_priority_idx: IncreasingIdx,
    creation_time_micros: u64,
}

impl<M> SingleOrder<M> {
    pub fn new(
        request: SingleOrderRequest<M>,
        order_id: OrderId,
        unique_priority_idx: IncreasingIdx,
        creation_time_micros: u64,
    ) -> Self {
        Self {
            request,
            order_id,
            unique_priority_idx,
            creation_time_micros,
        }
    }

    /// Rebuilds a resting order from a single-order snapshot, e.g. to reinsert a
    /// partially filled remainder. The rebuilt order has no trigger condition.
    ///
    /// Rejects a zero original size and a remainder larger than the original size.
    pub fn from_match_details(details: OrderMatchDetails<M>) -> Result<Self, OrderError> {
        match details {
            OrderMatchDetails::SingleOrder {
                order_id,
                account,
                client_order_id,
                unique_priority_idx,
                price,
                orig_size,
                remaining_size,
                side,
                time_in_force,
                creation_time_micros,
                metadata,
            } => {
                if orig_size == 0 {
                    return Err(OrderError::ZeroSize);
                }
                if remaining_size > orig_size {
                    return Err(OrderError::RemainingExceedsOriginal {
                        remaining: remaining_size,
                        orig: orig_size,
                    });
                }
                Ok(Self {
                    request: SingleOrderRequest {
                        account,
                        client_order_id,
                        price,
                        orig_size,
                        remaining_size,
                        side,
                        trigger_condition: None,
                        time_in_force,
                        metadata,
                    },
                    order_id,
                    unique_priority_idx,
                    creation_time_micros,
                })
            }
            OrderMatchDetails::BulkOrder { .. } => Err(OrderError::VariantMismatch),
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn account(&self) -> AccountId {
        self.request.account
    }

    pub fn unique_priority_idx(&self) -> IncreasingIdx {
        self.unique_priority_idx
    }

    pub fn creation_time_micros(&self) -> u64 {
        self.creation_time_micros
    }

    pub fn price(&self) -> Price {
        self.request.price
    }

    pub fn orig_size(&self) -> Size {
        self.request.orig_size
    }

    pub fn remaining_size(&self) -> Size {
        self.request.remaining_size
    }

    pub fn side(&self) -> Side {
        self.request.side
    }

    pub fn time_in_force(&self) -> TimeInForce {
        self.request.time_in_force
    }

    pub fn trigger_condition(&self) -> Option<TriggerCondition> {
        self.request.trigger_condition
    }

    pub fn metadata(&self) -> &M {
        &self.request.metadata
    }

    pub fn account_client_order_id(&self) -> Option<AccountClientOrderId> {
        self.request
            .client_order_id
            .as_ref()
            .map(|label| AccountClientOrderId::new(self.request.account, label.clone()))
    }

    pub fn to_match_details(&self) -> OrderMatchDetails<M>
    where
        M: Clone,
    {
        let r = &self.request;
        new_single_order_match_details(
            self.order_id,
            r.account,
            r.client_order_id.clone(),
            self.unique_priority_idx,
            r.price,
            r.orig_size,
            r.remaining_size,
            r.side,
            r.time_in_force,
            self.creation_time_micros,
            r.metadata.clone(),
        )
    }

    /// Fills `matched_size` and snapshots the order after the fill.
    pub fn new_match(&mut self, matched_size: Size) -> Result<OrderMatch<M>, OrderError>
    where
        M: Clone,
    {
        let available = self.request.remaining_size;
        self.request.remaining_size =
            available
                .checked_sub(matched_size)
                .ok_or(OrderError::MatchSizeExceedsLevel {
                    requested: matched_size,
                    available,
                })?;
        Ok(new_order_match(self.to_match_details(), matched_size))
    }

    /// (request, order id, priority index, creation time).
    pub fn into_parts(self) -> (SingleOrderRequest<M>, OrderId, IncreasingIdx, u64) {
        (
            self.request,
            self.order_id,
            self.unique_priority_idx,
            self.creation_time_micros,
        )
    }
}
