//! Match capture: a uniform snapshot of the order on the resting side of a match.
//!
//! [`OrderMatchDetails`] is built by the host engine before applying a fill and
//! works the same way for single and bulk orders. [`OrderMatch`] pairs one snapshot
//! with the size matched in one match event.

use crate::error::OrderError;
use crate::types::{AccountId, IncreasingIdx, OrderId, OrderType, Price, Side, Size, TimeInForce};

/// Snapshot of a matched order. The variant is fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OrderMatchDetails<M> {
    SingleOrder {
        order_id: OrderId,
        account: AccountId,
        client_order_id: Option<String>,
        unique_priority_idx: IncreasingIdx,
        price: Price,
        orig_size: Size,
        remaining_size: Size,
        side: Side,
        time_in_force: TimeInForce,
        creation_time_micros: u64,
        metadata: M,
    },
    BulkOrder {
        order_id: OrderId,
        account: AccountId,
        unique_priority_idx: IncreasingIdx,
        price: Price,
        remaining_size: Size,
        side: Side,
        sequence_number: u64,
        creation_time_micros: u64,
        metadata: M,
    },
}

#[allow(clippy::too_many_arguments)]
pub fn new_single_order_match_details<M>(
    order_id: OrderId,
    account: AccountId,
    client_order_id: Option<String>,
    unique_priority_idx: IncreasingIdx,
    price: Price,
    orig_size: Size,
    remaining_size: Size,
    side: Side,
    time_in_force: TimeInForce,
    creation_time_micros: u64,
    metadata: M,
) -> OrderMatchDetails<M> {
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
    }
}

#[allow(clippy::too_many_arguments)]
pub fn new_bulk_order_match_details<M>(
    order_id: OrderId,
    account: AccountId,
    unique_priority_idx: IncreasingIdx,
    price: Price,
    remaining_size: Size,
    side: Side,
    sequence_number: u64,
    creation_time_micros: u64,
    metadata: M,
) -> OrderMatchDetails<M> {
    OrderMatchDetails::BulkOrder {
        order_id,
        account,
        unique_priority_idx,
        price,
        remaining_size,
        side,
        sequence_number,
        creation_time_micros,
        metadata,
    }
}

impl<M> OrderMatchDetails<M> {
    pub fn order_id(&self) -> OrderId {
        match self {
            Self::SingleOrder { order_id, .. } | Self::BulkOrder { order_id, .. } => *order_id,
        }
    }

    pub fn account(&self) -> AccountId {
        match self {
            Self::SingleOrder { account, .. } | Self::BulkOrder { account, .. } => *account,
        }
    }

    pub fn unique_priority_idx(&self) -> IncreasingIdx {
        match self {
            Self::SingleOrder { unique_priority_idx, .. }
            | Self::BulkOrder { unique_priority_idx, .. } => *unique_priority_idx,
        }
    }

    pub fn price(&self) -> Price {
        match self {
            Self::SingleOrder { price, .. } | Self::BulkOrder { price, .. } => *price,
        }
    }

    pub fn remaining_size(&self) -> Size {
        match self {
            Self::SingleOrder { remaining_size, .. } | Self::BulkOrder { remaining_size, .. } => {
                *remaining_size
            }
        }
    }

    pub fn side(&self) -> Side {
        match self {
            Self::SingleOrder { side, .. } | Self::BulkOrder { side, .. } => *side,
        }
    }

    pub fn is_bid(&self) -> bool {
        self.side().is_bid()
    }

    pub fn creation_time_micros(&self) -> u64 {
        match self {
            Self::SingleOrder { creation_time_micros, .. }
            | Self::BulkOrder { creation_time_micros, .. } => *creation_time_micros,
        }
    }

    pub fn metadata(&self) -> &M {
        match self {
            Self::SingleOrder { metadata, .. } | Self::BulkOrder { metadata, .. } => metadata,
        }
    }

    pub fn book_type(&self) -> OrderType {
        match self {
            Self::SingleOrder { .. } => OrderType::Single,
            Self::BulkOrder { .. } => OrderType::Bulk,
        }
    }

    pub fn is_single_order(&self) -> bool {
        matches!(self, Self::SingleOrder { .. })
    }

    pub fn is_bulk_order(&self) -> bool {
        matches!(self, Self::BulkOrder { .. })
    }

    /// Time-in-force of a single order. Bulk orders report `GoodTillCancelled`.
    pub fn time_in_force(&self) -> TimeInForce {
        match self {
            Self::SingleOrder { time_in_force, .. } => *time_in_force,
            Self::BulkOrder { .. } => TimeInForce::GoodTillCancelled,
        }
    }

    /// Client label of a single order. Bulk orders have none.
    pub fn client_order_id(&self) -> Option<&str> {
        match self {
            Self::SingleOrder { client_order_id, .. } => client_order_id.as_deref(),
            Self::BulkOrder { .. } => None,
        }
    }

    /// Sequence number of a bulk order; `VariantMismatch` on a single order.
    pub fn sequence_number(&self) -> Result<u64, OrderError> {
        match self {
            Self::BulkOrder { sequence_number, .. } => Ok(*sequence_number),
            Self::SingleOrder { .. } => Err(OrderError::VariantMismatch),
        }
    }

    /// Original size of a single order; `VariantMismatch` on a bulk order.
    pub fn orig_size(&self) -> Result<Size, OrderError> {
        match self {
            Self::SingleOrder { orig_size, .. } => Ok(*orig_size),
            Self::BulkOrder { .. } => Err(OrderError::VariantMismatch),
        }
    }

    /// Copy of `self` with only the remaining size replaced.
    pub fn with_remaining_size(&self, remaining_size: Size) -> Self
    where
        M: Clone,
    {
        let mut details = self.clone();
        match &mut details {
            Self::SingleOrder {
                remaining_size: r, ..
            }
            | Self::BulkOrder {
                remaining_size: r, ..
            } => *r = remaining_size,
        }
        details
    }
}

/// `details.with_remaining_size(remaining_size)`.
pub fn new_order_match_details_with_modified_size<M: Clone>(
    details: &OrderMatchDetails<M>,
    remaining_size: Size,
) -> OrderMatchDetails<M> {
    details.with_remaining_size(remaining_size)
}

/// One match event: the matched order's snapshot and the size filled against it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OrderMatch<M> {
    order: OrderMatchDetails<M>,
    matched_size: Size,
}

pub fn new_order_match<M>(order: OrderMatchDetails<M>, matched_size: Size) -> OrderMatch<M> {
    OrderMatch {
        order,
        matched_size,
    }
}

impl<M> OrderMatch<M> {
    pub fn details(&self) -> &OrderMatchDetails<M> {
        &self.order
    }

    pub fn matched_size(&self) -> Size {
        self.matched_size
    }

    pub fn into_parts(self) -> (OrderMatchDetails<M>, Size) {
        (self.order, self.matched_size)
    }
}
