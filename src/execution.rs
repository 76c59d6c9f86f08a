//! Per-order outcome of one match step.

use crate::matching::OrderMatch;
use crate::types::{OrderId, OrderType, Size};

/// Outcome for one resting order after a match step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActiveMatchedOrder {
    order_id: OrderId,
    matched_size: Size,
    /// Size still resting after the match.
    remaining_size: Size,
    order_book_type: OrderType,
}

impl ActiveMatchedOrder {
    pub fn new(
        order_id: OrderId,
        matched_size: Size,
        remaining_size: Size,
        order_book_type: OrderType,
    ) -> Self {
        Self {
            order_id,
            matched_size,
            remaining_size,
            order_book_type,
        }
    }

    /// Summary of a match whose details carry the post-match remaining size.
    pub fn from_order_match<M>(order_match: &OrderMatch<M>) -> Self {
        let details = order_match.details();
        Self::new(
            details.order_id(),
            order_match.matched_size(),
            details.remaining_size(),
            details.book_type(),
        )
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn matched_size(&self) -> Size {
        self.matched_size
    }

    pub fn remaining_size(&self) -> Size {
        self.remaining_size
    }

    pub fn order_book_type(&self) -> OrderType {
        self.order_book_type
    }

    pub fn is_single_order(&self) -> bool {
        self.order_book_type.is_single()
    }

    /// True once nothing remains to rest.
    pub fn is_fully_filled(&self) -> bool {
        self.remaining_size == 0
    }

    pub fn into_parts(self) -> (OrderId, Size, Size, OrderType) {
        (
            self.order_id,
            self.matched_size,
            self.remaining_size,
            self.order_book_type,
        )
    }
}
