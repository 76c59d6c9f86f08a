//! Identity checks gating reinsertion of a partially filled order.
//!
//! Remaining size and metadata are not compared: the first legitimately shrinks
//! after a fill and the second may be refreshed on reinsertion.

use crate::error::OrderError;
use crate::matching::OrderMatchDetails;
use log::debug;

/// True if `reinserted` is the same single order as `original`.
///
/// Compares order id, account, priority index, price, original size and side.
/// Fails with `VariantMismatch` unless both are single-order snapshots.
pub fn validate_single_order_reinsertion_request<M>(
    original: &OrderMatchDetails<M>,
    reinserted: &OrderMatchDetails<M>,
) -> Result<bool, OrderError> {
    match (original, reinserted) {
        (
            OrderMatchDetails::SingleOrder {
                order_id,
                account,
                unique_priority_idx,
                price,
                orig_size,
                side,
                ..
            },
            OrderMatchDetails::SingleOrder {
                order_id: other_order_id,
                account: other_account,
                unique_priority_idx: other_priority_idx,
                price: other_price,
                orig_size: other_orig_size,
                side: other_side,
                ..
            },
        ) => {
            let same = order_id == other_order_id
                && account == other_account
                && unique_priority_idx == other_priority_idx
                && price == other_price
                && orig_size == other_orig_size
                && side == other_side;
            if !same {
                debug!("single reinsertion mismatch order_id={}", order_id.0);
            }
            Ok(same)
        }
        _ => Err(OrderError::VariantMismatch),
    }
}

/// True if `reinserted` is the same bulk order level as `original`.
///
/// Compares order id, account, priority index, price, side and sequence number.
pub fn validate_bulk_order_reinsertion_request<M>(
    original: &OrderMatchDetails<M>,
    reinserted: &OrderMatchDetails<M>,
) -> Result<bool, OrderError> {
    match (original, reinserted) {
        (
            OrderMatchDetails::BulkOrder {
                order_id,
                account,
                unique_priority_idx,
                price,
                side,
                sequence_number,
                ..
            },
            OrderMatchDetails::BulkOrder {
                order_id: other_order_id,
                account: other_account,
                unique_priority_idx: other_priority_idx,
                price: other_price,
                side: other_side,
                sequence_number: other_sequence_number,
                ..
            },
        ) => {
            let same = order_id == other_order_id
                && account == other_account
                && unique_priority_idx == other_priority_idx
                && price == other_price
                && side == other_side
                && sequence_number == other_sequence_number;
            if !same {
                debug!("bulk reinsertion mismatch order_id={}", order_id.0);
            }
            Ok(same)
        }
        _ => Err(OrderError::VariantMismatch),
    }
}
