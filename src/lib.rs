//! # Dire Order Types
//!
//! Order representation and match results for a hybrid limit order book that rests
//! both single orders and multi-level bulk orders, and matches them under strict
//! price-time priority.
//!
//! The book container and the matching walk live in the host engine. This crate
//! gives it the types it needs to treat both order kinds uniformly:
//!
//! - [`OrderMatchDetails`] / [`OrderMatch`]: a snapshot of the resting order hit
//!   by a match and the size filled against it.
//! - [`BulkOrderRequest`] / [`BulkOrder`]: validated price/size ladders per side,
//!   with level-0 matching, reinsertion and cancellation.
//! - [`validate_single_order_reinsertion_request`] and
//!   [`validate_bulk_order_reinsertion_request`]: identity checks before a partially
//!   filled remainder goes back on the book.
//! - [`OrderContext`]: mints [`OrderId`]s and [`IncreasingIdx`] priorities from a
//!   host-supplied counter and clock.
//!
//! ## Example
//!
//! ```rust
//! use dire_order_types::{
//!     new_bulk_order_match, AccountId, AscendingIdGenerator, ManualClock, OrderConfig,
//!     OrderContext, Side,
//! };
//!
//! let mut ctx = OrderContext::new(
//!     AscendingIdGenerator::new(),
//!     ManualClock::new(0),
//!     OrderConfig::default(),
//! );
//! let (bids, asks) = (vec![100, 99], vec![101, 102]);
//! let request = ctx
//!     .bulk_order_request(AccountId(1), 1, bids, vec![10, 20], asks, vec![10, 20], ())
//!     .unwrap();
//! let mut order = ctx.new_bulk_order(request);
//! let fill = new_bulk_order_match(&mut order, Side::Sell, 4).unwrap();
//! assert_eq!(fill.details().remaining_size(), 6);
//! assert_eq!(order.active_size(Side::Sell), Some(6));
//! ```

pub mod bulk_order;
pub mod config;
pub mod context;
pub mod error;
pub mod execution;
pub mod matching;
pub mod quote_gen;
pub mod reinsertion;
pub mod single_order;
pub mod types;

pub use bulk_order::{
    new_bulk_order, new_bulk_order_match, new_bulk_order_place_response_rejection,
    new_bulk_order_place_response_success, new_bulk_order_request,
    new_bulk_order_request_with_config, BulkOrder, BulkOrderPlaceResponse, BulkOrderRequest,
};
pub use config::OrderConfig;
pub use context::{
    next_increasing_idx, next_order_id, reverse_bits, AscendingIdGenerator, Clock, ManualClock,
    MonotonicCounter, OrderContext, SystemClock,
};
pub use error::OrderError;
pub use execution::ActiveMatchedOrder;
pub use matching::{
    new_bulk_order_match_details, new_order_match, new_order_match_details_with_modified_size,
    new_single_order_match_details, OrderMatch, OrderMatchDetails,
};
pub use reinsertion::{
    validate_bulk_order_reinsertion_request, validate_single_order_reinsertion_request,
};
pub use single_order::{SingleOrder, SingleOrderRequest};
pub use types::{
    into_decreasing_idx, AccountClientOrderId, AccountId, DecreasingIdx, IncreasingIdx, OrderId,
    OrderType, Price, Side, Size, TimeInForce, TriggerCondition,
};
