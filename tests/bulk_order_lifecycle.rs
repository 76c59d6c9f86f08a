//! Host-flow integration: mint, place, match, reinsert and replace orders through
//! [`OrderContext`] with a scripted counter and a manual clock.

use dire_order_types::{
    new_bulk_order_match, new_order_match, validate_bulk_order_reinsertion_request,
    validate_single_order_reinsertion_request, AccountId, ActiveMatchedOrder,
    BulkOrderPlaceResponse, ManualClock, MonotonicCounter, OrderConfig, OrderContext, OrderError,
    OrderId, OrderType, Side, SingleOrder, SingleOrderRequest, TimeInForce,
};

/// Strictly increasing counter that steps by a fixed stride, standing in for the
/// host's transaction counter.
struct StridedCounter {
    next: u128,
    stride: u128,
}

impl MonotonicCounter for StridedCounter {
    fn next(&mut self) -> u128 {
        let v = self.next;
        self.next += self.stride;
        v
    }
}

fn init_log() {
    let _ = env_logger::try_init();
}

fn sell_request(label: &str) -> SingleOrderRequest<u8> {
    SingleOrderRequest::new(
        AccountId(3),
        Some(label.into()),
        250,
        40,
        Side::Sell,
        TimeInForce::GoodTillCancelled,
        1u8,
    )
    .unwrap()
}

fn context() -> OrderContext<StridedCounter, ManualClock> {
    OrderContext::new(
        StridedCounter { next: 100, stride: 10 },
        ManualClock::new(1_000_000),
        OrderConfig::default(),
    )
}

#[test]
fn order_ids_scatter_while_priorities_ascend() {
    init_log();
    let mut ctx = context();
    let a = ctx.next_order_id();
    let b = ctx.next_order_id();
    assert_eq!(a, OrderId(100u128.reverse_bits()));
    assert_eq!(b, OrderId(110u128.reverse_bits()));
    let p1 = ctx.next_increasing_idx();
    let p2 = ctx.next_increasing_idx();
    assert!(p1 < p2);
    assert!(p1.into_decreasing_idx() > p2.into_decreasing_idx());
}

#[test]
fn bulk_partial_fill_then_reinsert() {
    init_log();
    let mut ctx = context();
    let (bids, asks) = (vec![100, 99], vec![101, 102]);
    let request = ctx
        .bulk_order_request(AccountId(7), 1, bids, vec![10, 20], asks, vec![10, 20], "mm")
        .unwrap();
    let mut order = match ctx.place_bulk_order(request, None).unwrap() {
        BulkOrderPlaceResponse::Success { order, previous_seq_num: None, .. } => order,
        other => panic!("unexpected response {:?}", other),
    };

    let before = order.active_match_details(Side::Sell).unwrap();
    let fill = new_bulk_order_match(&mut order, Side::Sell, 10).unwrap();
    let summary = ActiveMatchedOrder::from_order_match(&fill);
    assert_eq!(summary.order_book_type(), OrderType::Bulk);
    assert!(summary.is_fully_filled());
    assert!(order.advance_exhausted_level(Side::Sell));
    assert_eq!(order.active_price(Side::Sell), Some(102));

    // The host decides part of the fill did not settle and returns it to the book.
    let returned = fill.details().with_remaining_size(4);
    assert_eq!(validate_bulk_order_reinsertion_request(&before, &returned), Ok(true));
    order.reinsert_order(&returned).unwrap();
    assert_eq!(order.prices(Side::Sell), &[101, 102]);
    assert_eq!(order.sizes(Side::Sell), &[4, 20]);
    assert_eq!(order.total_remaining_size(Side::Buy), 30u128);
}

#[test]
fn replacement_cancels_previous_ladders() {
    init_log();
    let mut ctx = context();
    let first = ctx
        .bulk_order_request(AccountId(7), 1, vec![100], vec![5], vec![101], vec![5], ())
        .unwrap();
    let mut resting = ctx.new_bulk_order(first);
    ctx.clock().advance(250);

    let second = ctx
        .bulk_order_request(AccountId(7), 2, vec![99], vec![8], vec![103], vec![8], ())
        .unwrap();
    let response = ctx.place_bulk_order(second, Some(&mut resting)).unwrap();
    let BulkOrderPlaceResponse::Success {
        order,
        cancelled_ask_prices,
        previous_seq_num,
        ..
    } = response
    else {
        panic!("expected success");
    };
    assert_eq!(cancelled_ask_prices, vec![101]);
    assert_eq!(previous_seq_num, Some(1));
    assert_eq!(order.creation_time_micros(), 1_000_250);
    assert!(resting.is_empty());

    let stale = ctx
        .bulk_order_request(AccountId(7), 2, vec![98], vec![1], vec![], vec![], ())
        .unwrap();
    let mut current = order;
    match ctx.place_bulk_order(stale, Some(&mut current)).unwrap() {
        BulkOrderPlaceResponse::Rejection {
            account,
            sequence_number,
            existing_sequence_number,
        } => {
            assert_eq!(
                (account, sequence_number, existing_sequence_number),
                (AccountId(7), 2, 2)
            );
        }
        BulkOrderPlaceResponse::Success { .. } => panic!("stale sequence number accepted"),
    }
    assert_eq!(current.active_price(Side::Buy), Some(99));

    // Another account's order can never be replaced by this request.
    let foreign = ctx
        .bulk_order_request(AccountId(8), 3, vec![97], vec![1], vec![], vec![], ())
        .unwrap();
    assert_eq!(
        ctx.place_bulk_order(foreign, Some(&mut current)),
        Err(OrderError::AccountMismatch { requested: 8, existing: 7 })
    );
    assert_eq!(current.sequence_number(), 2);
    assert_eq!(current.active_price(Side::Buy), Some(99));
}

#[test]
fn malformed_request_becomes_host_rejection() {
    init_log();
    let ctx = context();
    let err = ctx
        .bulk_order_request(AccountId(7), 1, vec![99, 100], vec![1, 1], vec![], vec![], ())
        .unwrap_err();
    assert!(err.is_malformed_bulk_request());
    assert_eq!(err, OrderError::InvalidBidOrder);
    assert_eq!(err.code(), 7);
}

#[test]
fn single_partial_fill_then_reinsert() {
    init_log();
    let mut ctx = context();
    let mut order = ctx.new_single_order(sell_request("s-1"));
    let before = order.to_match_details();
    let fill = order.new_match(15).unwrap();
    assert_eq!(fill.details().remaining_size(), 25);

    let refreshed = fill.details().clone();
    let rebuilt = SingleOrder::from_match_details(refreshed.clone()).unwrap();
    assert_eq!(validate_single_order_reinsertion_request(&before, &refreshed), Ok(true));
    assert_eq!(rebuilt.remaining_size(), 25);
    assert_eq!(rebuilt.orig_size(), 40);
    assert_eq!(rebuilt.unique_priority_idx(), order.unique_priority_idx());

    // A lookalike with a fresh priority must not be reinserted under the old identity.
    let impostor = ctx.new_single_order(sell_request("s-1"));
    assert_eq!(
        validate_single_order_reinsertion_request(&before, &impostor.to_match_details()),
        Ok(false)
    );
    assert_eq!(
        validate_bulk_order_reinsertion_request(&before, &refreshed),
        Err(OrderError::VariantMismatch)
    );
}

#[test]
fn match_details_survive_serialization() {
    let mut ctx = context();
    let request =
        SingleOrderRequest::new(AccountId(1), None, 10, 1, Side::Buy, TimeInForce::PostOnly, ())
            .unwrap();
    let single = ctx.new_single_order(request);
    let m = new_order_match(single.to_match_details(), 1);
    let json = serde_json::to_string(&m).unwrap();
    let back: dire_order_types::OrderMatch<()> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
}
