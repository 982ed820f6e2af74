//! Property tests for the display sort and the slot allocator.

use cms_01_ordering::{first_free_slot, is_display_sorted, sort_for_display, sorted_for_display};
use proptest::prelude::*;
use shared_types::{Project, RecordId};

fn projects(orders: Vec<Option<i64>>) -> Vec<Project> {
    orders
        .into_iter()
        .enumerate()
        .map(|(index, order)| Project {
            id: Some(RecordId::Int(index as i64)),
            order,
            ..Default::default()
        })
        .collect()
}

proptest! {
    #[test]
    fn sort_is_idempotent(orders in prop::collection::vec(prop::option::of(-50i64..50), 0..40)) {
        let once = sorted_for_display(&projects(orders));
        let twice = sorted_for_display(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn missing_orders_sort_last(orders in prop::collection::vec(prop::option::of(any::<i64>()), 0..40)) {
        let sorted = sorted_for_display(&projects(orders));
        prop_assert!(is_display_sorted(&sorted));

        let first_missing = sorted.iter().position(|p| p.order.is_none()).unwrap_or(sorted.len());
        prop_assert!(sorted[first_missing..].iter().all(|p| p.order.is_none()));
    }

    #[test]
    fn ties_keep_input_order(orders in prop::collection::vec(prop::option::of(0i64..4), 0..40)) {
        let mut sorted = projects(orders);
        sort_for_display(&mut sorted);

        for pair in sorted.windows(2) {
            if pair[0].order == pair[1].order {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }

    #[test]
    fn free_slot_is_smallest_unused(occupied in prop::collection::vec(1i64..=3, 0..3)) {
        let slot = first_free_slot(occupied.iter().copied(), 3);
        prop_assert!(!occupied.contains(&slot));
        prop_assert!((1..slot).all(|lower| occupied.contains(&lower)));
        prop_assert!((1..=4).contains(&slot));
    }
}
