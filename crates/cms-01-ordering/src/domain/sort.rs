//! # Display Sort
//!
//! Records are shown ascending on their order field. Records without a
//! value are placed after every record that has one. Ties keep their
//! relative input order (stable sort, no secondary key).

use shared_types::Orderable;

/// Value a missing order field is treated as by list views.
///
/// Kept for callers that need a single integer (e.g. to display a
/// placeholder). The sort itself never compares against it, so a stored
/// value larger than the sentinel still sorts ahead of a missing one.
pub const MISSING_ORDER_SENTINEL: i64 = 999_999;

/// Sort key for an order value: defined values first, then by value.
#[inline]
pub fn display_key(order: Option<i64>) -> (bool, i64) {
    (order.is_none(), order.unwrap_or(MISSING_ORDER_SENTINEL))
}

/// Sort records in place into display order.
pub fn sort_for_display<R: Orderable>(records: &mut [R]) {
    records.sort_by_key(|record| display_key(record.order()));
}

/// Return a display-ordered copy of `records`.
pub fn sorted_for_display<R: Orderable>(records: &[R]) -> Vec<R> {
    let mut sorted = records.to_vec();
    sort_for_display(&mut sorted);
    sorted
}

/// Whether `records` is already in display order.
pub fn is_display_sorted<R: Orderable>(records: &[R]) -> bool {
    records
        .windows(2)
        .all(|pair| display_key(pair[0].order()) <= display_key(pair[1].order()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ids, project};

    #[test]
    fn test_ascending_with_missing_last() {
        let mut records = vec![
            project(1, Some(3)),
            project(2, None),
            project(3, Some(1)),
            project(4, Some(2)),
        ];

        sort_for_display(&mut records);

        assert_eq!(ids(&records), vec![3, 4, 1, 2]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let mut records = vec![project(7, Some(2)), project(5, Some(1)), project(6, Some(2))];

        sort_for_display(&mut records);

        assert_eq!(ids(&records), vec![5, 7, 6]);
    }

    #[test]
    fn test_missing_sorts_after_values_above_sentinel() {
        let mut records = vec![project(1, None), project(2, Some(MISSING_ORDER_SENTINEL + 1))];

        sort_for_display(&mut records);

        assert_eq!(ids(&records), vec![2, 1]);
    }

    #[test]
    fn test_empty_and_single() {
        let mut empty: Vec<shared_types::Project> = Vec::new();
        sort_for_display(&mut empty);
        assert!(empty.is_empty());
        assert!(is_display_sorted(&empty));

        let single = vec![project(1, None)];
        assert!(is_display_sorted(&single));
    }
}
