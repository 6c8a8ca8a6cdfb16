//! Pure helpers for the dense watchlist ordering.
//!
//! A user's watchlist `order` values must always be exactly `1..=N`. The
//! repository layer loads the current entries, runs one of these helpers and
//! writes back only the rows whose position changed.

use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderingError {
    #[error("Movie {0} appears more than once in the submitted order")]
    Duplicate(i32),

    #[error("Movie {0} is not on the watch list")]
    Unknown(i32),

    #[error("Submitted order has {submitted} movies but the watch list has {expected}")]
    Incomplete { expected: usize, submitted: usize },
}

/// Order value for an entry appended to the end of a list.
#[must_use]
pub fn next_order(existing: &[i32]) -> i32 {
    existing.iter().copied().max().map_or(1, |max| max + 1)
}

/// Renumbers `(key, order)` pairs to `1..=N`, keeping their relative order.
///
/// Returns only the pairs whose order changes, with the new value.
#[must_use]
pub fn dense_renumber<K: Copy>(entries: &[(K, i32)]) -> Vec<(K, i32)> {
    let mut sorted: Vec<(usize, K, i32)> = entries
        .iter()
        .enumerate()
        .map(|(idx, (key, order))| (idx, *key, *order))
        .collect();
    // Ties keep their input position so renumbering is deterministic.
    sorted.sort_by_key(|(idx, _, order)| (*order, *idx));

    sorted
        .into_iter()
        .zip(1..)
        .filter(|((_, _, old), new)| old != new)
        .map(|((_, key, _), new)| (key, new))
        .collect()
}

/// Checks that `submitted` is a permutation of `current`.
pub fn validate_permutation(current: &[i32], submitted: &[i32]) -> Result<(), OrderingError> {
    let known: HashSet<i32> = current.iter().copied().collect();
    let mut seen = HashSet::with_capacity(submitted.len());

    for id in submitted {
        if !known.contains(id) {
            return Err(OrderingError::Unknown(*id));
        }
        if !seen.insert(*id) {
            return Err(OrderingError::Duplicate(*id));
        }
    }

    if seen.len() != known.len() {
        return Err(OrderingError::Incomplete {
            expected: known.len(),
            submitted: submitted.len(),
        });
    }

    Ok(())
}

/// Moves the item at `from` so that it ends up at index `to`.
///
/// `to` is clamped to the last index. Out of range `from` leaves the slice
/// untouched and returns `false`.
pub fn move_within<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() {
        return false;
    }
    let to = to.min(items.len() - 1);
    let item = items.remove(from);
    items.insert(to, item);
    true
}

/// Converts a 1-based list position into a clamped 0-based index.
#[must_use]
pub fn position_to_index(position: i32, len: usize) -> usize {
    let index = usize::try_from(position.saturating_sub(1)).unwrap_or(0);
    index.min(len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_order_appends() {
        assert_eq!(next_order(&[]), 1);
        assert_eq!(next_order(&[1, 2, 3]), 4);
        assert_eq!(next_order(&[3, 1]), 4);
    }

    #[test]
    fn dense_renumber_closes_gaps() {
        // Entry with order 2 was deleted.
        let entries = [(10, 1), (30, 3), (40, 4)];
        let changes = dense_renumber(&entries);
        assert_eq!(changes, vec![(30, 2), (40, 3)]);
    }

    #[test]
    fn dense_renumber_noop_when_already_dense() {
        let entries = [(1, 1), (2, 2), (3, 3)];
        assert!(dense_renumber(&entries).is_empty());
    }

    #[test]
    fn dense_renumber_sorts_by_prior_order() {
        let entries = [(7, 5), (8, 2), (9, 9)];
        let changes = dense_renumber(&entries);
        assert_eq!(changes, vec![(8, 1), (7, 2), (9, 3)]);
    }

    #[test]
    fn dense_renumber_breaks_duplicate_orders_by_input_position() {
        let entries = [(1, 2), (2, 2)];
        let changes = dense_renumber(&entries);
        assert_eq!(changes, vec![(1, 1)]);
    }

    #[test]
    fn permutation_accepts_reordering() {
        assert!(validate_permutation(&[1, 2, 3], &[3, 1, 2]).is_ok());
        assert!(validate_permutation(&[], &[]).is_ok());
    }

    #[test]
    fn permutation_rejects_unknown_duplicate_and_missing() {
        assert_eq!(
            validate_permutation(&[1, 2], &[1, 5]),
            Err(OrderingError::Unknown(5))
        );
        assert_eq!(
            validate_permutation(&[1, 2], &[1, 1]),
            Err(OrderingError::Duplicate(1))
        );
        assert_eq!(
            validate_permutation(&[1, 2, 3], &[2, 1]),
            Err(OrderingError::Incomplete {
                expected: 3,
                submitted: 2
            })
        );
    }

    #[test]
    fn move_within_splices() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        assert!(move_within(&mut items, 0, 2));
        assert_eq!(items, vec!['b', 'c', 'a', 'd']);

        assert!(move_within(&mut items, 3, 0));
        assert_eq!(items, vec!['d', 'b', 'c', 'a']);
    }

    #[test]
    fn move_within_clamps_target_and_rejects_bad_source() {
        let mut items = vec![1, 2, 3];
        assert!(move_within(&mut items, 0, 99));
        assert_eq!(items, vec![2, 3, 1]);

        assert!(!move_within(&mut items, 3, 0));
        assert_eq!(items, vec![2, 3, 1]);
    }

    #[test]
    fn position_to_index_clamps() {
        assert_eq!(position_to_index(1, 3), 0);
        assert_eq!(position_to_index(3, 3), 2);
        assert_eq!(position_to_index(10, 3), 2);
        assert_eq!(position_to_index(0, 3), 0);
        assert_eq!(position_to_index(-4, 3), 0);
        assert_eq!(position_to_index(1, 0), 0);
    }
}
