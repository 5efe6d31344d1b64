use std::collections::BTreeSet;

/// Inclusive span between two indices, in either order.
pub fn build_range(a: usize, b: usize) -> BTreeSet<usize> {
    (a.min(b)..=a.max(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_point() {
        assert_eq!(build_range(7, 7), BTreeSet::from([7]));
    }

    #[test]
    fn test_reversed_arguments() {
        assert_eq!(build_range(15, 10), BTreeSet::from([10, 11, 12, 13, 14, 15]));
    }

    proptest! {
        #[test]
        fn range_is_symmetric_and_complete(a in 0usize..48, b in 0usize..48) {
            let forward = build_range(a, b);
            prop_assert_eq!(&forward, &build_range(b, a));
            prop_assert_eq!(forward.len(), a.abs_diff(b) + 1);
            prop_assert!(forward.iter().all(|m| (a.min(b)..=a.max(b)).contains(m)));
        }
    }
}
