//! Root reconstruction from a left-to-right tiling of frozen subtrees.
//!
//! Range and consistency proofs both reduce to the same question: given the
//! roots of aligned, fully populated subtrees that together cover leaves
//! `[0, num_leaves)` in order, what is the accumulator root? Adjacent siblings
//! are merged on a stack as tiles arrive; the right edge is then folded up to
//! the root, hashing against the placeholder wherever the right side is empty.

use ledger_proof_primitives::{
    ACCUMULATOR_PLACEHOLDER_HASH, HashValue, InternalDomain, hash_internal,
};

use crate::position::{MAX_ACCUMULATOR_LEAVES, Position, root_level};

/// Fold `(position, root)` tiles into the accumulator root.
///
/// Returns a description of the first structural problem found: a gap or
/// overlap between tiles, a tile that is not fully populated, or tiles that do
/// not reach `num_leaves`.
pub(crate) fn fold_subtrees<H, I>(tiles: I, num_leaves: u64) -> Result<HashValue, String>
where
    H: InternalDomain,
    I: IntoIterator<Item = (Position, HashValue)>,
{
    if num_leaves > MAX_ACCUMULATOR_LEAVES {
        return Err(format!(
            "{} leaves exceeds the accumulator capacity of {}",
            num_leaves, MAX_ACCUMULATOR_LEAVES
        ));
    }

    let mut stack: Vec<(Position, HashValue)> = Vec::with_capacity(64);
    let mut next_leaf = 0u64;
    for (position, hash) in tiles {
        if position.first_leaf_index() != next_leaf {
            return Err(format!(
                "subtree {:?} starts at leaf {}, expected leaf {}",
                position,
                position.first_leaf_index(),
                next_leaf
            ));
        }
        if !position.is_freezable(num_leaves) {
            return Err(format!(
                "subtree {:?} extends past leaf count {}",
                position, num_leaves
            ));
        }
        next_leaf = position.last_leaf_index() + 1;

        let (mut position, mut hash) = (position, hash);
        while let Some(&(top_position, top_hash)) = stack.last() {
            if !(position.is_right_child() && top_position == position.sibling()) {
                break;
            }
            stack.pop();
            hash = hash_internal::<H>(&top_hash, &hash);
            position = position.parent();
        }
        stack.push((position, hash));
    }

    if next_leaf != num_leaves {
        return Err(format!(
            "subtrees cover {} leaves, accumulator has {}",
            next_leaf, num_leaves
        ));
    }

    let Some((mut position, mut hash)) = stack.pop() else {
        return Ok(ACCUMULATOR_PLACEHOLDER_HASH);
    };
    let root_level = root_level(num_leaves);
    while position.level() < root_level {
        hash = if position.is_left_child() {
            hash_internal::<H>(&hash, &ACCUMULATOR_PLACEHOLDER_HASH)
        } else {
            match stack.pop() {
                Some((left_position, left_hash)) if left_position == position.sibling() => {
                    hash_internal::<H>(&left_hash, &hash)
                }
                _ => {
                    return Err(format!(
                        "missing left sibling of {:?} on the right edge",
                        position
                    ));
                }
            }
        };
        position = position.parent();
    }

    if !stack.is_empty() {
        return Err(format!(
            "{} subtrees left over after reaching the root",
            stack.len()
        ));
    }
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use ledger_proof_primitives::TransactionAccumulatorDomain;

    use super::*;
    use crate::{
        mock::MockAccumulator,
        position::{aligned_subtrees, frozen_subtree_roots},
    };

    type Mock = MockAccumulator<TransactionAccumulatorDomain>;

    fn fold(tiles: Vec<(Position, HashValue)>, num_leaves: u64) -> Result<HashValue, String> {
        fold_subtrees::<TransactionAccumulatorDomain, _>(tiles, num_leaves)
    }

    #[test]
    fn test_empty_accumulator_folds_to_placeholder() {
        assert_eq!(fold(vec![], 0), Ok(ACCUMULATOR_PLACEHOLDER_HASH));
    }

    #[test]
    fn test_frozen_roots_fold_to_root() {
        for num_leaves in 1..70u64 {
            let mock = Mock::with_leaf_count(num_leaves);
            let tiles = frozen_subtree_roots(num_leaves)
                .into_iter()
                .map(|p| (p, mock.node_hash(p, num_leaves)))
                .collect();
            assert_eq!(fold(tiles, num_leaves), Ok(mock.root_hash()), "n={}", num_leaves);
        }
    }

    #[test]
    fn test_leaf_tiles_fold_to_root() {
        let mock = Mock::with_leaf_count(13);
        let tiles = (0..13)
            .map(|i| (Position::from_leaf_index(i), mock.leaves()[i as usize].hash_value()))
            .collect();
        assert_eq!(fold(tiles, 13), Ok(mock.root_hash()));
    }

    #[test]
    fn test_gap_rejected() {
        let mock = Mock::with_leaf_count(4);
        let tiles = aligned_subtrees(1, 4)
            .into_iter()
            .map(|p| (p, mock.node_hash(p, 4)))
            .collect();
        let err = fold(tiles, 4).expect_err("leaf 0 is missing");
        assert!(err.contains("expected leaf 0"), "{}", err);
    }

    #[test]
    fn test_short_cover_rejected() {
        let mock = Mock::with_leaf_count(6);
        let tiles = frozen_subtree_roots(4)
            .into_iter()
            .map(|p| (p, mock.node_hash(p, 6)))
            .collect();
        let err = fold(tiles, 6).expect_err("only 4 of 6 leaves covered");
        assert!(err.contains("cover 4 leaves"), "{}", err);
    }

    #[test]
    fn test_unpopulated_tile_rejected() {
        let tiles = vec![(Position::from_level_and_index(2, 0), HashValue::zero())];
        assert!(fold(tiles, 3).is_err());
    }

    #[test]
    fn test_capacity_exceeded_rejected() {
        assert!(fold(vec![], MAX_ACCUMULATOR_LEAVES + 1).is_err());
    }
}
