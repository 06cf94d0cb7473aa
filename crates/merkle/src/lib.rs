//! Merkle commitments over criteria sets.
//!
//! A criteria item commits to a set of token identifiers through a Merkle
//! root. Leaves are `keccak256(abi.encode(uint256 id))` and are ordered by
//! their hash, not by the identifier. Internal nodes hash the smaller child
//! first, so a proof is just the list of siblings without any left/right
//! bookkeeping. A node without a sibling moves up a level unchanged.

use {
    alloy_primitives::{B256, U256, keccak256},
    itertools::Itertools,
    model::{Diagnostics, issue::MerkleIssue},
};

/// The leaf hash of a single identifier.
pub fn leaf(value: U256) -> B256 {
    keccak256(value.to_be_bytes::<32>())
}

fn hash_pair(a: B256, b: B256) -> B256 {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    let mut buffer = [0u8; 64];
    buffer[..32].copy_from_slice(first.as_slice());
    buffer[32..].copy_from_slice(second.as_slice());
    keccak256(buffer)
}

/// Sorts identifiers into canonical order: ascending by leaf hash.
///
/// Duplicates are kept; [`build_root`] and [`build_proof`] reject them.
pub fn sort(values: &[U256]) -> Vec<U256> {
    values
        .iter()
        .map(|value| (leaf(*value), *value))
        .sorted_by_key(|(hash, _)| *hash)
        .map(|(_, value)| value)
        .collect()
}

/// Leaves of the canonically sorted set, or the diagnostics explaining why
/// no tree can be built.
fn sorted_leaves(values: &[U256]) -> (Option<Vec<B256>>, Diagnostics) {
    let mut diagnostics = Diagnostics::empty();
    if values.is_empty() {
        diagnostics.add_error(MerkleIssue::EmptySet);
        return (None, diagnostics);
    }

    let leaves: Vec<_> = values.iter().map(|value| leaf(*value)).sorted().collect();
    if leaves.iter().tuple_windows().any(|(a, b)| a == b) {
        diagnostics.add_error(MerkleIssue::DuplicateLeaf);
        return (None, diagnostics);
    }
    if leaves.len() == 1 {
        diagnostics.add_warning(MerkleIssue::SingleLeaf);
    }
    (Some(leaves), diagnostics)
}

fn next_level(level: &[B256]) -> Vec<B256> {
    level
        .chunks(2)
        .map(|pair| match pair {
            [a, b] => hash_pair(*a, *b),
            [single] => *single,
            _ => unreachable!("chunks of two"),
        })
        .collect()
}

/// Builds the root committing to `values`. Returns the zero hash along with
/// the errors if no root can be built.
pub fn build_root(values: &[U256]) -> (B256, Diagnostics) {
    let (leaves, diagnostics) = sorted_leaves(values);
    let Some(mut level) = leaves else {
        return (B256::ZERO, diagnostics);
    };
    while level.len() > 1 {
        level = next_level(&level);
    }
    (level[0], diagnostics)
}

/// Builds the inclusion proof for the element at `target_index` of the
/// canonically sorted set (see [`sort`]).
pub fn build_proof(values: &[U256], target_index: usize) -> (Vec<B256>, Diagnostics) {
    let (leaves, mut diagnostics) = sorted_leaves(values);
    let Some(mut level) = leaves else {
        return (Vec::new(), diagnostics);
    };
    if target_index >= level.len() {
        diagnostics.add_error(MerkleIssue::TargetIndexOutOfRange);
        return (Vec::new(), diagnostics);
    }

    let mut proof = Vec::new();
    let mut index = target_index;
    while level.len() > 1 {
        // A promoted node has no sibling on this level.
        if let Some(sibling) = level.get(index ^ 1) {
            proof.push(*sibling);
        }
        index /= 2;
        level = next_level(&level);
    }
    tracing::trace!(target_index, len = proof.len(), "built merkle proof");
    (proof, diagnostics)
}

/// Recomputes the root from `value` and its proof and compares it against
/// `root`.
pub fn verify_proof(root: B256, proof: &[B256], value: U256) -> bool {
    proof
        .iter()
        .fold(leaf(value), |node, sibling| hash_pair(node, *sibling))
        == root
}

#[cfg(test)]
mod tests {
    use {super::*, model::Issue, rstest::rstest};

    fn values(n: u64) -> Vec<U256> {
        (1..=n).map(U256::from).collect()
    }

    #[test]
    fn sorts_by_leaf_hash() {
        let sorted = sort(&values(10));
        assert_eq!(sorted.len(), 10);
        assert!(
            sorted
                .iter()
                .tuple_windows()
                .all(|(a, b)| leaf(*a) < leaf(*b))
        );
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(5)]
    #[case(8)]
    #[case(13)]
    fn proofs_verify_for_every_index(#[case] n: u64) {
        let set = values(n);
        let sorted = sort(&set);
        let (root, diagnostics) = build_root(&set);
        assert!(!diagnostics.has_errors());

        for (index, value) in sorted.iter().enumerate() {
            let (proof, diagnostics) = build_proof(&set, index);
            assert!(!diagnostics.has_errors());
            assert!(verify_proof(root, &proof, *value), "index {index} of {n}");
        }
    }

    #[test]
    fn tampered_value_or_root_fails() {
        let set = values(6);
        let sorted = sort(&set);
        let (root, _) = build_root(&set);
        let (proof, _) = build_proof(&set, 2);

        assert!(verify_proof(root, &proof, sorted[2]));
        assert!(!verify_proof(root, &proof, sorted[3]));
        assert!(!verify_proof(root, &proof, U256::from(1_000)));
        assert!(!verify_proof(B256::repeat_byte(1), &proof, sorted[2]));
    }

    #[test]
    fn odd_node_is_promoted() {
        let sorted = sort(&values(3));
        let leaves: Vec<_> = sorted.iter().map(|value| leaf(*value)).collect();
        let (root, _) = build_root(&sorted);
        assert_eq!(root, hash_pair(hash_pair(leaves[0], leaves[1]), leaves[2]));

        let (proof, _) = build_proof(&sorted, 2);
        assert_eq!(proof, [hash_pair(leaves[0], leaves[1])]);
    }

    #[test]
    fn root_is_independent_of_input_order() {
        let mut set = values(7);
        let (root, _) = build_root(&set);
        set.reverse();
        assert_eq!(build_root(&set).0, root);
    }

    #[test]
    fn empty_set() {
        let (root, diagnostics) = build_root(&[]);
        assert_eq!(root, B256::ZERO);
        assert_eq!(diagnostics.errors(), [Issue::from(MerkleIssue::EmptySet)]);

        let (proof, diagnostics) = build_proof(&[], 0);
        assert!(proof.is_empty());
        assert_eq!(diagnostics.errors(), [Issue::from(MerkleIssue::EmptySet)]);
    }

    #[test]
    fn single_leaf() {
        let (root, diagnostics) = build_root(&values(1));
        assert_eq!(root, leaf(U256::from(1)));
        assert!(!diagnostics.has_errors());
        assert_eq!(diagnostics.warnings(), [Issue::from(MerkleIssue::SingleLeaf)]);

        let (proof, _) = build_proof(&values(1), 0);
        assert!(proof.is_empty());
    }

    #[test]
    fn duplicates_are_rejected() {
        let set = [U256::from(1), U256::from(2), U256::from(1)];
        let (root, diagnostics) = build_root(&set);
        assert_eq!(root, B256::ZERO);
        assert_eq!(
            diagnostics.errors(),
            [Issue::from(MerkleIssue::DuplicateLeaf)]
        );
    }

    #[test]
    fn target_out_of_range() {
        let (proof, diagnostics) = build_proof(&values(4), 4);
        assert!(proof.is_empty());
        assert_eq!(
            diagnostics.errors(),
            [Issue::from(MerkleIssue::TargetIndexOutOfRange)]
        );
    }
}
