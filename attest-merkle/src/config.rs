//! This module contains various configuration options. In general, the
//! configuration options impact performance only. Trees, roots, and proofs are
//! bit-identical no matter how they are configured.
//!
//! Most configuration options can also be set via environment variables.
//! Generally, the environment variables take precedence over the options set
//! in this module.

use std::cell::RefCell;

use arbitrary::Arbitrary;

thread_local! {
    static CONFIG: RefCell<Config> = RefCell::new(Config::new());
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
struct Config {
    pub merkle_tree_parallelization_cutoff: MerkleTreeParallelizationCutoff,
}

impl Config {
    fn new() -> Self {
        let merkle_tree_parallelization_cutoff = MerkleTreeParallelizationCutoff::new(None);

        Self {
            merkle_tree_parallelization_cutoff,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
struct MerkleTreeParallelizationCutoff(usize);

impl MerkleTreeParallelizationCutoff {
    const ENV_VAR: &'static str = "ATTEST_MERKLE_MERKLE_TREE_PARALLELIZATION_CUTOFF";
    const DEFAULT: usize = 512;
    const MINIMUM: usize = 2;

    /// Creates a new `MerkleTreeParallelizationCutoff` with the given value.
    /// Respects the precedence of the environment variable if set. Uses the
    /// default if no value is provided.
    fn new(config_value: Option<usize>) -> Self {
        let cutoff = std::env::var(Self::ENV_VAR)
            .ok()
            .and_then(|s| s.parse().ok())
            .or(config_value)
            .unwrap_or(Self::DEFAULT)
            .max(Self::MINIMUM);

        Self(cutoff)
    }
}

/// Sets the cutoff for parallelizing Merkle tree construction with
/// [`CpuParallel`](crate::util_types::merkle_tree::CpuParallel).
///
/// For example, if the cutoff is set to 512, then a layer with fewer than 512
/// nodes gets folded into its parent layer sequentially, while larger layers
/// are folded in parallel. Since every layer is half the size of the one
/// below it, a large tree starts out parallel and finishes sequentially.
///
/// Can also be set via the environment variable
/// `ATTEST_MERKLE_MERKLE_TREE_PARALLELIZATION_CUTOFF`. The environment variable
/// has higher precedence than this function.
///
/// The default is 512. The minimum is always 2.
///
/// The setting is thread-local.
pub fn set_merkle_tree_parallelization_cutoff(cutoff: usize) {
    let cutoff = MerkleTreeParallelizationCutoff::new(Some(cutoff));
    CONFIG.with(|c| c.borrow_mut().merkle_tree_parallelization_cutoff = cutoff);
}

pub(crate) fn merkle_tree_parallelization_cutoff() -> usize {
    CONFIG
        .with(|c| c.borrow().merkle_tree_parallelization_cutoff)
        .0
}
