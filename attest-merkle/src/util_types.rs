pub mod leaf_batch;
pub mod merkle_hasher;
pub mod merkle_proof;
pub mod merkle_tree;
pub mod merkle_tree_maker;
