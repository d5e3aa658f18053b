use criterion::*;
use rand::rngs::StdRng;
use rand::*;

use attest_merkle::prelude::*;

criterion_main!(merkle_tree_authenticate);
criterion_group!(merkle_tree_authenticate, generate_proof, verify_proof);

fn generate_proof(c: &mut Criterion) {
    let mut sampler = MerkleTreeSampler::default();
    let tree = sampler.tree();

    c.bench_function("generate_proof", |bencher| {
        bencher.iter_batched(
            || sampler.index_to_open(),
            |index| tree.proof(index),
            BatchSize::SmallInput,
        )
    });
}

fn verify_proof(c: &mut Criterion) {
    let mut sampler = MerkleTreeSampler::default();
    let tree = sampler.tree();

    c.bench_function("verify_proof", |bencher| {
        bencher.iter_batched(
            || sampler.proof(&tree),
            |proof| merkle_tree::verify::<Keccak256>(tree.root(), &proof),
            BatchSize::SmallInput,
        );
    });
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct MerkleTreeSampler {
    rng: StdRng,
    num_leaves: usize,
}

impl Default for MerkleTreeSampler {
    fn default() -> Self {
        Self {
            rng: StdRng::seed_from_u64(0),
            num_leaves: (1 << 18) + 3,
        }
    }
}

impl MerkleTreeSampler {
    fn leaf_digests(&mut self) -> Vec<Digest> {
        (0..self.num_leaves)
            .map(|_| Keccak256::hash_leaf(&self.rng.next_u64().to_le_bytes()))
            .collect()
    }

    fn tree(&mut self) -> MerkleTree<Keccak256> {
        let leaf_digests = self.leaf_digests();
        CpuParallel::from_digests(&leaf_digests).unwrap()
    }

    fn index_to_open(&mut self) -> usize {
        self.rng.random_range(0..self.num_leaves)
    }

    fn proof(&mut self, tree: &MerkleTree<Keccak256>) -> MerkleProof {
        let leaf_index = self.index_to_open();
        tree.proof(leaf_index).unwrap()
    }
}
