// src/embed/model.rs
//! Skip-gram with negative sampling over a walk corpus.
//!
//! Each walk is a sentence of integer tokens; training pulls vectors of
//! tokens that co-occur within a context window together and pushes sampled
//! non-neighbors apart. Workers train independent shards of the corpus from
//! a common initialization and are folded in by averaging, so a fixed seed
//! and worker count give a reproducible model.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

pub struct TrainConfig {
    pub dimensions: usize,
    pub window: usize,
    pub epochs: usize,
    pub negative: usize,
    pub learning_rate: f32,
    pub workers: usize,
    pub seed: u64,
}

/// Trains embeddings for tokens 0..vocab. Tokens absent from the corpus
/// keep their (meaningless) initialization; callers are expected to filter
/// them out via their own appearance bookkeeping.
#[must_use]
pub fn train(walks: &[Vec<u32>], vocab: usize, cfg: &TrainConfig) -> Vec<Vec<f32>> {
    if vocab == 0 {
        return Vec::new();
    }
    let dim = cfg.dimensions;
    if dim == 0 {
        return vec![Vec::new(); vocab];
    }
    let input = init_uniform(vocab * dim, dim, cfg.seed);
    let output = vec![0.0f32; vocab * dim];
    if walks.is_empty() {
        return into_rows(input, dim);
    }

    let negatives = NegativeTable::from_corpus(walks, vocab);
    let workers = cfg.workers.max(1);
    let shard_size = walks.len().div_ceil(workers);

    let shards: Vec<Vec<f32>> = walks
        .par_chunks(shard_size)
        .enumerate()
        .map(|(shard_ix, shard)| {
            let mut input = input.clone();
            let mut output = output.clone();
            let mut rng = StdRng::seed_from_u64(cfg.seed ^ (shard_ix as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15));
            for _ in 0..cfg.epochs {
                for walk in shard {
                    train_walk(walk, &mut input, &mut output, &negatives, cfg, &mut rng);
                }
            }
            input
        })
        .collect();

    let folded = fold_average(&shards, vocab * dim);
    into_rows(folded, dim)
}

fn train_walk(
    walk: &[u32],
    input: &mut [f32],
    output: &mut [f32],
    negatives: &NegativeTable,
    cfg: &TrainConfig,
    rng: &mut StdRng,
) {
    let dim = cfg.dimensions;
    for (pos, &center) in walk.iter().enumerate() {
        // Dynamic window, as in word2vec: nearer context counts more often.
        let reach = rng.gen_range(1..=cfg.window.max(1));
        let lo = pos.saturating_sub(reach);
        let hi = (pos + reach).min(walk.len() - 1);
        for ctx_pos in lo..=hi {
            if ctx_pos == pos {
                continue;
            }
            let context = walk[ctx_pos];
            train_pair(center, context, input, output, negatives, cfg, dim, rng);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn train_pair(
    center: u32,
    context: u32,
    input: &mut [f32],
    output: &mut [f32],
    negatives: &NegativeTable,
    cfg: &TrainConfig,
    dim: usize,
    rng: &mut StdRng,
) {
    let c = center as usize * dim;
    let mut gradient = vec![0.0f32; dim];

    for k in 0..=cfg.negative {
        let (target, label) = if k == 0 {
            (context, 1.0f32)
        } else {
            let sample = negatives.sample(rng);
            if sample == context {
                continue;
            }
            (sample, 0.0f32)
        };
        let t = target as usize * dim;
        let dot: f32 = (0..dim).map(|d| input[c + d] * output[t + d]).sum();
        let g = (label - sigmoid(dot)) * cfg.learning_rate;
        for d in 0..dim {
            gradient[d] += g * output[t + d];
            output[t + d] += g * input[c + d];
        }
    }
    for d in 0..dim {
        input[c + d] += gradient[d];
    }
}

fn sigmoid(x: f32) -> f32 {
    // Saturate far from zero; avoids exp overflow and dead gradients.
    if x > 6.0 {
        1.0
    } else if x < -6.0 {
        0.0
    } else {
        1.0 / (1.0 + (-x).exp())
    }
}

fn init_uniform(len: usize, dim: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let bound = 0.5 / dim.max(1) as f32;
    (0..len).map(|_| rng.gen_range(-bound..bound)).collect()
}

fn fold_average(shards: &[Vec<f32>], len: usize) -> Vec<f32> {
    let mut out = vec![0.0f32; len];
    for shard in shards {
        for (o, v) in out.iter_mut().zip(shard) {
            *o += v;
        }
    }
    let n = shards.len().max(1) as f32;
    for o in &mut out {
        *o /= n;
    }
    out
}

fn into_rows(flat: Vec<f32>, dim: usize) -> Vec<Vec<f32>> {
    flat.chunks(dim).map(<[f32]>::to_vec).collect()
}

/// Unigram^0.75 sampling table, the standard negative-sampling distribution.
struct NegativeTable {
    cumulative: Vec<f32>,
    total: f32,
}

impl NegativeTable {
    fn from_corpus(walks: &[Vec<u32>], vocab: usize) -> Self {
        let mut counts = vec![0u64; vocab];
        for walk in walks {
            for &tok in walk {
                counts[tok as usize] += 1;
            }
        }
        let mut cumulative = Vec::with_capacity(vocab);
        let mut total = 0.0f32;
        for count in counts {
            total += (count as f32).powf(0.75);
            cumulative.push(total);
        }
        Self { cumulative, total }
    }

    fn sample(&self, rng: &mut StdRng) -> u32 {
        let x = rng.gen_range(0.0..self.total.max(f32::MIN_POSITIVE));
        self.cumulative.partition_point(|&c| c <= x) as u32
    }
}
