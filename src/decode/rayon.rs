//! Rayon-parallel decode (feature-gated).
//!
//! Slots are independent, so the index range is cut into fixed chunks that
//! decode on the rayon pool. Chunk outputs are concatenated in chunk order,
//! which makes the result identical to the sequential decode.

use crate::candidate::Candidate;
use crate::decode::{decode_sequential_range, Rows};
use crate::detect::DetectConfig;
use rayon::prelude::*;

/// Slots per parallel work item.
const CHUNK: usize = 1024;

pub(crate) fn decode_par(rows: &Rows<'_>, cfg: &DetectConfig) -> Vec<Candidate> {
    let total = rows.len();
    let chunks = total.div_ceil(CHUNK);

    let per_chunk: Vec<Vec<Candidate>> = (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let start = chunk * CHUNK;
            let end = (start + CHUNK).min(total);
            let mut out = Vec::new();
            decode_sequential_range(rows, cfg, start, end, &mut out);
            out
        })
        .collect();

    per_chunk.into_iter().flatten().collect()
}
