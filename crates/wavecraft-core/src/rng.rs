//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! Every random draw in the core (Karplus-Strong excitation, phase
//! randomization) comes from a generator built here, so identical requests
//! produce identical tables.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The seed is duplicated into both halves of the 64-bit PCG state seed.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

fn hash_to_u32(input: &[u8]) -> u32 {
    let hash = blake3::hash(input);
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Derives an independent seed for frame `frame_index` of a table.
pub fn derive_frame_seed(base_seed: u32, frame_index: u32) -> u32 {
    let mut input = Vec::with_capacity(8);
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(&frame_index.to_le_bytes());
    hash_to_u32(&input)
}

/// Derives an independent seed for a named component, e.g. `"karplus"`.
pub fn derive_component_seed(base_seed: u32, key: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + key.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());
    hash_to_u32(&input)
}

/// Creates the RNG for one frame of a table.
pub fn create_frame_rng(base_seed: u32, frame_index: u32) -> Pcg32 {
    create_rng(derive_frame_seed(base_seed, frame_index))
}
