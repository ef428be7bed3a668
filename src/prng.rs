//! Seeded 64-bit Mersenne Twister and the bit-exact uniform-integer sampler.
//!
//! Every byte this module produces is part of the wire protocol: miners and
//! the pool must derive identical graphs from identical hashes, which means
//! this cannot call out to a language's built-in "random in range" helper -
//! it has to reproduce the widely-deployed standard-library rejection
//! algorithm exactly. See spec §4.C / §9 for the rationale.

use crate::hexcodec::hex_to_bytes;

const N: usize = 312;
const M: usize = 156;
const MATRIX_A: u64 = 0xB502_6F5A_A966_19E9;
const UPPER_MASK: u64 = 0xFFFF_FFFF_8000_0000;
const LOWER_MASK: u64 = 0x7FFF_FFFF;

/// A 64-bit Mersenne Twister engine (MT19937-64), standard parameters and
/// standard seeding procedure - the same generator shipped as `mt19937_64`.
pub struct Mt19937_64 {
    state: [u64; N],
    index: usize,
}

impl Mt19937_64 {
    /// Seed the engine the standard way (Knuth's recurrence for `seed_seq`-free
    /// single-integer seeding).
    pub fn new(seed: u64) -> Self {
        let mut state = [0u64; N];
        state[0] = seed;
        for i in 1..N {
            let prev = state[i - 1];
            state[i] = (6364136223846793005u64
                .wrapping_mul(prev ^ (prev >> 62)))
            .wrapping_add(i as u64);
        }
        Mt19937_64 {
            state,
            index: N, // force a twist before the first draw
        }
    }

    fn twist(&mut self) {
        for i in 0..N {
            let x = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % N] & LOWER_MASK);
            let mut x_a = x >> 1;
            if x & 1 != 0 {
                x_a ^= MATRIX_A;
            }
            self.state[i] = self.state[(i + M) % N] ^ x_a;
        }
        self.index = 0;
    }

    /// Draw the next raw 64-bit output, range `[0, 2^64 - 1]`.
    pub fn next_u64(&mut self) -> u64 {
        if self.index >= N {
            self.twist();
        }

        let mut y = self.state[self.index];
        y ^= (y >> 29) & 0x5555_5555_5555_5555;
        y ^= (y << 17) & 0x71D6_7FFF_EDA6_0000;
        y ^= (y << 37) & 0xFFF7_EEE0_0000_0000;
        y ^= y >> 43;

        self.index += 1;
        y
    }
}

/// Derive the 64-bit PRNG seed from a 64-char hex digest (spec §4.C).
///
/// Decode to 32 bytes, reverse the byte array, interpret the first 8 bytes
/// (post-reversal) as a little-endian u64 - equivalently, the *last* 8 bytes
/// of the raw digest read little-endian.
pub fn extract_seed_from_hash(hash_hex: &str) -> u64 {
    let mut bytes = hex_to_bytes(hash_hex);
    bytes.reverse();
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[0..8]);
    u64::from_le_bytes(buf)
}

/// Sample a uniform integer in `[a, b]` (inclusive) from `rng`, reproducing
/// the standard rejection-sampling algorithm byte-for-byte (spec §4.C).
///
/// `b >= a` is required by the caller; `Erange = 2^64 - 1` can never be less
/// than `Urange = b - a` since both are bounded by `u64::MAX`, so the
/// multi-word extension branch of the reference algorithm is unreachable
/// here and is not implemented.
pub fn uniform_int(rng: &mut Mt19937_64, a: u64, b: u64) -> u64 {
    debug_assert!(b >= a);
    let u_range = b - a;

    if u_range == u64::MAX {
        // Erange == Urange: the full 64-bit draw is already uniform over [a, b].
        return a.wrapping_add(rng.next_u64());
    }

    let size = u_range + 1;
    let scale = u64::MAX / size;
    let limit = size * scale;

    loop {
        let x = rng.next_u64();
        if x < limit {
            return a + x / scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_of_all_zero_with_trailing_one_is_one() {
        let hash = format!("{}{}", "00".repeat(31), "01");
        assert_eq!(extract_seed_from_hash(&hash), 1);
    }

    #[test]
    fn test_seed_of_all_zeros_is_zero() {
        let hash = "00".repeat(32);
        assert_eq!(extract_seed_from_hash(&hash), 0);
    }

    #[test]
    fn test_seed_is_last_eight_raw_bytes_little_endian() {
        // raw digest = 24 zero bytes followed by 01 02 03 04 05 06 07 08
        let hash = format!("{}{}", "00".repeat(24), "0102030405060708");
        let seed = extract_seed_from_hash(&hash);
        assert_eq!(seed, 0x0807060504030201);
    }

    #[test]
    fn test_mt19937_64_deterministic() {
        let mut a = Mt19937_64::new(42);
        let mut b = Mt19937_64::new(42);
        for _ in 0..1000 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_mt19937_64_different_seeds_diverge() {
        let mut a = Mt19937_64::new(1);
        let mut b = Mt19937_64::new(2);
        assert_ne!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn test_mt19937_64_reference_first_output() {
        // seed=5489 is the canonical mt19937_64 default seed; its first
        // 64-bit draw is a widely published reference value.
        let mut rng = Mt19937_64::new(5489);
        assert_eq!(rng.next_u64(), 14514284786278117030);
    }

    #[test]
    fn test_uniform_int_stays_in_range() {
        let mut rng = Mt19937_64::new(7);
        for _ in 0..10_000 {
            let v = uniform_int(&mut rng, 0, 999);
            assert!(v <= 999);
        }
    }

    #[test]
    fn test_uniform_int_roughly_uniform() {
        let mut rng = Mt19937_64::new(123);
        let mut buckets = [0u32; 10];
        for _ in 0..100_000 {
            let v = uniform_int(&mut rng, 0, 999);
            buckets[(v / 100) as usize] += 1;
        }
        for count in buckets {
            assert!(count > 8_000 && count < 12_000, "bucket skewed: {}", count);
        }
    }
}
