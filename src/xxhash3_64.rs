//! The implementation of XXH3_64.
//!
//! Inputs are routed by length: everything up to 240 bytes is mixed
//! directly against fixed offsets of the secret, while longer inputs
//! are fed through an eight-lane accumulator one 64-byte stripe at
//! a time. The long-input engine can be swapped out through
//! [`LongHash`][].

#![deny(
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    unsafe_op_in_unsafe_fn
)]

use core::slice;

use crate::{Error, HexString, IntoU128, IntoU32, IntoU64};

mod secret;

pub use secret::{Secret, SECRET_MINIMUM_LENGTH};

mod long;

#[cfg(target_arch = "x86_64")]
pub use long::{Avx2, Sse2};
pub use long::{Detected, Kernel, LongHash, Scalar};

// This module is not `cfg`-gated because it is the fallback for
// every other kernel.
mod scalar;

#[cfg(target_arch = "x86_64")]
mod avx2;

#[cfg(target_arch = "x86_64")]
mod sse2;

const PRIME32_1: u64 = 0x9E3779B1;
const PRIME32_2: u64 = 0x85EBCA77;
const PRIME32_3: u64 = 0xC2B2AE3D;
const PRIME64_1: u64 = 0x9E3779B185EBCA87;
const PRIME64_2: u64 = 0xC2B2AE3D27D4EB4F;
const PRIME64_3: u64 = 0x165667B19E3779F9;
const PRIME64_4: u64 = 0x85EBCA77C2B2AE63;
const PRIME64_5: u64 = 0x27D4EB2F165667C5;
const PRIME_MX1: u64 = 0x165667919E3779F9;
const PRIME_MX2: u64 = 0x9FB21C651E98DF25;

/// The largest input handled without the stripe accumulator.
pub const CUTOFF: usize = 240;

const DEFAULT_SEED: u64 = 0;

/// The length of the default secret.
pub const DEFAULT_SECRET_LENGTH: usize = 192;

type DefaultSecret = [u8; DEFAULT_SECRET_LENGTH];

const DEFAULT_SECRET_RAW: DefaultSecret = [
    0xb8, 0xfe, 0x6c, 0x39, 0x23, 0xa4, 0x4b, 0xbe, 0x7c, 0x01, 0x81, 0x2c, 0xf7, 0x21, 0xad, 0x1c,
    0xde, 0xd4, 0x6d, 0xe9, 0x83, 0x90, 0x97, 0xdb, 0x72, 0x40, 0xa4, 0xa4, 0xb7, 0xb3, 0x67, 0x1f,
    0xcb, 0x79, 0xe6, 0x4e, 0xcc, 0xc0, 0xe5, 0x78, 0x82, 0x5a, 0xd0, 0x7d, 0xcc, 0xff, 0x72, 0x21,
    0xb8, 0x08, 0x46, 0x74, 0xf7, 0x43, 0x24, 0x8e, 0xe0, 0x35, 0x90, 0xe6, 0x81, 0x3a, 0x26, 0x4c,
    0x3c, 0x28, 0x52, 0xbb, 0x91, 0xc3, 0x00, 0xcb, 0x88, 0xd0, 0x65, 0x8b, 0x1b, 0x53, 0x2e, 0xa3,
    0x71, 0x64, 0x48, 0x97, 0xa2, 0x0d, 0xf9, 0x4e, 0x38, 0x19, 0xef, 0x46, 0xa9, 0xde, 0xac, 0xd8,
    0xa8, 0xfa, 0x76, 0x3f, 0xe3, 0x9c, 0x34, 0x3f, 0xf9, 0xdc, 0xbb, 0xc7, 0xc7, 0x0b, 0x4f, 0x1d,
    0x8a, 0x51, 0xe0, 0x4b, 0xcd, 0xb4, 0x59, 0x31, 0xc8, 0x9f, 0x7e, 0xc9, 0xd9, 0x78, 0x73, 0x64,
    0xea, 0xc5, 0xac, 0x83, 0x34, 0xd3, 0xeb, 0xc3, 0xc5, 0x81, 0xa0, 0xff, 0xfa, 0x13, 0x63, 0xeb,
    0x17, 0x0d, 0xdd, 0x51, 0xb7, 0xf0, 0xda, 0x49, 0xd3, 0x16, 0x55, 0x26, 0x29, 0xd4, 0x68, 0x9e,
    0x2b, 0x16, 0xbe, 0x58, 0x7d, 0x47, 0xa1, 0xfc, 0x8f, 0xf8, 0xb8, 0xd1, 0x7a, 0xd0, 0x31, 0xce,
    0x45, 0xcb, 0x3a, 0x8f, 0x95, 0x16, 0x04, 0x28, 0xaf, 0xd7, 0xfb, 0xca, 0xbb, 0x4b, 0x40, 0x7e,
];

// Safety: The default secret is long enough
const DEFAULT_SECRET: &Secret = unsafe { Secret::new_unchecked(&DEFAULT_SECRET_RAW) };

/// The settings for one or more calls to the 64-bit hash: an
/// optional secret, a seed, and the strategy used for inputs longer
/// than [`CUTOFF`][] bytes.
///
/// ```rust
/// use xxh3_hex::Xxh3;
///
/// let secret = [0u8; 136];
/// let hasher = Xxh3::new().with_seed(0x702).with_secret(&secret)?;
///
/// assert_eq!(hasher.hash(b"Hello, world!"), 0x8ec7_b6d9_d1d4_b191);
/// # Ok::<(), xxh3_hex::Error>(())
/// ```
///
/// When both a secret and a non-zero seed are given, inputs up to
/// [`CUTOFF`][] bytes are mixed with the seed against the default
/// secret while longer inputs are mixed against the provided secret
/// as-is.
#[derive(Debug, Clone, Copy)]
pub struct Xxh3<'s, L = Detected> {
    seed: u64,
    secret: Option<&'s Secret>,
    long_hash: L,
}

impl Xxh3<'static, Detected> {
    /// The default seed and secret, with the long-input kernel chosen
    /// for the current CPU.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            seed: DEFAULT_SEED,
            secret: None,
            long_hash: Detected,
        }
    }

    /// Hash all data at once with the default seed and secret.
    #[must_use]
    #[inline]
    pub fn oneshot(input: &[u8]) -> u64 {
        Self::new().hash(input)
    }

    /// Hash all data at once using the provided seed and a secret
    /// derived from the seed.
    #[must_use]
    #[inline]
    pub fn oneshot_with_seed(seed: u64, input: &[u8]) -> u64 {
        Self::new().with_seed(seed).hash(input)
    }

    /// Hash all data at once using the provided secret and the
    /// default seed.
    #[inline]
    pub fn oneshot_with_secret(secret: &[u8], input: &[u8]) -> Result<u64, Error> {
        Ok(Self::new().with_secret(secret)?.hash(input))
    }

    /// Hash all data at once using the provided seed and secret.
    #[inline]
    pub fn oneshot_with_seed_and_secret(
        seed: u64,
        secret: &[u8],
        input: &[u8],
    ) -> Result<u64, Error> {
        Ok(Self::new().with_seed(seed).with_secret(secret)?.hash(input))
    }
}

impl Default for Xxh3<'static, Detected> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s, L> Xxh3<'s, L> {
    /// Use the provided seed. A seed of zero is the same as not
    /// providing one.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    /// Use the provided secret instead of the default one.
    ///
    /// The secret must be at least [`SECRET_MINIMUM_LENGTH`][]
    /// bytes; the length is checked here, before anything is hashed.
    pub fn with_secret<'n>(self, secret: &'n [u8]) -> Result<Xxh3<'n, L>, Error> {
        let secret = Secret::new(secret)?;
        Ok(self.with_validated_secret(secret))
    }

    /// Use a secret that has already been validated.
    #[must_use]
    pub fn with_validated_secret<'n>(self, secret: &'n Secret) -> Xxh3<'n, L> {
        let Self {
            seed, long_hash, ..
        } = self;

        Xxh3 {
            seed,
            secret: Some(secret),
            long_hash,
        }
    }

    /// Use a different strategy for inputs longer than [`CUTOFF`][]
    /// bytes. Whatever the strategy returns becomes the hash.
    #[must_use]
    pub fn with_long_hash<L2>(self, long_hash: L2) -> Xxh3<'s, L2> {
        let Self { seed, secret, .. } = self;

        Xxh3 {
            seed,
            secret,
            long_hash,
        }
    }

    /// The seed that will be used.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The caller-provided secret, if any.
    pub fn secret(&self) -> Option<&'s Secret> {
        self.secret
    }
}

impl<L> Xxh3<'_, L>
where
    L: LongHash,
{
    /// Computes the 64-bit hash of `input`.
    #[must_use]
    #[inline]
    pub fn hash(&self, input: &[u8]) -> u64 {
        let Self {
            seed,
            secret,
            ref long_hash,
        } = *self;

        if input.len() > CUTOFF {
            return match secret {
                Some(secret) => long_hash.hash_long(input, seed, secret),
                None if seed == DEFAULT_SEED => long_hash.hash_long(input, seed, DEFAULT_SECRET),
                None => {
                    let secret = derive_secret(seed);
                    // Safety: A derived secret has the default length
                    let secret = unsafe { Secret::new_unchecked(&secret) };
                    long_hash.hash_long(input, seed, secret)
                }
            };
        }

        let secret = match secret {
            Some(secret) if seed == DEFAULT_SEED => secret,
            _ => DEFAULT_SECRET,
        };

        impl_short(secret, seed, input)
    }

    /// Computes the 64-bit hash of `input` and renders it as 16
    /// lowercase hexadecimal digits.
    #[must_use]
    #[inline]
    pub fn hash_hex(&self, input: &[u8]) -> HexString {
        HexString::new(self.hash(input))
    }
}

/// Mixes the seed into a copy of the default secret, producing the
/// secret used for inputs longer than [`CUTOFF`][] bytes.
///
/// A seed of zero returns the default secret unchanged.
#[must_use]
#[inline]
pub fn derive_secret(seed: u64) -> [u8; DEFAULT_SECRET_LENGTH] {
    let mut secret = DEFAULT_SECRET_RAW;
    mix_seed_into(seed, &mut secret);
    secret
}

#[inline]
fn mix_seed_into(seed: u64, secret: &mut DefaultSecret) {
    if seed == DEFAULT_SEED {
        return;
    }

    let (words, _) = secret.bp_as_chunks_mut();
    let (pairs, _) = words.bp_as_chunks_mut();

    for [lo, hi] in pairs {
        *lo = u64::from_le_bytes(*lo).wrapping_add(seed).to_le_bytes();
        *hi = u64::from_le_bytes(*hi).wrapping_sub(seed).to_le_bytes();
    }
}

#[inline(always)]
fn impl_short(secret: &Secret, seed: u64, input: &[u8]) -> u64 {
    match input.len() {
        129.. => impl_129_to_240_bytes(secret, seed, input),

        17..=128 => impl_17_to_128_bytes(secret, seed, input),

        9..=16 => impl_9_to_16_bytes(secret, seed, input),

        4..=8 => impl_4_to_8_bytes(secret, seed, input),

        1..=3 => impl_1_to_3_bytes(secret, seed, input),

        0 => impl_0_bytes(secret, seed),
    }
}

macro_rules! assert_input_range {
    ($min:literal.., $len:expr) => {
        assert!($min <= $len);
    };
    ($min:literal..=$max:literal, $len:expr) => {
        assert!($min <= $len);
        assert!($len <= $max);
    };
}

#[inline(always)]
fn impl_0_bytes(secret: &Secret, seed: u64) -> u64 {
    let [a, b] = secret.words_for_0();
    avalanche_xxh64(seed ^ a ^ b)
}

#[inline(always)]
fn impl_1_to_3_bytes(secret: &Secret, seed: u64, input: &[u8]) -> u64 {
    assert_input_range!(1..=3, input.len());
    let len = input.len() as u8; // Fits, as we checked the range

    // Not enough bytes for a word read, so pack what is there
    // together with the length.
    let packed = input[input.len() - 1].into_u32()
        | len.into_u32() << 8
        | input[0].into_u32() << 16
        | input[input.len() >> 1].into_u32() << 24;

    let [a, b] = secret.words_for_1_to_3();
    let keyed = (a ^ b).into_u64().wrapping_add(seed) ^ packed.into_u64();

    avalanche_xxh64(keyed)
}

#[inline(always)]
fn impl_4_to_8_bytes(secret: &Secret, seed: u64, input: &[u8]) -> u64 {
    assert_input_range!(4..=8, input.len());
    let (Some(head), Some(tail)) = (input.first_u32(), input.last_u32()) else {
        unreachable!("four to eight bytes always hold two u32 reads")
    };

    let seed = seed ^ ((seed as u32).swap_bytes().into_u64() << 32);
    let [a, b] = secret.words_for_4_to_8();

    let keyed = (a ^ b).wrapping_sub(seed) ^ (tail.into_u64() | head.into_u64() << 32);

    rrmxmx(keyed, input.len().into_u64())
}

#[inline(always)]
fn impl_9_to_16_bytes(secret: &Secret, seed: u64, input: &[u8]) -> u64 {
    assert_input_range!(9..=16, input.len());
    let (Some(head), Some(tail)) = (input.first_u64(), input.last_u64()) else {
        unreachable!("nine to sixteen bytes always hold two u64 reads")
    };

    let [a, b, c, d] = secret.words_for_9_to_16();
    let low = (a ^ b).wrapping_add(seed) ^ head;
    let high = (c ^ d).wrapping_sub(seed) ^ tail;

    let acc = input
        .len()
        .into_u64()
        .wrapping_add(low.swap_bytes())
        .wrapping_add(high)
        .wrapping_add(fold_mul(low, high));

    avalanche(acc)
}

#[inline]
fn impl_17_to_128_bytes(secret: &Secret, seed: u64, input: &[u8]) -> u64 {
    assert_input_range!(17..=128, input.len());
    let mut acc = input.len().into_u64().wrapping_mul(PRIME64_1);

    let keys = secret.words_for_17_to_128();
    let (front, _) = input.bp_as_chunks();
    let (_, back) = input.bp_as_rchunks();

    // Each additional 32 bytes of input adds one chunk from each end
    // of the input; the chunks overlap when the input is short.
    let n_pairs = (input.len() - 1) / 32 + 1;
    let q = back.len();

    for i in (0..n_pairs).rev() {
        let [front_key, back_key] = &keys[i];
        acc = acc.wrapping_add(mix_step(&front[i], front_key, seed));
        acc = acc.wrapping_add(mix_step(&back[q - 1 - i], back_key, seed));
    }

    avalanche(acc)
}

#[inline]
fn impl_129_to_240_bytes(secret: &Secret, seed: u64, input: &[u8]) -> u64 {
    assert_input_range!(129..=240, input.len());
    let mut acc = input.len().into_u64().wrapping_mul(PRIME64_1);

    let (chunks, _) = input.bp_as_chunks();
    let (head, body) = chunks.split_at(8);

    for (chunk, key) in head.iter().zip(secret.words_for_129_to_240_head()) {
        acc = acc.wrapping_add(mix_step(chunk, key, seed));
    }

    acc = avalanche(acc);

    for (chunk, key) in body.iter().zip(secret.words_for_129_to_240_body()) {
        acc = acc.wrapping_add(mix_step(chunk, key, seed));
    }

    let Some(last) = input.last_chunk() else {
        unreachable!("inputs of this size always hold a full chunk")
    };
    acc = acc.wrapping_add(mix_step(last, secret.words_for_129_to_240_tail(), seed));

    avalanche(acc)
}

#[inline]
fn mix_step(data: &[u8; 16], key: &[u8; 16], seed: u64) -> u64 {
    #[inline]
    fn to_u64s(bytes: &[u8; 16]) -> [u64; 2] {
        let (pair, _) = bytes.bp_as_chunks::<8>();
        [pair[0], pair[1]].map(u64::from_le_bytes)
    }

    let [d0, d1] = to_u64s(data);
    let [k0, k1] = to_u64s(key);

    fold_mul(d0 ^ k0.wrapping_add(seed), d1 ^ k1.wrapping_sub(seed))
}

#[rustfmt::skip]
const INITIAL_ACCUMULATORS: [u64; 8] = [
    PRIME32_3, PRIME64_1, PRIME64_2, PRIME64_3,
    PRIME64_4, PRIME32_2, PRIME64_5, PRIME32_1,
];

const STRIPE_BYTES: usize = 64;

/// The stripe/accumulator engine for inputs longer than
/// [`CUTOFF`][] bytes, generic over the kernel that updates the
/// lanes.
struct Algorithm<V>(V);

impl<V> Algorithm<V>
where
    V: Vector,
{
    #[inline]
    fn oneshot(&self, secret: &Secret, input: &[u8]) -> u64 {
        assert_input_range!(241.., input.len());
        let mut acc = INITIAL_ACCUMULATORS;

        let block_size = STRIPE_BYTES * secret.stripes_per_block();
        let mut blocks = input.chunks_exact(block_size);

        let last_block = if blocks.remainder().is_empty() {
            // Safety: We know that `input` is non-empty, which means
            // that either there will be a remainder or one or more
            // full blocks. That info isn't flowing to the optimizer,
            // so we use `unwrap_unchecked`.
            unsafe { blocks.next_back().unwrap_unchecked() }
        } else {
            blocks.remainder()
        };

        for block in blocks {
            let (stripes, _) = block.bp_as_chunks();
            self.round(&mut acc, stripes, secret);
        }

        let Some(last_stripe) = input.last_chunk() else {
            unreachable!("long inputs always hold a full stripe")
        };

        self.finalize(acc, last_block, last_stripe, secret, input.len())
    }

    /// One block: accumulate every stripe, then scramble.
    #[inline]
    fn round(&self, acc: &mut [u64; 8], stripes: &[[u8; 64]], secret: &Secret) {
        self.accumulate_stripes(acc, stripes, secret);
        self.0.round_scramble(acc, secret.scramble_key());
    }

    #[inline]
    fn accumulate_stripes(&self, acc: &mut [u64; 8], stripes: &[[u8; 64]], secret: &Secret) {
        for (i, stripe) in stripes.iter().enumerate() {
            self.0.accumulate(acc, stripe, secret.stripe(i));
        }
    }

    #[inline]
    fn finalize(
        &self,
        mut acc: [u64; 8],
        last_block: &[u8],
        last_stripe: &[u8; 64],
        secret: &Secret,
        len: usize,
    ) -> u64 {
        debug_assert!(!last_block.is_empty());

        // Every stripe of the last block except the final one, which
        // is always taken from the last 64 bytes of the input, even
        // when that overlaps the previous stripe.
        let (stripes, _) = stripes_with_tail(last_block);
        self.accumulate_stripes(&mut acc, stripes, secret);
        self.0
            .accumulate(&mut acc, last_stripe, secret.last_stripe_key());

        merge_accumulators(&acc, len.into_u64().wrapping_mul(PRIME64_1), secret)
    }
}

#[inline]
fn merge_accumulators(acc: &[u64; 8], init: u64, secret: &Secret) -> u64 {
    let (keys, _) = secret.merge_key().bp_as_chunks::<16>();
    let (lanes, _) = acc.bp_as_chunks::<2>();

    let merged = lanes.iter().zip(keys).fold(init, |result, ([a, b], key)| {
        let (key, _) = key.bp_as_chunks::<8>();
        let [ka, kb] = [key[0], key[1]].map(u64::from_le_bytes);
        result.wrapping_add(fold_mul(a ^ ka, b ^ kb))
    });

    avalanche(merged)
}

#[inline]
fn stripes_with_tail(block: &[u8]) -> (&[[u8; 64]], &[u8]) {
    match block.bp_as_chunks() {
        ([stripes @ .., last], []) => (stripes, last),
        (stripes, last) => (stripes, last),
    }
}

/// A kernel that updates the eight accumulator lanes.
trait Vector: Copy {
    fn round_scramble(&self, acc: &mut [u64; 8], secret_end: &[u8; 64]);

    fn accumulate(&self, acc: &mut [u64; 8], stripe: &[u8; 64], secret: &[u8; 64]);
}

/// Multiplies to a 128-bit product and XORs its halves together.
#[inline]
fn fold_mul(a: u64, b: u64) -> u64 {
    let product = a.into_u128().wrapping_mul(b.into_u128());
    (product as u64) ^ ((product >> 64) as u64)
}

#[inline]
fn avalanche(mut x: u64) -> u64 {
    x ^= x >> 37;
    x = x.wrapping_mul(PRIME_MX1);
    x ^= x >> 32;
    x
}

/// The finalizer of XXH64: every output bit ends up depending on
/// every input bit.
#[inline]
fn avalanche_xxh64(mut x: u64) -> u64 {
    x ^= x >> 33;
    x = x.wrapping_mul(PRIME64_2);
    x ^= x >> 29;
    x = x.wrapping_mul(PRIME64_3);
    x ^= x >> 32;
    x
}

#[inline]
fn rrmxmx(mut x: u64, len: u64) -> u64 {
    x ^= x.rotate_left(49) ^ x.rotate_left(24);
    x = x.wrapping_mul(PRIME_MX2);
    x ^= (x >> 35).wrapping_add(len);
    x = x.wrapping_mul(PRIME_MX2);
    x ^= x >> 28;
    x
}

trait U8SliceExt {
    fn first_u32(&self) -> Option<u32>;

    fn last_u32(&self) -> Option<u32>;

    fn first_u64(&self) -> Option<u64>;

    fn last_u64(&self) -> Option<u64>;
}

impl U8SliceExt for [u8] {
    #[inline]
    fn first_u32(&self) -> Option<u32> {
        self.first_chunk().copied().map(u32::from_le_bytes)
    }

    #[inline]
    fn last_u32(&self) -> Option<u32> {
        self.last_chunk().copied().map(u32::from_le_bytes)
    }

    #[inline]
    fn first_u64(&self) -> Option<u64> {
        self.first_chunk().copied().map(u64::from_le_bytes)
    }

    #[inline]
    fn last_u64(&self) -> Option<u64> {
        self.last_chunk().copied().map(u64::from_le_bytes)
    }
}

/// `as_chunks` and friends, which are not yet available on our
/// minimum supported Rust version.
trait SliceBackport<T> {
    fn bp_as_chunks<const N: usize>(&self) -> (&[[T; N]], &[T]);

    fn bp_as_chunks_mut<const N: usize>(&mut self) -> (&mut [[T; N]], &mut [T]);

    fn bp_as_rchunks<const N: usize>(&self) -> (&[T], &[[T; N]]);
}

impl<T> SliceBackport<T> for [T] {
    fn bp_as_chunks<const N: usize>(&self) -> (&[[T; N]], &[T]) {
        assert_ne!(N, 0);
        let len = self.len() / N;
        // Safety: `(len / N) * N` has to be less-than-or-equal to `len`
        let (head, tail) = unsafe { self.split_at_unchecked(len * N) };
        // Safety: (1) `head` points to valid data, (2) the alignment
        // of an array and the individual type are the same, (3) the
        // valid elements are less-than-or-equal to the original
        // slice.
        let head = unsafe { slice::from_raw_parts(head.as_ptr().cast(), len) };
        (head, tail)
    }

    fn bp_as_chunks_mut<const N: usize>(&mut self) -> (&mut [[T; N]], &mut [T]) {
        assert_ne!(N, 0);
        let len = self.len() / N;
        // Safety: `(len / N) * N` has to be less than or equal to `len`
        let (head, tail) = unsafe { self.split_at_mut_unchecked(len * N) };
        // Safety: (1) `head` points to valid data, (2) the alignment
        // of an array and the individual type are the same, (3) the
        // valid elements are less-than-or-equal to the original
        // slice.
        let head = unsafe { slice::from_raw_parts_mut(head.as_mut_ptr().cast(), len) };
        (head, tail)
    }

    fn bp_as_rchunks<const N: usize>(&self) -> (&[T], &[[T; N]]) {
        assert_ne!(N, 0);
        let len = self.len() / N;
        // Safety: `(len / N) * N` has to be less than or equal to `len`
        let (head, tail) = unsafe { self.split_at_unchecked(self.len() - len * N) };
        // Safety: (1) `tail` points to valid data, (2) the alignment
        // of an array and the individual type are the same, (3) the
        // valid elements are less-than-or-equal to the original
        // slice.
        let tail = unsafe { slice::from_raw_parts(tail.as_ptr().cast(), len) };
        (head, tail)
    }
}

#[cfg(test)]
mod test {
    use std::{thread, vec::Vec};

    use super::*;

    const _: () = {
        const fn is_clone<T: Clone>() {}
        is_clone::<Xxh3<'static>>();
    };

    const DEFAULT_VALUES: &[(usize, u64)] = &[
        (0, 0x2d06800538d394c2),
        (1, 0xc44bdff4074eecdb),
        (2, 0xd6645fc3051a9457),
        (3, 0x5f4299fc161c9cbb),
        (4, 0x60dab036a58211f2),
        (5, 0xb075753a84ca0fbe),
        (6, 0xa6584d1d9a6ae704),
        (7, 0x0cd2084a62406b69),
        (8, 0x3a1c2d7c85af88f8),
        (9, 0xe9612598145bb9dc),
        (16, 0x8355e3a6f61770db),
        (17, 0x9ef341a99de37328),
        (18, 0xf6912490d4c0eed5),
        (19, 0x60e726143cf50312),
        (31, 0x4f36db8e4df378fd),
        (32, 0x3523581fe96e4c05),
        (33, 0xe68c56ba88991e58),
        (126, 0x6c2a9eb7459cdc61),
        (127, 0x120b9787f8425f2f),
        (128, 0x85c6174c7ff4c46b),
        (129, 0xec7642b431ba3e5a),
        (130, 0x4d3224b100908a87),
        (131, 0xe57f7ea6741fe3a0),
        (238, 0x30449a0b4899dee9),
        (239, 0x972b14e3c46f214b),
        (240, 0x375a384d957fe865),
        (241, 0x02e8cd95421c6d02),
        (242, 0xddcb33c494051832),
        (243, 0x8835f9529193e3dc),
        (244, 0xbc17c91ec3cf8d7f),
        (1024, 0xe5d78bafa45b2aa5),
        (10240, 0xbcd63266df6e2244),
    ];

    fn gen_bytes(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    fn secret_of(len: usize, mul: usize, add: usize) -> Vec<u8> {
        (0..len).map(|i| ((i * mul + add) % 256) as u8).collect()
    }

    #[test]
    fn default_secret_is_valid() {
        assert!(DEFAULT_SECRET.is_valid());
        assert_eq!(DEFAULT_SECRET.len(), DEFAULT_SECRET_LENGTH);
    }

    #[test]
    fn oneshot_empty() {
        assert_eq!(Xxh3::oneshot(&[]), 0x2d06800538d394c2);
    }

    #[test]
    fn oneshot_hello() {
        let hash = Xxh3::oneshot(b"hello");
        assert_eq!(hash, 0x9555e8555c62dcfd);
        assert_ne!(hash, 0x9555e8555c62dcfe);
    }

    #[test]
    fn oneshot_covers_every_length_bucket() {
        for &(len, expected) in DEFAULT_VALUES {
            let input = gen_bytes(len);
            assert_eq!(Xxh3::oneshot(&input), expected, "length {len}");
        }
    }

    #[test]
    fn oneshot_crosses_the_block_boundary() {
        let input: Vec<u8> = (0..2048).map(|i| (i % 256) as u8).collect();
        assert_eq!(Xxh3::oneshot(&input), 0xdd420471ff96bd00);
        assert_eq!(Xxh3::oneshot_with_seed(0x702, &input), 0x941f28b00d8c4626);

        let secret = [0; SECRET_MINIMUM_LENGTH];
        let hash = Xxh3::oneshot_with_seed_and_secret(0x702, &secret, &input).unwrap();
        assert_eq!(hash, 0xef152aac651d7cb1);
    }

    #[test]
    fn oneshot_with_seed_covers_every_length_bucket() {
        let expected = [
            (0, 0x4aede68389c0e311),
            (1, 0x78fc079a75aaf3c0),
            (4, 0x1b7306b89f254507),
            (9, 0x7df7627fd1f939b6),
            (17, 0x49ca0fff09501622),
            (129, 0x2bfdcaec30ff3000),
            (241, 0xf98456bc25be0901),
            (1024, 0x24839f0fcdf4d078),
        ];

        for (len, expected) in expected {
            let input = gen_bytes(len);
            assert_eq!(
                Xxh3::oneshot_with_seed(0xdeadcafe, &input),
                expected,
                "length {len}",
            );
        }
    }

    #[test]
    fn seed_of_zero_is_the_same_as_no_seed() {
        for &(len, _) in DEFAULT_VALUES {
            let input = gen_bytes(len);
            assert_eq!(Xxh3::oneshot_with_seed(0, &input), Xxh3::oneshot(&input));
        }
    }

    #[test]
    fn hello_world_with_seed_and_secret() {
        let input = b"Hello, world!";
        let zeroes = [0; SECRET_MINIMUM_LENGTH];

        assert_eq!(Xxh3::oneshot(input), 0xf3c34bf11915e869);
        assert_eq!(Xxh3::oneshot_with_seed(0x702, input), 0x8ec7b6d9d1d4b191);
        assert_eq!(
            Xxh3::oneshot_with_secret(&zeroes, input).unwrap(),
            0x7d433b528dca8e34,
        );
        assert_eq!(
            Xxh3::oneshot_with_seed_and_secret(0x702, &zeroes, input).unwrap(),
            0x8ec7b6d9d1d4b191,
        );
    }

    #[test]
    fn minimum_length_secret_without_seed() {
        let secret = secret_of(136, 31, 7);
        let expected = [
            (0, 0xf9aee4cf4cd0aecf),
            (2, 0x5039cc4d44ca069a),
            (6, 0xaf2a6f31803f275a),
            (12, 0x9bd5000f72f6b4f2),
            (50, 0x57a68764b6977347),
            (150, 0x270075696c4f32f2),
            (241, 0xdd9780b030876c4f),
            (1500, 0xac7976a925517b04),
            (4096, 0xecbcd944b8d746e4),
        ];

        for (len, expected) in expected {
            let input = gen_bytes(len);
            let hash = Xxh3::oneshot_with_secret(&secret, &input).unwrap();
            assert_eq!(hash, expected, "length {len}");
        }
    }

    #[test]
    fn larger_secret_without_seed() {
        let secret = secret_of(200, 17, 3);
        let expected = [
            (0, 0xecb869186537ef9b),
            (2, 0xeef8d84d6c54d24f),
            (6, 0x2d7f6cf67f2b2440),
            (12, 0xf7c797336ad7bb4a),
            (50, 0xa0e4b30044f03daf),
            (150, 0xf7a2cce7654f00ec),
            (241, 0xe92548011e1c03a4),
            (1500, 0xfef9a859e82bfb3c),
            (4096, 0x58768fe0157dc8cf),
        ];

        for (len, expected) in expected {
            let input = gen_bytes(len);
            let hash = Xxh3::oneshot_with_secret(&secret, &input).unwrap();
            assert_eq!(hash, expected, "length {len}");
        }
    }

    #[test]
    fn secret_and_seed_mix_the_seed_only_into_short_inputs() {
        let short = [
            (0, 0xeb1ec7bb4a052796),
            (2, 0xdd45ce526b05e0d0),
            (6, 0xb97a84cdf7914dce),
            (12, 0xbe27edfc49bf081a),
            (50, 0x7980f342f5fd0a24),
            (150, 0x63a3c3f787b314bf),
        ];

        for secret in [secret_of(136, 31, 7), secret_of(200, 17, 3)] {
            for (len, expected) in short {
                let input = gen_bytes(len);
                let hash = Xxh3::oneshot_with_seed_and_secret(0x702, &secret, &input).unwrap();
                assert_eq!(hash, expected, "length {len}");
                assert_eq!(hash, Xxh3::oneshot_with_seed(0x702, &input));
            }

            for len in [241, 1500, 4096] {
                let input = gen_bytes(len);
                let seeded = Xxh3::oneshot_with_seed_and_secret(0x702, &secret, &input).unwrap();
                let unseeded = Xxh3::oneshot_with_secret(&secret, &input).unwrap();
                assert_eq!(seeded, unseeded, "length {len}");
            }
        }
    }

    #[test]
    fn zero_secret_and_empty_input() {
        let secret = [0; SECRET_MINIMUM_LENGTH];
        assert_eq!(Xxh3::oneshot_with_secret(&secret, &[]).unwrap(), 0);
        assert_eq!(
            Xxh3::oneshot_with_seed_and_secret(0x702, &secret, &[]).unwrap(),
            0xeb1ec7bb4a052796,
        );
    }

    #[test]
    fn short_secret_is_rejected() {
        let secret = [0; SECRET_MINIMUM_LENGTH - 1];

        let err = Xxh3::new().with_secret(&secret).unwrap_err();
        assert_eq!(err, Error::InvalidSecret { len: 135 });

        assert!(Xxh3::oneshot_with_secret(&secret, b"").is_err());
        assert!(Xxh3::oneshot_with_seed_and_secret(1, &secret, &[0; 1000]).is_err());
    }

    #[test]
    fn derive_secret_adds_and_subtracts_the_seed() {
        let secret = derive_secret(0x702);
        let word = |i: usize| u64::from_le_bytes(secret[i..][..8].try_into().unwrap());

        assert_eq!(word(0), 0xbe4ba423396d05ba);
        assert_eq!(word(8), 0x1cad21f72c80fa7a);
        assert_eq!(word(184), 0x7e404bbbcafbd0ad);
    }

    #[test]
    fn derive_secret_with_zero_seed_is_the_default() {
        assert_eq!(derive_secret(0), DEFAULT_SECRET_RAW);
    }

    #[test]
    fn derived_secret_gives_the_seeded_hash() {
        let derived = derive_secret(0xdeadcafe);
        let input = gen_bytes(1024);

        assert_eq!(
            Xxh3::oneshot_with_secret(&derived, &input).unwrap(),
            0x24839f0fcdf4d078,
        );
    }

    #[test]
    fn long_hash_override_is_used_verbatim_for_long_inputs() {
        let hasher = Xxh3::new()
            .with_seed(0x702)
            .with_long_hash(|input: &[u8], seed: u64, secret: &Secret| {
                input.len() as u64 ^ seed ^ secret.len() as u64
            });

        assert_eq!(hasher.hash(&gen_bytes(241)), 241 ^ 0x702 ^ 192);
        assert_eq!(hasher.hash(&[]), Xxh3::oneshot_with_seed(0x702, &[]));
        assert_ne!(hasher.hash(&gen_bytes(240)), 240 ^ 0x702 ^ 192);
    }

    #[test]
    fn long_hash_override_receives_the_effective_secret() {
        let input = gen_bytes(1024);
        let derived = derive_secret(0xdeadcafe);

        let hasher = Xxh3::new()
            .with_seed(0xdeadcafe)
            .with_long_hash(|_: &[u8], _: u64, secret: &Secret| {
                u64::from(secret.as_bytes() == &derived[..])
            });
        assert_eq!(hasher.hash(&input), 1);

        let custom = secret_of(200, 17, 3);
        let hasher = Xxh3::new()
            .with_seed(0xdeadcafe)
            .with_secret(&custom)
            .unwrap()
            .with_long_hash(|_: &[u8], _: u64, secret: &Secret| {
                u64::from(secret.as_bytes() == &custom[..])
            });
        assert_eq!(hasher.hash(&input), 1);
    }

    #[test]
    fn built_in_kernels_agree() {
        let input = gen_bytes(10240);
        let expected = 0xbcd63266df6e2244;

        assert_eq!(Xxh3::new().with_long_hash(Scalar).hash(&input), expected);
        assert_eq!(Xxh3::new().with_long_hash(Detected).hash(&input), expected);
    }

    #[test]
    fn hash_hex_formats_the_hash() {
        let hasher = Xxh3::new();
        assert_eq!(hasher.hash_hex(b"Hello, world!").as_str(), "f3c34bf11915e869");
        assert_eq!(hasher.hash_hex(&[]).value(), 0x2d06800538d394c2);
    }

    #[test]
    fn hashing_from_many_threads_matches_sequential_results() {
        let secret = secret_of(200, 17, 3);
        let hasher = Xxh3::new().with_seed(42).with_secret(&secret).unwrap();
        let inputs: Vec<_> = (0..=300).step_by(7).map(gen_bytes).collect();
        let sequential: Vec<_> = inputs.iter().map(|i| hasher.hash(i)).collect();

        thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| inputs.iter().map(|i| hasher.hash(i)).collect::<Vec<_>>()))
                .collect();

            for handle in handles {
                assert_eq!(handle.join().unwrap(), sequential);
            }
        });
    }
}
