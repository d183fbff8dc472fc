use core::arch::x86_64::*;

use super::{Vector, PRIME32_1};

#[derive(Copy, Clone)]
pub struct Impl(());

impl Impl {
    /// # Safety
    ///
    /// You must ensure that the CPU has the SSE2 feature
    #[inline]
    pub unsafe fn new_unchecked() -> Impl {
        Impl(())
    }
}

impl Vector for Impl {
    #[inline]
    fn round_scramble(&self, acc: &mut [u64; 8], secret_end: &[u8; 64]) {
        // Safety: Type can only be constructed when SSE2 feature is present
        unsafe { round_scramble_sse2(acc, secret_end) }
    }

    #[inline]
    fn accumulate(&self, acc: &mut [u64; 8], stripe: &[u8; 64], secret: &[u8; 64]) {
        // Safety: Type can only be constructed when SSE2 feature is present
        unsafe { accumulate_sse2(acc, stripe, secret) }
    }
}

/// # Safety
///
/// You must ensure that the CPU has the SSE2 feature
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn round_scramble_sse2(acc: &mut [u64; 8], secret_end: &[u8; 64]) {
    // Safety: The caller has ensured we have the SSE2
    // feature. We load from and store to references so we
    // know that data is valid. We use unaligned loads /
    // stores. Data manipulation is otherwise done on
    // intermediate values.
    unsafe {
        let xacc = acc.as_mut_ptr().cast::<__m128i>();
        let xsecret = secret_end.as_ptr().cast::<__m128i>();
        let prime = _mm_set1_epi32(PRIME32_1 as i32);

        for i in 0..4 {
            let lanes = _mm_loadu_si128(xacc.add(i));
            let shifted = _mm_srli_epi64::<47>(lanes);
            let lanes = _mm_xor_si128(lanes, shifted);

            let key = _mm_loadu_si128(xsecret.add(i));
            let keyed = _mm_xor_si128(lanes, key);

            let product_lo = _mm_mul_epu32(keyed, prime);
            let keyed_hi = _mm_shuffle_epi32::<0b00_11_00_01>(keyed);
            let product_hi = _mm_mul_epu32(keyed_hi, prime);
            let product_hi = _mm_slli_epi64::<32>(product_hi);

            _mm_storeu_si128(xacc.add(i), _mm_add_epi64(product_lo, product_hi));
        }
    }
}

/// # Safety
///
/// You must ensure that the CPU has the SSE2 feature
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn accumulate_sse2(acc: &mut [u64; 8], stripe: &[u8; 64], secret: &[u8; 64]) {
    // Safety: The caller has ensured we have the SSE2
    // feature. We load from and store to references so we
    // know that data is valid. We use unaligned loads /
    // stores. Data manipulation is otherwise done on
    // intermediate values.
    unsafe {
        let xacc = acc.as_mut_ptr().cast::<__m128i>();
        let xstripe = stripe.as_ptr().cast::<__m128i>();
        let xsecret = secret.as_ptr().cast::<__m128i>();

        for i in 0..4 {
            let lanes = _mm_loadu_si128(xacc.add(i));
            let data = _mm_loadu_si128(xstripe.add(i));
            let key = _mm_loadu_si128(xsecret.add(i));

            let keyed = _mm_xor_si128(data, key);
            let keyed_hi = _mm_shuffle_epi32::<0b00_11_00_01>(keyed);
            let product = _mm_mul_epu32(keyed, keyed_hi);

            let data_swapped = _mm_shuffle_epi32::<0b01_00_11_10>(data);
            let sum = _mm_add_epi64(lanes, data_swapped);

            _mm_storeu_si128(xacc.add(i), _mm_add_epi64(product, sum));
        }
    }
}
