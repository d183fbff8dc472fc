use super::{SliceBackport as _, Vector, PRIME32_1};

#[derive(Copy, Clone)]
pub struct Impl;

impl Vector for Impl {
    #[inline]
    fn round_scramble(&self, acc: &mut [u64; 8], secret_end: &[u8; 64]) {
        let (keys, _) = secret_end.bp_as_chunks::<8>();

        for (acc, key) in acc.iter_mut().zip(keys) {
            let key = u64::from_le_bytes(*key);
            let mut acc_val = *acc;
            acc_val ^= acc_val >> 47;
            acc_val ^= key;
            acc_val = acc_val.wrapping_mul(PRIME32_1);
            *acc = acc_val;
        }
    }

    #[inline]
    fn accumulate(&self, acc: &mut [u64; 8], stripe: &[u8; 64], secret: &[u8; 64]) {
        let (stripe, _) = stripe.bp_as_chunks::<8>();
        let (secret, _) = secret.bp_as_chunks::<8>();

        for i in 0..8 {
            let stripe = u64::from_le_bytes(stripe[i]);
            let secret = u64::from_le_bytes(secret[i]);

            let value = stripe ^ secret;
            acc[i ^ 1] = acc[i ^ 1].wrapping_add(stripe);
            acc[i] = acc[i].wrapping_add(multiply_low_halves(value, value >> 32));
        }
    }
}

#[inline]
fn multiply_low_halves(lhs: u64, rhs: u64) -> u64 {
    let lhs = lhs & 0xFFFF_FFFF;
    let rhs = rhs & 0xFFFF_FFFF;
    lhs.wrapping_mul(rhs)
}
