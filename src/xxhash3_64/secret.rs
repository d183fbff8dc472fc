use core::{fmt, hint::assert_unchecked, mem};

use super::SliceBackport as _;
use crate::Error;

/// The minimum length of a secret.
pub const SECRET_MINIMUM_LENGTH: usize = 136;

/// A secret that is known to be at least
/// [`SECRET_MINIMUM_LENGTH`][] bytes long.
///
/// This is a view over caller-owned bytes; nothing is copied when
/// one is created.
#[repr(transparent)]
pub struct Secret([u8]);

impl Secret {
    /// Validates the length of the secret.
    #[inline]
    pub fn new(bytes: &[u8]) -> Result<&Self, Error> {
        if bytes.len() < SECRET_MINIMUM_LENGTH {
            return Err(Error::InvalidSecret { len: bytes.len() });
        }

        // Safety: We just checked the length.
        Ok(unsafe { Self::new_unchecked(bytes) })
    }

    /// # Safety
    ///
    /// You must ensure that the secret byte length is at least
    /// [`SECRET_MINIMUM_LENGTH`][].
    #[inline]
    pub const unsafe fn new_unchecked(bytes: &[u8]) -> &Self {
        // Safety: We are `#[repr(transparent)]`. It's up to the
        // caller to ensure the length.
        unsafe { mem::transmute(bytes) }
    }

    /// The 192-byte table used when no secret is provided.
    #[inline]
    pub const fn default_secret() -> &'static Self {
        super::DEFAULT_SECRET
    }

    /// The raw secret bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The number of bytes in the secret. Never less than
    /// [`SECRET_MINIMUM_LENGTH`][].
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// The number of stripes consumed between two scrambles.
    #[inline]
    pub(super) fn stripes_per_block(&self) -> usize {
        self.reassert_preconditions();
        (self.0.len() - 64) / 8
    }

    #[inline]
    pub(super) fn words_for_0(&self) -> [u64; 2] {
        self.reassert_preconditions();
        let (words, _) = self.0[56..].bp_as_chunks();
        [words[0], words[1]].map(u64::from_le_bytes)
    }

    #[inline]
    pub(super) fn words_for_1_to_3(&self) -> [u32; 2] {
        self.reassert_preconditions();
        let (words, _) = self.0.bp_as_chunks();
        [words[0], words[1]].map(u32::from_le_bytes)
    }

    #[inline]
    pub(super) fn words_for_4_to_8(&self) -> [u64; 2] {
        self.reassert_preconditions();
        let (words, _) = self.0[8..].bp_as_chunks();
        [words[0], words[1]].map(u64::from_le_bytes)
    }

    #[inline]
    pub(super) fn words_for_9_to_16(&self) -> [u64; 4] {
        self.reassert_preconditions();
        let (words, _) = self.0[24..].bp_as_chunks();
        [words[0], words[1], words[2], words[3]].map(u64::from_le_bytes)
    }

    /// Pairs of 16-byte keys; the first of each pair mixes a chunk
    /// read from the front of the input, the second one read from
    /// the back.
    #[inline]
    pub(super) fn words_for_17_to_128(&self) -> &[[[u8; 16]; 2]] {
        self.reassert_preconditions();
        let (keys, _) = self.0[..128].bp_as_chunks::<16>();
        let (pairs, _) = keys.bp_as_chunks::<2>();
        pairs
    }

    #[inline]
    pub(super) fn words_for_129_to_240_head(&self) -> &[[u8; 16]] {
        self.reassert_preconditions();
        let (keys, _) = self.0[..128].bp_as_chunks();
        keys
    }

    #[inline]
    pub(super) fn words_for_129_to_240_body(&self) -> &[[u8; 16]] {
        self.reassert_preconditions();
        let (keys, _) = self.0[3..].bp_as_chunks();
        keys
    }

    #[inline]
    pub(super) fn words_for_129_to_240_tail(&self) -> &[u8; 16] {
        self.array_at(SECRET_MINIMUM_LENGTH - 17)
    }

    /// The key for stripe `i` within a block.
    #[inline]
    pub(super) fn stripe(&self, i: usize) -> &[u8; 64] {
        debug_assert!(i < self.stripes_per_block());
        self.array_at(i * 8)
    }

    /// The key used to scramble the accumulator after every block.
    #[inline]
    pub(super) fn scramble_key(&self) -> &[u8; 64] {
        self.array_at(self.0.len() - 64)
    }

    /// The key used for the final, possibly overlapping, stripe.
    #[inline]
    pub(super) fn last_stripe_key(&self) -> &[u8; 64] {
        self.array_at(self.0.len() - 64 - 7)
    }

    /// The keys used to merge the accumulator lanes pairwise.
    #[inline]
    pub(super) fn merge_key(&self) -> &[u8; 64] {
        self.array_at(11)
    }

    #[inline]
    fn array_at<const N: usize>(&self, offset: usize) -> &[u8; N] {
        self.reassert_preconditions();
        let bytes = &self.0[offset..][..N];
        // Safety: `bytes` has exactly `N` elements and arrays share
        // the alignment of their element type.
        unsafe { &*bytes.as_ptr().cast::<[u8; N]>() }
    }

    #[inline(always)]
    fn reassert_preconditions(&self) {
        // Safety: The length of the bytes was checked at value
        // construction time.
        unsafe {
            debug_assert!(self.is_valid());
            assert_unchecked(self.is_valid());
        }
    }

    #[inline(always)]
    pub(super) fn is_valid(&self) -> bool {
        self.0.len() >= SECRET_MINIMUM_LENGTH
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

impl AsRef<[u8]> for Secret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn secret_at_the_minimum_length_is_accepted() {
        let bytes = [0; SECRET_MINIMUM_LENGTH];
        let secret = Secret::new(&bytes).unwrap();
        assert_eq!(secret.len(), SECRET_MINIMUM_LENGTH);
        assert_eq!(secret.stripes_per_block(), 9);
    }

    #[test]
    fn secret_one_byte_short_is_rejected() {
        let bytes = [0; SECRET_MINIMUM_LENGTH - 1];
        let err = Secret::new(&bytes).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidSecret {
                len: SECRET_MINIMUM_LENGTH - 1
            }
        );
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(Secret::new(&[]).is_err());
    }

    #[test]
    fn default_secret_has_sixteen_stripes_per_block() {
        assert_eq!(Secret::default_secret().stripes_per_block(), 16);
    }

    #[test]
    fn keys_are_read_from_their_fixed_offsets() {
        let bytes: [u8; 200] = core::array::from_fn(|i| i as u8);
        let secret = Secret::new(&bytes).unwrap();

        assert_eq!(secret.stripe(3)[0], 24);
        assert_eq!(secret.scramble_key()[0], 136);
        assert_eq!(secret.last_stripe_key()[0], 129);
        assert_eq!(secret.merge_key()[0], 11);
        assert_eq!(secret.words_for_129_to_240_tail()[0], 119);
        assert_eq!(secret.words_for_129_to_240_body()[0][0], 3);
        assert_eq!(secret.words_for_17_to_128()[1][1][0], 48);
        assert_eq!(secret.words_for_1_to_3(), [0x0302_0100, 0x0706_0504]);
    }

    #[test]
    fn debug_output_does_not_reveal_the_bytes() {
        let bytes = [0xab; SECRET_MINIMUM_LENGTH];
        let secret = Secret::new(&bytes).unwrap();
        let output = std::format!("{secret:?}");
        assert_eq!(output, "Secret { len: 136, .. }");
    }
}
