use rand::{self, Rng, RngCore};

use crate::xxhash3_64::DEFAULT_SECRET_LENGTH;

/// A seed from the thread-local random number generator.
///
/// Use this when hash values only need to be stable within one
/// process, to make them hard to predict from outside.
#[cfg_attr(docsrs, doc(cfg(feature = "random")))]
pub fn random_seed() -> u64 {
    rand::thread_rng().gen()
}

/// A secret of the default length, filled from the thread-local
/// random number generator.
///
/// ```rust
/// use xxh3_hex::{random_secret, Xxh3};
///
/// let secret = random_secret();
/// let hasher = Xxh3::new().with_secret(&secret)?;
/// assert_eq!(hasher.hash(b"data"), hasher.hash(b"data"));
/// # Ok::<(), xxh3_hex::Error>(())
/// ```
#[cfg_attr(docsrs, doc(cfg(feature = "random")))]
pub fn random_secret() -> [u8; DEFAULT_SECRET_LENGTH] {
    let mut secret = [0; DEFAULT_SECRET_LENGTH];
    rand::thread_rng().fill_bytes(&mut secret);
    secret
}
