//! A Rust implementation of the [XXH3][] 64-bit hash, with custom
//! secrets, seeds, pluggable long-input strategies, and hexadecimal
//! rendering of the result.
//!
//! [XXH3]: https://github.com/Cyan4973/xxHash
//!
//! ### Hashing with the defaults
//!
//! ```rust
//! assert_eq!(xxh3_hex::hash(b"hello"), 0x9555_e855_5c62_dcfd);
//! assert_eq!(xxh3_hex::hash_hex(b"Hello, world!").as_str(), "f3c34bf11915e869");
//! ```
//!
//! ### With a seed and a secret
//!
//! ```rust
//! use xxh3_hex::Xxh3;
//!
//! let hash = Xxh3::oneshot_with_seed(0x702, b"Hello, world!");
//! assert_eq!(hash, 0x8ec7_b6d9_d1d4_b191);
//!
//! let secret = [0u8; 136];
//! let hash = Xxh3::oneshot_with_secret(&secret, b"Hello, world!")?;
//! assert_eq!(hash, 0x7d43_3b52_8dca_8e34);
//!
//! let short = [0u8; 100];
//! assert!(Xxh3::oneshot_with_secret(&short, b"Hello, world!").is_err());
//! # Ok::<(), xxh3_hex::Error>(())
//! ```
//!
//! ## Feature flags
//!
//! | name      | description                                                  |
//! |-----------|--------------------------------------------------------------|
//! | std       | Runtime detection of the fastest long-input kernel           |
//! | alloc     | Conversion of [`HexString`][] into an owned `String`         |
//! | random    | Random seeds and secrets via [`random_seed`][] and friends   |
//! | serialize | [Serde][serde] support for [`HexString`][]                   |
//!
//! [serde]: https://crates.io/crates/serde

#![deny(rust_2018_idioms)]
#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Only runtime CPU feature detection and the tests need `std`
#[cfg(any(all(feature = "std", target_arch = "x86_64"), test))]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc;

mod error;

pub use error::Error;

mod hex;

pub use hex::{HexString, ParseHexError};

pub mod xxhash3_64;

pub use xxhash3_64::{derive_secret, LongHash, Secret, Xxh3, SECRET_MINIMUM_LENGTH};

#[cfg(feature = "random")]
mod random;

#[cfg(feature = "random")]
#[cfg_attr(docsrs, doc(cfg(feature = "random")))]
pub use random::{random_secret, random_seed};

/// Hashes `input` with the default secret and a seed of zero.
#[must_use]
#[inline]
pub fn hash(input: &[u8]) -> u64 {
    Xxh3::oneshot(input)
}

/// Hashes `input` with the default secret and a seed of zero and
/// renders the result as 16 lowercase hexadecimal digits.
#[must_use]
#[inline]
pub fn hash_hex(input: &[u8]) -> HexString {
    Xxh3::new().hash_hex(input)
}

trait IntoU32 {
    fn into_u32(self) -> u32;
}

impl IntoU32 for u8 {
    fn into_u32(self) -> u32 {
        self.into()
    }
}

trait IntoU64 {
    fn into_u64(self) -> u64;
}

impl IntoU64 for u8 {
    fn into_u64(self) -> u64 {
        self.into()
    }
}

impl IntoU64 for u32 {
    fn into_u64(self) -> u64 {
        self.into()
    }
}

#[cfg(any(target_pointer_width = "32", target_pointer_width = "64"))]
impl IntoU64 for usize {
    fn into_u64(self) -> u64 {
        self as u64
    }
}

trait IntoU128 {
    fn into_u128(self) -> u128;
}

impl IntoU128 for u64 {
    fn into_u128(self) -> u128 {
        u128::from(self)
    }
}
