//! Strategies for hashing inputs longer than [`CUTOFF`][super::CUTOFF]
//! bytes.

use super::{impl_short, scalar, Algorithm, Secret, Vector, CUTOFF};

#[cfg(target_arch = "x86_64")]
use super::{avx2, sse2};

/// Hashes inputs longer than [`CUTOFF`][super::CUTOFF] bytes.
///
/// Implementations are called concurrently from any thread that
/// shares the [`Xxh3`][super::Xxh3] value, so they must be `Sync`.
/// The value returned becomes the final hash without further
/// mixing.
///
/// Any `Fn(&[u8], u64, &Secret) -> u64` closure is a `LongHash`:
///
/// ```rust
/// use xxh3_hex::{Secret, Xxh3};
///
/// let hasher = Xxh3::new().with_long_hash(|input: &[u8], _seed: u64, _secret: &Secret| {
///     input.len() as u64
/// });
///
/// assert_eq!(hasher.hash(&[0; 1000]), 1000);
/// assert_ne!(hasher.hash(&[0; 10]), 10);
/// ```
pub trait LongHash: Sync {
    /// `secret` is the effective secret: already seeded when the
    /// caller did not provide one.
    fn hash_long(&self, input: &[u8], seed: u64, secret: &Secret) -> u64;
}

impl<F> LongHash for F
where
    F: Fn(&[u8], u64, &Secret) -> u64 + Sync,
{
    #[inline]
    fn hash_long(&self, input: &[u8], seed: u64, secret: &Secret) -> u64 {
        self(input, seed, secret)
    }
}

#[inline(always)]
fn hash_long_with(vector: impl Vector, input: &[u8], seed: u64, secret: &Secret) -> u64 {
    if input.len() <= CUTOFF {
        return impl_short(secret, seed, input);
    }

    Algorithm(vector).oneshot(secret, input)
}

/// The portable kernel, available everywhere.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Scalar;

impl LongHash for Scalar {
    #[inline]
    fn hash_long(&self, input: &[u8], seed: u64, secret: &Secret) -> u64 {
        hash_long_with(scalar::Impl, input, seed, secret)
    }
}

/// The SSE2 kernel. Holding a value of this type proves that the
/// CPU supports SSE2.
#[cfg(target_arch = "x86_64")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sse2(());

#[cfg(target_arch = "x86_64")]
impl Sse2 {
    /// Returns the kernel if the running CPU supports it.
    #[cfg(feature = "std")]
    pub fn detect() -> Option<Self> {
        if std::arch::is_x86_feature_detected!("sse2") {
            // Safety: We just ensured we have the SSE2 feature
            Some(unsafe { Self::new_unchecked() })
        } else {
            None
        }
    }

    /// # Safety
    ///
    /// You must ensure that the CPU has the SSE2 feature
    pub const unsafe fn new_unchecked() -> Self {
        Self(())
    }
}

#[cfg(target_arch = "x86_64")]
impl LongHash for Sse2 {
    #[inline]
    fn hash_long(&self, input: &[u8], seed: u64, secret: &Secret) -> u64 {
        // Safety: Type can only be constructed when SSE2 feature is present
        unsafe { hash_long_sse2(input, seed, secret) }
    }
}

/// # Safety
///
/// You must ensure that the CPU has the SSE2 feature
#[cfg(target_arch = "x86_64")]
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn hash_long_sse2(input: &[u8], seed: u64, secret: &Secret) -> u64 {
    // Safety: The caller has ensured we have the SSE2 feature
    let vector = unsafe { sse2::Impl::new_unchecked() };
    hash_long_with(vector, input, seed, secret)
}

/// The AVX2 kernel. Holding a value of this type proves that the
/// CPU supports AVX2.
#[cfg(target_arch = "x86_64")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Avx2(());

#[cfg(target_arch = "x86_64")]
impl Avx2 {
    /// Returns the kernel if the running CPU supports it.
    #[cfg(feature = "std")]
    pub fn detect() -> Option<Self> {
        if std::arch::is_x86_feature_detected!("avx2") {
            // Safety: We just ensured we have the AVX2 feature
            Some(unsafe { Self::new_unchecked() })
        } else {
            None
        }
    }

    /// # Safety
    ///
    /// You must ensure that the CPU has the AVX2 feature
    pub const unsafe fn new_unchecked() -> Self {
        Self(())
    }
}

#[cfg(target_arch = "x86_64")]
impl LongHash for Avx2 {
    #[inline]
    fn hash_long(&self, input: &[u8], seed: u64, secret: &Secret) -> u64 {
        // Safety: Type can only be constructed when AVX2 feature is present
        unsafe { hash_long_avx2(input, seed, secret) }
    }
}

/// # Safety
///
/// You must ensure that the CPU has the AVX2 feature
#[cfg(target_arch = "x86_64")]
#[inline]
#[target_feature(enable = "avx2")]
unsafe fn hash_long_avx2(input: &[u8], seed: u64, secret: &Secret) -> u64 {
    // Safety: The caller has ensured we have the AVX2 feature
    let vector = unsafe { avx2::Impl::new_unchecked() };
    hash_long_with(vector, input, seed, secret)
}

/// The kernels that [`Detected`][] chooses between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Kernel {
    Scalar,
    Sse2,
    Avx2,
}

/// Uses the fastest kernel the running CPU supports.
///
/// Without the `std` feature the CPU cannot be queried at runtime,
/// so only the kernels enabled at compile time are considered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Detected;

impl Detected {
    /// The kernel that will be used.
    pub fn kernel(&self) -> Kernel {
        detected_kernel()
    }
}

impl LongHash for Detected {
    #[inline]
    fn hash_long(&self, input: &[u8], seed: u64, secret: &Secret) -> u64 {
        match detected_kernel() {
            #[cfg(target_arch = "x86_64")]
            Kernel::Avx2 => {
                // Safety: `detected_kernel` only reports AVX2 when
                // the CPU has it or when it is forced for testing.
                unsafe { hash_long_avx2(input, seed, secret) }
            }

            #[cfg(target_arch = "x86_64")]
            Kernel::Sse2 => {
                // Safety: `detected_kernel` only reports SSE2 when
                // the CPU has it or when it is forced for testing.
                unsafe { hash_long_sse2(input, seed, secret) }
            }

            _ => Scalar.hash_long(input, seed, secret),
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(_internal_xxh3_force_scalar)] {
        #[inline]
        fn detected_kernel() -> Kernel {
            Kernel::Scalar
        }
    } else if #[cfg(all(target_arch = "x86_64", _internal_xxh3_force_avx2))] {
        #[inline]
        fn detected_kernel() -> Kernel {
            Kernel::Avx2
        }
    } else if #[cfg(all(target_arch = "x86_64", _internal_xxh3_force_sse2))] {
        #[inline]
        fn detected_kernel() -> Kernel {
            Kernel::Sse2
        }
    } else if #[cfg(all(target_arch = "x86_64", feature = "std"))] {
        #[inline]
        fn detected_kernel() -> Kernel {
            if std::arch::is_x86_feature_detected!("avx2") {
                Kernel::Avx2
            } else if std::arch::is_x86_feature_detected!("sse2") {
                Kernel::Sse2
            } else {
                Kernel::Scalar
            }
        }
    } else if #[cfg(all(target_arch = "x86_64", target_feature = "avx2"))] {
        #[inline]
        fn detected_kernel() -> Kernel {
            Kernel::Avx2
        }
    } else if #[cfg(all(target_arch = "x86_64", target_feature = "sse2"))] {
        #[inline]
        fn detected_kernel() -> Kernel {
            Kernel::Sse2
        }
    } else {
        #[inline]
        fn detected_kernel() -> Kernel {
            Kernel::Scalar
        }
    }
}
