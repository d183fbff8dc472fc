use core::{fmt, ops::Deref, str};

use thiserror::Error as ThisError;

const DIGITS: usize = 16;
const ALPHABET: &[u8; 16] = b"0123456789abcdef";

/// A hash value rendered as exactly 16 lowercase hexadecimal digits,
/// most significant first and zero-padded.
///
/// The digits are stored inline, so no allocation is needed.
///
/// ```rust
/// use xxh3_hex::HexString;
///
/// let hex = HexString::new(0xff);
/// assert_eq!(hex.as_str(), "00000000000000ff");
/// assert_eq!(hex.to_string(), "00000000000000ff");
/// assert_eq!("00000000000000FF".parse::<HexString>(), Ok(hex));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HexString {
    value: u64,
    digits: [u8; DIGITS],
}

impl HexString {
    /// Renders `value`.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        let mut digits = [0; DIGITS];
        let mut i = 0;
        while i < DIGITS {
            let shift = (DIGITS - 1 - i) * 4;
            digits[i] = ALPHABET[((value >> shift) & 0xf) as usize];
            i += 1;
        }
        Self { value, digits }
    }

    /// The hash value that was rendered.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.value
    }

    /// The rendered digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Safety: Every digit comes from `ALPHABET`, which is ASCII
        unsafe { str::from_utf8_unchecked(&self.digits) }
    }
}

impl From<u64> for HexString {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<HexString> for u64 {
    fn from(hex: HexString) -> Self {
        hex.value
    }
}

#[cfg(feature = "alloc")]
impl From<HexString> for alloc::string::String {
    fn from(hex: HexString) -> Self {
        hex.as_str().into()
    }
}

impl Deref for HexString {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for HexString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for HexString {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for HexString {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for HexString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl fmt::Debug for HexString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HexString").field(&self.as_str()).finish()
    }
}

/// The reasons a string is not a rendered hash value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
#[non_exhaustive]
pub enum ParseHexError {
    #[error("expected 16 hexadecimal digits, found {len} bytes")]
    InvalidLength { len: usize },

    #[error("invalid hexadecimal digit {found:?} at byte {index}")]
    InvalidDigit { index: usize, found: char },
}

impl str::FromStr for HexString {
    type Err = ParseHexError;

    /// Upper and lower case digits are both accepted; a sign or
    /// `0x` prefix is not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != DIGITS {
            return Err(ParseHexError::InvalidLength { len: s.len() });
        }

        let value = s.char_indices().try_fold(0u64, |value, (index, found)| {
            let digit = found
                .to_digit(16)
                .ok_or(ParseHexError::InvalidDigit { index, found })?;
            Ok(value << 4 | u64::from(digit))
        })?;

        Ok(Self::new(value))
    }
}

#[cfg(feature = "serialize")]
mod serialize_impl {
    use core::fmt;

    use serde::{
        de::{self, Visitor},
        Deserialize, Deserializer, Serialize, Serializer,
    };

    use super::HexString;

    impl Serialize for HexString {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(self.as_str())
        }
    }

    struct HexVisitor;

    impl Visitor<'_> for HexVisitor {
        type Value = HexString;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a string of 16 hexadecimal digits")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            v.parse().map_err(E::custom)
        }
    }

    impl<'de> Deserialize<'de> for HexString {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_str(HexVisitor)
        }
    }

}
