use std::{fmt::Display, str::FromStr};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::{error::RtgenError, MAX_DIGEST_LENGTH_ALLOWED};

/// A digest stored in a stack-allocated vector.
pub type Digest = ArrayVec<u8, MAX_DIGEST_LENGTH_ALLOWED>;

/// All the supported hash functions.
#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HashFunction {
    Sha1,
    Sha256,
    Sha512,
}

impl HashFunction {
    /// Returns the size of a digest produced by this hash function, in bytes.
    pub fn digest_size(&self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }

    /// Hashes a password using the right hash function.
    #[inline]
    pub fn hash(&self, password: &[u8]) -> Digest {
        match self {
            Self::Sha1 => digest_with::<Sha1>(password),
            Self::Sha256 => digest_with::<Sha256>(password),
            Self::Sha512 => digest_with::<Sha512>(password),
        }
    }

    /// Returns the name used to select this hash function.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }
}

#[inline]
fn digest_with<D: digest::Digest>(password: &[u8]) -> Digest {
    // all supported output sizes fit in MAX_DIGEST_LENGTH_ALLOWED
    let mut digest = Digest::new();
    digest.extend(D::digest(password));

    digest
}

impl FromStr for HashFunction {
    type Err = RtgenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            _ => Err(RtgenError::InvalidAlgorithm(s.to_owned())),
        }
    }
}

impl Display for HashFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
