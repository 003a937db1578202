use std::{
    fmt::{Debug, Display, Write},
    ops::Deref,
};

use arrayvec::ArrayVec;
use rand::Rng;

use crate::{
    error::{RtgenError, RtgenResult},
    MAX_PASSWORD_LENGTH_ALLOWED,
};

/// An ASCII password stored in a stack-allocated vector.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Password(ArrayVec<u8, MAX_PASSWORD_LENGTH_ALLOWED>);

impl Password {
    /// Creates a new password.
    /// Fails if the text is longer than `MAX_PASSWORD_LENGTH_ALLOWED`.
    pub fn new(text: &[u8]) -> RtgenResult<Self> {
        let inner = text.try_into().map_err(|_| {
            RtgenError::InvalidParameters(format!(
                "passwords are limited to {MAX_PASSWORD_LENGTH_ALLOWED} characters, got {}",
                text.len()
            ))
        })?;

        Ok(Password(inner))
    }

    /// Draws a password of `length` characters uniformly from the charset, with replacement.
    /// The charset and length must come from a validated context.
    pub(crate) fn random<R: Rng>(rng: &mut R, charset: &[u8], length: usize) -> Self {
        debug_assert!(!charset.is_empty() && length <= MAX_PASSWORD_LENGTH_ALLOWED);

        let mut password = Password::default();
        for _ in 0..length {
            password.push(charset[rng.random_range(0..charset.len())]);
        }

        password
    }

    /// Appends a character.
    /// The length is bounded by the context validation, so this never overflows.
    #[inline]
    pub(crate) fn push(&mut self, c: u8) {
        self.0.push(c);
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

impl AsRef<[u8]> for Password {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Deref for Password {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // charsets are checked to be ASCII
        for &c in self.0.iter() {
            f.write_char(c as char)?;
        }

        Ok(())
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Password as Display>::fmt(self, f)
    }
}
