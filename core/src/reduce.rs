use crate::{
    error::{RtgenError, RtgenResult},
    password::Password,
    MAX_PASSWORD_LENGTH_ALLOWED,
};

/// Folds a digest into a single integer, `acc = acc * 257 + byte` for every byte.
/// Overflow wraps around so the result only depends on the digest.
#[inline]
pub fn fold_digest(digest: &[u8]) -> u64 {
    digest.iter().fold(0u64, |acc, &byte| {
        acc.wrapping_mul(257).wrapping_add(byte as u64)
    })
}

/// Reduces a digest into a password of `length` characters taken from the charset.
/// Fails if the charset is empty or if `length` is not in `1..=MAX_PASSWORD_LENGTH_ALLOWED`.
pub fn reduce(digest: &[u8], charset: &[u8], length: usize) -> RtgenResult<Password> {
    if charset.is_empty() {
        return Err(RtgenError::InvalidParameters("the charset is empty".to_owned()));
    }

    if length == 0 || length > MAX_PASSWORD_LENGTH_ALLOWED {
        return Err(RtgenError::InvalidParameters(format!(
            "the password length should be between 1 and {MAX_PASSWORD_LENGTH_ALLOWED}, got {length}"
        )));
    }

    let mut password = Password::default();
    reduce_into(&mut password, digest, charset, length);

    Ok(password)
}

/// Same as `reduce`, but writes into a password owned by the caller.
/// The charset and length must come from a validated context.
#[inline]
pub(crate) fn reduce_into(password: &mut Password, digest: &[u8], charset: &[u8], length: usize) {
    debug_assert!(!charset.is_empty() && length <= MAX_PASSWORD_LENGTH_ALLOWED);

    let base = charset.len() as u64;
    let mut acc = fold_digest(digest);

    password.clear();
    for _ in 0..length {
        password.push(charset_to_ascii(acc % base, charset));
        acc /= base;
    }
}

/// Converts a character from a charset to its ASCII representation.
#[inline]
pub(crate) fn charset_to_ascii(n: u64, charset: &[u8]) -> u8 {
    charset[n as usize]
}
