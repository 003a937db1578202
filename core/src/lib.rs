pub mod chain;
pub mod ctx;
pub mod error;
pub mod event;
pub mod hash;
pub mod password;
pub mod rainbow_table;
pub mod reduce;
pub mod scheduling;

pub use {
    chain::{build_chain, RainbowChain},
    ctx::{RainbowTableCtx, RainbowTableCtxBuilder},
    error::{RtgenError, RtgenResult},
    event::{Event, SimpleTableHandle},
    hash::{Digest, HashFunction},
    password::Password,
    rainbow_table::{GenerationStats, SimpleTable},
    reduce::reduce,
};

/// The default hash function.
pub const DEFAULT_HASH_FUNCTION: HashFunction = HashFunction::Sha256;

/// The default chain length.
pub const DEFAULT_CHAIN_LENGTH: u64 = 1_000;

/// The default number of chains.
pub const DEFAULT_CHAIN_COUNT: u64 = 1_000;

/// The default password length.
pub const DEFAULT_PASSWORD_LENGTH: usize = 6;

/// The default charset.
pub const DEFAULT_CHARSET: &[u8] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The maximum password size allowed.
pub const MAX_PASSWORD_LENGTH_ALLOWED: usize = 100;

/// The maximum digest size allowed.
pub const MAX_DIGEST_LENGTH_ALLOWED: usize = 64;

/// The maximum charset length allowed.
pub const MAX_CHARSET_LENGTH_ALLOWED: usize = 126;

/// Generates a rainbow table, blocking until every chain is computed.
pub fn generate_table(ctx: RainbowTableCtx) -> RtgenResult<SimpleTable> {
    SimpleTable::new(ctx)
}

#[cfg(test)]
mod tests {
    use crate::{generate_table, RainbowTableCtxBuilder, RtgenError};

    #[test]
    fn test_unsupported_algorithm() {
        let result = RainbowTableCtxBuilder::new()
            .algorithm("md5")
            .build()
            .and_then(generate_table);

        assert!(matches!(result, Err(RtgenError::InvalidAlgorithm(_))));
    }

    #[test]
    fn test_generate_table() {
        let build = || {
            RainbowTableCtxBuilder::new()
                .algorithm("sha256")
                .charset(b"abc")
                .password_length(3)
                .chain_length(2)
                .chain_count(1)
                .seed(Some(0xdead_beef))
                .build()
                .and_then(generate_table)
                .unwrap()
        };

        let table = build();
        assert_eq!(1, table.len());
        assert_eq!(3, table.chains()[0].startpoint.len());
        assert_eq!(32, table.chains()[0].endpoint.len());
        assert_eq!(table.chains(), build().chains());
    }
}
