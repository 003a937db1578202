use serde::{Deserialize, Serialize};

use crate::{
    error::{RtgenError, RtgenResult},
    hash::HashFunction,
    DEFAULT_CHAIN_COUNT, DEFAULT_CHAIN_LENGTH, DEFAULT_CHARSET, DEFAULT_HASH_FUNCTION,
    DEFAULT_PASSWORD_LENGTH, MAX_CHARSET_LENGTH_ALLOWED, MAX_PASSWORD_LENGTH_ALLOWED,
};

/// A builder for a rainbow table context.
#[derive(Clone, Debug)]
pub struct RainbowTableCtxBuilder {
    algorithm: String,
    charset: Vec<u8>,
    password_length: usize,
    t: u64,
    m0: u64,
    threads: Option<usize>,
    seed: Option<u64>,
}

impl Default for RainbowTableCtxBuilder {
    fn default() -> Self {
        Self {
            algorithm: DEFAULT_HASH_FUNCTION.name().to_owned(),
            charset: DEFAULT_CHARSET.to_owned(),
            password_length: DEFAULT_PASSWORD_LENGTH,
            t: DEFAULT_CHAIN_LENGTH,
            m0: DEFAULT_CHAIN_COUNT,
            threads: None,
            seed: None,
        }
    }
}

impl RainbowTableCtxBuilder {
    /// Creates a new RainbowTableCtxBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hash function of the context.
    pub fn hash(mut self, hash_function: HashFunction) -> Self {
        self.algorithm = hash_function.name().to_owned();

        self
    }

    /// Sets the hash function of the context from its name.
    /// The name is only checked when the context is built.
    pub fn algorithm(mut self, algorithm: &str) -> Self {
        self.algorithm = algorithm.to_owned();

        self
    }

    /// Sets the charset of the context.
    /// The order of the characters matters to the reduction function.
    pub fn charset(mut self, charset: &[u8]) -> Self {
        self.charset = charset.to_owned();

        self
    }

    /// Sets the length of the passwords of the context.
    pub fn password_length(mut self, password_length: usize) -> Self {
        self.password_length = password_length;

        self
    }

    /// Sets the length of the chain of the context.
    /// Increasing the chain length will reduce the memory used
    /// to store the table but increase the time taken to generate it.
    pub fn chain_length(mut self, chain_length: u64) -> Self {
        self.t = chain_length;

        self
    }

    /// Sets the number of chains of the context.
    pub fn chain_count(mut self, chain_count: u64) -> Self {
        self.m0 = chain_count;

        self
    }

    /// Sets the number of worker threads.
    /// `None` uses one thread per logical core.
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;

        self
    }

    /// Sets the seed used to draw the startpoints.
    /// `None` draws a fresh seed for every generation.
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;

        self
    }

    /// Builds a RainbowTableCtx with the specified parameters.
    pub fn build(self) -> RtgenResult<RainbowTableCtx> {
        let hash_function = self.algorithm.parse::<HashFunction>()?;

        let ctx = RainbowTableCtx {
            hash_function,
            charset: self.charset,
            password_length: self.password_length,
            t: self.t,
            m0: self.m0,
            threads: self.threads,
            seed: self.seed,
        };
        ctx.validate()?;

        Ok(ctx)
    }
}

fn invalid(reason: impl Into<String>) -> RtgenError {
    RtgenError::InvalidParameters(reason.into())
}

/// Context used to store all parameters used to generate a rainbow table.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RainbowTableCtx {
    /// The hash function used.
    pub hash_function: HashFunction,
    /// The charset used.
    pub charset: Vec<u8>,
    /// The length of every password of the table.
    pub password_length: usize,
    /// The length of a chain.
    pub t: u64,
    /// The number of chains to generate.
    pub m0: u64,
    /// The number of worker threads, if not left to the default.
    pub threads: Option<usize>,
    /// The seed used to draw the startpoints, if fixed.
    pub seed: Option<u64>,
}

impl RainbowTableCtx {
    /// Checks that the parameters describe a table that can be generated.
    pub fn validate(&self) -> RtgenResult<()> {
        if self.charset.is_empty() {
            return Err(invalid("the charset is empty"));
        }

        if self.charset.len() > MAX_CHARSET_LENGTH_ALLOWED {
            return Err(invalid(format!(
                "the charset is limited to {MAX_CHARSET_LENGTH_ALLOWED} characters, got {}",
                self.charset.len()
            )));
        }

        if !self.charset.is_ascii() {
            return Err(invalid("the charset can only contain ASCII characters"));
        }

        if self.password_length == 0 || self.password_length > MAX_PASSWORD_LENGTH_ALLOWED {
            return Err(invalid(format!(
                "the password length should be between 1 and {MAX_PASSWORD_LENGTH_ALLOWED}, got {}",
                self.password_length
            )));
        }

        if self.t == 0 {
            return Err(invalid("the chain length should be positive"));
        }

        if self.m0 == 0 {
            return Err(invalid("the number of chains should be positive"));
        }

        if self.threads == Some(0) {
            return Err(invalid("the number of threads should be positive"));
        }

        Ok(())
    }
}

#[cfg(test)]
pub fn build_test_ctx() -> RainbowTableCtx {
    RainbowTableCtx {
        hash_function: HashFunction::Sha256,
        charset: b"abc".to_vec(),
        password_length: 3,
        t: 2,
        m0: 1,
        threads: None,
        seed: Some(42),
    }
}
