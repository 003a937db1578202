use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rtgen_core::RainbowTableCtxBuilder;
use serde::Deserialize;

use crate::Cli;

/// Where the table is written when no output is given.
pub const DEFAULT_OUTPUT: &str = "rainbow_table.txt";

/// The parameters of a generation, as read from a TOML file or from the command line.
/// Missing values fall back to the defaults of the core.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct GenerateConfig {
    pub hash: Option<String>,
    pub charset: Option<String>,
    pub password_length: Option<u64>,
    pub chain_length: Option<u64>,
    pub chain_count: Option<u64>,
    pub threads: Option<u64>,
    pub seed: Option<u64>,
    pub output: Option<PathBuf>,
}

impl GenerateConfig {
    /// Reads a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Unable to read the config file {}", path.display()))?;

        toml::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Takes every value missing from `self` from `fallback`.
    pub fn or(self, fallback: GenerateConfig) -> Self {
        Self {
            hash: self.hash.or(fallback.hash),
            charset: self.charset.or(fallback.charset),
            password_length: self.password_length.or(fallback.password_length),
            chain_length: self.chain_length.or(fallback.chain_length),
            chain_count: self.chain_count.or(fallback.chain_count),
            threads: self.threads.or(fallback.threads),
            seed: self.seed.or(fallback.seed),
            output: self.output.or(fallback.output),
        }
    }

    /// Returns a context builder holding the values set in this config.
    pub fn ctx_builder(&self) -> RainbowTableCtxBuilder {
        let mut builder = RainbowTableCtxBuilder::new()
            .threads(self.threads.map(|threads| threads as usize))
            .seed(self.seed);

        if let Some(hash) = &self.hash {
            builder = builder.algorithm(hash);
        }
        if let Some(charset) = &self.charset {
            builder = builder.charset(charset.as_bytes());
        }
        if let Some(password_length) = self.password_length {
            builder = builder.password_length(password_length as usize);
        }
        if let Some(chain_length) = self.chain_length {
            builder = builder.chain_length(chain_length);
        }
        if let Some(chain_count) = self.chain_count {
            builder = builder.chain_count(chain_count);
        }

        builder
    }

    pub fn output(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }
}

impl From<&Cli> for GenerateConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            hash: cli.hash.clone(),
            charset: cli.charset.clone(),
            password_length: cli.password_length,
            chain_length: cli.chain_length,
            chain_count: cli.chain_count,
            threads: cli.threads,
            seed: cli.seed,
            output: cli.output.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use clap::Parser;
    use rtgen_core::{HashFunction, RtgenError};

    use crate::{
        config::{GenerateConfig, DEFAULT_OUTPUT},
        Cli,
    };

    #[test]
    fn test_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rtgen.toml");
        fs::write(
            &path,
            r#"
hash = "sha1"
charset = "0123456789"
password-length = 8
chain-length = 500
chain-count = 10000
seed = 3
output = "table.txt"
"#,
        )
        .unwrap();

        let config = GenerateConfig::load(&path).unwrap();
        assert_eq!(Some("sha1"), config.hash.as_deref());
        assert_eq!(Some(8), config.password_length);
        assert_eq!(None, config.threads);
        assert_eq!(PathBuf::from("table.txt"), config.output());

        let ctx = config.ctx_builder().build().unwrap();
        assert_eq!(HashFunction::Sha1, ctx.hash_function);
        assert_eq!(b"0123456789".to_vec(), ctx.charset);
        assert_eq!(8, ctx.password_length);
        assert_eq!(500, ctx.t);
        assert_eq!(10_000, ctx.m0);
        assert_eq!(Some(3), ctx.seed);
    }

    #[test]
    fn test_unknown_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rtgen.toml");
        fs::write(&path, "chains = 3\n").unwrap();

        assert!(GenerateConfig::load(&path).is_err());
    }

    #[test]
    fn test_args_override_file() {
        let file = GenerateConfig {
            hash: Some("sha1".to_owned()),
            chain_count: Some(50),
            output: Some(PathBuf::from("from_file.txt")),
            ..Default::default()
        };
        let cli = Cli::try_parse_from(["rtgen", "-H", "sha512", "-t", "7"]).unwrap();

        let config = GenerateConfig::from(&cli).or(file);
        assert_eq!(Some("sha512"), config.hash.as_deref());
        assert_eq!(Some(7), config.chain_length);
        assert_eq!(Some(50), config.chain_count);
        assert_eq!(PathBuf::from("from_file.txt"), config.output());
    }

    #[test]
    fn test_defaults() {
        let config = GenerateConfig::default();
        assert_eq!(PathBuf::from(DEFAULT_OUTPUT), config.output());

        let ctx = config.ctx_builder().build().unwrap();
        assert_eq!(HashFunction::Sha256, ctx.hash_function);
    }

    #[test]
    fn test_unsupported_hash() {
        let config = GenerateConfig {
            hash: Some("md5".to_owned()),
            ..Default::default()
        };

        assert!(matches!(
            config.ctx_builder().build(),
            Err(RtgenError::InvalidAlgorithm(_))
        ));
    }
}
