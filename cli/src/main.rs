mod config;
mod generate;
mod sink;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{value_parser, Parser};
use tracing_subscriber::EnvFilter;

use generate::generate;

/// Rainbow table generator.
/// Every parameter can also be read from a TOML file given with `--config`,
/// values given on the command line take precedence.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The hash function: sha1, sha256 or sha512.
    #[arg(short = 'H', long)]
    hash: Option<String>,

    /// The charset to use.
    /// The order of the characters changes the reduction function.
    #[arg(short, long, value_parser = check_charset)]
    charset: Option<String>,

    /// The length of the passwords in the table.
    #[arg(short = 'l', long, value_parser = value_parser!(u64).range(1..=100))]
    password_length: Option<u64>,

    /// The chain length.
    #[arg(short = 't', long, value_parser = value_parser!(u64).range(1..))]
    chain_length: Option<u64>,

    /// The number of chains to generate.
    #[arg(short = 'n', long, value_parser = value_parser!(u64).range(1..))]
    chain_count: Option<u64>,

    /// The number of worker threads. Defaults to one per logical core.
    #[arg(short = 'j', long, value_parser = value_parser!(u64).range(1..))]
    threads: Option<u64>,

    /// Seed used to draw the startpoints, to reproduce a table.
    #[arg(long)]
    seed: Option<u64>,

    /// The file where the table should be written.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// A TOML file holding default values for the parameters above.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Checks if the charset is made of ASCII characters.
fn check_charset(charset: &str) -> Result<String> {
    if !charset.is_ascii() {
        bail!("The charset can only contain ASCII characters");
    }

    if charset.is_empty() {
        bail!("The charset cannot be empty");
    }

    Ok(charset.to_owned())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    generate(Cli::parse())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::Cli;

    #[test]
    fn test_parse_args() {
        let cli = Cli::try_parse_from([
            "rtgen", "-H", "sha512", "-c", "abc", "-l", "4", "-t", "10", "-n", "20", "-j", "2",
        ])
        .unwrap();

        assert_eq!(Some("sha512"), cli.hash.as_deref());
        assert_eq!(Some("abc"), cli.charset.as_deref());
        assert_eq!(Some(4), cli.password_length);
        assert_eq!(Some(10), cli.chain_length);
        assert_eq!(Some(20), cli.chain_count);
        assert_eq!(Some(2), cli.threads);
        assert!(cli.seed.is_none());
    }

    #[test]
    fn test_reject_bad_args() {
        assert!(Cli::try_parse_from(["rtgen", "-c", "é"]).is_err());
        assert!(Cli::try_parse_from(["rtgen", "-l", "0"]).is_err());
        assert!(Cli::try_parse_from(["rtgen", "-l", "101"]).is_err());
        assert!(Cli::try_parse_from(["rtgen", "-n", "0"]).is_err());
        assert!(Cli::try_parse_from(["rtgen", "-t", "-3"]).is_err());
    }
}
