//! Config extraction and validation errors.

use alloy_primitives::utils::UnitsError;
use std::{fmt, path::PathBuf};

use crate::ENV_PREFIX;

/// The message shown when the config could not be extracted from the figment.
pub const FAILED_TO_EXTRACT_CONFIG_MSG: &str = "failed to extract nft-mint config:";

/// Metadata name of the provider carrying command line overrides.
pub const CLI_PROVIDER_NAME: &str = "command line arguments";

/// Failed attempt to extract a `MintConfig`, with one entry per offending value.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractConfigError {
    errors: Vec<MintConfigError>,
}

impl ExtractConfigError {
    pub fn new(error: figment::Error) -> Self {
        let mut errors: Vec<MintConfigError> = Vec::with_capacity(error.count());
        for err in error {
            let err = MintConfigError::from(err);
            // figment reports the same value once per profile
            if !errors.contains(&err) {
                errors.push(err);
            }
        }
        Self { errors }
    }

    /// The values that could not be extracted.
    pub fn errors(&self) -> &[MintConfigError] {
        &self.errors
    }
}

impl fmt::Display for ExtractConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{FAILED_TO_EXTRACT_CONFIG_MSG}")?;
        for err in &self.errors {
            writeln!(f, "  {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ExtractConfigError {}

/// A config value that could not be extracted, named by where the user set it.
#[derive(Clone, Debug, PartialEq)]
pub enum MintConfigError {
    /// Set in a config file.
    File { file: PathBuf, error: figment::Error },
    /// Set through an `NFT_MINT_*` environment variable.
    Env { var: String, error: figment::Error },
    /// Set through a command line flag.
    Flag { flag: String, error: figment::Error },
    /// Anything else, e.g. a value that is required but missing.
    Other(figment::Error),
}

impl From<figment::Error> for MintConfigError {
    fn from(error: figment::Error) -> Self {
        let Some(meta) = &error.metadata else { return Self::Other(error) };

        if let Some(file) = meta.source.as_ref().and_then(|source| source.file_path()) {
            let file = file.to_path_buf();
            return Self::File { file, error };
        }
        if meta.name.contains("environment variable") {
            // nested keys are split on `__`
            let var = format!("{ENV_PREFIX}{}", error.path.join("__").to_ascii_uppercase());
            return Self::Env { var, error };
        }
        if meta.name == CLI_PROVIDER_NAME {
            let flag = format!("--{}", error.path.join("-").replace('_', "-"));
            return Self::Flag { flag, error };
        }
        Self::Other(error)
    }
}

impl fmt::Display for MintConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { file, error } => {
                write!(f, "{}: {}", file.display(), error.kind)?;
                if !error.path.is_empty() {
                    write!(f, " for `{}`", error.path.join("."))?;
                }
                Ok(())
            }
            Self::Env { var, error } => write!(f, "environment variable `{var}`: {}", error.kind),
            Self::Flag { flag, error } => write!(f, "`{flag}`: {}", error.kind),
            Self::Other(error) => {
                write!(f, "{}", error.kind)?;
                if !error.path.is_empty() {
                    write!(f, " for `{}`", error.path.join("."))?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for MintConfigError {}

/// A config value that extracted fine but cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum InvalidConfigError {
    #[error("invalid `mint_price` {value:?}: {source}")]
    MintPrice {
        value: String,
        #[source]
        source: UnitsError,
    },
    #[error("`mint_quantity` must be at least 1")]
    ZeroQuantity,
    #[error("`required_chain_id` must be a 0x-prefixed hex quantity, got {0:?}")]
    ChainId(String),
}
